//! Score accumulation and score-triggering volumes.
//!
//! [`ScoreBoard`] keeps the running total. Points arrive as [`AwardPoints`]
//! events, typically raised by a [`ScoreVolume`] when a rider enters it, and
//! every award is re-broadcast as [`Scored`] for the HUD and anyone else
//! listening.

use bevy::ecs::prelude::On;
use bevy::prelude::*;
use hashbrown::HashSet;
use log::{debug, info};

use crate::components::{RiderPose, Skater};

/// Running score for the current game.
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScoreBoard {
    total: i32,
}

impl ScoreBoard {
    /// Adds `points` and describes the award.
    ///
    /// The total saturates instead of overflowing.
    ///
    /// # Examples
    /// ```
    /// use skatepark::score::ScoreBoard;
    /// let mut board = ScoreBoard::default();
    /// board.add(100, "Kickflip");
    /// let scored = board.add(50, "Grind");
    /// assert_eq!(scored.total, 150);
    /// assert_eq!(scored.points, 50);
    /// ```
    pub fn add(&mut self, points: i32, message: impl Into<String>) -> Scored {
        self.total = self.total.saturating_add(points);
        Scored {
            total: self.total,
            points,
            message: message.into(),
        }
    }

    /// Score accumulated so far.
    #[must_use]
    pub const fn total(&self) -> i32 {
        self.total
    }
}

/// Request to add points to the [`ScoreBoard`].
#[derive(Event, Debug, Clone, PartialEq, Eq)]
pub struct AwardPoints {
    /// Points to add.
    pub points: i32,
    /// Text shown alongside the award.
    pub message: String,
}

/// Broadcast after every award.
#[derive(Event, Debug, Clone, PartialEq, Eq)]
pub struct Scored {
    /// Score after the award.
    pub total: i32,
    /// Points awarded.
    pub points: i32,
    /// Text shown alongside the award.
    pub message: String,
}

/// Axis-aligned trigger box that awards points when a rider enters it.
#[derive(Component, Debug, Clone)]
pub struct ScoreVolume {
    /// Centre of the box in world space.
    pub centre: Vec3,
    /// Half of the box size along each axis.
    pub half_extents: Vec3,
    /// Points awarded per entry.
    pub points: i32,
    /// Text shown alongside the award.
    pub message: String,
    occupants: HashSet<Entity>,
}

impl ScoreVolume {
    /// Creates an empty volume.
    pub fn new(centre: Vec3, half_extents: Vec3, points: i32, message: impl Into<String>) -> Self {
        Self {
            centre,
            half_extents,
            points,
            message: message.into(),
            occupants: HashSet::new(),
        }
    }

    /// Whether `point` lies inside the box, faces included.
    #[must_use]
    pub fn contains(&self, point: Vec3) -> bool {
        let offset = (point - self.centre).abs();
        offset.cmple(self.half_extents).all()
    }

    /// Records whether `rider` is inside, returning `true` on entry only.
    pub fn update_occupant(&mut self, rider: Entity, inside: bool) -> bool {
        if inside {
            self.occupants.insert(rider)
        } else {
            self.occupants.remove(&rider);
            false
        }
    }
}

#[expect(
    clippy::needless_pass_by_value,
    reason = "Observer systems must accept On<T> by value for Events V2."
)]
fn apply_award(event: On<AwardPoints>, mut board: ResMut<ScoreBoard>, mut commands: Commands) {
    let AwardPoints { points, message } = event.event();
    let scored = board.add(*points, message.clone());
    info!("scored {points} ({message}); total {}", scored.total);
    commands.trigger(scored);
}

/// Awards points for riders that entered a [`ScoreVolume`] since last frame.
///
/// Only entities carrying [`Skater`] count as riders. Riders that no longer
/// exist are forgotten.
pub fn detect_score_volume_overlaps(
    mut commands: Commands,
    mut volumes: Query<&mut ScoreVolume>,
    riders: Query<(Entity, &RiderPose), With<Skater>>,
) {
    for mut volume in &mut volumes {
        volume.occupants.retain(|&rider| riders.contains(rider));
        for (rider, pose) in &riders {
            let inside = volume.contains(pose.location);
            if volume.update_occupant(rider, inside) {
                debug!("rider {rider:?} entered score volume at {:?}", volume.centre);
                commands.trigger(AwardPoints {
                    points: volume.points,
                    message: volume.message.clone(),
                });
            }
        }
    }
}

/// Bevy plugin installing the score board and score volume systems.
#[derive(Default)]
pub struct ScorePlugin;

impl Plugin for ScorePlugin {
    fn build(&self, app: &mut App) {
        crate::plugin::configure_sets(app);
        app.init_resource::<ScoreBoard>();
        app.add_observer(apply_award);
        app.add_systems(
            Update,
            detect_score_volume_overlaps.in_set(crate::plugin::SkateparkSet::Triggers),
        );
    }
}
