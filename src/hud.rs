//! Renderer-agnostic HUD view model.
//!
//! The [`Hud`] resource mirrors what the player should see. A renderer reads
//! it each frame; nothing in here draws.

use bevy::ecs::prelude::On;
use bevy::prelude::*;
use log::debug;

use crate::match_clock::{MatchClock, MatchFinished, MatchTimeUpdated};
use crate::score::{ScoreBoard, Scored};
use crate::skater::RiderPossessed;

/// Latest award shown next to the score.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Award {
    /// Points awarded.
    pub points: i32,
    /// Text describing the trick.
    pub message: String,
}

/// In-match overlay.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlayerDisplay {
    /// Running score.
    pub total_score: i32,
    /// Most recent award, if any.
    pub last_award: Option<Award>,
    /// Seconds left in the match.
    pub remaining_secs: u32,
}

/// Screen shown once the match is over.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EndGameDisplay {
    /// Score at the final whistle.
    pub final_score: i32,
}

/// What the HUD currently shows.
#[derive(Resource, Debug, Clone, Default, PartialEq, Eq)]
pub enum Hud {
    /// No rider possessed yet.
    #[default]
    Hidden,
    /// Match overlay.
    Playing(PlayerDisplay),
    /// Final score screen.
    EndGame(EndGameDisplay),
}

impl Hud {
    /// Shows the in-match overlay.
    pub fn show_player(&mut self, total_score: i32, remaining_secs: u32) {
        *self = Self::Playing(PlayerDisplay {
            total_score,
            last_award: None,
            remaining_secs,
        });
    }

    /// Reflects a score award. Ignored unless the overlay is showing.
    pub fn record_score(&mut self, scored: &Scored) {
        if let Self::Playing(display) = self {
            display.total_score = scored.total;
            display.last_award = Some(Award {
                points: scored.points,
                message: scored.message.clone(),
            });
        }
    }

    /// Reflects the remaining match time. Ignored unless the overlay is
    /// showing.
    pub const fn update_time(&mut self, remaining_secs: u32) {
        if let Self::Playing(display) = self {
            display.remaining_secs = remaining_secs;
        }
    }

    /// Replaces whatever is showing with the end-game screen.
    pub fn show_end_game(&mut self, final_score: i32) {
        *self = Self::EndGame(EndGameDisplay { final_score });
    }

    /// The overlay, when showing.
    #[must_use]
    pub const fn player(&self) -> Option<&PlayerDisplay> {
        match self {
            Self::Playing(display) => Some(display),
            _ => None,
        }
    }
}

#[expect(
    clippy::needless_pass_by_value,
    reason = "Observer systems must accept On<T> by value for Events V2."
)]
fn show_on_possess(
    event: On<RiderPossessed>,
    mut hud: ResMut<Hud>,
    board: Res<ScoreBoard>,
    clock: Res<MatchClock>,
) {
    debug!("hud attached to rider {:?}", event.event().rider);
    hud.show_player(board.total(), clock.duration());
}

#[expect(
    clippy::needless_pass_by_value,
    reason = "Observer systems must accept On<T> by value for Events V2."
)]
fn show_score(event: On<Scored>, mut hud: ResMut<Hud>) {
    hud.record_score(event.event());
}

#[expect(
    clippy::needless_pass_by_value,
    reason = "Observer systems must accept On<T> by value for Events V2."
)]
fn show_time(event: On<MatchTimeUpdated>, mut hud: ResMut<Hud>) {
    hud.update_time(event.event().remaining);
}

#[expect(
    clippy::needless_pass_by_value,
    reason = "Observer systems must accept On<T> by value for Events V2."
)]
fn show_end_game(_event: On<MatchFinished>, mut hud: ResMut<Hud>, board: Res<ScoreBoard>) {
    hud.show_end_game(board.total());
}

/// Bevy plugin keeping the [`Hud`] in step with gameplay events.
///
/// Expects [`ScoreBoard`] and [`MatchClock`] to be present, which the score
/// and match plugins provide.
#[derive(Default)]
pub struct HudPlugin;

impl Plugin for HudPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<Hud>();
        app.add_observer(show_on_possess);
        app.add_observer(show_score);
        app.add_observer(show_time);
        app.add_observer(show_end_game);
    }
}
