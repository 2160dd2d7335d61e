//! Systems driving riders each frame.
//!
//! Input is applied first, then the locomotion controller ticks against the
//! [`BlockTerrain`], and finally each rider's [`Movement`] integrates the
//! queued motion.

use bevy::prelude::*;
use log::info;

use crate::components::{Movement, RiderPose, Skater, SkaterInput};
use crate::config::{ConfigError, LocomotionConfig};
use crate::locomotion::LocomotionController;
use crate::mover::SimpleMover;
use crate::plugin::SkateparkSet;
use crate::terrain::BlockTerrain;
use crate::transform::RiderTransform;

/// Raised when a player takes control of a rider.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct RiderPossessed {
    /// The possessed rider.
    pub rider: Entity,
}

/// Spawns a rider controlled by the player and announces it with
/// [`RiderPossessed`].
///
/// # Errors
/// Returns the validation error when `config` is rejected.
pub fn spawn_skater(
    world: &mut World,
    config: LocomotionConfig,
    transform: RiderTransform,
) -> Result<Entity, ConfigError> {
    let controller = LocomotionController::new(config)?;
    let rider = world
        .spawn((
            Skater(controller),
            RiderPose(transform),
            Movement(SimpleMover::default()),
            SkaterInput::default(),
        ))
        .id();
    info!("rider {rider:?} spawned at {:?}", transform.location);
    world.trigger(RiderPossessed { rider });
    Ok(rider)
}

/// Forwards buffered [`SkaterInput`] to each rider's controller.
pub fn apply_skater_input(
    mut riders: Query<(&mut Skater, &mut RiderPose, &mut Movement, &mut SkaterInput)>,
) {
    for (mut skater, mut pose, mut movement, mut input) in &mut riders {
        if input.move_axis != Vec2::ZERO {
            skater.on_move(input.move_axis, &mut pose.0, &mut movement.0);
        }
        if input.look_axis != Vec2::ZERO {
            skater.on_look(input.look_axis);
        }
        if input.jump_pressed {
            skater.on_jump_pressed();
        }
        if input.jump_released {
            skater.on_jump_released(&mut movement.0);
        }
        input.jump_pressed = false;
        input.jump_released = false;
    }
}

/// Runs one locomotion step per rider.
pub fn tick_skaters(
    time: Res<Time>,
    terrain: Res<BlockTerrain>,
    mut riders: Query<(&mut Skater, &mut RiderPose, &mut Movement)>,
) {
    let dt = time.delta_secs();
    for (mut skater, mut pose, mut movement) in &mut riders {
        skater.tick(dt, &mut pose.0, &mut movement.0, &*terrain);
    }
}

/// Moves riders through the terrain using their queued input.
pub fn integrate_movers(
    time: Res<Time>,
    terrain: Res<BlockTerrain>,
    mut riders: Query<(&mut RiderPose, &mut Movement)>,
) {
    let dt = time.delta_secs();
    for (mut pose, mut movement) in &mut riders {
        movement.integrate(&mut pose.0, &*terrain, dt);
    }
}

/// Bevy plugin running rider input, locomotion and movement.
///
/// Inserts an empty [`BlockTerrain`] unless one is already present.
#[derive(Default)]
pub struct SkaterPlugin;

impl Plugin for SkaterPlugin {
    fn build(&self, app: &mut App) {
        crate::plugin::configure_sets(app);
        app.init_resource::<BlockTerrain>();
        app.add_systems(
            Update,
            (
                apply_skater_input.in_set(SkateparkSet::Input),
                tick_skaters.in_set(SkateparkSet::Locomotion),
                integrate_movers.in_set(SkateparkSet::Integrate),
            ),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use bevy::ecs::prelude::On;
    use bevy::ecs::system::RunSystemOnce;
    use rstest::{fixture, rstest};

    #[fixture]
    fn world() -> World {
        World::new()
    }

    #[rstest]
    fn spawn_rejects_invalid_config(mut world: World) {
        let config = LocomotionConfig {
            max_movement: -10.0,
            ..LocomotionConfig::default()
        };
        let result = spawn_skater(&mut world, config, RiderTransform::default());
        assert!(result.is_err());
    }

    #[rstest]
    fn spawn_announces_possession(mut world: World) {
        #[derive(Resource, Default)]
        struct Possessed(Option<Entity>);

        world.init_resource::<Possessed>();
        world.add_observer(
            |event: On<RiderPossessed>, mut possessed: ResMut<Possessed>| {
                possessed.0 = Some(event.event().rider);
            },
        );

        let rider = spawn_skater(
            &mut world,
            LocomotionConfig::default(),
            RiderTransform::default(),
        )
        .expect("valid config");

        assert_eq!(world.resource::<Possessed>().0, Some(rider));
        assert!(world.get::<Skater>(rider).is_some());
    }

    #[rstest]
    fn input_edges_are_consumed(mut world: World) {
        let rider = spawn_skater(
            &mut world,
            LocomotionConfig::default(),
            RiderTransform::default(),
        )
        .expect("valid config");
        world
            .get_mut::<Movement>(rider)
            .expect("mover")
            .set_grounded(true);
        world.entity_mut(rider).insert(SkaterInput {
            move_axis: Vec2::new(0.0, 1.0),
            look_axis: Vec2::new(10.0, 0.0),
            jump_pressed: true,
            jump_released: false,
        });

        world
            .run_system_once(apply_skater_input)
            .expect("system runs");

        let skater = world.get::<Skater>(rider).expect("skater");
        assert_relative_eq!(skater.inertia(), 1.0);
        assert_relative_eq!(skater.control_rotation().yaw, 10.0);
        assert!(skater.is_preparing_jump());
        let input = world.get::<SkaterInput>(rider).expect("input");
        assert!(!input.jump_pressed);
        assert_eq!(input.move_axis, Vec2::new(0.0, 1.0));
    }
}
