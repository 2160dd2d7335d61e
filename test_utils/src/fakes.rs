//! Hand-written fakes for the locomotion seams.
//!
//! Use these when a test cares about accumulated effects over many ticks;
//! per-call expectations are better served by `mockall`.

use std::cell::RefCell;
use std::collections::VecDeque;

use glam::Vec3;
use skatepark::{CollisionChannel, CollisionProbe, KinematicMover, ProbeResult};

/// Mover that records every call and never moves anything.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordingMover {
    /// Value returned by `is_grounded`.
    pub grounded: bool,
    /// Every `(direction, scale)` passed to `add_movement_input`.
    pub inputs: Vec<(Vec3, f32)>,
    /// Number of `stop_immediately` calls.
    pub stops: usize,
    /// Number of `request_jump` calls.
    pub jumps: usize,
    /// Every yaw passed to `rotate_velocity`.
    pub rotations: Vec<f32>,
}

impl RecordingMover {
    /// A mover standing on the ground.
    #[must_use]
    pub fn grounded() -> Self {
        Self {
            grounded: true,
            ..Self::default()
        }
    }

    /// A mover in the air.
    #[must_use]
    pub fn airborne() -> Self {
        Self::default()
    }

    /// Scale of the most recent movement input.
    #[must_use]
    pub fn last_scale(&self) -> Option<f32> {
        self.inputs.last().map(|&(_, scale)| scale)
    }
}

impl KinematicMover for RecordingMover {
    fn is_grounded(&self) -> bool {
        self.grounded
    }

    fn add_movement_input(&mut self, direction: Vec3, scale: f32) {
        self.inputs.push((direction, scale));
    }

    fn stop_immediately(&mut self) {
        self.stops += 1;
    }

    fn request_jump(&mut self) {
        self.jumps += 1;
    }

    fn rotate_velocity(&mut self, yaw_degrees: f32) {
        self.rotations.push(yaw_degrees);
    }
}

/// Probe replaying a fixed list of results, then missing.
#[derive(Debug, Default)]
pub struct ScriptedProbe {
    results: RefCell<VecDeque<ProbeResult>>,
    casts: RefCell<Vec<(Vec3, Vec3)>>,
}

impl ScriptedProbe {
    /// Creates a probe that answers casts with `results` in order.
    pub fn new(results: impl IntoIterator<Item = ProbeResult>) -> Self {
        Self {
            results: RefCell::new(results.into_iter().collect()),
            casts: RefCell::default(),
        }
    }

    /// Segments cast so far.
    #[must_use]
    pub fn casts(&self) -> Vec<(Vec3, Vec3)> {
        self.casts.borrow().clone()
    }
}

impl CollisionProbe for ScriptedProbe {
    fn cast_ray(&self, from: Vec3, to: Vec3, _channel: CollisionChannel) -> ProbeResult {
        self.casts.borrow_mut().push((from, to));
        self.results
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(ProbeResult::miss)
    }
}

/// Infinite plane `z = grad_x * x` with no walls.
///
/// Vertical casts that straddle the plane hit it; everything else misses.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TiltedGround {
    /// Rise per unit of run along X.
    pub grad_x: f32,
}

impl TiltedGround {
    /// Flat ground at zero height.
    #[must_use]
    pub const fn flat() -> Self {
        Self { grad_x: 0.0 }
    }

    /// Height of the plane at `x`.
    #[must_use]
    pub fn height_at(&self, x: f32) -> f32 {
        self.grad_x * x
    }
}

impl CollisionProbe for TiltedGround {
    fn cast_ray(&self, from: Vec3, to: Vec3, _channel: CollisionChannel) -> ProbeResult {
        if (to - from).truncate().length() > f32::EPSILON {
            return ProbeResult::miss();
        }
        let height = self.height_at(from.x);
        let (low, high) = (from.z.min(to.z), from.z.max(to.z));
        if height < low || height > high {
            return ProbeResult::miss();
        }
        let normal = Vec3::new(-self.grad_x, 0.0, 1.0).normalize();
        ProbeResult::hit(Vec3::new(from.x, from.y, height), normal)
    }
}
