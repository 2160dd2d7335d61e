//! Timed match game mode.
//!
//! A match lasts a fixed number of seconds. [`StartMatch`] begins the
//! countdown, every elapsed second is broadcast as [`MatchTimeUpdated`], and
//! reaching zero raises [`MatchFinished`] exactly once.

use std::time::Duration;

use bevy::ecs::prelude::On;
use bevy::prelude::*;
use log::{info, warn};

use crate::{MATCH_DURATION_SECS, MATCH_TICK_SECS};

/// Lifecycle of a match.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MatchPhase {
    /// Not started yet.
    #[default]
    Waiting,
    /// Counting down.
    InProgress,
    /// Time ran out.
    Finished,
}

/// Observable change produced by the clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockReport {
    /// Seconds left in the match.
    TimeUpdated(u32),
    /// The match has ended.
    Finished,
}

/// Countdown state for one match.
#[derive(Resource, Debug, Clone)]
pub struct MatchClock {
    duration: u32,
    remaining: u32,
    phase: MatchPhase,
    timer: Timer,
}

impl Default for MatchClock {
    fn default() -> Self {
        Self::new(MATCH_DURATION_SECS)
    }
}

impl MatchClock {
    /// Creates a clock for a match of `duration` seconds.
    #[must_use]
    pub fn new(duration: u32) -> Self {
        Self {
            duration,
            remaining: duration,
            phase: MatchPhase::Waiting,
            timer: Timer::from_seconds(MATCH_TICK_SECS, TimerMode::Repeating),
        }
    }

    /// Full match length in seconds.
    #[must_use]
    pub const fn duration(&self) -> u32 {
        self.duration
    }

    /// Seconds left.
    #[must_use]
    pub const fn remaining(&self) -> u32 {
        self.remaining
    }

    /// Current phase.
    #[must_use]
    pub const fn phase(&self) -> MatchPhase {
        self.phase
    }

    /// Starts (or restarts) the countdown and returns the reports it caused.
    ///
    /// The first report is always the full duration. A zero-length match
    /// finishes straight away.
    pub fn start(&mut self) -> Vec<ClockReport> {
        self.remaining = self.duration;
        self.phase = MatchPhase::InProgress;
        self.timer.reset();
        let mut reports = vec![ClockReport::TimeUpdated(self.remaining)];
        if self.remaining == 0 {
            self.phase = MatchPhase::Finished;
            reports.push(ClockReport::Finished);
        }
        reports
    }

    /// Removes one second from a running match.
    ///
    /// # Examples
    /// ```
    /// use skatepark::match_clock::{ClockReport, MatchClock};
    /// let mut clock = MatchClock::new(2);
    /// clock.start();
    /// assert_eq!(clock.count_down(), vec![ClockReport::TimeUpdated(1)]);
    /// assert_eq!(
    ///     clock.count_down(),
    ///     vec![ClockReport::TimeUpdated(0), ClockReport::Finished]
    /// );
    /// assert!(clock.count_down().is_empty());
    /// ```
    pub fn count_down(&mut self) -> Vec<ClockReport> {
        if self.phase != MatchPhase::InProgress {
            return Vec::new();
        }
        self.remaining = self.remaining.saturating_sub(1);
        let mut reports = vec![ClockReport::TimeUpdated(self.remaining)];
        if self.remaining == 0 {
            self.phase = MatchPhase::Finished;
            reports.push(ClockReport::Finished);
        }
        reports
    }

    /// Advances the one-second timer by `delta`, counting down once per
    /// completed second.
    pub fn tick(&mut self, delta: Duration) -> Vec<ClockReport> {
        if self.phase != MatchPhase::InProgress {
            return Vec::new();
        }
        self.timer.tick(delta);
        let mut reports = Vec::new();
        for _ in 0..self.timer.times_finished_this_tick() {
            reports.extend(self.count_down());
        }
        reports
    }
}

/// Request to begin the match countdown.
#[derive(Event, Debug, Clone, Copy, Default)]
pub struct StartMatch;

/// Broadcast whenever the remaining time changes.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchTimeUpdated {
    /// Seconds left in the match.
    pub remaining: u32,
}

/// Broadcast once when the countdown reaches zero.
#[derive(Event, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MatchFinished;

fn broadcast(commands: &mut Commands, reports: Vec<ClockReport>) {
    for report in reports {
        match report {
            ClockReport::TimeUpdated(remaining) => {
                commands.trigger(MatchTimeUpdated { remaining });
            }
            ClockReport::Finished => {
                info!("match finished");
                commands.trigger(MatchFinished);
            }
        }
    }
}

#[expect(
    clippy::needless_pass_by_value,
    reason = "Observer systems must accept On<T> by value for Events V2."
)]
fn start_match(_event: On<StartMatch>, mut clock: ResMut<MatchClock>, mut commands: Commands) {
    if clock.phase() == MatchPhase::InProgress {
        warn!("match already running; restarting countdown");
    }
    let reports = clock.start();
    info!("match started: {} s", clock.duration());
    broadcast(&mut commands, reports);
}

/// Advances the running match by the frame's delta time.
pub fn tick_match_clock(time: Res<Time>, mut clock: ResMut<MatchClock>, mut commands: Commands) {
    let reports = clock.tick(time.delta());
    broadcast(&mut commands, reports);
}

/// Bevy plugin installing the timed match mode.
#[derive(Debug, Clone, Copy)]
pub struct MatchPlugin {
    /// Match length in seconds.
    pub duration_secs: u32,
}

impl Default for MatchPlugin {
    fn default() -> Self {
        Self {
            duration_secs: MATCH_DURATION_SECS,
        }
    }
}

impl Plugin for MatchPlugin {
    fn build(&self, app: &mut App) {
        crate::plugin::configure_sets(app);
        app.insert_resource(MatchClock::new(self.duration_secs));
        app.add_observer(start_match);
        app.add_systems(
            Update,
            tick_match_clock.in_set(crate::plugin::SkateparkSet::Triggers),
        );
    }
}
