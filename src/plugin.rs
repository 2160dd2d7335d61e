//! System ordering and the plugin bundle for the whole game.

use bevy::app::PluginGroupBuilder;
use bevy::prelude::*;

use crate::hud::HudPlugin;
use crate::match_clock::MatchPlugin;
use crate::score::ScorePlugin;
use crate::skater::SkaterPlugin;
use crate::MATCH_DURATION_SECS;

/// Frame stages, run in declaration order within `Update`.
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SkateparkSet {
    /// Player input reaches the controllers.
    Input,
    /// Locomotion ticks.
    Locomotion,
    /// Movers integrate positions.
    Integrate,
    /// Score volumes and the match clock react to the new state.
    Triggers,
}

/// Orders [`SkateparkSet`] within `Update`.
pub fn configure_sets(app: &mut App) {
    app.configure_sets(
        Update,
        (
            SkateparkSet::Input,
            SkateparkSet::Locomotion,
            SkateparkSet::Integrate,
            SkateparkSet::Triggers,
        )
            .chain(),
    );
}

/// Every gameplay plugin in one group.
#[derive(Debug, Clone, Copy)]
pub struct SkateparkPlugins {
    /// Match length in seconds.
    pub match_duration_secs: u32,
}

impl Default for SkateparkPlugins {
    fn default() -> Self {
        Self {
            match_duration_secs: MATCH_DURATION_SECS,
        }
    }
}

impl PluginGroup for SkateparkPlugins {
    fn build(self) -> PluginGroupBuilder {
        PluginGroupBuilder::start::<Self>()
            .add(ScorePlugin)
            .add(MatchPlugin {
                duration_secs: self.match_duration_secs,
            })
            .add(HudPlugin)
            .add(SkaterPlugin)
    }
}
