//! HUD text and menu visibility

use crate::sim::{GamePhase, Snapshot};

/// Elapsed seconds as zero-padded `MM:SS`
pub fn format_timer(secs: u32) -> String {
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

/// Text for the score, lives and timer readouts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HudText {
    pub score: String,
    pub lives: String,
    pub timer: String,
}

impl HudText {
    pub fn from_snapshot(snapshot: &Snapshot) -> Self {
        Self {
            score: snapshot.score.to_string(),
            lives: snapshot.lives.to_string(),
            timer: format_timer(snapshot.game_time),
        }
    }
}

/// Which overlay menus are shown
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MenuVisibility {
    pub start: bool,
    pub pause: bool,
    pub game_over: bool,
    pub win: bool,
}

impl MenuVisibility {
    pub fn for_phase(phase: GamePhase) -> Self {
        let mut menus = Self::default();
        match phase {
            GamePhase::NotStarted => menus.start = true,
            GamePhase::Paused => menus.pause = true,
            GamePhase::Lost => menus.game_over = true,
            GamePhase::Won => menus.win = true,
            GamePhase::Playing => {}
        }
        menus
    }
}
