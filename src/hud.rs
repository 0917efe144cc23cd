//! HUD text model
//!
//! Everything the in-game overlay prints, already translated. The shell
//! copies these strings into the DOM; tests read them directly.

use serde::Serialize;

use crate::i18n::item_label;
use crate::sim::{GameState, LevelState, RollSource, Session};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InventoryLine {
    pub label: String,
    pub count: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HudSnapshot {
    pub game_state: GameState,
    /// "ROOFTOP", "FLOOR 7", "ELECTRICAL ROOM"
    pub location: String,
    /// Cable task progress, electrical room only
    pub task: Option<String>,
    pub inventory_title: String,
    /// Held items in pickup order
    pub inventory: Vec<InventoryLine>,
    /// Shown in place of the list when nothing is held
    pub inventory_empty: Option<String>,
    pub notification: Option<String>,
    pub interact_hint: String,
}

impl HudSnapshot {
    pub fn capture<R: RollSource>(session: &Session<R>) -> Self {
        let progress = &session.progress;
        let lang = progress.settings.language;

        let location = match progress.level_state {
            LevelState::Rooftop => session.tr("rooftop").to_string(),
            LevelState::Apartment => format!("{} {}", session.tr("floor"), progress.floor),
            LevelState::Electrical => session.tr("electrical_room").to_string(),
        };

        let task = (progress.level_state == LevelState::Electrical).then(|| {
            format!(
                "{} ({}/{})",
                session.tr("task_cable"),
                progress.cables_fixed,
                session.tuning.cables_required
            )
        });

        let inventory: Vec<InventoryLine> = progress
            .inventory
            .iter()
            .map(|entry| InventoryLine {
                label: item_label(entry.item, lang).to_string(),
                count: entry.count,
            })
            .collect();
        let inventory_empty = inventory
            .is_empty()
            .then(|| session.tr("inventory_empty").to_string());

        Self {
            game_state: progress.game_state,
            location,
            task,
            inventory_title: session.tr("inventory").to_string(),
            inventory,
            inventory_empty,
            notification: progress.notification_text().map(str::to_string),
            interact_hint: session.tr("interact").to_string(),
        }
    }

    /// One line per held item, e.g. "Room Key x2"
    pub fn inventory_lines(&self) -> Vec<String> {
        self.inventory
            .iter()
            .map(|line| format!("{} x{}", line.label, line.count))
            .collect()
    }
}
