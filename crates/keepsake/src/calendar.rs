//! Tile projection of the reveal store and click routing.

use crate::reveal::{AssetPath, DAY_COUNT, Day, DayLabel, RevealOutcome, RevealStore};
use std::collections::BTreeSet;

pub const TILE_ICON: &str = "❤️";
pub const FALLBACK_TEXT: &str = "Photo not found";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TileBack {
    Hidden,
    Image(AssetPath),
    Fallback,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileView {
    pub day: Day,
    pub label: DayLabel,
    pub revealed: bool,
    pub back: TileBack,
}

impl TileView {
    pub fn accessible_label(&self) -> String {
        if self.revealed {
            format!("{}, revealed", self.label)
        } else {
            format!("{}, tap to reveal", self.label)
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TileAction {
    OpenLightbox(Day),
    Revealed { day: Day, completed_now: bool },
}

/// Calendar screen state: the reveal store plus per-tile load failures.
#[derive(Debug, Default)]
pub struct Calendar {
    store: RevealStore,
    broken: BTreeSet<Day>,
}

impl Calendar {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn store(&self) -> &RevealStore {
        &self.store
    }

    pub fn tile(&self, day: Day) -> TileView {
        let revealed = self.store.is_revealed(day);
        let back = match (revealed, self.broken.contains(&day)) {
            (false, _) => TileBack::Hidden,
            (true, true) => TileBack::Fallback,
            (true, false) => TileBack::Image(day.asset_path()),
        };
        TileView {
            day,
            label: day.label(),
            revealed,
            back,
        }
    }

    pub fn tiles(&self) -> Vec<TileView> {
        Day::all().map(|d| self.tile(d)).collect()
    }

    pub fn click(&mut self, day: Day) -> TileAction {
        if self.store.is_revealed(day) {
            return TileAction::OpenLightbox(day);
        }
        let RevealOutcome { completed_now, .. } = self.store.reveal(day);
        log::debug!("revealed {} ({} / {})", day.label(), self.store.count(), DAY_COUNT);
        TileAction::Revealed { day, completed_now }
    }

    /// Marks a tile's image as unloadable. Only that tile changes.
    pub fn asset_failed(&mut self, day: Day) {
        if self.broken.insert(day) {
            log::debug!("asset for {} failed to load, showing fallback", day.label());
        }
    }

    pub fn reset(&mut self) {
        self.store.reset();
        self.broken.clear();
    }

    pub fn count_text(&self) -> String {
        format!("Revealed: {} / {}", self.store.count(), DAY_COUNT)
    }

    /// Completion message and its action link share this visibility.
    pub fn completion_visible(&self) -> bool {
        self.store.is_complete()
    }
}
