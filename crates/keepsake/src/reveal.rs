//! Which calendar days have been revealed.
//!
//! The store is the only owner of the reveal set. It is volatile: a fresh
//! store starts empty and nothing is written anywhere.

use crate::error::{Error, Result};
use derive_more::{AsRef, Deref, Display, From, Into};
use std::collections::BTreeSet;

pub const DAY_COUNT: u32 = 14;
pub const IMAGE_DIR: &str = "images";
pub const IMAGE_EXT: &str = "jpg";
pub const MONTH_LABEL: &str = "Feb";

/// A calendar day in `1..=DAY_COUNT`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, Into)]
pub struct Day(u32);

impl Day {
    pub fn new(n: u32) -> Result<Self> {
        if (1..=DAY_COUNT).contains(&n) {
            Ok(Self(n))
        } else {
            Err(Error::DayOutOfRange(n))
        }
    }

    pub fn number(&self) -> u32 {
        self.0
    }

    pub fn all() -> impl Iterator<Item = Day> {
        (1..=DAY_COUNT).map(Day)
    }

    pub fn label(&self) -> DayLabel {
        DayLabel(format!("{} {}", MONTH_LABEL, self.0))
    }

    pub fn asset_path(&self) -> AssetPath {
        AssetPath(format!("{}/{:02}.{}", IMAGE_DIR, self.0, IMAGE_EXT))
    }
}

impl TryFrom<u32> for Day {
    type Error = Error;

    fn try_from(n: u32) -> Result<Self> {
        Self::new(n)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Display, Deref, From, Into, AsRef)]
pub struct DayLabel(String);

crate::impl_string_newtype!(DayLabel);

/// Asset location relative to the assets root, always `/`-separated.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Display, Deref, From, Into, AsRef)]
pub struct AssetPath(String);

crate::impl_string_newtype!(AssetPath);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RevealOutcome {
    /// The day was not revealed before this call.
    pub newly_revealed: bool,
    /// This call completed the calendar.
    pub completed_now: bool,
}

#[derive(Debug, Clone, Default)]
pub struct RevealStore {
    revealed: BTreeSet<Day>,
    completed: bool,
}

impl RevealStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reveal(&mut self, day: Day) -> RevealOutcome {
        if !self.revealed.insert(day) {
            return RevealOutcome::default();
        }
        let completed_now = !self.completed && self.revealed.len() == DAY_COUNT as usize;
        if completed_now {
            self.completed = true;
            log::info!("all {} days revealed", DAY_COUNT);
        }
        RevealOutcome {
            newly_revealed: true,
            completed_now,
        }
    }

    pub fn reset(&mut self) {
        self.revealed.clear();
        self.completed = false;
    }

    pub fn is_revealed(&self, day: Day) -> bool {
        self.revealed.contains(&day)
    }

    pub fn count(&self) -> usize {
        self.revealed.len()
    }

    pub fn is_complete(&self) -> bool {
        self.completed
    }

    /// Revealed days in ascending order.
    pub fn days(&self) -> impl Iterator<Item = Day> + '_ {
        self.revealed.iter().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(n: u32) -> Day {
        Day::new(n).unwrap()
    }

    #[test]
    fn day_bounds() {
        assert!(Day::new(0).is_err());
        assert!(Day::new(15).is_err());
        assert_eq!(Day::try_from(14u32).map(|d| d.number()), Ok(14));
        assert_eq!(Day::all().count(), DAY_COUNT as usize);
    }

    #[test]
    fn labels_and_assets() {
        assert_eq!(day(3).label().as_str(), "Feb 3");
        assert_eq!(day(3).asset_path().as_str(), "images/03.jpg");
        assert_eq!(day(14).asset_path().as_str(), "images/14.jpg");
    }

    #[test]
    fn reveal_is_idempotent() {
        for d in Day::all() {
            let mut store = RevealStore::new();
            let first = store.reveal(d);
            let second = store.reveal(d);
            assert!(first.newly_revealed);
            assert_eq!(second, RevealOutcome::default());
            assert_eq!(store.days().collect::<Vec<_>>(), vec![d]);
        }
    }

    #[test]
    fn reveal_same_day_twice_counts_once() {
        let mut store = RevealStore::new();
        store.reveal(day(3));
        store.reveal(day(3));
        assert_eq!(store.count(), 1);
        assert!(store.is_revealed(day(3)));
        assert!(!store.is_revealed(day(4)));
    }

    #[test]
    fn completion_fires_once_on_last_day() {
        let mut store = RevealStore::new();
        for n in 1..DAY_COUNT {
            assert!(!store.reveal(day(n)).completed_now);
            assert!(!store.is_complete());
        }
        assert!(store.reveal(day(DAY_COUNT)).completed_now);
        assert!(store.is_complete());
        assert!(!store.reveal(day(1)).completed_now);
    }

    #[test]
    fn reset_clears_everything() {
        let mut store = RevealStore::new();
        Day::all().for_each(|d| {
            store.reveal(d);
        });
        assert!(store.is_complete());
        store.reset();
        assert_eq!(store.count(), 0);
        assert!(!store.is_complete());

        for d in Day::all() {
            store.reveal(d);
        }
        assert!(store.is_complete());
    }

    #[test]
    fn days_are_sorted() {
        let mut store = RevealStore::new();
        for n in [9, 2, 14, 5] {
            store.reveal(day(n));
        }
        let numbers: Vec<u32> = store.days().map(u32::from).collect();
        assert_eq!(numbers, vec![2, 5, 9, 14]);
    }
}
