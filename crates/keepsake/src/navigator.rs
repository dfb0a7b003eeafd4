use serde::Serialize;
use serde_with::DeserializeFromStr;
use strum::{Display as StrumDisplay, EnumIter, EnumString, IntoEnumIterator, IntoStaticStr};

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    DeserializeFromStr,
    EnumString,
    EnumIter,
    IntoStaticStr,
    StrumDisplay,
)]
#[strum(ascii_case_insensitive, serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Screen {
    #[default]
    Ask,
    Calendar,
}

impl Screen {
    /// Window-level style class active while this screen shows.
    pub fn mode_class(&self) -> Option<&'static str> {
        match self {
            Self::Ask => None,
            Self::Calendar => Some("calendar-page"),
        }
    }
}

/// Exactly one screen is visible at a time.
#[derive(Debug, Clone, Copy, Default)]
pub struct Navigator {
    active: Screen,
}

impl Navigator {
    pub fn new(start: Screen) -> Self {
        Self { active: start }
    }

    pub fn active(&self) -> Screen {
        self.active
    }

    /// Returns whether the active screen changed.
    pub fn show(&mut self, screen: Screen) -> bool {
        let changed = self.active != screen;
        self.active = screen;
        if changed {
            log::debug!("screen -> {}", screen);
        }
        changed
    }

    pub fn is_visible(&self, screen: Screen) -> bool {
        self.active == screen
    }

    /// Style classes with their on/off state for the current screen.
    pub fn mode_classes(&self) -> Vec<(&'static str, bool)> {
        Screen::iter()
            .filter_map(|s| s.mode_class().map(|class| (class, s == self.active)))
            .collect()
    }

    pub fn calendar_mode(&self) -> bool {
        self.active == Screen::Calendar
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exactly_one_visible() {
        let mut nav = Navigator::default();
        for target in [Screen::Calendar, Screen::Ask, Screen::Ask, Screen::Calendar] {
            nav.show(target);
            let visible: Vec<_> = Screen::iter().filter(|s| nav.is_visible(*s)).collect();
            assert_eq!(visible, vec![target]);
        }
    }

    #[test]
    fn calendar_mode_follows_screen() {
        let mut nav = Navigator::new(Screen::Ask);
        assert!(!nav.calendar_mode());
        assert_eq!(nav.mode_classes(), vec![("calendar-page", false)]);
        assert!(nav.show(Screen::Calendar));
        assert!(nav.calendar_mode());
        assert_eq!(nav.mode_classes(), vec![("calendar-page", true)]);
        assert!(!nav.show(Screen::Calendar));
        nav.show(Screen::Ask);
        assert!(!nav.calendar_mode());
    }

    #[test]
    fn screen_deserialization() {
        let cases = vec![
            ("\"ask\"", Screen::Ask),
            ("\"Ask\"", Screen::Ask),
            ("\"CALENDAR\"", Screen::Calendar),
            ("\"calendar\"", Screen::Calendar),
        ];

        for (json, expected) in cases {
            let deserialized: Screen = serde_json::from_str(json).unwrap();
            assert_eq!(deserialized, expected);
        }
        assert!(serde_json::from_str::<Screen>("\"lobby\"").is_err());
    }

    #[test]
    fn screen_names() {
        assert_eq!(Screen::Calendar.to_string(), "calendar");
        let name: &'static str = Screen::Ask.into();
        assert_eq!(name, "ask");
    }
}
