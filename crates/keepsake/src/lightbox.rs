use crate::reveal::{AssetPath, Day};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LightboxInput {
    CloseButton,
    /// Click that landed on the backdrop, outside the content.
    Backdrop,
    /// Click on the content itself. Never closes.
    Content,
    Escape,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Lightbox {
    #[default]
    Closed,
    Open {
        day: Day,
        asset: AssetPath,
        failed: bool,
    },
}

impl Lightbox {
    /// Opens on any day; reveal state is not consulted.
    pub fn open(&mut self, day: Day) {
        *self = Self::Open {
            day,
            asset: day.asset_path(),
            failed: false,
        };
    }

    pub fn close(&mut self) {
        *self = Self::Closed;
    }

    pub fn is_open(&self) -> bool {
        matches!(self, Self::Open { .. })
    }

    pub fn day(&self) -> Option<Day> {
        match self {
            Self::Open { day, .. } => Some(*day),
            Self::Closed => None,
        }
    }

    pub fn asset(&self) -> Option<&AssetPath> {
        match self {
            Self::Open { asset, .. } => Some(asset),
            Self::Closed => None,
        }
    }

    pub fn shows_fallback(&self) -> bool {
        matches!(self, Self::Open { failed: true, .. })
    }

    pub fn asset_failed(&mut self) {
        if let Self::Open { failed, .. } = self {
            *failed = true;
        }
    }

    /// Applies an input; returns whether the lightbox closed.
    pub fn handle(&mut self, input: LightboxInput) -> bool {
        match input {
            LightboxInput::Content => false,
            LightboxInput::CloseButton | LightboxInput::Backdrop | LightboxInput::Escape => {
                if self.is_open() {
                    self.close();
                    true
                } else {
                    false
                }
            }
        }
    }
}
