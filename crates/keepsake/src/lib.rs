//! Toolkit-free logic for the valentine app: evading-control placement and
//! the 14-day reveal calendar.

pub mod macros;

pub mod calendar;
pub mod celebration;
pub mod clock;
pub mod error;
pub mod evasion;
pub mod feedback;
pub mod geometry;
pub mod lightbox;
pub mod navigator;
pub mod placement;
pub mod reveal;

pub use error::{Error, Result};
