use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum Error {
    #[error("day {0} is outside 1..={max}", max = crate::reveal::DAY_COUNT)]
    DayOutOfRange(u32),
    #[error("placement range is empty (x: {min_x}..{max_x}, y: {min_y}..{max_y})")]
    DegenerateRange {
        min_x: f64,
        max_x: f64,
        min_y: f64,
        max_y: f64,
    },
}
