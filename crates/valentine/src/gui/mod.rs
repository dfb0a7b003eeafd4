pub mod app;
pub mod calendar;
pub mod celebration;
pub mod lightbox;
pub mod theme;
pub mod window;

pub const APP_ID: &str = "org.keepsake.valentine";

pub const WINDOW_WIDTH: i32 = 760;
pub const WINDOW_HEIGHT: i32 = 720;

// ask screen
pub const ASK_TITLE: &str = "Will you be my Valentine?";
pub const ARENA_WIDTH: i32 = 360;
pub const ARENA_HEIGHT: i32 = 220;
pub const YES_POSITION: (f64, f64) = (60.0, 90.0);
pub const NO_POSITION: (f64, f64) = (220.0, 90.0);
pub const FEEDBACK_SIZE: i32 = 96;

// calendar screen
pub const CALENDAR_TITLE: &str = "14 days of us";
pub const GRID_COLUMNS: u32 = 7;
pub const TILE_SIZE: i32 = 92;
pub const LIGHTBOX_SIZE: i32 = 560;
pub const FINAL_MESSAGE: &str = "You found them all. Happy Valentine's Day! ❤️";
pub const FINAL_LINK_LABEL: &str = "One more surprise";
