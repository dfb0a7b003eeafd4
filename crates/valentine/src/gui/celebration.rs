use crate::gui::theme::ThemeColors;
use cairo::Context;
use keepsake::celebration::{Celebration, LiveHeart};
use std::f64::consts::PI;

const HEART_SIZE: f64 = 28.0;
const RISE: f64 = 0.9; // fraction of the surface height travelled over a lifetime

struct HeartRenderer<'a> {
    heart: &'a LiveHeart,
    width: f64,
    height: f64,
}

impl<'a> HeartRenderer<'a> {
    fn new(heart: &'a LiveHeart, width: f64, height: f64) -> Self {
        Self {
            heart,
            width,
            height,
        }
    }

    fn position(&self) -> (f64, f64) {
        let x = self.heart.x * self.width;
        let y = (self.heart.y - self.heart.progress * RISE) * self.height;
        (x, y)
    }

    fn draw(&self, cr: &Context, colors: &ThemeColors) -> Result<(), cairo::Error> {
        let (x, y) = self.position();
        let (r, g, b, a) = colors.for_glyph(self.heart.glyph).into_components();
        // fade out over the second half of the flight
        let fade = (2.0 * (1.0 - self.heart.progress)).min(1.0);
        let size = HEART_SIZE * (0.8 + 0.4 * self.heart.progress);

        cr.save()?;
        cr.translate(x, y);
        cr.scale(size / 2.0, size / 2.0);
        trace_heart(cr);
        cr.set_source_rgba(r, g, b, a * fade);
        cr.fill()?;
        cr.restore()
    }
}

/// Unit heart centered on the origin, roughly spanning -1..1.
fn trace_heart(cr: &Context) {
    cr.move_to(0.0, 0.9);
    cr.curve_to(-1.6, -0.2, -0.9, -1.4, 0.0, -0.5);
    cr.curve_to(0.9, -1.4, 1.6, -0.2, 0.0, 0.9);
    cr.close_path();
}

pub fn draw(
    cr: &Context,
    celebration: &Celebration,
    now_ms: u64,
    width: f64,
    height: f64,
    colors: &ThemeColors,
) -> Result<(), cairo::Error> {
    for heart in celebration.live(now_ms) {
        HeartRenderer::new(&heart, width, height).draw(cr, colors)?;
    }
    Ok(())
}

/// Small static heart used as the front-face icon of calendar tiles.
pub fn draw_tile_icon(cr: &Context, size: f64, colors: &ThemeColors) -> Result<(), cairo::Error> {
    let (r, g, b, a) = colors.heart.into_components();
    cr.save()?;
    cr.translate(size / 2.0, size / 2.0);
    cr.scale(size / 2.2, size / 2.2);
    trace_heart(cr);
    cr.set_source_rgba(r, g, b, a);
    cr.fill()?;
    cr.arc(0.35, -0.55, 0.12, 0.0, 2.0 * PI);
    cr.set_source_rgba(1.0, 1.0, 1.0, 0.5);
    cr.fill()?;
    cr.restore()
}
