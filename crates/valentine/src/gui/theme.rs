use gtk::gdk;
use gtk::prelude::*;
use gtk4 as gtk;
use keepsake::celebration::HEART_GLYPHS;
use palette::Srgba;

pub struct ThemeColors {
    pub heart: Srgba<f64>,
    pub heart_light: Srgba<f64>,
    pub heart_pink: Srgba<f64>,
    pub heart_glow: Srgba<f64>,
    pub heart_arrow: Srgba<f64>,
}

impl ThemeColors {
    pub fn from_context(context: &gtk::StyleContext) -> Self {
        Self {
            heart: Self::lookup_color(context, "valentine_heart", Srgba::new(0.86, 0.08, 0.24, 1.0)),
            heart_light: Self::lookup_color(
                context,
                "valentine_heart_light",
                Srgba::new(1.0, 0.56, 0.69, 1.0),
            ),
            heart_pink: Self::lookup_color(
                context,
                "valentine_heart_pink",
                Srgba::new(1.0, 0.41, 0.71, 1.0),
            ),
            heart_glow: Self::lookup_color(
                context,
                "valentine_heart_glow",
                Srgba::new(0.98, 0.26, 0.52, 1.0),
            ),
            heart_arrow: Self::lookup_color(
                context,
                "valentine_heart_arrow",
                Srgba::new(0.78, 0.09, 0.45, 1.0),
            ),
        }
    }

    /// Color used to paint a heart drawn for `glyph`.
    pub fn for_glyph(&self, glyph: &str) -> Srgba<f64> {
        match HEART_GLYPHS.iter().position(|g| *g == glyph) {
            Some(1) => self.heart_light,
            Some(2) => self.heart_pink,
            Some(3) => self.heart_glow,
            Some(4) => self.heart_arrow,
            _ => self.heart,
        }
    }

    fn lookup_color(context: &gtk::StyleContext, name: &str, fallback: Srgba<f64>) -> Srgba<f64> {
        context
            .lookup_color(name)
            .map(|c| {
                Srgba::new(
                    c.red() as f64,
                    c.green() as f64,
                    c.blue() as f64,
                    c.alpha() as f64,
                )
            })
            .unwrap_or(fallback)
    }
}

pub fn load_css() {
    let provider = gtk::CssProvider::new();
    let css_data = "
@define-color valentine_heart #dc143c;
@define-color valentine_heart_light #ff8fb0;

.valentine-window {
    background-color: #fff0f5;
}
.valentine-window.calendar-page {
    background-color: #ffe4ec;
}
.ask-title, .calendar-title {
    font-size: 28px;
    font-weight: bold;
    color: #b0124a;
}
.yes-button {
    background: #e0245e;
    color: white;
    font-weight: bold;
}
.no-button {
    background: #f3f3f3;
}
.nice-try {
    font-size: 20px;
}
.tile {
    min-width: 92px;
    min-height: 92px;
    border-radius: 12px;
}
.tile.revealed {
    background: #ffd6e4;
}
.tile-fallback, .lightbox-fallback {
    color: #8a4a5e;
    font-style: italic;
}
.revealed-count {
    font-weight: bold;
}
.final-message {
    font-size: 22px;
    color: #b0124a;
}
.lightbox {
    background-color: rgba(0, 0, 0, 0.75);
}
.lightbox-content {
    background-color: white;
    border-radius: 8px;
    padding: 12px;
}
.celebration {
    background: none;
    background-color: transparent;
}
";
    provider.load_from_data(css_data);

    if let Some(display) = gdk::Display::default() {
        gtk::style_context_add_provider_for_display(
            &display,
            &provider,
            gtk::STYLE_PROVIDER_PRIORITY_APPLICATION,
        );
    }
}
