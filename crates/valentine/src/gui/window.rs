use gtk::prelude::*;
use gtk4 as gtk;
use keepsake::geometry::Rect;
use keepsake::placement::{ArenaLayout, Measure};

/// Bounds of `widget` in the coordinate space of `target`, or `None` while
/// it has no allocation.
pub fn bounds_in(widget: &impl IsA<gtk::Widget>, target: &impl IsA<gtk::Widget>) -> Option<Rect> {
    if !widget.is_mapped() || widget.width() <= 0 || widget.height() <= 0 {
        return None;
    }
    widget.compute_bounds(target).map(|b| {
        Rect::new(
            b.x() as f64,
            b.y() as f64,
            b.width() as f64,
            b.height() as f64,
        )
    })
}

/// Measures the ask screen's button area in window coordinates, the same
/// space the window's motion controller reports the pointer in.
pub struct ArenaMeasure<'a> {
    pub window: &'a gtk::ApplicationWindow,
    pub arena: &'a gtk::Fixed,
    pub obstacle: &'a gtk::Button,
    pub element: &'a gtk::Button,
}

impl Measure for ArenaMeasure<'_> {
    fn measure(&self) -> Option<ArenaLayout> {
        Some(ArenaLayout {
            container: bounds_in(self.arena, self.window)?,
            element: bounds_in(self.element, self.window)?,
            obstacle: bounds_in(self.obstacle, self.window)?,
        })
    }
}

pub fn toggle_class(widget: &impl IsA<gtk::Widget>, class: &str, active: bool) {
    if active {
        widget.add_css_class(class);
    } else {
        widget.remove_css_class(class);
    }
}
