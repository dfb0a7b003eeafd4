//! Random placement of the evading control inside its container.
//!
//! Candidates are drawn uniformly from the padded container range and
//! rejected when they overlap the obstacle or land within the proximity
//! radius of the pointer. The search is capped at [`MAX_ATTEMPTS`]; on
//! exhaustion the last candidate is used as-is.

use crate::error::{Error, Result};
use crate::geometry::{Point, Rect, Size};
use rand::Rng;
use serde::{Deserialize, Serialize};

pub const MAX_ATTEMPTS: usize = 30;
pub const DEFAULT_PADDING: f64 = 8.0;

/// Offset of the movable element relative to its container.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Placement {
    pub left: f64,
    pub top: f64,
}

impl Placement {
    pub fn new(left: f64, top: f64) -> Self {
        Self { left, top }
    }

    pub fn rect(&self, size: Size) -> Rect {
        Rect::new(self.left, self.top, size.width, size.height)
    }
}

/// One measurement of the arena, all rectangles in viewport coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArenaLayout {
    pub container: Rect,
    pub element: Rect,
    pub obstacle: Rect,
}

/// Source of arena measurements. Returns `None` while the widgets have not
/// been laid out yet.
pub trait Measure {
    fn measure(&self) -> Option<ArenaLayout>;
}

impl<F: Fn() -> Option<ArenaLayout>> Measure for F {
    fn measure(&self) -> Option<ArenaLayout> {
        self()
    }
}

/// Valid placement range for an element inside a container. Always
/// non-degenerate: construction fails when either axis has no room.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacementBounds {
    origin: Point,
    element: Size,
    min_x: f64,
    max_x: f64,
    min_y: f64,
    max_y: f64,
}

impl PlacementBounds {
    pub fn new(container: Rect, element: Size, padding: f64) -> Result<Self> {
        let (min_x, min_y) = (padding, padding);
        let max_x = container.width - element.width - padding;
        let max_y = container.height - element.height - padding;

        if max_x <= min_x || max_y <= min_y {
            return Err(Error::DegenerateRange {
                min_x,
                max_x,
                min_y,
                max_y,
            });
        }

        Ok(Self {
            origin: container.origin(),
            element,
            min_x,
            max_x,
            min_y,
            max_y,
        })
    }

    pub fn from_layout(layout: &ArenaLayout, padding: f64) -> Result<Self> {
        Self::new(layout.container, layout.element.size(), padding)
    }

    pub fn x_range(&self) -> (f64, f64) {
        (self.min_x, self.max_x)
    }

    pub fn y_range(&self) -> (f64, f64) {
        (self.min_y, self.max_y)
    }

    pub fn element(&self) -> Size {
        self.element
    }

    pub fn contains(&self, placement: Placement) -> bool {
        (self.min_x..=self.max_x).contains(&placement.left)
            && (self.min_y..=self.max_y).contains(&placement.top)
    }

    fn sample(&self, rng: &mut impl Rng) -> Placement {
        Placement::new(
            self.min_x + rng.random::<f64>() * (self.max_x - self.min_x),
            self.min_y + rng.random::<f64>() * (self.max_y - self.min_y),
        )
    }

    /// Center of a placed element in viewport coordinates.
    fn viewport_center(&self, placement: Placement) -> Point {
        placement
            .rect(self.element)
            .center()
            .offset(self.origin.x, self.origin.y)
    }

    fn is_acceptable(
        &self,
        candidate: Placement,
        obstacle: &Rect,
        pointer: Option<Point>,
        proximity_radius: f64,
    ) -> bool {
        if candidate.rect(self.element).intersects(obstacle) {
            return false;
        }
        pointer.is_none_or(|p| p.distance_to(self.viewport_center(candidate)) >= proximity_radius)
    }
}

/// Picks a position for the element. `obstacle` is relative to the
/// container origin, `pointer` is in viewport coordinates (`None` when the
/// pointer should be treated as far away).
pub fn compute_placement(
    bounds: &PlacementBounds,
    obstacle: &Rect,
    pointer: Option<Point>,
    proximity_radius: f64,
    rng: &mut impl Rng,
) -> Placement {
    let mut candidate = bounds.sample(rng);
    for attempt in 1..MAX_ATTEMPTS {
        if bounds.is_acceptable(candidate, obstacle, pointer, proximity_radius) {
            return candidate;
        }
        log::trace!("placement attempt {} rejected: {:?}", attempt, candidate);
        candidate = bounds.sample(rng);
    }
    if !bounds.is_acceptable(candidate, obstacle, pointer, proximity_radius) {
        log::debug!(
            "no clear placement after {} attempts, using {:?}",
            MAX_ATTEMPTS,
            candidate
        );
    }
    candidate
}
