//! Pointer tracking and reposition decisions for the evading control.

use crate::clock::Clock;
use crate::geometry::Point;
use crate::placement::{self, ArenaLayout, DEFAULT_PADDING, Measure, Placement, PlacementBounds};
use rand::Rng;
use rand::rngs::ThreadRng;
use serde::{Deserialize, Serialize};

pub const DEFAULT_PROXIMITY_RADIUS: f64 = 80.0;
pub const DEFAULT_COOLDOWN_MS: u64 = 150;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvasionSettings {
    pub proximity_radius: f64,
    pub cooldown_ms: u64,
    pub padding: f64,
}

impl Default for EvasionSettings {
    fn default() -> Self {
        Self {
            proximity_radius: DEFAULT_PROXIMITY_RADIUS,
            cooldown_ms: DEFAULT_COOLDOWN_MS,
            padding: DEFAULT_PADDING,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EvasionState {
    #[default]
    Idle,
    CoolingDown { since_ms: u64 },
}

pub struct EvasionController<R = ThreadRng> {
    settings: EvasionSettings,
    state: EvasionState,
    pointer: Option<Point>,
    placed: bool,
    rng: R,
}

impl EvasionController<ThreadRng> {
    pub fn new(settings: EvasionSettings) -> Self {
        Self::with_rng(settings, rand::rng())
    }
}

impl<R: Rng> EvasionController<R> {
    pub fn with_rng(settings: EvasionSettings, rng: R) -> Self {
        Self {
            settings,
            state: EvasionState::Idle,
            pointer: None,
            placed: false,
            rng,
        }
    }

    pub fn settings(&self) -> &EvasionSettings {
        &self.settings
    }

    pub fn set_settings(&mut self, settings: EvasionSettings) {
        self.settings = settings;
    }

    pub fn pointer(&self) -> Option<Point> {
        self.pointer
    }

    /// Whether the initial placement has been applied.
    pub fn is_placed(&self) -> bool {
        self.placed
    }

    /// Current state; a lapsed cooldown reads as `Idle`.
    pub fn state(&self, now_ms: u64) -> EvasionState {
        match self.state {
            EvasionState::CoolingDown { since_ms }
                if now_ms.saturating_sub(since_ms) >= self.settings.cooldown_ms =>
            {
                EvasionState::Idle
            }
            state => state,
        }
    }

    /// Records a pointer (or touch) position and checks proximity.
    pub fn pointer_moved(
        &mut self,
        pointer: Point,
        active: bool,
        measure: &impl Measure,
        clock: &impl Clock,
    ) -> Option<Placement> {
        self.pointer = Some(pointer);
        self.check_proximity(active, measure, clock)
    }

    /// The pointer entered the control itself; checks against the last known position.
    pub fn pointer_entered(
        &mut self,
        active: bool,
        measure: &impl Measure,
        clock: &impl Clock,
    ) -> Option<Placement> {
        self.check_proximity(active, measure, clock)
    }

    /// Places the control once, ignoring the pointer. Retried on later calls
    /// until the arena can be measured.
    pub fn ensure_placed(&mut self, measure: &impl Measure, clock: &impl Clock) -> Option<Placement> {
        if self.placed {
            return None;
        }
        let layout = measure.measure()?;
        let placement = self.place(&layout, None, clock)?;
        self.placed = true;
        Some(placement)
    }

    /// Unconditional reposition, e.g. after the decline feedback has run.
    pub fn reposition(&mut self, measure: &impl Measure, clock: &impl Clock) -> Option<Placement> {
        let Some(layout) = measure.measure() else {
            log::trace!("arena not measurable, skipping reposition");
            return None;
        };
        let placement = self.place(&layout, self.pointer, clock)?;
        self.placed = true;
        Some(placement)
    }

    pub fn reset(&mut self) {
        self.state = EvasionState::Idle;
        self.pointer = None;
        self.placed = false;
    }

    fn check_proximity(
        &mut self,
        active: bool,
        measure: &impl Measure,
        clock: &impl Clock,
    ) -> Option<Placement> {
        if !active {
            return None;
        }
        let now = clock.now_ms();
        if self.state(now) != EvasionState::Idle {
            return None;
        }
        let pointer = self.pointer?;
        let Some(layout) = measure.measure() else {
            log::trace!("arena not measurable, skipping proximity check");
            return None;
        };
        if pointer.distance_to(layout.element.center()) >= self.settings.proximity_radius {
            return None;
        }
        self.place(&layout, Some(pointer), clock)
    }

    fn place(
        &mut self,
        layout: &ArenaLayout,
        pointer: Option<Point>,
        clock: &impl Clock,
    ) -> Option<Placement> {
        let bounds = match PlacementBounds::from_layout(layout, self.settings.padding) {
            Ok(b) => b,
            Err(e) => {
                log::trace!("skipping placement: {}", e);
                return None;
            }
        };
        let obstacle = layout.obstacle.relative_to(layout.container.origin());
        let placement = placement::compute_placement(
            &bounds,
            &obstacle,
            pointer,
            self.settings.proximity_radius,
            &mut self.rng,
        );
        self.state = EvasionState::CoolingDown {
            since_ms: clock.now_ms(),
        };
        Some(placement)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::geometry::{Rect, Size};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn layout() -> ArenaLayout {
        ArenaLayout {
            container: Rect::new(0.0, 0.0, 400.0, 200.0),
            element: Rect::new(300.0, 80.0, 80.0, 40.0),
            obstacle: Rect::new(40.0, 80.0, 80.0, 40.0),
        }
    }

    fn controller() -> EvasionController<StdRng> {
        EvasionController::with_rng(EvasionSettings::default(), StdRng::seed_from_u64(42))
    }

    #[test]
    fn near_pointer_triggers_reposition() {
        let mut c = controller();
        let clock = ManualClock::new(1_000);
        let measure = || Some(layout());

        let near = Point::new(340.0, 100.0);
        assert!(c.pointer_moved(near, true, &measure, &clock).is_some());
        assert_eq!(c.state(1_000), EvasionState::CoolingDown { since_ms: 1_000 });
    }

    #[test]
    fn far_pointer_is_ignored() {
        let mut c = controller();
        let clock = ManualClock::new(0);
        let measure = || Some(layout());

        let far = Point::new(0.0, 0.0);
        assert!(c.pointer_moved(far, true, &measure, &clock).is_none());
        assert_eq!(c.state(0), EvasionState::Idle);
    }

    #[test]
    fn cooldown_suppresses_then_lapses() {
        let mut c = controller();
        let clock = ManualClock::new(0);
        let measure = || Some(layout());
        let near = Point::new(340.0, 100.0);

        assert!(c.pointer_moved(near, true, &measure, &clock).is_some());
        clock.advance(149);
        assert!(c.pointer_moved(near, true, &measure, &clock).is_none());
        clock.advance(1);
        assert_eq!(c.state(clock.now_ms()), EvasionState::Idle);
        assert!(c.pointer_moved(near, true, &measure, &clock).is_some());
    }

    #[test]
    fn inactive_screen_ignores_pointer() {
        let mut c = controller();
        let clock = ManualClock::new(0);
        let measure = || Some(layout());
        assert!(
            c.pointer_moved(Point::new(340.0, 100.0), false, &measure, &clock)
                .is_none()
        );
        assert_eq!(c.pointer(), Some(Point::new(340.0, 100.0)));
    }

    #[test]
    fn unmeasurable_arena_skips_cycle() {
        let mut c = controller();
        let clock = ManualClock::new(0);
        let measure = || None::<ArenaLayout>;
        assert!(
            c.pointer_moved(Point::new(340.0, 100.0), true, &measure, &clock)
                .is_none()
        );
        assert!(c.ensure_placed(&measure, &clock).is_none());
        assert!(!c.is_placed());
        assert_eq!(c.state(0), EvasionState::Idle);
    }

    #[test]
    fn degenerate_arena_skips_cycle() {
        let mut c = controller();
        let clock = ManualClock::new(0);
        let measure = || {
            Some(ArenaLayout {
                container: Rect::new(0.0, 0.0, 90.0, 50.0),
                element: Rect::new(0.0, 0.0, 80.0, 40.0),
                obstacle: Rect::new(0.0, 0.0, 1.0, 1.0),
            })
        };
        assert!(c.reposition(&measure, &clock).is_none());
        assert_eq!(c.state(0), EvasionState::Idle);
    }

    #[test]
    fn initial_placement_happens_once() {
        let mut c = controller();
        let clock = ManualClock::new(0);
        let measure = || Some(layout());
        let first = c.ensure_placed(&measure, &clock).unwrap();
        let obstacle = layout().obstacle;
        assert!(!first.rect(Size::new(80.0, 40.0)).intersects(&obstacle));
        assert!(c.ensure_placed(&measure, &clock).is_none());
    }

    #[test]
    fn pointer_enter_uses_last_position() {
        let mut c = controller();
        let clock = ManualClock::new(0);
        let measure = || Some(layout());
        assert!(c.pointer_entered(true, &measure, &clock).is_none());

        c.pointer_moved(Point::new(0.0, 0.0), true, &measure, &clock);
        clock.advance(500);
        let near_layout = ArenaLayout {
            element: Rect::new(0.0, 0.0, 80.0, 40.0),
            ..layout()
        };
        let measure = || Some(near_layout);
        assert!(c.pointer_entered(true, &measure, &clock).is_some());
    }

    #[test]
    fn reposition_ignores_distance_and_resets() {
        let mut c = controller();
        let clock = ManualClock::new(0);
        let measure = || Some(layout());
        assert!(c.reposition(&measure, &clock).is_some());
        c.reset();
        assert_eq!(c.state(0), EvasionState::Idle);
        assert!(c.pointer().is_none());
        assert!(!c.is_placed());
    }
}
