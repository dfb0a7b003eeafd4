//! Floating hearts burst shown after the "yes" control is pressed.

use rand::Rng;
use rand::seq::IndexedRandom;
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const HEART_GLYPHS: [&str; 5] = ["❤️", "💕", "💗", "💖", "💘"];
const MAX_EXTRA_DELAY_MS: f64 = 500.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CelebrationSettings {
    pub hearts: usize,
    pub stagger_ms: u64,
    pub lifetime_ms: u64,
    /// Delay before the calendar screen replaces the ask screen.
    pub transition_ms: u64,
}

impl Default for CelebrationSettings {
    fn default() -> Self {
        Self {
            hearts: 20,
            stagger_ms: 80,
            lifetime_ms: 2600,
            transition_ms: 800,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Heart {
    pub glyph: &'static str,
    /// Horizontal position as a fraction of the surface width.
    pub x: f64,
    /// Starting vertical position as a fraction of the surface height.
    pub y: f64,
    pub spawn_at_ms: u64,
    pub delay_ms: u64,
}

/// A heart visible at some instant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LiveHeart {
    pub glyph: &'static str,
    pub x: f64,
    pub y: f64,
    /// Animation progress in `0.0..=1.0`.
    pub progress: f64,
}

#[derive(Debug, Clone, Default)]
pub struct Celebration {
    settings: CelebrationSettings,
    hearts: Vec<Heart>,
}

impl Celebration {
    pub fn new(settings: CelebrationSettings) -> Self {
        Self {
            settings,
            hearts: Vec::new(),
        }
    }

    pub fn set_settings(&mut self, settings: CelebrationSettings) {
        self.settings = settings;
    }

    /// Queues a burst starting at `now_ms` and returns the screen transition delay.
    pub fn burst(&mut self, now_ms: u64, rng: &mut impl Rng) -> Duration {
        let s = self.settings;
        self.hearts.extend((0..s.hearts).map(|i| Heart {
            glyph: HEART_GLYPHS.choose(rng).copied().unwrap_or(HEART_GLYPHS[0]),
            x: rng.random::<f64>(),
            y: 0.8 + rng.random::<f64>() * 0.2,
            spawn_at_ms: now_ms + i as u64 * s.stagger_ms,
            delay_ms: (rng.random::<f64>() * MAX_EXTRA_DELAY_MS) as u64,
        }));
        Duration::from_millis(s.transition_ms)
    }

    pub fn hearts(&self) -> &[Heart] {
        &self.hearts
    }

    pub fn live(&self, now_ms: u64) -> Vec<LiveHeart> {
        let lifetime = self.settings.lifetime_ms;
        self.hearts
            .iter()
            .filter(|h| now_ms >= h.spawn_at_ms && now_ms < h.spawn_at_ms + lifetime)
            .map(|h| {
                let age = (now_ms - h.spawn_at_ms).saturating_sub(h.delay_ms);
                let span = lifetime.saturating_sub(h.delay_ms).max(1);
                LiveHeart {
                    glyph: h.glyph,
                    x: h.x,
                    y: h.y,
                    progress: (age as f64 / span as f64).clamp(0.0, 1.0),
                }
            })
            .collect()
    }

    /// Drops hearts whose lifetime is over.
    pub fn prune(&mut self, now_ms: u64) {
        let lifetime = self.settings.lifetime_ms;
        self.hearts.retain(|h| now_ms < h.spawn_at_ms + lifetime);
    }

    pub fn is_active(&self) -> bool {
        !self.hearts.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn burst_is_staggered() {
        let mut c = Celebration::default();
        let mut rng = StdRng::seed_from_u64(1);
        let transition = c.burst(1_000, &mut rng);
        assert_eq!(transition, Duration::from_millis(800));
        assert_eq!(c.hearts().len(), 20);
        for (i, h) in c.hearts().iter().enumerate() {
            assert_eq!(h.spawn_at_ms, 1_000 + i as u64 * 80);
            assert!((0.0..1.0).contains(&h.x));
            assert!((0.8..1.0).contains(&h.y));
            assert!(h.delay_ms < 500);
            assert!(HEART_GLYPHS.contains(&h.glyph));
        }
    }

    #[test]
    fn hearts_appear_and_expire() {
        let mut c = Celebration::default();
        let mut rng = StdRng::seed_from_u64(2);
        c.burst(0, &mut rng);

        assert_eq!(c.live(0).len(), 1);
        assert_eq!(c.live(80).len(), 2);
        assert_eq!(c.live(19 * 80).len(), 20);
        // first heart gone at its lifetime
        assert_eq!(c.live(2600).len(), 19);
        assert!(c.live(19 * 80 + 2600).is_empty());

        c.prune(2600);
        assert_eq!(c.hearts().len(), 19);
        c.prune(19 * 80 + 2600);
        assert!(!c.is_active());
    }

    #[test]
    fn progress_is_bounded() {
        let mut c = Celebration::default();
        let mut rng = StdRng::seed_from_u64(3);
        c.burst(0, &mut rng);
        for t in (0..4_500).step_by(50) {
            for h in c.live(t) {
                assert!((0.0..=1.0).contains(&h.progress));
            }
        }
    }
}
