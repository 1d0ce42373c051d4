//! Gap ("hole") timing
//!
//! Each cycle draws an onset and a duration once, then counts frames: the
//! first `onset` frames of a cycle leave a trail, the next `duration` frames
//! are a hole.

use super::rng::RandomSource;
use crate::settings::PlayerPhysicsConfig;

#[derive(Debug, Clone, Default)]
pub struct HoleTimer {
    /// Frames into the current cycle
    counter: u32,
    /// Frames of trail before the hole opens
    onset: f32,
    /// Frames the hole stays open
    duration: f32,
    in_hole: bool,
}

impl HoleTimer {
    /// Start a fresh cycle
    pub fn new(physics: &PlayerPhysicsConfig, rng: &mut (impl RandomSource + ?Sized)) -> Self {
        let mut timer = Self::default();
        timer.reroll(physics, rng);
        timer
    }

    fn reroll(&mut self, physics: &PlayerPhysicsConfig, rng: &mut (impl RandomSource + ?Sized)) {
        self.onset = rng.jittered(physics.hole_rate, physics.hole_rate_rnd);
        self.duration = rng.jittered(physics.hole_size, physics.hole_size_rnd);
        self.counter = 0;
        self.in_hole = false;
    }

    /// Advance one frame; returns whether this frame is inside a hole
    pub fn advance(
        &mut self,
        physics: &PlayerPhysicsConfig,
        rng: &mut (impl RandomSource + ?Sized),
    ) -> bool {
        if self.counter as f32 >= self.onset + self.duration {
            self.reroll(physics, rng);
        }
        self.counter += 1;
        if self.counter as f32 > self.onset {
            self.in_hole = true;
        }
        self.in_hole
    }

    pub fn in_hole(&self) -> bool {
        self.in_hole
    }

    pub fn onset(&self) -> f32 {
        self.onset
    }

    pub fn duration(&self) -> f32 {
        self.duration
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::rng::SimRng;
    use proptest::prelude::*;

    fn fixed(rate: f32, size: f32) -> PlayerPhysicsConfig {
        PlayerPhysicsConfig {
            hole_rate: rate,
            hole_rate_rnd: 0.0,
            hole_size: size,
            hole_size_rnd: 0.0,
            ..Default::default()
        }
    }

    #[test]
    fn test_fresh_timer_is_drawing() {
        let physics = fixed(5.0, 3.0);
        let mut rng = SimRng::new(1);
        let timer = HoleTimer::new(&physics, &mut rng);
        assert!(!timer.in_hole());
        assert_eq!(timer.onset(), 5.0);
        assert_eq!(timer.duration(), 3.0);
    }

    #[test]
    fn test_exact_alternation() {
        let physics = fixed(5.0, 3.0);
        let mut rng = SimRng::new(1);
        let mut timer = HoleTimer::new(&physics, &mut rng);

        let pattern: Vec<bool> = (0..24).map(|_| timer.advance(&physics, &mut rng)).collect();
        let cycle = [false, false, false, false, false, true, true, true];
        for (i, in_hole) in pattern.iter().enumerate() {
            assert_eq!(*in_hole, cycle[i % cycle.len()], "frame {}", i + 1);
        }
    }

    proptest! {
        #[test]
        fn prop_zero_jitter_alternates(rate in 1u32..60, size in 1u32..20, seed in any::<u64>()) {
            let physics = fixed(rate as f32, size as f32);
            let mut rng = SimRng::new(seed);
            let mut timer = HoleTimer::new(&physics, &mut rng);

            for _cycle in 0..3 {
                for _ in 0..rate {
                    prop_assert!(!timer.advance(&physics, &mut rng));
                }
                for _ in 0..size {
                    prop_assert!(timer.advance(&physics, &mut rng));
                }
            }
        }

        #[test]
        fn prop_jittered_bounds(seed in any::<u64>()) {
            let physics = PlayerPhysicsConfig::default();
            let mut rng = SimRng::new(seed);
            let timer = HoleTimer::new(&physics, &mut rng);
            prop_assert!(timer.onset() >= physics.hole_rate - physics.hole_rate_rnd);
            prop_assert!(timer.onset() <= physics.hole_rate + physics.hole_rate_rnd);
            prop_assert!(timer.duration() >= physics.hole_size - physics.hole_size_rnd);
            prop_assert!(timer.duration() <= physics.hole_size + physics.hole_size_rnd);
        }
    }
}
