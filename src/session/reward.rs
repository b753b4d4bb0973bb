//! Discount code rewards.

use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::SeedableRng;

/// Mixed into a session seed so reward draws use their own stream.
const REWARD_SEED_SALT: u64 = 0x9E37_79B9_7F4A_7C15;

/// Draws one discount code per completed spin.
///
/// Has its own random source, so the code drawn says nothing about which
/// restaurant won.
#[derive(Debug, Clone)]
pub struct RewardCodes {
    codes: Vec<String>,
    rng: StdRng,
}

impl RewardCodes {
    /// Reward codes drawn with an OS-seeded source.
    pub fn new(codes: Vec<String>) -> Self {
        Self {
            codes,
            rng: StdRng::from_os_rng(),
        }
    }

    /// Reward codes with a reproducible source derived from `seed`.
    pub fn seeded(codes: Vec<String>, seed: u64) -> Self {
        Self {
            codes,
            rng: StdRng::seed_from_u64(seed ^ REWARD_SEED_SALT),
        }
    }

    /// The configured codes.
    pub fn codes(&self) -> &[String] {
        &self.codes
    }

    /// Draw a code uniformly, or `None` when no codes are configured.
    pub fn draw(&mut self) -> Option<String> {
        self.codes.choose(&mut self.rng).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn codes() -> Vec<String> {
        vec!["A".into(), "B".into(), "C".into()]
    }

    #[test]
    fn test_empty_codes_draw_nothing() {
        let mut rewards = RewardCodes::seeded(Vec::new(), 1);
        assert_eq!(rewards.draw(), None);
    }

    #[test]
    fn test_draw_returns_configured_code() {
        let mut rewards = RewardCodes::new(codes());
        for _ in 0..50 {
            let code = rewards.draw().unwrap();
            assert!(rewards.codes().contains(&code));
        }
    }

    #[test]
    fn test_draw_covers_all_codes() {
        let mut rewards = RewardCodes::seeded(codes(), 9);
        let mut seen = std::collections::HashSet::new();
        for _ in 0..200 {
            seen.insert(rewards.draw().unwrap());
        }
        assert_eq!(seen.len(), 3);
    }

    #[test]
    fn test_seeded_draws_repeat() {
        let mut a = RewardCodes::seeded(codes(), 42);
        let mut b = RewardCodes::seeded(codes(), 42);
        for _ in 0..20 {
            assert_eq!(a.draw(), b.draw());
        }
    }
}
