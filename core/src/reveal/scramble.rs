//! Scramble Reveal
//!
//! Shows every position of the target at once, filled with random glyphs,
//! and locks positions to their real character a few per tick in a chosen
//! order. Once locked, a position never changes again.
//!
//! Positions are `char`s, not bytes, so multi-byte text scrambles cleanly.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use super::{RevealEngine, Revealer};
use crate::config::RevealConfig;

/// Default filler alphabet
pub const DEFAULT_ALPHABET: &str =
    "ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz!@#$%^&*()_+";

/// Order in which positions are locked
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ScrambleOrder {
    /// Left to right
    #[default]
    Start,
    /// Right to left
    End,
    /// Middle outward
    Center,
    /// Shuffled
    Random,
}

/// Lock order of `0..len` for the given strategy
fn lock_order(len: usize, order: ScrambleOrder, rng: &mut StdRng) -> Vec<usize> {
    let mut positions: Vec<usize> = (0..len).collect();
    match order {
        ScrambleOrder::Start => {}
        ScrambleOrder::End => positions.reverse(),
        ScrambleOrder::Center => {
            // Distance from the midpoint, doubled to stay in integers
            let span = len.saturating_sub(1);
            positions.sort_by_key(|&i| ((2 * i).abs_diff(span), i));
        }
        ScrambleOrder::Random => positions.shuffle(rng),
    }
    positions
}

/// One displayed frame of a scramble
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ScrambleFrame {
    /// What to draw now, same char count as the target
    pub text: String,
    /// Per-position lock flags
    pub finalized: Vec<bool>,
}

impl ScrambleFrame {
    /// Characters with their lock flag
    pub fn cells(&self) -> impl Iterator<Item = (char, bool)> + '_ {
        self.text.chars().zip(self.finalized.iter().copied())
    }

    /// Number of locked positions
    #[must_use]
    pub fn finalized_count(&self) -> usize {
        self.finalized.iter().filter(|f| **f).count()
    }

    /// Whether every position is locked
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.finalized.iter().all(|f| *f)
    }
}

/// Scramble reveal engine
#[derive(Clone, Debug)]
pub struct ScrambleReveal {
    target: Vec<char>,
    shown: Vec<char>,
    finalized: Vec<bool>,
    order: Vec<usize>,
    cursor: usize,
    chars_per_tick: usize,
    strategy: ScrambleOrder,
    alphabet: Vec<char>,
    preserve_whitespace: bool,
    seed: Option<u64>,
    rng: StdRng,
}

impl ScrambleReveal {
    /// Create an engine with the default alphabet, one lock per tick
    #[must_use]
    pub fn new(strategy: ScrambleOrder) -> Self {
        Self {
            target: Vec::new(),
            shown: Vec::new(),
            finalized: Vec::new(),
            order: Vec::new(),
            cursor: 0,
            chars_per_tick: 1,
            strategy,
            alphabet: DEFAULT_ALPHABET.chars().collect(),
            preserve_whitespace: true,
            seed: None,
            rng: StdRng::from_entropy(),
        }
    }

    /// Create an engine from the reveal configuration
    #[must_use]
    pub fn from_config(config: &RevealConfig) -> Self {
        Self::new(config.scramble_order)
            .with_chars_per_tick(config.scramble_chars_per_tick)
            .with_alphabet(&config.scramble_alphabet)
            .with_preserve_whitespace(config.preserve_whitespace)
    }

    /// Lock this many positions per tick (at least one)
    #[must_use]
    pub fn with_chars_per_tick(mut self, count: usize) -> Self {
        self.chars_per_tick = count.max(1);
        self
    }

    /// Filler alphabet; an empty alphabet keeps the current one
    #[must_use]
    pub fn with_alphabet(mut self, alphabet: &str) -> Self {
        if !alphabet.is_empty() {
            self.alphabet = alphabet.chars().collect();
        }
        self
    }

    /// Whether whitespace is shown as-is from the first frame
    #[must_use]
    pub fn with_preserve_whitespace(mut self, preserve: bool) -> Self {
        self.preserve_whitespace = preserve;
        self
    }

    /// Make filler and random order reproducible
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    /// Number of locked positions
    #[must_use]
    pub fn finalized_count(&self) -> usize {
        self.finalized.iter().filter(|f| **f).count()
    }

    fn random_glyph(&mut self) -> char {
        match self.alphabet.len() {
            0 => '?',
            n => self.alphabet[self.rng.gen_range(0..n)],
        }
    }

    fn rescramble(&mut self) {
        for i in 0..self.target.len() {
            self.shown[i] = if self.finalized[i] {
                self.target[i]
            } else {
                self.random_glyph()
            };
        }
    }
}

impl Default for ScrambleReveal {
    fn default() -> Self {
        Self::new(ScrambleOrder::Start)
    }
}

impl RevealEngine for ScrambleReveal {
    type Frame = ScrambleFrame;

    fn restart(&mut self, source: &str) {
        self.rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        self.target = source.chars().collect();
        self.finalized = self
            .target
            .iter()
            .map(|c| self.preserve_whitespace && c.is_whitespace())
            .collect();

        let finalized = &self.finalized;
        let order = lock_order(self.target.len(), self.strategy, &mut self.rng);
        self.order = order.into_iter().filter(|&i| !finalized[i]).collect();
        self.cursor = 0;

        self.shown = self.target.clone();
        self.rescramble();
    }

    fn tick(&mut self) {
        let end = (self.cursor + self.chars_per_tick).min(self.order.len());
        for &position in &self.order[self.cursor..end] {
            self.finalized[position] = true;
        }
        self.cursor = end;
        self.rescramble();
    }

    fn is_complete(&self) -> bool {
        self.cursor >= self.order.len()
    }

    fn frame(&self) -> ScrambleFrame {
        ScrambleFrame {
            text: self.shown.iter().collect(),
            finalized: self.finalized.clone(),
        }
    }
}

impl Revealer<ScrambleReveal> {
    /// Scramble host ticking at the configured scramble interval
    #[must_use]
    pub fn scramble(config: &RevealConfig) -> Self {
        Self::new(ScrambleReveal::from_config(config), config.scramble_interval)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn run_to_end(engine: &mut ScrambleReveal) -> Vec<ScrambleFrame> {
        let mut frames = vec![engine.frame()];
        while !engine.is_complete() {
            engine.tick();
            frames.push(engine.frame());
        }
        frames
    }

    #[test]
    fn test_lock_orders() {
        let mut rng = StdRng::seed_from_u64(7);
        assert_eq!(lock_order(4, ScrambleOrder::Start, &mut rng), vec![0, 1, 2, 3]);
        assert_eq!(lock_order(4, ScrambleOrder::End, &mut rng), vec![3, 2, 1, 0]);
        assert_eq!(lock_order(5, ScrambleOrder::Center, &mut rng), vec![2, 1, 3, 0, 4]);
        assert_eq!(lock_order(4, ScrambleOrder::Center, &mut rng), vec![1, 2, 0, 3]);

        let mut shuffled = lock_order(8, ScrambleOrder::Random, &mut rng);
        shuffled.sort_unstable();
        assert_eq!(shuffled, (0..8).collect::<Vec<_>>());
    }

    #[test]
    fn test_frame_length_matches_target() {
        let mut engine = ScrambleReveal::default().with_seed(1);
        engine.restart("Positive");
        for frame in run_to_end(&mut engine) {
            assert_eq!(frame.text.chars().count(), 8);
            assert_eq!(frame.finalized.len(), 8);
        }
    }

    #[test]
    fn test_terminal_frame_equals_target() {
        let mut engine = ScrambleReveal::new(ScrambleOrder::Random).with_seed(42);
        engine.restart("Error analyzing sentiment");
        let last = run_to_end(&mut engine).pop().unwrap();
        assert_eq!(last.text, "Error analyzing sentiment");
        assert!(last.is_complete());
    }

    #[test]
    fn test_finalized_positions_never_change() {
        let mut engine = ScrambleReveal::new(ScrambleOrder::Center).with_seed(3);
        engine.restart("Negative");
        let target: Vec<char> = "Negative".chars().collect();
        let frames = run_to_end(&mut engine);

        for pair in frames.windows(2) {
            let (before, after) = (&pair[0], &pair[1]);
            for (i, was_final) in before.finalized.iter().enumerate() {
                if *was_final {
                    assert!(after.finalized[i]);
                    assert_eq!(after.text.chars().nth(i), Some(target[i]));
                }
            }
            assert!(after.finalized_count() >= before.finalized_count());
        }
    }

    #[test]
    fn test_start_order_locks_left_to_right() {
        let mut engine = ScrambleReveal::default().with_seed(9);
        engine.restart("abc");
        engine.tick();
        assert_eq!(engine.frame().finalized, vec![true, false, false]);
        engine.tick();
        assert_eq!(engine.frame().finalized, vec![true, true, false]);
    }

    #[test]
    fn test_chars_per_tick() {
        let mut engine = ScrambleReveal::new(ScrambleOrder::End)
            .with_chars_per_tick(3)
            .with_seed(5);
        engine.restart("abcdefg");
        engine.tick();
        assert_eq!(
            engine.frame().finalized,
            vec![false, false, false, false, true, true, true]
        );
        engine.tick();
        engine.tick();
        assert!(engine.is_complete());
        assert_eq!(engine.frame().text, "abcdefg");
    }

    #[test]
    fn test_whitespace_preserved_from_first_frame() {
        let mut engine = ScrambleReveal::default().with_seed(11);
        engine.restart("a b");
        let frame = engine.frame();
        assert_eq!(frame.text.chars().nth(1), Some(' '));
        assert_eq!(frame.finalized, vec![false, true, false]);

        // Two ticks, not three
        engine.tick();
        engine.tick();
        assert!(engine.is_complete());
    }

    #[test]
    fn test_whitespace_scrambled_when_not_preserved() {
        let mut engine = ScrambleReveal::default()
            .with_alphabet("#")
            .with_preserve_whitespace(false)
            .with_seed(11);
        engine.restart("a b");
        assert_eq!(engine.frame().text, "###");
        assert_eq!(run_to_end(&mut engine).len(), 4);
    }

    #[test]
    fn test_filler_uses_alphabet() {
        let mut engine = ScrambleReveal::default().with_alphabet("xy").with_seed(2);
        engine.restart("Neutral");
        let frame = engine.frame();
        assert!(frame.text.chars().all(|c| c == 'x' || c == 'y'));
    }

    #[test]
    fn test_empty_target() {
        let mut engine = ScrambleReveal::default();
        engine.restart("");
        assert!(engine.is_complete());
        assert_eq!(engine.frame(), ScrambleFrame::default());
    }

    #[test]
    fn test_multibyte_target() {
        let mut engine = ScrambleReveal::new(ScrambleOrder::Random).with_seed(8);
        engine.restart("héllo wörld");
        let last = run_to_end(&mut engine).pop().unwrap();
        assert_eq!(last.text, "héllo wörld");
    }

    #[test]
    fn test_restart_resets_progress() {
        let mut engine = ScrambleReveal::default().with_seed(4);
        engine.restart("Positive");
        engine.tick();
        engine.tick();
        assert_eq!(engine.finalized_count(), 2);

        engine.restart("Negative");
        assert_eq!(engine.finalized_count(), 0);
        assert!(!engine.is_complete());
    }

    #[test]
    fn test_seeded_runs_are_reproducible() {
        let mut a = ScrambleReveal::new(ScrambleOrder::Random).with_seed(99);
        let mut b = ScrambleReveal::new(ScrambleOrder::Random).with_seed(99);
        a.restart("Positive");
        b.restart("Positive");
        assert_eq!(run_to_end(&mut a), run_to_end(&mut b));
    }
}
