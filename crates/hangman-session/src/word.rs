//! Secret word selection.

use rand::seq::IndexedRandom;

/// Picks the secret word for a new session from a candidate list.
///
/// Returns `None` only when there is nothing to pick from.
pub trait WordPicker: Send + Sync {
    /// Pick one candidate.
    fn pick(&self, candidates: &[String]) -> Option<String>;
}

impl<F> WordPicker for F
where
    F: Fn(&[String]) -> Option<String> + Send + Sync,
{
    fn pick(&self, candidates: &[String]) -> Option<String> {
        self(candidates)
    }
}

/// Uniform random selection using the thread-local RNG.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomWordPicker;

impl WordPicker for RandomWordPicker {
    fn pick(&self, candidates: &[String]) -> Option<String> {
        candidates.choose(&mut rand::rng()).cloned()
    }
}
