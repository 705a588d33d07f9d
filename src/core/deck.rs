//! PromptDeck: shuffled prompt sequence with a forward-only cursor

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::config::validate_catalog;
use crate::error::ConfigError;
use crate::types::Prompt;

#[derive(Debug, Clone)]
pub struct PromptDeck {
    /// Current permutation of the catalog
    prompts: Vec<Prompt>,
    /// 0 ≤ cursor ≤ len; == len means exhausted
    cursor: usize,
    rng: StdRng,
}

impl PromptDeck {
    /// Deck over `catalog` with an entropy-seeded shuffle
    pub fn new(catalog: Vec<Prompt>) -> Result<Self, ConfigError> {
        Self::with_rng(catalog, StdRng::from_entropy())
    }

    /// Deck with a reproducible shuffle order
    pub fn seeded(catalog: Vec<Prompt>, seed: u64) -> Result<Self, ConfigError> {
        Self::with_rng(catalog, StdRng::seed_from_u64(seed))
    }

    fn with_rng(catalog: Vec<Prompt>, rng: StdRng) -> Result<Self, ConfigError> {
        validate_catalog(&catalog)?;
        Ok(Self {
            prompts: catalog,
            cursor: 0,
            rng,
        })
    }

    /// Reshuffle and rewind to the first prompt
    pub fn shuffle(&mut self) {
        self.prompts.shuffle(&mut self.rng);
        self.cursor = 0;
    }

    /// Prompt under the cursor, `None` once exhausted
    pub fn current(&self) -> Option<&Prompt> {
        self.prompts.get(self.cursor)
    }

    /// Move to the next prompt. Returns false when the deck is now exhausted.
    pub fn advance(&mut self) -> bool {
        if self.cursor < self.prompts.len() {
            self.cursor += 1;
        }
        !self.is_exhausted()
    }

    pub fn is_exhausted(&self) -> bool {
        self.cursor >= self.prompts.len()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.prompts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prompts.is_empty()
    }

    /// Prompts not yet shown, current included
    pub fn remaining(&self) -> &[Prompt] {
        &self.prompts[self.cursor.min(self.prompts.len())..]
    }

    /// Full current order
    pub fn prompts(&self) -> &[Prompt] {
        &self.prompts
    }
}
