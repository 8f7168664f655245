//! Injectable sources that decide which pad extends the sequence next.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use sequence_memory_core::{Symbol, ALPHABET_SIZE};

/// Seed used by [`SeededSymbols::default`] and `World::new`.
pub const DEFAULT_SEED: u64 = 0x42f0_e1eb_d4a5_3c21;

/// Supplies the symbol appended to the target sequence at the start of each round.
pub trait SymbolSource {
    /// Draws the next symbol. Repeats of the previous draw are permitted.
    fn next_symbol(&mut self) -> Symbol;
}

/// Uniform, independent draws from a seeded ChaCha stream.
#[derive(Clone, Debug)]
pub struct SeededSymbols {
    rng: ChaCha8Rng,
}

impl SeededSymbols {
    /// Creates a source whose draws are fully determined by `seed`.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }
}

impl Default for SeededSymbols {
    fn default() -> Self {
        Self::new(DEFAULT_SEED)
    }
}

impl SymbolSource for SeededSymbols {
    fn next_symbol(&mut self) -> Symbol {
        Symbol::ALL[self.rng.gen_range(0..ALPHABET_SIZE)]
    }
}

/// Replays a fixed list of symbols, wrapping around when exhausted.
///
/// An empty script always yields [`Symbol::Green`].
#[derive(Clone, Debug, Default)]
pub struct ScriptedSymbols {
    script: Vec<Symbol>,
    cursor: usize,
}

impl ScriptedSymbols {
    /// Creates a source that yields `script` in order.
    #[must_use]
    pub fn new(script: impl IntoIterator<Item = Symbol>) -> Self {
        Self {
            script: script.into_iter().collect(),
            cursor: 0,
        }
    }
}

impl SymbolSource for ScriptedSymbols {
    fn next_symbol(&mut self) -> Symbol {
        if self.script.is_empty() {
            return Symbol::Green;
        }
        let symbol = self.script[self.cursor % self.script.len()];
        self.cursor = self.cursor.wrapping_add(1);
        symbol
    }
}
