//! Bit-packed board identifier.
//!
//! Every data cell contributes two bits (green, blue) to a 16-bit word; the
//! red bit is implied and must be set. A new word starts every eight cells,
//! so the last word holds only the remaining cells.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::color::ColorClass;
use crate::ClassifyError;

/// Bits per identifier word.
pub const WORD_BITS: usize = u16::BITS as usize;
/// Cells packed into one word.
pub const CELLS_PER_WORD: usize = WORD_BITS / 2;

#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Identifier {
    words: Vec<u16>,
}

impl Identifier {
    /// Pack the classes of the data cells, in board order.
    pub fn encode(classes: &[ColorClass]) -> Result<Self, ClassifyError> {
        let mut words = Vec::with_capacity(classes.len().div_ceil(CELLS_PER_WORD));
        for (chunk_idx, chunk) in classes.chunks(CELLS_PER_WORD).enumerate() {
            let mut word = 0u16;
            for (k, class) in chunk.iter().enumerate() {
                if !class.red {
                    return Err(ClassifyError::MissingRed {
                        index: chunk_idx * CELLS_PER_WORD + k,
                        class: *class,
                    });
                }
                word = (word << 2) | (class.green as u16) << 1 | class.blue as u16;
            }
            words.push(word);
        }
        Ok(Self { words })
    }

    pub fn from_words(words: Vec<u16>) -> Self {
        Self { words }
    }

    pub fn words(&self) -> &[u16] {
        &self.words
    }

    /// Recover `cell_count` classes. Returns `None` when the word count does
    /// not match `cell_count`.
    pub fn decode(&self, cell_count: usize) -> Option<Vec<ColorClass>> {
        if self.words.len() != cell_count.div_ceil(CELLS_PER_WORD) {
            return None;
        }
        let mut out = Vec::with_capacity(cell_count);
        for (w, &word) in self.words.iter().enumerate() {
            let cells = (cell_count - w * CELLS_PER_WORD).min(CELLS_PER_WORD);
            for k in (0..cells).rev() {
                let bits = (word >> (2 * k)) & 0b11;
                out.push(ColorClass {
                    red: true,
                    green: bits & 0b10 != 0,
                    blue: bits & 0b01 != 0,
                });
            }
        }
        Some(out)
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, w) in self.words.iter().enumerate() {
            if i > 0 {
                f.write_str("-")?;
            }
            write!(f, "{w:04x}")?;
        }
        Ok(())
    }
}
