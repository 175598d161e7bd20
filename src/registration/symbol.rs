use serde::{Deserialize, Serialize};
use std::fmt;

pub const SYMBOL_COLUMNS: usize = 12;
pub const SYMBOL_ROWS: usize = 8;
const WORDS: usize = 3;

/// Bitmap for the 12x8 LED matrix on the station display.
///
/// Pixels are packed row-major, most significant bit first, into three
/// 32-bit words (96 bits, one per pixel).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "Vec<u32>", into = "Vec<u32>")]
pub struct Symbol([u32; WORDS]);

/// Symbol construction errors
#[derive(Debug, Clone, PartialEq)]
pub enum SymbolError {
    WrongLength(usize),
}

impl fmt::Display for SymbolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SymbolError::WrongLength(n) => {
                write!(f, "symbol must be {} packed words, got {}", WORDS, n)
            }
        }
    }
}

impl std::error::Error for SymbolError {}

impl Symbol {
    pub const fn from_packed(words: [u32; WORDS]) -> Self {
        Self(words)
    }

    /// All pixels off. Sent to the display to clear it.
    pub const fn blank() -> Self {
        Self([0; WORDS])
    }

    /// Generic train outline shown for unregistered tags.
    pub const fn placeholder() -> Self {
        Self([0x0f01f811, 0x80180700, 0x60000060])
    }

    pub fn packed(&self) -> [u32; WORDS] {
        self.0
    }

    pub fn is_blank(&self) -> bool {
        self.0.iter().all(|w| *w == 0)
    }

    /// Returns whether the pixel at `row`, `col` is lit. Out of range is off.
    pub fn pixel(&self, row: usize, col: usize) -> bool {
        if row >= SYMBOL_ROWS || col >= SYMBOL_COLUMNS {
            return false;
        }
        let index = row * SYMBOL_COLUMNS + col;
        let word = self.0[index / 32];
        word & (1 << (31 - index % 32)) != 0
    }

    /// Text rendering, one line per row, `#` for lit pixels.
    pub fn rows(&self) -> Vec<String> {
        (0..SYMBOL_ROWS)
            .map(|row| {
                (0..SYMBOL_COLUMNS)
                    .map(|col| if self.pixel(row, col) { '#' } else { '.' })
                    .collect()
            })
            .collect()
    }
}

impl TryFrom<&[u32]> for Symbol {
    type Error = SymbolError;

    fn try_from(words: &[u32]) -> Result<Self, Self::Error> {
        let packed: [u32; WORDS] = words
            .try_into()
            .map_err(|_| SymbolError::WrongLength(words.len()))?;
        Ok(Self(packed))
    }
}

impl TryFrom<Vec<u32>> for Symbol {
    type Error = SymbolError;

    fn try_from(words: Vec<u32>) -> Result<Self, Self::Error> {
        Symbol::try_from(words.as_slice())
    }
}

impl From<Symbol> for Vec<u32> {
    fn from(symbol: Symbol) -> Self {
        symbol.0.to_vec()
    }
}
