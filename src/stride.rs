use std::fmt;
use std::str::FromStr;

use serde_derive::{Deserialize, Serialize};

use crate::types::errors::ConfigError;

/// The number of bits in an IPv4 address, and therefore the required sum of
/// all strides.
pub const ADDR_BITS: u8 = 32;

//------------ StrideConfig --------------------------------------------------

/// The stride division of a trie: the number of address bits consumed at
/// each depth level, starting at the root.
///
/// A config is validated on creation: it holds at least one stride, no
/// stride is zero, and the strides add up to exactly 32.
///
/// ```
/// use stride_fib::StrideConfig;
///
/// let config: StrideConfig = "4,4,8,8,8".parse().unwrap();
/// assert_eq!(config.strides(), &[4, 4, 8, 8, 8]);
/// assert_eq!(config.bits_before(2), 8);
///
/// assert!(StrideConfig::new(&[8, 8, 8]).is_err());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<u8>", into = "Vec<u8>")]
pub struct StrideConfig {
    strides: Vec<u8>,
}

impl StrideConfig {
    pub fn new(strides: &[u8]) -> Result<Self, ConfigError> {
        if strides.is_empty() {
            return Err(ConfigError::Empty);
        }
        if let Some(level) = strides.iter().position(|s| *s == 0) {
            return Err(ConfigError::ZeroStride { level });
        }
        // Summed as u32, a long list of large strides overflows a u8.
        let sum: u32 = strides.iter().map(|s| *s as u32).sum();
        if sum != ADDR_BITS as u32 {
            return Err(ConfigError::InvalidSum { sum });
        }
        Ok(Self {
            strides: strides.to_vec(),
        })
    }

    pub fn strides(&self) -> &[u8] {
        &self.strides
    }

    /// The number of levels below the root, i.e. the number of strides.
    pub fn levels(&self) -> usize {
        self.strides.len()
    }

    pub fn get(&self, level: usize) -> Option<u8> {
        self.strides.get(level).copied()
    }

    /// The number of address bits consumed by all levels shallower than
    /// `level`. For the level past the last stride this is 32.
    pub fn bits_before(&self, level: usize) -> u8 {
        self.strides.iter().take(level).sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = u8> + '_ {
        self.strides.iter().copied()
    }
}

impl Default for StrideConfig {
    fn default() -> Self {
        Self {
            strides: vec![8, 8, 8, 8],
        }
    }
}

impl TryFrom<Vec<u8>> for StrideConfig {
    type Error = ConfigError;

    fn try_from(value: Vec<u8>) -> Result<Self, Self::Error> {
        StrideConfig::new(&value)
    }
}

impl From<StrideConfig> for Vec<u8> {
    fn from(value: StrideConfig) -> Self {
        value.strides
    }
}

impl FromStr for StrideConfig {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let strides = s
            .split(',')
            .map(|part| part.trim().parse::<u8>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|_| ConfigError::Unparsable(s.to_string()))?;
        StrideConfig::new(&strides)
    }
}

impl fmt::Display for StrideConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut iter = self.strides.iter();
        if let Some(first) = iter.next() {
            write!(f, "{}", first)?;
        }
        for s in iter {
            write!(f, ",{}", s)?;
        }
        Ok(())
    }
}

//------------ Bit chunks ----------------------------------------------------

// The address window is kept left-aligned in a u32: the next bits to be
// consumed are always the top bits.

/// Returns the top `len` bits of `window`, shifted all the way to the right.
/// A zero `len` yields zero.
#[inline]
pub(crate) fn bit_chunk(window: u32, len: u8) -> u32 {
    window.checked_shr(ADDR_BITS as u32 - len as u32).unwrap_or(0)
}

/// Shifts `window` left by `len` bits, discarding the consumed top bits.
/// Shifting by 32 clears the window instead of overflowing.
#[inline]
pub(crate) fn consume(window: u32, len: u8) -> u32 {
    window.checked_shl(len as u32).unwrap_or(0)
}
