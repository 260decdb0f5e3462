use std::fmt;

//------------ ConfigError ---------------------------------------------------

/// Errors returned when a stride configuration is rejected. No trie is
/// created from a configuration that fails validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The configuration has no strides at all.
    Empty,
    /// The stride at `level` is zero. Every level has to consume at least
    /// one bit of the address.
    ZeroStride { level: usize },
    /// The strides do not add up to the 32 bits of an IPv4 address.
    InvalidSum { sum: u32 },
    /// The textual form of a configuration could not be parsed into a list
    /// of integers.
    Unparsable(String),
}

impl std::error::Error for ConfigError {}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ConfigError::Empty => {
                write!(f, "Error: The stride configuration is empty.")
            }
            ConfigError::ZeroStride { level } => write!(
                f,
                "Error: The stride for level {} is zero, strides must be \
                positive.",
                level
            ),
            ConfigError::InvalidSum { sum } => write!(
                f,
                "Error: The strides add up to {} bits, they should add up \
                to 32.",
                sum
            ),
            ConfigError::Unparsable(s) => {
                write!(f, "Error: Cannot parse stride configuration '{}'.", s)
            }
        }
    }
}

//------------ PrefixError ---------------------------------------------------

/// Errors returned when creating a [Prefix](crate::Prefix).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrefixError {
    /// The requested prefix length cannot exist for IPv4.
    LengthInvalid(u8),
    /// Only IPv4 prefixes can be stored.
    UnsupportedFamily,
}

impl std::error::Error for PrefixError {}

impl fmt::Display for PrefixError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            PrefixError::LengthInvalid(len) => write!(
                f,
                "Error: The specified Prefix length {} is invalid.",
                len
            ),
            PrefixError::UnsupportedFamily => {
                write!(f, "Error: Only IPv4 prefixes are supported.")
            }
        }
    }
}

//------------ ParseError ----------------------------------------------------

/// Errors returned by the textual route table reader.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// Not a dotted-quad IPv4 address.
    Address(String),
    /// The part after the slash is not a prefix length.
    Length(String),
    /// A route line ended before both prefix and next-hop were read.
    MissingField,
    /// The address and length do not form a valid prefix.
    Prefix(PrefixError),
}

impl std::error::Error for ParseError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ParseError::Prefix(err) => Some(err),
            _ => None,
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ParseError::Address(s) => {
                write!(f, "Error: Bad address format in '{}'.", s)
            }
            ParseError::Length(s) => {
                write!(f, "Error: Bad prefix length in '{}'.", s)
            }
            ParseError::MissingField => write!(
                f,
                "Error: Route line should contain a prefix and a next-hop."
            ),
            ParseError::Prefix(err) => write!(f, "{}", err),
        }
    }
}

impl From<PrefixError> for ParseError {
    fn from(value: PrefixError) -> Self {
        ParseError::Prefix(value)
    }
}
