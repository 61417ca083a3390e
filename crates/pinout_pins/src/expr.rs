//! Pin expression parsing.
//!
//! A pin expression is a whitespace-separated list of pin tokens. A token of
//! the form `NAME:INDEX` refers to pin `INDEX` of connector `NAME`; any other
//! token is a package pin name used as-is.

use crate::error::PinError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One pin of a [`PinExpression`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PinRef {
    /// A physical package pin, e.g. `E3`.
    Literal(String),
    /// Pin `index` (0-based) of a named connector, e.g. `pmodd:3`.
    Connector {
        /// The connector name.
        connector: String,
        /// The position in the connector's pin list.
        index: usize,
    },
}

impl PinRef {
    /// Classifies a single token.
    ///
    /// Surrounding whitespace is trimmed, so `"T9 "` is the literal `T9`.
    /// Whitespace inside the token is rejected.
    pub fn parse_token(token: &str) -> Result<Self, PinError> {
        let token = token.trim();
        if token.is_empty() {
            return Err(PinError::malformed(token, "empty pin token"));
        }
        if token.contains(char::is_whitespace) {
            return Err(PinError::malformed(token, "pin token contains whitespace"));
        }

        let Some((connector, index)) = token.split_once(':') else {
            return Ok(PinRef::Literal(token.to_string()));
        };
        if connector.is_empty() {
            return Err(PinError::malformed(token, "connector name is empty"));
        }
        if index.is_empty() || !index.bytes().all(|b| b.is_ascii_digit()) {
            return Err(PinError::malformed(
                token,
                "connector index is not a non-negative integer",
            ));
        }
        let index = index
            .parse()
            .map_err(|_| PinError::malformed(token, "connector index is too large"))?;
        Ok(PinRef::Connector {
            connector: connector.to_string(),
            index,
        })
    }

    /// Returns `true` for a [`PinRef::Literal`].
    pub fn is_literal(&self) -> bool {
        matches!(self, PinRef::Literal(_))
    }
}

impl fmt::Display for PinRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PinRef::Literal(pin) => f.write_str(pin),
            PinRef::Connector { connector, index } => write!(f, "{connector}:{index}"),
        }
    }
}

/// An ordered list of pin references, one per bit of the signal it drives.
///
/// Displaying an expression joins its tokens with single spaces, which gives
/// back the whitespace-normalized input it was parsed from.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PinExpression {
    pins: Vec<PinRef>,
}

impl PinExpression {
    /// Parses a raw pin expression such as `"C2 E1 F1 D2"` or `"pmodd:3"`.
    ///
    /// Fails with [`PinError::MalformedPinExpression`] when the expression has
    /// no tokens or a token cannot be classified.
    pub fn parse(raw: &str) -> Result<Self, PinError> {
        let pins = raw
            .split_whitespace()
            .map(PinRef::parse_token)
            .collect::<Result<Vec<_>, _>>()?;
        if pins.is_empty() {
            return Err(PinError::malformed(raw, "expression has no pins"));
        }
        Ok(Self { pins })
    }

    /// Returns the number of pins, i.e. the bit width of the signal.
    pub fn len(&self) -> usize {
        self.pins.len()
    }

    /// Returns `true` if the expression has no pins. Parsed expressions never are.
    pub fn is_empty(&self) -> bool {
        self.pins.is_empty()
    }

    /// Returns the pin references in bit order.
    pub fn pins(&self) -> &[PinRef] {
        &self.pins
    }

    /// Iterates over the pin references in bit order.
    pub fn iter(&self) -> impl Iterator<Item = &PinRef> {
        self.pins.iter()
    }
}

impl FromStr for PinExpression {
    type Err = PinError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for PinExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, pin) in self.pins.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{pin}")?;
        }
        Ok(())
    }
}
