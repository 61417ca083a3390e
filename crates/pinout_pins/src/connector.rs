//! Connector pinouts and connector-indirect pin resolution.

use crate::error::PinError;
use crate::expr::{PinExpression, PinRef};
use std::collections::BTreeMap;

/// A physical header (e.g. a PMOD port) and the package pins it exposes.
///
/// Index 0 is the first listed pin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Connector {
    name: String,
    pins: Vec<String>,
}

impl Connector {
    /// Builds a connector from a whitespace-separated list of package pins.
    ///
    /// Connector pin lists must be literal pins; a `NAME:INDEX` token is
    /// rejected as [`PinError::MalformedPinExpression`].
    pub fn from_pins(name: impl Into<String>, pins: &str) -> Result<Self, PinError> {
        let expr = PinExpression::parse(pins)?;
        let pins = expr
            .iter()
            .map(|pin| match pin {
                PinRef::Literal(pin) => Ok(pin.clone()),
                PinRef::Connector { .. } => Err(PinError::malformed(
                    pin.to_string(),
                    "connector pins must be package pins",
                )),
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            name: name.into(),
            pins,
        })
    }

    /// Returns the connector name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the package pins in connector order.
    pub fn pins(&self) -> &[String] {
        &self.pins
    }

    /// Returns the number of pins on the connector.
    pub fn len(&self) -> usize {
        self.pins.len()
    }

    /// Returns `true` if the connector exposes no pins.
    pub fn is_empty(&self) -> bool {
        self.pins.is_empty()
    }
}

/// All connectors of a board, keyed by name.
#[derive(Debug, Clone, Default)]
pub struct ConnectorRegistry {
    connectors: BTreeMap<String, Connector>,
}

impl ConnectorRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a connector, failing if its name is already taken.
    pub fn add(&mut self, connector: Connector) -> Result<(), PinError> {
        if self.connectors.contains_key(connector.name()) {
            return Err(PinError::DuplicateConnector(connector.name().to_string()));
        }
        self.connectors
            .insert(connector.name().to_string(), connector);
        Ok(())
    }

    /// Returns the connector with the given name, if any.
    pub fn get(&self, name: &str) -> Option<&Connector> {
        self.connectors.get(name)
    }

    /// Iterates over the connectors in name order.
    pub fn iter(&self) -> impl Iterator<Item = &Connector> {
        self.connectors.values()
    }

    /// Resolves pin `index` of connector `name` to its package pin.
    pub fn resolve(&self, name: &str, index: usize) -> Result<&str, PinError> {
        let connector = self
            .get(name)
            .ok_or_else(|| PinError::UnknownConnector(name.to_string()))?;
        connector
            .pins
            .get(index)
            .map(String::as_str)
            .ok_or_else(|| PinError::ConnectorIndexOutOfRange {
                connector: name.to_string(),
                index,
                len: connector.len(),
            })
    }

    /// Resolves every pin of an expression to a package pin, in bit order.
    pub fn resolve_expression(&self, expr: &PinExpression) -> Result<Vec<String>, PinError> {
        expr.iter()
            .map(|pin| match pin {
                PinRef::Literal(pin) => Ok(pin.clone()),
                PinRef::Connector { connector, index } => {
                    self.resolve(connector, *index).map(str::to_string)
                }
            })
            .collect()
    }
}
