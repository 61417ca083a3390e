//! Declarative resource descriptions, as written in board tables.
//!
//! Pin text is kept unparsed here; it is parsed and resolved when the
//! resource is added to a [`ResourceCatalog`](crate::ResourceCatalog). This
//! lets templates reference connectors by name before the connector that
//! backs them is known.

use crate::attribute::Attribute;

/// One electrical line of a compound resource, e.g. `tx` of `serial`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubSignal {
    /// The sub-signal name.
    pub name: String,
    /// The unparsed pin expression.
    pub pins: String,
    /// Attributes that override the resource-level ones by key.
    pub attributes: Vec<Attribute>,
}

impl SubSignal {
    /// Creates a sub-signal without attributes.
    pub fn new(name: impl Into<String>, pins: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            pins: pins.into(),
            attributes: Vec::new(),
        }
    }

    /// Adds an attribute.
    pub fn with(mut self, attribute: Attribute) -> Self {
        self.attributes.push(attribute);
        self
    }
}

/// The signals making up a resource.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResourceBody {
    /// A single signal.
    Simple {
        /// The unparsed pin expression.
        pins: String,
    },
    /// An ordered bundle of named sub-signals.
    Compound {
        /// The sub-signals in declaration order.
        sub_signals: Vec<SubSignal>,
    },
}

/// A named, indexed hardware function exposed by the board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resource {
    /// The resource name, e.g. `user_led`.
    pub name: String,
    /// Distinguishes instances of the same resource, e.g. `user_led` 0..15.
    pub index: u32,
    /// Attributes applied to every signal that does not override them.
    pub attributes: Vec<Attribute>,
    /// The signals of the resource.
    pub body: ResourceBody,
}

impl Resource {
    /// Creates a single-signal resource.
    pub fn simple(name: impl Into<String>, index: u32, pins: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            index,
            attributes: Vec::new(),
            body: ResourceBody::Simple { pins: pins.into() },
        }
    }

    /// Creates a resource made of named sub-signals.
    pub fn compound(
        name: impl Into<String>,
        index: u32,
        sub_signals: impl IntoIterator<Item = SubSignal>,
    ) -> Self {
        Self {
            name: name.into(),
            index,
            attributes: Vec::new(),
            body: ResourceBody::Compound {
                sub_signals: sub_signals.into_iter().collect(),
            },
        }
    }

    /// Adds a resource-level attribute.
    pub fn with(mut self, attribute: Attribute) -> Self {
        self.attributes.push(attribute);
        self
    }
}
