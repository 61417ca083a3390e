//! The resolved resource catalog and its lookup paths.

use crate::attribute::{effective_attributes, Attribute};
use crate::error::CatalogError;
use crate::resource::{Resource, ResourceBody};
use pinout_pins::{ConnectorRegistry, PinExpression};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Identifies a resource, or one sub-signal of it.
///
/// Displayed as `name[index]` or `name[index].sub_signal`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ResourceId {
    /// The resource name.
    pub name: String,
    /// The resource index.
    pub index: u32,
    /// The sub-signal, when the id points inside a compound resource.
    pub sub_signal: Option<String>,
}

impl ResourceId {
    /// Creates an id for a whole resource.
    pub fn new(name: impl Into<String>, index: u32) -> Self {
        Self {
            name: name.into(),
            index,
            sub_signal: None,
        }
    }

    /// Creates an id for one sub-signal of a resource.
    pub fn sub_signal(name: impl Into<String>, index: u32, sub_signal: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            index,
            sub_signal: Some(sub_signal.into()),
        }
    }
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[{}]", self.name, self.index)?;
        if let Some(sub) = &self.sub_signal {
            write!(f, ".{sub}")?;
        }
        Ok(())
    }
}

/// A signal with its pins resolved to package pins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedSignal {
    /// The sub-signal name; `None` for the signal of a simple resource.
    pub name: Option<String>,
    /// The parsed expression, before connector resolution.
    pub expression: PinExpression,
    /// Package pins in bit order.
    pub pins: Vec<String>,
    /// Attributes in effect for this signal after inheritance.
    pub attributes: Vec<Attribute>,
}

impl ResolvedSignal {
    /// Returns the value of the effective attribute with the given key.
    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|attr| attr.key() == key)
            .map(Attribute::value)
    }
}

/// A resource whose pin expressions have all been resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedResource {
    /// The resource name.
    pub name: String,
    /// The resource index.
    pub index: u32,
    /// `true` if the resource was declared with sub-signals.
    pub compound: bool,
    /// The signals, one for a simple resource.
    pub signals: Vec<ResolvedSignal>,
}

impl ResolvedResource {
    fn resolve(resource: Resource, connectors: &ConnectorRegistry) -> Result<Self, CatalogError> {
        let resolve_signal = |name: Option<String>, pins: &str, own: &[Attribute]| {
            let expression = PinExpression::parse(pins)?;
            let pins = connectors.resolve_expression(&expression)?;
            Ok::<_, CatalogError>(ResolvedSignal {
                name,
                expression,
                pins,
                attributes: effective_attributes(&resource.attributes, own),
            })
        };

        let (compound, signals) = match &resource.body {
            ResourceBody::Simple { pins } => (false, vec![resolve_signal(None, pins, &[])?]),
            ResourceBody::Compound { sub_signals } => (
                true,
                sub_signals
                    .iter()
                    .map(|sub| resolve_signal(Some(sub.name.clone()), &sub.pins, &sub.attributes))
                    .collect::<Result<Vec<_>, _>>()?,
            ),
        };

        Ok(Self {
            name: resource.name,
            index: resource.index,
            compound,
            signals,
        })
    }

    /// Returns the sub-signal with the given name.
    pub fn sub_signal(&self, name: &str) -> Option<&ResolvedSignal> {
        self.signals
            .iter()
            .find(|signal| signal.name.as_deref() == Some(name))
    }

    /// Returns the id of the whole resource.
    pub fn id(&self) -> ResourceId {
        ResourceId::new(&self.name, self.index)
    }
}

/// The result of a catalog lookup: a resource, optionally narrowed to one
/// of its sub-signals.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Lookup<'a> {
    /// The matched resource.
    pub resource: &'a ResolvedResource,
    /// The matched sub-signal, if the lookup named one that exists.
    pub sub_signal: Option<&'a ResolvedSignal>,
}

impl<'a> Lookup<'a> {
    /// Returns the id of what was matched.
    pub fn id(&self) -> ResourceId {
        match self.sub_signal.and_then(|s| s.name.as_deref()) {
            Some(sub) => ResourceId::sub_signal(&self.resource.name, self.resource.index, sub),
            None => self.resource.id(),
        }
    }

    /// Returns the matched signals: the sub-signal alone, or every signal of
    /// the resource.
    pub fn signals(&self) -> &'a [ResolvedSignal] {
        match self.sub_signal {
            Some(signal) => std::slice::from_ref(signal),
            None => &self.resource.signals,
        }
    }

    /// Returns every package pin of the matched signals, in order.
    pub fn pins(&self) -> Vec<&'a str> {
        self.signals()
            .iter()
            .flat_map(|signal| signal.pins.iter().map(String::as_str))
            .collect()
    }
}

/// Every resource of a board, resolved against its connectors.
///
/// The catalog is append-only: resources can be added but never replaced or
/// removed.
#[derive(Debug, Clone, Default)]
pub struct ResourceCatalog {
    resources: Vec<ResolvedResource>,
    by_key: HashMap<(String, u32), usize>,
}

impl ResourceCatalog {
    /// Creates an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a catalog from a resource table.
    pub fn from_resources(
        resources: impl IntoIterator<Item = Resource>,
        connectors: &ConnectorRegistry,
    ) -> Result<Self, CatalogError> {
        let mut catalog = Self::new();
        catalog.extend(resources, connectors)?;
        Ok(catalog)
    }

    /// Adds a resource, resolving all of its pins.
    ///
    /// Fails with [`CatalogError::DuplicateResource`] if `(name, index)` is
    /// already present, whatever the new resource contains, and with the
    /// parser's or registry's error if a pin does not resolve.
    pub fn add(
        &mut self,
        resource: Resource,
        connectors: &ConnectorRegistry,
    ) -> Result<(), CatalogError> {
        self.extend([resource], connectors)
    }

    /// Adds several resources in order.
    ///
    /// The whole batch is resolved and checked for duplicates, against the
    /// catalog and within itself, before anything is inserted; on failure
    /// the catalog is unchanged.
    pub fn extend(
        &mut self,
        resources: impl IntoIterator<Item = Resource>,
        connectors: &ConnectorRegistry,
    ) -> Result<(), CatalogError> {
        let mut batch: Vec<ResolvedResource> = Vec::new();
        for resource in resources {
            let duplicate = self.resource(&resource.name, resource.index).is_some()
                || batch
                    .iter()
                    .any(|r| r.name == resource.name && r.index == resource.index);
            if duplicate {
                return Err(CatalogError::DuplicateResource {
                    name: resource.name,
                    index: resource.index,
                });
            }
            batch.push(ResolvedResource::resolve(resource, connectors)?);
        }
        for resolved in batch {
            self.by_key
                .insert((resolved.name.clone(), resolved.index), self.resources.len());
            self.resources.push(resolved);
        }
        Ok(())
    }

    /// Looks up `path` (`name` or `name:sub_signal`) at `index`.
    ///
    /// With `loose`, a sub-signal that does not exist falls back to the
    /// enclosing resource. A missing resource is never found.
    pub fn get(&self, path: &str, index: u32, loose: bool) -> Option<Lookup<'_>> {
        let (name, sub) = match path.split_once(':') {
            Some((name, sub)) => (name, Some(sub)),
            None => (path, None),
        };
        let resource = self.resource(name, index)?;
        let sub_signal = match sub {
            None => None,
            Some(sub) => match resource.sub_signal(sub) {
                Some(signal) => Some(signal),
                None if loose => None,
                None => return None,
            },
        };
        Some(Lookup {
            resource,
            sub_signal,
        })
    }

    /// Like [`get`](Self::get), failing with [`CatalogError::ResourceNotFound`].
    pub fn lookup(&self, path: &str, index: u32, loose: bool) -> Result<Lookup<'_>, CatalogError> {
        self.get(path, index, loose)
            .ok_or_else(|| CatalogError::ResourceNotFound {
                path: path.to_string(),
                index,
            })
    }

    /// Looks up the resource or sub-signal named by an id.
    pub fn lookup_id(&self, id: &ResourceId) -> Result<Lookup<'_>, CatalogError> {
        match &id.sub_signal {
            Some(sub) => self.lookup(&format!("{}:{sub}", id.name), id.index, false),
            None => self.lookup(&id.name, id.index, false),
        }
    }

    /// Returns the resource with the exact name and index.
    pub fn resource(&self, name: &str, index: u32) -> Option<&ResolvedResource> {
        self.by_key
            .get(&(name.to_string(), index))
            .map(|&i| &self.resources[i])
    }

    /// Returns how many instances of `name` the catalog holds.
    pub fn instance_count(&self, name: &str) -> usize {
        self.resources.iter().filter(|r| r.name == name).count()
    }

    /// Returns the top-level port name used for a signal in emitted
    /// constraints.
    ///
    /// A resource with a single instance keeps its name (`clk100`); one with
    /// several gets its index appended (`user_led3`). Sub-signals append
    /// `_sub` (`serial_tx`, `rgb_led1_g`).
    pub fn port_name(&self, id: &ResourceId) -> String {
        let mut port = if self.instance_count(&id.name) > 1 {
            format!("{}{}", id.name, id.index)
        } else {
            id.name.clone()
        };
        if let Some(sub) = &id.sub_signal {
            port.push('_');
            port.push_str(sub);
        }
        port
    }

    /// Iterates over the resources in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &ResolvedResource> {
        self.resources.iter()
    }

    /// Returns the number of resources.
    pub fn len(&self) -> usize {
        self.resources.len()
    }

    /// Returns `true` if the catalog holds no resources.
    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resource::SubSignal;
    use pinout_pins::{Connector, PinError};

    fn connectors() -> ConnectorRegistry {
        let mut registry = ConnectorRegistry::new();
        registry
            .add(Connector::from_pins("pmodd", "H4 H1 G1 G3 H2 G4 G2 F3").unwrap())
            .unwrap();
        registry
    }

    fn catalog() -> ResourceCatalog {
        let resources = vec![
            Resource::simple("clk100", 0, "E3").with(Attribute::io_standard("LVCMOS33")),
            Resource::simple("user_led", 0, "H17"),
            Resource::simple("user_led", 1, "K15"),
            Resource::compound("eth_clocks", 0, [SubSignal::new("ref_clk", "D5")])
                .with(Attribute::io_standard("LVCMOS33")),
            Resource::compound(
                "sdcard",
                0,
                [
                    SubSignal::new("data", "pmodd:2 pmodd:4 pmodd:5 pmodd:0")
                        .with(Attribute::misc("PULLUP True")),
                    SubSignal::new("clk", "pmodd:3"),
                ],
            )
            .with(Attribute::misc("SLEW=FAST")),
        ];
        ResourceCatalog::from_resources(resources, &connectors()).unwrap()
    }

    #[test]
    fn exact_lookup_of_simple_resource() {
        let catalog = catalog();
        let clk = catalog.lookup("clk100", 0, false).unwrap();
        assert_eq!(clk.pins(), vec!["E3"]);
        assert_eq!(clk.id(), ResourceId::new("clk100", 0));
        assert_eq!(clk.signals()[0].attribute("IOSTANDARD"), Some("LVCMOS33"));
    }

    #[test]
    fn connector_references_resolve_at_add_time() {
        let catalog = catalog();
        let clk = catalog.lookup("sdcard:clk", 0, false).unwrap();
        assert_eq!(clk.pins(), vec!["G3"]);
        let data = catalog.lookup("sdcard:data", 0, false).unwrap();
        assert_eq!(data.pins(), vec!["G1", "H2", "G4", "H4"]);
        assert_eq!(data.signals()[0].expression.to_string(), "pmodd:2 pmodd:4 pmodd:5 pmodd:0");
    }

    #[test]
    fn sub_signal_attributes_inherit_and_override() {
        let catalog = catalog();
        let data = catalog.lookup("sdcard:data", 0, false).unwrap();
        let signal = &data.signals()[0];
        assert_eq!(signal.attribute("SLEW"), Some("FAST"));
        assert_eq!(signal.attribute("PULLUP"), Some("True"));
        let clk = catalog.lookup("sdcard:clk", 0, false).unwrap();
        assert_eq!(clk.signals()[0].attribute("PULLUP"), None);
    }

    #[test]
    fn missing_resource_or_index_not_found() {
        let catalog = catalog();
        for (path, index) in [("user_sw", 0), ("user_led", 2), ("eth_clocks:rx_clk", 0)] {
            let err = catalog.lookup(path, index, false).unwrap_err();
            assert_eq!(
                err,
                CatalogError::ResourceNotFound {
                    path: path.to_string(),
                    index
                }
            );
        }
    }

    #[test]
    fn loose_lookup_falls_back_to_enclosing_resource() {
        let catalog = catalog();
        let found = catalog.lookup("eth_clocks:rx_clk", 0, true).unwrap();
        assert!(found.sub_signal.is_none());
        assert_eq!(found.id(), ResourceId::new("eth_clocks", 0));

        let exact = catalog.lookup("eth_clocks:ref_clk", 0, true).unwrap();
        assert_eq!(exact.id(), ResourceId::sub_signal("eth_clocks", 0, "ref_clk"));
        assert_eq!(exact.pins(), vec!["D5"]);

        assert!(catalog.lookup("eth:ref_clk", 0, true).is_err());
    }

    #[test]
    fn duplicate_add_fails_even_with_different_content() {
        let mut catalog = catalog();
        let err = catalog
            .add(Resource::simple("user_led", 1, "V11"), &connectors())
            .unwrap_err();
        assert_eq!(
            err,
            CatalogError::DuplicateResource {
                name: "user_led".to_string(),
                index: 1
            }
        );
        assert_eq!(catalog.lookup("user_led", 1, false).unwrap().pins(), vec!["K15"]);
    }

    #[test]
    fn failed_extend_inserts_nothing() {
        let mut catalog = catalog();
        let len = catalog.len();

        let err = catalog
            .extend(
                [
                    Resource::simple("pmod_led", 0, "pmodd:0"),
                    Resource::simple("user_led", 0, "pmodd:1"),
                ],
                &connectors(),
            )
            .unwrap_err();
        assert!(matches!(err, CatalogError::DuplicateResource { index: 0, .. }));
        assert_eq!(catalog.len(), len);
        assert!(catalog.get("pmod_led", 0, false).is_none());

        let err = catalog
            .extend(
                [
                    Resource::simple("pmod_btn", 0, "pmodd:2"),
                    Resource::simple("pmod_btn", 0, "pmodd:3"),
                ],
                &connectors(),
            )
            .unwrap_err();
        assert_eq!(
            err,
            CatalogError::DuplicateResource {
                name: "pmod_btn".to_string(),
                index: 0
            }
        );

        let err = catalog
            .extend(
                [
                    Resource::simple("pmod_sw", 0, "pmodd:4"),
                    Resource::simple("pmod_sw", 1, "pmodd:9"),
                ],
                &connectors(),
            )
            .unwrap_err();
        assert!(matches!(err, CatalogError::Pin(PinError::ConnectorIndexOutOfRange { .. })));
        assert_eq!(catalog.len(), len);
        assert_eq!(catalog.instance_count("pmod_sw"), 0);
    }

    #[test]
    fn resolution_errors_surface_on_add() {
        let mut catalog = ResourceCatalog::new();
        let err = catalog
            .add(Resource::simple("spi", 0, "pmodd:8"), &connectors())
            .unwrap_err();
        assert!(matches!(
            err,
            CatalogError::Pin(PinError::ConnectorIndexOutOfRange { index: 8, .. })
        ));

        let err = catalog
            .add(Resource::simple("spi", 0, "pmodq:0"), &connectors())
            .unwrap_err();
        assert_eq!(err, CatalogError::Pin(PinError::UnknownConnector("pmodq".to_string())));

        let err = catalog
            .add(Resource::simple("spi", 0, "pmodd:x"), &connectors())
            .unwrap_err();
        assert!(matches!(err, CatalogError::Pin(PinError::MalformedPinExpression { .. })));
        assert!(catalog.is_empty());
    }

    #[test]
    fn lookup_by_id() {
        let catalog = catalog();
        let id = ResourceId::sub_signal("sdcard", 0, "clk");
        assert_eq!(catalog.lookup_id(&id).unwrap().id(), id);
        assert!(catalog.lookup_id(&ResourceId::new("vga", 0)).is_err());
    }

    #[test]
    fn port_names() {
        let catalog = catalog();
        assert_eq!(catalog.port_name(&ResourceId::new("clk100", 0)), "clk100");
        assert_eq!(catalog.port_name(&ResourceId::new("user_led", 1)), "user_led1");
        assert_eq!(
            catalog.port_name(&ResourceId::sub_signal("eth_clocks", 0, "ref_clk")),
            "eth_clocks_ref_clk"
        );
    }

    #[test]
    fn resource_id_display() {
        assert_eq!(ResourceId::new("user_led", 3).to_string(), "user_led[3]");
        assert_eq!(
            ResourceId::sub_signal("serial", 0, "tx").to_string(),
            "serial[0].tx"
        );
    }

    #[test]
    fn resource_id_serde_roundtrip() {
        let id = ResourceId::sub_signal("eth_clocks", 0, "ref_clk");
        let json = serde_json::to_string(&id).unwrap();
        let back: ResourceId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, back);
    }
}
