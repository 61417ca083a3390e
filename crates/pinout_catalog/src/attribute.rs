//! Electrical attributes attached to resources and sub-signals.

use serde::{Deserialize, Serialize};

/// A key/value electrical property of a signal.
///
/// `Misc` carries a raw vendor directive such as `SLEW=FAST` or
/// `PULLUP True`; its key is the text before the first `=` or space.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Attribute {
    /// The I/O standard, e.g. `LVCMOS33` or `SSTL18_II`.
    IoStandard(String),
    /// Any other directive: pull, drive, slew, termination.
    Misc(String),
}

impl Attribute {
    /// Shorthand for [`Attribute::IoStandard`].
    pub fn io_standard(name: impl Into<String>) -> Self {
        Attribute::IoStandard(name.into())
    }

    /// Shorthand for [`Attribute::Misc`].
    pub fn misc(directive: impl Into<String>) -> Self {
        Attribute::Misc(directive.into())
    }

    /// Returns the attribute key (`IOSTANDARD`, `SLEW`, `PULLUP`, ...).
    pub fn key(&self) -> &str {
        match self {
            Attribute::IoStandard(_) => "IOSTANDARD",
            Attribute::Misc(directive) => split_directive(directive).0,
        }
    }

    /// Returns the attribute value; empty for a bare directive.
    pub fn value(&self) -> &str {
        match self {
            Attribute::IoStandard(name) => name,
            Attribute::Misc(directive) => split_directive(directive).1,
        }
    }
}

fn split_directive(directive: &str) -> (&str, &str) {
    let directive = directive.trim();
    match directive.find(|c: char| c == '=' || c.is_whitespace()) {
        Some(at) => (&directive[..at], directive[at + 1..].trim()),
        None => (directive, ""),
    }
}

/// Computes the attributes that apply to one signal.
///
/// Resource-level attributes are inherited unless the signal carries an
/// attribute with the same key, in which case the signal's own attribute is
/// used instead. Inherited attributes come first, followed by the signal's.
pub fn effective_attributes(inherited: &[Attribute], own: &[Attribute]) -> Vec<Attribute> {
    inherited
        .iter()
        .filter(|attr| own.iter().all(|o| o.key() != attr.key()))
        .chain(own)
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_and_values() {
        let io = Attribute::io_standard("LVCMOS33");
        assert_eq!((io.key(), io.value()), ("IOSTANDARD", "LVCMOS33"));

        let slew = Attribute::misc("SLEW=FAST");
        assert_eq!((slew.key(), slew.value()), ("SLEW", "FAST"));

        let pull = Attribute::misc("PULLUP True");
        assert_eq!((pull.key(), pull.value()), ("PULLUP", "True"));

        let term = Attribute::misc("IN_TERM=UNTUNED_SPLIT_40");
        assert_eq!((term.key(), term.value()), ("IN_TERM", "UNTUNED_SPLIT_40"));

        let bare = Attribute::misc("PULLDOWN");
        assert_eq!((bare.key(), bare.value()), ("PULLDOWN", ""));
    }

    #[test]
    fn signal_attribute_overrides_resource_attribute() {
        let inherited = [Attribute::misc("SLEW=FAST"), Attribute::io_standard("SSTL18_II")];
        let own = [Attribute::io_standard("DIFF_SSTL18_II")];
        assert_eq!(
            effective_attributes(&inherited, &own),
            vec![Attribute::misc("SLEW=FAST"), Attribute::io_standard("DIFF_SSTL18_II")]
        );
    }

    #[test]
    fn distinct_keys_accumulate() {
        let inherited = [Attribute::misc("SLEW=FAST"), Attribute::io_standard("LVCMOS33")];
        let own = [Attribute::misc("PULLUP True")];
        assert_eq!(effective_attributes(&inherited, &own).len(), 3);
    }
}
