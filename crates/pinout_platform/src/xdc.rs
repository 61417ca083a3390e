//! Vivado XDC constraint emission.
//!
//! Emits pin locations and electrical properties for every requested
//! resource, the platform's raw commands, and a `create_clock` for every
//! period constraint whose resource was requested. Constraints on
//! resources the design did not request are left out, since their ports do
//! not exist in the netlist.

use crate::error::PlatformError;
use crate::platform::Platform;
use crate::variant::Toolchain;
use pinout_catalog::{Attribute, ResourceId};
use std::fmt::Write;

const RULE: &str =
    "################################################################################";

fn section(out: &mut String, title: &str) {
    let _ = writeln!(out, "{RULE}\n# {title}\n{RULE}\n");
}

/// Renders the XDC file for a finalized platform.
///
/// Fails with [`PlatformError::PlatformNotFinalized`] for an open platform
/// and with [`PlatformError::UnsupportedToolchain`] when the platform does
/// not target Vivado.
pub fn emit_xdc(platform: &Platform) -> Result<String, PlatformError> {
    if platform.toolchain() != Toolchain::Vivado {
        return Err(PlatformError::UnsupportedToolchain(platform.toolchain()));
    }
    if !platform.is_finalized() {
        return Err(PlatformError::PlatformNotFinalized);
    }
    let catalog = platform.catalog();
    let mut out = String::new();

    section(&mut out, "IO constraints");
    for id in platform.requests() {
        let lookup = catalog.lookup_id(id)?;
        let _ = writeln!(out, "# {id}");
        for signal in lookup.signals() {
            let signal_id = match &signal.name {
                Some(sub) => ResourceId::sub_signal(&id.name, id.index, sub),
                None => id.clone(),
            };
            let port = catalog.port_name(&signal_id);
            let bits = signal.pins.len();
            for (bit, pin) in signal.pins.iter().enumerate() {
                let target = if bits > 1 {
                    format!("[get_ports {{{port}[{bit}]}}]")
                } else {
                    format!("[get_ports {{{port}}}]")
                };
                let _ = writeln!(out, "set_property LOC {pin} {target}");
                for attr in &signal.attributes {
                    let _ = writeln!(out, "set_property {} {target}", property(attr));
                }
            }
        }
        out.push('\n');
    }

    section(&mut out, "Design constraints");
    for command in platform.platform_commands() {
        let _ = writeln!(out, "{command}");
    }
    out.push('\n');

    section(&mut out, "Clock constraints");
    for constraint in platform.period_constraints() {
        if !platform.is_requested(&constraint.resource) {
            continue;
        }
        let port = catalog.port_name(&constraint.resource);
        let _ = writeln!(
            out,
            "create_clock -name {port} -period {:.3} [get_ports {{{port}}}]",
            constraint.period_ns
        );
    }

    Ok(out)
}

/// Formats an attribute as the `KEY VALUE` part of a `set_property` command.
fn property(attr: &Attribute) -> String {
    match attr.value() {
        "" => attr.key().to_string(),
        value => format!("{} {value}", attr.key()),
    }
}
