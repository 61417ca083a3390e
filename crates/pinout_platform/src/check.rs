//! Pin-usage checks on a platform.
//!
//! | Code | Severity | Finding |
//! |------|----------|---------|
//! | W301 | warning  | a package pin belongs to more than one catalog resource |
//! | E301 | error    | a package pin belongs to more than one *requested* resource |
//! | W302 | warning  | a signal has no I/O standard |
//! | T301 | note     | a period constraint targets a resource that was not requested |

use crate::platform::Platform;
use pinout_catalog::ResourceId;
use pinout_diagnostics::{Category, Diagnostic, DiagnosticCode, DiagnosticSink};
use std::collections::BTreeMap;

/// Runs every check and emits findings into `sink`.
pub fn check_platform(platform: &Platform, sink: &DiagnosticSink) {
    check_shared_pins(platform, sink);
    check_io_standards(platform, sink);
    check_unrequested_clocks(platform, sink);
}

/// Maps every package pin to the signals using it, in catalog order.
fn pin_owners(platform: &Platform) -> BTreeMap<&str, Vec<ResourceId>> {
    let mut owners: BTreeMap<&str, Vec<ResourceId>> = BTreeMap::new();
    for resource in platform.catalog().iter() {
        for signal in &resource.signals {
            let id = match &signal.name {
                Some(sub) => ResourceId::sub_signal(&resource.name, resource.index, sub),
                None => resource.id(),
            };
            for pin in &signal.pins {
                owners.entry(pin.as_str()).or_default().push(id.clone());
            }
        }
    }
    owners
}

fn check_shared_pins(platform: &Platform, sink: &DiagnosticSink) {
    for (pin, owners) in pin_owners(platform) {
        let first = &owners[0];
        let others: Vec<&ResourceId> = owners
            .iter()
            .filter(|o| o.name != first.name || o.index != first.index)
            .collect();
        if others.is_empty() {
            continue;
        }

        let requested: Vec<&ResourceId> = owners
            .iter()
            .filter(|o| platform.is_requested(o))
            .collect();
        let conflicting = requested
            .iter()
            .any(|r| r.name != requested[0].name || r.index != requested[0].index);

        let mut diag = if conflicting {
            Diagnostic::error(
                DiagnosticCode::new(Category::Error, 301),
                format!("pin {pin} is driven by more than one requested resource"),
            )
            .with_help("request only one of the resources sharing this pin")
        } else {
            Diagnostic::warning(
                DiagnosticCode::new(Category::Warning, 301),
                format!("pin {pin} is shared by {} signals", owners.len()),
            )
        };
        diag = diag.with_subject(first.to_string());
        for other in others {
            diag = diag.with_note(format!("also used by {other}"));
        }
        sink.emit(diag);
    }
}

fn check_io_standards(platform: &Platform, sink: &DiagnosticSink) {
    for resource in platform.catalog().iter() {
        for signal in &resource.signals {
            if signal.attribute("IOSTANDARD").is_some() {
                continue;
            }
            let id = match &signal.name {
                Some(sub) => ResourceId::sub_signal(&resource.name, resource.index, sub),
                None => resource.id(),
            };
            sink.emit(
                Diagnostic::warning(
                    DiagnosticCode::new(Category::Warning, 302),
                    "signal has no I/O standard",
                )
                .with_subject(id.to_string())
                .with_help("add an IoStandard attribute to the resource or sub-signal"),
            );
        }
    }
}

fn check_unrequested_clocks(platform: &Platform, sink: &DiagnosticSink) {
    for constraint in platform.period_constraints() {
        if platform.is_requested(&constraint.resource) {
            continue;
        }
        sink.emit(
            Diagnostic::note(
                DiagnosticCode::new(Category::Timing, 301),
                format!(
                    "{} ns period constraint will not be emitted",
                    constraint.period_ns
                ),
            )
            .with_subject(constraint.resource.to_string())
            .with_note("the resource is not requested by the design"),
        );
    }
}
