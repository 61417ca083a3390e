//! Platform descriptors and the build artifacts derived from them.
//!
//! A [`Platform`] binds a board's resource catalog and connectors to one
//! device variant and toolchain. While open it accepts requests, period
//! constraints and raw toolchain commands; [`Platform::finalize`] adds the
//! default constraints and freezes it for the build backend.
//!
//! # Architecture
//!
//! - [`variant`]: device variants, configuration flash and toolchains
//! - [`platform`]: the open/finalized platform state machine
//! - [`policy`]: default constraints, programmer selection, bitstream commands
//! - [`xdc`]: Vivado constraint emission
//! - [`check`]: pin-usage diagnostics

#![warn(missing_docs)]

pub mod check;
pub mod error;
pub mod platform;
pub mod policy;
pub mod variant;
pub mod xdc;

pub use check::check_platform;
pub use error::PlatformError;
pub use platform::{BoardDescription, DefaultClock, PeriodConstraint, Platform};
pub use policy::{
    bitstream_commands, bitstream_postprocessing_commands, default_constraints, render_command,
    select_programmer, ProgrammerConfig,
};
pub use variant::{ConfigFlash, Toolchain, VariantSpec};
pub use xdc::emit_xdc;
