//! Variant-specific build artifacts derived from a platform.
//!
//! Nothing here runs a tool: commands and argument lists are returned for
//! the build backend or the programmer to execute.

use crate::error::PlatformError;
use crate::platform::{PeriodConstraint, Platform};
use crate::variant::VariantSpec;
use serde::{Deserialize, Serialize};

/// Clock inputs whose period is fixed by the attached hardware, constrained
/// whenever the board has them.
const WELL_KNOWN_CLOCKS: &[(&str, f64)] = &[
    // RMII reference clock, 50 MHz.
    ("eth_clocks:ref_clk", 20.0),
];

/// OpenOCD adapter configuration for the on-board FT2232 JTAG bridge.
const FT2232_INTERFACE: &str = "openocd_xc7_ft2232.cfg";

/// Device-name fragments and the JTAG-to-SPI proxy bitstream built for them.
///
/// Checked in order; the first fragment contained in the device name wins.
const BSCAN_SPI_BITSTREAMS: &[(&str, &str)] = &[
    ("xc7a100t", "bscan_spi_xc7a100t.bit"),
    ("xc7a50t", "bscan_spi_xc7a50t.bit"),
    ("xc7a35t", "bscan_spi_xc7a35t.bit"),
    ("xc7a200t", "bscan_spi_xc7a200t.bit"),
];

/// Placeholder replaced by the build name in post-processing commands.
const BUILD_NAME: &str = "{build_name}";

/// The debug adapter setup needed to program a device.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgrammerConfig {
    /// OpenOCD adapter interface file.
    pub interface_config: String,
    /// JTAG-to-SPI proxy bitstream used to write the configuration flash.
    pub bscan_spi_bitstream: String,
}

impl ProgrammerConfig {
    /// OpenOCD arguments that load a bitstream into the FPGA over JTAG.
    pub fn load_args(&self, bitstream: &str) -> Vec<String> {
        self.script_args(&[
            "init".to_string(),
            format!("pld load 0 {{{bitstream}}}"),
            "exit".to_string(),
        ])
    }

    /// OpenOCD arguments that write an image to the configuration flash at
    /// `address` and then reconfigure the FPGA from it.
    pub fn flash_args(&self, image: &str, address: u32) -> Vec<String> {
        self.script_args(&[
            "init".to_string(),
            format!("jtagspi_init 0 {{{}}}", self.bscan_spi_bitstream),
            format!("jtagspi_program {{{image}}} 0x{address:x}"),
            "fpga_program".to_string(),
            "exit".to_string(),
        ])
    }

    fn script_args(&self, script: &[String]) -> Vec<String> {
        vec![
            "-f".to_string(),
            self.interface_config.clone(),
            "-c".to_string(),
            script.join("; "),
        ]
    }
}

/// Returns the period constraints every design on the platform gets.
///
/// The default clock is always included and must exist in the catalog.
/// Well-known clocks are added with their fixed period when present and
/// skipped otherwise.
pub fn default_constraints(platform: &Platform) -> Result<Vec<PeriodConstraint>, PlatformError> {
    let clock = platform.default_clock();
    let id = platform.lookup_request(clock.name, 0, false)?.id();
    let mut constraints = vec![platform.period_constraint(&id, clock.period_ns)?];
    for &(path, period_ns) in WELL_KNOWN_CLOCKS {
        let Some(found) = platform.catalog().get(path, 0, false) else {
            continue;
        };
        let constraint = platform.period_constraint(&found.id(), period_ns)?;
        if constraints.iter().all(|c| c.pin != constraint.pin) {
            constraints.push(constraint);
        }
    }
    Ok(constraints)
}

/// Selects the programmer configuration for a device part number.
///
/// Fails with [`PlatformError::UnsupportedDevice`] when no known device
/// fragment matches; there is no fallback.
pub fn select_programmer(device: &str) -> Result<ProgrammerConfig, PlatformError> {
    let device_lower = device.to_ascii_lowercase();
    BSCAN_SPI_BITSTREAMS
        .iter()
        .find(|(fragment, _)| device_lower.contains(fragment))
        .map(|(_, bitstream)| ProgrammerConfig {
            interface_config: FT2232_INTERFACE.to_string(),
            bscan_spi_bitstream: bitstream.to_string(),
        })
        .ok_or_else(|| PlatformError::UnsupportedDevice(device.to_string()))
}

/// Properties set on the design before the bitstream is written.
pub fn bitstream_commands(variant: &VariantSpec) -> Vec<String> {
    vec![format!(
        "set_property BITSTREAM.CONFIG.SPI_BUSWIDTH {} [current_design]",
        variant.flash.bus_width
    )]
}

/// Commands run after the bitstream is written: conversion of the bitstream
/// into a configuration flash image.
///
/// Commands contain a `{build_name}` placeholder; see [`render_command`].
pub fn bitstream_postprocessing_commands(variant: &VariantSpec) -> Vec<String> {
    vec![format!(
        "write_cfgmem -force -format bin -interface {} -size {} \
         -loadbit \"up 0x0 {BUILD_NAME}.bit\" -file {BUILD_NAME}.bin",
        variant.flash.interface, variant.flash.size_mib
    )]
}

/// Substitutes the build name into a command template.
pub fn render_command(command: &str, build_name: &str) -> String {
    command.replace(BUILD_NAME, build_name)
}
