//! Board descriptions and config-driven platform construction.
//!
//! Each board module holds the static tables for one board. [`board`] picks
//! one by the name used in `pinout.toml`, and [`platform_from_config`] turns
//! a loaded configuration into a finalized [`Platform`] with the requests
//! and extra constraints it lists applied.
//!
//! ```text
//! pinout.toml ──> PinoutConfig ──> Platform (open) ──> finalize ──> BuildArtifacts
//! ```

#![warn(missing_docs)]

pub mod nexys_a7;

use pinout_config::{load_config, ConfigError, PinoutConfig};
use pinout_platform::{
    bitstream_commands, bitstream_postprocessing_commands, emit_xdc, render_command,
    select_programmer, BoardDescription, Platform, PlatformError, ProgrammerConfig, Toolchain,
};
use serde::Serialize;
use std::path::Path;

/// Boards known by name, with the function building each description.
const BOARDS: &[(&str, fn() -> Result<BoardDescription, PlatformError>)] =
    &[(nexys_a7::NAME, nexys_a7::board)];

/// Errors raised while turning a configuration into a platform.
#[derive(Debug, thiserror::Error)]
pub enum BoardError {
    /// No board is registered under the configured name.
    #[error("unknown board '{name}' (expected one of: {known})")]
    UnknownBoard {
        /// The configured name.
        name: String,
        /// Comma-separated list of known boards.
        known: String,
    },

    /// A period constraint carries a frequency that does not parse.
    #[error("invalid frequency '{frequency}' for {resource}")]
    InvalidFrequency {
        /// The constrained resource path.
        resource: String,
        /// The configured frequency text.
        frequency: String,
    },

    /// The configuration could not be loaded.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Platform construction or mutation failed.
    #[error(transparent)]
    Platform(#[from] PlatformError),
}

/// Names of every known board.
pub fn board_names() -> impl Iterator<Item = &'static str> {
    BOARDS.iter().map(|(name, _)| *name)
}

/// Builds the description of the board with the given name.
pub fn board(name: &str) -> Result<BoardDescription, BoardError> {
    let (_, build) = BOARDS
        .iter()
        .find(|(known, _)| *known == name)
        .ok_or_else(|| BoardError::UnknownBoard {
            name: name.to_string(),
            known: board_names().collect::<Vec<_>>().join(", "),
        })?;
    Ok(build()?)
}

/// Constructs and finalizes the platform a configuration describes.
///
/// Requests are applied in file order, then the extra period constraints,
/// then the board defaults when the platform is finalized.
pub fn platform_from_config(config: &PinoutConfig) -> Result<Platform, BoardError> {
    let board = board(&config.board.name)?;
    let variant = config
        .board
        .variant
        .as_deref()
        .unwrap_or(board.default_variant);
    let mut platform = Platform::construct(board, variant, &config.board.toolchain)?;

    for request in &config.requests {
        platform.request(&request.resource, request.index)?;
    }
    for period in &config.constraints.period {
        let frequency = period
            .frequency()
            .ok_or_else(|| BoardError::InvalidFrequency {
                resource: period.resource.clone(),
                frequency: period.frequency.clone(),
            })?;
        let id = platform
            .lookup_request(&period.resource, period.index, false)?
            .id();
        platform.add_period_constraint(id, frequency.period_ns())?;
    }

    platform.finalize()?;
    Ok(platform)
}

/// Loads `pinout.toml` from a project directory and builds its platform.
pub fn load_platform(project_dir: &Path) -> Result<(PinoutConfig, Platform), BoardError> {
    let config = load_config(project_dir)?;
    let platform = platform_from_config(&config)?;
    Ok((config, platform))
}

/// Everything the build backend and programmer need from a finalized
/// platform.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BuildArtifacts {
    /// Constraint file contents; only produced for Vivado.
    pub xdc: Option<String>,
    /// Commands run before the bitstream is written.
    pub bitstream_commands: Vec<String>,
    /// Commands run after the bitstream is written, build name substituted.
    pub postprocessing_commands: Vec<String>,
    /// Programmer setup for the platform's device.
    pub programmer: ProgrammerConfig,
    /// Fingerprint of the platform inputs, as hex.
    pub fingerprint: String,
}

impl BuildArtifacts {
    /// Derives the artifacts of a finalized platform for a build name.
    pub fn derive(platform: &Platform, build_name: &str) -> Result<Self, PlatformError> {
        if !platform.is_finalized() {
            return Err(PlatformError::PlatformNotFinalized);
        }
        let xdc = match platform.toolchain() {
            Toolchain::Vivado => Some(emit_xdc(platform)?),
            _ => None,
        };
        let variant = platform.variant();
        Ok(Self {
            xdc,
            bitstream_commands: bitstream_commands(variant),
            postprocessing_commands: bitstream_postprocessing_commands(variant)
                .iter()
                .map(|command| render_command(command, build_name))
                .collect(),
            programmer: select_programmer(platform.device())?,
            fingerprint: platform.fingerprint().to_string(),
        })
    }
}
