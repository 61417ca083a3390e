//! Configuration types deserialized from `pinout.toml`.

use pinout_common::Frequency;
use serde::Deserialize;

/// The top-level configuration parsed from `pinout.toml`.
#[derive(Debug, Deserialize)]
pub struct PinoutConfig {
    /// Which board, variant and toolchain to build for.
    pub board: BoardSelection,
    /// Build settings.
    #[serde(default)]
    pub build: BuildConfig,
    /// Resources the design uses.
    #[serde(default, rename = "request")]
    pub requests: Vec<RequestConfig>,
    /// Extra constraints on top of the board defaults.
    #[serde(default)]
    pub constraints: ConstraintConfig,
}

/// Board, variant and toolchain selection.
///
/// Variant and toolchain stay strings here; they are checked against the
/// board's closed tables when the platform is constructed.
#[derive(Debug, Deserialize)]
pub struct BoardSelection {
    /// Board name, e.g. `digilent_nexys_a7`.
    pub name: String,
    /// Variant key, e.g. `a7-100`; the board's default variant when absent.
    #[serde(default)]
    pub variant: Option<String>,
    /// Toolchain key, e.g. `vivado`.
    #[serde(default = "default_toolchain")]
    pub toolchain: String,
}

fn default_toolchain() -> String {
    "vivado".to_string()
}

/// Build settings.
#[derive(Debug, Deserialize)]
pub struct BuildConfig {
    /// Base name of build outputs (`{name}.bit`, `{name}.bin`).
    #[serde(default = "default_build_name")]
    pub name: String,
}

fn default_build_name() -> String {
    "top".to_string()
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            name: default_build_name(),
        }
    }
}

/// A resource the design requests.
#[derive(Debug, Clone, Deserialize)]
pub struct RequestConfig {
    /// Resource path, `name` or `name:sub_signal`.
    pub resource: String,
    /// Resource index.
    #[serde(default)]
    pub index: u32,
}

/// Extra constraints.
#[derive(Debug, Default, Deserialize)]
pub struct ConstraintConfig {
    /// Period constraints on clock resources.
    #[serde(default)]
    pub period: Vec<PeriodConfig>,
}

/// A clock constraint stated as a frequency.
#[derive(Debug, Clone, Deserialize)]
pub struct PeriodConfig {
    /// Resource path, `name` or `name:sub_signal`.
    pub resource: String,
    /// Resource index.
    #[serde(default)]
    pub index: u32,
    /// Clock frequency, e.g. `"50MHz"`.
    pub frequency: String,
}

impl PeriodConfig {
    /// Parses the frequency. The loader has already validated it.
    pub fn frequency(&self) -> Option<Frequency> {
        self.frequency.parse().ok()
    }
}
