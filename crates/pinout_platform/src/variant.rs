//! Device variants and toolchain selection.

use crate::error::PlatformError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The SPI configuration flash fitted next to the FPGA.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConfigFlash {
    /// `write_cfgmem` interface name, e.g. `spix4`.
    pub interface: &'static str,
    /// Flash size in MiB.
    pub size_mib: u32,
    /// SPI bus width used when the FPGA configures itself from flash.
    pub bus_width: u8,
}

/// One member of a board family: a variant key and the device it selects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VariantSpec {
    /// The key users select the variant by, e.g. `a7-100`.
    pub key: &'static str,
    /// The full device part number, e.g. `xc7a100tcsg324-1`.
    pub device: &'static str,
    /// The configuration flash of this variant.
    pub flash: ConfigFlash,
}

impl VariantSpec {
    /// Selects `key` from a closed variant table.
    ///
    /// An unknown key is an error; there is no default variant.
    pub fn select<'a>(table: &'a [VariantSpec], key: &str) -> Result<&'a VariantSpec, PlatformError> {
        table
            .iter()
            .find(|v| v.key == key)
            .ok_or_else(|| PlatformError::UnknownVariant {
                variant: key.to_string(),
                known: table.iter().map(|v| v.key).collect::<Vec<_>>().join(", "),
            })
    }
}

/// The vendor or open-source backend that consumes the platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Toolchain {
    /// AMD Vivado.
    Vivado,
    /// SymbiFlow / F4PGA.
    Symbiflow,
    /// Yosys with nextpnr-xilinx.
    YosysNextpnr,
}

impl Toolchain {
    /// Returns the key used to select this toolchain.
    pub fn key(self) -> &'static str {
        match self {
            Toolchain::Vivado => "vivado",
            Toolchain::Symbiflow => "symbiflow",
            Toolchain::YosysNextpnr => "yosys+nextpnr",
        }
    }
}

impl fmt::Display for Toolchain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Toolchain {
    type Err = PlatformError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "vivado" => Ok(Toolchain::Vivado),
            "symbiflow" | "f4pga" => Ok(Toolchain::Symbiflow),
            "yosys+nextpnr" => Ok(Toolchain::YosysNextpnr),
            other => Err(PlatformError::UnknownToolchain(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FLASH: ConfigFlash = ConfigFlash {
        interface: "spix4",
        size_mib: 16,
        bus_width: 4,
    };

    const TABLE: &[VariantSpec] = &[
        VariantSpec {
            key: "a7-50",
            device: "xc7a50t-1csg324i",
            flash: FLASH,
        },
        VariantSpec {
            key: "a7-100",
            device: "xc7a100tcsg324-1",
            flash: FLASH,
        },
    ];

    #[test]
    fn select_known_variant() {
        assert_eq!(VariantSpec::select(TABLE, "a7-50").unwrap().device, "xc7a50t-1csg324i");
    }

    #[test]
    fn select_unknown_variant_lists_known_keys() {
        let err = VariantSpec::select(TABLE, "a7-999").unwrap_err();
        assert_eq!(
            err,
            PlatformError::UnknownVariant {
                variant: "a7-999".to_string(),
                known: "a7-50, a7-100".to_string()
            }
        );
    }

    #[test]
    fn toolchain_keys_roundtrip() {
        for tc in [Toolchain::Vivado, Toolchain::Symbiflow, Toolchain::YosysNextpnr] {
            assert_eq!(tc.key().parse::<Toolchain>().unwrap(), tc);
        }
        assert_eq!("f4pga".parse::<Toolchain>().unwrap(), Toolchain::Symbiflow);
    }

    #[test]
    fn unknown_toolchain() {
        let err = "quartus".parse::<Toolchain>().unwrap_err();
        assert_eq!(err, PlatformError::UnknownToolchain("quartus".to_string()));
    }
}
