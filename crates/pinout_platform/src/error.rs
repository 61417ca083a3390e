//! Error types for platform construction, mutation and artifact derivation.

use crate::variant::Toolchain;
use pinout_catalog::{CatalogError, ResourceId};

/// Errors raised by [`Platform`](crate::Platform) and the policy functions.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PlatformError {
    /// The requested variant key is not one the board defines.
    #[error("unknown variant '{variant}' (expected one of: {known})")]
    UnknownVariant {
        /// The requested key.
        variant: String,
        /// Comma-separated list of valid keys.
        known: String,
    },

    /// The requested toolchain key is not recognized.
    #[error("unknown toolchain '{0}'")]
    UnknownToolchain(String),

    /// A different period is already constrained on the same resource.
    #[error("{resource} already has a {existing} ns period constraint, cannot add {requested} ns")]
    DuplicatePeriodConstraint {
        /// The constrained resource.
        resource: ResourceId,
        /// The period already recorded.
        existing: f64,
        /// The conflicting period.
        requested: f64,
    },

    /// A period constraint names something other than a single one-bit
    /// signal.
    #[error("{resource} resolves to {pins} pins; a clock must be a single pin")]
    NotAClockPin {
        /// The constrained resource.
        resource: ResourceId,
        /// Number of package pins behind it.
        pins: usize,
    },

    /// A period that is not a finite, positive number of nanoseconds.
    #[error("invalid period {period_ns} ns for {resource}")]
    InvalidPeriod {
        /// The constrained resource.
        resource: ResourceId,
        /// The rejected period.
        period_ns: f64,
    },

    /// The platform was finalized and no longer accepts mutations.
    #[error("platform is finalized")]
    PlatformFinalized,

    /// The operation needs a finalized platform.
    #[error("platform is not finalized")]
    PlatformNotFinalized,

    /// No programmer configuration matches the device.
    #[error("no programmer configuration for device '{0}'")]
    UnsupportedDevice(String),

    /// The resource was already requested by the design.
    #[error("{0} is already requested")]
    ResourceAlreadyRequested(ResourceId),

    /// Constraint emission is not available for the toolchain.
    #[error("constraint emission is not supported for toolchain '{0}'")]
    UnsupportedToolchain(Toolchain),

    /// A catalog lookup or mutation failed.
    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_unknown_variant() {
        let err = PlatformError::UnknownVariant {
            variant: "a7-999".to_string(),
            known: "a7-50, a7-100".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "unknown variant 'a7-999' (expected one of: a7-50, a7-100)"
        );
    }

    #[test]
    fn display_duplicate_period() {
        let err = PlatformError::DuplicatePeriodConstraint {
            resource: ResourceId::new("clk100", 0),
            existing: 10.0,
            requested: 8.0,
        };
        assert_eq!(
            err.to_string(),
            "clk100[0] already has a 10 ns period constraint, cannot add 8 ns"
        );
    }

    #[test]
    fn display_not_a_clock_pin() {
        let err = PlatformError::NotAClockPin {
            resource: ResourceId::sub_signal("vga", 0, "r"),
            pins: 4,
        };
        assert_eq!(
            err.to_string(),
            "vga[0].r resolves to 4 pins; a clock must be a single pin"
        );
    }

    #[test]
    fn catalog_errors_pass_through() {
        let inner = CatalogError::ResourceNotFound {
            path: "clk100".to_string(),
            index: 0,
        };
        let err: PlatformError = inner.clone().into();
        assert_eq!(err.to_string(), inner.to_string());
    }
}
