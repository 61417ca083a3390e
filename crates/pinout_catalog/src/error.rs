//! Error types for catalog construction and lookup.

use pinout_pins::PinError;

/// Errors that can occur when building or querying a [`ResourceCatalog`](crate::ResourceCatalog).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CatalogError {
    /// No resource (or sub-signal) matches the request.
    #[error("resource '{path}' with index {index} not found")]
    ResourceNotFound {
        /// The requested path, `name` or `name:sub_signal`.
        path: String,
        /// The requested resource index.
        index: u32,
    },

    /// A resource with the same name and index is already in the catalog.
    #[error("resource '{name}' with index {index} is already defined")]
    DuplicateResource {
        /// The resource name.
        name: String,
        /// The resource index.
        index: u32,
    },

    /// A pin expression of the resource failed to parse or resolve.
    #[error(transparent)]
    Pin(#[from] PinError),
}
