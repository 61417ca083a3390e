//! The resource catalog of a board.
//!
//! A board exposes named, indexed [`Resource`]s (`clk100`, `user_led` 0..15,
//! `ddram`, ...). Each resource is either a single signal or a bundle of
//! named [`SubSignal`]s, and every signal carries a pin expression plus
//! electrical [`Attribute`]s. Adding a resource to the [`ResourceCatalog`]
//! parses and resolves all of its pins immediately, so a broken board table
//! is rejected before any build step runs.

#![warn(missing_docs)]

pub mod attribute;
pub mod catalog;
pub mod error;
pub mod resource;

pub use attribute::{effective_attributes, Attribute};
pub use catalog::{Lookup, ResolvedResource, ResolvedSignal, ResourceCatalog, ResourceId};
pub use error::CatalogError;
pub use resource::{Resource, ResourceBody, SubSignal};
