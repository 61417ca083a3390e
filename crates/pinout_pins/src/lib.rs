//! Pin expressions and connector pinouts.
//!
//! A pin expression such as `"A3 B4 C5 A4"` or `"pmodd:2 pmodd:4"` names the
//! physical package pins behind one signal, either directly or through a
//! connector (`NAME:INDEX`). The [`ConnectorRegistry`] turns connector
//! references into package pins.

#![warn(missing_docs)]

pub mod connector;
pub mod error;
pub mod expr;

pub use connector::{Connector, ConnectorRegistry};
pub use error::PinError;
pub use expr::{PinExpression, PinRef};
