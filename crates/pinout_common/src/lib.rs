//! Shared foundational types used across the pinout board description crates.
//!
//! This crate provides frequency values with period conversion and content
//! hashing for build fingerprints.

#![warn(missing_docs)]

pub mod frequency;
pub mod hash;

pub use frequency::{Frequency, ParseFrequencyError};
pub use hash::{ContentHash, ContentHasher};
