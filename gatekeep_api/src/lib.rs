//! Shared gatekeep data models consumed by the review core and agent crates.

pub mod diff;
pub mod review;

pub use diff::*;
pub use review::*;
