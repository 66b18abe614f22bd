//! Requirements manifest operations
//!
//! This module provides:
//! - Aggregation of per-subdirectory requirements files into the root manifest
//! - Order-preserving reading, pin rewriting, and writing of the root manifest

mod aggregate;
mod requirements;

pub use aggregate::{collect_sub_manifests, write_root_manifest, AggregateOutcome};
pub use requirements::{
    has_unpinned, join_lines, package_keys, pin_lines, read_manifest, split_lines, write_manifest,
    PinOutcome,
};

/// The dependency manifest filename consumed by pip
pub const REQUIREMENTS_FILE: &str = "requirements.txt";
