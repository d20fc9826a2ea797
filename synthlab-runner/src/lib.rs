//! SynthLab Runner: generation pipeline, CSV export, run manifests.
//!
//! This crate builds on `synthlab-core` to provide:
//! - The ordered spot → futures → options pipeline over one seeded draw source
//! - CSV writers for the three output tables
//! - A JSON manifest with the seed, config hash, and per-file BLAKE3 digests

pub mod export;
pub mod manifest;
pub mod pipeline;

pub use export::{
    export_futures, export_options, export_spot, write_futures_csv, write_options_csv,
    write_spot_csv,
};
pub use manifest::{read_manifest, FileDigest, RunManifest, TableKind};
pub use pipeline::{generate_market, run_generation, GeneratedMarket, RunSummary};
