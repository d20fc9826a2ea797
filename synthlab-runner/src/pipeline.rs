//! Generation pipeline.
//!
//! Stages run strictly in order against one seeded draw source:
//! 1. Time index from the calendar config
//! 2. Spot walk
//! 3. Futures from spot closes
//! 4. Option chain from spot closes
//!
//! then the three tables (and optionally the manifest) are written.
//!
//! An empty time index is not an error: the run writes header-only files
//! and logs a warning.

use std::path::PathBuf;

use anyhow::Result;
use chrono::NaiveDateTime;
use synthlab_core::{
    build_time_index, generate_futures, generate_options, generate_spot, spot_closes, FuturesBar,
    GenerateError, GeneratorConfig, MarketRng, OptionQuote, OutputPaths, SpotBar,
};
use tracing::{debug, info, warn};

use crate::export::{export_futures, export_options, export_spot};
use crate::manifest::{digest_file, write_manifest, FileDigest, RunManifest, TableKind};

/// All tables of a generation run, aligned on `timestamps`.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedMarket {
    pub timestamps: Vec<NaiveDateTime>,
    pub spot: Vec<SpotBar>,
    pub futures: Vec<FuturesBar>,
    pub options: Vec<OptionQuote>,
}

/// Outcome of a run that wrote its files.
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub timestamp_count: usize,
    pub spot_rows: usize,
    pub futures_rows: usize,
    pub options_rows: usize,
    pub outputs: OutputPaths,
    pub manifest: Option<RunManifest>,
}

/// Generate every table in memory without touching the filesystem.
pub fn generate_market(config: &GeneratorConfig) -> Result<GeneratedMarket, GenerateError> {
    config.validate()?;
    let cal = &config.calendar;

    let timestamps = build_time_index(cal.start_date, cal.end_date, cal.interval, cal.session);
    if timestamps.is_empty() {
        warn!(
            start = %cal.start_date,
            end = %cal.end_date,
            "time index is empty; tables will contain headers only"
        );
    }
    info!(
        timestamps = timestamps.len(),
        interval = %cal.interval,
        "built time index"
    );

    let mut rng = MarketRng::new(config.seed);

    let spot = generate_spot(&timestamps, &config.spot, &mut rng)?;
    let closes = spot_closes(&spot);
    debug!(rows = spot.len(), "generated spot");

    let futures = generate_futures(
        &timestamps,
        &closes,
        &config.futures,
        config.expiry,
        &mut rng,
    )?;
    debug!(rows = futures.len(), "generated futures");

    let options = generate_options(
        &timestamps,
        &closes,
        &config.options,
        config.expiry,
        &mut rng,
    )?;
    debug!(rows = options.len(), "generated option chain");

    Ok(GeneratedMarket {
        timestamps,
        spot,
        futures,
        options,
    })
}

/// Generate all tables and write them to the configured paths.
pub fn run_generation(config: &GeneratorConfig) -> Result<RunSummary> {
    let market = generate_market(config)?;
    let out = &config.output;

    export_spot(&out.spot, &market.spot)?;
    info!(rows = market.spot.len(), path = %out.spot.display(), "wrote spot table");

    export_futures(&out.futures, &market.futures)?;
    info!(rows = market.futures.len(), path = %out.futures.display(), "wrote futures table");

    export_options(&out.options, &market.options)?;
    info!(rows = market.options.len(), path = %out.options.display(), "wrote options table");

    let manifest = match &out.manifest {
        Some(path) => {
            let manifest = build_manifest(config, &market)?;
            write_manifest(path, &manifest)?;
            info!(path = %path.display(), "wrote run manifest");
            Some(manifest)
        }
        None => None,
    };

    Ok(RunSummary {
        timestamp_count: market.timestamps.len(),
        spot_rows: market.spot.len(),
        futures_rows: market.futures.len(),
        options_rows: market.options.len(),
        outputs: out.clone(),
        manifest,
    })
}

fn build_manifest(config: &GeneratorConfig, market: &GeneratedMarket) -> Result<RunManifest> {
    let out = &config.output;
    let tables: [(TableKind, &PathBuf, usize); 3] = [
        (TableKind::Spot, &out.spot, market.spot.len()),
        (TableKind::Futures, &out.futures, market.futures.len()),
        (TableKind::Options, &out.options, market.options.len()),
    ];

    let mut files = Vec::with_capacity(tables.len());
    for (kind, path, rows) in tables {
        files.push(FileDigest {
            kind,
            path: path.clone(),
            rows,
            blake3: digest_file(path)?,
        });
    }

    Ok(RunManifest {
        seed: config.seed,
        config_hash: config.config_hash()?,
        timestamp_count: market.timestamps.len(),
        files,
    })
}
