//! Tabular export: one CSV file per generated table.
//!
//! Layouts:
//! - **spot**: datetime, open, high, low, close, volume
//! - **futures**: datetime, open, high, low, close, volume, open_interest, expiry
//! - **options**: datetime, strike, option_type, ltp, iv, open_interest, volume, expiry
//!
//! Datetimes are written as `YYYY-MM-DD HH:MM:SS`, prices in shortest
//! round-trip form, LTP with 2 decimals and IV with 3. A table with no rows
//! still gets its header line.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{NaiveDate, NaiveDateTime};
use synthlab_core::{FuturesBar, OptionQuote, SpotBar};

pub const SPOT_HEADER: [&str; 6] = ["datetime", "open", "high", "low", "close", "volume"];

pub const FUTURES_HEADER: [&str; 8] = [
    "datetime",
    "open",
    "high",
    "low",
    "close",
    "volume",
    "open_interest",
    "expiry",
];

pub const OPTIONS_HEADER: [&str; 8] = [
    "datetime",
    "strike",
    "option_type",
    "ltp",
    "iv",
    "open_interest",
    "volume",
    "expiry",
];

fn fmt_datetime(dt: NaiveDateTime) -> String {
    dt.format("%Y-%m-%d %H:%M:%S").to_string()
}

fn fmt_date(d: NaiveDate) -> String {
    d.format("%Y-%m-%d").to_string()
}

pub fn write_spot_csv<W: Write>(writer: W, bars: &[SpotBar]) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(SPOT_HEADER)?;
    for b in bars {
        wtr.write_record([
            fmt_datetime(b.datetime),
            b.open.to_string(),
            b.high.to_string(),
            b.low.to_string(),
            b.close.to_string(),
            b.volume.to_string(),
        ])?;
    }
    wtr.flush().context("failed to flush spot CSV")?;
    Ok(())
}

pub fn write_futures_csv<W: Write>(writer: W, bars: &[FuturesBar]) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(FUTURES_HEADER)?;
    for b in bars {
        wtr.write_record([
            fmt_datetime(b.datetime),
            b.open.to_string(),
            b.high.to_string(),
            b.low.to_string(),
            b.close.to_string(),
            b.volume.to_string(),
            b.open_interest.to_string(),
            fmt_date(b.expiry),
        ])?;
    }
    wtr.flush().context("failed to flush futures CSV")?;
    Ok(())
}

pub fn write_options_csv<W: Write>(writer: W, rows: &[OptionQuote]) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(OPTIONS_HEADER)?;
    for q in rows {
        wtr.write_record([
            fmt_datetime(q.datetime),
            q.strike.to_string(),
            q.option_type.label().to_string(),
            format!("{:.2}", q.ltp),
            format!("{:.3}", q.iv),
            q.open_interest.to_string(),
            q.volume.to_string(),
            fmt_date(q.expiry),
        ])?;
    }
    wtr.flush().context("failed to flush options CSV")?;
    Ok(())
}

/// Create `path` (and any missing parent directories) and hand a buffered
/// writer to `write`.
pub fn write_to_path<F>(path: &Path, write: F) -> Result<()>
where
    F: FnOnce(BufWriter<File>) -> Result<()>,
{
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create output dir: {}", parent.display()))?;
    }
    let file = File::create(path)
        .with_context(|| format!("failed to create output file: {}", path.display()))?;
    write(BufWriter::new(file)).with_context(|| format!("failed to write {}", path.display()))
}

pub fn export_spot(path: &Path, bars: &[SpotBar]) -> Result<()> {
    write_to_path(path, |w| write_spot_csv(w, bars))
}

pub fn export_futures(path: &Path, bars: &[FuturesBar]) -> Result<()> {
    write_to_path(path, |w| write_futures_csv(w, bars))
}

pub fn export_options(path: &Path, rows: &[OptionQuote]) -> Result<()> {
    write_to_path(path, |w| write_options_csv(w, rows))
}
