//! Generator configuration.
//!
//! Every constant of a generation run lives here: the calendar, the
//! distribution parameters of each stage, the output locations, and the
//! seed. Two runs with equal configs produce identical files.
//!
//! Configs are stored as TOML. `GeneratorConfig::default()` reproduces the
//! reference NIFTY 2024 run.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::calendar::{CalendarError, Interval, SessionWindow};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("serialize config TOML: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("hash config: {0}")]
    Hash(#[from] serde_json::Error),

    #[error("invalid {field}: {reason}")]
    Invalid { field: &'static str, reason: String },

    #[error(transparent)]
    Calendar(#[from] CalendarError),
}

fn invalid(field: &'static str, reason: impl Into<String>) -> ConfigError {
    ConfigError::Invalid {
        field,
        reason: reason.into(),
    }
}

/// Inclusive integer range for volume and open-interest draws.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntRange {
    pub min: u64,
    pub max: u64,
}

impl IntRange {
    pub fn new(min: u64, max: u64) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, value: u64) -> bool {
        value >= self.min && value <= self.max
    }

    pub fn validate(&self, field: &'static str) -> Result<(), ConfigError> {
        if self.min > self.max {
            return Err(invalid(
                field,
                format!("min {} exceeds max {}", self.min, self.max),
            ));
        }
        Ok(())
    }
}

/// Inclusive float range for uniform draws.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FloatRange {
    pub min: f64,
    pub max: f64,
}

impl FloatRange {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn validate(&self, field: &'static str) -> Result<(), ConfigError> {
        if !self.min.is_finite() || !self.max.is_finite() {
            return Err(invalid(field, "bounds must be finite"));
        }
        if self.min > self.max {
            return Err(invalid(
                field,
                format!("min {} exceeds max {}", self.min, self.max),
            ));
        }
        if !(self.max - self.min).is_finite() {
            return Err(invalid(field, "width must be finite"));
        }
        Ok(())
    }
}

/// Mean and standard deviation of a normal draw.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NormalParams {
    pub mean: f64,
    pub std: f64,
}

impl NormalParams {
    pub fn new(mean: f64, std: f64) -> Self {
        Self { mean, std }
    }

    pub fn validate(&self, field: &'static str) -> Result<(), ConfigError> {
        if !self.mean.is_finite() {
            return Err(invalid(field, "mean must be finite"));
        }
        if !self.std.is_finite() || self.std < 0.0 {
            return Err(invalid(
                field,
                format!("std must be finite and non-negative, got {}", self.std),
            ));
        }
        Ok(())
    }
}

/// Normal draw clipped into a band, used for implied volatility.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClippedNormal {
    pub mean: f64,
    pub std: f64,
    pub min: f64,
    pub max: f64,
}

impl ClippedNormal {
    pub fn normal(&self) -> NormalParams {
        NormalParams::new(self.mean, self.std)
    }

    pub fn clip(&self, value: f64) -> f64 {
        value.clamp(self.min, self.max)
    }

    pub fn validate(&self, field: &'static str) -> Result<(), ConfigError> {
        self.normal().validate(field)?;
        FloatRange::new(self.min, self.max).validate(field)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalendarConfig {
    pub start_date: NaiveDate,
    /// Inclusive.
    pub end_date: NaiveDate,
    pub interval: Interval,
    pub session: SessionWindow,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpotParams {
    pub start_price: f64,
    /// Standard deviation of the per-step log return.
    pub return_std: f64,
    /// Upper bound of the fractional high/low wick draw.
    pub wick_max: f64,
    pub volume: IntRange,
}

impl SpotParams {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.start_price.is_finite() || self.start_price <= 0.0 {
            return Err(invalid("spot.start_price", "must be positive"));
        }
        NormalParams::new(0.0, self.return_std).validate("spot.return_std")?;
        validate_wick(self.wick_max, "spot.wick_max")?;
        self.volume.validate("spot.volume")
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FuturesParams {
    /// Fractional premium of futures over spot.
    pub basis: NormalParams,
    pub wick_max: f64,
    pub volume: IntRange,
    pub open_interest: IntRange,
}

impl FuturesParams {
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.basis.validate("futures.basis")?;
        validate_wick(self.wick_max, "futures.wick_max")?;
        self.volume.validate("futures.volume")?;
        self.open_interest.validate("futures.open_interest")
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptionsParams {
    pub strike_step: i64,
    /// Offsets from the at-the-money strike, in emission order.
    pub strike_offsets: Vec<i64>,
    pub iv: ClippedNormal,
    pub ltp_floor: f64,
    /// Multiplier applied to |spot - strike|.
    pub ltp_slope: f64,
    pub ltp_noise: FloatRange,
    pub open_interest: IntRange,
    pub volume: IntRange,
}

impl OptionsParams {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.strike_step <= 0 {
            return Err(invalid(
                "options.strike_step",
                format!("must be positive, got {}", self.strike_step),
            ));
        }
        if self.strike_offsets.is_empty() {
            return Err(invalid("options.strike_offsets", "must not be empty"));
        }
        self.iv.validate("options.iv")?;
        if !self.ltp_floor.is_finite() || self.ltp_floor < 0.0 {
            return Err(invalid("options.ltp_floor", "must be non-negative"));
        }
        if !self.ltp_slope.is_finite() {
            return Err(invalid("options.ltp_slope", "must be finite"));
        }
        self.ltp_noise.validate("options.ltp_noise")?;
        self.open_interest.validate("options.open_interest")?;
        self.volume.validate("options.volume")
    }

    /// Rows produced per timestamp (offsets x option rights).
    pub fn rows_per_timestamp(&self) -> usize {
        self.strike_offsets.len() * 2
    }
}

fn validate_wick(wick_max: f64, field: &'static str) -> Result<(), ConfigError> {
    if !wick_max.is_finite() || !(0.0..1.0).contains(&wick_max) {
        return Err(invalid(field, format!("must be in [0, 1), got {wick_max}")));
    }
    Ok(())
}

/// Output file locations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputPaths {
    pub spot: PathBuf,
    pub futures: PathBuf,
    pub options: PathBuf,
    /// Run manifest; skipped when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub manifest: Option<PathBuf>,
}

impl OutputPaths {
    /// Move every output into `dir`, keeping the file names.
    pub fn relocate(&mut self, dir: &Path) {
        fn moved(dir: &Path, path: &Path) -> PathBuf {
            match path.file_name() {
                Some(name) => dir.join(name),
                None => dir.to_path_buf(),
            }
        }
        self.spot = moved(dir, &self.spot);
        self.futures = moved(dir, &self.futures);
        self.options = moved(dir, &self.options);
        if let Some(manifest) = &self.manifest {
            self.manifest = Some(moved(dir, manifest));
        }
    }
}

/// Complete configuration of a generation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratorConfig {
    pub seed: u64,
    /// Contract expiry shared by the futures and every option row.
    pub expiry: NaiveDate,
    pub calendar: CalendarConfig,
    pub spot: SpotParams,
    pub futures: FuturesParams,
    pub options: OptionsParams,
    pub output: OutputPaths,
}

impl GeneratorConfig {
    /// Load and validate a config from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content)
    }

    /// Parse and validate a config from a TOML string.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.calendar.session.validate()?;
        self.spot.validate()?;
        self.futures.validate()?;
        self.options.validate()
    }

    /// Deterministic BLAKE3 hash of the config.
    ///
    /// Equal configs share a hash, so the manifest can tie output files back
    /// to the exact parameters that produced them.
    pub fn config_hash(&self) -> Result<String, ConfigError> {
        let json = serde_json::to_string(self)?;
        Ok(blake3::hash(json.as_bytes()).to_hex().to_string())
    }
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        let expiry = NaiveDate::from_ymd_opt(2024, 12, 26).unwrap_or_default();
        Self {
            seed: 42,
            expiry,
            calendar: CalendarConfig {
                start_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap_or_default(),
                end_date: NaiveDate::from_ymd_opt(2024, 12, 31).unwrap_or_default(),
                interval: Interval::FIVE_MINUTES,
                session: SessionWindow {
                    open: NaiveTime::from_hms_opt(9, 15, 0).unwrap_or_default(),
                    close: NaiveTime::from_hms_opt(15, 30, 0).unwrap_or_default(),
                },
            },
            spot: SpotParams {
                start_price: 20_000.0,
                return_std: 0.0007,
                wick_max: 0.001,
                volume: IntRange::new(80_000, 149_999),
            },
            futures: FuturesParams {
                basis: NormalParams::new(0.0005, 0.0003),
                wick_max: 0.001,
                volume: IntRange::new(60_000, 119_999),
                open_interest: IntRange::new(900_000, 1_299_999),
            },
            options: OptionsParams {
                strike_step: 50,
                strike_offsets: vec![-100, -50, 0, 50, 100],
                iv: ClippedNormal {
                    mean: 0.18,
                    std: 0.03,
                    min: 0.12,
                    max: 0.30,
                },
                ltp_floor: 5.0,
                ltp_slope: 0.4,
                ltp_noise: FloatRange::new(20.0, 80.0),
                open_interest: IntRange::new(400_000, 1_199_999),
                volume: IntRange::new(5_000, 24_999),
            },
            output: OutputPaths {
                spot: PathBuf::from("data/raw/nifty_spot_5min.csv"),
                futures: PathBuf::from("data/raw/nifty_futures_5min.csv"),
                options: PathBuf::from("data/raw/nifty_options_5min.csv"),
                manifest: Some(PathBuf::from("data/raw/manifest.json")),
            },
        }
    }
}
