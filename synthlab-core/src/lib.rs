//! SynthLab Core: synthetic intraday index, futures, and option chain data.
//!
//! This crate contains the generation logic:
//! - Domain records (spot bars, futures bars, option quotes)
//! - Generator configuration (TOML, validation, content hash)
//! - Seeded draw source with a fixed draw order
//! - Trading time index over a daily session window
//! - Spot walk, futures basis, and option chain generators

pub mod calendar;
pub mod config;
pub mod domain;
pub mod generate;
pub mod rng;

pub use calendar::{build_time_index, CalendarError, Interval, SessionWindow};
pub use config::{
    CalendarConfig, ClippedNormal, ConfigError, FloatRange, FuturesParams, GeneratorConfig,
    IntRange, NormalParams, OptionsParams, OutputPaths, SpotParams,
};
pub use domain::{FuturesBar, OptionQuote, OptionType, SpotBar};
pub use generate::{
    atm_strike, generate_futures, generate_options, generate_spot, spot_closes, GenerateError,
};
pub use rng::MarketRng;
