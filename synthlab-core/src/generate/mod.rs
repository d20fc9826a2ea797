//! Price generators: spot walk, futures basis, and the option chain.
//!
//! Each stage consumes the previous stage's closes and draws from the shared
//! `MarketRng`. Stages must be called in the order spot, futures, options to
//! reproduce a run.

pub mod futures;
pub mod options;
pub mod spot;

pub use futures::generate_futures;
pub use options::{atm_strike, generate_options};
pub use spot::{generate_spot, geometric_walk, spot_closes};

use thiserror::Error;

use crate::config::ConfigError;

#[derive(Debug, Error)]
pub enum GenerateError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("{stage}: got {prices} spot prices for {timestamps} timestamps")]
    LengthMismatch {
        stage: &'static str,
        timestamps: usize,
        prices: usize,
    },

    #[error("spot price {price} has no strike on a {step}-point grid within i64 range")]
    StrikeOverflow { price: f64, step: i64 },
}

pub(crate) fn ensure_aligned(
    stage: &'static str,
    timestamps: usize,
    prices: usize,
) -> Result<(), GenerateError> {
    if timestamps != prices {
        return Err(GenerateError::LengthMismatch {
            stage,
            timestamps,
            prices,
        });
    }
    Ok(())
}

/// Round half away from zero to `decimals` places.
pub(crate) fn round_to(value: f64, decimals: i32) -> f64 {
    let scale = 10f64.powi(decimals);
    (value * scale).round() / scale
}
