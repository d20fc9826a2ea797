//! Spot index series: a geometric random walk with synthetic wicks.
//!
//! Draw order for `n` timestamps: `n` log returns, `n` high wicks, `n` low
//! wicks, `n` volumes.

use chrono::NaiveDateTime;
use tracing::debug;

use crate::config::{FloatRange, NormalParams, SpotParams};
use crate::domain::SpotBar;
use crate::rng::MarketRng;

use super::GenerateError;

/// `start * exp(cumsum(returns))`, one value per return.
pub fn geometric_walk(start: f64, returns: &[f64]) -> Vec<f64> {
    returns
        .iter()
        .scan(0.0_f64, |cumulative, r| {
            *cumulative += r;
            Some(start * cumulative.exp())
        })
        .collect()
}

pub fn generate_spot(
    timestamps: &[NaiveDateTime],
    params: &SpotParams,
    rng: &mut MarketRng,
) -> Result<Vec<SpotBar>, GenerateError> {
    params.validate()?;
    let n = timestamps.len();

    let returns_dist = MarketRng::normal_sampler(NormalParams::new(0.0, params.return_std))?;
    let returns = rng.normals(&returns_dist, n);
    let prices = geometric_walk(params.start_price, &returns);

    let wick = FloatRange::new(0.0, params.wick_max);
    let highs = rng.uniforms(wick, n);
    let lows = rng.uniforms(wick, n);
    let volumes = rng.ints(params.volume, n);

    let bars: Vec<SpotBar> = timestamps
        .iter()
        .enumerate()
        .map(|(i, &datetime)| {
            let price = prices[i];
            SpotBar {
                datetime,
                open: price,
                high: price * (1.0 + highs[i]),
                low: price * (1.0 - lows[i]),
                close: price,
                volume: volumes[i],
            }
        })
        .collect();

    debug!(bars = bars.len(), last_close = ?prices.last(), "spot series generated");
    Ok(bars)
}

/// Close prices that drive the futures and options stages.
pub fn spot_closes(bars: &[SpotBar]) -> Vec<f64> {
    bars.iter().map(|b| b.close).collect()
}
