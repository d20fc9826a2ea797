//! Option chain around the at-the-money strike.
//!
//! For every timestamp: round spot to the strike grid, draw one implied
//! volatility, then emit a Call and a Put for each configured offset.
//!
//! Draw order per timestamp: one IV sample, then for each (offset, right)
//! pair an LTP noise draw, an open-interest draw, and a volume draw.

use chrono::{NaiveDate, NaiveDateTime};
use tracing::debug;

use crate::config::OptionsParams;
use crate::domain::{OptionQuote, OptionType};
use crate::rng::MarketRng;

use super::{ensure_aligned, round_to, GenerateError};

/// Nearest multiple of `step` to `price`, ties to even.
///
/// `None` when the price is not finite or the strike does not fit in `i64`.
pub fn atm_strike(price: f64, step: i64) -> Option<i64> {
    let units = (price / step as f64).round_ties_even();
    if !units.is_finite() || units.abs() >= i64::MAX as f64 {
        return None;
    }
    (units as i64).checked_mul(step)
}

/// Intrinsic-distance price plus noise, floored. Identical for calls and puts.
fn last_traded_price(spot: f64, strike: i64, noise: f64, params: &OptionsParams) -> f64 {
    let raw = (spot - strike as f64).abs() * params.ltp_slope + noise;
    round_to(raw.max(params.ltp_floor), 2).max(params.ltp_floor)
}

pub fn generate_options(
    timestamps: &[NaiveDateTime],
    spot: &[f64],
    params: &OptionsParams,
    expiry: NaiveDate,
    rng: &mut MarketRng,
) -> Result<Vec<OptionQuote>, GenerateError> {
    params.validate()?;
    ensure_aligned("options", timestamps.len(), spot.len())?;

    let iv_dist = MarketRng::normal_sampler(params.iv.normal())?;
    let mut rows = Vec::with_capacity(timestamps.len() * params.rows_per_timestamp());

    for (&datetime, &price) in timestamps.iter().zip(spot) {
        let overflow = || GenerateError::StrikeOverflow {
            price,
            step: params.strike_step,
        };
        let atm = atm_strike(price, params.strike_step).ok_or_else(overflow)?;
        let iv = params
            .iv
            .clip(round_to(params.iv.clip(rng.normal(&iv_dist)), 3));

        for &offset in &params.strike_offsets {
            let strike = atm.checked_add(offset).ok_or_else(overflow)?;
            for option_type in OptionType::ALL {
                let noise = rng.uniform(params.ltp_noise);
                let ltp = last_traded_price(price, strike, noise, params);
                let open_interest = rng.int(params.open_interest);
                let volume = rng.int(params.volume);

                rows.push(OptionQuote {
                    datetime,
                    strike,
                    option_type,
                    ltp,
                    iv,
                    open_interest,
                    volume,
                    expiry,
                });
            }
        }
    }

    debug!(
        rows = rows.len(),
        per_timestamp = params.rows_per_timestamp(),
        "option chain generated"
    );
    Ok(rows)
}
