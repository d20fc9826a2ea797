//! Index futures series: spot scaled by a sampled basis.
//!
//! Draw order for `n` timestamps: `n` basis samples, `n` high wicks, `n` low
//! wicks, `n` volumes, `n` open-interest values.

use chrono::{NaiveDate, NaiveDateTime};
use tracing::debug;

use crate::config::{FloatRange, FuturesParams};
use crate::domain::FuturesBar;
use crate::rng::MarketRng;

use super::{ensure_aligned, GenerateError};

pub fn generate_futures(
    timestamps: &[NaiveDateTime],
    spot: &[f64],
    params: &FuturesParams,
    expiry: NaiveDate,
    rng: &mut MarketRng,
) -> Result<Vec<FuturesBar>, GenerateError> {
    params.validate()?;
    ensure_aligned("futures", timestamps.len(), spot.len())?;
    let n = timestamps.len();

    let basis_dist = MarketRng::normal_sampler(params.basis)?;
    let basis = rng.normals(&basis_dist, n);

    let wick = FloatRange::new(0.0, params.wick_max);
    let highs = rng.uniforms(wick, n);
    let lows = rng.uniforms(wick, n);
    let volumes = rng.ints(params.volume, n);
    let open_interest = rng.ints(params.open_interest, n);

    let bars: Vec<FuturesBar> = timestamps
        .iter()
        .enumerate()
        .map(|(i, &datetime)| {
            let price = spot[i] * (1.0 + basis[i]);
            FuturesBar {
                datetime,
                open: price,
                high: price * (1.0 + highs[i]),
                low: price * (1.0 - lows[i]),
                close: price,
                volume: volumes[i],
                open_interest: open_interest[i],
                expiry,
            }
        })
        .collect();

    debug!(bars = bars.len(), %expiry, "futures series generated");
    Ok(bars)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{GeneratorConfig, NormalParams};

    fn inputs(n: usize) -> (Vec<NaiveDateTime>, Vec<f64>) {
        let base = NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .and_hms_opt(9, 15, 0)
            .unwrap();
        let ts = (0..n)
            .map(|i| base + chrono::Duration::minutes(5 * i as i64))
            .collect();
        let spot = (0..n).map(|i| 20_000.0 + i as f64).collect();
        (ts, spot)
    }

    fn expiry() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 12, 26).unwrap()
    }

    #[test]
    fn bars_are_sane_and_in_range() {
        let params = GeneratorConfig::default().futures;
        let (ts, spot) = inputs(300);
        let bars = generate_futures(&ts, &spot, &params, expiry(), &mut MarketRng::new(3)).unwrap();

        assert_eq!(bars.len(), 300);
        for bar in &bars {
            assert!(bar.is_sane(), "{bar:?}");
            assert!(params.open_interest.contains(bar.open_interest));
            assert!(params.volume.contains(bar.volume));
            assert_eq!(bar.expiry, expiry());
        }
    }

    #[test]
    fn constant_basis_scales_spot() {
        let mut params = GeneratorConfig::default().futures;
        params.basis = NormalParams::new(0.01, 0.0);
        let (ts, spot) = inputs(10);
        let bars = generate_futures(&ts, &spot, &params, expiry(), &mut MarketRng::new(3)).unwrap();

        for (bar, s) in bars.iter().zip(&spot) {
            assert!((bar.close - s * 1.01).abs() < 1e-9);
        }
    }

    #[test]
    fn length_mismatch_rejected() {
        let params = GeneratorConfig::default().futures;
        let (ts, mut spot) = inputs(10);
        spot.pop();
        let err = generate_futures(&ts, &spot, &params, expiry(), &mut MarketRng::new(3))
            .unwrap_err();
        assert!(matches!(err, GenerateError::LengthMismatch { .. }));
    }
}
