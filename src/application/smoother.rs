// Trailing moving average over sequences with gaps
use crate::domain::error::CoreError;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

/// Round to two decimal places on the exact decimal value of `value`, ties away from zero.
/// Values outside the decimal range are returned unchanged.
pub fn round2(value: f64) -> f64 {
    Decimal::from_f64_retain(value)
        .map(|d| d.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero))
        .and_then(|d| d.to_f64())
        .unwrap_or(value)
}

/// Mean of the present values in a window, `None` when every slot is absent.
fn window_mean(window: &[Option<f64>]) -> Option<f64> {
    let (sum, count) = window
        .iter()
        .flatten()
        .fold((0.0_f64, 0usize), |(sum, count), v| (sum + v, count + 1));

    if count == 0 {
        None
    } else {
        Some(round2(sum / count as f64))
    }
}

/// Smooth `values` with a trailing window of `window_size` points.
///
/// Output index `i` covers input `[i, i + window_size)`, so the result is `window_size - 1`
/// points shorter than the input. When the window is longer than the input the values are
/// returned unchanged, since no full window exists.
pub fn smooth(values: &[Option<f64>], window_size: usize) -> Result<Vec<Option<f64>>, CoreError> {
    if window_size == 0 {
        return Err(CoreError::InvalidWindow(window_size));
    }
    if window_size > values.len() {
        return Ok(values.to_vec());
    }

    Ok(values.windows(window_size).map(window_mean).collect())
}

/// Number of points `smooth` yields for an input of `len` values.
pub fn smoothed_len(len: usize, window_size: usize) -> usize {
    if window_size == 0 || window_size > len {
        len
    } else {
        len - window_size + 1
    }
}
