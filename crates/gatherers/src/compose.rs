//! Ready-made compositions of the gatherers.

use tracing::trace;

use crate::GatherError;
use crate::error::Result;
use crate::sliding::window_sliding;
use crate::window::window_fixed;

/// Simple moving average over `period` consecutive values.
///
/// Emits one mean per full window, so `n` values produce
/// `n - period + 1` averages (none if `n < period`).
///
/// ```
/// use gatherers::moving_average;
///
/// let prices = [10.0, 12.0, 11.0, 13.0, 15.0, 14.0, 16.0];
/// let averages: Vec<f64> = moving_average(prices, 3).unwrap().collect();
/// assert_eq!(averages, vec![11.0, 12.0, 13.0, 14.0, 15.0]);
/// ```
pub fn moving_average<I>(values: I, period: usize) -> Result<impl Iterator<Item = f64>>
where
    I: IntoIterator<Item = f64>,
{
    let windows = window_sliding(values, period).map_err(|_| GatherError::InvalidArgument {
        parameter: "period",
        value: period,
    })?;
    Ok(windows.map(|window| window.iter().sum::<f64>() / window.len() as f64))
}

/// Splits `sequence` into batches of `batch_size` and hands each batch to
/// `handler` along with its zero-based batch number.
///
/// Returns the number of batches processed. The last batch may be short.
///
/// # Errors
///
/// - [`GatherError::InvalidArgument`] if `batch_size` is 0.
/// - [`GatherError::TransformationFailure`] with the batch number of the
///   first batch whose handler failed. Later batches are not read.
pub fn for_each_batch<I, E, F>(
    sequence: I,
    batch_size: usize,
    mut handler: F,
) -> Result<usize, GatherError<E>>
where
    I: IntoIterator,
    F: FnMut(usize, Vec<I::Item>) -> std::result::Result<(), E>,
{
    let batches = window_fixed(sequence, batch_size).map_err(|_| GatherError::InvalidArgument {
        parameter: "batch_size",
        value: batch_size,
    })?;

    let mut processed = 0;
    for (index, batch) in batches.enumerate() {
        trace!(batch = index, len = batch.len(), "processing batch");
        handler(index, batch)
            .map_err(|source| GatherError::TransformationFailure { index, source })?;
        processed += 1;
    }
    Ok(processed)
}
