//! Method-call syntax for the gatherers.

use crate::error::Result;
use crate::fold::{FoldRunning, TryFoldRunning, fold_running, try_fold_running};
use crate::sliding::{WindowSliding, window_sliding};
use crate::window::{WindowFixed, window_fixed};

/// Extension trait adding the gatherers as iterator adapters.
///
/// ```
/// use gatherers::GatherExt;
///
/// let averages: Vec<f64> = [10.0, 12.0, 11.0, 13.0]
///     .into_iter()
///     .window_sliding(3)
///     .unwrap()
///     .map(|w| w.iter().sum::<f64>() / w.len() as f64)
///     .collect();
/// assert_eq!(averages, vec![11.0, 12.0]);
/// ```
pub trait GatherExt: Iterator + Sized {
    /// See [`window_fixed`](crate::window_fixed).
    fn window_fixed(self, size: usize) -> Result<WindowFixed<Self>> {
        window_fixed(self, size)
    }

    /// See [`window_sliding`](crate::window_sliding).
    fn window_sliding(self, size: usize) -> Result<WindowSliding<Self>>
    where
        Self::Item: Clone,
    {
        window_sliding(self, size)
    }

    /// See [`fold_running`](crate::fold_running).
    fn fold_running<A, F>(self, seed: A, combine: F) -> FoldRunning<Self, A, F>
    where
        A: Clone,
        F: FnMut(A, Self::Item) -> A,
    {
        fold_running(self, seed, combine)
    }

    /// See [`try_fold_running`](crate::try_fold_running).
    fn try_fold_running<A, E, F>(self, seed: A, combine: F) -> TryFoldRunning<Self, A, F>
    where
        A: Clone,
        F: FnMut(A, Self::Item) -> std::result::Result<A, E>,
    {
        try_fold_running(self, seed, combine)
    }
}

impl<I: Iterator> GatherExt for I {}
