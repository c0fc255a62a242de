//! # gatherers: windowing, running folds, and bounded concurrent mapping
//!
//! Four independent operations over ordered, finite sequences:
//!
//! - **[`window_fixed`]**: non-overlapping windows of a fixed size; the last
//!   window may be short.
//! - **[`window_sliding`]**: overlapping windows that advance one element at
//!   a time; never emits a partial window.
//! - **[`fold_running`]** / **[`try_fold_running`]**: a scan that emits the
//!   accumulator after every element.
//! - **[`map_concurrent`]**: applies a transformation on a bounded pool of
//!   worker threads and returns the results in input order, failing fast on
//!   the first error.
//!
//! The windowing and folding operations are lazy iterators; they are also
//! available as adapters through [`GatherExt`]. [`map_concurrent`] is eager
//! and blocks the caller.
//!
//! # Example
//!
//! ```
//! use gatherers::{GatherExt, map_concurrent};
//!
//! let windows: Vec<Vec<i32>> = (1..=7).window_sliding(3).unwrap().collect();
//! assert_eq!(windows.len(), 5);
//!
//! let sums = map_concurrent(windows, 2, |w| Ok::<_, ()>(w.iter().sum::<i32>())).unwrap();
//! assert_eq!(sums, vec![6, 9, 12, 15, 18]);
//! ```
//!
//! # Errors
//!
//! Every size or concurrency bound must be at least 1; a 0 is rejected with
//! [`GatherError::InvalidArgument`] before any element is read. Failures of
//! caller-supplied functions surface as [`GatherError::TransformationFailure`]
//! with the input position of the failing element. Nothing is retried,
//! swallowed, or logged as an error by this crate.

mod compose;
mod concurrent;
mod error;
mod ext;
mod fold;
mod sliding;
mod window;

pub use compose::{for_each_batch, moving_average};
pub use concurrent::{MapConcurrentOptions, map_concurrent, map_concurrent_with};
pub use error::{GatherError, Result};
pub use ext::GatherExt;
pub use fold::{FoldRunning, TryFoldRunning, fold_running, try_fold_running};
pub use sliding::{WindowSliding, window_sliding};
pub use window::{WindowFixed, window_fixed};
