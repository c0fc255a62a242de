//! Fixed-size, non-overlapping windows.
//!
//! [`window_fixed`] partitions an input into consecutive groups of `size`
//! elements. A group is emitted as soon as it fills; when the input runs out
//! the remaining non-empty partial group is emitted last.
//!
//! ```
//! use gatherers::window_fixed;
//!
//! let windows: Vec<Vec<i32>> = window_fixed(1..=10, 3).unwrap().collect();
//! assert_eq!(windows, vec![vec![1, 2, 3], vec![4, 5, 6], vec![7, 8, 9], vec![10]]);
//! ```

use std::iter::FusedIterator;

use crate::error::{Result, require_positive};

/// Creates an iterator of fixed-size windows over `sequence`.
///
/// # Errors
///
/// Returns [`GatherError::InvalidArgument`](crate::GatherError::InvalidArgument)
/// if `size` is 0. No element is consumed in that case.
pub fn window_fixed<I>(sequence: I, size: usize) -> Result<WindowFixed<I::IntoIter>>
where
    I: IntoIterator,
{
    let size = require_positive("size", size)?;
    Ok(WindowFixed {
        inner: sequence.into_iter(),
        size,
        done: false,
    })
}

/// Iterator returned by [`window_fixed`].
#[derive(Debug, Clone)]
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct WindowFixed<I> {
    inner: I,
    size: usize,
    done: bool,
}

impl<I> WindowFixed<I> {
    /// Returns the configured window size.
    pub fn size(&self) -> usize {
        self.size
    }
}

impl<I: Iterator> Iterator for WindowFixed<I> {
    type Item = Vec<I::Item>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let mut window = Vec::with_capacity(self.size);
        while window.len() < self.size {
            match self.inner.next() {
                Some(item) => window.push(item),
                None => {
                    self.done = true;
                    break;
                }
            }
        }

        if window.is_empty() { None } else { Some(window) }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.done {
            return (0, Some(0));
        }
        let (lower, upper) = self.inner.size_hint();
        (
            lower.div_ceil(self.size),
            upper.map(|u| u.div_ceil(self.size)),
        )
    }
}

impl<I: Iterator> FusedIterator for WindowFixed<I> {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::GatherError;

    #[test]
    fn partitions_with_partial_tail() {
        let windows: Vec<_> = window_fixed(1..=10, 3).unwrap().collect();
        assert_eq!(
            windows,
            vec![vec![1, 2, 3], vec![4, 5, 6], vec![7, 8, 9], vec![10]]
        );
    }

    #[test]
    fn exact_multiple_has_no_partial_window() {
        let windows: Vec<_> = window_fixed(1..=6, 2).unwrap().collect();
        assert_eq!(windows, vec![vec![1, 2], vec![3, 4], vec![5, 6]]);
    }

    #[test]
    fn empty_input_yields_nothing() {
        let mut windows = window_fixed(Vec::<u8>::new(), 4).unwrap();
        assert_eq!(windows.next(), None);
        assert_eq!(windows.next(), None);
    }

    #[test]
    fn zero_size_is_rejected() {
        let result = window_fixed(1..=3, 0);
        assert!(matches!(
            result,
            Err(GatherError::InvalidArgument {
                parameter: "size",
                value: 0
            })
        ));
    }

    #[test]
    fn zero_size_consumes_nothing() {
        let mut source = vec![1, 2, 3].into_iter();
        assert!(window_fixed(&mut source, 0).is_err());
        assert_eq!(source.len(), 3);
    }

    #[test]
    fn size_hint_rounds_up() {
        let windows = window_fixed(0..10, 4).unwrap();
        assert_eq!(windows.size_hint(), (3, Some(3)));
        assert_eq!(windows.size(), 4);
    }

    #[test]
    fn is_lazy() {
        let mut pulled = 0;
        let source = (0..100).inspect(|_| pulled += 1);
        let first = window_fixed(source, 5).unwrap().next();
        assert_eq!(first, Some(vec![0, 1, 2, 3, 4]));
        assert_eq!(pulled, 5);
    }
}
