//! Overlapping windows that advance one element at a time.

use std::collections::VecDeque;
use std::iter::FusedIterator;

use crate::error::{Result, require_positive};

/// Creates an iterator of sliding windows of `size` elements over `sequence`.
///
/// The first window is emitted once `size` elements have been consumed. Each
/// following element evicts the oldest one, so window `i` starts at input
/// index `i`. An input shorter than `size` yields no windows at all.
///
/// ```
/// use gatherers::window_sliding;
///
/// let windows: Vec<Vec<i32>> = window_sliding(1..=5, 3).unwrap().collect();
/// assert_eq!(windows, vec![vec![1, 2, 3], vec![2, 3, 4], vec![3, 4, 5]]);
/// ```
///
/// # Errors
///
/// Returns [`GatherError::InvalidArgument`](crate::GatherError::InvalidArgument)
/// if `size` is 0.
pub fn window_sliding<I>(sequence: I, size: usize) -> Result<WindowSliding<I::IntoIter>>
where
    I: IntoIterator,
    I::Item: Clone,
{
    let size = require_positive("size", size)?;
    Ok(WindowSliding {
        inner: sequence.into_iter(),
        size,
        buffer: VecDeque::with_capacity(size),
        done: false,
    })
}

/// Iterator returned by [`window_sliding`].
#[derive(Debug, Clone)]
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct WindowSliding<I: Iterator> {
    inner: I,
    size: usize,
    buffer: VecDeque<I::Item>,
    done: bool,
}

impl<I: Iterator> WindowSliding<I> {
    /// Returns the configured window size.
    pub fn size(&self) -> usize {
        self.size
    }
}

impl<I> Iterator for WindowSliding<I>
where
    I: Iterator,
    I::Item: Clone,
{
    type Item = Vec<I::Item>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        // Fill up to a full window, or slide by one once full.
        if self.buffer.len() == self.size {
            self.buffer.pop_front();
        }
        while self.buffer.len() < self.size {
            let Some(item) = self.inner.next() else {
                self.done = true;
                self.buffer.clear();
                return None;
            };
            self.buffer.push_back(item);
        }

        Some(self.buffer.iter().cloned().collect())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.done {
            return (0, Some(0));
        }
        // Elements still needed before the next window can be emitted.
        let missing = if self.buffer.len() == self.size {
            1
        } else {
            self.size - self.buffer.len()
        };
        let (lower, upper) = self.inner.size_hint();
        // `missing >= 1`, so `n + 1 - missing` never exceeds `n`.
        let windows = |n: usize| n.saturating_sub(missing - 1);
        (windows(lower), upper.map(windows))
    }
}

impl<I> FusedIterator for WindowSliding<I>
where
    I: Iterator,
    I::Item: Clone,
{
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{GatherError, GatherExt};

    #[test]
    fn slides_by_one() {
        let windows: Vec<_> = window_sliding(1..=7, 3).unwrap().collect();
        assert_eq!(
            windows,
            vec![
                vec![1, 2, 3],
                vec![2, 3, 4],
                vec![3, 4, 5],
                vec![4, 5, 6],
                vec![5, 6, 7],
            ]
        );
    }

    #[test]
    fn short_input_yields_nothing() {
        let mut windows = window_sliding(vec!["a", "b"], 3).unwrap();
        assert_eq!(windows.next(), None);
        assert_eq!(windows.next(), None);
    }

    #[test]
    fn exact_length_yields_single_window() {
        let windows: Vec<_> = window_sliding(vec!['x', 'y', 'z'], 3).unwrap().collect();
        assert_eq!(windows, vec![vec!['x', 'y', 'z']]);
    }

    #[test]
    fn size_one_echoes_input() {
        let windows: Vec<_> = window_sliding(0..4, 1).unwrap().collect();
        assert_eq!(windows, vec![vec![0], vec![1], vec![2], vec![3]]);
    }

    #[test]
    fn zero_size_is_rejected() {
        assert!(matches!(
            window_sliding(0..4, 0),
            Err(GatherError::InvalidArgument {
                parameter: "size",
                value: 0
            })
        ));
    }

    #[test]
    fn size_hint_tracks_progress() {
        let mut windows = window_sliding(0..7, 3).unwrap();
        assert_eq!(windows.size_hint(), (5, Some(5)));
        windows.next();
        assert_eq!(windows.size_hint(), (4, Some(4)));
        assert_eq!(windows.by_ref().count(), 4);
        assert_eq!(windows.size_hint(), (0, Some(0)));
    }

    #[test]
    fn unbounded_input_does_not_overflow_size_hint() {
        let mut windows = (1u32..).window_sliding(3).unwrap();
        assert_eq!(windows.size_hint(), (usize::MAX - 2, None));

        let first: Vec<_> = windows.by_ref().take(2).collect();
        assert_eq!(first, vec![vec![1, 2, 3], vec![2, 3, 4]]);
        assert_eq!(windows.size_hint(), (usize::MAX, None));

        let repeated: Vec<_> = std::iter::repeat('z')
            .window_sliding(2)
            .unwrap()
            .take(3)
            .collect();
        assert_eq!(repeated, vec![vec!['z', 'z']; 3]);
    }

    #[test]
    fn short_input_size_hint_is_zero() {
        let windows = window_sliding(0..2, 3).unwrap();
        assert_eq!(windows.size_hint(), (0, Some(0)));
    }
}
