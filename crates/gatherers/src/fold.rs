//! Running folds (scans).
//!
//! Unlike [`Iterator::fold`], which returns only the final accumulator, the
//! iterators here emit the accumulator after every element: the i-th output
//! is `combine(...combine(seed, x0)..., xi)`.

use std::iter::FusedIterator;

use crate::GatherError;

/// Creates a running fold over `sequence`, starting from `seed`.
///
/// ```
/// use gatherers::fold_running;
///
/// let sums: Vec<i32> = fold_running(1..=5, 0, |acc, x| acc + x).collect();
/// assert_eq!(sums, vec![1, 3, 6, 10, 15]);
/// ```
pub fn fold_running<I, A, F>(sequence: I, seed: A, combine: F) -> FoldRunning<I::IntoIter, A, F>
where
    I: IntoIterator,
    A: Clone,
    F: FnMut(A, I::Item) -> A,
{
    FoldRunning {
        inner: sequence.into_iter(),
        state: Some(seed),
        combine,
    }
}

/// Creates a running fold whose combining function can fail.
///
/// Yields `Ok(acc)` per element until `combine` fails; the failure is yielded
/// once as [`GatherError::TransformationFailure`] carrying the element's
/// input position, and the iterator ends there.
///
/// ```
/// use gatherers::{GatherError, try_fold_running};
///
/// let mut sums = try_fold_running([1u8, 200, 100], 0u8, |acc, x| acc.checked_add(x).ok_or("overflow"));
/// assert_eq!(sums.next().unwrap().unwrap(), 1);
/// assert_eq!(sums.next().unwrap().unwrap(), 201);
/// assert!(matches!(sums.next(), Some(Err(GatherError::TransformationFailure { index: 2, .. }))));
/// assert!(sums.next().is_none());
/// ```
pub fn try_fold_running<I, A, E, F>(
    sequence: I,
    seed: A,
    combine: F,
) -> TryFoldRunning<I::IntoIter, A, F>
where
    I: IntoIterator,
    A: Clone,
    F: FnMut(A, I::Item) -> Result<A, E>,
{
    TryFoldRunning {
        inner: sequence.into_iter(),
        state: Some(seed),
        combine,
        index: 0,
    }
}

/// Iterator returned by [`fold_running`].
#[derive(Clone)]
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct FoldRunning<I, A, F> {
    inner: I,
    state: Option<A>,
    combine: F,
}

impl<I, A, F> Iterator for FoldRunning<I, A, F>
where
    I: Iterator,
    A: Clone,
    F: FnMut(A, I::Item) -> A,
{
    type Item = A;

    fn next(&mut self) -> Option<A> {
        let acc = self.state.take()?;
        let item = self.inner.next()?;
        let next = (self.combine)(acc, item);
        self.state = Some(next.clone());
        Some(next)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.state.is_none() {
            return (0, Some(0));
        }
        self.inner.size_hint()
    }
}

impl<I, A, F> FusedIterator for FoldRunning<I, A, F>
where
    I: Iterator,
    A: Clone,
    F: FnMut(A, I::Item) -> A,
{
}

impl<I: std::fmt::Debug, A: std::fmt::Debug, F> std::fmt::Debug for FoldRunning<I, A, F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FoldRunning")
            .field("inner", &self.inner)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

/// Iterator returned by [`try_fold_running`].
#[derive(Clone)]
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct TryFoldRunning<I, A, F> {
    inner: I,
    /// `None` once the input is exhausted or `combine` has failed.
    state: Option<A>,
    combine: F,
    index: usize,
}

impl<I, A, E, F> Iterator for TryFoldRunning<I, A, F>
where
    I: Iterator,
    A: Clone,
    F: FnMut(A, I::Item) -> Result<A, E>,
{
    type Item = Result<A, GatherError<E>>;

    fn next(&mut self) -> Option<Self::Item> {
        let acc = self.state.take()?;
        let item = self.inner.next()?;
        let index = self.index;
        self.index += 1;

        match (self.combine)(acc, item) {
            Ok(next) => {
                self.state = Some(next.clone());
                Some(Ok(next))
            }
            Err(source) => Some(Err(GatherError::TransformationFailure { index, source })),
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.state.is_none() {
            return (0, Some(0));
        }
        // A failure can end the sequence early.
        (0, self.inner.size_hint().1)
    }
}

impl<I, A, E, F> FusedIterator for TryFoldRunning<I, A, F>
where
    I: Iterator,
    A: Clone,
    F: FnMut(A, I::Item) -> Result<A, E>,
{
}

impl<I: std::fmt::Debug, A: std::fmt::Debug, F> std::fmt::Debug for TryFoldRunning<I, A, F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TryFoldRunning")
            .field("inner", &self.inner)
            .field("state", &self.state)
            .field("index", &self.index)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn running_sum() {
        let sums: Vec<_> = fold_running([1, 2, 3, 4, 5], 0, |acc, x| acc + x).collect();
        assert_eq!(sums, vec![1, 3, 6, 10, 15]);
    }

    #[test]
    fn empty_input_emits_nothing() {
        let out: Vec<i32> = fold_running(Vec::<i32>::new(), 42, |acc, x| acc + x).collect();
        assert!(out.is_empty());
    }

    #[test]
    fn accumulator_type_differs_from_element() {
        let out: Vec<String> = fold_running(['a', 'b', 'c'], String::new(), |mut acc, c| {
            acc.push(c);
            acc
        })
        .collect();
        assert_eq!(out, vec!["a", "ab", "abc"]);
    }

    #[test]
    fn fused_after_exhaustion() {
        let mut it = fold_running([1], 0, |acc, x| acc + x);
        assert_eq!(it.next(), Some(1));
        assert_eq!(it.next(), None);
        assert_eq!(it.next(), None);
        assert_eq!(it.size_hint(), (0, Some(0)));
    }

    #[test]
    fn try_fold_stops_at_first_failure() {
        let mut calls = 0;
        let results: Vec<_> = try_fold_running([1, 2, -1, 4], 0, |acc, x| {
            calls += 1;
            if x < 0 { Err("negative") } else { Ok(acc + x) }
        })
        .collect();
        assert_eq!(calls, 3);
        assert_eq!(results.len(), 3);
        assert_eq!(results[0].as_ref().ok(), Some(&1));
        assert_eq!(results[1].as_ref().ok(), Some(&3));
        assert!(matches!(
            results[2],
            Err(GatherError::TransformationFailure {
                index: 2,
                source: "negative"
            })
        ));
    }

    #[test]
    fn try_fold_without_failure_matches_fold() {
        let plain: Vec<_> = fold_running(1..=5, 1u64, |acc, x| acc * x).collect();
        let fallible: Vec<_> =
            try_fold_running(1..=5, 1u64, |acc, x| Ok::<_, ()>(acc * x))
                .map(|r| r.unwrap())
                .collect();
        assert_eq!(plain, fallible);
        assert_eq!(plain, vec![1, 2, 6, 24, 120]);
    }
}
