//! Order-preserving map with a bound on in-flight transformations.
//!
//! # Design
//!
//! - The calling thread is the producer: it pulls elements lazily from the
//!   input, tags each with its input position, and pushes it onto a bounded
//!   dispatch queue. A full queue is backpressure; the producer yields and
//!   retries.
//! - `max_concurrency` scoped worker threads pop from the queue and run the
//!   transformation, one element at a time each. With N workers, at most N
//!   transformations are ever in flight.
//! - Each worker keeps its own `(index, result)` list. Nothing is shared
//!   except the queue and the fail-fast state, so result slots need no
//!   locking. After all workers are joined the results are placed back in
//!   input order.
//! - Fail-fast: the first failure halts dispatch. Transformations already
//!   running finish, queued but unstarted elements are discarded, and the
//!   failure is returned with the index of the element that caused it.
//! - If a worker thread cannot be spawned, dispatch is halted before any input
//!   is pulled, the workers already running are joined, and the spawn error
//!   is returned.

use std::io;
use std::iter;
use std::num::NonZero;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, PoisonError};
use std::thread::{self, ScopedJoinHandle};

use crossbeam_queue::ArrayQueue;
use tracing::trace;

use crate::GatherError;
use crate::error::require_positive;

/// Tuning for [`map_concurrent_with`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MapConcurrentOptions {
    /// Maximum number of transformations running at once.
    pub max_concurrency: usize,
    /// Capacity of the dispatch queue between the producer and the workers.
    /// `None` uses `max_concurrency`.
    pub queue_capacity: Option<usize>,
}

impl MapConcurrentOptions {
    /// Options with the given concurrency bound and the default queue size.
    pub fn new(max_concurrency: usize) -> Self {
        Self {
            max_concurrency,
            queue_capacity: None,
        }
    }

    /// Overrides the dispatch queue capacity.
    pub fn with_queue_capacity(mut self, capacity: usize) -> Self {
        self.queue_capacity = Some(capacity);
        self
    }

    /// Returns `(max_concurrency, queue_capacity)` after validation.
    pub fn validate(&self) -> crate::Result<(usize, usize)> {
        let workers = require_positive("max_concurrency", self.max_concurrency)?;
        let capacity = require_positive(
            "queue_capacity",
            self.queue_capacity.unwrap_or(self.max_concurrency),
        )?;
        Ok((workers, capacity))
    }
}

impl Default for MapConcurrentOptions {
    fn default() -> Self {
        Self::new(thread::available_parallelism().map_or(1, NonZero::get))
    }
}

/// Applies `transform` to every element with at most `max_concurrency`
/// transformations in flight, returning the results in input order.
///
/// Blocks until every element has been transformed or the first failure has
/// been observed.
///
/// ```
/// use gatherers::map_concurrent;
///
/// let pages = ["page1", "page2", "page3", "page4"];
/// let results = map_concurrent(pages, 4, |url| {
///     Ok::<_, std::convert::Infallible>(format!("Processed: {}", url.to_uppercase()))
/// })
/// .unwrap();
/// assert_eq!(results[0], "Processed: PAGE1");
/// assert_eq!(results[3], "Processed: PAGE4");
/// ```
///
/// # Errors
///
/// - [`GatherError::InvalidArgument`] if `max_concurrency` is 0. Nothing is
///   consumed or transformed.
/// - [`GatherError::TransformationFailure`] with the first failure observed.
/// - [`GatherError::WorkerSpawn`] if a worker thread could not be started.
///   Nothing is transformed.
///
/// # Panics
///
/// A panic inside `transform` or the input iterator halts dispatch and is
/// resumed on the calling thread once all workers have stopped.
pub fn map_concurrent<I, R, E, F>(
    sequence: I,
    max_concurrency: usize,
    transform: F,
) -> Result<Vec<R>, GatherError<E>>
where
    I: IntoIterator,
    I::Item: Send,
    R: Send,
    E: Send,
    F: Fn(I::Item) -> Result<R, E> + Sync,
{
    map_concurrent_with(
        sequence,
        &MapConcurrentOptions::new(max_concurrency),
        transform,
    )
}

/// [`map_concurrent`] with explicit [`MapConcurrentOptions`].
pub fn map_concurrent_with<I, R, E, F>(
    sequence: I,
    options: &MapConcurrentOptions,
    transform: F,
) -> Result<Vec<R>, GatherError<E>>
where
    I: IntoIterator,
    I::Item: Send,
    R: Send,
    E: Send,
    F: Fn(I::Item) -> Result<R, E> + Sync,
{
    run(sequence, options, transform, named_worker)
}

fn named_worker(worker: usize) -> io::Result<thread::Builder> {
    Ok(thread::Builder::new().name(format!("gatherers-worker-{worker}")))
}

fn run<I, R, E, F, B>(
    sequence: I,
    options: &MapConcurrentOptions,
    transform: F,
    builder: B,
) -> Result<Vec<R>, GatherError<E>>
where
    I: IntoIterator,
    I::Item: Send,
    R: Send,
    E: Send,
    F: Fn(I::Item) -> Result<R, E> + Sync,
    B: Fn(usize) -> io::Result<thread::Builder>,
{
    let (max_concurrency, capacity) = options.validate().map_err(|err| err.widen())?;

    let items = sequence.into_iter();
    // No point spawning more workers than there can be elements.
    let workers = items
        .size_hint()
        .1
        .map_or(max_concurrency, |upper| upper.clamp(1, max_concurrency));

    let queue = ArrayQueue::new(capacity);
    let state = FailFast::new();
    let transform = &transform;

    trace!(workers, capacity, "starting concurrent map");

    let (dispatched, spawn_failure, joined) = thread::scope(|scope| {
        let mut handles = Vec::with_capacity(workers);
        let mut spawn_failure = None;
        for worker in 0..workers {
            let queue = &queue;
            let state = &state;
            let spawned = builder(worker).and_then(move |b| {
                b.spawn_scoped(scope, move || worker_loop(queue, state, transform))
            });
            match spawned {
                Ok(handle) => handles.push(handle),
                Err(source) => {
                    // Workers already running must see the halt or they
                    // wait forever for a producer that never starts.
                    state.halt();
                    spawn_failure = Some((worker, source));
                    break;
                }
            }
        }

        let dispatched = if spawn_failure.is_none() {
            produce(items, &queue, &state)
        } else {
            0
        };

        let joined: Vec<_> = handles.into_iter().map(ScopedJoinHandle::join).collect();
        (dispatched, spawn_failure, joined)
    });

    let mut completed = Vec::with_capacity(dispatched);
    for result in joined {
        match result {
            Ok(local) => completed.extend(local),
            Err(payload) => std::panic::resume_unwind(payload),
        }
    }

    if let Some((worker, source)) = spawn_failure {
        return Err(GatherError::WorkerSpawn { worker, source });
    }

    if let Some((index, source)) = state.take_failure() {
        let discarded = iter::from_fn(|| queue.pop()).count();
        trace!(dispatched, discarded, "dispatch stopped early");
        return Err(GatherError::TransformationFailure { index, source });
    }

    debug_assert_eq!(completed.len(), dispatched);
    completed.sort_unstable_by_key(|(index, _)| *index);
    trace!(completed = completed.len(), "concurrent map finished");

    Ok(completed.into_iter().map(|(_, result)| result).collect())
}

/// Feeds index-tagged elements to the workers until the input ends or
/// dispatch is halted. Returns the number of elements dispatched.
fn produce<I, T, E>(items: I, queue: &ArrayQueue<(usize, T)>, state: &FailFast<E>) -> usize
where
    I: Iterator<Item = T>,
{
    let _halt = HaltOnPanic(state);
    let mut items = items.enumerate();
    let mut dispatched = 0;

    // Check before pulling so a halted map consumes no further input.
    while !state.is_halted() {
        let Some(job) = items.next() else { break };
        if !dispatch(queue, state, job) {
            break;
        }
        dispatched += 1;
    }

    state.exhausted.store(true, Ordering::Release);
    dispatched
}

/// Pushes one job, yielding while the queue is full. Returns `false` if
/// dispatch was halted before the job could be enqueued.
fn dispatch<T, E>(queue: &ArrayQueue<T>, state: &FailFast<E>, mut job: T) -> bool {
    loop {
        if state.is_halted() {
            return false;
        }
        match queue.push(job) {
            Ok(()) => return true,
            Err(returned) => {
                job = returned;
                thread::yield_now();
            }
        }
    }
}

fn worker_loop<T, R, E, F>(
    queue: &ArrayQueue<(usize, T)>,
    state: &FailFast<E>,
    transform: &F,
) -> Vec<(usize, R)>
where
    F: Fn(T) -> Result<R, E>,
{
    let _halt = HaltOnPanic(state);
    let mut completed = Vec::new();

    while !state.is_halted() {
        match queue.pop() {
            Some((index, item)) => match transform(item) {
                Ok(result) => completed.push((index, result)),
                Err(source) => {
                    state.fail(index, source);
                    break;
                }
            },
            None => {
                // Every push happens before `exhausted` is set, so an empty
                // queue observed afterwards stays empty.
                if state.exhausted.load(Ordering::Acquire) && queue.is_empty() {
                    break;
                }
                thread::yield_now();
            }
        }
    }

    completed
}

/// Shared stop flags and the first observed failure.
struct FailFast<E> {
    halted: AtomicBool,
    exhausted: AtomicBool,
    failure: Mutex<Option<(usize, E)>>,
}

impl<E> FailFast<E> {
    fn new() -> Self {
        Self {
            halted: AtomicBool::new(false),
            exhausted: AtomicBool::new(false),
            failure: Mutex::new(None),
        }
    }

    fn is_halted(&self) -> bool {
        self.halted.load(Ordering::Acquire)
    }

    fn halt(&self) {
        self.halted.store(true, Ordering::Release);
    }

    /// Records a failure unless an earlier one was already observed.
    fn fail(&self, index: usize, source: E) {
        self.halt();
        let mut slot = self.failure.lock().unwrap_or_else(PoisonError::into_inner);
        if slot.is_none() {
            *slot = Some((index, source));
        }
    }

    fn take_failure(&self) -> Option<(usize, E)> {
        self.failure
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
    }
}

/// Halts dispatch if the owning thread unwinds, so no other thread is left
/// waiting on a producer or worker that has died.
struct HaltOnPanic<'a, E>(&'a FailFast<E>);

impl<E> Drop for HaltOnPanic<'_, E> {
    fn drop(&mut self) {
        if thread::panicking() {
            self.0.halt();
        }
    }
}
