//! Sequence sources.
//!
//! Sources are the leaves of every pipeline. Each one can start any number
//! of independent consumptions:
//!
//! - [`source`] calls a factory for a fresh iterator per consumption
//! - [`from_vec`] owns its items and yields clones
//! - [`from_slice`] borrows its items and yields references
//! - [`range`] counts up from a start value
//! - [`naturals`] never ends

use std::iter::Fuse;
use std::ops::RangeFrom;

use crate::cursor::Cursor;
use crate::error::{QueryError, Result};
use crate::sequence::Sequence;

/// A sequence backed by an iterator factory.
#[derive(Debug, Clone)]
pub struct Source<F> {
    factory: F,
}

/// Creates a sequence that calls `factory` at the start of every consumption.
///
/// Side effects inside the returned iterator run again on each consumption.
///
/// ```
/// use lazyq::{source, Sequence};
///
/// let evens = source(|| (0..10).step_by(2));
/// assert_eq!(evens.to_vec().unwrap(), vec![0, 2, 4, 6, 8]);
/// ```
pub fn source<F, I>(factory: F) -> Source<F>
where
    F: Fn() -> I,
    I: IntoIterator,
{
    Source { factory }
}

/// Cursor over an iterator produced by a [`Source`].
#[derive(Debug)]
pub struct IterCursor<I> {
    iter: Fuse<I>,
}

impl<I: Iterator> Cursor for IterCursor<I> {
    type Item = I::Item;

    fn pull(&mut self) -> Result<Option<I::Item>> {
        Ok(self.iter.next())
    }
}

impl<F, I> Sequence for Source<F>
where
    F: Fn() -> I,
    I: IntoIterator,
{
    type Item = I::Item;
    type Cursor<'s>
        = IterCursor<I::IntoIter>
    where
        Self: 's;

    fn cursor(&self) -> Self::Cursor<'_> {
        IterCursor {
            iter: (self.factory)().into_iter().fuse(),
        }
    }
}

/// Creates a sequence over borrowed items.
pub fn from_slice<'a, T>(items: &'a [T]) -> Source<impl Fn() -> std::slice::Iter<'a, T> + Clone + 'a> {
    source(move || items.iter())
}

/// Creates an infinite sequence `0, 1, 2, ...`.
///
/// Only safe to fully consume behind a `take`.
pub fn naturals() -> Source<impl Fn() -> RangeFrom<u64> + Clone> {
    source(|| 0u64..)
}

/// A sequence that owns its items and yields clones of them.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Items<T> {
    items: Vec<T>,
}

/// Creates a sequence over owned items.
pub fn from_vec<T: Clone>(items: Vec<T>) -> Items<T> {
    Items { items }
}

impl<T> Items<T> {
    /// Returns the number of items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if there are no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Cursor yielding clones of a borrowed slice.
#[derive(Debug)]
pub struct SliceCursor<'s, T> {
    items: std::slice::Iter<'s, T>,
}

impl<'s, T> SliceCursor<'s, T> {
    pub(crate) fn new(items: &'s [T]) -> Self {
        SliceCursor {
            items: items.iter(),
        }
    }
}

impl<T: Clone> Cursor for SliceCursor<'_, T> {
    type Item = T;

    fn pull(&mut self) -> Result<Option<T>> {
        Ok(self.items.next().cloned())
    }
}

impl<T: Clone> Sequence for Items<T> {
    type Item = T;
    type Cursor<'s>
        = SliceCursor<'s, T>
    where
        Self: 's;

    fn cursor(&self) -> Self::Cursor<'_> {
        SliceCursor::new(&self.items)
    }
}

/// `count` consecutive integers starting at `start`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Range {
    start: i64,
    count: usize,
}

/// Creates a sequence of `count` consecutive integers starting at `start`.
///
/// Fails with [`QueryError::InvalidArgument`] when the last value does not
/// fit in an `i64`. The check happens here, at composition time.
///
/// ```
/// use lazyq::{range, Sequence};
///
/// let window = range(1, 20).unwrap().skip(5).take(5);
/// assert_eq!(window.to_vec().unwrap(), vec![6, 7, 8, 9, 10]);
/// ```
pub fn range(start: i64, count: usize) -> Result<Range> {
    if count > 0 {
        let last = i64::try_from(count - 1)
            .ok()
            .and_then(|span| start.checked_add(span));
        if last.is_none() {
            return Err(QueryError::InvalidArgument(format!(
                "range starting at {start} with {count} elements overflows i64"
            )));
        }
    }
    Ok(Range { start, count })
}

impl Range {
    /// Returns the first value.
    pub fn start(&self) -> i64 {
        self.start
    }

    /// Returns the number of values.
    pub fn len(&self) -> usize {
        self.count
    }

    /// Returns `true` if the range yields nothing.
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }
}

/// Cursor over a [`Range`].
#[derive(Debug)]
pub struct RangeCursor {
    next: i64,
    remaining: usize,
}

impl Cursor for RangeCursor {
    type Item = i64;

    fn pull(&mut self) -> Result<Option<i64>> {
        if self.remaining == 0 {
            return Ok(None);
        }
        let value = self.next;
        self.remaining -= 1;
        if self.remaining > 0 {
            self.next += 1;
        }
        Ok(Some(value))
    }
}

impl Sequence for Range {
    type Item = i64;
    type Cursor<'s> = RangeCursor;

    fn cursor(&self) -> Self::Cursor<'_> {
        RangeCursor {
            next: self.start,
            remaining: self.count,
        }
    }
}
