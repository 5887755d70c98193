//! The `skip` and `take` operators.
//!
//! `skip(n).take(m)` selects the window `[n, n + m)`. `take` never pulls
//! more than `m` elements from upstream, which makes it the way to bound an
//! infinite source.

use crate::cursor::Cursor;
use crate::error::Result;
use crate::sequence::Sequence;

/// Sequence without its first `count` upstream elements.
#[derive(Debug, Clone)]
pub struct Skip<S> {
    upstream: S,
    count: usize,
}

impl<S> Skip<S> {
    pub(crate) fn new(upstream: S, count: usize) -> Self {
        Skip { upstream, count }
    }
}

/// Cursor of a [`Skip`].
#[derive(Debug)]
pub struct SkipCursor<C> {
    upstream: C,
    pending: usize,
}

impl<C: Cursor> Cursor for SkipCursor<C> {
    type Item = C::Item;

    fn pull(&mut self) -> Result<Option<C::Item>> {
        while self.pending > 0 {
            self.pending -= 1;
            if self.upstream.pull()?.is_none() {
                self.pending = 0;
                return Ok(None);
            }
        }
        self.upstream.pull()
    }
}

impl<S: Sequence> Sequence for Skip<S> {
    type Item = S::Item;
    type Cursor<'s>
        = SkipCursor<S::Cursor<'s>>
    where
        Self: 's;

    fn cursor(&self) -> Self::Cursor<'_> {
        SkipCursor {
            upstream: self.upstream.cursor(),
            pending: self.count,
        }
    }
}

/// Sequence of at most `count` upstream elements.
#[derive(Debug, Clone)]
pub struct Take<S> {
    upstream: S,
    count: usize,
}

impl<S> Take<S> {
    pub(crate) fn new(upstream: S, count: usize) -> Self {
        Take { upstream, count }
    }
}

/// Cursor of a [`Take`].
#[derive(Debug)]
pub struct TakeCursor<C> {
    upstream: C,
    remaining: usize,
}

impl<C: Cursor> Cursor for TakeCursor<C> {
    type Item = C::Item;

    fn pull(&mut self) -> Result<Option<C::Item>> {
        if self.remaining == 0 {
            return Ok(None);
        }
        match self.upstream.pull()? {
            Some(item) => {
                self.remaining -= 1;
                Ok(Some(item))
            }
            None => {
                self.remaining = 0;
                Ok(None)
            }
        }
    }
}

impl<S: Sequence> Sequence for Take<S> {
    type Item = S::Item;
    type Cursor<'s>
        = TakeCursor<S::Cursor<'s>>
    where
        Self: 's;

    fn cursor(&self) -> Self::Cursor<'_> {
        TakeCursor {
            upstream: self.upstream.cursor(),
            remaining: self.count,
        }
    }
}
