//! The pull interface every sequence is consumed through.
//!
//! A [`Cursor`] is one in-progress consumption of a sequence. Each call to
//! [`Cursor::pull`] asks for exactly one more element; nothing runs between
//! calls, and nothing runs at all until the first one.

use std::iter::FusedIterator;

use crate::error::Result;

/// Produces the next element of a consumption, or end-of-sequence.
pub trait Cursor {
    /// The element type.
    type Item;

    /// Pulls the next element.
    ///
    /// Returns `Ok(None)` once the sequence is exhausted and `Err` when a
    /// callback failed while producing the element.
    fn pull(&mut self) -> Result<Option<Self::Item>>;
}

impl<C: Cursor + ?Sized> Cursor for Box<C> {
    type Item = C::Item;

    fn pull(&mut self) -> Result<Option<Self::Item>> {
        (**self).pull()
    }
}

/// Adapts a [`Cursor`] into an [`Iterator`] of `Result`s.
///
/// The iterator is fused: after it yields an error or reaches the end it
/// never pulls from the cursor again.
#[derive(Debug)]
pub struct Iter<C> {
    cursor: C,
    finished: bool,
}

impl<C> Iter<C> {
    pub(crate) fn new(cursor: C) -> Self {
        Iter {
            cursor,
            finished: false,
        }
    }

    /// Returns the underlying cursor.
    pub fn into_cursor(self) -> C {
        self.cursor
    }
}

impl<C: Cursor> Iterator for Iter<C> {
    type Item = Result<C::Item>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        match self.cursor.pull() {
            Ok(Some(item)) => Some(Ok(item)),
            Ok(None) => {
                self.finished = true;
                None
            }
            Err(err) => {
                self.finished = true;
                Some(Err(err))
            }
        }
    }
}

impl<C: Cursor> FusedIterator for Iter<C> {}
