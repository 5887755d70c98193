//! The `filter` operator.

use crate::callback::Predicate;
use crate::cursor::Cursor;
use crate::error::{QueryError, Result};
use crate::sequence::Sequence;

/// Sequence of the upstream elements that satisfy a predicate.
///
/// Created by [`Sequence::filter`] and [`Sequence::try_filter`].
#[derive(Debug, Clone)]
pub struct Filter<S, P> {
    upstream: S,
    predicate: P,
}

impl<S, P> Filter<S, P> {
    pub(crate) fn new(upstream: S, predicate: P) -> Self {
        Filter {
            upstream,
            predicate,
        }
    }
}

/// Cursor of a [`Filter`].
#[derive(Debug)]
pub struct FilterCursor<'s, C, P> {
    upstream: C,
    predicate: &'s P,
    position: usize,
}

impl<C, P> Cursor for FilterCursor<'_, C, P>
where
    C: Cursor,
    P: Predicate<C::Item>,
{
    type Item = C::Item;

    fn pull(&mut self) -> Result<Option<C::Item>> {
        while let Some(item) = self.upstream.pull()? {
            let position = self.position;
            self.position += 1;
            let keep = self
                .predicate
                .test(&item)
                .map_err(|source| QueryError::callback("filter", position, source))?;
            if keep {
                return Ok(Some(item));
            }
        }
        Ok(None)
    }
}

impl<S, P> Sequence for Filter<S, P>
where
    S: Sequence,
    P: Predicate<S::Item>,
{
    type Item = S::Item;
    type Cursor<'s>
        = FilterCursor<'s, S::Cursor<'s>, P>
    where
        Self: 's;

    fn cursor(&self) -> Self::Cursor<'_> {
        FilterCursor {
            upstream: self.upstream.cursor(),
            predicate: &self.predicate,
            position: 0,
        }
    }
}
