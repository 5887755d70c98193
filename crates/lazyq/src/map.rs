//! The `map` operator.

use crate::callback::Selector;
use crate::cursor::Cursor;
use crate::error::{QueryError, Result};
use crate::sequence::{Marker, Sequence};

/// Sequence of upstream elements projected 1:1 through a selector.
///
/// Created by [`Sequence::map`] and [`Sequence::try_map`].
#[derive(Debug, Clone)]
pub struct Map<S, F, U> {
    upstream: S,
    selector: F,
    _output: Marker<U>,
}

impl<S, F, U> Map<S, F, U> {
    pub(crate) fn new(upstream: S, selector: F) -> Self {
        Map {
            upstream,
            selector,
            _output: Marker::default(),
        }
    }
}

/// Cursor of a [`Map`].
#[derive(Debug)]
pub struct MapCursor<'s, C, F, U> {
    upstream: C,
    selector: &'s F,
    position: usize,
    _output: Marker<U>,
}

impl<C, F, U> Cursor for MapCursor<'_, C, F, U>
where
    C: Cursor,
    F: Selector<C::Item, U>,
{
    type Item = U;

    fn pull(&mut self) -> Result<Option<U>> {
        let Some(item) = self.upstream.pull()? else {
            return Ok(None);
        };
        let position = self.position;
        self.position += 1;
        self.selector
            .select(item)
            .map(Some)
            .map_err(|source| QueryError::callback("map", position, source))
    }
}

impl<S, F, U> Sequence for Map<S, F, U>
where
    S: Sequence,
    F: Selector<S::Item, U>,
{
    type Item = U;
    type Cursor<'s>
        = MapCursor<'s, S::Cursor<'s>, F, U>
    where
        Self: 's;

    fn cursor(&self) -> Self::Cursor<'_> {
        MapCursor {
            upstream: self.upstream.cursor(),
            selector: &self.selector,
            position: 0,
            _output: Marker::default(),
        }
    }
}
