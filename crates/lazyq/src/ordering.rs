//! Ordering operators.
//!
//! Provides [`Dir`] for sort direction, the [`SortKeys`] chain built by
//! `order_by` / `then_by`, and the [`Ordered`] sequence.
//!
//! Ordering is the one blocking step in a pipeline: the first pull drains
//! upstream, computes every key once per element, and stable-sorts. Keys
//! compare lexicographically in the order they were added; elements that
//! tie on every key keep their upstream order.

use std::cmp::Ordering;
use std::vec;

use crate::callback::{Fallible, Infallible, KeySelector};
use crate::cursor::Cursor;
use crate::error::{BoxError, QueryError, Result};
use crate::sequence::{Marker, Sequence};

/// Direction of one sort key. Ascending unless stated otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Dir {
    #[default]
    Asc,
    Desc,
}

impl Dir {
    /// Orients a key comparison: `Desc` reverses it.
    pub fn apply(self, ordering: Ordering) -> Ordering {
        if self == Dir::Desc {
            ordering.reverse()
        } else {
            ordering
        }
    }
}

impl std::fmt::Display for Dir {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Dir::Asc => "asc",
            Dir::Desc => "desc",
        })
    }
}

/// A list of sort keys for elements of type `T`.
///
/// Implemented by [`ByKey`] (a single key) and [`Then`] (a key followed by
/// tie-breakers).
pub trait SortKeys<T> {
    /// The extracted key values of one element.
    type Keys;

    /// Computes all keys of `item`.
    fn extract(&self, item: &T) -> std::result::Result<Self::Keys, BoxError>;

    /// Compares two extracted key lists, applying each key's direction.
    fn compare(&self, a: &Self::Keys, b: &Self::Keys) -> Ordering;

    /// Number of keys in the list.
    fn depth(&self) -> usize;
}

/// A single key selector with its direction.
#[derive(Debug, Clone)]
pub struct ByKey<F, K> {
    selector: F,
    dir: Dir,
    _key: Marker<K>,
}

impl<F, K> ByKey<F, K> {
    pub(crate) fn new(selector: F, dir: Dir) -> Self {
        ByKey {
            selector,
            dir,
            _key: Marker::default(),
        }
    }

    /// Returns the direction of this key.
    pub fn dir(&self) -> Dir {
        self.dir
    }
}

impl<T, F, K> SortKeys<T> for ByKey<F, K>
where
    F: KeySelector<T, K>,
    K: Ord,
{
    type Keys = K;

    fn extract(&self, item: &T) -> std::result::Result<K, BoxError> {
        self.selector.key(item)
    }

    fn compare(&self, a: &K, b: &K) -> Ordering {
        self.dir.apply(a.cmp(b))
    }

    fn depth(&self) -> usize {
        1
    }
}

/// A key list followed by one more tie-breaking key list.
#[derive(Debug, Clone)]
pub struct Then<A, B> {
    primary: A,
    secondary: B,
}

impl<T, A, B> SortKeys<T> for Then<A, B>
where
    A: SortKeys<T>,
    B: SortKeys<T>,
{
    type Keys = (A::Keys, B::Keys);

    fn extract(&self, item: &T) -> std::result::Result<Self::Keys, BoxError> {
        Ok((self.primary.extract(item)?, self.secondary.extract(item)?))
    }

    fn compare(&self, a: &Self::Keys, b: &Self::Keys) -> Ordering {
        self.primary
            .compare(&a.0, &b.0)
            .then_with(|| self.secondary.compare(&a.1, &b.1))
    }

    fn depth(&self) -> usize {
        self.primary.depth() + self.secondary.depth()
    }
}

/// Sequence of upstream elements in key order.
///
/// Created by [`Sequence::order_by`] and friends; extended with
/// [`then_by`](Ordered::then_by).
#[derive(Debug, Clone)]
pub struct Ordered<S, K> {
    upstream: S,
    keys: K,
}

impl<S, K> Ordered<S, K> {
    pub(crate) fn new(upstream: S, keys: K) -> Self {
        Ordered { upstream, keys }
    }
}

impl<S: Sequence, K> Ordered<S, K> {
    /// Breaks ties of the existing keys with `key` in direction `dir`.
    pub fn then_by<K2, F>(self, key: F, dir: Dir) -> Ordered<S, Then<K, ByKey<Infallible<F>, K2>>>
    where
        F: Fn(&S::Item) -> K2,
        K2: Ord,
    {
        self.then(ByKey::new(Infallible(key), dir))
    }

    /// Breaks ties by `key`, smallest first.
    pub fn then_asc<K2, F>(self, key: F) -> Ordered<S, Then<K, ByKey<Infallible<F>, K2>>>
    where
        F: Fn(&S::Item) -> K2,
        K2: Ord,
    {
        self.then_by(key, Dir::Asc)
    }

    /// Breaks ties by `key`, largest first.
    pub fn then_desc<K2, F>(self, key: F) -> Ordered<S, Then<K, ByKey<Infallible<F>, K2>>>
    where
        F: Fn(&S::Item) -> K2,
        K2: Ord,
    {
        self.then_by(key, Dir::Desc)
    }

    /// Like [`then_by`](Ordered::then_by) with a key selector that can fail.
    pub fn try_then_by<K2, F>(self, key: F, dir: Dir) -> Ordered<S, Then<K, ByKey<Fallible<F>, K2>>>
    where
        F: Fn(&S::Item) -> std::result::Result<K2, BoxError>,
        K2: Ord,
    {
        self.then(ByKey::new(Fallible(key), dir))
    }

    fn then<B>(self, secondary: B) -> Ordered<S, Then<K, B>> {
        Ordered {
            upstream: self.upstream,
            keys: Then {
                primary: self.keys,
                secondary,
            },
        }
    }
}

/// Cursor of an [`Ordered`] sequence.
pub struct OrderedCursor<'s, C: Cursor, K> {
    keys: &'s K,
    state: SortState<C, C::Item>,
}

enum SortState<C, T> {
    Pending(C),
    Draining(vec::IntoIter<T>),
    Done,
}

impl<C, K> OrderedCursor<'_, C, K>
where
    C: Cursor,
    K: SortKeys<C::Item>,
{
    fn materialize(&self, upstream: &mut C) -> Result<Vec<C::Item>> {
        let mut keyed = Vec::new();
        while let Some(item) = upstream.pull()? {
            let position = keyed.len();
            let keys = self
                .keys
                .extract(&item)
                .map_err(|source| QueryError::callback("order_by", position, source))?;
            keyed.push((keys, item));
        }

        // `sort_by` is stable, so full ties keep upstream order.
        keyed.sort_by(|a, b| self.keys.compare(&a.0, &b.0));
        tracing::trace!(
            elements = keyed.len(),
            keys = self.keys.depth(),
            "ordered upstream"
        );
        Ok(keyed.into_iter().map(|(_, item)| item).collect())
    }
}

impl<C, K> Cursor for OrderedCursor<'_, C, K>
where
    C: Cursor,
    K: SortKeys<C::Item>,
{
    type Item = C::Item;

    fn pull(&mut self) -> Result<Option<C::Item>> {
        loop {
            match std::mem::replace(&mut self.state, SortState::Done) {
                SortState::Pending(mut upstream) => {
                    let sorted = self.materialize(&mut upstream)?;
                    self.state = SortState::Draining(sorted.into_iter());
                }
                SortState::Draining(mut items) => {
                    let next = items.next();
                    if next.is_some() {
                        self.state = SortState::Draining(items);
                    }
                    return Ok(next);
                }
                SortState::Done => return Ok(None),
            }
        }
    }
}

impl<S, K> Sequence for Ordered<S, K>
where
    S: Sequence,
    K: SortKeys<S::Item>,
{
    type Item = S::Item;
    type Cursor<'s>
        = OrderedCursor<'s, S::Cursor<'s>, K>
    where
        Self: 's;

    fn cursor(&self) -> Self::Cursor<'_> {
        OrderedCursor {
            keys: &self.keys,
            state: SortState::Pending(self.upstream.cursor()),
        }
    }
}
