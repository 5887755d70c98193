//! The [`Sequence`] trait: a restartable, lazily evaluated query plan.
//!
//! A sequence is a description, not a buffer. Composition methods wrap the
//! receiver in a new operator and do no work; consumption methods start a
//! fresh [`Cursor`] that runs the whole chain from the source, including
//! every user callback, one element at a time.

use std::fmt::Debug;
use std::hash::Hash;
use std::marker::PhantomData;

use crate::callback::{Fallible, Infallible};
use crate::cursor::{Cursor, Iter};
use crate::error::{BoxError, Result};
use crate::filter::Filter;
use crate::grouping::GroupBy;
use crate::lookup::Dictionary;
use crate::map::Map;
use crate::ordering::{ByKey, Dir, Ordered};
use crate::window::{Skip, Take};

/// A lazily evaluated, restartable producer of elements.
///
/// # Example
///
/// ```
/// use lazyq::{from_vec, Sequence};
///
/// let balances = from_vec(vec![5, -3, 2, -8, 1]);
/// let overdrawn = balances.filter(|b| *b < 0).map(|b| b * 100);
///
/// // Nothing has run yet; `to_vec` runs the chain.
/// assert_eq!(overdrawn.to_vec().unwrap(), vec![-300, -800]);
/// ```
pub trait Sequence {
    /// The element type.
    type Item;

    /// The cursor type of one consumption.
    type Cursor<'s>: Cursor<Item = Self::Item>
    where
        Self: 's;

    /// Starts a fresh consumption.
    ///
    /// Each cursor re-runs the pipeline from the source. No element is
    /// produced until the cursor is pulled.
    fn cursor(&self) -> Self::Cursor<'_>;

    // ========================================================================
    // Composition
    // ========================================================================

    /// Keeps the elements for which `predicate` returns `true`.
    fn filter<P>(self, predicate: P) -> Filter<Self, Infallible<P>>
    where
        Self: Sized,
        P: Fn(&Self::Item) -> bool,
    {
        Filter::new(self, Infallible(predicate))
    }

    /// Like [`filter`](Sequence::filter) with a predicate that can fail.
    fn try_filter<P>(self, predicate: P) -> Filter<Self, Fallible<P>>
    where
        Self: Sized,
        P: Fn(&Self::Item) -> std::result::Result<bool, BoxError>,
    {
        Filter::new(self, Fallible(predicate))
    }

    /// Projects each element through `selector`.
    fn map<U, F>(self, selector: F) -> Map<Self, Infallible<F>, U>
    where
        Self: Sized,
        F: Fn(Self::Item) -> U,
    {
        Map::new(self, Infallible(selector))
    }

    /// Like [`map`](Sequence::map) with a selector that can fail.
    fn try_map<U, F>(self, selector: F) -> Map<Self, Fallible<F>, U>
    where
        Self: Sized,
        F: Fn(Self::Item) -> std::result::Result<U, BoxError>,
    {
        Map::new(self, Fallible(selector))
    }

    /// Discards the first `count` elements.
    fn skip(self, count: usize) -> Skip<Self>
    where
        Self: Sized,
    {
        Skip::new(self, count)
    }

    /// Yields at most `count` elements, then stops pulling upstream.
    fn take(self, count: usize) -> Take<Self>
    where
        Self: Sized,
    {
        Take::new(self, count)
    }

    /// Orders elements by `key` in direction `dir`.
    ///
    /// Chain [`then_by`](Ordered::then_by) to break ties.
    fn order_by<K, F>(self, key: F, dir: Dir) -> Ordered<Self, ByKey<Infallible<F>, K>>
    where
        Self: Sized,
        F: Fn(&Self::Item) -> K,
        K: Ord,
    {
        Ordered::new(self, ByKey::new(Infallible(key), dir))
    }

    /// Orders elements by `key`, smallest first.
    fn order_asc<K, F>(self, key: F) -> Ordered<Self, ByKey<Infallible<F>, K>>
    where
        Self: Sized,
        F: Fn(&Self::Item) -> K,
        K: Ord,
    {
        self.order_by(key, Dir::Asc)
    }

    /// Orders elements by `key`, largest first.
    fn order_desc<K, F>(self, key: F) -> Ordered<Self, ByKey<Infallible<F>, K>>
    where
        Self: Sized,
        F: Fn(&Self::Item) -> K,
        K: Ord,
    {
        self.order_by(key, Dir::Desc)
    }

    /// Like [`order_by`](Sequence::order_by) with a key selector that can fail.
    fn try_order_by<K, F>(self, key: F, dir: Dir) -> Ordered<Self, ByKey<Fallible<F>, K>>
    where
        Self: Sized,
        F: Fn(&Self::Item) -> std::result::Result<K, BoxError>,
        K: Ord,
    {
        Ordered::new(self, ByKey::new(Fallible(key), dir))
    }

    /// Groups elements by `key`, in first-seen key order.
    fn group_by<K, F>(self, key: F) -> GroupBy<Self, Infallible<F>, K>
    where
        Self: Sized,
        F: Fn(&Self::Item) -> K,
        K: Eq + Hash + Clone,
    {
        GroupBy::new(self, Infallible(key))
    }

    /// Like [`group_by`](Sequence::group_by) with a key selector that can fail.
    fn try_group_by<K, F>(self, key: F) -> GroupBy<Self, Fallible<F>, K>
    where
        Self: Sized,
        F: Fn(&Self::Item) -> std::result::Result<K, BoxError>,
        K: Eq + Hash + Clone,
    {
        GroupBy::new(self, Fallible(key))
    }

    // ========================================================================
    // Consumption
    // ========================================================================

    /// Starts a step-wise consumption.
    fn iter(&self) -> Iter<Self::Cursor<'_>> {
        Iter::new(self.cursor())
    }

    /// Runs the pipeline to the end and collects every element.
    fn to_vec(&self) -> Result<Vec<Self::Item>> {
        let mut cursor = self.cursor();
        let mut items = Vec::new();
        while let Some(item) = cursor.pull()? {
            items.push(item);
        }
        Ok(items)
    }

    /// Counts the elements.
    fn count(&self) -> Result<usize> {
        let mut cursor = self.cursor();
        let mut count = 0;
        while cursor.pull()?.is_some() {
            count += 1;
        }
        Ok(count)
    }

    /// Returns the first element, pulling nothing else.
    fn first(&self) -> Result<Option<Self::Item>> {
        self.cursor().pull()
    }

    /// Returns the first element matching `predicate`.
    fn find<P>(&self, predicate: P) -> Result<Option<Self::Item>>
    where
        P: Fn(&Self::Item) -> bool,
    {
        let mut cursor = self.cursor();
        while let Some(item) = cursor.pull()? {
            if predicate(&item) {
                return Ok(Some(item));
            }
        }
        Ok(None)
    }

    /// Returns `true` if any element matches. Stops at the first match.
    fn any<P>(&self, predicate: P) -> Result<bool>
    where
        P: Fn(&Self::Item) -> bool,
    {
        Ok(self.position(predicate)?.is_some())
    }

    /// Returns `true` if every element matches. Stops at the first miss.
    fn all<P>(&self, predicate: P) -> Result<bool>
    where
        P: Fn(&Self::Item) -> bool,
    {
        Ok(self.position(|item| !predicate(item))?.is_none())
    }

    /// Returns the index of the first element matching `predicate`.
    fn position<P>(&self, predicate: P) -> Result<Option<usize>>
    where
        P: Fn(&Self::Item) -> bool,
    {
        let mut cursor = self.cursor();
        let mut index = 0;
        while let Some(item) = cursor.pull()? {
            if predicate(&item) {
                return Ok(Some(index));
            }
            index += 1;
        }
        Ok(None)
    }

    /// Builds a [`Dictionary`] mapping `key(element)` to the element.
    ///
    /// Fails with `DuplicateKey` if two elements share a key.
    fn to_dictionary<K, F>(&self, key: F) -> Result<Dictionary<K, Self::Item>>
    where
        F: Fn(&Self::Item) -> K,
        K: Eq + Hash + Clone + Debug,
    {
        self.to_dictionary_with(key, |item| item)
    }

    /// Builds a [`Dictionary`] mapping `key(element)` to `value(element)`.
    fn to_dictionary_with<K, V, F, G>(&self, key: F, value: G) -> Result<Dictionary<K, V>>
    where
        F: Fn(&Self::Item) -> K,
        G: Fn(Self::Item) -> V,
        K: Eq + Hash + Clone + Debug,
    {
        let mut cursor = self.cursor();
        let mut dictionary = Dictionary::new();
        while let Some(item) = cursor.pull()? {
            let k = key(&item);
            dictionary.insert(k, value(item))?;
        }
        tracing::trace!(entries = dictionary.len(), "built dictionary");
        Ok(dictionary)
    }
}

impl<S: Sequence + ?Sized> Sequence for &S {
    type Item = S::Item;
    type Cursor<'s>
        = S::Cursor<'s>
    where
        Self: 's;

    fn cursor(&self) -> Self::Cursor<'_> {
        (**self).cursor()
    }
}

/// Phantom marker for the output type of an operator.
///
/// `fn() -> T` keeps operators `Send`/`Sync` regardless of `T`.
pub(crate) type Marker<T> = PhantomData<fn() -> T>;
