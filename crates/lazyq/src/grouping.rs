//! The `group_by` operator.
//!
//! Grouping drains upstream in a single pass on the first pull, appending
//! each element to the group of its key as it arrives. Groups come out in
//! the order their keys were first seen; members keep upstream order. This
//! needs O(n) space but, unlike ordering, no comparisons.

use std::collections::HashMap;
use std::hash::Hash;
use std::vec;

use crate::callback::KeySelector;
use crate::cursor::Cursor;
use crate::error::{QueryError, Result};
use crate::sequence::{Marker, Sequence};
use crate::source::SliceCursor;

/// A key and the upstream elements that produced it.
///
/// A group is itself a [`Sequence`] over its members, so it can feed
/// another pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Group<K, T> {
    key: K,
    members: Vec<T>,
}

impl<K, T> Group<K, T> {
    /// Creates a group from a key and its members.
    pub fn new(key: K, members: Vec<T>) -> Self {
        Group { key, members }
    }

    /// Returns the shared key.
    pub fn key(&self) -> &K {
        &self.key
    }

    /// Returns the members in upstream order.
    pub fn members(&self) -> &[T] {
        &self.members
    }

    /// Returns the number of members.
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Returns `true` if the group has no members.
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Iterates over the members.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.members.iter()
    }

    /// Splits the group into its key and members.
    pub fn into_parts(self) -> (K, Vec<T>) {
        (self.key, self.members)
    }
}

impl<K, T> IntoIterator for Group<K, T> {
    type Item = T;
    type IntoIter = vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.members.into_iter()
    }
}

impl<'a, K, T> IntoIterator for &'a Group<K, T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.members.iter()
    }
}

impl<K, T: Clone> Sequence for Group<K, T> {
    type Item = T;
    type Cursor<'s>
        = SliceCursor<'s, T>
    where
        Self: 's;

    fn cursor(&self) -> Self::Cursor<'_> {
        SliceCursor::new(&self.members)
    }
}

/// Sequence of [`Group`]s keyed by a selector.
///
/// Created by [`Sequence::group_by`] and [`Sequence::try_group_by`].
#[derive(Debug, Clone)]
pub struct GroupBy<S, F, K> {
    upstream: S,
    selector: F,
    _key: Marker<K>,
}

impl<S, F, K> GroupBy<S, F, K> {
    pub(crate) fn new(upstream: S, selector: F) -> Self {
        GroupBy {
            upstream,
            selector,
            _key: Marker::default(),
        }
    }
}

/// Cursor of a [`GroupBy`].
pub struct GroupByCursor<'s, C: Cursor, F, K> {
    selector: &'s F,
    state: GroupState<C, Group<K, C::Item>>,
}

enum GroupState<C, G> {
    Pending(C),
    Draining(vec::IntoIter<G>),
    Done,
}

impl<C, F, K> GroupByCursor<'_, C, F, K>
where
    C: Cursor,
    F: KeySelector<C::Item, K>,
    K: Eq + Hash + Clone,
{
    fn accumulate(&self, upstream: &mut C) -> Result<Vec<Group<K, C::Item>>> {
        let mut groups: Vec<Group<K, C::Item>> = Vec::new();
        let mut index: HashMap<K, usize> = HashMap::new();
        let mut position = 0;

        while let Some(item) = upstream.pull()? {
            let key = self
                .selector
                .key(&item)
                .map_err(|source| QueryError::callback("group_by", position, source))?;
            position += 1;

            match index.get(&key) {
                Some(&slot) => groups[slot].members.push(item),
                None => {
                    index.insert(key.clone(), groups.len());
                    groups.push(Group::new(key, vec![item]));
                }
            }
        }

        tracing::trace!(elements = position, groups = groups.len(), "grouped upstream");
        Ok(groups)
    }
}

impl<C, F, K> Cursor for GroupByCursor<'_, C, F, K>
where
    C: Cursor,
    F: KeySelector<C::Item, K>,
    K: Eq + Hash + Clone,
{
    type Item = Group<K, C::Item>;

    fn pull(&mut self) -> Result<Option<Self::Item>> {
        loop {
            match std::mem::replace(&mut self.state, GroupState::Done) {
                GroupState::Pending(mut upstream) => {
                    let groups = self.accumulate(&mut upstream)?;
                    self.state = GroupState::Draining(groups.into_iter());
                }
                GroupState::Draining(mut groups) => {
                    let next = groups.next();
                    if next.is_some() {
                        self.state = GroupState::Draining(groups);
                    }
                    return Ok(next);
                }
                GroupState::Done => return Ok(None),
            }
        }
    }
}

impl<S, F, K> Sequence for GroupBy<S, F, K>
where
    S: Sequence,
    F: KeySelector<S::Item, K>,
    K: Eq + Hash + Clone,
{
    type Item = Group<K, S::Item>;
    type Cursor<'s>
        = GroupByCursor<'s, S::Cursor<'s>, F, K>
    where
        Self: 's;

    fn cursor(&self) -> Self::Cursor<'_> {
        GroupByCursor {
            selector: &self.selector,
            state: GroupState::Pending(self.upstream.cursor()),
        }
    }
}
