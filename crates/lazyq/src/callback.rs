//! Callback traits for user-supplied predicates and selectors.
//!
//! Operators store their callbacks behind one of two wrappers:
//! [`Infallible`] for plain closures and [`Fallible`] for closures that
//! return `Result<_, BoxError>`. Both implement the same traits, so every
//! operator has a single code path that can report a failure.
//!
//! Callbacks are `Fn`, not `FnMut`: a sequence can be consumed many times
//! and each consumption borrows the callback. Mutable state belongs in a
//! `Cell` or `RefCell` captured by the closure, and it is never reset
//! between consumptions.

use crate::error::BoxError;

/// Wraps a closure that cannot fail.
#[derive(Debug, Clone, Copy)]
pub struct Infallible<F>(pub F);

/// Wraps a closure returning `Result<_, BoxError>`.
#[derive(Debug, Clone, Copy)]
pub struct Fallible<F>(pub F);

/// Decides whether an element is kept by `filter`.
pub trait Predicate<T> {
    fn test(&self, item: &T) -> Result<bool, BoxError>;
}

/// Projects an element for `map`.
pub trait Selector<T, U> {
    fn select(&self, item: T) -> Result<U, BoxError>;
}

/// Computes the ordering or grouping key of an element.
pub trait KeySelector<T, K> {
    fn key(&self, item: &T) -> Result<K, BoxError>;
}

impl<T, F> Predicate<T> for Infallible<F>
where
    F: Fn(&T) -> bool,
{
    fn test(&self, item: &T) -> Result<bool, BoxError> {
        Ok((self.0)(item))
    }
}

impl<T, F> Predicate<T> for Fallible<F>
where
    F: Fn(&T) -> Result<bool, BoxError>,
{
    fn test(&self, item: &T) -> Result<bool, BoxError> {
        (self.0)(item)
    }
}

impl<T, U, F> Selector<T, U> for Infallible<F>
where
    F: Fn(T) -> U,
{
    fn select(&self, item: T) -> Result<U, BoxError> {
        Ok((self.0)(item))
    }
}

impl<T, U, F> Selector<T, U> for Fallible<F>
where
    F: Fn(T) -> Result<U, BoxError>,
{
    fn select(&self, item: T) -> Result<U, BoxError> {
        (self.0)(item)
    }
}

impl<T, K, F> KeySelector<T, K> for Infallible<F>
where
    F: Fn(&T) -> K,
{
    fn key(&self, item: &T) -> Result<K, BoxError> {
        Ok((self.0)(item))
    }
}

impl<T, K, F> KeySelector<T, K> for Fallible<F>
where
    F: Fn(&T) -> Result<K, BoxError>,
{
    fn key(&self, item: &T) -> Result<K, BoxError> {
        (self.0)(item)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn infallible_predicate() {
        let negative = Infallible(|x: &i32| *x < 0);
        assert!(negative.test(&-1).unwrap());
        assert!(!negative.test(&1).unwrap());
    }

    #[test]
    fn fallible_selector_reports_error() {
        let halve = Fallible(|x: i32| -> Result<i32, BoxError> {
            if x % 2 == 0 {
                Ok(x / 2)
            } else {
                Err(format!("{x} is odd").into())
            }
        });
        assert_eq!(halve.select(4).unwrap(), 2);
        assert_eq!(halve.select(3).unwrap_err().to_string(), "3 is odd");
    }

    #[test]
    fn selector_sees_captured_state() {
        let calls = Cell::new(0);
        let count = Infallible(|x: i32| {
            calls.set(calls.get() + 1);
            x + calls.get()
        });
        assert_eq!(count.select(10).unwrap(), 11);
        assert_eq!(count.select(10).unwrap(), 12);
        assert_eq!(calls.get(), 2);
    }

    #[test]
    fn key_selector_borrows_item() {
        let len = Infallible(|s: &String| s.len());
        assert_eq!(len.key(&"four".to_string()).unwrap(), 4);
    }
}
