//! The demo queries behind each subcommand.
//!
//! Every function composes a lazyq pipeline and consumes it, returning plain
//! data so the caller decides how to print it.

use std::cell::Cell;

use lazyq::{from_slice, from_vec, range, Dir, QueryError, Result, Sequence};
use serde::Serialize;

use crate::account::{Account, Customer};

/// Customers whose account is overdrawn.
pub fn negative_balances(accounts: &[Account]) -> Result<Vec<Customer>> {
    from_slice(accounts)
        .filter(|account| account.is_overdrawn())
        .map(|account| Customer::from(account.clone()))
        .to_vec()
}

/// Two consumptions of the counter series.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeferredRuns {
    pub first: Vec<i64>,
    pub second: Vec<i64>,
}

/// Consumes `x + counter` over `0..10` twice, bumping the counter per element.
///
/// When `materialize` is set the series is collected once and both runs
/// read that list, so they agree. Otherwise each run re-executes the
/// selector and the second run starts where the first left the counter.
pub fn deferred_runs(materialize: bool) -> Result<DeferredRuns> {
    let counter = Cell::new(0i64);
    let series = range(0, 10)?.map(|x| {
        let result = x + counter.get();
        counter.set(counter.get() + 1);
        result
    });

    if materialize {
        let list = from_vec(series.to_vec()?);
        Ok(DeferredRuns {
            first: list.to_vec()?,
            second: list.to_vec()?,
        })
    } else {
        Ok(DeferredRuns {
            first: series.to_vec()?,
            second: series.to_vec()?,
        })
    }
}

/// Names of overdrawn accounts, optionally narrowed to a name prefix.
///
/// The prefix filter is stacked onto the same plan before it runs.
pub fn overdrawn_names(accounts: &[Account], prefix: Option<&str>) -> Result<Vec<String>> {
    let overdrawn = from_slice(accounts).filter(|account| account.is_overdrawn());

    match prefix {
        Some(prefix) => names(overdrawn.filter(|account| account.name.starts_with(prefix))),
        None => names(overdrawn),
    }
}

fn names<'a, S>(accounts: S) -> Result<Vec<String>>
where
    S: Sequence<Item = &'a Account>,
{
    accounts.map(|account| account.name.clone()).to_vec()
}

/// A word in both cases.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CasePair {
    pub upper: String,
    pub lower: String,
}

/// Projects each word into its upper- and lower-case forms.
pub fn case_pairs(words: &[String]) -> Result<Vec<CasePair>> {
    from_slice(words)
        .map(|word| CasePair {
            upper: word.to_uppercase(),
            lower: word.to_lowercase(),
        })
        .to_vec()
}

/// The `skip`/`take` window of `count` integers starting at `start`.
pub fn window(start: i64, count: usize, skip: usize, take: usize) -> Result<Vec<i64>> {
    range(start, count)?.skip(skip).take(take).to_vec()
}

pub const DIGITS: [&str; 10] = [
    "zero", "one", "two", "three", "four", "five", "six", "seven", "eight", "nine",
];

/// Digit names ordered by length, then alphabetically.
pub fn sorted_digits(dir: Dir) -> Result<Vec<&'static str>> {
    from_vec(DIGITS.to_vec())
        .order_by(|d| d.len(), dir)
        .then_asc(|d| *d)
        .to_vec()
}

/// Numbers sharing a remainder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RemainderGroup {
    pub remainder: i64,
    pub numbers: Vec<i64>,
}

pub const NUMBERS: [i64; 10] = [5, 4, 1, 3, 9, 8, 6, 7, 2, 0];

/// Groups [`NUMBERS`] by their remainder modulo `divisor`.
pub fn remainder_groups(divisor: i64) -> Result<Vec<RemainderGroup>> {
    if divisor == 0 {
        return Err(QueryError::InvalidArgument(
            "divisor must not be zero".into(),
        ));
    }
    from_vec(NUMBERS.to_vec())
        .group_by(|n| n % divisor)
        .map(|group| {
            let (remainder, numbers) = group.into_parts();
            RemainderGroup { remainder, numbers }
        })
        .to_vec()
}

/// Addresses held under one name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Household {
    pub name: String,
    pub addresses: Vec<String>,
}

/// Groups accounts by holder name.
pub fn households(accounts: &[Account]) -> Result<Vec<Household>> {
    from_slice(accounts)
        .group_by(|account| account.name.clone())
        .map(|group| Household {
            addresses: group.iter().map(|a| a.address.clone()).collect(),
            name: group.key().clone(),
        })
        .to_vec()
}

/// A scored participant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScoreRecord {
    pub name: &'static str,
    pub score: u32,
    pub gender: u8,
}

pub static SCORES: [ScoreRecord; 3] = [
    ScoreRecord {
        name: "Alice",
        score: 50,
        gender: 1,
    },
    ScoreRecord {
        name: "Bob",
        score: 40,
        gender: 2,
    },
    ScoreRecord {
        name: "Cathy",
        score: 45,
        gender: 1,
    },
];

/// Looks up the score of `name` in a name-to-score dictionary.
///
/// A name that is not in [`SCORES`] is a `KeyNotFound` error.
pub fn score_of(name: &str) -> Result<u32> {
    let scores = from_slice(&SCORES).to_dictionary_with(|r| r.name, |r| r.score)?;
    scores.get(name).copied()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::account::sample_accounts;

    #[test]
    fn negative_balances_of_samples() {
        let customers = negative_balances(&sample_accounts()).unwrap();
        let names: Vec<&str> = customers.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Alice", "Anton", "Peter"]);
        assert_eq!(customers[2].address, "1 Wilco Way");
    }

    #[test]
    fn deferred_runs_diverge() {
        let runs = deferred_runs(false).unwrap();
        assert_eq!(runs.first, vec![0, 2, 4, 6, 8, 10, 12, 14, 16, 18]);
        assert_eq!(runs.second, vec![10, 12, 14, 16, 18, 20, 22, 24, 26, 28]);
    }

    #[test]
    fn materialized_runs_agree() {
        let runs = deferred_runs(true).unwrap();
        assert_eq!(runs.first, runs.second);
        assert_eq!(runs.first[9], 18);
    }

    #[test]
    fn overdrawn_with_and_without_prefix() {
        let accounts = sample_accounts();
        assert_eq!(
            overdrawn_names(&accounts, None).unwrap(),
            vec!["Alice", "Anton", "Peter"]
        );
        assert_eq!(
            overdrawn_names(&accounts, Some("A")).unwrap(),
            vec!["Alice", "Anton"]
        );
    }

    #[test]
    fn case_pairs_of_fruit() {
        let words = vec!["aPPLE".to_string(), "BlUeBeRrY".to_string()];
        let pairs = case_pairs(&words).unwrap();
        assert_eq!(
            pairs[1],
            CasePair {
                upper: "BLUEBERRY".into(),
                lower: "blueberry".into()
            }
        );
    }

    #[test]
    fn default_window() {
        assert_eq!(window(1, 20, 5, 5).unwrap(), vec![6, 7, 8, 9, 10]);
    }

    #[test]
    fn window_rejects_overflowing_range() {
        assert!(window(i64::MAX, 2, 0, 1).is_err());
    }

    #[test]
    fn digits_ascending() {
        assert_eq!(
            sorted_digits(Dir::Asc).unwrap(),
            vec!["one", "six", "two", "five", "four", "nine", "zero", "eight", "seven", "three"]
        );
    }

    #[test]
    fn digits_descending_length() {
        let sorted = sorted_digits(Dir::Desc).unwrap();
        assert_eq!(&sorted[..3], &["eight", "seven", "three"]);
    }

    #[test]
    fn remainders_by_five() {
        let groups = remainder_groups(5).unwrap();
        let remainders: Vec<i64> = groups.iter().map(|g| g.remainder).collect();
        assert_eq!(remainders, vec![0, 4, 1, 3, 2]);
        assert_eq!(groups[0].numbers, vec![5, 0]);
    }

    #[test]
    fn zero_divisor_rejected() {
        assert!(matches!(
            remainder_groups(0),
            Err(QueryError::InvalidArgument(_))
        ));
    }

    #[test]
    fn households_group_by_name() {
        let households = households(&sample_accounts()).unwrap();
        let peter = households.iter().find(|h| h.name == "Peter").unwrap();
        assert_eq!(peter.addresses, vec!["1 Wilco Way", "2 Wilco Way"]);
        assert_eq!(households.len(), 6);
    }

    #[test]
    fn score_lookup() {
        assert_eq!(score_of("Bob").unwrap(), 40);
        assert!(matches!(
            score_of("Dave"),
            Err(QueryError::KeyNotFound { .. })
        ));
    }
}
