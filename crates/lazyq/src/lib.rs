//! lazyq - deferred, pull-based queries over in-memory sequences.
//!
//! lazyq builds query plans out of small operators and runs them only when
//! they are consumed. It supports:
//!
//! - Sources over owned items, borrowed slices, integer ranges and
//!   arbitrary (even infinite) iterator factories
//! - Filtering and 1:1 projection with plain or fallible callbacks
//! - Skip/take windows that stop pulling upstream as soon as they are full
//! - Stable multi-key ordering with per-key direction
//! - Grouping in first-seen key order
//! - Dictionary building with explicit missing/duplicate key errors
//!
//! # Quick Start
//!
//! ```rust
//! use lazyq::{from_vec, Sequence};
//!
//! #[derive(Clone)]
//! struct Account {
//!     name: String,
//!     balance: i64,
//! }
//!
//! let accounts = from_vec(vec![
//!     Account { name: "Ann".into(), balance: -20 },
//!     Account { name: "Ben".into(), balance: 75 },
//!     Account { name: "Ada".into(), balance: -5 },
//! ]);
//!
//! // Describes the query; nothing runs yet.
//! let overdrawn = accounts
//!     .filter(|a| a.balance < 0)
//!     .order_asc(|a| a.balance)
//!     .map(|a| a.name);
//!
//! assert_eq!(overdrawn.to_vec().unwrap(), vec!["Ann", "Ada"]);
//! ```
//!
//! # Execution Model
//!
//! ```text
//! compose:  source -> filter -> map -> ...      (no callbacks run)
//! consume:  cursor.pull() -> one element         (callbacks run for it)
//! again:    a new cursor re-runs everything from the source
//! ```
//!
//! - **Deferred**: composing an operator stores its parameters and nothing
//!   else.
//! - **Restartable**: every consumption starts over. State captured by
//!   callbacks (a `Cell` counter, say) is not reset between consumptions.
//! - **Early exit**: `take(n)` and short-circuiting consumers never pull
//!   more than they need, so infinite sources are fine behind them.
//! - **Blocking steps**: ordering and grouping drain their upstream on the
//!   first pull, still only when consumed.
//!
//! # Errors
//!
//! Fallible callbacks (`try_filter`, `try_map`, `try_order_by`,
//! `try_group_by`) abort the consumption at the failing element with
//! [`QueryError::Callback`], which records the operator and the element's
//! position. Elements yielded before the failure stay valid.

mod callback;
mod cursor;
mod error;
mod filter;
mod grouping;
mod lookup;
mod map;
mod ordering;
mod sequence;
mod source;
mod window;

// Re-export public API
pub use callback::{Fallible, Infallible, KeySelector, Predicate, Selector};
pub use cursor::{Cursor, Iter};
pub use error::{BoxError, QueryError, Result};
pub use filter::{Filter, FilterCursor};
pub use grouping::{Group, GroupBy, GroupByCursor};
pub use lookup::Dictionary;
pub use map::{Map, MapCursor};
pub use ordering::{ByKey, Dir, Ordered, OrderedCursor, SortKeys, Then};
pub use sequence::Sequence;
pub use source::{
    from_slice, from_vec, naturals, range, source, Items, IterCursor, Range, RangeCursor,
    SliceCursor, Source,
};
pub use window::{Skip, SkipCursor, Take, TakeCursor};
