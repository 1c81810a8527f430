//! Array-backed sorted and hashed sets and maps.
//!
//! Every collection stores its entries contiguously in a [`Store`]: a single
//! allocation whose used region floats between a front and a back margin, so
//! an insert or remove shifts whichever side of the position is shorter.
//! Entries are kept in order, either by a [`Comparator`] ([`CompactSet`],
//! [`CompactMap`], [`CompactItemMap`]) or by key hash
//! ([`CompactHashSet`], [`CompactHashMap`], [`CompactItemHashMap`]), and found
//! by binary search.
//!
//! Sorted collections are navigable: `lower`, `floor`, `ceiling` and `higher`
//! answer nearest-key queries, and `range`, `head`, `tail` and `descending`
//! open [`RangeView`]s that can be narrowed further and, when mutable, insert
//! and remove inside their bounds.
//!
//! ```
//! use compactmap::CompactMap;
//! use std::ops::Bound::{Included, Unbounded};
//!
//! let mut map = CompactMap::new();
//! for (i, name) in ["ann", "bob", "cat", "dan"].into_iter().enumerate() {
//!     map.insert(i as u32 * 10, name);
//! }
//! assert_eq!(map.ceiling(&15), Some((&20, &"cat")));
//!
//! let mut tail = map.range_mut(Included(10), Unbounded).unwrap();
//! assert!(tail.insert(5, "eve").is_err());
//! tail.insert(25, "fay").unwrap();
//! assert_eq!(tail.pop_last(), Some((30, "dan")));
//! assert_eq!(map.len(), 4);
//! ```

mod config;
mod entry;
mod error;
mod hashed;
mod index;
mod iter;
mod ordered;
mod slots;
mod store;
mod strategy;
mod view;
mod window;

pub use config::Config;
pub use entry::{Entry, OccupiedEntry, VacantEntry};
pub use error::CompactError;
pub use hashed::{CompactHashMap, CompactHashSet, CompactItemHashMap, Hashed};
pub use iter::{CursorMut, IntoIter, Iter, IterMut, Keys, Values, ValuesMut};
pub use ordered::{CompactItemMap, CompactMap, CompactSet, Ordered};
pub use slots::{ItemSlots, PairSlots, SetSlots, Slots};
pub use store::Store;
pub use strategy::{Comparator, Equivalence, KeyFn, KeyOf, NaturalOrder, Reversed, StdHash};
pub use view::{RangeView, View, ViewMut, ViewOrder};
pub use window::Direction;
