//! Decision tables: ordered predicates mapped to asset descriptors.
//!
//! A table is built once, validated at construction time, and evaluated per
//! request by the resolver.

mod builder;
mod entry;
mod predicate;

pub use builder::{DecisionTable, DecisionTableBuilder};
pub use entry::{EntryAssets, LocalizationBinding, PayloadBuilder, TableEntry, VariantGroup};
pub use predicate::{CustomPredicate, Predicate, PredicateFn};
