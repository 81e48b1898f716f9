//! Registration table with atomic publication.
//!
//! # Mental model
//!
//! * The table is an [`ArcSwap`] snapshot mapping each top-level key to a
//!   slot; every slot is itself an [`ArcSwap`] holding the root fragment.
//! * Readers load the snapshot, then the slot. Both loads are lock-free and
//!   everything they reach is immutable.
//! * Registering under an existing key replaces that slot's root with the
//!   merged fragment through a CAS loop on the slot alone, so registrations
//!   under different keys never retry against each other.
//! * Registering a new key publishes a new snapshot with CAS. A writer that
//!   loses the race retries and merges into the slot the winner published.
//!
//! # Lifecycle
//!
//! Created empty, grows only through [`RuleTable::register`] and lives as long
//! as its owner. Share it with `Arc<RuleTable>`; there is no global instance.

use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

use arc_swap::ArcSwap;
use rustc_hash::FxHashMap as HashMap;

use crate::error::Result;
use crate::node::{Node, merge};
use crate::pattern::compile;
use crate::resolve::{self, RootLookup};


/// Root fragment published under one top-level key.
struct Slot {
	root: ArcSwap<Node>,
}

impl Slot {
	fn new(root: Arc<Node>) -> Self {
		Self {
			root: ArcSwap::new(root),
		}
	}

	fn merge(&self, incoming: &Arc<Node>) {
		self.root.rcu(|existing| merge(existing, incoming));
	}
}

type Roots = HashMap<Box<str>, Arc<Slot>>;

/// Rules keyed by top-level segment.
pub struct RuleTable {
	roots: ArcSwap<Roots>,
}

impl Default for RuleTable {
	fn default() -> Self {
		Self::new()
	}
}

impl fmt::Debug for RuleTable {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let roots = self.roots.load();
		let mut keys: Vec<&str> = roots.keys().map(|k| &**k).collect();
		keys.sort_unstable();
		f.debug_struct("RuleTable").field("keys", &keys).finish()
	}
}

impl RuleTable {
	/// Creates an empty table.
	pub fn new() -> Self {
		Self {
			roots: ArcSwap::from_pointee(Roots::default()),
		}
	}

	/// Compiles `pattern` and merges it into the table.
	///
	/// Returns `true` if this call created the entry for the pattern's
	/// top-level key and `false` if it merged into an existing one.
	///
	/// # Errors
	///
	/// Returns an invalid-pattern [`RuleError`](crate::RuleError); the table
	/// is left untouched.
	///
	/// # Examples
	///
	/// ```
	/// use shortname_core::RuleTable;
	///
	/// let table = RuleTable::new();
	/// assert!(table.register("java.util.*", Some("Java")).unwrap());
	/// assert!(!table.register("java.lang.*", None).unwrap());
	/// assert_eq!(table.resolve("java.util.concurrent.Executor"), "Java.Executor");
	/// assert_eq!(table.resolve("java.lang.String"), "String");
	/// ```
	pub fn register(&self, pattern: &str, replacement: Option<&str>) -> Result<bool> {
		let compiled = compile(pattern, replacement)?;
		let created = self.insert(&compiled.top_key, &compiled.fragment);
		tracing::debug!(pattern, key = %compiled.top_key, kind = ?compiled.kind, created, "rule registered");
		Ok(created)
	}

	fn insert(&self, key: &str, fragment: &Arc<Node>) -> bool {
		loop {
			let cur = self.roots.load_full();
			if let Some(slot) = cur.get(key) {
				slot.merge(fragment);
				return false;
			}

			let mut next = (*cur).clone();
			next.insert(Box::from(key), Arc::new(Slot::new(Arc::clone(fragment))));

			let prev = self.roots.compare_and_swap(&cur, Arc::new(next));
			if Arc::ptr_eq(&prev, &cur) {
				return true;
			}
		}
	}

	/// Rewrites `name`, returning it unchanged when no rule applies.
	pub fn resolve(&self, name: &str) -> String {
		self.resolve_cow(name).into_owned()
	}

	/// Like [`RuleTable::resolve`], borrowing `name` when it is unchanged.
	pub fn resolve_cow<'n>(&self, name: &'n str) -> Cow<'n, str> {
		resolve::resolve(self, name)
	}

	/// Number of top-level keys.
	pub fn len(&self) -> usize {
		self.roots.load().len()
	}

	pub fn is_empty(&self) -> bool {
		self.roots.load().is_empty()
	}

	pub fn contains_key(&self, key: &str) -> bool {
		self.roots.load().contains_key(key)
	}

	/// Currently published fragment for `key`.
	pub fn root(&self, key: &str) -> Option<Arc<Node>> {
		self.roots.load().get(key).map(|slot| slot.root.load_full())
	}

	/// Number of replacement decisions stored across all keys.
	pub fn rule_count(&self) -> usize {
		self.roots.load().values().map(|slot| slot.root.load().rule_count()).sum()
	}

	/// Deepest path stored under any key, counting the key itself.
	pub fn max_depth(&self) -> usize {
		self.roots
			.load()
			.values()
			.map(|slot| 1 + slot.root.load().depth())
			.max()
			.unwrap_or(0)
	}
}

impl RootLookup for RuleTable {
	fn root(&self, key: &str) -> Option<Arc<Node>> {
		RuleTable::root(self, key)
	}
}
