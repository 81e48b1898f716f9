//! Prefix-rule rewriting of dotted hierarchical names.
//!
//! Rules map verbose namespaces to compact display names:
//!
//! | rule | name | result |
//! |---|---|---|
//! | `java.util.*` → `Java` | `java.util.logging.Logger` | `Java.Logger` |
//! | `java.util.*~` → `Java` | `java.util.logging.Logger` | `Java.java.util` |
//! | `java.util.logging.Logger` → none | `java.util.logging.Logger` | `Logger` |
//! | `java.util.logging.Logger` → none | `java.util.logging.Level` | unchanged |
//!
//! Rules are compiled into trie fragments ([`pattern`]), merged per top-level
//! segment ([`node`]) inside a lock-free [`RuleTable`], and names are
//! rewritten by walking the trie ([`resolve`]). Rule files live in
//! [`config`]; [`cache`] is the handle cache that sits in front of a logging
//! backend.

pub mod cache;
pub mod config;
mod error;
pub mod node;
pub mod pattern;
pub mod resolve;
mod table;

pub use cache::{Backend, NamedCache, NamedLogger, TracingBackend};
pub use config::{ApplyReport, RuleFile, RuleSpec};
pub use error::{ConfigError, Result, RuleError};
pub use node::{Branch, Node, Replacement, Terminal, merge};
pub use pattern::{Compiled, PatternKind, compile};
pub use resolve::Match;
pub use table::RuleTable;
