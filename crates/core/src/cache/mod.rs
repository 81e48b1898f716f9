//! Named-object cache.
//!
//! A thin cache in front of a logging backend. Every lookup rewrites the
//! requested name exactly once through the shared [`RuleTable`], then hands
//! out the handle cached under the rewritten name, creating it on first use.
//! Names that rewrite to the same short name share one handle.

use std::sync::Arc;

use parking_lot::RwLock;
use rustc_hash::FxHashMap as HashMap;
use tracing::Level;

use crate::table::RuleTable;


/// Alias of the root logger, matched case-insensitively. The backend sees it
/// as the empty name.
pub const ROOT_LOGGER_NAME: &str = "ROOT";

/// Producer of named handles.
pub trait Backend: Send + Sync {
	type Handle: Send + Sync;

	/// First-time backend initialization. Runs once, when the cache is built.
	fn init(&self) {}

	/// Creates the handle for an already rewritten `name`.
	fn create(&self, name: &str) -> Self::Handle;
}

/// Cache of backend handles keyed by rewritten name.
pub struct NamedCache<B: Backend> {
	rules: Arc<RuleTable>,
	backend: B,
	handles: RwLock<HashMap<Box<str>, Arc<B::Handle>>>,
}

impl<B: Backend> NamedCache<B> {
	/// Initializes `backend` and wraps it in an empty cache.
	pub fn new(rules: Arc<RuleTable>, backend: B) -> Self {
		backend.init();
		Self {
			rules,
			backend,
			handles: RwLock::new(HashMap::default()),
		}
	}

	pub fn rules(&self) -> &Arc<RuleTable> {
		&self.rules
	}

	pub fn backend(&self) -> &B {
		&self.backend
	}

	/// Returns the handle for `name`, creating it if needed.
	///
	/// Concurrent first lookups of the same rewritten name observe a single
	/// handle.
	pub fn get(&self, name: &str) -> Arc<B::Handle> {
		let name = if name.eq_ignore_ascii_case(ROOT_LOGGER_NAME) { "" } else { name };
		let resolved = self.rules.resolve_cow(name);

		if let Some(handle) = self.handles.read().get(&*resolved) {
			return Arc::clone(handle);
		}

		let mut handles = self.handles.write();
		let handle = handles.entry(Box::from(&*resolved)).or_insert_with(|| {
			tracing::trace!(requested = name, short = %resolved, "creating handle");
			Arc::new(self.backend.create(&resolved))
		});
		Arc::clone(handle)
	}

	/// Number of distinct handles created so far.
	pub fn len(&self) -> usize {
		self.handles.read().len()
	}

	pub fn is_empty(&self) -> bool {
		self.handles.read().is_empty()
	}
}

/// Backend whose handles emit `tracing` events.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingBackend;

impl Backend for TracingBackend {
	type Handle = NamedLogger;

	fn init(&self) {
		tracing::debug!("tracing backend initialized");
	}

	fn create(&self, name: &str) -> NamedLogger {
		NamedLogger { name: Arc::from(name) }
	}
}

/// Logger handle tagging its events with a short name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamedLogger {
	name: Arc<str>,
}

impl NamedLogger {
	pub fn name(&self) -> &str {
		&self.name
	}

	pub fn log(&self, level: Level, message: &str) {
		let logger = &*self.name;
		match level {
			Level::TRACE => tracing::trace!(logger, "{message}"),
			Level::DEBUG => tracing::debug!(logger, "{message}"),
			Level::INFO => tracing::info!(logger, "{message}"),
			Level::WARN => tracing::warn!(logger, "{message}"),
			_ => tracing::error!(logger, "{message}"),
		}
	}

	pub fn trace(&self, message: &str) {
		self.log(Level::TRACE, message);
	}

	pub fn debug(&self, message: &str) {
		self.log(Level::DEBUG, message);
	}

	pub fn info(&self, message: &str) {
		self.log(Level::INFO, message);
	}

	pub fn warn(&self, message: &str) {
		self.log(Level::WARN, message);
	}

	pub fn error(&self, message: &str) {
		self.log(Level::ERROR, message);
	}
}
