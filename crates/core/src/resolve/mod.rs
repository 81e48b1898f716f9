//! Resolver and name builder.
//!
//! Resolution splits a name into segments, picks the root fragment for its
//! first segment (or the catch-all rule for single-segment names), walks the
//! trie and rewrites the name from the resulting [`Match`]. Resolution never
//! fails: anything unmatched comes back unchanged.

use std::borrow::Cow;
use std::sync::Arc;

use rustc_hash::FxHashMap as HashMap;

use crate::node::{Node, Replacement};
use crate::pattern::{CATCH_ALL, SEPARATOR};


static BARE: Replacement = Replacement::Bare;

/// Decision produced by walking a name through the trie.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Match<'a> {
	pub replacement: &'a Replacement,
	/// Keep the consumed segments instead of collapsing them.
	pub conserve: bool,
	/// Segment index at which the decision was made.
	pub depth: usize,
}

/// Source of root fragments keyed by top-level segment.
pub trait RootLookup {
	fn root(&self, key: &str) -> Option<Arc<Node>>;
}

impl RootLookup for HashMap<Box<str>, Arc<Node>> {
	fn root(&self, key: &str) -> Option<Arc<Node>> {
		self.get(key).cloned()
	}
}

/// Splits `name` into segments, or `None` when any segment is empty.
pub fn split(name: &str) -> Option<Vec<&str>> {
	let segments: Vec<&str> = name.split(SEPARATOR).collect();
	if segments.iter().any(|s| s.is_empty()) {
		return None;
	}
	Some(segments)
}

/// Walks `segments` from `root`, which has already consumed `segments[0]`.
///
/// Children take precedence over a branch's own terminal. A leaf reached
/// after consuming the name's last segment yields its replacement; a leaf
/// reached earlier yields a bare match that collapses the name to its last
/// segment.
pub fn walk<'a>(root: &'a Node, segments: &[&str]) -> Option<Match<'a>> {
	let mut node = root;
	let mut index = 1;
	loop {
		match node {
			Node::Branch(branch) => {
				if let Some(child) = segments.get(index).and_then(|s| branch.child(s)) {
					node = &**child;
					index += 1;
					continue;
				}
				return branch.terminal().map(|t| Match {
					replacement: &t.replacement,
					conserve: t.conserve,
					depth: index,
				});
			}
			Node::Leaf(replacement) => {
				let replacement = if index == segments.len() { replacement } else { &BARE };
				return Some(Match {
					replacement,
					conserve: false,
					depth: index,
				});
			}
		}
	}
}

/// Composes the rewritten name for `matched`.
///
/// Conserving matches keep the replacement followed by the segments consumed
/// before the match point; anything past it is dropped. Other matches keep
/// only the replacement and the last segment.
pub fn build(segments: &[&str], matched: &Match<'_>) -> String {
	let mut out = String::new();
	if let Some(prefix) = matched.replacement.prefix() {
		out.push_str(prefix);
		out.push(SEPARATOR);
	}

	if matched.conserve {
		let kept = &segments[..matched.depth.min(segments.len())];
		for (i, segment) in kept.iter().enumerate() {
			if i > 0 {
				out.push(SEPARATOR);
			}
			out.push_str(segment);
		}
	} else if let Some(last) = segments.last() {
		out.push_str(last);
	}
	out
}

/// Rewrites `name` against the fragments in `roots`.
pub fn resolve<'n, R>(roots: &R, name: &'n str) -> Cow<'n, str>
where
	R: RootLookup + ?Sized,
{
	let Some(segments) = split(name) else {
		return Cow::Borrowed(name);
	};

	let root = if segments.len() == 1 {
		roots.root(CATCH_ALL).or_else(|| roots.root(segments[0]))
	} else {
		roots.root(segments[0])
	};
	let Some(root) = root else {
		return Cow::Borrowed(name);
	};

	match walk(&root, &segments) {
		Some(matched) => {
			let rewritten = build(&segments, &matched);
			tracing::trace!(name, %rewritten, depth = matched.depth, conserve = matched.conserve, "name rewritten");
			Cow::Owned(rewritten)
		}
		None => Cow::Borrowed(name),
	}
}
