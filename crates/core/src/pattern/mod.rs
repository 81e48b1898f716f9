//! Pattern compiler.
//!
//! Turns a textual rule into a trie fragment plus the top-level key the
//! fragment is stored under.
//!
//! ```text
//! pattern = segment ("." segment)* ["." marker]
//!         | marker
//! marker  = "*"    (wildcard, collapse the matched prefix)
//!         | "*~"   (wildcard, conserve the matched prefix)
//! ```
//!
//! A pattern without a marker is exact: it matches only a name whose every
//! segment it names. A lone marker is the catch-all rule consulted for
//! single-segment names.

use std::sync::Arc;

use crate::error::{Result, RuleError};
use crate::node::{Branch, Node, Replacement, Terminal};

#[cfg(test)]
mod tests;

/// Separator between segments of names and patterns.
pub const SEPARATOR: char = '.';
/// Final marker of a wildcard rule that collapses the matched prefix.
pub const WILDCARD: &str = "*";
/// Final marker of a wildcard rule that keeps the matched prefix.
pub const CONSERVING_WILDCARD: &str = "*~";
/// Table key of the rule consulted for single-segment names.
pub const CATCH_ALL: &str = "*";

/// How a compiled pattern matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatternKind {
	/// Every segment of the name must be named by the pattern.
	Exact,
	/// The pattern names a prefix; deeper names match too.
	Wildcard { conserve: bool },
}

/// Output of [`compile`].
#[derive(Debug, Clone)]
pub struct Compiled {
	/// First segment of the pattern, or [`CATCH_ALL`].
	pub top_key: Box<str>,
	/// Trie fragment starting at the second segment.
	pub fragment: Arc<Node>,
	pub kind: PatternKind,
}

/// Normalizes a replacement by removing all whitespace.
///
/// # Errors
///
/// Returns [`RuleError::BlankReplacement`] when `raw` is present but holds
/// nothing besides whitespace.
pub fn normalize_replacement(pattern: &str, raw: Option<&str>) -> Result<Replacement> {
	let Some(raw) = raw else {
		return Ok(Replacement::Bare);
	};
	let text: String = raw.chars().filter(|ch| !ch.is_whitespace()).collect();
	if text.is_empty() {
		return Err(RuleError::BlankReplacement {
			pattern: pattern.to_string(),
		});
	}
	Ok(Replacement::Prefixed(text.into_boxed_str()))
}

/// Compiles `pattern` with an optional `replacement` into a trie fragment.
///
/// # Errors
///
/// Returns an invalid-pattern [`RuleError`] when a segment is blank, the
/// replacement is blank, or a wildcard marker is not the final segment.
///
/// # Examples
///
/// ```
/// use shortname_core::pattern::{compile, PatternKind};
///
/// let compiled = compile("java.util.*", Some("Java")).unwrap();
/// assert_eq!(&*compiled.top_key, "java");
/// assert_eq!(compiled.kind, PatternKind::Wildcard { conserve: false });
/// ```
pub fn compile(pattern: &str, replacement: Option<&str>) -> Result<Compiled> {
	let replacement = normalize_replacement(pattern, replacement)?;

	let segments: Vec<&str> = pattern.split(SEPARATOR).collect();
	if let Some(position) = segments.iter().position(|s| s.trim().is_empty()) {
		return Err(RuleError::EmptySegment {
			pattern: pattern.to_string(),
			position,
		});
	}

	let (kind, anchors) = match segments.split_last() {
		Some((last, rest)) if *last == WILDCARD => (PatternKind::Wildcard { conserve: false }, rest),
		Some((last, rest)) if *last == CONSERVING_WILDCARD => (PatternKind::Wildcard { conserve: true }, rest),
		_ => (PatternKind::Exact, &segments[..]),
	};

	if let Some(position) = anchors.iter().position(|s| *s == WILDCARD || *s == CONSERVING_WILDCARD) {
		return Err(RuleError::MisplacedWildcard {
			pattern: pattern.to_string(),
			position,
		});
	}

	let end = match kind {
		PatternKind::Exact => Node::Leaf(replacement),
		PatternKind::Wildcard { conserve } => Node::Branch(Branch::with_terminal(Terminal::new(replacement, conserve))),
	};

	let Some((top, rest)) = anchors.split_first() else {
		return Ok(Compiled {
			top_key: Box::from(CATCH_ALL),
			fragment: Arc::new(end),
			kind,
		});
	};

	let fragment = rest
		.iter()
		.rev()
		.fold(Arc::new(end), |child, segment| Arc::new(Node::Branch(Branch::wrap(segment, child))));

	Ok(Compiled {
		top_key: Box::from(*top),
		fragment,
		kind,
	})
}
