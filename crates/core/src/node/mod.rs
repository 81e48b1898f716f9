//! Trie nodes and the merge engine.
//!
//! A rule is stored as a path of [`Branch`] nodes keyed by segment. Exact
//! rules end in a [`Node::Leaf`]; wildcard rules end in a branch carrying a
//! [`Terminal`]. Nodes are never mutated once they are reachable from a
//! published table: [`merge`] builds a new tree that shares every subtree it
//! did not touch with its inputs.

use std::sync::Arc;

use rustc_hash::FxHashMap as HashMap;

use crate::error::{Result, RuleError};


/// Text placed in front of the surviving part of a rewritten name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Replacement {
	/// Nothing is prepended; only the surviving part is kept.
	Bare,
	/// Prepended to the surviving part, followed by a separator.
	Prefixed(Box<str>),
}

impl Replacement {
	/// Returns the prefix text, if any.
	pub fn prefix(&self) -> Option<&str> {
		match self {
			Self::Bare => None,
			Self::Prefixed(text) => Some(text),
		}
	}
}

/// Replacement attached to a branch by a wildcard rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Terminal {
	pub replacement: Replacement,
	/// Keep the consumed segments instead of collapsing them.
	pub conserve: bool,
}

impl Terminal {
	pub fn new(replacement: Replacement, conserve: bool) -> Self {
		Self { replacement, conserve }
	}
}

/// Interior trie node.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Branch {
	children: HashMap<Box<str>, Arc<Node>>,
	terminal: Option<Terminal>,
}

impl Branch {
	/// Creates an empty branch with no children and no terminal.
	pub fn new() -> Self {
		Self::default()
	}

	/// Creates a childless branch carrying `terminal`.
	pub fn with_terminal(terminal: Terminal) -> Self {
		Self {
			children: HashMap::default(),
			terminal: Some(terminal),
		}
	}

	/// Creates a branch whose only child is `child`, keyed by `segment`.
	pub fn wrap(segment: &str, child: Arc<Node>) -> Self {
		let mut children = HashMap::default();
		children.insert(Box::from(segment), child);
		Self {
			children,
			terminal: None,
		}
	}

	#[inline]
	pub fn child(&self, segment: &str) -> Option<&Arc<Node>> {
		self.children.get(segment)
	}

	pub fn children(&self) -> impl Iterator<Item = (&str, &Arc<Node>)> {
		self.children.iter().map(|(k, v)| (&**k, v))
	}

	#[inline]
	pub fn terminal(&self) -> Option<&Terminal> {
		self.terminal.as_ref()
	}

	/// Folds `incoming` into `self`.
	///
	/// The incoming terminal, when present, replaces ours. Children present on
	/// both sides are merged recursively; the rest are shared as-is.
	fn absorb(&mut self, incoming: &Branch) {
		if let Some(terminal) = &incoming.terminal {
			self.terminal = Some(terminal.clone());
		}
		for (segment, node) in &incoming.children {
			let merged = match self.children.get(segment) {
				Some(existing) => merge(existing, node),
				None => Arc::clone(node),
			};
			self.children.insert(segment.clone(), merged);
		}
	}
}

/// A node of the rule trie.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
	Branch(Branch),
	/// End of an exact rule. Never conserves.
	Leaf(Replacement),
}

impl Node {
	fn kind(&self) -> &'static str {
		match self {
			Self::Branch(_) => "branch",
			Self::Leaf(_) => "leaf",
		}
	}

	/// Views this node as a branch.
	///
	/// # Errors
	///
	/// Returns [`RuleError::UnsupportedOperation`] for a leaf.
	pub fn as_branch(&self) -> Result<&Branch> {
		match self {
			Self::Branch(branch) => Ok(branch),
			Self::Leaf(_) => Err(RuleError::UnsupportedOperation {
				expected: "branch",
				found: self.kind(),
			}),
		}
	}

	/// Views this node as a leaf, returning its replacement.
	///
	/// # Errors
	///
	/// Returns [`RuleError::UnsupportedOperation`] for a branch.
	pub fn as_leaf(&self) -> Result<&Replacement> {
		match self {
			Self::Leaf(replacement) => Ok(replacement),
			Self::Branch(_) => Err(RuleError::UnsupportedOperation {
				expected: "leaf",
				found: self.kind(),
			}),
		}
	}

	/// Length of the longest path below and including this node.
	pub fn depth(&self) -> usize {
		match self {
			Self::Leaf(_) => 1,
			Self::Branch(branch) => 1 + branch.children.values().map(|c| c.depth()).max().unwrap_or(0),
		}
	}

	/// Number of replacement decisions (leaves and terminals) stored in this subtree.
	pub fn rule_count(&self) -> usize {
		match self {
			Self::Leaf(_) => 1,
			Self::Branch(branch) => {
				usize::from(branch.terminal.is_some()) + branch.children.values().map(|c| c.rule_count()).sum::<usize>()
			}
		}
	}
}

/// Merges `incoming` into `existing`, returning the combined node.
///
/// | existing | incoming | result |
/// |---|---|---|
/// | leaf | leaf | incoming replacement wins |
/// | branch | branch | incoming terminal wins if set, children merged |
/// | branch | leaf | leaf replacement becomes the terminal (non-conserving) |
/// | leaf | branch | leaf promoted to a branch, then merged as above |
///
/// Neither input is modified.
pub fn merge(existing: &Arc<Node>, incoming: &Arc<Node>) -> Arc<Node> {
	match (&**existing, &**incoming) {
		(Node::Leaf(_), Node::Leaf(_)) => Arc::clone(incoming),
		(Node::Branch(branch), Node::Branch(other)) => {
			let mut merged = branch.clone();
			merged.absorb(other);
			Arc::new(Node::Branch(merged))
		}
		(Node::Branch(branch), Node::Leaf(replacement)) => {
			let mut merged = branch.clone();
			merged.terminal = Some(Terminal::new(replacement.clone(), false));
			Arc::new(Node::Branch(merged))
		}
		(Node::Leaf(replacement), Node::Branch(other)) => {
			let mut promoted = Branch::with_terminal(Terminal::new(replacement.clone(), false));
			promoted.absorb(other);
			Arc::new(Node::Branch(promoted))
		}
	}
}
