//! Error types for rule compilation and rule files.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while compiling or registering a rule.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuleError {
	/// A segment of the pattern is empty or whitespace-only.
	#[error("invalid pattern {pattern:?}: segment {position} is empty")]
	EmptySegment { pattern: String, position: usize },

	/// The replacement was given but contains nothing besides whitespace.
	#[error("invalid pattern {pattern:?}: replacement must not be blank")]
	BlankReplacement { pattern: String },

	/// A wildcard marker was found before the final segment.
	#[error("invalid pattern {pattern:?}: wildcard at segment {position} must be the last segment")]
	MisplacedWildcard { pattern: String, position: usize },

	/// A node was accessed as the wrong variant.
	#[error("unsupported operation: expected {expected} node, found {found}")]
	UnsupportedOperation {
		expected: &'static str,
		found: &'static str,
	},
}

impl RuleError {
	/// Returns `true` for errors caused by a malformed pattern or replacement.
	pub fn is_invalid_pattern(&self) -> bool {
		!matches!(self, Self::UnsupportedOperation { .. })
	}
}

/// Errors raised while loading a rule file.
#[derive(Debug, Error)]
pub enum ConfigError {
	/// Error reading a rule file.
	#[error("I/O error reading {path}: {error}")]
	Io {
		/// Path to the file that failed to read.
		path: PathBuf,
		/// The underlying I/O error.
		error: std::io::Error,
	},

	/// The file is not valid TOML or does not match the rule schema.
	#[error("TOML parse error: {0}")]
	Toml(#[from] toml::de::Error),

	/// A rule in the file was rejected by the compiler.
	#[error("rule #{index} ({pattern:?}): {source}")]
	Rule {
		/// Zero-based position of the rule in the file.
		index: usize,
		pattern: String,
		#[source]
		source: RuleError,
	},
}

/// Result type for rule operations.
pub type Result<T> = std::result::Result<T, RuleError>;
