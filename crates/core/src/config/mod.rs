//! Rule files.
//!
//! Rules can be kept in a TOML file and applied to a [`RuleTable`] at
//! startup:
//!
//! ```toml
//! [[rule]]
//! pattern = "java.util.*"
//! replacement = "Java"
//!
//! [[rule]]
//! pattern = "org.jetbrains.annotations.*~"
//! ```
//!
//! An omitted `replacement` keeps only the surviving part of the name.

use std::path::Path;

use serde::Deserialize;

use crate::error::ConfigError;
use crate::table::RuleTable;

#[cfg(test)]
mod tests;

/// One `[[rule]]` entry.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RuleSpec {
	pub pattern: String,
	#[serde(default)]
	pub replacement: Option<String>,
}

/// Parsed rule file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RuleFile {
	#[serde(default, rename = "rule")]
	pub rules: Vec<RuleSpec>,
}

/// Outcome of [`RuleFile::apply`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ApplyReport {
	/// Rules that created a new top-level entry.
	pub created: usize,
	/// Rules merged into an existing entry.
	pub merged: usize,
}

impl RuleFile {
	/// Parses a rule file from TOML text.
	pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
		Ok(toml::from_str(text)?)
	}

	/// Reads and parses the rule file at `path`.
	pub fn load(path: &Path) -> Result<Self, ConfigError> {
		let text = std::fs::read_to_string(path).map_err(|error| ConfigError::Io {
			path: path.to_path_buf(),
			error,
		})?;
		let file = Self::from_toml_str(&text)?;
		tracing::debug!(path = %path.display(), rules = file.rules.len(), "rule file loaded");
		Ok(file)
	}

	/// Registers every rule into `table`, in file order.
	///
	/// Stops at the first invalid rule; rules before it stay registered.
	pub fn apply(&self, table: &RuleTable) -> Result<ApplyReport, ConfigError> {
		let mut report = ApplyReport::default();
		for (index, spec) in self.rules.iter().enumerate() {
			let created = table
				.register(&spec.pattern, spec.replacement.as_deref())
				.map_err(|source| ConfigError::Rule {
					index,
					pattern: spec.pattern.clone(),
					source,
				})?;
			if created {
				report.created += 1;
			} else {
				report.merged += 1;
			}
		}
		Ok(report)
	}
}
