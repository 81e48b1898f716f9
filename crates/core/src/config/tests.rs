use std::io::Write;

use super::*;
use crate::RuleError;

const RULES: &str = r#"
[[rule]]
pattern = "java.util.*"
replacement = "Java"

[[rule]]
pattern = "java.lang.*"

[[rule]]
pattern = "org.jetbrains.annotations.*~"
replacement = "JB"
"#;

#[test]
fn test_parse_rule_file() {
	let file = RuleFile::from_toml_str(RULES).unwrap();
	assert_eq!(file.rules.len(), 3);
	assert_eq!(
		file.rules[0],
		RuleSpec {
			pattern: "java.util.*".to_string(),
			replacement: Some("Java".to_string()),
		}
	);
	assert_eq!(file.rules[1].replacement, None);
}

#[test]
fn test_empty_file_has_no_rules() {
	assert_eq!(RuleFile::from_toml_str("").unwrap(), RuleFile::default());
}

#[test]
fn test_unknown_fields_rejected() {
	let err = RuleFile::from_toml_str("[[rule]]\npattern = \"a.*\"\nprefix = \"A\"\n").unwrap_err();
	assert!(matches!(err, ConfigError::Toml(_)));
}

#[test]
fn test_apply_registers_in_order() {
	let table = RuleTable::new();
	let report = RuleFile::from_toml_str(RULES).unwrap().apply(&table).unwrap();

	assert_eq!(report, ApplyReport { created: 2, merged: 1 });
	assert_eq!(table.resolve("java.util.logging.Logger"), "Java.Logger");
	assert_eq!(table.resolve("java.lang.String"), "String");
	assert_eq!(table.resolve("org.jetbrains.annotations.nullness.Nullable"), "JB.org.jetbrains.annotations");
}

#[test]
fn test_apply_stops_at_invalid_rule() {
	let file = RuleFile::from_toml_str(
		r#"
		[[rule]]
		pattern = "a.*"

		[[rule]]
		pattern = "b..c"

		[[rule]]
		pattern = "d.*"
		"#,
	)
	.unwrap();

	let table = RuleTable::new();
	let err = file.apply(&table).unwrap_err();
	match err {
		ConfigError::Rule { index, pattern, source } => {
			assert_eq!(index, 1);
			assert_eq!(pattern, "b..c");
			assert!(matches!(source, RuleError::EmptySegment { position: 1, .. }));
		}
		other => panic!("unexpected error: {other}"),
	}
	assert!(table.contains_key("a"));
	assert!(!table.contains_key("d"));
}

#[test]
fn test_load_from_disk() {
	let mut file = tempfile::NamedTempFile::new().unwrap();
	file.write_all(RULES.as_bytes()).unwrap();

	let loaded = RuleFile::load(file.path()).unwrap();
	assert_eq!(loaded.rules.len(), 3);
}

#[test]
fn test_load_missing_file() {
	let dir = tempfile::tempdir().unwrap();
	let path = dir.path().join("missing.toml");

	let err = RuleFile::load(&path).unwrap_err();
	assert!(matches!(err, ConfigError::Io { path: p, .. } if p == path));
}
