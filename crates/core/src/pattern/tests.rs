use super::*;

fn child<'a>(node: &'a Node, segment: &str) -> &'a Node {
	node.as_branch().unwrap().child(segment).unwrap()
}

#[test]
fn test_exact_pattern_ends_in_leaf_under_last_segment() {
	let compiled = compile("a.b.C", Some("X")).unwrap();
	assert_eq!(&*compiled.top_key, "a");
	assert_eq!(compiled.kind, PatternKind::Exact);

	let c = child(child(&compiled.fragment, "b"), "C");
	assert_eq!(c.as_leaf().unwrap(), &Replacement::Prefixed(Box::from("X")));
	assert_eq!(compiled.fragment.depth(), 3);
}

#[test]
fn test_single_segment_exact_pattern_is_a_leaf() {
	let compiled = compile("Main", None).unwrap();
	assert_eq!(&*compiled.top_key, "Main");
	assert_eq!(compiled.fragment.as_leaf().unwrap(), &Replacement::Bare);
}

#[test]
fn test_wildcard_anchors_on_preceding_segment() {
	let compiled = compile("a.b.*", Some("X")).unwrap();
	assert_eq!(&*compiled.top_key, "a");
	assert_eq!(compiled.kind, PatternKind::Wildcard { conserve: false });

	let b = child(&compiled.fragment, "b").as_branch().unwrap();
	assert_eq!(b.children().count(), 0);
	assert_eq!(
		b.terminal(),
		Some(&Terminal::new(Replacement::Prefixed(Box::from("X")), false))
	);
}

#[test]
fn test_conserving_wildcard() {
	let compiled = compile("a.b.*~", None).unwrap();
	assert_eq!(compiled.kind, PatternKind::Wildcard { conserve: true });

	let b = child(&compiled.fragment, "b").as_branch().unwrap();
	assert_eq!(b.terminal(), Some(&Terminal::new(Replacement::Bare, true)));
}

#[test]
fn test_two_segment_wildcard_puts_terminal_at_root() {
	let compiled = compile("a.*", Some("X")).unwrap();
	assert_eq!(&*compiled.top_key, "a");
	let root = compiled.fragment.as_branch().unwrap();
	assert!(root.terminal().is_some());
	assert_eq!(root.children().count(), 0);
}

#[test]
fn test_bare_marker_is_catch_all() {
	for marker in [WILDCARD, CONSERVING_WILDCARD] {
		let compiled = compile(marker, Some("Short")).unwrap();
		assert_eq!(&*compiled.top_key, CATCH_ALL);
		assert!(compiled.fragment.as_branch().unwrap().terminal().is_some());
	}
}

#[test]
fn test_empty_segments_rejected() {
	for (pattern, position) in [("", 0), ("a..b", 1), ("a.b.", 2), (".a", 0), ("a. .b", 1)] {
		let err = compile(pattern, None).unwrap_err();
		assert_eq!(
			err,
			RuleError::EmptySegment {
				pattern: pattern.to_string(),
				position
			}
		);
		assert!(err.is_invalid_pattern());
	}
}

#[test]
fn test_misplaced_wildcard_rejected() {
	let err = compile("a.*.b", None).unwrap_err();
	assert_eq!(
		err,
		RuleError::MisplacedWildcard {
			pattern: "a.*.b".to_string(),
			position: 1
		}
	);
	assert!(compile("a.*~.*", None).is_err());
}

#[test]
fn test_replacement_whitespace_removed() {
	assert_eq!(
		normalize_replacement("p", Some(" Ja va ")).unwrap(),
		Replacement::Prefixed(Box::from("Java"))
	);
	assert_eq!(normalize_replacement("p", None).unwrap(), Replacement::Bare);
}

#[test]
fn test_blank_replacement_rejected() {
	for blank in ["", "   ", "\t\n"] {
		let err = compile("a.b", Some(blank)).unwrap_err();
		assert_eq!(
			err,
			RuleError::BlankReplacement {
				pattern: "a.b".to_string()
			}
		);
	}
}
