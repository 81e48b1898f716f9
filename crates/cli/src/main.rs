//! `shortname` binary.
//!
//! Loads rule files and inline rules into a [`RuleTable`], then prints the
//! rewritten form of every name given on the command line, or of every line
//! read from stdin when no names are given.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use clap::Parser;
use shortname_core::{RuleFile, RuleTable};
use tracing::{debug, info};

/// Command line arguments.
#[derive(Parser, Debug)]
#[command(name = "shortname")]
#[command(about = "Rewrite dotted names into short display names")]
struct Args {
	/// TOML rule file, applied in the order given
	#[arg(short = 'f', long = "rules", value_name = "PATH")]
	rules: Vec<PathBuf>,

	/// Inline rule, `PATTERN` or `PATTERN=REPLACEMENT`, applied after rule files
	#[arg(short = 'r', long = "rule", value_name = "RULE")]
	rule: Vec<String>,

	/// Verbose logging
	#[arg(short, long)]
	verbose: bool,

	/// Names to rewrite
	names: Vec<String>,
}

/// Splits an inline rule into pattern and optional replacement.
fn parse_inline(rule: &str) -> (&str, Option<&str>) {
	match rule.split_once('=') {
		Some((pattern, replacement)) => (pattern.trim(), Some(replacement)),
		None => (rule.trim(), None),
	}
}

fn build_table(args: &Args) -> Result<RuleTable, Box<dyn std::error::Error>> {
	let table = RuleTable::new();

	for path in &args.rules {
		let report = RuleFile::load(path)?.apply(&table)?;
		info!(path = %path.display(), created = report.created, merged = report.merged, "rules applied");
	}

	for rule in &args.rule {
		let (pattern, replacement) = parse_inline(rule);
		table.register(pattern, replacement)?;
	}

	debug!(
		keys = table.len(),
		rules = table.rule_count(),
		max_depth = table.max_depth(),
		"rule table ready"
	);
	Ok(table)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
	let args = Args::parse();

	let subscriber = tracing_subscriber::fmt()
		.with_writer(io::stderr)
		.with_max_level(if args.verbose {
			tracing::Level::DEBUG
		} else {
			tracing::Level::WARN
		})
		.finish();

	tracing::subscriber::set_global_default(subscriber)?;

	let table = build_table(&args)?;

	let stdout = io::stdout();
	let mut out = stdout.lock();
	if args.names.is_empty() {
		for line in io::stdin().lock().lines() {
			let line = line?;
			let name = line.trim();
			if name.is_empty() {
				continue;
			}
			writeln!(out, "{}", table.resolve_cow(name))?;
		}
	} else {
		for name in &args.names {
			writeln!(out, "{}", table.resolve_cow(name))?;
		}
	}

	Ok(())
}
