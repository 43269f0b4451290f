// SPDX-License-Identifier: MIT OR Apache-2.0
//! # jsonmatch-cli
//!
//! Command-line front end for jsonmatch.
//!
//! ## Usage
//!
//! ```bash
//! # Check a response against an expected tree
//! jsonmatch check expected.json response.json
//!
//! # Read the actual document from stdin, report every mismatch as JSON
//! curl -s https://example.test/api | jsonmatch check expected.json - --collect-all --format json
//!
//! # Tester options from a file
//! jsonmatch check --config options.json expected.json actual.json
//!
//! # List the directive tokens
//! jsonmatch directives
//! ```
//!
//! ## Exit status
//!
//! | Code | Meaning |
//! |------|---------|
//! | 0 | The actual document satisfies the expected one |
//! | 1 | Mismatch |
//! | 2 | Unreadable input, bad JSON or a rejected directive |

#![warn(missing_docs)]

use anyhow::Context as _;
use clap::ValueEnum;
use jsonmatch::{MismatchError, Registry, Tester, TesterOptions, Value};
use std::fs;
use std::io::{self, Read};
use std::path::Path;
use tracing::debug;

/// Re-export of the jsonmatch umbrella crate.
pub use jsonmatch as matcher;

/// Exit status for a usage, input or decoding error
pub const EXIT_ERROR: i32 = 2;

/// Report format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Format {
    /// `ok`, or one mismatch per line
    #[default]
    Text,
    /// A JSON array of `{path, message}` objects
    Json,
}

/// Result of a check that ran to completion
#[derive(Debug)]
pub enum Outcome {
    /// Every expectation held
    Satisfied,
    /// The mismatches, in traversal order
    Mismatched(Vec<MismatchError>),
}

impl Outcome {
    /// Process exit status for this outcome
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Satisfied => 0,
            Self::Mismatched(_) => 1,
        }
    }
}

/// Read `path`, or stdin when it is `-`
///
/// # Errors
///
/// Any I/O failure, with the path attached.
pub fn read_input(path: &Path) -> anyhow::Result<String> {
    if path.as_os_str() == "-" {
        let mut input = String::new();
        io::stdin()
            .read_to_string(&mut input)
            .context("reading stdin")?;
        return Ok(input);
    }
    fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))
}

/// Tester options from an optional JSON file, with command-line overrides
///
/// # Errors
///
/// An unreadable config file or one with unknown fields.
pub fn load_options(
    config: Option<&Path>,
    collect_all: bool,
    threshold: Option<i64>,
) -> anyhow::Result<TesterOptions> {
    let mut options = match config {
        Some(path) => {
            let text = read_input(path)?;
            serde_json::from_str(&text)
                .with_context(|| format!("parsing options from {}", path.display()))?
        }
        None => TesterOptions::default(),
    };
    if collect_all {
        options = options.with_collect_all();
    }
    if let Some(threshold) = threshold {
        options = options.with_linear_scan_threshold(threshold);
    }
    debug!(?options, "tester options");
    Ok(options)
}

/// Decode both documents and compare them
///
/// # Errors
///
/// Malformed JSON on either side or a rejected directive in `expected`.
pub fn check(
    registry: &Registry,
    tester: &Tester,
    expected: &str,
    actual: &str,
) -> anyhow::Result<Outcome> {
    let expected = registry
        .decode_str(expected)
        .context("decoding expected document")?;
    let actual: serde_json::Value =
        serde_json::from_str(actual).context("parsing actual document")?;
    let actual = Value::from(actual);
    Ok(match tester.test(&expected, &actual) {
        Ok(()) => Outcome::Satisfied,
        Err(err) => Outcome::Mismatched(err.into_mismatches()),
    })
}

/// Render an outcome for stdout
///
/// # Errors
///
/// JSON serialization failure.
pub fn render(outcome: &Outcome, format: Format) -> anyhow::Result<String> {
    let mismatches: &[MismatchError] = match outcome {
        Outcome::Satisfied => &[],
        Outcome::Mismatched(list) => list,
    };
    match format {
        Format::Text if mismatches.is_empty() => Ok("ok\n".to_owned()),
        Format::Text => Ok(mismatches.iter().map(|m| format!("{m}\n")).collect()),
        Format::Json => {
            let mut out = serde_json::to_string_pretty(mismatches)?;
            out.push('\n');
            Ok(out)
        }
    }
}
