#![forbid(unsafe_code)]

//! Shared environment constants used across antgraph crates (library, tests,
//! and helpers).

/// Environment variable override for the Graphviz `dot` executable.
///
/// # Examples
///
/// ```
/// use dot_env::DOT_ENV;
/// use std::process::Command;
///
/// let mut cmd = Command::new("antgraph");
/// cmd.env(DOT_ENV, "/usr/local/bin/dot");
/// assert_eq!(DOT_ENV, "ANTGRAPH_DOT");
/// ```
pub const DOT_ENV: &str = "ANTGRAPH_DOT";

/// Program name used when [`DOT_ENV`] is unset.
pub const DOT_PROGRAM: &str = "dot";
