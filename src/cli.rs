//! Command line interface definition using clap.
//!
//! This module defines the [`Cli`] structure. Every option has a default
//! declared here, so a parsed [`Cli`] is the complete run configuration.

use crate::dot_gen::LayoutHints;
use crate::ir::GraphOptions;
use camino::Utf8PathBuf;
use clap::{ArgAction, Parser};
use tracing::Level;

/// Output format rendered when `--format` is not given.
pub const DEFAULT_FORMAT: &str = "pdf";
/// Output base name used when `--out` is not given.
pub const DEFAULT_OUT: &str = "antgraph";
/// Layout direction used when `--rankdir` is not given.
pub const DEFAULT_RANKDIR: &str = "LR";
/// Edge routing used when `--splines` is not given.
pub const DEFAULT_SPLINES: &str = "ortho";

/// Draw the targets of one or more Ant build files, with their dependencies
/// and the calls between them, using Graphviz.
#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None, disable_help_flag = true)]
pub struct Cli {
    /// Ant build files to read, in the order their subgraphs are drawn.
    #[arg(value_name = "FILE")]
    pub files: Vec<Utf8PathBuf>,

    /// Output formats; repeat the flag or separate values with commas.
    #[arg(
        short,
        long,
        value_name = "FMT",
        value_delimiter = ',',
        default_value = DEFAULT_FORMAT
    )]
    pub format: Vec<String>,

    /// Output base name; each format is written to `<name>.<format>`.
    #[arg(short, long, value_name = "NAME", default_value = DEFAULT_OUT)]
    pub out: Utf8PathBuf,

    /// Include the legend (the default).
    #[arg(long, overrides_with = "no_legend")]
    pub legend: bool,

    /// Leave the legend out.
    #[arg(long = "no-legend", overrides_with = "legend")]
    pub no_legend: bool,

    /// Layout direction passed to Graphviz (`rankdir`).
    #[arg(short, long, value_name = "DIR", default_value = DEFAULT_RANKDIR)]
    pub rankdir: String,

    /// Edge routing style passed to Graphviz (`splines`).
    #[arg(short, long, value_name = "STYLE", default_value = DEFAULT_SPLINES)]
    pub splines: String,

    /// Only log errors.
    #[arg(short, long)]
    pub quiet: bool,

    /// Increase logging verbosity; repeat for more detail.
    #[arg(short = 'v', long = "verbosity", action = ArgAction::Count)]
    pub verbosity: u8,

    /// Also write the generated DOT text to this file (`-` for stdout).
    #[arg(long, value_name = "FILE")]
    pub emit_dot: Option<Utf8PathBuf>,

    /// Skip build files that fail to parse instead of stopping.
    #[arg(long)]
    pub keep_going: bool,

    /// Print help.
    #[arg(short = 'h', long, short_alias = '?', action = ArgAction::Help)]
    pub help: Option<bool>,
}

impl Cli {
    /// Whether the legend subgraph should be drawn.
    #[must_use]
    pub const fn legend_enabled(&self) -> bool {
        !self.no_legend
    }

    /// Graph assembly options derived from the flags.
    #[must_use]
    pub const fn graph_options(&self) -> GraphOptions {
        GraphOptions {
            legend: self.legend_enabled(),
        }
    }

    /// Layout hints derived from `--rankdir` and `--splines`.
    #[must_use]
    pub fn layout_hints(&self) -> LayoutHints {
        LayoutHints {
            rankdir: self.rankdir.clone(),
            splines: self.splines.clone(),
        }
    }

    /// Requested formats with surrounding whitespace and empty entries removed.
    #[must_use]
    pub fn requested_formats(&self) -> Vec<String> {
        self.format
            .iter()
            .map(|f| f.trim())
            .filter(|f| !f.is_empty())
            .map(str::to_owned)
            .collect()
    }

    /// Maximum log level for the `--quiet` and `--verbosity` flags.
    #[must_use]
    pub const fn log_level(&self) -> Level {
        if self.quiet {
            return Level::ERROR;
        }
        match self.verbosity {
            0 => Level::WARN,
            1 => Level::INFO,
            2 => Level::DEBUG,
            _ => Level::TRACE,
        }
    }
}

impl Default for Cli {
    fn default() -> Self {
        Self {
            files: Vec::new(),
            format: vec![DEFAULT_FORMAT.to_owned()],
            out: Utf8PathBuf::from(DEFAULT_OUT),
            legend: false,
            no_legend: false,
            rankdir: DEFAULT_RANKDIR.to_owned(),
            splines: DEFAULT_SPLINES.to_owned(),
            quiet: false,
            verbosity: 0,
            emit_dot: None,
            keep_going: false,
            help: None,
        }
    }
}
