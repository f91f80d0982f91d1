use std::{env, path::Path};

use log::LevelFilter;
use tour_derive::{CliOptions, CliValue, KvDisplay};

use crate::{Error, FrontierOrder, Result, Weight, generator::MAX_GENERATED_NODES, solver::Algorithm};

/// Runtime options for a single solve.
#[derive(Clone, Debug, CliOptions, KvDisplay)]
pub struct SolverOptions {
    /// Tour-construction algorithm to run.
    #[cli(long = "algorithm", parse_with = "Algorithm::parse")]
    pub algorithm: Algorithm,
    /// Candidate ordering used by the exact search.
    #[cli(long = "frontier-order", parse_with = "FrontierOrder::parse")]
    pub frontier_order: FrontierOrder,
    /// Seed for edge elimination and the graph generator. Omit for a fresh one.
    #[cli(long = "seed", parse_with = "parse_seed", value = "<u64>")]
    #[kv(fmt = "debug")]
    pub seed: Option<u64>,
    /// Generate a complete graph with this many nodes instead of reading input. 0 reads input.
    #[cli(long = "nodes")]
    pub nodes: usize,
    /// Largest edge weight drawn by the generator.
    #[cli(long = "max-weight")]
    pub max_weight: Weight,
    /// Report every edge a solver commits to at trace level.
    #[cli(long = "trace-steps", flag)]
    pub trace_steps: bool,
    /// Structured logging level.
    #[cli(long = "log-level", parse_with = "LogLevel::parse")]
    pub log_level: LogLevel,
    /// Logging output format.
    #[cli(long = "log-format", parse_with = "LogFormat::parse")]
    pub log_format: LogFormat,
    /// Include timestamps in log lines.
    #[cli(long = "log-timestamp", flag)]
    pub log_timestamp: bool,
    /// Optional output file path for logs and metrics. Empty means stderr.
    #[cli(long = "log-output")]
    #[kv(fmt = "or_dash")]
    pub log_output: String,
    /// Optional CSV edge list to read. Empty means stdin.
    #[cli(long = "input")]
    #[kv(fmt = "or_dash")]
    pub input: String,
    /// Optional output file path for the tour. Empty means stdout.
    #[cli(long = "output")]
    #[kv(fmt = "or_dash")]
    pub output: String,
    /// Optional CSV file the solved graph is written to.
    #[cli(long = "export")]
    #[kv(fmt = "or_dash")]
    pub export: String,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, CliValue)]
#[cli_value(option = "log-level")]
pub enum LogLevel {
    Error,
    #[cli(alias = "warning")]
    Warn,
    Info,
    Debug,
    Trace,
    Off,
}

impl LogLevel {
    pub fn to_filter(self) -> LevelFilter {
        match self {
            Self::Error => LevelFilter::Error,
            Self::Warn => LevelFilter::Warn,
            Self::Info => LevelFilter::Info,
            Self::Debug => LevelFilter::Debug,
            Self::Trace => LevelFilter::Trace,
            Self::Off => LevelFilter::Off,
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, CliValue)]
#[cli_value(option = "log-format")]
pub enum LogFormat {
    Compact,
    Pretty,
}

impl Default for SolverOptions {
    fn default() -> Self {
        Self {
            algorithm: Algorithm::NearestNeighbor,
            frontier_order: FrontierOrder::EdgeWeight,
            seed: None,
            nodes: 0,
            max_weight: 100,
            trace_steps: false,
            log_level: LogLevel::Warn,
            log_format: LogFormat::Compact,
            log_timestamp: true,
            log_output: String::new(),
            input: String::new(),
            output: String::new(),
            export: String::new(),
        }
    }
}

impl SolverOptions {
    pub fn from_args() -> Result<Self> {
        Self::parse_from_iter(env::args().skip(1))
    }

    pub fn parse_from_iter<I, S>(args: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut options = Self::default();
        let mut args = args
            .into_iter()
            .map(|arg| arg.as_ref().to_owned())
            .peekable();

        while let Some(arg) = args.next() {
            if arg == "--help" || arg == "-h" {
                return Err(Error::invalid_input(Self::usage()));
            }

            let Some(raw_name) = arg.strip_prefix("--") else {
                return Err(Error::invalid_input(format!(
                    "Unexpected argument: {arg}\n\n{}",
                    Self::usage()
                )));
            };

            if raw_name.is_empty() {
                return Err(Error::invalid_input(format!(
                    "Invalid option name: {arg}\n\n{}",
                    Self::usage()
                )));
            }

            let (name, value) = Self::split_arg(raw_name, &mut args);
            if !options.apply_cli_option(&name, value)? {
                return Err(Error::invalid_input(format!(
                    "Unknown option: --{name}\n\n{}",
                    Self::usage()
                )));
            }
        }

        options.validate()?;
        Ok(options)
    }

    fn validate(&self) -> Result<()> {
        if self.nodes > MAX_GENERATED_NODES {
            return Err(Error::invalid_input(format!(
                "--nodes must be at most {MAX_GENERATED_NODES}, got {}",
                self.nodes
            )));
        }
        if self.max_weight == 0 {
            return Err(Error::invalid_input("--max-weight must be at least 1"));
        }
        if self.nodes > 0 && !self.input.trim().is_empty() {
            return Err(Error::invalid_input(
                "--nodes and --input are mutually exclusive",
            ));
        }
        Ok(())
    }

    pub fn usage() -> String {
        let mut out = String::from(concat!(
            "Usage:\n",
            "  tsp-tour [options] [--input graph.csv]\n",
            "  tsp-tour [options] < graph.csv\n",
            "  tsp-tour [options] --nodes <n>\n\n",
            "Options:\n",
        ));
        out.push_str(&Self::options_usage());
        out.push_str(concat!(
            "  --help\n",
            "\n",
            "Examples:\n",
            "  tsp-tour --algorithm exact --input graph.csv\n",
            "  tsp-tour --algorithm=edge-elimination --seed=7 < graph.csv\n",
            "  tsp-tour --nodes 200 --max-weight 50 --export graph.csv --log-level=info\n",
            "  tsp-tour --algorithm=exact --frontier-order=path-cost --trace-steps --log-level=trace < graph.csv\n",
        ));
        out
    }

    pub fn log_output_path(&self) -> Option<&Path> {
        optional_path(&self.log_output)
    }

    pub fn output_path(&self) -> Option<&Path> {
        optional_path(&self.output)
    }

    pub fn input_path(&self) -> Option<&Path> {
        optional_path(&self.input)
    }

    pub fn export_path(&self) -> Option<&Path> {
        optional_path(&self.export)
    }
}

fn optional_path(raw: &str) -> Option<&Path> {
    let raw = raw.trim();
    if raw.is_empty() || raw == "-" {
        None
    } else {
        Some(Path::new(raw))
    }
}

fn parse_seed(raw: &str) -> Result<Option<u64>> {
    raw.trim()
        .parse::<u64>()
        .map(Some)
        .map_err(|e| Error::invalid_input(format!("Invalid value for --seed: {raw} ({e})")))
}
