//! tcopy - tree copy
//!
//! Copy files and directory trees with depth bounds, flattening and
//! conflict policies, powered by treecopy.

mod output;

use clap::{Parser, ValueEnum};
use output::{LogMode, OutputMode, Presenter};
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing_subscriber::EnvFilter;
use treecopy::{
    CopyOptions, CopyStats, CopyTask, ErrorCode, OnConflict, Source, TaskConfig, run_configs,
    run_tasks,
};

/// tcopy - copy file trees with depth bounds, flattening and conflict policies
///
/// Usage:
///   tcopy SOURCE DEST
///   tcopy SOURCE... DIRECTORY
///   tcopy --tasks TASKS.json
#[derive(Parser, Debug)]
#[command(name = "tcopy", version, about, long_about = None)]
struct Args {
    /// Source path(s) followed by the destination
    ///
    /// A single source is copied onto DEST. With several sources, each one
    /// is copied to DEST/<source name> (or straight into DEST with --flatten).
    #[arg(required_unless_present = "tasks", value_name = "PATH")]
    paths: Vec<PathBuf>,

    /// Run the task list in FILE (JSON array of task objects, or one object)
    #[arg(
        short = 't',
        long = "tasks",
        value_name = "FILE",
        conflicts_with_all = ["paths", "max_depth", "max_height", "flatten", "on_conflict"]
    )]
    tasks: Option<PathBuf>,

    /// Maximum directory depth to enter (0 = unbounded)
    #[arg(long)]
    max_depth: Option<usize>,

    /// Maximum height (0 = unbounded)
    #[arg(long)]
    max_height: Option<usize>,

    /// Put every file directly under the destination
    #[arg(short = 'f', long)]
    flatten: bool,

    /// What to do when a destination file exists [default: overwrite]
    #[arg(short = 'c', long, value_enum)]
    on_conflict: Option<ConflictStrategy>,

    /// Do not call fsync after each file (faster but less safe)
    #[arg(long)]
    no_sync: bool,

    /// How to log each action in human output
    #[arg(long, value_enum, default_value = "symbols")]
    log: LogMode,

    /// Output format
    #[arg(long, value_enum, default_value = "human")]
    output: OutputMode,

    /// Disable the progress spinner
    #[arg(short = 'q', long)]
    quiet: bool,

    /// Verbose output (detailed summary and debug diagnostics)
    #[arg(short = 'v', long)]
    verbose: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ConflictStrategy {
    /// Replace existing files (default)
    Overwrite,
    /// Keep existing files
    Skip,
    /// Write alongside existing files as name_<n>.ext
    Rename,
}

impl From<ConflictStrategy> for OnConflict {
    fn from(s: ConflictStrategy) -> Self {
        match s {
            ConflictStrategy::Overwrite => OnConflict::Overwrite,
            ConflictStrategy::Skip => OnConflict::Skip,
            ConflictStrategy::Rename => OnConflict::Rename,
        }
    }
}

type CliResult<T> = std::result::Result<T, CliError>;

#[derive(Debug, Error)]
enum CliError {
    #[error("Missing destination operand after '{operand}'")]
    MissingDestinationOperand { operand: PathBuf },

    #[error("Failed to read task file: {path}: {source}")]
    ReadTaskFile { path: PathBuf, source: io::Error },

    #[error("Invalid task file: {path}: {source}")]
    ParseTaskFile {
        path: PathBuf,
        source: serde_json::Error,
    },
}

impl CliError {
    fn code(&self) -> ErrorCode {
        match self {
            Self::MissingDestinationOperand { .. } | Self::ParseTaskFile { .. } => {
                ErrorCode::InvalidInput
            }
            Self::ReadTaskFile { source, .. } => ErrorCode::from_io(source),
        }
    }
}

fn exit_code_for(code: ErrorCode) -> i32 {
    match code {
        ErrorCode::InvalidInput => 2,
        _ => 1,
    }
}

fn main() {
    let args = Args::parse();
    init_tracing(args.verbose);

    if let Err(error) = run(args) {
        eprintln!("error[{}]: {}", error.code(), error);
        std::process::exit(exit_code_for(error.code()));
    }
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose { "treecopy=debug" } else { "error" };
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_target(false)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .init();
}

/// Run every task; branch failures are reported, never returned.
fn run(args: Args) -> CliResult<()> {
    let work = resolve_work(&args)?;

    let mut presenter = Presenter::new(args.log, args.output, args.verbose, !args.quiet);
    let stats: CopyStats = match work {
        Work::Tasks(tasks) => run_tasks(&tasks, |outcome| presenter.handle(outcome)),
        Work::Configs(configs) => run_configs(configs, |outcome| presenter.handle(outcome)),
    };
    presenter.finish(&stats);

    Ok(())
}

enum Work {
    /// Built from command-line operands
    Tasks(Vec<CopyTask>),
    /// Loaded from a task file, validated per entry while running
    Configs(Vec<TaskConfig>),
}

fn resolve_work(args: &Args) -> CliResult<Work> {
    if let Some(ref path) = args.tasks {
        let mut configs = load_task_file(path)?;
        if args.no_sync {
            for config in &mut configs {
                config.fsync = false;
            }
        }
        return Ok(Work::Configs(configs));
    }

    Ok(Work::Tasks(vec![task_from_operands(args)?]))
}

fn load_task_file(path: &Path) -> CliResult<Vec<TaskConfig>> {
    let text = std::fs::read_to_string(path).map_err(|source| CliError::ReadTaskFile {
        path: path.to_path_buf(),
        source,
    })?;
    parse_task_file(&text).map_err(|source| CliError::ParseTaskFile {
        path: path.to_path_buf(),
        source,
    })
}

/// A task file holds either a list of tasks or a single task object.
fn parse_task_file(text: &str) -> serde_json::Result<Vec<TaskConfig>> {
    match serde_json::from_str::<serde_json::Value>(text)? {
        list @ serde_json::Value::Array(_) => serde_json::from_value(list),
        single => Ok(vec![serde_json::from_value(single)?]),
    }
}

fn task_from_operands(args: &Args) -> CliResult<CopyTask> {
    let Some((dest, sources)) = args.paths.split_last() else {
        // clap enforces at least one path when --tasks is absent
        return Err(CliError::MissingDestinationOperand {
            operand: PathBuf::new(),
        });
    };

    let source = match sources {
        [] => {
            return Err(CliError::MissingDestinationOperand {
                operand: dest.clone(),
            });
        }
        [single] => Source::One(single.clone()),
        many => Source::Many(many.to_vec()),
    };

    let mut options = CopyOptions::default()
        .with_max_depth(args.max_depth.unwrap_or(0))
        .with_max_height(args.max_height.unwrap_or(0))
        .with_flatten(args.flatten)
        .with_on_conflict(args.on_conflict.map(OnConflict::from).unwrap_or_default());
    if args.no_sync {
        options = options.without_fsync();
    }

    Ok(CopyTask::new(source, dest).with_options(options))
}
