//! Outcome presentation for tcopy.

use clap::ValueEnum;
use indicatif::{ProgressBar, ProgressStyle};
use serde_json::{Map, Value, json};
use std::path::{Component, Path, PathBuf};
use std::time::Duration;
use treecopy::{CopyStats, Outcome, OutcomeKind};

/// Paths with more components than this are elided in symbol mode.
const MAX_DISPLAY_COMPONENTS: usize = 4;

#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum LogMode {
    /// Only the final summary
    None,
    /// One line per action with full paths
    Detailed,
    /// One symbol-prefixed line per action with shortened paths
    Symbols,
}

#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum OutputMode {
    Human,
    Json,
    Jsonl,
}

/// Receives outcomes while tasks run and prints them in the chosen style.
pub struct Presenter {
    log: LogMode,
    output: OutputMode,
    verbose: bool,
    cwd: Option<PathBuf>,
    spinner: Option<ProgressBar>,
    items: Vec<Value>,
}

impl Presenter {
    pub fn new(log: LogMode, output: OutputMode, verbose: bool, show_spinner: bool) -> Self {
        let spinner = if output == OutputMode::Human && show_spinner {
            create_spinner()
        } else {
            None
        };

        Self {
            log,
            output,
            verbose,
            cwd: std::env::current_dir().ok(),
            spinner,
            items: Vec::new(),
        }
    }

    pub fn handle(&mut self, outcome: Outcome) {
        if let Some(pb) = &self.spinner {
            pb.set_message(self.shorten(outcome.dst()));
        }

        match self.output {
            OutputMode::Human => {
                // Failures go to stderr only, never into the action log
                if let Some(error) = outcome.error() {
                    let line = format!(
                        "error[{}]: {}: {}",
                        error.code(),
                        outcome.src().display(),
                        error
                    );
                    self.print(|| eprintln!("{line}"));
                    return;
                }

                let line = match self.log {
                    LogMode::None => return,
                    LogMode::Detailed => detailed_line(&outcome),
                    LogMode::Symbols => self.symbol_line(&outcome),
                };
                self.print(|| println!("{line}"));
            }
            OutputMode::Jsonl => {
                let mut record = outcome_json(&outcome);
                record.insert("schema_version".to_owned(), json!("1.0"));
                record.insert("record_type".to_owned(), json!("outcome"));
                println!("{}", Value::Object(record));
            }
            OutputMode::Json => self.items.push(Value::Object(outcome_json(&outcome))),
        }
    }

    /// Completion notification: print the summary for the whole run.
    pub fn finish(self, stats: &CopyStats) {
        if let Some(pb) = &self.spinner {
            pb.finish_and_clear();
        }

        match self.output {
            OutputMode::Human => print_stats(stats, self.verbose),
            OutputMode::Json => {
                let payload = json!({
                    "schema_version": "1.0",
                    "mode": "execute",
                    "items": self.items,
                    "summary": stats_json(stats),
                });
                println!("{payload}");
            }
            OutputMode::Jsonl => {
                let record = json!({
                    "schema_version": "1.0",
                    "record_type": "summary",
                    "summary": stats_json(stats),
                });
                println!("{record}");
            }
        }
    }

    fn print(&self, f: impl FnOnce()) {
        match &self.spinner {
            Some(pb) => pb.suspend(f),
            None => f(),
        }
    }

    fn shorten(&self, path: &Path) -> String {
        shorten_path(path, self.cwd.as_deref())
    }

    fn symbol_line(&self, outcome: &Outcome) -> String {
        let symbol = symbol(outcome.kind());
        match outcome {
            Outcome::Renamed {
                original, renamed, ..
            } => format!(
                "{symbol} {} -> {}",
                self.shorten(original),
                self.shorten(renamed)
            ),
            other => format!("{symbol} {}", self.shorten(other.dst())),
        }
    }
}

fn create_spinner() -> Option<ProgressBar> {
    let style = ProgressStyle::default_spinner()
        .template("{spinner:.green} {msg}")
        .ok()?;
    let pb = ProgressBar::new_spinner();
    pb.set_style(style);
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_message("Copying...");
    Some(pb)
}

pub fn symbol(kind: OutcomeKind) -> char {
    match kind {
        OutcomeKind::Copied => '+',
        OutcomeKind::Overwritten => '*',
        OutcomeKind::Skipped => '=',
        OutcomeKind::Renamed => '~',
        OutcomeKind::DirectoryCreated => 'd',
        OutcomeKind::Failed => '!',
    }
}

fn detailed_line(outcome: &Outcome) -> String {
    let kind = outcome.kind().as_str();
    match outcome {
        Outcome::Copied { src, dst, bytes } | Outcome::Overwritten { src, dst, bytes } => format!(
            "{kind:<17} {} -> {} ({})",
            src.display(),
            dst.display(),
            format_bytes(*bytes)
        ),
        Outcome::Renamed {
            src,
            original,
            renamed,
            bytes,
        } => format!(
            "{kind:<17} {} -> {} (exists: {}) ({})",
            src.display(),
            renamed.display(),
            original.display(),
            format_bytes(*bytes)
        ),
        Outcome::Skipped { src, dst } => format!(
            "{kind:<17} {} -> {} (exists)",
            src.display(),
            dst.display()
        ),
        other => format!(
            "{kind:<17} {} -> {}",
            other.src().display(),
            other.dst().display()
        ),
    }
}

/// Make `path` relative to `base` when possible and elide the middle of
/// long paths as `first/…/second-last/last`.
pub fn shorten_path(path: &Path, base: Option<&Path>) -> String {
    let rel = base
        .and_then(|b| path.strip_prefix(b).ok())
        .filter(|r| !r.as_os_str().is_empty())
        .unwrap_or(path);

    let parts: Vec<Component<'_>> = rel.components().collect();
    if parts.len() <= MAX_DISPLAY_COMPONENTS {
        return rel.display().to_string();
    }

    let mut short = PathBuf::from(parts[0].as_os_str());
    short.push("…");
    for part in &parts[parts.len() - 2..] {
        short.push(part.as_os_str());
    }
    short.display().to_string()
}

fn outcome_json(outcome: &Outcome) -> Map<String, Value> {
    let mut obj = Map::new();
    obj.insert("outcome".to_owned(), json!(outcome.kind().as_str()));
    obj.insert("source".to_owned(), json!(display_path(outcome.src())));
    obj.insert("destination".to_owned(), json!(display_path(outcome.dst())));

    match outcome {
        Outcome::Copied { bytes, .. } | Outcome::Overwritten { bytes, .. } => {
            obj.insert("bytes_copied".to_owned(), json!(bytes));
        }
        Outcome::Renamed {
            original, bytes, ..
        } => {
            obj.insert("original".to_owned(), json!(display_path(original)));
            obj.insert("bytes_copied".to_owned(), json!(bytes));
        }
        Outcome::Failed { error, .. } => {
            obj.insert("error_code".to_owned(), json!(error.code().as_str()));
            obj.insert("error_message".to_owned(), json!(error.to_string()));
        }
        _ => {}
    }

    obj
}

fn stats_json(stats: &CopyStats) -> Value {
    json!({
        "files_copied": stats.files_copied,
        "files_overwritten": stats.files_overwritten,
        "files_renamed": stats.files_renamed,
        "files_skipped": stats.files_skipped,
        "dirs_created": stats.dirs_created,
        "failures": stats.failures,
        "bytes_copied": stats.bytes_copied,
        "duration_ms": u64::try_from(stats.duration.as_millis()).unwrap_or(u64::MAX),
    })
}

fn print_stats(stats: &CopyStats, verbose: bool) {
    if verbose {
        println!("Copy completed in {:?}", stats.duration);
        println!("  Files copied:      {}", stats.files_copied);
        println!("  Files overwritten: {}", stats.files_overwritten);
        println!("  Files renamed:     {}", stats.files_renamed);
        println!("  Files skipped:     {}", stats.files_skipped);
        println!("  Directories:       {}", stats.dirs_created);
        println!("  Failures:          {}", stats.failures);
        println!("  Total size:        {}", format_bytes(stats.bytes_copied));
        return;
    }

    if stats.files_written() == 0 && stats.dirs_created == 0 && stats.failures == 0 {
        if stats.files_skipped > 0 {
            println!(
                "Nothing to copy ({} files already exist)",
                stats.files_skipped
            );
        } else {
            println!("Nothing to copy");
        }
        return;
    }

    let counts = [
        (stats.files_copied, "copied"),
        (stats.files_overwritten, "overwritten"),
        (stats.files_renamed, "renamed"),
        (stats.files_skipped, "skipped"),
        (stats.dirs_created, "dirs"),
        (stats.failures, "failed"),
    ];
    let parts: Vec<String> = counts
        .iter()
        .filter(|(n, _)| *n > 0)
        .map(|(n, label)| format!("{n} {label}"))
        .collect();

    println!(
        "Done: {} ({})",
        parts.join(", "),
        format_bytes(stats.bytes_copied)
    );
}

fn display_path(path: &Path) -> String {
    path.display().to_string()
}

fn format_bytes(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if bytes >= GB {
        format!("{:.2} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.2} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.2} KB", bytes as f64 / KB as f64)
    } else {
        format!("{bytes} B")
    }
}
