//! tasklog - IT support ticket log
//!
//! Command-line shell over `tasklog-core`: every flag becomes a field change
//! event on the form, field errors are printed next to their labels, and
//! deletes ask for confirmation on the terminal.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use tasklog_core::app::Saved;
use tasklog_core::domain::{Field, TaskRecord, compute_duration, validate};
use tasklog_core::impls::{JsonFileSlot, XlsxExporter};
use tasklog_core::ports::{SystemClock, UlidGenerator};
use tasklog_core::{Config, FormError, TaskManager, TaskStore};
use tracing::debug;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

mod output;
mod prompt;

use prompt::ConsolePrompt;

type Manager = TaskManager<JsonFileSlot, UlidGenerator<SystemClock>, ConsolePrompt, XlsxExporter>;

/// Track IT support tickets and export them to a spreadsheet
#[derive(Parser)]
#[command(name = "tasklog")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// JSON file holding the task list [env: TASKLOG_STORAGE_PATH]
    #[arg(long, global = true)]
    storage: Option<PathBuf>,

    /// Directory that receives tasks.xlsx [env: TASKLOG_EXPORT_DIR]
    #[arg(long, global = true)]
    export_dir: Option<PathBuf>,

    /// Print machine-readable JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show all tasks in list order
    List,

    /// Add a task
    Add(RecordArgs),

    /// Edit the task at INDEX (only the given fields change)
    Edit {
        /// Position in the list, as shown by `list`
        index: usize,

        #[command(flatten)]
        fields: RecordArgs,
    },

    /// Delete the task at INDEX
    Delete {
        /// Position in the list, as shown by `list`
        index: usize,

        /// Do not ask for confirmation
        #[arg(short, long)]
        yes: bool,
    },

    /// Export tasks to tasks.xlsx (selected rows, or all when none are selected)
    Export {
        /// Rows to export; repeat for several
        #[arg(short, long = "select", value_name = "INDEX")]
        select: Vec<usize>,
    },

    /// Check a task without saving it
    Validate(RecordArgs),

    /// Elapsed time between two HH:MM times on the same day
    Duration {
        in_time: String,
        out_time: String,
    },
}

/// Task fields; each one given is applied as a change on the form.
#[derive(Args, Default)]
struct RecordArgs {
    /// Date the ticket was opened (YYYY-MM-DD)
    #[arg(long)]
    date: Option<String>,

    /// Workstation name (letters, digits, spaces)
    #[arg(long)]
    workstation: Option<String>,

    /// Hardware, Software or Network
    #[arg(long)]
    issue_type: Option<String>,

    #[arg(long)]
    issue_description: Option<String>,

    #[arg(long)]
    resolution_remark: Option<String>,

    /// Pending, Reject or Resolve
    #[arg(long)]
    status: Option<String>,

    /// Date the work was finished (YYYY-MM-DD)
    #[arg(long)]
    completed_date: Option<String>,

    /// Time spent, HH:mm
    #[arg(long)]
    duration: Option<String>,

    /// Skyline or "Ab's"
    #[arg(long)]
    location: Option<String>,

    /// Remote or Visit
    #[arg(long)]
    site: Option<String>,

    #[arg(long)]
    received_from: Option<String>,

    #[arg(long)]
    confirmed_to: Option<String>,

    /// Start of work, HH:MM
    #[arg(long)]
    in_time: Option<String>,

    /// End of work, HH:MM (same day, after --in-time)
    #[arg(long)]
    out_time: Option<String>,
}

impl RecordArgs {
    fn changes(&self) -> impl Iterator<Item = (Field, &str)> {
        [
            (Field::Date, &self.date),
            (Field::Workstation, &self.workstation),
            (Field::IssueType, &self.issue_type),
            (Field::IssueDescription, &self.issue_description),
            (Field::ResolutionRemark, &self.resolution_remark),
            (Field::IssueStatus, &self.status),
            (Field::TaskCompletedDate, &self.completed_date),
            (Field::TaskDuration, &self.duration),
            (Field::LocationType, &self.location),
            (Field::SiteType, &self.site),
            (Field::ReceivedFrom, &self.received_from),
            (Field::ConfirmedTo, &self.confirmed_to),
            (Field::InTime, &self.in_time),
            (Field::OutTime, &self.out_time),
        ]
        .into_iter()
        .filter_map(|(field, value)| value.as_deref().map(|v| (field, v)))
    }
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tasklog_cli=warn,tasklog_core=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn open(cli: &Cli, assume_yes: bool) -> anyhow::Result<Manager> {
    let mut config = Config::from_env().context("invalid environment configuration")?;
    if let Some(path) = &cli.storage {
        config.storage_path = path.clone();
    }
    if let Some(dir) = &cli.export_dir {
        config.export_dir = dir.clone();
    }
    debug!(?config, "configuration resolved");

    let store = TaskStore::load(
        JsonFileSlot::new(config.storage_path),
        UlidGenerator::new(SystemClock),
    );
    Ok(TaskManager::new(
        store,
        ConsolePrompt::new(assume_yes),
        XlsxExporter::new(config.export_dir),
    ))
}

/// Apply the flags to the open form and save it.
fn submit(manager: &mut Manager, fields: &RecordArgs, json: bool) -> anyhow::Result<ExitCode> {
    for (field, value) in fields.changes() {
        manager
            .set_field(field, value)
            .with_context(|| format!("--{} {value:?}", field.key()))?;
    }

    match manager.save() {
        Ok(Saved::Created(id) | Saved::Updated(id)) => {
            debug!(%id, "saved");
            Ok(ExitCode::SUCCESS)
        }
        Err(FormError::Invalid(errors)) => {
            if !json {
                eprintln!("Task was not saved:");
            }
            output::print_errors(&errors, json)?;
            Ok(ExitCode::FAILURE)
        }
        Err(err) => Err(err.into()),
    }
}

fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    match &cli.command {
        Commands::List => {
            let manager = open(&cli, false)?;
            output::print_list(manager.store().records(), cli.json)?;
        }
        Commands::Add(fields) => {
            let mut manager = open(&cli, false)?;
            manager.open_create();
            return submit(&mut manager, fields, cli.json);
        }
        Commands::Edit { index, fields } => {
            let mut manager = open(&cli, false)?;
            manager.open_edit_at(*index)?;
            return submit(&mut manager, fields, cli.json);
        }
        Commands::Delete { index, yes } => {
            let mut manager = open(&cli, *yes)?;
            if !manager.delete_at(*index)? {
                println!("Nothing deleted.");
            }
        }
        Commands::Export { select } => {
            let mut manager = open(&cli, false)?;
            for index in select {
                let id = manager.store().id_at(*index)?;
                manager.toggle_select(id, true)?;
            }
            if let Some(path) = manager.export()? {
                println!("Exported to {}", path.display());
            }
        }
        Commands::Validate(fields) => {
            let mut candidate = TaskRecord::form_defaults();
            for (field, value) in fields.changes() {
                candidate
                    .set(field, value)
                    .with_context(|| format!("--{} {value:?}", field.key()))?;
            }
            let errors = validate(&candidate);
            if errors.is_empty() {
                if cli.json {
                    println!("{{}}");
                } else {
                    println!("Task is valid.");
                }
                return Ok(ExitCode::SUCCESS);
            }
            output::print_errors(&errors, cli.json)?;
            return Ok(ExitCode::FAILURE);
        }
        Commands::Duration { in_time, out_time } => match compute_duration(in_time, out_time) {
            Some(elapsed) => println!("{elapsed}"),
            None => {
                eprintln!("Out Time must be after In Time.");
                return Ok(ExitCode::FAILURE);
            }
        },
    }
    Ok(ExitCode::SUCCESS)
}

fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();

    match run(cli) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn record_args_map_to_fields_in_form_order() {
        let cli = Cli::parse_from([
            "tasklog",
            "add",
            "--out-time",
            "10:00",
            "--workstation",
            "WS 1",
            "--status",
            "Resolve",
        ]);
        let Commands::Add(fields) = cli.command else {
            panic!("expected add");
        };

        let changes: Vec<(Field, &str)> = fields.changes().collect();
        assert_eq!(
            changes,
            vec![
                (Field::Workstation, "WS 1"),
                (Field::IssueStatus, "Resolve"),
                (Field::OutTime, "10:00"),
            ]
        );
    }

    #[test]
    fn export_accepts_repeated_selection() {
        let cli = Cli::parse_from(["tasklog", "export", "-s", "0", "--select", "2"]);
        match cli.command {
            Commands::Export { select } => assert_eq!(select, vec![0, 2]),
            _ => panic!("expected export"),
        }
    }
}
