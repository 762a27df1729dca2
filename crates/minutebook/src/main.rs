//! `mbook` - CLI for minutebook
//!
//! This binary provides the command-line interface for managing meeting
//! records: create, list, view, edit, delete, task toggles, search, and
//! document export.

#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::Parser;

use minutebook::cli::{
    AddCommand, Cli, Command, ConfigCommand, DeleteCommand, EditCommand, ExportCommand,
    InitCommand, ListCommand, OutputFormat, SearchCommand, ShowCommand, StatsCommand,
    TaskCommand,
};
use minutebook::meeting::{MeetingDraft, MeetingPatch, Participant};
use minutebook::store::{FileBackend, OpenOptions, Store};
use minutebook::{export, init_logging, Config, Meeting};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity
    init_logging(cli.verbosity());

    // Load configuration
    let config = Config::load_from(cli.config.clone())?;

    // Execute the command
    match cli.command {
        Command::Init(cmd) => handle_init(&config, &cmd),
        Command::List(cmd) => handle_list(&config, &cmd),
        Command::Show(cmd) => handle_show(&config, &cmd),
        Command::Add(cmd) => handle_add(&config, cmd),
        Command::Edit(cmd) => handle_edit(&config, &cmd),
        Command::Delete(cmd) => handle_delete(&config, &cmd),
        Command::Task(cmd) => handle_task(&config, &cmd),
        Command::Search(cmd) => handle_search(&config, &cmd),
        Command::Export(cmd) => handle_export(&config, &cmd),
        Command::Stats(cmd) => handle_stats(&config, &cmd),
        Command::Config(cmd) => handle_config(&config, cmd),
    }
}

/// Open the store configured for this invocation.
fn open_store(config: &Config, force: bool) -> anyhow::Result<Store> {
    let backend = FileBackend::new(config.data_path());
    let options = OpenOptions {
        force,
        seed_demo: config.seed.demo_enabled,
        pretty: config.storage.pretty,
    };
    Store::open_with(backend, options).context("could not open the data store")
}

fn handle_init(config: &Config, cmd: &InitCommand) -> anyhow::Result<()> {
    let store = open_store(config, cmd.force)?;
    println!(
        "Store ready at {} with {} meeting(s).",
        store.location(),
        store.len()
    );
    Ok(())
}

fn handle_list(config: &Config, cmd: &ListCommand) -> anyhow::Result<()> {
    let store = open_store(config, false)?;
    print_meetings(&store.list(), cmd.format)
}

fn handle_show(config: &Config, cmd: &ShowCommand) -> anyhow::Result<()> {
    let store = open_store(config, false)?;
    let Some(meeting) = store.get(&cmd.id) else {
        bail!("no meeting with id {}", cmd.id);
    };

    match cmd.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&meeting)?),
        OutputFormat::Plain | OutputFormat::Table => {
            print!("{}", export::render_markdown(&meeting));
            println!("Tasks: {} open, {} total", meeting.open_task_count(), meeting.tasks.len());
            println!("Id:    {}", meeting.id);
        }
    }
    Ok(())
}

fn handle_add(config: &Config, cmd: AddCommand) -> anyhow::Result<()> {
    let draft = if let Some(path) = &cmd.file {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("could not read {}", path.display()))?;
        serde_json::from_str::<MeetingDraft>(&contents)
            .with_context(|| format!("{} is not a valid meeting draft", path.display()))?
    } else {
        let Some(title) = cmd.title else {
            bail!("either --file or --title is required");
        };
        MeetingDraft {
            title,
            date: cmd.date.unwrap_or_else(|| chrono::Utc::now().date_naive()),
            participants: cmd.participants.into_iter().map(Participant::new).collect(),
            topics: cmd.topics,
            decisions: cmd.decisions,
            ..MeetingDraft::default()
        }
    };

    let mut store = open_store(config, false)?;
    let meeting = store.create(draft)?;
    println!("Created meeting {} ({})", meeting.id, meeting.title);
    Ok(())
}

fn handle_edit(config: &Config, cmd: &EditCommand) -> anyhow::Result<()> {
    let contents = std::fs::read_to_string(&cmd.file)
        .with_context(|| format!("could not read {}", cmd.file.display()))?;
    let patch: MeetingPatch = serde_json::from_str(&contents)
        .with_context(|| format!("{} is not a valid meeting patch", cmd.file.display()))?;

    let mut store = open_store(config, false)?;
    match store.update(&cmd.id, patch)? {
        Some(meeting) => {
            println!("Updated meeting {} ({})", meeting.id, meeting.title);
            Ok(())
        }
        None => bail!("no meeting with id {}", cmd.id),
    }
}

fn handle_delete(config: &Config, cmd: &DeleteCommand) -> anyhow::Result<()> {
    let mut store = open_store(config, false)?;
    if store.delete(&cmd.id)? {
        println!("Deleted meeting {}", cmd.id);
        Ok(())
    } else {
        bail!("no meeting with id {}", cmd.id);
    }
}

fn handle_task(config: &Config, cmd: &TaskCommand) -> anyhow::Result<()> {
    let mut store = open_store(config, false)?;
    match cmd {
        TaskCommand::Done {
            meeting_id,
            task_id,
        } => set_task(&mut store, meeting_id, task_id, true),
        TaskCommand::Pending {
            meeting_id,
            task_id,
        } => set_task(&mut store, meeting_id, task_id, false),
        TaskCommand::List { meeting_id } => {
            let Some(meeting) = store.get(meeting_id) else {
                bail!("no meeting with id {meeting_id}");
            };
            if meeting.tasks.is_empty() {
                println!("No tasks in meeting {meeting_id}.");
            }
            for task in &meeting.tasks {
                let mark = if task.completed { "x" } else { " " };
                println!("[{mark}] {}  {} ({})", task.id, task.description, task.assignee);
            }
            Ok(())
        }
    }
}

fn set_task(store: &mut Store, meeting_id: &str, task_id: &str, completed: bool) -> anyhow::Result<()> {
    if store.set_task_completion(meeting_id, task_id, completed)? {
        println!(
            "Task {task_id} marked {}.",
            if completed { "completed" } else { "pending" }
        );
        Ok(())
    } else {
        bail!("no task {task_id} in meeting {meeting_id}");
    }
}

fn handle_search(config: &Config, cmd: &SearchCommand) -> anyhow::Result<()> {
    let store = open_store(config, false)?;
    let found = store.search(&cmd.term);
    if found.is_empty() {
        println!("No meetings match \"{}\".", cmd.term);
        return Ok(());
    }
    print_meetings(&found, cmd.format)
}

fn handle_export(config: &Config, cmd: &ExportCommand) -> anyhow::Result<()> {
    let store = open_store(config, false)?;
    let Some(meeting) = store.get(&cmd.id) else {
        bail!("no meeting with id {}", cmd.id);
    };

    let doc = export::render_markdown(&meeting);
    let destination = cmd
        .output
        .clone()
        .unwrap_or_else(|| config.export_dir().join(export::suggested_file_name(&meeting)));

    if destination == PathBuf::from("-") {
        print!("{doc}");
    } else {
        std::fs::write(&destination, &doc)
            .with_context(|| format!("could not write {}", destination.display()))?;
        println!("Exported meeting {} to {}", meeting.id, destination.display());
    }
    Ok(())
}

fn handle_stats(config: &Config, cmd: &StatsCommand) -> anyhow::Result<()> {
    let store = open_store(config, false)?;
    let stats = store.stats();

    if cmd.json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
    } else {
        println!("mbook stats");
        println!("-----------");
        println!("Data file:       {}", store.location());
        println!("Meetings:        {}", stats.total_meetings);
        println!(
            "Tasks:           {} ({} open, {} completed)",
            stats.total_tasks, stats.open_tasks, stats.completed_tasks
        );
        if let Some(newest) = stats.newest_created {
            println!("Newest record:   {newest}");
        }
        if let Some(oldest) = stats.oldest_created {
            println!("Oldest record:   {oldest}");
        }
    }
    Ok(())
}

fn handle_config(config: &Config, cmd: ConfigCommand) -> anyhow::Result<()> {
    match cmd {
        ConfigCommand::Show { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(config)?);
            } else {
                println!("Current Configuration");
                println!("=====================");
                println!();
                println!("[Storage]");
                println!("  Data file:     {}", config.data_path().display());
                println!("  Pretty JSON:   {}", config.storage.pretty);
                println!();
                println!("[Seed]");
                println!("  Demo record:   {}", config.seed.demo_enabled);
                println!();
                println!("[Export]");
                println!("  Output dir:    {}", config.export_dir().display());
            }
        }
        ConfigCommand::Path => {
            println!("{}", Config::default_config_path().display());
        }
        ConfigCommand::Validate { file } => {
            let path = file.unwrap_or_else(Config::default_config_path);
            println!("Validating configuration: {}", path.display());
            match Config::load_from(Some(path)) {
                Ok(_) => println!("Configuration is valid."),
                Err(e) => println!("Configuration error: {e}"),
            }
        }
    }
    Ok(())
}

/// Print a set of meetings in the requested format.
fn print_meetings(meetings: &[Meeting], format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(meetings)?),
        OutputFormat::Table => {
            println!(
                "{:<28} {:<12} {:>6} {:>6}  TITLE",
                "ID", "DATE", "PEOPLE", "TASKS"
            );
            for m in meetings {
                println!(
                    "{:<28} {:<12} {:>6} {:>6}  {}",
                    m.id,
                    m.date.to_string(),
                    m.participants.len(),
                    m.tasks.len(),
                    m.title
                );
            }
        }
        OutputFormat::Plain => {
            for m in meetings {
                println!("{}  {}  {}", m.id, m.date, m.title);
            }
        }
    }
    Ok(())
}
