//! `twentyfive` command-line front end.
//!
//! # Responsibility
//! - Map subcommands onto board store operations.
//! - Print committed results as JSON; report failures on stderr with an
//!   exit code derived from the error kind.

mod cli;

use clap::Parser;
use cli::{CategoryCommands, Cli, Commands, PatchArgs, TaskCommands};
use log::{error, info};
use serde_json::{json, Value};
use std::process::ExitCode;
use twentyfive_core::{
    default_log_level, init_logging, open_store, BoardError, BoardStore, CategoryLocationKind,
    CreateTaskRequest, ErrorKind, JsonFileBoardRepository, MoveCategoryRequest, MoveTaskRequest,
    NewTask, StoreConfig, StoreError, TaskLocationKind, TaskPatch, TaskState,
};

type Store = BoardStore<JsonFileBoardRepository>;

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Some(log_dir) = &cli.log_dir {
        let level = cli.log_level.as_deref().unwrap_or(default_log_level());
        if let Err(err) = init_logging(level, &log_dir.to_string_lossy()) {
            eprintln!("warning: logging disabled: {err}");
        }
    }

    let config = StoreConfig::new(cli.data_file.clone());
    let store = match open_store(&config) {
        Ok(store) => store,
        Err(err) => return report(&err),
    };

    match run(&store, cli.command) {
        Ok(output) => match serde_json::to_string_pretty(&output) {
            Ok(text) => {
                println!("{text}");
                ExitCode::SUCCESS
            }
            Err(err) => {
                eprintln!("error: encode output: {err}");
                ExitCode::from(1)
            }
        },
        Err(err) => report(&err),
    }
}

fn run(store: &Store, command: Commands) -> Result<Value, StoreError> {
    info!("event=cli_command module=cli status=start command={}", command_name(&command));
    match command {
        Commands::Board => Ok(json!({ "board": store.get_state() })),
        Commands::Task { command } => run_task(store, command),
        Commands::Category { command } => run_category(store, command),
        Commands::Focus { task_id } => {
            let committed = store.set_focused(task_id.as_deref())?;
            Ok(json!({ "task": committed.entity, "board": committed.board }))
        }
    }
}

fn run_task(store: &Store, command: TaskCommands) -> Result<Value, StoreError> {
    let committed = match command {
        TaskCommands::Create {
            name,
            location,
            category,
            position,
            id,
            state,
            size,
            description,
            notes,
            urgent,
            focused,
        } => {
            let mut task = NewTask::new(name, state.parse::<TaskState>()?, size);
            task.id = id;
            task.description = description;
            task.notes = notes;
            task.urgent = urgent;
            task.focused = focused;
            store.create_task(CreateTaskRequest {
                location: location.parse::<TaskLocationKind>()?,
                category_id: category,
                position,
                task,
            })?
        }
        TaskCommands::Update { task_id, patch } => {
            store.update_task(&task_id, &build_patch(patch)?)?
        }
        TaskCommands::Move {
            task_id,
            location,
            category,
            position,
            source_id,
            source,
        } => {
            let request = MoveTaskRequest {
                location: location.parse::<TaskLocationKind>()?,
                category_id: category,
                position,
                source_id,
                source,
            };
            store.move_task(&task_id, &request)?
        }
        TaskCommands::Delete { task_id } => {
            let board = store.delete_task(&task_id)?;
            return Ok(json!({ "board": board }));
        }
    };
    Ok(json!({ "task": committed.entity, "board": committed.board }))
}

fn run_category(store: &Store, command: CategoryCommands) -> Result<Value, StoreError> {
    let committed = match command {
        CategoryCommands::Create { name } => store.create_category(&name)?,
        CategoryCommands::Rename { category_id, name } => {
            store.rename_category(&category_id, &name)?
        }
        CategoryCommands::Move {
            category_id,
            location,
            position,
        } => {
            let request = MoveCategoryRequest {
                location: location.parse::<CategoryLocationKind>()?,
                position,
            };
            store.move_category(&category_id, &request)?
        }
        CategoryCommands::Reorder {
            category_id,
            task_ids,
        } => store.reorder_category_tasks(&category_id, &task_ids)?,
    };
    Ok(json!({ "category": committed.entity, "board": committed.board }))
}

/// Merges the optional JSON patch with the individual field flags.
fn build_patch(args: PatchArgs) -> Result<TaskPatch, BoardError> {
    let mut patch = match args.json.as_deref() {
        Some(raw) => serde_json::from_str::<TaskPatch>(raw)
            .map_err(|err| BoardError::InvalidRequest(format!("patch json: {err}")))?,
        None => TaskPatch::default(),
    };
    if args.name.is_some() {
        patch.name = args.name;
    }
    if args.description.is_some() {
        patch.description = args.description;
    }
    if args.notes.is_some() {
        patch.notes = args.notes;
    }
    if let Some(state) = args.state {
        patch.state = Some(state.parse()?);
    }
    if args.size.is_some() {
        patch.size = args.size;
    }
    if args.urgent.is_some() {
        patch.urgent = args.urgent;
    }
    if patch.is_empty() {
        return Err(BoardError::InvalidRequest(
            "task update needs at least one field".to_string(),
        ));
    }
    Ok(patch)
}

fn report(err: &StoreError) -> ExitCode {
    let kind = err.kind();
    error!(
        "event=cli_command module=cli status=error error_code={}",
        kind.code()
    );
    eprintln!("error: {err}");
    ExitCode::from(exit_code(kind))
}

fn exit_code(kind: ErrorKind) -> u8 {
    match kind {
        ErrorKind::TaskNotFound | ErrorKind::CategoryNotFound => 3,
        ErrorKind::InvalidState
        | ErrorKind::InvalidTaskSize
        | ErrorKind::InvalidLocation
        | ErrorKind::InvalidRequest => 4,
        ErrorKind::CapacityExceeded | ErrorKind::CategoryLimit | ErrorKind::DuplicateCategory => 5,
        ErrorKind::Persistence => 6,
    }
}

fn command_name(command: &Commands) -> &'static str {
    match command {
        Commands::Board => "board",
        Commands::Task { command } => match command {
            TaskCommands::Create { .. } => "task_create",
            TaskCommands::Update { .. } => "task_update",
            TaskCommands::Move { .. } => "task_move",
            TaskCommands::Delete { .. } => "task_delete",
        },
        Commands::Category { command } => match command {
            CategoryCommands::Create { .. } => "category_create",
            CategoryCommands::Rename { .. } => "category_rename",
            CategoryCommands::Move { .. } => "category_move",
            CategoryCommands::Reorder { .. } => "category_reorder",
        },
        Commands::Focus { .. } => "focus",
    }
}
