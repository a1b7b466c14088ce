//! Command-line argument definitions.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// TwentyFive: a five-by-five task board kept in one JSON file.
#[derive(Parser, Debug)]
#[command(name = "twentyfive", version, long_about = None)]
pub struct Cli {
    /// Board data file (created with a sample board when missing).
    #[arg(
        long,
        global = true,
        env = "TWENTYFIVE_DATA_FILE",
        default_value = twentyfive_core::config::DEFAULT_DATA_FILE
    )]
    pub data_file: PathBuf,

    /// Directory for rolling log files; logging is off when unset.
    #[arg(long, global = true, env = "TWENTYFIVE_LOG_DIR")]
    pub log_dir: Option<PathBuf>,

    /// Log level: trace|debug|info|warn|error.
    #[arg(long, global = true, env = "TWENTYFIVE_LOG_LEVEL")]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the whole board
    Board,

    /// Task operations
    Task {
        #[command(subcommand)]
        command: TaskCommands,
    },

    /// Category operations
    Category {
        #[command(subcommand)]
        command: CategoryCommands,
    },

    /// Focus one task, or clear focus when no id is given
    Focus {
        task_id: Option<String>,
    },
}

#[derive(Subcommand, Debug)]
pub enum TaskCommands {
    /// Create a task
    Create {
        /// Task name
        name: String,
        /// category | backburner | archive
        #[arg(long, default_value = "category")]
        location: String,
        /// Target category (required for the category location)
        #[arg(long)]
        category: Option<String>,
        /// Zero-based insert position; appends when omitted or out of range
        #[arg(long)]
        position: Option<usize>,
        /// Explicit task id; generated when omitted
        #[arg(long)]
        id: Option<String>,
        /// todo | doing | blocked | delegated | done
        #[arg(long, default_value = "todo")]
        state: String,
        /// Points, 1 to 5
        #[arg(long, default_value_t = 1)]
        size: u8,
        #[arg(long, default_value = "")]
        description: String,
        #[arg(long, default_value = "")]
        notes: String,
        #[arg(long)]
        urgent: bool,
        #[arg(long)]
        focused: bool,
    },

    /// Patch task fields
    Update {
        task_id: String,
        #[command(flatten)]
        patch: PatchArgs,
    },

    /// Move a task to a category, the backburner or the archive
    Move {
        task_id: String,
        /// category | backburner | archive
        location: String,
        /// Target category (required for the category location)
        #[arg(long)]
        category: Option<String>,
        #[arg(long)]
        position: Option<usize>,
        /// Recorded origin category id when parking
        #[arg(long)]
        source_id: Option<String>,
        /// Recorded origin category name when parking
        #[arg(long)]
        source: Option<String>,
    },

    /// Permanently delete an archived task
    Delete {
        task_id: String,
    },
}

#[derive(Args, Debug, Default)]
pub struct PatchArgs {
    /// JSON patch object (camelCase fields); flags below override it
    #[arg(long)]
    pub json: Option<String>,
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub description: Option<String>,
    #[arg(long)]
    pub notes: Option<String>,
    #[arg(long)]
    pub state: Option<String>,
    #[arg(long)]
    pub size: Option<u8>,
    #[arg(long)]
    pub urgent: Option<bool>,
}

#[derive(Subcommand, Debug)]
pub enum CategoryCommands {
    /// Add an empty category to the board
    Create {
        name: String,
    },

    /// Rename an active category
    Rename {
        category_id: String,
        name: String,
    },

    /// Move a category to the board, the backburner or the archive
    Move {
        category_id: String,
        /// board | backburner | archive
        location: String,
        #[arg(long)]
        position: Option<usize>,
    },

    /// Rewrite the task order of an active category
    Reorder {
        category_id: String,
        /// Every task id of the category, in the new order
        #[arg(required = true)]
        task_ids: Vec<String>,
    },
}

#[cfg(test)]
mod tests {
    use super::{CategoryCommands, Cli, Commands, TaskCommands};
    use clap::{CommandFactory, Parser};

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_task_move_with_category() {
        let cli = Cli::parse_from([
            "twentyfive",
            "--data-file",
            "/tmp/board.json",
            "task",
            "move",
            "t1",
            "category",
            "--category",
            "c2",
            "--position",
            "0",
        ]);
        match cli.command {
            Commands::Task {
                command:
                    TaskCommands::Move {
                        task_id,
                        location,
                        category,
                        position,
                        ..
                    },
            } => {
                assert_eq!(task_id, "t1");
                assert_eq!(location, "category");
                assert_eq!(category.as_deref(), Some("c2"));
                assert_eq!(position, Some(0));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn reorder_requires_task_ids() {
        assert!(Cli::try_parse_from(["twentyfive", "category", "reorder", "c1"]).is_err());
        let cli = Cli::parse_from(["twentyfive", "category", "reorder", "c1", "a", "b"]);
        assert!(matches!(
            cli.command,
            Commands::Category {
                command: CategoryCommands::Reorder { .. }
            }
        ));
    }
}
