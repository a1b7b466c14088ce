//! Starter board written when no data file exists yet.

use crate::model::board::BoardState;
use crate::model::category::Category;
use crate::model::id::IdGenerator;
use crate::model::task::{Task, TaskState};

type SeedTask = (&'static str, &'static str, TaskState, u8);

const SEED_COLUMNS: &[(&str, &[SeedTask])] = &[
    (
        "Backlog",
        &[
            (
                "Research idea",
                "Collect references and create a quick outline.",
                TaskState::Todo,
                2,
            ),
            (
                "Spike prototype",
                "Throwaway exploration to de-risk approach.",
                TaskState::Doing,
                2,
            ),
            ("Triage inbox", "Sort and label incoming items.", TaskState::Todo, 1),
        ],
    ),
    (
        "Planning",
        &[
            ("Roadmap v1", "Define milestones and success criteria.", TaskState::Doing, 3),
            ("Team sync", "Align on goals, scope, and timelines.", TaskState::Todo, 2),
        ],
    ),
    (
        "Build",
        &[
            ("Implement core", "Core feature work across modules.", TaskState::Doing, 2),
            ("Write tests", "Unit and integration coverage.", TaskState::Todo, 1),
            ("Docs pass", "README + usage examples.", TaskState::Todo, 2),
        ],
    ),
    (
        "Launch",
        &[("Release prep", "Changelog, versioning, and rollout plan.", TaskState::Todo, 5)],
    ),
    (
        "Personal",
        &[
            ("Workout", "Split day routine; 45 minutes.", TaskState::Doing, 2),
            ("Groceries", "Restock staples and veggies.", TaskState::Todo, 1),
            ("Call home", "Weekly check-in.", TaskState::Done, 1),
            ("Read 30 mins", "Continue current book.", TaskState::Todo, 1),
        ],
    ),
];

/// Builds the five-column sample board.
pub fn seed_board(ids: &dyn IdGenerator) -> BoardState {
    let categories = SEED_COLUMNS
        .iter()
        .map(|(name, tasks)| Category {
            id: ids.next_id(),
            name: (*name).to_string(),
            tasks: tasks
                .iter()
                .map(|(name, description, state, size)| Task {
                    id: ids.next_id(),
                    name: (*name).to_string(),
                    description: (*description).to_string(),
                    notes: String::new(),
                    state: *state,
                    size: *size,
                    links: Vec::new(),
                    checklist: Vec::new(),
                    urgent: false,
                    focused: false,
                    source_id: None,
                    source: None,
                })
                .collect(),
        })
        .collect();

    BoardState {
        categories,
        ..BoardState::default()
    }
}
