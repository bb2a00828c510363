use proptest::prelude::*;
use starkit_core::HistoryError;
use starkit_designer::{Command, HistoryManager, HistoryTarget};

#[derive(Debug, Default)]
struct Log {
    entries: Vec<&'static str>,
}

impl HistoryTarget for Log {}

fn push(name: &'static str) -> Command<Log> {
    Command::new(
        name,
        move |log: &mut Log| {
            let popped = log.entries.pop();
            assert_eq!(popped, Some(name));
        },
        move |log: &mut Log| log.entries.push(name),
    )
}

/// Apply a command's effect and record it, the way the scene does.
fn apply(history: &mut HistoryManager<Log>, log: &mut Log, name: &'static str) {
    log.entries.push(name);
    history.record(push(name)).unwrap();
}

#[test]
fn test_manager_creation() {
    let history: HistoryManager<Log> = HistoryManager::new();
    assert!(!history.can_undo());
    assert!(!history.can_redo());
    assert_eq!(history.undo_depth(), 0);
    assert_eq!(history.redo_depth(), 0);
    assert_eq!(history.capacity(), 100);
    assert!(history.is_empty());
}

#[test]
fn test_undo_redo_round_trip() {
    let mut log = Log::default();
    let mut history = HistoryManager::new();

    apply(&mut history, &mut log, "a");
    let after_record = log.entries.clone();

    history.undo(&mut log).unwrap();
    assert!(log.entries.is_empty());
    assert!(history.can_redo());

    history.redo(&mut log).unwrap();
    assert_eq!(log.entries, after_record);
    assert_eq!(history.cursor(), 1);
}

#[test]
fn test_recording_drops_redo_branch() {
    let mut log = Log::default();
    let mut history = HistoryManager::new();

    apply(&mut history, &mut log, "a");
    apply(&mut history, &mut log, "b");
    history.undo(&mut log).unwrap();
    apply(&mut history, &mut log, "c");

    assert_eq!(history.labels(), vec!["a", "c"]);
    assert_eq!(history.cursor(), 2);
    assert_eq!(history.redo(&mut log), Err(HistoryError::NothingToRedo));
    assert_eq!(log.entries, vec!["a", "c"]);
}

#[test]
fn test_boundaries_report_errors() {
    let mut log = Log::default();
    let mut history = HistoryManager::new();

    assert_eq!(history.undo(&mut log), Err(HistoryError::NothingToUndo));
    assert_eq!(history.redo(&mut log), Err(HistoryError::NothingToRedo));

    apply(&mut history, &mut log, "a");
    history.undo(&mut log).unwrap();
    assert_eq!(history.undo(&mut log), Err(HistoryError::NothingToUndo));
    assert_eq!(history.cursor(), 0);
}

#[test]
fn test_malformed_commands_are_rejected() {
    let mut history: HistoryManager<Log> = HistoryManager::new();

    let err = history
        .record(Command::from_parts("empty", None, None))
        .unwrap_err();
    assert_eq!(
        err,
        HistoryError::MalformedCommand {
            label: "empty".to_string(),
            missing: "undo and redo",
        }
    );
    assert!(history.is_empty());
    assert_eq!(history.cursor(), 0);
}

#[test]
fn test_capacity_evicts_oldest() {
    let mut log = Log::default();
    let mut history = HistoryManager::with_capacity(3);

    for name in ["a", "b", "c", "d"] {
        apply(&mut history, &mut log, name);
    }

    assert_eq!(history.labels(), vec!["b", "c", "d"]);
    assert_eq!(history.cursor(), 3);
}

#[test]
fn test_eviction_keeps_cursor_position() {
    let mut log = Log::default();
    let mut history = HistoryManager::with_capacity(3);

    for name in ["a", "b", "c"] {
        apply(&mut history, &mut log, name);
    }
    history.undo(&mut log).unwrap();
    apply(&mut history, &mut log, "d");

    // Evicting "a" does not move the cursor back from 2 before the
    // push, so the undone "c" survives below the cursor.
    assert_eq!(history.labels(), vec!["b", "c", "d"]);
    assert_eq!(history.cursor(), 3);
}

#[test]
fn test_clear() {
    let mut log = Log::default();
    let mut history = HistoryManager::new();
    apply(&mut history, &mut log, "a");
    apply(&mut history, &mut log, "b");

    history.clear();
    assert!(history.is_empty());
    assert!(!history.can_undo());
}

proptest! {
    #[test]
    fn prop_never_exceeds_capacity(capacity in 1usize..20, records in 0usize..80, undos in 0usize..10) {
        let mut log = Log::default();
        let mut history = HistoryManager::with_capacity(capacity);

        for i in 0..records {
            if i % 7 == 6 {
                for _ in 0..undos {
                    let _ = history.undo(&mut log);
                }
            }
            apply(&mut history, &mut log, "x");
            prop_assert!(history.len() <= capacity);
            prop_assert!(history.cursor() <= history.len());
        }
    }
}
