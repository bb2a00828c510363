//! Undo/redo history.
//!
//! A linear stack of [`Command`]s with a cursor: everything below the cursor
//! is applied, everything at or above it has been undone. Recording a new
//! command drops the undone tail.
//!
//! While a command is being undone or redone the manager is *suppressed*:
//! edits the command makes to the scene raise the same events as user
//! edits, and those must not be recorded again. The target gets a chance to
//! flush such events through [`HistoryTarget::settle`] before suppression
//! is lifted.

use starkit_core::HistoryError;

/// One half of a command.
pub type Action<T> = Box<dyn FnMut(&mut T)>;

/// A reversible edit of a `T`.
pub struct Command<T> {
    label: String,
    undo: Option<Action<T>>,
    redo: Option<Action<T>>,
}

impl<T> Command<T> {
    pub fn new<U, R>(label: impl Into<String>, undo: U, redo: R) -> Self
    where
        U: FnMut(&mut T) + 'static,
        R: FnMut(&mut T) + 'static,
    {
        Self {
            label: label.into(),
            undo: Some(Box::new(undo)),
            redo: Some(Box::new(redo)),
        }
    }

    /// Build a command from optional halves. [`HistoryManager::record`]
    /// rejects it unless both are present.
    pub fn from_parts(
        label: impl Into<String>,
        undo: Option<Action<T>>,
        redo: Option<Action<T>>,
    ) -> Self {
        Self {
            label: label.into(),
            undo,
            redo,
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    fn missing(&self) -> Option<&'static str> {
        match (self.undo.is_some(), self.redo.is_some()) {
            (true, true) => None,
            (false, true) => Some("undo"),
            (true, false) => Some("redo"),
            (false, false) => Some("undo and redo"),
        }
    }
}

impl<T> std::fmt::Debug for Command<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Command")
            .field("label", &self.label)
            .field("undo", &self.undo.is_some())
            .field("redo", &self.redo.is_some())
            .finish()
    }
}

/// Something commands operate on.
pub trait HistoryTarget: Sized {
    /// Called after a command ran, while recording is still suppressed.
    fn settle(&mut self, _history: &mut HistoryManager<Self>) {}
}

pub const DEFAULT_CAPACITY: usize = 100;

pub struct HistoryManager<T> {
    commands: Vec<Command<T>>,
    cursor: usize,
    capacity: usize,
    suppressed: bool,
}

impl<T: HistoryTarget> HistoryManager<T> {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// A capacity of zero is treated as one.
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            commands: Vec::with_capacity(capacity),
            cursor: 0,
            capacity,
            suppressed: false,
        }
    }

    /// Append a command after the cursor, dropping anything undone.
    ///
    /// At capacity the oldest command is evicted first. The cursor is not
    /// moved back by the eviction, so recording at capacity while commands
    /// are undone keeps one of them as if it were applied.
    pub fn record(&mut self, command: Command<T>) -> Result<(), HistoryError> {
        if self.suppressed {
            tracing::trace!("History suppressed, ignoring '{}'", command.label);
            return Ok(());
        }

        if let Some(missing) = command.missing() {
            tracing::warn!(
                "Rejected history command '{}': missing {} action",
                command.label,
                missing
            );
            return Err(HistoryError::MalformedCommand {
                label: command.label,
                missing,
            });
        }

        if self.commands.len() >= self.capacity {
            let evicted = self.commands.remove(0);
            tracing::debug!("History full, evicted '{}'", evicted.label);
        }

        self.commands.truncate(self.cursor);
        tracing::info!("Recorded '{}'", command.label);
        self.commands.push(command);
        self.cursor = (self.cursor + 1).min(self.commands.len());

        Ok(())
    }

    pub fn undo(&mut self, target: &mut T) -> Result<(), HistoryError> {
        if self.cursor == 0 {
            tracing::warn!("{}", HistoryError::NothingToUndo);
            return Err(HistoryError::NothingToUndo);
        }

        let index = self.cursor - 1;
        self.suppressed = true;
        if let Some(undo) = self.commands[index].undo.as_mut() {
            undo(target);
        }
        target.settle(self);
        self.cursor = index;
        self.suppressed = false;

        tracing::info!("Undid '{}'", self.commands[index].label);
        Ok(())
    }

    pub fn redo(&mut self, target: &mut T) -> Result<(), HistoryError> {
        if self.cursor >= self.commands.len() {
            tracing::warn!("{}", HistoryError::NothingToRedo);
            return Err(HistoryError::NothingToRedo);
        }

        let index = self.cursor;
        self.suppressed = true;
        if let Some(redo) = self.commands[index].redo.as_mut() {
            redo(target);
        }
        target.settle(self);
        self.cursor = index + 1;
        self.suppressed = false;

        tracing::info!("Redid '{}'", self.commands[index].label);
        Ok(())
    }
}

impl<T> HistoryManager<T> {
    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_redo(&self) -> bool {
        self.cursor < self.commands.len()
    }

    pub fn undo_depth(&self) -> usize {
        self.cursor
    }

    pub fn redo_depth(&self) -> usize {
        self.commands.len() - self.cursor
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// True while an undo or redo is running.
    pub fn is_suppressed(&self) -> bool {
        self.suppressed
    }

    pub fn labels(&self) -> Vec<&str> {
        self.commands.iter().map(|c| c.label.as_str()).collect()
    }

    pub fn clear(&mut self) {
        self.commands.clear();
        self.cursor = 0;
    }
}

impl<T: HistoryTarget> Default for HistoryManager<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> std::fmt::Debug for HistoryManager<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HistoryManager")
            .field("len", &self.commands.len())
            .field("cursor", &self.cursor)
            .field("capacity", &self.capacity)
            .field("suppressed", &self.suppressed)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Counter {
        value: i32,
        settled: usize,
    }

    impl HistoryTarget for Counter {
        fn settle(&mut self, history: &mut HistoryManager<Self>) {
            self.settled += 1;
            assert!(history.is_suppressed());
        }
    }

    fn add(amount: i32) -> Command<Counter> {
        Command::new(
            format!("add {}", amount),
            move |c: &mut Counter| c.value -= amount,
            move |c: &mut Counter| c.value += amount,
        )
    }

    #[test]
    fn test_settle_runs_suppressed() {
        let mut counter = Counter::default();
        let mut history = HistoryManager::new();

        counter.value += 3;
        history.record(add(3)).unwrap();

        history.undo(&mut counter).unwrap();
        history.redo(&mut counter).unwrap();
        assert_eq!(counter.value, 3);
        assert_eq!(counter.settled, 2);
        assert!(!history.is_suppressed());
    }

    #[test]
    fn test_malformed_command_leaves_state() {
        let mut history: HistoryManager<Counter> = HistoryManager::new();
        history.record(add(1)).unwrap();

        let undo: Action<Counter> = Box::new(|_| {});
        let half = Command::from_parts("half", Some(undo), None);
        assert_eq!(
            history.record(half),
            Err(HistoryError::MalformedCommand {
                label: "half".to_string(),
                missing: "redo",
            })
        );
        assert_eq!(history.len(), 1);
        assert_eq!(history.cursor(), 1);
    }

    #[test]
    fn test_zero_capacity_is_one() {
        let history: HistoryManager<Counter> = HistoryManager::with_capacity(0);
        assert_eq!(history.capacity(), 1);
    }
}
