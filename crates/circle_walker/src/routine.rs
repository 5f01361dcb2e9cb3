//! The scripted movement routine.
//!
//! A plain table walked round-robin: two steps right, down, left and up with
//! a couple of heading changes in between, which traces a small square.

use crate::protocol::ActionCommand;

/// Commands sent in order, one per game-state message.
pub const FIXED_ROUTINE: [ActionCommand; 10] = [
    ActionCommand::Right,
    ActionCommand::Turn { degrees: 0 },
    ActionCommand::Right,
    ActionCommand::Down,
    ActionCommand::Down,
    ActionCommand::Turn { degrees: 270 },
    ActionCommand::Left,
    ActionCommand::Left,
    ActionCommand::Up,
    ActionCommand::Up,
];

/// Position in [`FIXED_ROUTINE`], advanced once per reply.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CycleCounter {
    count: u64,
}

impl CycleCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Command for the current position. Does not advance.
    pub fn current(&self) -> ActionCommand {
        FIXED_ROUTINE[(self.count % FIXED_ROUTINE.len() as u64) as usize]
    }

    pub fn advance(&mut self) {
        self.count = self.count.wrapping_add(1);
    }

    /// Number of replies issued so far.
    pub fn count(&self) -> u64 {
        self.count
    }
}
