use crate::player::command::Command;
use std::collections::VecDeque;
use std::sync::{Condvar, Mutex, MutexGuard};

#[derive(Default)]
struct QueueState {
    items: VecDeque<Command>,
    closed: bool,
}

/// Blocking deque shared by the player handle, the refresh thread and the worker.
#[derive(Default)]
pub(crate) struct CommandQueue {
    state: Mutex<QueueState>,
    ready: Condvar,
}

impl CommandQueue {
    fn lock(&self) -> MutexGuard<'_, QueueState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Enqueue `cmd` at the back. Priority commands skip the trailing run of pending draws but
    /// stay behind every other pending command.
    ///
    /// Returns `false` once the queue is closed.
    pub(crate) fn push(&self, cmd: Command) -> bool {
        let mut state = self.lock();
        if state.closed {
            return false;
        }
        if cmd.is_priority() {
            let at = state
                .items
                .iter()
                .rposition(|c| !c.is_draw())
                .map_or(0, |i| i + 1);
            state.items.insert(at, cmd);
        } else {
            state.items.push_back(cmd);
        }
        drop(state);
        self.ready.notify_one();
        true
    }

    /// Enqueue a draw, replacing pending draws it supersedes.
    ///
    /// A clock draw replaces pending clock draws; an explicit-time draw replaces every pending
    /// draw.
    pub(crate) fn push_draw(&self, cmd: Command) -> bool {
        let mut state = self.lock();
        if state.closed {
            return false;
        }
        match cmd {
            Command::DrawAt(_) => state.items.retain(|c| !c.is_draw()),
            _ => state.items.retain(|c| !matches!(c, Command::Draw)),
        }
        state.items.push_back(cmd);
        drop(state);
        self.ready.notify_one();
        true
    }

    /// Enqueue `cmd` as the last command and refuse everything after it.
    pub(crate) fn push_last(&self, cmd: Command) -> bool {
        let mut state = self.lock();
        if state.closed {
            return false;
        }
        state.items.push_back(cmd);
        state.closed = true;
        drop(state);
        self.ready.notify_one();
        true
    }

    /// Wait for the next command. `None` once closed and drained.
    pub(crate) fn pop(&self) -> Option<Command> {
        let mut state = self.lock();
        loop {
            if let Some(cmd) = state.items.pop_front() {
                return Some(cmd);
            }
            if state.closed {
                return None;
            }
            state = self.ready.wait(state).unwrap_or_else(|e| e.into_inner());
        }
    }

    /// Close and drop everything still pending.
    pub(crate) fn close(&self) -> usize {
        let mut state = self.lock();
        state.closed = true;
        let dropped = state.items.len();
        state.items.clear();
        dropped
    }

    /// Pending command names, front first.
    #[cfg(test)]
    pub(crate) fn pending(&self) -> Vec<&'static str> {
        self.lock().items.iter().map(Command::name).collect()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/player/queue.rs"]
mod tests;
