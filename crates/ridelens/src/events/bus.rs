//! Event bus for queuing and dispatching events and commands.
//!
//! The [`EventBus`] provides a simple mechanism for collecting widget
//! events during a turn and then draining them for handling.

use std::collections::VecDeque;

use super::types::{AppEvent, Command};

/// A simple event bus that queues events and commands for processing.
///
/// The event bus maintains two separate queues:
/// - Events: Semantic dashboard events waiting to be handled
/// - Commands: Presentation updates waiting to be executed
///
/// # Usage Pattern
///
/// ```ignore
/// let mut bus = EventBus::new();
///
/// // Widget callbacks emit events
/// bus.emit(AppEvent::toggle_synchronize(false));
///
/// // The session drains them, one synchronous turn per event
/// session.process(&mut bus);
///
/// // The presentation layer executes all pending commands
/// for cmd in bus.drain_commands() {
///     view.apply(cmd);
/// }
/// ```
#[derive(Debug, Default)]
pub struct EventBus {
    /// Queue of pending dashboard events.
    events: VecDeque<AppEvent>,
    /// Queue of pending commands.
    commands: VecDeque<Command>,
}

impl EventBus {
    /// Create a new empty event bus.
    #[must_use]
    pub fn new() -> Self {
        Self {
            events: VecDeque::new(),
            commands: VecDeque::new(),
        }
    }

    /// Emit a dashboard event to be processed.
    ///
    /// Events are added to the end of the queue and will be handled
    /// in FIFO order.
    pub fn emit(&mut self, event: AppEvent) {
        self.events.push_back(event);
    }

    /// Emit multiple events at once.
    pub fn emit_all(&mut self, events: impl IntoIterator<Item = AppEvent>) {
        self.events.extend(events);
    }

    /// Dispatch a command to be executed.
    ///
    /// Commands are added to the end of the queue and will be executed
    /// in FIFO order when `drain_commands` is called.
    pub fn dispatch(&mut self, cmd: Command) {
        self.commands.push_back(cmd);
    }

    /// Dispatch multiple commands at once.
    pub fn dispatch_all(&mut self, commands: impl IntoIterator<Item = Command>) {
        self.commands.extend(commands);
    }

    /// Drain all pending events.
    ///
    /// Returns an iterator that removes and yields all queued events.
    /// After this call completes, the event queue will be empty.
    pub fn drain_events(&mut self) -> impl Iterator<Item = AppEvent> + '_ {
        self.events.drain(..)
    }

    /// Drain all pending commands.
    ///
    /// Returns an iterator that removes and yields all queued commands.
    /// After this call completes, the command queue will be empty.
    pub fn drain_commands(&mut self) -> impl Iterator<Item = Command> + '_ {
        self.commands.drain(..)
    }

    /// Take all pending events, leaving the queue empty.
    ///
    /// Unlike `drain_events`, this returns an owned `Vec` that can be
    /// stored or passed around.
    #[must_use]
    pub fn take_events(&mut self) -> Vec<AppEvent> {
        std::mem::take(&mut self.events).into_iter().collect()
    }

    /// Take all pending commands, leaving the queue empty.
    ///
    /// Unlike `drain_commands`, this returns an owned `Vec` that can be
    /// stored or passed around.
    #[must_use]
    pub fn take_commands(&mut self) -> Vec<Command> {
        std::mem::take(&mut self.commands).into_iter().collect()
    }

    /// Check if there are any pending events.
    #[must_use]
    pub fn has_events(&self) -> bool {
        !self.events.is_empty()
    }

    /// Check if there are any pending commands.
    #[must_use]
    pub fn has_commands(&self) -> bool {
        !self.commands.is_empty()
    }

    /// Get the number of pending events.
    #[must_use]
    pub fn event_count(&self) -> usize {
        self.events.len()
    }

    /// Get the number of pending commands.
    #[must_use]
    pub fn command_count(&self) -> usize {
        self.commands.len()
    }

    /// Clear all pending events and commands.
    pub fn clear(&mut self) {
        self.events.clear();
        self.commands.clear();
    }

    /// Peek at the next event without removing it.
    #[must_use]
    pub fn peek_event(&self) -> Option<&AppEvent> {
        self.events.front()
    }

    /// Peek at the next command without removing it.
    #[must_use]
    pub fn peek_command(&self) -> Option<&Command> {
        self.commands.front()
    }
}
