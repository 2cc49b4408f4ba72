//! Input stub.
//!
//! No hardware ever produces events on a headless display; everything in
//! the queue was injected by the host (or a test). Reading drains whatever
//! was injected and otherwise reports that nothing is pending.

use std::collections::VecDeque;

use bitflags::bitflags;

use crate::FrameId;

bitflags! {
    /// Modifier keys attached to a key event.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct Modifiers: u8 {
        const SHIFT = 1 << 0;
        const CONTROL = 1 << 1;
        const META = 1 << 2;
        const SUPER = 1 << 3;
    }
}

/// Event kinds the backend can hand to the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    Key { keysym: u32, modifiers: Modifiers },
    Resize { cols: u16, rows: u16 },
    FocusIn { frame: FrameId },
}

/// FIFO of injected events.
#[derive(Debug, Default)]
pub struct EventQueue {
    events: VecDeque<InputEvent>,
}

impl EventQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: InputEvent) {
        self.events.push_back(event);
    }

    /// Remove and return everything queued, oldest first.
    pub fn drain(&mut self) -> Vec<InputEvent> {
        self.events.drain(..).collect()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

/// Printable name of a keysym.
///
/// Headless keysyms have no symbolic names; the decimal form is the name.
pub fn keysym_name(keysym: u32) -> String {
    keysym.to_string()
}
