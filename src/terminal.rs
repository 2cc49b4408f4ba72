//! Host-side terminal records and generic hook dispatch.
//!
//! A [`Terminal`] carries the per-operation hook slots the host dispatches
//! through. An empty slot is the neutral behavior: no side effect, `false`,
//! `0`, or `None`, depending on the operation.

use std::fmt;
use std::sync::Arc;

use crate::color::Color;
use crate::event::{EventQueue, InputEvent};
use crate::hooks::HookTable;
use crate::menu::MenuFlags;
use crate::{Glyph, TerminalId};

/// One logical display/output session of the host.
pub struct Terminal {
    pub id: TerminalId,
    /// Active per-operation hook slots.
    pub hooks: HookTable,
    /// Hooks as they were before forwarding installation, if installed.
    saved: Option<Arc<HookTable>>,
    events: EventQueue,
}

impl Terminal {
    pub fn new(id: TerminalId) -> Self {
        Self {
            id,
            hooks: HookTable::new(),
            saved: None,
            events: EventQueue::new(),
        }
    }

    /// True once the forwarding layer owns this terminal's hook slots.
    pub fn forwarding_installed(&self) -> bool {
        self.saved.is_some()
    }

    pub(crate) fn set_saved_hooks(&mut self, saved: Arc<HookTable>) {
        self.saved = Some(saved);
    }

    /// The hooks saved away when forwarding was installed.
    pub fn saved_hooks(&self) -> Option<&HookTable> {
        self.saved.as_deref()
    }

    /// Queue an input event for the next [`read_input`](Self::read_input).
    pub fn inject_event(&mut self, event: InputEvent) {
        self.events.push(event);
    }

    /// Drain locally injected events and poll the read hook; returns the
    /// total number of events consumed.
    pub fn read_input(&mut self) -> usize {
        let local = self.events.drain().len();
        local + self.read_avail_input()
    }

    // Generic dispatch, one entry per operation.

    pub fn cursor_to(&self, vpos: i32, hpos: i32) {
        if let Some(hook) = &self.hooks.cursor_to {
            hook(self.id, vpos, hpos);
        }
    }

    pub fn raw_cursor_to(&self, row: i32, col: i32) {
        if let Some(hook) = &self.hooks.raw_cursor_to {
            hook(self.id, row, col);
        }
    }

    pub fn clear_to_end(&self) {
        if let Some(hook) = &self.hooks.clear_to_end {
            hook(self.id);
        }
    }

    pub fn clear_frame(&self) {
        if let Some(hook) = &self.hooks.clear_frame {
            hook(self.id);
        }
    }

    pub fn clear_end_of_line(&self, first_unused_hpos: i32) {
        if let Some(hook) = &self.hooks.clear_end_of_line {
            hook(self.id, first_unused_hpos);
        }
    }

    pub fn ins_del_lines(&self, vpos: i32, n: i32) {
        if let Some(hook) = &self.hooks.ins_del_lines {
            hook(self.id, vpos, n);
        }
    }

    pub fn insert_glyphs(&self, glyphs: &[Glyph]) {
        if let Some(hook) = &self.hooks.insert_glyphs {
            hook(self.id, glyphs);
        }
    }

    pub fn write_glyphs(&self, glyphs: &[Glyph]) {
        if let Some(hook) = &self.hooks.write_glyphs {
            hook(self.id, glyphs);
        }
    }

    pub fn delete_glyphs(&self, n: i32) {
        if let Some(hook) = &self.hooks.delete_glyphs {
            hook(self.id, n);
        }
    }

    pub fn ring_bell(&self) {
        if let Some(hook) = &self.hooks.ring_bell {
            hook(self.id);
        }
    }

    pub fn reset_terminal_modes(&self) {
        if let Some(hook) = &self.hooks.reset_terminal_modes {
            hook(self.id);
        }
    }

    pub fn set_terminal_modes(&self) {
        if let Some(hook) = &self.hooks.set_terminal_modes {
            hook(self.id);
        }
    }

    pub fn update_end(&self) {
        if let Some(hook) = &self.hooks.update_end {
            hook(self.id);
        }
    }

    /// Returns an error description when the menu could not be shown.
    pub fn menu_show(&self, x: i32, y: i32, flags: MenuFlags, title: &str) -> Option<String> {
        self.hooks
            .menu_show
            .as_ref()
            .and_then(|hook| hook(self.id, x, y, flags, title))
    }

    pub fn set_terminal_window(&self, size: i32) {
        if let Some(hook) = &self.hooks.set_terminal_window {
            hook(self.id, size);
        }
    }

    /// Resolve `name`, writing into `color` only on success.
    pub fn defined_color(&self, name: &str, color: &mut Color, alloc: bool, make_index: bool) -> bool {
        match &self.hooks.defined_color {
            Some(hook) => hook(self.id, name, color, alloc, make_index),
            None => false,
        }
    }

    /// Number of input events available through the hook chain.
    pub fn read_avail_input(&self) -> usize {
        self.hooks
            .read_avail_input
            .as_ref()
            .map_or(0, |hook| hook(self.id))
    }

    pub fn delete_frame(&self) {
        if let Some(hook) = &self.hooks.delete_frame {
            hook(self.id);
        }
    }

    pub fn delete_terminal(&self) {
        if let Some(hook) = &self.hooks.delete_terminal {
            hook(self.id);
        }
    }
}

impl fmt::Debug for Terminal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Terminal")
            .field("id", &self.id)
            .field("forwarding_installed", &self.forwarding_installed())
            .field("queued_events", &self.events.len())
            .finish()
    }
}
