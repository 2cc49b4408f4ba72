//! Per-terminal hook slots and forwarding installation.
//!
//! The host dispatches terminal operations through one hook slot per
//! operation. Installing the headless layer saves the terminal's current
//! slots, then replaces each with a composed handler that forwards to the
//! remote display first and then invokes whatever hook was saved. The saved
//! copies are the only route back to the previous behavior, so installation
//! must happen exactly once per terminal: a second pass would capture the
//! forwarding handlers themselves as "saved" and chain into them forever.

use std::mem;
use std::sync::Arc;

use anyhow::{bail, Result};
use tracing::debug;

use crate::color::Color;
use crate::driver::RemoteDriver;
use crate::menu::MenuFlags;
use crate::remote::RemoteDisplay;
use crate::terminal::Terminal;
use crate::{Glyph, TerminalId};

// One boxed handler type per operation; the value-returning ones mirror the
// driver surface exactly.
pub type CursorToHook = Box<dyn Fn(TerminalId, i32, i32) + Send + Sync>;
pub type RawCursorToHook = Box<dyn Fn(TerminalId, i32, i32) + Send + Sync>;
pub type ClearToEndHook = Box<dyn Fn(TerminalId) + Send + Sync>;
pub type ClearFrameHook = Box<dyn Fn(TerminalId) + Send + Sync>;
pub type ClearEndOfLineHook = Box<dyn Fn(TerminalId, i32) + Send + Sync>;
pub type InsDelLinesHook = Box<dyn Fn(TerminalId, i32, i32) + Send + Sync>;
pub type InsertGlyphsHook = Box<dyn Fn(TerminalId, &[Glyph]) + Send + Sync>;
pub type WriteGlyphsHook = Box<dyn Fn(TerminalId, &[Glyph]) + Send + Sync>;
pub type DeleteGlyphsHook = Box<dyn Fn(TerminalId, i32) + Send + Sync>;
pub type RingBellHook = Box<dyn Fn(TerminalId) + Send + Sync>;
pub type ResetTerminalModesHook = Box<dyn Fn(TerminalId) + Send + Sync>;
pub type SetTerminalModesHook = Box<dyn Fn(TerminalId) + Send + Sync>;
pub type UpdateEndHook = Box<dyn Fn(TerminalId) + Send + Sync>;
pub type MenuShowHook =
    Box<dyn Fn(TerminalId, i32, i32, MenuFlags, &str) -> Option<String> + Send + Sync>;
pub type SetTerminalWindowHook = Box<dyn Fn(TerminalId, i32) + Send + Sync>;
pub type DefinedColorHook =
    Box<dyn Fn(TerminalId, &str, &mut Color, bool, bool) -> bool + Send + Sync>;
pub type ReadAvailInputHook = Box<dyn Fn(TerminalId) -> usize + Send + Sync>;
pub type DeleteFrameHook = Box<dyn Fn(TerminalId) + Send + Sync>;
pub type DeleteTerminalHook = Box<dyn Fn(TerminalId) + Send + Sync>;

/// The host's per-operation hook slots for one terminal.
///
/// An empty slot means the operation has the documented neutral behavior.
#[derive(Default)]
pub struct HookTable {
    pub cursor_to: Option<CursorToHook>,
    pub raw_cursor_to: Option<RawCursorToHook>,
    pub clear_to_end: Option<ClearToEndHook>,
    pub clear_frame: Option<ClearFrameHook>,
    pub clear_end_of_line: Option<ClearEndOfLineHook>,
    pub ins_del_lines: Option<InsDelLinesHook>,
    pub insert_glyphs: Option<InsertGlyphsHook>,
    pub write_glyphs: Option<WriteGlyphsHook>,
    pub delete_glyphs: Option<DeleteGlyphsHook>,
    pub ring_bell: Option<RingBellHook>,
    pub reset_terminal_modes: Option<ResetTerminalModesHook>,
    pub set_terminal_modes: Option<SetTerminalModesHook>,
    pub update_end: Option<UpdateEndHook>,
    pub menu_show: Option<MenuShowHook>,
    pub set_terminal_window: Option<SetTerminalWindowHook>,
    pub defined_color: Option<DefinedColorHook>,
    pub read_avail_input: Option<ReadAvailInputHook>,
    pub delete_frame: Option<DeleteFrameHook>,
    pub delete_terminal: Option<DeleteTerminalHook>,
}

impl HookTable {
    pub fn new() -> Self {
        Self::default()
    }
}

impl std::fmt::Debug for HookTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HookTable").finish_non_exhaustive()
    }
}

/// Save the terminal's current hooks and install the forwarding handlers.
///
/// Fails if forwarding is already installed on the terminal: repeating the
/// save would capture the forwarding handlers themselves as the previous
/// hooks.
pub fn install_forwarding_hooks(
    terminal: &mut Terminal,
    remote: &Arc<RemoteDisplay>,
) -> Result<()> {
    if terminal.forwarding_installed() {
        bail!("forwarding hooks already installed on {}", terminal.id);
    }
    let saved = Arc::new(mem::take(&mut terminal.hooks));
    terminal.hooks = compose_forwarding(remote, &saved);
    terminal.set_saved_hooks(saved);
    debug!(terminal = %terminal.id, "installed forwarding hooks");
    Ok(())
}

/// Build a hook table whose every slot forwards to `remote` and then chains
/// to the matching slot in `saved`, in that fixed order.
///
/// For the value-returning operations the saved hook's value is returned
/// when a saved hook exists, otherwise the remote's.
pub(crate) fn compose_forwarding(
    remote: &Arc<RemoteDisplay>,
    saved: &Arc<HookTable>,
) -> HookTable {
    let mut table = HookTable::new();

    let (r, s) = (remote.clone(), saved.clone());
    table.cursor_to = Some(Box::new(move |tid, vpos, hpos| {
        r.cursor_to(tid, vpos, hpos);
        if let Some(hook) = &s.cursor_to {
            hook(tid, vpos, hpos);
        }
    }));

    let (r, s) = (remote.clone(), saved.clone());
    table.raw_cursor_to = Some(Box::new(move |tid, row, col| {
        r.raw_cursor_to(tid, row, col);
        if let Some(hook) = &s.raw_cursor_to {
            hook(tid, row, col);
        }
    }));

    let (r, s) = (remote.clone(), saved.clone());
    table.clear_to_end = Some(Box::new(move |tid| {
        r.clear_to_end(tid);
        if let Some(hook) = &s.clear_to_end {
            hook(tid);
        }
    }));

    let (r, s) = (remote.clone(), saved.clone());
    table.clear_frame = Some(Box::new(move |tid| {
        r.clear_frame(tid);
        if let Some(hook) = &s.clear_frame {
            hook(tid);
        }
    }));

    let (r, s) = (remote.clone(), saved.clone());
    table.clear_end_of_line = Some(Box::new(move |tid, first_unused_hpos| {
        r.clear_end_of_line(tid, first_unused_hpos);
        if let Some(hook) = &s.clear_end_of_line {
            hook(tid, first_unused_hpos);
        }
    }));

    let (r, s) = (remote.clone(), saved.clone());
    table.ins_del_lines = Some(Box::new(move |tid, vpos, n| {
        r.ins_del_lines(tid, vpos, n);
        if let Some(hook) = &s.ins_del_lines {
            hook(tid, vpos, n);
        }
    }));

    let (r, s) = (remote.clone(), saved.clone());
    table.insert_glyphs = Some(Box::new(move |tid, glyphs: &[Glyph]| {
        r.insert_glyphs(tid, glyphs);
        if let Some(hook) = &s.insert_glyphs {
            hook(tid, glyphs);
        }
    }));

    let (r, s) = (remote.clone(), saved.clone());
    table.write_glyphs = Some(Box::new(move |tid, glyphs: &[Glyph]| {
        r.write_glyphs(tid, glyphs);
        if let Some(hook) = &s.write_glyphs {
            hook(tid, glyphs);
        }
    }));

    let (r, s) = (remote.clone(), saved.clone());
    table.delete_glyphs = Some(Box::new(move |tid, n| {
        r.delete_glyphs(tid, n);
        if let Some(hook) = &s.delete_glyphs {
            hook(tid, n);
        }
    }));

    let (r, s) = (remote.clone(), saved.clone());
    table.ring_bell = Some(Box::new(move |tid| {
        r.ring_bell(tid);
        if let Some(hook) = &s.ring_bell {
            hook(tid);
        }
    }));

    let (r, s) = (remote.clone(), saved.clone());
    table.reset_terminal_modes = Some(Box::new(move |tid| {
        r.reset_terminal_modes(tid);
        if let Some(hook) = &s.reset_terminal_modes {
            hook(tid);
        }
    }));

    let (r, s) = (remote.clone(), saved.clone());
    table.set_terminal_modes = Some(Box::new(move |tid| {
        r.set_terminal_modes(tid);
        if let Some(hook) = &s.set_terminal_modes {
            hook(tid);
        }
    }));

    let (r, s) = (remote.clone(), saved.clone());
    table.update_end = Some(Box::new(move |tid| {
        r.update_end(tid);
        if let Some(hook) = &s.update_end {
            hook(tid);
        }
    }));

    let (r, s) = (remote.clone(), saved.clone());
    table.menu_show = Some(Box::new(move |tid, x, y, flags, title: &str| {
        let remote_result = r.menu_show(tid, x, y, flags, title);
        match &s.menu_show {
            Some(hook) => hook(tid, x, y, flags, title),
            None => remote_result,
        }
    }));

    let (r, s) = (remote.clone(), saved.clone());
    table.set_terminal_window = Some(Box::new(move |tid, size| {
        r.set_terminal_window(tid, size);
        if let Some(hook) = &s.set_terminal_window {
            hook(tid, size);
        }
    }));

    let (r, s) = (remote.clone(), saved.clone());
    table.defined_color = Some(Box::new(
        move |tid, name: &str, color: &mut Color, alloc, make_index| {
            let remote_found = r.defined_color(tid, name, color, alloc, make_index);
            match &s.defined_color {
                Some(hook) => hook(tid, name, color, alloc, make_index),
                None => remote_found,
            }
        },
    ));

    let (r, s) = (remote.clone(), saved.clone());
    table.read_avail_input = Some(Box::new(move |tid| {
        let remote_count = r.read_avail_input(tid);
        match &s.read_avail_input {
            Some(hook) => hook(tid),
            None => remote_count,
        }
    }));

    let (r, s) = (remote.clone(), saved.clone());
    table.delete_frame = Some(Box::new(move |tid| {
        r.delete_frame(tid);
        if let Some(hook) = &s.delete_frame {
            hook(tid);
        }
    }));

    let (r, s) = (remote.clone(), saved.clone());
    table.delete_terminal = Some(Box::new(move |tid| {
        r.delete_terminal(tid);
        if let Some(hook) = &s.delete_terminal {
            hook(tid);
        }
    }));

    table
}
