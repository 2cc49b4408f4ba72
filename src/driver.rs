//! The downward call surface of the remote display protocol.
//!
//! A remote implementation receives every terminal operation with the
//! terminal id qualified explicitly. Every method has a neutral default
//! body, so an implementation only overrides the operations it supports and
//! an absent operation is a safe no-op by construction.

use crate::color::Color;
use crate::menu::MenuFlags;
use crate::{Glyph, TerminalId};

/// One method per terminal operation.
///
/// Arguments are passed through from the host unchanged; validity of the
/// terminal id is the implementation's concern, not checked here.
pub trait RemoteDriver: Send + Sync {
    fn cursor_to(&self, _terminal: TerminalId, _vpos: i32, _hpos: i32) {}

    fn raw_cursor_to(&self, _terminal: TerminalId, _row: i32, _col: i32) {}

    fn clear_to_end(&self, _terminal: TerminalId) {}

    fn clear_frame(&self, _terminal: TerminalId) {}

    fn clear_end_of_line(&self, _terminal: TerminalId, _first_unused_hpos: i32) {}

    /// Insert `n` blank lines at `vpos` when `n` is positive, delete lines
    /// when negative.
    fn ins_del_lines(&self, _terminal: TerminalId, _vpos: i32, _n: i32) {}

    fn insert_glyphs(&self, _terminal: TerminalId, _glyphs: &[Glyph]) {}

    fn write_glyphs(&self, _terminal: TerminalId, _glyphs: &[Glyph]) {}

    fn delete_glyphs(&self, _terminal: TerminalId, _n: i32) {}

    fn ring_bell(&self, _terminal: TerminalId) {}

    fn reset_terminal_modes(&self, _terminal: TerminalId) {}

    fn set_terminal_modes(&self, _terminal: TerminalId) {}

    fn update_end(&self, _terminal: TerminalId) {}

    /// Show a menu. Returns an error description when the menu could not be
    /// shown, `None` otherwise.
    fn menu_show(
        &self,
        _terminal: TerminalId,
        _x: i32,
        _y: i32,
        _flags: MenuFlags,
        _title: &str,
    ) -> Option<String> {
        None
    }

    fn set_terminal_window(&self, _terminal: TerminalId, _size: i32) {}

    /// Resolve `name`, writing into `color` on success.
    ///
    /// On failure `color` must be left untouched; callers pre-initialize it.
    fn defined_color(
        &self,
        _terminal: TerminalId,
        _name: &str,
        _color: &mut Color,
        _alloc: bool,
        _make_index: bool,
    ) -> bool {
        false
    }

    /// Number of input events currently available for the terminal.
    fn read_avail_input(&self, _terminal: TerminalId) -> usize {
        0
    }

    fn delete_frame(&self, _terminal: TerminalId) {}

    fn delete_terminal(&self, _terminal: TerminalId) {}
}

/// Driver that accepts every operation and does nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullDriver;

impl RemoteDriver for NullDriver {}
