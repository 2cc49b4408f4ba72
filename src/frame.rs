//! Frame records.
//!
//! Frames exist so the host's frame machinery has something to hold on to.
//! Parameter updates are stored and nothing else happens; there is no
//! window behind any of them.

use tracing::trace;

use crate::color::Color;
use crate::{FrameId, TerminalId};

/// Parameters of one frame, with the defaults a frame gets when created
/// without explicit settings: black on white, 80x25, no decorations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameParams {
    pub title: Option<String>,
    /// Size in character cells.
    pub cols: u32,
    pub rows: u32,
    pub foreground: Color,
    pub background: Color,
    pub cursor_color: Color,
    pub internal_border_width: u32,
    pub menu_bar_lines: u32,
}

impl Default for FrameParams {
    fn default() -> Self {
        Self {
            title: None,
            cols: 80,
            rows: 25,
            foreground: Color::from_rgb8(0x00, 0x00, 0x00),
            background: Color::from_rgb8(0xff, 0xff, 0xff),
            cursor_color: Color::from_rgb8(0x00, 0x00, 0x00),
            internal_border_width: 0,
            menu_bar_lines: 0,
        }
    }
}

/// One frame on a terminal.
#[derive(Debug)]
pub struct Frame {
    pub id: FrameId,
    pub terminal: TerminalId,
    params: FrameParams,
}

impl Frame {
    pub(crate) fn new(id: FrameId, terminal: TerminalId, params: FrameParams) -> Self {
        Self {
            id,
            terminal,
            params,
        }
    }

    pub fn params(&self) -> &FrameParams {
        &self.params
    }

    pub fn set_title(&mut self, title: Option<String>) {
        trace!(frame = %self.id, ?title, "set frame title");
        self.params.title = title;
    }

    pub fn set_foreground(&mut self, color: Color) {
        self.params.foreground = color;
    }

    pub fn set_background(&mut self, color: Color) {
        self.params.background = color;
    }

    pub fn set_cursor_color(&mut self, color: Color) {
        self.params.cursor_color = color;
    }

    pub fn set_internal_border_width(&mut self, width: u32) {
        self.params.internal_border_width = width;
    }

    pub fn set_menu_bar_lines(&mut self, lines: u32) {
        self.params.menu_bar_lines = lines;
    }

    pub fn resize(&mut self, cols: u32, rows: u32) {
        trace!(frame = %self.id, cols, rows, "resize frame");
        self.params.cols = cols;
        self.params.rows = rows;
    }
}
