#![allow(dead_code)]

pub mod tracing;

use std::sync::{Arc, Mutex};

use headless_term::{Color, Glyph, MenuFlags, RemoteDisplay, RemoteDriver, TerminalId};

/// Every forwarded call a test driver observed, arguments verbatim.
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    CursorTo(TerminalId, i32, i32),
    RawCursorTo(TerminalId, i32, i32),
    ClearToEnd(TerminalId),
    ClearFrame(TerminalId),
    ClearEndOfLine(TerminalId, i32),
    InsDelLines(TerminalId, i32, i32),
    InsertGlyphs(TerminalId, Vec<Glyph>),
    WriteGlyphs(TerminalId, Vec<Glyph>),
    DeleteGlyphs(TerminalId, i32),
    RingBell(TerminalId),
    ResetTerminalModes(TerminalId),
    SetTerminalModes(TerminalId),
    UpdateEnd(TerminalId),
    MenuShow(TerminalId, i32, i32, MenuFlags, String),
    SetTerminalWindow(TerminalId, i32),
    DefinedColor(TerminalId, String, bool, bool),
    ReadAvailInput(TerminalId),
    DeleteFrame(TerminalId),
    DeleteTerminal(TerminalId),
}

/// Driver that records every call and answers with configured values.
#[derive(Debug, Default)]
pub struct RecordingDriver {
    calls: Mutex<Vec<Call>>,
    /// What `defined_color` writes and reports, when set.
    pub color: Option<Color>,
    /// What `read_avail_input` reports.
    pub input_count: usize,
    /// What `menu_show` reports.
    pub menu_error: Option<String>,
}

impl RecordingDriver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_color(color: Color) -> Self {
        Self {
            color: Some(color),
            ..Self::default()
        }
    }

    pub fn with_input_count(input_count: usize) -> Self {
        Self {
            input_count,
            ..Self::default()
        }
    }

    pub fn with_menu_error(error: &str) -> Self {
        Self {
            menu_error: Some(error.to_string()),
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }
}

impl RemoteDriver for RecordingDriver {
    fn cursor_to(&self, terminal: TerminalId, vpos: i32, hpos: i32) {
        self.record(Call::CursorTo(terminal, vpos, hpos));
    }

    fn raw_cursor_to(&self, terminal: TerminalId, row: i32, col: i32) {
        self.record(Call::RawCursorTo(terminal, row, col));
    }

    fn clear_to_end(&self, terminal: TerminalId) {
        self.record(Call::ClearToEnd(terminal));
    }

    fn clear_frame(&self, terminal: TerminalId) {
        self.record(Call::ClearFrame(terminal));
    }

    fn clear_end_of_line(&self, terminal: TerminalId, first_unused_hpos: i32) {
        self.record(Call::ClearEndOfLine(terminal, first_unused_hpos));
    }

    fn ins_del_lines(&self, terminal: TerminalId, vpos: i32, n: i32) {
        self.record(Call::InsDelLines(terminal, vpos, n));
    }

    fn insert_glyphs(&self, terminal: TerminalId, glyphs: &[Glyph]) {
        self.record(Call::InsertGlyphs(terminal, glyphs.to_vec()));
    }

    fn write_glyphs(&self, terminal: TerminalId, glyphs: &[Glyph]) {
        self.record(Call::WriteGlyphs(terminal, glyphs.to_vec()));
    }

    fn delete_glyphs(&self, terminal: TerminalId, n: i32) {
        self.record(Call::DeleteGlyphs(terminal, n));
    }

    fn ring_bell(&self, terminal: TerminalId) {
        self.record(Call::RingBell(terminal));
    }

    fn reset_terminal_modes(&self, terminal: TerminalId) {
        self.record(Call::ResetTerminalModes(terminal));
    }

    fn set_terminal_modes(&self, terminal: TerminalId) {
        self.record(Call::SetTerminalModes(terminal));
    }

    fn update_end(&self, terminal: TerminalId) {
        self.record(Call::UpdateEnd(terminal));
    }

    fn menu_show(
        &self,
        terminal: TerminalId,
        x: i32,
        y: i32,
        flags: MenuFlags,
        title: &str,
    ) -> Option<String> {
        self.record(Call::MenuShow(terminal, x, y, flags, title.to_string()));
        self.menu_error.clone()
    }

    fn set_terminal_window(&self, terminal: TerminalId, size: i32) {
        self.record(Call::SetTerminalWindow(terminal, size));
    }

    fn defined_color(
        &self,
        terminal: TerminalId,
        name: &str,
        color: &mut Color,
        alloc: bool,
        make_index: bool,
    ) -> bool {
        self.record(Call::DefinedColor(
            terminal,
            name.to_string(),
            alloc,
            make_index,
        ));
        match self.color {
            Some(configured) => {
                *color = configured;
                true
            }
            None => false,
        }
    }

    fn read_avail_input(&self, terminal: TerminalId) -> usize {
        self.record(Call::ReadAvailInput(terminal));
        self.input_count
    }

    fn delete_frame(&self, terminal: TerminalId) {
        self.record(Call::DeleteFrame(terminal));
    }

    fn delete_terminal(&self, terminal: TerminalId) {
        self.record(Call::DeleteTerminal(terminal));
    }
}

/// Attach `driver` to `remote`, panicking on failure (test-only helper).
pub fn load_driver(remote: &RemoteDisplay, driver: &Arc<RecordingDriver>) {
    let dynamic: Arc<dyn RemoteDriver> = driver.clone();
    remote
        .start_server_with(move || Ok(dynamic))
        .expect("loading the test driver should succeed");
}
