//! Behavior of the remote forwarding layer across the load/unload
//! lifecycle: neutral answers while unloaded, verbatim pass-through while
//! loaded, and full symmetry of start/stop.

mod common;

use std::sync::Arc;

use proptest::prelude::*;

use common::{load_driver, Call, RecordingDriver};
use headless_term::{Color, Glyph, MenuFlags, RemoteDisplay, RemoteDriver, TerminalId};

fn glyphs(text: &str) -> Vec<Glyph> {
    text.chars().map(Glyph::new).collect()
}

#[test]
fn test_unloaded_calls_are_silent_and_neutral() {
    common::tracing::init_tracing_from_env();
    let remote = RemoteDisplay::new();
    let tid = TerminalId(1);

    remote.cursor_to(tid, 4, 10);
    remote.raw_cursor_to(tid, 0, 0);
    remote.clear_to_end(tid);
    remote.clear_frame(tid);
    remote.clear_end_of_line(tid, 20);
    remote.ins_del_lines(tid, 2, -3);
    remote.insert_glyphs(tid, &glyphs("hi"));
    remote.write_glyphs(tid, &glyphs("hello"));
    remote.delete_glyphs(tid, 2);
    remote.ring_bell(tid);
    remote.reset_terminal_modes(tid);
    remote.set_terminal_modes(tid);
    remote.update_end(tid);
    remote.set_terminal_window(tid, 25);
    remote.delete_frame(tid);
    remote.delete_terminal(tid);

    assert!(!remote.is_loaded());
    assert_eq!(remote.read_avail_input(tid), 0);
    assert_eq!(remote.menu_show(tid, 0, 0, MenuFlags::empty(), "File"), None);
}

#[test]
fn test_defined_color_unloaded_returns_failure_and_leaves_output() {
    let remote = RemoteDisplay::new();
    let mut out = Color::from_rgb8(0x12, 0x34, 0x56);

    let found = remote.defined_color(TerminalId(1), "red", &mut out, true, false);

    assert!(!found);
    assert_eq!(
        out,
        Color::from_rgb8(0x12, 0x34, 0x56),
        "the output parameter must stay exactly as the caller initialized it"
    );
}

#[test]
fn test_loaded_forwards_each_operation_exactly_once_in_order() {
    let driver = Arc::new(RecordingDriver::new());
    let remote = RemoteDisplay::new();
    load_driver(&remote, &driver);

    let tid = TerminalId(2);
    let buf = glyphs("abc");
    remote.cursor_to(tid, 1, 2);
    remote.raw_cursor_to(tid, 3, 4);
    remote.clear_to_end(tid);
    remote.clear_frame(tid);
    remote.clear_end_of_line(tid, 5);
    remote.ins_del_lines(tid, 6, -2);
    remote.insert_glyphs(tid, &buf);
    remote.write_glyphs(tid, &buf);
    remote.delete_glyphs(tid, 7);
    remote.ring_bell(tid);
    remote.reset_terminal_modes(tid);
    remote.set_terminal_modes(tid);
    remote.update_end(tid);
    let _ = remote.menu_show(tid, 8, 9, MenuFlags::FOR_CLICK, "Edit");
    remote.set_terminal_window(tid, 10);
    let mut out = Color::default();
    remote.defined_color(tid, "blue", &mut out, true, false);
    remote.read_avail_input(tid);
    remote.delete_frame(tid);
    remote.delete_terminal(tid);

    assert_eq!(
        driver.calls(),
        vec![
            Call::CursorTo(tid, 1, 2),
            Call::RawCursorTo(tid, 3, 4),
            Call::ClearToEnd(tid),
            Call::ClearFrame(tid),
            Call::ClearEndOfLine(tid, 5),
            Call::InsDelLines(tid, 6, -2),
            Call::InsertGlyphs(tid, buf.clone()),
            Call::WriteGlyphs(tid, buf.clone()),
            Call::DeleteGlyphs(tid, 7),
            Call::RingBell(tid),
            Call::ResetTerminalModes(tid),
            Call::SetTerminalModes(tid),
            Call::UpdateEnd(tid),
            Call::MenuShow(tid, 8, 9, MenuFlags::FOR_CLICK, "Edit".to_string()),
            Call::SetTerminalWindow(tid, 10),
            Call::DefinedColor(tid, "blue".to_string(), true, false),
            Call::ReadAvailInput(tid),
            Call::DeleteFrame(tid),
            Call::DeleteTerminal(tid),
        ]
    );
}

#[test]
fn test_write_glyphs_passes_buffer_and_length_unchanged() {
    let driver = Arc::new(RecordingDriver::new());
    let remote = RemoteDisplay::new();
    load_driver(&remote, &driver);

    let buf = glyphs("hello");
    assert_eq!(buf.len(), 5);
    remote.write_glyphs(TerminalId(3), &buf);

    assert_eq!(driver.calls(), vec![Call::WriteGlyphs(TerminalId(3), buf)]);
}

#[test]
fn test_cursor_to_forwards_while_loaded_then_goes_silent_after_stop() {
    let driver = Arc::new(RecordingDriver::new());
    let remote = RemoteDisplay::new();
    load_driver(&remote, &driver);

    remote.cursor_to(TerminalId(1), 4, 10);
    assert_eq!(driver.calls(), vec![Call::CursorTo(TerminalId(1), 4, 10)]);

    remote.stop_server().unwrap();
    remote.cursor_to(TerminalId(1), 4, 10);

    assert_eq!(
        driver.call_count(),
        1,
        "after stop_server the driver must not be invoked again"
    );
}

#[test]
fn test_start_then_stop_matches_never_started() {
    let remote = RemoteDisplay::new();
    remote.start_server().unwrap();
    remote.stop_server().unwrap();

    assert!(!remote.is_loaded());
    let mut out = Color::from_rgb8(7, 7, 7);
    assert!(!remote.defined_color(TerminalId(0), "red", &mut out, false, false));
    assert_eq!(out, Color::from_rgb8(7, 7, 7));
    assert_eq!(remote.read_avail_input(TerminalId(0)), 0);
}

#[test]
fn test_connector_failure_leaves_layer_fully_unloaded() {
    let remote = RemoteDisplay::new();
    let result = remote.start_server_with(|| anyhow::bail!("remote library unavailable"));

    assert!(result.is_err());
    assert!(!remote.is_loaded());
    assert_eq!(remote.read_avail_input(TerminalId(0)), 0);
}

#[test]
fn test_defined_color_loaded_propagates_result_and_output() {
    let driver = Arc::new(RecordingDriver::with_color(Color::from_rgb8(0xff, 0, 0)));
    let remote = RemoteDisplay::new();
    load_driver(&remote, &driver);

    let mut out = Color::default();
    let found = remote.defined_color(TerminalId(4), "red", &mut out, true, false);

    assert!(found);
    assert_eq!(out, Color::from_rgb8(0xff, 0, 0));
}

#[test]
fn test_menu_show_propagates_the_error_string() {
    let driver = Arc::new(RecordingDriver::with_menu_error("menus not supported"));
    let remote = RemoteDisplay::new();
    load_driver(&remote, &driver);

    let error = remote.menu_show(TerminalId(0), 10, 20, MenuFlags::KEYMAPS, "Tools");
    assert_eq!(error.as_deref(), Some("menus not supported"));
}

#[test]
fn test_read_avail_input_propagates_the_count() {
    let driver = Arc::new(RecordingDriver::with_input_count(11));
    let remote = RemoteDisplay::new();
    load_driver(&remote, &driver);

    assert_eq!(remote.read_avail_input(TerminalId(0)), 11);
}

proptest! {
    #[test]
    fn prop_cursor_coordinates_pass_through(
        tid in 0usize..64,
        vpos in any::<i32>(),
        hpos in any::<i32>(),
    ) {
        let driver = Arc::new(RecordingDriver::new());
        let remote = RemoteDisplay::new();
        load_driver(&remote, &driver);

        remote.cursor_to(TerminalId(tid), vpos, hpos);

        prop_assert_eq!(driver.calls(), vec![Call::CursorTo(TerminalId(tid), vpos, hpos)]);
    }

    #[test]
    fn prop_glyph_buffers_pass_through_unchanged(
        chars in proptest::collection::vec(any::<char>(), 0..16),
    ) {
        let buf: Vec<Glyph> = chars.into_iter().map(Glyph::new).collect();
        let driver = Arc::new(RecordingDriver::new());
        let remote = RemoteDisplay::new();
        load_driver(&remote, &driver);

        remote.write_glyphs(TerminalId(3), &buf);

        prop_assert_eq!(driver.calls(), vec![Call::WriteGlyphs(TerminalId(3), buf)]);
    }
}
