//! Remote display lifecycle and forwarding.
//!
//! [`RemoteDisplay`] owns the loaded-or-not state of the optional external
//! implementation and presents an always-safe call surface: while nothing
//! is loaded every operation degrades to its neutral result, and a failed
//! load leaves the state fully unloaded.
//!
//! The state machine is two states, `unloaded` and `loaded`, transitioned
//! only by the explicit start/stop calls. Forwarding itself is stateless:
//! at most one indirect call per invocation, no queuing and no retries.

use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use anyhow::{bail, Context, Result};
use tracing::{debug, info, trace};

use crate::color::Color;
use crate::driver::RemoteDriver;
use crate::menu::MenuFlags;
use crate::{Glyph, TerminalId};

type DriverSlot = Option<Arc<dyn RemoteDriver>>;

/// The forwarding layer for one headless display.
///
/// The slot is written only by [`start_server_with`](Self::start_server_with)
/// and [`stop_server`](Self::stop_server); forwarding calls only read it.
#[derive(Default)]
pub struct RemoteDisplay {
    driver: RwLock<DriverSlot>,
}

impl RemoteDisplay {
    pub fn new() -> Self {
        Self::default()
    }

    /// Report the server as started without attaching an implementation.
    ///
    /// Hosts that run fully headless only need the lifecycle call to
    /// succeed; attaching a real implementation is the
    /// [`start_server_with`](Self::start_server_with) path.
    pub fn start_server(&self) -> Result<()> {
        info!("headless display server started (no remote implementation)");
        Ok(())
    }

    /// Attach the implementation produced by `connect`.
    ///
    /// All-or-nothing: when `connect` fails nothing is attached and the
    /// error is returned. A second load while one is active is rejected;
    /// stop first.
    pub fn start_server_with<F>(&self, connect: F) -> Result<()>
    where
        F: FnOnce() -> Result<Arc<dyn RemoteDriver>>,
    {
        if self.is_loaded() {
            bail!("a remote display implementation is already loaded");
        }
        let driver = connect().context("failed to load remote display implementation")?;
        *self.write_slot() = Some(driver);
        info!("remote display implementation loaded");
        Ok(())
    }

    /// Detach the remote implementation, returning to the unloaded state.
    ///
    /// Stopping with nothing loaded is accepted as a no-op.
    pub fn stop_server(&self) -> Result<()> {
        if self.write_slot().take().is_some() {
            info!("remote display implementation unloaded");
        } else {
            debug!("stop_server with no remote implementation loaded");
        }
        Ok(())
    }

    pub fn is_loaded(&self) -> bool {
        self.read_slot().is_some()
    }

    fn driver(&self) -> DriverSlot {
        self.read_slot().clone()
    }

    // A poisoned lock can only mean a panic inside another thread's
    // start/stop; the slot value itself is still a valid state either way.
    fn read_slot(&self) -> RwLockReadGuard<'_, DriverSlot> {
        self.driver.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write_slot(&self) -> RwLockWriteGuard<'_, DriverSlot> {
        self.driver.write().unwrap_or_else(|e| e.into_inner())
    }
}

impl std::fmt::Debug for RemoteDisplay {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RemoteDisplay")
            .field("loaded", &self.is_loaded())
            .finish()
    }
}

impl RemoteDriver for RemoteDisplay {
    fn cursor_to(&self, terminal: TerminalId, vpos: i32, hpos: i32) {
        if let Some(driver) = self.driver() {
            trace!(%terminal, vpos, hpos, "forward cursor_to");
            driver.cursor_to(terminal, vpos, hpos);
        }
    }

    fn raw_cursor_to(&self, terminal: TerminalId, row: i32, col: i32) {
        if let Some(driver) = self.driver() {
            driver.raw_cursor_to(terminal, row, col);
        }
    }

    fn clear_to_end(&self, terminal: TerminalId) {
        if let Some(driver) = self.driver() {
            driver.clear_to_end(terminal);
        }
    }

    fn clear_frame(&self, terminal: TerminalId) {
        if let Some(driver) = self.driver() {
            driver.clear_frame(terminal);
        }
    }

    fn clear_end_of_line(&self, terminal: TerminalId, first_unused_hpos: i32) {
        if let Some(driver) = self.driver() {
            driver.clear_end_of_line(terminal, first_unused_hpos);
        }
    }

    fn ins_del_lines(&self, terminal: TerminalId, vpos: i32, n: i32) {
        if let Some(driver) = self.driver() {
            driver.ins_del_lines(terminal, vpos, n);
        }
    }

    fn insert_glyphs(&self, terminal: TerminalId, glyphs: &[Glyph]) {
        if let Some(driver) = self.driver() {
            trace!(%terminal, len = glyphs.len(), "forward insert_glyphs");
            driver.insert_glyphs(terminal, glyphs);
        }
    }

    fn write_glyphs(&self, terminal: TerminalId, glyphs: &[Glyph]) {
        if let Some(driver) = self.driver() {
            trace!(%terminal, len = glyphs.len(), "forward write_glyphs");
            driver.write_glyphs(terminal, glyphs);
        }
    }

    fn delete_glyphs(&self, terminal: TerminalId, n: i32) {
        if let Some(driver) = self.driver() {
            driver.delete_glyphs(terminal, n);
        }
    }

    fn ring_bell(&self, terminal: TerminalId) {
        if let Some(driver) = self.driver() {
            driver.ring_bell(terminal);
        }
    }

    fn reset_terminal_modes(&self, terminal: TerminalId) {
        if let Some(driver) = self.driver() {
            driver.reset_terminal_modes(terminal);
        }
    }

    fn set_terminal_modes(&self, terminal: TerminalId) {
        if let Some(driver) = self.driver() {
            driver.set_terminal_modes(terminal);
        }
    }

    fn update_end(&self, terminal: TerminalId) {
        if let Some(driver) = self.driver() {
            driver.update_end(terminal);
        }
    }

    fn menu_show(
        &self,
        terminal: TerminalId,
        x: i32,
        y: i32,
        flags: MenuFlags,
        title: &str,
    ) -> Option<String> {
        self.driver()
            .and_then(|driver| driver.menu_show(terminal, x, y, flags, title))
    }

    fn set_terminal_window(&self, terminal: TerminalId, size: i32) {
        if let Some(driver) = self.driver() {
            driver.set_terminal_window(terminal, size);
        }
    }

    fn defined_color(
        &self,
        terminal: TerminalId,
        name: &str,
        color: &mut Color,
        alloc: bool,
        make_index: bool,
    ) -> bool {
        match self.driver() {
            Some(driver) => driver.defined_color(terminal, name, color, alloc, make_index),
            None => false,
        }
    }

    fn read_avail_input(&self, terminal: TerminalId) -> usize {
        self.driver()
            .map_or(0, |driver| driver.read_avail_input(terminal))
    }

    fn delete_frame(&self, terminal: TerminalId) {
        if let Some(driver) = self.driver() {
            driver.delete_frame(terminal);
        }
    }

    fn delete_terminal(&self, terminal: TerminalId) {
        if let Some(driver) = self.driver() {
            driver.delete_terminal(terminal);
        }
    }
}
