//! Display records and the top-level headless context.
//!
//! [`HeadlessDisplay`] is the owned entry point: it holds the per-display
//! information, the shared remote forwarding layer, and the terminal and
//! frame registries. Terminals get their forwarding hooks installed at
//! creation, before any operation can reach them.

use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::color::{Color, ColorMap};
use crate::frame::{Frame, FrameParams};
use crate::hooks::{install_forwarding_hooks, HookTable};
use crate::remote::RemoteDisplay;
use crate::terminal::Terminal;
use crate::{FrameId, TerminalId};

/// Static parameters of the headless display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// Display name reported to the host.
    #[serde(default = "default_name")]
    pub name: String,
    /// Nominal pixel resolution. Nothing is ever rasterized at it; the host
    /// just needs a finite answer for geometry queries.
    #[serde(default = "default_width")]
    pub width: u32,
    #[serde(default = "default_height")]
    pub height: u32,
    /// Reported color planes.
    #[serde(default = "default_planes")]
    pub planes: u8,
}

fn default_name() -> String {
    "headless".to_string()
}

fn default_width() -> u32 {
    1920
}

fn default_height() -> u32 {
    1080
}

fn default_planes() -> u8 {
    24
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            name: default_name(),
            width: default_width(),
            height: default_height(),
            planes: default_planes(),
        }
    }
}

impl DisplayConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read display config {}", path.display()))?;
        serde_json::from_str(&text)
            .with_context(|| format!("failed to parse display config {}", path.display()))
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let text = serde_json::to_string_pretty(self)?;
        fs::write(path, text)
            .with_context(|| format!("failed to write display config {}", path.display()))
    }
}

/// Per-display state shared by every terminal on the display.
#[derive(Debug)]
pub struct DisplayInfo {
    pub config: DisplayConfig,
    pub color_map: ColorMap,
    resources: HashMap<String, String>,
    /// Minimum character cell the host may assume. One by one keeps every
    /// layout computation finite without a real font.
    pub smallest_char_width: i32,
    pub smallest_font_height: i32,
}

impl DisplayInfo {
    pub fn new(config: DisplayConfig) -> Self {
        Self {
            config,
            color_map: ColorMap::builtin(),
            resources: HashMap::new(),
            smallest_char_width: 1,
            smallest_font_height: 1,
        }
    }

    /// Look up a string resource. Headless displays have no resource
    /// database unless the host seeds one.
    pub fn get_string_resource(&self, name: &str) -> Option<&str> {
        self.resources.get(name).map(String::as_str)
    }

    pub fn set_string_resource(&mut self, name: &str, value: &str) {
        self.resources.insert(name.to_string(), value.to_string());
    }

    /// Resolve `name` against the display color map, writing into `color`
    /// only on success.
    pub fn defined_color(&self, name: &str, color: &mut Color) -> bool {
        match self.color_map.lookup(name) {
            Some(found) => {
                *color = found;
                true
            }
            None => false,
        }
    }

    pub fn pixel_width(&self) -> i32 {
        self.config.width as i32
    }

    pub fn pixel_height(&self) -> i32 {
        self.config.height as i32
    }
}

/// The owned headless backend context.
pub struct HeadlessDisplay {
    info: DisplayInfo,
    remote: Arc<RemoteDisplay>,
    terminals: HashMap<TerminalId, Terminal>,
    frames: HashMap<FrameId, Frame>,
    next_terminal: usize,
    next_frame: usize,
}

impl HeadlessDisplay {
    pub fn new(config: DisplayConfig) -> Self {
        info!(
            name = %config.name,
            width = config.width,
            height = config.height,
            "initializing headless display"
        );
        Self {
            info: DisplayInfo::new(config),
            remote: Arc::new(RemoteDisplay::new()),
            terminals: HashMap::new(),
            frames: HashMap::new(),
            next_terminal: 0,
            next_frame: 0,
        }
    }

    pub fn info(&self) -> &DisplayInfo {
        &self.info
    }

    pub fn info_mut(&mut self) -> &mut DisplayInfo {
        &mut self.info
    }

    /// The shared remote forwarding layer; the server is started and
    /// stopped through it.
    pub fn remote(&self) -> &Arc<RemoteDisplay> {
        &self.remote
    }

    /// Create a terminal with no pre-existing hooks.
    pub fn create_terminal(&mut self) -> Result<TerminalId> {
        self.create_terminal_with_hooks(HookTable::new())
    }

    /// Create a terminal whose current hooks are `hooks`, then install the
    /// forwarding layer over them. Installation happens here, exactly once,
    /// before any operation can reach the terminal.
    pub fn create_terminal_with_hooks(&mut self, hooks: HookTable) -> Result<TerminalId> {
        let id = TerminalId(self.next_terminal);
        self.next_terminal += 1;
        let mut terminal = Terminal::new(id);
        terminal.hooks = hooks;
        install_forwarding_hooks(&mut terminal, &self.remote)?;
        debug!(terminal = %id, "created terminal");
        self.terminals.insert(id, terminal);
        Ok(id)
    }

    pub fn terminal(&self, id: TerminalId) -> Option<&Terminal> {
        self.terminals.get(&id)
    }

    pub fn terminal_mut(&mut self, id: TerminalId) -> Option<&mut Terminal> {
        self.terminals.get_mut(&id)
    }

    pub fn terminal_count(&self) -> usize {
        self.terminals.len()
    }

    /// Delete any frames still on the terminal, run the delete-terminal
    /// operation, and drop the record.
    pub fn delete_terminal(&mut self, id: TerminalId) -> Result<()> {
        if !self.terminals.contains_key(&id) {
            bail!("no such terminal: {id}");
        }
        let orphaned: Vec<FrameId> = self
            .frames
            .values()
            .filter(|frame| frame.terminal == id)
            .map(|frame| frame.id)
            .collect();
        for frame in orphaned {
            self.delete_frame(frame)?;
        }
        if let Some(terminal) = self.terminals.remove(&id) {
            terminal.delete_terminal();
        }
        info!(terminal = %id, "deleted terminal");
        Ok(())
    }

    pub fn create_frame(&mut self, terminal: TerminalId, params: FrameParams) -> Result<FrameId> {
        if !self.terminals.contains_key(&terminal) {
            bail!("no such terminal: {terminal}");
        }
        let id = FrameId(self.next_frame);
        self.next_frame += 1;
        debug!(frame = %id, terminal = %terminal, "created frame");
        self.frames.insert(id, Frame::new(id, terminal, params));
        Ok(id)
    }

    pub fn frame(&self, id: FrameId) -> Option<&Frame> {
        self.frames.get(&id)
    }

    pub fn frame_mut(&mut self, id: FrameId) -> Option<&mut Frame> {
        self.frames.get_mut(&id)
    }

    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    /// Run the delete-frame operation on the owning terminal, then drop the
    /// frame record.
    pub fn delete_frame(&mut self, id: FrameId) -> Result<()> {
        let Some(frame) = self.frames.remove(&id) else {
            bail!("no such frame: {id}");
        };
        if let Some(terminal) = self.terminals.get(&frame.terminal) {
            terminal.delete_frame();
        }
        debug!(frame = %id, "deleted frame");
        Ok(())
    }
}

impl std::fmt::Debug for HeadlessDisplay {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HeadlessDisplay")
            .field("name", &self.info.config.name)
            .field("terminals", &self.terminals.len())
            .field("frames", &self.frames.len())
            .finish()
    }
}
