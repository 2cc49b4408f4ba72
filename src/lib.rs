//! Headless window-system backend for an editor-style host.
//!
//! Every drawing, font, menu, and input entry point a display backend must
//! provide is implemented here as a recorded no-op or a documented neutral
//! value. The one active piece is the remote-forwarding layer in [`remote`]:
//! an optional external implementation can be attached at runtime, and while
//! it is attached every terminal operation is forwarded to it, arguments
//! unchanged, before the previously installed hook runs.
//!
//! Nothing in this crate panics, blocks, or touches a display server; with
//! nothing attached the only observable difference to a real backend is that
//! nothing is drawn.

pub mod color;
pub mod display;
pub mod driver;
pub mod event;
pub mod font;
pub mod frame;
pub mod hooks;
pub mod menu;
pub mod remote;
pub mod terminal;

use serde::{Deserialize, Serialize};

/// Unique identifier for a terminal session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TerminalId(pub usize);

impl std::fmt::Display for TerminalId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Terminal-{}", self.0)
    }
}

/// Unique identifier for a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FrameId(pub usize);

impl std::fmt::Display for FrameId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Frame-{}", self.0)
    }
}

/// One display cell as handed to the glyph operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Glyph {
    pub ch: char,
    /// Face the glyph is displayed with; 0 is the default face.
    pub face_id: u32,
}

impl Glyph {
    pub fn new(ch: char) -> Self {
        Self { ch, face_id: 0 }
    }
}

pub use color::{Color, ColorMap};
pub use display::{DisplayConfig, DisplayInfo, HeadlessDisplay};
pub use driver::{NullDriver, RemoteDriver};
pub use event::{keysym_name, EventQueue, InputEvent, Modifiers};
pub use font::{FontMetrics, HeadlessFont, HeadlessFontDriver};
pub use frame::{Frame, FrameParams};
pub use hooks::{install_forwarding_hooks, HookTable};
pub use menu::MenuFlags;
pub use remote::RemoteDisplay;
pub use terminal::Terminal;
