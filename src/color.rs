//! Color records and name lookup.
//!
//! The headless backend performs no color allocation. Names resolve against
//! an in-memory table so the host's face machinery keeps working with
//! nothing on screen; a miss is reported, never invented.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};

/// A resolved color: packed pixel plus 16-bit channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Color {
    pub pixel: u32,
    pub red: u16,
    pub green: u16,
    pub blue: u16,
}

impl Color {
    /// Build a color from 8-bit channels. The pixel packs as `0xRRGGBB`.
    pub fn from_rgb8(red: u8, green: u8, blue: u8) -> Self {
        Self {
            pixel: (u32::from(red) << 16) | (u32::from(green) << 8) | u32::from(blue),
            red: u16::from(red) * 0x101,
            green: u16::from(green) * 0x101,
            blue: u16::from(blue) * 0x101,
        }
    }

    /// The 8-bit channels recovered from the packed pixel.
    pub fn rgb8(&self) -> (u8, u8, u8) {
        (
            ((self.pixel >> 16) & 0xff) as u8,
            ((self.pixel >> 8) & 0xff) as u8,
            (self.pixel & 0xff) as u8,
        )
    }
}

/// Name-to-color table, keyed case-insensitively.
#[derive(Debug, Clone, Default)]
pub struct ColorMap {
    entries: HashMap<String, Color>,
}

/// The names every host expects to resolve even with no display attached.
const BUILTIN_COLORS: &[(&str, u8, u8, u8)] = &[
    ("black", 0x00, 0x00, 0x00),
    ("white", 0xff, 0xff, 0xff),
    ("red", 0xff, 0x00, 0x00),
    ("green", 0x00, 0xff, 0x00),
    ("blue", 0x00, 0x00, 0xff),
    ("yellow", 0xff, 0xff, 0x00),
    ("cyan", 0x00, 0xff, 0xff),
    ("magenta", 0xff, 0x00, 0xff),
    ("gray", 0xbe, 0xbe, 0xbe),
    ("grey", 0xbe, 0xbe, 0xbe),
    ("dark gray", 0xa9, 0xa9, 0xa9),
    ("dark grey", 0xa9, 0xa9, 0xa9),
    ("light gray", 0xd3, 0xd3, 0xd3),
    ("light grey", 0xd3, 0xd3, 0xd3),
    ("brown", 0xa5, 0x2a, 0x2a),
    ("orange", 0xff, 0xa5, 0x00),
    ("purple", 0xa0, 0x20, 0xf0),
    ("pink", 0xff, 0xc0, 0xcb),
    ("navy", 0x00, 0x00, 0x80),
    ("maroon", 0xb0, 0x30, 0x60),
];

impl ColorMap {
    /// A map with no entries; only hex forms resolve.
    pub fn empty() -> Self {
        Self::default()
    }

    /// The built-in name table.
    pub fn builtin() -> Self {
        let mut map = Self::default();
        for (name, r, g, b) in BUILTIN_COLORS {
            map.insert(name, Color::from_rgb8(*r, *g, *b));
        }
        map
    }

    /// Parse a color list in the classic `R G B name` format.
    ///
    /// Blank lines and lines starting with `!` are skipped; a name may
    /// contain spaces.
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read color file {}", path.display()))?;
        let mut map = Self::default();
        for (lineno, line) in text.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('!') {
                continue;
            }
            let mut fields = line.split_whitespace();
            let (r, g, b) = match (fields.next(), fields.next(), fields.next()) {
                (Some(r), Some(g), Some(b)) => (r, g, b),
                _ => bail!("malformed color entry on line {}: {:?}", lineno + 1, line),
            };
            let name = fields.collect::<Vec<_>>().join(" ");
            if name.is_empty() {
                bail!("color entry on line {} has no name", lineno + 1);
            }
            let channel = |value: &str| -> Result<u8> {
                value
                    .parse()
                    .with_context(|| format!("bad channel value {:?} on line {}", value, lineno + 1))
            };
            map.insert(&name, Color::from_rgb8(channel(r)?, channel(g)?, channel(b)?));
        }
        Ok(map)
    }

    pub fn insert(&mut self, name: &str, color: Color) {
        self.entries.insert(name.to_ascii_lowercase(), color);
    }

    /// Resolve a color name.
    ///
    /// `#rgb` and `#rrggbb` hex forms resolve without consulting the table;
    /// named lookup is case-insensitive.
    pub fn lookup(&self, name: &str) -> Option<Color> {
        if let Some(hex) = name.strip_prefix('#') {
            return parse_hex(hex);
        }
        self.entries.get(&name.to_ascii_lowercase()).copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn parse_hex(hex: &str) -> Option<Color> {
    if !hex.is_ascii() {
        return None;
    }
    match hex.len() {
        3 => {
            let channel = |i: usize| {
                u8::from_str_radix(&hex[i..=i], 16)
                    .ok()
                    .map(|v| v * 0x11)
            };
            Some(Color::from_rgb8(channel(0)?, channel(1)?, channel(2)?))
        }
        6 => {
            let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
            Some(Color::from_rgb8(channel(0)?, channel(2)?, channel(4)?))
        }
        _ => None,
    }
}
