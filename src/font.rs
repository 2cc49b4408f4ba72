//! Font stub.
//!
//! A headless display has no font system behind it, so metrics are fixed
//! neutral values and nothing is ever rasterized. The host still gets
//! well-formed answers for every query it can make.

use anyhow::{bail, Result};

/// Extents of a glyph run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FontMetrics {
    pub lbearing: i32,
    pub rbearing: i32,
    pub width: i32,
    pub ascent: i32,
    pub descent: i32,
}

/// A font the host believes is open.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeadlessFont {
    pub name: String,
    pub pixel_size: i32,
}

impl HeadlessFont {
    /// Headless fonts cover no characters.
    pub fn has_char(&self, _ch: char) -> bool {
        false
    }

    /// The code for a character is the character itself.
    pub fn encode_char(&self, ch: char) -> u32 {
        ch as u32
    }

    /// Extents of `codes`: zero in every direction.
    pub fn text_extents(&self, _codes: &[u32]) -> FontMetrics {
        FontMetrics::default()
    }

    /// Draw a glyph run; returns the number of glyphs actually drawn.
    pub fn draw(&self, _codes: &[u32], _x: i32, _y: i32, _with_background: bool) -> usize {
        0
    }
}

/// The font driver registered for a headless display.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeadlessFontDriver;

impl HeadlessFontDriver {
    /// Families available on a headless display: none.
    pub fn list_family(&self) -> Vec<String> {
        Vec::new()
    }

    /// Opening a font by name cannot succeed without a font system.
    pub fn open_font(&self, name: &str, _pixel_size: i32) -> Result<HeadlessFont> {
        bail!("headless display cannot open font {:?}", name);
    }
}
