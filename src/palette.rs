//! Block colors
//!
//! Function-like blocks take a color from [`FUNCTION_PALETTE`], chosen by the
//! configured [`ColorPolicy`]. Classes and declaration kinds use one fixed
//! color each.

use std::collections::hash_map::DefaultHasher;
use std::fmt;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize, Serializer};

use crate::blocks::{Block, BlockKind};

/// RGBA color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    /// Create a new color from RGB values (alpha defaults to 255)
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Create a new color from RGBA values
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Parse from "#RRGGBB" or "#RRGGBBAA" hex string
    pub fn from_hex(s: &str) -> Result<Self, String> {
        let s = s.trim_start_matches('#');
        if !s.is_ascii() {
            return Err(format!("Invalid color format: {}", s));
        }
        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&s[range], 16).map_err(|e| e.to_string())
        };
        match s.len() {
            6 => Ok(Color::rgb(channel(0..2)?, channel(2..4)?, channel(4..6)?)),
            8 => Ok(Color::rgba(
                channel(0..2)?,
                channel(2..4)?,
                channel(4..6)?,
                channel(6..8)?,
            )),
            _ => Err(format!("Invalid color format: {}", s)),
        }
    }
}

/// `#RRGGBBAA`, the form host decoration APIs take
impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}{:02X}", self.r, self.g, self.b, self.a)
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Band colors for function-like blocks, translucent so text stays readable
pub const FUNCTION_PALETTE: &[Color] = &[
    Color::rgba(0x4F, 0x9D, 0xDE, 0x26),
    Color::rgba(0x8B, 0xC3, 0x4A, 0x26),
    Color::rgba(0xE0, 0x9F, 0x3E, 0x26),
    Color::rgba(0xC6, 0x78, 0xDD, 0x26),
    Color::rgba(0x56, 0xB6, 0xC2, 0x26),
    Color::rgba(0xE0, 0x6C, 0x75, 0x26),
    Color::rgba(0xD1, 0x9A, 0x66, 0x26),
    Color::rgba(0x98, 0xC3, 0x79, 0x26),
];

pub const CLASS_COLOR: Color = Color::rgba(0xAB, 0xB2, 0xBF, 0x1A);
pub const EXPORTED_COLOR: Color = Color::rgba(0x61, 0xAF, 0xEF, 0x1A);
pub const CONSTANT_COLOR: Color = Color::rgba(0xD1, 0x9A, 0x66, 0x1A);
pub const TYPE_COLOR: Color = Color::rgba(0x56, 0xB6, 0xC2, 0x1A);
pub const INTERFACE_COLOR: Color = Color::rgba(0x4E, 0xC9, 0xB0, 0x1A);
pub const ENUM_COLOR: Color = Color::rgba(0xE5, 0xC0, 0x7B, 0x1A);

/// Default style for marked regions
pub const REGION_COLOR: Color = Color::rgba(0x80, 0x80, 0x80, 0x14);
pub const REGION_BORDER: Color = Color::rgba(0x80, 0x80, 0x80, 0x66);

/// How function-like blocks pick their palette entry
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorPolicy {
    /// Stable hash of (title, start line); a block keeps its color while
    /// unrelated code changes elsewhere
    #[default]
    Hash,
    /// Nesting depth; neighbours at different depths always differ
    Depth,
}

impl ColorPolicy {
    pub fn parse(s: &str) -> Result<Self, String> {
        match s.trim().to_ascii_lowercase().as_str() {
            "hash" => Ok(ColorPolicy::Hash),
            "depth" => Ok(ColorPolicy::Depth),
            other => Err(format!("Unknown color policy: {}", other)),
        }
    }

    /// Palette index for a block
    pub fn palette_index(&self, title: &str, start_line: usize, depth: usize) -> usize {
        match self {
            ColorPolicy::Hash => {
                let mut hasher = DefaultHasher::new();
                title.hash(&mut hasher);
                start_line.hash(&mut hasher);
                (hasher.finish() % FUNCTION_PALETTE.len() as u64) as usize
            }
            ColorPolicy::Depth => depth % FUNCTION_PALETTE.len(),
        }
    }
}

/// Fixed color of a kind outside the function-like family
pub fn kind_color(kind: BlockKind) -> Option<Color> {
    match kind {
        BlockKind::Class => Some(CLASS_COLOR),
        BlockKind::Exported => Some(EXPORTED_COLOR),
        BlockKind::Constant => Some(CONSTANT_COLOR),
        BlockKind::Type => Some(TYPE_COLOR),
        BlockKind::Interface => Some(INTERFACE_COLOR),
        BlockKind::Enum => Some(ENUM_COLOR),
        BlockKind::Function | BlockKind::Method | BlockKind::Hook | BlockKind::Component => None,
    }
}

/// Color of a block under `policy`
pub fn block_color(block: &Block, policy: ColorPolicy) -> Color {
    kind_color(block.kind).unwrap_or_else(|| {
        FUNCTION_PALETTE[policy.palette_index(&block.title, block.range.start, block.depth)]
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blocks::LineRange;

    #[test]
    fn test_from_hex() {
        assert_eq!(Color::from_hex("#FF8000"), Ok(Color::rgb(0xFF, 0x80, 0x00)));
        assert_eq!(
            Color::from_hex("10203040"),
            Ok(Color::rgba(0x10, 0x20, 0x30, 0x40))
        );
        assert!(Color::from_hex("#FFF").is_err());
        assert!(Color::from_hex("#GG0000").is_err());
        assert!(Color::from_hex("#ééé").is_err());
    }

    #[test]
    fn test_display_is_rrggbbaa() {
        assert_eq!(Color::rgb(0x12, 0xAB, 0x00).to_string(), "#12AB00FF");
    }

    #[test]
    fn test_hash_policy_is_deterministic() {
        let a = ColorPolicy::Hash.palette_index("render", 12, 0);
        let b = ColorPolicy::Hash.palette_index("render", 12, 3);
        assert_eq!(a, b);
        assert!(a < FUNCTION_PALETTE.len());
    }

    #[test]
    fn test_depth_policy_wraps() {
        let n = FUNCTION_PALETTE.len();
        assert_eq!(ColorPolicy::Depth.palette_index("x", 0, 1), 1);
        assert_eq!(ColorPolicy::Depth.palette_index("x", 0, n + 2), 2);
    }

    #[test]
    fn test_fixed_kind_colors() {
        let class = Block::new(LineRange::new(0, 3), BlockKind::Class, "Store", 0);
        assert_eq!(block_color(&class, ColorPolicy::Depth), CLASS_COLOR);
        assert_eq!(block_color(&class, ColorPolicy::Hash), CLASS_COLOR);

        let func = Block::new(LineRange::new(0, 3), BlockKind::Function, "run", 1);
        assert_eq!(block_color(&func, ColorPolicy::Depth), FUNCTION_PALETTE[1]);
    }

    #[test]
    fn test_parse_policy() {
        assert_eq!(ColorPolicy::parse("Depth"), Ok(ColorPolicy::Depth));
        assert!(ColorPolicy::parse("random").is_err());
    }
}
