//! Category colors and the shared graph palette.

use std::fmt;

use serde::{Serialize, Serializer};

use crate::graph::NodeCategory;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GraphPalette {
    pub background: Color,
    pub entity: Color,
    pub action: Color,
    pub risk: Color,
    pub outcome: Color,
    pub other: Color,
    pub node_fill: Color,
    pub node_fill_hovered: Color,
    pub node_label: Color,
    pub edge: Color,
    pub edge_label: Color,
    pub tooltip_background: Color,
    pub tooltip_text: Color,
}

impl GraphPalette {
    pub fn dark() -> Self {
        Self {
            background: hex_color("#020617"),
            entity: hex_color("#22d3ee"),
            action: hex_color("#4ade80"),
            risk: hex_color("#f87171"),
            outcome: hex_color("#fbbf24"),
            other: hex_color("#94a3b8"),
            node_fill: hex_color("#0f172a"),
            node_fill_hovered: hex_color("#f8fafc"),
            node_label: hex_color("#e2e8f0"),
            edge: hex_color("#64748b"),
            edge_label: hex_color("#94a3b8"),
            tooltip_background: hex_color("#0f172a"),
            tooltip_text: hex_color("#f8fafc"),
        }
    }
}

impl Default for GraphPalette {
    fn default() -> Self {
        Self::dark()
    }
}

/// Maps node categories to display colors.
#[derive(Debug, Clone, Copy, Default)]
pub struct ColorPolicy {
    palette: GraphPalette,
}

impl ColorPolicy {
    pub fn new(palette: GraphPalette) -> Self {
        Self { palette }
    }

    pub fn palette(&self) -> &GraphPalette {
        &self.palette
    }

    /// Stroke color for a node. Unrecognized categories get the neutral slate.
    pub fn category_color(&self, category: &NodeCategory) -> Color {
        match category {
            NodeCategory::Entity => self.palette.entity,
            NodeCategory::Action => self.palette.action,
            NodeCategory::Risk => self.palette.risk,
            NodeCategory::Outcome => self.palette.outcome,
            NodeCategory::Other(_) => self.palette.other,
        }
    }

    /// Fill inverts from dark to light while hovered.
    pub fn node_fill(&self, hovered: bool) -> Color {
        if hovered {
            self.palette.node_fill_hovered
        } else {
            self.palette.node_fill
        }
    }
}

fn hex_color(hex: &str) -> Color {
    let hex = hex.trim_start_matches('#');
    if hex.len() != 6 {
        return Color::rgb(255, 255, 255);
    }
    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).unwrap_or(0);
    Color::rgb(channel(0), channel(2), channel(4))
}
