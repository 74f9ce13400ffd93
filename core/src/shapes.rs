// SPDX-License-Identifier: MIT OR Apache-2.0

//! Block shapes and the standard shape catalog

use serde::{Deserialize, Serialize};

/// Immutable block template: a small matrix of occupied offsets
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BlockShape {
    name: String,
    /// Occupancy matrix, `cells[r][c]`
    cells: Vec<Vec<bool>>,
}

impl BlockShape {
    /// Create a shape from an occupancy matrix
    pub fn new(name: impl Into<String>, cells: Vec<Vec<bool>>) -> Self {
        Self {
            name: name.into(),
            cells,
        }
    }

    /// Create a shape from text rows where `#` marks an occupied offset
    pub fn from_rows(name: impl Into<String>, rows: &[&str]) -> Self {
        let cells = rows
            .iter()
            .map(|row| row.chars().map(|c| c == '#').collect())
            .collect();
        Self::new(name, cells)
    }

    /// Shape name, unique within a catalog
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of occupied offsets
    pub fn cell_count(&self) -> usize {
        self.cells.iter().flatten().filter(|&&filled| filled).count()
    }

    /// Number of rows in the bounding matrix
    pub fn height(&self) -> usize {
        self.cells.len()
    }

    /// Number of columns in the bounding matrix
    pub fn width(&self) -> usize {
        self.cells.iter().map(Vec::len).max().unwrap_or(0)
    }

    /// Occupied (row, col) offsets relative to the anchor, row-major
    pub fn offsets(&self) -> Vec<(usize, usize)> {
        let mut result = Vec::with_capacity(self.cell_count());
        for (r, row) in self.cells.iter().enumerate() {
            for (c, &filled) in row.iter().enumerate() {
                if filled {
                    result.push((r, c));
                }
            }
        }
        result
    }

    /// A shape with no occupied offsets
    pub fn is_empty(&self) -> bool {
        self.cell_count() == 0
    }
}

/// Read-only collection of named shapes
#[derive(Debug, Clone)]
pub struct ShapeCatalog {
    shapes: Vec<BlockShape>,
}

impl ShapeCatalog {
    /// Create a catalog from an explicit list of shapes
    pub fn new(shapes: Vec<BlockShape>) -> Self {
        Self { shapes }
    }

    /// The standard Blockdoku piece set
    pub fn standard() -> Self {
        let defs: &[(&str, &[&str])] = &[
            ("single", &["#"]),
            ("domino_h", &["##"]),
            ("domino_v", &["#", "#"]),
            ("line3_h", &["###"]),
            ("line3_v", &["#", "#", "#"]),
            ("line4_h", &["####"]),
            ("line4_v", &["#", "#", "#", "#"]),
            ("line5_h", &["#####"]),
            ("line5_v", &["#", "#", "#", "#", "#"]),
            ("square", &["##", "##"]),
            ("corner_tl", &["##", "#."]),
            ("corner_tr", &["##", ".#"]),
            ("corner_bl", &["#.", "##"]),
            ("corner_br", &[".#", "##"]),
            ("l_up", &["#.", "#.", "##"]),
            ("l_right", &["###", "#.."]),
            ("l_down", &["##", ".#", ".#"]),
            ("l_left", &["..#", "###"]),
            ("t_up", &[".#.", "###"]),
            ("t_down", &["###", ".#."]),
            ("t_left", &[".#", "##", ".#"]),
            ("t_right", &["#.", "##", "#."]),
            ("s_h", &[".##", "##."]),
            ("z_h", &["##.", ".##"]),
            ("s_v", &["#.", "##", ".#"]),
            ("z_v", &[".#", "##", "#."]),
            ("plus", &[".#.", "###", ".#."]),
            ("big_corner", &["###", "#..", "#.."]),
        ];

        Self::new(
            defs.iter()
                .map(|(name, rows)| BlockShape::from_rows(*name, rows))
                .collect(),
        )
    }

    /// Look up a shape by name
    pub fn get(&self, name: &str) -> Option<&BlockShape> {
        self.shapes.iter().find(|shape| shape.name() == name)
    }

    /// All shapes in catalog order
    pub fn shapes(&self) -> &[BlockShape] {
        &self.shapes
    }

    /// Number of shapes
    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    /// Check if the catalog has no shapes
    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }
}

impl Default for ShapeCatalog {
    fn default() -> Self {
        Self::standard()
    }
}
