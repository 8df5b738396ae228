use serde::Serialize;

use crate::cell::{Cell, Slot};
use crate::string_table::StringTable;
use crate::token::PoiGroup;

/// Complete room layout parsed from one `.arm` file.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Room {
    pub version: u32,
    /// Supplementary reference terminating the points-of-interest block.
    pub overrides: Option<String>,
    pub strings: StringTable,
    pub dims: Vec<i64>,
    /// Both header blocks followed by the size-derived extra blocks, in read order.
    pub numbers: Vec<Vec<i64>>,
    pub tag: String,
    #[serde(rename = "pois")]
    pub points_of_interest: Vec<PoiGroup>,
    pub doodads: Vec<PoiGroup>,
    /// `root_slot.height` rows of `root_slot.width` cells.
    pub grid: Vec<Vec<Cell>>,
    pub root_slot: Slot,
}

impl Room {
    pub fn width(&self) -> usize {
        self.root_slot.width as usize
    }

    pub fn height(&self) -> usize {
        self.root_slot.height as usize
    }

    /// Every slot in the room: the root slot first, then grid slots row by row.
    pub fn slots(&self) -> impl Iterator<Item = &Slot> {
        std::iter::once(&self.root_slot)
            .chain(self.grid.iter().flatten().filter_map(Cell::as_slot))
    }

    /// Distinct edge type names referenced by any slot, in first-seen order.
    pub fn edge_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        for slot in self.slots() {
            for edge in [&slot.edges.n, &slot.edges.w, &slot.edges.s, &slot.edges.e] {
                if let Some(name) = edge.edge.as_deref() {
                    if !names.contains(&name) {
                        names.push(name);
                    }
                }
            }
        }
        names
    }
}
