use serde::Serialize;
use strum::{AsRefStr, EnumIter, EnumString, FromRepr, IntoStaticStr};

/// One-character tag that starts every cell record.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, EnumString, IntoStaticStr, EnumIter,
)]
pub enum CellTag {
    #[strum(serialize = "k")]
    #[serde(rename = "k")]
    Slot,
    #[strum(serialize = "f")]
    #[serde(rename = "f")]
    Fill,
    #[strum(serialize = "s")]
    #[serde(rename = "s")]
    Static,
    #[strum(serialize = "o")]
    #[serde(rename = "o")]
    Open,
    #[strum(serialize = "n")]
    #[serde(rename = "n")]
    Null,
}

impl CellTag {
    pub fn as_str(self) -> &'static str {
        self.into()
    }
}

/// Edge directions, in the order their fields appear in a slot record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, AsRefStr, EnumIter, FromRepr)]
#[repr(u8)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    N = 0,
    W = 1,
    S = 2,
    E = 3,
}

/// Slot corners, in record order. Also the anchor selector's value space.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, AsRefStr, EnumIter, FromRepr,
)]
#[repr(u8)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Corner {
    #[default]
    Sw = 0,
    Se = 1,
    Ne = 2,
    Nw = 3,
}

/// One side of a slot.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Edge {
    /// Edge type name from the string table.
    pub edge: Option<String>,
    pub exit: i64,
    pub virtual_exit: i64,
}

/// Ground type and height at one corner of a slot.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CornerInfo {
    pub ground: Option<String>,
    pub height: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Edges {
    pub n: Edge,
    pub w: Edge,
    pub s: Edge,
    pub e: Edge,
}

impl Edges {
    pub fn get_mut(&mut self, dir: Direction) -> &mut Edge {
        match dir {
            Direction::N => &mut self.n,
            Direction::W => &mut self.w,
            Direction::S => &mut self.s,
            Direction::E => &mut self.e,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Corners {
    pub sw: CornerInfo,
    pub se: CornerInfo,
    pub ne: CornerInfo,
    pub nw: CornerInfo,
}

impl Corners {
    pub fn get_mut(&mut self, corner: Corner) -> &mut CornerInfo {
        match corner {
            Corner::Sw => &mut self.sw,
            Corner::Se => &mut self.se,
            Corner::Ne => &mut self.ne,
            Corner::Nw => &mut self.nw,
        }
    }
}

/// A connectable sub-room: its footprint, edges and corner ground.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Slot {
    pub width: u32,
    pub height: u32,
    #[serde(rename = "slot_tag")]
    pub name: Option<String>,
    #[serde(rename = "origin")]
    pub anchor: Corner,
    pub edges: Edges,
    pub corners: Corners,
}

/// One grid cell of a room layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "tag")]
pub enum Cell {
    #[serde(rename = "k")]
    Slot(Slot),
    #[serde(rename = "f")]
    Fill { fill: Option<String> },
    #[serde(rename = "s")]
    Static,
    #[serde(rename = "o")]
    Open,
    #[serde(rename = "n")]
    Null,
}

impl Cell {
    pub fn tag(&self) -> CellTag {
        match self {
            Cell::Slot(_) => CellTag::Slot,
            Cell::Fill { .. } => CellTag::Fill,
            Cell::Static => CellTag::Static,
            Cell::Open => CellTag::Open,
            Cell::Null => CellTag::Null,
        }
    }

    pub fn as_slot(&self) -> Option<&Slot> {
        match self {
            Cell::Slot(slot) => Some(slot),
            _ => None,
        }
    }
}
