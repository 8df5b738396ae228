pub mod cell;
pub mod edge_type;
pub mod options;
pub mod room;
pub mod string_table;
pub mod token;

pub use cell::{Cell, CellTag, Corner, CornerInfo, Corners, Direction, Edge, Edges, Slot};
pub use edge_type::EdgeType;
pub use options::{ParseOptions, PoiStyle, SlotFields};
pub use room::Room;
pub use string_table::{StringIndexError, StringTable};
pub use token::{PoiGroup, Token, TokenLine};
