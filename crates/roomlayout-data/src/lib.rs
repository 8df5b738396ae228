pub mod cache;
pub mod cell;
pub mod edge_type;
pub mod error;
pub mod grid;
pub mod header;
pub mod poi;
pub mod room_parser;
pub mod source;
pub mod tokenizer;

pub use cache::{LoadError, RoomCache};
pub use edge_type::{EdgeTypeError, parse_edge_type, parse_edge_type_bytes};
pub use error::{EncodingError, ParseError, Stage};
pub use room_parser::{parse_room, parse_room_bytes, parse_room_text, parse_room_with};
