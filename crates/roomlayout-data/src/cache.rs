//! Per-run memo of parsed rooms and edge types, keyed by file name.
//!
//! The cache never evicts and never remembers a failure: a file that failed to
//! load or parse is attempted again on the next request.

use std::collections::HashMap;
use std::io;
use std::sync::Arc;

use roomlayout_types::{EdgeType, ParseOptions, Room};

use crate::edge_type::{EdgeTypeError, parse_edge_type_bytes};
use crate::error::ParseError;
use crate::room_parser::parse_room_bytes;

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("{0}: file not found")]
    NotFound(String),
    #[error("{name}: {source}")]
    Io {
        name: String,
        #[source]
        source: io::Error,
    },
    #[error("{name}: {source}")]
    Parse {
        name: String,
        #[source]
        source: ParseError,
    },
    #[error("{name}: {source}")]
    EdgeType {
        name: String,
        #[source]
        source: EdgeTypeError,
    },
}

impl LoadError {
    fn io(name: &str, source: io::Error) -> Self {
        if source.kind() == io::ErrorKind::NotFound {
            LoadError::NotFound(name.to_owned())
        } else {
            LoadError::Io {
                name: name.to_owned(),
                source,
            }
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, LoadError::NotFound(_))
    }
}

#[derive(Debug, Default)]
pub struct RoomCache {
    options: ParseOptions,
    rooms: HashMap<String, Arc<Room>>,
    edge_types: HashMap<String, EdgeType>,
}

impl RoomCache {
    pub fn new(options: ParseOptions) -> Self {
        Self {
            options,
            ..Default::default()
        }
    }

    /// The room stored under `name`, reading it with `load` on first use.
    pub fn room<F>(&mut self, name: &str, load: F) -> Result<Arc<Room>, LoadError>
    where
        F: FnOnce(&str) -> io::Result<Vec<u8>>,
    {
        if let Some(room) = self.rooms.get(name) {
            log::trace!("{name}: cached");
            return Ok(Arc::clone(room));
        }
        let bytes = load(name).map_err(|e| LoadError::io(name, e))?;
        let room = parse_room_bytes(&bytes, &self.options).map_err(|source| LoadError::Parse {
            name: name.to_owned(),
            source,
        })?;
        let room = Arc::new(room);
        self.rooms.insert(name.to_owned(), Arc::clone(&room));
        Ok(room)
    }

    /// The edge type stored under `name`, reading it with `load` on first use.
    pub fn edge_type<F>(&mut self, name: &str, load: F) -> Result<EdgeType, LoadError>
    where
        F: FnOnce(&str) -> io::Result<Vec<u8>>,
    {
        if let Some(edge_type) = self.edge_types.get(name) {
            return Ok(edge_type.clone());
        }
        let bytes = load(name).map_err(|e| LoadError::io(name, e))?;
        let edge_type = parse_edge_type_bytes(&bytes).map_err(|source| LoadError::EdgeType {
            name: name.to_owned(),
            source,
        })?;
        self.edge_types.insert(name.to_owned(), edge_type.clone());
        Ok(edge_type)
    }

    pub fn room_count(&self) -> usize {
        self.rooms.len()
    }

    pub fn edge_type_count(&self) -> usize {
        self.edge_types.len()
    }
}
