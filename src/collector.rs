//! Walks a directory of extracted files, parses each room layout and writes it
//! out as JSON. A file that fails is logged and skipped; the run goes on.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use color_eyre::eyre::{Result, WrapErr};
use roomlayout_data::{LoadError, RoomCache};
use roomlayout_types::{EdgeType, Room};
use serde::Serialize;

use crate::settings::Settings;

const ROOM_EXTENSION: &str = "arm";
const EDGE_TYPE_SUFFIX: &str = ".et";

#[derive(Serialize)]
struct RoomExport<'a> {
    #[serde(flatten)]
    room: &'a Room,
    #[serde(skip_serializing_if = "Option::is_none")]
    edge_types: Option<BTreeMap<String, EdgeType>>,
}

/// Outcome counts of one run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Summary {
    pub exported: usize,
    pub missing: usize,
    pub failed: usize,
}

pub struct Collector {
    settings: Settings,
    cache: RoomCache,
}

/// Relative paths of every room file under `root`, sorted, `/`-separated.
pub fn discover(root: &Path) -> io::Result<Vec<String>> {
    let mut found = Vec::new();
    let mut dirs = vec![root.to_path_buf()];
    while let Some(dir) = dirs.pop() {
        for entry in fs::read_dir(&dir)? {
            let path = entry?.path();
            if path.is_dir() {
                dirs.push(path);
            } else if path.extension().is_some_and(|e| e == ROOM_EXTENSION) {
                if let Ok(rel) = path.strip_prefix(root) {
                    let parts: Vec<_> = rel.iter().map(|p| p.to_string_lossy()).collect();
                    found.push(parts.join("/"));
                }
            }
        }
    }
    found.sort();
    Ok(found)
}

/// `out/<name>.json`, keeping the extension of `name`.
fn output_path(output: &Path, name: &str) -> PathBuf {
    let mut path = output.join(name).into_os_string();
    path.push(".json");
    PathBuf::from(path)
}

impl Collector {
    pub fn new(settings: Settings) -> Self {
        let cache = RoomCache::new(settings.parse_options());
        Self { settings, cache }
    }

    /// Export `names`, or every room under the input directory when empty.
    pub fn run(&mut self, names: &[String]) -> Result<Summary> {
        let names = if names.is_empty() {
            discover(&self.settings.input).wrap_err_with(|| {
                format!("scanning {}", self.settings.input.display())
            })?
        } else {
            names.to_vec()
        };
        log::info!(
            "{} room file(s) under {}",
            names.len(),
            self.settings.input.display()
        );

        let mut summary = Summary::default();
        for name in &names {
            match self.export(name) {
                Ok(path) => {
                    log::info!("wrote {}", path.display());
                    summary.exported += 1;
                }
                Err(Failure::Load(e)) if e.is_not_found() => {
                    log::warn!("{e}");
                    summary.missing += 1;
                }
                Err(Failure::Load(e)) => {
                    log::error!("{e}");
                    summary.failed += 1;
                }
                Err(Failure::Write(e)) => return Err(e),
            }
        }
        log::info!(
            "exported {}, missing {}, failed {}",
            summary.exported,
            summary.missing,
            summary.failed
        );
        log::debug!(
            "cached {} room(s), {} edge type(s)",
            self.cache.room_count(),
            self.cache.edge_type_count()
        );
        Ok(summary)
    }

    fn export(&mut self, name: &str) -> Result<PathBuf, Failure> {
        let input = self.settings.input.clone();
        let room = self
            .cache
            .room(name, |n| fs::read(input.join(n)))
            .map_err(Failure::Load)?;
        let edge_types = self
            .settings
            .resolve_edge_types
            .then(|| self.edge_types(&room));

        let export = RoomExport {
            room: &room,
            edge_types,
        };
        let path = output_path(&self.settings.output, name);
        self.write(&path, &export).map_err(Failure::Write)?;
        Ok(path)
    }

    /// Edge type files the room refers to. Ones that fail to load are logged
    /// and left out.
    fn edge_types(&mut self, room: &Room) -> BTreeMap<String, EdgeType> {
        let input = &self.settings.input;
        let mut resolved = BTreeMap::new();
        for name in room.edge_names() {
            if !name.ends_with(EDGE_TYPE_SUFFIX) {
                continue;
            }
            match self.cache.edge_type(name, |n| fs::read(input.join(n))) {
                Ok(edge_type) => {
                    resolved.insert(name.to_owned(), edge_type);
                }
                Err(e) if e.is_not_found() => log::warn!("{e}"),
                Err(e) => log::error!("{e}"),
            }
        }
        resolved
    }

    fn write(&self, path: &Path, export: &RoomExport<'_>) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .wrap_err_with(|| format!("creating {}", parent.display()))?;
        }
        let file = fs::File::create(path).wrap_err_with(|| format!("creating {}", path.display()))?;
        let writer = io::BufWriter::new(file);
        let written = if self.settings.pretty {
            serde_json::to_writer_pretty(writer, export)
        } else {
            serde_json::to_writer(writer, export)
        };
        written.wrap_err_with(|| format!("writing {}", path.display()))
    }
}

/// Per-file load failures are tallied; write failures end the run.
enum Failure {
    Load(LoadError),
    Write(color_eyre::Report),
}
