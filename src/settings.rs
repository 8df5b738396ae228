//! Run settings, layered from defaults, a TOML file, `ROOMLAYOUT_*` environment
//! variables and finally command-line flags.

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment, File};
use roomlayout_types::{ParseOptions, PoiStyle, SlotFields};
use serde::Deserialize;

const ENV_PREFIX: &str = "ROOMLAYOUT";
const DEFAULT_FILE: &str = "roomlayout";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Settings {
    /// Directory of extracted files that room and edge type names resolve against.
    pub input: PathBuf,
    pub output: PathBuf,
    pub slot_fields: SlotFields,
    pub poi_style: PoiStyle,
    pub resolve_edge_types: bool,
    pub pretty: bool,
}

/// Values given on the command line; `None` leaves the lower layers alone.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub input: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub slot_fields: Option<SlotFields>,
    pub poi_style: Option<PoiStyle>,
    pub resolve_edge_types: Option<bool>,
    pub pretty: Option<bool>,
}

fn path_value(path: Option<PathBuf>) -> Option<String> {
    path.map(|p| p.to_string_lossy().into_owned())
}

impl Settings {
    /// Load settings. `file` replaces the optional `roomlayout.toml` in the
    /// working directory and must exist.
    pub fn load(file: Option<&Path>, overrides: Overrides) -> Result<Self, ConfigError> {
        let builder = Config::builder()
            .set_default("input", ".")?
            .set_default("output", "out")?
            .set_default("slot_fields", SlotFields::default().to_string())?
            .set_default("poi_style", PoiStyle::default().to_string())?
            .set_default("resolve_edge_types", false)?
            .set_default("pretty", true)?;
        let builder = match file {
            Some(path) => builder.add_source(File::from(path).required(true)),
            None => builder.add_source(File::with_name(DEFAULT_FILE).required(false)),
        };
        builder
            .add_source(Environment::with_prefix(ENV_PREFIX))
            .set_override_option("input", path_value(overrides.input))?
            .set_override_option("output", path_value(overrides.output))?
            .set_override_option("slot_fields", overrides.slot_fields.map(|v| v.to_string()))?
            .set_override_option("poi_style", overrides.poi_style.map(|v| v.to_string()))?
            .set_override_option("resolve_edge_types", overrides.resolve_edge_types)?
            .set_override_option("pretty", overrides.pretty)?
            .build()?
            .try_deserialize()
    }

    pub fn parse_options(&self) -> ParseOptions {
        ParseOptions {
            slot_fields: self.slot_fields,
            poi_style: self.poi_style,
        }
    }
}
