use std::path::PathBuf;

use clap::Parser;
use color_eyre::eyre::{Result, WrapErr};
use roomlayout_types::{PoiStyle, SlotFields};

mod collector;
mod settings;

use collector::Collector;
use settings::{Overrides, Settings};

/// Export dungeon room layout (.arm) files as JSON
#[derive(Parser, Debug)]
#[command(name = "roomlayout")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Settings file (defaults to ./roomlayout.toml when present)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Directory of extracted files
    #[arg(short, long, value_name = "DIR")]
    input: Option<PathBuf>,

    /// Directory the JSON files are written to
    #[arg(short, long, value_name = "DIR")]
    output: Option<PathBuf>,

    /// Slot record length to accept: any, legacy (23) or anchored (24)
    #[arg(long, value_name = "FIELDS")]
    slot_fields: Option<SlotFields>,

    /// List encoding to accept: any, counted or grouped
    #[arg(long, value_name = "STYLE")]
    poi_style: Option<PoiStyle>,

    /// Load referenced edge type files and include them in the export
    #[arg(long)]
    resolve_edge_types: bool,

    /// Write single-line JSON
    #[arg(long)]
    compact: bool,

    /// More logging (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Room files relative to the input directory; all of them when omitted
    files: Vec<String>,
}

impl Args {
    fn overrides(&self) -> Overrides {
        Overrides {
            input: self.input.clone(),
            output: self.output.clone(),
            slot_fields: self.slot_fields,
            poi_style: self.poi_style,
            resolve_edge_types: self.resolve_edge_types.then_some(true),
            pretty: self.compact.then_some(false),
        }
    }

    fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    }
}

fn main() -> Result<()> {
    color_eyre::install()?;
    let args = Args::parse();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(args.log_level()))
        .init();

    let settings = Settings::load(args.config.as_deref(), args.overrides())
        .wrap_err("loading settings")?;
    log::debug!("{settings:?}");

    let summary = Collector::new(settings).run(&args.files)?;
    if summary.exported == 0 && summary.failed > 0 {
        color_eyre::eyre::bail!("no room exported, {} failed", summary.failed);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_become_overrides() {
        let args = Args::parse_from([
            "roomlayout",
            "--slot-fields",
            "anchored",
            "--compact",
            "-vv",
            "rooms/a.arm",
        ]);
        let overrides = args.overrides();
        assert_eq!(overrides.slot_fields, Some(SlotFields::Anchored));
        assert_eq!(overrides.poi_style, None);
        assert_eq!(overrides.pretty, Some(false));
        assert_eq!(overrides.resolve_edge_types, None);
        assert_eq!(args.log_level(), "trace");
        assert_eq!(args.files, ["rooms/a.arm"]);
    }

    #[test]
    fn bad_style_is_a_usage_error() {
        assert!(Args::try_parse_from(["roomlayout", "--poi-style", "zigzag"]).is_err());
    }
}
