use roomlayout_data::{parse_room_bytes, parse_room_text};
use roomlayout_types::ParseOptions;
use std::path::{Path, PathBuf};

const FIXTURES_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures");

fn arm_files(dir: &Path, out: &mut Vec<PathBuf>) {
    for entry in std::fs::read_dir(dir).expect("read fixtures dir").flatten() {
        let path = entry.path();
        if path.is_dir() {
            arm_files(&path, out);
        } else if path.extension().is_some_and(|e| e == "arm") {
            out.push(path);
        }
    }
}

#[test]
fn every_fixture_parses_with_default_options() {
    let mut files = Vec::new();
    arm_files(Path::new(FIXTURES_DIR), &mut files);
    files.sort();
    assert!(files.len() >= 3, "expected at least 3 .arm fixtures");

    for path in &files {
        let bytes = std::fs::read(path).unwrap_or_else(|_| panic!("read {}", path.display()));
        let room = if bytes.starts_with(&[0xFF, 0xFE]) {
            parse_room_bytes(&bytes, &ParseOptions::default())
        } else {
            let text = String::from_utf8(bytes)
                .unwrap_or_else(|_| panic!("{} is not utf-8", path.display()));
            parse_room_text(&text, &ParseOptions::default())
        }
        .unwrap_or_else(|e| panic!("parse {}: {e}", path.display()));

        assert_eq!(room.grid.len(), room.height(), "{}", path.display());
        for row in &room.grid {
            assert_eq!(row.len(), room.width(), "{}", path.display());
        }
    }
}
