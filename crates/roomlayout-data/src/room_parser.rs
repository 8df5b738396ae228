//! Room orchestrator: header, points of interest, grid, doodads.

use roomlayout_types::{ParseOptions, Room};

use crate::error::ParseError;
use crate::grid::read_grid;
use crate::header::read_header;
use crate::poi::{PoiBlock, read_poi_block};
use crate::source::{LineQueue, decode_utf16};

/// Parse a room from its lines with the default options.
pub fn parse_room(lines: &[&str]) -> Result<Room, ParseError> {
    parse_room_with(lines, &ParseOptions::default())
}

/// Parse a room from its lines. Lines are numbered by position; blank ones are
/// skipped.
pub fn parse_room_with<S: AsRef<str>>(
    lines: &[S],
    options: &ParseOptions,
) -> Result<Room, ParseError> {
    parse_queue(LineQueue::from_lines(lines), options)
}

pub fn parse_room_text(text: &str, options: &ParseOptions) -> Result<Room, ParseError> {
    parse_queue(LineQueue::from_text(text), options)
}

/// Decode UTF-16 source bytes, then parse.
pub fn parse_room_bytes(bytes: &[u8], options: &ParseOptions) -> Result<Room, ParseError> {
    let text = decode_utf16(bytes)?;
    parse_room_text(&text, options)
}

fn parse_queue(mut queue: LineQueue<'_>, options: &ParseOptions) -> Result<Room, ParseError> {
    log::debug!("reading header ({} line(s))", queue.remaining());
    let header = read_header(&mut queue, options)?;

    log::debug!("reading points of interest from line {}", queue.last_number() + 1);
    let first = PoiBlock::PointsOfInterest {
        grid_follows: header.root_slot.height > 0,
    };
    let pois = read_poi_block(&mut queue, first, options.poi_style)?;

    log::debug!(
        "reading {}x{} grid",
        header.root_slot.width,
        header.root_slot.height
    );
    let grid = read_grid(&mut queue, &header.root_slot, &header.strings, options)?;

    log::debug!("reading doodads from line {}", queue.last_number() + 1);
    let doodads = read_poi_block(&mut queue, PoiBlock::Doodads, options.poi_style)?;

    if let Some(line) = queue.peek() {
        return Err(ParseError::TrailingData {
            line: line.number,
            rest: line.text.to_owned(),
        });
    }

    Ok(Room {
        version: header.version,
        overrides: pois.overrides,
        strings: header.strings,
        dims: header.dims,
        numbers: header.numbers,
        tag: header.tag,
        points_of_interest: pois.entries,
        doodads: doodads.entries,
        grid,
        root_slot: header.root_slot,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use roomlayout_types::{Cell, PoiStyle, SlotFields, Token};

    const ROOT_1X1: &str = "k 1 1 0 0 0 0 0 0 0 0 0 0 0 0 0 0 0 0 0 0 0 0 0";

    fn minimal() -> Vec<&'static str> {
        vec![
            "version 1",
            "0",
            "1 1",
            "0",
            r#""ROOM""#,
            "0",
            ROOT_1X1,
            r#""""#,
            "n",
        ]
    }

    #[test]
    fn minimal_room() {
        let room = parse_room(&minimal()).unwrap();
        assert_eq!(room.version, 1);
        assert_eq!(room.tag, "ROOM");
        assert_eq!(room.dims, vec![1, 1]);
        assert_eq!(room.numbers, vec![vec![0], vec![0]]);
        assert_eq!((room.root_slot.width, room.root_slot.height), (1, 1));
        assert_eq!(room.grid, vec![vec![Cell::Null]]);
        assert_eq!(room.overrides.as_deref(), Some(""));
        assert!(room.points_of_interest.is_empty());
        assert!(room.doodads.is_empty());
    }

    #[test]
    fn short_slot_record_in_grid() {
        let root = ROOT_1X1.replacen("k 1 1", "k 2 1", 1);
        let mut lines: Vec<&str> = minimal();
        lines[6] = &root;
        lines[8] = "n k 1 1 0";
        assert!(matches!(
            parse_room(&lines),
            Err(ParseError::FieldCount {
                line: 9,
                tag: "k",
                found: 3,
                ..
            })
        ));
    }

    #[test]
    fn count_line_inside_open_group() {
        let mut lines = minimal();
        lines.splice(7..7, ["1", "4 4", "x 1 2", "2"]);
        assert!(matches!(
            parse_room(&lines),
            Err(ParseError::MixedArrayStyle { line: 11, open: 1 })
        ));
    }

    #[test]
    fn string_indices_resolve_one_based() {
        let lines = [
            "version 2",
            "2",
            r#""edge.et""#,
            r#""grass""#,
            "1 1",
            "0",
            r#""t""#,
            "0",
            "k 1 1 1 0 0 0 0 0 0 0 0 0 0 0 2 0 0 0 0 0 0 0 0",
            "f 2",
        ];
        let room = parse_room(&lines).unwrap();
        assert_eq!(room.root_slot.edges.n.edge.as_deref(), Some("edge.et"));
        assert_eq!(room.root_slot.edges.w.edge, None);
        assert_eq!(room.root_slot.corners.sw.ground.as_deref(), Some("grass"));
        assert_eq!(
            room.grid[0][0],
            Cell::Fill {
                fill: Some("grass".into())
            }
        );

        let mut lines = lines.to_vec();
        lines[9] = "f 3";
        assert!(matches!(
            parse_room(&lines),
            Err(ParseError::StringTable { line: 10, .. })
        ));
    }

    #[test]
    fn grid_directly_after_extra_numbers() {
        let mut lines = minimal();
        lines.remove(7);
        let room = parse_room(&lines).unwrap();
        assert_eq!(room.overrides, None);
        assert_eq!(room.grid, vec![vec![Cell::Null]]);
    }

    #[test]
    fn doodads_follow_grid() {
        let mut lines = minimal();
        lines.extend(["1", "0 0 torch", "lamp 1 2", "-1"]);
        let room = parse_room(&lines).unwrap();
        assert_eq!(room.doodads.len(), 2);
        assert_eq!(room.doodads[0][0][2], Token::Word("torch".into()));
        assert_eq!(room.doodads[1][0][0], Token::Word("lamp".into()));
    }

    #[test]
    fn blank_lines_keep_their_numbers() {
        let text = format!("version 1\n\n0\n1 1\n0\n\"ROOM\"\n0\n{ROOT_1X1}\n\"\"\n\nn o\n");
        match parse_room_text(&text, &ParseOptions::default()) {
            Err(ParseError::TrailingData { line, rest }) => {
                assert_eq!(line, 11);
                assert_eq!(rest, "o");
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn bytes_are_decoded_first() {
        let mut bytes = vec![0xFF, 0xFE];
        bytes.extend(
            minimal()
                .join("\r\n")
                .encode_utf16()
                .flat_map(u16::to_le_bytes),
        );
        let room = parse_room_bytes(&bytes, &ParseOptions::default()).unwrap();
        assert_eq!(room.grid, vec![vec![Cell::Null]]);
        assert!(matches!(
            parse_room_bytes(&bytes[..bytes.len() - 1], &ParseOptions::default()),
            Err(ParseError::Encoding(_))
        ));
    }

    #[test]
    fn pinned_slot_layout() {
        let anchored = ParseOptions {
            slot_fields: SlotFields::Anchored,
            poi_style: PoiStyle::Any,
        };
        assert!(matches!(
            parse_room_with(&minimal(), &anchored),
            Err(ParseError::FieldCount { line: 7, found: 23, .. })
        ));
        assert!(parse_room_with(&minimal(), &ParseOptions::COUNTED).is_ok());
    }

    #[test]
    fn rowless_room_ends_in_open_group() {
        let root = ROOT_1X1.replacen("k 1 1", "k 1 0", 1);
        let mut lines: Vec<&str> = minimal();
        lines[6] = &root;
        lines.truncate(7);
        lines.extend(["spawn 1 1", "exit 2 2"]);
        let room = parse_room(&lines).unwrap();
        assert!(room.grid.is_empty());
        assert_eq!(room.points_of_interest.len(), 1);
        assert_eq!(room.points_of_interest[0].len(), 2);
        assert!(room.doodads.is_empty());
    }

    #[test]
    fn huge_root_width_is_an_error() {
        let root = ROOT_1X1.replacen("k 1 1", "k 4294967295 1", 1);
        let mut lines: Vec<&str> = minimal();
        lines[6] = &root;
        assert!(matches!(
            parse_room(&lines),
            Err(ParseError::UnexpectedCellTag { line: 9, .. })
        ));
    }

    #[test]
    fn empty_input() {
        assert!(matches!(
            parse_room(&[]),
            Err(ParseError::MalformedHeader { .. })
        ));
    }
}
