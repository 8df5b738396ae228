use roomlayout_types::{Cell, ParseOptions, Slot, StringTable};

use crate::cell::decode_cell;
use crate::error::{ParseError, Stage};
use crate::source::{LineQueue, SourceLine};

/// Decode exactly `width` cells from one row line.
pub fn read_row(
    line: SourceLine<'_>,
    width: u32,
    strings: &StringTable,
    options: &ParseOptions,
) -> Result<Vec<Cell>, ParseError> {
    // `width` comes from the file; grow as cells decode.
    let mut cells = Vec::new();
    let mut pos = 0;
    for _ in 0..width {
        let (cell, end) = decode_cell(line.text, pos, line.number, strings, options)?;
        cells.push(cell);
        pos = end;
    }
    let rest = line.text[pos..].trim();
    if !rest.is_empty() {
        return Err(ParseError::TrailingData {
            line: line.number,
            rest: rest.to_owned(),
        });
    }
    Ok(cells)
}

/// Read the `root.height` rows of the grid.
pub fn read_grid(
    queue: &mut LineQueue<'_>,
    root: &Slot,
    strings: &StringTable,
    options: &ParseOptions,
) -> Result<Vec<Vec<Cell>>, ParseError> {
    let height = root.height as usize;
    queue.require(Stage::Grid, height)?;
    let mut grid = Vec::with_capacity(height);
    for _ in 0..height {
        let line = queue.pop_for(Stage::Grid)?;
        grid.push(read_row(line, root.width, strings, options)?);
    }
    log::trace!("grid {}x{} read", root.width, root.height);
    Ok(grid)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn root(width: u32, height: u32) -> Slot {
        Slot {
            width,
            height,
            ..Default::default()
        }
    }

    fn strings() -> StringTable {
        ["moss"].into_iter().map(String::from).collect()
    }

    fn grid(lines: &[&str], width: u32, height: u32) -> Result<Vec<Vec<Cell>>, ParseError> {
        let mut queue = LineQueue::from_lines(lines);
        read_grid(&mut queue, &root(width, height), &strings(), &ParseOptions::default())
    }

    #[test]
    fn rows_of_mixed_cells() {
        let rows = grid(&["n f 1 o", "s  o   n"], 3, 2).unwrap();
        assert_eq!(
            rows,
            vec![
                vec![
                    Cell::Null,
                    Cell::Fill {
                        fill: Some("moss".into())
                    },
                    Cell::Open
                ],
                vec![Cell::Static, Cell::Open, Cell::Null],
            ]
        );
    }

    #[test]
    fn slot_between_cells() {
        let line = "o k 1 1 0 0 0 0 0 0 0 0 0 0 0 0 1 0 0 0 0 0 0 0 0 n";
        let rows = grid(&[line], 3, 1).unwrap();
        let slot = rows[0][1].as_slot().expect("slot");
        assert_eq!(slot.corners.sw.ground.as_deref(), Some("moss"));
        assert_eq!(rows[0][2], Cell::Null);
    }

    #[test]
    fn short_row_reports_end_of_line() {
        assert!(matches!(
            grid(&["n o"], 3, 1),
            Err(ParseError::UnexpectedCellTag { line: 1, .. })
        ));
    }

    #[test]
    fn long_row_is_trailing_data() {
        match grid(&["n o s"], 2, 1) {
            Err(ParseError::TrailingData { line, rest }) => {
                assert_eq!(line, 1);
                assert_eq!(rest, "s");
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn width_beyond_row_fails_without_preallocating() {
        assert!(matches!(
            grid(&["n o"], u32::MAX, 1),
            Err(ParseError::UnexpectedCellTag { line: 1, .. })
        ));
    }

    #[test]
    fn missing_rows_are_truncated() {
        assert!(matches!(
            grid(&["n"], 1, 3),
            Err(ParseError::TruncatedFile {
                stage: Stage::Grid,
                missing: 2
            })
        ));
    }

    #[test]
    fn zero_height_reads_nothing() {
        assert_eq!(grid(&["n"], 1, 0).unwrap(), Vec::<Vec<Cell>>::new());
    }
}
