use std::fmt;
use std::fmt::Formatter;
use std::io;

use crate::{Result, SudokuError};

/// Separator line between the three horizontal bands of the pretty format.
const BAND_SEPARATOR: &str = "------+------+------";

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum CellValue {
    Fixed(u8),
    Empty,
}

impl CellValue {
    pub fn is_empty(self) -> bool {
        self == CellValue::Empty
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub fn new(row: usize, col: usize) -> Position {
        Position { row, col }
    }
}

/// A 9x9 Sudoku grid. Cells are stored directly and mutated in place;
/// nothing at this level stops an illegal placement, the solver is
/// responsible for only placing values it has checked.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Grid {
    cells: [[CellValue; 9]; 9],
}

impl Grid {
    pub fn new() -> Grid {
        Grid {
            cells: [[CellValue::Empty; 9]; 9],
        }
    }

    /// Positions outside the grid are a programming error and panic.
    pub fn get(&self, pos: Position) -> CellValue {
        self.cells[pos.row][pos.col]
    }

    pub fn set(&mut self, pos: Position, value: CellValue) {
        self.cells[pos.row][pos.col] = value;
    }

    pub fn row(&self, pos: Position) -> [CellValue; 9] {
        self.cells[pos.row]
    }

    pub fn col(&self, pos: Position) -> [CellValue; 9] {
        let mut line = [CellValue::Empty; 9];
        for r in 0..9 {
            line[r] = self.cells[r][pos.col];
        }
        line
    }

    /// The 3x3 block containing `pos`, read left to right, top to bottom.
    pub fn block(&self, pos: Position) -> [CellValue; 9] {
        let base_row = pos.row - pos.row % 3;
        let base_col = pos.col - pos.col % 3;
        let mut line = [CellValue::Empty; 9];
        for r in 0..3 {
            for c in 0..3 {
                line[r * 3 + c] = self.cells[base_row + r][base_col + c];
            }
        }
        line
    }

    /// All 81 positions in row-major order. Each call starts a fresh pass.
    pub fn positions() -> impl Iterator<Item = Position> {
        (0..9).flat_map(|row| (0..9).map(move |col| Position { row, col }))
    }

    pub fn filled_count(&self) -> usize {
        Grid::positions().filter(|&p| !self.get(p).is_empty()).count()
    }

    /// Reads the raw format: one text row per grid row, one character per
    /// cell, where `1`-`9` fills the cell and anything else (`0`, `.`,
    /// whitespace) leaves it empty. Ragged or oversized input is fine;
    /// cells the text never reaches just stay empty.
    pub fn parse_raw(text: &str) -> Grid {
        let mut grid = Grid::new();
        for (row, line) in text.lines().take(9).enumerate() {
            for (col, ch) in line.chars().take(9).enumerate() {
                if let Some(digit) = ch.to_digit(10) {
                    if digit >= 1 {
                        grid.set(Position::new(row, col), CellValue::Fixed(digit as u8));
                    }
                }
            }
        }
        grid
    }

    /// Reads the pretty format produced by `Display`: three bands split by
    /// the dashed separator, three text rows per band, three `|`-separated
    /// triples per row, three whitespace-separated tokens per triple.
    /// Digit tokens fill cells, tokens like `.` leave them empty. Any
    /// other shape is a structural parse error.
    pub fn parse_pretty(text: &str) -> Result<Grid> {
        let mut grid = Grid::new();

        let bands: Vec<&str> = text.split(BAND_SEPARATOR).collect();
        if bands.len() != 3 {
            return Err(SudokuError::Parse(format!(
                "expected 3 bands separated by '{}', found {}",
                BAND_SEPARATOR,
                bands.len()
            )));
        }

        for (band_row, band) in bands.iter().enumerate() {
            let rows: Vec<&str> = band.trim().lines().collect();
            if rows.len() != 3 {
                return Err(SudokuError::Parse(format!(
                    "expected 3 rows in band {}, found {}",
                    band_row,
                    rows.len()
                )));
            }

            for (sub_row, row_text) in rows.iter().enumerate() {
                let triples: Vec<&str> = row_text.trim().split('|').collect();
                if triples.len() != 3 {
                    return Err(SudokuError::Parse(format!(
                        "expected 3 cell triples in row {}, found {}",
                        band_row * 3 + sub_row,
                        triples.len()
                    )));
                }

                for (band_col, triple) in triples.iter().enumerate() {
                    let tokens: Vec<&str> = triple.split_whitespace().collect();
                    if tokens.len() != 3 {
                        return Err(SudokuError::Parse(format!(
                            "expected 3 cells per triple in row {}, found {}",
                            band_row * 3 + sub_row,
                            tokens.len()
                        )));
                    }

                    for (sub_col, token) in tokens.iter().enumerate() {
                        if let Ok(digit) = token.parse::<u8>() {
                            if (1..=9).contains(&digit) {
                                let pos =
                                    Position::new(band_row * 3 + sub_row, band_col * 3 + sub_col);
                                grid.set(pos, CellValue::Fixed(digit));
                            }
                        }
                    }
                }
            }
        }

        Ok(grid)
    }

    /// Guesses between the two text formats: anything containing the band
    /// separator is treated as pretty, everything else as raw.
    pub fn parse_auto(text: &str) -> Result<Grid> {
        if text.contains(BAND_SEPARATOR) {
            Grid::parse_pretty(text)
        } else {
            Ok(Grid::parse_raw(text))
        }
    }

    /// Reads a puzzle stored as 9 unheadered CSV records of 9 numeric
    /// fields, `0` meaning empty.
    pub fn parse_csv<R: io::Read>(reader: R) -> Result<Grid> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .from_reader(reader);

        let mut grid = Grid::new();
        let mut row = 0;
        for record in csv_reader.records() {
            if row > 8 {
                return Err(SudokuError::Parse("more than 9 rows".to_string()));
            }
            let record = record?;

            for col in 0..9 {
                if let Some(field) = record.get(col).map(str::trim) {
                    let digit: u8 = field
                        .parse()
                        .map_err(|_| SudokuError::Parse(format!("invalid cell value '{}'", field)))?;
                    match digit {
                        0 => {}
                        1..=9 => grid.set(Position::new(row, col), CellValue::Fixed(digit)),
                        _ => {
                            return Err(SudokuError::Parse(format!(
                                "cell value {} out of range",
                                digit
                            )))
                        }
                    }
                }
            }

            row += 1;
        }

        Ok(grid)
    }

    pub fn write_csv<W: io::Write>(&self, writer: W) -> Result<()> {
        let mut csv_writer = csv::Writer::from_writer(writer);
        for r in 0..9 {
            let record: Vec<String> = (0..9)
                .map(|c| match self.get(Position::new(r, c)) {
                    CellValue::Fixed(digit) => digit.to_string(),
                    CellValue::Empty => "0".to_string(),
                })
                .collect();
            csv_writer.write_record(&record)?;
        }
        csv_writer.flush()?;
        Ok(())
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for r in 0..9 {
            for c in 0..9 {
                match self.get(Position::new(r, c)) {
                    CellValue::Fixed(digit) => write!(f, "{} ", digit)?,
                    CellValue::Empty => write!(f, ". ")?,
                }
                if c == 2 || c == 5 {
                    write!(f, "|")?;
                }
            }
            writeln!(f)?;
            if r == 2 || r == 5 {
                writeln!(f, "{}", BAND_SEPARATOR)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SOLVED_RAW: &str = "534678912\n\
                              672195348\n\
                              198342567\n\
                              859761423\n\
                              426853791\n\
                              713924856\n\
                              961537284\n\
                              287419635\n\
                              345286179";

    fn solved_grid() -> Grid {
        Grid::parse_raw(SOLVED_RAW)
    }

    fn digits(line: &[CellValue; 9]) -> Vec<u8> {
        line.iter()
            .map(|cell| match cell {
                CellValue::Fixed(d) => *d,
                CellValue::Empty => 0,
            })
            .collect()
    }

    #[test]
    fn positions_are_row_major_and_restartable() {
        let all: Vec<Position> = Grid::positions().collect();
        assert_eq!(all.len(), 81);
        assert_eq!(all[0], Position::new(0, 0));
        assert_eq!(all[1], Position::new(0, 1));
        assert_eq!(all[9], Position::new(1, 0));
        assert_eq!(all[80], Position::new(8, 8));

        // A second call starts over from the beginning
        assert_eq!(Grid::positions().next(), Some(Position::new(0, 0)));
    }

    #[test]
    fn get_and_set_cells() {
        let mut grid = Grid::new();
        let pos = Position::new(4, 7);
        assert_eq!(grid.get(pos), CellValue::Empty);

        grid.set(pos, CellValue::Fixed(3));
        assert_eq!(grid.get(pos), CellValue::Fixed(3));

        grid.set(pos, CellValue::Empty);
        assert_eq!(grid.get(pos), CellValue::Empty);
    }

    #[test]
    fn row_col_block_accessors() {
        let grid = solved_grid();

        assert_eq!(digits(&grid.row(Position::new(1, 4))), vec![6, 7, 2, 1, 9, 5, 3, 4, 8]);
        assert_eq!(digits(&grid.col(Position::new(3, 0))), vec![5, 6, 1, 8, 4, 7, 9, 2, 3]);

        // Center block, read left to right then top to bottom
        assert_eq!(digits(&grid.block(Position::new(4, 4))), vec![7, 6, 1, 8, 5, 3, 9, 2, 4]);
    }

    #[test]
    fn block_is_shared_across_its_nine_members() {
        let mut grid = Grid::new();
        grid.set(Position::new(3, 3), CellValue::Fixed(9));

        for r in 3..6 {
            for c in 3..6 {
                assert!(grid.block(Position::new(r, c)).contains(&CellValue::Fixed(9)));
            }
        }
        assert!(!grid.block(Position::new(2, 3)).contains(&CellValue::Fixed(9)));
        assert!(!grid.block(Position::new(3, 6)).contains(&CellValue::Fixed(9)));
    }

    #[test]
    fn render_solved_grid() {
        let expected = "5 3 4 |6 7 8 |9 1 2 \n\
                        6 7 2 |1 9 5 |3 4 8 \n\
                        1 9 8 |3 4 2 |5 6 7 \n\
                        ------+------+------\n\
                        8 5 9 |7 6 1 |4 2 3 \n\
                        4 2 6 |8 5 3 |7 9 1 \n\
                        7 1 3 |9 2 4 |8 5 6 \n\
                        ------+------+------\n\
                        9 6 1 |5 3 7 |2 8 4 \n\
                        2 8 7 |4 1 9 |6 3 5 \n\
                        3 4 5 |2 8 6 |1 7 9 \n";
        assert_eq!(solved_grid().to_string(), expected);
    }

    #[test]
    fn pretty_round_trip_solved() {
        let grid = solved_grid();
        let reparsed = Grid::parse_pretty(&grid.to_string()).unwrap();
        assert_eq!(reparsed, grid);
    }

    #[test]
    fn pretty_round_trip_partial() {
        let mut grid = Grid::new();
        grid.set(Position::new(0, 0), CellValue::Fixed(5));
        grid.set(Position::new(3, 5), CellValue::Fixed(1));
        grid.set(Position::new(8, 8), CellValue::Fixed(9));

        let reparsed = Grid::parse_pretty(&grid.to_string()).unwrap();
        assert_eq!(reparsed, grid);
    }

    #[test]
    fn parse_raw_is_permissive() {
        // Dots and zeros mean empty, short rows are fine, and anything past
        // nine rows or columns is ignored
        let text = "53..7\n6..195...extra\n.98....6.\n\n00000\n7...2...6\n.6....28.\n...419..5\n....8..79\nrow ten is ignored";
        let grid = Grid::parse_raw(text);

        assert_eq!(grid.get(Position::new(0, 0)), CellValue::Fixed(5));
        assert_eq!(grid.get(Position::new(0, 1)), CellValue::Fixed(3));
        assert_eq!(grid.get(Position::new(0, 2)), CellValue::Empty);
        assert_eq!(grid.get(Position::new(0, 4)), CellValue::Fixed(7));
        assert_eq!(grid.get(Position::new(0, 8)), CellValue::Empty);
        assert_eq!(grid.get(Position::new(3, 0)), CellValue::Empty);
        assert_eq!(grid.get(Position::new(4, 0)), CellValue::Empty);
        assert_eq!(grid.get(Position::new(8, 7)), CellValue::Fixed(7));
    }

    #[test]
    fn parse_pretty_rejects_structural_damage() {
        let grid = solved_grid();

        // Remove one separator line; the band count is now wrong
        let missing_separator = grid.to_string().replacen("------+------+------\n", "", 1);
        assert!(Grid::parse_pretty(&missing_separator).is_err());

        // Remove a pipe from one row; the triple count is now wrong
        let missing_pipe = grid.to_string().replacen("|", "", 1);
        assert!(Grid::parse_pretty(&missing_pipe).is_err());
    }

    #[test]
    fn parse_auto_detects_both_formats() {
        let grid = solved_grid();
        assert_eq!(Grid::parse_auto(&grid.to_string()).unwrap(), grid);
        assert_eq!(Grid::parse_auto(SOLVED_RAW).unwrap(), grid);
    }

    #[test]
    fn csv_round_trip() {
        let mut grid = solved_grid();
        grid.set(Position::new(2, 2), CellValue::Empty);
        grid.set(Position::new(7, 0), CellValue::Empty);

        let mut buffer = Vec::new();
        grid.write_csv(&mut buffer).unwrap();
        let reparsed = Grid::parse_csv(buffer.as_slice()).unwrap();
        assert_eq!(reparsed, grid);
    }

    #[test]
    fn parse_csv_rejects_bad_input() {
        assert!(Grid::parse_csv("1,2,x,4,5,6,7,8,9".as_bytes()).is_err());
        assert!(Grid::parse_csv("1,2,3,4,5,6,7,8,99".as_bytes()).is_err());

        let mut too_many_rows = String::new();
        for _ in 0..10 {
            too_many_rows.push_str("0,0,0,0,0,0,0,0,0\n");
        }
        assert!(Grid::parse_csv(too_many_rows.as_bytes()).is_err());
    }
}
