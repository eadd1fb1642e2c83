use crate::error::MapError;
use crate::grid::{Cell, GridBounds};
use std::collections::HashSet;
use std::fs;
use std::path::Path;

/// A scenario layout parsed from text.
///
/// Glyphs (spaces between glyphs are ignored):
/// - `F`: mover
/// - `H`: target
/// - `E`: adversary
/// - `x` or `#`: obstacle
/// - `-` or `.`: free cell
///
/// Row index is y (top row is 0), column index is x.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridMap {
    pub bounds: GridBounds,
    pub obstacles: HashSet<Cell>,
    pub mover: Cell,
    pub target: Cell,
    pub adversary: Option<Cell>,
}

impl GridMap {
    pub fn parse(text: &str) -> Result<GridMap, MapError> {
        let lines: Vec<Vec<char>> = text
            .lines()
            .map(|line| line.chars().filter(|c| !c.is_whitespace()).collect::<Vec<_>>())
            .collect();

        // Blank lines around the layout are allowed; inside it they would
        // shift every later row.
        let first = lines.iter().position(|row| !row.is_empty()).ok_or(MapError::Empty)?;
        let last = lines.iter().rposition(|row| !row.is_empty()).unwrap_or(first);
        let rows = &lines[first..=last];
        if let Some(blank) = rows.iter().position(Vec::is_empty) {
            return Err(MapError::BlankRow { row: blank });
        }

        let width = rows[0].len();

        let mut obstacles = HashSet::new();
        let mut mover = None;
        let mut target = None;
        let mut adversary = None;

        for (y, row) in rows.iter().enumerate() {
            if row.len() != width {
                return Err(MapError::RaggedRow {
                    row: y,
                    width: row.len(),
                    expected: width,
                });
            }

            for (x, &glyph) in row.iter().enumerate() {
                let cell = Cell::new(x as i32, y as i32);
                match glyph {
                    'F' => place(&mut mover, cell, glyph)?,
                    'H' => place(&mut target, cell, glyph)?,
                    'E' => place(&mut adversary, cell, glyph)?,
                    'x' | '#' => {
                        obstacles.insert(cell);
                    }
                    '-' | '.' => {}
                    _ => return Err(MapError::UnknownGlyph { glyph, cell }),
                }
            }
        }

        Ok(GridMap {
            bounds: GridBounds::new(width as i32, rows.len() as i32),
            obstacles,
            mover: mover.ok_or(MapError::Missing('F'))?,
            target: target.ok_or(MapError::Missing('H'))?,
            adversary,
        })
    }

    /// Load a layout from a text file
    pub fn load(path: impl AsRef<Path>) -> Result<GridMap, MapError> {
        let contents = fs::read_to_string(path)?;
        GridMap::parse(&contents)
    }
}

fn place(slot: &mut Option<Cell>, cell: Cell, glyph: char) -> Result<(), MapError> {
    if slot.is_some() {
        return Err(MapError::Duplicate(glyph));
    }
    *slot = Some(cell);
    Ok(())
}
