//! Life2 text format and board files
//!
//! Boards are plain text, one line per row: `.` empty, `a` team A,
//! `b` team B, `#` barrier. Masks use `1` for occupiable positions and `0`
//! for excluded ones. The engine never reads files itself; this is how the
//! command line tool feeds it.

use super::{Cell, Grid};
use crate::error::LifeError;
use anyhow::{Context, Result};
use std::path::Path;

/// Load a grid from a text file
pub fn load_grid_from_file<P: AsRef<Path>>(path: P) -> Result<Grid> {
    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read board file: {}", path.as_ref().display()))?;

    parse_grid_from_string(&content)
        .with_context(|| format!("Failed to parse board from file: {}", path.as_ref().display()))
}

/// Parse a grid from its text representation
pub fn parse_grid_from_string(content: &str) -> Result<Grid, LifeError> {
    let rows = parse_rows(content, Cell::from_char)?;
    Grid::from_rows(rows)
}

/// Convert a grid to its text representation
pub fn grid_to_string(grid: &Grid) -> String {
    grid.to_string()
}

/// Save a grid to a text file
pub fn save_grid_to_file<P: AsRef<Path>>(grid: &Grid, path: P) -> Result<()> {
    if let Some(parent) = path.as_ref().parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    std::fs::write(&path, grid_to_string(grid))
        .with_context(|| format!("Failed to write board to file: {}", path.as_ref().display()))?;

    Ok(())
}

/// Load an occupiable-area mask, returned row-major with its dimensions
pub fn load_mask_from_file<P: AsRef<Path>>(path: P) -> Result<(usize, usize, Vec<bool>)> {
    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read mask file: {}", path.as_ref().display()))?;

    parse_mask_from_string(&content)
        .with_context(|| format!("Failed to parse mask from file: {}", path.as_ref().display()))
}

/// Parse a `1`/`0` mask
pub fn parse_mask_from_string(content: &str) -> Result<(usize, usize, Vec<bool>), LifeError> {
    let rows = parse_rows(content, |ch| match ch {
        '1' => Some(true),
        '0' => Some(false),
        _ => None,
    })?;
    let height = rows.len();
    let width = rows.first().map_or(0, Vec::len);
    Ok((width, height, rows.into_iter().flatten().collect()))
}

fn parse_rows<T>(content: &str, parse: impl Fn(char) -> Option<T>) -> Result<Vec<Vec<T>>, LifeError> {
    let lines: Vec<&str> = content
        .lines()
        .map(|line| line.trim())
        .filter(|line| !line.is_empty())
        .collect();

    let height = lines.len();
    let width = lines.first().map_or(0, |line| line.chars().count());
    if height == 0 || width == 0 {
        return Err(LifeError::InvalidDimension { width, height });
    }

    let mut rows = Vec::with_capacity(height);
    for (row_idx, line) in lines.iter().enumerate() {
        let row = line
            .chars()
            .enumerate()
            .map(|(col_idx, ch)| {
                parse(ch).ok_or(LifeError::InvalidCharacter {
                    ch,
                    row: row_idx,
                    col: col_idx,
                })
            })
            .collect::<Result<Vec<T>, LifeError>>()?;

        if row.len() != width {
            return Err(LifeError::GridMismatch {
                width,
                height,
                got_width: row.len(),
                got_height: row_idx + 1,
            });
        }
        rows.push(row);
    }

    Ok(rows)
}

/// Two blinkers facing each other across a wall
const DUEL: &str = "\
.........\n\
.........\n\
.aaa.bbb.\n\
....#....\n\
....#....\n\
.........\n";

/// Team A block (still life) next to a team B glider
const SKIRMISH: &str = "\
..........\n\
.aa.......\n\
.aa.......\n\
..........\n\
......b...\n\
.......b..\n\
.....bbb..\n\
..........\n";

/// Walled arena
const ARENA: &str = "\
##########\n\
#..a..b..#\n\
#.aa..bb.#\n\
#..a..b..#\n\
##########\n";

/// Diamond mask for irregular boards, sized like the duel board
const DUEL_MASK: &str = "\
000010000\n\
000111000\n\
011111110\n\
111111111\n\
011111110\n\
000111000\n";

/// Create example board files for `setup`.
///
/// Existing files are kept unless `overwrite` is set. Returns the number of
/// files written.
pub fn create_example_boards<P: AsRef<Path>>(output_dir: P, overwrite: bool) -> Result<usize> {
    let dir = output_dir.as_ref();
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create directory: {}", dir.display()))?;

    let mut written = 0;
    for (name, content) in [
        ("duel.txt", DUEL),
        ("skirmish.txt", SKIRMISH),
        ("arena.txt", ARENA),
        ("duel_mask.txt", DUEL_MASK),
    ] {
        let path = dir.join(name);
        if path.exists() && !overwrite {
            continue;
        }
        std::fs::write(&path, content).with_context(|| format!("Failed to write {}", name))?;
        written += 1;
    }

    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::life::Team;
    use tempfile::tempdir;

    #[test]
    fn test_parse_grid_from_string() {
        let grid = parse_grid_from_string(".a.\nb#b\n.a.\n").unwrap();

        assert_eq!(grid.width, 3);
        assert_eq!(grid.height, 3);
        assert_eq!(grid.population(Team::A), 2);
        assert_eq!(grid.population(Team::B), 2);
        assert_eq!(grid.get(1, 1), Some(Cell::Barrier));
        assert_eq!(grid.get(0, 1), Some(Cell::TeamB));
    }

    #[test]
    fn test_grid_to_string() {
        let content = ".a.\nb#b\n.a.\n";
        let grid = parse_grid_from_string(content).unwrap();
        assert_eq!(grid_to_string(&grid), content);
    }

    #[test]
    fn test_file_operations() {
        let temp_dir = tempdir().unwrap();
        let file_path = temp_dir.path().join("boards/test.txt");

        let original = parse_grid_from_string("a.b\n.#.\n").unwrap();
        save_grid_to_file(&original, &file_path).unwrap();
        let loaded = load_grid_from_file(&file_path).unwrap();

        assert_eq!(original, loaded);
    }

    #[test]
    fn test_invalid_input() {
        assert_eq!(
            parse_grid_from_string("...\n.X.\n"),
            Err(LifeError::InvalidCharacter { ch: 'X', row: 1, col: 1 })
        );
        assert!(matches!(
            parse_grid_from_string("...\n..\n"),
            Err(LifeError::GridMismatch { .. })
        ));
        assert!(matches!(
            parse_grid_from_string(""),
            Err(LifeError::InvalidDimension { .. })
        ));
    }

    #[test]
    fn test_parse_mask() {
        let (width, height, mask) = parse_mask_from_string("010\n111\n").unwrap();
        assert_eq!((width, height), (3, 2));
        assert_eq!(mask, vec![false, true, false, true, true, true]);
        assert!(parse_mask_from_string("012\n").is_err());
    }

    #[test]
    fn test_create_example_boards() {
        let temp_dir = tempdir().unwrap();
        assert_eq!(create_example_boards(temp_dir.path(), false).unwrap(), 4);

        for name in ["duel.txt", "skirmish.txt", "arena.txt", "duel_mask.txt"] {
            assert!(temp_dir.path().join(name).exists(), "{} missing", name);
        }

        let duel = load_grid_from_file(temp_dir.path().join("duel.txt")).unwrap();
        assert_eq!((duel.width, duel.height), (9, 6));
        assert_eq!(duel.population(Team::A), 3);
        assert_eq!(duel.count(Cell::Barrier), 2);

        let (width, height, _) = load_mask_from_file(temp_dir.path().join("duel_mask.txt")).unwrap();
        assert_eq!((width, height), (duel.width, duel.height));
    }

    #[test]
    fn test_example_boards_keep_edits() {
        let temp_dir = tempdir().unwrap();
        let duel = temp_dir.path().join("duel.txt");
        std::fs::write(&duel, "a\n").unwrap();

        assert_eq!(create_example_boards(temp_dir.path(), false).unwrap(), 3);
        assert_eq!(std::fs::read_to_string(&duel).unwrap(), "a\n");

        assert_eq!(create_example_boards(temp_dir.path(), true).unwrap(), 4);
        assert_eq!(load_grid_from_file(&duel).unwrap().width, 9);
    }
}
