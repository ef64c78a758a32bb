use std::path::{Path, PathBuf};

use itertools::Itertools;
use regex::Regex;

use crate::eternity::prelude::*;
use crate::solver::Settings;

/// The filename convention for piece databases.
pub fn data_filename(size: usize, patterns: usize) -> String {
    format!("pieces_{size}x{size}_{patterns}.e2")
}

/// Scans the data directory for piece database files, sorted by name.
pub fn scan_data_dir(dir: &Path) -> Result<Vec<PathBuf>> {
    let name_format = Regex::new(r"^pieces_(\d+)x(\d+)_(\d+)\.e2$").unwrap();
    if !dir.exists() {
        return Ok(vec![]);
    }
    let mut found = vec![];
    for entry in std::fs::read_dir(dir).with_context(|| format!("scanning {}", dir.display()))? {
        let entry = entry?;
        let name = entry.file_name();
        if let Some(captures) = name.to_str().and_then(|name| name_format.captures(name)) {
            if captures[1] == captures[2] {
                found.push(entry.path());
            }
        }
    }
    found.sort();
    Ok(found)
}

/// Loads the piece database matching the configured board, generating and
/// saving a fresh solvable set when the directory has none.
pub fn load_or_generate(dir: &Path, settings: &Settings, rng: &mut RandomSource) -> Result<Vec<Piece>> {
    let path = dir.join(data_filename(settings.board_size, settings.pattern_num));
    if !path.exists() {
        log::info!("no piece database at {}, generating a fresh set", path.display());
        let pieces = generate_piece_set(settings.board_size, settings.pattern_num, rng)?;
        write_pieces(&path, &pieces)?;
    }
    read_pieces(&path, settings)
}

/// Reads a piece database: one `id top right bottom left` record per line,
/// exactly one record per slot of the configured board.
pub fn read_pieces(path: &Path, settings: &Settings) -> Result<Vec<Piece>> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading pieces from {}", path.display()))?;

    let mut pieces = vec![];
    for (number, line) in text.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let fields: Vec<usize> = line
            .split_whitespace()
            .map(|field| field.parse::<usize>())
            .try_collect()
            .with_context(|| format!("piece record on line {}: {line}", number + 1))?;
        let &[id, top, right, bottom, left] = fields.as_slice() else {
            return Err(anyhow!("piece record on line {} has {} fields, expected 5", number + 1, fields.len()));
        };
        pieces.push(Piece::new(id, [top as Pattern, right as Pattern, bottom as Pattern, left as Pattern])?);
    }

    validate_census(&pieces, settings)?;
    Ok(pieces)
}

/// Writes a piece database in the format [`read_pieces`] accepts.
pub fn write_pieces(path: &Path, pieces: &[Piece]) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let lines: String = pieces
        .iter()
        .map(|piece| {
            let [top, right, bottom, left] = piece.segments();
            format!("{} {top} {right} {bottom} {left}\n", piece.id)
        })
        .collect();
    std::fs::write(path, lines).with_context(|| format!("writing pieces to {}", path.display()))
}

// A database is only usable if it forms a legal frame for the configured
// board; anything else is a configuration problem, not a solver one.
fn validate_census(pieces: &[Piece], settings: &Settings) -> Result<()> {
    let size = settings.board_size;
    if pieces.len() != size * size {
        return Err(PuzzleError::InvalidConfig(format!(
            "database holds {} pieces, a {size}x{size} board needs {}",
            pieces.len(),
            size * size
        )).into());
    }
    if !pieces.iter().map(|piece| piece.id).all_unique() {
        return Err(PuzzleError::InvalidConfig("database repeats a piece id".into()).into());
    }
    if let Some(piece) = pieces
        .iter()
        .find(|piece| piece.segments().iter().any(|&s| s as usize > settings.pattern_num))
    {
        return Err(PuzzleError::InvalidConfig(format!(
            "piece {} uses a pattern beyond the configured {}",
            piece.id, settings.pattern_num
        )).into());
    }

    let census = |kind: PieceKind| pieces.iter().filter(|piece| piece.kind == kind).count();
    let expected = [4, 4 * (size - 2), (size - 2) * (size - 2)];
    for (kind, expected) in PieceKind::all().into_iter().zip(expected) {
        let found = census(kind);
        if found != expected {
            return Err(PuzzleError::InvalidConfig(format!(
                "database holds {found} {kind} pieces, a {size}x{size} board needs {expected}"
            )).into());
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solver::{CrossoverMethod, MutationMethod, SelectionMethod};

    fn settings(size: usize, patterns: usize) -> Settings {
        Settings {
            board_size: size,
            pattern_num: patterns,
            pop_size: 10,
            selection: SelectionMethod::Roulette,
            crossover: CrossoverMethod::OnePoint,
            mutation: MutationMethod::Swap,
            mut_rate: 10.0,
            elite_rate: 10,
            start_piece: false,
        }
    }

    fn scratch_dir(tag: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("eternity_{tag}_{}", std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);
        dir
    }

    #[test]
    fn databases_round_trip() {
        let dir = scratch_dir("round_trip");
        let mut rng = RandomSource::with_seed(19);
        let pieces = generate_piece_set(5, 3, &mut rng).unwrap();
        let path = dir.join(data_filename(5, 3));

        write_pieces(&path, &pieces).unwrap();
        let read = read_pieces(&path, &settings(5, 3)).unwrap();
        assert_eq!(read, pieces);

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn generates_once_then_reloads() {
        let dir = scratch_dir("generate");
        let settings = settings(4, 2);
        let mut rng = RandomSource::with_seed(7);

        let first = load_or_generate(&dir, &settings, &mut rng).unwrap();
        let second = load_or_generate(&dir, &settings, &mut rng).unwrap();
        assert_eq!(first, second);
        assert_eq!(scan_data_dir(&dir).unwrap(), vec![dir.join(data_filename(4, 2))]);

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn rejects_databases_that_do_not_fit() {
        let dir = scratch_dir("mismatch");
        let mut rng = RandomSource::with_seed(3);
        let pieces = generate_piece_set(5, 3, &mut rng).unwrap();
        let path = dir.join(data_filename(5, 3));
        write_pieces(&path, &pieces).unwrap();

        // wrong board size and an out-of-range pattern palette
        assert!(read_pieces(&path, &settings(6, 3)).is_err());
        assert!(read_pieces(&path, &settings(5, 2)).is_err());

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn scan_ignores_foreign_files() {
        let dir = scratch_dir("scan");
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("pieces_4x4_2.e2"), "").unwrap();
        std::fs::write(dir.join("pieces_4x5_2.e2"), "").unwrap();
        std::fs::write(dir.join("notes.txt"), "").unwrap();

        assert_eq!(scan_data_dir(&dir).unwrap(), vec![dir.join("pieces_4x4_2.e2")]);

        std::fs::remove_dir_all(&dir).unwrap();
    }
}
