//! Level bundles - JSON-authored grids consumed at session start
//!
//! The loader validates the rectangular and single-player invariants before
//! the simulation core ever sees a grid, so a live session can treat a
//! missing player as a programming fault rather than bad input.

use serde::{Deserialize, Serialize};

use crate::core::error::EngineError;
use crate::core::grid::Grid;
use crate::domain::cells::Cell;

pub const BUNDLE_FORMAT_VERSION: u32 = 1;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LevelBundle {
    pub format_version: u32,
    pub levels: Vec<LevelDef>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LevelDef {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Token matrix, row-major
    pub rows: Vec<Vec<String>>,
}

pub struct LevelLibrary {
    levels: Vec<LevelDef>,
}

// The two levels shipped with the original game
const BUILTIN_LEVELS: [(&str, &[&[&str]]); 2] = [
    (
        "first-steps",
        &[
            &["b", "b", "b", "b", "b", "b", "b", "b", "b"],
            &["b", "a", "a", "a", "a", "a", "a", "a", "b"],
            &["b", "p", "a", "a", "b", "a", "a", "f", "b"],
            &["b", "b", "b", "b", "b", "b", "b", "b", "b"],
        ],
    ),
    (
        "turnabout",
        &[
            &["b", "b", "b", "b", "b", "b", "b", "b", "b"],
            &["b", "a", "a", "g→", "a", "a", "a", "a", "b"],
            &["b", "a", "a", "a", "a", "a", "a", "a", "b"],
            &["b", "p", "a", "a", "b", "a", "a", "f", "b"],
            &["b", "b", "b", "g↑", "b", "b", "b", "b", "b"],
        ],
    ),
];

impl LevelLibrary {
    /// The levels compiled into the engine
    pub fn builtin() -> Self {
        let levels = BUILTIN_LEVELS
            .iter()
            .map(|(name, rows)| LevelDef {
                name: Some((*name).to_string()),
                rows: rows
                    .iter()
                    .map(|r| r.iter().map(|t| (*t).to_string()).collect())
                    .collect(),
            })
            .collect();
        Self { levels }
    }

    pub fn from_bundle_json(json: &str) -> Result<Self, EngineError> {
        let bundle: LevelBundle =
            serde_json::from_str(json).map_err(|e| EngineError::MalformedLevel(e.to_string()))?;
        if bundle.format_version != BUNDLE_FORMAT_VERSION {
            return Err(EngineError::MalformedLevel(format!(
                "unsupported bundle format_version {}",
                bundle.format_version
            )));
        }
        if bundle.levels.is_empty() {
            return Err(EngineError::MalformedLevel("bundle has no levels".to_string()));
        }
        Ok(Self { levels: bundle.levels })
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    pub fn level(&self, index: usize) -> Option<&LevelDef> {
        self.levels.get(index)
    }

    /// Build and validate the grid for one level
    pub fn grid(&self, index: usize) -> Result<Grid, EngineError> {
        let def = self.levels.get(index).ok_or_else(|| {
            EngineError::MalformedLevel(format!("no level at index {}", index))
        })?;
        grid_from_tokens(&def.rows)
    }
}

/// Parse a token matrix into a validated grid: rectangular, known tokens,
/// exactly one Player cell.
pub fn grid_from_tokens(rows: &[Vec<String>]) -> Result<Grid, EngineError> {
    let mut parsed: Vec<Vec<Cell>> = Vec::with_capacity(rows.len());
    for (i, row) in rows.iter().enumerate() {
        let mut out = Vec::with_capacity(row.len());
        for (j, token) in row.iter().enumerate() {
            let cell = Cell::from_token(token).ok_or_else(|| {
                EngineError::MalformedLevel(format!(
                    "unknown cell token {:?} at ({}, {})",
                    token, i, j
                ))
            })?;
            out.push(cell);
        }
        parsed.push(out);
    }
    let grid = Grid::from_rows(parsed)?;
    match grid.player_count() {
        1 => Ok(grid),
        0 => Err(EngineError::MalformedLevel("level has no player cell".to_string())),
        n => Err(EngineError::MalformedLevel(format!(
            "level has {} player cells, expected exactly one",
            n
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::grid::Position;

    #[test]
    fn builtin_levels_validate() {
        let lib = LevelLibrary::builtin();
        assert_eq!(lib.len(), 2);

        let first = lib.grid(0).unwrap();
        assert_eq!((first.width(), first.height()), (9, 4));
        assert_eq!(first.find_player().unwrap(), Position::new(2, 1));

        let second = lib.grid(1).unwrap();
        assert_eq!((second.width(), second.height()), (9, 5));
        assert_eq!(second.at(1, 3), Some(Cell::GravityRight));
        assert_eq!(second.at(4, 3), Some(Cell::GravityUp));
    }

    #[test]
    fn bundle_json_round_trips() {
        let json = r#"{
            "format_version": 1,
            "levels": [
                { "name": "tiny", "rows": [["b","b","b"],["b","p","b"],["b","b","b"]] }
            ]
        }"#;
        let lib = LevelLibrary::from_bundle_json(json).unwrap();
        assert_eq!(lib.len(), 1);
        assert_eq!(lib.level(0).unwrap().name.as_deref(), Some("tiny"));
        let grid = lib.grid(0).unwrap();
        assert_eq!(grid.find_player().unwrap(), Position::new(1, 1));
    }

    #[test]
    fn bundle_rejects_bad_version_and_unknown_tokens() {
        let bad_version = r#"{ "format_version": 2, "levels": [] }"#;
        assert!(matches!(
            LevelLibrary::from_bundle_json(bad_version),
            Err(EngineError::MalformedLevel(_))
        ));

        let bad_token = r#"{
            "format_version": 1,
            "levels": [ { "rows": [["p","z"]] } ]
        }"#;
        let lib = LevelLibrary::from_bundle_json(bad_token).unwrap();
        assert!(matches!(lib.grid(0), Err(EngineError::MalformedLevel(_))));
    }

    #[test]
    fn player_invariant_is_enforced() {
        let none: Vec<Vec<String>> = vec![vec!["a".into(), "b".into()]];
        assert!(matches!(
            grid_from_tokens(&none),
            Err(EngineError::MalformedLevel(_))
        ));

        let two: Vec<Vec<String>> = vec![vec!["p".into(), "p".into()]];
        assert!(matches!(
            grid_from_tokens(&two),
            Err(EngineError::MalformedLevel(_))
        ));
    }
}
