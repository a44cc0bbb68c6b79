//! Text format for score rules.
//!
//! ```text
//! # numbered tiles are worth one point
//! 1,2,3,4,5,6,7,8: 1
//! T: 3
//! D: 5 +bonus
//! ```
//!
//! - `#` starts a comment, blank lines are skipped
//! - left of `:` is a comma-separated list of tile labels
//! - right of `:` is an integer base, optionally followed by `+bonus`
//! - a later line overrides an earlier one for the same kind
//! - every kind must be covered by the end of the file

use std::path::Path;

use crate::core::{ConfigError, TileKind};

use super::table::{ScoreRule, ScoreTable, ScoreTableBuilder};

const BONUS_MARKER: &str = "+bonus";

/// Parse score rules from text.
pub fn parse_score_rules(text: &str) -> Result<ScoreTable, ConfigError> {
    let mut builder = ScoreTableBuilder::default();

    for (idx, raw) in text.lines().enumerate() {
        let line_no = idx + 1;
        let line = raw.split('#').next().unwrap_or_default().trim();
        if line.is_empty() {
            continue;
        }

        let err = |message: String| ConfigError::ScoreRules { line: line_no, message };

        let (labels, value) = line
            .split_once(':')
            .ok_or_else(|| err("expected `labels: points`".to_string()))?;

        let rule = parse_rule(value.trim()).map_err(err)?;

        let kinds = labels
            .split(',')
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .map(|l| TileKind::from_label(l).ok_or_else(|| err(format!("unknown tile label {l:?}"))))
            .collect::<Result<Vec<_>, _>>()?;
        if kinds.is_empty() {
            return Err(err("no tile labels".to_string()));
        }

        for kind in kinds {
            builder.set(kind, rule);
        }
    }

    builder.build()
}

fn parse_rule(value: &str) -> Result<ScoreRule, String> {
    let (base, add_bonus) = match value.find(BONUS_MARKER) {
        Some(pos) => (value[..pos].trim(), true),
        None => (value, false),
    };
    let base = base
        .parse::<i32>()
        .map_err(|_| format!("invalid points {base:?}"))?;
    Ok(ScoreRule { base, add_bonus })
}

/// Read and parse a score-rule file.
pub fn load_score_rules(path: impl AsRef<Path>) -> Result<ScoreTable, ConfigError> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_score_rules(&text)
}

impl ScoreTable {
    /// See [`parse_score_rules`].
    pub fn parse(text: &str) -> Result<Self, ConfigError> {
        parse_score_rules(text)
    }

    /// See [`load_score_rules`].
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        load_score_rules(path)
    }
}
