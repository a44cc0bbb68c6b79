//! Score table: points awarded for winning a round with each tile kind.
//!
//! A `ScoreTable` always has a rule for every kind. The only ways to get one
//! are [`ScoreTableBuilder::build`] and the text loader, both of which refuse
//! to produce a partial table, so [`ScoreTable::lookup`] cannot miss.

use serde::{Deserialize, Serialize};

use crate::core::{ConfigError, TileKind};

/// Scoring rule for one tile kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ScoreRule {
    /// Points for winning with this kind.
    pub base: i32,
    /// Add the winner's bonus-discard count on top of `base`.
    pub add_bonus: bool,
}

impl ScoreRule {
    #[must_use]
    pub const fn flat(base: i32) -> Self {
        Self { base, add_bonus: false }
    }

    #[must_use]
    pub const fn with_bonus(base: i32) -> Self {
        Self { base, add_bonus: true }
    }
}

/// Total mapping from tile kind to scoring rule.
///
/// ## Example
///
/// ```
/// use tiger_dragon::core::TileKind;
/// use tiger_dragon::scoring::{ScoreRule, ScoreTable};
///
/// let table = ScoreTable::builder()
///     .numbers(ScoreRule::flat(1))
///     .rule(TileKind::Tiger, ScoreRule::flat(3))
///     .rule(TileKind::Dragon, ScoreRule::with_bonus(5))
///     .build()
///     .unwrap();
///
/// assert_eq!(table.lookup(TileKind::Dragon, 3), 8);
/// assert_eq!(table.lookup(TileKind::Num4, 3), 1);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreTable {
    rules: [ScoreRule; TileKind::COUNT],
}

impl ScoreTable {
    #[must_use]
    pub fn builder() -> ScoreTableBuilder {
        ScoreTableBuilder::default()
    }

    /// Points for winning with `kind` after `bonus_discards` bonus discards.
    #[must_use]
    pub fn lookup(&self, kind: TileKind, bonus_discards: u32) -> i32 {
        let rule = self.rule(kind);
        if rule.add_bonus {
            let bonus = i32::try_from(bonus_discards).unwrap_or(i32::MAX);
            rule.base.saturating_add(bonus)
        } else {
            rule.base
        }
    }

    #[must_use]
    pub fn rule(&self, kind: TileKind) -> ScoreRule {
        self.rules[kind.ordinal()]
    }

    /// Iterate over (kind, rule) pairs in canonical kind order.
    pub fn iter(&self) -> impl Iterator<Item = (TileKind, ScoreRule)> + '_ {
        TileKind::ALL.into_iter().zip(self.rules.iter().copied())
    }
}

/// Collects rules until every kind is covered.
///
/// Setting the same kind twice keeps the later rule.
#[derive(Clone, Debug, Default)]
pub struct ScoreTableBuilder {
    rules: [Option<ScoreRule>; TileKind::COUNT],
}

impl ScoreTableBuilder {
    #[must_use]
    pub fn rule(mut self, kind: TileKind, rule: ScoreRule) -> Self {
        self.set(kind, rule);
        self
    }

    /// Same rule for all eight numbered kinds.
    #[must_use]
    pub fn numbers(mut self, rule: ScoreRule) -> Self {
        for kind in TileKind::ALL.into_iter().filter(|k| k.is_number()) {
            self.set(kind, rule);
        }
        self
    }

    pub fn set(&mut self, kind: TileKind, rule: ScoreRule) {
        self.rules[kind.ordinal()] = Some(rule);
    }

    /// Kinds that still have no rule.
    #[must_use]
    pub fn missing(&self) -> Vec<TileKind> {
        TileKind::ALL
            .into_iter()
            .filter(|k| self.rules[k.ordinal()].is_none())
            .collect()
    }

    /// Finish the table, failing if any kind has no rule.
    pub fn build(self) -> Result<ScoreTable, ConfigError> {
        let mut rules = [ScoreRule::flat(0); TileKind::COUNT];
        let mut missing = Vec::new();
        for kind in TileKind::ALL {
            match self.rules[kind.ordinal()] {
                Some(rule) => rules[kind.ordinal()] = rule,
                None => missing.push(kind),
            }
        }
        if !missing.is_empty() {
            return Err(ConfigError::IncompleteScoreTable { missing });
        }
        Ok(ScoreTable { rules })
    }
}
