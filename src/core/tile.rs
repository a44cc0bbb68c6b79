//! Tiles and the deck.
//!
//! There are ten tile kinds: the numbered ranks 1-8 and the two specials,
//! Tiger and Dragon. A deck holds `v` copies of each numbered rank `v` plus
//! one Tiger and one Dragon, 38 tiles in total.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Number of tiles in a full deck.
pub const DECK_SIZE: usize = 38;

/// The kind of a tile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TileKind {
    Num1,
    Num2,
    Num3,
    Num4,
    Num5,
    Num6,
    Num7,
    Num8,
    Tiger,
    Dragon,
}

impl TileKind {
    /// Number of distinct kinds.
    pub const COUNT: usize = 10;

    /// Every kind, in canonical order.
    pub const ALL: [TileKind; Self::COUNT] = [
        TileKind::Num1,
        TileKind::Num2,
        TileKind::Num3,
        TileKind::Num4,
        TileKind::Num5,
        TileKind::Num6,
        TileKind::Num7,
        TileKind::Num8,
        TileKind::Tiger,
        TileKind::Dragon,
    ];

    /// Position of this kind in [`TileKind::ALL`].
    #[must_use]
    pub const fn ordinal(self) -> usize {
        self as usize
    }

    /// Face value of a numbered kind, `None` for Tiger and Dragon.
    #[must_use]
    pub const fn value(self) -> Option<u8> {
        match self {
            TileKind::Tiger | TileKind::Dragon => None,
            numbered => Some(numbered as u8 + 1),
        }
    }

    #[must_use]
    pub const fn is_number(self) -> bool {
        self.value().is_some()
    }

    #[must_use]
    pub fn is_even(self) -> bool {
        self.value().is_some_and(|v| v % 2 == 0)
    }

    #[must_use]
    pub fn is_odd(self) -> bool {
        self.value().is_some_and(|v| v % 2 == 1)
    }

    /// Short label used by clients and the score-rule format.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            TileKind::Num1 => "1",
            TileKind::Num2 => "2",
            TileKind::Num3 => "3",
            TileKind::Num4 => "4",
            TileKind::Num5 => "5",
            TileKind::Num6 => "6",
            TileKind::Num7 => "7",
            TileKind::Num8 => "8",
            TileKind::Tiger => "T",
            TileKind::Dragon => "D",
        }
    }

    /// Parse a label. Accepts `1`-`8`, `T`/`t` and `D`/`d`.
    ///
    /// ```
    /// use tiger_dragon::core::TileKind;
    ///
    /// assert_eq!(TileKind::from_label("t"), Some(TileKind::Tiger));
    /// assert_eq!(TileKind::from_label("7"), Some(TileKind::Num7));
    /// assert_eq!(TileKind::from_label("9"), None);
    /// ```
    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "t" => Some(TileKind::Tiger),
            "d" => Some(TileKind::Dragon),
            _ => Self::ALL.into_iter().find(|kind| kind.label() == label),
        }
    }
}

impl std::fmt::Display for TileKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TileKind::Tiger => f.write_str("Tiger"),
            TileKind::Dragon => f.write_str("Dragon"),
            numbered => f.write_str(numbered.label()),
        }
    }
}

/// A single tile. Tiles of the same kind are interchangeable.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Tile {
    pub kind: TileKind,
}

impl Tile {
    #[must_use]
    pub const fn new(kind: TileKind) -> Self {
        Self { kind }
    }
}

impl From<TileKind> for Tile {
    fn from(kind: TileKind) -> Self {
        Self::new(kind)
    }
}

/// A seat's tiles in draw order. The largest deal is 13 tiles.
pub type Hand = SmallVec<[Tile; 13]>;

/// Build the unshuffled deck in canonical order.
#[must_use]
pub fn build_deck() -> Vec<Tile> {
    let mut deck = Vec::with_capacity(DECK_SIZE);
    for value in 1..=8u8 {
        let kind = TileKind::ALL[usize::from(value) - 1];
        deck.extend(std::iter::repeat(Tile::new(kind)).take(usize::from(value)));
    }
    deck.push(Tile::new(TileKind::Tiger));
    deck.push(Tile::new(TileKind::Dragon));
    deck
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deck_composition() {
        let deck = build_deck();
        assert_eq!(deck.len(), DECK_SIZE);

        for kind in TileKind::ALL {
            let count = deck.iter().filter(|t| t.kind == kind).count();
            let expected = kind.value().map_or(1, usize::from);
            assert_eq!(count, expected, "wrong count for {kind}");
        }
    }

    #[test]
    fn test_values_and_parity() {
        assert_eq!(TileKind::Num1.value(), Some(1));
        assert_eq!(TileKind::Num8.value(), Some(8));
        assert_eq!(TileKind::Tiger.value(), None);

        assert!(TileKind::Num4.is_even());
        assert!(TileKind::Num7.is_odd());
        assert!(!TileKind::Dragon.is_even());
        assert!(!TileKind::Dragon.is_odd());
        assert!(!TileKind::Tiger.is_number());
    }

    #[test]
    fn test_labels_round_trip() {
        for kind in TileKind::ALL {
            assert_eq!(TileKind::from_label(kind.label()), Some(kind));
        }
        assert_eq!(TileKind::from_label("d"), Some(TileKind::Dragon));
        assert_eq!(TileKind::from_label("0"), None);
        assert_eq!(TileKind::from_label("+4"), None);
        assert_eq!(TileKind::from_label("Tiger"), None);
        assert_eq!(TileKind::from_label(""), None);
    }
}
