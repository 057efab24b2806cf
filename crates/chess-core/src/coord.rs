//! Square labels and board indices.
//!
//! Row 0 is rank 8 and row 7 is rank 1, so `row = 8 - rank` and
//! `col = file - 'a'`. Everything that touches the grid goes through [`Square`].

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::RulesError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Square {
    row: u8,
    col: u8,
}

impl Square {
    /// Parse a two-character label such as `e4`.
    pub fn parse(label: &str) -> Result<Square, RulesError> {
        let bytes = label.as_bytes();
        if bytes.len() != 2 {
            return Err(RulesError::InvalidSquare(label.to_string()));
        }
        let (file, rank) = (bytes[0], bytes[1]);
        if !(b'a'..=b'h').contains(&file) || !(b'1'..=b'8').contains(&rank) {
            return Err(RulesError::InvalidSquare(label.to_string()));
        }
        Ok(Square {
            row: 8 - (rank - b'0'),
            col: file - b'a',
        })
    }

    pub fn from_index(row: usize, col: usize) -> Option<Square> {
        (row < 8 && col < 8).then(|| Square {
            row: row as u8,
            col: col as u8,
        })
    }

    pub fn row(self) -> usize {
        self.row as usize
    }

    pub fn col(self) -> usize {
        self.col as usize
    }

    /// Step by a row/column delta, `None` when it leaves the board.
    pub fn offset(self, d_row: i8, d_col: i8) -> Option<Square> {
        let row = self.row as i8 + d_row;
        let col = self.col as i8 + d_col;
        if (0..8).contains(&row) && (0..8).contains(&col) {
            Some(Square {
                row: row as u8,
                col: col as u8,
            })
        } else {
            None
        }
    }

    /// All 64 squares, a8 first.
    pub fn all() -> impl Iterator<Item = Square> {
        (0..8).flat_map(|row| (0..8).map(move |col| Square { row, col }))
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", (b'a' + self.col) as char, 8 - self.row)
    }
}

impl FromStr for Square {
    type Err = RulesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Square::parse(s)
    }
}

impl TryFrom<String> for Square {
    type Error = RulesError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Square::parse(&value)
    }
}

impl From<Square> for String {
    fn from(square: Square) -> String {
        square.to_string()
    }
}

/// `e2` -> `(6, 4)`.
pub fn square_to_index(label: &str) -> Result<(usize, usize), RulesError> {
    let square = Square::parse(label)?;
    Ok((square.row(), square.col()))
}

/// `(6, 4)` -> `e2`.
pub fn index_to_square(row: usize, col: usize) -> Result<String, RulesError> {
    Square::from_index(row, col)
        .map(|s| s.to_string())
        .ok_or_else(|| RulesError::InvalidSquare(format!("({row}, {col})")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_square_to_index_corners() {
        assert_eq!(square_to_index("a8").unwrap(), (0, 0));
        assert_eq!(square_to_index("h1").unwrap(), (7, 7));
        assert_eq!(square_to_index("e2").unwrap(), (6, 4));
    }

    #[test]
    fn test_round_trip_every_label() {
        for file in 'a'..='h' {
            for rank in 1..=8 {
                let label = format!("{file}{rank}");
                let (row, col) = square_to_index(&label).unwrap();
                assert_eq!(index_to_square(row, col).unwrap(), label);
            }
        }
    }

    #[test]
    fn test_malformed_labels_are_errors() {
        for bad in ["", "e", "e22", "i1", "a0", "a9", "E2", "2e", "é2"] {
            assert!(
                matches!(Square::parse(bad), Err(RulesError::InvalidSquare(_))),
                "{bad:?} should be rejected"
            );
        }
        assert!(index_to_square(8, 0).is_err());
    }

    #[test]
    fn test_offset_stays_on_board() {
        let a1 = Square::parse("a1").unwrap();
        assert_eq!(a1.offset(-1, 0).unwrap().to_string(), "a2");
        assert!(a1.offset(1, 0).is_none());
        assert!(a1.offset(0, -1).is_none());
        assert_eq!(Square::all().count(), 64);
    }

    #[test]
    fn test_square_serde_uses_label() {
        let sq: Square = serde_json::from_str("\"g7\"").unwrap();
        assert_eq!(serde_json::to_string(&sq).unwrap(), "\"g7\"");
        assert!(serde_json::from_str::<Square>("\"z9\"").is_err());
    }
}
