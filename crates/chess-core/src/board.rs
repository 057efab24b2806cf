//! The 8x8 grid. On the wire it is `string[8][8]` with `""` for empty cells.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::coord::Square;
use crate::piece::{Color, Piece, PieceKind};

const BACK_RANK: [PieceKind; 8] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Board {
    cells: [[Option<Piece>; 8]; 8],
}

impl Board {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Standard starting position.
    pub fn standard() -> Self {
        let mut board = Self::empty();
        for (col, kind) in BACK_RANK.iter().enumerate() {
            board.cells[0][col] = Some(Piece::new(Color::Black, *kind));
            board.cells[1][col] = Some(Piece::new(Color::Black, PieceKind::Pawn));
            board.cells[6][col] = Some(Piece::new(Color::White, PieceKind::Pawn));
            board.cells[7][col] = Some(Piece::new(Color::White, *kind));
        }
        board
    }

    /// Build a board from piece placements, e.g. `[("a1", 'R'), ("a2", 'P')]`.
    /// Panics on bad input; test fixtures only.
    #[cfg(test)]
    pub(crate) fn from_placements(placements: &[(&str, char)]) -> Self {
        let mut board = Self::empty();
        for (label, code) in placements {
            let square = Square::parse(label).expect("fixture square");
            let piece = Piece::from_code(*code).expect("fixture piece");
            board.set(square, Some(piece));
        }
        board
    }

    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        self.cells[square.row()][square.col()]
    }

    pub fn set(&mut self, square: Square, piece: Option<Piece>) {
        self.cells[square.row()][square.col()] = piece;
    }

    /// Remove and return whatever stands on `square`.
    pub fn take(&mut self, square: Square) -> Option<Piece> {
        self.cells[square.row()][square.col()].take()
    }

    pub fn pieces(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        Square::all().filter_map(|sq| self.piece_at(sq).map(|p| (sq, p)))
    }

    /// Piece placement field of a FEN string, rank 8 first.
    pub fn to_fen_placement(&self) -> String {
        let mut out = String::with_capacity(72);
        for (row, cells) in self.cells.iter().enumerate() {
            let mut gap = 0;
            for cell in cells {
                match cell {
                    Some(piece) => {
                        if gap > 0 {
                            out.push(char::from(b'0' + gap));
                            gap = 0;
                        }
                        out.push(piece.code());
                    }
                    None => gap += 1,
                }
            }
            if gap > 0 {
                out.push(char::from(b'0' + gap));
            }
            if row < 7 {
                out.push('/');
            }
        }
        out
    }
}

impl Serialize for Board {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let rows: Vec<Vec<String>> = self
            .cells
            .iter()
            .map(|row| {
                row.iter()
                    .map(|cell| cell.map(|p| p.code().to_string()).unwrap_or_default())
                    .collect()
            })
            .collect();
        rows.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Board {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        use serde::de::Error;

        let rows = Vec::<Vec<String>>::deserialize(deserializer)?;
        if rows.len() != 8 {
            return Err(D::Error::custom(format!("board has {} rows", rows.len())));
        }
        let mut board = Board::empty();
        for (r, row) in rows.iter().enumerate() {
            if row.len() != 8 {
                return Err(D::Error::custom(format!("board row {r} has {} cells", row.len())));
            }
            for (c, cell) in row.iter().enumerate() {
                if cell.is_empty() {
                    continue;
                }
                let mut chars = cell.chars();
                let piece = match (chars.next(), chars.next()) {
                    (Some(code), None) => Piece::from_code(code),
                    _ => None,
                }
                .ok_or_else(|| D::Error::custom(format!("unknown piece code {cell:?}")))?;
                board.cells[r][c] = Some(piece);
            }
        }
        Ok(board)
    }
}
