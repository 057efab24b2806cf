//! Pseudo-legal move generation.
//!
//! Destinations are decided by piece geometry and occupancy only. Whether the
//! mover's own king ends up attacked is never considered.

use std::collections::BTreeSet;

use crate::board::Board;
use crate::coord::Square;
use crate::piece::{Color, PieceKind};

const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (-2, -1),
    (-2, 1),
    (-1, -2),
    (-1, 2),
    (1, -2),
    (1, 2),
    (2, -1),
    (2, 1),
];

const ORTHOGONAL: [(i8, i8); 4] = [(0, 1), (0, -1), (1, 0), (-1, 0)];
const DIAGONAL: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];
const ALL_DIRECTIONS: [(i8, i8); 8] = [
    (0, 1),
    (0, -1),
    (1, 0),
    (-1, 0),
    (1, 1),
    (1, -1),
    (-1, 1),
    (-1, -1),
];

/// Destinations for the piece on `square` when `acting` is the side moving it.
///
/// Empty when the square is empty or holds a piece of the other color.
pub fn legal_moves(board: &Board, square: Square, acting: Color) -> BTreeSet<Square> {
    let mut moves = BTreeSet::new();
    let Some(piece) = board.piece_at(square) else {
        return moves;
    };
    if piece.color != acting {
        return moves;
    }

    match piece.kind {
        PieceKind::Pawn => pawn_moves(board, square, acting, &mut moves),
        PieceKind::Knight => step_moves(board, square, acting, &KNIGHT_OFFSETS, &mut moves),
        PieceKind::Bishop => ray_moves(board, square, acting, &DIAGONAL, &mut moves),
        PieceKind::Rook => ray_moves(board, square, acting, &ORTHOGONAL, &mut moves),
        PieceKind::Queen => ray_moves(board, square, acting, &ALL_DIRECTIONS, &mut moves),
        PieceKind::King => step_moves(board, square, acting, &ALL_DIRECTIONS, &mut moves),
    }
    moves
}

/// Every pseudo-legal `(from, to)` pair for one side, in board order.
pub fn all_moves(board: &Board, color: Color) -> Vec<(Square, Square)> {
    board
        .pieces()
        .filter(|(_, piece)| piece.color == color)
        .flat_map(|(from, _)| {
            legal_moves(board, from, color)
                .into_iter()
                .map(move |to| (from, to))
        })
        .collect()
}

/// True when `to` is a legal destination for the piece on `from`.
pub fn is_legal(board: &Board, from: Square, to: Square, acting: Color) -> bool {
    legal_moves(board, from, acting).contains(&to)
}

fn pawn_moves(board: &Board, from: Square, color: Color, moves: &mut BTreeSet<Square>) {
    let dir = color.forward();

    if let Some(one) = from.offset(dir, 0) {
        if board.piece_at(one).is_none() {
            moves.insert(one);
            if from.row() == color.pawn_row() {
                if let Some(two) = from.offset(2 * dir, 0) {
                    if board.piece_at(two).is_none() {
                        moves.insert(two);
                    }
                }
            }
        }
    }

    for d_col in [-1, 1] {
        if let Some(target) = from.offset(dir, d_col) {
            if board.piece_at(target).is_some_and(|p| p.is_enemy_of(color)) {
                moves.insert(target);
            }
        }
    }
}

/// Single-step pieces: knight and king.
fn step_moves(
    board: &Board,
    from: Square,
    color: Color,
    offsets: &[(i8, i8)],
    moves: &mut BTreeSet<Square>,
) {
    for &(d_row, d_col) in offsets {
        let Some(target) = from.offset(d_row, d_col) else {
            continue;
        };
        match board.piece_at(target) {
            Some(occupant) if !occupant.is_enemy_of(color) => {}
            _ => {
                moves.insert(target);
            }
        }
    }
}

/// Sliding pieces: walk each ray until the edge or the first occupied square.
fn ray_moves(
    board: &Board,
    from: Square,
    color: Color,
    directions: &[(i8, i8)],
    moves: &mut BTreeSet<Square>,
) {
    for &(d_row, d_col) in directions {
        let mut current = from;
        while let Some(next) = current.offset(d_row, d_col) {
            match board.piece_at(next) {
                None => {
                    moves.insert(next);
                }
                Some(occupant) => {
                    if occupant.is_enemy_of(color) {
                        moves.insert(next);
                    }
                    break;
                }
            }
            current = next;
        }
    }
}
