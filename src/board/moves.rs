// Copyright 2026 Tobin Edwards
//
//    Licensed under the Apache License, Version 2.0 (the "License");
//    you may not use this file except in compliance with the License.
//    You may obtain a copy of the License at
//
//        http://www.apache.org/licenses/LICENSE-2.0
//
//    Unless required by applicable law or agreed to in writing, software
//    distributed under the License is distributed on an "AS IS" BASIS,
//    WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
//    See the License for the specific language governing permissions and
//    limitations under the License.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::fmt;
use strum::IntoEnumIterator;
use strum_macros::EnumIter;

use super::material::{Color, Piece};
use super::square::{Direction, Offset, Rank, Square};
use super::Board;

use Piece::*;

/// A single ply: source, destination, and the chosen kind for a pawn
/// reaching the far rank. Plain value, compared and hashed field-wise.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    pub from: Square,
    pub to: Square,
    pub promotion: Option<Promotion>,
}

impl Move {
    pub fn new(from: Square, to: Square, promotion: Option<Promotion>) -> Self {
        Self {
            from,
            to,
            promotion,
        }
    }

    pub fn standard(from: Square, to: Square) -> Self {
        Self::new(from, to, None)
    }

    pub fn promoting(from: Square, to: Square, promotion: Promotion) -> Self {
        Self::new(from, to, Some(promotion))
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.from, self.to)?;
        if let Some(promotion) = self.promotion {
            write!(f, "{}", promotion)?;
        }
        Ok(())
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash, EnumIter)]
pub enum Promotion {
    Queen,
    Rook,
    Bishop,
    Knight,
}

impl From<Promotion> for Piece {
    fn from(value: Promotion) -> Self {
        match value {
            Promotion::Queen => Piece::Queen,
            Promotion::Rook => Piece::Rook,
            Promotion::Bishop => Piece::Bishop,
            Promotion::Knight => Piece::Knight,
        }
    }
}

impl fmt::Display for Promotion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match *self {
            Promotion::Queen => "q",
            Promotion::Rook => "r",
            Promotion::Bishop => "b",
            Promotion::Knight => "n",
        };
        write!(f, "{}", s)
    }
}

/// Every move the piece on `from` could make by its movement pattern and
/// board occupancy alone. King safety is not considered here; the game
/// layer filters these against check exposure. Empty if `from` is vacant.
pub fn pseudo_legal_moves(board: &Board, from: Square) -> Vec<Move> {
    match board.contents(from) {
        None => Vec::new(),
        Some(material) => match material.piece() {
            King => stepping_moves(board, from, material.color(), &KING_STEPS[from]),
            Queen => sliding_moves(board, from, material.color(), Direction::iter()),
            Rook => sliding_moves(board, from, material.color(), Direction::horizontals()),
            Bishop => sliding_moves(board, from, material.color(), Direction::diagonals()),
            Knight => stepping_moves(board, from, material.color(), &KNIGHT_STEPS[from]),
            Pawn => pawn_moves(board, from, material.color()),
        },
    }
}

/// Walk each ray one square at a time: empty squares extend the ray, an
/// enemy square is captured and ends it, a friendly square ends it.
fn sliding_moves(
    board: &Board,
    from: Square,
    us: Color,
    rays: impl Iterator<Item = Direction>,
) -> Vec<Move> {
    let mut moves = Vec::new();
    for ray in rays {
        let mut square = from;
        while let Some(dest) = square + ray {
            match board.contents(dest) {
                None => moves.push(Move::standard(from, dest)),
                Some(material) => {
                    if material.color() != us {
                        moves.push(Move::standard(from, dest));
                    }
                    break;
                }
            }
            square = dest;
        }
    }
    moves
}

fn stepping_moves(board: &Board, from: Square, us: Color, steps: &[Square]) -> Vec<Move> {
    steps
        .iter()
        .filter(|&&dest| board.contents(dest).map_or(true, |material| material.color() != us))
        .map(|&dest| Move::standard(from, dest))
        .collect()
}

fn pawn_moves(board: &Board, from: Square, us: Color) -> Vec<Move> {
    let mut moves = Vec::new();
    let advance = Direction::pawn_advance(us);
    if let Some(dest) = from + advance {
        if board.contents(dest).is_none() {
            push_pawn_move(&mut moves, from, dest, us);
            // the double advance requires the intermediate square above to
            // be empty as well
            if from.rank() == Rank::pawn_rank(us) {
                if let Some(double) = dest + advance {
                    if board.contents(double).is_none() {
                        moves.push(Move::standard(from, double));
                    }
                }
            }
        }
    }
    for capture in Direction::pawn_captures(us) {
        if let Some(dest) = from + capture {
            if board
                .contents(dest)
                .map_or(false, |material| material.color() != us)
            {
                push_pawn_move(&mut moves, from, dest, us);
            }
        }
    }
    moves
}

fn push_pawn_move(moves: &mut Vec<Move>, from: Square, to: Square, us: Color) {
    if to.rank() == Rank::promotion_rank(us) {
        moves.extend(Promotion::iter().map(|promotion| Move::promoting(from, to, promotion)));
    } else {
        moves.push(Move::standard(from, to));
    }
}

static KING_STEPS: Lazy<[Vec<Square>; 64]> = Lazy::new(|| {
    let mut table: [Vec<Square>; 64] = std::array::from_fn(|_| Vec::new());
    for square in Square::iter() {
        table[square] = Direction::iter().filter_map(|dir| square + dir).collect();
    }
    table
});

static KNIGHT_STEPS: Lazy<[Vec<Square>; 64]> = Lazy::new(|| {
    const OFFSETS: [Offset; 8] = [
        Offset::new(-2, -1),
        Offset::new(-2, 1),
        Offset::new(2, -1),
        Offset::new(2, 1),
        Offset::new(-1, -2),
        Offset::new(-1, 2),
        Offset::new(1, -2),
        Offset::new(1, 2),
    ];
    let mut table: [Vec<Square>; 64] = std::array::from_fn(|_| Vec::new());
    for square in Square::iter() {
        table[square] = OFFSETS
            .into_iter()
            .filter_map(|offset| square + offset)
            .collect();
    }
    table
});

#[cfg(test)]
mod tests {
    use crate::*;
    use strum::IntoEnumIterator;
    use Square::*;

    fn destinations(moves: &[Move]) -> Vec<Square> {
        moves.iter().map(|mv| mv.to).collect()
    }

    #[test]
    fn test_empty_square_has_no_moves() {
        let board = Board::empty();
        assert!(pseudo_legal_moves(&board, E4).is_empty());
    }

    #[test]
    fn test_rook_boxed_in_at_start() {
        let board = Board::standard();
        assert!(pseudo_legal_moves(&board, A1).is_empty());
    }

    #[test]
    fn test_rook_rays_and_captures() {
        let board = Board::empty()
            .set_contents(D4, Some(Material::WR))
            .set_contents(D6, Some(Material::BP))
            .set_contents(B4, Some(Material::WP));
        let targets = destinations(&pseudo_legal_moves(&board, D4));
        assert!(targets.contains(&D5));
        assert!(targets.contains(&D6));
        assert!(!targets.contains(&D7));
        assert!(targets.contains(&C4));
        assert!(!targets.contains(&B4));
        assert!(targets.contains(&H4));
        assert!(targets.contains(&D1));
        assert_eq!(targets.len(), 10);
    }

    #[test]
    fn test_bishop_rays() {
        let board = Board::empty()
            .set_contents(C1, Some(Material::WB))
            .set_contents(E3, Some(Material::BN));
        let targets = destinations(&pseudo_legal_moves(&board, C1));
        assert!(targets.contains(&D2));
        assert!(targets.contains(&E3));
        assert!(!targets.contains(&F4));
        assert!(targets.contains(&B2));
        assert!(targets.contains(&A3));
        assert_eq!(targets.len(), 4);
    }

    #[test]
    fn test_queen_walks_both_line_kinds() {
        let board = Board::empty().set_contents(D4, Some(Material::WQ));
        let targets = destinations(&pseudo_legal_moves(&board, D4));
        assert!(targets.contains(&D8));
        assert!(targets.contains(&A4));
        assert!(targets.contains(&A7));
        assert!(targets.contains(&H8));
        assert_eq!(targets.len(), 27);
    }

    #[test]
    fn test_knight_steps_from_corner() {
        let board = Board::empty().set_contents(A1, Some(Material::WN));
        let targets = destinations(&pseudo_legal_moves(&board, A1));
        assert_eq!(targets.len(), 2);
        assert!(targets.contains(&B3));
        assert!(targets.contains(&C2));
    }

    #[test]
    fn test_knight_blocked_by_friends_not_enemies() {
        let board = Board::empty()
            .set_contents(G1, Some(Material::WN))
            .set_contents(F3, Some(Material::WP))
            .set_contents(H3, Some(Material::BP))
            .set_contents(E2, Some(Material::BQ));
        let targets = destinations(&pseudo_legal_moves(&board, G1));
        assert!(!targets.contains(&F3));
        assert!(targets.contains(&H3));
        assert!(targets.contains(&E2));
        assert_eq!(targets.len(), 2);
    }

    #[test]
    fn test_king_steps() {
        let board = Board::empty().set_contents(E4, Some(Material::WK));
        assert_eq!(pseudo_legal_moves(&board, E4).len(), 8);
        let board = Board::empty().set_contents(A1, Some(Material::BK));
        assert_eq!(pseudo_legal_moves(&board, A1).len(), 3);
    }

    #[test]
    fn test_pawn_single_and_double_advance() {
        let board = Board::empty().set_contents(E2, Some(Material::WP));
        let targets = destinations(&pseudo_legal_moves(&board, E2));
        assert_eq!(targets, vec![E3, E4]);
    }

    #[test]
    fn test_pawn_double_advance_only_from_home_rank() {
        let board = Board::empty().set_contents(E3, Some(Material::WP));
        let targets = destinations(&pseudo_legal_moves(&board, E3));
        assert_eq!(targets, vec![E4]);
    }

    #[test]
    fn test_pawn_advance_blocked() {
        let board = Board::empty()
            .set_contents(E2, Some(Material::WP))
            .set_contents(E3, Some(Material::BB));
        assert!(pseudo_legal_moves(&board, E2).is_empty());
    }

    #[test]
    fn test_pawn_double_advance_blocked_at_destination() {
        let board = Board::empty()
            .set_contents(E2, Some(Material::WP))
            .set_contents(E4, Some(Material::BB));
        let targets = destinations(&pseudo_legal_moves(&board, E2));
        assert_eq!(targets, vec![E3]);
    }

    #[test]
    fn test_pawn_captures_diagonally_only() {
        let board = Board::empty()
            .set_contents(E2, Some(Material::WP))
            .set_contents(D3, Some(Material::BB))
            .set_contents(F3, Some(Material::WN));
        let targets = destinations(&pseudo_legal_moves(&board, E2));
        assert!(targets.contains(&D3));
        assert!(!targets.contains(&F3));
        assert!(targets.contains(&E3));
        assert!(targets.contains(&E4));
    }

    #[test]
    fn test_pawn_cannot_capture_forward() {
        let board = Board::empty()
            .set_contents(E2, Some(Material::WP))
            .set_contents(E3, Some(Material::BP));
        assert!(pseudo_legal_moves(&board, E2).is_empty());
    }

    #[test]
    fn test_black_pawn_moves_down() {
        let board = Board::empty()
            .set_contents(E7, Some(Material::BP))
            .set_contents(D6, Some(Material::WR));
        let targets = destinations(&pseudo_legal_moves(&board, E7));
        assert!(targets.contains(&E6));
        assert!(targets.contains(&E5));
        assert!(targets.contains(&D6));
        assert_eq!(targets.len(), 3);
    }

    #[test]
    fn test_pawn_promotion_expands_four_ways() {
        let board = Board::empty().set_contents(B7, Some(Material::WP));
        let moves = pseudo_legal_moves(&board, B7);
        assert_eq!(moves.len(), 4);
        for promotion in Promotion::iter() {
            assert!(moves.contains(&Move::promoting(B7, B8, promotion)));
        }
    }

    #[test]
    fn test_pawn_capture_promotion_expands_four_ways() {
        let board = Board::empty()
            .set_contents(B7, Some(Material::WP))
            .set_contents(A8, Some(Material::BR))
            .set_contents(B8, Some(Material::BN));
        let moves = pseudo_legal_moves(&board, B7);
        // blocked straight ahead, so only the capture promotes
        assert_eq!(moves.len(), 4);
        for promotion in Promotion::iter() {
            assert!(moves.contains(&Move::promoting(B7, A8, promotion)));
        }
    }

    #[test]
    fn test_black_pawn_promotes_on_rank_one() {
        let board = Board::empty().set_contents(H2, Some(Material::BP));
        let moves = pseudo_legal_moves(&board, H2);
        assert_eq!(moves.len(), 4);
        assert!(moves.contains(&Move::promoting(H2, H1, Promotion::Queen)));
    }

    #[test]
    fn test_move_display() {
        assert_eq!(Move::standard(E2, E4).to_string(), "e2e4");
        assert_eq!(
            Move::promoting(E7, E8, Promotion::Knight).to_string(),
            "e7e8n"
        );
    }
}
