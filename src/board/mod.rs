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

//! Chess board state and per-piece move generation
//!
//! A _board_ represents the physical state of a chess board: which
//! material stands on which square. It carries no game state beyond
//! occupancy; whose turn it is, and whether a position is terminal, is
//! the `game` module's business.
//!
//! Some of the key abstractions include:
//!
//! * A `Square` represents the coordinates for a single square on an
//!   8-by-8 board. The 8 rows and 8 columns are represented by `Rank`
//!   (`Rank1` .. `Rank8`) and `File` (`FileA` .. `FileH`) respectively.
//!   Each square is named by the letter of the file followed by the
//!   number of the rank (`A1` .. `H8`) and round-trips through that
//!   algebraic text form (`Display` / `FromStr`).
//!
//! * `Material` represents a piece of a specific color. A `Piece` has
//!   six variants: `King`, `Queen`, `Rook`, `Bishop`, `Knight` and
//!   `Pawn`. `Color` is either `White` or `Black`. In order to support
//!   pawn promotion moves there's another type called `Promotion` with
//!   only four variants; convert to a `Piece` with `From<Promotion>`.
//!
//! * A `Board` owns the 64 squares, each empty or holding one
//!   `Material`. It supports unconditional placement, lookup, and a
//!   reset to the standard starting layout. Boards are plain values:
//!   cloning one yields a fully independent copy, which is how the game
//!   layer simulates a candidate move without disturbing live state.
//!
//! * `pseudo_legal_moves` maps a board and a square to every `Move` the
//!   occupying piece could make by movement pattern and occupancy alone,
//!   ignoring king safety. Sliding pieces walk rays square by square;
//!   stepping pieces test fixed offsets; pawns handle advances, captures
//!   and four-way promotion expansion.

use serde::ser::SerializeTuple;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Index;
use strum::IntoEnumIterator;

mod material;
mod moves;
mod square;

pub use material::*;
pub use moves::*;
pub use square::*;

use Piece::*;

pub trait Turn {
    fn turn(&self) -> Color;
}

const BACK_RANK: [Piece; 8] = [Rook, Knight, Bishop, Queen, King, Bishop, Knight, Rook];

/// An 8-by-8 grid holding at most one `Material` per square.
///
/// The board does not police composition; the engine assumes callers
/// keep positions well-formed (one king per color) for check queries to
/// be meaningful.
#[derive(Clone, PartialEq, Eq)]
pub struct Board {
    squares: [Option<Material>; 64],
}

impl Board {
    /// A board with all 64 squares empty.
    pub fn empty() -> Self {
        Self {
            squares: [None; 64],
        }
    }

    /// A board in the standard starting layout.
    pub fn standard() -> Self {
        let mut board = Self::empty();
        board.reset_standard();
        board
    }

    /// Clears every square, then lays out pawns on each side's pawn rank
    /// and R N B Q K B N R on each side's back rank.
    pub fn reset_standard(&mut self) {
        self.squares = [None; 64];
        for file in File::iter() {
            let piece = BACK_RANK[file.to_index()];
            for color in Color::iter() {
                self.place(
                    Square::new(file, Rank::pawn_rank(color)),
                    Some(Material::new(color, Pawn)),
                );
                self.place(
                    Square::new(file, Rank::back_rank(color)),
                    Some(Material::new(color, piece)),
                );
            }
        }
    }

    /// Unconditionally overwrites a square with the given contents.
    #[inline]
    pub fn place(&mut self, square: Square, contents: Option<Material>) {
        self.squares[square] = contents;
    }

    #[inline]
    pub fn contents(&self, square: Square) -> Option<Material> {
        self.squares[square]
    }

    /// Builder form of `place`, for assembling test positions.
    pub fn set_contents(mut self, square: Square, contents: Option<Material>) -> Self {
        self.place(square, contents);
        self
    }

    /// Every occupied square of one color, scanning A1 through H8.
    pub fn pieces(&self, color: Color) -> impl Iterator<Item = (Square, Material)> + '_ {
        Square::iter().filter_map(move |square| {
            self.contents(square)
                .filter(|material| material.color() == color)
                .map(|material| (square, material))
        })
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::standard()
    }
}

impl Index<Square> for Board {
    type Output = Option<Material>;
    fn index(&self, square: Square) -> &Self::Output {
        &self.squares[square]
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank in Rank::iter().rev() {
            for file in File::iter() {
                match self.contents(Square::new(file, rank)) {
                    Some(material) => write!(f, "{}", material.to_char())?,
                    None => write!(f, ".")?,
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

impl Serialize for Board {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut tuple = serializer.serialize_tuple(64)?;
        for square in Square::iter() {
            tuple.serialize_element(&self.squares[square])?;
        }
        tuple.end()
    }
}

impl<'de> Deserialize<'de> for Board {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        struct BoardVisitor;
        impl<'de> serde::de::Visitor<'de> for BoardVisitor {
            type Value = Board;
            fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
                formatter.write_str("a board condensed into a 64-element tuple")
            }
            fn visit_seq<A>(self, mut seq: A) -> Result<Board, A::Error>
            where
                A: serde::de::SeqAccess<'de>,
            {
                let mut board = Board::empty();
                for square in Square::iter() {
                    let contents = seq
                        .next_element()?
                        .ok_or_else(|| serde::de::Error::custom("missing square contents"))?;
                    board.place(square, contents);
                }
                Ok(board)
            }
        }
        deserializer.deserialize_tuple(64, BoardVisitor)
    }
}

#[cfg(test)]
mod tests {
    use crate::*;
    use strum::IntoEnumIterator;
    use Square::*;

    #[test]
    fn test_standard_layout_counts() {
        let board = Board::standard();
        assert_eq!(board.pieces(Color::White).count(), 16);
        assert_eq!(board.pieces(Color::Black).count(), 16);
        for color in Color::iter() {
            let pawns = board
                .pieces(color)
                .filter(|(_, material)| material.piece().is_pawn())
                .count();
            assert_eq!(pawns, 8);
            let kings = board
                .pieces(color)
                .filter(|(_, material)| material.piece().is_king())
                .count();
            assert_eq!(kings, 1);
        }
    }

    #[test]
    fn test_kings_start_on_file_e() {
        let board = Board::standard();
        assert_eq!(board.contents(E1), Some(Material::WK));
        assert_eq!(board.contents(E8), Some(Material::BK));
    }

    #[test]
    fn test_reset_standard_is_idempotent() {
        let mut board = Board::standard();
        board.place(E4, Some(Material::WQ));
        board.reset_standard();
        assert_eq!(board, Board::standard());
    }

    #[test]
    fn test_place_overwrites() {
        let mut board = Board::empty();
        board.place(D5, Some(Material::WN));
        board.place(D5, Some(Material::BQ));
        assert_eq!(board.contents(D5), Some(Material::BQ));
        board.place(D5, None);
        assert_eq!(board.contents(D5), None);
    }

    #[test]
    fn test_clone_is_independent() {
        let board = Board::standard();
        let mut copy = board.clone();
        copy.place(E2, None);
        copy.place(E4, Some(Material::WP));
        assert_eq!(board.contents(E2), Some(Material::WP));
        assert_eq!(board.contents(E4), None);
    }

    #[test]
    fn test_board_serde_round_trip() {
        let board = Board::standard()
            .set_contents(E2, None)
            .set_contents(E4, Some(Material::WP));
        let json = serde_json::to_string(&board).unwrap();
        let restored: Board = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, board);
    }

    #[test]
    fn test_square_display_parse_round_trip() {
        for square in Square::iter() {
            let text = square.to_string();
            assert_eq!(text.parse::<Square>().unwrap(), square);
        }
        assert_eq!("e4".parse::<Square>().unwrap(), E4);
        assert_eq!(A1.to_string(), "a1");
        assert_eq!(H8.to_string(), "h8");
    }

    #[test]
    fn test_square_parse_rejects_bad_input() {
        assert_eq!(
            "e".parse::<Square>(),
            Err(FormatError::WrongLength("e".to_string()))
        );
        assert_eq!(
            "e44".parse::<Square>(),
            Err(FormatError::WrongLength("e44".to_string()))
        );
        assert_eq!("i4".parse::<Square>(), Err(FormatError::FileOutOfRange('i')));
        assert_eq!("e9".parse::<Square>(), Err(FormatError::RankOutOfRange('9')));
    }

    #[test]
    fn test_square_arithmetic_stops_at_the_edge() {
        assert_eq!(H8 + Direction::Up, None);
        assert_eq!(A1 + Direction::DownLeft, None);
        assert_eq!(E4 + Direction::UpRight, Some(F5));
        assert_eq!(A4 + Offset::new(-1, 0), None);
    }
}
