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

//! Turn management, legality, and terminal-state detection
//!
//! A `Game` owns a `Board` and the color to move. Pseudo-legal moves
//! from the board layer are filtered here against king safety: each
//! candidate is applied to a cloned board and discarded if it leaves
//! the mover's own king attacked. Check, checkmate and stalemate are
//! derived by scanning the board on demand; nothing is cached between
//! calls. The scans are deliberately brute force, which is perfectly
//! adequate at board-game scale.
//!
//! A `Game` is not internally synchronized. The owning service must
//! serialize move submissions per game, typically by keying a lock or
//! an actor on the `GameId` it stores snapshots under.

use anyhow::Result;
#[cfg(feature = "random")]
use rand::{thread_rng, Rng};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::board::{pseudo_legal_moves, Board, Color, Material, Move, Square, Turn};

use Color::*;

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GameId(u64);

impl GameId {
    pub fn new(value: u64) -> Self {
        Self(value)
    }
    #[cfg(feature = "random")]
    pub fn random() -> Self {
        Self(thread_rng().gen())
    }
}

/// How a finished match ended. The engine derives `Checkmate` and
/// `Stalemate`; resignation and abandonment are recorded by the
/// orchestration layer when a player quits.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub enum GameResult {
    Win(Color, WinReason),
    Draw(DrawReason),
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub enum WinReason {
    Checkmate,
    Resigned,
    Abandoned,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub enum DrawReason {
    Stalemate,
}

/// Why a submitted move was rejected. Nothing is mutated on any of
/// these paths.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveError {
    #[error("there is no piece at {0}")]
    NoPieceAtSource(Square),
    #[error("it is not {0}'s turn")]
    WrongTurn(Color),
    #[error("{0} is not a legal move")]
    IllegalMove(Move),
}

/// The persisted form of a game: every square's contents plus the color
/// to move. Serialization is lossless; `from_json(to_json(s))` is `s`.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct GameSnapshot {
    pub board: Board,
    pub turn: Color,
}

impl GameSnapshot {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}

impl Turn for GameSnapshot {
    fn turn(&self) -> Color {
        self.turn
    }
}

/// What an accepted move produced: the new state, the status of the
/// color now to move, and the terminal result if the match just ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveOutcome {
    pub snapshot: GameSnapshot,
    pub in_check: bool,
    pub in_checkmate: bool,
    pub game_result: Option<GameResult>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Game {
    board: Board,
    turn: Color,
}

impl Game {
    /// A fresh game: standard layout, White to move.
    pub fn new() -> Self {
        Self::from_parts(Board::standard(), White)
    }

    pub fn from_parts(board: Board, turn: Color) -> Self {
        Self { board, turn }
    }

    pub fn from_snapshot(snapshot: GameSnapshot) -> Self {
        Self::from_parts(snapshot.board, snapshot.turn)
    }

    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            board: self.board.clone(),
            turn: self.turn,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Every legal move for the piece on `from`, or empty if the square
    /// is vacant.
    ///
    /// Legality is judged relative to the occupant's color, not the
    /// turn: either side's pieces can be queried at any time (the UI
    /// highlights an opponent's moves this way). Only `make_move`
    /// enforces the turn.
    pub fn legal_moves(&self, from: Square) -> Vec<Move> {
        let Some(material) = self.board.contents(from) else {
            return Vec::new();
        };
        pseudo_legal_moves(&self.board, from)
            .into_iter()
            .filter(|&mv| {
                let mut probe = self.board.clone();
                apply_unchecked(&mut probe, mv, material);
                !in_check(&probe, material.color())
            })
            .collect()
    }

    /// Validates and applies one move, then flips the turn.
    ///
    /// Validation happens before any mutation, so a rejected move
    /// leaves the game exactly as it was.
    pub fn make_move(&mut self, mv: Move) -> Result<MoveOutcome, MoveError> {
        let material = self
            .board
            .contents(mv.from)
            .ok_or(MoveError::NoPieceAtSource(mv.from))?;
        if material.color() != self.turn {
            return Err(MoveError::WrongTurn(self.turn));
        }
        if !self.legal_moves(mv.from).contains(&mv) {
            return Err(MoveError::IllegalMove(mv));
        }
        apply_unchecked(&mut self.board, mv, material);
        self.turn = !self.turn;
        Ok(MoveOutcome {
            snapshot: self.snapshot(),
            in_check: self.is_in_check(self.turn),
            in_checkmate: self.is_in_checkmate(self.turn),
            game_result: self.game_result(),
        })
    }

    /// Whether `color`'s king square is attacked by any opposing piece.
    /// Boards without that king are outside the engine's contract and
    /// answer `false`.
    pub fn is_in_check(&self, color: Color) -> bool {
        in_check(&self.board, color)
    }

    /// Whether `color` is to move, in check, and out of legal moves.
    pub fn is_in_checkmate(&self, color: Color) -> bool {
        self.turn == color && self.is_in_check(color) && !self.has_any_legal_move(color)
    }

    /// Whether `color` is to move, not in check, and out of legal moves.
    pub fn is_in_stalemate(&self, color: Color) -> bool {
        self.turn == color && !self.is_in_check(color) && !self.has_any_legal_move(color)
    }

    /// The terminal result for the current position, if the side to
    /// move has no legal continuation.
    pub fn game_result(&self) -> Option<GameResult> {
        if self.is_in_checkmate(self.turn) {
            Some(GameResult::Win(!self.turn, WinReason::Checkmate))
        } else if self.is_in_stalemate(self.turn) {
            Some(GameResult::Draw(DrawReason::Stalemate))
        } else {
            None
        }
    }

    /// Reconstruct a game by replaying a sequence of moves from the
    /// standard start.
    pub fn replay(moves: &[Move]) -> Result<Self> {
        let mut game = Self::new();
        for &mv in moves {
            game.make_move(mv)?;
        }
        Ok(game)
    }

    fn has_any_legal_move(&self, color: Color) -> bool {
        self.board
            .pieces(color)
            .any(|(from, _)| !self.legal_moves(from).is_empty())
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

impl Turn for Game {
    #[inline]
    fn turn(&self) -> Color {
        self.turn
    }
}

/// Applies a move that has already been validated (or is a legality
/// probe on a scratch clone): clear the source, put the moved material,
/// or its promotion, on the destination.
fn apply_unchecked(board: &mut Board, mv: Move, material: Material) {
    board.place(mv.from, None);
    let placed = match mv.promotion {
        Some(promotion) => Material::new(material.color(), promotion.into()),
        None => material,
    };
    board.place(mv.to, Some(placed));
}

fn king_square(board: &Board, color: Color) -> Option<Square> {
    board
        .pieces(color)
        .find(|(_, material)| material.piece().is_king())
        .map(|(square, _)| square)
}

fn in_check(board: &Board, color: Color) -> bool {
    match king_square(board, color) {
        Some(king) => is_attacked(board, king, !color),
        None => false,
    }
}

/// Brute-force attack scan: regenerate every opposing piece's
/// pseudo-legal moves and look for one landing on `target`.
fn is_attacked(board: &Board, target: Square, by: Color) -> bool {
    board
        .pieces(by)
        .any(|(from, _)| pseudo_legal_moves(board, from).iter().any(|mv| mv.to == target))
}
