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

//! Rules engine for a two-player networked chess service
//!
//! This crate owns the game logic and nothing else: board state,
//! per-piece move generation, legality filtering against king safety,
//! turn management, and check/checkmate/stalemate detection, plus the
//! snapshot types the surrounding service persists and pushes to
//! viewers. Transport, sessions, matchmaking and storage live in that
//! service; they drive a `Game` exclusively through its public
//! operations and translate the typed errors into their own response
//! conventions.
//!
//! The following features are supported:
//!
//! [x] Standard piece movement, captures, and single/double pawn advance
//! [x] Pawn promotion to queen, rook, bishop or knight
//! [x] Check, checkmate and stalemate detection
//! [x] Lossless board + turn snapshots (JSON) for persistence
//! [x] Replaying a game from a move list
//! [ ] Castling and en passant
//! [ ] Fifty-move rule, repetition, draw offers
//! [ ] Time controls

pub mod board;
pub mod game;

pub use board::*;
pub use game::*;
