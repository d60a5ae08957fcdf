#![forbid(unsafe_code)]
#![warn(clippy::pedantic)]

pub mod attack;
pub mod board;
pub mod board_display;
pub mod castling;
pub mod color;
pub mod fen;
pub mod game;
pub mod game_state;
pub mod grid;
pub mod piece;
pub mod player;
pub mod position;
pub mod registry;
pub mod rules;

#[cfg(test)]
mod fuzz;

pub use board::{Board, IllegalMove, InvalidBoard, MoveSummary};
pub use color::Color;
pub use game::{ActorId, Game, GameId, GameOptions, Outcome, SessionError, SidePreference};
pub use game_state::GameState;
pub use piece::{Piece, PieceKind};
pub use position::{Position, Vector};
pub use registry::{Registry, Stats};
