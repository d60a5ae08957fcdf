use std::fmt::{self, Display, Formatter};

use crate::color::Color;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameState {
    Unresolved,
    Checkmate { winner: Color },
    Stalemate,
}
impl Display for GameState {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            GameState::Unresolved => write!(f, "in progress")?,
            GameState::Checkmate { winner } => write!(f, "checkmate, {winner} wins")?,
            GameState::Stalemate => write!(f, "stalemate")?,
        }
        Ok(())
    }
}
