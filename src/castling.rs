use std::{
    error::Error,
    fmt::{self, Display, Formatter},
};

use crate::{color::Color, position::Position};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct InvalidCastlingCharacter(pub char);

impl Display for InvalidCastlingCharacter {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "found {}, expected one of `K`, `Q`, `k`, `q`, or `-`",
            self.0
        )?;
        Ok(())
    }
}
impl Error for InvalidCastlingCharacter {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CastlingSide {
    QueenSide,
    KingSide,
}
impl CastlingSide {
    pub const ALL: [Self; 2] = [CastlingSide::QueenSide, CastlingSide::KingSide];

    pub fn index(self) -> usize {
        match self {
            CastlingSide::QueenSide => 0,
            CastlingSide::KingSide => 1,
        }
    }
    /// Side a king heads to when moving `dx` files along its rank.
    pub fn from_dx(dx: i8) -> Option<Self> {
        match dx {
            -2 => Some(CastlingSide::QueenSide),
            2 => Some(CastlingSide::KingSide),
            _ => None,
        }
    }
    pub fn dx(self) -> i8 {
        match self {
            CastlingSide::QueenSide => -1,
            CastlingSide::KingSide => 1,
        }
    }
    pub fn rook_origin(self, color: Color) -> Position {
        let x = match self {
            CastlingSide::QueenSide => 1,
            CastlingSide::KingSide => 8,
        };
        Position::new(x, color.home_rank())
    }
    pub fn king_origin(color: Color) -> Position {
        Position::new(5, color.home_rank())
    }
    pub fn fen(self, color: Color) -> char {
        let c = match self {
            CastlingSide::QueenSide => 'q',
            CastlingSide::KingSide => 'k',
        };
        match color {
            Color::White => c.to_ascii_uppercase(),
            Color::Black => c,
        }
    }
    pub fn from_fen(c: char) -> Result<(Color, Self), InvalidCastlingCharacter> {
        let right = match c {
            'K' => (Color::White, CastlingSide::KingSide),
            'Q' => (Color::White, CastlingSide::QueenSide),
            'k' => (Color::Black, CastlingSide::KingSide),
            'q' => (Color::Black, CastlingSide::QueenSide),
            c => return Err(InvalidCastlingCharacter(c)),
        };
        Ok(right)
    }
}
impl Display for CastlingSide {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            CastlingSide::QueenSide => write!(f, "queen side")?,
            CastlingSide::KingSide => write!(f, "king side")?,
        }
        Ok(())
    }
}
