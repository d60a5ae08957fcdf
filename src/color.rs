use std::{
    error::Error,
    fmt::{self, Display, Formatter},
    ops::Not,
    str::FromStr,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ParseColorError;
impl Display for ParseColorError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "provided string was not `w`, `b`, `W`, `B`, `white`, or `black`"
        )?;
        Ok(())
    }
}
impl Error for ParseColorError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    White,
    Black,
}
impl Color {
    pub const ALL: [Self; 2] = [Color::White, Color::Black];

    pub fn lowercase(self) -> char {
        match self {
            Color::White => 'w',
            Color::Black => 'b',
        }
    }
    /// Slot of this color in per-color arrays.
    pub fn index(self) -> usize {
        match self {
            Color::White => 0,
            Color::Black => 1,
        }
    }
    /// Rank holding this color's king and rooks at the start.
    pub fn home_rank(self) -> i8 {
        match self {
            Color::White => 1,
            Color::Black => 8,
        }
    }
    pub fn pawn_home_rank(self) -> i8 {
        match self {
            Color::White => 2,
            Color::Black => 7,
        }
    }
    pub fn promotion_rank(self) -> i8 {
        match self {
            Color::White => 8,
            Color::Black => 1,
        }
    }
    /// Rank step of this color's pawns.
    pub fn forward(self) -> i8 {
        match self {
            Color::White => 1,
            Color::Black => -1,
        }
    }
}
impl Display for Color {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Color::White => write!(f, "white")?,
            Color::Black => write!(f, "black")?,
        }
        Ok(())
    }
}
impl FromStr for Color {
    type Err = ParseColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let color = match s {
            "w" | "W" | "white" => Color::White,
            "b" | "B" | "black" => Color::Black,
            _ => return Err(ParseColorError),
        };
        Ok(color)
    }
}
impl Not for Color {
    type Output = Self;

    fn not(self) -> Self::Output {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }
}
#[cfg(test)]
mod test {
    use crate::color::Color;

    #[test]
    fn parses_short_and_long_names() {
        assert_eq!("w".parse(), Ok(Color::White));
        assert_eq!("black".parse(), Ok(Color::Black));
        assert!("red".parse::<Color>().is_err());
    }
    #[test]
    fn pawns_walk_toward_promotion_rank() {
        for color in Color::ALL {
            let distance = color.promotion_rank() - color.pawn_home_rank();
            assert_eq!(distance.signum(), color.forward());
            assert_eq!(!!color, color);
        }
    }
}
