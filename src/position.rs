use std::{
    error::Error,
    fmt::{self, Display, Formatter},
    ops::{Add, Neg, Sub},
    str::FromStr,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParsePositionError {
    InvalidX(char),
    InvalidY(char),
    NotEnoughCharacter(u8),
    Unexpected(char),
}
impl Display for ParsePositionError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            ParsePositionError::InvalidX(x) => write!(
                f,
                "found `{x}`, characters from `a` to `h` were expected instead"
            )?,
            ParsePositionError::InvalidY(y) => write!(
                f,
                "found `{y}`, characters from `1` to `8` were expected instead"
            )?,
            ParsePositionError::NotEnoughCharacter(len) => write!(
                f,
                "provided string have length of {len} characters, 2 were expected"
            )?,
            ParsePositionError::Unexpected(c) => write!(f, "unexpected `{c}`")?,
        }
        Ok(())
    }
}
impl Error for ParsePositionError {}

/// A square, file `x` and rank `y`, both counted from 1.
///
/// Positions off the board are representable so that geometry stays
/// total; [`Position::is_on_board`] tells them apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    x: i8,
    y: i8,
}
impl Position {
    pub const fn new(x: i8, y: i8) -> Self {
        Position { x, y }
    }
    pub fn from_chars(x: char, y: char) -> Result<Self, ParsePositionError> {
        let x = match x {
            'a'..='h' => (x as u8 - b'a') as i8 + 1,
            _ => return Err(ParsePositionError::InvalidX(x)),
        };
        let y = match y {
            '1'..='8' => (y as u8 - b'0') as i8,
            _ => return Err(ParsePositionError::InvalidY(y)),
        };
        Ok(Position::new(x, y))
    }
    /// Inverse of [`Position::index`].
    pub fn from_index(index: usize) -> Self {
        debug_assert!(index < 64, "{index} should be < 64");
        Position::new((index % 8) as i8 + 1, (index / 8) as i8 + 1)
    }
    pub fn all() -> impl Iterator<Item = Self> {
        (0..64).map(Position::from_index)
    }
    pub fn x(self) -> i8 {
        self.x
    }
    pub fn y(self) -> i8 {
        self.y
    }
    pub fn is_on_board(self) -> bool {
        (1..=8).contains(&self.x) && (1..=8).contains(&self.y)
    }
    /// Square number from 0 (a1) to 63 (h8).
    pub fn index(self) -> usize {
        debug_assert!(self.is_on_board(), "{self:?} is off the board");
        (self.y - 1) as usize * 8 + (self.x - 1) as usize
    }
    pub fn add(self, movement: Vector) -> Self {
        self + movement
    }
    pub fn translate(self, dx: i8, dy: i8) -> Self {
        Position::new(self.x + dx, self.y + dy)
    }
    /// Step by `movement`, or `None` when that leaves the board.
    pub fn move_by(self, movement: Vector) -> Option<Self> {
        Some(self + movement).filter(|position| position.is_on_board())
    }
    pub fn manhattan_distance(self, other: Self) -> u8 {
        let difference = other - self;
        difference.x.unsigned_abs() + difference.y.unsigned_abs()
    }
    /// Number of king steps between the two squares.
    pub fn chebyshev_distance(self, other: Self) -> u8 {
        let difference = other - self;
        Ord::max(difference.x.unsigned_abs(), difference.y.unsigned_abs())
    }
    pub fn direction_to(self, other: Self) -> Vector {
        (other - self).as_unit()
    }
    /// Squares from `self` along `direction`, excluding `self`, until the
    /// edge of the board.
    pub fn ray(self, direction: Vector) -> impl Iterator<Item = Self> {
        debug_assert_ne!(direction, Vector::ZERO);
        let mut current = self;
        std::iter::from_fn(move || {
            current = current.move_by(direction)?;
            Some(current)
        })
    }
    /// Squares strictly between `self` and `end` if they share a rank, a
    /// file or a diagonal.
    pub fn between(self, end: Self) -> Option<impl Iterator<Item = Self>> {
        let difference = end - self;
        Vector::QUEEN_DIRECTIONS
            .into_iter()
            .find(|direction| direction.is_aligned(difference))
            .map(|direction| self.ray(direction).take_while(move |position| *position != end))
    }
}
impl Display for Position {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        if self.is_on_board() {
            let x = (self.x as u8 - 1 + b'a') as char;
            write!(f, "{x}{}", self.y)?;
        } else {
            write!(f, "({}, {})", self.x, self.y)?;
        }
        Ok(())
    }
}
impl FromStr for Position {
    type Err = ParsePositionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        let Some(x) = chars.next() else {
            return Err(ParsePositionError::NotEnoughCharacter(0));
        };
        let Some(y) = chars.next() else {
            return Err(ParsePositionError::NotEnoughCharacter(1));
        };
        if let Some(c) = chars.next() {
            return Err(ParsePositionError::Unexpected(c));
        }
        Position::from_chars(x, y)
    }
}
impl Add<Vector> for Position {
    type Output = Position;

    fn add(self, rhs: Vector) -> Self::Output {
        Position::new(self.x + rhs.x, self.y + rhs.y)
    }
}
impl Sub<Self> for Position {
    type Output = Vector;

    fn sub(self, rhs: Self) -> Self::Output {
        Vector {
            x: self.x - rhs.x,
            y: self.y - rhs.y,
        }
    }
}
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Vector {
    pub x: i8,
    pub y: i8,
}
impl Vector {
    pub const ZERO: Self = Vector { x: 0, y: 0 };

    pub const KNIGHT_MOVES: [Self; 8] = [
        Vector { x: -1, y: -2 },
        Vector { x: 1, y: -2 },
        Vector { x: -1, y: 2 },
        Vector { x: 1, y: 2 },
        Vector { x: -2, y: -1 },
        Vector { x: 2, y: -1 },
        Vector { x: -2, y: 1 },
        Vector { x: 2, y: 1 },
    ];
    pub const KING_MOVES: [Self; 8] = [
        Vector { x: -1, y: -1 },
        Vector { x: 0, y: -1 },
        Vector { x: 1, y: -1 },
        Vector { x: -1, y: 0 },
        Vector { x: 1, y: 0 },
        Vector { x: -1, y: 1 },
        Vector { x: 0, y: 1 },
        Vector { x: 1, y: 1 },
    ];
    pub const ROOK_DIRECTIONS: [Self; 4] = [
        Vector { x: -1, y: 0 },
        Vector { x: 1, y: 0 },
        Vector { x: 0, y: -1 },
        Vector { x: 0, y: 1 },
    ];
    pub const BISHOP_DIRECTIONS: [Self; 4] = [
        Vector { x: -1, y: -1 },
        Vector { x: 1, y: -1 },
        Vector { x: -1, y: 1 },
        Vector { x: 1, y: 1 },
    ];
    pub const QUEEN_DIRECTIONS: [Self; 8] = Vector::KING_MOVES;

    pub fn is_aligned(self, other: Self) -> bool {
        self.as_unit() == other.as_unit() && self.x * other.y == other.x * self.y
    }
    pub fn as_unit(self) -> Self {
        Vector {
            x: self.x.signum(),
            y: self.y.signum(),
        }
    }
}
impl Neg for Vector {
    type Output = Vector;

    fn neg(self) -> Self::Output {
        Vector {
            x: -self.x,
            y: -self.y,
        }
    }
}
#[cfg(test)]
pub fn pos(s: &str) -> Position {
    s.parse().unwrap()
}
#[cfg(test)]
mod test {
    use crate::position::{Position, Vector, pos};

    #[test]
    fn algebraic_round_trip() {
        assert_eq!(pos("a1"), Position::new(1, 1));
        assert_eq!(pos("h8"), Position::new(8, 8));
        assert_eq!(pos("e4").to_string(), "e4");
        assert!("i1".parse::<Position>().is_err());
        assert!("e44".parse::<Position>().is_err());
    }
    #[test]
    fn stepping_by_a_vector() {
        assert_eq!(pos("b1").add(Vector { x: 1, y: 2 }), pos("c3"));
        assert_eq!(pos("e4").add(Vector { x: 1, y: -2 }), pos("f2"));
        assert_eq!(pos("e4").add(-Vector { x: 1, y: -2 }), pos("d6"));
        assert!(!pos("h8").add(Vector { x: 1, y: 1 }).is_on_board());
        assert_eq!(pos("c3") - pos("e4"), Vector { x: -2, y: -1 });
    }
    #[test]
    fn off_board_is_flagged() {
        assert!(!pos("h8").translate(1, 0).is_on_board());
        assert!(!pos("a1").translate(0, -1).is_on_board());
        assert_eq!(pos("a1").move_by(Vector { x: -1, y: 0 }), None);
    }
    #[test]
    fn distances() {
        assert_eq!(pos("a1").manhattan_distance(pos("c4")), 5);
        assert_eq!(pos("a1").chebyshev_distance(pos("c4")), 3);
        assert_eq!(pos("e4").direction_to(pos("b7")), Vector { x: -1, y: 1 });
        assert_eq!(pos("e4").direction_to(pos("e1")), Vector { x: 0, y: -1 });
    }
    #[test]
    fn adjacent_squares_have_nothing_between() {
        assert_eq!(pos("e4").between(pos("e5")).unwrap().next(), None);
        let between: Vec<_> = pos("a1").between(pos("d4")).unwrap().collect();
        assert_eq!(between, [pos("b2"), pos("c3")]);
        assert!(pos("a1").between(pos("b3")).is_none());
    }
    #[test]
    fn index_covers_the_board() {
        assert!(Position::all().all(|position| Position::from_index(position.index()) == position));
        assert_eq!(Position::all().count(), 64);
    }
}
