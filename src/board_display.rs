use std::fmt::{self, Display, Formatter};

use crate::{color::Color, piece::Piece, position::Position};

const LIGHT: &str = "\x1b[30;107m";
const DARK: &str = "\x1b[30;47m";
const HIGHLIGHTED: &str = "\x1b[30;103m";
const RESET: &str = "\x1b[0m";

pub trait IndexableBoard {
    fn index(&self, position: Position) -> Option<Piece>;
}
impl<T> IndexableBoard for &T
where
    T: IndexableBoard + ?Sized,
{
    fn index(&self, position: Position) -> Option<Piece> {
        (**self).index(position)
    }
}
/// ANSI rendering of a board with up to nine lines of side text. The
/// `view` side sits at the bottom.
pub struct BoardDisplay<'a, 'b, T> {
    pub board: T,
    pub view: Color,
    pub highlighted: &'a [Position],
    pub info: &'b str,
}
impl<T> BoardDisplay<'_, '_, T> {
    pub fn new(board: T) -> Self {
        BoardDisplay {
            board,
            view: Color::White,
            highlighted: &[],
            info: "",
        }
    }
}
fn is_light(position: Position) -> bool {
    (position.x() + position.y()) % 2 == 1
}
impl<T> Display for BoardDisplay<'_, '_, T>
where
    T: IndexableBoard,
{
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let mut lines = self.info.lines().fuse();
        for row in 0..8 {
            let y = match self.view {
                Color::White => 8 - row,
                Color::Black => row + 1,
            };
            for column in 0..8 {
                let x = match self.view {
                    Color::White => column + 1,
                    Color::Black => 8 - column,
                };
                let position = Position::new(x, y);
                let color = if self.highlighted.contains(&position) {
                    HIGHLIGHTED
                } else if is_light(position) {
                    LIGHT
                } else {
                    DARK
                };
                let figurine = self
                    .board
                    .index(position)
                    .map_or(' ', Piece::figurine);
                write!(f, "{color}{figurine} {RESET}")?;
            }
            write!(f, "{y}")?;
            if let Some(line) = lines.next() {
                write!(f, " {line}")?;
            }
            writeln!(f)?;
        }
        match self.view {
            Color::White => write!(f, "a b c d e f g h")?,
            Color::Black => write!(f, "h g f e d c b a")?,
        }
        if let Some(line) = lines.next() {
            write!(f, "   {line}")?;
        }
        writeln!(f)?;
        for line in lines {
            writeln!(f, "                  {line}")?;
        }
        Ok(())
    }
}
