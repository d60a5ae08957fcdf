use std::{
    error::Error,
    fmt::{self, Display, Formatter},
};

use crate::color::Color;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}
impl PieceKind {
    pub const STARTING_CONFIGURATION: [Self; 8] = [
        PieceKind::Rook,
        PieceKind::Knight,
        PieceKind::Bishop,
        PieceKind::Queen,
        PieceKind::King,
        PieceKind::Bishop,
        PieceKind::Knight,
        PieceKind::Rook,
    ];
    pub fn uppercase(self) -> char {
        match self {
            PieceKind::Pawn => 'P',
            PieceKind::Knight => 'N',
            PieceKind::Bishop => 'B',
            PieceKind::Rook => 'R',
            PieceKind::Queen => 'Q',
            PieceKind::King => 'K',
        }
    }
    pub fn lowercase(self) -> char {
        self.uppercase().to_ascii_lowercase()
    }
    pub fn from_fen(c: char) -> Result<Self, InvalidFenPiece> {
        let piece = match c {
            'p' | 'P' => PieceKind::Pawn,
            'n' | 'N' => PieceKind::Knight,
            'b' | 'B' => PieceKind::Bishop,
            'r' | 'R' => PieceKind::Rook,
            'q' | 'Q' => PieceKind::Queen,
            'k' | 'K' => PieceKind::King,
            c => return Err(InvalidFenPiece(c)),
        };
        Ok(piece)
    }
}
impl Display for PieceKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            PieceKind::Pawn => write!(f, "pawn")?,
            PieceKind::Knight => write!(f, "knight")?,
            PieceKind::Bishop => write!(f, "bishop")?,
            PieceKind::Rook => write!(f, "rook")?,
            PieceKind::Queen => write!(f, "queen")?,
            PieceKind::King => write!(f, "king")?,
        }
        Ok(())
    }
}

/// Selects the movement rule of a piece. Pawns move differently per color,
/// every other piece moves the same for both sides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RuleKey {
    Pawn(Color),
    Kind(PieceKind),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    color: Color,
    kind: PieceKind,
}
impl Piece {
    pub const fn new(color: Color, kind: PieceKind) -> Self {
        Piece { color, kind }
    }
    pub fn color(self) -> Color {
        self.color
    }
    pub fn kind(self) -> PieceKind {
        self.kind
    }
    /// Rook, bishop and queen attack along rays that other pieces can block.
    pub fn is_line_mover(self) -> bool {
        matches!(
            self.kind,
            PieceKind::Rook | PieceKind::Bishop | PieceKind::Queen
        )
    }
    pub fn rule_key(self) -> RuleKey {
        match self.kind {
            PieceKind::Pawn => RuleKey::Pawn(self.color),
            kind => RuleKey::Kind(kind),
        }
    }
    pub fn fen(self) -> char {
        match self.color {
            Color::White => self.kind.uppercase(),
            Color::Black => self.kind.lowercase(),
        }
    }
    pub fn from_fen(c: char) -> Result<Self, InvalidFenPiece> {
        let kind = PieceKind::from_fen(c)?;
        let color = if c.is_ascii_uppercase() {
            Color::White
        } else {
            Color::Black
        };
        Ok(Piece::new(color, kind))
    }
    pub fn figurine(self) -> char {
        match (self.color, self.kind) {
            (Color::White, PieceKind::Pawn) => '♙',
            (Color::White, PieceKind::Knight) => '♘',
            (Color::White, PieceKind::Bishop) => '♗',
            (Color::White, PieceKind::Rook) => '♖',
            (Color::White, PieceKind::Queen) => '♕',
            (Color::White, PieceKind::King) => '♔',
            (Color::Black, PieceKind::Pawn) => '♟',
            (Color::Black, PieceKind::Knight) => '♞',
            (Color::Black, PieceKind::Bishop) => '♝',
            (Color::Black, PieceKind::Rook) => '♜',
            (Color::Black, PieceKind::Queen) => '♛',
            (Color::Black, PieceKind::King) => '♚',
        }
    }
}
impl Display for Piece {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.color, self.kind)?;
        Ok(())
    }
}
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct InvalidFenPiece(pub char);
impl Display for InvalidFenPiece {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "found `{}`, expected one of `p`, `n`, `b`, `r`, `k`, `q`, or uppercase forms of these letters",
            self.0
        )?;
        Ok(())
    }
}
impl Error for InvalidFenPiece {}

#[cfg(test)]
mod test {
    use crate::{
        color::Color,
        piece::{Piece, PieceKind, RuleKey},
    };

    #[test]
    fn only_rook_bishop_and_queen_are_line_movers() {
        let line_movers: Vec<_> = [
            PieceKind::Pawn,
            PieceKind::Knight,
            PieceKind::Bishop,
            PieceKind::Rook,
            PieceKind::Queen,
            PieceKind::King,
        ]
        .into_iter()
        .filter(|kind| Piece::new(Color::White, *kind).is_line_mover())
        .collect();
        assert_eq!(
            line_movers,
            [PieceKind::Bishop, PieceKind::Rook, PieceKind::Queen]
        );
    }
    #[test]
    fn pawns_are_keyed_by_color() {
        assert_eq!(
            Piece::new(Color::Black, PieceKind::Pawn).rule_key(),
            RuleKey::Pawn(Color::Black)
        );
        assert_eq!(
            Piece::new(Color::Black, PieceKind::Rook).rule_key(),
            Piece::new(Color::White, PieceKind::Rook).rule_key()
        );
    }
    #[test]
    fn fen_letters_carry_color() {
        let piece = Piece::from_fen('n').unwrap();
        assert_eq!(piece, Piece::new(Color::Black, PieceKind::Knight));
        assert_eq!(piece.fen(), 'n');
        assert_eq!(Piece::from_fen('Q').unwrap().fen(), 'Q');
        assert!(Piece::from_fen('x').is_err());
    }
}
