use std::{
    error::Error,
    fmt::{self, Display, Formatter},
    str::FromStr,
};

use crate::{
    board::{Board, InvalidBoard},
    castling::{CastlingSide, InvalidCastlingCharacter},
    color::{Color, ParseColorError},
    grid::Grid,
    piece::{InvalidFenPiece, Piece, PieceKind},
    player::Player,
    position::{ParsePositionError, Position},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParseFenError {
    MissingField,
    TooManyFields,
    NotEnoughSquaresOnRow,
    ExceedingSquaresOnRow,
    InvalidRowCount,
    InvalidCounter,
    InvalidFenPiece(InvalidFenPiece),
    ParseColorError(ParseColorError),
    InvalidCastlingCharacter(InvalidCastlingCharacter),
    ParsePositionError(ParsePositionError),
    InvalidBoard(InvalidBoard),
}
impl From<InvalidFenPiece> for ParseFenError {
    fn from(value: InvalidFenPiece) -> Self {
        ParseFenError::InvalidFenPiece(value)
    }
}
impl From<ParseColorError> for ParseFenError {
    fn from(value: ParseColorError) -> Self {
        ParseFenError::ParseColorError(value)
    }
}
impl From<InvalidCastlingCharacter> for ParseFenError {
    fn from(value: InvalidCastlingCharacter) -> Self {
        ParseFenError::InvalidCastlingCharacter(value)
    }
}
impl From<ParsePositionError> for ParseFenError {
    fn from(value: ParsePositionError) -> Self {
        ParseFenError::ParsePositionError(value)
    }
}
impl From<InvalidBoard> for ParseFenError {
    fn from(value: InvalidBoard) -> Self {
        ParseFenError::InvalidBoard(value)
    }
}
impl Display for ParseFenError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            ParseFenError::MissingField => write!(f, "not enough fields")?,
            ParseFenError::TooManyFields => write!(f, "too many fields")?,
            ParseFenError::NotEnoughSquaresOnRow => write!(f, "not enough squares on a row")?,
            ParseFenError::ExceedingSquaresOnRow => write!(f, "more than 8 squares on a row")?,
            ParseFenError::InvalidRowCount => write!(f, "expected 8 rows")?,
            ParseFenError::InvalidCounter => write!(f, "move counters must be numbers")?,
            ParseFenError::InvalidFenPiece(err) => write!(f, "{err}")?,
            ParseFenError::ParseColorError(err) => write!(f, "{err}")?,
            ParseFenError::InvalidCastlingCharacter(err) => write!(f, "{err}")?,
            ParseFenError::ParsePositionError(err) => write!(f, "{err}")?,
            ParseFenError::InvalidBoard(err) => write!(f, "{err}")?,
        }
        Ok(())
    }
}
impl Error for ParseFenError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            ParseFenError::InvalidFenPiece(err) => Some(err),
            ParseFenError::ParseColorError(err) => Some(err),
            ParseFenError::InvalidCastlingCharacter(err) => Some(err),
            ParseFenError::ParsePositionError(err) => Some(err),
            ParseFenError::InvalidBoard(err) => Some(err),
            _ => None,
        }
    }
}
fn parse_placement(s: &str) -> Result<Grid<Option<Piece>>, ParseFenError> {
    let mut grid = Grid::default();
    let mut rows = 0;
    for (y, row) in (1..=8).rev().zip(s.split('/')) {
        rows += 1;
        let mut x: i8 = 1;
        for c in row.chars() {
            if let Some(skip) = c.to_digit(10) {
                x += skip as i8;
            } else {
                if x > 8 {
                    return Err(ParseFenError::ExceedingSquaresOnRow);
                }
                grid[Position::new(x, y)] = Some(Piece::from_fen(c)?);
                x += 1;
            }
            if x > 9 {
                return Err(ParseFenError::ExceedingSquaresOnRow);
            }
        }
        if x < 9 {
            return Err(ParseFenError::NotEnoughSquaresOnRow);
        }
    }
    if rows != 8 || s.split('/').count() != 8 {
        return Err(ParseFenError::InvalidRowCount);
    }
    Ok(grid)
}
impl FromStr for Board {
    type Err = ParseFenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut fields = s.split_whitespace();
        let grid = parse_placement(fields.next().ok_or(ParseFenError::MissingField)?)?;
        let side_to_move: Color = fields.next().ok_or(ParseFenError::MissingField)?.parse()?;

        let mut players: [Player; 2] = Default::default();
        for player in &mut players {
            player.king_has_moved = true;
            player.rook_has_moved = [true; 2];
        }
        let castling = fields.next().ok_or(ParseFenError::MissingField)?;
        if castling != "-" {
            for c in castling.chars() {
                let (color, side) = CastlingSide::from_fen(c)?;
                let player = &mut players[color.index()];
                player.king_has_moved = false;
                player.rook_has_moved[side.index()] = false;
            }
        }

        let en_passant = fields.next().ok_or(ParseFenError::MissingField)?;
        if en_passant != "-" {
            let target: Position = en_passant.parse()?;
            let mover = !side_to_move;
            players[mover.index()].en_passant_pawn = Some(target.translate(0, mover.forward()));
        }

        for counter in fields.by_ref().take(2) {
            counter
                .parse::<u32>()
                .map_err(|_| ParseFenError::InvalidCounter)?;
        }
        if fields.next().is_some() {
            return Err(ParseFenError::TooManyFields);
        }
        Ok(Board::from_parts(grid, side_to_move, players)?)
    }
}
/// FEN text of a board. Move counters are not tracked and always read
/// `0 1`.
#[derive(Debug, Clone, Copy)]
pub struct FenDisplay<'a>(&'a Board);

impl Board {
    pub fn fen(&self) -> FenDisplay<'_> {
        FenDisplay(self)
    }
}
impl Display for FenDisplay<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let board = self.0;
        for y in (1..=8).rev() {
            let mut empty = 0;
            for x in 1..=8 {
                match board.piece_at(Position::new(x, y)) {
                    Some(piece) => {
                        if empty > 0 {
                            write!(f, "{empty}")?;
                            empty = 0;
                        }
                        write!(f, "{}", piece.fen())?;
                    }
                    None => empty += 1,
                }
            }
            if empty > 0 {
                write!(f, "{empty}")?;
            }
            if y > 1 {
                write!(f, "/")?;
            }
        }
        write!(f, " {} ", board.side_to_move().lowercase())?;
        let mut written = false;
        for color in Color::ALL {
            for side in [CastlingSide::KingSide, CastlingSide::QueenSide] {
                let king = Piece::new(color, PieceKind::King);
                let rook = Piece::new(color, PieceKind::Rook);
                if board.player(color).may_castle(side)
                    && board.piece_at(CastlingSide::king_origin(color)) == Some(king)
                    && board.piece_at(side.rook_origin(color)) == Some(rook)
                {
                    written = true;
                    write!(f, "{}", side.fen(color))?;
                }
            }
        }
        if !written {
            write!(f, "-")?;
        }
        match board.en_passant_target(board.side_to_move()) {
            Some(target) => write!(f, " {target}")?,
            None => write!(f, " -")?,
        }
        write!(f, " 0 1")?;
        Ok(())
    }
}
#[cfg(test)]
mod test {
    use crate::{
        board::{Board, InvalidBoard},
        castling::CastlingSide,
        color::Color,
        fen::ParseFenError,
        position::pos,
    };

    const START: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

    #[test]
    fn starting_position_round_trip() {
        let board: Board = START.parse().unwrap();
        assert_eq!(board, Board::starting_position());
        assert_eq!(Board::starting_position().fen().to_string(), START);
    }
    #[test]
    fn en_passant_field_follows_double_push() {
        let mut board = Board::starting_position();
        board.move_piece(pos("e2"), pos("e4")).unwrap();
        let fen = board.fen().to_string();
        assert_eq!(
            fen,
            "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1"
        );
        let parsed: Board = fen.parse().unwrap();
        assert_eq!(parsed.en_passant_target(Color::Black), Some(pos("e3")));
        assert_eq!(parsed, board);
    }
    #[test]
    fn partial_castling_rights() {
        let board: Board = "r3k2r/8/8/8/8/8/8/R3K2R w Kq - 0 1".parse().unwrap();
        assert!(board.player(Color::White).may_castle(CastlingSide::KingSide));
        assert!(!board.player(Color::White).may_castle(CastlingSide::QueenSide));
        assert!(board.player(Color::Black).may_castle(CastlingSide::QueenSide));
        assert!(!board.player(Color::Black).may_castle(CastlingSide::KingSide));
        assert_eq!(board.fen().to_string(), "r3k2r/8/8/8/8/8/8/R3K2R w Kq - 0 1");
    }
    #[test]
    fn counters_are_optional() {
        assert!("4k3/8/8/8/8/8/8/4K3 w - -".parse::<Board>().is_ok());
    }
    #[test]
    fn malformed_input() {
        assert_eq!(
            "4k3/8/8/8/8/8/8/4K3".parse::<Board>(),
            Err(ParseFenError::MissingField)
        );
        assert_eq!(
            "4k3/8/8/8/8/8/8/4K2 w - - 0 1".parse::<Board>(),
            Err(ParseFenError::NotEnoughSquaresOnRow)
        );
        assert_eq!(
            "4k3/9/8/8/8/8/8/4K3 w - - 0 1".parse::<Board>(),
            Err(ParseFenError::ExceedingSquaresOnRow)
        );
        assert_eq!(
            "4k3/8/8/8/8/8/4K3 w - - 0 1".parse::<Board>(),
            Err(ParseFenError::InvalidRowCount)
        );
        assert_eq!(
            "8/8/8/8/8/8/8/4K3 w - - 0 1".parse::<Board>(),
            Err(ParseFenError::InvalidBoard(InvalidBoard::NoKing(Color::Black)))
        );
        assert_eq!(
            "4k3/8/8/8/8/8/8/4K2r b - - 0 1".parse::<Board>(),
            Err(ParseFenError::InvalidBoard(InvalidBoard::NonPlayerInCheck))
        );
    }
}
