use std::{
    error::Error,
    fmt::{self, Display, Formatter},
};

use crate::{
    attack::{AttackIndex, SquareSet},
    board_display::IndexableBoard,
    castling::CastlingSide,
    color::Color,
    game_state::GameState,
    grid::Grid,
    piece::{Piece, PieceKind},
    player::Player,
    position::{Position, Vector},
    rules::{Special, attacks_of, rule},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InvalidBoard {
    NoKing(Color),
    ExceededKings(Color),
    PawnOnBackRank,
    NonPlayerInCheck,
    InvalidEnPassantTarget,
}
impl Display for InvalidBoard {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            InvalidBoard::NoKing(color) => write!(f, "no {color} king found")?,
            InvalidBoard::ExceededKings(color) => write!(f, "found more than 1 {color} king")?,
            InvalidBoard::PawnOnBackRank => write!(f, "found a pawn on the first or last rank")?,
            InvalidBoard::NonPlayerInCheck => write!(f, "non-player in check")?,
            InvalidBoard::InvalidEnPassantTarget => write!(f, "invalid en passant target")?,
        }
        Ok(())
    }
}
impl Error for InvalidBoard {}

/// Why [`Board::move_piece`] refused a move. The board is left untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IllegalMove {
    OffBoard,
    NoPiece,
    NotYourTurn,
    Unreachable,
    KingInDanger,
}
impl Display for IllegalMove {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            IllegalMove::OffBoard => write!(f, "square is outside of the board")?,
            IllegalMove::NoPiece => write!(f, "no piece on the origin square")?,
            IllegalMove::NotYourTurn => write!(f, "piece does not belong to the side to move")?,
            IllegalMove::Unreachable => write!(f, "piece cannot reach the destination")?,
            IllegalMove::KingInDanger => write!(f, "move would leave the king in check")?,
        }
        Ok(())
    }
}
impl Error for IllegalMove {}

/// What a successful [`Board::move_piece`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MoveSummary {
    pub origin: Position,
    pub destination: Position,
    pub piece: Piece,
    pub captured: Option<Piece>,
    pub castling: Option<CastlingSide>,
    pub en_passant: bool,
    pub promotion: bool,
}
impl Display for MoveSummary {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.origin, self.destination)?;
        if self.promotion {
            write!(f, "{}", PieceKind::Queen.lowercase())?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    grid: Grid<Option<Piece>>,
    side_to_move: Color,
    players: [Player; 2],
    kings: [Position; 2],
    attacks: AttackIndex,
}
impl Board {
    pub fn starting_position() -> Self {
        let mut grid = Grid::default();
        for (x, kind) in (1..).zip(PieceKind::STARTING_CONFIGURATION) {
            for color in Color::ALL {
                grid[Position::new(x, color.home_rank())] = Some(Piece::new(color, kind));
                grid[Position::new(x, color.pawn_home_rank())] =
                    Some(Piece::new(color, PieceKind::Pawn));
            }
        }
        Board::assemble(
            grid,
            Color::White,
            Default::default(),
            Color::ALL.map(CastlingSide::king_origin),
        )
    }
    /// Set up an arbitrary position. Castling is only kept for kings and
    /// rooks standing on their original squares.
    pub fn from_grid(grid: Grid<Option<Piece>>, side_to_move: Color) -> Result<Self, InvalidBoard> {
        Board::from_parts(grid, side_to_move, Default::default())
    }
    pub(crate) fn from_parts(
        grid: Grid<Option<Piece>>,
        side_to_move: Color,
        mut players: [Player; 2],
    ) -> Result<Self, InvalidBoard> {
        let mut kings = [None; 2];
        for (position, piece) in grid.pieces() {
            match piece.kind() {
                PieceKind::King => {
                    let king = &mut kings[piece.color().index()];
                    if king.is_some() {
                        return Err(InvalidBoard::ExceededKings(piece.color()));
                    }
                    *king = Some(position);
                }
                PieceKind::Pawn if matches!(position.y(), 1 | 8) => {
                    return Err(InvalidBoard::PawnOnBackRank);
                }
                _ => (),
            }
        }
        let [Some(white_king), Some(black_king)] = kings else {
            let missing = if kings[0].is_none() {
                Color::White
            } else {
                Color::Black
            };
            return Err(InvalidBoard::NoKing(missing));
        };
        for color in Color::ALL {
            let player = &mut players[color.index()];
            if grid[CastlingSide::king_origin(color)] != Some(Piece::new(color, PieceKind::King)) {
                player.king_has_moved = true;
            }
            for side in CastlingSide::ALL {
                if grid[side.rook_origin(color)] != Some(Piece::new(color, PieceKind::Rook)) {
                    player.rook_has_moved[side.index()] = true;
                }
            }
            if let Some(pawn) = player.en_passant_pawn {
                let passed = pawn.translate(0, -color.forward());
                let start = passed.translate(0, -color.forward());
                if grid.piece_at(pawn) != Some(Piece::new(color, PieceKind::Pawn))
                    || pawn.y() != color.pawn_home_rank() + 2 * color.forward()
                    || grid[passed].is_some()
                    || grid[start].is_some()
                {
                    return Err(InvalidBoard::InvalidEnPassantTarget);
                }
            }
        }
        let board = Board::assemble(grid, side_to_move, players, [white_king, black_king]);
        if board.is_checked(!side_to_move) {
            return Err(InvalidBoard::NonPlayerInCheck);
        }
        Ok(board)
    }
    fn assemble(
        grid: Grid<Option<Piece>>,
        side_to_move: Color,
        players: [Player; 2],
        kings: [Position; 2],
    ) -> Self {
        Board {
            attacks: AttackIndex::build(&grid),
            grid,
            side_to_move,
            players,
            kings,
        }
    }
    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }
    pub fn player(&self, color: Color) -> &Player {
        &self.players[color.index()]
    }
    pub fn grid(&self) -> &Grid<Option<Piece>> {
        &self.grid
    }
    /// `None` for empty squares and for positions off the board.
    pub fn piece_at(&self, position: Position) -> Option<Piece> {
        self.grid.piece_at(position)
    }
    pub fn king(&self, color: Color) -> Position {
        self.kings[color.index()]
    }
    /// Squares holding a piece, of either color, that attacks `position`.
    pub fn attackers(&self, position: Position) -> SquareSet {
        self.attacks.attackers(position)
    }
    pub fn is_attacked_by(&self, position: Position, color: Color) -> bool {
        self.attackers(position)
            .iter()
            .any(|attacker| self.grid[attacker].is_some_and(|piece| piece.color() == color))
    }
    pub fn is_checked(&self, color: Color) -> bool {
        self.is_attacked_by(self.king(color), !color)
    }
    fn checkers(&self, color: Color) -> impl Iterator<Item = Position> + '_ {
        self.attackers(self.king(color))
            .iter()
            .filter(move |attacker| self.grid[*attacker].is_some_and(|piece| piece.color() != color))
    }
    /// Square a pawn of `capturer` may capture onto en passant.
    pub fn en_passant_target(&self, capturer: Color) -> Option<Position> {
        self.player(!capturer)
            .en_passant_pawn
            .map(|pawn| pawn.translate(0, capturer.forward()))
    }
    fn pawn_can_capture_onto(&self, color: Color, destination: Position) -> bool {
        match self.grid[destination] {
            Some(piece) => piece.color() != color,
            None => self.en_passant_target(color) == Some(destination),
        }
    }
    fn is_en_passant(&self, piece: Piece, origin: Position, destination: Position) -> bool {
        piece.kind() == PieceKind::Pawn
            && origin.x() != destination.x()
            && self.grid[destination].is_none()
    }
    /// Destinations ignoring whether the own king ends up in check.
    pub fn reachable_destinations(&self, origin: Position) -> Vec<Position> {
        let Some(piece) = self.piece_at(origin) else {
            return Vec::new();
        };
        let color = piece.color();
        let rule = rule(piece.rule_key());
        let mut destinations: Vec<_> = match rule.special {
            Special::PawnPush { forward } => {
                let steps = if origin.y() == color.pawn_home_rank() {
                    2
                } else {
                    1
                };
                origin
                    .ray(forward)
                    .take(steps)
                    .take_while(|position| self.grid[*position].is_none())
                    .chain(
                        rule.attacks(origin, &self.grid)
                            .filter(|destination| self.pawn_can_capture_onto(color, *destination)),
                    )
                    .collect()
            }
            Special::None | Special::Castling => rule
                .attacks(origin, &self.grid)
                .filter(|destination| {
                    self.grid[*destination].is_none_or(|other| other.color() != color)
                })
                .collect(),
        };
        if rule.special == Special::Castling {
            destinations.extend(
                CastlingSide::ALL
                    .into_iter()
                    .map(|side| origin.translate(2 * side.dx(), 0))
                    .filter(|destination| self.can_castle(origin, *destination)),
            );
        }
        destinations
    }
    /// Legal destinations of the piece on `origin`, for either color.
    pub fn legal_destinations(&self, origin: Position) -> Vec<Position> {
        let mut destinations = self.reachable_destinations(origin);
        destinations.retain(|destination| self.keeps_king_safe(origin, *destination));
        destinations
    }
    pub fn piece_can_move(&self, origin: Position, destination: Position) -> bool {
        self.reachable_destinations(origin).contains(&destination)
            && self.keeps_king_safe(origin, destination)
    }
    /// Every legal move of the side to move.
    pub fn legal_moves(&self) -> impl Iterator<Item = (Position, Position)> + '_ {
        self.grid
            .pieces()
            .filter(move |(_, piece)| piece.color() == self.side_to_move)
            .flat_map(move |(origin, _)| {
                self.legal_destinations(origin)
                    .into_iter()
                    .map(move |destination| (origin, destination))
            })
    }
    pub fn can_castle(&self, origin: Position, destination: Position) -> bool {
        let Some(king) = self.piece_at(origin) else {
            return false;
        };
        if king.kind() != PieceKind::King || destination.y() != origin.y() {
            return false;
        }
        let Some(side) = CastlingSide::from_dx(destination.x() - origin.x()) else {
            return false;
        };
        let color = king.color();
        let rook = side.rook_origin(color);
        origin == CastlingSide::king_origin(color)
            && self.player(color).may_castle(side)
            && self.piece_at(rook) == Some(Piece::new(color, PieceKind::Rook))
            && !self.is_checked(color)
            && origin
                .between(rook)
                .is_some_and(|mut between| between.all(|position| self.grid[position].is_none()))
            && origin
                .ray(Vector { x: side.dx(), y: 0 })
                .take(2)
                .all(|position| !self.is_attacked_by(position, !color))
    }
    /// Enemy line piece pinning the piece on `origin` to its king.
    fn pinner(&self, origin: Position, color: Color) -> Option<Position> {
        let king = self.king(color);
        let mut between = king.between(origin)?;
        if between.any(|position| self.grid[position].is_some()) {
            return None;
        }
        let direction = king.direction_to(origin);
        let beyond = origin
            .ray(direction)
            .find(|position| self.grid[*position].is_some())?;
        let piece = self.grid[beyond]?;
        (piece.color() != color
            && piece.is_line_mover()
            && rule(piece.rule_key()).directions.contains(&-direction))
        .then_some(beyond)
    }
    /// Whether moving `origin` to a reachable `destination` keeps the
    /// mover's king out of check.
    fn keeps_king_safe(&self, origin: Position, destination: Position) -> bool {
        let Some(piece) = self.piece_at(origin) else {
            return false;
        };
        let color = piece.color();
        let king = self.king(color);
        if self.is_en_passant(piece, origin, destination) {
            // both pawns leave the rank, which may expose the king sideways
            return self.is_safe_after_simulation(origin, destination);
        }
        if piece.kind() == PieceKind::King {
            return !self.is_attacked_by(destination, !color)
                && !self.checkers(color).any(|checker| {
                    self.grid[checker].is_some_and(Piece::is_line_mover)
                        && destination == king.add(checker.direction_to(king))
                });
        }
        if let Some(pinner) = self.pinner(origin, color) {
            let direction = king.direction_to(pinner);
            let on_ray = (destination - king).is_aligned(direction)
                && king.chebyshev_distance(destination) <= king.chebyshev_distance(pinner);
            if !on_ray {
                return false;
            }
        }
        let mut checkers = self.checkers(color);
        match (checkers.next(), checkers.next()) {
            (None, _) => true,
            (Some(checker), None) => {
                destination == checker
                    || (self.grid[checker].is_some_and(Piece::is_line_mover)
                        && checker.between(king).is_some_and(|mut between| {
                            between.any(|position| position == destination)
                        }))
            }
            (Some(_), Some(_)) => false,
        }
    }
    fn is_safe_after_simulation(&self, origin: Position, destination: Position) -> bool {
        let mut grid = self.grid;
        let Some(piece) = grid[origin].take() else {
            return false;
        };
        if self.is_en_passant(piece, origin, destination) {
            grid[Position::new(destination.x(), origin.y())] = None;
        }
        grid[destination] = Some(piece);
        let color = piece.color();
        let king = if piece.kind() == PieceKind::King {
            destination
        } else {
            self.king(color)
        };
        !grid
            .pieces()
            .filter(|(_, other)| other.color() != color)
            .any(|(position, other)| attacks_of(other, position, &grid).any(|target| target == king))
    }
    /// Play a move of the side to move. Any refusal leaves the board as it
    /// was.
    pub fn move_piece(
        &mut self,
        origin: Position,
        destination: Position,
    ) -> Result<MoveSummary, IllegalMove> {
        if !origin.is_on_board() || !destination.is_on_board() {
            return Err(IllegalMove::OffBoard);
        }
        let piece = self.piece_at(origin).ok_or(IllegalMove::NoPiece)?;
        let color = piece.color();
        if color != self.side_to_move {
            return Err(IllegalMove::NotYourTurn);
        }
        if !self.reachable_destinations(origin).contains(&destination) {
            return Err(IllegalMove::Unreachable);
        }
        if !self.keeps_king_safe(origin, destination) {
            return Err(IllegalMove::KingInDanger);
        }
        let mut changed = vec![origin, destination];

        let en_passant = self.is_en_passant(piece, origin, destination);
        let captured_square = if en_passant {
            let square = Position::new(destination.x(), origin.y());
            changed.push(square);
            square
        } else {
            destination
        };
        let captured = self.grid[captured_square].take();
        if let Some(captured) = captured {
            self.players[(!color).index()].captured_pieces.push(captured);
        }

        let double_push =
            piece.kind() == PieceKind::Pawn && (destination.y() - origin.y()).abs() == 2;
        self.players[color.index()].en_passant_pawn = double_push.then_some(destination);

        let castling = if piece.kind() == PieceKind::King {
            CastlingSide::from_dx(destination.x() - origin.x())
        } else {
            None
        };
        if let Some(side) = castling {
            let rook_origin = side.rook_origin(color);
            let rook_destination = origin.translate(side.dx(), 0);
            self.grid[rook_destination] = self.grid[rook_origin].take();
            changed.extend([rook_origin, rook_destination]);
            self.players[color.index()].has_castled = true;
        }

        let promotion = piece.kind() == PieceKind::Pawn && destination.y() == color.promotion_rank();
        self.grid[origin] = None;
        self.grid[destination] = Some(if promotion {
            Piece::new(color, PieceKind::Queen)
        } else {
            piece
        });
        if piece.kind() == PieceKind::King {
            self.kings[color.index()] = destination;
            self.players[color.index()].king_has_moved = true;
        }
        for owner in Color::ALL {
            for side in CastlingSide::ALL {
                let corner = side.rook_origin(owner);
                if origin == corner || destination == corner {
                    self.players[owner.index()].rook_has_moved[side.index()] = true;
                }
            }
        }

        self.attacks.update(&self.grid, &changed);
        self.side_to_move = !self.side_to_move;

        debug_assert_eq!(
            self.attacks,
            AttackIndex::build(&self.grid),
            "attack index went stale after {origin}{destination}"
        );
        Ok(MoveSummary {
            origin,
            destination,
            piece,
            captured,
            castling,
            en_passant,
            promotion,
        })
    }
    pub fn calculate_game_state(&self) -> GameState {
        let color = self.side_to_move;
        if self.legal_moves().next().is_some() {
            GameState::Unresolved
        } else if self.is_checked(color) {
            GameState::Checkmate { winner: !color }
        } else {
            GameState::Stalemate
        }
    }
}
impl IndexableBoard for Board {
    fn index(&self, position: Position) -> Option<Piece> {
        self.piece_at(position)
    }
}
