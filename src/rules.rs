//! Movement rule table.
//!
//! Every piece is described by the directions it attacks along and
//! whether it steps once or slides until blocked. Pawn pushes and
//! castling are the two moves that are not attacks; they are flagged
//! here and resolved by the board.

use crate::{
    color::Color,
    grid::Grid,
    piece::{Piece, PieceKind, RuleKey},
    position::{Position, Vector},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Reach {
    Step,
    Slide,
}
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Special {
    None,
    /// Non-capturing advance; the rule's directions are capture-only.
    PawnPush { forward: Vector },
    Castling,
}
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MoveRule {
    pub directions: &'static [Vector],
    pub reach: Reach,
    pub special: Special,
}

static WHITE_PAWN: MoveRule = MoveRule {
    directions: &[Vector { x: -1, y: 1 }, Vector { x: 1, y: 1 }],
    reach: Reach::Step,
    special: Special::PawnPush {
        forward: Vector { x: 0, y: 1 },
    },
};
static BLACK_PAWN: MoveRule = MoveRule {
    directions: &[Vector { x: -1, y: -1 }, Vector { x: 1, y: -1 }],
    reach: Reach::Step,
    special: Special::PawnPush {
        forward: Vector { x: 0, y: -1 },
    },
};
static KNIGHT: MoveRule = MoveRule {
    directions: &Vector::KNIGHT_MOVES,
    reach: Reach::Step,
    special: Special::None,
};
static BISHOP: MoveRule = MoveRule {
    directions: &Vector::BISHOP_DIRECTIONS,
    reach: Reach::Slide,
    special: Special::None,
};
static ROOK: MoveRule = MoveRule {
    directions: &Vector::ROOK_DIRECTIONS,
    reach: Reach::Slide,
    special: Special::None,
};
static QUEEN: MoveRule = MoveRule {
    directions: &Vector::QUEEN_DIRECTIONS,
    reach: Reach::Slide,
    special: Special::None,
};
static KING: MoveRule = MoveRule {
    directions: &Vector::KING_MOVES,
    reach: Reach::Step,
    special: Special::Castling,
};

pub fn rule(key: RuleKey) -> &'static MoveRule {
    match key {
        RuleKey::Pawn(Color::White) => &WHITE_PAWN,
        RuleKey::Pawn(Color::Black) => &BLACK_PAWN,
        RuleKey::Kind(PieceKind::Knight) => &KNIGHT,
        RuleKey::Kind(PieceKind::Bishop) => &BISHOP,
        RuleKey::Kind(PieceKind::Rook) => &ROOK,
        RuleKey::Kind(PieceKind::Queen) => &QUEEN,
        RuleKey::Kind(PieceKind::King) => &KING,
        RuleKey::Kind(PieceKind::Pawn) => unreachable!("pawns are keyed by color"),
    }
}
impl MoveRule {
    /// Squares a piece on `origin` attacks, friendly or not. A slide stops
    /// on the first occupied square, inclusive.
    pub fn attacks<'a>(
        &'a self,
        origin: Position,
        grid: &'a Grid<Option<Piece>>,
    ) -> impl Iterator<Item = Position> + 'a {
        self.directions
            .iter()
            .copied()
            .flat_map(move |direction| {
                let mut resume = true;
                let limit = match self.reach {
                    Reach::Step => 1,
                    Reach::Slide => 7,
                };
                origin.ray(direction).take(limit).take_while(move |position| {
                    resume && {
                        resume = grid[*position].is_none();
                        true
                    }
                })
            })
    }
}
pub fn attacks_of<'a>(
    piece: Piece,
    origin: Position,
    grid: &'a Grid<Option<Piece>>,
) -> impl Iterator<Item = Position> + 'a {
    rule(piece.rule_key()).attacks(origin, grid)
}
