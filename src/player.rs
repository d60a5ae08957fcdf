use crate::{castling::CastlingSide, piece::Piece, position::Position};

/// Per-color bookkeeping that the grid alone cannot tell.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Player {
    pub(crate) king_has_moved: bool,
    pub(crate) rook_has_moved: [bool; 2],
    pub(crate) has_castled: bool,
    pub(crate) captured_pieces: Vec<Piece>,
    pub(crate) en_passant_pawn: Option<Position>,
}
impl Player {
    pub fn king_has_moved(&self) -> bool {
        self.king_has_moved
    }
    pub fn rook_has_moved(&self, side: CastlingSide) -> bool {
        self.rook_has_moved[side.index()]
    }
    pub fn has_castled(&self) -> bool {
        self.has_castled
    }
    /// This color's pieces taken by the opponent, oldest first.
    pub fn captured_pieces(&self) -> &[Piece] {
        &self.captured_pieces
    }
    /// This color's pawn that advanced two squares on its latest move.
    pub fn en_passant_pawn(&self) -> Option<Position> {
        self.en_passant_pawn
    }
    pub fn may_castle(&self, side: CastlingSide) -> bool {
        !self.king_has_moved && !self.rook_has_moved(side)
    }
}
