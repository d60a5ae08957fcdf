use std::ops::{Index, IndexMut};

use crate::{board_display::IndexableBoard, piece::Piece, position::Position};

/// Eight ranks of eight files, rank 1 first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Grid<T>(pub [[T; 8]; 8]);

impl<T> Grid<T> {
    pub fn row(&self, y: i8) -> &[T; 8] {
        &self.0[(y - 1) as usize]
    }
    pub fn row_mut(&mut self, y: i8) -> &mut [T; 8] {
        &mut self.0[(y - 1) as usize]
    }
    pub fn get(&self, position: Position) -> Option<&T> {
        position.is_on_board().then(|| &self[position])
    }
    pub fn positioned_values(&self) -> impl Iterator<Item = (Position, &T)> {
        Position::all().map(move |position| (position, &self[position]))
    }
}
impl Grid<Option<Piece>> {
    pub fn piece_at(&self, position: Position) -> Option<Piece> {
        self.get(position).copied().flatten()
    }
    pub fn pieces(&self) -> impl Iterator<Item = (Position, Piece)> {
        self.positioned_values()
            .filter_map(|(position, piece)| piece.map(|piece| (position, piece)))
    }
}
impl<T> Index<Position> for Grid<T> {
    type Output = T;

    fn index(&self, index: Position) -> &Self::Output {
        &self.row(index.y())[(index.x() - 1) as usize]
    }
}
impl<T> IndexMut<Position> for Grid<T> {
    fn index_mut(&mut self, index: Position) -> &mut Self::Output {
        &mut self.row_mut(index.y())[(index.x() - 1) as usize]
    }
}
impl IndexableBoard for Grid<Option<Piece>> {
    fn index(&self, position: Position) -> Option<Piece> {
        self.piece_at(position)
    }
}
#[cfg(test)]
mod test {
    use crate::{
        color::Color,
        grid::Grid,
        piece::{Piece, PieceKind},
        position::{Position, pos},
    };

    #[test]
    fn off_board_reads_are_empty() {
        let mut grid: Grid<Option<Piece>> = Grid::default();
        grid[pos("h8")] = Some(Piece::new(Color::Black, PieceKind::King));
        assert_eq!(grid.piece_at(Position::new(9, 8)), None);
        assert_eq!(grid.piece_at(Position::new(0, 0)), None);
        assert_eq!(
            grid.pieces().collect::<Vec<_>>(),
            [(pos("h8"), Piece::new(Color::Black, PieceKind::King))]
        );
    }
}
