use crate::{grid::Grid, piece::Piece, position::Position, rules::attacks_of};

/// A set of squares, one bit per [`Position::index`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct SquareSet(u64);

impl SquareSet {
    pub const EMPTY: Self = SquareSet(0);

    pub fn contains(self, position: Position) -> bool {
        position.is_on_board() && (self.0 >> position.index()) & 1 == 1
    }
    pub fn insert(&mut self, position: Position) {
        self.0 |= 1 << position.index();
    }
    pub fn len(self) -> u32 {
        self.0.count_ones()
    }
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }
    pub fn iter(self) -> impl Iterator<Item = Position> {
        let mut bits = self.0;
        std::iter::from_fn(move || {
            if bits == 0 {
                None
            } else {
                let index = bits.trailing_zeros() as usize;
                bits &= bits - 1;
                Some(Position::from_index(index))
            }
        })
    }
}
impl FromIterator<Position> for SquareSet {
    fn from_iter<T: IntoIterator<Item = Position>>(iter: T) -> Self {
        let mut set = SquareSet::EMPTY;
        for position in iter {
            set.insert(position);
        }
        set
    }
}

/// For every square, which squares hold a piece attacking it.
///
/// Kept in both directions so a single piece's old attacks can be
/// retracted without scanning the board.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AttackIndex {
    attacked_by: [SquareSet; 64],
    attacks_from: [SquareSet; 64],
}
impl AttackIndex {
    pub fn build(grid: &Grid<Option<Piece>>) -> Self {
        let mut index = AttackIndex {
            attacked_by: [SquareSet::EMPTY; 64],
            attacks_from: [SquareSet::EMPTY; 64],
        };
        for (position, _) in grid.pieces() {
            index.refresh_square(grid, position);
        }
        index
    }
    /// Squares of pieces, of either color, attacking `position`.
    pub fn attackers(&self, position: Position) -> SquareSet {
        if position.is_on_board() {
            self.attacked_by[position.index()]
        } else {
            SquareSet::EMPTY
        }
    }
    /// Replace the attacks originating from `origin` with those of whatever
    /// occupies it now in `grid`.
    fn refresh_square(&mut self, grid: &Grid<Option<Piece>>, origin: Position) {
        let bit = 1 << origin.index();
        for target in self.attacks_from[origin.index()].iter() {
            self.attacked_by[target.index()].0 &= !bit;
        }
        let attacks: SquareSet = match grid[origin] {
            Some(piece) => attacks_of(piece, origin, grid).collect(),
            None => SquareSet::EMPTY,
        };
        for target in attacks.iter() {
            self.attacked_by[target.index()].0 |= bit;
        }
        self.attacks_from[origin.index()] = attacks;
    }
    /// Bring the index up to date after the squares in `changed` were
    /// modified in `grid`. The index must still describe the grid as it was
    /// before the modification.
    ///
    /// A line piece's rays change only if one of the changed squares was on
    /// them, so it suffices to refresh the changed squares and the line
    /// pieces that attacked any of them.
    pub fn update(&mut self, grid: &Grid<Option<Piece>>, changed: &[Position]) {
        let mut affected = SquareSet::EMPTY;
        for &position in changed {
            affected.insert(position);
            for attacker in self.attackers(position).iter() {
                if grid[attacker].is_some_and(Piece::is_line_mover) {
                    affected.insert(attacker);
                }
            }
        }
        for position in affected.iter() {
            self.refresh_square(grid, position);
        }
    }
}
#[cfg(test)]
mod test {
    use crate::{
        attack::{AttackIndex, SquareSet},
        color::Color,
        grid::Grid,
        piece::{Piece, PieceKind},
        position::pos,
    };

    #[test]
    fn square_set_iterates_in_index_order() {
        let set: SquareSet = [pos("h8"), pos("a1"), pos("e4")].into_iter().collect();
        assert_eq!(set.len(), 3);
        assert_eq!(set.iter().collect::<Vec<_>>(), [pos("a1"), pos("e4"), pos("h8")]);
        assert!(set.contains(pos("e4")));
        assert!(!set.contains(pos("e5")));
    }
    #[test]
    fn blocking_a_ray_matches_rebuild() {
        let mut grid = Grid::default();
        grid[pos("a1")] = Some(Piece::new(Color::White, PieceKind::Rook));
        grid[pos("h8")] = Some(Piece::new(Color::Black, PieceKind::Bishop));
        let mut index = AttackIndex::build(&grid);
        assert!(index.attackers(pos("a8")).contains(pos("a1")));
        assert!(index.attackers(pos("d4")).contains(pos("h8")));

        grid[pos("a5")] = Some(Piece::new(Color::Black, PieceKind::Knight));
        grid[pos("e5")] = Some(Piece::new(Color::Black, PieceKind::Knight));
        index.update(&grid, &[pos("a5"), pos("e5")]);
        assert_eq!(index, AttackIndex::build(&grid));
        assert!(!index.attackers(pos("a8")).contains(pos("a1")));
        assert!(index.attackers(pos("a5")).contains(pos("a1")));
        assert!(!index.attackers(pos("d4")).contains(pos("h8")));

        grid[pos("a5")] = None;
        index.update(&grid, &[pos("a5")]);
        assert_eq!(index, AttackIndex::build(&grid));
        assert!(index.attackers(pos("a8")).contains(pos("a1")));
    }
    #[test]
    fn off_board_is_never_attacked() {
        let index = AttackIndex::build(&Grid::default());
        assert!(index.attackers(pos("a1").translate(-1, 0)).is_empty());
    }
}
