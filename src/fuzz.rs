use rand::{Rng, SeedableRng, rngs::SmallRng};
use rustc_hash::FxHashSet;

use crate::{
    board::Board,
    board_display::BoardDisplay,
    color::Color,
    game_state::GameState,
    piece::PieceKind,
    position::Position,
};

const GAMES: usize = 40;
const MAX_PLIES: usize = 300;

impl From<chess::Square> for Position {
    fn from(value: chess::Square) -> Self {
        Position::new(
            (value.get_file().to_index() + 1).try_into().unwrap(),
            (value.get_rank().to_index() + 1).try_into().unwrap(),
        )
    }
}
fn oracle_moves(board: &chess::Board) -> FxHashSet<(Position, Position)> {
    chess::MoveGen::new_legal(board)
        .filter(|movement| matches!(movement.get_promotion(), None | Some(chess::Piece::Queen)))
        .map(|movement| (movement.get_source().into(), movement.get_dest().into()))
        .collect()
}
fn check_against_oracle(board: &Board) {
    let fen = board.fen().to_string();
    let oracle: chess::Board = fen.parse().unwrap();
    let moves: FxHashSet<_> = board.legal_moves().collect();
    let expected = oracle_moves(&oracle);
    if let Some((origin, destination)) = moves.difference(&expected).next() {
        panic!(
            "found {origin}{destination} but it's not a legal move\n{}\n{fen}",
            BoardDisplay::new(board),
        );
    }
    if let Some((origin, destination)) = expected.difference(&moves).next() {
        panic!(
            "{origin}{destination} not found\n{}\n{fen}",
            BoardDisplay::new(board),
        );
    }
    assert_eq!(
        board.is_checked(board.side_to_move()),
        oracle.checkers().popcnt() > 0,
        "check disagreement\n{fen}"
    );
    let state = board.calculate_game_state();
    match oracle.status() {
        chess::BoardStatus::Ongoing => assert_eq!(state, GameState::Unresolved, "{fen}"),
        chess::BoardStatus::Stalemate => assert_eq!(state, GameState::Stalemate, "{fen}"),
        chess::BoardStatus::Checkmate => assert_eq!(
            state,
            GameState::Checkmate {
                winner: !board.side_to_move()
            },
            "{fen}"
        ),
    }
    for color in Color::ALL {
        let kings: Vec<_> = board
            .grid()
            .pieces()
            .filter(|(_, piece)| piece.color() == color && piece.kind() == PieceKind::King)
            .map(|(position, _)| position)
            .collect();
        assert_eq!(kings, [board.king(color)], "{fen}");
    }
}
#[test]
fn random_games_agree_with_oracle() {
    let mut rng = SmallRng::seed_from_u64(0x00c0_ffee);
    for _ in 0..GAMES {
        let mut board = Board::starting_position();
        for _ in 0..MAX_PLIES {
            check_against_oracle(&board);
            let moves: Box<[_]> = board.legal_moves().collect();
            if moves.is_empty() {
                break;
            }
            let (origin, destination) = moves[rng.random_range(0..moves.len())];
            board.move_piece(origin, destination).unwrap();
        }
    }
}
#[test]
fn tricky_positions_agree_with_oracle() {
    for fen in [
        "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
        "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1",
        "r3k2r/Pppp1ppp/1b3nbN/nP6/BBP1P3/q4N2/Pp1P2PP/R2Q1RK1 w kq - 0 1",
        "rnbq1k1r/pp1Pbppp/2p5/8/2B5/8/PPP1NnPP/RNBQK2R w KQ - 1 8",
        "8/8/8/K2pP2r/8/8/8/4k3 w - d6 0 1",
        "4k3/8/8/8/8/8/8/R3K2R w KQ - 0 1",
    ] {
        let board: Board = fen.parse().unwrap();
        check_against_oracle(&board);
        for (origin, destination) in board.legal_moves() {
            let mut next = board.clone();
            next.move_piece(origin, destination).unwrap();
            check_against_oracle(&next);
        }
    }
}
