use std::{
    error::Error,
    fmt::{self, Display, Formatter},
    str::FromStr,
    time::Duration,
};

use crate::{
    board::{Board, IllegalMove, MoveSummary},
    color::{Color, ParseColorError},
    game_state::GameState,
    position::Position,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ActorId(pub u64);

impl Display for ActorId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "actor {}", self.0)?;
        Ok(())
    }
}
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GameId(pub u64);

impl Display for GameId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "game {}", self.0)?;
        Ok(())
    }
}

/// Which color the creator of a game plays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SidePreference {
    White,
    Black,
    #[default]
    Random,
}
impl SidePreference {
    pub fn resolve(self) -> Color {
        match self {
            SidePreference::White => Color::White,
            SidePreference::Black => Color::Black,
            SidePreference::Random => {
                if rand::random_bool(0.5) {
                    Color::White
                } else {
                    Color::Black
                }
            }
        }
    }
}
impl Display for SidePreference {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            SidePreference::White => write!(f, "white")?,
            SidePreference::Black => write!(f, "black")?,
            SidePreference::Random => write!(f, "random")?,
        }
        Ok(())
    }
}
impl FromStr for SidePreference {
    type Err = ParseColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "random" {
            return Ok(SidePreference::Random);
        }
        let side = match s.parse()? {
            Color::White => SidePreference::White,
            Color::Black => SidePreference::Black,
        };
        Ok(side)
    }
}

/// Settings chosen when a game is created. Clocks are stored for whoever
/// keeps time; the engine never enforces them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GameOptions {
    pub time: Duration,
    pub increment: Duration,
    pub side: SidePreference,
}
impl Default for GameOptions {
    fn default() -> Self {
        GameOptions {
            time: Duration::from_secs(10 * 60),
            increment: Duration::ZERO,
            side: SidePreference::Random,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
    Checkmate { winner: Color },
    Stalemate,
    Abandoned { by: Color },
}
impl Outcome {
    pub fn winner(self) -> Option<Color> {
        match self {
            Outcome::Checkmate { winner } => Some(winner),
            Outcome::Stalemate => None,
            Outcome::Abandoned { by } => Some(!by),
        }
    }
}
impl Display for Outcome {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Checkmate { winner } => write!(f, "checkmate, {winner} wins")?,
            Outcome::Stalemate => write!(f, "stalemate")?,
            Outcome::Abandoned { by } => write!(f, "{by} abandoned the game, {} wins", !*by)?,
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SessionError {
    UnknownGame,
    ActorBusy,
    NotSeated,
    GameFull,
    NotStarted,
    GameOver,
    NotYourTurn,
    IllegalMove(IllegalMove),
}
impl From<IllegalMove> for SessionError {
    fn from(value: IllegalMove) -> Self {
        SessionError::IllegalMove(value)
    }
}
impl Display for SessionError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            SessionError::UnknownGame => write!(f, "no such game")?,
            SessionError::ActorBusy => write!(f, "already seated in another game")?,
            SessionError::NotSeated => write!(f, "not a player of this game")?,
            SessionError::GameFull => write!(f, "both seats are taken")?,
            SessionError::NotStarted => write!(f, "waiting for an opponent")?,
            SessionError::GameOver => write!(f, "the game is over")?,
            SessionError::NotYourTurn => write!(f, "it is not your turn")?,
            SessionError::IllegalMove(err) => write!(f, "illegal move: {err}")?,
        }
        Ok(())
    }
}
impl Error for SessionError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            SessionError::IllegalMove(err) => Some(err),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    Waiting,
    Running,
    Finished(Outcome),
}

/// What both actors are told after a move went through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MoveOutcome {
    pub summary: MoveSummary,
    pub side_to_move: Color,
    pub state: GameState,
    pub outcome: Option<Outcome>,
}

/// One board shared by two actors.
#[derive(Debug, Clone)]
pub struct Game {
    id: GameId,
    board: Board,
    seats: [Option<ActorId>; 2],
    options: GameOptions,
    phase: Phase,
}
impl Game {
    pub fn new(id: GameId, creator: ActorId, options: GameOptions) -> Self {
        let mut seats = [None; 2];
        seats[options.side.resolve().index()] = Some(creator);
        Game {
            id,
            board: Board::starting_position(),
            seats,
            options,
            phase: Phase::Waiting,
        }
    }
    pub fn id(&self) -> GameId {
        self.id
    }
    pub fn board(&self) -> &Board {
        &self.board
    }
    pub fn options(&self) -> GameOptions {
        self.options
    }
    pub fn phase(&self) -> Phase {
        self.phase
    }
    pub fn actor(&self, color: Color) -> Option<ActorId> {
        self.seats[color.index()]
    }
    pub fn actors(&self) -> impl Iterator<Item = ActorId> + '_ {
        self.seats.iter().copied().flatten()
    }
    pub fn color_of(&self, actor: ActorId) -> Option<Color> {
        Color::ALL
            .into_iter()
            .find(|color| self.seats[color.index()] == Some(actor))
    }
    /// Seat the second actor and start the game.
    pub fn join(&mut self, actor: ActorId) -> Result<Color, SessionError> {
        if self.phase != Phase::Waiting {
            return Err(SessionError::GameFull);
        }
        if self.color_of(actor).is_some() {
            return Err(SessionError::ActorBusy);
        }
        let color = Color::ALL
            .into_iter()
            .find(|color| self.seats[color.index()].is_none())
            .ok_or(SessionError::GameFull)?;
        self.seats[color.index()] = Some(actor);
        self.phase = Phase::Running;
        Ok(color)
    }
    pub fn attempt_move(
        &mut self,
        actor: ActorId,
        origin: Position,
        destination: Position,
    ) -> Result<MoveOutcome, SessionError> {
        let color = self.color_of(actor).ok_or(SessionError::NotSeated)?;
        match self.phase {
            Phase::Waiting => return Err(SessionError::NotStarted),
            Phase::Finished(_) => return Err(SessionError::GameOver),
            Phase::Running => (),
        }
        if color != self.board.side_to_move() {
            return Err(SessionError::NotYourTurn);
        }
        let summary = self.board.move_piece(origin, destination)?;
        let state = self.board.calculate_game_state();
        let outcome = match state {
            GameState::Unresolved => None,
            GameState::Checkmate { winner } => Some(Outcome::Checkmate { winner }),
            GameState::Stalemate => Some(Outcome::Stalemate),
        };
        if let Some(outcome) = outcome {
            self.phase = Phase::Finished(outcome);
        }
        Ok(MoveOutcome {
            summary,
            side_to_move: self.board.side_to_move(),
            state,
            outcome,
        })
    }
    /// End a running game because `actor` left. Returns `None` when there
    /// was nothing to abandon.
    pub fn abandon(&mut self, actor: ActorId) -> Option<Outcome> {
        let color = self.color_of(actor)?;
        if self.phase != Phase::Running {
            return None;
        }
        let outcome = Outcome::Abandoned { by: color };
        self.phase = Phase::Finished(outcome);
        Some(outcome)
    }
}
