use rustc_hash::FxHashMap;

use crate::{
    color::Color,
    game::{ActorId, Game, GameId, GameOptions, MoveOutcome, Outcome, Phase, SessionError},
    position::Position,
};

/// Lifetime counters of the lobby.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Stats {
    pub games_played: u64,
    pub games_running: u64,
    pub games_waiting: u64,
}

/// Owns every unfinished game and knows which game each actor sits in. An
/// actor sits in at most one game at a time. A game leaves the registry as
/// soon as its result is handed back to the caller.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    games: FxHashMap<GameId, Game>,
    seats: FxHashMap<ActorId, GameId>,
    next_game: u64,
    stats: Stats,
}
impl Registry {
    pub fn new() -> Self {
        Registry::default()
    }
    pub fn stats(&self) -> Stats {
        self.stats
    }
    pub fn game(&self, id: GameId) -> Option<&Game> {
        self.games.get(&id)
    }
    pub fn game_of(&self, actor: ActorId) -> Option<&Game> {
        self.seats.get(&actor).and_then(|id| self.games.get(id))
    }
    pub fn waiting_games(&self) -> impl Iterator<Item = &Game> {
        self.games
            .values()
            .filter(|game| game.phase() == Phase::Waiting)
    }
    pub fn create(&mut self, actor: ActorId, options: GameOptions) -> Result<GameId, SessionError> {
        if self.seats.contains_key(&actor) {
            return Err(SessionError::ActorBusy);
        }
        let id = GameId(self.next_game);
        self.next_game += 1;
        self.games.insert(id, Game::new(id, actor, options));
        self.seats.insert(actor, id);
        self.stats.games_waiting += 1;
        Ok(id)
    }
    pub fn join(&mut self, actor: ActorId, id: GameId) -> Result<Color, SessionError> {
        if self.seats.contains_key(&actor) {
            return Err(SessionError::ActorBusy);
        }
        let game = self.games.get_mut(&id).ok_or(SessionError::UnknownGame)?;
        let color = game.join(actor)?;
        self.seats.insert(actor, id);
        self.stats.games_waiting -= 1;
        self.stats.games_running += 1;
        Ok(color)
    }
    /// Forward a move to the game `actor` sits in. Moves of one registry are
    /// applied one at a time, so a game never sees two moves in flight. A
    /// move that ends the game also closes it; the returned outcome is the
    /// last thing relayed about it.
    pub fn submit_move(
        &mut self,
        actor: ActorId,
        origin: Position,
        destination: Position,
    ) -> Result<MoveOutcome, SessionError> {
        let id = *self.seats.get(&actor).ok_or(SessionError::NotSeated)?;
        let game = self.games.get_mut(&id).ok_or(SessionError::UnknownGame)?;
        let outcome = game.attempt_move(actor, origin, destination)?;
        if outcome.outcome.is_some() {
            self.finish(id);
        }
        Ok(outcome)
    }
    /// Drop `actor`. A waiting game they created disappears, a running game
    /// ends as abandoned.
    pub fn disconnect(&mut self, actor: ActorId) -> Option<(GameId, Outcome)> {
        let id = *self.seats.get(&actor)?;
        let game = self.games.get_mut(&id)?;
        match game.phase() {
            Phase::Waiting => {
                self.games.remove(&id);
                self.seats.remove(&actor);
                self.stats.games_waiting -= 1;
                None
            }
            Phase::Running => {
                let outcome = game.abandon(actor)?;
                self.finish(id);
                Some((id, outcome))
            }
            Phase::Finished(_) => unreachable!("finished games release their seats"),
        }
    }
    fn finish(&mut self, id: GameId) {
        let Some(game) = self.games.remove(&id) else {
            return;
        };
        for actor in game.actors() {
            self.seats.remove(&actor);
        }
        self.stats.games_running -= 1;
        self.stats.games_played += 1;
    }
}
#[cfg(test)]
mod test {
    use crate::{
        color::Color,
        game::{ActorId, GameOptions, Outcome, SessionError, SidePreference},
        position::pos,
        registry::{Registry, Stats},
    };

    const ALICE: ActorId = ActorId(1);
    const BOB: ActorId = ActorId(2);
    const CAROL: ActorId = ActorId(3);

    fn white() -> GameOptions {
        GameOptions {
            side: SidePreference::White,
            ..GameOptions::default()
        }
    }

    #[test]
    fn an_actor_sits_in_one_game() {
        let mut registry = Registry::new();
        let id = registry.create(ALICE, white()).unwrap();
        assert_eq!(registry.create(ALICE, white()), Err(SessionError::ActorBusy));
        assert_eq!(registry.join(ALICE, id), Err(SessionError::ActorBusy));
        assert_eq!(registry.waiting_games().count(), 1);
        assert_eq!(registry.join(BOB, id), Ok(Color::Black));
        assert_eq!(registry.join(CAROL, id), Err(SessionError::GameFull));
        assert_eq!(registry.waiting_games().count(), 0);
        assert_eq!(
            registry.stats(),
            Stats {
                games_played: 0,
                games_running: 1,
                games_waiting: 0,
            }
        );
    }
    #[test]
    fn moves_go_to_the_actors_game() {
        let mut registry = Registry::new();
        let first = registry.create(ALICE, white()).unwrap();
        registry.join(BOB, first).unwrap();
        assert_eq!(
            registry.submit_move(CAROL, pos("e2"), pos("e4")),
            Err(SessionError::NotSeated)
        );
        assert_eq!(
            registry.submit_move(BOB, pos("e7"), pos("e5")),
            Err(SessionError::NotYourTurn)
        );
        let outcome = registry.submit_move(ALICE, pos("e2"), pos("e4")).unwrap();
        assert_eq!(outcome.side_to_move, Color::Black);
        assert_eq!(
            registry.game(first).unwrap().board().side_to_move(),
            Color::Black
        );
    }
    #[test]
    fn disconnect_abandons_running_game_and_frees_both_seats() {
        let mut registry = Registry::new();
        let id = registry.create(ALICE, white()).unwrap();
        registry.join(BOB, id).unwrap();
        assert_eq!(
            registry.disconnect(BOB),
            Some((id, Outcome::Abandoned { by: Color::Black }))
        );
        assert!(registry.game(id).is_none());
        assert!(registry.game_of(ALICE).is_none());
        assert!(registry.create(ALICE, white()).is_ok());
        assert_eq!(registry.stats().games_played, 1);
        assert_eq!(registry.stats().games_running, 0);
        assert_eq!(registry.stats().games_waiting, 1);
    }
    #[test]
    fn disconnect_from_waiting_game_drops_it() {
        let mut registry = Registry::new();
        let id = registry.create(ALICE, white()).unwrap();
        assert_eq!(registry.disconnect(ALICE), None);
        assert!(registry.game(id).is_none());
        assert_eq!(registry.stats(), Stats::default());
        assert_eq!(registry.join(BOB, id), Err(SessionError::UnknownGame));
    }
    #[test]
    fn checkmate_counts_as_played() {
        let mut registry = Registry::new();
        let id = registry.create(ALICE, white()).unwrap();
        registry.join(BOB, id).unwrap();
        let mut last = None;
        for (actor, movement) in [(ALICE, "f2f3"), (BOB, "e7e5"), (ALICE, "g2g4"), (BOB, "d8h4")] {
            last = registry
                .submit_move(actor, pos(&movement[0..2]), pos(&movement[2..4]))
                .unwrap()
                .outcome;
        }
        assert_eq!(
            last,
            Some(Outcome::Checkmate {
                winner: Color::Black
            })
        );
        assert!(registry.game(id).is_none());
        assert_eq!(registry.stats().games_played, 1);
        assert!(registry.game_of(BOB).is_none());
        assert_eq!(registry.disconnect(BOB), None);
    }
    #[test]
    fn finished_games_are_released() {
        let mut registry = Registry::new();
        for _ in 0..1000 {
            let id = registry.create(ALICE, white()).unwrap();
            registry.join(BOB, id).unwrap();
            assert!(registry.disconnect(ALICE).is_some());
            assert!(registry.game(id).is_none());
        }
        assert!(registry.games.is_empty());
        assert!(registry.seats.is_empty());
        assert_eq!(registry.stats().games_played, 1000);
    }
    #[test]
    fn independent_games_run_in_parallel() {
        let boards: Vec<_> = std::thread::scope(|scope| {
            let handles: Vec<_> = (0..4)
                .map(|i| {
                    scope.spawn(move || {
                        let mut registry = Registry::new();
                        let white_actor = ActorId(2 * i);
                        let black_actor = ActorId(2 * i + 1);
                        let id = registry.create(white_actor, white()).unwrap();
                        registry.join(black_actor, id).unwrap();
                        registry
                            .submit_move(white_actor, pos("d2"), pos("d4"))
                            .unwrap();
                        registry.game(id).unwrap().board().clone()
                    })
                })
                .collect();
            handles
                .into_iter()
                .map(|handle| handle.join().unwrap())
                .collect()
        });
        assert!(boards.windows(2).all(|pair| pair[0] == pair[1]));
    }
}
