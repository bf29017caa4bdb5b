//! Turn resolution.
//!
//! [`RoundEngine`] owns the [`GameState`] and resolves one player action at a
//! time. Every action costs one move on the counter that drives the
//! adversary's cadence; a rejected move costs nothing and changes nothing.
//!
//! ```text
//! AwaitingAction --rules/move--> AwaitingAction
//!       |   \--ask--> AwaitingAcknowledgment --acknowledge--> AwaitingAction
//!       \--move (trap or caught)--> Terminal
//! ```

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use tracing::{debug, info, instrument, warn};

use wh_core::{
    AdversaryDecision, Direction, GameSnapshot, GameState, GridWorld, OracleId, Outcome,
    Position, PursuitPolicy, RoomStatus, adjacent_rooms, check_room_status,
};

use crate::config::SessionConfig;
use crate::error::{SessionError, SessionResult};
use crate::journal::{Journal, JournalEntry};
use crate::oracle::{
    OracleError, OracleQueryInterface, OracleRequest, clarify_trap_answer, fallback_answer,
    format_response,
};
use crate::rules::RULES;

/// Question texts that back out of an oracle query.
pub const ABORT_WORDS: [&str; 3] = ["exit", "quit", "back"];

/// Whether a question means "never mind".
pub fn is_abort(question: &str) -> bool {
    let q = question.trim();
    q.is_empty() || ABORT_WORDS.iter().any(|w| q.eq_ignore_ascii_case(w))
}

/// One player action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Read the rules.
    ViewRules,
    /// Select an oracle and, unless `question` is `None`, ask it something.
    Ask {
        /// The oracle selected.
        oracle: OracleId,
        /// The question, or `None` if the player backed out.
        question: Option<String>,
    },
    /// Step one room.
    Move(Direction),
}

impl Action {
    /// Ask an oracle a question.
    pub fn ask(oracle: OracleId, question: impl Into<String>) -> Self {
        Self::Ask {
            oracle,
            question: Some(question.into()),
        }
    }
}

/// Where the engine is in the turn cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TurnPhase {
    /// Ready for the next action.
    AwaitingAction,
    /// An oracle answer is on screen.
    AwaitingAcknowledgment,
    /// The game has ended.
    Terminal,
}

/// Something that happened while resolving an action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum TurnEvent {
    /// The rules were displayed.
    RulesShown {
        /// The rules text.
        text: &'static str,
    },
    /// An oracle answered.
    OracleAnswered {
        /// Who answered.
        oracle: OracleId,
        /// The answer, with its heading.
        response: String,
        /// Whether the canned answer stood in.
        fallback: bool,
    },
    /// The player selected an oracle and backed out.
    QueryAborted {
        /// The oracle selected.
        oracle: OracleId,
    },
    /// The player moved.
    PlayerMoved {
        /// Direction taken.
        direction: Direction,
        /// Room left.
        from: Position,
        /// Room entered.
        to: Position,
    },
    /// The adversary moved.
    AdversaryMoved {
        /// Room left.
        from: Position,
        /// Room entered.
        to: Position,
        /// Whether it was chasing.
        chased: bool,
    },
    /// The game ended.
    GameEnded {
        /// How.
        outcome: Outcome,
    },
}

/// The result of one resolved action.
#[derive(Debug, Clone, Serialize)]
pub struct TurnReport {
    /// What happened, in order.
    pub events: Vec<TurnEvent>,
    /// The board after the action.
    pub snapshot: GameSnapshot,
    /// The phase after the action.
    pub phase: TurnPhase,
}

impl TurnReport {
    /// The terminal outcome, if this action ended the game.
    pub fn outcome(&self) -> Option<Outcome> {
        self.snapshot.outcome
    }
}

/// Resolves player actions against a [`GameState`].
///
/// The random source is injectable; [`RoundEngine::new`] seeds a [`StdRng`]
/// from the config.
pub struct RoundEngine<O, R = StdRng> {
    state: GameState,
    oracle: O,
    rng: R,
    policy: PursuitPolicy,
    config: SessionConfig,
    phase: TurnPhase,
    pending_answer: Option<String>,
    journal: Journal,
}

impl<O: OracleQueryInterface> RoundEngine<O> {
    /// Start a new game seeded from `config`.
    pub fn new(config: SessionConfig, oracle: O) -> Self {
        let mut rng = StdRng::seed_from_u64(config.seed);
        let state = GameState::new(&mut rng);
        info!(seed = config.seed, "new game");
        Self::from_parts(state, oracle, rng, config)
    }
}

impl<O: OracleQueryInterface, R: Rng> RoundEngine<O, R> {
    /// Run an existing game with a given random source.
    pub fn from_parts(state: GameState, oracle: O, rng: R, config: SessionConfig) -> Self {
        let phase = if state.is_over() {
            TurnPhase::Terminal
        } else {
            TurnPhase::AwaitingAction
        };
        Self {
            state,
            oracle,
            rng,
            policy: PursuitPolicy::new(),
            config,
            phase,
            pending_answer: None,
            journal: Journal::new(),
        }
    }

    /// The game state.
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// A read-only copy of the board.
    pub fn snapshot(&self) -> GameSnapshot {
        self.state.snapshot()
    }

    /// The current phase.
    pub fn phase(&self) -> TurnPhase {
        self.phase
    }

    /// The answer waiting for acknowledgment, if any.
    pub fn pending_answer(&self) -> Option<&str> {
        self.pending_answer.as_deref()
    }

    /// The game journal.
    pub fn journal(&self) -> &Journal {
        &self.journal
    }

    /// The answer source.
    pub fn oracle(&self) -> &O {
        &self.oracle
    }

    /// The config this game runs with.
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Directions the player may move right now.
    pub fn legal_moves(&self) -> Vec<Direction> {
        GridWorld::valid_directions(self.state.player())
    }

    /// Resolve one action.
    #[instrument(level = "debug", skip(self), fields(moves = self.state.player_moves()))]
    pub fn apply(&mut self, action: Action) -> SessionResult<TurnReport> {
        match self.phase {
            TurnPhase::Terminal => return Err(SessionError::GameOver),
            TurnPhase::AwaitingAcknowledgment => return Err(SessionError::AwaitingAcknowledgment),
            TurnPhase::AwaitingAction => {}
        }

        let events = match action {
            Action::ViewRules => self.view_rules()?,
            Action::Ask { oracle, question } => self.query(oracle, question)?,
            Action::Move(direction) => self.resolve_move(direction)?,
        };
        Ok(TurnReport {
            events,
            snapshot: self.state.snapshot(),
            phase: self.phase,
        })
    }

    /// Dismiss the oracle answer on screen.
    pub fn acknowledge(&mut self) -> SessionResult<GameSnapshot> {
        if self.phase != TurnPhase::AwaitingAcknowledgment {
            return Err(SessionError::NothingToAcknowledge);
        }
        self.pending_answer = None;
        self.phase = TurnPhase::AwaitingAction;
        Ok(self.state.snapshot())
    }

    fn view_rules(&mut self) -> SessionResult<Vec<TurnEvent>> {
        let move_number = self.state.record_action()?;
        self.journal.append(JournalEntry::RulesViewed {
            move_number,
            timestamp: chrono::Utc::now(),
        });
        Ok(vec![TurnEvent::RulesShown { text: RULES }])
    }

    fn query(&mut self, oracle: OracleId, question: Option<String>) -> SessionResult<Vec<TurnEvent>> {
        // Selecting an oracle is the committed action, even if no question follows.
        let move_number = self.state.record_action()?;

        let Some(question) = question.filter(|q| !is_abort(q)) else {
            debug!(%oracle, "query aborted");
            self.journal.append(JournalEntry::QueryAborted {
                move_number,
                oracle,
                timestamp: chrono::Utc::now(),
            });
            return Ok(vec![TurnEvent::QueryAborted { oracle }]);
        };

        let request = OracleRequest {
            oracle,
            role: self.state.roles().role_of(oracle),
            player: self.state.player(),
            adjacent: adjacent_rooms(&self.state),
            question: question.trim().to_string(),
        };

        let reply = self.oracle.ask(&request).and_then(|text| {
            let text = text.trim();
            if text.is_empty() {
                Err(OracleError::EmptyAnswer)
            } else {
                Ok(text.to_string())
            }
        });
        let (answer, fallback) = match reply {
            Ok(text) if self.config.clarify_trap_answers => {
                (clarify_trap_answer(&request, &text), false)
            }
            Ok(text) => (text, false),
            Err(e) => {
                warn!(%oracle, error = %e, "oracle unavailable, using canned answer");
                (fallback_answer(&request, &mut self.rng), true)
            }
        };

        let response = format_response(oracle, &answer);
        self.journal.append(JournalEntry::OracleQuery {
            move_number,
            oracle,
            question: request.question,
            answer,
            fallback,
            timestamp: chrono::Utc::now(),
        });
        self.pending_answer = Some(response.clone());
        self.phase = TurnPhase::AwaitingAcknowledgment;
        Ok(vec![TurnEvent::OracleAnswered {
            oracle,
            response,
            fallback,
        }])
    }

    fn resolve_move(&mut self, direction: Direction) -> SessionResult<Vec<TurnEvent>> {
        let from = self.state.player();
        if !GridWorld::can_step(from, direction) {
            return Err(SessionError::IllegalMove {
                from,
                direction,
                legal: GridWorld::valid_directions(from),
            });
        }

        let move_number = self.state.record_action()?;
        let to = self.state.move_player(direction)?;
        let mut events = vec![TurnEvent::PlayerMoved {
            direction,
            from,
            to,
        }];
        self.journal.append(JournalEntry::PlayerMoved {
            move_number,
            direction,
            from,
            to,
            timestamp: chrono::Utc::now(),
        });

        match check_room_status(to, &self.state) {
            RoomStatus::Trap => {
                self.end(Outcome::Trapped, &mut events)?;
                return Ok(events);
            }
            RoomStatus::Adversary => {
                self.end(Outcome::Caught, &mut events)?;
                return Ok(events);
            }
            RoomStatus::Empty => {}
        }

        let adversary_from = self.state.adversary();
        let decision = self
            .policy
            .decide(move_number, adversary_from, to, &mut self.rng);
        if let Some(adversary_to) = decision.destination() {
            let chased = matches!(decision, AdversaryDecision::Chase { .. });
            self.state.move_adversary(adversary_to)?;
            events.push(TurnEvent::AdversaryMoved {
                from: adversary_from,
                to: adversary_to,
                chased,
            });
            self.journal.append(JournalEntry::AdversaryMoved {
                from: adversary_from,
                to: adversary_to,
                chased,
                timestamp: chrono::Utc::now(),
            });
            if adversary_to == self.state.player() {
                self.end(Outcome::Caught, &mut events)?;
            }
        }
        Ok(events)
    }

    fn end(&mut self, outcome: Outcome, events: &mut Vec<TurnEvent>) -> SessionResult<()> {
        self.state.finish(outcome)?;
        self.phase = TurnPhase::Terminal;
        info!(%outcome, moves = self.state.player_moves(), "game over");
        self.journal.append(JournalEntry::GameOver {
            move_number: self.state.player_moves(),
            outcome,
            timestamp: chrono::Utc::now(),
        });
        events.push(TurnEvent::GameEnded { outcome });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::oracle::{OfflineOracle, ScriptedOracle};
    use wh_core::{ADVERSARY_START, OracleRole, PLAYER_START, RoleAssignment};

    /// ALI deceptive, AN random, ALE truthful.
    fn roles() -> RoleAssignment {
        RoleAssignment::from_draws([1, 5, 10]).unwrap()
    }

    /// Nine traps along row 4 plus one extra.
    fn traps_with(extra: Position) -> Vec<Position> {
        let mut v: Vec<Position> = (1..10).map(|c| Position::new(4, c)).collect();
        v.push(extra);
        v
    }

    fn engine_with<O: OracleQueryInterface>(
        adversary: Position,
        extra_trap: Position,
        oracle: O,
    ) -> RoundEngine<O> {
        let state =
            GameState::with_layout(PLAYER_START, adversary, traps_with(extra_trap), roles())
                .unwrap();
        RoundEngine::from_parts(
            state,
            oracle,
            StdRng::seed_from_u64(7),
            SessionConfig::default(),
        )
    }

    fn engine() -> RoundEngine<OfflineOracle> {
        engine_with(ADVERSARY_START, Position::new(0, 0), OfflineOracle)
    }

    #[test]
    fn new_engine_starts_fresh() {
        let e = RoundEngine::new(SessionConfig::default().with_seed(5), OfflineOracle);
        assert_eq!(e.phase(), TurnPhase::AwaitingAction);
        assert_eq!(e.state().player(), PLAYER_START);
        assert_eq!(e.state().player_moves(), 0);
        assert!(e.journal().is_empty());
    }

    #[test]
    fn same_seed_same_game() {
        let a = RoundEngine::new(SessionConfig::default().with_seed(9), OfflineOracle);
        let b = RoundEngine::new(SessionConfig::default().with_seed(9), OfflineOracle);
        assert_eq!(a.state().traps(), b.state().traps());
        assert_eq!(a.state().roles(), b.state().roles());
    }

    #[test]
    fn illegal_move_changes_nothing() {
        let mut e = engine();
        let err = e.apply(Action::Move(Direction::Left)).unwrap_err();
        match err {
            SessionError::IllegalMove { from, legal, .. } => {
                assert_eq!(from, PLAYER_START);
                assert_eq!(legal, vec![Direction::Up, Direction::Right]);
            }
            other => panic!("unexpected error {other:?}"),
        }
        assert_eq!(e.state().player_moves(), 0);
        assert_eq!(e.state().player(), PLAYER_START);
        assert!(e.journal().is_empty());
        assert_eq!(e.phase(), TurnPhase::AwaitingAction);
    }

    #[test]
    fn rules_cost_a_move() {
        let mut e = engine();
        let report = e.apply(Action::ViewRules).unwrap();
        assert_eq!(report.events, vec![TurnEvent::RulesShown { text: RULES }]);
        assert_eq!(report.snapshot.player_moves, 1);
        assert_eq!(report.phase, TurnPhase::AwaitingAction);
        assert_eq!(e.state().player(), PLAYER_START);
    }

    #[test]
    fn stepping_on_trap_ends_game_before_adversary_moves() {
        let mut e = engine_with(ADVERSARY_START, Position::new(8, 0), OfflineOracle);
        // Move 3 would let a calm adversary move; make sure it never gets the chance.
        e.apply(Action::ViewRules).unwrap();
        e.apply(Action::ViewRules).unwrap();
        let report = e.apply(Action::Move(Direction::Up)).unwrap();
        assert_eq!(report.outcome(), Some(Outcome::Trapped));
        assert!(report.snapshot.game_over);
        assert_eq!(report.phase, TurnPhase::Terminal);
        assert_eq!(e.state().adversary(), ADVERSARY_START);
        assert_eq!(e.state().adversary_moves(), 0);
        assert!(
            !report
                .events
                .iter()
                .any(|ev| matches!(ev, TurnEvent::AdversaryMoved { .. }))
        );
        assert_eq!(report.snapshot.revealed_traps.len(), wh_core::TRAP_COUNT);
    }

    #[test]
    fn walking_into_adversary_is_caught() {
        let mut e = engine_with(Position::new(9, 1), Position::new(0, 0), OfflineOracle);
        let report = e.apply(Action::Move(Direction::Right)).unwrap();
        assert_eq!(report.outcome(), Some(Outcome::Caught));
        assert_eq!(
            report.events.last(),
            Some(&TurnEvent::GameEnded {
                outcome: Outcome::Caught
            })
        );
    }

    #[test]
    fn adversary_catching_player_ends_game() {
        let state = GameState::with_layout(
            Position::new(9, 0),
            Position::new(7, 0),
            traps_with(Position::new(0, 0)),
            roles(),
        )
        .unwrap();
        let mut e = RoundEngine::from_parts(
            state,
            OfflineOracle,
            StdRng::seed_from_u64(1),
            SessionConfig::default(),
        );
        // Reading the rules never moves the adversary; burn into the frenzied band.
        for _ in 0..49 {
            e.apply(Action::ViewRules).unwrap();
        }
        assert_eq!(e.state().adversary(), Position::new(7, 0));

        // Move 50: DOWN and RIGHT tie for the chase, DOWN wins.
        let report = e.apply(Action::Move(Direction::Right)).unwrap();
        assert_eq!(e.state().adversary(), Position::new(8, 0));
        assert_eq!(report.outcome(), None);

        // Move 51: the player steps back under it and gets caught.
        let report = e.apply(Action::Move(Direction::Left)).unwrap();
        assert_eq!(report.outcome(), Some(Outcome::Caught));
        assert_eq!(
            report.events,
            vec![
                TurnEvent::PlayerMoved {
                    direction: Direction::Left,
                    from: Position::new(9, 1),
                    to: Position::new(9, 0),
                },
                TurnEvent::AdversaryMoved {
                    from: Position::new(8, 0),
                    to: Position::new(9, 0),
                    chased: true,
                },
                TurnEvent::GameEnded {
                    outcome: Outcome::Caught
                },
            ]
        );
        assert_eq!(e.state().adversary_moves(), 2);
    }

    #[test]
    fn actions_after_game_over_are_rejected() {
        let mut e = engine_with(ADVERSARY_START, Position::new(8, 0), OfflineOracle);
        e.apply(Action::Move(Direction::Up)).unwrap();
        assert!(matches!(e.apply(Action::ViewRules), Err(SessionError::GameOver)));
        assert!(matches!(
            e.apply(Action::Move(Direction::Right)),
            Err(SessionError::GameOver)
        ));
        assert_eq!(e.state().player_moves(), 1);
    }

    #[test]
    fn query_passes_context_and_waits_for_ack() {
        let oracle = ScriptedOracle::new().reply("Nothing but hotdogs up there.");
        let mut e = engine_with(ADVERSARY_START, Position::new(8, 0), oracle);
        let report = e
            .apply(Action::ask(OracleId::Ale, "What is above me?"))
            .unwrap();
        assert_eq!(report.phase, TurnPhase::AwaitingAcknowledgment);
        assert_eq!(report.snapshot.player_moves, 1);
        match &report.events[0] {
            TurnEvent::OracleAnswered {
                oracle,
                response,
                fallback,
            } => {
                assert_eq!(*oracle, OracleId::Ale);
                assert!(!fallback);
                assert_eq!(response, "=== ALE's Response ===\nNothing but hotdogs up there.");
            }
            other => panic!("unexpected event {other:?}"),
        }

        let asked = &e.oracle().asked()[0];
        assert_eq!(asked.role, OracleRole::Truthful);
        assert_eq!(asked.player, PLAYER_START);
        assert_eq!(asked.adjacent.len(), 2);
        assert_eq!(asked.adjacent[0].status, RoomStatus::Trap);
        assert_eq!(asked.adjacent[1].status, RoomStatus::Empty);

        assert!(matches!(
            e.apply(Action::ViewRules),
            Err(SessionError::AwaitingAcknowledgment)
        ));
        assert!(e.pending_answer().is_some());
        e.acknowledge().unwrap();
        assert_eq!(e.phase(), TurnPhase::AwaitingAction);
        assert!(matches!(e.acknowledge(), Err(SessionError::NothingToAcknowledge)));
        e.apply(Action::ViewRules).unwrap();
        assert_eq!(e.state().player_moves(), 2);
    }

    #[test]
    fn aborted_query_still_costs_a_move() {
        let mut e = engine_with(ADVERSARY_START, Position::new(0, 0), ScriptedOracle::new());
        let report = e
            .apply(Action::Ask {
                oracle: OracleId::An,
                question: None,
            })
            .unwrap();
        assert_eq!(report.events, vec![TurnEvent::QueryAborted { oracle: OracleId::An }]);
        assert_eq!(report.phase, TurnPhase::AwaitingAction);
        assert_eq!(e.state().player_moves(), 1);

        e.apply(Action::ask(OracleId::Ali, "  BACK ")).unwrap();
        assert_eq!(e.state().player_moves(), 2);
        assert!(e.oracle().asked().is_empty());
        assert_eq!(e.journal().len(), 2);
    }

    #[test]
    fn oracle_failure_uses_role_consistent_fallback() {
        let oracle = ScriptedOracle::new().fail(OracleError::Timeout);
        let mut e = engine_with(ADVERSARY_START, Position::new(8, 0), oracle);
        // ALI is deceptive in this layout.
        let report = e.apply(Action::ask(OracleId::Ali, "Any traps?")).unwrap();
        match &report.events[0] {
            TurnEvent::OracleAnswered {
                response, fallback, ..
            } => {
                assert!(*fallback);
                assert!(response.starts_with("=== ALI's Response ===\n"));
                assert!(response.contains("Safety waits in room (8,0)."));
                assert!(!response.contains("There is a trap"));
            }
            other => panic!("unexpected event {other:?}"),
        }
    }

    #[test]
    fn empty_answer_counts_as_failure() {
        let oracle = ScriptedOracle::new().reply("   ");
        let mut e = engine_with(ADVERSARY_START, Position::new(8, 0), oracle);
        let report = e.apply(Action::ask(OracleId::Ale, "Hello?")).unwrap();
        assert!(matches!(
            &report.events[0],
            TurnEvent::OracleAnswered { fallback: true, response, .. }
                if response.contains("There is a trap in room (8,0).")
        ));
    }

    #[test]
    fn dodged_trap_question_gets_clarified() {
        let oracle = ScriptedOracle::new().reply("I dream of hotdogs.");
        let mut e = engine_with(ADVERSARY_START, Position::new(8, 0), oracle);
        let report = e.apply(Action::ask(OracleId::Ale, "Is there a trap?")).unwrap();
        let TurnEvent::OracleAnswered { response, .. } = &report.events[0] else {
            panic!("expected an answer");
        };
        assert!(response.ends_with("I must be clear: there is a trap in room (8,0)."));

        let mut e = engine_with(
            ADVERSARY_START,
            Position::new(8, 0),
            ScriptedOracle::new().reply("I dream of hotdogs."),
        );
        e.config.clarify_trap_answers = false;
        let report = e.apply(Action::ask(OracleId::Ale, "Is there a trap?")).unwrap();
        let TurnEvent::OracleAnswered { response, .. } = &report.events[0] else {
            panic!("expected an answer");
        };
        assert!(response.ends_with("I dream of hotdogs."));
    }

    #[test]
    fn adversary_follows_cadence_during_play() {
        let mut e = engine();
        // Shuffle between (9,0) and (8,0); neither is a trap here.
        let mut moved_on = Vec::new();
        for i in 0..12 {
            let dir = if i % 2 == 0 { Direction::Up } else { Direction::Down };
            let before = e.state().adversary_moves();
            let report = e.apply(Action::Move(dir)).unwrap();
            if report.outcome().is_some() {
                break;
            }
            if e.state().adversary_moves() > before {
                moved_on.push(e.state().player_moves());
            }
        }
        assert!(moved_on.iter().all(|m| m % 3 == 0));
        assert_eq!(moved_on, vec![3, 6, 9, 12]);
    }

    #[test]
    fn journal_records_turns() {
        let mut e = engine_with(ADVERSARY_START, Position::new(8, 0), OfflineOracle);
        e.apply(Action::ViewRules).unwrap();
        e.apply(Action::ask(OracleId::An, "Hi")).unwrap();
        e.acknowledge().unwrap();
        e.apply(Action::Move(Direction::Up)).unwrap();
        let md = e.journal().export_markdown();
        assert!(md.contains("read the rules"));
        assert!(md.contains("asked **AN**: Hi"));
        assert!(md.contains("UP from (9,0) to (8,0)"));
        assert!(md.contains("Game over after 3 moves: trapped"));
    }

    #[test]
    fn abort_words() {
        assert!(is_abort("exit"));
        assert!(is_abort(" Quit "));
        assert!(is_abort("BACK"));
        assert!(is_abort("   "));
        assert!(!is_abort("Is it safe to go back?"));
    }
}
