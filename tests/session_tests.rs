//! Room and agent tests.
//!
//! These run on a paused clock, so sub-phase deadlines elapse instantly
//! whenever every task is idle.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::watch;

use rust_deduction::core::{ActorId, EngineConfig, NightStep, Phase, Role};
use rust_deduction::engine::Game;
use rust_deduction::events::{LogEntry, Message};
use rust_deduction::roster::RoleSet;
use rust_deduction::session::{Agent, AgentError, Prompt, RandomAgent, Room, SilentAgent, Submission};

/// Never answers.
struct StalledAgent;

#[async_trait]
impl Agent for StalledAgent {
    async fn decide(&mut self, _prompt: &Prompt) -> Result<Submission, AgentError> {
        std::future::pending().await
    }

    async fn notify(&mut self, _entry: &LogEntry) {}
}

/// Plays randomly and keeps every notice it receives.
struct RecordingAgent {
    inner: RandomAgent,
    notices: Arc<Mutex<Vec<LogEntry>>>,
}

#[async_trait]
impl Agent for RecordingAgent {
    async fn decide(&mut self, prompt: &Prompt) -> Result<Submission, AgentError> {
        self.inner.decide(prompt).await
    }

    async fn notify(&mut self, entry: &LogEntry) {
        self.notices.lock().unwrap().push(entry.clone());
    }
}

fn nine_seats(seed: u64) -> Game {
    Game::deal(EngineConfig::default().with_seed(seed), &RoleSet::classic_nine()).unwrap()
}

fn seat_of(game: &Game, role: Role) -> ActorId {
    game.roster().with_role(role).next().unwrap().id
}

#[tokio::test(start_paused = true)]
async fn test_random_agents_finish_a_game() {
    for seed in [1, 2, 3] {
        let game = nine_seats(seed);
        let mut room = Room::new(game);
        for (actor, agent) in ActorId::all(9).zip(RandomAgent::for_table(seed, 9)) {
            room.sit(actor, agent).unwrap();
        }

        let game = room.run().await;
        assert!(game.is_over());
        assert_eq!(game.phase(), Phase::Ended);
        assert!(game.result().is_some());
        assert!(game
            .log()
            .iter()
            .any(|e| matches!(e.message, Message::Speech { .. })));
    }
}

#[tokio::test(start_paused = true)]
async fn test_silent_agent_abstains() {
    let game = nine_seats(11);
    let silent = seat_of(&game, Role::Commoner);

    let mut room = Room::new(game);
    for actor in ActorId::all(9) {
        if actor == silent {
            room.sit(actor, SilentAgent).unwrap();
        } else {
            room.sit(actor, RandomAgent::new(actor.0 as u64)).unwrap();
        }
    }

    let game = room.run().await;
    assert!(game.is_over());
    assert!(!game.log().iter().any(|e| matches!(
        e.message,
        Message::Speech { actor, .. } if actor == silent
    )));
    assert!(game
        .state()
        .history()
        .iter()
        .filter(|r| r.actor == silent)
        .all(|r| r.action == rust_deduction::Action::Abstain));
}

#[tokio::test(start_paused = true)]
async fn test_unseated_actors_abstain() {
    let game = nine_seats(5);
    let mut room = Room::new(game);
    // Only the aggressors play; everyone else is left empty.
    let aggressors: Vec<ActorId> = room
        .game()
        .roster()
        .with_role(Role::Aggressor)
        .map(|a| a.id)
        .collect();
    for actor in &aggressors {
        room.sit(*actor, RandomAgent::new(actor.0 as u64)).unwrap();
    }

    let game = room.run().await;
    assert!(game.is_over());
    assert!(game
        .state()
        .history()
        .iter()
        .filter(|r| !aggressors.contains(&r.actor))
        .all(|r| r.action == rust_deduction::Action::Abstain));
}

#[tokio::test(start_paused = true)]
async fn test_shutdown_returns_game_mid_play() {
    let game = nine_seats(3);
    assert_eq!(game.config().phase_timeout, Some(Duration::from_secs(60)));

    let (tx, rx) = watch::channel(false);
    let mut room = Room::new(game).with_shutdown(rx);
    for actor in ActorId::all(9) {
        room.sit(actor, StalledAgent).unwrap();
    }

    let handle = tokio::spawn(room.run());
    // Deadlines pass at 60s, 120s, 180s; stop in the middle of the day.
    tokio::time::sleep(Duration::from_secs(200)).await;
    tx.send(true).unwrap();

    let game = handle.await.unwrap();
    assert!(!game.is_over());
    assert_eq!(game.round(), 1);
    assert_eq!(game.phase(), Phase::DayDiscuss);
    assert_eq!(game.roster().alive_ids().len(), 9);

    // The half-played game can be picked up again.
    let restored = Game::restore(&game.snapshot().unwrap()).unwrap();
    assert_eq!(restored, game);
}

#[tokio::test(start_paused = true)]
async fn test_shutdown_before_first_prompt() {
    let game = nine_seats(8);
    let (tx, rx) = watch::channel(false);
    tx.send(true).unwrap();

    let room = Room::new(game.clone()).with_shutdown(rx);
    let stopped = room.run().await;
    assert_eq!(stopped, game);
    assert_eq!(stopped.phase(), Phase::Night(NightStep::Kill));
}

#[tokio::test(start_paused = true)]
async fn test_notices_respect_audience() {
    let game = nine_seats(21);
    let commoner = seat_of(&game, Role::Commoner);
    let medic = seat_of(&game, Role::Medic);

    let commoner_log = Arc::new(Mutex::new(Vec::new()));
    let medic_log = Arc::new(Mutex::new(Vec::new()));

    let mut room = Room::new(game);
    for actor in ActorId::all(9) {
        let inner = RandomAgent::new(actor.0 as u64 + 40);
        if actor == commoner {
            let agent = RecordingAgent {
                inner,
                notices: Arc::clone(&commoner_log),
            };
            room.sit(actor, agent).unwrap();
        } else if actor == medic {
            let agent = RecordingAgent {
                inner,
                notices: Arc::clone(&medic_log),
            };
            room.sit(actor, agent).unwrap();
        } else {
            room.sit(actor, inner).unwrap();
        }
    }

    let game = room.run().await;
    assert!(game.is_over());
    // Let the seats drain their inboxes.
    tokio::task::yield_now().await;
    tokio::time::sleep(Duration::from_millis(1)).await;

    let heard = commoner_log.lock().unwrap().clone();
    assert!(!heard.is_empty());
    assert!(heard.iter().all(|e| !matches!(
        e.message,
        Message::KillChosen { .. } | Message::PendingKill { .. } | Message::Inspection { .. }
    )));
    assert!(heard
        .iter()
        .any(|e| matches!(e.message, Message::PhaseOpened { phase: Phase::DayVote })));

    let heard = medic_log.lock().unwrap().clone();
    assert!(heard
        .iter()
        .any(|e| matches!(e.message, Message::PendingKill { .. })));
}

#[tokio::test(start_paused = true)]
async fn test_sit_rejects_unknown_seat() {
    let mut room = Room::new(nine_seats(1));
    assert!(room.sit(ActorId::new(10), SilentAgent).is_err());
    assert!(room.sit(ActorId::new(0), SilentAgent).is_err());
}
