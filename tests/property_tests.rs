//! Property tests over random legal play.
//!
//! A scripted driver picks an awaiting actor and one of its legal actions
//! from a random choice stream, occasionally expiring the sub-phase instead.

use proptest::prelude::*;

use rust_deduction::core::{
    Action, ActorId, EngineConfig, GameError, Phase, VoteTiePolicy, WinRule,
};
use rust_deduction::engine::Game;
use rust_deduction::roster::RoleSet;

/// Apply one scripted step. Returns false once the game is over.
fn step(game: &mut Game, choice: u16) -> bool {
    if game.is_over() {
        return false;
    }
    let awaiting = game.awaiting();
    if awaiting.is_empty() || choice % 17 == 0 {
        game.expire().unwrap();
        return true;
    }
    let actor = awaiting[choice as usize % awaiting.len()];
    let options = game.legal_actions(actor);
    if options.is_empty() {
        game.submit_speech(actor, "...").unwrap();
        return true;
    }
    let action = options[(choice as usize / 7) % options.len()];
    game.submit(actor, action).unwrap();
    true
}

fn config(seed: u64, runoff: bool, edge: bool) -> EngineConfig {
    EngineConfig::default()
        .with_seed(seed)
        .with_phase_timeout(None)
        .with_tie_policy(if runoff {
            VoteTiePolicy::Runoff
        } else {
            VoteTiePolicy::NoElimination
        })
        .with_win_rule(if edge { WinRule::Edge } else { WinRule::Massacre })
}

/// (antidote, poison, retaliation) per seat.
fn charges(game: &Game) -> Vec<(bool, bool, bool)> {
    game.roster()
        .iter()
        .map(|a| (a.antidote_available(), a.poison_available(), a.can_retaliate()))
        .collect()
}

proptest! {
    #[test]
    fn test_game_ends_exactly_when_a_side_is_wiped_out(
        seed in any::<u64>(),
        runoff in any::<bool>(),
        six in any::<bool>(),
        choices in prop::collection::vec(any::<u16>(), 0..400),
    ) {
        let roles = if six { RoleSet::classic_six() } else { RoleSet::classic_nine() };
        let mut game = Game::deal(config(seed, runoff, false), &roles).unwrap();
        for choice in choices {
            if !step(&mut game, choice) {
                break;
            }
            let alive = game.roster().population();
            prop_assert_eq!(game.is_over(), alive.aggressors == 0 || alive.village() == 0);
            prop_assert_eq!(game.is_over(), game.phase() == Phase::Ended);
            prop_assert_eq!(game.is_over(), game.result().is_some());
        }
    }

    #[test]
    fn test_new_sub_phase_starts_with_no_decisions(
        seed in any::<u64>(),
        runoff in any::<bool>(),
        choices in prop::collection::vec(any::<u16>(), 0..400),
    ) {
        let mut game = Game::deal(config(seed, runoff, false), &RoleSet::classic_nine()).unwrap();
        let mut opened = (game.phase(), game.round());
        prop_assert_eq!(game.awaiting(), game.expected_actors());
        for choice in choices {
            if !step(&mut game, choice) {
                break;
            }
            let now = (game.phase(), game.round());
            if now != opened && !game.is_over() {
                prop_assert!(!game.expected_actors().is_empty());
                prop_assert_eq!(game.awaiting(), game.expected_actors());
            }
            opened = now;
        }
    }

    #[test]
    fn test_charges_never_return(
        seed in any::<u64>(),
        choices in prop::collection::vec(any::<u16>(), 0..400),
    ) {
        let mut game = Game::deal(config(seed, false, false), &RoleSet::classic_nine()).unwrap();
        let mut before = charges(&game);
        let mut round = game.round();
        for choice in choices {
            if !step(&mut game, choice) {
                break;
            }
            let after = charges(&game);
            for (old, new) in before.iter().zip(&after) {
                prop_assert!(new.0 <= old.0);
                prop_assert!(new.1 <= old.1);
                prop_assert!(new.2 <= old.2);
            }
            prop_assert!(game.round() >= round);
            before = after;
            round = game.round();
        }
    }

    #[test]
    fn test_ended_game_rejects_everything(
        seed in any::<u64>(),
        choices in prop::collection::vec(any::<u16>(), 400..800),
    ) {
        let mut game = Game::deal(config(seed, false, true), &RoleSet::classic_six()).unwrap();
        for choice in choices {
            if !step(&mut game, choice) {
                break;
            }
        }
        // Expire until it ends; at most a handful of rounds remain.
        for _ in 0..200 {
            if game.is_over() {
                break;
            }
            game.expire().unwrap();
            if let Some(actor) = game.awaiting().first().copied() {
                if let Some(action) = game.legal_actions(actor).first().copied() {
                    game.submit(actor, action).unwrap();
                }
            }
        }
        prop_assume!(game.is_over());

        let frozen = game.clone();
        for seat in 1..=game.roster().len() as u8 {
            let actor = ActorId::new(seat);
            for action in [Action::Abstain, Action::Vote(ActorId::new(1)), Action::Retaliate(None)] {
                prop_assert!(matches!(game.submit(actor, action), Err(GameError::GameEnded)));
            }
            prop_assert!(game.legal_actions(actor).is_empty());
        }
        prop_assert!(matches!(game.expire(), Err(GameError::GameEnded)));
        prop_assert_eq!(&game, &frozen);
    }

    #[test]
    fn test_replay_is_deterministic(
        seed in any::<u64>(),
        choices in prop::collection::vec(any::<u16>(), 0..300),
    ) {
        let play = || {
            let mut game = Game::deal(config(seed, true, false), &RoleSet::classic_nine()).unwrap();
            for choice in &choices {
                if !step(&mut game, *choice) {
                    break;
                }
            }
            game
        };
        let first = play();
        let second = play();
        prop_assert_eq!(first.log().len(), second.log().len());
        prop_assert_eq!(first, second);
    }
}
