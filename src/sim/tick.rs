//! Discrete simulation tick
//!
//! Advances every live cycle one cell, resolving all collisions against the
//! state at the start of the tick so the outcome does not depend on the order
//! actors are visited in.

use glam::IVec2;

use super::actor::ActorId;
use super::grid::{Heading, occupies};
use super::state::{CrashEvent, GameSession};

/// Headings for a single tick (deterministic)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickInput {
    /// Turn dequeued from the player's input queue
    pub player: Option<Heading>,
    /// Heading chosen for each live AI
    pub ai: Vec<(ActorId, Heading)>,
}

impl TickInput {
    fn heading_for(&self, id: ActorId) -> Option<Heading> {
        self.ai.iter().find(|(ai, _)| *ai == id).map(|&(_, h)| h)
    }
}

/// The queued turn, unless it would reverse the cycle onto its own trail
pub fn resolve_player_heading(current: Heading, queued: Option<Heading>) -> Heading {
    match queued {
        Some(turn) if !turn.is_reverse_of(current) => turn,
        _ => current,
    }
}

/// Planned move for one live actor
#[derive(Debug, Clone, Copy)]
struct Move {
    index: usize,
    heading: Heading,
    target: IVec2,
}

/// Advance the round by one tick, returning the crashes it produced.
///
/// Once the player is dead the round is frozen and this does nothing.
pub fn tick(session: &mut GameSession, input: &TickInput) -> Vec<CrashEvent> {
    if !session.player().alive {
        return Vec::new();
    }

    session.tick += 1;
    let tick_no = session.tick;

    let moves: Vec<Move> = session
        .actors
        .iter()
        .enumerate()
        .filter(|(_, a)| a.alive)
        .map(|(index, a)| {
            let heading = if a.id.is_player() {
                resolve_player_heading(a.heading, input.player)
            } else {
                input
                    .heading_for(a.id)
                    .filter(|h| !h.is_reverse_of(a.heading))
                    .unwrap_or(a.heading)
            };
            Move {
                index,
                heading,
                target: a.next_cell(heading),
            }
        })
        .collect();

    let crashed: Vec<bool> = moves
        .iter()
        .map(|mv| collides(session, &moves, mv))
        .collect();

    // Player crash ends the round before anyone else moves
    let player_move = moves[0];
    if crashed[0] {
        session.actors[player_move.index].kill();
        let event = CrashEvent::new(ActorId::Player, player_move.target, tick_no);
        log::debug!(
            "Player crashed at ({}, {}) on tick {}",
            event.position.x,
            event.position.y,
            tick_no
        );
        session.crash_events.push(event);
        return vec![event];
    }

    let mut events = Vec::new();
    for (mv, &hit) in moves.iter().zip(&crashed) {
        let actor = &mut session.actors[mv.index];
        if hit {
            actor.kill();
            let event = CrashEvent::new(actor.id, mv.target, tick_no);
            log::debug!(
                "{:?} crashed at ({}, {}) on tick {}",
                actor.id,
                mv.target.x,
                mv.target.y,
                tick_no
            );
            events.push(event);
        } else {
            actor.advance(mv.heading);
        }
    }
    session.crash_events.extend_from_slice(&events);

    session.score += 1;
    events
}

/// Would `mv` crash, judged against the state at the start of the tick?
fn collides(session: &GameSession, moves: &[Move], mv: &Move) -> bool {
    if !session.grid.contains(mv.target) {
        return true;
    }
    let hits_obstacle = session.actors.iter().enumerate().any(|(i, other)| {
        occupies(mv.target, &other.trail) || (i != mv.index && other.position == mv.target)
    });
    if hits_obstacle {
        return true;
    }
    // Head-on: two cycles entering the same cell both crash
    moves
        .iter()
        .any(|o| o.index != mv.index && o.target == mv.target)
}

/// Non-mutating form of [`tick`]
pub fn advanced(session: &GameSession, input: &TickInput) -> (GameSession, Vec<CrashEvent>) {
    let mut next = session.clone();
    let events = tick(&mut next, input);
    (next, events)
}
