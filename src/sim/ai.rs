//! AI opponents
//!
//! Each live AI picks one heading per tick: any safe move, with a strong
//! bias toward continuing straight so the cycles draw long lines instead of
//! jittering. A cornered AI keeps its heading and crashes on the next tick.

use glam::IVec2;
use rand::Rng;

use super::actor::{Actor, ActorId};
use super::grid::{Grid, Heading, occupies};
use super::state::GameSession;

/// Source of the AI's random choices.
///
/// Any `rand::Rng` works; tests can script exact decisions.
pub trait DecisionSource {
    /// True with probability `p`
    fn chance(&mut self, p: f64) -> bool;
    /// Uniform index in `0..len` (`len > 0`)
    fn pick(&mut self, len: usize) -> usize;
}

impl<R: Rng> DecisionSource for R {
    fn chance(&mut self, p: f64) -> bool {
        self.random::<f64>() < p
    }

    fn pick(&mut self, len: usize) -> usize {
        self.random_range(0..len)
    }
}

/// Choose the next heading for `me`.
///
/// `actors` is every actor in the round (including `me`); `claimed` holds the
/// cells other live actors are expected to enter this tick.
pub fn choose_heading<S: DecisionSource + ?Sized>(
    me: &Actor,
    actors: &[Actor],
    claimed: &[(ActorId, IVec2)],
    grid: Grid,
    straight_bias: f64,
    rng: &mut S,
) -> Heading {
    let safe: Vec<Heading> = Heading::ALL
        .into_iter()
        .filter(|h| !h.is_reverse_of(me.heading))
        .filter(|&h| is_safe(me.next_cell(h), me, actors, claimed, grid))
        .collect();

    if safe.is_empty() {
        return me.heading;
    }

    if safe.contains(&me.heading) && rng.chance(straight_bias) {
        return me.heading;
    }

    safe[rng.pick(safe.len())]
}

fn is_safe(
    cell: IVec2,
    me: &Actor,
    actors: &[Actor],
    claimed: &[(ActorId, IVec2)],
    grid: Grid,
) -> bool {
    if !grid.contains(cell) {
        return false;
    }
    let blocked = actors
        .iter()
        .any(|a| occupies(cell, &a.trail) || (a.id != me.id && a.position == cell));
    if blocked {
        return false;
    }
    !claimed.iter().any(|&(id, c)| id != me.id && c == cell)
}

/// Plan this tick's heading for every live AI, in index order.
///
/// The player is expected to travel along `player_heading`. Each AI sees the
/// cells chosen by the AIs planned before it and the straight-ahead cell of
/// those planned after it.
pub fn plan_ai_headings<S: DecisionSource + ?Sized>(
    session: &GameSession,
    player_heading: Heading,
    straight_bias: f64,
    rng: &mut S,
) -> Vec<(ActorId, Heading)> {
    let mut claimed: Vec<(ActorId, IVec2)> = session
        .actors()
        .iter()
        .filter(|a| a.alive)
        .map(|a| {
            let heading = if a.id.is_player() {
                player_heading
            } else {
                a.heading
            };
            (a.id, a.next_cell(heading))
        })
        .collect();

    let mut plan = Vec::new();
    for ai in session.live_ais() {
        let heading = choose_heading(
            ai,
            session.actors(),
            &claimed,
            session.grid,
            straight_bias,
            rng,
        );
        if let Some(slot) = claimed.iter_mut().find(|(id, _)| *id == ai.id) {
            slot.1 = ai.next_cell(heading);
        }
        plan.push((ai.id, heading));
    }
    plan
}
