//! Light cycle entities

use glam::IVec2;
use serde::{Deserialize, Serialize};

use super::grid::Heading;

/// Identifies a cycle within a round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ActorId {
    /// The human-controlled cycle
    Player,
    /// An AI opponent, numbered from 0
    Ai(u8),
}

impl ActorId {
    pub fn is_player(&self) -> bool {
        matches!(self, ActorId::Player)
    }
}

/// A single light cycle
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    pub id: ActorId,
    /// Cell currently occupied by the cycle
    pub position: IVec2,
    /// Direction applied on the last move (or the spawn heading)
    pub heading: Heading,
    /// Cells left behind, oldest first
    pub trail: Vec<IVec2>,
    pub alive: bool,
}

impl Actor {
    pub fn new(id: ActorId, position: IVec2, heading: Heading) -> Self {
        Self {
            id,
            position,
            heading,
            trail: Vec::new(),
            alive: true,
        }
    }

    /// Cell the actor would enter when travelling along `heading`
    pub fn next_cell(&self, heading: Heading) -> IVec2 {
        self.position + heading.delta()
    }

    /// Move one cell along `heading`, leaving the vacated cell in the trail.
    /// Dead actors are frozen and ignore this.
    pub fn advance(&mut self, heading: Heading) {
        if !self.alive {
            return;
        }
        self.trail.push(self.position);
        self.position += heading.delta();
        self.heading = heading;
    }

    /// Mark the actor as crashed (idempotent)
    pub fn kill(&mut self) {
        self.alive = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_advance_appends_vacated_cell() {
        let mut actor = Actor::new(ActorId::Player, IVec2::new(5, 12), Heading::Right);
        actor.advance(Heading::Right);
        actor.advance(Heading::Down);
        assert_eq!(actor.position, IVec2::new(6, 13));
        assert_eq!(actor.heading, Heading::Down);
        assert_eq!(actor.trail, vec![IVec2::new(5, 12), IVec2::new(6, 12)]);
    }

    #[test]
    fn test_dead_actor_is_frozen() {
        let mut actor = Actor::new(ActorId::Ai(0), IVec2::new(3, 3), Heading::Left);
        actor.advance(Heading::Left);
        actor.kill();
        let frozen = actor.clone();
        actor.advance(Heading::Up);
        assert_eq!(actor, frozen);
    }

    #[test]
    fn test_player_ordering() {
        assert!(ActorId::Player < ActorId::Ai(0));
        assert!(ActorId::Ai(0) < ActorId::Ai(1));
        assert!(ActorId::Player.is_player());
        assert!(!ActorId::Ai(3).is_player());
    }

    fn any_heading() -> impl Strategy<Value = Heading> {
        prop::sample::select(Heading::ALL.to_vec())
    }

    proptest! {
        #[test]
        fn kill_is_idempotent(
            x in 0i32..40,
            y in 0i32..40,
            heading in any_heading(),
            moves in prop::collection::vec(any_heading(), 0..10),
        ) {
            let mut actor = Actor::new(ActorId::Ai(1), IVec2::new(x, y), heading);
            for m in moves {
                actor.advance(m);
            }
            let mut once = actor.clone();
            once.kill();
            let mut twice = once.clone();
            twice.kill();
            prop_assert_eq!(once, twice);
        }
    }
}
