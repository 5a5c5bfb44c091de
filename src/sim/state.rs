//! Round state and core simulation types
//!
//! Everything a renderer needs to paint a round lives here.

use glam::IVec2;
use serde::{Deserialize, Serialize};

use super::actor::{Actor, ActorId};
use super::grid::{Grid, Heading};

/// Current phase of a round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Phase {
    /// Arena laid out, waiting for a start command
    #[default]
    Ready,
    /// Tick timer running
    Playing,
    /// Player crashed, explosion animation running
    Exploding,
    /// Round over, waiting for a retry
    GameOver,
}

impl Phase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Ready => "ready",
            Phase::Playing => "playing",
            Phase::Exploding => "exploding",
            Phase::GameOver => "gameover",
        }
    }
}

/// A disallowed move: the actor died trying to enter `position`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrashEvent {
    pub actor: ActorId,
    pub position: IVec2,
    /// Tick on which the crash happened
    pub tick: u64,
    /// Explosion animation frame (advanced by the explosion timer)
    pub frame: u32,
}

impl CrashEvent {
    pub fn new(actor: ActorId, position: IVec2, tick: u64) -> Self {
        Self {
            actor,
            position,
            tick,
            frame: 0,
        }
    }

    /// Still animating after `total_frames` explosion frames?
    pub fn is_active(&self, total_frames: u32) -> bool {
        self.frame < total_frames
    }
}

/// Starting cells and headings for a round
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpawnLayout {
    pub player: (IVec2, Heading),
    pub ais: Vec<(IVec2, Heading)>,
}

impl SpawnLayout {
    /// Landscape arenas put the player on the left facing right and the AIs
    /// spread down the right edge facing left. Portrait arenas put the player
    /// near the bottom facing up and the AIs spread along the top facing down.
    pub fn for_grid(grid: Grid, ai_count: usize) -> Self {
        let (w, h) = (grid.width, grid.height);
        let slots = ai_count as i32 + 1;

        // AI rows/columns stay at least two cells clear of the player's on
        // small arenas
        let (player, ais) = if grid.is_portrait() {
            let player = (IVec2::new(w / 2, h - 8), Heading::Up);
            let row = 5.min(player.0.y - 2);
            let ais = (1..=ai_count as i32)
                .map(|k| (IVec2::new(w * k / slots, row), Heading::Down))
                .collect::<Vec<_>>();
            (player, ais)
        } else {
            let player = (IVec2::new(5, h / 2), Heading::Right);
            let column = (w - 6).max(player.0.x + 2);
            let ais = (1..=ai_count as i32)
                .map(|k| (IVec2::new(column, h * k / slots), Heading::Left))
                .collect::<Vec<_>>();
            (player, ais)
        };

        Self {
            player: (grid.clamp(player.0), player.1),
            ais: ais
                .into_iter()
                .map(|(cell, heading)| (grid.clamp(cell), heading))
                .collect(),
        }
    }
}

/// Complete state of one round
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "SessionRecord")]
pub struct GameSession {
    pub grid: Grid,
    pub phase: Phase,
    /// Ticks processed this round
    pub tick: u64,
    /// Ticks survived by the player
    pub score: u64,
    /// Best score known when the round started
    pub high_score: u64,
    /// Player first, then AIs in index order
    pub(crate) actors: Vec<Actor>,
    /// Every crash this round, in order
    pub crash_events: Vec<CrashEvent>,
}

/// Wire form of a session, checked before it becomes a `GameSession`
#[derive(Deserialize)]
struct SessionRecord {
    grid: Grid,
    phase: Phase,
    tick: u64,
    score: u64,
    high_score: u64,
    actors: Vec<Actor>,
    crash_events: Vec<CrashEvent>,
}

impl TryFrom<SessionRecord> for GameSession {
    type Error = String;

    /// The player must come first and appear exactly once
    fn try_from(record: SessionRecord) -> Result<Self, Self::Error> {
        match record.actors.first() {
            Some(first) if first.id.is_player() => {}
            Some(_) => return Err("first actor is not the player".to_string()),
            None => return Err("session has no actors".to_string()),
        }
        if record.actors[1..].iter().any(|a| a.id.is_player()) {
            return Err("session has more than one player".to_string());
        }
        Ok(Self {
            grid: record.grid,
            phase: record.phase,
            tick: record.tick,
            score: record.score,
            high_score: record.high_score,
            actors: record.actors,
            crash_events: record.crash_events,
        })
    }
}

impl GameSession {
    /// Fresh round laid out for `grid`
    pub fn new(grid: Grid, ai_count: usize, high_score: u64) -> Self {
        let layout = SpawnLayout::for_grid(grid, ai_count);
        let player = Actor::new(ActorId::Player, layout.player.0, layout.player.1);
        let ais = layout
            .ais
            .iter()
            .enumerate()
            .map(|(i, &(cell, heading))| Actor::new(ActorId::Ai(i as u8), cell, heading))
            .collect();
        let mut session = Self::with_actors(grid, player, ais);
        session.high_score = high_score;
        session
    }

    /// Round with hand-placed actors. `player` is forced to the player id and
    /// the AIs keep their order.
    pub fn with_actors(grid: Grid, mut player: Actor, ais: Vec<Actor>) -> Self {
        player.id = ActorId::Player;
        let mut actors = Vec::with_capacity(ais.len() + 1);
        actors.push(player);
        actors.extend(ais.into_iter().filter(|a| !a.id.is_player()));
        Self {
            grid,
            phase: Phase::Ready,
            tick: 0,
            score: 0,
            high_score: 0,
            actors,
            crash_events: Vec::new(),
        }
    }

    pub fn actors(&self) -> &[Actor] {
        &self.actors
    }

    pub fn player(&self) -> &Actor {
        &self.actors[0]
    }

    pub fn actor(&self, id: ActorId) -> Option<&Actor> {
        self.actors.iter().find(|a| a.id == id)
    }

    /// Live AI opponents, in index order
    pub fn live_ais(&self) -> impl Iterator<Item = &Actor> {
        self.actors.iter().skip(1).filter(|a| a.alive)
    }

    /// Crash events still running their explosion animation
    pub fn active_crashes(&self, total_frames: u32) -> impl Iterator<Item = &CrashEvent> {
        self.crash_events
            .iter()
            .filter(move |e| e.is_active(total_frames))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_landscape_layout_matches_arena() {
        let layout = SpawnLayout::for_grid(Grid::new(32, 24), 2);
        assert_eq!(layout.player, (IVec2::new(5, 12), Heading::Right));
        assert_eq!(
            layout.ais,
            vec![
                (IVec2::new(26, 8), Heading::Left),
                (IVec2::new(26, 16), Heading::Left),
            ]
        );
    }

    #[test]
    fn test_portrait_layout_matches_arena() {
        let layout = SpawnLayout::for_grid(Grid::new(24, 36), 2);
        assert_eq!(layout.player, (IVec2::new(12, 28), Heading::Up));
        assert_eq!(
            layout.ais,
            vec![
                (IVec2::new(8, 5), Heading::Down),
                (IVec2::new(16, 5), Heading::Down),
            ]
        );
    }

    #[test]
    fn test_layout_generalizes_to_more_ais() {
        let grid = Grid::new(32, 24);
        let layout = SpawnLayout::for_grid(grid, 5);
        assert_eq!(layout.ais.len(), 5);
        for (cell, heading) in &layout.ais {
            assert!(grid.contains(*cell));
            assert_eq!(*heading, Heading::Left);
        }
    }

    #[test]
    fn test_small_arena_spawns_do_not_overlap() {
        for grid in [Grid::new(11, 9), Grid::new(8, 8), Grid::new(12, 13), Grid::new(8, 9)] {
            let layout = SpawnLayout::for_grid(grid, 1);
            assert_ne!(layout.player.0, layout.ais[0].0, "{grid:?}");
        }
    }

    #[test]
    fn test_layout_clamped_on_tiny_grid() {
        let grid = Grid::new(4, 3);
        let layout = SpawnLayout::for_grid(grid, 2);
        assert!(grid.contains(layout.player.0));
        assert!(layout.ais.iter().all(|(cell, _)| grid.contains(*cell)));
    }

    #[test]
    fn test_new_session_is_fresh() {
        let session = GameSession::new(Grid::new(32, 24), 2, 42);
        assert_eq!(session.phase, Phase::Ready);
        assert_eq!(session.tick, 0);
        assert_eq!(session.score, 0);
        assert_eq!(session.high_score, 42);
        assert_eq!(session.actors().len(), 3);
        assert_eq!(session.player().id, ActorId::Player);
        assert!(session.actors().iter().all(|a| a.alive && a.trail.is_empty()));
        assert_eq!(session.live_ais().count(), 2);
        assert!(session.crash_events.is_empty());
    }

    #[test]
    fn test_active_crashes_filter() {
        let mut session = GameSession::new(Grid::new(32, 24), 2, 0);
        session
            .crash_events
            .push(CrashEvent::new(ActorId::Ai(0), IVec2::new(1, 1), 3));
        let mut done = CrashEvent::new(ActorId::Ai(1), IVec2::new(2, 2), 1);
        done.frame = 15;
        session.crash_events.push(done);
        let active: Vec<_> = session.active_crashes(15).collect();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].actor, ActorId::Ai(0));
    }

    #[test]
    fn test_session_json_restores() {
        let session = GameSession::new(Grid::new(32, 24), 2, 9);
        let json = serde_json::to_string(&session).unwrap();
        let restored: GameSession = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, session);
        assert!(restored.player().id.is_player());
    }

    #[test]
    fn test_session_json_rejects_bad_actor_lists() {
        let session = GameSession::new(Grid::new(32, 24), 1, 0);
        let mut value = serde_json::to_value(&session).unwrap();

        value["actors"] = serde_json::json!([]);
        assert!(serde_json::from_value::<GameSession>(value.clone()).is_err());

        let ai = serde_json::to_value(&session.actors()[1]).unwrap();
        let player = serde_json::to_value(session.player()).unwrap();
        value["actors"] = serde_json::json!([ai.clone(), player.clone()]);
        assert!(serde_json::from_value::<GameSession>(value.clone()).is_err());

        value["actors"] = serde_json::json!([player.clone(), player]);
        assert!(serde_json::from_value::<GameSession>(value).is_err());
    }
}
