//! Round lifecycle: phases, timers and high scores
//!
//! `Game` owns the live session, the player's input queue, the timer set and
//! the score store. The host feeds it elapsed time through [`Game::update`]
//! and commands through [`Game::handle`]; after every state change a
//! read-only [`Snapshot`] is handed to the host's [`Renderer`].

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::Serialize;

use crate::consts::{MAX_FIRINGS_PER_UPDATE, MAX_FRAME_MS};
use crate::highscores::HighScore;
use crate::persistence::ScoreStore;
use crate::platform::Command;
use crate::settings::Settings;
use crate::sim::{
    Actor, CrashEvent, DecisionSource, GameSession, Grid, Heading, InputQueue, Phase, TickInput,
    choose_heading, plan_ai_headings, resolve_player_heading, tick,
};
use crate::timer::{TimerId, TimerKind, Timers};

/// Read-only view of the round handed to renderers
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot<'a> {
    pub phase: Phase,
    pub grid: Grid,
    pub tick: u64,
    pub score: u64,
    pub high_score: u64,
    /// Finished round beat the previous best
    pub new_record: bool,
    pub actors: &'a [Actor],
    /// Crash events whose explosion is still animating
    pub explosions: Vec<&'a CrashEvent>,
    /// Total frames in an explosion animation
    pub explosion_frames: u32,
}

/// Paints snapshots; never mutates the game
pub trait Renderer {
    fn draw(&mut self, snapshot: &Snapshot<'_>);
}

impl<F> Renderer for F
where
    F: FnMut(&Snapshot<'_>),
{
    fn draw(&mut self, snapshot: &Snapshot<'_>) {
        self(snapshot)
    }
}

/// Renderer that discards every frame
#[derive(Debug, Clone, Copy, Default)]
pub struct NullRenderer;

impl Renderer for NullRenderer {
    fn draw(&mut self, _snapshot: &Snapshot<'_>) {}
}

/// A light cycle game instance
pub struct Game<R = Pcg32> {
    settings: Settings,
    session: GameSession,
    input: InputQueue,
    timers: Timers,
    tick_timer: Option<TimerId>,
    rng: R,
    store: Box<dyn ScoreStore>,
    new_record: bool,
    closed: bool,
}

impl Game<Pcg32> {
    /// Create a game in `Ready` with a seeded RNG
    pub fn new(settings: Settings, store: Box<dyn ScoreStore>, seed: u64) -> Self {
        log::info!("Game initialized with seed: {}", seed);
        Self::with_rng(settings, store, Pcg32::seed_from_u64(seed))
    }
}

impl<R: DecisionSource> Game<R> {
    /// Create a game in `Ready` drawing AI decisions from `rng`
    pub fn with_rng(settings: Settings, store: Box<dyn ScoreStore>, rng: R) -> Self {
        let settings = settings.validated();
        let session = GameSession::new(settings.grid(), settings.ai_count, 0);
        Self {
            input: InputQueue::new(settings.input_queue_capacity),
            settings,
            session,
            timers: Timers::new(),
            tick_timer: None,
            rng,
            store,
            new_record: false,
            closed: false,
        }
    }

    pub fn phase(&self) -> Phase {
        self.session.phase
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn input_queue(&self) -> &InputQueue {
        &self.input
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Timers still scheduled (tick timer plus running explosions)
    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    /// Toggle demo mode: the AI steers the player when no input is queued
    pub fn set_autopilot(&mut self, enabled: bool) {
        if self.settings.autopilot != enabled {
            log::info!("Autopilot: {}", enabled);
        }
        self.settings.autopilot = enabled;
    }

    /// Dispatch a host command. Returns whether it changed anything.
    pub fn handle(&mut self, command: Command) -> bool {
        match command {
            Command::Steer(heading) => self.enqueue(heading),
            Command::Start => self.start(),
            Command::Close => {
                let was_open = !self.closed;
                self.close();
                was_open
            }
        }
    }

    /// Buffer a turn for the player (only while playing)
    pub fn enqueue(&mut self, heading: Heading) -> bool {
        if self.closed || self.session.phase != Phase::Playing {
            return false;
        }
        self.input.enqueue(heading, self.session.player().heading)
    }

    /// Start (or retry) a round on a freshly laid out arena
    pub fn start(&mut self) -> bool {
        let session = GameSession::new(self.settings.grid(), self.settings.ai_count, 0);
        self.start_session(session)
    }

    /// Start a round on a prepared arena. Valid from `Ready` or `GameOver`.
    pub fn start_session(&mut self, mut session: GameSession) -> bool {
        if self.closed || !matches!(self.session.phase, Phase::Ready | Phase::GameOver) {
            return false;
        }

        // Leftover explosions belong to the old round
        self.timers.cancel_all();
        self.input.clear();
        self.new_record = false;

        let record = HighScore::load(self.store.as_ref(), &self.settings.high_score_key);
        session.high_score = record.best();
        session.phase = Phase::Playing;
        log::info!(
            "Round started: {}x{} grid, {} AI, high score {}",
            session.grid.width,
            session.grid.height,
            session.actors().len() - 1,
            session.high_score
        );
        self.session = session;
        self.tick_timer = Some(
            self.timers
                .start(TimerKind::Tick, self.settings.tick_interval_ms, None),
        );
        true
    }

    /// Stop everything. The game ignores all further calls.
    pub fn close(&mut self) {
        if self.closed {
            return;
        }
        self.timers.cancel_all();
        self.tick_timer = None;
        self.input.clear();
        self.closed = true;
        log::info!("Game closed in phase {}", self.session.phase.as_str());
    }

    /// Advance timers by `dt_ms` of host time, drawing after each change
    pub fn update(&mut self, dt_ms: u32, renderer: &mut dyn Renderer) {
        if self.closed {
            return;
        }
        let mut budget = dt_ms.min(MAX_FRAME_MS);
        let mut firings = 0;
        while firings < MAX_FIRINGS_PER_UPDATE {
            let Some(fired) = self.timers.advance(&mut budget) else {
                break;
            };
            firings += 1;
            let changed = match fired.kind {
                TimerKind::Tick => self.on_tick(),
                TimerKind::Explosion { event } => self.on_explosion_frame(event, fired.finished),
            };
            if changed {
                renderer.draw(&self.snapshot());
            }
        }
    }

    /// Current read-only view
    pub fn snapshot(&self) -> Snapshot<'_> {
        let frames = self.settings.explosion_frames;
        Snapshot {
            phase: self.session.phase,
            grid: self.session.grid,
            tick: self.session.tick,
            score: self.session.score,
            high_score: self.session.high_score,
            new_record: self.new_record,
            actors: self.session.actors(),
            explosions: self.session.active_crashes(frames).collect(),
            explosion_frames: frames,
        }
    }

    fn on_tick(&mut self) -> bool {
        if self.session.phase != Phase::Playing {
            return false;
        }

        let mut queued = self.input.dequeue_one();
        if queued.is_none() && self.settings.autopilot {
            queued = Some(self.autopilot_heading());
        }
        let heading = resolve_player_heading(self.session.player().heading, queued);
        let ai = plan_ai_headings(
            &self.session,
            heading,
            self.settings.ai_straight_bias,
            &mut self.rng,
        );

        let first_new = self.session.crash_events.len();
        let events = tick(&mut self.session, &TickInput { player: queued, ai });
        for offset in 0..events.len() {
            self.timers.start(
                TimerKind::Explosion {
                    event: first_new + offset,
                },
                self.settings.explosion_interval_ms,
                Some(self.settings.explosion_frames),
            );
        }

        if !self.session.player().alive {
            if let Some(id) = self.tick_timer.take() {
                self.timers.cancel(id);
            }
            self.session.phase = Phase::Exploding;
            log::info!("Player derezzed on tick {}", self.session.tick);
        }
        true
    }

    fn autopilot_heading(&mut self) -> Heading {
        let claimed: Vec<_> = self
            .session
            .live_ais()
            .map(|a| (a.id, a.next_cell(a.heading)))
            .collect();
        choose_heading(
            self.session.player(),
            self.session.actors(),
            &claimed,
            self.session.grid,
            self.settings.ai_straight_bias,
            &mut self.rng,
        )
    }

    fn on_explosion_frame(&mut self, index: usize, finished: bool) -> bool {
        let Some(event) = self.session.crash_events.get_mut(index) else {
            return false;
        };
        event.frame = event.frame.saturating_add(1);
        if finished && event.actor.is_player() && self.session.phase == Phase::Exploding {
            self.finish_round();
        }
        true
    }

    fn finish_round(&mut self) {
        self.session.phase = Phase::GameOver;
        let score = self.session.score;
        let mut record = HighScore::new(&self.settings.high_score_key, self.session.high_score);
        self.new_record = record.submit(self.store.as_mut(), score);
        self.session.high_score = record.best();
        log::info!(
            "Game over: score {}, high score {}{}",
            score,
            self.session.high_score,
            if self.new_record { " (new record)" } else { "" }
        );
    }
}

impl<R> Drop for Game<R> {
    fn drop(&mut self) {
        self.timers.cancel_all();
        self.tick_timer = None;
    }
}
