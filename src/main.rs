//! Light cycle entry point
//!
//! Natively this plays one demo round headless: the autopilot steers, frames
//! are logged at debug level and the best score lands in a JSON file.
//! The browser build is driven through `platform::web` instead.

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use std::path::PathBuf;
    use std::time::{SystemTime, UNIX_EPOCH};

    use clap::Parser;

    use light_cycle::persistence::JsonFileStore;
    use light_cycle::sim::Phase;
    use light_cycle::{Game, Renderer, Settings, Snapshot};

    const FRAME_MS: u32 = 16;
    /// Upper bound on simulated time (10 minutes)
    const MAX_FRAMES: u32 = 10 * 60 * 1000 / FRAME_MS;

    #[derive(Parser, Debug)]
    #[command(name = "light-cycle")]
    #[command(about = "Plays one headless light cycle round on autopilot")]
    struct Cli {
        /// Settings JSON file (defaults are used when absent or invalid)
        #[arg(long)]
        settings: Option<PathBuf>,
        /// JSON file holding the best score
        #[arg(long, default_value = "lightcycle_scores.json")]
        scores: PathBuf,
        /// RNG seed (defaults to the current time)
        #[arg(long)]
        seed: Option<u64>,
    }

    /// Logs a one-line summary of every frame
    struct LogRenderer;

    impl Renderer for LogRenderer {
        fn draw(&mut self, snapshot: &Snapshot<'_>) {
            let alive = snapshot.actors.iter().filter(|a| a.alive).count();
            log::debug!(
                "[{:>4}] {:<9} score {:>4}  alive {}/{}  explosions {}",
                snapshot.tick,
                snapshot.phase.as_str(),
                snapshot.score,
                alive,
                snapshot.actors.len(),
                snapshot.explosions.len()
            );
        }
    }

    pub fn run() {
        env_logger::init();
        log::info!("Light cycle (native) starting...");

        let cli = Cli::parse();

        let mut settings = match &cli.settings {
            Some(path) => Settings::load_from(path),
            None => Settings::default(),
        };
        settings.autopilot = true;

        let seed = cli.seed.unwrap_or_else(|| {
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_millis() as u64)
                .unwrap_or_default()
        });

        let store = JsonFileStore::new(&cli.scores);
        log::info!("High scores kept in {}", store.path().display());
        let mut game = Game::new(settings, Box::new(store), seed);
        game.start();

        let mut renderer = LogRenderer;
        let mut frames = 0;
        while game.phase() != Phase::GameOver && frames < MAX_FRAMES {
            game.update(FRAME_MS, &mut renderer);
            frames += 1;
        }
        game.close();

        let snapshot = game.snapshot();
        if snapshot.phase == Phase::GameOver {
            log::info!(
                "Final score {} (best {}){}",
                snapshot.score,
                snapshot.high_score,
                if snapshot.new_record { ", new record!" } else { "" }
            );
        } else {
            log::warn!("Stopped after {} ticks without a crash", snapshot.tick);
        }
        println!("{}", snapshot.score);
    }

}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    headless::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is platform::web::wasm_init, this is just to satisfy the compiler
}
