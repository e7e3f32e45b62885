//! Duck Pond headless runner
//!
//! Plays one autopilot session against the headless scene at a simulated
//! 60 fps and prints the final HUD as JSON.

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::path::PathBuf;

    use clap::Parser;
    use duck_pond::audio::LogSink;
    use duck_pond::platform::FrameClock;
    use duck_pond::renderer::HeadlessScene;
    use duck_pond::sim::{GameEvent, GamePhase, GameState, TickInput, tick};
    use duck_pond::ui::{HudSink, HudSnapshot, Presenter};
    use duck_pond::{Settings, Tuning};

    /// Simulated display refresh
    const FRAME_SECONDS: f64 = 1.0 / 60.0;

    #[derive(Parser, Debug)]
    #[command(author, version, about = "Duck Pond headless autopilot run", long_about = None)]
    struct Args {
        /// Run seed
        #[arg(long, default_value_t = 1)]
        seed: u64,

        /// Simulated seconds to play
        #[arg(long, default_value_t = 60.0)]
        seconds: f64,

        /// Balance overrides (JSON)
        #[arg(long)]
        tuning: Option<PathBuf>,

        /// Player settings (JSON)
        #[arg(long)]
        settings: Option<PathBuf>,
    }

    /// Logs HUD changes that matter to a reader of the run
    #[derive(Default)]
    struct LogHud {
        level: u32,
        phase: Option<GamePhase>,
    }

    impl HudSink for LogHud {
        fn show(&mut self, hud: &HudSnapshot) {
            if self.phase != Some(hud.phase) {
                log::info!("HUD phase {:?}", hud.phase);
                self.phase = Some(hud.phase);
            }
            if hud.level != self.level {
                log::info!("HUD level {} (score {})", hud.level, hud.score);
                self.level = hud.level;
            }
            log::trace!("HUD {:?}", hud);
        }
    }

    pub fn run() {
        env_logger::init();
        let args = Args::parse();
        log::info!("Duck Pond (headless) starting, seed {}", args.seed);

        let tuning = args.tuning.as_deref().map(Tuning::load).unwrap_or_default();
        let settings = args
            .settings
            .as_deref()
            .map(Settings::load)
            .unwrap_or_default();

        let mut state = GameState::with_tuning(args.seed, tuning);
        let mut scene = HeadlessScene::new();
        let mut clock = FrameClock::new();
        let mut presenter = Presenter::new(settings);
        presenter.audio.mark_all_ready();
        let (mut cues, mut hud) = (LogSink, LogHud::default());

        let mut input = TickInput {
            start: true,
            autopilot: true,
            ..Default::default()
        };

        let frames = (args.seconds / FRAME_SECONDS).ceil() as u64;
        let mut kills = 0u32;
        'frames: for frame in 0..=frames {
            let now = frame as f64 * FRAME_SECONDS;
            for _ in 0..clock.advance(now) {
                tick(&mut state, &input, &mut scene, clock.step());
                // Clear one-shot inputs after processing
                input.start = false;
            }

            let events = presenter.present(&mut state, now, &mut cues, &mut hud);
            kills += events
                .iter()
                .filter(|e| matches!(e, GameEvent::EnemyKilled { .. }))
                .count() as u32;
            if state.phase == GamePhase::GameOver {
                break 'frames;
            }
        }

        log::info!(
            "Finished after {:.1}s: {} kills, {} live visuals",
            state.elapsed,
            kills,
            scene.live_count()
        );

        let snapshot = HudSnapshot::from_state(&state);
        match serde_json::to_string_pretty(&snapshot) {
            Ok(json) => println!("{}", json),
            Err(e) => log::error!("Failed to serialize HUD: {}", e),
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    native::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // Web builds drive the library from the host page
}
