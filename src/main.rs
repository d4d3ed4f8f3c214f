//! Wizard Siege entry point
//!
//! Headless runner: plays a seeded session for a fixed number of frames,
//! feeding events to the audio cue layer and printing the final stats.

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::path::PathBuf;

    use anyhow::{Context, Result};
    use clap::Parser;

    use wizard_siege::audio::{AudioManager, LogBackend};
    use wizard_siege::consts::SIM_HZ;
    use wizard_siege::sim::{GameState, TickInput, step};
    use wizard_siege::Settings;

    #[derive(Parser, Debug)]
    #[command(name = "wizard-siege")]
    #[command(about = "Run a headless Wizard Siege session and report the outcome")]
    struct Cli {
        /// RNG seed for the session
        #[arg(long, default_value_t = 1)]
        seed: u64,
        /// Frames to simulate (stops early on game over)
        #[arg(long, default_value_t = 60 * 60 * 5)]
        frames: u64,
        /// JSON settings file
        #[arg(long)]
        settings: Option<PathBuf>,
        /// Let the built-in demo player move and aim
        #[arg(long)]
        autopilot: bool,
        /// Print final stats as JSON instead of a summary line
        #[arg(long)]
        summary_json: bool,
    }

    pub fn run() -> Result<()> {
        env_logger::init();
        let cli = Cli::parse();

        let settings = match &cli.settings {
            Some(path) => Settings::load_from(path)
                .with_context(|| format!("loading settings from {}", path.display()))?,
            None => Settings::default(),
        };

        let mut state = GameState::with_settings(cli.seed, settings);
        let mut audio = AudioManager::new(LogBackend);
        let idle = TickInput::default();

        while state.frame < cli.frames && !state.is_over() {
            let input = if cli.autopilot {
                TickInput::autopilot(&state)
            } else {
                idle.clone()
            };
            step(&mut state, &input);
            audio.handle_events(&state.events);

            if state.frame % u64::from(SIM_HZ * 10) == 0 {
                let stats = state.stats();
                log::info!(
                    "t={}s level {} score {} kills {} health {}/{} monsters {}",
                    stats.frame / u64::from(SIM_HZ),
                    stats.level,
                    stats.score,
                    stats.kills,
                    stats.health,
                    stats.max_health,
                    stats.adversaries
                );
            }
        }

        let stats = state.stats();
        if cli.summary_json {
            println!("{}", serde_json::to_string_pretty(&stats)?);
        } else {
            let outcome = match stats.killed_by {
                Some(name) => format!("killed by {name}"),
                None if stats.game_over => "game over".to_string(),
                None => "survived".to_string(),
            };
            println!(
                "seed {}: {outcome} after {} frames, level {}, score {}, {} kills",
                cli.seed, stats.frame, stats.level, stats.score, stats.kills
            );
        }
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
    native::run()
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // Web hosts drive the library directly
}
