//! Invaders headless runner
//!
//! Drives the simulation at a fixed 60 Hz with a scripted player: one
//! pointer holds the ship and sweeps it across the screen while a second
//! pointer taps to fire. Events are routed to a logging presenter.
//!
//! Usage: `invaders [seed] [frames] [config.json]`

use std::process::ExitCode;

use glam::Vec2;

use invaders::audio::LogAudioBackend;
use invaders::consts::FRAME_DT;
use invaders::sim::{EntityId, EntityKind, GameState, Presenter};
use invaders::{AudioManager, SimConfig, SoundEffect};

const HOLD_POINTER: u64 = 1;
const FIRE_POINTER: u64 = 2;
/// Frames between taps of the firing pointer
const FIRE_INTERVAL: u64 = 12;
/// Frames for one full sweep of the ship across the screen
const SWEEP_FRAMES: u64 = 240;

/// Counts visuals and forwards sounds to the audio gate
struct LogPresenter {
    audio: AudioManager<LogAudioBackend>,
    visuals: usize,
    score: u64,
    best: u64,
}

impl Presenter for LogPresenter {
    fn spawn_visual(&mut self, id: EntityId, kind: EntityKind, pos: Vec2) {
        self.visuals += 1;
        log::trace!("spawn {} {:?} at ({:.1}, {:.1})", kind.label(), id, pos.x, pos.y);
    }

    fn remove_visual(&mut self, id: EntityId) {
        self.visuals = self.visuals.saturating_sub(1);
        log::trace!("remove {:?}", id);
    }

    fn play_sound(&mut self, effect: SoundEffect) {
        self.audio.play(effect);
    }

    fn score_changed(&mut self, score: u64) {
        self.score = score;
    }

    fn game_over(&mut self, final_score: u64) {
        self.best = self.best.max(final_score);
        log::info!("GAME OVER - final score {}", final_score);
    }
}

fn load_config(path: Option<&str>) -> Result<SimConfig, String> {
    let Some(path) = path else {
        return Ok(SimConfig::default());
    };
    let json = std::fs::read_to_string(path).map_err(|e| format!("{}: {}", path, e))?;
    SimConfig::from_json(&json).map_err(|e| format!("{}: {}", path, e))
}

fn main() -> ExitCode {
    #[cfg(not(target_arch = "wasm32"))]
    env_logger::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let seed = args.first().and_then(|s| s.parse().ok()).unwrap_or(42);
    let frames: u64 = args.get(1).and_then(|s| s.parse().ok()).unwrap_or(60 * 120);

    let config = match load_config(args.get(2).map(String::as_str)) {
        Ok(config) => config.with_seed(seed),
        Err(e) => {
            log::error!("Failed to load config: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let mut state = match GameState::new(config) {
        Ok(state) => state,
        Err(e) => {
            log::error!("Invalid config: {}", e);
            return ExitCode::FAILURE;
        }
    };
    log::info!("Invaders (headless) starting with seed {}", seed);

    let mut presenter = LogPresenter {
        audio: AudioManager::new(Some(LogAudioBackend::default())),
        visuals: 0,
        score: 0,
        best: 0,
    };
    let half_width = state.config.world_width / 2.0;
    let ship_y = state.config.ship_y();

    for frame in 0..frames {
        // Triangle wave across the screen
        let phase = (frame % SWEEP_FRAMES) as f32 / SWEEP_FRAMES as f32;
        let sweep = 1.0 - (2.0 * phase - 1.0).abs() * 2.0;
        let target = Vec2::new(sweep * half_width, ship_y);

        if state.pointer.holder.is_none() {
            state.on_pointer_down(HOLD_POINTER, target);
        } else {
            state.on_pointer_move(HOLD_POINTER, target);
        }
        if frame % FIRE_INTERVAL == 0 {
            state.on_pointer_down(FIRE_POINTER, target);
            state.on_pointer_up(FIRE_POINTER);
        }

        state.tick(FRAME_DT);
        state.present(&mut presenter);
    }

    let sounds = presenter.audio.backend().map_or(0, |b| b.played);
    log::info!(
        "Finished {} frames: score {}, best {}, {} rounds lost, {} visuals live, {} sounds",
        frames,
        presenter.score,
        presenter.best,
        state.games_lost,
        presenter.visuals,
        sounds
    );
    ExitCode::SUCCESS
}
