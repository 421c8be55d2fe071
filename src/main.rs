//! Flap Engine entry point
//!
//! Native builds run a headless autopilot round and log how it went. The
//! browser build is driven from JS through `flap_engine::web::WebGame`.

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use flap_engine::audio::NullAudio;
    use flap_engine::consts::FRAME_DT;
    use flap_engine::persistence::MemoryStorage;
    use flap_engine::platform::{Intent, Session};
    use flap_engine::sim::{Difficulty, GameEvent, GamePhase};
    use flap_engine::tuning::Tuning;

    /// Two minutes at 60 Hz
    const MAX_FRAMES: u32 = 7_200;

    struct Options {
        seed: u64,
        difficulty: Difficulty,
        frames: u32,
    }

    fn parse_args() -> Options {
        let mut options = Options {
            seed: 1,
            difficulty: Difficulty::default(),
            frames: MAX_FRAMES,
        };
        let args: Vec<String> = std::env::args().skip(1).collect();
        let mut iter = args.iter();
        while let Some(arg) = iter.next() {
            match arg.as_str() {
                "--seed" => match iter.next().map(|v| v.parse()) {
                    Some(Ok(seed)) => options.seed = seed,
                    _ => log::warn!("--seed needs an integer"),
                },
                "--difficulty" => match iter.next().and_then(|v| Difficulty::from_key(v)) {
                    Some(d) => options.difficulty = d,
                    None => log::warn!("--difficulty needs easy, medium or hard"),
                },
                "--frames" => match iter.next().map(|v| v.parse()) {
                    Some(Ok(frames)) => options.frames = frames,
                    _ => log::warn!("--frames needs an integer"),
                },
                other => log::warn!("Ignoring unknown argument {:?}", other),
            }
        }
        options
    }

    pub fn run() {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

        let options = parse_args();
        let mut session = Session::new(options.seed, Tuning::default(), MemoryStorage::new(), NullAudio);
        session.set_autoplay(true);
        session.push(Intent::SelectDifficulty(options.difficulty));
        session.push(Intent::Start);

        let frame_ms = f64::from(FRAME_DT) * 1000.0;
        let mut frames = 0;
        while frames < options.frames {
            session.frame(f64::from(frames) * frame_ms);
            frames += 1;

            for event in session.last_events() {
                match event {
                    GameEvent::Milestone { threshold } => log::info!("Milestone {}", threshold),
                    GameEvent::Collision { kind } => log::info!("Collision: {:?}", kind),
                    _ => {}
                }
            }
            if session.state().phase == GamePhase::GameOver {
                break;
            }
        }

        let state = session.state();
        log::info!(
            "Finished after {} frames ({:.1}s simulated): score {}, high score {}, phase {}",
            frames,
            state.round_time,
            state.score.current,
            state.score.high,
            state.phase.as_str()
        );
        session.dispose();
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    headless::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // Entry is `flap_engine::web::init` via wasm-bindgen
}
