//! Light Trails headless demo
//!
//! Plays a full match between bots on an in-memory raster and prints the
//! standings. Set `RUST_LOG=info` (or `debug` for deaths) to follow along.

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use light_trails::sim::{
        Advance, Dimensions, KeyState, MatchEvent, PlayerManager, RandomSource, SimRng,
    };
    use light_trails::{Canvas, FpsMeter, MatchSettings};

    /// Safety valve for bots that circle forever
    const MAX_FRAMES_PER_ROUND: u32 = 20_000;
    const FRAME_MS: f64 = 1000.0 / 60.0;

    env_logger::init();
    log::info!("Light Trails (headless) starting...");

    let settings_json = std::env::args().nth(1).and_then(|path| {
        std::fs::read_to_string(&path)
            .map_err(|e| log::warn!("Could not read {path}: {e}"))
            .ok()
    });
    let settings = MatchSettings::load_or_default(settings_json.as_deref());

    let seed = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0);
    let rng = SimRng::new(seed);
    log::info!("Seed {}", rng.seed());

    let dims = Dimensions::new(900.0, 600.0, 200.0);
    let mut manager = PlayerManager::new(
        Canvas::new(900, 600),
        KeyState::new(),
        FpsMeter::new(),
        rng,
        dims,
    )
    .on_event(|event| {
        if let MatchEvent::PlayerDied { name } = event {
            println!("  {name} crashed");
        }
    });

    for name in ["Red", "Yellow", "Green", "Blue"] {
        manager.set_ready(name, true);
    }
    manager.init(settings);
    manager.start_round();

    let mut bot_rng = SimRng::new(seed ^ 0x5eed);
    let mut clock = 0.0;
    let mut round_frames = 0;

    loop {
        clock += FRAME_MS;
        manager.fps_source_mut().record(clock);

        // Bots hold a random turn key most frames
        let bindings: Vec<_> = manager
            .players()
            .iter()
            .map(|p| (p.identity().turn_positive, p.identity().turn_negative))
            .collect();
        let continue_key = manager.settings().continue_key;
        let input = manager.input_mut();
        input.clear();
        for (left, right) in bindings {
            let roll = bot_rng.next_f32();
            if roll < 0.3 {
                input.press(left);
            } else if roll < 0.6 {
                input.press(right);
            }
        }
        if !manager.is_running() && round_frames % 2 == 0 {
            manager.input_mut().press(continue_key);
        }

        match manager.animate() {
            Some(Advance::NextRound) => {
                println!("Round {} over", manager.round_count());
                manager.start_round();
                round_frames = 0;
            }
            Some(Advance::MatchFinished) => break,
            None => {}
        }

        round_frames += 1;
        if round_frames > MAX_FRAMES_PER_ROUND {
            log::warn!("Round ran for {MAX_FRAMES_PER_ROUND} frames, stopping");
            break;
        }
    }

    println!("\nFinal standings after {} rounds:", manager.round_count());
    for (rank, row) in manager.standings().iter().enumerate() {
        println!("  {}. {:<8} {}", rank + 1, row.name, row.score);
    }
    match light_trails::scoreboard::match_winner(manager.players()) {
        Some(winner) => println!("{winner} wins!"),
        None => println!("It's a tie!"),
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The simulation is driven by the host page on wasm
}
