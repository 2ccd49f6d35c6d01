use scanliner::prelude::*;

fn run() -> Result<(), String> {
    let mut window = Window::new("Scanliner")?;
    let config = EngineConfig::with_size(window.width(), window.height());
    let mut engine = Engine::new(config);

    match std::env::args().nth(1) {
        Some(path) => {
            engine
                .load_mesh(&path)
                .map_err(|e| format!("failed to load {}: {}", path, e))?;
        }
        None => log::info!("Using built-in cube"),
    }

    let mut limiter = FrameLimiter::new(config.frame_target_time());
    let mut is_running = true;

    while is_running {
        is_running = engine.handle_event(window.poll_event());

        limiter.wait();

        engine.update().map_err(|e| e.to_string())?;
        engine.render();

        window.present(engine.frame_buffer())?;
    }

    log::info!("Shutting down");
    Ok(())
}

fn main() -> Result<(), String> {
    env_logger::init();

    run().inspect_err(|e| log::error!("{}", e))
}
