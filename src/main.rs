//! Snowball's Chance headless runner
//!
//! Drives one scripted run through the simulation core with a simple
//! autopilot and logs the outcome. Usage:
//!
//! ```text
//! snowballs-chance [tuning.json] [settings.json]
//! ```

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use snowballs_chance::audio::{AudioManager, LogBackend};
    use snowballs_chance::platform::KeyRepeatFilter;
    use snowballs_chance::sim::{FrameDriver, FrameReport, GamePhase, ObstacleKind};
    use snowballs_chance::ui::overlay_for;
    use snowballs_chance::{Settings, Tuning};

    /// Simulated display refresh
    const FRAME_MS: f64 = 1000.0 / 60.0;
    const MAX_FRAMES: u32 = 60 * 120;
    /// How far ahead the autopilot looks
    const LOOKAHEAD: f32 = 80.0;

    env_logger::init();
    log::info!("Snowball's Chance (headless) starting...");

    let mut args = std::env::args().skip(1);
    let tuning = args.next().map(|path| Tuning::load_from(path)).unwrap_or_default();
    let settings = args.next().map(|path| Settings::load_from(path)).unwrap_or_default();

    let mut driver = FrameDriver::new(tuning);
    let mut audio = AudioManager::new(LogBackend, &settings);
    let mut keys = KeyRepeatFilter::new();
    let mut steering: Option<&'static str> = None;

    // Which key moves the player away from the nearest hazard ahead
    fn dodge_key(report: &FrameReport) -> Option<&'static str> {
        let player = report.player_pos;
        report
            .obstacles
            .iter()
            .filter(|o| o.kind == ObstacleKind::Hazard)
            .filter(|o| o.pos.z < 0.0 && o.pos.z > -LOOKAHEAD)
            .filter(|o| (o.pos.x - player.x).abs() < o.radius + report.player_radius + 5.0)
            .max_by(|a, b| a.pos.z.total_cmp(&b.pos.z))
            .map(|o| if o.pos.x > player.x { "ArrowLeft" } else { "ArrowRight" })
    }

    let mut now = 0.0;
    driver.notify_load_progress(1.0);
    driver.notify_assets_loaded();
    let mut last_phase = driver.phase();

    for _ in 0..MAX_FRAMES {
        let mut report = driver.tick(now);
        settings.apply_motion(&mut report.obstacles);
        audio.dispatch(&report.events);

        if report.phase != last_phase {
            if let Some(overlay) = overlay_for(report.phase, report.load_progress, true, settings.show_intro) {
                log::info!("Overlay: {} / {}", overlay.header, overlay.prompt);
            }
            last_phase = report.phase;
        }

        match report.phase {
            GamePhase::Idle => {
                if let Some(event) = keys.key_down(" ") {
                    driver.handle_input(event);
                }
                if let Some(event) = keys.key_up(" ") {
                    driver.handle_input(event);
                }
            }
            GamePhase::Running => {
                let wanted = dodge_key(&report);
                if wanted != steering {
                    if let Some(old) = steering
                        && let Some(event) = keys.key_up(old)
                    {
                        driver.handle_input(event);
                    }
                    if let Some(new) = wanted
                        && let Some(event) = keys.key_down(new)
                    {
                        driver.handle_input(event);
                    }
                    steering = wanted;
                }
            }
            GamePhase::Won | GamePhase::Lost => break,
            GamePhase::Loading => {}
        }

        now += FRAME_MS;
    }

    for event in keys.release_all() {
        driver.handle_input(event);
    }
    driver.halt();

    let state = driver.state();
    let summary = serde_json::json!({
        "phase": state.phase,
        "elapsed_ms": now,
        "progress": state.field.progress(),
        "collided_with": state.last_collision.obstacle_id,
    });
    println!("{}", summary);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // Hosts embed the library and drive `FrameDriver` from requestAnimationFrame
}
