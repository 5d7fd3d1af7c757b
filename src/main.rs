//! Polyfighter headless driver
//!
//! Runs a scripted session against the recording renderer and logs what the
//! simulation did. Usage: `polyfighter [settings.json] [frames]`.

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(err) = native::run() {
        log::error!("{err}");
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The library is driven by the embedding page on the web
}

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use glam::Vec2;

    use polyfighter::renderer::DrawList;
    use polyfighter::sim::{Control, FrameInput, InputState, Session, frame};
    use polyfighter::{Settings, SimError};

    /// 60 Hz display refresh
    const FRAME_MS: f64 = 1000.0 / 60.0;
    const DEFAULT_FRAMES: u64 = 1200;
    /// Distance of the scripted pointer from the viewport center
    const POINTER_ORBIT: f32 = 150.0;

    pub fn run() -> Result<(), SimError> {
        let mut args = std::env::args().skip(1);
        let settings = match args.next() {
            Some(path) => Settings::load(path)?,
            None => Settings::default(),
        };
        let frames = match args.next() {
            Some(n) => n.parse().unwrap_or_else(|_| {
                log::warn!("Ignoring invalid frame count `{n}`, using {DEFAULT_FRAMES}");
                DEFAULT_FRAMES
            }),
            None => DEFAULT_FRAMES,
        };

        let mut session = Session::new(settings);
        let mut world = DrawList::new();
        let mut screen = DrawList::new();
        let mut fired = 0;
        let mut splits = 0;
        let mut evicted = 0;

        for i in 0..frames {
            let time = i as f64 * FRAME_MS;
            let input = scripted_input(&session, i, time);
            let stats = frame(&mut session, &input, time, &mut world, &mut screen);
            fired += stats.fired;
            splits += stats.split;
            evicted += stats.evicted;

            if i % 60 == 0 {
                log::info!(
                    "t={:>6.0}ms pos=({:.0}, {:.0}) live={} emp={:?} draw: world={} screen={}",
                    time,
                    session.player.pos.x,
                    session.player.pos.y,
                    session.projectiles.len(),
                    session.emp().map(|e| e.stage()),
                    world.len(),
                    screen.len()
                );
            }
        }

        log::info!(
            "Ran {} frames: fired={} splits={} evicted={} live={}",
            frames,
            fired,
            splits,
            evicted,
            session.projectiles.len()
        );
        Ok(())
    }

    /// Pointer circling the avatar, shoot always held, thrust every other two seconds
    fn scripted_input(session: &Session, index: u64, time: f64) -> FrameInput {
        let mut keys = InputState::holding(&[Control::Shoot]);
        if (index / 120) % 2 == 0 {
            keys.press(Control::Up);
        }
        if (index / 300) % 2 == 1 {
            keys.press(Control::Left);
        }
        let angle = (time / 500.0) as f32;
        FrameInput {
            keys,
            pointer: POINTER_ORBIT * Vec2::new(angle.cos(), angle.sin()),
            // The viewport follows the anchor exactly
            viewport_center: session.camera_anchor,
        }
    }
}
