//! Pizza Boi entry point
//!
//! The native binary runs a short scripted session headless and logs what
//! happened. Pass a tuning JSON path as the first argument to override the
//! physics constants.

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use pizza_boi::consts::*;
    use pizza_boi::renderer::{PlayerPose, Renderer};
    use pizza_boi::sim::{Clock, FrameTime, InputSource, PizzaKind, TickInput, TileKind};

    /// Walks right, hopping and throwing on a fixed pattern
    pub struct Script {
        pub frame: u32,
        pub length: u32,
    }

    impl InputSource for Script {
        fn poll(&mut self) -> TickInput {
            self.frame += 1;
            let beat = self.frame % 60;
            TickInput {
                right: true,
                up: beat == 0,
                throw: beat == 30,
                down: (45..50).contains(&beat),
                quit: self.frame > self.length,
                ..Default::default()
            }
        }
    }

    /// Advances exactly one simulation step per frame
    #[derive(Default)]
    pub struct FixedClock {
        now: f64,
    }

    impl Clock for FixedClock {
        fn advance(&mut self) -> FrameTime {
            self.now += SIM_DT as f64;
            FrameTime {
                dt: SIM_DT,
                now: self.now,
            }
        }
    }

    /// Counts draw requests instead of drawing
    #[derive(Debug, Default)]
    pub struct DrawStats {
        pub tiles: u64,
        pub pizzas: u64,
        pub airborne_frames: u64,
    }

    impl Renderer for DrawStats {
        fn draw_tile(&mut self, _kind: TileKind, _left: f32, _top: f32) {
            self.tiles += 1;
        }

        fn draw_pizza(&mut self, _kind: PizzaKind, _left: f32, _top: f32) {
            self.pizzas += 1;
        }

        fn draw_player(&mut self, pose: PlayerPose, _left: f32, _top: f32) {
            if pose.airborne {
                self.airborne_frames += 1;
            }
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use pizza_boi::Tuning;
    use pizza_boi::sim::{GameState, Level, run};

    env_logger::init();
    log::info!("Pizza Boi (native) starting...");

    let tuning = match std::env::args().nth(1) {
        Some(path) => Tuning::load(path),
        None => Tuning::default(),
    };

    let mut state = match GameState::with_tuning(tuning, Level::Classic) {
        Ok(state) => state,
        Err(err) => {
            log::error!("Failed to build level: {}", err);
            std::process::exit(1);
        }
    };

    let mut input = headless::Script {
        frame: 0,
        length: 600,
    };
    let mut clock = headless::FixedClock::default();
    let mut stats = headless::DrawStats::default();

    let frames = run(&mut state, &mut input, &mut clock, &mut stats);

    log::info!(
        "Ran {} frames: player at ({:.1}, {:.1}), {} resets, {} tiles destroyed",
        frames,
        state.player.pos.x,
        state.player.pos.y,
        state.resets,
        state.tiles_destroyed
    );
    log::debug!("Draw stats: {:?}", stats);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // No browser front end; the library is the product on wasm
}
