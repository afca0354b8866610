//! Gap Glider entry point
//!
//! The real game runs inside a host engine (see `web` for the browser
//! bindings). The native binary is a headless demo: a tiny stand-in
//! host with just enough physics to drive the controller end to end -
//! Euler gravity, box overlap for contacts, and an autopilot on the
//! button - so a full crash/restart cycle can be watched from a log.

#[cfg(not(target_arch = "wasm32"))]
mod demo {
    use std::collections::HashMap;

    use glam::Vec2;

    use gap_glider::consts::*;
    use gap_glider::persistence::MemoryStore;
    use gap_glider::sim::{BodyTag, ContactBody, GameEvent, PipePlacement};
    use gap_glider::{Controller, WorldGeom};

    /// Demo-only unit scales: the controller's gravity/impulse values
    /// are host-physics units, the demo maps them to pixels
    const GRAVITY_PIXELS_PER_UNIT: f32 = 150.0;
    const IMPULSE_PIXELS_PER_UNIT: f32 = 30.0;
    /// Autopilot gives up after this much flight time so every life
    /// ends in a crash and the demo terminates
    const AUTOPILOT_STAMINA_SECS: f32 = 25.0;

    /// Host-side mirror of one pipe column
    struct HostPipe {
        placement: PipePlacement,
        x: f32,
        scored: bool,
        gem_taken: bool,
    }

    /// Minimal stand-in for the host engine
    struct DemoHost {
        geom: WorldGeom,
        ground_h: f32,
        bird_pos: Vec2,
        bird_vel: Vec2,
        scroll_rate: f32,
        pipes: HashMap<u32, HostPipe>,
    }

    impl DemoHost {
        fn new(geom: WorldGeom) -> Self {
            Self {
                geom,
                ground_h: 56.0,
                bird_pos: geom.bird_start(),
                bird_vel: Vec2::ZERO,
                scroll_rate: 1.0,
                pipes: HashMap::new(),
            }
        }

        fn bird_body(&self) -> ContactBody {
            ContactBody::new(BodyTag::Bird, self.bird_pos, self.bird_vel)
        }

        /// Apply one event batch the way a real host would
        fn apply(&mut self, events: &[GameEvent]) {
            for event in events {
                match event {
                    GameEvent::PipeSpawned { placement } => {
                        self.pipes.insert(
                            placement.id,
                            HostPipe {
                                x: placement.x,
                                placement: placement.clone(),
                                scored: false,
                                gem_taken: false,
                            },
                        );
                    }
                    GameEvent::PipeRetired { id } => {
                        self.pipes.remove(id);
                    }
                    GameEvent::PipesCleared => self.pipes.clear(),
                    GameEvent::ScrollRateChanged { rate } => self.scroll_rate = *rate,
                    GameEvent::SetBirdVelocity { vel } => self.bird_vel = *vel,
                    GameEvent::BirdImpulse { impulse } => {
                        self.bird_vel += *impulse * IMPULSE_PIXELS_PER_UNIT;
                    }
                    GameEvent::BirdReset { pos } => {
                        self.bird_pos = *pos;
                        self.bird_vel = Vec2::ZERO;
                    }
                    GameEvent::BirdRoll { angle, duration } => {
                        log::info!("terminal roll: {angle:.2} rad over {duration}s");
                    }
                    GameEvent::ScoreChanged { score } => log::info!("label -> Score:{score}"),
                    GameEvent::BestScoreChanged { best } => {
                        log::info!("label -> Best Score:{best}")
                    }
                    GameEvent::SetBirdCollisionMask { .. }
                    | GameEvent::RemoveContactBody { .. } => {}
                }
            }
        }

        /// Integrate bird and pipe motion by one timestep
        fn step_physics(&mut self, dt: f32) {
            self.bird_vel.y += WORLD_GRAVITY.1 * GRAVITY_PIXELS_PER_UNIT * dt;
            self.bird_pos += self.bird_vel * dt;
            let step = self.geom.scroll_speed() * dt * self.scroll_rate;
            for pipe in self.pipes.values_mut() {
                pipe.x -= step;
            }
        }

        /// First contact pair the bird currently produces, if any
        fn detect_contact(&mut self) -> Option<(ContactBody, ContactBody)> {
            let bird = self.bird_body();
            let half_bird = self.geom.bird_size / 2.0;

            if self.bird_pos.y - half_bird.y <= self.ground_h {
                let pos = Vec2::new(self.bird_pos.x, self.ground_h / 2.0);
                return Some((bird, ContactBody::still(BodyTag::Ground, pos)));
            }

            for pipe in self.pipes.values_mut() {
                let anchor = Vec2::new(pipe.x, 0.0);
                for spec in [&pipe.placement.lower, &pipe.placement.upper] {
                    if overlaps(self.bird_pos, half_bird, anchor + spec.offset, spec.size / 2.0) {
                        return Some((bird, ContactBody::still(spec.tag, anchor + spec.offset)));
                    }
                }
                if let Some(gem) = &pipe.placement.gem {
                    if !pipe.gem_taken
                        && overlaps(self.bird_pos, half_bird, anchor + gem.offset, gem.size / 2.0)
                    {
                        pipe.gem_taken = true;
                        return Some((bird, ContactBody::still(BodyTag::Gem, anchor + gem.offset)));
                    }
                }
                let gate = &pipe.placement.gate;
                if !pipe.scored
                    && overlaps(self.bird_pos, half_bird, anchor + gate.offset, gate.size / 2.0)
                {
                    pipe.scored = true;
                    return Some((bird, ContactBody::still(BodyTag::ScoreGate, anchor + gate.offset)));
                }
            }
            None
        }

        /// Flap whenever the bird sinks below the next gap center
        fn autopilot_wants_flap(&self) -> bool {
            let target = self
                .pipes
                .values()
                .filter(|p| p.x + self.geom.pipe_w >= self.bird_pos.x)
                .min_by(|a, b| a.x.total_cmp(&b.x))
                .map(|p| p.placement.gap_center)
                .unwrap_or(self.geom.screen.y * 0.5);
            self.bird_pos.y < target && self.bird_vel.y <= 0.0
        }
    }

    fn overlaps(a_center: Vec2, a_half: Vec2, b_center: Vec2, b_half: Vec2) -> bool {
        (a_center.x - b_center.x).abs() <= a_half.x + b_half.x
            && (a_center.y - b_center.y).abs() <= a_half.y + b_half.y
    }

    pub fn run() {
        let geom = WorldGeom::new(Vec2::new(375.0, 667.0), 50.0, Vec2::new(34.0, 24.0));
        let mut controller = Controller::new(0xC0FFEE, geom, Box::new(MemoryStore::new()));
        let mut host = DemoHost::new(geom);

        let lives = 2;
        for life in 1..=lives {
            log::info!("--- life {life} ---");
            let mut flight_secs = 0.0f32;

            // Run until the crash roll has finished
            while !controller.state.phase.at_rest() {
                if controller.state.phase.is_running() {
                    flight_secs += SIM_DT;
                    if flight_secs < AUTOPILOT_STAMINA_SECS && host.autopilot_wants_flap() {
                        let events = controller.on_primary_input();
                        host.apply(&events);
                    }
                }

                host.step_physics(SIM_DT);
                if let Some((bird, other)) = host.detect_contact() {
                    let events = controller.on_contact(&bird, &other);
                    host.apply(&events);
                }

                let events = controller.on_tick(SIM_DT);
                host.apply(&events);
            }

            log::info!(
                "life {life} over: {} / {}",
                controller.score_label(),
                controller.best_label()
            );

            if life < lives {
                // The same button restarts once the bird is at rest
                let events = controller.on_primary_input();
                host.apply(&events);
            }
        }

        println!(
            "demo finished: {} | {}",
            controller.score_label(),
            controller.best_label()
        );
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Gap Glider headless demo starting...");
    demo::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The wasm surface is the `web` module; this is just to satisfy
    // the compiler for the bin target.
}
