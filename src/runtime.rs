// Fixed-rate teleop loop with input watchdog
// Note: a gamepad that stops publishing (driver station dropped, teleop crashed)
// must not leave the robot driving on its last stick position, so stale input
// is replaced by a controller at rest.

use std::time::{Duration, Instant};
use tokio::time::interval;
use tracing::{debug, info, warn};

use crate::config::{TeleopConfig, TOPIC_GAMEPAD1, TOPIC_GAMEPAD2, TOPIC_HEALTH, TOPIC_RT_DRIVE};
use crate::drive::Teleop;
use crate::gamepad::Gamepad;
use crate::messages::{DriveActuation, RuntimeHealth};

/// Latest snapshot from one controller and when it arrived
#[derive(Debug, Clone, Copy, Default)]
struct InputSlot {
    latest: Option<(Gamepad, Instant)>,
}

impl InputSlot {
    fn update(&mut self, pad: Gamepad, now: Instant) {
        self.latest = Some((pad, now));
    }

    /// The snapshot if still fresh
    fn fresh(&self, now: Instant, timeout: Duration) -> Option<Gamepad> {
        self.latest
            .filter(|(_, at)| now.saturating_duration_since(*at) <= timeout)
            .map(|(pad, _)| pad)
    }
}

pub struct Runtime {
    teleop: Teleop,
    input_timeout: Duration,
    gamepad1: InputSlot,
    gamepad2: InputSlot,
    health: RuntimeHealth,
}

impl Runtime {
    pub fn new(config: &TeleopConfig) -> Self {
        Self {
            teleop: Teleop::new(config.mixer, config.policy, config.speed_factor),
            input_timeout: config.input_timeout(),
            gamepad1: InputSlot::default(),
            gamepad2: InputSlot::default(),
            health: RuntimeHealth::InputStale, // Start stale until first input
        }
    }

    pub fn health(&self) -> RuntimeHealth {
        self.health
    }

    /// Record a gamepad-1 snapshot
    pub fn on_gamepad1(&mut self, pad: Gamepad, now: Instant) {
        debug!("Gamepad 1: {:?}", pad);
        self.gamepad1.update(pad, now);
    }

    /// Record a gamepad-2 snapshot
    pub fn on_gamepad2(&mut self, pad: Gamepad, now: Instant) {
        debug!("Gamepad 2: {:?}", pad);
        self.gamepad2.update(pad, now);
    }

    /// Compute actuation based on watchdog state
    pub fn compute_actuation(&mut self, now: Instant) -> DriveActuation {
        let pad1 = self.gamepad1.fresh(now, self.input_timeout);
        let pad2 = self.gamepad2.fresh(now, self.input_timeout);

        let health = if pad1.is_none() && pad2.is_none() {
            RuntimeHealth::InputStale
        } else {
            RuntimeHealth::Ok
        };
        if health == RuntimeHealth::InputStale && self.health != RuntimeHealth::InputStale {
            // Watchdog triggered - every controller counts as released
            warn!("Gamepad input stale, stopping robot");
        }
        self.health = health;

        let out = self
            .teleop
            .update(&pad1.unwrap_or_default(), &pad2.unwrap_or_default());
        DriveActuation::from(&out)
    }
}

pub async fn run(config: TeleopConfig) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    info!("Opening Zenoh session...");
    let session = zenoh::open(zenoh::Config::default()).await?;

    info!("Setting up publishers and subscribers...");
    let sub_gamepad1 = session.declare_subscriber(TOPIC_GAMEPAD1).await?;
    let sub_gamepad2 = session.declare_subscriber(TOPIC_GAMEPAD2).await?;
    let pub_actuation = session.declare_publisher(TOPIC_RT_DRIVE).await?;
    let pub_health = session.declare_publisher(TOPIC_HEALTH).await?;

    let mut runtime = Runtime::new(&config);
    let mut tick = interval(config.loop_period());

    info!(
        "Runtime started: {}Hz loop, {}ms input timeout, speed factor {}",
        config.loop_hz, config.input_timeout_ms, config.speed_factor
    );
    info!("Subscribed to: {}, {}", TOPIC_GAMEPAD1, TOPIC_GAMEPAD2);
    info!("Publishing to: {}, {}", TOPIC_RT_DRIVE, TOPIC_HEALTH);

    loop {
        tick.tick().await;

        // 1. Drain all pending snapshots (non-blocking), keep latest
        while let Ok(Some(sample)) = sub_gamepad1.try_recv() {
            let payload = sample.payload().to_bytes();
            match serde_json::from_slice::<Gamepad>(&payload) {
                Ok(pad) => runtime.on_gamepad1(pad, Instant::now()),
                Err(e) => warn!("Failed to parse gamepad 1 snapshot: {}", e),
            }
        }
        while let Ok(Some(sample)) = sub_gamepad2.try_recv() {
            let payload = sample.payload().to_bytes();
            match serde_json::from_slice::<Gamepad>(&payload) {
                Ok(pad) => runtime.on_gamepad2(pad, Instant::now()),
                Err(e) => warn!("Failed to parse gamepad 2 snapshot: {}", e),
            }
        }

        // 2. Compute actuation (includes watchdog logic)
        let actuation = runtime.compute_actuation(Instant::now());

        // 3. Publish actuation
        let actuation_json = serde_json::to_string(&actuation)?;
        pub_actuation.put(actuation_json).await?;

        // 4. Publish health
        let health_json = serde_json::to_string(&runtime.health)?;
        pub_health.put(health_json).await?;
    }
}
