// Keyboard gamepad: WASD left stick, Z/X turn, Q/E bumpers, O override, R/F speed, Esc quit
//
// Publishes gamepad-1 snapshots (or gamepad-2 with `-- 2`) for the runtime.
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind},
    terminal::{disable_raw_mode, enable_raw_mode},
};
use ftc_teleop_runtime::config::{TOPIC_GAMEPAD1, TOPIC_GAMEPAD2};
use ftc_teleop_runtime::gamepad::Gamepad;
use std::time::{Duration, Instant};
use tracing::info;

const STICK_LEVELS: [f32; 3] = [0.3, 0.6, 1.0];
const INPUT_TIMEOUT_MS: u64 = 100; // Release the stick after this much time with no input

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    tracing_subscriber::fmt().with_env_filter("info").init();

    let topic = match std::env::args().nth(1).as_deref() {
        Some("2") => TOPIC_GAMEPAD2,
        _ => TOPIC_GAMEPAD1,
    };

    info!("Opening Zenoh session...");
    let session = zenoh::open(zenoh::Config::default()).await?;
    let publisher = session.declare_publisher(topic).await?;

    info!("Publishing to {}", topic);
    info!("Controls: WASD=stick, Z/X=turn, Q/E=bumpers, O=override, R/F=level, Esc=quit");
    info!("Stick level: LOW");

    enable_raw_mode()?;
    let result = run_gamepad(&publisher).await;
    disable_raw_mode()?;

    result
}

async fn run_gamepad(
    publisher: &zenoh::pubsub::Publisher<'_>,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let mut level_idx: usize = 0;

    // Persistent controller state
    let mut pad = Gamepad::at_rest();
    let mut last_movement_input = Instant::now();

    loop {
        // Poll for key with 20ms timeout (50Hz effective rate)
        if event::poll(Duration::from_millis(20))? {
            if let Event::Key(KeyEvent { code, kind, .. }) = event::read()? {
                let pressed = kind == KeyEventKind::Press || kind == KeyEventKind::Repeat;
                let level = STICK_LEVELS[level_idx];

                match code {
                    // Left stick, forward is negative Y
                    KeyCode::Char('w') if pressed => {
                        pad.left_stick_y = -level;
                        last_movement_input = Instant::now();
                    }
                    KeyCode::Char('s') if pressed => {
                        pad.left_stick_y = level;
                        last_movement_input = Instant::now();
                    }
                    KeyCode::Char('a') if pressed => {
                        pad.left_stick_x = -level;
                        last_movement_input = Instant::now();
                    }
                    KeyCode::Char('d') if pressed => {
                        pad.left_stick_x = level;
                        last_movement_input = Instant::now();
                    }

                    // Right stick X
                    KeyCode::Char('z') if pressed => {
                        pad.right_stick_x = -level;
                        last_movement_input = Instant::now();
                    }
                    KeyCode::Char('x') if pressed => {
                        pad.right_stick_x = level;
                        last_movement_input = Instant::now();
                    }

                    // Modifiers toggle
                    KeyCode::Char('q') if pressed => {
                        pad.left_bumper = !pad.left_bumper;
                        info!("Left bumper: {}", pad.left_bumper);
                    }
                    KeyCode::Char('e') if pressed => {
                        pad.right_bumper = !pad.right_bumper;
                        info!("Right bumper: {}", pad.right_bumper);
                    }
                    KeyCode::Char('o') if pressed => {
                        pad.y = !pad.y;
                        info!("Override (Y): {}", pad.y);
                    }

                    // Stick level
                    KeyCode::Char('r') if pressed => {
                        level_idx = (level_idx + 1).min(2);
                        print_level(level_idx);
                    }
                    KeyCode::Char('f') if pressed => {
                        level_idx = level_idx.saturating_sub(1);
                        print_level(level_idx);
                    }

                    // Quit
                    KeyCode::Esc if pressed => break,

                    _ => {}
                }
            }
        }

        // Release the sticks if no movement input for INPUT_TIMEOUT_MS
        if last_movement_input.elapsed() > Duration::from_millis(INPUT_TIMEOUT_MS) {
            pad.left_stick_x = 0.0;
            pad.left_stick_y = 0.0;
            pad.right_stick_x = 0.0;
        }

        // Always publish at ~50Hz
        publisher.put(serde_json::to_string(&pad)?).await?;
    }

    Ok(())
}

fn print_level(idx: usize) {
    let label = ["LOW", "MED", "HIGH"][idx];
    info!("Stick level: {}", label);
}
