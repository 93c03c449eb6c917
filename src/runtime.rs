// Session wiring and shutdown sequencing
//
// One startup path: parse config -> open Zenoh session -> declare
// publisher -> seed state -> raw mode -> reader thread + publish loop.
// Shutdown always runs the other way: reader exits, loop emits its final
// zero command, raw mode is restored.

use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use std::sync::Arc;
use tokio::task;
use tracing::info;

use crate::config::TeleopConfig;
use crate::error::TeleopError;
use crate::input;
use crate::keys::{self, HELP, Interpreted, KeyBindings, LimitNotifier, SpeedLimits};
use crate::messages::MotionState;
use crate::publisher::{PublishLoop, ZenohSink};

pub async fn run(config: TeleopConfig) -> Result<(), TeleopError> {
    info!("Opening Zenoh session...");
    let session = zenoh::open(zenoh::Config::default()).await?;
    let publisher = session.declare_publisher(config.topic.clone()).await?;
    info!("Publishing to: {}", config.topic);

    let sink = ZenohSink::new(publisher, config.stamped, config.frame_id.clone());
    let publish = Arc::new(PublishLoop::new(config.repeat_rate));
    publish.update(MotionState {
        speed: config.speed,
        turn: config.turn,
        ..MotionState::default()
    });

    println!("{HELP}");
    println!("{}", keys::vels(config.speed, config.turn));

    enable_raw_mode()?;
    let result = teleop(&config, &publish, &sink).await;
    disable_raw_mode()?;
    result
}

async fn teleop(
    config: &TeleopConfig,
    publish: &Arc<PublishLoop>,
    sink: &ZenohSink,
) -> Result<(), TeleopError> {
    let reader = {
        let config = config.clone();
        let publish = Arc::clone(publish);
        task::spawn_blocking(move || key_loop(&config, &publish))
    };

    let published = publish.run(sink).await;
    // A dead transport also ends the key reader
    publish.stop();
    let read = reader.await?;
    published.and(read)
}

fn key_loop(config: &TeleopConfig, publish: &PublishLoop) -> Result<(), TeleopError> {
    let result = read_keys(config, publish);
    // Runs even when the terminal read failed: the loop still owes the
    // robot a final zero command.
    publish.stop();
    result
}

fn read_keys(config: &TeleopConfig, publish: &PublishLoop) -> Result<(), TeleopError> {
    let bindings = KeyBindings::default();
    let limits = SpeedLimits {
        speed: config.speed_limit,
        turn: config.turn_limit,
    };
    let mut notifier = LimitNotifier::default();
    let timeout = config.read_timeout();
    let mut state = MotionState {
        speed: config.speed,
        turn: config.turn,
        ..MotionState::default()
    };
    let mut status: u8 = 0;

    loop {
        if publish.is_done() {
            return Ok(());
        }

        let Some(token) = input::next_token(timeout)? else {
            continue;
        };

        match keys::interpret(&bindings, token, state, &limits) {
            Interpreted::Update(next) => {
                state = next;
                publish.update(state);
            }
            Interpreted::Rescale(next) => {
                state = next;
                let report = notifier.observe(&state, &limits);
                if report.speed {
                    info!("linear speed limit reached");
                }
                if report.turn {
                    info!("angular speed limit reached");
                }
                info!("{}", keys::vels(state.speed, state.turn));
                if status == 14 {
                    info!("{}", HELP);
                }
                status = (status + 1) % 15;
                publish.update(state);
            }
            Interpreted::Idle => {}
            Interpreted::Quit => return Ok(()),
        }
    }
}
