// Startup parameters: speeds, limits, rates, topic

use clap::Parser;
use std::time::Duration;

/// Default Zenoh key expression for outbound velocity commands
pub const TOPIC_CMD_VEL: &str = "cmd_vel";

/// Poll interval used to check for shutdown when no key timeout is configured
pub const IDLE_POLL: Duration = Duration::from_millis(100);

/// Keyboard teleoperation publishing velocity commands over Zenoh
#[derive(Parser, Debug, Clone)]
#[command(name = "teleop-zenoh", version)]
pub struct TeleopConfig {
    /// Initial linear speed
    #[arg(long, default_value_t = 0.5)]
    pub speed: f64,

    /// Initial angular speed
    #[arg(long, default_value_t = 1.0)]
    pub turn: f64,

    /// Upper limit for linear speed
    #[arg(long, default_value_t = 1000.0)]
    pub speed_limit: f64,

    /// Upper limit for angular speed
    #[arg(long, default_value_t = 1000.0)]
    pub turn_limit: f64,

    /// Publish rate in Hz; 0 publishes only when the state changes
    #[arg(long, default_value_t = 0.0)]
    pub repeat_rate: f64,

    /// Key read timeout in seconds; 0 blocks until a key arrives
    #[arg(long, default_value_t = 0.5)]
    pub key_timeout: f64,

    /// Wrap commands in a timestamp/frame-id header
    #[arg(long)]
    pub stamped: bool,

    /// Frame id for the stamped header
    #[arg(long, default_value = "")]
    pub frame_id: String,

    /// Zenoh key expression to publish commands on
    #[arg(long, default_value = TOPIC_CMD_VEL)]
    pub topic: String,
}

impl TeleopConfig {
    /// Key read timeout, or `None` to block indefinitely
    pub fn read_timeout(&self) -> Option<Duration> {
        (self.key_timeout > 0.0).then(|| Duration::from_secs_f64(self.key_timeout))
    }
}
