// Subscribe to the command topic and print each velocity command.
// Useful for checking teleop output without a robot attached.
use tracing::{info, warn};

use teleop_zenoh::config::TOPIC_CMD_VEL;
use teleop_zenoh::messages::Twist;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    tracing_subscriber::fmt().with_env_filter("info").init();

    info!("Opening Zenoh session...");
    let session = zenoh::open(zenoh::Config::default()).await?;
    let subscriber = session.declare_subscriber(TOPIC_CMD_VEL).await?;
    info!("Listening on: {}", TOPIC_CMD_VEL);

    loop {
        let sample = subscriber.recv_async().await?;
        let payload = sample.payload().to_bytes();
        match serde_json::from_slice::<Twist>(&payload) {
            Ok(twist) => info!(
                "linear ({:.3}, {:.3}, {:.3}) angular {:.3}",
                twist.linear.x, twist.linear.y, twist.linear.z, twist.angular.z
            ),
            Err(e) => warn!("Failed to parse command: {}", e),
        }
    }
}
