use clap::Parser;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    // Setup logging (set RUST_LOG=info or debug)
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse().unwrap()))
        .init();

    let config = teleop_zenoh::config::TeleopConfig::parse();
    if let Err(e) = teleop_zenoh::runtime::run(config).await {
        eprintln!("Teleop error: {}", e);
        std::process::exit(1);
    }
}
