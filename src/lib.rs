// Keyboard teleoperation publishing velocity commands over Zenoh.
//
// Two cooperating pieces: a key interpreter fed by raw terminal input,
// and a rate-limited publish loop that turns the latest motion state
// into outbound Twist commands.

pub mod config;
pub mod error;
pub mod input;
pub mod keys;
pub mod messages;
pub mod publisher;
pub mod runtime;
