pub mod bot;
pub mod bridge;
pub mod configuration;
pub mod purchase;
pub mod server;
pub mod telegram;
pub mod telemetry;
pub mod traits;
