pub mod configuration;
pub use configuration::*;
