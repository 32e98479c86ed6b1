pub mod purchase;
pub use purchase::*;
