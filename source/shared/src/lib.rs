pub mod bridge;
pub mod error;
pub mod interface;
pub mod log;
