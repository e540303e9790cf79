#![forbid(unsafe_code)]

pub mod error;
pub mod expiry;
pub mod model;
pub mod progress;
pub mod search;
pub mod time;

pub use time::Clock;
