pub mod client;
pub mod error;

pub use client::{OutletClient, Routing};
pub use error::ClientError;
