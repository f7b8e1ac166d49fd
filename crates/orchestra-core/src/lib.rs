pub mod branch;
pub mod config;
pub mod error;
pub mod io;
pub mod job;
pub mod paths;
pub mod plan;
pub mod pr;
pub mod role;
pub mod slash;
pub mod slug;
pub mod workflow;

pub use error::{OrchestraError, Result};
