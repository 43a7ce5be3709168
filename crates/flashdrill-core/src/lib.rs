//! flashdrill-core — Session state machine, CSV loading and mistake logging.
//!
//! This crate defines the data model, the trainer state machine and the
//! display payloads that the flashdrill front-end renders.

pub mod config;
pub mod error;
pub mod mistakes;
pub mod model;
pub mod parser;
pub mod render;
pub mod report;
pub mod session;

pub use error::TrainerError;
pub use session::{Phase, Session, Trainer, Transition};
