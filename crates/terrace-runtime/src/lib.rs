//! Cooperative streaming scheduler and the engine command surface.
#![forbid(unsafe_code)]

mod engine;
mod job;
mod mutate;
mod scheduler;
mod stream;

pub use engine::{Engine, LoadOutcome};
pub use job::Job;
pub use scheduler::{Scheduler, Step};
