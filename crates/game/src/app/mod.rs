mod bootstrap;
pub mod config;
pub mod gameplay;
mod loop_runner;

pub use bootstrap::{build_app, AppWiring};
pub use loop_runner::run;
