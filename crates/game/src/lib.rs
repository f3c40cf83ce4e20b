pub mod app;

pub use app::{build_app, run, AppWiring};
