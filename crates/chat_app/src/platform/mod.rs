mod app;
mod cli;
mod logging;
mod preferences;
mod ui;

pub use app::run_app;
pub use cli::Args;
