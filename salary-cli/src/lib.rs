pub mod app;
pub mod cli;
pub mod logging;
pub mod render;
pub mod utils;

pub use app::{load_config, run};
pub use cli::{Cli, Command};
