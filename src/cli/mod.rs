pub mod commands;
pub mod handlers;

pub use commands::{BuildArgs, CliArgs, Commands, CompileArgs, ProjectArgs};
pub use handlers::{handle_build, handle_compile};
