use dockter::cli::commands::{CliArgs, Commands};
use dockter::cli::handlers::{handle_build, handle_compile};
use dockter::util::logging::{init_logging, LoggingConfig};
use dockter::{DockterConfig, VERSION};

use clap::Parser;
use tracing::debug;

#[tokio::main]
async fn main() {
    let args = CliArgs::parse();
    init_logging(LoggingConfig::from_flags(
        args.log_level.as_deref(),
        args.verbose,
        args.quiet,
        &DockterConfig::default(),
    ));

    debug!("dockter v{} starting", VERSION);
    debug!("Arguments: {:?}", args);

    let exit_code = match &args.command {
        Commands::Compile(compile_args) => handle_compile(compile_args, args.quiet),
        Commands::Build(build_args) => handle_build(build_args, args.quiet).await,
    };

    std::process::exit(exit_code);
}
