use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Dockerfile generation from declared project requirements
#[derive(Parser, Debug)]
#[command(
    name = "dockter",
    about = "Generate Dockerfiles from declared project requirements",
    version,
    author,
    long_about = "dockter turns the requirements of a project (Python packages, Debian \
                  system packages) into a reproducible Dockerfile, and can build the \
                  image on the local Docker daemon. The generated file is written to \
                  .Dockerfile in the project folder; rename it to Dockerfile to take \
                  it over."
)]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(
        long,
        global = true,
        value_name = "LEVEL",
        value_parser = ["trace", "debug", "info", "warn", "error"],
        help = "Set logging level [env: DOCKTER_LOG_LEVEL, default: info]"
    )]
    pub log_level: Option<String>,

    #[arg(short = 'v', long, global = true, help = "Enable debug logging")]
    pub verbose: bool,

    #[arg(
        short = 'q',
        long,
        global = true,
        conflicts_with = "verbose",
        help = "Quiet mode - suppress non-error output"
    )]
    pub quiet: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    #[command(
        about = "Generate a Dockerfile for a project",
        long_about = "Writes .Dockerfile (and any generated manifests) into the project \
                      folder and prints the Dockerfile.\n\n\
                      Examples:\n  \
                      dockter compile\n  \
                      dockter compile /path/to/project --environ environ.json\n  \
                      dockter compile --platform python --python-version 2\n  \
                      dockter compile --no-header -o Dockerfile.preview"
    )]
    Compile(CompileArgs),

    #[command(
        about = "Generate a Dockerfile and build the image",
        long_about = "Generates .Dockerfile like compile, then builds it on the local \
                      Docker daemon using the project folder as build context.\n\n\
                      Examples:\n  \
                      dockter build\n  \
                      dockter build /path/to/project --tag analysis:latest"
    )]
    Build(BuildArgs),
}

/// Inputs shared by every command that generates a Dockerfile
#[derive(Args, Debug, Clone)]
pub struct ProjectArgs {
    #[arg(
        value_name = "FOLDER",
        help = "Project folder (defaults to current directory)"
    )]
    pub folder: Option<PathBuf>,

    #[arg(
        short = 'e',
        long,
        value_name = "FILE",
        help = "Environment description (JSON or YAML) listing the requirements"
    )]
    pub environ: Option<PathBuf>,

    #[arg(
        short = 'p',
        long,
        value_name = "TAG",
        help = "Force a runtime platform (deb, python) instead of detecting one"
    )]
    pub platform: Option<String>,

    #[arg(
        long,
        value_name = "MAJOR",
        value_parser = clap::value_parser!(u8).range(2..=3),
        help = "Python major version [env: DOCKTER_PYTHON_VERSION, default: 3]"
    )]
    pub python_version: Option<u8>,
}

#[derive(Args, Debug, Clone)]
pub struct CompileArgs {
    #[command(flatten)]
    pub project: ProjectArgs,

    #[arg(long, help = "Omit the generated-by header comment")]
    pub no_header: bool,

    #[arg(
        short = 'o',
        long,
        value_name = "FILE",
        help = "Write the Dockerfile to a file instead of stdout"
    )]
    pub output: Option<PathBuf>,
}

#[derive(Args, Debug, Clone)]
pub struct BuildArgs {
    #[command(flatten)]
    pub project: ProjectArgs,

    #[arg(
        short = 't',
        long,
        value_name = "NAME",
        help = "Image tag [env: DOCKTER_IMAGE_TAG, default: folder name]"
    )]
    pub tag: Option<String>,

    #[arg(
        long,
        value_name = "SECONDS",
        help = "Build timeout in seconds [env: DOCKTER_BUILD_TIMEOUT, default: 600]"
    )]
    pub timeout: Option<u64>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_args_verify() {
        CliArgs::command().debug_assert();
    }

    #[test]
    fn test_default_compile_args() {
        let args = CliArgs::parse_from(["dockter", "compile"]);
        match args.command {
            Commands::Compile(compile) => {
                assert!(compile.project.folder.is_none());
                assert!(compile.project.environ.is_none());
                assert!(compile.project.platform.is_none());
                assert!(compile.project.python_version.is_none());
                assert!(!compile.no_header);
                assert!(compile.output.is_none());
            }
            _ => panic!("Expected Compile command"),
        }
    }

    #[test]
    fn test_compile_with_options() {
        let args = CliArgs::parse_from([
            "dockter",
            "compile",
            "/tmp/project",
            "--environ",
            "environ.yaml",
            "--platform",
            "python",
            "--python-version",
            "2",
            "--no-header",
            "-o",
            "out.Dockerfile",
        ]);
        match args.command {
            Commands::Compile(compile) => {
                assert_eq!(compile.project.folder, Some(PathBuf::from("/tmp/project")));
                assert_eq!(compile.project.environ, Some(PathBuf::from("environ.yaml")));
                assert_eq!(compile.project.platform.as_deref(), Some("python"));
                assert_eq!(compile.project.python_version, Some(2));
                assert!(compile.no_header);
                assert_eq!(compile.output, Some(PathBuf::from("out.Dockerfile")));
            }
            _ => panic!("Expected Compile command"),
        }
    }

    #[test]
    fn test_python_version_range() {
        let result = CliArgs::try_parse_from(["dockter", "compile", "--python-version", "4"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_build_args() {
        let args = CliArgs::parse_from(["dockter", "build", ".", "--tag", "analysis:latest"]);
        match args.command {
            Commands::Build(build) => {
                assert_eq!(build.project.folder, Some(PathBuf::from(".")));
                assert_eq!(build.tag.as_deref(), Some("analysis:latest"));
                assert!(build.timeout.is_none());
            }
            _ => panic!("Expected Build command"),
        }
    }

    #[test]
    fn test_global_flags() {
        let args = CliArgs::parse_from(["dockter", "compile", "--log-level", "debug"]);
        assert_eq!(args.log_level.as_deref(), Some("debug"));

        let result = CliArgs::try_parse_from(["dockter", "compile", "--log-level", "loud"]);
        assert!(result.is_err());

        let args = CliArgs::parse_from(["dockter", "-v", "compile"]);
        assert!(args.verbose);

        let result = CliArgs::try_parse_from(["dockter", "-v", "-q", "compile"]);
        assert!(result.is_err());
    }
}
