mod exit_code;
mod output;
mod progress;
mod schema;

use clap::Parser;
use colored::Colorize;
use exit_code::ExitCode;

#[derive(Parser)]
#[command(name = "geq")]
#[command(
    about = "Download a GraphQL schema via introspection and save it as SDL or JSON",
    long_about = None
)]
#[command(disable_version_flag = true)]
#[allow(clippy::struct_excessive_bools)]
struct Cli {
    #[command(flatten)]
    download: schema::DownloadArgs,

    /// Show version information
    #[arg(short = 'v', long)]
    version: bool,

    /// Force colored output even when not a TTY
    #[arg(long, conflicts_with = "no_color")]
    color: bool,

    /// Disable colored output
    #[arg(long, conflicts_with = "color")]
    no_color: bool,

    /// Suppress all output except errors
    #[arg(short, long)]
    quiet: bool,

    /// Suppress progress indicators (spinners)
    #[arg(long)]
    no_progress: bool,
}

/// Output verbosity options
#[derive(Debug, Clone, Copy)]
pub struct OutputOptions {
    /// Whether to show progress indicators (spinners)
    pub show_progress: bool,
    /// Whether to show informational output (success messages, timings)
    pub show_info: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> std::process::ExitCode {
    let cli = Cli::parse();

    if cli.version {
        println!("geq version {}", env!("CARGO_PKG_VERSION"));
        return ExitCode::Success.into();
    }

    init_tracing();
    configure_colors(cli.color, cli.no_color);

    let output_opts = OutputOptions {
        show_progress: !cli.quiet && !cli.no_progress,
        show_info: !cli.quiet,
    };

    let code = match schema::run(&cli.download, output_opts).await {
        Ok(()) => ExitCode::Success,
        Err(error) => {
            let code = ExitCode::for_error(&error);
            tracing::error!(%code, error = %format!("{error:#}"), "Schema download failed");
            eprintln!("{} {error:#}", "✗ Error:".red().bold());
            code
        }
    };

    code.into()
}

/// Initialize tracing; `RUST_LOG` selects what is shown (nothing by default).
fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("off")),
        )
        .with_writer(std::io::stderr)
        .init();
}

/// Configure colored output based on flags and environment variables.
///
/// Priority order (highest to lowest):
/// 1. `--color` flag (force colors on)
/// 2. `--no-color` flag (force colors off)
/// 3. `NO_COLOR` environment variable (if set to any value, disable colors)
/// 4. `CLICOLOR_FORCE` environment variable (if set to non-zero, force colors)
/// 5. `CLICOLOR` environment variable (if set to "0", disable colors)
/// 6. Default: colors enabled if stdout is a TTY (handled by `colored` crate)
///
/// See: <https://no-color.org/> and <https://bixense.com/clicolors/>
fn configure_colors(force_color: bool, no_color: bool) {
    use colored::control;

    if force_color {
        control::set_override(true);
    } else if no_color || std::env::var_os("NO_COLOR").is_some() {
        control::set_override(false);
    } else if let Ok(val) = std::env::var("CLICOLOR_FORCE") {
        if !val.is_empty() && val != "0" {
            control::set_override(true);
        }
    } else if std::env::var("CLICOLOR").is_ok_and(|val| val == "0") {
        control::set_override(false);
    }
}
