use clap::Parser;
use miette::Result;
use linesizer::cli::{Cli, Commands, GlobalOpts};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // Reset SIGPIPE to default behavior (terminate silently) for proper Unix piping.
    #[cfg(unix)]
    {
        unsafe {
            libc::signal(libc::SIGPIPE, libc::SIG_DFL);
        }
    }
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(2)
                .tab_width(4)
                .build(),
        )
    }))?;

    let cli = Cli::parse();
    let global = cli.global;
    init_logging(&global);

    match cli.command {
        Commands::Size(args) => linesizer::cli::commands::size::run(args, &global),
        Commands::Check(args) => linesizer::cli::commands::check::run(args, &global),
        Commands::Init(args) => linesizer::cli::commands::init::run(args, &global),
        Commands::Config(cmd) => linesizer::cli::commands::config::run(cmd, &global),
        Commands::Completions(args) => linesizer::cli::commands::completions::run(args),
    }
}

/// Log to stderr; `LINESIZER_LOG` overrides the level picked from the flags
fn init_logging(global: &GlobalOpts) {
    let default_level = if global.verbose {
        "debug"
    } else if global.quiet {
        "error"
    } else {
        "warn"
    };
    let filter = EnvFilter::try_from_env("LINESIZER_LOG")
        .unwrap_or_else(|_| EnvFilter::new(format!("linesizer={}", default_level)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
