use clap::Parser;
use color_rules::cli::{Cli, Commands};
use miette::Result;

fn main() -> Result<()> {
    // Restore default SIGPIPE so piping `normalize` into `head` exits quietly.
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

    match cli.command {
        Commands::Validate(args) => color_rules::cli::commands::validate::run(args, &global),
        Commands::Generate(args) => color_rules::cli::commands::generate::run(args, &global),
        Commands::Normalize(args) => color_rules::cli::commands::normalize::run(args, &global),
    }
}
