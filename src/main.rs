use clap::Parser;
use passvault::cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Register => passvault::cli::commands::register::execute(&cli),
        Commands::List { ref filter } => {
            passvault::cli::commands::list::execute(&cli, filter.as_deref())
        }
        Commands::Add {
            ref site,
            ref username,
            ref url,
            ref notes,
            generate,
            ref generator,
        } => passvault::cli::commands::add::execute(
            &cli,
            site,
            username.as_deref(),
            url,
            notes,
            generate,
            generator,
        ),
        Commands::Get { ref site, copy } => passvault::cli::commands::get::execute(&cli, site, copy),
        Commands::Edit {
            ref site,
            generate,
            ref generator,
        } => passvault::cli::commands::edit::execute(&cli, site, generate, generator),
        Commands::Remove { ref site, force } => {
            passvault::cli::commands::remove::execute(&cli, site, force)
        }
        Commands::Generate { ref generator } => {
            passvault::cli::commands::generate::execute(generator)
        }
    };

    if let Err(e) = result {
        passvault::cli::output::error(&e.to_string());
        std::process::exit(1);
    }
}
