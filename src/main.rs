//! lms-session CLI - session and authorization companion for the LMS client

use clap::{CommandFactory, Parser};
use clap_complete::CompleteEnv;

use lms_session::cli::{self, Cli, CommandContext, Commands, GlobalOptions, TokenCommands};
use lms_session::error::Result;

#[tokio::main]
async fn main() {
    CompleteEnv::with_factory(Cli::command).complete();

    if let Err(err) = run().await {
        eprintln!("Error: {}", err);
        std::process::exit(1);
    }
}

fn init_logging(debug: bool) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    if debug {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.format_timestamp(None);
    let _ = builder.try_init();
}

async fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.debug);

    let opts = GlobalOptions::from_cli(&cli);
    let context = || CommandContext::new(&opts);

    match cli.command {
        Commands::Version => {
            println!("lms-session version {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        Commands::Completion { shell } => {
            cli::completions::print_static(shell);
            Ok(())
        }
        Commands::Login { role, email } => {
            cli::session::login(&context()?, role, email.as_deref())
        }
        Commands::Logout => cli::session::logout(&context()?),
        Commands::Status => cli::session::status(&context()?),
        Commands::Token(TokenCommands::Set { token }) => cli::token::set(&context()?, token),
        Commands::Token(TokenCommands::Show) => cli::token::show(&context()?),
        Commands::Token(TokenCommands::Claims) => cli::token::claims(&context()?),
        Commands::Routes => cli::routes::list(&context()?),
        Commands::Check { path } => cli::routes::check(&context()?, &path),
        Commands::Request { method, url, data } => {
            cli::request::run(&context()?, method, &url, data).await
        }
    }
}
