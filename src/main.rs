use std::process::ExitCode;

use clap::Parser;
use fintrack::cli::{CategoryCommand, Cli, Command, TransactionCommand};
use fintrack::config::Config;
use fintrack::error::{AppError, AppResult};
use fintrack::handlers;
use fintrack::state::AppState;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "fintrack=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", e);
            return ExitCode::FAILURE;
        }
    };
    tracing::debug!(api = %config.api_base(), version = fintrack::VERSION, "Starting fintrack");

    let mut state = match AppState::from_config(config) {
        Ok(state) => state,
        Err(e) => {
            eprintln!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    let signing_in = matches!(cli.command, Command::Login(_) | Command::Register(_));

    match run(&mut state, cli.command).await {
        Ok(output) => {
            println!("{}", output);
            ExitCode::SUCCESS
        }
        Err(AppError::Auth(message)) if signing_in => {
            eprintln!("Error: {}", message);
            ExitCode::FAILURE
        }
        Err(e) => {
            state.session.handle_error(&e);
            eprintln!("Error: {}", e.user_message());
            ExitCode::FAILURE
        }
    }
}

async fn run(state: &mut AppState, command: Command) -> AppResult<String> {
    if !matches!(
        command,
        Command::Login(_) | Command::Register(_) | Command::Logout
    ) {
        state.init().await?;
    }

    match command {
        Command::Login(args) => handlers::auth::login(state, &args).await,
        Command::Register(args) => handlers::auth::register(state, &args).await,
        Command::Logout => handlers::auth::logout(state),
        Command::Whoami => handlers::auth::whoami(state),
        Command::Dashboard(args) => handlers::dashboard::show(state, &args).await,
        Command::Transactions(TransactionCommand::List(args)) => {
            handlers::transactions::list(state, &args).await
        }
        Command::Transactions(TransactionCommand::Add(args)) => {
            handlers::transactions::add(state, &args).await
        }
        Command::Transactions(TransactionCommand::Edit(args)) => {
            handlers::transactions::edit(state, &args).await
        }
        Command::Transactions(TransactionCommand::Delete { id }) => {
            handlers::transactions::delete(state, id).await
        }
        Command::Categories(CategoryCommand::List { kind }) => {
            handlers::categories::list(state, kind).await
        }
        Command::Categories(CategoryCommand::Add { name, kind }) => {
            handlers::categories::add(state, &name, kind).await
        }
        Command::Categories(CategoryCommand::Edit { id, name, kind }) => {
            handlers::categories::edit(state, id, name.as_deref(), kind).await
        }
        Command::Categories(CategoryCommand::Delete { id }) => {
            handlers::categories::delete(state, id).await
        }
    }
}
