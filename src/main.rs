use arrivals_search::config::cli::{Cli, Command, ResolvedConfig, TokenAction};
use arrivals_search::core::render::render_results;
use arrivals_search::core::search_view::SearchOutcome;
use arrivals_search::domain::model::AUTH_TOKEN_KEY;
use arrivals_search::domain::ports::{FlightSearch, Notifier, TokenStore};
use arrivals_search::utils::error::{exit_code_for, ErrorSeverity, Result};
use arrivals_search::utils::{logger, validation::Validate};
use arrivals_search::{
    ApiClient, ConsoleNotifier, FlightClient, LocalStorage, LookupPage, OutputFormat, SearchView,
    TracingNotifier,
};
use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env file is fine.
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    if cli.json_logs {
        logger::init_json_logger(cli.verbose);
    } else {
        logger::init_cli_logger(cli.verbose);
    }
    tracing::debug!("CLI args: {:?}", cli);

    let exit_code = match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            tracing::error!(
                "❌ {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());

            e.severity().exit_code()
        }
    };

    if exit_code != 0 {
        std::process::exit(exit_code);
    }
    Ok(())
}

async fn run(cli: Cli) -> Result<i32> {
    let resolved = cli.resolve()?;
    let storage = LocalStorage::new(&resolved.storage_dir);

    match cli.command {
        // Alerts join the structured log stream.
        Command::Search { term } if cli.json_logs => {
            run_search(resolved, storage, TracingNotifier, term).await
        }
        Command::Search { term } => run_search(resolved, storage, ConsoleNotifier, term).await,
        Command::Lookup {
            code,
            show_arrivals,
        } => run_lookup(resolved, code, show_arrivals).await,
        Command::Token { action } => run_token(storage, action).await,
    }
}

async fn run_search<N: Notifier>(
    resolved: ResolvedConfig,
    storage: LocalStorage,
    notifier: N,
    term: Option<String>,
) -> Result<i32> {
    resolved.client.validate()?;
    let format = resolved.format;

    let client = ApiClient::new(resolved.client, storage, notifier);
    let view = SearchView::new(FlightClient::new(client));

    let mut worst = None;
    match term {
        Some(term) => {
            view.search(term).await;
            worst = print_search(&view, format)?;
        }
        None => {
            let mut lines = BufReader::new(tokio::io::stdin()).lines();
            while let Some(line) = lines.next_line().await? {
                view.search(line.trim()).await;
                worst = worst.max(print_search(&view, format)?);
            }
        }
    }
    Ok(exit_code_for(worst))
}

/// Prints the view and returns the severity of its outcome, if it failed.
fn print_search<F: FlightSearch>(
    view: &SearchView<F>,
    format: OutputFormat,
) -> Result<Option<ErrorSeverity>> {
    let outcome = view.outcome();
    match (format, &outcome) {
        (OutputFormat::Table, _) => println!("{}", view.render()),
        (_, SearchOutcome::Error(message)) => eprintln!("{}", message),
        (_, SearchOutcome::Results(results)) => println!("{}", render_results(results, format)?),
        (_, _) => println!("{}", render_results(&[], format)?),
    }
    Ok(outcome.severity())
}

async fn run_lookup(
    resolved: ResolvedConfig,
    code: Option<String>,
    show_arrivals: bool,
) -> Result<i32> {
    resolved.client.validate()?;
    let mut page = LookupPage::new(&resolved.client);

    let mut worst = None;
    match code {
        Some(code) => {
            page.submit(&code).await;
            worst = print_lookup(&page, resolved.format, show_arrivals)?;
        }
        None => {
            let mut lines = BufReader::new(tokio::io::stdin()).lines();
            while let Some(line) = lines.next_line().await? {
                page.submit(&line).await;
                worst = worst.max(print_lookup(&page, resolved.format, show_arrivals)?);
            }
        }
    }
    Ok(exit_code_for(worst))
}

/// Machine formats keep stdout for data; the status line goes to stderr.
fn print_lookup(
    page: &LookupPage,
    format: OutputFormat,
    show_arrivals: bool,
) -> Result<Option<ErrorSeverity>> {
    let rendered = page.render(format, show_arrivals)?;
    if format == OutputFormat::Table {
        println!("{}", rendered);
    } else {
        eprintln!("{}", page.message().text);
        if !rendered.is_empty() {
            println!("{}", rendered);
        }
    }
    Ok(page.message().severity())
}

async fn run_token(storage: LocalStorage, action: TokenAction) -> Result<i32> {
    match action {
        TokenAction::Set { token } => {
            storage.set_item(AUTH_TOKEN_KEY, token.trim()).await?;
            println!("Token saved to {}", storage.base_path().display());
        }
        TokenAction::Show => match storage.get_item(AUTH_TOKEN_KEY).await? {
            Some(token) => println!("{}", token),
            None => println!("(no token stored)"),
        },
        TokenAction::Clear => {
            storage.remove_item(AUTH_TOKEN_KEY).await?;
            println!("Token cleared");
        }
    }
    Ok(0)
}
