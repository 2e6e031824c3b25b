use std::net::SocketAddr;

use anyhow::Context;
use clap::{Parser, Subcommand};

use appsense::api::SearchClient;
use appsense::category::CategoryFilter;
use appsense::config::CONFIG;
use appsense::render::{render_examples, render_state};
use appsense::session::{SearchSession, SubmitOutcome};
use appsense::web::{AppState, create_router};

#[derive(Debug, Parser)]
#[command(name = "appsense", version, about = "Natural-language app store search")]
struct Cli {
    /// Search API origin. Defaults to APPSENSE_API_BASE.
    #[arg(long, global = true)]
    api_base: Option<String>,

    /// Debug logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run one search and print the results.
    Search {
        #[arg(required = true)]
        query: Vec<String>,
        #[arg(short, long, default_value = "all")]
        category: CategoryFilter,
        #[arg(long)]
        max_results: Option<u32>,
        /// Print the raw API response as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Interactive search session.
    Shell {
        #[arg(short, long, default_value = "all")]
        category: CategoryFilter,
    },
    /// List the categories the API knows about.
    Categories,
    /// Check the search API health endpoint.
    Health,
    /// Print the example queries.
    Examples,
    /// Serve the web front end.
    Serve {
        /// Defaults to APPSENSE_UI_BIND.
        #[arg(long)]
        bind: Option<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let api_base = cli.api_base.as_deref().unwrap_or(&CONFIG.api_base);
    let client = SearchClient::new(api_base)?;

    match cli.command {
        Command::Search {
            query,
            category,
            max_results,
            json,
        } => {
            let query = query.join(" ");
            let max_results = max_results.or(CONFIG.max_results);
            if json {
                let request = appsense::api::SearchRequest::new(query, category)
                    .with_max_results(max_results);
                let response = client.search(&request).await?;
                println!("{}", serde_json::to_string_pretty(&response)?);
                return Ok(());
            }

            let session = SearchSession::new(client).with_max_results(max_results);
            session.set_query(query);
            session.set_category(category);
            let outcome = session.submit().await;
            println!("{}", render_state(&session.state()));
            if outcome == SubmitOutcome::Rejected {
                anyhow::bail!("query is empty");
            }
        }
        Command::Shell { category } => {
            let session = SearchSession::new(client).with_max_results(CONFIG.max_results);
            session.set_category(category);
            let stdin = tokio::io::BufReader::new(tokio::io::stdin());
            let mut stdout = std::io::stdout();
            tokio::select! {
                result = appsense::shell::run(&session, stdin, &mut stdout) => result?,
                _ = tokio::signal::ctrl_c() => {
                    tracing::info!("interrupted, closing session");
                    session.teardown();
                }
            }
        }
        Command::Categories => {
            for category in client.categories().await? {
                println!("{category}");
            }
        }
        Command::Health => {
            let health = client.health().await?;
            println!("{}: {}", health.service, health.status);
            if !health.is_healthy() {
                anyhow::bail!("search API reports {:?}", health.status);
            }
        }
        Command::Examples => println!("{}", render_examples()),
        Command::Serve { bind } => {
            let bind = bind.unwrap_or_else(|| CONFIG.ui_bind.clone());
            let bind_addr: SocketAddr = bind
                .parse()
                .with_context(|| format!("invalid bind address {bind:?}"))?;
            let state = AppState {
                client,
                max_results: CONFIG.max_results,
            };
            let app = create_router(state, &CONFIG.static_dir);

            tracing::info!(%bind_addr, api_base, "web front end listening");
            let listener = tokio::net::TcpListener::bind(bind_addr).await?;
            axum::serve(listener, app).await?;
        }
    }

    Ok(())
}
