use chrono::Utc;
use clap::{Parser, Subcommand};
use sermon_search_core::{
    render_results, HttpSearchBackend, InfoOverlay, SearchClient, SearchMode, SearchStatus,
    CHANGELOG, DEFAULT_ENDPOINT, DEFAULT_RERANK_LIMIT, DEFAULT_RESULT_LIMIT,
};
use tracing::{info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "sermon-search", version)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Base URL of the transcript search service
    #[arg(long, env = "SERMON_SEARCH_ENDPOINT", default_value = DEFAULT_ENDPOINT)]
    endpoint: String,
}

#[derive(Subcommand)]
enum Command {
    /// Search sermon transcripts and print the matching chunks.
    Search {
        /// Free-text query. May be omitted when searching by filters only.
        query: Option<String>,
        /// Ranking strategy: full-text, vector or vector-rerank.
        #[arg(long, default_value_t = SearchMode::FullText)]
        mode: SearchMode,
        /// Number of results to request (1-100).
        #[arg(long, default_value_t = DEFAULT_RESULT_LIMIT)]
        num_results: u32,
        /// Number of results kept after reranking (1-100, vector-rerank only).
        #[arg(long, default_value_t = DEFAULT_RERANK_LIMIT)]
        num_rerank_results: u32,
        /// Only return chunks from this preacher.
        #[arg(long)]
        preacher: Option<String>,
        /// Only return chunks from sermons with this title.
        #[arg(long)]
        title: Option<String>,
        /// Only return chunks from this video (digits only).
        #[arg(long)]
        video_id: Option<String>,
        /// Print results as JSON instead of text.
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Show project information, changelog and related links.
    About {
        /// Print the changelog as JSON.
        #[arg(long, default_value_t = false)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let app_version = env!("CARGO_PKG_VERSION");

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    info!(
        version = app_version,
        started_at = %Utc::now().to_rfc3339(),
        "sermon-search boot"
    );

    match cli.command {
        Command::Search {
            query,
            mode,
            num_results,
            num_rerank_results,
            preacher,
            title,
            video_id,
            json,
        } => {
            let backend = HttpSearchBackend::new(&cli.endpoint)?;
            let mut client = SearchClient::new(backend);

            client.set_query_text(query.unwrap_or_default());
            client.set_search_mode(mode);
            client.set_preacher(preacher.unwrap_or_default());
            client.set_title(title.unwrap_or_default());
            if let Some(video_id) = video_id {
                if !client.set_video_id(video_id.trim()) {
                    anyhow::bail!("video id must contain digits only, got `{video_id}`");
                }
            }

            let applied = client.set_result_limit(num_results);
            if applied != num_results {
                warn!(requested = num_results, applied, "result count clamped");
            }
            let applied = client.set_rerank_limit(num_rerank_results);
            if applied != num_rerank_results && mode.uses_rerank() {
                warn!(requested = num_rerank_results, applied, "rerank count clamped");
            }

            let status = client.execute_search().await;

            if json {
                println!("{}", serde_json::to_string_pretty(client.results())?);
            } else {
                println!("{}", render_results(client.results()));
            }

            if status == SearchStatus::Failed {
                anyhow::bail!("search did not complete, see log output for details");
            }
        }
        Command::About { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(CHANGELOG)?);
            } else {
                let mut overlay = InfoOverlay::default();
                overlay.open();
                for group in overlay.groups_mut() {
                    group.toggle();
                }
                if let Some(text) = overlay.render() {
                    println!("{text}");
                }
            }
        }
    }

    Ok(())
}
