// Command-line driver for the VidTube client store

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;
use vidtube::client::{ApiClient, Config, ViewAction};
use vidtube::shared::models::Credentials;
use vidtube::store::Store;

#[derive(Parser)]
#[command(name = "vidtube")]
#[command(about = "VidTube - browse videos, comments and channels", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Config file (defaults to the user config directory)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Sign in with this email before running the command
    #[arg(long, env = "VIDTUBE_EMAIL", global = true)]
    email: Option<String>,

    /// Password for --email
    #[arg(long, env = "VIDTUBE_PASSWORD", global = true, hide_env_values = true)]
    password: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// List the newest videos
    Feed {
        /// Number of pages to load
        #[arg(default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
        pages: u32,
    },

    /// Show one video with its comments
    Watch {
        /// Video id
        video_id: String,
    },

    /// List recommended videos
    Recommend {
        /// Category id ("all" for every category)
        category: Option<String>,
    },

    /// Search videos and channels
    Search {
        /// Search terms
        #[arg(required = true, num_args = 1..)]
        query: Vec<String>,
    },

    /// List categories
    Categories,

    /// Show a channel profile
    Channel {
        /// Channel username
        username: String,
    },

    /// List notifications (needs credentials)
    Inbox,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| "vidtube=info".to_string());
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&env_filter))
        .with_writer(std::io::stderr)
        .init();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    let store = Store::connect(config)?;
    if let (Some(email), Some(password)) = (cli.email, cli.password) {
        sign_in(&store, email, password).await?;
    }

    match cli.command {
        Commands::Feed { pages } => {
            for _ in 0..pages {
                store.videos.load_next_page().await?;
            }
            let feed = store.videos.feed().await;
            for video in &feed.items {
                println!(
                    "{}  {:>6}  {:>5} likes  {}",
                    video.id,
                    video.duration_label(),
                    video.engagement.likes,
                    video.title
                );
            }
            if feed.has_more {
                println!("... more after page {}", feed.cursor);
            }
        }
        Commands::Watch { video_id } => {
            let (video, count) = futures_util::future::try_join(
                store.videos.open_video(&video_id),
                store.comments.load(&video_id),
            )
            .await?;
            println!("{}\n{}\n", video.title, video.description);
            println!(
                "{} views, {} likes, {} dislikes, {} comments",
                video.views, video.engagement.likes, video.engagement.dislikes, count
            );
            for comment in store.comments.snapshot().await.comments {
                let author = comment.owner.map(|o| o.username).unwrap_or_default();
                println!("  {author}: {}", comment.content);
            }
            if store.current_user().is_signed_in().await {
                store.recommendations.track(&video_id, ViewAction::View).await.ok();
            }
        }
        Commands::Recommend { category } => {
            if let Some(category) = category {
                store.recommendations.select_category(&category).await;
            }
            store.recommendations.load_next_page().await?;
            for video in store.recommendations.snapshot().await.items {
                println!("{}  {}", video.id, video.title);
            }
        }
        Commands::Search { query } => {
            let results = store.discovery.search(&query.join(" ")).await?;
            for channel in &results.channels {
                println!("@{}  {}", channel.username, channel.full_name);
            }
            for video in &results.videos {
                println!("{}  {}", video.id, video.title);
            }
            if results.is_empty() {
                println!("no results");
            }
        }
        Commands::Categories => {
            for category in store.discovery.categories().await? {
                println!("{}  {}", category.id, category.name);
            }
        }
        Commands::Channel { username } => {
            let channel = store.discovery.channel(&username).await?;
            println!(
                "{} (@{})\n{} subscribers{}",
                channel.full_name,
                channel.username,
                channel.subscribers_count,
                if channel.is_subscribed { ", subscribed" } else { "" }
            );
        }
        Commands::Inbox => {
            let unread = store.notifications.refresh().await?;
            for notification in store.notifications.snapshot().await.items {
                let marker = if notification.is_read { ' ' } else { '*' };
                println!("{marker} {}", notification.content);
            }
            println!("{unread} unread");
        }
    }
    Ok(())
}

async fn sign_in(
    store: &Store<ApiClient>,
    email: String,
    password: String,
) -> Result<(), Box<dyn std::error::Error>> {
    let user = store
        .session
        .login(&Credentials::with_email(email, password))
        .await?;
    tracing::info!("Signed in as {}", user.username);
    Ok(())
}
