use anyhow::Context;
use clap::Parser;
use colored::*;
use github_explorer::cli::{Cli, Command, FavoritesCommand};
use github_explorer::config::AppConfig;
use github_explorer::console;
use github_explorer::models::{Favorite, FavoriteKind};
use github_explorer::page::UiEvent;
use github_explorer::storage::FileStore;
use github_explorer::{Controller, FavoritesStore, GitHubClient};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;
use tracing_subscriber::EnvFilter;

type App = Controller<GitHubClient, FileStore>;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if it exists
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = cli.app_config();
    info!(
        api = %config.client.base_url,
        authenticated = config.client.is_authenticated(),
        favorites = %config.favorites_path.display(),
        "Starting GitHub Explorer"
    );

    let client = GitHubClient::new(config.client.clone()).context("Failed to build HTTP client")?;
    let favorites = FavoritesStore::new(FileStore::new(&config.favorites_path));
    let mut app = Controller::new(client, favorites);
    app.on_page_load();

    match cli.command {
        Command::Search { username } => {
            let found = search(&mut app, &username).await;
            write_page(&app, &config)?;
            if !found {
                std::process::exit(1);
            }
        }
        Command::Favorites { action } => {
            favorites_command(&mut app, action)?;
            write_page(&app, &config)?;
        }
        Command::Interactive => interactive(&mut app, &config).await?,
    }

    Ok(())
}

async fn search(app: &mut App, username: &str) -> bool {
    match app.run_search(username).await {
        Ok((user, repos)) => {
            let favorited = app.favorites().contains(FavoriteKind::User, &user.login);
            console::print_user(&user, favorited);
            console::print_repos(&repos, &app.list_favorites());
            console::print_rate_limit(&app.api().last_rate_limit());
            true
        }
        Err(e) => {
            console::print_error(&e.user_message());
            false
        }
    }
}

fn favorites_command(app: &mut App, action: FavoritesCommand) -> anyhow::Result<()> {
    match action {
        FavoritesCommand::List => console::print_favorites(&app.list_favorites()),
        FavoritesCommand::Toggle { kind, id } => {
            let favorited = app
                .dispatch(UiEvent::ToggleFavorite { kind, id: id.clone() })
                .context("Failed to save favorites")?;
            console::print_toggle(&Favorite::new(kind, id), favorited);
        }
        FavoritesCommand::Remove { kind, id } => {
            let removed = app.remove_favorite(kind, &id).context("Failed to save favorites")?;
            if removed {
                console::print_toggle(&Favorite::new(kind, id), false);
            } else {
                println!("{} is not a favorite", id);
            }
        }
        FavoritesCommand::Clear => {
            app.clear_favorites().context("Failed to save favorites")?;
            println!("Favorites cleared");
        }
    }
    Ok(())
}

async fn interactive(app: &mut App, config: &AppConfig) -> anyhow::Result<()> {
    println!("{}", "GitHub Explorer".bold().green());
    println!("{}", "=".repeat(50).dimmed());
    println!("Type a username and press Enter. :fav <user|repo> <id>, :favorites, :quit\n");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        let mut words = line.split_whitespace();

        match words.next() {
            Some(":quit") | Some(":q") => break,
            Some(":favorites") => console::print_favorites(&app.list_favorites()),
            Some(":fav") => match (words.next().map(str::parse::<FavoriteKind>), words.next()) {
                (Some(Ok(kind)), Some(id)) => match app.toggle_favorite(kind, id) {
                    Ok(favorited) => console::print_toggle(&Favorite::new(kind, id), favorited),
                    Err(e) => console::print_error(&e.to_string()),
                },
                _ => console::print_error("usage: :fav <user|repo> <id>"),
            },
            _ => {
                search(app, line).await;
            }
        }

        write_page(app, config)?;
        println!();
    }

    Ok(())
}

fn write_page(app: &App, config: &AppConfig) -> anyhow::Result<()> {
    if let Some(path) = &config.html_out {
        std::fs::write(path, app.page().to_html())
            .with_context(|| format!("Failed to write page to {}", path.display()))?;
        info!(path = %path.display(), "Page written");
    }
    Ok(())
}
