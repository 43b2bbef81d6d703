//! Terminal output for the binary.

use crate::controller::RepoLoad;
use crate::models::{Favorite, FavoriteKind, RateLimitState};
use crate::types::{GitHubRepo, GitHubUser};
use colored::*;

pub fn print_user(user: &GitHubUser, favorited: bool) {
    let star = if favorited { " ★".yellow().to_string() } else { String::new() };
    println!("{} ({}){}", user.display_name().bold().green(), user.login, star);
    println!("{}", or_fallback(user.bio.as_deref(), "No bio available.").dimmed());
    println!("📍 {}", or_fallback(user.location.as_deref(), "Unknown location."));
    println!(
        "Followers: {} | Following: {} | Public Repos: {}",
        user.followers, user.following, user.public_repos
    );
    println!("{}", user.html_url.blue());
}

pub fn print_repos(load: &RepoLoad, favorites: &[Favorite]) {
    println!("\n{}", "Repositories".bold());
    println!("{}", "=".repeat(50).dimmed());

    match load {
        RepoLoad::Loaded(repos) if repos.is_empty() => {
            println!("This user has no public repositories.");
        }
        RepoLoad::Loaded(repos) => {
            for repo in repos {
                let favorited = favorites
                    .iter()
                    .any(|f| f.kind == FavoriteKind::Repo && f.id == repo.full_name);
                print_repo(repo, favorited);
            }
        }
        RepoLoad::Failed(message) => {
            eprintln!("{} {}", "Error fetching repos:".red(), message);
        }
        RepoLoad::Stale => {}
    }
}

fn print_repo(repo: &GitHubRepo, favorited: bool) {
    let marker = if favorited { "★".yellow() } else { "·".dimmed() };
    println!(
        "{} {} ★ {} | Language: {}",
        marker,
        repo.full_name.bold(),
        repo.stargazers_count,
        or_fallback(repo.language.as_deref(), "N/A")
    );
    println!(
        "  {}",
        or_fallback(repo.description.as_deref(), "No description provided.").dimmed()
    );
}

// Empty strings from the API count as missing
fn or_fallback<'a>(value: Option<&'a str>, fallback: &'a str) -> &'a str {
    value.filter(|v| !v.is_empty()).unwrap_or(fallback)
}

pub fn print_favorites(favorites: &[Favorite]) {
    if favorites.is_empty() {
        println!("No favorites saved yet.");
        return;
    }
    for favorite in favorites {
        println!("{:>4}  {}", favorite.kind.to_string().dimmed(), favorite.id);
    }
}

pub fn print_toggle(favorite: &Favorite, favorited: bool) {
    if favorited {
        println!("{} {}", "★ Added".yellow(), favorite.id);
    } else {
        println!("{} {}", "✗ Removed".dimmed(), favorite.id);
    }
}

pub fn print_error(message: &str) {
    eprintln!("{} {}", "Error:".red().bold(), message);
}

pub fn print_rate_limit(state: &RateLimitState) {
    let line = format!("API quota: {}/{} remaining", state.remaining, state.limit);
    if state.is_limited {
        eprintln!("{}", line.red());
    } else {
        eprintln!("{}", line.dimmed());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_strings_use_fallback() {
        assert_eq!(or_fallback(Some(""), "No bio available."), "No bio available.");
        assert_eq!(or_fallback(None, "N/A"), "N/A");
        assert_eq!(or_fallback(Some("Helsinki"), "Unknown location."), "Helsinki");
    }
}
