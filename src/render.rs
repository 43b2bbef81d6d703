//! HTML fragments for the explorer page and the paint operations that
//! update a [`Page`].
//!
//! Favorite controls carry `data-action`, `data-kind` and `data-id` and are
//! handled by one delegated listener on the document, see
//! [`crate::page::UiEvent`].

use crate::models::{Favorite, FavoriteKind};
use crate::page::{Page, ProfileCard, RepoList, RepoRow};
use crate::types::{GitHubRepo, GitHubUser};
use std::fmt::Write;

pub const NO_REPOSITORIES_HTML: &str = "<p>This user has no public repositories.</p>";
pub const NO_FAVORITES_HTML: &str = "<p>No favorites saved yet.</p>";

pub fn render_user_profile(page: &mut Page, user: &GitHubUser, favorites: &[Favorite]) {
    page.user_results_hidden = false;
    page.profile = ProfileCard::User {
        user: user.clone(),
        favorited: is_favorite(favorites, FavoriteKind::User, &user.login),
    };
}

/// Paint the repository section. An empty list shows a notice, not an error.
pub fn render_repository_list(page: &mut Page, repos: &[GitHubRepo], favorites: &[Favorite]) {
    page.repo_section_hidden = false;
    page.repos = if repos.is_empty() {
        RepoList::NoRepositories
    } else {
        RepoList::Rows(
            repos
                .iter()
                .map(|repo| RepoRow {
                    repo: repo.clone(),
                    favorited: is_favorite(favorites, FavoriteKind::Repo, &repo.full_name),
                })
                .collect(),
        )
    };
}

pub fn render_favorites_list(page: &mut Page, favorites: &[Favorite]) {
    page.favorites = favorites.to_vec();
}

/// Show `message` in the profile region and hide the repository section.
pub fn render_error(page: &mut Page, message: &str) {
    page.profile = ProfileCard::Error(message.to_string());
    page.user_results_hidden = false;
    page.repo_section_hidden = true;
}

/// Repository failures stay inside the repository section.
pub fn render_repository_error(page: &mut Page, message: &str) {
    page.repos = RepoList::Error(message.to_string());
    page.repo_section_hidden = false;
}

pub fn set_loading(page: &mut Page, loading: bool) {
    if loading {
        page.profile = ProfileCard::Empty;
        page.repos = RepoList::Empty;
        page.user_results_hidden = true;
        page.repo_section_hidden = true;
        page.spinner_hidden = false;
    } else {
        page.spinner_hidden = true;
    }
}

fn is_favorite(favorites: &[Favorite], kind: FavoriteKind, id: &str) -> bool {
    favorites.iter().any(|f| f.kind == kind && f.id == id)
}

pub fn user_profile_html(user: &GitHubUser, favorited: bool) -> String {
    let bio = user.bio.as_deref().filter(|b| !b.is_empty()).unwrap_or("No bio available.");
    let location = user
        .location
        .as_deref()
        .filter(|l| !l.is_empty())
        .unwrap_or("Unknown location.");
    let label = if favorited { "Unfavorite User" } else { "Favorite User" };

    format!(
        r#"<img src="{avatar}" alt="{login} avatar">
<div class="user-info">
  <h3>{name} ({login})</h3>
  <p>{bio}</p>
  <p>📍 {location}</p>
  <p>Followers: {followers} | Following: {following}</p>
  <p>Public Repos: {repos}</p>
  {button}
</div>
"#,
        avatar = escape(&user.avatar_url),
        login = escape(&user.login),
        name = escape(user.display_name()),
        bio = escape(bio),
        location = escape(location),
        followers = user.followers,
        following = user.following,
        repos = user.public_repos,
        button = control_html("toggle", FavoriteKind::User, &user.login, favorited, label),
    )
}

pub fn repository_row_html(repo: &GitHubRepo, favorited: bool) -> String {
    let label = if favorited { "Unfavorite" } else { "Add Favorite" };
    format!(
        r#"<div class="repo-item">
  <h4><a href="{url}" target="_blank" rel="noopener">{name}</a></h4>
  <p>{description}</p>
  <p>★ {stars} | Language: {language}</p>
  {button}
</div>
"#,
        url = escape(&repo.html_url),
        name = escape(&repo.name),
        description = escape(
            repo.description
                .as_deref()
                .filter(|d| !d.is_empty())
                .unwrap_or("No description provided.")
        ),
        stars = repo.stargazers_count,
        language = escape(repo.language.as_deref().filter(|l| !l.is_empty()).unwrap_or("N/A")),
        button = control_html("toggle", FavoriteKind::Repo, &repo.full_name, favorited, label),
    )
}

pub fn favorites_list_html(favorites: &[Favorite]) -> String {
    if favorites.is_empty() {
        return NO_FAVORITES_HTML.to_string();
    }

    let mut html = String::new();
    for favorite in favorites {
        let _ = writeln!(
            html,
            r#"<div class="favorite-item"><p>{id} {button}</p></div>"#,
            id = escape(&favorite.id),
            button = control_html("remove", favorite.kind, &favorite.id, true, "Remove"),
        );
    }
    html
}

pub fn error_html(message: &str) -> String {
    format!(r#"<p class="error">Error: {}</p>"#, escape(message))
}

pub fn repository_error_html(message: &str) -> String {
    format!(r#"<p class="error">Error fetching repos: {}</p>"#, escape(message))
}

fn control_html(
    action: &str,
    kind: FavoriteKind,
    id: &str,
    favorited: bool,
    label: &str,
) -> String {
    let class = if favorited { "favorite-btn favorite" } else { "favorite-btn" };
    format!(
        concat!(
            r#"<button class="{class}" data-action="{action}" "#,
            r#"data-kind="{kind}" data-id="{id}">{label}</button>"#
        ),
        class = class,
        action = action,
        kind = kind,
        id = escape(id),
        label = label,
    )
}

fn hidden(flag: bool) -> &'static str {
    if flag {
        " hidden"
    } else {
        ""
    }
}

/// Favorites behaviour of the written page. One delegated click listener
/// toggles entries in `localStorage` under the same key the CLI uses,
/// relabels every matching control and repaints the favorites pane. The
/// list embedded at render time seeds storage on load.
const FAVORITES_SCRIPT: &str = r#"(function () {
  var KEY = 'githubFavorites';
  var LABELS = { user: ['Favorite User', 'Unfavorite User'], repo: ['Add Favorite', 'Unfavorite'] };

  function normalize(entry) {
    if (typeof entry === 'string') {
      return { kind: entry.indexOf('/') >= 0 ? 'repo' : 'user', id: entry };
    }
    return entry;
  }

  function seed() {
    try {
      return JSON.parse(document.getElementById('favorites-seed').textContent).map(normalize);
    } catch (e) {
      return [];
    }
  }

  function load() {
    try {
      var stored = JSON.parse(localStorage.getItem(KEY));
      if (Array.isArray(stored)) return stored.map(normalize);
    } catch (e) {}
    return seed();
  }

  function position(list, kind, id) {
    for (var i = 0; i < list.length; i++) {
      if (list[i].kind === kind && list[i].id === id) return i;
    }
    return -1;
  }

  function paint(list) {
    var pane = document.getElementById('favorites-list');
    pane.textContent = '';
    if (list.length === 0) {
      var empty = document.createElement('p');
      empty.textContent = 'No favorites saved yet.';
      pane.appendChild(empty);
    }
    list.forEach(function (entry) {
      var row = document.createElement('div');
      row.className = 'favorite-item';
      var line = document.createElement('p');
      line.appendChild(document.createTextNode(entry.id + ' '));
      var button = document.createElement('button');
      button.className = 'favorite-btn favorite';
      button.dataset.action = 'remove';
      button.dataset.kind = entry.kind;
      button.dataset.id = entry.id;
      button.textContent = 'Remove';
      line.appendChild(button);
      row.appendChild(line);
      pane.appendChild(row);
    });
    document.querySelectorAll('[data-action="toggle"]').forEach(function (control) {
      var on = position(list, control.dataset.kind, control.dataset.id) >= 0;
      var labels = LABELS[control.dataset.kind] || LABELS.repo;
      control.textContent = labels[on ? 1 : 0];
      control.classList.toggle('favorite', on);
    });
  }

  function save(list) {
    try {
      localStorage.setItem(KEY, JSON.stringify(list));
    } catch (e) {}
    paint(list);
  }

  document.addEventListener('click', function (event) {
    var control = event.target.closest('[data-action]');
    if (!control) return;
    var list = load();
    var at = position(list, control.dataset.kind, control.dataset.id);
    if (at >= 0) {
      list.splice(at, 1);
    } else if (control.dataset.action === 'toggle') {
      list.push({ kind: control.dataset.kind, id: control.dataset.id });
    }
    save(list);
  });

  save(seed());
})();
"#;

/// Favorites as JSON that is safe inside a `<script>` element.
fn favorites_seed_json(favorites: &[Favorite]) -> String {
    serde_json::to_string(favorites)
        .unwrap_or_else(|_| "[]".to_string())
        .replace('<', "\\u003c")
}

/// Whole page as a standalone document. Search results are a snapshot;
/// favorites stay interactive through `FAVORITES_SCRIPT`.
pub fn document_html(page: &Page) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>GitHub Explorer</title>
<style>
  .hidden {{ display: none; }}
  .error {{ color: red; }}
  .favorite-btn.favorite {{ background: #f5c518; }}
  .repo-item, .favorite-item {{ border-bottom: 1px solid #ddd; padding: 0.5em 0; }}
  #user-profile-card img {{ width: 96px; border-radius: 50%; }}
</style>
</head>
<body>
<header>
  <h1>GitHub Explorer</h1>
</header>
<div id="loading-spinner" class="spinner{spinner}">Loading...</div>
<section id="user-results-section" class="{results}">
  <div id="user-profile-card">
{profile}  </div>
</section>
<section id="repo-list-section" class="{repos_section}">
  <h2>Repositories</h2>
  <div id="repo-list">
{repos}  </div>
</section>
<section id="favorites-section">
  <h2>Favorites</h2>
  <div id="favorites-list">
{favorites}  </div>
</section>
<script id="favorites-seed" type="application/json">{seed}</script>
<script>
{script}</script>
</body>
</html>
"#,
        spinner = hidden(page.spinner_hidden),
        results = hidden(page.user_results_hidden).trim_start(),
        repos_section = hidden(page.repo_section_hidden).trim_start(),
        profile = page.profile_card_html(),
        repos = page.repo_list_html(),
        favorites = page.favorites_list_html(),
        seed = favorites_seed_json(&page.favorites),
        script = FAVORITES_SCRIPT,
    )
}

/// Escape text for use in element content and double-quoted attributes.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user() -> GitHubUser {
        GitHubUser {
            login: "torvalds".to_string(),
            id: 1024025,
            name: Some("Linus Torvalds".to_string()),
            avatar_url: "https://avatars.githubusercontent.com/u/1024025?v=4".to_string(),
            html_url: "https://github.com/torvalds".to_string(),
            bio: None,
            location: Some("Portland, OR".to_string()),
            followers: 200_000,
            following: 0,
            public_repos: 7,
        }
    }

    fn repo(full_name: &str) -> GitHubRepo {
        let name = full_name.split('/').nth(1).unwrap_or(full_name);
        GitHubRepo {
            name: name.to_string(),
            full_name: full_name.to_string(),
            html_url: format!("https://github.com/{}", full_name),
            description: None,
            stargazers_count: 42,
            language: None,
            updated_at: None,
        }
    }

    #[test]
    fn profile_label_follows_membership() {
        let mut page = Page::new();
        render_user_profile(&mut page, &user(), &[]);
        let html = page.profile_card_html();
        assert!(html.contains("Linus Torvalds (torvalds)"));
        assert!(html.contains("No bio available."));
        assert!(html.contains(">Favorite User</button>"));
        assert!(!page.user_results_hidden);

        render_user_profile(&mut page, &user(), &[Favorite::user("torvalds")]);
        let html = page.profile_card_html();
        assert!(html.contains(">Unfavorite User</button>"));
        assert!(html.contains(r#"class="favorite-btn favorite""#));
    }

    #[test]
    fn repo_favorite_does_not_mark_user_with_same_id() {
        let mut page = Page::new();
        render_user_profile(&mut page, &user(), &[Favorite::repo("torvalds")]);
        assert!(page.profile_card_html().contains(">Favorite User</button>"));
    }

    #[test]
    fn empty_repository_list_shows_notice() {
        let mut page = Page::new();
        render_repository_list(&mut page, &[], &[]);
        assert_eq!(page.repos, RepoList::NoRepositories);
        assert_eq!(page.repo_list_html(), NO_REPOSITORIES_HTML);
        assert!(!page.repo_section_hidden);
    }

    #[test]
    fn repository_rows_have_fallbacks_and_controls() {
        let mut page = Page::new();
        let repos = vec![repo("torvalds/linux"), repo("torvalds/subsurface")];
        render_repository_list(&mut page, &repos, &[Favorite::repo("torvalds/linux")]);

        let html = page.repo_list_html();
        assert_eq!(html.matches("class=\"repo-item\"").count(), 2);
        assert!(html.contains("No description provided."));
        assert!(html.contains("Language: N/A"));
        assert!(html.contains(r#"data-id="torvalds/linux">Unfavorite</button>"#));
        assert!(html.contains(r#"data-id="torvalds/subsurface">Add Favorite</button>"#));
    }

    #[test]
    fn favorites_list_has_removal_controls() {
        assert_eq!(favorites_list_html(&[]), NO_FAVORITES_HTML);

        let html = favorites_list_html(&[Favorite::repo("octocat/Hello-World")]);
        assert_eq!(html.matches("favorite-item").count(), 1);
        assert!(html.contains(
            r#"data-action="remove" data-kind="repo" data-id="octocat/Hello-World">Remove</button>"#
        ));
    }

    #[test]
    fn error_hides_repositories() {
        let mut page = Page::new();
        render_repository_list(&mut page, &[repo("a/b")], &[]);
        render_error(&mut page, "GitHub user not found.");
        assert!(page.repo_section_hidden);
        assert!(!page.user_results_hidden);
        assert_eq!(
            page.profile_card_html(),
            r#"<p class="error">Error: GitHub user not found.</p>"#
        );
    }

    #[test]
    fn loading_clears_then_only_hides_spinner() {
        let mut page = Page::new();
        render_user_profile(&mut page, &user(), &[]);
        render_repository_list(&mut page, &[repo("a/b")], &[]);

        set_loading(&mut page, true);
        assert!(page.is_loading());
        assert_eq!(page.profile, ProfileCard::Empty);
        assert_eq!(page.repos, RepoList::Empty);
        assert!(page.user_results_hidden && page.repo_section_hidden);

        render_user_profile(&mut page, &user(), &[]);
        set_loading(&mut page, false);
        assert!(!page.is_loading());
        assert!(!page.user_results_hidden);
    }

    #[test]
    fn document_seeds_saved_favorites() {
        let mut page = Page::new();
        render_favorites_list(
            &mut page,
            &[Favorite::repo("octocat/Hello-World"), Favorite::user("</script><b>")],
        );
        let html = page.to_html();

        assert!(html.contains(concat!(
            r#"<script id="favorites-seed" type="application/json">"#,
            r#"[{"kind":"repo","id":"octocat/Hello-World"},"#,
            r#"{"kind":"user","id":"\u003c/script>\u003cb>"}]</script>"#
        )));
        assert_eq!(html.matches("</script>").count(), 2);
    }

    #[test]
    fn user_content_is_escaped() {
        let mut evil = user();
        evil.bio = Some("<script>alert('x')</script>".to_string());
        let html = user_profile_html(&evil, false);
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;alert(&#39;x&#39;)&lt;/script&gt;"));
    }

    #[test]
    fn document_has_single_delegated_listener() {
        let mut page = Page::new();
        render_repository_list(&mut page, &[repo("a/b"), repo("a/c")], &[]);
        let html = page.to_html();
        assert_eq!(html.matches("addEventListener").count(), 1);
        assert!(html.contains("localStorage.setItem(KEY"));
        assert!(html.contains("var KEY = 'githubFavorites';"));
        assert!(!html.contains("search-form"));
        assert!(html.contains(r#"<section id="repo-list-section" class="">"#));
        assert!(html.contains(r#"<section id="user-results-section" class="hidden">"#));
    }
}
