use crate::error::Result;
use crate::models::WrapResult;

/// How many repositories the summaries list.
const TOP_REPOS: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Markdown,
    Json,
}

impl OutputFormat {
    /// Unrecognised names fall back to plain text.
    pub fn from_name(name: &str) -> Self {
        match name.to_lowercase().as_str() {
            "json" => OutputFormat::Json,
            "markdown" | "md" => OutputFormat::Markdown,
            _ => OutputFormat::Text,
        }
    }
}

pub fn render(wrap: &WrapResult, format: OutputFormat) -> Result<String> {
    Ok(match format {
        OutputFormat::Json => serde_json::to_string_pretty(wrap)?,
        OutputFormat::Markdown => format_markdown(wrap),
        OutputFormat::Text => format_text(wrap),
    })
}

pub fn format_text(wrap: &WrapResult) -> String {
    let mut output = String::new();

    output.push_str(&format!(
        "\n=== {} GitHub Wrap: {} ===\n\n",
        wrap.contributions.year, wrap.user.login
    ));

    if let Some(ref name) = wrap.user.name {
        output.push_str(&format!("Name: {}\n", name));
    }
    if let Some(ref bio) = wrap.user.bio {
        output.push_str(&format!("Bio: {}\n", bio));
    }
    output.push_str(&format!(
        "Public repos: {}  Followers: {}  Following: {}\n",
        wrap.user.public_repos, wrap.user.followers, wrap.user.following
    ));

    output.push_str(&format!(
        "\nTotal contributions: {}\n",
        wrap.stats.total_commits
    ));
    output.push_str(&format!("Busiest month: {}\n", wrap.stats.busiest_month));
    output.push_str(&format!("Busiest day: {}\n", wrap.stats.busiest_day));

    if !wrap.stats.top_languages.is_empty() {
        output.push_str("\nTop Languages:\n");
        for lang in &wrap.stats.top_languages {
            output.push_str(&format!("  - {} {}%\n", lang.name, lang.percentage));
        }
    }

    if !wrap.repos.is_empty() {
        output.push_str("\nTop Repositories:\n");
        for repo in wrap.repos.iter().take(TOP_REPOS) {
            output.push_str(&format!(
                "  - {} ({} stars, {})\n",
                repo.name,
                repo.stargazers_count,
                repo.language.as_deref().unwrap_or("unknown")
            ));
        }
    }

    output
}

pub fn format_markdown(wrap: &WrapResult) -> String {
    let mut output = String::new();

    output.push_str(&format!(
        "# {} GitHub Wrap: {}\n\n",
        wrap.contributions.year, wrap.user.login
    ));

    if let Some(ref name) = wrap.user.name {
        output.push_str(&format!("**Name:** {}\n\n", name));
    }
    if let Some(ref bio) = wrap.user.bio {
        output.push_str(&format!("> {}\n\n", bio));
    }

    output.push_str("## Highlights\n\n");
    output.push_str("| Metric | Value |\n|--------|-------|\n");
    output.push_str(&format!(
        "| Total Contributions | {} |\n",
        wrap.stats.total_commits
    ));
    output.push_str(&format!(
        "| Busiest Month | {} |\n",
        wrap.stats.busiest_month
    ));
    output.push_str(&format!("| Busiest Day | {} |\n", wrap.stats.busiest_day));
    output.push_str(&format!("| Public Repos | {} |\n", wrap.user.public_repos));
    output.push_str(&format!("| Followers | {} |\n", wrap.user.followers));

    if !wrap.stats.top_languages.is_empty() {
        output.push_str("\n## Top Languages\n\n");
        output.push_str("| Language | Share | Color |\n|----------|-------|-------|\n");
        for lang in &wrap.stats.top_languages {
            output.push_str(&format!(
                "| {} | {}% | `{}` |\n",
                lang.name, lang.percentage, lang.color
            ));
        }
    }

    if !wrap.repos.is_empty() {
        output.push_str("\n## Top Repositories\n\n");
        for repo in wrap.repos.iter().take(TOP_REPOS) {
            output.push_str(&format!(
                "- [{}]({}) ★ {}",
                repo.name, repo.html_url, repo.stargazers_count
            ));
            if let Some(ref description) = repo.description {
                output.push_str(&format!(" - {}", description));
            }
            output.push('\n');
        }
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        AggregateStats, ContributionYear, DateRange, LanguageEntry, Profile, Repository,
    };
    use chrono::{TimeZone, Utc};

    fn wrap() -> WrapResult {
        let ts = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
        let go = LanguageEntry {
            name: "Go".to_string(),
            value: 1340.0,
            color: "#00ADD8".to_string(),
            percentage: 100,
        };
        WrapResult {
            user: Profile {
                login: "alice".to_string(),
                name: Some("Alice".to_string()),
                avatar_url: String::new(),
                bio: Some("gopher".to_string()),
                public_repos: 10,
                followers: 5,
                following: 2,
                created_at: ts,
                html_url: "https://github.com/alice".to_string(),
            },
            repos: vec![Repository {
                id: 1,
                name: "tool".to_string(),
                full_name: "alice/tool".to_string(),
                private: false,
                html_url: "https://github.com/alice/tool".to_string(),
                description: Some("A tool".to_string()),
                fork: false,
                stargazers_count: 7,
                language: Some("Go".to_string()),
                languages_url: String::new(),
                created_at: ts,
                updated_at: ts,
                pushed_at: None,
                homepage: None,
                size: 500,
                languages: None,
            }],
            contributions: ContributionYear {
                year: 2025,
                total: 42,
                range: DateRange::default(),
                contributions: Vec::new(),
            },
            languages: vec![go.clone()],
            stats: AggregateStats {
                total_commits: 42,
                top_languages: vec![go],
                busiest_month: "Mar".to_string(),
                busiest_day: "Sat".to_string(),
            },
        }
    }

    #[test]
    fn test_format_from_name() {
        assert_eq!(OutputFormat::from_name("JSON"), OutputFormat::Json);
        assert_eq!(OutputFormat::from_name("md"), OutputFormat::Markdown);
        assert_eq!(OutputFormat::from_name("whatever"), OutputFormat::Text);
    }

    #[test]
    fn test_text_summary() {
        let text = format_text(&wrap());
        assert!(text.contains("2025 GitHub Wrap: alice"));
        assert!(text.contains("Total contributions: 42"));
        assert!(text.contains("Busiest month: Mar"));
        assert!(text.contains("  - Go 100%"));
        assert!(text.contains("  - tool (7 stars, Go)"));
    }

    #[test]
    fn test_markdown_summary() {
        let md = format_markdown(&wrap());
        assert!(md.starts_with("# 2025 GitHub Wrap: alice"));
        assert!(md.contains("| Busiest Day | Sat |"));
        assert!(md.contains("| Go | 100% | `#00ADD8` |"));
        assert!(md.contains("- [tool](https://github.com/alice/tool) ★ 7 - A tool"));
    }

    #[test]
    fn test_markdown_repo_without_description() {
        let mut wrap = wrap();
        wrap.repos[0].description = None;
        let md = format_markdown(&wrap);
        assert!(md.ends_with("- [tool](https://github.com/alice/tool) ★ 7\n"));
    }

    #[test]
    fn test_text_skips_missing_profile_fields() {
        let mut wrap = wrap();
        wrap.user.name = None;
        wrap.user.bio = None;
        let text = format_text(&wrap);
        assert!(!text.contains("Name:"));
        assert!(!text.contains("Bio:"));
        assert!(text.contains("Public repos: 10  Followers: 5  Following: 2\n"));
    }

    #[test]
    fn test_json_round_trips() {
        let original = wrap();
        let json = render(&original, OutputFormat::Json).unwrap();
        let parsed: WrapResult = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, original);
        assert!(!json.contains("\"languages\": null"));
    }
}
