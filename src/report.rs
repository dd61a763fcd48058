use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::analysis::{AnalysisResult, AnalysisSummary, ListKind};
use crate::user::User;
use crate::utils::{format_date, format_number, redact_username};

/// How rows are shown.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReportOptions {
    pub top: Option<usize>,
    pub redact: bool,
}

impl ReportOptions {
    fn rows<'a>(&self, users: &'a [User]) -> &'a [User] {
        match self.top {
            Some(top) => &users[..top.min(users.len())],
            None => users,
        }
    }

    fn display_name(&self, username: &str) -> String {
        if self.redact {
            redact_username(username)
        } else {
            username.to_string()
        }
    }

    fn json_rows<'a>(&self, users: &'a [User]) -> Vec<JsonRow<'a>> {
        self.rows(users)
            .iter()
            .map(|user| JsonRow {
                username: self.display_name(&user.username),
                profile_url: (!self.redact).then_some(user.profile_url.as_str()),
                followed_at: &user.followed_at,
            })
            .collect()
    }
}

pub fn print_summary(summary: &AnalysisSummary) {
    println!("\n--- Follow Analysis ---");
    println!("Followers: {}", format_number(summary.followers));
    println!("Following: {}", format_number(summary.following));
    println!(
        "Not following you back: {}",
        format_number(summary.not_following_back)
    );
    println!(
        "You don't follow back: {}",
        format_number(summary.not_followed_back)
    );
    println!("Mutual follows: {}", format_number(summary.mutual_follows));
}

pub fn print_list(list: ListKind, users: &[User], options: &ReportOptions) {
    let rows = options.rows(users);

    println!("\n{} ({}):", list, format_number(users.len()));
    if rows.is_empty() {
        println!("  (none)");
        return;
    }
    for user in rows {
        let name = options.display_name(&user.username);
        if options.redact {
            println!("- {} (since {})", name, format_date(&user.followed_at));
        } else {
            println!(
                "- {} {} (since {})",
                name,
                user.profile_url,
                format_date(&user.followed_at)
            );
        }
    }
}

/// A user as written to stdout JSON; redaction drops the profile URL.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JsonRow<'a> {
    username: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    profile_url: Option<&'a str>,
    followed_at: &'a DateTime<Utc>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JsonReport<'a> {
    summary: AnalysisSummary,
    #[serde(skip_serializing_if = "Option::is_none")]
    not_following_back: Option<Vec<JsonRow<'a>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    not_followed_back: Option<Vec<JsonRow<'a>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    mutual_follows: Option<Vec<JsonRow<'a>>>,
}

/// Summary plus the selected lists, already ranked.
pub fn render_json(
    result: &AnalysisResult,
    lists: &[(ListKind, Vec<User>)],
    options: &ReportOptions,
) -> Result<String> {
    let pick = |kind: ListKind| {
        lists
            .iter()
            .find(|(k, _)| *k == kind)
            .map(|(_, users)| options.json_rows(users))
    };

    let report = JsonReport {
        summary: result.summary(),
        not_following_back: pick(ListKind::NotFollowingBack),
        not_followed_back: pick(ListKind::NotFollowedBack),
        mutual_follows: pick(ListKind::Mutual),
    };
    serde_json::to_string_pretty(&report).context("Failed to serialize report")
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

pub fn render_html(list: ListKind, users: &[User], options: &ReportOptions) -> String {
    let rows: String = options
        .rows(users)
        .iter()
        .map(|user| {
            let url = escape_html(&user.profile_url);
            let link = if options.redact {
                "&ndash;".to_string()
            } else {
                format!(r#"<a href="{url}" target="_blank">{url}</a>"#)
            };
            format!(
                "\n      <tr>\n        <td>{}</td>\n        <td>{}</td>\n        <td>{}</td>\n      </tr>",
                escape_html(&options.display_name(&user.username)),
                link,
                format_date(&user.followed_at)
            )
        })
        .collect();

    format!(
        r#"<!DOCTYPE html>
<html>
<head>
  <meta charset="utf-8">
  <title>{title}</title>
  <style>
    table {{ border-collapse: collapse; width: 100%; }}
    th, td {{ border: 1px solid #ddd; padding: 8px; text-align: left; }}
    th {{ background-color: #f2f2f2; }}
    tr:nth-child(even) {{ background-color: #f9f9f9; }}
    a {{ color: #0366d6; text-decoration: none; }}
    a:hover {{ text-decoration: underline; }}
  </style>
</head>
<body>
  <h2>{title}</h2>
  <table>
    <tr>
      <th>Username</th>
      <th>Profile URL</th>
      <th>Followed Since</th>
    </tr>{rows}
  </table>
</body>
</html>
"#,
        title = list,
        rows = rows
    )
}

/// Write `<slug>.json` and `<slug>.html` for one list into `dir`.
pub fn write_list_files(
    dir: &Path,
    list: ListKind,
    users: &[User],
    options: &ReportOptions,
) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(dir).with_context(|| format!("Failed to create output directory {:?}", dir))?;

    let json_path = dir.join(format!("{}.json", list.slug()));
    let json = serde_json::to_string_pretty(options.rows(users)).context("Failed to serialize list")?;
    fs::write(&json_path, json).with_context(|| format!("Failed to write {:?}", json_path))?;

    let html_path = dir.join(format!("{}.html", list.slug()));
    fs::write(&html_path, render_html(list, users, options))
        .with_context(|| format!("Failed to write {:?}", html_path))?;

    info!(
        action = "write",
        component = "report",
        list = list.slug(),
        row_count = options.rows(users).len(),
        json_path = ?json_path,
        html_path = ?html_path,
        "Wrote report files"
    );
    Ok(vec![json_path, html_path])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::analyze;
    use crate::user::RelationshipCollection;
    use chrono::{TimeZone, Utc};
    use tempfile::TempDir;

    fn user(name: &str, month: u32) -> User {
        User {
            username: name.to_string(),
            profile_url: format!("https://instagram.com/{}", name),
            followed_at: Utc.with_ymd_and_hms(2024, month, 1, 12, 0, 0).unwrap(),
        }
    }

    #[test]
    fn test_html_escapes_and_formats_dates() {
        let users = vec![user("a<b>", 1)];
        let html = render_html(ListKind::NotFollowingBack, &users, &ReportOptions::default());

        assert!(html.contains("<h2>Users Not Following Back</h2>"));
        assert!(html.contains("<td>a&lt;b&gt;</td>"));
        assert!(html.contains("<td>Jan 1, 2024</td>"));
        assert!(!html.contains("a<b>"));
    }

    #[test]
    fn test_html_redacted_hides_links() {
        let options = ReportOptions {
            top: None,
            redact: true,
        };
        let html = render_html(ListKind::Mutual, &[user("alice", 2)], &options);

        assert!(html.contains("<td>a****</td>"));
        assert!(!html.contains("instagram.com/alice"));
    }

    #[test]
    fn test_top_limits_rows() {
        let users = vec![user("a", 1), user("b", 2), user("c", 3)];
        let options = ReportOptions {
            top: Some(2),
            redact: false,
        };
        assert_eq!(options.rows(&users).len(), 2);

        let wide = ReportOptions {
            top: Some(10),
            redact: false,
        };
        assert_eq!(wide.rows(&users).len(), 3);
    }

    #[test]
    fn test_render_json_includes_selected_lists_only() {
        let following: RelationshipCollection = vec![user("x", 1)].into_iter().collect();
        let result = analyze(RelationshipCollection::new(), following);
        let lists = vec![(
            ListKind::NotFollowingBack,
            result.not_following_back.clone(),
        )];

        let json = render_json(&result, &lists, &ReportOptions::default()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["summary"]["following"], 1);
        assert_eq!(value["notFollowingBack"][0]["username"], "x");
        assert!(value.get("mutualFollows").is_none());
        assert_eq!(value["notFollowingBack"][0]["profileUrl"], "https://instagram.com/x");
    }

    #[test]
    fn test_render_json_redacts_names_and_urls() {
        let following: RelationshipCollection = vec![user("alice", 1)].into_iter().collect();
        let result = analyze(RelationshipCollection::new(), following);
        let lists = vec![(ListKind::NotFollowingBack, result.not_following_back.clone())];
        let options = ReportOptions {
            top: None,
            redact: true,
        };

        let json = render_json(&result, &lists, &options).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert!(!json.contains("alice"));
        assert_eq!(value["notFollowingBack"][0]["username"], "a****");
        assert!(value["notFollowingBack"][0].get("profileUrl").is_none());
        assert_eq!(value["notFollowingBack"][0]["followedAt"], "2024-01-01T12:00:00Z");
    }

    #[test]
    fn test_write_list_files() {
        let dir = TempDir::new().unwrap();
        let out = dir.path().join("out");
        let users = vec![user("a", 1)];

        let written =
            write_list_files(&out, ListKind::NotFollowingBack, &users, &ReportOptions::default())
                .unwrap();

        assert_eq!(written.len(), 2);
        let json = fs::read_to_string(out.join("not_following_back.json")).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value[0]["profileUrl"], "https://instagram.com/a");
        assert!(out.join("not_following_back.html").is_file());
    }
}
