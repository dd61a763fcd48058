use clap::{Parser, ValueEnum};
use std::path::PathBuf;

use crate::analysis::ListKind;
use crate::ranking::SortDirection;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ListSelection {
    NotFollowingBack,
    NotFollowedBack,
    Mutual,
    All,
}

impl ListSelection {
    pub fn lists(self) -> Vec<ListKind> {
        match self {
            ListSelection::NotFollowingBack => vec![ListKind::NotFollowingBack],
            ListSelection::NotFollowedBack => vec![ListKind::NotFollowedBack],
            ListSelection::Mutual => vec![ListKind::Mutual],
            ListSelection::All => ListKind::ALL.to_vec(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Parser, Debug)]
#[command(
    name = "followback",
    about = "Compare follower and following exports to find who doesn't follow back",
    version,
    long_about = None
)]
pub struct Args {
    /// Followers export file (repeat for multi-part exports)
    #[arg(long, value_name = "PATH", conflicts_with = "archive")]
    pub followers: Vec<PathBuf>,

    /// Following export file
    #[arg(long, value_name = "PATH", conflicts_with = "archive")]
    pub following: Option<PathBuf>,

    /// Unpacked data archive to search for both exports
    #[arg(short, long, value_name = "DIR")]
    pub archive: Option<PathBuf>,

    /// Which list to show
    #[arg(short, long, value_enum, default_value = "not-following-back")]
    pub list: ListSelection,

    /// Sort by follow date
    #[arg(short, long, value_enum)]
    pub sort: Option<SortDirection>,

    /// Number of rows to display per list
    #[arg(short, long)]
    pub top: Option<usize>,

    /// Output format for stdout
    #[arg(short, long, value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Also write JSON and HTML reports into this directory
    #[arg(short, long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Mask usernames for sharing
    #[arg(long)]
    pub redact: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_command_is_well_formed() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_parse_files_and_options() {
        let args = Args::try_parse_from([
            "followback",
            "--followers",
            "followers_1.json",
            "--followers",
            "followers_2.json",
            "--following",
            "following.json",
            "--list",
            "all",
            "--sort",
            "desc",
        ])
        .unwrap();

        assert_eq!(args.followers.len(), 2);
        assert_eq!(args.list, ListSelection::All);
        assert_eq!(args.sort, Some(SortDirection::Desc));
        assert_eq!(args.format, OutputFormat::Text);
    }

    #[test]
    fn test_archive_conflicts_with_files() {
        let result = Args::try_parse_from([
            "followback",
            "--archive",
            "export",
            "--following",
            "following.json",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_list_selection_all() {
        assert_eq!(ListSelection::All.lists().len(), 3);
        assert_eq!(
            ListSelection::Mutual.lists(),
            vec![ListKind::Mutual]
        );
    }
}
