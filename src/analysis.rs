use crate::user::{RelationshipCollection, User};
use serde::Serialize;
use std::fmt;
use std::time::Instant;
use tracing::debug;

/// Outcome of comparing a followers export with a following export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    /// Accounts followed that do not follow back
    pub not_following_back: Vec<User>,
    /// Followers that are not followed back
    pub not_followed_back: Vec<User>,
    pub mutual_follows: Vec<User>,
    pub followers: RelationshipCollection,
    pub following: RelationshipCollection,
}

/// One of the derived lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListKind {
    NotFollowingBack,
    NotFollowedBack,
    Mutual,
}

impl ListKind {
    pub const ALL: [ListKind; 3] = [
        ListKind::NotFollowingBack,
        ListKind::NotFollowedBack,
        ListKind::Mutual,
    ];

    /// File stem used for written reports.
    pub fn slug(self) -> &'static str {
        match self {
            ListKind::NotFollowingBack => "not_following_back",
            ListKind::NotFollowedBack => "not_followed_back",
            ListKind::Mutual => "mutual_follows",
        }
    }
}

impl fmt::Display for ListKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ListKind::NotFollowingBack => write!(f, "Users Not Following Back"),
            ListKind::NotFollowedBack => write!(f, "Users You Don't Follow Back"),
            ListKind::Mutual => write!(f, "Mutual Follows"),
        }
    }
}

/// Counts shown alongside the lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisSummary {
    pub followers: usize,
    pub following: usize,
    pub not_following_back: usize,
    pub not_followed_back: usize,
    pub mutual_follows: usize,
}

impl AnalysisResult {
    pub fn list(&self, kind: ListKind) -> &[User] {
        match kind {
            ListKind::NotFollowingBack => &self.not_following_back,
            ListKind::NotFollowedBack => &self.not_followed_back,
            ListKind::Mutual => &self.mutual_follows,
        }
    }

    pub fn summary(&self) -> AnalysisSummary {
        AnalysisSummary {
            followers: self.followers.len(),
            following: self.following.len(),
            not_following_back: self.not_following_back.len(),
            not_followed_back: self.not_followed_back.len(),
            mutual_follows: self.mutual_follows.len(),
        }
    }
}

/// Compare the two collections.
///
/// Each derived list follows the insertion order of the collection it is drawn
/// from; membership is checked against the other collection's index.
pub fn analyze(followers: RelationshipCollection, following: RelationshipCollection) -> AnalysisResult {
    let start_time = Instant::now();

    let (mutual_follows, not_following_back): (Vec<User>, Vec<User>) = following
        .iter()
        .cloned()
        .partition(|user| followers.contains(&user.username));

    let not_followed_back: Vec<User> = followers
        .iter()
        .filter(|user| !following.contains(&user.username))
        .cloned()
        .collect();

    debug!(
        action = "complete",
        component = "set_difference",
        followers = followers.len(),
        following = following.len(),
        not_following_back = not_following_back.len(),
        not_followed_back = not_followed_back.len(),
        mutual_follows = mutual_follows.len(),
        duration_us = start_time.elapsed().as_micros(),
        "Relationship comparison completed"
    );

    AnalysisResult {
        not_following_back,
        not_followed_back,
        mutual_follows,
        followers,
        following,
    }
}
