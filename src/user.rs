use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;

/// Which side of the relationship graph an export describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RelationshipKind {
    Followers,
    Following,
}

impl RelationshipKind {
    /// Key used by wrapper-object exports for this kind.
    pub fn wrapper_key(self) -> &'static str {
        match self {
            RelationshipKind::Followers => "relationships_followers",
            RelationshipKind::Following => "relationships_following",
        }
    }

    pub fn other(self) -> RelationshipKind {
        match self {
            RelationshipKind::Followers => RelationshipKind::Following,
            RelationshipKind::Following => RelationshipKind::Followers,
        }
    }
}

impl fmt::Display for RelationshipKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RelationshipKind::Followers => write!(f, "followers"),
            RelationshipKind::Following => write!(f, "following"),
        }
    }
}

/// A normalized account. Identity is `username`, compared exactly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub username: String,
    pub profile_url: String,
    pub followed_at: DateTime<Utc>,
}

/// Users of one export, deduplicated by username.
///
/// Iteration follows insertion order. Re-inserting a known username keeps its
/// original position and replaces the stored value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RelationshipCollection {
    users: Vec<User>,
    index: HashMap<String, usize>,
}

impl RelationshipCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, user: User) {
        match self.index.get(&user.username) {
            Some(&pos) => self.users[pos] = user,
            None => {
                self.index.insert(user.username.clone(), self.users.len());
                self.users.push(user);
            }
        }
    }

    pub fn contains(&self, username: &str) -> bool {
        self.index.contains_key(username)
    }

    pub fn get(&self, username: &str) -> Option<&User> {
        self.index.get(username).map(|&pos| &self.users[pos])
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, User> {
        self.users.iter()
    }

    pub fn as_slice(&self) -> &[User] {
        &self.users
    }
}

impl FromIterator<User> for RelationshipCollection {
    fn from_iter<I: IntoIterator<Item = User>>(iter: I) -> Self {
        let mut collection = RelationshipCollection::new();
        for user in iter {
            collection.insert(user);
        }
        collection
    }
}

impl<'a> IntoIterator for &'a RelationshipCollection {
    type Item = &'a User;
    type IntoIter = std::slice::Iter<'a, User>;

    fn into_iter(self) -> Self::IntoIter {
        self.users.iter()
    }
}

impl Serialize for RelationshipCollection {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.users.serialize(serializer)
    }
}
