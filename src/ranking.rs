use crate::user::User;
use clap::ValueEnum;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SortDirection {
    /// Oldest follow first
    Asc,
    /// Newest follow first
    Desc,
}

/// State of the "sort by date" trigger.
///
/// Starts unsorted. The first activation sorts ascending, after which each
/// activation flips between ascending and descending; it never returns to
/// unsorted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SortToggle {
    state: Option<SortDirection>,
}

impl SortToggle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn direction(&self) -> Option<SortDirection> {
        self.state
    }

    pub fn activate(&mut self) -> SortDirection {
        let next = match self.state {
            None | Some(SortDirection::Desc) => SortDirection::Asc,
            Some(SortDirection::Asc) => SortDirection::Desc,
        };
        self.state = Some(next);
        next
    }

    pub fn reset(&mut self) {
        self.state = None;
    }
}

/// Order users by `followed_at`. Ties keep their input order; `None` returns
/// the input order unchanged.
pub fn rank(users: &[User], direction: Option<SortDirection>) -> Vec<User> {
    let mut ranked = users.to_vec();
    match direction {
        None => {}
        Some(SortDirection::Asc) => ranked.sort_by(|a, b| a.followed_at.cmp(&b.followed_at)),
        Some(SortDirection::Desc) => ranked.sort_by(|a, b| b.followed_at.cmp(&a.followed_at)),
    }
    ranked
}
