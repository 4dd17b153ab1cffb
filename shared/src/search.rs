use crate::dto::matching::UnmatchedUser;

/// Operator-typed filter over the unmatched-users list.
///
/// A user survives when the query is empty, when the query is a
/// case-sensitive substring of the email, or when it equals the decimal id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UnmatchedQuery(String);

impl UnmatchedQuery {
    pub fn new(query: impl Into<String>) -> Self {
        Self(query.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn matches(&self, user: &UnmatchedUser) -> bool {
        self.0.is_empty() || user.email.contains(&self.0) || user.id.to_string() == self.0
    }

    /// Keeps the matching users in server order
    pub fn apply(&self, users: &[UnmatchedUser]) -> Vec<UnmatchedUser> {
        users.iter().filter(|u| self.matches(u)).cloned().collect()
    }
}

impl From<&str> for UnmatchedQuery {
    fn from(query: &str) -> Self {
        Self::new(query)
    }
}
