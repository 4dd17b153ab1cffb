use crate::error::Result;
use crate::models::matching::MatchStatus;
use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// A user that has not been linked to an expert yet
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UnmatchedUser {
    pub id: i64,
    pub email: String,
}

impl UnmatchedUser {
    /// Decodes the body of the unmatched-users listing
    pub fn decode_list(body: &str) -> Result<Vec<Self>> {
        Ok(serde_json::from_str(body)?)
    }

    /// Label shown next to the checkbox
    pub fn label(&self) -> String {
        format!("{} {}", self.id, self.email)
    }

    /// Value carried by the checkbox and sent back on submit
    pub fn checkbox_value(&self) -> String {
        self.id.to_string()
    }
}

/// Batch request assigning users to one expert
#[derive(Debug, Clone, Serialize, Deserialize, Validate, PartialEq)]
pub struct MatchCreationRequest {
    #[validate(length(min = 1, message = "At least one user must be selected"))]
    pub user_ids: Vec<String>,

    #[validate(custom(function = "validate_expert_id"))]
    pub expert_id: String,
}

impl MatchCreationRequest {
    /// Builds a validated request from the checked ids and the selector value
    pub fn new(user_ids: Vec<String>, expert_id: impl Into<String>) -> Result<Self> {
        let request = Self {
            user_ids,
            expert_id: expert_id.into().trim().to_string(),
        };
        request.validate()?;
        Ok(request)
    }

    /// Encodes the request as `application/x-www-form-urlencoded`.
    ///
    /// Each user id is sent as its own `user_ids` pair so the server can read
    /// them back as a list.
    pub fn to_form_body(&self) -> String {
        self.user_ids
            .iter()
            .map(|id| ("user_ids", id.as_str()))
            .chain(std::iter::once(("expert_id", self.expert_id.as_str())))
            .map(|(key, value)| format!("{}={}", key, urlencoding::encode(value)))
            .collect::<Vec<_>>()
            .join("&")
    }
}

/// Whether a selector value means "no expert chosen".
///
/// The placeholder option of the expert selector carries either an empty
/// value or `0`.
pub fn is_unselected_expert(value: &str) -> bool {
    let value = value.trim();
    value.is_empty() || value == "0"
}

fn validate_expert_id(value: &String) -> std::result::Result<(), validator::ValidationError> {
    if is_unselected_expert(value) {
        let mut err = validator::ValidationError::new("required");
        err.message = Some("An expert must be selected".into());
        return Err(err);
    }
    Ok(())
}

/// Server answer to a batch creation
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct MatchCreationResult {
    pub created: u32,
}

impl MatchCreationResult {
    pub fn decode(body: &str) -> Result<Self> {
        Ok(serde_json::from_str(body)?)
    }
}

/// One choice of the expert selector
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ExpertOption {
    pub id: i64,
    pub username: String,
}

impl ExpertOption {
    pub fn value(&self) -> String {
        self.id.to_string()
    }
}

/// A row of the existing-matches table
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MatchSummary {
    pub id: i64,
    pub user_id: i64,
    pub user_email: String,
    #[serde(default)]
    pub expert_id: Option<i64>,
    #[serde(default)]
    pub expert_name: Option<String>,
    pub status: MatchStatus,
    pub created_at: DateTime<FixedOffset>,
}

/// Data the host page embeds for the admin console
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct MatchAdminBootstrap {
    #[serde(default)]
    pub experts: Vec<ExpertOption>,
    #[serde(default)]
    pub matches: Vec<MatchSummary>,
}

impl MatchAdminBootstrap {
    /// Decodes the embedded JSON; blank content yields an empty bootstrap
    pub fn decode(body: &str) -> Result<Self> {
        if body.trim().is_empty() {
            return Ok(Self::default());
        }
        let bootstrap: Self = serde_json::from_str(body)?;
        log::debug!(
            "Page data: {} experts, {} matches",
            bootstrap.experts.len(),
            bootstrap.matches.len()
        );
        Ok(bootstrap.without_duplicate_experts())
    }

    /// Keeps the first option for each expert id
    fn without_duplicate_experts(mut self) -> Self {
        let mut seen = std::collections::HashSet::new();
        self.experts.retain(|expert| {
            let first = seen.insert(expert.id);
            if !first {
                log::warn!("Expert {} appears twice in the page data, keeping the first", expert.id);
            }
            first
        });
        self
    }
}
