pub mod models {
    pub mod matching;
}

pub mod dto {
    pub mod common;
    pub mod matching;
}

pub mod error;
pub mod i18n;
pub mod search;

// Re-export commonly used items
pub use error::{SharedError, Result};

pub use models::matching::MatchStatus;

// Re-export DTOs
pub use dto::{
    common::ErrorResponse,
    matching::{
        is_unselected_expert, ExpertOption, MatchAdminBootstrap, MatchCreationRequest,
        MatchCreationResult, MatchSummary, UnmatchedUser,
    },
};

pub use i18n::{Locale, MatchAdminMessages};
pub use search::UnmatchedQuery;
