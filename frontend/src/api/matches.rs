use async_trait::async_trait;
use log::debug;
use shared::{MatchCreationRequest, MatchCreationResult, UnmatchedUser};

use crate::api::utils::{admin_form_post, admin_get};
use crate::api::{api_url, ApiError};
use crate::config::Config;
use crate::controller::MatchApi;

/// Browser client for the match admin endpoints
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HttpMatchApi;

#[async_trait(?Send)]
impl MatchApi for HttpMatchApi {
    async fn fetch_unmatched(&self) -> Result<Vec<UnmatchedUser>, ApiError> {
        debug!("Fetching unmatched users");

        let response = admin_get(&api_url(Config::unmatched_users_path()))
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !response.ok() {
            return Err(ApiError::from_response(status, &body));
        }

        let users = UnmatchedUser::decode_list(&body)?;
        debug!("Fetched {} unmatched users", users.len());
        Ok(users)
    }

    async fn create_matches(
        &self,
        request: &MatchCreationRequest,
    ) -> Result<MatchCreationResult, ApiError> {
        debug!(
            "Creating matches for {} users with expert {}",
            request.user_ids.len(),
            request.expert_id
        );

        let response = admin_form_post(&api_url(Config::create_match_path()))
            .body(request.to_form_body())?
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !response.ok() {
            return Err(ApiError::from_response(status, &body));
        }

        let result = MatchCreationResult::decode(&body)?;
        debug!("Server created {} matches", result.created);
        Ok(result)
    }
}
