use log::{debug, error};
use shared::MatchAdminBootstrap;

use crate::api::ApiError;

/// Reads the experts and existing matches the host page embedded as JSON.
///
/// A page without the element gets an empty bootstrap.
pub fn read_bootstrap(element_id: &str) -> Result<MatchAdminBootstrap, ApiError> {
    let element = match gloo_utils::document().get_element_by_id(element_id) {
        Some(element) => element,
        None => {
            debug!("No #{} element on the page, starting empty", element_id);
            return Ok(MatchAdminBootstrap::default());
        }
    };

    let body = element.text_content().unwrap_or_default();
    MatchAdminBootstrap::decode(&body).map_err(|e| {
        error!("Invalid page data in #{}: {}", element_id, e);
        ApiError::from(e)
    })
}
