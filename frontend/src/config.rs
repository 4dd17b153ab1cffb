use shared::Locale;

pub struct Config;

impl Config {
    pub fn api_base_url() -> String {
        // The console is served by the admin host itself, so every endpoint is
        // same-origin and relative URLs are enough.
        "".to_string()
    }

    /// Listing endpoint for users without an expert
    pub fn unmatched_users_path() -> &'static str {
        "/admin/match?ajax=unmatched_users"
    }

    /// Batch creation endpoint
    pub fn create_match_path() -> &'static str {
        "/admin/match/create"
    }

    /// Id of the element holding the JSON the host page embeds
    pub fn bootstrap_element_id() -> &'static str {
        "match_admin_data"
    }

    /// Locale picked from the browser language, Korean when unavailable
    pub fn locale() -> Locale {
        web_sys::window()
            .and_then(|window| window.navigator().language())
            .map(|tag| Locale::from_tag(&tag))
            .unwrap_or_default()
    }
}
