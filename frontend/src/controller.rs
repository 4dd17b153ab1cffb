//! State and operations behind the match admin page.
//!
//! The controller owns a [`MatchAdminView`], the typed stand-in for the page's
//! list, selector, checkboxes and status output. Components render snapshots
//! of it and forward user events to the operation methods. The view lives in a
//! `RefCell` that is never borrowed across an `.await`, so several operations
//! may be in flight on the same `Rc<MatchAdminController<_>>`.

use async_trait::async_trait;
use log::{debug, error, info, warn};
use shared::{
    ExpertOption, MatchAdminMessages, MatchCreationRequest, MatchCreationResult, MatchSummary,
    UnmatchedQuery, UnmatchedUser,
};
use std::cell::{Cell, RefCell};
use yew::Callback;

use crate::api::ApiError;

/// Endpoints the controller talks to
#[async_trait(?Send)]
pub trait MatchApi {
    async fn fetch_unmatched(&self) -> Result<Vec<UnmatchedUser>, ApiError>;

    async fn create_matches(
        &self,
        request: &MatchCreationRequest,
    ) -> Result<MatchCreationResult, ApiError>;
}

#[derive(Debug, Clone, PartialEq)]
pub struct UserRow {
    pub user: UnmatchedUser,
    pub checked: bool,
}

impl From<UnmatchedUser> for UserRow {
    fn from(user: UnmatchedUser) -> Self {
        Self { user, checked: false }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MatchRow {
    pub summary: MatchSummary,
    pub checked: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Success,
    Error,
}

impl StatusKind {
    /// Bootstrap text class used by the host stylesheet
    pub fn css_class(&self) -> &'static str {
        match self {
            StatusKind::Success => "text-success",
            StatusKind::Error => "text-danger",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct StatusMessage {
    pub kind: StatusKind,
    pub text: String,
}

impl StatusMessage {
    pub fn success(text: impl Into<String>) -> Self {
        Self { kind: StatusKind::Success, text: text.into() }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self { kind: StatusKind::Error, text: text.into() }
    }
}

/// Everything the page shows
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MatchAdminView {
    pub search: String,
    pub users: Vec<UserRow>,
    pub experts: Vec<ExpertOption>,
    pub selected_expert: String,
    pub matches: Vec<MatchRow>,
    pub select_all: bool,
    pub status: Option<StatusMessage>,
    pub loading: bool,
    pub submitting: bool,
}

impl MatchAdminView {
    /// Checkbox values of the checked unmatched users, in list order
    pub fn checked_user_ids(&self) -> Vec<String> {
        self.users
            .iter()
            .filter(|row| row.checked)
            .map(|row| row.user.checkbox_value())
            .collect()
    }

    /// Ids of the checked `selected_matches` rows
    pub fn checked_match_ids(&self) -> Vec<i64> {
        self.matches
            .iter()
            .filter(|row| row.checked)
            .map(|row| row.summary.id)
            .collect()
    }
}

/// Outcome of a list load
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The list was replaced and shows this many users
    Rendered(usize),
    /// A newer load started before this response arrived; it was dropped
    Superseded,
}

pub struct MatchAdminController<A: MatchApi> {
    api: A,
    messages: MatchAdminMessages,
    view: RefCell<MatchAdminView>,
    // Last successful listing, used to filter without refetching.
    cache: RefCell<Option<Vec<UnmatchedUser>>>,
    load_generation: Cell<u64>,
    search_revision: Cell<u64>,
    on_change: Callback<()>,
}

impl<A: MatchApi> MatchAdminController<A> {
    pub fn new(api: A, messages: MatchAdminMessages) -> Self {
        Self {
            api,
            messages,
            view: RefCell::new(MatchAdminView::default()),
            cache: RefCell::new(None),
            load_generation: Cell::new(0),
            search_revision: Cell::new(0),
            on_change: Callback::from(|_| ()),
        }
    }

    /// Callback fired after every view change, typically a re-render trigger
    pub fn with_on_change(mut self, on_change: Callback<()>) -> Self {
        self.on_change = on_change;
        self
    }

    pub fn messages(&self) -> &MatchAdminMessages {
        &self.messages
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    /// Snapshot of the current view
    pub fn view(&self) -> MatchAdminView {
        self.view.borrow().clone()
    }

    fn update(&self, f: impl FnOnce(&mut MatchAdminView)) {
        {
            let mut view = self.view.borrow_mut();
            f(&mut view);
        }
        self.on_change.emit(());
    }

    /// Replaces the list with the cached users that match `query`
    fn render_users(&self, users: &[UnmatchedUser], query: &str) -> usize {
        let rows: Vec<UserRow> = UnmatchedQuery::new(query)
            .apply(users)
            .into_iter()
            .map(UserRow::from)
            .collect();
        let count = rows.len();
        self.update(|view| view.users = rows);
        count
    }

    /// Fetches every unmatched user and renders those matching `query`.
    ///
    /// The whole list is replaced, which clears every user checkbox. A
    /// response is applied only if no newer load started meanwhile. If the
    /// operator typed into the search box while the request was in flight,
    /// the current search text is used instead of `query`. On failure the
    /// previous rows stay and the error is shown in the status output.
    pub async fn load_unmatched(&self, query: &str) -> Result<LoadOutcome, ApiError> {
        let ticket = self.load_generation.get() + 1;
        self.load_generation.set(ticket);
        let revision = self.search_revision.get();
        debug!("Loading unmatched users (load #{}, query {:?})", ticket, query);
        self.update(|view| view.loading = true);

        let result = self.api.fetch_unmatched().await;

        if ticket != self.load_generation.get() {
            debug!("Dropping response of load #{}, a newer load is pending", ticket);
            return Ok(LoadOutcome::Superseded);
        }

        match result {
            Ok(users) => {
                let query = if revision == self.search_revision.get() {
                    query.to_string()
                } else {
                    self.view.borrow().search.clone()
                };
                let count = self.render_users(&users, &query);
                *self.cache.borrow_mut() = Some(users);
                self.update(|view| view.loading = false);
                debug!("Rendered {} unmatched users", count);
                Ok(LoadOutcome::Rendered(count))
            }
            Err(e) => {
                error!("Failed to load unmatched users: {}", e);
                let text = self.messages.load_failed(&e.to_string());
                self.update(|view| {
                    view.loading = false;
                    view.status = Some(StatusMessage::error(text));
                });
                Err(e)
            }
        }
    }

    /// Handles a change of the search input.
    ///
    /// Filters the last fetched list locally; only fetches when nothing has
    /// been loaded yet.
    pub async fn on_search_input(&self, value: &str) -> Result<LoadOutcome, ApiError> {
        self.search_revision.set(self.search_revision.get() + 1);
        let search = value.to_string();
        self.update(|view| view.search = search);

        let cached = self.cache.borrow().clone();
        match cached {
            Some(users) => Ok(LoadOutcome::Rendered(self.render_users(&users, value))),
            None => self.load_unmatched(value).await,
        }
    }

    /// Submits the checked users for the selected expert.
    ///
    /// Returns `Ok(None)` when the selection is incomplete; nothing is sent in
    /// that case. After a successful creation the list is reloaded without a
    /// filter; the search box keeps its text.
    pub async fn on_create_match_click(&self) -> Result<Option<MatchCreationResult>, ApiError> {
        let (user_ids, expert_id) = {
            let view = self.view.borrow();
            (view.checked_user_ids(), view.selected_expert.clone())
        };

        let request = match MatchCreationRequest::new(user_ids, expert_id) {
            Ok(request) => request,
            Err(e) => {
                warn!("Match creation refused: {}", e);
                let text = self.messages.selection_required();
                self.update(|view| view.status = Some(StatusMessage::error(text)));
                return Ok(None);
            }
        };

        self.update(|view| view.submitting = true);
        let result = self.api.create_matches(&request).await;
        self.update(|view| view.submitting = false);

        match result {
            Ok(created) => {
                info!(
                    "Created {} matches for expert {}",
                    created.created, request.expert_id
                );
                let text = self.messages.created(created.created);
                self.update(|view| view.status = Some(StatusMessage::success(text)));
                if let Err(e) = self.load_unmatched("").await {
                    warn!("Reload after match creation failed: {}", e);
                }
                Ok(Some(created))
            }
            Err(e) => {
                error!("Failed to create matches: {}", e);
                let text = self.messages.create_failed(&e.to_string());
                self.update(|view| view.status = Some(StatusMessage::error(text)));
                Err(e)
            }
        }
    }

    /// Sets every `selected_matches` checkbox to `checked`
    pub fn on_select_all_toggle(&self, checked: bool) {
        self.update(|view| {
            view.select_all = checked;
            for row in view.matches.iter_mut() {
                row.checked = checked;
            }
        });
    }

    pub fn toggle_user(&self, user_id: i64, checked: bool) {
        self.update(|view| {
            if let Some(row) = view.users.iter_mut().find(|row| row.user.id == user_id) {
                row.checked = checked;
            }
        });
    }

    pub fn toggle_match(&self, match_id: i64, checked: bool) {
        self.update(|view| {
            if let Some(row) = view.matches.iter_mut().find(|row| row.summary.id == match_id) {
                row.checked = checked;
            }
        });
    }

    pub fn select_expert(&self, value: &str) {
        let value = value.to_string();
        self.update(|view| view.selected_expert = value);
    }

    pub fn set_experts(&self, experts: Vec<ExpertOption>) {
        self.update(|view| {
            if !experts.iter().any(|e| e.value() == view.selected_expert) {
                view.selected_expert.clear();
            }
            view.experts = experts;
        });
    }

    /// Replaces the existing-matches table; every row starts unchecked
    pub fn set_matches(&self, matches: Vec<MatchSummary>) {
        self.update(|view| {
            view.select_all = false;
            view.matches = matches
                .into_iter()
                .map(|summary| MatchRow { summary, checked: false })
                .collect();
        });
    }

    pub fn show_error(&self, text: impl Into<String>) {
        let text = text.into();
        self.update(|view| view.status = Some(StatusMessage::error(text)));
    }
}
