use async_trait::async_trait;
use frontend::api::ApiError;
use frontend::controller::{LoadOutcome, MatchAdminController, MatchApi, StatusKind};
use futures::channel::oneshot;
use futures::executor::block_on;
use pretty_assertions::assert_eq;
use serde_json::json;
use shared::{
    Locale, MatchAdminMessages, MatchCreationRequest, MatchCreationResult, MatchSummary,
    UnmatchedUser,
};
use std::cell::{Cell, RefCell};
use std::collections::VecDeque;

enum Listing {
    Ready(Result<Vec<UnmatchedUser>, ApiError>),
    Pending(oneshot::Receiver<Vec<UnmatchedUser>>),
}

#[derive(Default)]
struct ScriptedApi {
    listings: RefCell<VecDeque<Listing>>,
    creations: RefCell<VecDeque<Result<MatchCreationResult, ApiError>>>,
    fetch_calls: Cell<usize>,
    sent: RefCell<Vec<MatchCreationRequest>>,
}

impl ScriptedApi {
    fn list(self, users: Vec<UnmatchedUser>) -> Self {
        self.listings.borrow_mut().push_back(Listing::Ready(Ok(users)));
        self
    }

    fn list_error(self, error: ApiError) -> Self {
        self.listings.borrow_mut().push_back(Listing::Ready(Err(error)));
        self
    }

    fn list_later(self) -> (Self, oneshot::Sender<Vec<UnmatchedUser>>) {
        let (tx, rx) = oneshot::channel();
        self.listings.borrow_mut().push_back(Listing::Pending(rx));
        (self, tx)
    }

    fn create(self, result: Result<MatchCreationResult, ApiError>) -> Self {
        self.creations.borrow_mut().push_back(result);
        self
    }
}

#[async_trait(?Send)]
impl MatchApi for ScriptedApi {
    async fn fetch_unmatched(&self) -> Result<Vec<UnmatchedUser>, ApiError> {
        self.fetch_calls.set(self.fetch_calls.get() + 1);
        let next = self.listings.borrow_mut().pop_front();
        match next {
            Some(Listing::Ready(result)) => result,
            Some(Listing::Pending(rx)) => rx
                .await
                .map_err(|_| ApiError::Network("listing dropped".to_string())),
            None => Err(ApiError::Network("no scripted listing".to_string())),
        }
    }

    async fn create_matches(
        &self,
        request: &MatchCreationRequest,
    ) -> Result<MatchCreationResult, ApiError> {
        self.sent.borrow_mut().push(request.clone());
        self.creations
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Err(ApiError::Network("no scripted creation".to_string())))
    }
}

fn user(id: i64, email: &str) -> UnmatchedUser {
    UnmatchedUser { id, email: email.to_string() }
}

fn two_users() -> Vec<UnmatchedUser> {
    vec![user(1, "a@x.com"), user(2, "b@y.com")]
}

fn controller(api: ScriptedApi) -> MatchAdminController<ScriptedApi> {
    MatchAdminController::new(api, MatchAdminMessages::new(Locale::En))
}

fn shown_ids(c: &MatchAdminController<ScriptedApi>) -> Vec<i64> {
    c.view().users.iter().map(|row| row.user.id).collect()
}

fn summary(id: i64) -> MatchSummary {
    serde_json::from_value(json!({
        "id": id,
        "user_id": id * 10,
        "user_email": format!("u{}@x.com", id),
        "expert_id": 7,
        "expert_name": "kim",
        "status": "in_progress",
        "created_at": "2024-03-01T09:30:00+09:00"
    }))
    .unwrap()
}

#[test]
fn email_substring_filter_renders_only_matching_users() {
    let c = controller(ScriptedApi::default().list(two_users()));

    let outcome = block_on(c.load_unmatched("a@")).unwrap();

    assert_eq!(outcome, LoadOutcome::Rendered(1));
    assert_eq!(shown_ids(&c), vec![1]);
    assert_eq!(c.view().users[0].user.label(), "1 a@x.com");
}

#[test]
fn id_filter_is_an_exact_match() {
    let users = vec![user(2, "b@y.com"), user(12, "c@y.com")];
    let c = controller(ScriptedApi::default().list(users));

    block_on(c.load_unmatched("2")).unwrap();

    assert_eq!(shown_ids(&c), vec![2]);
}

#[test]
fn empty_query_renders_everyone_unchecked() {
    let c = controller(ScriptedApi::default().list(two_users()));

    block_on(c.load_unmatched("")).unwrap();

    let view = c.view();
    assert_eq!(shown_ids(&c), vec![1, 2]);
    assert!(view.users.iter().all(|row| !row.checked));
    assert!(!view.loading);
}

#[test]
fn create_without_users_sends_nothing() {
    let c = controller(ScriptedApi::default().list(two_users()));
    block_on(c.load_unmatched("")).unwrap();
    c.select_expert("7");

    let result = block_on(c.on_create_match_click()).unwrap();

    assert_eq!(result, None);
    assert!(c.api().sent.borrow().is_empty());
    assert_eq!(c.api().fetch_calls.get(), 1);
    let status = c.view().status.unwrap();
    assert_eq!(status.kind, StatusKind::Error);
    assert_eq!(status.text, c.messages().selection_required());
}

#[test]
fn create_without_expert_sends_nothing() {
    let c = controller(ScriptedApi::default().list(two_users()));
    block_on(c.load_unmatched("")).unwrap();
    c.toggle_user(1, true);

    let result = block_on(c.on_create_match_click()).unwrap();

    assert_eq!(result, None);
    assert!(c.api().sent.borrow().is_empty());
    assert_eq!(c.view().status.unwrap().kind, StatusKind::Error);
}

#[test]
fn create_sends_checked_ids_and_reloads_without_filter() {
    let api = ScriptedApi::default()
        .list(two_users())
        .create(Ok(MatchCreationResult { created: 2 }))
        .list(vec![user(3, "c@z.com")]);
    let c = controller(api);
    block_on(c.load_unmatched("")).unwrap();
    block_on(c.on_search_input("@")).unwrap();
    c.toggle_user(1, true);
    c.toggle_user(2, true);
    c.select_expert("7");

    let result = block_on(c.on_create_match_click()).unwrap();

    assert_eq!(result, Some(MatchCreationResult { created: 2 }));
    let sent = c.api().sent.borrow().clone();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].user_ids, vec!["1".to_string(), "2".to_string()]);
    assert_eq!(sent[0].expert_id, "7");

    let view = c.view();
    let status = view.status.clone().unwrap();
    assert_eq!(status.kind, StatusKind::Success);
    assert!(status.text.contains('2'));
    assert_eq!(c.api().fetch_calls.get(), 2);
    assert_eq!(shown_ids(&c), vec![3]);
    assert_eq!(view.search, "@");
    assert!(!view.submitting);
}

#[test]
fn failed_create_reports_error_and_keeps_list() {
    let api = ScriptedApi::default().list(two_users()).create(Err(ApiError::Server {
        status: 500,
        message: "database unavailable".to_string(),
    }));
    let c = controller(api);
    block_on(c.load_unmatched("")).unwrap();
    c.toggle_user(2, true);
    c.select_expert("7");

    let err = block_on(c.on_create_match_click()).unwrap_err();

    assert!(matches!(err, ApiError::Server { status: 500, .. }));
    assert_eq!(c.api().fetch_calls.get(), 1);
    let status = c.view().status.unwrap();
    assert_eq!(status.kind, StatusKind::Error);
    assert!(status.text.contains("database unavailable"));
    assert_eq!(c.view().checked_user_ids(), vec!["2".to_string()]);
}

#[test]
fn failed_load_keeps_previous_rows() {
    let api = ScriptedApi::default()
        .list(two_users())
        .list_error(ApiError::Decode("expected an array".to_string()));
    let c = controller(api);
    block_on(c.load_unmatched("")).unwrap();

    let err = block_on(c.load_unmatched("")).unwrap_err();

    assert!(matches!(err, ApiError::Decode(_)));
    assert_eq!(shown_ids(&c), vec![1, 2]);
    let view = c.view();
    assert!(!view.loading);
    assert_eq!(view.status.unwrap().kind, StatusKind::Error);
}

#[test]
fn search_filters_cached_list_without_fetching() {
    let c = controller(ScriptedApi::default().list(two_users()));
    block_on(c.load_unmatched("")).unwrap();
    c.toggle_user(1, true);

    let outcome = block_on(c.on_search_input("b@")).unwrap();

    assert_eq!(outcome, LoadOutcome::Rendered(1));
    assert_eq!(c.api().fetch_calls.get(), 1);
    assert_eq!(shown_ids(&c), vec![2]);
    assert_eq!(c.view().search, "b@");
    assert!(c.view().checked_user_ids().is_empty());
}

#[test]
fn search_before_first_load_fetches() {
    let c = controller(ScriptedApi::default().list(two_users()));

    block_on(c.on_search_input("2")).unwrap();

    assert_eq!(c.api().fetch_calls.get(), 1);
    assert_eq!(shown_ids(&c), vec![2]);
}

#[test]
fn older_response_arriving_late_is_dropped() {
    let (api, first) = ScriptedApi::default().list_later();
    let (api, second) = api.list_later();
    let c = controller(api);

    let (older, newer, _) = block_on(async {
        futures::join!(c.load_unmatched(""), c.load_unmatched(""), async {
            second.send(vec![user(2, "b@y.com")]).unwrap();
            first.send(two_users()).unwrap();
        })
    });

    assert_eq!(older.unwrap(), LoadOutcome::Superseded);
    assert_eq!(newer.unwrap(), LoadOutcome::Rendered(1));
    assert_eq!(shown_ids(&c), vec![2]);
}

#[test]
fn typing_during_a_load_filters_the_fresh_list() {
    let api = ScriptedApi::default().list(two_users());
    let (api, fresh) = api.list_later();
    let c = controller(api);
    block_on(c.load_unmatched("")).unwrap();

    let (reload, _) = block_on(async {
        futures::join!(c.load_unmatched(""), async {
            c.on_search_input("c@").await.unwrap();
            fresh
                .send(vec![user(1, "a@x.com"), user(3, "c@z.com")])
                .unwrap();
        })
    });

    assert_eq!(reload.unwrap(), LoadOutcome::Rendered(1));
    assert_eq!(shown_ids(&c), vec![3]);
}

#[test]
fn select_all_toggles_every_existing_match() {
    let c = controller(ScriptedApi::default());
    c.set_matches(vec![summary(11), summary(12), summary(13)]);
    c.toggle_match(12, true);

    c.on_select_all_toggle(true);
    let view = c.view();
    assert!(view.select_all);
    assert_eq!(view.checked_match_ids(), vec![11, 12, 13]);

    c.on_select_all_toggle(false);
    let view = c.view();
    assert!(!view.select_all);
    assert!(view.checked_match_ids().is_empty());
}

#[test]
fn select_all_leaves_unmatched_users_alone() {
    let c = controller(ScriptedApi::default().list(two_users()));
    block_on(c.load_unmatched("")).unwrap();
    c.set_matches(vec![summary(11)]);

    c.on_select_all_toggle(true);

    assert!(c.view().checked_user_ids().is_empty());
}
