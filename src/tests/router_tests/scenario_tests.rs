// src/tests/router_tests/scenario_tests.rs
//
// Walks the whole lifecycle of a request through the router: a customer
// submits, staff signs in, completes one request, deletes another.
use crate::db::activity::{count_for_request, Action};
use crate::router::handle;
use crate::tests::utils::*;

fn fragment(state: &crate::state::AppState, cookie: &str) -> String {
    body_string(handle(get_with_cookie("/dashboard/requests", cookie), state).unwrap())
}

#[test]
fn full_request_lifecycle() {
    let state = live_state("scenario");
    seed_staff(&state);

    // Jane submits from the public form.
    let resp = handle(post("/submit", VALID_SUBMIT), &state).unwrap();
    assert_eq!(resp.status(), 302);

    // A second request arrives that will later be deleted as spam.
    handle(
        post(
            "/submit",
            "name=Sam%20Spam&phone=555-9999&address=2%20Elm%20St&category=other&description=junk",
        ),
        &state,
    )
    .unwrap();

    // Staff signs in, which brings the feed up.
    let cookie = login_as(&state, "alice", "hunter2");
    assert!(wait_until(|| state.feed.latest().total() == 2));

    let body = fragment(&state, &cookie);
    assert!(body.contains("Jane Doe"));
    assert!(body.contains("555-1234"));
    assert!(body.contains("plumbing"));
    assert!(body.contains("leak"));
    assert_eq!(state.feed.latest().pending_count(), 2);
    assert_eq!(state.feed.latest().completed_count(), 0);

    let snap = state.feed.latest();
    let jane_id = snap
        .pending
        .iter()
        .find(|item| item.name == "Jane Doe")
        .and_then(|item| item.id)
        .expect("Jane's request is pending");
    let spam_id = snap
        .pending
        .iter()
        .find(|item| item.name == "Sam Spam")
        .and_then(|item| item.id)
        .expect("spam request is pending");

    // Mark Jane's request completed.
    let resp = handle(
        post_with_cookie("/requests/complete", &format!("id={jane_id}"), &cookie),
        &state,
    )
    .unwrap();
    assert_eq!(resp.status(), 302);
    assert_eq!(header_value(&resp, "Location"), "/dashboard");

    assert!(wait_until(|| state.feed.latest().completed_count() == 1));
    let body = fragment(&state, &cookie);
    assert!(body.contains("Completed by Alice A."));

    // Delete the spam request.
    let resp = handle(
        post_with_cookie("/requests/delete", &format!("id={spam_id}"), &cookie),
        &state,
    )
    .unwrap();
    assert_eq!(resp.status(), 302);

    assert!(wait_until(|| state.feed.latest().total() == 1));
    let snap = state.feed.latest();
    assert_eq!(snap.pending_count(), 0);
    assert_eq!(snap.completed_count(), 1);
    assert!(!fragment(&state, &cookie).contains("Sam Spam"));

    // Both actions left an audit trail.
    state
        .store
        .with_conn(|conn| {
            assert_eq!(count_for_request(conn, jane_id, Action::MarkCompleted), 1);
            assert_eq!(count_for_request(conn, jane_id, Action::Delete), 0);
            assert_eq!(count_for_request(conn, spam_id, Action::Delete), 1);
            Ok(())
        })
        .unwrap();
}

#[test]
fn actions_require_a_signed_in_staff_member() {
    let state = live_state("scenario_guard");
    seed_staff(&state);
    handle(post("/submit", VALID_SUBMIT), &state).unwrap();

    // Without a session both actions bounce back with an alert.
    for path in ["/requests/complete", "/requests/delete"] {
        let resp = handle(post(path, "id=1"), &state).unwrap();
        assert_eq!(resp.status(), 302);
        let location = header_value(&resp, "Location");
        assert!(location.starts_with("/dashboard?alert="));
        assert!(location.contains("sign+in"));
    }

    // Nothing was touched or logged.
    state
        .store
        .with_conn(|conn| {
            let resolved: i64 = conn
                .query_row(
                    "select count(*) from service_requests where resolved = 1",
                    [],
                    |r| r.get(0),
                )
                .unwrap();
            assert_eq!(resolved, 0);
            let logs: i64 = conn
                .query_row("select count(*) from activity_logs", [], |r| r.get(0))
                .unwrap();
            assert_eq!(logs, 0);
            Ok(())
        })
        .unwrap();
}
