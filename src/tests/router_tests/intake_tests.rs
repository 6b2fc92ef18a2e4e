// src/tests/router_tests/intake_tests.rs
use crate::db::requests;
use crate::errors::ServerError;
use crate::router::handle;
use crate::tests::utils::*;

fn request_count(state: &crate::state::AppState) -> i64 {
    state
        .store
        .with_conn(|conn| {
            conn.query_row("select count(*) from service_requests", [], |r| r.get(0))
                .map_err(|e| ServerError::DbError(e.to_string()))
        })
        .unwrap()
}

#[test]
fn home_page_renders_the_intake_form() {
    let state = live_state("home_form");

    let resp = handle(get("/"), &state).unwrap();
    assert_eq!(resp.status(), 200);

    let body = body_string(resp);
    assert!(body.contains("Submit a Service Request"));
    assert!(body.contains("name=\"phone\""));
    // fixed category set is presented
    assert!(body.contains("Plumbing"));
    assert!(body.contains("Electrical"));
}

#[test]
fn valid_submission_redirects_and_stores_one_row() {
    let state = live_state("submit_ok");

    let resp = handle(post("/submit", VALID_SUBMIT), &state).unwrap();
    assert_eq!(resp.status(), 302);
    assert_eq!(header_value(&resp, "Location"), "/?submitted=1");

    assert_eq!(request_count(&state), 1);
    let row = state
        .store
        .with_conn(requests::list_all_desc)
        .unwrap()
        .remove(0);
    assert_eq!(row.name, "Jane Doe");
    assert_eq!(row.category, "plumbing");
    assert!(!row.resolved);
}

#[test]
fn success_redirect_shows_the_transient_banner() {
    let state = live_state("submit_flash");

    let body = body_string(handle(get("/?submitted=1"), &state).unwrap());
    assert!(body.contains("Request submitted"));
    assert!(body.contains("flash show"));
}

#[test]
fn missing_field_blocks_with_message_and_no_write() {
    let state = live_state("submit_missing");

    let body = "name=Jane&phone=&address=1%20Main%20St&category=other&description=leak";
    let resp = handle(post("/submit", body), &state).unwrap();

    assert_eq!(resp.status(), 200);
    assert!(body_string(resp).contains("Please fill all required fields"));
    assert_eq!(request_count(&state), 0);
}

#[test]
fn local_mode_saves_and_reports_it() {
    let state = local_state("submit_local");

    let resp = handle(post("/submit", VALID_SUBMIT), &state).unwrap();
    assert_eq!(resp.status(), 302);
    assert_eq!(header_value(&resp, "Location"), "/?saved=local");

    let records = state.store.local().unwrap().records_desc().unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].1.name, "Jane Doe");

    let body = body_string(handle(get("/?saved=local"), &state).unwrap());
    assert!(body.contains("saved locally"));
}

#[test]
fn unknown_route_is_not_found() {
    let state = live_state("not_found");
    let err = handle(get("/nope"), &state).unwrap_err();
    assert!(matches!(err, ServerError::NotFound));
}
