// src/tests/router_tests/auth_tests.rs
use crate::router::handle;
use crate::tests::utils::*;

#[test]
fn empty_credentials_get_the_fill_in_message() {
    let state = live_state("auth_empty");
    seed_staff(&state);

    let resp = handle(post("/staff/login", "username=alice&password="), &state).unwrap();
    assert_eq!(resp.status(), 200);
    assert!(body_string(resp).contains("Please enter username and password"));
}

#[test]
fn unknown_user_and_wrong_password_read_identically() {
    let state = live_state("auth_generic");
    seed_staff(&state);

    let unknown = body_string(
        handle(post("/staff/login", "username=mallory&password=x"), &state).unwrap(),
    );
    let wrong_pw = body_string(
        handle(post("/staff/login", "username=alice&password=wrong"), &state).unwrap(),
    );

    assert!(unknown.contains("Incorrect username or password"));
    assert!(wrong_pw.contains("Incorrect username or password"));
    // neither page leaks which half failed
    assert!(!unknown.contains("mallory"));
    assert!(!wrong_pw.contains("inactive"));
}

#[test]
fn inactive_account_reads_differently() {
    let state = live_state("auth_inactive");
    seed_staff(&state);

    // bob's password is correct; the account flag alone blocks him
    let body = body_string(
        handle(post("/staff/login", "username=bob&password=secret"), &state).unwrap(),
    );
    assert!(body.contains("This staff account is inactive"));
    assert!(!body.contains("Incorrect username or password"));
}

#[test]
fn failed_login_never_echoes_the_password() {
    let state = live_state("auth_echo");
    seed_staff(&state);

    let body = body_string(
        handle(
            post("/staff/login", "username=alice&password=sw0rdfish"),
            &state,
        )
        .unwrap(),
    );
    assert!(!body.contains("sw0rdfish"));
}

#[test]
fn successful_login_sets_cookie_and_redirects_to_dashboard() {
    let state = live_state("auth_ok");
    seed_staff(&state);

    let resp = handle(
        post("/staff/login", "username=alice&password=hunter2"),
        &state,
    )
    .unwrap();
    assert_eq!(resp.status(), 302);
    assert_eq!(header_value(&resp, "Location"), "/dashboard");

    let set_cookie = header_value(&resp, "Set-Cookie");
    assert!(set_cookie.starts_with("session="));
    assert!(set_cookie.contains("HttpOnly"));

    // feed subscription came up with the session
    assert!(state.feed.is_running());
}

#[test]
fn local_mode_login_reports_store_unavailable() {
    let state = local_state("auth_local");

    let body = body_string(
        handle(post("/staff/login", "username=alice&password=pw"), &state).unwrap(),
    );
    assert!(body.contains("not available without the request database"));
}

#[test]
fn logout_clears_the_session_and_stops_the_feed() {
    let state = live_state("auth_logout");
    seed_staff(&state);

    let cookie = login_as(&state, "alice", "hunter2");
    assert!(state.feed.is_running());

    let resp = handle(post_with_cookie("/staff/logout", "", &cookie), &state).unwrap();
    assert_eq!(resp.status(), 302);
    assert_eq!(header_value(&resp, "Location"), "/");
    assert!(header_value(&resp, "Set-Cookie").contains("Max-Age=0"));

    assert!(!state.feed.is_running());
    assert!(state.sessions.is_empty());

    // the old cookie no longer opens the dashboard
    let resp = handle(get_with_cookie("/dashboard", &cookie), &state).unwrap();
    assert_eq!(resp.status(), 302);
    assert_eq!(header_value(&resp, "Location"), "/staff");
}

#[test]
fn logout_without_a_session_is_harmless() {
    let state = live_state("auth_logout_idempotent");

    let resp = handle(post("/staff/logout", ""), &state).unwrap();
    assert_eq!(resp.status(), 302);
    assert_eq!(header_value(&resp, "Location"), "/");
}
