// src/tests/utils.rs
use astra::{Body, Request, Response};
use http::Method;
use std::io::Read;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use crate::config::Config;
use crate::db::staff::insert_staff;
use crate::router::handle;
use crate::state::AppState;
use crate::store::Store;

fn nanos() -> u128 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos()
}

/// Fresh live store on a throwaway sqlite file, using the production
/// schema.
pub fn live_store(tag: &str) -> Store {
    let cfg = Config {
        db_path: std::env::temp_dir().join(format!("service_desk_{tag}_{}.sqlite", nanos())),
        ..Config::default()
    };
    let store = Store::open(&cfg);
    assert!(store.is_live(), "test store failed to open");
    store
}

/// Store in degraded local mode, backed by a throwaway JSON file.
pub fn local_store(tag: &str) -> Store {
    let path = std::env::temp_dir().join(format!("service_desk_{tag}_{}.json", nanos()));
    Store::local_only(&path)
}

pub fn live_state(tag: &str) -> AppState {
    AppState::new(live_store(tag))
}

pub fn local_state(tag: &str) -> AppState {
    AppState::new(local_store(tag))
}

/// Poll `cond` for up to two seconds; the feed applies snapshots on a
/// background thread.
pub fn wait_until(cond: impl Fn() -> bool) -> bool {
    let deadline = Instant::now() + Duration::from_secs(2);
    while Instant::now() < deadline {
        if cond() {
            return true;
        }
        std::thread::sleep(Duration::from_millis(10));
    }
    cond()
}

/* ---------- request builders ---------- */

pub fn get(path: &str) -> Request {
    let mut req = Request::new(Body::empty());
    *req.method_mut() = Method::GET;
    *req.uri_mut() = path.parse().unwrap();
    req
}

pub fn get_with_cookie(path: &str, cookie: &str) -> Request {
    let mut req = get(path);
    req.headers_mut()
        .insert("Cookie", cookie.parse().unwrap());
    req
}

pub fn post(path: &str, body: &str) -> Request {
    let mut req = Request::new(Body::new(body.to_string()));
    *req.method_mut() = Method::POST;
    *req.uri_mut() = path.parse().unwrap();
    req.headers_mut().insert(
        "Content-Type",
        "application/x-www-form-urlencoded".parse().unwrap(),
    );
    req
}

pub fn post_with_cookie(path: &str, body: &str, cookie: &str) -> Request {
    let mut req = post(path, body);
    req.headers_mut()
        .insert("Cookie", cookie.parse().unwrap());
    req
}

/* ---------- response helpers ---------- */

pub fn body_string(resp: Response) -> String {
    let mut body = resp.into_body();
    let mut buf = String::new();
    body.reader().read_to_string(&mut buf).unwrap();
    buf
}

pub fn header_value(resp: &Response, name: &str) -> String {
    resp.headers()
        .get(name)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_string()
}

/// The "session=<token>" pair from a login response, usable as a Cookie
/// header value.
pub fn session_cookie(resp: &Response) -> String {
    header_value(resp, "Set-Cookie")
        .split(';')
        .next()
        .unwrap_or("")
        .to_string()
}

/* ---------- fixtures ---------- */

/// Standard staff fixtures: alice (active, display name), bob (inactive).
pub fn seed_staff(state: &AppState) {
    state
        .store
        .with_conn(|conn| {
            insert_staff(conn, "alice", "hunter2", Some("Alice A."), None);
            insert_staff(conn, "bob", "secret", Some("Bob"), Some(false));
            Ok(())
        })
        .unwrap();
}

/// Sign in through the router and hand back the session cookie.
pub fn login_as(state: &AppState, username: &str, password: &str) -> String {
    let resp = handle(
        post(
            "/staff/login",
            &format!("username={username}&password={password}"),
        ),
        state,
    )
    .unwrap();
    assert_eq!(resp.status(), 302, "login should redirect");
    let cookie = session_cookie(&resp);
    assert!(cookie.starts_with("session="));
    cookie
}

pub const VALID_SUBMIT: &str =
    "name=Jane%20Doe&phone=555-1234&address=1%20Main%20St&category=plumbing&description=leak";
