// src/router.rs
use astra::Request;
use std::collections::HashMap;
use std::io::Read;

use crate::actions;
use crate::auth;
use crate::clock;
use crate::db::staff::StaffRef;
use crate::errors::{ResultResp, ServerError};
use crate::intake::{self, IntakeForm, SubmitOutcome};
use crate::responses::{css_response, html_response, redirect, redirect_with_cookie};
use crate::state::AppState;
use crate::templates::pages::{
    dashboard_page, home_page, requests_fragment, staff_login_page, DashboardVm, HomeNotice,
};

pub fn handle(req: Request, state: &AppState) -> ResultResp {
    let method = req.method().as_str().to_string();
    let path = req.uri().path().to_string();

    match (method.as_str(), path.as_str()) {
        ("GET", "/") => {
            let params = parse_query(&req);
            let notice = if params.contains_key("submitted") {
                HomeNotice::Submitted
            } else if params.contains_key("saved") {
                HomeNotice::SavedLocally
            } else {
                HomeNotice::None
            };
            html_response(home_page(&notice))
        }
        ("GET", "/static/main.css") => css_response(include_str!("../static/main.css")),

        ("POST", "/submit") => submit_request(req, state),

        ("GET", "/staff") => html_response(staff_login_page(None)),
        ("POST", "/staff/login") => staff_login(req, state),
        ("POST", "/staff/logout") => staff_logout(req, state),

        ("GET", "/dashboard") => dashboard(req, state),
        ("GET", "/dashboard/requests") => dashboard_fragment(req, state),

        ("POST", "/requests/complete") => request_action(req, state, RequestAction::Complete),
        ("POST", "/requests/delete") => request_action(req, state, RequestAction::Delete),

        _ => Err(ServerError::NotFound),
    }
}

/* ---------- customer intake ---------- */

fn submit_request(req: Request, state: &AppState) -> ResultResp {
    let form = parse_form(req)?;
    let intake_form = IntakeForm {
        name: field(&form, "name"),
        phone: field(&form, "phone"),
        address: field(&form, "address"),
        category: field(&form, "category"),
        description: field(&form, "description"),
    };

    match intake::submit(&state.store, &intake_form, clock::now_unix()) {
        Ok(SubmitOutcome::Stored) => redirect("/?submitted=1"),
        Ok(SubmitOutcome::SavedLocally) => redirect("/?saved=local"),
        Err(e) => {
            if !matches!(e, intake::IntakeError::MissingFields) {
                tracing::error!("submit failed: {e}");
            }
            html_response(home_page(&HomeNotice::Error(e.to_string())))
        }
    }
}

/* ---------- staff session ---------- */

fn staff_login(req: Request, state: &AppState) -> ResultResp {
    let form = parse_form(req)?;
    let username = field(&form, "username");
    let password = field(&form, "password");

    match auth::login(&state.store, &username, &password) {
        Ok(identity) => {
            tracing::info!(staff = %identity.username, "staff signed in");
            state.feed.start(&state.store);
            let token = state.sessions.create(identity);
            redirect_with_cookie(
                "/dashboard",
                &format!("session={token}; Path=/; HttpOnly"),
            )
        }
        Err(e) => {
            if let auth::LoginError::Store(inner) = &e {
                tracing::error!("staff login error: {inner}");
            }
            html_response(staff_login_page(Some(&e.to_string())))
        }
    }
}

fn staff_logout(req: Request, state: &AppState) -> ResultResp {
    if let Some(token) = session_token(&req) {
        state.sessions.remove(&token);
    }
    state.feed.stop();
    redirect_with_cookie("/", "session=; Path=/; Max-Age=0")
}

/* ---------- staff dashboard ---------- */

fn dashboard(req: Request, state: &AppState) -> ResultResp {
    let Some(staff) = current_staff(&req, state) else {
        return redirect("/staff");
    };

    // Entering the dashboard (re-)establishes the subscription if the
    // last one ended; a live feed is left alone.
    if !state.feed.is_running() {
        state.feed.start(&state.store);
    }

    let vm = DashboardVm {
        staff_name: staff.display_name,
        alert: parse_query(&req).remove("alert"),
    };
    let snapshot = state.feed.latest();
    let error = state.feed.error();
    html_response(dashboard_page(&vm, &snapshot, error.as_deref()))
}

fn dashboard_fragment(req: Request, state: &AppState) -> ResultResp {
    if current_staff(&req, state).is_none() {
        return Err(ServerError::Unauthorized("please sign in".into()));
    }
    let snapshot = state.feed.latest();
    let error = state.feed.error();
    html_response(requests_fragment(&snapshot, error.as_deref()))
}

/* ---------- request actions ---------- */

enum RequestAction {
    Complete,
    Delete,
}

fn request_action(req: Request, state: &AppState, action: RequestAction) -> ResultResp {
    let staff = current_staff(&req, state);
    let form = parse_form(req)?;
    let id: i64 = field(&form, "id")
        .parse()
        .map_err(|_| ServerError::BadRequest("bad request id".into()))?;

    let now = clock::now_unix();
    let result = match action {
        RequestAction::Complete => {
            actions::mark_completed(&state.store, staff.as_ref(), id, now)
        }
        RequestAction::Delete => actions::delete_request(&state.store, staff.as_ref(), id, now),
    };

    match result {
        Ok(()) => redirect("/dashboard"),
        Err(e) => {
            tracing::warn!(request_id = id, "action failed: {e}");
            let query: String = url::form_urlencoded::Serializer::new(String::new())
                .append_pair("alert", &e.to_string())
                .finish();
            redirect(&format!("/dashboard?{query}"))
        }
    }
}

/* ---------- request plumbing ---------- */

fn field(form: &HashMap<String, String>, name: &str) -> String {
    form.get(name).cloned().unwrap_or_default()
}

fn parse_query(req: &Request) -> HashMap<String, String> {
    url::form_urlencoded::parse(req.uri().query().unwrap_or("").as_bytes())
        .into_owned()
        .collect()
}

fn parse_form(req: Request) -> Result<HashMap<String, String>, ServerError> {
    let mut body = req.into_body();
    let mut buf = Vec::new();
    body.reader()
        .read_to_end(&mut buf)
        .map_err(|e| ServerError::BadRequest(format!("unreadable body: {e}")))?;
    Ok(url::form_urlencoded::parse(&buf).into_owned().collect())
}

fn session_token(req: &Request) -> Option<String> {
    let cookies = req.headers().get("Cookie")?.to_str().ok()?;
    cookies.split(';').find_map(|pair| {
        let (name, value) = pair.trim().split_once('=')?;
        (name == "session").then(|| value.to_string())
    })
}

fn current_staff(req: &Request, state: &AppState) -> Option<StaffRef> {
    state.sessions.get(&session_token(req)?)
}
