// src/templates/pages/dashboard.rs
use maud::{html, Markup, PreEscaped};

use crate::feed::{FeedItem, FeedSnapshot};
use crate::templates::components::{alert_box, stat_box};
use crate::templates::desktop_layout;

pub struct DashboardVm {
    pub staff_name: String,
    /// Outcome of the last action, carried over the redirect.
    pub alert: Option<String>,
}

pub fn dashboard_page(
    vm: &DashboardVm,
    snapshot: &FeedSnapshot,
    feed_error: Option<&str>,
) -> Markup {
    desktop_layout(
        "Dashboard",
        html! {
            main class="container" {
                div class="dash-header" {
                    h1 { "Service Requests Dashboard, " (vm.staff_name) }
                    form method="post" action="/staff/logout" {
                        button type="submit" class="btn-logout" { "Log out" }
                    }
                }

                @if let Some(msg) = &vm.alert {
                    (alert_box(msg))
                }

                div id="feed" {
                    (requests_fragment(snapshot, feed_error))
                }

                // Pull the latest rendered snapshot every couple of seconds.
                script {
                    (PreEscaped(r#"
                    setInterval(function () {
                      fetch('/dashboard/requests')
                        .then(function (r) { return r.ok ? r.text() : null; })
                        .then(function (t) {
                          if (t !== null) document.getElementById('feed').innerHTML = t;
                        })
                        .catch(function () {});
                    }, 2000);
                    "#))
                }
            }
        },
    )
}

/// Counters plus both lists, rebuilt from scratch for every snapshot.
pub fn requests_fragment(snapshot: &FeedSnapshot, feed_error: Option<&str>) -> Markup {
    html! {
        @if let Some(msg) = feed_error {
            (alert_box(&format!("Realtime error: {msg}")))
        }

        div class="stats" {
            (stat_box("Pending", snapshot.pending_count()))
            (stat_box("Completed", snapshot.completed_count()))
            (stat_box("Total", snapshot.total()))
        }

        section {
            h2 { "Pending" }
            @if snapshot.pending.is_empty() {
                p class="muted" { "No pending requests." }
            }
            @for item in &snapshot.pending {
                (pending_card(item))
            }
        }

        section {
            h2 { "Completed" }
            @if snapshot.completed.is_empty() {
                p class="muted" { "Nothing completed yet." }
            }
            @for item in &snapshot.completed {
                (completed_card(item))
            }
        }
    }
}

fn request_meta(item: &FeedItem) -> Markup {
    html! {
        div class="meta" { "📞 " (item.phone) " • " (item.category) }
        div class="desc" {
            "Description:"
            div class="muted" { (item.description) }
        }
    }
}

fn pending_card(item: &FeedItem) -> Markup {
    html! {
        div class="request card" {
            strong { (item.name) }
            div class="meta" { "Submitted: " (item.submitted) }
            (request_meta(item))

            @if let Some(id) = item.id {
                div class="actions" {
                    form method="post" action="/requests/complete" {
                        input type="hidden" name="id" value=(id);
                        button type="submit" class="btn-complete" { "Mark as Completed" }
                    }
                    form method="post" action="/requests/delete"
                         onsubmit="return confirm('Delete this request?')" {
                        input type="hidden" name="id" value=(id);
                        button type="submit" class="btn-delete" { "Delete" }
                    }
                }
            }
        }
    }
}

fn completed_card(item: &FeedItem) -> Markup {
    html! {
        div class="request card completed" {
            strong { (item.name) }
            div class="meta" {
                "Completed"
                @if let Some(who) = &item.completed_by {
                    " • Completed by " (who)
                }
            }
            (request_meta(item))
        }
    }
}
