// src/templates/pages/home.rs
use maud::{html, Markup};

use crate::catalog::REQUEST_TYPES;
use crate::templates::components::flash;
use crate::templates::desktop_layout;

/// Banner state for the intake page after a redirect or a failed submit.
pub enum HomeNotice {
    None,
    Submitted,
    SavedLocally,
    Error(String),
}

pub fn home_page(notice: &HomeNotice) -> Markup {
    desktop_layout(
        "Submit a Request",
        html! {
            main class="container narrow" {
                h1 { "Submit a Service Request" }
                p class="lead" {
                    "Tell us what needs fixing and our staff will take it from there."
                }

                @match notice {
                    HomeNotice::Submitted => { (flash("Request submitted. Thank you!")) }
                    HomeNotice::SavedLocally => { (flash("Request saved locally (no database configured)")) }
                    HomeNotice::Error(msg) => { div class="alert" role="alert" { (msg) } }
                    HomeNotice::None => {}
                }

                form class="card" method="post" action="/submit" {
                    label for="name" { "Name *" }
                    input type="text" id="name" name="name" required;

                    label for="phone" { "Phone *" }
                    input type="text" id="phone" name="phone" required;

                    label for="address" { "Address *" }
                    input type="text" id="address" name="address" required;

                    label for="category" { "Category" }
                    select id="category" name="category" {
                        @for (value, label) in REQUEST_TYPES {
                            option value=(value) { (label) }
                        }
                    }

                    label for="description" { "Description *" }
                    textarea id="description" name="description" rows="4" required {}

                    button type="submit" { "Submit Request" }
                }
            }
        },
    )
}
