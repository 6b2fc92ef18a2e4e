// src/templates/pages/staff_login.rs
use maud::{html, Markup};

use crate::templates::desktop_layout;

/// Sign-in form. A failed attempt re-renders this with the error text;
/// the password field always comes back empty.
pub fn staff_login_page(error: Option<&str>) -> Markup {
    desktop_layout(
        "Staff Sign-in",
        html! {
            main class="container narrow" {
                h1 { "Staff Sign-in" }

                @if let Some(msg) = error {
                    p class="error" { (msg) }
                }

                form class="card" method="post" action="/staff/login" {
                    label for="username" { "Username" }
                    input type="text" id="username" name="username" autocomplete="username";

                    label for="password" { "Password" }
                    input type="password" id="password" name="password" autocomplete="current-password";

                    button type="submit" { "Sign in" }
                }
            }
        },
    )
}
