// src/templates/layouts/desktop.rs
use maud::{html, Markup, DOCTYPE};

pub fn desktop_layout(title: &str, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) " — Service Desk" }
                link rel="stylesheet" href="/static/main.css";
            }
            body {
                header class="topbar" {
                    h3 { a href="/" { "Service Desk" } }
                    nav {
                        ul {
                            li { a href="/" { "New Request" } }
                            li { a href="/staff" { "Staff" } }
                        }
                    }
                }
                (content)
            }
        }
    }
}
