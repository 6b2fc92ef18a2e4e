// src/templates/components/mod.rs
use maud::{html, Markup};

pub fn alert_box(message: &str) -> Markup {
    html! {
        div class="alert" role="alert" { (message) }
    }
}

pub fn stat_box(label: &str, value: usize) -> Markup {
    html! {
        div class="stat" {
            div class="stat-value" { (value) }
            div class="stat-label" { (label) }
        }
    }
}

/// Transient success banner; fades out after ~3.5s via the CSS animation.
pub fn flash(message: &str) -> Markup {
    html! {
        div class="flash show" { (message) }
    }
}
