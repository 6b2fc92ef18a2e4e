pub mod errors;
pub mod html;

pub use errors::error_to_response;
pub use html::{css_response, html_response, redirect, redirect_with_cookie};
