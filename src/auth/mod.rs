pub mod login;
pub mod sessions;

pub use login::{login, LoginError};
pub use sessions::SessionRegistry;
