pub mod dashboard;
pub mod home;
pub mod staff_login;

pub use dashboard::{dashboard_page, requests_fragment, DashboardVm};
pub use home::{home_page, HomeNotice};
pub use staff_login::staff_login_page;
