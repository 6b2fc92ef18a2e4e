pub mod activity;
pub mod requests;
pub mod staff;

pub use staff::StaffRef;
