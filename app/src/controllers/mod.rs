pub mod home;
pub mod stats;
pub mod user;
