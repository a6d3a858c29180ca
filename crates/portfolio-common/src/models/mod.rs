pub mod auth;
pub mod certificate;
