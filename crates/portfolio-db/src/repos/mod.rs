pub mod certificate;
pub mod user;
