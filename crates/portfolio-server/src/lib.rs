pub mod auth;
pub mod config;
pub mod login;
pub mod state;
pub mod store;
pub mod token;
pub mod web;
