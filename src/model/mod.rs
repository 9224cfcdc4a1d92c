pub mod api;
pub mod auth;
pub mod common;
pub mod db;
pub mod store;
pub mod substrate;
