pub mod config;
pub mod dto;
pub mod error;
pub mod expiry;
pub mod middleware;
pub mod ml;
pub mod models;
pub mod recommend;
pub mod response;
pub mod routes;
pub mod services;
pub mod state;
pub mod store;
