pub mod bootstrap;
pub mod config;
pub mod controllers;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod store;
