//! # MediMart server
//! This crate hosts the HTTP layer for the MediMart marketplace. It is responsible for:
//! Mapping the REST endpoints onto the engine's manager APIs.
//! Marshalling path, query and JSON body parameters.
//! Rendering every failure as the uniform `{"success": false, "message": ...}` payload.
//!
//! ## Configuration
//! The server is configured via environment variables. See [config](config/index.html) for more information.
//!
//! ## Routes
//! The server exposes the following route groups:
//! * `/health`: a health check route that returns a 200 OK response.
//! * `/orders` and `/order-items`: the order lifecycle and line-item endpoints.
//! * `/customers`, `/retailers`, `/medicines`, `/prescriptions`: CRUD for the remaining marketplace entities.

pub mod cli;
pub mod config;
pub mod data_objects;
pub mod errors;
pub mod routes;
pub mod server;

#[cfg(test)]
mod endpoint_tests;
