//! Coordinating services between the HTTP layer and the stores.

pub mod projects;
