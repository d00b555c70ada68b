//! storyworld - browse, validate, and edit a storyworld's JSON documents
//!
//! A storyworld is a root directory with `characters/`, `scenes/`, and
//! `locations/` folders of JSON documents plus an optional `schemas/`
//! folder. Settings and schemas are loaded once into an [`app::AppState`]
//! and passed to the loader, validator, and editor explicitly.

pub mod app;
pub mod cli;
pub mod config;
pub mod editor;
pub mod entity;
pub mod http_server;
pub mod loader;
pub mod observability;
pub mod render;
pub mod schema;
