//! Winlay catalog browser library
//!
//! Fetches the Winlay catalogs (app store, OS downloads, Thunder OS images and
//! the event calendar) from static JSON documents, caches each one for the life
//! of the process, filters them by search query and lays out the event calendar.
//! The terminal interface in `app` and `ui` is built on top of these pieces.

pub mod app;
pub mod cache;
pub mod calendar;
pub mod catalog;
pub mod cli;
pub mod filter;
pub mod listing;
pub mod loader;
pub mod logging;
pub mod ui;
