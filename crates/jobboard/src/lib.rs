#![forbid(unsafe_code)]
// Allow pedantic lints for early-stage API ergonomics.
#![allow(clippy::doc_markdown)]
#![allow(clippy::nursery)]
#![allow(clippy::pedantic)]

//! # Job Board
//!
//! A terminal job-board filter screen built on [`droplist`].
//!
//! This module exposes the screen and its supporting pieces so the binary
//! and the integration tests share code.
//!
//! ## Public Modules
//!
//! - [`app`] - Screen state, update logic and view
//! - [`canvas`] - Cell grid used to compose the view
//! - [`catalog`] - Job catalog loading and localized names
//! - [`cli`] - Command-line arguments
//! - [`config`] - Runtime configuration (CLI, file, defaults)
//! - [`error`] - Application errors
//! - [`filter`] - Filter criteria and matching
//! - [`logging`] - Tracing subscriber setup
//! - [`terminal`] - Raw-mode terminal loop

pub mod app;
pub mod canvas;
pub mod catalog;
pub mod cli;
pub mod config;
pub mod error;
pub mod filter;
pub mod logging;
pub mod terminal;
