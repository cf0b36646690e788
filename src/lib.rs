//! Highscore board service: a bounded, always-sorted board of top scores
//! served over HTTP and persisted as a JSON snapshot.
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod presentation;
