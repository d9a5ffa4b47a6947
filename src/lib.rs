//! Course administration service: owners arrange the modules of a course and
//! the contents of each module, and every drag-and-drop reorder is persisted
//! through a small JSON endpoint.

pub mod application;
pub mod config;
pub mod domain;
pub mod infra;
pub mod presentation;
