//! Integration test suite for the blueprint console
//!
//! ```bash
//! cargo test --test integration
//! ```
//!
//! # Test Organization
//!
//! - **registry**: notification handling, eviction and concurrent writers
//! - **ordering**: display order of containers and recipes
//! - **rendering**: the HTML page through the plugin lifecycle
//! - **cli**: the `bpconsole` binary end to end

mod common;

mod cli;
mod ordering;
mod registry;
mod rendering;
