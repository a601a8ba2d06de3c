//! LootHub Engine library.
//!
//! Server-side code for the LootHub catalog.
//!
//! ## Structure
//!
//! - `repositories/` - Code and news collections over the key-value store
//! - `use_cases/` - Operator flows (PIN gate, discovery log)
//! - `infrastructure/` - External dependency implementations (ports + adapters)
//! - `api/` - HTTP entry points
//! - `app` - Application composition

pub mod api;
pub mod app;
pub mod infrastructure;
pub mod repositories;
pub mod use_cases;

pub use app::App;
