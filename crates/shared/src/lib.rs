//! LootHub Protocol - Wire types for the HTTP API
//!
//! # Design Principles
//!
//! 1. **Minimal dependencies** - Only serde and the domain vocabulary enums
//! 2. **No business logic** - Pure data types and serialization
//! 3. **No domain ids** - ids travel as plain strings

pub mod requests;
pub mod responses;

pub use requests::{CodeFilter, CodesQuery, CreateCodeRequest, CreateNewsRequest, VerifyPinRequest};
pub use responses::{DiscoveryLogResponse, ErrorResponse};
