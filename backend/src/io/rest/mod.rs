//! # REST API Interface Layer
//!
//! HTTP endpoints for the baby tracker. Handlers are thin: extract the
//! session user, map the request DTO to a domain command, call one service
//! operation, map the result back to a DTO.
//!
//! ## Error Mapping
//!
//! | Error | Status |
//! |---|---|
//! | missing `X-User-Id` | 401 |
//! | `DomainError::Validation` | 400 |
//! | `DomainError::ProfileRequired`, `DomainError::NotFound` | 404 |
//! | `DomainError::AlreadyAdministered` | 409 |
//! | anything else | 500 with a generic message |

pub mod dashboard_apis;
pub mod errors;
pub mod growth_apis;
pub mod journal_apis;
pub mod mappers;
pub mod milestone_apis;
pub mod profile_apis;
pub mod session;
pub mod vaccination_apis;

pub use dashboard_apis::*;
pub use growth_apis::*;
pub use journal_apis::*;
pub use milestone_apis::*;
pub use profile_apis::*;
pub use session::SessionUser;
pub use vaccination_apis::*;
