//! # Colegio API
//!
//! A school-management REST API built with Rust, Axum and PostgreSQL.
//! Three account roles — students, parents and professors — share one
//! authentication and token-lifecycle implementation, surrounded by the
//! academic modules (subjects, grades, attendance).
//!
//! ## Architecture
//!
//! ```text
//! src/
//! ├── config/           # Env-driven configuration (database, JWT, SMTP, CORS)
//! ├── middleware/       # Bearer-token extractor
//! ├── modules/          # Feature modules
//! │   ├── accounts/    # Shared credential record, store seam, account service
//! │   ├── auth/        # Gateway: role-dispatched login and refresh
//! │   ├── students/    # Student accounts + recovery endpoints
//! │   ├── parents/     # Parent accounts + linked students
//! │   ├── professors/  # Professor accounts + taught subjects
//! │   ├── subjects/    # Subjects with timetable slots
//! │   ├── grades/      # Grade records
//! │   └── attendance/  # Attendance sessions and percentages
//! └── utils/            # Errors, JWT, password hashing, recovery codes, mail, clock
//! ```
//!
//! Each feature module follows the same structure: `controller.rs` (HTTP
//! handlers), `service.rs` (business logic), `model.rs` (rows and DTOs),
//! `router.rs` (route wiring).
//!
//! ## Sessions
//!
//! Each account holds at most one active session: login and refresh
//! unconditionally overwrite the stored token pair, and a refresh token is
//! only honored while it equals the stored one. Access tokens live for an
//! hour, refresh tokens for seven days.
//!
//! ## Password recovery
//!
//! A recovery request emails a 6-character single-use code valid for one
//! hour; resetting the password consumes the code.

pub mod config;
pub mod docs;
pub mod logging;
pub mod middleware;
pub mod modules;
pub mod router;
pub mod state;
pub mod utils;
pub mod validator;

#[cfg(any(test, feature = "test-utils"))]
pub mod testing;
