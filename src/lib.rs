//! # Frontdoor
//!
//! Startup configuration core for the cloudpipe front door service. A
//! process instance may serve the web front-end, run the job runner worker,
//! or both; this crate resolves which, along with everything else the
//! service needs to start:
//!
//! - Environment-driven settings with layered defaults and validation
//! - The startup orchestrator (log level first, then storage bootstrap)
//! - Collaborator seams for storage and telemetry
//!
//! ## Module Structure
//!
//! ```text
//! frontdoor/
//! +-- config/     Settings resolution from the environment
//! +-- shared/     Common utilities (errors)
//! +-- startup     Startup orchestration and shared state
//! +-- storage     Persistent storage bootstrap seam
//! +-- telemetry   Structured logging setup
//! ```

// Configuration module
pub mod config;

// Shared utilities
pub mod shared;

// Application startup and state management
pub mod startup;

// Storage collaborator seam
pub mod storage;

// Telemetry and observability
pub mod telemetry;
