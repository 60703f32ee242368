//! Persistent Storage Seam
//!
//! The concrete backend (MongoDB in production) lives outside this crate;
//! startup only needs the bootstrap signal.

use anyhow::Result;
use async_trait::async_trait;

/// Backend that must be connected and prepared before the service runs.
#[async_trait]
pub trait Storage: Send + Sync {
    /// Prepare the backend: verify reachability, create indices, seed any
    /// required collections.
    async fn bootstrap(&self) -> Result<()>;
}
