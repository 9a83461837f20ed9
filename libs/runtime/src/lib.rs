//! # hubpull-runtime
//!
//! Invocation of the local container runtime (`docker` by default).
//!
//! The registry client never shells out directly. Everything that touches the
//! local machine goes through [`ContainerRuntime`], which has exactly two
//! operations:
//!
//! - `login`: register registry credentials with the runtime
//! - `pull`: fetch an image reference into the runtime's local store
//!
//! [`CliRuntime`] runs the real executable; [`MockRuntime`] records calls and
//! is used wherever a real runtime must not be touched.

mod cli;
mod error;
mod mock;
mod tracker;

use async_trait::async_trait;

pub use cli::{CliRuntime, DEFAULT_RUNTIME_BINARY};
pub use error::RuntimeError;
pub use mock::{MockRuntime, RuntimeCall};
pub use tracker::{ChildGuard, ChildTracker};

/// Local container runtime interface.
#[async_trait]
pub trait ContainerRuntime: Send + Sync {
    /// Register credentials with the runtime's credential store.
    async fn login(&self, username: &str, secret: &str) -> Result<(), RuntimeError>;

    /// Pull an image reference (`namespace/name:tag`).
    async fn pull(&self, reference: &str) -> Result<(), RuntimeError>;
}
