//! # hubpull-registry
//!
//! Client for the Docker Hub HTTP API.
//!
//! ## Flow
//!
//! 1. [`Credentials`] are resolved by the caller and wrapped in a [`HubConfig`]
//! 2. [`HubClient::connect`] exchanges them for a bearer [`Token`] (one call,
//!    no retries); a client only exists once it holds a token
//! 3. The client lists repositories and tags (page 1, 25 items, newest first)
//! 4. [`select_pull_target`] picks the first tag that has a platform image
//! 5. [`workflow`] hands the reference to a
//!    [`ContainerRuntime`](hubpull_runtime::ContainerRuntime)
//!
//! Tokens are never refreshed. Everything runs strictly in sequence.

mod client;
mod config;
mod error;
mod select;
mod session;
mod types;

pub mod workflow;

pub use client::{HubClient, PAGE_SIZE};
pub use config::{ConfigError, Credentials, HubConfig, DEFAULT_API_URL, DEFAULT_TIMEOUT};
pub use error::RegistryError;
pub use select::{image_reference, select_pull_target};
pub use session::{authenticate, Token};
pub use types::*;
