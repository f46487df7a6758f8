//! HTTP client for the Xtrack API.
//!
//! [`XtrackClient`] wraps every endpoint with typed requests and responses.
//! [`TokenStore`] keeps the bearer token between runs.

mod token_store;
mod xtrack_client;

pub use token_store::{TOKEN_KEY, TokenStore};
pub use xtrack_client::{LOCAL_BASE_URL, REMOTE_BASE_URL, XtrackClient, base_url_for_host};
