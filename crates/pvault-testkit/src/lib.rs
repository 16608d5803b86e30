//! # pvault testkit
//!
//! An in-process fake of the vault REST API for offline integration tests.
//! It keeps everything in memory and implements the behavior client code
//! observes: schema validation, masking, archival, token selection and
//! rotation.
//!
//! ```rust,no_run
//! # async fn example() -> std::io::Result<()> {
//! let vault = pvault_testkit::FakeVault::start().await?;
//! println!("vault listening at {}", vault.base_url());
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]

pub mod error;
pub mod handlers;
pub mod masking;
pub mod middleware;
pub mod model;
pub mod routes;
pub mod state;
pub mod store;

use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

pub use error::{VaultError, VaultResult};
pub use routes::create_router;
pub use state::AppState;
pub use store::VaultStore;

/// Bearer token accepted by [`FakeVault::start`].
pub const DEFAULT_TOKEN: &str = "pvaultauth";

/// A fake vault serving on a loopback port.
///
/// The server stops when the value is dropped.
#[derive(Debug)]
pub struct FakeVault {
    addr: SocketAddr,
    token: String,
    state: Arc<AppState>,
    server: JoinHandle<()>,
}

impl FakeVault {
    /// Starts an empty vault accepting [`DEFAULT_TOKEN`].
    pub async fn start() -> std::io::Result<Self> {
        Self::start_with_token(DEFAULT_TOKEN).await
    }

    /// Starts an empty vault accepting `token`.
    pub async fn start_with_token(token: impl Into<String>) -> std::io::Result<Self> {
        let token = token.into();
        let state = Arc::new(AppState::new(token.clone()));
        let listener = TcpListener::bind(("127.0.0.1", 0)).await?;
        let addr = listener.local_addr()?;

        let app = create_router(state.clone());
        let server = tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, app).await {
                warn!(error = %e, "Fake vault stopped");
            }
        });
        debug!(%addr, "Fake vault listening");

        Ok(Self {
            addr,
            token,
            state,
            server,
        })
    }

    /// Address the vault listens on.
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Base URL for clients, e.g. `http://127.0.0.1:40123`.
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Bearer token the vault accepts.
    pub fn token(&self) -> &str {
        &self.token
    }

    /// Shared state, for inspecting the store directly.
    pub fn state(&self) -> &Arc<AppState> {
        &self.state
    }
}

impl Drop for FakeVault {
    fn drop(&mut self) {
        self.server.abort();
    }
}
