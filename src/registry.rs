//! Connection registry keyed by device path.
//!
//! Every channel of every controller bound to the same path writes through one
//! shared port. The registry stores a shared future per path, so the first
//! `acquire` starts the open and all other callers (concurrent or later) wait
//! on that same attempt and observe the same port or the same failure.
//!
//! Entries live as long as the registry. A failed open stays cached; there is
//! no reconnection.

use crate::error::{Result, Rx09Error};
use crate::serial::{wrap_shared, PortOpener, SharedPort};
use futures::future::{BoxFuture, FutureExt, Shared};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// In-flight or completed open for one device path.
type PendingPort = Shared<BoxFuture<'static, Result<SharedPort>>>;

/// Registry of serial connections, at most one open attempt per path.
///
/// Controllers that must share a port have to share the same registry
/// instance (`Arc<ConnectionRegistry>`).
pub struct ConnectionRegistry {
    opener: Arc<dyn PortOpener>,
    ports: Mutex<HashMap<String, PendingPort>>,
}

impl ConnectionRegistry {
    /// Create an empty registry that opens ports with `opener`.
    pub fn new(opener: Arc<dyn PortOpener>) -> Self {
        Self {
            opener,
            ports: Mutex::new(HashMap::new()),
        }
    }

    /// Process-wide registry backed by real serial ports.
    ///
    /// Used by [`Controller::new`](crate::Controller::new).
    #[cfg(feature = "serial")]
    pub fn global() -> Arc<Self> {
        use std::sync::OnceLock;

        static GLOBAL: OnceLock<Arc<ConnectionRegistry>> = OnceLock::new();
        GLOBAL
            .get_or_init(|| Arc::new(Self::new(Arc::new(crate::serial::NativeOpener))))
            .clone()
    }

    /// Get the port for `path`, opening it on first use.
    pub async fn acquire(&self, path: &str) -> Result<SharedPort> {
        let pending = {
            let mut ports = self.ports.lock();
            ports
                .entry(path.to_string())
                .or_insert_with(|| self.open_once(path))
                .clone()
        };
        pending.await
    }

    fn open_once(&self, path: &str) -> PendingPort {
        let opener = Arc::clone(&self.opener);
        let path = path.to_string();
        tracing::debug!(port = %path, "Registering RX09 port");

        async move {
            match opener.open(&path).await {
                Ok(port) => {
                    tracing::info!(port = %path, "RX09 port ready");
                    Ok(wrap_shared(port))
                }
                Err(e) => {
                    tracing::warn!(port = %path, error = %e, "RX09 port failed to open");
                    Err(Rx09Error::connection_open(path, e))
                }
            }
        }
        .boxed()
        .shared()
    }

    /// Whether an open has been started for `path`.
    pub fn is_registered(&self, path: &str) -> bool {
        self.ports.lock().contains_key(path)
    }

    /// Number of paths with an open attempt, including failed ones.
    pub fn port_count(&self) -> usize {
        self.ports.lock().len()
    }
}

impl fmt::Debug for ConnectionRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ports = self.ports.lock();
        f.debug_struct("ConnectionRegistry")
            .field("paths", &ports.keys().collect::<Vec<_>>())
            .finish()
    }
}
