//! Shared test utilities for RX09 driver integration tests.
//!
//! - `MockOpener`: `PortOpener` that counts opens and can fail them
//! - `Wire`: record of every telegram written, with timestamps
//! - `MockPort`: transport that records to a `Wire` and can fail chosen telegrams

#![allow(dead_code)] // Utilities may not all be used in every test file

use async_trait::async_trait;
use parking_lot::Mutex;
use rx09::{ConnectionRegistry, DynSerial, PortOpener};
use std::collections::HashSet;
use std::io;
use std::pin::Pin;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::task::{Context, Poll};
use std::time::Duration;
use tokio::io::{AsyncRead, AsyncWrite, ReadBuf};
use tokio::time::Instant;

/// One telegram as seen by the transport.
#[derive(Debug, Clone)]
pub struct Written {
    pub at: Instant,
    pub telegram: String,
}

/// Everything written to a mock port.
#[derive(Clone, Default)]
pub struct Wire {
    writes: Arc<Mutex<Vec<Written>>>,
    failing: Arc<Mutex<HashSet<String>>>,
}

impl Wire {
    /// Make writes of exactly `telegram` fail with a broken pipe.
    pub fn fail_on(&self, telegram: &str) {
        self.failing.lock().insert(telegram.to_string());
    }

    pub fn writes(&self) -> Vec<Written> {
        self.writes.lock().clone()
    }

    pub fn telegrams(&self) -> Vec<String> {
        self.writes.lock().iter().map(|w| w.telegram.clone()).collect()
    }

    pub fn contains(&self, telegram: &str) -> bool {
        self.writes.lock().iter().any(|w| w.telegram == telegram)
    }
}

/// Write-only transport backed by a `Wire`.
pub struct MockPort {
    wire: Wire,
}

impl AsyncWrite for MockPort {
    fn poll_write(
        self: Pin<&mut Self>,
        _cx: &mut Context<'_>,
        buf: &[u8],
    ) -> Poll<io::Result<usize>> {
        let telegram = String::from_utf8_lossy(buf).into_owned();
        if self.wire.failing.lock().contains(&telegram) {
            return Poll::Ready(Err(io::Error::new(
                io::ErrorKind::BrokenPipe,
                format!("injected failure for {:?}", telegram),
            )));
        }
        self.wire.writes.lock().push(Written {
            at: Instant::now(),
            telegram,
        });
        Poll::Ready(Ok(buf.len()))
    }

    fn poll_flush(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<io::Result<()>> {
        Poll::Ready(Ok(()))
    }

    fn poll_shutdown(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<io::Result<()>> {
        Poll::Ready(Ok(()))
    }
}

impl AsyncRead for MockPort {
    fn poll_read(
        self: Pin<&mut Self>,
        _cx: &mut Context<'_>,
        _buf: &mut ReadBuf<'_>,
    ) -> Poll<io::Result<()>> {
        // The RX09 never answers.
        Poll::Ready(Ok(()))
    }
}

/// Opener handing out `MockPort`s that all share one `Wire`.
pub struct MockOpener {
    pub wire: Wire,
    opens: AtomicUsize,
    fail: bool,
}

impl MockOpener {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            wire: Wire::default(),
            opens: AtomicUsize::new(0),
            fail: false,
        })
    }

    /// Opener whose every open fails.
    pub fn failing() -> Arc<Self> {
        Arc::new(Self {
            wire: Wire::default(),
            opens: AtomicUsize::new(0),
            fail: true,
        })
    }

    pub fn opens(&self) -> usize {
        self.opens.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PortOpener for MockOpener {
    async fn open(&self, path: &str) -> io::Result<DynSerial> {
        self.opens.fetch_add(1, Ordering::SeqCst);
        // Opening completes on a later poll, like a real device open.
        tokio::task::yield_now().await;
        if self.fail {
            return Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("no such device: {}", path),
            ));
        }
        Ok(Box::new(MockPort {
            wire: self.wire.clone(),
        }))
    }
}

/// Registry backed by `opener`.
pub fn registry(opener: &Arc<MockOpener>) -> Arc<ConnectionRegistry> {
    Arc::new(ConnectionRegistry::new(opener.clone()))
}

/// Assert every pair of consecutive writes is at least `spacing` apart.
pub fn assert_spaced(writes: &[Written], spacing: Duration) {
    for pair in writes.windows(2) {
        let gap = pair[1].at.duration_since(pair[0].at);
        assert!(
            gap >= spacing,
            "{:?} followed {:?} after only {:?}",
            pair[1].telegram,
            pair[0].telegram,
            gap
        );
    }
}
