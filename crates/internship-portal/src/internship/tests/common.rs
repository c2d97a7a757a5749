use std::io;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use axum::response::Response;
use serde_json::Value;
use tokio::sync::Semaphore;
use tracing::subscriber::DefaultGuard;
use tracing_subscriber::fmt::MakeWriter;

use crate::backend::{ApplicationStore, BackendError, PositionSource};
use crate::internship::{ApplicationDraft, ApplicationRow, PositionCategory};

/// Scripted result for the catalog read.
#[derive(Debug, Clone)]
pub(super) enum Scripted {
    Positions(Vec<PositionCategory>),
    Aborted,
    Unavailable,
}

/// Backend double whose responses can be held in flight until released.
pub(super) struct ScriptedBackend {
    script: Scripted,
    fail_inserts: bool,
    gate: Option<Semaphore>,
    pub(super) fetches: AtomicUsize,
    pub(super) inserted: Mutex<Vec<ApplicationRow>>,
}

impl ScriptedBackend {
    pub(super) fn new(script: Scripted) -> Self {
        Self {
            script,
            fail_inserts: false,
            gate: None,
            fetches: AtomicUsize::new(0),
            inserted: Mutex::new(Vec::new()),
        }
    }

    pub(super) fn failing_inserts(mut self) -> Self {
        self.fail_inserts = true;
        self
    }

    /// Calls block until [`release`](Self::release) hands out a permit.
    pub(super) fn gated(mut self) -> Self {
        self.gate = Some(Semaphore::new(0));
        self
    }

    pub(super) fn release(&self) {
        if let Some(gate) = &self.gate {
            gate.add_permits(1);
        }
    }

    pub(super) fn inserted(&self) -> Vec<ApplicationRow> {
        self.inserted.lock().expect("rows mutex poisoned").clone()
    }

    async fn wait(&self) {
        if let Some(gate) = &self.gate {
            gate.acquire().await.expect("gate open").forget();
        }
    }
}

impl PositionSource for ScriptedBackend {
    async fn fetch_positions(&self) -> Result<Vec<PositionCategory>, BackendError> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        self.wait().await;
        match &self.script {
            Scripted::Positions(positions) => Ok(positions.clone()),
            Scripted::Aborted => Err(BackendError::Aborted),
            Scripted::Unavailable => Err(BackendError::Unavailable("scripted outage".into())),
        }
    }
}

impl ApplicationStore for ScriptedBackend {
    async fn insert_application(&self, row: ApplicationRow) -> Result<(), BackendError> {
        self.inserted.lock().expect("rows mutex poisoned").push(row);
        self.wait().await;
        if self.fail_inserts {
            Err(BackendError::Status {
                status: 503,
                body: "scripted failure".into(),
            })
        } else {
            Ok(())
        }
    }
}

pub(super) fn remote_catalog() -> Vec<PositionCategory> {
    vec![
        PositionCategory {
            title: "Backend".to_string(),
            items: vec!["Rust Developer".to_string()],
        },
        PositionCategory {
            title: "Sales".to_string(),
            items: Vec::new(),
        },
    ]
}

pub(super) fn valid_draft() -> ApplicationDraft {
    ApplicationDraft {
        first_name: "A".to_string(),
        last_name: "B".to_string(),
        email: "a@b.com".to_string(),
        position: "Sales".to_string(),
    }
}

pub(super) fn backend(script: Scripted) -> Arc<ScriptedBackend> {
    Arc::new(ScriptedBackend::new(script))
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body readable");
    serde_json::from_slice(&bytes).expect("json body")
}

/// Formatted log output captured for the current thread.
#[derive(Clone, Default)]
pub(super) struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

impl CapturedLogs {
    /// Routes events on this thread into the buffer until the guard drops. Tests using it
    /// must run on the current-thread runtime.
    pub(super) fn install(&self) -> DefaultGuard {
        let subscriber = tracing_subscriber::fmt()
            .with_writer(self.clone())
            .with_max_level(tracing::Level::DEBUG)
            .with_ansi(false)
            .finish();
        tracing::subscriber::set_default(subscriber)
    }

    pub(super) fn contents(&self) -> String {
        let bytes = self.0.lock().expect("log buffer poisoned");
        String::from_utf8_lossy(&bytes).into_owned()
    }
}

impl io::Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0
            .lock()
            .expect("log buffer poisoned")
            .extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for CapturedLogs {
    type Writer = CapturedLogs;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}
