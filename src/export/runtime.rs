//! Timeout-bounded export runtime.
//!
//! Closure providers block on I/O and cannot be cancelled mid-call. The
//! runtime runs each export on a small bounded worker pool and waits for the
//! reply with the caller's timeout; on expiry the caller gets
//! `ProviderError::Timeout` and the late result is discarded.

use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crossbeam_channel::{bounded, Receiver, RecvTimeoutError, Sender, TrySendError};
use tracing::warn;

use crate::closure::WorkingMemory;
use crate::config::ExportConfig;
use crate::error::{ExportError, ExportResult, ProviderError};
use crate::export::{GpadDocument, GpadExporter};

struct Job {
    memory: Arc<dyn WorkingMemory>,
    model_iri: String,
    reply: Sender<ExportResult<GpadDocument>>,
}

struct WorkerPool {
    tx: Option<Sender<Job>>,
    workers: Vec<JoinHandle<()>>,
    queue_capacity: usize,
}

impl WorkerPool {
    fn start(workers: usize, queue_capacity: usize, exporter: &Arc<GpadExporter>) -> ExportResult<Self> {
        let workers = workers.max(1);
        let queue_capacity = queue_capacity.max(1);
        let (tx, rx) = bounded::<Job>(queue_capacity);

        let mut handles = Vec::with_capacity(workers);
        for idx in 0..workers {
            let rx: Receiver<Job> = rx.clone();
            let exporter = Arc::clone(exporter);
            let handle = thread::Builder::new()
                .name(format!("gpad-export-{idx}"))
                .spawn(move || {
                    while let Ok(job) = rx.recv() {
                        let result = exporter.export(job.memory.as_ref(), &job.model_iri);
                        // The caller may have timed out and gone away.
                        let _ = job.reply.send(result);
                    }
                })
                .map_err(|e| ExportError::internal(format!("failed to spawn export worker: {e}")))?;
            handles.push(handle);
        }

        Ok(Self {
            tx: Some(tx),
            workers: handles,
            queue_capacity,
        })
    }

    fn try_submit(&self, job: Job) -> ExportResult<()> {
        let Some(tx) = &self.tx else {
            return Err(ProviderError::Disconnected.into());
        };
        match tx.try_send(job) {
            Ok(()) => Ok(()),
            Err(TrySendError::Full(job)) => Err(ExportError::QueueFull {
                model_iri: job.model_iri,
                capacity: self.queue_capacity,
            }),
            Err(TrySendError::Disconnected(_)) => Err(ProviderError::Disconnected.into()),
        }
    }
}

/// Handle to a submitted export.
pub struct ExportHandle {
    model_iri: String,
    rx: Receiver<ExportResult<GpadDocument>>,
}

impl ExportHandle {
    /// Model being exported.
    #[must_use]
    pub fn model_iri(&self) -> &str {
        &self.model_iri
    }

    /// Waits for the export to finish.
    pub fn join(self) -> ExportResult<GpadDocument> {
        self.rx
            .recv()
            .map_err(|_| ExportError::Provider(ProviderError::Disconnected))?
    }

    /// Waits for the export with a timeout. No output is returned on expiry.
    pub fn join_timeout(self, timeout: Duration) -> ExportResult<GpadDocument> {
        self.rx.recv_timeout(timeout).map_err(|err| match err {
            RecvTimeoutError::Timeout => {
                let duration_ms = u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX);
                warn!(model = %self.model_iri, duration_ms, "gpad export timed out");
                ExportError::Provider(ProviderError::Timeout { duration_ms })
            }
            RecvTimeoutError::Disconnected => ExportError::Provider(ProviderError::Disconnected),
        })?
    }
}

/// Worker pool running exports with an outer timeout.
pub struct ExportRuntime {
    exporter: Arc<GpadExporter>,
    pool: WorkerPool,
    timeout: Duration,
}

impl ExportRuntime {
    /// Starts a runtime sized and timed by `config`.
    pub fn new(config: &ExportConfig) -> ExportResult<Self> {
        let exporter = Arc::new(GpadExporter::new(config)?);
        let pool = WorkerPool::start(config.runtime_workers, config.queue_capacity, &exporter)?;
        Ok(Self {
            exporter,
            pool,
            timeout: config.timeout(),
        })
    }

    /// Queues an export without waiting. Fails fast when the queue is full.
    pub fn submit(&self, memory: Arc<dyn WorkingMemory>, model_iri: impl Into<String>) -> ExportResult<ExportHandle> {
        let model_iri = model_iri.into();
        let (reply, rx) = bounded::<ExportResult<GpadDocument>>(1);
        self.pool.try_submit(Job {
            memory,
            model_iri: model_iri.clone(),
            reply,
        })?;
        Ok(ExportHandle { model_iri, rx })
    }

    /// Exports with the configured timeout.
    pub fn export(&self, memory: Arc<dyn WorkingMemory>, model_iri: impl Into<String>) -> ExportResult<GpadDocument> {
        self.export_with_timeout(memory, model_iri, self.timeout)
    }

    /// Exports with an explicit timeout.
    pub fn export_with_timeout(
        &self,
        memory: Arc<dyn WorkingMemory>,
        model_iri: impl Into<String>,
        timeout: Duration,
    ) -> ExportResult<GpadDocument> {
        self.submit(memory, model_iri)?.join_timeout(timeout)
    }

    /// The exporter the workers run.
    #[must_use]
    pub fn exporter(&self) -> &GpadExporter {
        &self.exporter
    }

    /// Closes the queue and joins every worker once its current job ends.
    pub fn shutdown(mut self) {
        drop(self.pool.tx.take());
        for handle in std::mem::take(&mut self.pool.workers) {
            let _ = handle.join();
        }
    }
}

impl Drop for ExportRuntime {
    fn drop(&mut self) {
        // Closing the queue lets idle workers exit. Workers stuck in a hung
        // provider call are detached, not joined.
        drop(self.pool.tx.take());
    }
}
