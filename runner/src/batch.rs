//! Runs a whole directory of match bundles through the pipeline.
//!
//! A fixed set of blocking workers pulls bundles off a shared queue, parses
//! and transforms them, and hands the finished tables to a single writer
//! task that owns the store. One broken match never stops the batch.

/// Outcome counts for one batch run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchSummary {
    pub processed: usize,
    pub succeeded: usize,
    pub failed: usize,
}

#[derive(Debug)]
enum ProcessError {
    Extract(crate::extract::ExtractError),
    Pipeline(crate::pipeline::PipelineError),
    Panicked(String),
}

impl From<crate::extract::ExtractError> for ProcessError {
    fn from(err: crate::extract::ExtractError) -> Self {
        Self::Extract(err)
    }
}

impl From<crate::pipeline::PipelineError> for ProcessError {
    fn from(err: crate::pipeline::PipelineError) -> Self {
        Self::Pipeline(err)
    }
}

impl std::fmt::Display for ProcessError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Extract(err) => write!(f, "{}", err),
            Self::Pipeline(err) => write!(f, "{}", err),
            Self::Panicked(message) => write!(f, "Transform panicked: {}", message),
        }
    }
}

/// All files directly in `dir` ending in `.json`, sorted by name.
pub fn discover_bundles(
    dir: &std::path::Path,
) -> Result<Vec<std::path::PathBuf>, std::io::Error> {
    let mut bundles: Vec<std::path::PathBuf> = Vec::new();

    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        if path.extension().map(|ext| ext == "json").unwrap_or(false) && path.is_file() {
            bundles.push(path);
        }
    }

    bundles.sort();
    Ok(bundles)
}

/// Processes every bundle in `paths` with `workers` blocking workers.
///
/// All results go through one writer task, so the store sees matches
/// strictly one after the other. A match counts as succeeded once the store
/// accepted it.
pub async fn run<S>(
    paths: Vec<std::path::PathBuf>,
    workers: usize,
    drops: crate::config::DropColumns,
    mut store: S,
) -> BatchSummary
where
    S: crate::store::TableStore + 'static,
{
    let total = paths.len();

    let (results_tx, mut results_rx) =
        tokio::sync::mpsc::unbounded_channel::<crate::pipeline::MatchTables>();

    let writer = tokio::task::spawn_blocking(move || {
        let mut stored = 0usize;
        while let Some(tables) = results_rx.blocking_recv() {
            match store.append_match(&tables) {
                Ok(()) => {
                    tracing::info!("Stored {:?}", tables.match_id);
                    stored += 1;
                }
                Err(err) => {
                    tracing::error!("Storing {:?}: {}", tables.match_id, err);
                }
            }
        }
        stored
    });

    let queue = std::sync::Arc::new(std::sync::Mutex::new(paths.into_iter()));
    let started = std::sync::Arc::new(std::sync::atomic::AtomicUsize::new(0));

    let mut handles = Vec::new();
    for _ in 0..workers.max(1) {
        let queue = queue.clone();
        let started = started.clone();
        let results_tx = results_tx.clone();
        let drops = drops.clone();

        handles.push(tokio::task::spawn_blocking(move || loop {
            let path = { queue.lock().unwrap().next() };
            let Some(path) = path else { break };

            let number = started.fetch_add(1, std::sync::atomic::Ordering::SeqCst) + 1;
            tracing::info!("[{}/{}] Processing {}", number, total, path.display());

            match process_file(&path, &drops) {
                Ok(tables) => {
                    if results_tx.send(tables).is_err() {
                        break;
                    }
                }
                Err(err) => {
                    tracing::error!("Skipping {}: {}", path.display(), err);
                }
            }
        }));
    }
    drop(results_tx);

    for handle in handles {
        if let Err(err) = handle.await {
            tracing::error!("Worker stopped: {:?}", err);
        }
    }

    let succeeded = writer.await.unwrap_or_else(|err| {
        tracing::error!("Writer stopped: {:?}", err);
        0
    });

    BatchSummary {
        processed: total,
        succeeded,
        failed: total - succeeded,
    }
}

fn process_file(
    path: &std::path::Path,
    drops: &crate::config::DropColumns,
) -> Result<crate::pipeline::MatchTables, ProcessError> {
    let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
        let parsed = crate::extract::parse_bundle(path)?;
        crate::pipeline::process_match(&parsed, drops).map_err(ProcessError::from)
    }));

    match result {
        Ok(outcome) => outcome,
        Err(panic) => Err(ProcessError::Panicked(panic_message(panic))),
    }
}

fn panic_message(panic: Box<dyn std::any::Any + Send>) -> String {
    if let Some(message) = panic.downcast_ref::<&str>() {
        (*message).to_owned()
    } else if let Some(message) = panic.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_owned()
    }
}
