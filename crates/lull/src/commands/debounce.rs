//! `lull debounce`: record changes and print the first delivered batch.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use lull_config::Config;
use lull_core::{ChangeBatch, DebounceChangeNotifier, NotifierConfig};

use crate::cli::{DebounceArgs, GlobalOpts};
use crate::error::CliError;
use crate::output;

/// How many intervals to wait for the first batch before giving up.
const PATIENCE_INTERVALS: u32 = 20;

#[derive(Debug, Serialize)]
struct BatchReport {
    changed_at: DateTime<Utc>,
    changes: BTreeMap<String, String>,
}

pub async fn handle(args: &DebounceArgs, config: &Config, global: &GlobalOpts) -> Result<(), CliError> {
    let notifier_config = match args.interval_ms {
        Some(millis) => NotifierConfig::from_millis(millis),
        None => config.notifier_config()?,
    };
    let notifier = DebounceChangeNotifier::new(notifier_config)?;

    for (key, value) in &args.changes {
        notifier.notify_changed(key.clone(), value.clone());
    }
    debug!(recorded = args.changes.len(), "changes recorded");

    let patience = notifier.interval().saturating_mul(PATIENCE_INTERVALS);
    let batch = first_batch(&notifier, patience).await.ok_or_else(|| CliError::NoBatch {
        waited_ms: u64::try_from(patience.as_millis()).unwrap_or(u64::MAX),
    })?;
    notifier.shutdown();

    let report = BatchReport {
        changed_at: batch.changed_at(),
        changes: batch.iter().cloned().collect(),
    };
    let rendered = output::render(global.output, &report, |r| {
        r.changes
            .iter()
            .map(|(key, value)| format!("{key}={value}"))
            .collect::<Vec<_>>()
            .join("\n")
    })?;
    output::print_output(&rendered, global.quiet);
    Ok(())
}

/// Watch until one batch arrives or `patience` runs out.
async fn first_batch(
    notifier: &DebounceChangeNotifier<String, String>,
    patience: Duration,
) -> Option<Arc<ChangeBatch<String, String>>> {
    let cancel = CancellationToken::new();
    let (tx, mut rx) = mpsc::unbounded_channel();

    let deadline = cancel.clone();
    let timer = tokio::spawn(async move {
        tokio::time::sleep(patience).await;
        deadline.cancel();
    });

    let stop = cancel.clone();
    notifier
        .watch(
            move |batch: Arc<ChangeBatch<String, String>>| {
                let _ = tx.send(batch);
                stop.cancel();
                async { Ok(()) }
            },
            cancel,
        )
        .await;
    timer.abort();

    rx.try_recv().ok()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn first_batch_collapses_repeated_keys() {
        let notifier = DebounceChangeNotifier::with_interval(Duration::from_millis(10)).unwrap();
        notifier.notify_changed("a".to_owned(), "1".to_owned());
        notifier.notify_changed("a".to_owned(), "2".to_owned());
        notifier.notify_changed("b".to_owned(), "3".to_owned());

        let batch = first_batch(&notifier, Duration::from_secs(5)).await.unwrap();
        let changes: BTreeMap<_, _> = batch.iter().cloned().collect();
        assert_eq!(changes.get("a").map(String::as_str), Some("2"));
        assert_eq!(changes.len(), 2);
    }

    #[tokio::test]
    async fn nothing_recorded_times_out() {
        let notifier = DebounceChangeNotifier::with_interval(Duration::from_millis(10)).unwrap();
        assert!(first_batch(&notifier, Duration::from_millis(50)).await.is_none());
    }
}
