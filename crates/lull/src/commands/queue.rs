//! `lull queue`: push values through an ordered queue.

use serde::Serialize;
use tracing::debug;

use lull_config::{Config, QueueMode};
use lull_core::{OrderedQueue, QueueAccess};

use crate::cli::{GlobalOpts, QueueArgs};
use crate::error::CliError;
use crate::output;

#[derive(Debug, Serialize)]
struct QueueReport {
    mode: QueueMode,
    sorted: Vec<i64>,
    dequeued: Vec<i64>,
    remaining: usize,
}

pub fn handle(args: &QueueArgs, config: &Config, global: &GlobalOpts) -> Result<(), CliError> {
    let mode = if args.local { QueueMode::Local } else { config.queue_mode() };
    debug!(?mode, values = args.values.len(), "building queue");

    let report = match mode {
        QueueMode::Shared => drain(&OrderedQueue::new(), mode, args),
        QueueMode::Local => drain(&OrderedQueue::local(), mode, args),
    };

    let rendered = output::render(global.output, &report, |r| {
        format!(
            "sorted: {}\ndequeued: {}\nremaining: {}",
            output::join(&r.sorted),
            output::join(&r.dequeued),
            r.remaining
        )
    })?;
    output::print_output(&rendered, global.quiet);
    Ok(())
}

fn drain<A: QueueAccess>(queue: &OrderedQueue<i64, A>, mode: QueueMode, args: &QueueArgs) -> QueueReport {
    queue.add_range(args.values.iter().copied());
    let sorted = queue.snapshot();

    let mut dequeued = Vec::with_capacity(args.dequeue);
    while dequeued.len() < args.dequeue {
        let next = match args.below {
            Some(limit) => queue.try_dequeue_if(|head| *head < limit),
            None => queue.try_dequeue(),
        };
        let Some(value) = next else { break };
        dequeued.push(value);
    }

    QueueReport {
        mode,
        sorted,
        dequeued,
        remaining: queue.len(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(values: &[i64], dequeue: usize, below: Option<i64>) -> QueueArgs {
        QueueArgs {
            values: values.to_vec(),
            dequeue,
            below,
            local: false,
        }
    }

    #[test]
    fn dequeues_from_the_sorted_head() {
        let report = drain(&OrderedQueue::new(), QueueMode::Shared, &args(&[5, 2, 4, 1, 3], 2, None));
        assert_eq!(report.sorted, vec![1, 2, 3, 4, 5]);
        assert_eq!(report.dequeued, vec![1, 2]);
        assert_eq!(report.remaining, 3);
    }

    #[test]
    fn below_stops_at_the_first_rejected_head() {
        let report = drain(&OrderedQueue::local(), QueueMode::Local, &args(&[5, 2, 4, 1, 3], 10, Some(3)));
        assert_eq!(report.dequeued, vec![1, 2]);
        assert_eq!(report.remaining, 3);
    }
}
