// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Advisory progress bar drawn on stderr while a batch runs.
//!
//! Workers only bump atomic counters; a separate ticker task eases the
//! displayed values toward them and redraws the bar. Nothing here is ever
//! awaited by a worker.

use std::io::Write;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

const BAR_WIDTH: usize = 30;
const TICK: Duration = Duration::from_millis(16);
const LERP_FACTOR: f64 = 0.15;
const LERP_SNAP: f64 = 0.05;

const WHITE: &str = "\x1b[37m";
const GRAY: &str = "\x1b[90m";
const RESET: &str = "\x1b[0m";
const CLEAR_LINE: &str = "\r\x1b[K";

/// Partial cells indexed by eighths filled.
const PARTIAL: [&str; 8] = [" ", "▏", "▎", "▍", "▌", "▋", "▊", "▉"];

/// Shared `{started, completed}` counters.
#[derive(Debug, Default)]
pub struct Counters {
    started: AtomicUsize,
    completed: AtomicUsize,
}

impl Counters {
    pub fn start(&self) {
        self.started.fetch_add(1, Ordering::Relaxed);
    }

    pub fn complete(&self) {
        self.completed.fetch_add(1, Ordering::Relaxed);
    }

    pub fn started(&self) -> usize {
        self.started.load(Ordering::Relaxed)
    }

    pub fn completed(&self) -> usize {
        self.completed.load(Ordering::Relaxed)
    }
}

/// Running progress display. Call [`finish`](Self::finish) to clear it.
pub struct Progress {
    counters: Arc<Counters>,
    stop: CancellationToken,
    ticker: JoinHandle<()>,
}

impl Progress {
    /// Start redrawing to `writer` every tick until finished.
    pub fn start(total: usize, mut writer: impl Write + Send + 'static) -> Self {
        let counters = Arc::new(Counters::default());
        let stop = CancellationToken::new();

        let ticker = tokio::spawn({
            let counters = Arc::clone(&counters);
            let stop = stop.clone();
            async move {
                let mut interval = tokio::time::interval(TICK);
                let mut shown_started = 0.0;
                let mut shown_completed = 0.0;
                loop {
                    tokio::select! {
                        () = stop.cancelled() => {
                            let _ = write!(writer, "{CLEAR_LINE}");
                            let _ = writer.flush();
                            return;
                        }
                        _ = interval.tick() => {
                            shown_started = lerp(shown_started, counters.started() as f64);
                            shown_completed = lerp(shown_completed, counters.completed() as f64);
                            let frame = render_bar(shown_started, shown_completed, total);
                            let _ = write!(writer, "{frame}");
                            let _ = writer.flush();
                        }
                    }
                }
            }
        });

        Self { counters, stop, ticker }
    }

    pub fn counters(&self) -> Arc<Counters> {
        Arc::clone(&self.counters)
    }

    /// Stop the ticker and clear the bar line.
    pub async fn finish(self) {
        self.stop.cancel();
        if let Err(e) = self.ticker.await {
            tracing::debug!(error = %e, "progress ticker ended abnormally");
        }
    }
}

/// Move `shown` a fixed fraction toward `target`, snapping when close.
pub(crate) fn lerp(shown: f64, target: f64) -> f64 {
    let next = shown + (target - shown) * LERP_FACTOR;
    if (target - next).abs() < LERP_SNAP {
        target
    } else {
        next
    }
}

/// One frame: completed cells white, started-but-unfinished cells gray,
/// remaining cells shaded.
pub(crate) fn render_bar(started: f64, completed: f64, total: usize) -> String {
    if total == 0 {
        return String::new();
    }

    let scale = (BAR_WIDTH * 8) as f64 / total as f64;
    let done = (completed * scale) as usize;
    let begun = (started * scale) as usize;

    let mut bar = String::with_capacity(BAR_WIDTH * 8);
    for cell in 0..BAR_WIDTH {
        let left = cell * 8;
        let right = left + 8;
        if right <= done {
            bar.push_str(WHITE);
            bar.push('█');
        } else if left >= begun {
            bar.push_str(GRAY);
            bar.push('░');
        } else if left >= done && right <= begun {
            bar.push_str(GRAY);
            bar.push('█');
        } else if left < done {
            bar.push_str(WHITE);
            bar.push_str(PARTIAL[done - left]);
        } else {
            bar.push_str(GRAY);
            bar.push_str(PARTIAL[begun - left]);
        }
    }
    bar.push_str(RESET);

    format!("{CLEAR_LINE} {bar} {}/{total} complete", completed as usize)
}

#[cfg(test)]
#[path = "progress_tests.rs"]
mod tests;
