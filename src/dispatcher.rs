//! Action dispatch and console-buffer ownership.
//!
//! The dispatcher is the sole writer of the shared console state. Every
//! dispatch bumps a monotonic generation counter and hands async contributors
//! a writer tagged with that generation; writes carrying a stale tag are
//! dropped. A superseded action's late stream chunks or timer reveals
//! therefore never land in the buffer of the action that replaced it.

use crate::canned;
use crate::chart;
use crate::client::{BackendClient, ChunkStream};
use crate::console::{ConsoleState, LogLine, SharedConsole};
use crate::stream::{self, FetchError};
use crate::timeline::LogTimeline;
use parking_lot::{Mutex, RwLock};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Default CUDA lookup time for the plot endpoint, in milliseconds.
pub const DEFAULT_TIME_MS: f64 = 2.5;

/// The closed set of user actions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Action {
    LaunchGui,
    RunDemo,
    RunQuickTest,
    PlotPerformance { time_ms: f64 },
}

impl Action {
    pub fn label(&self) -> &'static str {
        match self {
            Action::LaunchGui => "GUI Application",
            Action::RunDemo => "Command-Line Demo",
            Action::RunQuickTest => "Quick Test",
            Action::PlotPerformance { .. } => "Plot Performance",
        }
    }
}

/// Parse a user-supplied lookup time. Unparseable, non-positive or non-finite
/// input silently falls back to the default; this is a substitution, not an
/// error.
pub fn parse_time_ms(input: &str) -> f64 {
    match input.trim().parse::<f64>() {
        Ok(value) if value.is_finite() && value > 0.0 => value,
        _ => DEFAULT_TIME_MS,
    }
}

/// Generation-tagged writer handed to async contributors. Every mutation
/// checks the tag against the live counter first; stale writes are dropped.
#[derive(Clone)]
struct Appender {
    state: SharedConsole,
    current: Arc<AtomicU64>,
    generation: u64,
}

impl Appender {
    fn is_current(&self) -> bool {
        self.current.load(Ordering::SeqCst) == self.generation
    }

    fn append_line(&self, line: LogLine) {
        if !self.is_current() {
            debug!("dropping stale output from generation {}", self.generation);
            return;
        }
        self.state.write().lines.push(line);
    }

    /// Append one decoded stream chunk. The chunk stays opaque apart from
    /// stripping trailing newlines, which the console renders as list rows.
    fn append_chunk(&self, chunk: String) {
        self.append_line(LogLine::new(chunk.trim_end_matches(['\r', '\n'])));
    }

    fn finish(&self, publish_chart: bool) {
        if !self.is_current() {
            return;
        }
        let mut state = self.state.write();
        state.running = false;
        if publish_chart {
            state.chart = chart::project(&chart::benchmark_samples());
        }
    }

    fn fail(&self, error: &FetchError) {
        if !self.is_current() {
            return;
        }
        warn!("action failed: {}", error);
        let mut state = self.state.write();
        state.lines.push(LogLine::new(format!("[ERROR] {error}")));
        state.notice = Some(error.to_string());
        state.running = false;
    }
}

/// Translates a user action into exactly one execution path and guarantees at
/// most one active execution updates the console at a time.
pub struct ActionDispatcher {
    state: SharedConsole,
    generation: Arc<AtomicU64>,
    timeline: Mutex<Option<LogTimeline>>,
    backend: Option<Arc<BackendClient>>,
    reveal_delay: Duration,
}

impl ActionDispatcher {
    /// With a backend, actions call the live endpoints; without one, they
    /// replay canned sequences through a `LogTimeline`.
    pub fn new(backend: Option<BackendClient>, reveal_delay: Duration) -> Self {
        Self {
            state: Arc::new(RwLock::new(ConsoleState::default())),
            generation: Arc::new(AtomicU64::new(0)),
            timeline: Mutex::new(None),
            backend: backend.map(Arc::new),
            reveal_delay,
        }
    }

    pub fn snapshot(&self) -> ConsoleState {
        self.state.read().clone()
    }

    pub fn is_running(&self) -> bool {
        self.state.read().running
    }

    /// Take the transient error notice, if one was raised since the last call.
    pub fn take_notice(&self) -> Option<String> {
        self.state.write().notice.take()
    }

    /// Start an action. Any previous execution still in flight is superseded:
    /// its timeline is cancelled outright and its remaining stream output is
    /// dropped by the generation check.
    ///
    /// Must be called from within a tokio runtime.
    pub fn dispatch(&self, action: Action) {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        info!("dispatching {} (generation {})", action.label(), generation);

        if let Some(previous) = self.timeline.lock().take() {
            previous.cancel();
        }
        {
            let mut state = self.state.write();
            state.lines.clear();
            state.running = true;
            state.notice = None;
        }

        let sink = Appender {
            state: Arc::clone(&self.state),
            current: Arc::clone(&self.generation),
            generation,
        };

        match &self.backend {
            Some(client) => Self::dispatch_remote(action, Arc::clone(client), sink),
            None => self.dispatch_local(action, sink),
        }
    }

    fn dispatch_local(&self, action: Action, sink: Appender) {
        let lines = canned::lines_for(&action);
        let publish_chart = matches!(action, Action::PlotPerformance { .. });
        let on_reveal = sink.clone();

        let timeline = LogTimeline::start(
            lines,
            self.reveal_delay,
            move |_, line| on_reveal.append_line(line),
            move || sink.finish(publish_chart),
        );
        *self.timeline.lock() = Some(timeline);
    }

    fn dispatch_remote(action: Action, client: Arc<BackendClient>, sink: Appender) {
        tokio::spawn(async move {
            let outcome = match action {
                Action::LaunchGui => Self::run_gui(&client, &sink).await,
                Action::RunDemo => Self::run_stream(client.run_demo().await, &sink).await,
                Action::RunQuickTest => {
                    Self::run_stream(client.run_quick_test().await, &sink).await
                }
                Action::PlotPerformance { time_ms } => {
                    Self::run_stream(client.plot_performance(time_ms).await, &sink).await
                }
            };
            match outcome {
                Ok(()) => sink.finish(matches!(action, Action::PlotPerformance { .. })),
                Err(error) => sink.fail(&error),
            }
        });
    }

    async fn run_gui(client: &BackendClient, sink: &Appender) -> Result<(), FetchError> {
        let status = client.launch_gui().await?;
        sink.append_line(LogLine::new(format!("[OK] {}", status.status)));
        if let Some(message) = status.message {
            sink.append_line(LogLine::new(message));
        }
        Ok(())
    }

    async fn run_stream(
        opened: Result<ChunkStream, FetchError>,
        sink: &Appender,
    ) -> Result<(), FetchError> {
        let chunks = opened?;
        let writer = sink.clone();
        stream::consume(chunks, move |chunk| writer.append_chunk(chunk)).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::console::Severity;

    #[test]
    fn parse_time_ms_accepts_positive_floats() {
        assert_eq!(parse_time_ms("2.5"), 2.5);
        assert_eq!(parse_time_ms("10"), 10.0);
        assert_eq!(parse_time_ms(" 0.001 "), 0.001);
    }

    #[test]
    fn parse_time_ms_falls_back_on_invalid_input() {
        assert_eq!(parse_time_ms("abc"), DEFAULT_TIME_MS);
        assert_eq!(parse_time_ms(""), DEFAULT_TIME_MS);
        assert_eq!(parse_time_ms("-3"), DEFAULT_TIME_MS);
        assert_eq!(parse_time_ms("0"), DEFAULT_TIME_MS);
        assert_eq!(parse_time_ms("inf"), DEFAULT_TIME_MS);
        assert_eq!(parse_time_ms("NaN"), DEFAULT_TIME_MS);
    }

    #[tokio::test(start_paused = true)]
    async fn quick_test_reveals_seven_lines_then_goes_idle() {
        let dispatcher = ActionDispatcher::new(None, Duration::from_millis(400));
        dispatcher.dispatch(Action::RunQuickTest);
        assert!(dispatcher.is_running());

        tokio::time::sleep(Duration::from_millis(2850)).await;

        let snapshot = dispatcher.snapshot();
        assert_eq!(snapshot.lines.len(), 7);
        assert_eq!(snapshot.lines, canned::lines_for(&Action::RunQuickTest));
        assert!(!snapshot.running);
    }

    #[tokio::test(start_paused = true)]
    async fn reveals_are_partial_while_running() {
        let dispatcher = ActionDispatcher::new(None, Duration::from_millis(400));
        dispatcher.dispatch(Action::RunQuickTest);

        // Three delay intervals plus slack: exactly three lines revealed.
        tokio::time::sleep(Duration::from_millis(1250)).await;
        let snapshot = dispatcher.snapshot();
        assert_eq!(snapshot.lines.len(), 3);
        assert!(snapshot.running);
    }

    #[tokio::test(start_paused = true)]
    async fn new_dispatch_supersedes_running_timeline() {
        let dispatcher = ActionDispatcher::new(None, Duration::from_millis(400));
        dispatcher.dispatch(Action::RunDemo);
        tokio::time::sleep(Duration::from_millis(450)).await;
        assert_eq!(dispatcher.snapshot().lines.len(), 1);

        dispatcher.dispatch(Action::RunQuickTest);
        tokio::time::sleep(Duration::from_secs(5)).await;

        // Only the superseding action's lines are visible, no interleaving.
        let snapshot = dispatcher.snapshot();
        assert_eq!(snapshot.lines, canned::lines_for(&Action::RunQuickTest));
        assert!(!snapshot.running);
    }

    #[tokio::test(start_paused = true)]
    async fn plot_performance_publishes_chart_on_completion() {
        let dispatcher = ActionDispatcher::new(None, Duration::from_millis(400));
        dispatcher.dispatch(Action::PlotPerformance { time_ms: 2.5 });
        assert!(dispatcher.snapshot().chart.is_empty());

        tokio::time::sleep(Duration::from_secs(4)).await;

        let snapshot = dispatcher.snapshot();
        assert_eq!(snapshot.lines.len(), 8);
        assert_eq!(snapshot.chart, chart::project(&chart::benchmark_samples()));
        assert!(!snapshot.running);
    }

    #[tokio::test(start_paused = true)]
    async fn chart_survives_unrelated_actions() {
        let dispatcher = ActionDispatcher::new(None, Duration::from_millis(400));
        dispatcher.dispatch(Action::PlotPerformance { time_ms: 2.5 });
        tokio::time::sleep(Duration::from_secs(4)).await;
        assert_eq!(dispatcher.snapshot().chart.len(), 5);

        // The chart stays until replaced; a new action only clears the log.
        dispatcher.dispatch(Action::RunQuickTest);
        tokio::time::sleep(Duration::from_millis(10)).await;
        let snapshot = dispatcher.snapshot();
        assert!(snapshot.lines.is_empty());
        assert_eq!(snapshot.chart.len(), 5);
    }

    #[tokio::test(start_paused = true)]
    async fn launch_gui_plays_canned_sequence_locally() {
        let dispatcher = ActionDispatcher::new(None, Duration::from_millis(400));
        dispatcher.dispatch(Action::LaunchGui);
        tokio::time::sleep(Duration::from_secs(4)).await;

        let snapshot = dispatcher.snapshot();
        assert_eq!(snapshot.lines.len(), 9);
        assert_eq!(snapshot.lines[8].severity, Severity::Ok);
        assert!(!snapshot.running);
    }
}
