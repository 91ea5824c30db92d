pub mod canned;
pub mod chart;
pub mod client;
pub mod config;
pub mod console;
pub mod dispatcher;
pub mod stream;
pub mod timeline;

pub use chart::{benchmark_samples, project, BenchmarkSample, ChartPoint};
pub use client::{BackendClient, GuiStatus};
pub use config::DashboardConfig;
pub use console::{ConsoleState, LogLine, Severity};
pub use dispatcher::{parse_time_ms, Action, ActionDispatcher, DEFAULT_TIME_MS};
pub use stream::FetchError;
pub use timeline::LogTimeline;
