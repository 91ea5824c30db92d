use crate::chart::ChartPoint;
use parking_lot::RwLock;
use serde::Serialize;
use std::sync::Arc;

/// Semantic severity of a console line, derived from the backend's prefix
/// convention. `[OK]` and `[SUCCESS]` are rendered identically and share a tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Severity {
    Error,
    Ok,
    Info,
    Plain,
}

impl Severity {
    pub fn from_line(text: &str) -> Self {
        if text.starts_with("[ERROR]") {
            Severity::Error
        } else if text.starts_with("[OK]") || text.starts_with("[SUCCESS]") {
            Severity::Ok
        } else if text.starts_with("[INFO]") {
            Severity::Info
        } else {
            Severity::Plain
        }
    }
}

/// One unit of console output. Immutable once appended; the append order is the
/// display order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LogLine {
    pub text: String,
    pub severity: Severity,
}

impl LogLine {
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let severity = Severity::from_line(&text);
        Self { text, severity }
    }
}

/// The visible console: ordered log lines, the running flag, the last published
/// chart series, and an optional transient error notice.
///
/// This is the only mutable state shared between the dispatcher and the display
/// surface. The dispatcher is the sole writer; readers take snapshots. Guarded
/// by `parking_lot::RwLock` since no critical section contains an await point.
#[derive(Debug, Clone, Default)]
pub struct ConsoleState {
    pub lines: Vec<LogLine>,
    pub running: bool,
    pub chart: Vec<ChartPoint>,
    pub notice: Option<String>,
}

pub type SharedConsole = Arc<RwLock<ConsoleState>>;
