//! Fixed log sequences replayed when no backend is configured.
//!
//! Line text mirrors the output of the live demo scripts, prefix conventions
//! included, so the console renders identically in both modes.

use crate::console::LogLine;
use crate::dispatcher::Action;

const GUI_APPLICATION: &[&str] = &[
    "[INFO] Initializing GUI Application...",
    "[INFO] Loading rainbow table: rt_md5_loweralpha_7.rt (2.4 GB)",
    "[OK] Rainbow table loaded successfully",
    "[INFO] CUDA device detected: NVIDIA RTX 4090",
    "[INFO] Allocating GPU memory: 4096 MB",
    "[OK] GPU memory allocated",
    "[INFO] Starting hash lookup engine...",
    "[OK] GUI Application ready — awaiting input",
    "[SUCCESS] System online. Enter hash to crack.",
];

const COMMAND_LINE_DEMO: &[&str] = &[
    "[INFO] === Rainbow Table CLI v2.1.0 ===",
    "[INFO] Loading chain file: md5_chains_8char.bin",
    "[OK] Loaded 847,291,456 chains",
    "[INFO] Target hash: 5d41402abc4b2a76b9719d911017c592",
    "[INFO] Searching chain endpoints...",
    "[INFO] Found 3 candidate chains",
    "[INFO] Regenerating chain #1: start=ax9kL2...",
    "[INFO] Regenerating chain #2: start=mP3qR7...",
    "[SUCCESS] Password found: 'hello'",
    "[INFO] Lookup time: 0.042s (CUDA) vs 3.891s (CPU)",
    "[OK] Speedup: 92.6x",
];

const QUICK_TEST: &[&str] = &[
    "[INFO] Quick Test Mode — single hash lookup",
    "[INFO] Hash: e10adc3949ba59abbe56e057f20f883e",
    "[INFO] Algorithm: MD5",
    "[INFO] Searching rainbow table...",
    "[INFO] ██████████████████████████ 100%",
    "[SUCCESS] Cracked! Password: '123456'",
    "[INFO] Time elapsed: 0.018s",
];

const PLOT_PERFORMANCE: &[&str] = &[
    "[INFO] Benchmarking CUDA vs CPU performance...",
    "[INFO] Test 1/5: 1000 hashes — CUDA: 2ms, CPU: 156ms",
    "[INFO] Test 2/5: 5000 hashes — CUDA: 8ms, CPU: 780ms",
    "[INFO] Test 3/5: 10000 hashes — CUDA: 14ms, CPU: 1420ms",
    "[INFO] Test 4/5: 50000 hashes — CUDA: 52ms, CPU: 7100ms",
    "[INFO] Test 5/5: 100000 hashes — CUDA: 98ms, CPU: 14200ms",
    "[OK] Benchmark complete. Rendering graph...",
    "[SUCCESS] Performance graph updated.",
];

/// The canned sequence for an action, as ready-to-append log lines.
pub fn lines_for(action: &Action) -> Vec<LogLine> {
    let texts = match action {
        Action::LaunchGui => GUI_APPLICATION,
        Action::RunDemo => COMMAND_LINE_DEMO,
        Action::RunQuickTest => QUICK_TEST,
        Action::PlotPerformance { .. } => PLOT_PERFORMANCE,
    };
    texts.iter().map(|t| LogLine::new(*t)).collect()
}
