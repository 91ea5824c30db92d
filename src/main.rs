use anyhow::Result;
use chrono::Local;
use clap::Parser;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use rainbow_dash::{
    parse_time_ms, Action, ActionDispatcher, BackendClient, ConsoleState, DashboardConfig,
    Severity,
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Bar, BarChart, BarGroup, Block, Borders, List, ListItem, Paragraph},
    Frame, Terminal,
};
use std::{
    io,
    sync::Arc,
    time::{Duration, Instant},
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(author, version, about = "Terminal dashboard for the GPU rainbow-table cracking demo", long_about = None)]
struct Args {
    /// Backend base URL; omit (and leave RAINBOW_API_BASE unset) to replay
    /// canned demo logs locally
    #[arg(long)]
    api_base: Option<String>,

    /// CUDA lookup time passed to the plot endpoint, in milliseconds
    #[arg(long, default_value = "2.5")]
    time_ms: String,

    /// Delay between simulated log reveals, in milliseconds
    #[arg(long)]
    reveal_ms: Option<u64>,
}

struct App {
    dispatcher: Arc<ActionDispatcher>,
    live: bool,
    time_ms: f64,
    notice: Option<(String, Instant)>,
}

const NOTICE_TTL: Duration = Duration::from_secs(5);

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr and stay off unless RUST_LOG asks for them; redirect
    // stderr to a file to capture them without fighting the raw-mode screen.
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "off".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let args = Args::parse();
    let mut config = DashboardConfig::from_env();
    if args.api_base.is_some() {
        config.api_base = args.api_base.clone();
    }
    if let Some(ms) = args.reveal_ms {
        config.reveal_delay = Duration::from_millis(ms);
    }
    let time_ms = parse_time_ms(&args.time_ms);

    let backend = match config.api_base.as_deref() {
        Some(base) => Some(BackendClient::new(base, config.request_timeout)?),
        None => None,
    };
    let live = backend.is_some();
    let dispatcher = Arc::new(ActionDispatcher::new(backend, config.reveal_delay));

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;

    let mut app = App {
        dispatcher,
        live,
        time_ms,
        notice: None,
    };
    let result = run_app(&mut terminal, &mut app).await;

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
) -> Result<()> {
    loop {
        if let Some(notice) = app.dispatcher.take_notice() {
            app.notice = Some((notice, Instant::now()));
        }
        if let Some((_, raised)) = &app.notice {
            if raised.elapsed() > NOTICE_TTL {
                app.notice = None;
            }
        }

        terminal.draw(|f| ui(f, app))?;

        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                match key.code {
                    KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => return Ok(()),
                    KeyCode::Char('1') => app.dispatcher.dispatch(Action::LaunchGui),
                    KeyCode::Char('2') => app.dispatcher.dispatch(Action::RunDemo),
                    KeyCode::Char('3') => app.dispatcher.dispatch(Action::RunQuickTest),
                    KeyCode::Char('4') => app.dispatcher.dispatch(Action::PlotPerformance {
                        time_ms: app.time_ms,
                    }),
                    _ => {}
                }
            }
        }
    }
}

fn ui(f: &mut Frame, app: &App) {
    let snapshot = app.dispatcher.snapshot();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(10),
            Constraint::Length(3),
        ])
        .split(f.size());

    render_header(f, chunks[0], app, &snapshot);

    let content = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(chunks[1]);

    render_console(f, content[0], &snapshot);
    render_chart(f, content[1], &snapshot);
    render_footer(f, chunks[2], app);
}

fn render_header(f: &mut Frame, area: ratatui::layout::Rect, app: &App, snapshot: &ConsoleState) {
    let mode = if app.live { "live backend" } else { "local replay" };
    let status = if snapshot.running {
        Span::styled(
            "● RUNNING",
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        )
    } else {
        Span::styled("○ idle", Style::default().fg(Color::DarkGray))
    };

    let header = Paragraph::new(Line::from(vec![
        Span::styled(
            " RAINBOW CRACK ",
            Style::default()
                .fg(Color::Magenta)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!("· {mode} · "),
            Style::default().fg(Color::DarkGray),
        ),
        status,
        Span::styled(
            format!("  {}", Local::now().format("%H:%M:%S")),
            Style::default().fg(Color::DarkGray),
        ),
    ]))
    .block(Block::default().borders(Borders::ALL));
    f.render_widget(header, area);
}

fn severity_color(severity: Severity) -> Color {
    match severity {
        Severity::Error => Color::Red,
        Severity::Ok => Color::Green,
        Severity::Info => Color::Cyan,
        Severity::Plain => Color::White,
    }
}

fn render_console(f: &mut Frame, area: ratatui::layout::Rect, snapshot: &ConsoleState) {
    let block = Block::default()
        .title(" system output ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Green));

    if snapshot.lines.is_empty() {
        let placeholder = Paragraph::new(Span::styled(
            "> Awaiting command...",
            Style::default().fg(Color::DarkGray),
        ))
        .block(block);
        f.render_widget(placeholder, area);
        return;
    }

    // Keep the tail visible: the newest lines matter most in a scrolling log.
    let visible = (area.height as usize).saturating_sub(2);
    let skip = snapshot.lines.len().saturating_sub(visible);
    let items: Vec<ListItem> = snapshot
        .lines
        .iter()
        .enumerate()
        .skip(skip)
        .map(|(i, line)| {
            ListItem::new(Line::from(vec![
                Span::styled(
                    format!("{:03} ", i + 1),
                    Style::default().fg(Color::DarkGray),
                ),
                Span::styled(
                    line.text.clone(),
                    Style::default().fg(severity_color(line.severity)),
                ),
            ]))
        })
        .collect();

    f.render_widget(List::new(items).block(block), area);
}

fn render_chart(f: &mut Frame, area: ratatui::layout::Rect, snapshot: &ConsoleState) {
    let block = Block::default()
        .title(" cuda vs cpu lookup (ms) ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Magenta));

    if snapshot.chart.is_empty() {
        let placeholder = Paragraph::new(Span::styled(
            "no data yet — run plot performance (4)",
            Style::default().fg(Color::DarkGray),
        ))
        .block(block);
        f.render_widget(placeholder, area);
        return;
    }

    let mut chart = BarChart::default()
        .block(block)
        .bar_width(5)
        .bar_gap(1)
        .group_gap(2);
    for point in &snapshot.chart {
        let bars = [
            Bar::default()
                .value(point.cuda_ms.round() as u64)
                .label(Line::from("gpu"))
                .style(Style::default().fg(Color::Green)),
            Bar::default()
                .value(point.cpu_ms.round() as u64)
                .label(Line::from("cpu"))
                .style(Style::default().fg(Color::Magenta)),
        ];
        chart = chart.data(BarGroup::default().label(Line::from(point.label.clone())).bars(&bars));
    }
    f.render_widget(chart, area);
}

fn render_footer(f: &mut Frame, area: ratatui::layout::Rect, app: &App) {
    let line = match &app.notice {
        Some((notice, _)) => Line::from(Span::styled(
            format!(" {notice} "),
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )),
        None => Line::from(vec![
            Span::styled(" 1 ", Style::default().fg(Color::Green)),
            Span::raw("gui  "),
            Span::styled("2 ", Style::default().fg(Color::Cyan)),
            Span::raw("demo  "),
            Span::styled("3 ", Style::default().fg(Color::Magenta)),
            Span::raw("quick test  "),
            Span::styled("4 ", Style::default().fg(Color::Yellow)),
            Span::raw(format!("plot ({}ms)  ", app.time_ms)),
            Span::styled("q ", Style::default().fg(Color::Red)),
            Span::raw("quit"),
        ]),
    };
    f.render_widget(
        Paragraph::new(line).block(Block::default().borders(Borders::ALL)),
        area,
    );
}
