mod scheduler;
mod theme;
mod ui;

use crate::scheduler::TokioScheduler;
use crate::ui::render_ui;
use chrono::{DateTime, Local};
use clap::Parser;
use crossterm::{
    event::{Event, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use futures_util::StreamExt;
use pulse_core::{
    Action, DashboardConfig, DashboardState, LiveDashboard, ManualScheduler, Scheduler,
    SeededRandom,
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::{error::Error, io, sync::mpsc as std_mpsc};
use tokio::sync::mpsc;
use tracing::info;
use tracing_subscriber::EnvFilter;

// Due signals beyond this are dropped; one pending tick is as good as many.
const TICK_QUEUE_CAPACITY: usize = 4;

#[derive(Parser, Debug)]
#[command(name = "pulse-mission-control", about = "Live mock mission-control dashboard")]
struct Args {
    /// Tick interval in milliseconds (overrides PULSE_TICK_MS)
    #[arg(long)]
    tick_ms: Option<u64>,
    /// Seed for the random walk (overrides PULSE_SEED)
    #[arg(long)]
    seed: Option<u64>,
    /// Apply N ticks without a terminal and print the state as JSON
    #[arg(long, value_name = "N")]
    headless_ticks: Option<u32>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Section {
    Dashboard,
    Markets,
    Missions,
    Activity,
}

impl Section {
    const ALL: [Section; 4] = [
        Section::Dashboard,
        Section::Markets,
        Section::Missions,
        Section::Activity,
    ];

    fn title(self) -> &'static str {
        match self {
            Section::Dashboard => "Dashboard",
            Section::Markets => "Markets",
            Section::Missions => "Missions",
            Section::Activity => "Activity",
        }
    }

    fn next(self) -> Self {
        let index = Self::ALL.iter().position(|s| *s == self).unwrap_or(0);
        Self::ALL[(index + 1) % Self::ALL.len()]
    }
}

struct App<S: Scheduler> {
    dashboard: LiveDashboard<S>,
    section: Section,
    scroll: u16,
    help_open: bool,
    last_tick_at: Option<DateTime<Local>>,
}

impl<S: Scheduler> App<S> {
    fn new(dashboard: LiveDashboard<S>) -> Self {
        Self {
            dashboard,
            section: Section::Dashboard,
            scroll: 0,
            help_open: false,
            last_tick_at: None,
        }
    }

    fn select_section(&mut self, section: Section) {
        self.section = section;
        self.scroll = 0;
        self.dashboard
            .dispatch(Action::select_section(section.title()));
    }

    fn on_tick(&mut self) {
        self.dashboard.on_tick();
        self.last_tick_at = Some(Local::now());
    }

    fn scroll_down(&mut self) {
        self.scroll = self.scroll.saturating_add(1);
    }

    fn scroll_up(&mut self) {
        self.scroll = self.scroll.saturating_sub(1);
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();
    let config = DashboardConfig::from_env(args.tick_ms, args.seed)?;

    if let Some(ticks) = args.headless_ticks {
        init_logging(LogTarget::Stderr);
        let state = run_headless(&config, ticks);
        println!("{}", state.to_json_pretty()?);
        return Ok(());
    }

    init_logging(if config.log_stdout {
        LogTarget::Stdout
    } else {
        LogTarget::Sink
    });

    let (tick_tx, tick_rx) = mpsc::channel(TICK_QUEUE_CAPACITY);
    let mut app = App::new(LiveDashboard::new(
        DashboardState::seeded(),
        Box::new(SeededRandom::from_optional_seed(config.seed)),
        TokioScheduler::new(),
        config.tick_interval,
    ));
    app.dashboard.start(Box::new(move || {
        let _ = tick_tx.try_send(());
    }));
    info!(seed = ?config.seed, "pulse mission control started");

    install_panic_hook();
    let mut terminal = setup_terminal()?;
    let result = run_app(&mut terminal, &mut app, tick_rx).await;
    app.dashboard.stop();
    let restored = restore_terminal(&mut terminal);
    finish_session(result, restored)
}

/// The loop's own error wins over a failure while restoring the terminal.
fn finish_session(
    result: Result<(), Box<dyn Error>>,
    restored: Result<(), Box<dyn Error>>,
) -> Result<(), Box<dyn Error>> {
    result.and(restored)
}

/// Leaves raw mode and the alternate screen before the default hook prints.
fn install_panic_hook() {
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic_info);
    }));
}

fn setup_terminal() -> Result<Terminal<CrosstermBackend<io::Stdout>>, Box<dyn Error>> {
    enable_raw_mode()?;
    let entered = (|| -> Result<_, Box<dyn Error>> {
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;
        terminal.clear()?;
        Ok(terminal)
    })();
    if entered.is_err() {
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        let _ = disable_raw_mode();
    }
    entered
}

fn restore_terminal(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
) -> Result<(), Box<dyn Error>> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App<TokioScheduler>,
    mut tick_rx: mpsc::Receiver<()>,
) -> Result<(), Box<dyn Error>> {
    let mut events = EventStream::new();
    loop {
        terminal.draw(|frame| render_ui(frame, app))?;
        tokio::select! {
            Some(()) = tick_rx.recv() => {
                app.on_tick();
            }
            maybe_event = events.next() => {
                match maybe_event {
                    Some(Ok(event)) => {
                        if handle_input(event, app) {
                            break;
                        }
                    }
                    Some(Err(err)) => return Err(err.into()),
                    None => break,
                }
            }
        }
    }
    Ok(())
}

/// Drives the dashboard through a manual clock for `ticks` intervals.
fn run_headless(config: &DashboardConfig, ticks: u32) -> DashboardState {
    let (due_tx, due_rx) = std_mpsc::channel();
    let mut dashboard = LiveDashboard::new(
        DashboardState::seeded(),
        Box::new(SeededRandom::from_optional_seed(config.seed)),
        ManualScheduler::new(),
        config.tick_interval,
    );
    dashboard.start(Box::new(move || {
        let _ = due_tx.send(());
    }));
    // One interval at a time so at most one due signal is ever queued.
    for _ in 0..ticks {
        dashboard.scheduler_mut().advance(config.tick_interval);
        while due_rx.try_recv().is_ok() {
            dashboard.on_tick();
        }
    }
    dashboard.stop();
    info!(ticks = dashboard.state().tick_count, "headless run finished");
    dashboard.state().clone()
}

fn handle_input<S: Scheduler>(event: Event, app: &mut App<S>) -> bool {
    match event {
        Event::Key(key) if key.kind == KeyEventKind::Press => handle_key(key, app),
        _ => false,
    }
}

fn handle_key<S: Scheduler>(key: KeyEvent, app: &mut App<S>) -> bool {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return true;
    }
    if app.help_open {
        match key.code {
            KeyCode::Esc | KeyCode::Char('?') | KeyCode::F(1) => app.help_open = false,
            KeyCode::Char('q') => return true,
            _ => {}
        }
        return false;
    }
    match key.code {
        KeyCode::Char('q') => return true,
        KeyCode::Char('?') | KeyCode::F(1) => app.help_open = true,
        KeyCode::Char('1') => app.select_section(Section::Dashboard),
        KeyCode::Char('2') => app.select_section(Section::Markets),
        KeyCode::Char('3') => app.select_section(Section::Missions),
        KeyCode::Char('4') => app.select_section(Section::Activity),
        KeyCode::Tab => {
            let next = app.section.next();
            app.select_section(next);
        }
        KeyCode::Char('p') => app.dashboard.dispatch(Action::TriggerPulse),
        KeyCode::Char('s') => app.dashboard.dispatch(Action::LaunchScan),
        KeyCode::Char('n') => app.dashboard.dispatch(Action::SyncNodes),
        KeyCode::Char('r') => app.dashboard.dispatch(Action::GenerateReport),
        KeyCode::Char('v') => app.dashboard.dispatch(Action::ViewAll),
        KeyCode::Char('j') | KeyCode::Down => app.scroll_down(),
        KeyCode::Char('k') | KeyCode::Up => app.scroll_up(),
        KeyCode::Char('g') => app.scroll = 0,
        _ => {}
    }
    false
}

enum LogTarget {
    Stdout,
    Stderr,
    Sink,
}

fn init_logging(target: LogTarget) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    let _ = match target {
        LogTarget::Stdout => builder.try_init(),
        LogTarget::Stderr => builder.with_writer(io::stderr).try_init(),
        LogTarget::Sink => builder.with_writer(io::sink).try_init(),
    };
}
