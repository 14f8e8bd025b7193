//! Terminal User Interface for arruma
//!
//! This provides the drawer layout of the organization modal: a launcher
//! screen to pick a process, and a bottom-anchored sheet animating the
//! simulated steps.
//!
//! # Architecture
//!
//! This is a thin wrapper around the core `arruma` library. It uses
//! `ratatui` for rendering and handles all terminal-specific logic; the
//! sequencer is polled with `Instant::now()` on every loop iteration.

use anyhow::{bail, Result};
use arruma::{ProcessType, Sequencer};
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    layout::{Alignment, Constraint, Direction, Layout, Margin, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Gauge, Paragraph},
    Frame, Terminal,
};
use std::{
    env, io,
    time::{Duration, Instant},
};
use tracing_subscriber::EnvFilter;

/// Spinner frames for the active step animation
const SPINNER_FRAMES: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

fn spinner(tick: u64) -> &'static str {
    SPINNER_FRAMES[(tick as usize / 2) % SPINNER_FRAMES.len()]
}

// ============================================================================
// APPLICATION STATE
// ============================================================================

struct App {
    sequencer: Sequencer,
    /// Launcher cursor over `ProcessType::ALL`
    selected: usize,
    should_quit: bool,
    /// Animation tick counter, bumped once per draw
    tick: u64,
}

impl App {
    fn new(process: ProcessType) -> Self {
        let selected = ProcessType::ALL
            .iter()
            .position(|p| *p == process)
            .unwrap_or(0);
        Self {
            sequencer: Sequencer::new(process),
            selected,
            should_quit: false,
            tick: 0,
        }
    }

    fn select(&mut self, index: usize) {
        self.selected = index.min(ProcessType::ALL.len() - 1);
        self.sequencer
            .set_process(ProcessType::ALL[self.selected], Instant::now());
    }

    fn open_drawer(&mut self) {
        self.sequencer.open_at(Instant::now());
    }

    /// Dismiss the drawer. Always resets the sequence, finished or not.
    fn close_drawer(&mut self) {
        self.sequencer.close();
    }
}

// ============================================================================
// MAIN ENTRY POINT
// ============================================================================

fn main() -> Result<()> {
    init_logging();

    let args: Vec<String> = env::args().collect();
    let process = match args.get(1) {
        Some(key) => match ProcessType::from_key(key) {
            Some(p) => p,
            None => bail!("unknown process '{key}'; expected screenshots, recordings or cleanup"),
        },
        None => ProcessType::Screenshots,
    };

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(process);

    // Run UI loop
    let res = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("Error: {:?}", err);
    }

    Ok(())
}

/// Stderr belongs to the drawing surface, so logs go to a file, and only
/// when explicitly asked for via `RUST_LOG`.
fn init_logging() {
    if env::var_os("RUST_LOG").is_none() {
        return;
    }
    if let Ok(file) = std::fs::File::create("arruma-tui.log") {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env())
            .with_writer(std::sync::Arc::new(file))
            .with_ansi(false)
            .try_init();
    }
}

// ============================================================================
// UI EVENT LOOP
// ============================================================================

fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<()>
where
    <B as Backend>::Error: Send + Sync + 'static,
{
    let mut last_draw = Instant::now();

    loop {
        // Advance the sequence if its deadline elapsed
        app.sequencer.poll(Instant::now());

        // Render UI (throttled to ~30 FPS)
        if last_draw.elapsed() >= Duration::from_millis(33) {
            app.tick = app.tick.wrapping_add(1);
            terminal.draw(|f| ui(f, app))?;
            last_draw = Instant::now();
        }

        // Handle input (with timeout for responsive UI)
        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                // Only process key press, not release
                if key.kind != KeyEventKind::Press {
                    continue;
                }

                // Drawer keys first: any dismiss closes and resets
                if app.sequencer.is_open() {
                    match key.code {
                        KeyCode::Esc | KeyCode::Char('q') => app.close_drawer(),
                        KeyCode::Enter if app.sequencer.is_complete() => app.close_drawer(),
                        _ => {}
                    }
                    continue;
                }

                // Launcher keys
                match key.code {
                    KeyCode::Char('q') | KeyCode::Esc => {
                        app.should_quit = true;
                    }
                    KeyCode::Up | KeyCode::Char('k') => {
                        app.select(app.selected.saturating_sub(1));
                    }
                    KeyCode::Down | KeyCode::Char('j') => {
                        app.select(app.selected + 1);
                    }
                    KeyCode::Char('1') => app.select(0),
                    KeyCode::Char('2') => app.select(1),
                    KeyCode::Char('3') => app.select(2),
                    KeyCode::Enter | KeyCode::Char(' ') => app.open_drawer(),
                    _ => {}
                }
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

// ============================================================================
// UI RENDERING
// ============================================================================

fn ui(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Launcher
            Constraint::Length(3), // Footer
        ])
        .split(f.area());

    render_header(f, chunks[0]);
    render_launcher(f, chunks[1], app);
    render_footer(f, chunks[2], app);

    // Drawer (if open)
    if app.sequencer.is_open() {
        render_drawer(f, app);
    }
}

fn render_header(f: &mut Frame, area: Rect) {
    let title = format!("arruma TUI v{}", env!("CARGO_PKG_VERSION"));

    let header = Paragraph::new(title)
        .block(Block::default().borders(Borders::ALL))
        .alignment(Alignment::Center);

    f.render_widget(header, area);
}

fn render_launcher(f: &mut Frame, area: Rect, app: &App) {
    let mut lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "  O que você quer organizar?",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
    ];

    for (index, process) in ProcessType::ALL.iter().enumerate() {
        let config = process.config();
        let is_selected = index == app.selected;
        let marker = if is_selected { "▸" } else { " " };
        let title_style = if is_selected {
            Style::default().add_modifier(Modifier::REVERSED | Modifier::BOLD)
        } else {
            Style::default().add_modifier(Modifier::BOLD)
        };

        lines.push(Line::from(vec![
            Span::raw(format!("  {} ", marker)),
            Span::styled(format!("{} {}", config.icon, config.title), title_style),
        ]));
        lines.push(Line::from(Span::styled(
            format!("      {}", config.subtitle),
            Style::default().add_modifier(Modifier::DIM),
        )));
        lines.push(Line::from(""));
    }

    let launcher = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Processos "),
    );

    f.render_widget(launcher, area);
}

fn render_footer(f: &mut Frame, area: Rect, app: &App) {
    let key_hints = if app.sequencer.is_open() {
        vec![
            Span::styled(
                "Esc",
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            ),
            Span::raw(if app.sequencer.is_complete() {
                " Close "
            } else {
                " Cancel "
            }),
        ]
    } else {
        vec![
            Span::styled(
                "↑↓",
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            ),
            Span::raw(" Select "),
            Span::styled(
                "Enter",
                Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
            ),
            Span::raw(" Organize "),
            Span::styled(
                "Q",
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            ),
            Span::raw(" Quit "),
        ]
    };

    let footer = Paragraph::new(Line::from(key_hints))
        .block(Block::default().borders(Borders::ALL))
        .alignment(Alignment::Center);

    f.render_widget(footer, area);
}

fn render_drawer(f: &mut Frame, app: &App) {
    let seq = &app.sequencer;
    let config = seq.config();
    let accent = Color::Rgb(config.accent.0, config.accent.1, config.accent.2);

    // Tall enough for subtitle + steps (or the result view) + gauge + hint
    let height = (config.steps.len() as u16 + 8).min(f.area().height);
    let area = drawer_rect(height, f.area());

    let block = Block::default()
        .title(format!(" {} {} ", config.icon, config.title))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(accent));

    f.render_widget(Clear, area);
    f.render_widget(block, area);

    let inner = area.inner(Margin {
        horizontal: 2,
        vertical: 1,
    });
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(1),    // Subtitle + steps / result
            Constraint::Length(1), // Gauge
            Constraint::Length(1), // Hint
        ])
        .split(inner);

    let mut lines = vec![
        Line::from(Span::styled(
            config.subtitle,
            Style::default().add_modifier(Modifier::DIM),
        )),
        Line::from(""),
    ];

    if seq.is_complete() {
        let stat = seq.process().result_stat();
        lines.push(Line::from(Span::styled(
            "✓ Concluído",
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        )));
        lines.push(Line::from(""));
        lines.push(Line::from(vec![
            Span::styled(
                stat.value,
                Style::default().fg(accent).add_modifier(Modifier::BOLD),
            ),
            Span::raw(" "),
            Span::raw(stat.label),
        ]));
    } else {
        for (index, step) in config.steps.iter().enumerate() {
            let (marker, style) = if index < seq.current_step() {
                ("✓", Style::default().fg(Color::Green))
            } else if index == seq.current_step() {
                (
                    spinner(app.tick),
                    Style::default().fg(accent).add_modifier(Modifier::BOLD),
                )
            } else {
                ("○", Style::default().add_modifier(Modifier::DIM))
            };

            lines.push(Line::from(vec![
                Span::styled(format!("{} ", marker), style),
                Span::styled(step.label, style),
            ]));
        }
    }

    f.render_widget(Paragraph::new(lines), rows[0]);

    let gauge = Gauge::default()
        .gauge_style(Style::default().fg(accent))
        .ratio(f64::from(seq.fraction()))
        .label(format!("{}%", seq.percent()));
    f.render_widget(gauge, rows[1]);

    let hint = if seq.is_complete() {
        "Esc Fechar"
    } else {
        "Esc Cancelar"
    };
    let hint = Paragraph::new(Line::from(Span::styled(
        hint,
        Style::default().add_modifier(Modifier::DIM),
    )))
    .alignment(Alignment::Center);
    f.render_widget(hint, rows[2]);
}

// ============================================================================
// UTILITY FUNCTIONS
// ============================================================================

/// Bottom-anchored rect spanning the full width, like a mobile drawer sheet.
fn drawer_rect(height: u16, r: Rect) -> Rect {
    let height = height.min(r.height);
    Rect {
        x: r.x,
        y: r.y + r.height - height,
        width: r.width,
        height,
    }
}
