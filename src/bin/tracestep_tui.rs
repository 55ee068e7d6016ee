//! Tracestep replay - Terminal User Interface
//!
//! Steps through Tower of Hanoi and N-Queens traces using ratatui.
//! App logic lives in `tracestep::tui::replay_app`.

#![forbid(unsafe_code)]

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{ArgAction, Parser};
use tracestep::cli::init_tracing;
use tracestep::config::TraceConfig;
use tracestep::tui::ReplayApp;

/// Interactive trace replay.
#[derive(Debug, Parser)]
#[command(name = "tracestep-tui", version)]
struct TuiArgs {
    /// YAML configuration file.
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Log to stderr (-v info, -vv debug).
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn main() -> ExitCode {
    let args = TuiArgs::parse();
    if args.verbose > 0 {
        init_tracing(args.verbose);
    }

    let config = match args.config.as_deref().map(TraceConfig::load).transpose() {
        Ok(config) => config.unwrap_or_default(),
        Err(e) => {
            eprintln!("Error loading config: {e}");
            return ExitCode::from(1);
        }
    };

    let app = match ReplayApp::new(&config) {
        Ok(app) => app,
        Err(e) => {
            eprintln!("Error: {e}");
            return ExitCode::from(1);
        }
    };

    match tui::run(app) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Terminal error: {e}");
            ExitCode::from(1)
        }
    }
}

mod tui {
    use crossterm::{
        event::{self, Event, KeyEventKind},
        execute,
        terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    };
    use ratatui::{
        backend::CrosstermBackend,
        layout::{Constraint, Direction, Layout, Rect},
        style::{Color, Modifier, Style},
        text::{Line, Span},
        widgets::{Block, Borders, Paragraph},
        Frame, Terminal,
    };
    use std::io;
    use std::time::Instant;
    use tracestep::renderers::{render_board, render_header, render_pegs, render_status};
    use tracestep::session::Frame as TraceFrame;
    use tracestep::trace::{Peg, ProblemKind};
    use tracestep::tui::ReplayApp;

    pub fn run(mut app: ReplayApp) -> io::Result<()> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, crossterm::cursor::Hide)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;
        terminal.clear()?;

        let result = run_main_loop(&mut terminal, &mut app);

        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            crossterm::cursor::Show
        )?;

        result
    }

    fn run_main_loop(
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
        app: &mut ReplayApp,
    ) -> io::Result<()> {
        let mut last_tick = Instant::now();

        loop {
            terminal.draw(|f| ui(f, app))?;

            let tick_rate = app.tick_rate();
            let timeout = tick_rate.saturating_sub(last_tick.elapsed());
            if event::poll(timeout)? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        app.handle_key(key.code);
                    }
                }
            }

            if last_tick.elapsed() >= tick_rate {
                app.tick();
                last_tick = Instant::now();
            }

            if app.should_quit() {
                break;
            }
        }

        Ok(())
    }

    fn ui(f: &mut Frame, app: &ReplayApp) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .margin(1)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(10),
                Constraint::Length(3),
            ])
            .split(f.area());

        render_title(f, chunks[0], app);

        let main_chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
            .split(chunks[1]);

        let left_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(8), Constraint::Length(11)])
            .split(main_chunks[0]);

        render_board_panel(f, left_chunks[0], app);
        render_controls(f, left_chunks[1], app);
        render_log(f, main_chunks[1], app);
        render_status_bar(f, chunks[2], app);
    }

    fn render_title(f: &mut Frame, area: Rect, app: &ReplayApp) {
        let problem = match app.kind() {
            ProblemKind::Hanoi => format!(" Tower of Hanoi ({} disks) ", app.session.size()),
            ProblemKind::NQueens => {
                let n = app.session.size();
                format!(" N-Queens ({n}×{n}) ")
            }
        };
        let title = Paragraph::new(Line::from(vec![
            Span::styled(
                problem,
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                render_header(app.session.position(), app.session.len()),
                Style::default().fg(Color::Gray),
            ),
        ]))
        .block(Block::default().borders(Borders::ALL).title("tracestep"));
        f.render_widget(title, area);
    }

    fn render_board_panel(f: &mut Frame, area: Rect, app: &ReplayApp) {
        let (title, body) = match app.session.frame() {
            TraceFrame::Hanoi { pegs, disks } => {
                let mut body = render_pegs(pegs, disks);
                let width = (2 * disks).saturating_sub(1);
                let labels: Vec<String> = Peg::ALL
                    .iter()
                    .map(|peg| format!("{:^width$}", peg.label()))
                    .collect();
                body.push_str(&labels.join("  "));
                ("Pegs".to_string(), body)
            }
            TraceFrame::Queens { board, status } => {
                (format!("Board - {}", render_status(status)), render_board(board))
            }
        };

        let lines: Vec<Line> = body.lines().map(|l| Line::from(l.to_string())).collect();
        let panel = Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .title(title)
                .border_style(Style::default().fg(Color::Yellow)),
        );
        f.render_widget(panel, area);
    }

    fn render_log(f: &mut Frame, area: Rect, app: &ReplayApp) {
        let tail = app.log_tail();
        let visible = usize::from(area.height.saturating_sub(2));
        let start = tail.len().saturating_sub(visible);
        let lines: Vec<Line> = tail[start..]
            .iter()
            .map(|l| Line::from(l.as_str()))
            .collect();

        let log = Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!("Trace Log ({} lines)", app.session.log().len())),
        );
        f.render_widget(log, area);
    }

    fn render_controls(f: &mut Frame, area: Rect, app: &ReplayApp) {
        let (min, max) = app.size_range();
        let controls_text = vec![
            Line::from(Span::styled(
                "Controls:",
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from(" N / →  - Step forward"),
            Line::from(" Space  - Start/stop auto-play"),
            Line::from(" E      - Jump to end"),
            Line::from(" R      - Reset"),
            Line::from(format!(" +/-    - Size ({min}..={max})")),
            Line::from(" T      - Toggle Hanoi / N-Queens"),
            Line::from(" Q      - Quit"),
        ];

        let controls = Paragraph::new(controls_text)
            .block(Block::default().borders(Borders::ALL).title("Controls"));
        f.render_widget(controls, area);
    }

    fn render_status_bar(f: &mut Frame, area: Rect, app: &ReplayApp) {
        let (status, color) = if let Some(err) = &app.last_error {
            (format!("ERROR: {err}"), Color::Red)
        } else if app.session.is_complete() {
            ("COMPLETE".to_string(), Color::Cyan)
        } else if app.autoplay.is_running() {
            (
                format!("RUNNING ({} ms/step)", app.tick_rate().as_millis()),
                Color::Green,
            )
        } else {
            ("PAUSED".to_string(), Color::Yellow)
        };

        let bar = Paragraph::new(Line::from(Span::styled(
            status,
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )))
        .block(Block::default().borders(Borders::ALL));
        f.render_widget(bar, area);
    }
}
