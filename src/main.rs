mod app;
mod clock;
mod config;
mod edit;
mod grid;
mod rules;
mod ui;

use app::{App, Focus};
use clap::Parser;
use config::AppConfig;
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind, KeyModifiers,
        MouseButton, MouseEventKind,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use edit::{EditMode, PointerKind};
use grid::Grid;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::path::PathBuf;
use std::time::{Duration, Instant};

#[derive(Parser, Debug)]
#[command(name = "life-simulator")]
#[command(about = "Interactive Conway's Game of Life in the terminal")]
struct Args {
    /// Grid width in cells (must be positive)
    #[arg(long)]
    width: Option<usize>,

    /// Grid height in cells (must be positive)
    #[arg(long)]
    height: Option<usize>,

    /// Tick rate in generations per second (clamped to 1-10)
    #[arg(short = 'r', long)]
    rate: Option<f64>,

    /// Edit mode for pointer input (toggle, paint)
    #[arg(short = 'm', long)]
    mode: Option<String>,

    /// Density of the initial random fill, 0.0-1.0 (0 = start empty)
    #[arg(long)]
    fill: Option<f64>,

    /// Load settings from a JSON config file instead of the default location
    #[arg(long)]
    config: Option<PathBuf>,

    /// Write the resolved settings to the default config location and exit
    #[arg(long, default_value = "false")]
    save_config: bool,
}

fn parse_mode(s: &str) -> EditMode {
    match s.to_lowercase().as_str() {
        "paint" | "multi" | "drag" => EditMode::MultiPaint,
        _ => EditMode::SingleToggle,
    }
}

/// Settings precedence: explicit --config file, then the default config file
/// if one exists, then built-in defaults; individual CLI flags override
/// whatever the file said.
fn resolve_settings(args: &Args) -> Result<AppConfig, Box<dyn std::error::Error>> {
    let base = if let Some(path) = &args.config {
        AppConfig::load_from_file(path)?
    } else {
        match config::default_config_path().filter(|p| p.exists()) {
            Some(path) => AppConfig::load_from_file(&path)?,
            None => AppConfig::default(),
        }
    };

    Ok(AppConfig {
        version: base.version,
        mode: args.mode.as_deref().map(parse_mode).unwrap_or(base.mode),
        rate_hz: args.rate.unwrap_or(base.rate_hz),
        grid_width: args.width.unwrap_or(base.grid_width),
        grid_height: args.height.unwrap_or(base.grid_height),
        fill_density: args.fill.unwrap_or(base.fill_density).clamp(0.0, 1.0),
    })
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let settings = resolve_settings(&args)?;

    if args.save_config {
        let Some(path) = config::default_config_path() else {
            return Err("no config directory available on this platform".into());
        };
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        settings.save_to_file(&path)?;
        println!("Saved settings to {}", path.display());
        return Ok(());
    }

    // Dimension validation fails before the terminal is touched.
    let grid = if settings.fill_density > 0.0 {
        Grid::randomized(
            settings.grid_width,
            settings.grid_height,
            settings.fill_density,
            &mut rand::thread_rng(),
        )?
    } else {
        Grid::new(settings.grid_width, settings.grid_height)?
    };

    let mut app = App::new(grid, settings.rate_hz, settings.mode, settings.fill_density);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run the app
    let res = run_app(&mut terminal, &mut app);

    // Cleanup
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

fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
) -> io::Result<()> {
    // Target ~60fps for smooth animation
    const FRAME_DURATION: Duration = Duration::from_millis(16);

    loop {
        // Render current state
        terminal.draw(|frame| ui::render(frame, app))?;

        // Poll for events with timeout
        if event::poll(FRAME_DURATION)? {
            match event::read()? {
                Event::Key(key) => {
                    // Only process Press events
                    if key.kind != KeyEventKind::Press {
                        continue;
                    }

                    // Handle Ctrl+C
                    if key.code == KeyCode::Char('c')
                        && key.modifiers.contains(KeyModifiers::CONTROL)
                    {
                        return Ok(());
                    }

                    match key.code {
                        // System controls
                        KeyCode::Char('q') | KeyCode::Char('Q') => return Ok(()),
                        KeyCode::Char(' ') => app.toggle_running(Instant::now()),
                        KeyCode::Enter => app.request_step(),
                        KeyCode::Char('r') | KeyCode::Char('R') => app.reset(),
                        KeyCode::Char('n') | KeyCode::Char('N') => app.randomize(),
                        KeyCode::Char('v') | KeyCode::Char('V') => app.toggle_fullscreen(),
                        KeyCode::Char('h') | KeyCode::Char('H') => app.toggle_help(),
                        KeyCode::Char('m') | KeyCode::Char('M') => {
                            app.cycle_mode();
                            app.focus = Focus::Mode;
                        }
                        KeyCode::Char('+') | KeyCode::Char('=') => {
                            app.adjust_rate(1.0, Instant::now());
                            app.focus = Focus::Rate;
                        }
                        KeyCode::Char('-') | KeyCode::Char('_') => {
                            app.adjust_rate(-1.0, Instant::now());
                            app.focus = Focus::Rate;
                        }

                        // Navigation
                        KeyCode::Tab => app.next_focus(),
                        KeyCode::BackTab => app.prev_focus(),
                        KeyCode::Up => {
                            if !app.show_help && app.focus.is_param() {
                                app.adjust_focused_up(Instant::now());
                            }
                        }
                        KeyCode::Down => {
                            if !app.show_help && app.focus.is_param() {
                                app.adjust_focused_down(Instant::now());
                            }
                        }
                        KeyCode::Esc => {
                            if app.show_help {
                                app.toggle_help();
                            } else if app.focus.is_param() {
                                app.focus = Focus::Controls;
                            }
                        }
                        KeyCode::Char('j') | KeyCode::Char('J') => {
                            if app.show_help {
                                app.scroll_help_down(ui::HELP_CONTENT_LINES);
                            }
                        }
                        KeyCode::Char('k') | KeyCode::Char('K') => {
                            if app.show_help {
                                app.scroll_help_up();
                            }
                        }
                        _ => {}
                    }
                }
                Event::Mouse(mouse) => {
                    let pointer = match mouse.kind {
                        MouseEventKind::Down(MouseButton::Left) => Some(PointerKind::Down),
                        MouseEventKind::Drag(MouseButton::Left) => Some(PointerKind::Enter),
                        MouseEventKind::Up(MouseButton::Left) => Some(PointerKind::Up),
                        _ => None,
                    };
                    if let Some(kind) = pointer {
                        let size = terminal.size()?;
                        let frame_rect = ratatui::layout::Rect {
                            x: 0,
                            y: 0,
                            width: size.width,
                            height: size.height,
                        };
                        let inner = ui::canvas_inner(frame_rect, app.fullscreen_mode);
                        let cell = ui::hit_test(inner, app.grid(), mouse.column, mouse.row);
                        app.on_pointer(kind, cell, Instant::now());
                    }
                }
                _ => {}
            }
        }

        // Apply due edits and clock steps
        app.tick(Instant::now());
    }
}
