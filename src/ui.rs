use crate::app::{App, Focus};
use crate::clock::ClockStatus;
use crate::grid::Grid;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Wrap},
    Frame,
};

const SIDEBAR_WIDTH: u16 = 22;

/// Terminal columns per grid cell. Two columns roughly square the cells.
pub const CELL_WIDTH: u16 = 2;

/// Max scroll for help content (generous to account for text wrapping on small screens)
pub const HELP_CONTENT_LINES: u16 = 40;

// UI color scheme
const BORDER_COLOR: Color = Color::Cyan;
const HIGHLIGHT_COLOR: Color = Color::Yellow;
const TEXT_COLOR: Color = Color::White;
const DIM_TEXT_COLOR: Color = Color::Gray;
const LIVE_CELL_COLOR: Color = Color::Green;
const DEAD_CELL_COLOR: Color = Color::DarkGray;

/// Creates a standard styled block with rounded borders
fn styled_block(title: &str) -> Block<'_> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(BORDER_COLOR))
        .title(title)
}

/// Main render function
pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();

    if app.fullscreen_mode {
        render_canvas(frame, area, app);
    } else {
        let layout = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(SIDEBAR_WIDTH), Constraint::Min(0)])
            .split(area);

        render_sidebar(frame, layout[0], app);
        render_canvas(frame, layout[1], app);
    }

    if app.show_help {
        render_help_overlay(frame, area, app);
    }
}

/// Inner (borderless) canvas rectangle for the given frame area. The mouse
/// handler uses this to map terminal coordinates onto grid cells; it must
/// match the layout `render` produces.
pub fn canvas_inner(frame_area: Rect, fullscreen: bool) -> Rect {
    let canvas = if fullscreen {
        frame_area
    } else {
        Rect {
            x: frame_area.x + SIDEBAR_WIDTH.min(frame_area.width),
            y: frame_area.y,
            width: frame_area.width.saturating_sub(SIDEBAR_WIDTH),
            height: frame_area.height,
        }
    };
    Rect {
        x: canvas.x + 1,
        y: canvas.y + 1,
        width: canvas.width.saturating_sub(2),
        height: canvas.height.saturating_sub(2),
    }
}

/// Map a terminal mouse position to the grid cell under it, if any.
pub fn hit_test(inner: Rect, grid: &Grid, x: u16, y: u16) -> Option<(usize, usize)> {
    if x < inner.x || y < inner.y || x >= inner.x + inner.width || y >= inner.y + inner.height {
        return None;
    }
    let column = ((x - inner.x) / CELL_WIDTH) as usize;
    let row = (y - inner.y) as usize;
    grid.get(column, row).map(|_| (column, row))
}

fn render_sidebar(frame: &mut Frame, area: Rect, app: &App) {
    let sections = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(5),  // Status
            Constraint::Length(7),  // Parameters
            Constraint::Min(10),    // Controls
        ])
        .split(area);

    render_status_box(frame, sections[0], app);
    render_params_box(frame, sections[1], app);
    render_controls_box(frame, sections[2], app);
}

fn render_status_box(frame: &mut Frame, area: Rect, app: &App) {
    let block = styled_block(" Game of Life ");

    let (status_text, status_color) = if app.edit.is_painting() {
        ("PAINTING", HIGHLIGHT_COLOR)
    } else {
        match app.status() {
            ClockStatus::Running => ("RUNNING", BORDER_COLOR),
            ClockStatus::Stopped => ("STOPPED", HIGHLIGHT_COLOR),
        }
    };

    let content = vec![
        Line::from(Span::styled(
            format!("Gen {}", app.generation),
            Style::default().fg(TEXT_COLOR),
        )),
        Line::from(Span::styled(
            format!("Pop {}", app.population()),
            Style::default().fg(TEXT_COLOR),
        )),
        Line::from(Span::styled(status_text, Style::default().fg(status_color))),
    ];

    let paragraph = Paragraph::new(content).block(block);
    frame.render_widget(paragraph, area);
}

fn render_params_box(frame: &mut Frame, area: Rect, app: &App) {
    let block = styled_block(" Parameters ");

    let make_line = |label: &str, value: String, focused: bool| {
        let prefix = if focused { "> " } else { "  " };
        let style = if focused {
            Style::default().fg(HIGHLIGHT_COLOR)
        } else {
            Style::default().fg(TEXT_COLOR)
        };
        Line::from(Span::styled(format!("{}{}: {}", prefix, label, value), style))
    };

    let grid = app.grid();
    let content = vec![
        make_line(
            "Mode",
            app.edit.mode().name().to_string(),
            app.focus == Focus::Mode,
        ),
        make_line(
            "Rate",
            format!("{:.1} Hz", app.clock.rate_hz()),
            app.focus == Focus::Rate,
        ),
        Line::from(Span::styled(
            format!("  Grid: {}x{}", grid.width(), grid.height()),
            Style::default().fg(DIM_TEXT_COLOR),
        )),
        Line::from(Span::styled(
            format!("  Step: {}ms", app.clock.interval().as_millis()),
            Style::default().fg(DIM_TEXT_COLOR),
        )),
    ];

    let paragraph = Paragraph::new(content).block(block);
    frame.render_widget(paragraph, area);
}

fn render_controls_box(frame: &mut Frame, area: Rect, app: &App) {
    let key_style = Style::default().fg(HIGHLIGHT_COLOR);
    let desc_style = Style::default().fg(DIM_TEXT_COLOR);

    // Helper to create a control line
    let make_control = |key: &str, desc: String| -> Line<'_> {
        Line::from(vec![
            Span::styled(format!("{:>5}", key), key_style),
            Span::styled(format!(" {}", desc), desc_style),
        ])
    };

    let content = vec![
        make_control("Space", "run/stop".to_string()),
        make_control("Enter", "step once".to_string()),
        make_control("Click", "edit cells".to_string()),
        make_control("M", format!("mode: {}", app.edit.mode().name())),
        make_control("+/-", "tick rate".to_string()),
        make_control("R", "clear grid".to_string()),
        make_control("N", "randomize".to_string()),
        make_control("Tab", "focus params".to_string()),
        make_control("V", "fullscreen".to_string()),
        make_control("H", "help".to_string()),
        make_control("Q", "quit".to_string()),
    ];

    let block = styled_block(" Controls ");
    let paragraph = Paragraph::new(content).block(block);
    frame.render_widget(paragraph, area);
}

fn render_canvas(frame: &mut Frame, area: Rect, app: &App) {
    let block = styled_block("");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let grid = app.grid();
    let visible_rows = (inner.height as usize).min(grid.height());
    let visible_columns = ((inner.width / CELL_WIDTH) as usize).min(grid.width());

    let mut lines = Vec::with_capacity(visible_rows);
    for row in 0..visible_rows {
        let mut spans = Vec::with_capacity(visible_columns);
        for column in 0..visible_columns {
            let span = if grid.is_alive(column, row) {
                Span::styled("██", Style::default().fg(LIVE_CELL_COLOR))
            } else {
                Span::styled("· ", Style::default().fg(DEAD_CELL_COLOR))
            };
            spans.push(span);
        }
        lines.push(Line::from(spans));
    }

    let paragraph = Paragraph::new(lines);
    frame.render_widget(paragraph, inner);
}

fn render_help_overlay(frame: &mut Frame, area: Rect, app: &App) {
    // Calculate the canvas area (exclude sidebar unless fullscreen)
    let canvas_x = if app.fullscreen_mode { 0 } else { SIDEBAR_WIDTH };
    let canvas_width = if app.fullscreen_mode {
        area.width
    } else {
        area.width.saturating_sub(SIDEBAR_WIDTH)
    };

    // Center the help dialog within the canvas
    let help_width = 56.min(canvas_width.saturating_sub(4));
    let help_height = area.height.saturating_sub(4).min(30);
    let x = canvas_x + (canvas_width.saturating_sub(help_width)) / 2;
    let y = (area.height.saturating_sub(help_height)) / 2;

    let help_area = Rect {
        x: area.x + x,
        y: area.y + y,
        width: help_width,
        height: help_height,
    };

    // Clear the background
    frame.render_widget(Clear, help_area);

    let content = vec![
        Line::from(""),
        Line::from(Span::styled(
            "CONWAY'S GAME OF LIFE",
            Style::default().fg(BORDER_COLOR),
        )),
        Line::from(""),
        Line::from("Each generation, every cell is decided by its eight neighbors:"),
        Line::from("a live cell survives with 2 or 3 live neighbors, a dead cell"),
        Line::from("comes alive with exactly 3. Everything else dies or stays dead."),
        Line::from("Cells beyond the grid edge do not exist, so edge cells have"),
        Line::from("fewer neighbors than interior cells."),
        Line::from(""),
        Line::from(Span::styled("EDITING:", Style::default().fg(HIGHLIGHT_COLOR))),
        Line::from("Toggle mode: click a cell to flip it."),
        Line::from("Paint mode: hold the button and drag to bring cells alive;"),
        Line::from("crossing a cell twice in one drag leaves it alive."),
        Line::from("M switches modes (finish the drag first)."),
        Line::from(""),
        Line::from(Span::styled("RUNNING:", Style::default().fg(HIGHLIGHT_COLOR))),
        Line::from("Space starts and stops the clock; starting always advances"),
        Line::from("one generation right away. Enter steps once at any time."),
        Line::from("+/- changes the tick rate (1-10 Hz, capped at 10 steps/s)."),
        Line::from(""),
        Line::from(Span::styled("OTHER KEYS:", Style::default().fg(HIGHLIGHT_COLOR))),
        Line::from("R=Clear, N=Randomize, Tab=Focus params, V=Fullscreen, Q=Quit"),
        Line::from(""),
    ];

    let content_height = content.len() as u16;
    let visible_height = help_height.saturating_sub(2); // minus borders
    let max_scroll = content_height.saturating_sub(visible_height);
    let is_scrollable = max_scroll > 0;

    let title = if is_scrollable {
        " Help (J/K scroll, H to close) "
    } else {
        " Help (H to close) "
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Double)
        .border_style(Style::default().fg(HIGHLIGHT_COLOR))
        .title(title);

    let paragraph = Paragraph::new(content)
        .block(block)
        .wrap(Wrap { trim: true })
        .scroll((app.help_scroll, 0));

    frame.render_widget(paragraph, help_area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hit_test_maps_terminal_cells_to_grid_cells() {
        let grid = Grid::new(10, 10).unwrap();
        let inner = Rect {
            x: 23,
            y: 1,
            width: 40,
            height: 20,
        };

        assert_eq!(hit_test(inner, &grid, 23, 1), Some((0, 0)));
        // Both terminal columns of a cell hit the same grid cell.
        assert_eq!(hit_test(inner, &grid, 24, 1), Some((0, 0)));
        assert_eq!(hit_test(inner, &grid, 25, 3), Some((1, 2)));
    }

    #[test]
    fn hit_test_rejects_positions_outside_canvas_or_grid() {
        let grid = Grid::new(5, 5).unwrap();
        let inner = Rect {
            x: 23,
            y: 1,
            width: 40,
            height: 20,
        };

        // Sidebar and border positions.
        assert_eq!(hit_test(inner, &grid, 0, 5), None);
        assert_eq!(hit_test(inner, &grid, 22, 5), None);
        // Inside the canvas but past the 5x5 grid.
        assert_eq!(hit_test(inner, &grid, 23 + 5 * CELL_WIDTH, 1), None);
        assert_eq!(hit_test(inner, &grid, 23, 6), None);
    }

    #[test]
    fn canvas_inner_accounts_for_sidebar_and_borders() {
        let frame = Rect {
            x: 0,
            y: 0,
            width: 80,
            height: 24,
        };

        let inner = canvas_inner(frame, false);
        assert_eq!(inner.x, SIDEBAR_WIDTH + 1);
        assert_eq!(inner.y, 1);
        assert_eq!(inner.width, 80 - SIDEBAR_WIDTH - 2);
        assert_eq!(inner.height, 22);

        let full = canvas_inner(frame, true);
        assert_eq!(full.x, 1);
        assert_eq!(full.width, 78);
    }
}
