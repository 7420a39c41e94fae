use crate::clock::{ClockStatus, SimulationClock};
use crate::edit::{CellEdit, EditMode, EditSession, PointerKind};
use crate::grid::Grid;
use crate::rules;
use rand::rngs::ThreadRng;
use std::time::Instant;

/// Fill density used by the randomize key when none was configured.
const DEFAULT_FILL_DENSITY: f64 = 0.3;

/// Focus state for parameter editing in the sidebar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    #[default]
    None,
    Mode,
    Rate,
    Controls,
}

impl Focus {
    /// Tab cycles through the adjustable parameters
    pub fn next(&self) -> Focus {
        match self {
            Focus::None | Focus::Controls => Focus::Mode,
            Focus::Mode => Focus::Rate,
            Focus::Rate => Focus::Mode,
        }
    }

    pub fn prev(&self) -> Focus {
        match self {
            Focus::None | Focus::Controls => Focus::Rate,
            Focus::Mode => Focus::Rate,
            Focus::Rate => Focus::Mode,
        }
    }

    /// Check if focus is on a parameter (not Controls or None)
    pub fn is_param(&self) -> bool {
        !matches!(self, Focus::None | Focus::Controls)
    }
}

/// Main application state
pub struct App {
    grid: Grid,
    pub clock: SimulationClock,
    pub edit: EditSession,
    pub generation: u64,
    pub focus: Focus,
    pub fullscreen_mode: bool,
    pub show_help: bool,
    pub help_scroll: u16,
    fill_density: f64,
    rng: ThreadRng,
}

impl App {
    pub fn new(grid: Grid, rate_hz: f64, mode: EditMode, fill_density: f64) -> Self {
        Self {
            grid,
            clock: SimulationClock::new(rate_hz),
            edit: EditSession::new(mode),
            generation: 0,
            focus: Focus::Controls,
            fullscreen_mode: false,
            show_help: false,
            help_scroll: 0,
            fill_density: fill_density.clamp(0.0, 1.0),
            rng: rand::thread_rng(),
        }
    }

    /// Read-only snapshot of the current grid, for rendering.
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn population(&self) -> usize {
        self.grid.population()
    }

    pub fn status(&self) -> ClockStatus {
        self.clock.status()
    }

    /// Advance one generation, whether or not the clock is running.
    pub fn request_step(&mut self) {
        self.grid = rules::next_generation(&self.grid);
        self.generation += 1;
    }

    /// Start periodic stepping. Always advances at least one generation
    /// immediately; a running clock is restarted, not doubled.
    pub fn request_start(&mut self, now: Instant) {
        self.clock.start(now);
        self.request_step();
    }

    pub fn request_stop(&mut self) {
        self.clock.stop();
    }

    pub fn toggle_running(&mut self, now: Instant) {
        if self.clock.is_running() {
            self.request_stop();
        } else {
            self.request_start(now);
        }
    }

    pub fn adjust_rate(&mut self, delta: f64, now: Instant) {
        self.clock.adjust_rate(delta, now);
    }

    /// Switch the edit mode. Ignored while a drag is in progress.
    pub fn set_mode(&mut self, mode: EditMode) -> bool {
        self.edit.set_mode(mode)
    }

    pub fn cycle_mode(&mut self) {
        let next = self.edit.mode().next();
        self.set_mode(next);
    }

    /// Cell-interaction entry point. `cell` is `None` when the pointer event
    /// landed outside the canvas; a release there still ends the drag.
    pub fn on_pointer(&mut self, kind: PointerKind, cell: Option<(usize, usize)>, now: Instant) {
        let edits = match (cell, kind) {
            (Some((column, row)), _) => self.edit.on_pointer(kind, column, row, now),
            (None, PointerKind::Up) => self.edit.release(),
            (None, _) => Vec::new(),
        };
        self.apply_edits(&edits);
    }

    /// One cooperative scheduling pass: apply due edit flushes, then perform
    /// due clock steps. Both mutate the grid only through whole-grid
    /// replacement, so each is atomic with respect to the other.
    pub fn tick(&mut self, now: Instant) {
        let edits = self.edit.flush_due(now);
        self.apply_edits(&edits);

        for _ in 0..self.clock.due_steps(now) {
            self.request_step();
        }
    }

    fn apply_edits(&mut self, edits: &[CellEdit]) {
        if edits.is_empty() {
            return;
        }
        let mut painted: Vec<(usize, usize)> = Vec::new();
        for edit in edits {
            match *edit {
                CellEdit::Toggle { column, row } => {
                    let alive = self.grid.is_alive(column, row);
                    self.grid = self.grid.with_cell(column, row, !alive);
                }
                CellEdit::Paint { column, row } => painted.push((column, row)),
            }
        }
        if !painted.is_empty() {
            self.grid = self.grid.with_cells(&painted, true);
        }
    }

    /// Clear the grid and restart the generation count.
    pub fn reset(&mut self) {
        self.grid = self.grid.empty_like();
        self.generation = 0;
    }

    /// Refill the grid with random soup.
    pub fn randomize(&mut self) {
        let density = if self.fill_density > 0.0 {
            self.fill_density
        } else {
            DEFAULT_FILL_DENSITY
        };
        if let Ok(grid) =
            Grid::randomized(self.grid.width(), self.grid.height(), density, &mut self.rng)
        {
            self.grid = grid;
            self.generation = 0;
        }
    }

    pub fn next_focus(&mut self) {
        self.focus = self.focus.next();
    }

    pub fn prev_focus(&mut self) {
        self.focus = self.focus.prev();
    }

    /// Adjust the currently focused parameter
    pub fn adjust_focused_up(&mut self, now: Instant) {
        match self.focus {
            Focus::None | Focus::Controls => {}
            Focus::Mode => self.cycle_mode(),
            Focus::Rate => self.adjust_rate(1.0, now),
        }
    }

    pub fn adjust_focused_down(&mut self, now: Instant) {
        match self.focus {
            Focus::None | Focus::Controls => {}
            Focus::Mode => self.cycle_mode(),
            Focus::Rate => self.adjust_rate(-1.0, now),
        }
    }

    pub fn toggle_fullscreen(&mut self) {
        self.fullscreen_mode = !self.fullscreen_mode;
    }

    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
        if self.show_help {
            self.help_scroll = 0;
        }
    }

    pub fn scroll_help_up(&mut self) {
        self.help_scroll = self.help_scroll.saturating_sub(1);
    }

    pub fn scroll_help_down(&mut self, max_scroll: u16) {
        self.help_scroll = (self.help_scroll + 1).min(max_scroll);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn blank_app() -> App {
        App::new(Grid::new(5, 5).unwrap(), 5.0, EditMode::SingleToggle, 0.0)
    }

    #[test]
    fn request_step_advances_regardless_of_clock_status() {
        let mut app = blank_app();
        assert_eq!(app.status(), ClockStatus::Stopped);

        app.request_step();
        assert_eq!(app.generation, 1);
    }

    #[test]
    fn start_steps_immediately_and_restart_keeps_one_ticker() {
        let mut app = blank_app();
        let t0 = Instant::now();

        app.request_start(t0);
        assert_eq!(app.generation, 1);

        // Restart: another immediate step, still exactly one ticker.
        app.request_start(t0);
        assert_eq!(app.generation, 2);

        // 5 Hz -> 200 ms interval; 250 ms later exactly one step is due.
        app.tick(t0 + Duration::from_millis(250));
        assert_eq!(app.generation, 3);
    }

    #[test]
    fn toggle_running_round_trip() {
        let mut app = blank_app();
        let t0 = Instant::now();

        app.toggle_running(t0);
        assert_eq!(app.status(), ClockStatus::Running);
        app.toggle_running(t0);
        assert_eq!(app.status(), ClockStatus::Stopped);
    }

    #[test]
    fn pointer_toggle_flips_a_cell_both_ways() {
        let mut app = blank_app();
        let t0 = Instant::now();

        app.on_pointer(PointerKind::Down, Some((2, 2)), t0);
        assert!(app.grid().is_alive(2, 2));

        app.on_pointer(PointerKind::Down, Some((2, 2)), t0);
        assert!(!app.grid().is_alive(2, 2));
    }

    #[test]
    fn paint_drag_lands_after_the_coalescing_window() {
        let mut app = App::new(Grid::new(5, 5).unwrap(), 5.0, EditMode::MultiPaint, 0.0);
        let t0 = Instant::now();

        app.on_pointer(PointerKind::Down, Some((0, 0)), t0);
        app.on_pointer(PointerKind::Enter, Some((1, 0)), t0);
        assert_eq!(app.population(), 0);

        app.tick(t0 + Duration::from_millis(10));
        assert!(app.grid().is_alive(0, 0));
        assert!(app.grid().is_alive(1, 0));
    }

    #[test]
    fn paint_release_outside_canvas_applies_pending_cells() {
        let mut app = App::new(Grid::new(5, 5).unwrap(), 5.0, EditMode::MultiPaint, 0.0);
        let t0 = Instant::now();

        app.on_pointer(PointerKind::Down, Some((3, 3)), t0);
        app.on_pointer(PointerKind::Up, None, t0);
        assert!(app.grid().is_alive(3, 3));
        assert!(!app.edit.is_painting());
    }

    #[test]
    fn reset_clears_grid_and_generation() {
        let mut app = blank_app();
        let t0 = Instant::now();

        app.on_pointer(PointerKind::Down, Some((1, 1)), t0);
        app.request_step();
        app.reset();

        assert_eq!(app.population(), 0);
        assert_eq!(app.generation, 0);
    }

    #[test]
    fn randomize_uses_the_default_density_when_unconfigured() {
        let mut app = blank_app();
        app.randomize();
        assert!(app.population() <= 25);
        assert_eq!(app.generation, 0);
    }

    #[test]
    fn blinker_steps_through_the_clock() {
        let grid = Grid::new(5, 5)
            .unwrap()
            .with_cells(&[(2, 1), (2, 2), (2, 3)], true);
        let mut app = App::new(grid, 5.0, EditMode::SingleToggle, 0.0);

        app.request_step();
        assert!(app.grid().is_alive(1, 2));
        assert!(app.grid().is_alive(2, 2));
        assert!(app.grid().is_alive(3, 2));
        assert_eq!(app.population(), 3);

        app.request_step();
        assert!(app.grid().is_alive(2, 1));
        assert!(app.grid().is_alive(2, 2));
        assert!(app.grid().is_alive(2, 3));
    }
}
