use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::time::{Duration, Instant};

/// Paint bursts are coalesced into windows of this length before they reach
/// the grid.
pub const COALESCE_WINDOW: Duration = Duration::from_millis(10);

/// How pointer interactions edit cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum EditMode {
    /// A discrete press flips one cell; pressing again flips it back.
    #[default]
    SingleToggle,
    /// Dragging forces every visited cell alive.
    MultiPaint,
}

impl EditMode {
    pub fn name(&self) -> &str {
        match self {
            EditMode::SingleToggle => "Toggle",
            EditMode::MultiPaint => "Paint",
        }
    }

    pub fn next(&self) -> Self {
        match self {
            EditMode::SingleToggle => EditMode::MultiPaint,
            EditMode::MultiPaint => EditMode::SingleToggle,
        }
    }
}

/// Raw pointer event kinds forwarded by the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerKind {
    /// Button pressed on a cell.
    Down,
    /// Pointer moved onto a cell while the button is held.
    Enter,
    /// Button released.
    Up,
}

/// A single cell mutation produced by the session; the caller applies it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellEdit {
    Toggle { column: usize, row: usize },
    Paint { column: usize, row: usize },
}

/// Interactive cell-editing protocol.
///
/// Toggle mode emits one edit per press. Paint mode runs a drag state machine
/// (idle -> painting -> idle) and buffers painted cells through a coalescing
/// window, so high-frequency pointer traffic does not become one grid update
/// per event. Ending the drag flushes whatever is pending; the tail of a
/// burst is never dropped.
pub struct EditSession {
    mode: EditMode,
    dragging: bool,
    /// Cells already painted during the current drag. Re-entering one is a
    /// no-op for the rest of the drag.
    visited: HashSet<(usize, usize)>,
    pending: Vec<(usize, usize)>,
    window_deadline: Option<Instant>,
}

impl EditSession {
    pub fn new(mode: EditMode) -> Self {
        Self {
            mode,
            dragging: false,
            visited: HashSet::new(),
            pending: Vec::new(),
            window_deadline: None,
        }
    }

    pub fn mode(&self) -> EditMode {
        self.mode
    }

    /// Whether a drag gesture is currently active.
    pub fn is_painting(&self) -> bool {
        self.dragging
    }

    /// Mode switches are only honored between drags. Returns whether the
    /// switch took effect.
    pub fn set_mode(&mut self, mode: EditMode) -> bool {
        if self.dragging {
            return false;
        }
        self.mode = mode;
        true
    }

    /// Feed one pointer event. Any edits ready to apply right now are
    /// returned; paint-mode edits may instead be buffered until the
    /// coalescing window expires (see `flush_due`).
    pub fn on_pointer(
        &mut self,
        kind: PointerKind,
        column: usize,
        row: usize,
        now: Instant,
    ) -> Vec<CellEdit> {
        match self.mode {
            EditMode::SingleToggle => match kind {
                PointerKind::Down => vec![CellEdit::Toggle { column, row }],
                PointerKind::Enter | PointerKind::Up => Vec::new(),
            },
            EditMode::MultiPaint => match kind {
                PointerKind::Down => {
                    self.dragging = true;
                    self.visited.clear();
                    self.buffer(column, row, now);
                    Vec::new()
                }
                PointerKind::Enter => {
                    if self.dragging {
                        self.buffer(column, row, now);
                    }
                    Vec::new()
                }
                PointerKind::Up => {
                    if !self.dragging {
                        return Vec::new();
                    }
                    self.buffer(column, row, now);
                    self.end_drag()
                }
            },
        }
    }

    /// End the active drag without a cell position (pointer released outside
    /// the canvas). Flushes anything still pending.
    pub fn release(&mut self) -> Vec<CellEdit> {
        if !self.dragging {
            return Vec::new();
        }
        self.end_drag()
    }

    /// Drain the paint buffer once the coalescing window has elapsed. Called
    /// from the event loop tick.
    pub fn flush_due(&mut self, now: Instant) -> Vec<CellEdit> {
        match self.window_deadline {
            Some(deadline) if now >= deadline => self.flush(),
            _ => Vec::new(),
        }
    }

    fn end_drag(&mut self) -> Vec<CellEdit> {
        self.dragging = false;
        self.visited.clear();
        self.flush()
    }

    fn buffer(&mut self, column: usize, row: usize, now: Instant) {
        if !self.visited.insert((column, row)) {
            return;
        }
        if self.window_deadline.is_none() {
            self.window_deadline = Some(now + COALESCE_WINDOW);
        }
        self.pending.push((column, row));
    }

    fn flush(&mut self) -> Vec<CellEdit> {
        self.window_deadline = None;
        self.pending
            .drain(..)
            .map(|(column, row)| CellEdit::Paint { column, row })
            .collect()
    }
}
