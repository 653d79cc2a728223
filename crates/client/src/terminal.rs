//! Line-based terminal front-end.

use std::io::Write;

use crate::notice::Notice;
use crate::render::BoardView;
use crate::runtime::{UiEvent, ViewSink};

pub const HELP: &str = "Commands: <row> <col> to click a cell, `new`, `sync`, `quit`";

/// Parse one input line. `None` for anything unrecognised.
pub fn parse_command(line: &str) -> Option<UiEvent> {
    let line = line.trim();
    match line.to_ascii_lowercase().as_str() {
        "new" | "n" => return Some(UiEvent::NewGame),
        "sync" | "s" => return Some(UiEvent::Resync),
        "quit" | "q" | "exit" => return Some(UiEvent::Quit),
        _ => {}
    }

    let mut parts = line.split(|c: char| c.is_whitespace() || c == ',').filter(|p| !p.is_empty());
    let row = parts.next()?.parse().ok()?;
    let col = parts.next()?.parse().ok()?;
    if parts.next().is_some() {
        return None;
    }
    Some(UiEvent::Click { row, col })
}

/// Writes each frame to stdout.
pub struct TerminalSink<W> {
    out: W,
}

impl<W: Write> TerminalSink<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }
}

impl<W: Write> ViewSink for TerminalSink<W> {
    fn show(&mut self, view: &BoardView, notices: &[Notice]) {
        let mut frame = format!("\n{view}\n");
        for notice in notices {
            frame.push_str(&format!("*** {notice}\n"));
        }
        if let Err(e) = self.out.write_all(frame.as_bytes()).and_then(|_| self.out.flush()) {
            tracing::warn!("Failed to write board: {e}");
        }
    }
}
