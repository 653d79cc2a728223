//! Event loop driving a [`Controller`] from UI input.

use std::collections::VecDeque;

use tokio::sync::mpsc;
use tracing::{debug, info};
use xiangqi_core::VisualCell;

use crate::api::GameServer;
use crate::controller::Controller;
use crate::notice::Notice;
use crate::render::BoardView;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiEvent {
    /// A click on a rendered cell, in visual coordinates.
    Click { row: u8, col: u8 },
    NewGame,
    Resync,
    Quit,
}

/// Where the loop publishes what the user should see.
pub trait ViewSink {
    fn show(&mut self, view: &BoardView, notices: &[Notice]);
}

/// Process events one at a time until `Quit` or the sender is dropped.
///
/// Clicks that pile up while a move is with the server are discarded once it
/// returns; they were aimed at a board that no longer exists. Other queued
/// events are kept and handled in order.
pub async fn run<S, V>(controller: &mut Controller<S>, rx: &mut mpsc::Receiver<UiEvent>, sink: &mut V)
where
    S: GameServer,
    V: ViewSink,
{
    let mut backlog: VecDeque<UiEvent> = VecDeque::new();

    loop {
        let event = match backlog.pop_front() {
            Some(event) => event,
            None => match rx.recv().await {
                Some(event) => event,
                None => break,
            },
        };

        match event {
            UiEvent::Quit => {
                info!("Quit requested");
                break;
            }
            UiEvent::NewGame => {
                let _ = controller.start_new_game().await;
            }
            UiEvent::Resync => {
                let _ = controller.resync().await;
            }
            UiEvent::Click { row, col } => {
                let Some(cell) = VisualCell::new(row, col) else {
                    debug!(row, col, "Click outside the board");
                    continue;
                };
                let outcome = controller.click(cell).await;
                if outcome.submitted() {
                    let dropped = drain_clicks(rx, &mut backlog);
                    if dropped > 0 {
                        debug!(dropped, "Dropped clicks queued during submission");
                    }
                }
            }
        }

        let notices = controller.take_notices();
        sink.show(&controller.view(), &notices);
    }
}

/// Pull everything already queued; drop clicks, keep the rest in `backlog`.
fn drain_clicks(rx: &mut mpsc::Receiver<UiEvent>, backlog: &mut VecDeque<UiEvent>) -> usize {
    let mut dropped = 0;
    while let Ok(event) = rx.try_recv() {
        match event {
            UiEvent::Click { .. } => dropped += 1,
            other => backlog.push_back(other),
        }
    }
    dropped
}
