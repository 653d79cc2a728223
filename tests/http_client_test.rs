//! Tests for the HTTP game server client against the stand-in server.

mod common;

use client::api::{GameServer, HttpGameServer};
use client::config::ClientConfig;
use client::error::ClientError;
use client::notice::Notice;
use client::render::BoardView;
use client::runtime::{self, UiEvent, ViewSink};
use tokio::sync::mpsc;
use xiangqi_core::{GameState, Move, Side};

fn http(base_url: &str) -> HttpGameServer {
    let config = ClientConfig {
        api_url: base_url.to_string(),
        ..ClientConfig::default()
    };
    HttpGameServer::new(&config).unwrap()
}

#[tokio::test]
async fn health_check() {
    let (_mock, base_url) = common::spawn().await;
    http(&base_url).health().await.unwrap();
}

#[tokio::test]
async fn new_game_and_fetch_agree() {
    let (_mock, base_url) = common::spawn().await;
    let server = http(&base_url);

    let err = server.fetch_state().await.unwrap_err();
    assert!(matches!(err, ClientError::Rejected { ref detail } if detail == "No game in progress"));

    let started = server.new_game().await.unwrap();
    let fetched = server.fetch_state().await.unwrap();
    assert_eq!(started, fetched);
}

#[tokio::test]
async fn move_body_uses_wire_names() {
    let (mock, base_url) = common::spawn().await;
    let server = http(&base_url);
    server.new_game().await.unwrap();

    let state = server
        .submit_move(Move { piece_id: 0, to_x: 4, to_y: 1 })
        .await
        .unwrap();
    assert_eq!(state.current_turn, Side::Black);
    assert_eq!(mock.moves(), vec![Move { piece_id: 0, to_x: 4, to_y: 1 }]);

    let err = server
        .submit_move(Move { piece_id: 99, to_x: 0, to_y: 0 })
        .await
        .unwrap_err();
    assert!(err.is_rejection());
    assert_eq!(err.to_string(), "Invalid move");
}

#[derive(Default)]
struct Frames(Vec<(BoardView, Vec<Notice>)>);

impl ViewSink for Frames {
    fn show(&mut self, view: &BoardView, notices: &[Notice]) {
        self.0.push((view.clone(), notices.to_vec()));
    }
}

/// Drive a whole session through the event loop: new game, select, move, quit.
#[tokio::test]
async fn event_loop_round_trip() {
    let (mock, base_url) = common::spawn().await;
    let mut controller = common::controller(&base_url);
    let (tx, mut rx) = mpsc::channel(8);

    let from = common::cell(4, 0);
    let to = common::cell(4, 1);
    for event in [
        UiEvent::NewGame,
        UiEvent::Click { row: from.row, col: from.col },
        UiEvent::Click { row: to.row, col: to.col },
        UiEvent::Quit,
    ] {
        tx.send(event).await.unwrap();
    }

    let mut frames = Frames::default();
    runtime::run(&mut controller, &mut rx, &mut frames).await;

    assert_eq!(mock.moves().len(), 1);
    assert_eq!(frames.0.len(), 3);
    let (last, notices) = frames.0.last().unwrap();
    assert!(notices.is_empty());
    assert!(last.cell(to).unwrap().piece.is_some());
    assert!(last.cell(from).unwrap().piece.is_none());
    assert_ne!(*controller.state().unwrap(), GameState::standard());
}
