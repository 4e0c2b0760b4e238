use std::sync::mpsc;

use super::*;
use crate::MinimaxEngine;

/// Blocks until the test lets it go, then reports a fixed result.
struct Gated(mpsc::Receiver<()>);

impl Engine for Gated {
    fn search(&mut self, _board: &Board) -> SearchResult {
        let _ = self.0.recv();
        SearchResult {
            best_move: None,
            score: 7,
            depth: 0,
            nodes: 1,
        }
    }

    fn name(&self) -> &str {
        "Gated"
    }
}

struct Exploding;

impl Engine for Exploding {
    fn search(&mut self, _board: &Board) -> SearchResult {
        panic!("engine blew up");
    }

    fn name(&self) -> &str {
        "Exploding"
    }
}

async fn until_completed(worker: &SearchWorker) {
    while !matches!(worker.state(), SearchState::Completed(_)) {
        tokio::task::yield_now().await;
    }
}

#[tokio::test]
async fn test_wait_returns_engine_result() {
    let board = Board::standard();
    let worker = SearchWorker::new();
    assert!(worker.start(&board, MinimaxEngine::new(1)));

    let result = worker.wait().await.expect("search completes");
    assert_eq!(result, MinimaxEngine::new(1).search(&board));
    assert_eq!(worker.state(), SearchState::Idle);
}

#[tokio::test]
async fn test_wait_when_idle() {
    let worker = SearchWorker::new();
    assert_eq!(worker.wait().await, None);
    assert_eq!(worker.try_take(), None);
}

#[tokio::test]
async fn test_one_search_at_a_time() {
    let board = Board::standard();
    let worker = SearchWorker::new();
    let (tx, rx) = mpsc::channel();

    assert!(worker.start(&board, Gated(rx)));
    assert!(worker.is_busy());
    assert!(!worker.start(&board, MinimaxEngine::new(1)));
    assert_eq!(worker.try_take(), None);
    assert_eq!(worker.state(), SearchState::Searching);

    tx.send(()).expect("engine is listening");
    let result = worker.wait().await.expect("search completes");
    assert_eq!(result.score, 7);
    assert!(!worker.is_busy());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_result_waits_in_slot() {
    let board = Board::standard();
    let worker = SearchWorker::new();
    let (tx, rx) = mpsc::channel();
    tx.send(()).expect("engine is listening");

    assert!(worker.start(&board, Gated(rx)));
    until_completed(&worker).await;

    // An uncollected result blocks new searches.
    assert!(!worker.start(&board, MinimaxEngine::new(1)));
    let result = worker.try_take().expect("result in slot");
    assert_eq!(result.nodes, 1);
    assert_eq!(worker.try_take(), None);
    assert!(worker.start(&board, MinimaxEngine::new(1)));
    assert!(worker.wait().await.is_some());
}

#[tokio::test]
async fn test_clones_share_the_slot() {
    let board = Board::standard();
    let worker = SearchWorker::new();
    let other = worker.clone();
    assert!(worker.start(&board, MinimaxEngine::new(1)));
    assert!(other.wait().await.is_some());
    assert_eq!(worker.state(), SearchState::Idle);
}

#[tokio::test]
async fn test_panicking_search_resets_to_idle() {
    let board = Board::standard();
    let worker = SearchWorker::new();
    assert!(worker.start(&board, Exploding));
    assert_eq!(worker.wait().await, None);
    assert_eq!(worker.state(), SearchState::Idle);
    assert!(worker.start(&board, MinimaxEngine::new(1)));
    assert!(worker.wait().await.is_some());
}

#[tokio::test]
async fn test_search_uses_a_snapshot() {
    let mut board = Board::standard();
    let worker = SearchWorker::new();
    let (tx, rx) = mpsc::channel();
    assert!(worker.start(&board, Gated(rx)));

    // The live board moves on while the search is parked.
    assert!(board.player_move(tilechess_core::Move::parse("e2e4").expect("valid notation")));
    tx.send(()).expect("engine is listening");
    assert!(worker.wait().await.is_some());
    assert_eq!(board.history_len(), 1);
}

#[test]
fn test_start_without_runtime_stays_idle() {
    let board = Board::standard();
    let worker = SearchWorker::new();
    assert!(!worker.start(&board, MinimaxEngine::new(1)));
    assert_eq!(worker.state(), SearchState::Idle);

    // The same worker still accepts a search once a runtime is available.
    let runtime = tokio::runtime::Runtime::new().expect("runtime");
    let result = runtime.block_on(async {
        assert!(worker.start(&board, MinimaxEngine::new(1)));
        worker.wait().await
    });
    assert!(result.is_some());
    assert_eq!(worker.state(), SearchState::Idle);
}
