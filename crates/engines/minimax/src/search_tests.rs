use super::*;
use tilechess_core::{Engine, Square};

use crate::MinimaxEngine;

/// Plain minimax without pruning, same move order and tie-break.
fn exhaustive(
    board: &mut Board,
    depth: u8,
    maximizing: bool,
    perspective: Color,
    nodes: &mut u64,
) -> (Option<Move>, i32) {
    *nodes += 1;
    let moves = flatten(&board.get_possible_moves(board.active_color()));
    if depth == 0 || moves.is_empty() {
        return (None, evaluate(board, perspective));
    }

    let mut best_move = moves[0];
    let mut best = if maximizing { i32::MIN } else { i32::MAX };
    for mv in moves {
        board.make_move(mv);
        board.next_turn();
        let (_, score) = exhaustive(board, depth - 1, !maximizing, perspective, nodes);
        board.unmake_move();
        let better = if maximizing { score > best } else { score < best };
        if better {
            best = score;
            best_move = mv;
        }
    }
    (Some(best_move), best)
}

fn after(moves: &[&str]) -> Board {
    let mut board = Board::standard();
    for text in moves {
        let mv = Move::parse(text).expect("valid notation");
        assert!(board.player_move(mv), "{text}");
    }
    board
}

fn mv(text: &str) -> Move {
    Move::parse(text).expect("valid notation")
}

#[test]
fn test_pruning_matches_exhaustive_minimax() {
    let boards = [
        Board::standard(),
        after(&["e2e4", "d7d5"]),
        after(&["g1f3", "b8c6", "f3e5"]),
        Board::from_fen("r3k3/8/8/3q4/8/2N5/3R4/4K3 w").expect("valid FEN"),
    ];

    for original in boards {
        let side = original.active_color();
        let mut board = original.clone();
        let mut full_nodes = 0;
        let expected = exhaustive(&mut board, 3, true, side, &mut full_nodes);

        let mut pruned_nodes = 0;
        let got = minimax(&mut board, 3, i32::MIN, i32::MAX, true, side, &mut pruned_nodes);
        assert_eq!(got, expected);
        assert!(pruned_nodes <= full_nodes);
        assert_eq!(board, original);
    }
}

#[test]
fn test_pruning_saves_work_from_the_start() {
    let mut board = Board::standard();
    let mut full_nodes = 0;
    exhaustive(&mut board, 3, true, Color::White, &mut full_nodes);
    let mut pruned_nodes = 0;
    pick_best_move(&board, 3, &mut pruned_nodes);
    assert!(pruned_nodes < full_nodes, "{pruned_nodes} vs {full_nodes}");
}

#[test]
fn test_depth_zero_is_a_leaf() {
    let mut board = after(&["e2e4"]);
    let (best, score) = search(&mut board, 0, i32::MIN, i32::MAX, true, Color::White);
    assert_eq!(best, None);
    assert_eq!(score, evaluate(&board, Color::White));
}

#[test]
fn test_no_legal_moves_is_a_leaf() {
    let mut board = Board::from_fen("7k/5K2/6Q1/8/8/8/8/8 b").expect("valid FEN");
    let (best, score) = search(&mut board, 3, i32::MIN, i32::MAX, true, Color::Black);
    assert_eq!(best, None);
    assert_eq!(score, evaluate(&board, Color::Black));
}

#[test]
fn test_takes_hanging_queen() {
    let mut board = Board::from_fen("4k3/8/8/3q4/8/8/3R4/4K3 w").expect("valid FEN");
    let (best, score) = search(&mut board, 1, i32::MIN, i32::MAX, true, Color::White);
    assert_eq!(best, Some(mv("d2d5")));
    assert!(score > 0);
}

#[test]
fn test_black_takes_hanging_queen() {
    let mut board = Board::from_fen("4k3/3r4/8/8/3Q4/8/8/4K3 b").expect("valid FEN");
    let (best, _) = search(&mut board, 2, i32::MIN, i32::MAX, true, Color::Black);
    assert_eq!(best, Some(mv("d7d4")));
}

#[test]
fn test_minimizing_root_picks_worst_for_perspective() {
    // White to move, scored from Black's side: White still grabs the queen.
    let mut board = Board::from_fen("4k3/8/8/3q4/8/8/3R4/4K3 w").expect("valid FEN");
    let (best, score) = search(&mut board, 1, i32::MIN, i32::MAX, false, Color::Black);
    assert_eq!(best, Some(mv("d2d5")));
    assert!(score < 0);
}

#[test]
fn test_first_candidate_wins_ties() {
    // Every king step from the corner scores the same.
    let mut board = Board::from_fen("7k/8/8/8/8/8/8/K7 w").expect("valid FEN");
    let (best, score) = search(&mut board, 1, i32::MIN, i32::MAX, true, Color::White);
    assert_eq!(best, Some(Move::new(Square::new(0, 7), Square::new(1, 7))));
    assert_eq!(score, 0);
}

#[test]
fn test_engine_reports_stats() {
    let board = Board::standard();
    let mut engine = MinimaxEngine::new(2);
    let result = engine.search(&board);
    assert!(result.best_move.is_some());
    assert_eq!(result.depth, 2);
    assert!(result.nodes > 20);
    assert_eq!(board, Board::standard());
}
