use tilechess_core::{Board, Color, GameOutcome, Move};

fn play(board: &mut Board, moves: &[&str]) {
    for text in moves {
        let mv = Move::parse(text).expect("valid notation");
        assert!(board.player_move(mv), "{text} should be legal");
    }
}

#[test]
fn fools_mate() {
    let mut board = Board::standard();
    play(&mut board, &["f2f3", "e7e5", "g2g4", "d8h4"]);
    assert_eq!(
        board.outcome(),
        GameOutcome::Checkmate {
            winner: Color::Black
        }
    );
    assert!(board.in_check(Color::White));
    assert!(board.get_possible_moves(Color::White).is_empty());
}

#[test]
fn back_rank_mate() {
    let mut board = Board::from_fen("6k1/5ppp/8/8/8/8/8/R5K1 w").expect("valid FEN");
    play(&mut board, &["a1a8"]);
    assert_eq!(
        board.outcome(),
        GameOutcome::Checkmate {
            winner: Color::White
        }
    );
}

#[test]
fn queen_stalemate() {
    let mut board = Board::from_fen("7k/5K2/8/6Q1/8/8/8/8 w").expect("valid FEN");
    play(&mut board, &["g5g6"]);
    assert_eq!(board.outcome(), GameOutcome::Stalemate);
    assert!(!board.in_check(Color::Black));
}

#[test]
fn stalemate_detected_directly() {
    let mut board = Board::from_fen("7k/5K2/6Q1/8/8/8/8/8 b").expect("valid FEN");
    assert_eq!(board.checkmate_or_stalemate(Color::Black), GameOutcome::Stalemate);
}

#[test]
fn no_moves_after_game_over() {
    let mut board = Board::standard();
    play(&mut board, &["f2f3", "e7e5", "g2g4", "d8h4"]);
    let snapshot = board.clone();

    assert!(!board.player_move(Move::parse("a2a3").expect("valid notation")));
    assert!(board.get_possible_moves(Color::Black).is_empty());
    assert_eq!(board, snapshot);

    // Terminal outcomes stick.
    assert_eq!(
        board.checkmate_or_stalemate(Color::Black),
        GameOutcome::Checkmate {
            winner: Color::Black
        }
    );
}

#[test]
fn game_in_progress_after_check() {
    let mut board = Board::standard();
    play(&mut board, &["e2e4", "f7f6", "d1h5"]);
    assert!(board.in_check(Color::Black));
    assert_eq!(board.outcome(), GameOutcome::InProgress);
    assert!(!board.get_possible_moves(Color::Black).is_empty());
}

#[test]
fn unmaking_the_mating_move_reopens_the_game() {
    let mut board = Board::standard();
    play(&mut board, &["f2f3", "e7e5", "g2g4"]);
    let before_mate = board.clone();

    play(&mut board, &["d8h4"]);
    assert!(board.outcome().is_over());

    board.unmake_move();
    assert_eq!(board.outcome(), GameOutcome::InProgress);
    assert_eq!(board, before_mate);
    assert!(board.player_move(Move::parse("d8h4").expect("valid notation")));
}
