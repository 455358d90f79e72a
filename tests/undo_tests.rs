//! Undo tests - exact inverse of make_move

use std::sync::Arc;

use tenten::core::{Board, BoardError, Catalog, Move, PieceId};
use tenten::types::{Mark, BOARD_SIZE, FILLED};

fn board_with(glyphs: &str) -> Board {
    let catalog = Arc::new(Catalog::standard());
    let hand: Vec<PieceId> = glyphs.chars().map(|g| catalog.by_glyph(g).unwrap()).collect();
    let mut board = Board::new(catalog);
    board.deal(&hand).unwrap();
    board
}

fn id(board: &Board, glyph: char) -> PieceId {
    board.catalog().by_glyph(glyph).unwrap()
}

#[test]
fn test_undo_on_fresh_board_fails() {
    let mut board = board_with("a");
    assert_eq!(board.undo_move(), Err(BoardError::NothingToUndo));
}

#[test]
fn test_undo_simple_placement() {
    let mut board = board_with("r");
    let before = board.clone();
    let mv = Move::new(id(&board, 'r'), 4, 4);

    board.make_move(mv).unwrap();
    assert_eq!(board.undo_move(), Ok(mv));

    assert_eq!(board.cells(), before.cells());
    assert_eq!(board.hand(), before.hand());
    assert!(board.history().is_empty());
}

#[test]
fn test_undo_restores_hand_slot() {
    let mut board = board_with("abc");
    let hand = board.hand().to_vec();

    board.make_move(Move::new(id(&board, 'b'), 0, 0)).unwrap();
    assert_eq!(board.hand(), &[hand[0], hand[2]]);

    board.undo_move().unwrap();
    assert_eq!(board.hand(), hand.as_slice());
}

#[test]
fn test_undo_restores_cleared_row() {
    let mut board = board_with("a");
    for x in 1..BOARD_SIZE as i8 {
        board.set_cell(x, 0, FILLED);
    }
    let before = board.cells().to_vec();

    board.make_move(Move::new(id(&board, 'a'), 0, 0)).unwrap();
    board.undo_move().unwrap();

    assert_eq!(board.cells(), before.as_slice());
}

#[test]
fn test_undo_restores_intersection_once() {
    let mut board = board_with("a");
    for i in 1..BOARD_SIZE as i8 {
        board.set_cell(i, 0, FILLED);
        board.set_cell(0, i, FILLED);
    }
    let before = board.cells().to_vec();

    let cleared = board.make_move(Move::new(id(&board, 'a'), 0, 0)).unwrap();
    assert_eq!(cleared.lines(), 2);
    board.undo_move().unwrap();

    assert_eq!(board.cells(), before.as_slice());
    assert_eq!(board.cell(0, 0), Some(0));
}

#[test]
fn test_undo_restores_stacked_values() {
    let mut board = board_with("e");
    for x in 0..5 {
        board.set_cell(x, 3, 3);
    }
    for x in 5..BOARD_SIZE as i8 {
        board.set_cell(x, 3, 0);
    }
    for y in 0..BOARD_SIZE as i8 {
        if y != 3 {
            board.set_cell(7, y, 2);
        }
    }
    let before = board.cells().to_vec();

    let cleared = board.make_move(Move::new(id(&board, 'e'), 5, 3)).unwrap();
    assert_eq!(cleared.rows.as_slice(), &[3]);
    assert_eq!(cleared.cols.as_slice(), &[7]);
    assert_eq!(board.cell(0, 3), Some(2));
    assert_eq!(board.cell(7, 0), Some(1));

    board.undo_move().unwrap();
    assert_eq!(board.cells(), before.as_slice());
}

#[test]
fn test_undo_clears_marks() {
    let mut board = board_with("a");
    board.make_move(Move::new(id(&board, 'a'), 2, 2)).unwrap();
    assert_eq!(board.mark(2, 2), Some(Mark::Placed));

    board.undo_move().unwrap();
    assert_eq!(board.mark(2, 2), Some(Mark::None));
}

#[test]
fn test_undo_with_refilled_hand_is_refused() {
    let mut board = board_with("a");
    board.make_move(Move::new(id(&board, 'a'), 0, 0)).unwrap();
    board.deal(&[PieceId(1), PieceId(2), PieceId(3)]).unwrap();
    let before = board.clone();

    assert_eq!(board.undo_move(), Err(BoardError::HandFull));
    assert_eq!(board, before);
}

#[test]
fn test_undo_forced_move_leaves_hand_alone() {
    let mut board = board_with("b");
    let a = id(&board, 'a');
    board.force_move(Move::new(a, 5, 5)).unwrap();

    assert_eq!(board.undo_move(), Ok(Move::new(a, 5, 5)));
    assert_eq!(board.cell(5, 5), Some(0));
    assert_eq!(board.hand(), &[id(&board, 'b')]);
}

#[test]
fn test_undo_chain_walks_back_to_start() {
    let mut board = board_with("abc");
    let start = board.clone();

    let moves: Vec<Move> = ['a', 'b', 'c']
        .iter()
        .zip([(0, 0), (3, 3), (6, 6)])
        .map(|(&g, (x, y))| Move::new(id(&board, g), x, y))
        .collect();
    for &mv in &moves {
        board.make_move(mv).unwrap();
    }

    for &mv in moves.iter().rev() {
        assert_eq!(board.undo_move(), Ok(mv));
    }
    assert_eq!(board.cells(), start.cells());
    assert_eq!(board.hand(), start.hand());
    assert_eq!(board.move_str(), "");
}
