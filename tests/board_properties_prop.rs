//! Property tests for move tokens, board strings and undo

use std::sync::Arc;

use proptest::prelude::*;

use tenten::core::{Board, Catalog, Dealer, Move, MoveSource, PieceId, RandomDealer};
use tenten::engine::RandomValid;
use tenten::types::CELL_COUNT;

fn catalog() -> Arc<Catalog> {
    Arc::new(Catalog::standard())
}

fn snapshot(board: &Board) -> (Vec<i32>, Vec<PieceId>, usize, String) {
    (
        board.cells().to_vec(),
        board.hand().to_vec(),
        board.history().len(),
        board.move_str(),
    )
}

proptest! {
    #[test]
    fn move_token_round_trips(piece in 0u8..19, x in 0i8..10, y in 0i8..10) {
        let catalog = Catalog::standard();
        let mv = Move::new(PieceId(piece), x, y);
        let token = mv.encode(&catalog).unwrap();
        prop_assert_eq!(Move::from_token(token, &catalog).unwrap(), mv);
        prop_assert_eq!(Move::decode(&token.to_string(), &catalog).unwrap(), mv);
    }

    #[test]
    fn board_string_round_trips(
        cells in prop::collection::vec(0i32..10, CELL_COUNT),
        hand in prop::collection::vec(0u8..19, 0..=3),
    ) {
        let mut board = Board::new(catalog());
        for (i, &v) in cells.iter().enumerate() {
            board.set_cell((i % 10) as i8, (i / 10) as i8, v);
        }
        let hand: Vec<PieceId> = hand.into_iter().map(PieceId).collect();
        board.deal(&hand).unwrap();

        let s = board.export_as_str().unwrap();
        let back = Board::import_as_str(catalog(), &s).unwrap();

        prop_assert_eq!(back.cells(), board.cells());
        prop_assert_eq!(back.hand(), board.hand());
        prop_assert_eq!(back.export_as_str().unwrap(), s);
    }

    #[test]
    fn full_line_scans_match_cells(cells in prop::collection::vec(0i32..3, CELL_COUNT)) {
        let mut board = Board::new(catalog());
        for (i, &v) in cells.iter().enumerate() {
            board.set_cell((i % 10) as i8, (i / 10) as i8, v);
        }

        let rows = board.get_full_rows();
        for y in 0..10u8 {
            let full = (0..10).all(|x| board.cell(x, y as i8) != Some(0));
            prop_assert_eq!(rows.contains(&y), full);
        }
        let cols = board.get_full_cols();
        for x in 0..10u8 {
            let full = (0..10).all(|y| board.cell(x as i8, y) != Some(0));
            prop_assert_eq!(cols.contains(&x), full);
        }
        prop_assert_eq!(board.get_full_rows(), rows);
    }

    #[test]
    fn undo_is_exact_inverse_during_play(seed in any::<u32>(), steps in 1usize..60) {
        let mut board = Board::new(catalog());
        let mut dealer = RandomDealer::new(seed);
        let mut source = RandomValid::new(seed ^ 0x5bd1_e995);

        for _ in 0..steps {
            if board.hand().is_empty() {
                let hand = dealer.deal(board.catalog());
                board.deal(&hand).unwrap();
            }
            if !board.has_valid_moves() {
                break;
            }

            let mv = source.get_move(&board);
            prop_assert!(board.is_valid_move(&mv));

            let before = snapshot(&board);
            board.make_move(mv).unwrap();
            prop_assert_eq!(board.undo_move().unwrap(), mv);
            prop_assert_eq!(snapshot(&board), before);

            board.make_move(mv).unwrap();
        }
    }
}
