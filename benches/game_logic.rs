use std::sync::Arc;

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use tenten::core::{Board, Catalog, GameSession, Move, RandomDealer, SessionConfig};
use tenten::engine::RandomValid;
use tenten::types::FILLED;

fn half_full_board() -> Board {
    let catalog = Arc::new(Catalog::standard());
    let hand: Vec<_> = "eis".chars().map(|g| catalog.by_glyph(g).unwrap()).collect();
    let mut board = Board::new(catalog);
    for y in 0..10i8 {
        for x in 0..10i8 {
            if (x + 2 * y) % 3 == 0 {
                board.set_cell(x, y, FILLED);
            }
        }
    }
    board.deal(&hand).unwrap();
    board
}

fn bench_valid_moves(c: &mut Criterion) {
    let board = half_full_board();

    c.bench_function("get_valid_moves", |b| {
        b.iter(|| black_box(&board).get_valid_moves())
    });
}

fn bench_has_valid_moves(c: &mut Criterion) {
    let board = half_full_board();

    c.bench_function("has_valid_moves", |b| {
        b.iter(|| black_box(&board).has_valid_moves())
    });
}

fn bench_make_undo(c: &mut Criterion) {
    let catalog = Arc::new(Catalog::standard());
    let a = catalog.by_glyph('a').unwrap();
    let mut board = Board::new(catalog);
    for i in 1..10i8 {
        board.set_cell(i, 0, FILLED);
        board.set_cell(0, i, FILLED);
    }
    board.deal(&[a]).unwrap();
    let mv = Move::new(a, 0, 0);

    c.bench_function("make_undo_double_clear", |b| {
        b.iter(|| {
            board.make_move(black_box(mv)).unwrap();
            board.undo_move().unwrap();
        })
    });
}

fn bench_full_game(c: &mut Criterion) {
    c.bench_function("random_game_seed_42", |b| {
        b.iter(|| {
            let mut session =
                GameSession::new(Arc::new(Catalog::standard()), SessionConfig::default());
            let mut dealer = RandomDealer::new(black_box(42));
            let mut source = RandomValid::new(42);
            session.run(&mut source, &mut dealer, |_| {}).unwrap()
        })
    });
}

criterion_group!(
    benches,
    bench_valid_moves,
    bench_has_valid_moves,
    bench_make_undo,
    bench_full_game
);
criterion_main!(benches);
