use criterion::{black_box, criterion_group, criterion_main, Criterion};
use blockfall::core::{Cell, EngineConfig, Piece, PieceFactory, Playfield, Session};
use blockfall::types::{Color, Command, SessionState, ShapeKind};

fn running() -> Session {
    let mut session = Session::new(EngineConfig::default(), 12345).unwrap();
    session.go_to(SessionState::Running);
    session
}

fn bench_tick(c: &mut Criterion) {
    let mut session = running();

    c.bench_function("session_tick_16ms", |b| {
        b.iter(|| {
            if !session.tick(black_box(16)) && !session.is_live() {
                session.go_to(SessionState::Running);
            }
        })
    });
}

fn bench_resolve_lines(c: &mut Criterion) {
    c.bench_function("resolve_4_lines", |b| {
        b.iter(|| {
            let mut field = Playfield::new(10, 16).unwrap();
            for row in 12..16 {
                field.lock_cells((0..10).map(|col| Cell::locked(col, row, Color::Blue)));
            }
            black_box(field.resolve_lines());
        })
    });
}

fn bench_spawn(c: &mut Criterion) {
    let grid = Playfield::new(4, 4).unwrap();
    let mut factory = PieceFactory::seeded(12345);

    c.bench_function("factory_spawn", |b| {
        b.iter(|| black_box(factory.spawn(&grid, None)))
    });
}

fn bench_rotate(c: &mut Criterion) {
    let mut field = Playfield::new(10, 16).unwrap();
    field.lock_cells([Cell::locked(0, 6, Color::Gray)]);
    let mut piece = Piece::spawn(ShapeKind::I, Color::Cyan, &field);
    for _ in 0..5 {
        piece.move_down(&field);
    }

    c.bench_function("rotate_with_kick", |b| {
        b.iter(|| {
            let mut p = piece;
            black_box(p.rotate(&field))
        })
    });
}

fn bench_hard_drop(c: &mut Criterion) {
    let mut session = running();

    c.bench_function("hard_drop", |b| {
        b.iter(|| {
            if !session.apply(Command::HardDrop) {
                session.go_to(SessionState::Running);
            }
        })
    });
}

criterion_group!(
    benches,
    bench_tick,
    bench_resolve_lines,
    bench_spawn,
    bench_rotate,
    bench_hard_drop
);
criterion_main!(benches);
