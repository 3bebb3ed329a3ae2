use std::hint::black_box;
use std::time::Duration;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use chessge::game_state::board_state::BoardState;
use chessge::move_generation::perft::perft_legal;
use chessge::utils::notation::parse_move;
use chessge::utils::san::legal_moves_san;
use chessge::ChessGame;

struct PerftCase {
    name: &'static str,
    fen: &'static str,
    expected_nodes: &'static [u64],
}

const CASES: &[PerftCase] = &[
    PerftCase {
        name: "start",
        fen: "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
        expected_nodes: &[20, 400, 8902],
    },
    PerftCase {
        name: "kiwipete",
        fen: "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
        expected_nodes: &[48, 2039],
    },
    PerftCase {
        name: "endgame",
        fen: "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1",
        expected_nodes: &[14, 191, 2812],
    },
];

const OPENING: &[&str] = &["e4", "c5", "Nf3", "d6", "d4", "cxd4", "Nxd4", "Nf6", "Nc3", "a6"];

fn bench_perft(c: &mut Criterion) {
    let mut group = c.benchmark_group("perft");
    group.warm_up_time(Duration::from_secs(1));
    group.measurement_time(Duration::from_secs(4));
    group.sample_size(20);

    for case in CASES {
        let board = BoardState::from_fen(case.fen).expect("benchmark FEN should parse");

        for (depth_idx, expected_nodes) in case.expected_nodes.iter().enumerate() {
            let depth = (depth_idx + 1) as u8;

            // Correctness guard before benchmarking.
            let warmup = perft_legal(&board, depth);
            assert_eq!(
                warmup.nodes as u64, *expected_nodes,
                "node mismatch for {} depth {}",
                case.name, depth
            );

            group.throughput(Throughput::Elements(*expected_nodes));
            group.bench_with_input(
                BenchmarkId::from_parameter(format!("{}_d{}", case.name, depth)),
                &board,
                |b, board| b.iter(|| black_box(perft_legal(black_box(board), depth).nodes)),
            );
        }
    }

    group.finish();
}

fn bench_notation(c: &mut Criterion) {
    let board = BoardState::from_fen(CASES[1].fen).expect("benchmark FEN should parse");

    c.bench_function("legal_moves_san_kiwipete", |b| {
        b.iter(|| black_box(legal_moves_san(black_box(&board))))
    });

    c.bench_function("parse_move_san_kiwipete", |b| {
        b.iter(|| black_box(parse_move(black_box("Bxa6"), &board)))
    });

    c.bench_function("submit_sicilian_opening", |b| {
        b.iter(|| {
            let mut game = ChessGame::new();
            for text in OPENING {
                game.submit(text).expect("opening move should be legal");
            }
            black_box(game.status())
        })
    });
}

criterion_group!(benches, bench_perft, bench_notation);
criterion_main!(benches);
