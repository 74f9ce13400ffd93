// SPDX-License-Identifier: MIT OR Apache-2.0

use blockdoku_cli::autoplay::{choose_placement, play_game, AutoplayOptions};
use blockdoku_core::logging::{MemoryLogger, SessionTag, StructuredLogger};
use blockdoku_core::{BlockShape, Board, Difficulty, EngineConfig, GameSession};
use std::io;
use std::sync::{Arc, Mutex};
use tracing_subscriber::fmt::MakeWriter;

/// Collects formatted log lines in memory
#[derive(Clone, Default)]
struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

impl CapturedLogs {
    fn text(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl io::Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for CapturedLogs {
    type Writer = CapturedLogs;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

fn options(seed: u64) -> AutoplayOptions {
    AutoplayOptions {
        seed,
        difficulty: Difficulty::Normal,
        max_rounds: 200,
    }
}

#[test]
fn same_seed_plays_the_same_game() {
    let config = EngineConfig::default();
    let tag = SessionTag::new();

    let a = play_game(&config, &options(42), &tag, None);
    let b = play_game(&config, &options(42), &tag, None);

    assert_eq!(a.score, b.score);
    assert_eq!(a.rounds, b.rounds);
    assert_eq!(a.stats, b.stats);
    assert_eq!(a.final_board, b.final_board);
}

#[test]
fn every_placement_is_logged() {
    let config = EngineConfig::default();
    let logger = MemoryLogger::new();
    let tag = SessionTag::new().with_label("test");

    let summary = play_game(&config, &options(7), &tag, Some(&logger as &dyn StructuredLogger));

    let entries = logger.entries();
    assert_eq!(entries.len() as u32, summary.stats.placements);
    assert!(summary.stats.placements > 0);
    assert!(summary.score >= u64::from(summary.stats.cells_placed) * 2);
    assert!(entries.iter().all(|e| e.session == tag));
}

#[test]
fn summary_board_parses_back() {
    let summary = play_game(&EngineConfig::default(), &options(3), &SessionTag::new(), None);
    let rows: Vec<&str> = summary.final_board.lines().collect();
    let board = Board::from_rows(&rows).unwrap();
    assert!(board.filled_count() < 81);
}

#[test]
fn round_limit_is_respected() {
    let summary = play_game(
        &EngineConfig::default(),
        &AutoplayOptions {
            seed: 1,
            difficulty: Difficulty::Easy,
            max_rounds: 2,
        },
        &SessionTag::new(),
        None,
    );
    assert!(summary.rounds <= 2);
    assert!(summary.stats.placements <= 6);
}

#[test]
fn choosing_a_move_logs_nothing() {
    let single = BlockShape::from_rows("single", &["#"]);
    let mut session = GameSession::new();
    for row in [0, 3] {
        for col in 0..8 {
            session.attempt_placement(&single, row, col, Difficulty::Normal);
        }
    }
    session.attempt_placement(&single, 0, 8, Difficulty::Normal);

    let logs = CapturedLogs::default();
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .with_ansi(false)
        .with_writer(logs.clone())
        .finish();

    tracing::subscriber::with_default(subscriber, || {
        let choice = choose_placement(&session, &[single.clone()], Difficulty::Normal).unwrap();
        assert_eq!((choice.row, choice.col), (3, 8));
        assert!(logs.text().is_empty(), "unexpected output: {}", logs.text());
        assert_eq!(session.chain_stats().max_multiplier, 1);

        session.attempt_placement(&single, choice.row, choice.col, Difficulty::Normal);
    });

    assert!(logs.text().contains("New best chain multiplier: 2x"));
}
