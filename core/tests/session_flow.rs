use samegame_core::{Board, Cell, Phase, Session};

fn board_from_rows(tile_kinds: u8, grid: &[&[i8]]) -> Board {
    let rows = grid.len();
    let cols = grid[0].len();
    let mut cells = Vec::with_capacity(cols * rows);
    for row in grid {
        assert_eq!(row.len(), cols);
        for &value in *row {
            cells.push(if value < 0 {
                Cell::Empty
            } else {
                Cell::Tile(value as u8)
            });
        }
    }
    Board::from_cells(cols, rows, tile_kinds, cells).expect("valid test board")
}

#[test]
fn pair_removal_scores_four_and_survivors_fall() {
    let mut session = Session::with_board(board_from_rows(4, &[&[0, 0], &[1, 1]]));
    assert_eq!(session.phase(), Phase::Playing);

    let removal = session.activate(0, 0).expect("pair is removable");
    assert_eq!(removal.score_delta, 4);
    assert_eq!(removal.cleared.len(), 2);
    assert_eq!(session.score(), 4);

    let board = session.board();
    assert_eq!(board.cell(0, 0), Some(Cell::Empty));
    assert_eq!(board.cell(1, 0), Some(Cell::Empty));
    assert_eq!(board.cell(0, 1), Some(Cell::Tile(1)));
    assert_eq!(board.cell(1, 1), Some(Cell::Tile(1)));
    // The surviving pair still touches, so the session keeps going.
    assert_eq!(session.phase(), Phase::Playing);
}

#[test]
fn cluster_of_three_scores_nine() {
    let mut session = Session::with_board(board_from_rows(4, &[&[0, 0, 0], &[1, 2, 1]]));
    let removal = session.activate(0, 0).expect("cluster of three");
    assert_eq!(removal.score_delta, 9);
    assert_eq!(session.score(), 9);
    // Only singletons remain after the collapse.
    assert_eq!(session.phase(), Phase::GameOver);
}

#[test]
fn cluster_of_five_scores_twenty_five() {
    let mut session = Session::with_board(board_from_rows(
        4,
        &[&[1, 1, 1], &[2, 1, 2], &[2, 1, 2]],
    ));
    let removal = session.activate(1, 0).expect("cluster of five");
    assert_eq!(removal.score_delta, 25);
    assert_eq!(removal.cleared.len(), 5);
    assert_eq!(session.score(), 25);
    assert_eq!(session.board().tile_count(), 4);
    assert_eq!(session.phase(), Phase::Playing);
}

#[test]
fn removal_drops_exactly_cluster_size_tiles() {
    let mut session = Session::new(10, 15, 4, 0x5EED);
    let before = session.board().tile_count();
    let mut probe = None;
    'search: for y in 0..15 {
        for x in 0..10 {
            if session.board().connected_cluster(x, y).len() >= 2 {
                probe = Some((x, y));
                break 'search;
            }
        }
    }
    let (x, y) = probe.expect("a fresh 10x15x4 board with moves");
    let removal = session.activate(x, y).expect("probed cluster");
    let cleared = removal.cleared.len();
    assert_eq!(session.board().tile_count(), before - cleared);
    assert_eq!(removal.score_delta, (cleared * cleared) as u32);
}

#[test]
fn empty_cell_and_singleton_are_no_ops() {
    let mut session = Session::with_board(board_from_rows(4, &[&[-1, 0], &[1, 1]]));
    let before = session.board().clone();

    assert!(session.activate(0, 0).is_none());
    assert!(session.activate(1, 0).is_none());
    assert!(session.activate(7, 7).is_none());
    assert_eq!(session.score(), 0);
    assert_eq!(*session.board(), before);
    assert_eq!(session.phase(), Phase::Playing);
}

#[test]
fn deadlocked_fill_ends_immediately() {
    let checkerboard = board_from_rows(3, &[&[0, 1, 2], &[1, 2, 0], &[2, 0, 1]]);
    let session = Session::with_board(checkerboard);
    assert_eq!(session.phase(), Phase::GameOver);
    assert_eq!(session.score(), 0);
}

#[test]
fn activation_after_game_over_is_ignored() {
    let mut session = Session::with_board(board_from_rows(4, &[&[0, 0, 0], &[1, 2, 1]]));
    session.activate(0, 0).expect("cluster of three");
    assert!(session.is_over());
    assert!(session.activate(0, 1).is_none());
    assert_eq!(session.score(), 9);
}

#[test]
fn score_is_monotonic_over_a_full_game() {
    let mut session = Session::new(10, 15, 4, 7);
    let mut last_score = session.score();
    while !session.is_over() {
        let mut played = false;
        'probe: for y in 0..session.board().rows() {
            for x in 0..session.board().cols() {
                if session.activate(x, y).is_some() {
                    played = true;
                    break 'probe;
                }
            }
        }
        assert!(played, "playing phase implies at least one legal move");
        assert!(session.score() > last_score);
        last_score = session.score();
    }
}

#[test]
fn fresh_session_starts_at_zero() {
    let session = Session::new(10, 15, 4, 99);
    assert_eq!(session.score(), 0);
    assert_eq!(session.board().cols(), 10);
    assert_eq!(session.board().rows(), 15);
}
