//! Session state machine and store synchronization.

use std::sync::Arc;
use tictac_live::{Mark, MemoryStore, Outcome, RoomId, RoomState, Session};

async fn fresh() -> Session {
    let store = Arc::new(MemoryStore::new());
    Session::join(store, RoomId::generate()).await.unwrap()
}

fn board_snapshot(layout: &str, x_is_next: bool) -> RoomState {
    let mut snapshot = RoomState::default();
    for (cell, c) in layout.chars().enumerate() {
        match c {
            'X' => snapshot.board.place(cell, Mark::X),
            'O' => snapshot.board.place(cell, Mark::O),
            _ => {}
        }
    }
    snapshot.x_is_next = x_is_next;
    snapshot
}

#[tokio::test]
async fn fresh_session_starts_with_the_default_record() {
    let session = fresh().await;
    assert_eq!(session.state(), &RoomState::default());
    assert!(session.state().x_is_next);
}

#[tokio::test]
async fn accepted_moves_alternate_marks() {
    let mut session = fresh().await;
    assert!(session.state().x_is_next);

    session.play(0).await;
    assert_eq!(session.state().board.mark_at(0), Some(Mark::X));
    assert!(!session.state().x_is_next);

    session.play(1).await;
    assert_eq!(session.state().board.mark_at(1), Some(Mark::O));
    assert!(session.state().x_is_next);
}

#[tokio::test]
async fn occupied_cell_is_ignored() {
    let mut session = fresh().await;
    session.play(0).await;
    let before = session.state().clone();

    assert!(session.play(0).await.is_none());
    assert_eq!(session.state(), &before);
}

#[tokio::test]
async fn out_of_range_cell_is_ignored() {
    let mut session = fresh().await;
    let before = session.state().clone();

    assert!(session.play(9).await.is_none());
    assert_eq!(session.state(), &before);
}

#[tokio::test]
async fn top_row_scenario_concludes_for_x() {
    let mut session = fresh().await;
    for cell in [0, 4, 1, 5] {
        assert!(session.play(cell).await.is_none());
    }
    assert_eq!(session.play(2).await, Some(Outcome::Won(Mark::X)));
    assert_eq!(session.state().winner, Some(Outcome::Won(Mark::X)));
}

#[tokio::test]
async fn concluded_game_ignores_moves() {
    let mut session = fresh().await;
    for cell in [0, 4, 1, 5, 2] {
        session.play(cell).await;
    }
    let before = session.state().clone();

    assert!(session.play(8).await.is_none());
    assert_eq!(session.state(), &before);
}

#[tokio::test]
async fn reset_restores_the_default_record_from_any_state() {
    let mut session = fresh().await;
    for cell in [0, 4, 1, 5, 2] {
        session.play(cell).await;
    }
    assert!(session.state().is_over());

    session.reset().await;
    assert_eq!(session.state(), &RoomState::default());

    // A rematch announces its own conclusion again.
    for cell in [0, 4, 1, 5] {
        session.play(cell).await;
    }
    assert_eq!(session.play(2).await, Some(Outcome::Won(Mark::X)));
}

#[tokio::test]
async fn full_board_without_a_line_settles_as_draw() {
    let mut session = fresh().await;
    let notice = session.apply(board_snapshot("XOXOXXOXO", false)).await;
    assert_eq!(notice, Some(Outcome::Draw));
    assert_eq!(session.state().winner, Some(Outcome::Draw));
}

#[tokio::test]
async fn remote_snapshot_overwrites_local_state_unconditionally() {
    let mut session = fresh().await;
    session.play(0).await;

    let foreign = board_snapshot("........O", true);
    session.apply(foreign.clone()).await;
    assert_eq!(session.state(), &foreign);
}

#[tokio::test]
async fn echoes_of_a_concluded_game_do_not_announce_again() {
    let mut session = fresh().await;
    for cell in [0, 4, 1, 5] {
        session.play(cell).await;
    }
    assert!(session.play(2).await.is_some());

    let concluded = session.state().clone();
    loop {
        let snapshot = session.next_snapshot().await.unwrap();
        let caught_up = snapshot == concluded;
        assert!(session.apply(snapshot).await.is_none());
        if caught_up {
            break;
        }
    }
}

#[tokio::test]
async fn move_propagates_to_a_peer_session() {
    let store = Arc::new(MemoryStore::new());
    let room = RoomId::generate();
    let mut a = Session::join(store.clone(), room.clone()).await.unwrap();
    let mut b = Session::join(store, room).await.unwrap();

    // Both sessions receive the current (default) record on subscribe.
    let initial = b.next_snapshot().await.unwrap();
    assert_eq!(initial, RoomState::default());
    b.apply(initial).await;

    a.play(4).await;

    let snapshot = b.next_snapshot().await.unwrap();
    b.apply(snapshot).await;
    assert_eq!(b.state().board.mark_at(4), Some(Mark::X));
    assert!(!b.state().x_is_next);
}

#[tokio::test]
async fn peer_observes_a_win_and_announces_it_once() {
    let store = Arc::new(MemoryStore::new());
    let room = RoomId::generate();
    let mut a = Session::join(store.clone(), room.clone()).await.unwrap();
    let mut b = Session::join(store, room).await.unwrap();

    for cell in [0, 4, 1, 5, 2] {
        a.play(cell).await;
    }

    let mut notices = 0;
    loop {
        let snapshot = b.next_snapshot().await.unwrap();
        let concluded = snapshot.winner.is_some();
        if b.apply(snapshot).await.is_some() {
            notices += 1;
        }
        if concluded {
            break;
        }
    }
    assert_eq!(notices, 1);
    assert_eq!(b.state().winner, Some(Outcome::Won(Mark::X)));
}

#[tokio::test]
async fn reset_reaches_the_store() {
    let store = Arc::new(MemoryStore::new());
    let room = RoomId::generate();
    let mut a = Session::join(store.clone(), room.clone()).await.unwrap();

    for cell in [0, 4, 1, 5, 2] {
        a.play(cell).await;
    }
    a.reset().await;

    // A late joiner sees the cleared record.
    let mut b = Session::join(store, room).await.unwrap();
    let snapshot = b.next_snapshot().await.unwrap();
    assert_eq!(snapshot, RoomState::default());
}
