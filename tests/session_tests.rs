use broadside::{AttackOutcome, GameStatus, SessionError, SessionStore};

fn lobby_with_two_players(store: &SessionStore, id: &str) {
    store.join(id, "Alice");
    store.join(id, "Bob");
}

fn playing_game(store: &SessionStore, id: &str) {
    lobby_with_two_players(store, id);
    store.place_ships(id, "Alice", &[0, 1, 2]).unwrap();
    store.place_ships(id, "Bob", &[10, 11, 12]).unwrap();
}

#[test]
fn unknown_id_returns_empty_lobby() {
    let store = SessionStore::new();
    let snap = store.get_state("nope");
    assert_eq!(snap.game_id, "nope");
    assert_eq!(snap.status, GameStatus::Lobby);
    assert_eq!(snap.player1, None);
    assert_eq!(snap.player2, None);
    assert_eq!(snap.turn, None);
    assert_eq!(snap.winner, None);
    assert_eq!(snap.last_move_row, None);
    assert_eq!(snap.last_move_col, None);
    assert!(snap.ships_p1.is_empty() && snap.ships_p2.is_empty());
    assert!(!snap.ready_p1 && !snap.ready_p2);
    assert_eq!((snap.hits_p1, snap.hits_p2), (0, 0));
    // Peeking at an unknown id must not create a session.
    assert!(store.is_empty());
}

#[test]
fn first_join_creates_room_with_creator_to_move() {
    let store = SessionStore::new();
    let snap = store.join("R1", "Alice");
    assert_eq!(snap.player1.as_deref(), Some("Alice"));
    assert_eq!(snap.player2, None);
    assert_eq!(snap.turn.as_deref(), Some("Alice"));
    assert_eq!(snap.status, GameStatus::Lobby);
    assert_eq!(store.len(), 1);
}

#[test]
fn second_join_fills_slot_and_keeps_creator_turn() {
    let store = SessionStore::new();
    store.join("R1", "Alice");
    let snap = store.join("R1", "Bob");
    assert_eq!(snap.player2.as_deref(), Some("Bob"));
    assert_eq!(snap.turn.as_deref(), Some("Alice"));
}

#[test]
fn join_is_idempotent_once_room_is_full() {
    let store = SessionStore::new();
    lobby_with_two_players(&store, "R1");
    let again = store.join("R1", "Bob");
    assert_eq!(again.player2.as_deref(), Some("Bob"));
    let third = store.join("R1", "Carol");
    assert_eq!(third.player2.as_deref(), Some("Bob"));
}

#[test]
fn creator_cannot_take_the_second_slot() {
    let store = SessionStore::new();
    store.join("R1", "Alice");
    let snap = store.join("R1", "Alice");
    assert_eq!(snap.player1.as_deref(), Some("Alice"));
    assert_eq!(snap.player2, None);
}

#[test]
fn place_on_unknown_game_is_not_found() {
    let store = SessionStore::new();
    let err = store.place_ships("nope", "Alice", &[0, 1, 2]).unwrap_err();
    assert_eq!(err, SessionError::NotFound);
}

#[test]
fn game_starts_only_when_both_players_are_ready() {
    let store = SessionStore::new();
    lobby_with_two_players(&store, "R1");

    let snap = store.place_ships("R1", "Alice", &[0, 1, 2]).unwrap();
    assert!(snap.ready_p1);
    assert!(!snap.ready_p2);
    assert_eq!(snap.status, GameStatus::Lobby);

    let snap = store.place_ships("R1", "Bob", &[10, 11, 12]).unwrap();
    assert!(snap.ready_p1 && snap.ready_p2);
    assert_eq!(snap.status, GameStatus::Playing);
    assert_eq!(snap.turn.as_deref(), Some("Alice"));
    assert_eq!(snap.ships_p2, vec![10, 11, 12]);
}

#[test]
fn fleet_must_be_three_distinct_cells_on_the_grid() {
    let store = SessionStore::new();
    store.join("R1", "Alice");
    for fleet in [&[0u8, 1][..], &[0, 1, 2, 3][..], &[0, 0, 1][..], &[0, 1, 25][..]] {
        let err = store.place_ships("R1", "Alice", fleet).unwrap_err();
        assert_eq!(err, SessionError::InvalidFleet, "fleet {:?}", fleet);
    }
    // a rejected fleet leaves the session untouched
    let snap = store.get_state("R1");
    assert!(!snap.ready_p1);
    assert!(snap.ships_p1.is_empty());
}

#[test]
fn placement_by_a_stranger_is_silently_ignored() {
    let store = SessionStore::new();
    lobby_with_two_players(&store, "R1");
    let snap = store.place_ships("R1", "Carol", &[0, 1, 2]).unwrap();
    assert!(!snap.ready_p1 && !snap.ready_p2);
    assert!(snap.ships_p1.is_empty() && snap.ships_p2.is_empty());
    assert_eq!(snap.status, GameStatus::Lobby);
}

#[test]
fn fleets_cannot_be_rearranged_once_playing() {
    let store = SessionStore::new();
    playing_game(&store, "R1");
    let err = store.place_ships("R1", "Alice", &[20, 21, 22]).unwrap_err();
    assert_eq!(err, SessionError::PlacementClosed);
    assert_eq!(store.get_state("R1").ships_p1, vec![0, 1, 2]);
}

#[test]
fn attack_on_unknown_game_is_not_found() {
    let store = SessionStore::new();
    let err = store.attack("nope", "Alice", 0, 0).unwrap_err();
    assert_eq!(err, SessionError::NotFound);
}

#[test]
fn attack_flips_turn_whether_it_hits_or_not() {
    let store = SessionStore::new();
    playing_game(&store, "R1");

    // miss: Bob's fleet is on row 2
    let report = store.attack("R1", "Alice", 4, 4).unwrap();
    assert_eq!(report.status, AttackOutcome::Miss);
    assert_eq!(store.get_state("R1").turn.as_deref(), Some("Bob"));

    // hit: Alice's fleet occupies cells 0..=2
    let report = store.attack("R1", "Bob", 0, 1).unwrap();
    assert_eq!(report.status, AttackOutcome::Hit);
    assert_eq!(store.get_state("R1").turn.as_deref(), Some("Alice"));
}

#[test]
fn attack_records_the_last_move() {
    let store = SessionStore::new();
    playing_game(&store, "R1");
    let report = store.attack("R1", "Alice", 3, 4).unwrap();
    assert_eq!((report.last_move_row, report.last_move_col), (3, 4));
    let snap = store.get_state("R1");
    assert_eq!(snap.last_move_row, Some(3));
    assert_eq!(snap.last_move_col, Some(4));
}

#[test]
fn shooter_must_be_a_registered_player() {
    let store = SessionStore::new();
    playing_game(&store, "R1");
    let err = store.attack("R1", "Carol", 2, 0).unwrap_err();
    assert_eq!(err, SessionError::UnknownPlayer);
    // rejected shot must not flip the turn or record a move
    let snap = store.get_state("R1");
    assert_eq!(snap.turn.as_deref(), Some("Alice"));
    assert_eq!(snap.last_move_row, None);
}

#[test]
fn attack_outside_the_grid_is_rejected() {
    let store = SessionStore::new();
    playing_game(&store, "R1");
    assert_eq!(
        store.attack("R1", "Alice", 5, 0).unwrap_err(),
        SessionError::OutOfBounds
    );
    assert_eq!(
        store.attack("R1", "Alice", 0, 5).unwrap_err(),
        SessionError::OutOfBounds
    );
}

#[test]
fn striking_the_same_cell_twice_counts_once() {
    let store = SessionStore::new();
    playing_game(&store, "R1");

    let first = store.attack("R1", "Alice", 2, 0).unwrap();
    assert_eq!(first.status, AttackOutcome::Hit);
    store.attack("R1", "Bob", 4, 4).unwrap();

    let second = store.attack("R1", "Alice", 2, 0).unwrap();
    assert_eq!(second.status, AttackOutcome::Miss);
    assert_eq!(store.get_state("R1").hits_p1, 1);
}

#[test]
fn three_hits_finish_the_game() {
    let store = SessionStore::new();
    playing_game(&store, "R1");

    store.attack("R1", "Alice", 2, 0).unwrap();
    store.attack("R1", "Bob", 4, 4).unwrap();
    store.attack("R1", "Alice", 2, 1).unwrap();
    store.attack("R1", "Bob", 4, 3).unwrap();
    let last = store.attack("R1", "Alice", 2, 2).unwrap();

    assert_eq!(last.status, AttackOutcome::Hit);
    assert_eq!(last.winner.as_deref(), Some("Alice"));
    let snap = store.get_state("R1");
    assert_eq!(snap.status, GameStatus::Finished);
    assert_eq!(snap.winner.as_deref(), Some("Alice"));
    assert_eq!(snap.hits_p1, 3);
}

#[test]
fn finished_game_rejects_all_further_mutation() {
    let store = SessionStore::new();
    playing_game(&store, "R1");
    for col in 0..3 {
        store.attack("R1", "Alice", 2, col).unwrap();
        if col < 2 {
            store.attack("R1", "Bob", 4, col).unwrap();
        }
    }
    assert_eq!(store.get_state("R1").status, GameStatus::Finished);

    // a fourth shot cannot change the winner
    assert_eq!(
        store.attack("R1", "Bob", 0, 0).unwrap_err(),
        SessionError::GameOver
    );
    assert_eq!(
        store.place_ships("R1", "Bob", &[20, 21, 22]).unwrap_err(),
        SessionError::GameOver
    );
    let snap = store.join("R1", "Carol");
    assert_eq!(snap.player2.as_deref(), Some("Bob"));
    assert_eq!(snap.winner.as_deref(), Some("Alice"));
}

/// The reference round-trip: create, fill, place, and let Alice sink Bob's
/// whole fleet on row 2.
#[test]
fn full_game_scenario() {
    let store = SessionStore::new();

    let snap = store.join("R1", "Alice");
    assert_eq!(snap.status, GameStatus::Lobby);
    assert_eq!(snap.player1.as_deref(), Some("Alice"));
    assert_eq!(snap.turn.as_deref(), Some("Alice"));

    let snap = store.join("R1", "Bob");
    assert_eq!(snap.player2.as_deref(), Some("Bob"));
    assert_eq!(snap.turn.as_deref(), Some("Alice"));

    store.place_ships("R1", "Alice", &[0, 1, 2]).unwrap();
    let snap = store.place_ships("R1", "Bob", &[10, 11, 12]).unwrap();
    assert_eq!(snap.status, GameStatus::Playing);
    assert_eq!(snap.turn.as_deref(), Some("Alice"));

    // (2,0) -> cell 10, Bob's first ship
    let report = store.attack("R1", "Alice", 2, 0).unwrap();
    assert_eq!(report.status, AttackOutcome::Hit);
    let snap = store.get_state("R1");
    assert_eq!(snap.hits_p1, 1);
    assert_eq!(snap.turn.as_deref(), Some("Bob"));

    store.attack("R1", "Bob", 4, 0).unwrap();
    store.attack("R1", "Alice", 2, 1).unwrap();
    store.attack("R1", "Bob", 4, 1).unwrap();
    let last = store.attack("R1", "Alice", 2, 2).unwrap();

    assert_eq!(last.winner.as_deref(), Some("Alice"));
    let snap = store.get_state("R1");
    assert_eq!(snap.status, GameStatus::Finished);
    assert_eq!(snap.winner.as_deref(), Some("Alice"));
}
