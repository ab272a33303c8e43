use crate::integration::init_tracing;
use crate::utils::{TestHarness, find_signal, joined_room, ready_flags};
use huddle_core::{PeerRole, ServerSignal, UserId};

#[tokio::test]
async fn first_occupant_waits_with_no_role() {
    init_tracing();
    let h = TestHarness::new();
    let record = h.create_public_room("standup", "alice").await;

    let a = h.connect("alice").await;
    h.join(a, "standup", None).await;

    let success = find_signal(&h.outbound, a, |s| {
        matches!(s, ServerSignal::JoinSuccess { .. })
    })
    .expect("join should succeed");
    assert_eq!(
        success,
        ServerSignal::JoinSuccess {
            room_id: record.id,
            role: None,
        }
    );
    assert!(ready_flags(&h.outbound, a).is_empty());
}

#[tokio::test]
async fn pairing_assigns_positional_roles_and_notifies_both() {
    init_tracing();
    let h = TestHarness::new();
    h.create_private_room("standup", "alice", "secret").await;

    let a = h.connect("alice").await;
    let b = h.connect("bob").await;

    h.join(a, "standup", Some("secret")).await;
    h.join(b, "standup", Some("secret")).await;

    // The second arrival offers.
    let b_success = find_signal(&h.outbound, b, |s| {
        matches!(s, ServerSignal::JoinSuccess { .. })
    })
    .unwrap();
    assert!(matches!(
        b_success,
        ServerSignal::JoinSuccess {
            role: Some(PeerRole::Offerer),
            ..
        }
    ));

    // The earlier occupant is told who arrived and re-notified with its
    // answerer designation.
    assert_eq!(
        find_signal(&h.outbound, a, |s| matches!(s, ServerSignal::PeerJoined { .. })),
        Some(ServerSignal::PeerJoined {
            user_id: UserId::from("bob")
        })
    );
    assert_eq!(ready_flags(&h.outbound, a), vec![false]);
    assert_eq!(ready_flags(&h.outbound, b), vec![true]);
}

#[tokio::test]
async fn join_by_room_id_works_like_code() {
    init_tracing();
    let h = TestHarness::new();
    let record = h.create_public_room("standup", "alice").await;

    let a = h.connect("alice").await;
    h.join(a, &record.id.to_string(), None).await;

    assert_eq!(joined_room(&h.outbound, a), Some(record.id));
}

#[tokio::test]
async fn duplicate_join_frame_is_reacknowledged_without_mutation() {
    init_tracing();
    let h = TestHarness::new();
    let record = h.create_public_room("standup", "alice").await;

    let a = h.connect("alice").await;
    h.join(a, "standup", None).await;
    h.join(a, "standup", None).await;

    let successes: Vec<_> = h
        .outbound
        .signals_for(a)
        .into_iter()
        .filter(|s| matches!(s, ServerSignal::JoinSuccess { .. }))
        .collect();
    assert_eq!(successes.len(), 2);
    assert_eq!(h.coordinator.occupancy().members(record.id).len(), 1);
}
