use crate::integration::init_tracing;
use crate::utils::{TestHarness, join_error_codes};
use huddle_core::JoinErrorCode;

#[tokio::test]
async fn third_join_gets_room_full_and_mutates_nothing() {
    init_tracing();
    let h = TestHarness::new();
    let record = h.create_private_room("standup", "alice", "secret").await;

    let a = h.connect("alice").await;
    let b = h.connect("bob").await;
    let c = h.connect("carol").await;

    h.join(a, "standup", Some("secret")).await;
    h.join(b, "standup", Some("secret")).await;
    h.join(c, "standup", Some("secret")).await;

    assert_eq!(
        join_error_codes(&h.outbound, c),
        vec![JoinErrorCode::RoomFull]
    );
    assert_eq!(
        h.coordinator.occupancy().members(record.id),
        vec![a, b],
        "rejected join must not change the occupancy"
    );

    // The occupants saw nothing of the failed attempt.
    assert!(join_error_codes(&h.outbound, a).is_empty());
    assert!(join_error_codes(&h.outbound, b).is_empty());
}

#[tokio::test]
async fn capacity_frees_up_after_leave() {
    init_tracing();
    let h = TestHarness::new();
    let record = h.create_public_room("standup", "alice").await;

    let a = h.connect("alice").await;
    let b = h.connect("bob").await;
    let c = h.connect("carol").await;

    h.join(a, "standup", None).await;
    h.join(b, "standup", None).await;
    h.coordinator.on_close(b).await;

    h.join(c, "standup", None).await;
    assert!(join_error_codes(&h.outbound, c).is_empty());
    assert_eq!(h.coordinator.occupancy().members(record.id), vec![a, c]);
}
