use crate::integration::init_tracing;
use crate::utils::TestHarness;
use huddle_core::{ClientSignal, ServerSignal, UserId};

#[tokio::test]
async fn leave_notifies_the_remaining_occupant() {
    init_tracing();
    let h = TestHarness::new();
    let record = h.create_public_room("standup", "alice").await;

    let a = h.connect("alice").await;
    let b = h.connect("bob").await;
    h.join(a, "standup", None).await;
    h.join(b, "standup", None).await;
    h.outbound.clear();

    h.coordinator
        .handle_signal(b, ClientSignal::Leave { room_id: record.id })
        .await;

    assert_eq!(
        h.outbound.signals_for(a),
        vec![ServerSignal::PeerLeft {
            user_id: UserId::from("bob")
        }]
    );
    assert_eq!(h.coordinator.occupancy().members(record.id), vec![a]);
    // The leaver can rejoin later.
    h.outbound.clear();
    h.join(b, "standup", None).await;
    assert!(
        h.outbound
            .signals_for(b)
            .iter()
            .any(|s| matches!(s, ServerSignal::JoinSuccess { .. }))
    );
}

#[tokio::test]
async fn owner_leave_broadcasts_room_deleted() {
    init_tracing();
    let h = TestHarness::new();
    let record = h.create_public_room("standup", "alice").await;

    let a = h.connect("alice").await;
    let b = h.connect("bob").await;
    h.join(a, "standup", None).await;
    h.join(b, "standup", None).await;
    h.outbound.clear();

    h.coordinator
        .handle_signal(a, ClientSignal::Leave { room_id: record.id })
        .await;

    assert_eq!(
        h.outbound.signals_for(b),
        vec![
            ServerSignal::PeerLeft {
                user_id: UserId::from("alice")
            },
            ServerSignal::RoomDeleted,
        ]
    );
    assert!(!h.room_resolves("standup").await);
    assert_eq!(h.coordinator.occupancy().room_count(), 0);
}

#[tokio::test]
async fn leave_of_a_room_never_joined_is_harmless() {
    init_tracing();
    let h = TestHarness::new();
    let record = h.create_public_room("standup", "alice").await;

    let outsider = h.connect("mallory").await;
    h.outbound.clear();

    h.coordinator
        .handle_signal(outsider, ClientSignal::Leave { room_id: record.id })
        .await;

    assert_eq!(h.outbound.total_signals(), 0);
    assert!(h.room_resolves("standup").await);
}
