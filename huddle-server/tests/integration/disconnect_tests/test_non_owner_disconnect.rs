use crate::integration::init_tracing;
use crate::utils::TestHarness;
use huddle_core::{ServerSignal, UserId};

#[tokio::test]
async fn peer_is_notified_and_room_record_survives() {
    init_tracing();
    let h = TestHarness::new();
    let record = h.create_public_room("standup", "alice").await;

    let a = h.connect("alice").await;
    let b = h.connect("bob").await;
    h.join(a, "standup", None).await;
    h.join(b, "standup", None).await;
    h.outbound.clear();

    // bob is not the owner.
    h.coordinator.on_close(b).await;

    assert_eq!(
        h.outbound.signals_for(a),
        vec![ServerSignal::PeerLeft {
            user_id: UserId::from("bob")
        }]
    );
    assert!(h.room_resolves("standup").await);
    assert_eq!(h.coordinator.occupancy().members(record.id), vec![a]);
}

#[tokio::test]
async fn disconnect_of_sole_occupant_drops_the_live_room() {
    init_tracing();
    let h = TestHarness::new();
    h.create_public_room("standup", "alice").await;

    let b = h.connect("bob").await;
    h.join(b, "standup", None).await;

    h.coordinator.on_close(b).await;

    assert_eq!(h.coordinator.occupancy().room_count(), 0);
    // Durable record untouched: bob never owned it.
    assert!(h.room_resolves("standup").await);
}

#[tokio::test]
async fn disconnect_before_any_join_is_silent() {
    init_tracing();
    let h = TestHarness::new();

    let a = h.connect("alice").await;
    h.outbound.clear();

    h.coordinator.on_close(a).await;
    assert_eq!(h.outbound.total_signals(), 0);
}
