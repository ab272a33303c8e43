use crate::integration::init_tracing;
use crate::utils::TestHarness;
use huddle_core::ClientSignal;

#[tokio::test]
async fn non_member_relay_has_no_observable_effect() {
    init_tracing();
    let h = TestHarness::new();
    let record = h.create_public_room("standup", "alice").await;

    let a = h.connect("alice").await;
    let b = h.connect("bob").await;
    h.join(a, "standup", None).await;
    h.join(b, "standup", None).await;

    // Authenticated, but never joined the room.
    let outsider = h.connect("mallory").await;
    h.outbound.clear();

    for signal in [
        ClientSignal::Offer {
            room_id: record.id,
            description: serde_json::json!({"sdp": "spoof"}),
        },
        ClientSignal::Answer {
            room_id: record.id,
            description: serde_json::json!({"sdp": "spoof"}),
        },
        ClientSignal::Ice {
            room_id: record.id,
            candidate: serde_json::json!({"candidate": "spoof"}),
        },
    ] {
        h.coordinator.handle_signal(outsider, signal).await;
    }

    assert_eq!(h.outbound.total_signals(), 0);
}

#[tokio::test]
async fn relay_does_not_leak_across_rooms() {
    init_tracing();
    let h = TestHarness::new();
    let red = h.create_public_room("red", "alice").await;
    h.create_public_room("blue", "carol").await;

    let a = h.connect("alice").await;
    let b = h.connect("bob").await;
    let c = h.connect("carol").await;
    h.join(a, "red", None).await;
    h.join(b, "red", None).await;
    h.join(c, "blue", None).await;
    h.outbound.clear();

    h.coordinator
        .handle_signal(
            a,
            ClientSignal::Offer {
                room_id: red.id,
                description: serde_json::json!({"sdp": "red only"}),
            },
        )
        .await;

    assert_eq!(h.outbound.signals_for(b).len(), 1);
    assert!(h.outbound.signals_for(c).is_empty());
}
