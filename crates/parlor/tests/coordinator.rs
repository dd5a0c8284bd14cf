//! End-to-end tests: commands in over the bus, snapshots out.

use std::time::Duration;

use parlor::{
    BusSubscriber, Codec, Command, Coordinator, DispatchAdapter, EngineState, InMemoryBus,
    JsonCodec, PlayerId,
    RoomStatus, RoomSnapshot, UpdateStream, COMMAND_CHANNEL, STATE_CHANNEL,
};
use serde_json::json;
use tokio::task::JoinHandle;
use tokio::time::timeout;

fn pid(id: &str) -> PlayerId {
    PlayerId::new(id)
}

/// Starts a coordinator on a fresh bus. Returns the client-side bus,
/// an update subscription, and the coordinator task handle.
fn start() -> (InMemoryBus, UpdateStream, JoinHandle<()>) {
    let (bus, queue) = InMemoryBus::new();
    let updates = bus.watch_updates();
    let adapter = DispatchAdapter::new(bus.publisher(), JsonCodec);
    let handle = tokio::spawn(async move {
        Coordinator::new(queue, adapter).run().await.unwrap();
    });
    (bus, updates, handle)
}

fn send(bus: &InMemoryBus, command: &Command) {
    let bytes = JsonCodec.encode(command).unwrap();
    bus.send_command(COMMAND_CHANNEL, bytes).unwrap();
}

async fn next_snapshot(updates: &mut UpdateStream) -> RoomSnapshot {
    let msg = timeout(Duration::from_secs(1), updates.recv())
        .await
        .expect("timed out waiting for a snapshot")
        .expect("update stream closed");
    assert_eq!(msg.channel, STATE_CHANNEL);
    JsonCodec.decode(&msg.payload).unwrap()
}

fn create(player: &str, name: &str, variant: &str) -> Command {
    Command::Create {
        player_id: pid(player),
        player_name: name.to_string(),
        variant_type: variant.to_string(),
    }
}

#[tokio::test]
async fn test_create_join_ready_starts_a_game() {
    let (bus, mut updates, _handle) = start();

    send(&bus, &create("a", "Alice", "trivia"));
    let snapshot = next_snapshot(&mut updates).await;
    assert_eq!(snapshot.status, RoomStatus::Waiting);
    assert_eq!(snapshot.players.len(), 1);
    let room_id = snapshot.room_id;

    send(
        &bus,
        &Command::Join {
            room_id,
            player_id: pid("b"),
            player_name: "Bob".to_string(),
        },
    );
    let snapshot = next_snapshot(&mut updates).await;
    assert_eq!(snapshot.players.len(), 2);

    send(
        &bus,
        &Command::Ready {
            player_id: pid("a"),
            room_id,
            ready: true,
        },
    );
    let snapshot = next_snapshot(&mut updates).await;
    assert_eq!(snapshot.status, RoomStatus::Waiting);

    send(
        &bus,
        &Command::Ready {
            player_id: pid("b"),
            room_id,
            ready: true,
        },
    );
    let snapshot = next_snapshot(&mut updates).await;
    assert_eq!(snapshot.status, RoomStatus::InProgress);
    assert!(matches!(
        snapshot.engine_state,
        Some(EngineState::Trivia(_))
    ));
}

#[tokio::test]
async fn test_trivia_game_over_the_bus() {
    let (bus, mut updates, _handle) = start();

    send(&bus, &create("a", "Alice", "trivia"));
    let room_id = next_snapshot(&mut updates).await.room_id;
    send(
        &bus,
        &Command::Join {
            room_id,
            player_id: pid("b"),
            player_name: "Bob".to_string(),
        },
    );
    next_snapshot(&mut updates).await;
    for p in ["a", "b"] {
        send(
            &bus,
            &Command::Ready {
                player_id: pid(p),
                room_id,
                ready: true,
            },
        );
        next_snapshot(&mut updates).await;
    }

    // Alice answers everything right, Bob everything wrong.
    let mut last = None;
    for correct in ["Paris", "Mars", "Blue Whale", "Da Vinci"] {
        for (p, answer) in [("a", correct), ("b", "wrong")] {
            send(
                &bus,
                &Command::Action {
                    room_id,
                    player_id: pid(p),
                    action: "answer".to_string(),
                    payload: json!({"answer": answer}),
                },
            );
            last = Some(next_snapshot(&mut updates).await);
        }
    }

    let snapshot = last.unwrap();
    assert_eq!(snapshot.status, RoomStatus::Finished);
    assert_eq!(snapshot.winner, Some(pid("a")));
    assert_eq!(snapshot.players[0].score, 40);
    assert_eq!(snapshot.players[1].score, 0);
}

#[tokio::test]
async fn test_malformed_payload_is_dropped() {
    let (bus, mut updates, _handle) = start();

    bus.send_command(COMMAND_CHANNEL, b"not json at all".to_vec())
        .unwrap();
    bus.send_command(COMMAND_CHANNEL, br#"{"type": "warp"}"#.to_vec())
        .unwrap();
    send(&bus, &create("a", "Alice", "trivia"));

    // The first snapshot out belongs to the valid command; the garbage
    // produced nothing.
    let snapshot = next_snapshot(&mut updates).await;
    assert_eq!(snapshot.players[0].id, pid("a"));
}

#[tokio::test]
async fn test_rejected_command_publishes_nothing() {
    let (bus, mut updates, _handle) = start();

    send(&bus, &create("a", "Alice", "chess"));
    send(&bus, &create("b", "Bob", "trivia"));

    let snapshot = next_snapshot(&mut updates).await;
    assert_eq!(snapshot.players[0].id, pid("b"));
    assert_eq!(snapshot.variant_type, "trivia");
}

#[tokio::test]
async fn test_ready_with_mismatched_room_is_dropped() {
    let (bus, mut updates, _handle) = start();

    send(&bus, &create("a", "Alice", "trivia"));
    let room_id = next_snapshot(&mut updates).await.room_id;

    send(
        &bus,
        &Command::Ready {
            player_id: pid("a"),
            room_id: parlor::RoomId(room_id.0 + 1),
            ready: true,
        },
    );
    // No broadcast for the mismatched command; the next one flushes
    // through normally.
    send(&bus, &Command::Leave { player_id: pid("a") });
    let snapshot = next_snapshot(&mut updates).await;
    assert!(snapshot.players.is_empty());
}

#[tokio::test]
async fn test_last_leave_broadcasts_the_empty_room() {
    let (bus, mut updates, _handle) = start();

    send(&bus, &create("a", "Alice", "word_chain"));
    let room_id = next_snapshot(&mut updates).await.room_id;

    send(&bus, &Command::Leave { player_id: pid("a") });
    let snapshot = next_snapshot(&mut updates).await;
    assert_eq!(snapshot.room_id, room_id);
    assert!(snapshot.players.is_empty());
}

#[tokio::test]
async fn test_shutdown_flushes_final_snapshots_then_closes() {
    let (bus, mut updates, handle) = start();

    send(&bus, &create("a", "Alice", "trivia"));
    let first = next_snapshot(&mut updates).await;

    // Dropping every client handle closes the command queue.
    drop(bus);

    let flushed = next_snapshot(&mut updates).await;
    assert_eq!(flushed, first);

    handle.await.unwrap();
    assert!(
        timeout(Duration::from_secs(1), updates.recv())
            .await
            .unwrap()
            .is_none()
    );
}
