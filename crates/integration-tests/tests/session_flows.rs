//! End-to-end conversational flows through the dispatcher against a
//! real in-memory SQLite store.

use std::sync::Arc;

use waitline_core::application::{
    Dispatcher, InboundCallback, InboundMessage, SessionStore, UserRef,
};
use waitline_core::port::time_provider::SystemTimeProvider;
use waitline_core::port::QueueRepository;
use waitline_infra_sqlite::{create_pool, run_migrations, SqliteQueueRepository};

async fn setup() -> (Arc<Dispatcher>, Arc<SqliteQueueRepository>) {
    let pool = create_pool("sqlite::memory:").await.unwrap();
    run_migrations(&pool).await.unwrap();

    let repo = Arc::new(SqliteQueueRepository::new(pool, Arc::new(SystemTimeProvider)));
    let sessions = Arc::new(SessionStore::new());
    let dispatcher = Arc::new(Dispatcher::new(sessions, repo.clone()));
    (dispatcher, repo)
}

fn msg(id: i64, name: &str, text: &str) -> InboundMessage {
    InboundMessage {
        user: UserRef {
            id,
            display_name: name.to_string(),
        },
        text: text.to_string(),
    }
}

#[tokio::test]
async fn unrecognized_input_from_a_fresh_user_is_rejected() {
    let (dispatcher, _repo) = setup().await;

    let response = dispatcher.handle_message(msg(1, "A", "hello there")).await;
    assert!(response.text.contains("use the menu"));
    assert!(response.menu.is_some());

    // Still Idle: the same input gets the same answer.
    let again = dispatcher.handle_message(msg(1, "A", "hello there")).await;
    assert_eq!(again.text, response.text);
}

#[tokio::test]
async fn create_join_and_admin_remove_scenario() {
    let (dispatcher, repo) = setup().await;

    // User A creates "Support".
    let r = dispatcher.handle_message(msg(1, "A", "Create queue")).await;
    assert!(r.text.contains("Enter a name"));
    let r = dispatcher.handle_message(msg(1, "A", "Support")).await;
    assert!(r.text.contains("created"));

    let queues = repo.list_queues().await.unwrap();
    assert_eq!(queues.len(), 1);
    assert_eq!(queues[0].name, "Support");
    let queue_id = queues[0].id;

    // User B joins it through the menu flow.
    let r = dispatcher.handle_message(msg(2, "B", "Join queue")).await;
    assert_eq!(
        r.menu.unwrap(),
        vec!["Support".to_string(), "Back to main menu".to_string()]
    );
    let r = dispatcher.handle_message(msg(2, "B", "Support")).await;
    assert!(r.text.contains("Support"));

    let entries = repo.list_entries(queue_id).await.unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].display_name, "B");

    // User A enters admin mode and removes B.
    dispatcher
        .handle_message(msg(1, "A", "Manage queue (admin)"))
        .await;
    let r = dispatcher.handle_message(msg(1, "A", "Support")).await;
    assert!(r.text.contains("Managing"));
    let r = dispatcher
        .handle_message(msg(1, "A", "Remove participant"))
        .await;
    assert!(r.text.contains("participant name"));
    let r = dispatcher.handle_message(msg(1, "A", "B")).await;
    assert!(r.text.contains("removed"));
    assert!(repo.list_entries(queue_id).await.unwrap().is_empty());

    // Removing B again yields the distinct not-found wording.
    dispatcher
        .handle_message(msg(1, "A", "Remove participant"))
        .await;
    let r = dispatcher.handle_message(msg(1, "A", "B")).await;
    assert!(r.text.contains("not in this queue"));
}

#[tokio::test]
async fn repeated_joins_stay_idempotent_through_the_flow() {
    let (dispatcher, repo) = setup().await;
    let queue_id = repo.create_queue("Support", 1).await.unwrap();

    for _ in 0..3 {
        dispatcher.handle_message(msg(2, "B", "Join queue")).await;
        dispatcher.handle_message(msg(2, "B", "Support")).await;
    }

    assert_eq!(repo.list_entries(queue_id).await.unwrap().len(), 1);
}

#[tokio::test]
async fn back_from_admin_mode_resets_the_session() {
    let (dispatcher, repo) = setup().await;
    repo.create_queue("Support", 1).await.unwrap();

    dispatcher
        .handle_message(msg(1, "A", "Manage queue (admin)"))
        .await;
    dispatcher.handle_message(msg(1, "A", "Support")).await;

    let r = dispatcher
        .handle_message(msg(1, "A", "Back to main menu"))
        .await;
    assert!(r.text.contains("main menu"));

    // Admin commands are now unrecognized until the flow is re-entered.
    let r = dispatcher.handle_message(msg(1, "A", "Clear queue")).await;
    assert!(r.text.contains("use the menu"));
}

#[tokio::test]
async fn selecting_a_nonexistent_queue_reprompts() {
    let (dispatcher, repo) = setup().await;
    repo.create_queue("Support", 1).await.unwrap();

    dispatcher.handle_message(msg(2, "B", "Join queue")).await;
    let r = dispatcher.handle_message(msg(2, "B", "Nope")).await;
    assert!(r.text.contains("No such queue"));

    // Still selecting: a valid name now succeeds.
    let r = dispatcher.handle_message(msg(2, "B", "Support")).await;
    assert!(r.text.contains("Support"));
}

#[tokio::test]
async fn admin_session_over_a_deleted_queue_is_forced_back_to_idle() {
    let (dispatcher, repo) = setup().await;
    let queue_id = repo.create_queue("Support", 1).await.unwrap();

    dispatcher
        .handle_message(msg(1, "A", "Manage queue (admin)"))
        .await;
    dispatcher.handle_message(msg(1, "A", "Support")).await;

    // Deleted underneath the admin session.
    repo.delete_queue(queue_id).await.unwrap();

    let r = dispatcher.handle_message(msg(1, "A", "Clear queue")).await;
    assert!(r.text.contains("no longer exists"));

    // Back in Idle: admin commands are unrecognized again.
    let r = dispatcher.handle_message(msg(1, "A", "Clear queue")).await;
    assert!(r.text.contains("use the menu"));
}

#[tokio::test]
async fn deleting_a_queue_through_admin_ends_the_session_and_cascades() {
    let (dispatcher, repo) = setup().await;
    let queue_id = repo.create_queue("Support", 1).await.unwrap();
    repo.add_entry(queue_id, 2, "B").await.unwrap();

    dispatcher
        .handle_message(msg(1, "A", "Manage queue (admin)"))
        .await;
    dispatcher.handle_message(msg(1, "A", "Support")).await;
    let r = dispatcher.handle_message(msg(1, "A", "Delete queue")).await;
    assert!(r.text.contains("deleted"));

    assert!(repo.list_queues().await.unwrap().is_empty());
    assert!(repo.list_entries(queue_id).await.is_err());
}

#[tokio::test]
async fn show_queue_lists_participants_and_returns_to_idle() {
    let (dispatcher, repo) = setup().await;
    let queue_id = repo.create_queue("Support", 1).await.unwrap();
    repo.add_entry(queue_id, 2, "B").await.unwrap();
    repo.add_entry(queue_id, 3, "C").await.unwrap();

    dispatcher.handle_message(msg(4, "D", "Show queue")).await;
    let r = dispatcher.handle_message(msg(4, "D", "Support")).await;
    assert!(r.text.contains("B"));
    assert!(r.text.contains("C"));
    // Back to Idle with the main menu attached.
    assert_eq!(r.menu.unwrap().len(), 4);
}

#[tokio::test]
async fn callbacks_are_acknowledged_without_touching_sessions() {
    let (dispatcher, _repo) = setup().await;

    let ack = dispatcher
        .handle_callback(InboundCallback {
            user_id: 1,
            callback_id: "cb-1".to_string(),
            data: "join_queue".to_string(),
        })
        .await;
    assert_eq!(ack.ack, "Request processed");
    assert!(ack.response.is_some());

    let ack = dispatcher
        .handle_callback(InboundCallback {
            user_id: 1,
            callback_id: "cb-2".to_string(),
            data: "something_else".to_string(),
        })
        .await;
    assert!(ack.response.is_none());

    // Session untouched: the user is still a fresh Idle user.
    let r = dispatcher.handle_message(msg(1, "A", "Clear queue")).await;
    assert!(r.text.contains("use the menu"));
}
