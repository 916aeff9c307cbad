// Dispatcher boundary tests: storage failures must not commit the
// session, and the failure response still carries the menu matching
// the state the user remains in.

use std::sync::Arc;

use super::{menu, Dispatcher, InboundMessage, UserRef};
use crate::application::session_store::SessionStore;
use crate::domain::Queue;
use crate::error::AppError;
use crate::port::queue_repository::MockQueueRepository;

fn msg(id: i64, text: &str) -> InboundMessage {
    InboundMessage {
        user: UserRef {
            id,
            display_name: "alice".to_string(),
        },
        text: text.to_string(),
    }
}

fn support_queue() -> Queue {
    Queue {
        id: 5,
        name: "Support".to_string(),
        created_by: 1,
        created_at: 1_000,
    }
}

fn dispatcher(repo: MockQueueRepository) -> Dispatcher {
    Dispatcher::new(Arc::new(SessionStore::new()), Arc::new(repo))
}

#[tokio::test]
async fn storage_failure_from_idle_keeps_the_main_menu() {
    let mut repo = MockQueueRepository::new();
    repo.expect_list_queues()
        .returning(|| Err(AppError::Database("disk I/O error".to_string())));

    let dispatcher = dispatcher(repo);
    let response = dispatcher.handle_message(msg(1, "Join queue")).await;

    assert!(response.text.contains("went wrong"));
    assert_eq!(response.menu, Some(menu::main_menu()));
}

#[tokio::test]
async fn storage_failure_in_admin_mode_keeps_session_and_admin_menu() {
    let mut repo = MockQueueRepository::new();
    repo.expect_list_queues()
        .returning(|| Ok(vec![support_queue()]));
    repo.expect_find_queue_id_by_name()
        .returning(|_| Ok(Some(5)));
    // First clear fails, the retry succeeds.
    repo.expect_clear_entries()
        .times(1)
        .returning(|_| Err(AppError::Database("disk I/O error".to_string())));
    repo.expect_clear_entries().times(1).returning(|_| Ok(()));

    let dispatcher = dispatcher(repo);
    dispatcher
        .handle_message(msg(1, "Manage queue (admin)"))
        .await;
    dispatcher.handle_message(msg(1, "Support")).await;

    let failed = dispatcher.handle_message(msg(1, "Clear queue")).await;
    assert!(failed.text.contains("went wrong"));
    assert_eq!(failed.menu, Some(menu::admin_menu()));

    // The attempted transition did not commit: still in admin mode.
    let retried = dispatcher.handle_message(msg(1, "Clear queue")).await;
    assert!(retried.text.contains("cleared"));
}
