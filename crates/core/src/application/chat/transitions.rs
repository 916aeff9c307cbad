// Session State Machine
//
// Given the current state and one line of inbound text, decide the
// next state, invoke the repository effect, and word the response.
// Matched exhaustively: every (state, input) pair has a defined
// outcome, unmatched input re-prompts.
//
// A repository `NotFound` against a queue id the session already
// holds means the queue was deleted underneath us; the session is
// forced back to Idle rather than operating on a stale id.

use crate::application::chat::event::UserRef;
use crate::application::chat::menu;
use crate::domain::{command, AdminCommand, MenuCommand, PendingAction, QueueId, SessionState};
use crate::error::{AppError, Result};
use crate::port::QueueRepository;
use crate::port::RemoveOutcome;

/// Decision for one inbound message: replacement state plus response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Transition {
    pub next: SessionState,
    pub text: String,
    pub menu: Option<Vec<String>>,
}

impl Transition {
    fn idle(text: impl Into<String>) -> Self {
        Self {
            next: SessionState::Idle,
            text: text.into(),
            menu: Some(menu::main_menu()),
        }
    }

    fn stay(state: SessionState, text: impl Into<String>, menu: Option<Vec<String>>) -> Self {
        Self {
            next: state,
            text: text.into(),
            menu,
        }
    }
}

/// Response for a session whose selected queue vanished mid-flow.
fn stale_queue() -> Transition {
    Transition::idle("This queue no longer exists. Back to the main menu.")
}

pub(crate) async fn apply(
    repo: &dyn QueueRepository,
    state: &SessionState,
    user: &UserRef,
    text: &str,
) -> Result<Transition> {
    let input = text.trim();

    // The back command cancels any in-progress flow, unconditionally
    // and without side effects.
    if *state != SessionState::Idle && command::is_back(input) {
        return Ok(Transition::idle("Back to the main menu."));
    }

    match state {
        SessionState::Idle => idle(repo, input).await,
        SessionState::SelectingQueue { pending } => selecting(repo, user, *pending, input).await,
        SessionState::CreatingQueue => creating(repo, user, input).await,
        SessionState::AdminMode { queue_id } => admin(repo, *queue_id, input).await,
        SessionState::AdminAwaitingParticipantName { queue_id } => {
            remove_participant(repo, *queue_id, input).await
        }
    }
}

async fn idle(repo: &dyn QueueRepository, input: &str) -> Result<Transition> {
    match MenuCommand::parse(input) {
        Some(MenuCommand::Start) => Ok(Transition::idle("Welcome! Pick an action:")),
        Some(MenuCommand::JoinQueue) => enter_selection(repo, PendingAction::Join).await,
        Some(MenuCommand::ShowQueue) => enter_selection(repo, PendingAction::Show).await,
        Some(MenuCommand::ManageQueue) => enter_selection(repo, PendingAction::AdminEnter).await,
        Some(MenuCommand::CreateQueue) => Ok(Transition::stay(
            SessionState::CreatingQueue,
            "Enter a name for the new queue:",
            None,
        )),
        None => Ok(Transition::idle("Unknown command. Please use the menu.")),
    }
}

/// Move to queue selection, or stay Idle when there is nothing to select.
async fn enter_selection(repo: &dyn QueueRepository, pending: PendingAction) -> Result<Transition> {
    let names = queue_names(repo).await?;
    if names.is_empty() {
        return Ok(Transition::idle("There are no queues yet."));
    }
    Ok(Transition::stay(
        SessionState::SelectingQueue { pending },
        "Select a queue:",
        Some(menu::queue_menu(names)),
    ))
}

async fn selecting(
    repo: &dyn QueueRepository,
    user: &UserRef,
    pending: PendingAction,
    input: &str,
) -> Result<Transition> {
    let Some(queue_id) = repo.find_queue_id_by_name(input).await? else {
        return no_such_queue(repo, pending).await;
    };

    match pending {
        PendingAction::Join => {
            match repo.add_entry(queue_id, user.id, &user.display_name).await {
                Ok(()) => Ok(Transition::idle(format!(
                    "You are in the queue \"{input}\"."
                ))),
                // Deleted between lookup and insert: treat as unresolved.
                Err(AppError::NotFound(_)) => no_such_queue(repo, pending).await,
                Err(err) => Err(err),
            }
        }
        PendingAction::Show => match repo.list_entries(queue_id).await {
            Ok(entries) if entries.is_empty() => {
                Ok(Transition::idle(format!("Queue \"{input}\" is empty.")))
            }
            Ok(entries) => {
                let names: Vec<String> = entries.into_iter().map(|e| e.display_name).collect();
                Ok(Transition::idle(format!(
                    "Queue \"{input}\":\n{}",
                    names.join("\n")
                )))
            }
            Err(AppError::NotFound(_)) => no_such_queue(repo, pending).await,
            Err(err) => Err(err),
        },
        PendingAction::AdminEnter => Ok(Transition::stay(
            SessionState::AdminMode { queue_id },
            format!("Managing queue \"{input}\". Pick an action:"),
            Some(menu::admin_menu()),
        )),
    }
}

async fn no_such_queue(repo: &dyn QueueRepository, pending: PendingAction) -> Result<Transition> {
    let names = queue_names(repo).await?;
    if names.is_empty() {
        return Ok(Transition::idle("There are no queues yet."));
    }
    Ok(Transition::stay(
        SessionState::SelectingQueue { pending },
        "No such queue. Try again.",
        Some(menu::queue_menu(names)),
    ))
}

async fn creating(repo: &dyn QueueRepository, user: &UserRef, input: &str) -> Result<Transition> {
    if input.is_empty() {
        return Ok(Transition::stay(
            SessionState::CreatingQueue,
            "Queue name cannot be empty. Enter a name:",
            None,
        ));
    }
    match repo.create_queue(input, user.id).await {
        Ok(_) => Ok(Transition::idle(format!("Queue \"{input}\" created."))),
        Err(AppError::Validation(reason)) => Ok(Transition::stay(
            SessionState::CreatingQueue,
            reason,
            None,
        )),
        Err(err) => Err(err),
    }
}

async fn admin(repo: &dyn QueueRepository, queue_id: QueueId, input: &str) -> Result<Transition> {
    match AdminCommand::parse(input) {
        Some(AdminCommand::Clear) => match repo.clear_entries(queue_id).await {
            Ok(()) => Ok(Transition::stay(
                SessionState::AdminMode { queue_id },
                "Queue cleared.",
                Some(menu::admin_menu()),
            )),
            Err(AppError::NotFound(_)) => Ok(stale_queue()),
            Err(err) => Err(err),
        },
        Some(AdminCommand::DeleteQueue) => match repo.delete_queue(queue_id).await {
            // The queue is gone, so the admin session over it ends.
            Ok(()) => Ok(Transition::idle("Queue deleted.")),
            Err(AppError::NotFound(_)) => Ok(stale_queue()),
            Err(err) => Err(err),
        },
        Some(AdminCommand::RemoveParticipant) => Ok(Transition::stay(
            SessionState::AdminAwaitingParticipantName { queue_id },
            "Enter the participant name to remove:",
            None,
        )),
        None => Ok(Transition::stay(
            SessionState::AdminMode { queue_id },
            "Unknown command. Please use the menu.",
            Some(menu::admin_menu()),
        )),
    }
}

async fn remove_participant(
    repo: &dyn QueueRepository,
    queue_id: QueueId,
    input: &str,
) -> Result<Transition> {
    if input.is_empty() {
        return Ok(Transition::stay(
            SessionState::AdminAwaitingParticipantName { queue_id },
            "Participant name cannot be empty. Enter a name:",
            None,
        ));
    }
    match repo.remove_entry(queue_id, input).await {
        Ok(RemoveOutcome::Removed) => Ok(Transition::stay(
            SessionState::AdminMode { queue_id },
            format!("Participant \"{input}\" removed from the queue."),
            Some(menu::admin_menu()),
        )),
        Ok(RemoveOutcome::NotInQueue) => Ok(Transition::stay(
            SessionState::AdminMode { queue_id },
            format!("Participant \"{input}\" is not in this queue."),
            Some(menu::admin_menu()),
        )),
        Err(AppError::NotFound(_)) => Ok(stale_queue()),
        Err(err) => Err(err),
    }
}

async fn queue_names(repo: &dyn QueueRepository) -> Result<Vec<String>> {
    Ok(repo
        .list_queues()
        .await?
        .into_iter()
        .map(|q| q.name)
        .collect())
}
