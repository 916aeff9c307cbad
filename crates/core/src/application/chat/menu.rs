// Menu Layouts
//
// Each response carries the menu matching its TARGET state: main menu
// for Idle, the live queue list for SelectingQueue, admin actions for
// AdminMode, none for states awaiting free-form text.

use crate::domain::{command, SessionState};

pub(crate) fn main_menu() -> Vec<String> {
    vec![
        command::JOIN_LABEL.to_string(),
        command::SHOW_LABEL.to_string(),
        command::CREATE_LABEL.to_string(),
        command::MANAGE_LABEL.to_string(),
    ]
}

pub(crate) fn admin_menu() -> Vec<String> {
    vec![
        command::CLEAR_LABEL.to_string(),
        command::DELETE_LABEL.to_string(),
        command::REMOVE_PARTICIPANT_LABEL.to_string(),
        command::BACK_LABEL.to_string(),
    ]
}

pub(crate) fn queue_menu(names: impl IntoIterator<Item = String>) -> Vec<String> {
    let mut rows: Vec<String> = names.into_iter().collect();
    rows.push(command::BACK_LABEL.to_string());
    rows
}

/// Menu for a response that leaves the session in `state` without
/// touching the store. Error paths cannot fetch the live queue list,
/// so SelectingQueue degrades to the back row alone.
pub(crate) fn fallback_for(state: &SessionState) -> Option<Vec<String>> {
    match state {
        SessionState::Idle => Some(main_menu()),
        SessionState::AdminMode { .. } => Some(admin_menu()),
        SessionState::SelectingQueue { .. } => Some(queue_menu(std::iter::empty())),
        SessionState::CreatingQueue | SessionState::AdminAwaitingParticipantName { .. } => None,
    }
}
