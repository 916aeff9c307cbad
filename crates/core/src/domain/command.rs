// Menu Command Parsing
//
// Inbound text is free-form; the transport's reply keyboard merely
// suggests these labels. Parsing is exact (trimmed) match so stray
// text never aliases a command.

/// The universal cancel command, accepted in every non-idle state.
pub const BACK_LABEL: &str = "Back to main menu";

pub const JOIN_LABEL: &str = "Join queue";
pub const SHOW_LABEL: &str = "Show queue";
pub const CREATE_LABEL: &str = "Create queue";
pub const MANAGE_LABEL: &str = "Manage queue (admin)";

pub const CLEAR_LABEL: &str = "Clear queue";
pub const DELETE_LABEL: &str = "Delete queue";
pub const REMOVE_PARTICIPANT_LABEL: &str = "Remove participant";

/// Commands recognized from the main menu (`Idle` state).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuCommand {
    Start,
    JoinQueue,
    ShowQueue,
    CreateQueue,
    ManageQueue,
}

impl MenuCommand {
    pub fn parse(text: &str) -> Option<Self> {
        match text.trim() {
            "/start" => Some(Self::Start),
            JOIN_LABEL => Some(Self::JoinQueue),
            SHOW_LABEL => Some(Self::ShowQueue),
            CREATE_LABEL => Some(Self::CreateQueue),
            MANAGE_LABEL => Some(Self::ManageQueue),
            _ => None,
        }
    }
}

/// Commands recognized inside `AdminMode`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdminCommand {
    Clear,
    DeleteQueue,
    RemoveParticipant,
}

impl AdminCommand {
    pub fn parse(text: &str) -> Option<Self> {
        match text.trim() {
            CLEAR_LABEL => Some(Self::Clear),
            DELETE_LABEL => Some(Self::DeleteQueue),
            REMOVE_PARTICIPANT_LABEL => Some(Self::RemoveParticipant),
            _ => None,
        }
    }
}

pub fn is_back(text: &str) -> bool {
    text.trim() == BACK_LABEL
}
