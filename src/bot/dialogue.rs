use teloxide::dispatching::dialogue::{Dialogue, InMemStorage};

/// Where a chat is in the `/find` interaction.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum FindState {
    /// No surname pending; the next free-text message is not a lookup
    #[default]
    Resolved,
    /// `/find` was sent and the next text message is the surname
    AwaitingSurname,
}

pub type FindDialogue = Dialogue<FindState, InMemStorage<FindState>>;

pub type HandlerResult = Result<(), Box<dyn std::error::Error + Send + Sync>>;
