pub mod ai;
pub mod budget;
pub mod catalog;
pub mod character;
pub mod combat;
pub mod context;
pub mod encounter;
pub mod error;
pub mod game_state;
pub mod logging;
pub mod message;
pub mod orchestrator;
pub mod prompt;
pub mod quest;
pub mod sanitize;
pub mod save;
pub mod session;
pub mod settings;
pub mod specialist;

// Re-export commonly used items for easier access
pub use character::{CharacterSheet, Class};
pub use encounter::{EncounterType, PendingInteraction};
pub use error::{AIError, AppError, GameError};
pub use game_state::GameState;
pub use message::{Message, MessageType};
pub use orchestrator::{TurnEngine, TurnReport};
pub use quest::{QuestProgress, QuestStage, QuestType};
pub use specialist::Specialist;
