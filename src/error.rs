use thiserror::Error;

// Enum for handling various application-level errors.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("AI error: {0}")]
    AI(#[from] AIError), // Errors related to the generative layer.

    #[error("Game error: {0}")]
    Game(#[from] GameError), // Errors specific to game logic or state.

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error), // Errors related to data serialization.

    #[error("IO error: {0}")]
    IO(#[from] std::io::Error), // Input/output errors.

    #[error("No current game")]
    NoCurrentGame, // Error when no game session is active.
}

// Enum for game-specific errors.
#[derive(Debug, Error)]
pub enum GameError {
    #[error("Invalid game state: {0}")]
    InvalidGameState(String), // Error for invalid game state conditions.

    #[error("No active quest")]
    NoActiveQuest, // Error when a turn is taken without a quest in progress.

    #[error("Unknown catalog entry: {0}")]
    UnknownCatalogEntry(String), // Error when a monster/item lookup misses.
}

// Errors related to the generative layer are separated into their own enum for clarity.
#[derive(Debug, Error)]
pub enum AIError {
    #[error("OpenAI API error: {0}")]
    OpenAI(#[from] async_openai::error::OpenAIError), // Errors from the OpenAI API.

    #[error("Timeout occurred")]
    Timeout, // Error when a generative call exceeds its time limit.

    #[error("No message found")]
    NoMessageFound, // Error when expected message content is not found.

    #[error("Failed to parse model response: {0}")]
    ResponseParseError(String), // Error during parsing of structured model output.
}

impl From<serde_json::Error> for AIError {
    fn from(err: serde_json::Error) -> AIError {
        AIError::ResponseParseError(err.to_string())
    }
}
