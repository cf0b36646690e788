// Domain layer - Highscore board models
pub mod board;
pub mod entry;
