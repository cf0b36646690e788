// Application layer - Use cases and repository contracts
pub mod board_repository;
pub mod board_service;
