pub mod acquire_constants;
pub mod acquire_game;
pub mod acquire_game_state;
pub mod acquire_request;
pub mod acquire_response;
pub mod chain;
pub mod config;
pub mod error;
pub mod founder;
pub mod game_board;
pub mod merger;
pub mod player;
pub mod scoring;
pub mod tile;
pub mod tile_bag;
mod game_states;
