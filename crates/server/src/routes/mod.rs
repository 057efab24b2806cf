pub mod functions;
pub mod health;
pub mod matches;
pub mod matchmaking;
