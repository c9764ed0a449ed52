pub mod auth;
pub mod programmes;
pub mod projets;
pub mod stats;
pub mod users;
