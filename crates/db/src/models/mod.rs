pub mod programme;
pub mod projet;
pub mod user;
