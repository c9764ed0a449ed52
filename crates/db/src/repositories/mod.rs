mod programme_repo;
mod projet_repo;
mod user_repo;

pub use programme_repo::ProgrammeRepo;
pub use projet_repo::ProjetRepo;
pub use user_repo::UserRepo;
