mod file_repo;
mod record;

pub use file_repo::FileHistoryRepository;
