pub mod fs;
pub mod history;

pub use history::FileHistoryRepository;
