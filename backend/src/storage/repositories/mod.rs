// Repository modules
pub mod growth_repository;
pub mod journal_repository;
pub mod milestone_repository;
pub mod profile_repository;
pub mod vaccination_repository;

// Re-export repository types
pub use growth_repository::GrowthRepository;
pub use journal_repository::JournalRepository;
pub use milestone_repository::MilestoneRepository;
pub use profile_repository::ProfileRepository;
pub use vaccination_repository::VaccinationRepository;
