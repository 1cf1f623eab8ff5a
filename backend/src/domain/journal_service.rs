use anyhow::{Context, Result};
use chrono::Utc;
use tracing::{info, warn};

use crate::domain::commands::journal::AddJournalEntryCommand;
use crate::domain::errors::DomainError;
use crate::domain::models::journal::JournalEntry;
use crate::domain::profile_service::ProfileService;
use crate::domain::validation::{parse_date, required_text};
use crate::storage::JournalRepository;

const MAX_TITLE_LENGTH: usize = 200;
const MAX_CONTENT_LENGTH: usize = 10_000;

/// Service for the daily journal
#[derive(Clone)]
pub struct JournalService {
    repository: JournalRepository,
    profile_service: ProfileService,
}

impl JournalService {
    pub fn new(repository: JournalRepository, profile_service: ProfileService) -> Self {
        Self {
            repository,
            profile_service,
        }
    }

    /// Entries for the user's baby, most recent first
    pub async fn list_entries(&self, user_id: &str, limit: Option<u32>) -> Result<Vec<JournalEntry>> {
        let profile = self.profile_service.require_profile(user_id).await?;
        self.list_for_baby(&profile.id, limit).await
    }

    pub async fn list_for_baby(&self, baby_id: &str, limit: Option<u32>) -> Result<Vec<JournalEntry>> {
        self.repository
            .list_entries(baby_id, limit)
            .await
            .context("Failed to load journal entries")
    }

    pub async fn add_entry(&self, user_id: &str, command: AddJournalEntryCommand) -> Result<JournalEntry> {
        info!("Adding journal entry for user {}: {}", user_id, command.title);

        let title = required_text("Title", &command.title, MAX_TITLE_LENGTH)?;
        let content = required_text("Content", &command.content, MAX_CONTENT_LENGTH)?;
        let date = parse_date("Date", &command.date)?;
        let profile = self.profile_service.require_profile(user_id).await?;

        let entry = JournalEntry {
            id: JournalEntry::generate_id(),
            baby_id: profile.id,
            title,
            date,
            content,
            mood: command.mood,
            created_at: Utc::now(),
        };

        self.repository
            .store_entry(&entry)
            .await
            .context("Failed to store journal entry")?;

        info!("Created journal entry with ID: {}", entry.id);
        Ok(entry)
    }

    /// Delete an entry of the user's baby; ids of other babies are not found
    pub async fn delete_entry(&self, user_id: &str, entry_id: &str) -> Result<()> {
        info!("Deleting journal entry: {}", entry_id);

        let profile = self.profile_service.require_profile(user_id).await?;
        let deleted = self
            .repository
            .delete_entry(&profile.id, entry_id)
            .await
            .context("Failed to delete journal entry")?;

        if !deleted {
            warn!("Journal entry not found: {}", entry_id);
            return Err(DomainError::not_found("Journal entry", entry_id).into());
        }

        info!("Deleted journal entry: {}", entry_id);
        Ok(())
    }
}
