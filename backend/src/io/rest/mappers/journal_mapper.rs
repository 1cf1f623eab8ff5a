use crate::domain::commands::journal::AddJournalEntryCommand;
use crate::domain::models::journal::JournalEntry as DomainEntry;
use crate::io::rest::mappers::format_iso_date;
use shared::{
    CreateJournalEntryRequest, DeleteJournalEntryResponse, JournalEntry as SharedEntry, JournalEntryListResponse,
    JournalEntryResponse,
};

/// Mapper to convert between shared journal DTOs and domain journal entries.
pub struct JournalMapper;

impl JournalMapper {
    pub fn to_command(request: CreateJournalEntryRequest) -> AddJournalEntryCommand {
        AddJournalEntryCommand {
            title: request.title,
            date: request.date,
            content: request.content,
            mood: request.mood,
        }
    }

    pub fn to_dto(domain: DomainEntry) -> SharedEntry {
        SharedEntry {
            id: domain.id,
            baby_id: domain.baby_id,
            title: domain.title,
            date: format_iso_date(domain.date),
            content: domain.content,
            mood: domain.mood,
            mood_label: domain.mood.label().to_string(),
            mood_emoji: domain.mood.emoji().to_string(),
            created_at: domain.created_at.to_rfc3339(),
        }
    }

    pub fn to_list_response(entries: Vec<DomainEntry>) -> JournalEntryListResponse {
        JournalEntryListResponse {
            entries: entries.into_iter().map(Self::to_dto).collect(),
        }
    }

    pub fn to_entry_response(domain: DomainEntry) -> JournalEntryResponse {
        JournalEntryResponse {
            entry: Self::to_dto(domain),
            success_message: "Journal entry saved successfully".to_string(),
        }
    }

    pub fn to_delete_response(entry_id: String) -> DeleteJournalEntryResponse {
        DeleteJournalEntryResponse {
            deleted_id: entry_id,
            success_message: "Journal entry deleted successfully".to_string(),
        }
    }
}
