//! Domain-level command and query types
//! These structs are used by services inside the domain layer and are **not**
//! exposed over the public API. The REST layer is responsible for mapping the
//! public DTOs defined in the `shared` crate to these internal types. Dates
//! arrive here as raw strings; services parse and validate them.

pub mod profile {
    use shared::Gender;

    /// Input for creating or updating the user's baby profile.
    #[derive(Debug, Clone)]
    pub struct SaveProfileCommand {
        pub name: String,
        pub date_of_birth: String,
        pub gender: Gender,
        pub weight_at_birth: Option<f64>,
        pub height_at_birth: Option<f64>,
        pub avatar_url: Option<String>,
    }
}

pub mod growth {
    /// Input for recording a growth measurement.
    #[derive(Debug, Clone)]
    pub struct AddGrowthRecordCommand {
        pub date: String,
        pub weight: Option<f64>,
        pub height: Option<f64>,
        pub head_circumference: Option<f64>,
        pub notes: Option<String>,
    }
}

pub mod milestone {
    use shared::MilestoneCategory;

    /// Input for recording a milestone.
    #[derive(Debug, Clone)]
    pub struct AddMilestoneCommand {
        pub title: String,
        pub date: String,
        pub category: MilestoneCategory,
        pub description: Option<String>,
    }

    /// Query parameters for listing milestones.
    #[derive(Debug, Clone, Default)]
    pub struct MilestoneListQuery {
        pub category: Option<MilestoneCategory>,
        pub limit: Option<u32>,
    }
}

pub mod journal {
    use shared::Mood;

    /// Input for writing a journal entry.
    #[derive(Debug, Clone)]
    pub struct AddJournalEntryCommand {
        pub title: String,
        pub date: String,
        pub content: String,
        pub mood: Mood,
    }
}

pub mod vaccination {
    use crate::domain::vaccination_partition::VaccinationPartition;

    /// Input for manually adding a vaccination to the schedule.
    #[derive(Debug, Clone)]
    pub struct AddVaccinationCommand {
        pub name: String,
        pub scheduled_date: String,
        pub notes: Option<String>,
    }

    /// Input for recording that a dose was given.
    #[derive(Debug, Clone)]
    pub struct MarkAdministeredCommand {
        pub vaccination_id: String,
        /// Defaults to today when absent
        pub administered_date: Option<String>,
    }

    /// Result of loading a baby's vaccination schedule.
    #[derive(Debug, Clone)]
    pub struct ScheduleResult {
        pub partition: VaccinationPartition,
        /// Rows inserted by seeding during this load; 0 when already seeded
        pub seeded_count: usize,
    }
}
