use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Baby profile. One profile per authenticated user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BabyProfile {
    pub id: String,
    /// Identity of the user that owns this profile
    pub user_id: String,
    pub name: String,
    /// Calendar date (YYYY-MM-DD)
    pub date_of_birth: String,
    pub gender: Gender,
    /// Birth weight in kilograms
    pub weight_at_birth: Option<f64>,
    /// Birth length in centimeters
    pub height_at_birth: Option<f64>,
    pub avatar_url: Option<String>,
    /// Mirrored from the latest growth record
    pub current_weight: Option<f64>,
    /// Mirrored from the latest growth record
    pub current_height: Option<f64>,
    pub created_at: String, // RFC 3339 timestamp
    pub updated_at: String, // RFC 3339 timestamp
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
    #[default]
    Other,
}

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
            Gender::Other => "other",
        }
    }
}

impl FromStr for Gender {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "male" => Ok(Gender::Male),
            "female" => Ok(Gender::Female),
            "other" => Ok(Gender::Other),
            _ => Err(ParseEnumError::new("gender", s)),
        }
    }
}

/// Request body for creating or updating the baby profile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaveProfileRequest {
    pub name: String,
    /// Calendar date (YYYY-MM-DD)
    pub date_of_birth: String,
    #[serde(default)]
    pub gender: Gender,
    pub weight_at_birth: Option<f64>,
    pub height_at_birth: Option<f64>,
    pub avatar_url: Option<String>,
}

/// `profile` is `None` when the user has not created a profile yet
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileResponse {
    pub profile: Option<BabyProfile>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaveProfileResponse {
    pub profile: BabyProfile,
    pub success_message: String,
}

/// Elapsed time since birth, bucketed for display.
///
/// Serialized as a tagged value, e.g. `{"unit":"weeks","value":3}` or
/// `{"unit":"years_months","years":2,"months":1}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "unit", rename_all = "snake_case")]
pub enum AgeDisplay {
    Days { value: u32 },
    Weeks { value: u32 },
    Months { value: u32 },
    YearsMonths { years: u32, months: u32 },
}

fn plural(value: u32) -> &'static str {
    if value == 1 {
        ""
    } else {
        "s"
    }
}

impl fmt::Display for AgeDisplay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            AgeDisplay::Days { value } => write!(f, "{} day{}", value, plural(value)),
            AgeDisplay::Weeks { value } => write!(f, "{} week{}", value, plural(value)),
            AgeDisplay::Months { value } => write!(f, "{} month{}", value, plural(value)),
            AgeDisplay::YearsMonths { years, months: 0 } => {
                write!(f, "{} year{}", years, plural(years))
            }
            AgeDisplay::YearsMonths { years, months } => write!(
                f,
                "{} year{} and {} month{}",
                years,
                plural(years),
                months,
                plural(months)
            ),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgeResponse {
    pub age: AgeDisplay,
    /// Human readable rendering, e.g. "2 years and 3 months"
    pub formatted: String,
}

/// A single growth measurement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GrowthRecord {
    pub id: String,
    pub baby_id: String,
    pub date: String,
    /// Kilograms
    pub weight: Option<f64>,
    /// Centimeters
    pub height: Option<f64>,
    /// Centimeters
    pub head_circumference: Option<f64>,
    pub notes: Option<String>,
    pub created_at: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateGrowthRecordRequest {
    pub date: String,
    pub weight: Option<f64>,
    pub height: Option<f64>,
    pub head_circumference: Option<f64>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GrowthRecordResponse {
    pub record: GrowthRecord,
    pub success_message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GrowthRecordListResponse {
    pub records: Vec<GrowthRecord>,
}

/// One point of the growth chart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GrowthChartPoint {
    /// Short axis label (MM/dd/yy)
    pub label: String,
    pub date: String,
    pub weight: Option<f64>,
    pub height: Option<f64>,
    pub head_circumference: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GrowthChartResponse {
    pub points: Vec<GrowthChartPoint>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MilestoneCategory {
    Motor,
    Cognitive,
    Social,
    Language,
    Other,
}

impl MilestoneCategory {
    pub const ALL: [MilestoneCategory; 5] = [
        MilestoneCategory::Motor,
        MilestoneCategory::Cognitive,
        MilestoneCategory::Social,
        MilestoneCategory::Language,
        MilestoneCategory::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MilestoneCategory::Motor => "motor",
            MilestoneCategory::Cognitive => "cognitive",
            MilestoneCategory::Social => "social",
            MilestoneCategory::Language => "language",
            MilestoneCategory::Other => "other",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            MilestoneCategory::Motor => "Motor Skills",
            MilestoneCategory::Cognitive => "Cognitive",
            MilestoneCategory::Social => "Social & Emotional",
            MilestoneCategory::Language => "Language",
            MilestoneCategory::Other => "Other",
        }
    }
}

impl FromStr for MilestoneCategory {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|category| category.as_str() == s)
            .ok_or_else(|| ParseEnumError::new("milestone category", s))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Milestone {
    pub id: String,
    pub baby_id: String,
    pub title: String,
    pub date: String,
    pub category: MilestoneCategory,
    pub description: Option<String>,
    pub created_at: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateMilestoneRequest {
    pub title: String,
    pub date: String,
    pub category: MilestoneCategory,
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MilestoneResponse {
    pub milestone: Milestone,
    pub success_message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MilestoneListResponse {
    pub milestones: Vec<Milestone>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MilestoneCategoryInfo {
    pub id: MilestoneCategory,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MilestoneCategoriesResponse {
    pub categories: Vec<MilestoneCategoryInfo>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mood {
    #[default]
    Happy,
    Excited,
    Tired,
    Sick,
    Fussy,
    Calm,
}

impl Mood {
    pub const ALL: [Mood; 6] = [
        Mood::Happy,
        Mood::Excited,
        Mood::Tired,
        Mood::Sick,
        Mood::Fussy,
        Mood::Calm,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Mood::Happy => "happy",
            Mood::Excited => "excited",
            Mood::Tired => "tired",
            Mood::Sick => "sick",
            Mood::Fussy => "fussy",
            Mood::Calm => "calm",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Mood::Happy => "Happy",
            Mood::Excited => "Excited",
            Mood::Tired => "Tired",
            Mood::Sick => "Sick",
            Mood::Fussy => "Fussy",
            Mood::Calm => "Calm",
        }
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            Mood::Happy => "😊",
            Mood::Excited => "🎉",
            Mood::Tired => "😴",
            Mood::Sick => "🤒",
            Mood::Fussy => "😣",
            Mood::Calm => "😌",
        }
    }
}

impl FromStr for Mood {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|mood| mood.as_str() == s)
            .ok_or_else(|| ParseEnumError::new("mood", s))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JournalEntry {
    pub id: String,
    pub baby_id: String,
    pub title: String,
    pub date: String,
    pub content: String,
    pub mood: Mood,
    pub mood_label: String,
    pub mood_emoji: String,
    pub created_at: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateJournalEntryRequest {
    pub title: String,
    pub date: String,
    pub content: String,
    #[serde(default)]
    pub mood: Mood,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JournalEntryResponse {
    pub entry: JournalEntry,
    pub success_message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JournalEntryListResponse {
    pub entries: Vec<JournalEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeleteJournalEntryResponse {
    pub deleted_id: String,
    pub success_message: String,
}

/// A vaccination record. `administered_date` being set is what makes it completed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vaccination {
    pub id: String,
    pub baby_id: String,
    pub name: String,
    pub scheduled_date: String,
    pub administered_date: Option<String>,
    pub notes: Option<String>,
    pub created_at: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpcomingVaccination {
    pub vaccination: Vaccination,
    /// Scheduled date is strictly before today
    pub overdue: bool,
    /// e.g. "March 15, 2024"
    pub scheduled_text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletedVaccination {
    pub vaccination: Vaccination,
    /// e.g. "Mar 15, 2024"
    pub scheduled_text: String,
    pub administered_text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VaccinationScheduleResponse {
    pub upcoming: Vec<UpcomingVaccination>,
    pub completed: Vec<CompletedVaccination>,
    /// Number of standard records inserted while serving this request
    pub seeded_count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateVaccinationRequest {
    pub name: String,
    pub scheduled_date: String,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MarkAdministeredRequest {
    /// Defaults to today when omitted
    pub administered_date: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VaccinationResponse {
    pub vaccination: Vaccination,
    pub success_message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StandardScheduleEntry {
    pub name: String,
    pub scheduled_date: String,
    pub offset_months: u32,
    pub notes: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StandardScheduleResponse {
    pub entries: Vec<StandardScheduleEntry>,
}

/// Everything the landing page shows in one round trip
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardResponse {
    pub has_profile: bool,
    pub profile: Option<BabyProfile>,
    pub age: Option<AgeDisplay>,
    pub age_text: Option<String>,
    pub birth_weight_text: Option<String>,
    pub birth_length_text: Option<String>,
    pub current_weight_text: Option<String>,
    pub current_height_text: Option<String>,
    pub latest_growth: Option<GrowthRecord>,
    pub recent_milestones: Vec<Milestone>,
    pub upcoming_vaccinations: Vec<Vaccination>,
    pub recent_journal_entries: Vec<JournalEntry>,
}

impl DashboardResponse {
    pub fn without_profile() -> Self {
        Self {
            has_profile: false,
            profile: None,
            age: None,
            age_text: None,
            birth_weight_text: None,
            birth_length_text: None,
            current_weight_text: None,
            current_height_text: None,
            latest_growth: None,
            recent_milestones: Vec::new(),
            upcoming_vaccinations: Vec::new(),
            recent_journal_entries: Vec::new(),
        }
    }
}

/// Error returned when a stored or submitted enum value is not recognised
#[derive(Debug, Clone, PartialEq)]
pub struct ParseEnumError {
    kind: &'static str,
    value: String,
}

impl ParseEnumError {
    fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_string(),
        }
    }
}

impl fmt::Display for ParseEnumError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Unknown {}: {}", self.kind, self.value)
    }
}

impl std::error::Error for ParseEnumError {}
