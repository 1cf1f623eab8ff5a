use anyhow::{Context, Result};
use chrono::{NaiveDate, Utc};
use tracing::info;

use crate::domain::commands::growth::AddGrowthRecordCommand;
use crate::domain::errors::DomainError;
use crate::domain::models::growth::GrowthRecord;
use crate::domain::profile_service::ProfileService;
use crate::domain::units::format_chart_date;
use crate::domain::validation::{optional_text, parse_date, positive_measurement};
use crate::storage::GrowthRepository;

/// One point of the growth chart
#[derive(Debug, Clone, PartialEq)]
pub struct ChartPoint {
    /// `MM/dd/yy` axis label
    pub label: String,
    pub date: NaiveDate,
    pub weight: Option<f64>,
    pub height: Option<f64>,
    pub head_circumference: Option<f64>,
}

/// Service for growth measurements
#[derive(Clone)]
pub struct GrowthService {
    repository: GrowthRepository,
    profile_service: ProfileService,
}

impl GrowthService {
    pub fn new(repository: GrowthRepository, profile_service: ProfileService) -> Self {
        Self {
            repository,
            profile_service,
        }
    }

    /// All records for the user's baby, oldest first
    pub async fn list_records(&self, user_id: &str) -> Result<Vec<GrowthRecord>> {
        let profile = self.profile_service.require_profile(user_id).await?;
        let records = self
            .repository
            .list_records(&profile.id)
            .await
            .context("Failed to load growth records")?;
        info!("Found {} growth records for baby {}", records.len(), profile.id);
        Ok(records)
    }

    /// Record a measurement and refresh the profile's current measurements
    pub async fn add_record(&self, user_id: &str, command: AddGrowthRecordCommand) -> Result<GrowthRecord> {
        info!("Adding growth record for user {}: date={}", user_id, command.date);

        let date = parse_date("Date", &command.date)?;
        let weight = positive_measurement("Weight", command.weight)?;
        let height = positive_measurement("Height", command.height)?;
        let head_circumference = positive_measurement("Head circumference", command.head_circumference)?;
        if weight.is_none() && height.is_none() && head_circumference.is_none() {
            return Err(DomainError::validation("At least one measurement is required").into());
        }

        let profile = self.profile_service.require_profile(user_id).await?;
        let record = GrowthRecord {
            id: GrowthRecord::generate_id(),
            baby_id: profile.id.clone(),
            date,
            weight,
            height,
            head_circumference,
            notes: optional_text(command.notes),
            created_at: Utc::now(),
        };

        self.repository
            .store_record(&record)
            .await
            .context("Failed to store growth record")?;
        self.refresh_current_measurements(&profile.id).await?;

        info!("Created growth record {} for baby {}", record.id, profile.id);
        Ok(record)
    }

    /// Chart points in date order
    pub async fn chart_series(&self, user_id: &str) -> Result<Vec<ChartPoint>> {
        let records = self.list_records(user_id).await?;
        Ok(records
            .into_iter()
            .map(|record| ChartPoint {
                label: format_chart_date(record.date),
                date: record.date,
                weight: record.weight,
                height: record.height,
                head_circumference: record.head_circumference,
            })
            .collect())
    }

    /// Most recent record by date, if any
    pub async fn latest_record(&self, baby_id: &str) -> Result<Option<GrowthRecord>> {
        self.repository
            .latest_record(baby_id)
            .await
            .context("Failed to load latest growth record")
    }

    /// Mirror the most recent known weight and height onto the profile.
    /// A record that skipped a measurement does not erase an earlier one.
    async fn refresh_current_measurements(&self, baby_id: &str) -> Result<()> {
        let records = self
            .repository
            .list_records(baby_id)
            .await
            .context("Failed to load growth records")?;
        let weight = records.iter().rev().find_map(|r| r.weight);
        let height = records.iter().rev().find_map(|r| r.height);

        self.profile_service
            .repository()
            .update_current_measurements(baby_id, weight, height)
            .await
            .context("Failed to update current measurements")
    }
}
