use crate::domain::commands::vaccination::{AddVaccinationCommand, MarkAdministeredCommand, ScheduleResult};
use crate::domain::models::vaccination::Vaccination as DomainVaccination;
use crate::domain::units::{format_long_date, format_short_date};
use crate::domain::vaccination_schedule::VaccinationCandidate;
use crate::io::rest::mappers::format_iso_date;
use shared::{
    CompletedVaccination, CreateVaccinationRequest, MarkAdministeredRequest, StandardScheduleEntry,
    StandardScheduleResponse, UpcomingVaccination, Vaccination as SharedVaccination, VaccinationResponse,
    VaccinationScheduleResponse,
};

/// Mapper to convert between shared vaccination DTOs and domain vaccinations.
pub struct VaccinationMapper;

impl VaccinationMapper {
    pub fn to_command(request: CreateVaccinationRequest) -> AddVaccinationCommand {
        AddVaccinationCommand {
            name: request.name,
            scheduled_date: request.scheduled_date,
            notes: request.notes,
        }
    }

    pub fn to_administer_command(vaccination_id: String, request: MarkAdministeredRequest) -> MarkAdministeredCommand {
        MarkAdministeredCommand {
            vaccination_id,
            administered_date: request.administered_date,
        }
    }

    pub fn to_dto(domain: DomainVaccination) -> SharedVaccination {
        SharedVaccination {
            id: domain.id,
            baby_id: domain.baby_id,
            name: domain.name,
            scheduled_date: format_iso_date(domain.scheduled_date),
            administered_date: domain.administered_date.map(format_iso_date),
            notes: domain.notes,
            created_at: domain.created_at.to_rfc3339(),
        }
    }

    pub fn to_schedule_response(result: ScheduleResult) -> VaccinationScheduleResponse {
        let upcoming = result
            .partition
            .upcoming
            .into_iter()
            .map(|entry| UpcomingVaccination {
                scheduled_text: format_long_date(entry.vaccination.scheduled_date),
                overdue: entry.overdue,
                vaccination: Self::to_dto(entry.vaccination),
            })
            .collect();

        let completed = result
            .partition
            .completed
            .into_iter()
            .map(|vaccination| CompletedVaccination {
                scheduled_text: format_short_date(vaccination.scheduled_date),
                administered_text: vaccination
                    .administered_date
                    .map(format_short_date)
                    .unwrap_or_default(),
                vaccination: Self::to_dto(vaccination),
            })
            .collect();

        VaccinationScheduleResponse {
            upcoming,
            completed,
            seeded_count: result.seeded_count,
        }
    }

    pub fn to_vaccination_response(domain: DomainVaccination, message: &str) -> VaccinationResponse {
        VaccinationResponse {
            vaccination: Self::to_dto(domain),
            success_message: message.to_string(),
        }
    }

    pub fn to_standard_schedule_response(candidates: Vec<VaccinationCandidate>) -> StandardScheduleResponse {
        StandardScheduleResponse {
            entries: candidates
                .into_iter()
                .map(|candidate| StandardScheduleEntry {
                    name: candidate.name,
                    scheduled_date: format_iso_date(candidate.scheduled_date),
                    offset_months: candidate.offset_months,
                    notes: candidate.notes,
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::vaccination_partition::partition_vaccinations;
    use chrono::{NaiveDate, Utc};

    fn vaccination(scheduled: NaiveDate, administered: Option<NaiveDate>) -> DomainVaccination {
        DomainVaccination {
            id: DomainVaccination::generate_id(),
            baby_id: "baby::1".to_string(),
            name: "DTaP".to_string(),
            scheduled_date: scheduled,
            administered_date: administered,
            notes: Some("First dose".to_string()),
            seed_offset_months: Some(2),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_schedule_response_texts() {
        let march = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
        let given = NaiveDate::from_ymd_opt(2024, 3, 18).unwrap();
        let today = NaiveDate::from_ymd_opt(2024, 3, 20).unwrap();
        let partition = partition_vaccinations(vec![vaccination(march, None), vaccination(march, Some(given))], today);

        let response = VaccinationMapper::to_schedule_response(ScheduleResult {
            partition,
            seeded_count: 0,
        });

        assert_eq!(response.upcoming.len(), 1);
        assert!(response.upcoming[0].overdue);
        assert_eq!(response.upcoming[0].scheduled_text, "March 15, 2024");
        assert_eq!(response.upcoming[0].vaccination.scheduled_date, "2024-03-15");
        assert_eq!(response.upcoming[0].vaccination.administered_date, None);

        assert_eq!(response.completed.len(), 1);
        assert_eq!(response.completed[0].scheduled_text, "Mar 15, 2024");
        assert_eq!(response.completed[0].administered_text, "Mar 18, 2024");
        assert_eq!(
            response.completed[0].vaccination.administered_date.as_deref(),
            Some("2024-03-18")
        );
    }
}
