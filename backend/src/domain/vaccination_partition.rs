//! Upcoming / completed split of a baby's vaccinations.

use chrono::NaiveDate;

use super::models::vaccination::Vaccination;

#[derive(Debug, Clone, PartialEq)]
pub struct UpcomingEntry {
    pub vaccination: Vaccination,
    pub overdue: bool,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct VaccinationPartition {
    pub upcoming: Vec<UpcomingEntry>,
    pub completed: Vec<Vaccination>,
}

/// Split on presence of the administered date, keeping input order within
/// each side. An upcoming record is overdue when its scheduled date is
/// strictly before `today`.
pub fn partition_vaccinations(records: Vec<Vaccination>, today: NaiveDate) -> VaccinationPartition {
    let mut partition = VaccinationPartition::default();
    for vaccination in records {
        if vaccination.is_administered() {
            partition.completed.push(vaccination);
        } else {
            let overdue = vaccination.scheduled_date < today;
            partition.upcoming.push(UpcomingEntry { vaccination, overdue });
        }
    }
    partition
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use std::collections::HashSet;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn vaccination(id: &str, scheduled: &str, administered: Option<&str>) -> Vaccination {
        Vaccination {
            id: id.to_string(),
            baby_id: "baby::1".to_string(),
            name: format!("Vaccine {}", id),
            scheduled_date: date(scheduled),
            administered_date: administered.map(date),
            notes: None,
            seed_offset_months: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_partition_preserves_order_and_covers_input() {
        let records = vec![
            vaccination("a", "2024-01-15", Some("2024-01-15")),
            vaccination("b", "2024-02-15", None),
            vaccination("c", "2024-03-15", Some("2024-03-20")),
            vaccination("d", "2024-03-15", None),
            vaccination("e", "2024-05-15", None),
        ];
        let partition = partition_vaccinations(records.clone(), date("2024-03-15"));

        let upcoming: Vec<&str> = partition.upcoming.iter().map(|u| u.vaccination.id.as_str()).collect();
        let completed: Vec<&str> = partition.completed.iter().map(|v| v.id.as_str()).collect();
        assert_eq!(upcoming, vec!["b", "d", "e"]);
        assert_eq!(completed, vec!["a", "c"]);

        let upcoming_ids: HashSet<&str> = upcoming.iter().copied().collect();
        let completed_ids: HashSet<&str> = completed.iter().copied().collect();
        assert!(upcoming_ids.is_disjoint(&completed_ids));
        let all: HashSet<&str> = records.iter().map(|v| v.id.as_str()).collect();
        assert_eq!(&upcoming_ids | &completed_ids, all);
    }

    #[test]
    fn test_overdue_is_strictly_before_today() {
        let records = vec![
            vaccination("past", "2024-03-14", None),
            vaccination("today", "2024-03-15", None),
            vaccination("future", "2024-03-16", None),
            vaccination("done", "2024-01-01", Some("2024-01-02")),
        ];
        let partition = partition_vaccinations(records, date("2024-03-15"));

        let flags: Vec<(&str, bool)> = partition
            .upcoming
            .iter()
            .map(|u| (u.vaccination.id.as_str(), u.overdue))
            .collect();
        assert_eq!(flags, vec![("past", true), ("today", false), ("future", false)]);
        assert_eq!(partition.completed.len(), 1);
    }

    #[test]
    fn test_empty_input() {
        let partition = partition_vaccinations(Vec::new(), date("2024-03-15"));
        assert!(partition.upcoming.is_empty());
        assert!(partition.completed.is_empty());
    }
}
