use crate::domain::commands::growth::AddGrowthRecordCommand;
use crate::domain::growth_service::ChartPoint;
use crate::domain::models::growth::GrowthRecord as DomainRecord;
use crate::io::rest::mappers::format_iso_date;
use shared::{
    CreateGrowthRecordRequest, GrowthChartPoint, GrowthChartResponse, GrowthRecord as SharedRecord,
    GrowthRecordListResponse, GrowthRecordResponse,
};

/// Mapper to convert between shared growth DTOs and domain growth records.
pub struct GrowthMapper;

impl GrowthMapper {
    pub fn to_command(request: CreateGrowthRecordRequest) -> AddGrowthRecordCommand {
        AddGrowthRecordCommand {
            date: request.date,
            weight: request.weight,
            height: request.height,
            head_circumference: request.head_circumference,
            notes: request.notes,
        }
    }

    pub fn to_dto(domain: DomainRecord) -> SharedRecord {
        SharedRecord {
            id: domain.id,
            baby_id: domain.baby_id,
            date: format_iso_date(domain.date),
            weight: domain.weight,
            height: domain.height,
            head_circumference: domain.head_circumference,
            notes: domain.notes,
            created_at: domain.created_at.to_rfc3339(),
        }
    }

    pub fn to_list_response(records: Vec<DomainRecord>) -> GrowthRecordListResponse {
        GrowthRecordListResponse {
            records: records.into_iter().map(Self::to_dto).collect(),
        }
    }

    pub fn to_record_response(domain: DomainRecord) -> GrowthRecordResponse {
        GrowthRecordResponse {
            record: Self::to_dto(domain),
            success_message: "Growth record added successfully".to_string(),
        }
    }

    pub fn to_chart_response(points: Vec<ChartPoint>) -> GrowthChartResponse {
        GrowthChartResponse {
            points: points
                .into_iter()
                .map(|point| GrowthChartPoint {
                    label: point.label,
                    date: format_iso_date(point.date),
                    weight: point.weight,
                    height: point.height,
                    head_circumference: point.head_circumference,
                })
                .collect(),
        }
    }
}
