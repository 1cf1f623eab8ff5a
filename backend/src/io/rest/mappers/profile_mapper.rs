use crate::domain::commands::profile::SaveProfileCommand;
use crate::domain::models::profile::BabyProfile as DomainProfile;
use crate::domain::profile_service::SaveProfileResult;
use crate::io::rest::mappers::format_iso_date;
use shared::{AgeDisplay, AgeResponse, BabyProfile as SharedProfile, ProfileResponse, SaveProfileRequest, SaveProfileResponse};

/// Mapper to convert between shared profile DTOs and the domain profile.
pub struct ProfileMapper;

impl ProfileMapper {
    pub fn to_command(request: SaveProfileRequest) -> SaveProfileCommand {
        SaveProfileCommand {
            name: request.name,
            date_of_birth: request.date_of_birth,
            gender: request.gender,
            weight_at_birth: request.weight_at_birth,
            height_at_birth: request.height_at_birth,
            avatar_url: request.avatar_url,
        }
    }

    pub fn to_dto(domain: DomainProfile) -> SharedProfile {
        SharedProfile {
            id: domain.id,
            user_id: domain.user_id,
            name: domain.name,
            date_of_birth: format_iso_date(domain.date_of_birth),
            gender: domain.gender,
            weight_at_birth: domain.weight_at_birth,
            height_at_birth: domain.height_at_birth,
            avatar_url: domain.avatar_url,
            current_weight: domain.current_weight,
            current_height: domain.current_height,
            created_at: domain.created_at.to_rfc3339(),
            updated_at: domain.updated_at.to_rfc3339(),
        }
    }

    pub fn to_profile_response(domain: Option<DomainProfile>) -> ProfileResponse {
        ProfileResponse {
            profile: domain.map(Self::to_dto),
        }
    }

    pub fn to_save_response(result: SaveProfileResult) -> SaveProfileResponse {
        let success_message = if result.created {
            "Profile created successfully"
        } else {
            "Profile updated successfully"
        };
        SaveProfileResponse {
            profile: Self::to_dto(result.profile),
            success_message: success_message.to_string(),
        }
    }

    pub fn to_age_response(age: AgeDisplay) -> AgeResponse {
        AgeResponse {
            age,
            formatted: age.to_string(),
        }
    }
}
