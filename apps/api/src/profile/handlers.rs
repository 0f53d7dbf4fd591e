use axum::{extract::State, Json};
use serde::Serialize;

use crate::profile::models::{EducationEntry, ExperienceEntry, PersonalInfo, Profile};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct LanguageView {
    pub name: String,
    pub proficiency: String,
    pub fill_percent: u8,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileResponse {
    pub personal_info: PersonalInfo,
    pub experience: Vec<ExperienceEntry>,
    pub education: Vec<EducationEntry>,
    pub skills: Vec<String>,
    pub languages: Vec<LanguageView>,
}

impl From<&Profile> for ProfileResponse {
    fn from(profile: &Profile) -> Self {
        Self {
            personal_info: profile.personal_info.clone(),
            experience: profile.experience.clone(),
            education: profile.education.clone(),
            skills: profile.skills.clone(),
            languages: profile
                .languages
                .iter()
                .map(|lang| LanguageView {
                    name: lang.name.clone(),
                    proficiency: lang.proficiency.clone(),
                    fill_percent: lang.fill_percent(),
                })
                .collect(),
        }
    }
}

/// GET /api/v1/profile
///
/// The stored profile as-is, with each language's bar width precomputed.
pub async fn handle_get_profile(State(state): State<AppState>) -> Json<ProfileResponse> {
    Json(ProfileResponse::from(state.profile.profile()))
}
