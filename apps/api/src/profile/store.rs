use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{info, warn};

use crate::profile::models::{EducationEntry, ExperienceEntry, LanguageSkill, PersonalInfo, Profile};

/// Profile compiled into the binary. `PROFILE_PATH` replaces it at startup.
const EMBEDDED_PROFILE: &str = include_str!("../../data/profile.json");

#[derive(Debug, Error)]
pub enum ProfileError {
    #[error("Failed to read profile file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Profile JSON is invalid: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Profile field '{0}' must not be blank")]
    MissingField(String),
}

/// Read-only résumé data shared by the renderer and the assistant.
///
/// Built once at startup and handed around as `Arc<ProfileStore>`. There is
/// no mutable accessor; everything downstream is a projection.
#[derive(Debug)]
pub struct ProfileStore {
    profile: Profile,
    /// Profile serialized once for prompt building. Resent verbatim every turn.
    context_json: String,
}

impl ProfileStore {
    /// Loads the override file if one is given, otherwise the embedded profile.
    pub fn load(path: Option<&Path>) -> Result<Self, ProfileError> {
        match path {
            Some(path) => {
                let raw = std::fs::read_to_string(path).map_err(|source| ProfileError::Io {
                    path: path.to_path_buf(),
                    source,
                })?;
                let store = Self::from_json(&raw)?;
                info!("Loaded profile from {}", path.display());
                Ok(store)
            }
            None => Self::embedded(),
        }
    }

    pub fn embedded() -> Result<Self, ProfileError> {
        Self::from_json(EMBEDDED_PROFILE)
    }

    pub fn from_json(raw: &str) -> Result<Self, ProfileError> {
        let profile: Profile = serde_json::from_str(raw)?;
        Self::new(profile)
    }

    pub fn new(profile: Profile) -> Result<Self, ProfileError> {
        check_presence(&profile)?;
        let context_json = serde_json::to_string(&profile)?;
        Ok(Self {
            profile,
            context_json,
        })
    }

    pub fn profile(&self) -> &Profile {
        &self.profile
    }

    pub fn personal_info(&self) -> &PersonalInfo {
        &self.profile.personal_info
    }

    pub fn experience(&self) -> &[ExperienceEntry] {
        &self.profile.experience
    }

    pub fn education(&self) -> &[EducationEntry] {
        &self.profile.education
    }

    pub fn skills(&self) -> &[String] {
        &self.profile.skills
    }

    pub fn languages(&self) -> &[LanguageSkill] {
        &self.profile.languages
    }

    pub fn context_json(&self) -> &str {
        &self.context_json
    }
}

fn require(value: &str, field: impl Into<String>) -> Result<(), ProfileError> {
    if value.trim().is_empty() {
        Err(ProfileError::MissingField(field.into()))
    } else {
        Ok(())
    }
}

/// Presence checks only. Periods, durations and ordering are taken as-is.
fn check_presence(profile: &Profile) -> Result<(), ProfileError> {
    let info = &profile.personal_info;
    require(&info.name, "personalInfo.name")?;
    for (field, value) in [
        ("title", &info.title),
        ("summary", &info.summary),
        ("linkedin", &info.linkedin),
    ] {
        if value.trim().is_empty() {
            warn!("Profile field personalInfo.{field} is blank");
        }
    }

    for (i, entry) in profile.experience.iter().enumerate() {
        require(&entry.company, format!("experience[{i}].company"))?;
        require(&entry.role, format!("experience[{i}].role"))?;
    }
    for (i, entry) in profile.education.iter().enumerate() {
        require(&entry.institution, format!("education[{i}].institution"))?;
        require(&entry.degree, format!("education[{i}].degree"))?;
    }
    for (i, lang) in profile.languages.iter().enumerate() {
        require(&lang.name, format!("languages[{i}].name"))?;
    }
    Ok(())
}
