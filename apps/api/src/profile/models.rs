use serde::{Deserialize, Serialize};

/// Proficiency label that earns a full language bar. Every other label is
/// drawn at the partial width.
pub const NATIVE_PROFICIENCY: &str = "Nativo";
pub const NATIVE_FILL_PERCENT: u8 = 100;
pub const PARTIAL_FILL_PERCENT: u8 = 30;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PersonalInfo {
    pub name: String,
    pub title: String,
    pub location: String,
    /// Contact link without scheme, e.g. `www.linkedin.com/in/someone`.
    pub linkedin: String,
    pub summary: String,
}

impl PersonalInfo {
    /// Absolute URL for the contact link.
    pub fn linkedin_url(&self) -> String {
        let link = self.linkedin.trim();
        if link.starts_with("http://") || link.starts_with("https://") {
            link.to_string()
        } else {
            format!("https://{link}")
        }
    }

    /// Up to two uppercase initials for the sidebar monogram.
    pub fn initials(&self) -> String {
        self.name
            .split_whitespace()
            .filter_map(|word| word.chars().next())
            .flat_map(char::to_uppercase)
            .take(2)
            .collect()
    }

    pub fn first_name(&self) -> &str {
        self.name.split_whitespace().next().unwrap_or_default()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExperienceEntry {
    pub company: String,
    pub role: String,
    /// Display label such as "Junio de 2023 - Presente". Never parsed.
    pub period: String,
    pub duration: String,
    pub location: String,
    pub description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EducationEntry {
    pub institution: String,
    pub degree: String,
    pub period: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LanguageSkill {
    pub name: String,
    pub proficiency: String,
}

impl LanguageSkill {
    /// Two-bucket heuristic: native speakers get a full bar, everyone else 30%.
    pub fn fill_percent(&self) -> u8 {
        if self.proficiency == NATIVE_PROFICIENCY {
            NATIVE_FILL_PERCENT
        } else {
            PARTIAL_FILL_PERCENT
        }
    }
}

/// The résumé as stored on disk. Field order and casing follow the data file.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub personal_info: PersonalInfo,
    pub experience: Vec<ExperienceEntry>,
    pub education: Vec<EducationEntry>,
    /// Rendered in order; duplicates are kept.
    pub skills: Vec<String>,
    pub languages: Vec<LanguageSkill>,
}
