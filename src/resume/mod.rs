//! Typed view of the resume record.
//!
//! The wizard accumulates a flat [`FormRecord`] (`fullName`, `education`,
//! `skills`, `targetJobTitle`, ...). These types read and write that same
//! shape through serde, so the record stays the single source of truth.

pub mod options;

use crate::core::{FormRecord, Value};
use serde::{Deserialize, Deserializer, Serialize};

pub const PRESENT: &str = "Present";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PersonalInfo {
    pub full_name: String,
    pub email: String,
    #[serde(deserialize_with = "lenient_text")]
    pub phone: String,
    pub location: String,
    pub linked_in: String,
    pub website: String,
    pub summary: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Education {
    pub id: String,
    pub school: String,
    pub location: String,
    pub degree: String,
    pub field_of_study: String,
    pub start_date: String,
    pub end_date: String,
    pub current: bool,
    #[serde(deserialize_with = "lenient_text")]
    pub gpa: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Experience {
    pub id: String,
    pub company: String,
    pub job_title: String,
    pub location: String,
    pub start_date: String,
    pub end_date: String,
    pub current: bool,
    pub description: String,
    pub bullets: Vec<String>,
}

impl Default for Experience {
    fn default() -> Self {
        Self {
            id: String::new(),
            company: String::new(),
            job_title: String::new(),
            location: String::new(),
            start_date: String::new(),
            end_date: String::new(),
            current: false,
            description: String::new(),
            bullets: vec![String::new()],
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Skill {
    pub id: String,
    pub name: String,
    pub category: String,
    pub level: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct JobTarget {
    pub target_job_title: String,
    pub target_industry: String,
    pub target_company_size: String,
    pub target_job_level: String,
    pub job_description: String,
    pub key_skills_to_highlight: String,
    pub additional_notes: String,
}

/// Every section the wizard collects, read from the flat record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ResumeData {
    #[serde(flatten)]
    pub personal: PersonalInfo,
    pub education: Vec<Education>,
    pub experience: Vec<Experience>,
    pub skills: Vec<Skill>,
    pub skill_categories: Vec<String>,
    #[serde(flatten)]
    pub job_target: JobTarget,
}

impl ResumeData {
    pub fn from_record(record: &FormRecord) -> Result<Self, serde_json::Error> {
        record.deserialize_into()
    }

    pub fn to_record(&self) -> Result<FormRecord, serde_json::Error> {
        FormRecord::from_serializable(self)
    }

    pub fn profile(&self) -> ResumeProfile {
        ResumeProfile {
            full_name: self.personal.full_name.clone(),
            email: self.personal.email.clone(),
            phone: self.personal.phone.clone(),
            location: self.personal.location.clone(),
            linked_in: self.personal.linked_in.clone(),
            website: self.personal.website.clone(),
            summary: self.personal.summary.clone(),
            education: self.education.clone(),
            experience: self.experience.clone(),
            skills: self.skills.clone(),
        }
    }
}

/// Resume as shown back to the user after generation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ResumeProfile {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub location: String,
    pub linked_in: String,
    pub website: String,
    pub summary: String,
    pub education: Vec<Education>,
    pub experience: Vec<Experience>,
    pub skills: Vec<Skill>,
}

/// Converts a serde type into a record [`Value`].
pub fn to_value<T: Serialize>(value: &T) -> Result<Value, serde_json::Error> {
    serde_json::from_value(serde_json::to_value(value)?)
}

/// Reads `key` from the record as `T`, logging and falling back to the
/// default when the stored value has the wrong shape.
pub fn read_section<T>(record: &FormRecord, key: &str) -> T
where
    T: serde::de::DeserializeOwned + Default,
{
    match record.field::<T>(key) {
        Ok(Some(value)) => value,
        Ok(None) => T::default(),
        Err(error) => {
            tracing::warn!(key, %error, "ignoring malformed record section");
            T::default()
        }
    }
}

/// Partial record holding `value` under `key`.
pub fn section_record<T: Serialize>(key: &str, value: &T) -> FormRecord {
    match to_value(value) {
        Ok(value) => FormRecord::new().with(key, value),
        Err(error) => {
            tracing::warn!(key, %error, "failed to encode record section");
            FormRecord::new()
        }
    }
}

/// Accepts numbers and booleans where text is expected; seeded data often
/// stores a GPA or phone number as a number.
fn lenient_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::Null => String::new(),
        serde_json::Value::String(text) => text,
        serde_json::Value::Number(number) => number_text(&number),
        other => other.to_string(),
    })
}

/// Whole numbers print without a fraction, matching how fields display them.
fn number_text(number: &serde_json::Number) -> String {
    match number.as_f64() {
        Some(value) if number.is_f64() => value.to_string(),
        _ => number.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flat_record_reads_as_typed_sections() {
        let record: FormRecord = serde_json::from_str(
            r#"{
                "fullName": "Jane Doe",
                "email": "jane@example.com",
                "linkedIn": "https://linkedin.com/in/jane",
                "education": [{"id": "edu-1", "school": "MIT", "gpa": 3.9, "current": true}],
                "skills": [{"id": "s-1", "name": "Rust", "category": "Programming"}],
                "targetJobTitle": "Engineer",
                "unrelated": 42
            }"#,
        )
        .expect("record");

        let data = ResumeData::from_record(&record).expect("resume data");
        assert_eq!(data.personal.full_name, "Jane Doe");
        assert_eq!(data.personal.linked_in, "https://linkedin.com/in/jane");
        assert_eq!(data.education[0].gpa, "3.9");
        assert!(data.education[0].current);
        assert_eq!(data.skills[0].name, "Rust");
        assert_eq!(data.job_target.target_job_title, "Engineer");
        assert!(data.experience.is_empty());
    }

    #[test]
    fn whole_numbers_decode_without_a_fraction() {
        let mut record = FormRecord::new();
        record.insert("phone", Value::Number(5551234.0));
        record.insert(
            "education",
            serde_json::from_str::<Value>(r#"[{"id": "edu-1", "gpa": 4}]"#).expect("education"),
        );

        let data = ResumeData::from_record(&record).expect("resume data");
        assert_eq!(data.personal.phone, "5551234");
        assert_eq!(data.education[0].gpa, "4");
        assert_eq!(
            Value::Number(5551234.0).to_text_scalar().as_deref(),
            Some(data.personal.phone.as_str())
        );

        let written = section_record("education", &data.education);
        let reread: Vec<Education> = read_section(&written, "education");
        assert_eq!(reread[0].gpa, "4");
    }

    #[test]
    fn typed_data_writes_camel_case_keys() {
        let mut data = ResumeData::default();
        data.personal.full_name = "Jane".to_string();
        data.job_target.job_description = "Build things".to_string();

        let record = data.to_record().expect("record");
        assert_eq!(record.text("fullName"), Some("Jane"));
        assert_eq!(record.text("jobDescription"), Some("Build things"));
        assert!(record.contains_key("skillCategories"));
    }

    #[test]
    fn malformed_section_falls_back_to_default() {
        let record = FormRecord::new().with("education", "not a list");
        let education: Vec<Education> = read_section(&record, "education");
        assert!(education.is_empty());
    }

    #[test]
    fn new_experience_has_one_bullet_slot() {
        assert_eq!(Experience::default().bullets, vec![String::new()]);
    }
}
