use crate::resume::{Education, Experience, PRESENT, ResumeData, Skill};
use serde::{Deserialize, Serialize};

/// Backend view of the candidate. Sections are flattened to text the
/// generator can quote directly.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentInfo {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub location: String,
    #[serde(rename = "linkedIn")]
    pub linked_in: String,
    pub website: String,
    pub summary: String,
    pub job_target: String,
    pub education: String,
    pub experience: String,
    pub skills: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResumeRequest {
    pub student_info: StudentInfo,
    pub job_description: String,
}

impl ResumeRequest {
    pub fn from_resume(data: &ResumeData) -> Self {
        Self {
            student_info: StudentInfo::from_resume(data),
            job_description: data.job_target.job_description.clone(),
        }
    }
}

impl StudentInfo {
    pub fn from_resume(data: &ResumeData) -> Self {
        let personal = &data.personal;
        Self {
            name: personal.full_name.clone(),
            email: personal.email.clone(),
            phone: personal.phone.clone(),
            location: personal.location.clone(),
            linked_in: personal.linked_in.clone(),
            website: personal.website.clone(),
            summary: personal.summary.clone(),
            job_target: data.job_target.target_job_title.clone(),
            education: join_blocks(data.education.iter().map(education_text)),
            experience: join_blocks(data.experience.iter().map(experience_text)),
            skills: data
                .skills
                .iter()
                .map(skill_text)
                .collect::<Vec<_>>()
                .join(", "),
        }
    }
}

fn join_blocks(blocks: impl Iterator<Item = String>) -> String {
    blocks.collect::<Vec<_>>().join("\n\n")
}

fn end_date(current: bool, end_date: &str) -> &str {
    if current { PRESENT } else { end_date }
}

pub fn education_text(edu: &Education) -> String {
    let mut text = format!(
        "{} in {}, {}, {} - {}",
        edu.degree,
        edu.field_of_study,
        edu.school,
        edu.start_date,
        end_date(edu.current, &edu.end_date)
    );
    if !edu.gpa.is_empty() {
        text.push_str(&format!(", GPA: {}", edu.gpa));
    }
    if !edu.description.is_empty() {
        text.push('\n');
        text.push_str(&edu.description);
    }
    text
}

/// Blank bullet slots are left out.
pub fn experience_text(exp: &Experience) -> String {
    let mut text = format!(
        "{} at {}, {} - {}",
        exp.job_title,
        exp.company,
        exp.start_date,
        end_date(exp.current, &exp.end_date)
    );
    if !exp.location.is_empty() {
        text.push_str(", ");
        text.push_str(&exp.location);
    }
    if !exp.description.is_empty() {
        text.push('\n');
        text.push_str(&exp.description);
    }
    for bullet in exp.bullets.iter().filter(|b| !b.trim().is_empty()) {
        text.push_str("\n- ");
        text.push_str(bullet);
    }
    text
}

pub fn skill_text(skill: &Skill) -> String {
    if skill.level.is_empty() {
        skill.name.clone()
    } else {
        format!("{} ({})", skill.name, skill.level)
    }
}
