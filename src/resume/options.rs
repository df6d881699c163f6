use crate::widgets::inputs::SelectOption;

pub const DEGREES: &[&str] = &[
    "High School Diploma",
    "Associate's Degree",
    "Bachelor's Degree",
    "Master's Degree",
    "MBA",
    "Ph.D.",
    "M.D.",
    "J.D.",
    "Certificate",
    "Other",
];

pub const SKILL_LEVELS: &[&str] = &["Beginner", "Intermediate", "Advanced", "Expert"];

pub const STARTER_SKILL_CATEGORIES: &[&str] = &[
    "Technical",
    "Programming",
    "Languages",
    "Soft Skills",
    "Tools",
    "Design",
    "Management",
    "Office Skills",
    "Certifications",
    "Other",
];

/// (value, label)
pub const INDUSTRIES: &[(&str, &str)] = &[
    ("Technology", "Technology"),
    ("Healthcare", "Healthcare"),
    ("Finance", "Finance"),
    ("Education", "Education"),
    ("Manufacturing", "Manufacturing"),
    ("Retail", "Retail"),
    ("Media", "Media & Entertainment"),
    ("Government", "Government"),
    ("Nonprofit", "Nonprofit"),
    ("Consulting", "Consulting"),
    ("Legal", "Legal"),
    ("Real Estate", "Real Estate"),
    ("Transportation", "Transportation & Logistics"),
    ("Energy", "Energy & Utilities"),
    ("Agriculture", "Agriculture"),
    ("Hospitality", "Hospitality & Tourism"),
    ("Construction", "Construction"),
    ("Telecommunications", "Telecommunications"),
    ("Other", "Other"),
];

pub const COMPANY_SIZES: &[(&str, &str)] = &[
    ("Startup", "Startup (1-50 employees)"),
    ("Small", "Small (51-200 employees)"),
    ("Medium", "Medium (201-1000 employees)"),
    ("Large", "Large (1001-5000 employees)"),
    ("Enterprise", "Enterprise (5001+ employees)"),
];

pub const JOB_LEVELS: &[(&str, &str)] = &[
    ("Entry Level", "Entry Level"),
    ("Junior", "Junior"),
    ("Mid-Level", "Mid-Level"),
    ("Senior", "Senior"),
    ("Lead", "Lead"),
    ("Manager", "Manager"),
    ("Director", "Director"),
    ("Executive", "Executive (VP, C-Suite)"),
];

pub fn plain(values: &[&str]) -> Vec<SelectOption> {
    values.iter().copied().map(SelectOption::same).collect()
}

pub fn labelled(pairs: &[(&str, &str)]) -> Vec<SelectOption> {
    pairs
        .iter()
        .map(|(value, label)| SelectOption::new(*value, *label))
        .collect()
}
