//! Canonical resume sections and the surface-form header vocabulary.
//!
//! Every header a resume might use maps onto one of a fixed, closed set of
//! canonical sections. The table is read-only, shared data: segmentation never
//! invents section names outside this set.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A canonical resume section. `Other` collects everything that appears
/// before the first recognized header or under no recognizable header at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Section {
    Projects,
    Certifications,
    Publications,
    Hobbies,
    References,
    Summary,
    Experience,
    Education,
    Skills,
    Other,
}

impl Section {
    pub fn as_str(self) -> &'static str {
        match self {
            Section::Projects => "projects",
            Section::Certifications => "certifications",
            Section::Publications => "publications",
            Section::Hobbies => "hobbies",
            Section::References => "references",
            Section::Summary => "summary",
            Section::Experience => "experience",
            Section::Education => "education",
            Section::Skills => "skills",
            Section::Other => "other",
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Surface-form header strings (lowercase) mapped to their canonical section.
/// Lines are fuzzy-matched against the surface forms, so OCR noise and minor
/// punctuation differences still classify.
pub const HEADER_VOCABULARY: &[(&str, Section)] = &[
    // Projects / Achievements
    ("projects", Section::Projects),
    ("personal projects", Section::Projects),
    ("academic projects", Section::Projects),
    ("major projects", Section::Projects),
    ("notable projects", Section::Projects),
    ("achievements", Section::Projects),
    ("awards & achievements", Section::Projects),
    ("recognitions", Section::Projects),
    // Certifications / Training
    ("certifications", Section::Certifications),
    ("professional certifications", Section::Certifications),
    ("courses & certifications", Section::Certifications),
    ("training", Section::Certifications),
    // Publications
    ("publications", Section::Publications),
    ("research publications", Section::Publications),
    ("papers", Section::Publications),
    ("articles", Section::Publications),
    // Hobbies / Interests
    ("hobbies", Section::Hobbies),
    ("interests", Section::Hobbies),
    ("personal interests", Section::Hobbies),
    ("extracurricular activities", Section::Hobbies),
    ("extracurriculars", Section::Hobbies),
    // References
    ("references", Section::References),
    ("professional references", Section::References),
    // Summary / Objective
    ("summary", Section::Summary),
    ("professional summary", Section::Summary),
    ("career summary", Section::Summary),
    ("objective", Section::Summary),
    ("career objective", Section::Summary),
    ("profile", Section::Summary),
    // Experience / Work
    ("experience", Section::Experience),
    ("work experience", Section::Experience),
    ("professional experience", Section::Experience),
    ("employment history", Section::Experience),
    ("relevant experience", Section::Experience),
    ("internships", Section::Experience),
    ("industry experience", Section::Experience),
    ("work history", Section::Experience),
    ("research experience", Section::Experience),
    // Education
    ("education", Section::Education),
    ("academic background", Section::Education),
    ("qualifications", Section::Education),
    ("educational qualifications", Section::Education),
    ("degrees", Section::Education),
    // Skills
    ("skills", Section::Skills),
    ("technical skills", Section::Skills),
    ("key skills", Section::Skills),
    ("core competencies", Section::Skills),
    ("programming skills", Section::Skills),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vocabulary_surface_forms_are_lowercase() {
        for (surface, _) in HEADER_VOCABULARY {
            assert_eq!(*surface, surface.to_lowercase(), "{surface}");
        }
    }

    #[test]
    fn test_vocabulary_never_maps_to_other() {
        // `other` is the fallback bucket, not a header anyone writes.
        assert!(HEADER_VOCABULARY
            .iter()
            .all(|(_, section)| *section != Section::Other));
    }

    #[test]
    fn test_section_serializes_lowercase() {
        let json = serde_json::to_string(&Section::Experience).unwrap();
        assert_eq!(json, r#""experience""#);
    }
}
