//! # Resume Composition
//!
//! Turns structured resume fields into the Markdown-like text the layout
//! engine consumes. The output is what a resume editor shows in its preview
//! pane, presentational `<div>` wrappers included; classification strips
//! them again.

use serde::{Deserialize, Serialize};

use crate::error::VitaeError;
use crate::model::{Document, Metadata};

/// Sections are separated by this many newlines.
const SECTION_SEPARATOR: &str = "\n\n\n\n\n\n";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ContactInfo {
    pub email: Option<String>,
    pub mobile: Option<String>,
    pub linkedin: Option<String>,
    /// Accepted for compatibility with saved resumes, not rendered.
    pub twitter: Option<String>,
}

/// An education, work, or project entry.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Entry {
    pub title: String,
    pub organization: String,
    pub start_date: String,
    pub end_date: Option<String>,
    pub description: String,
    /// Still ongoing: the date range ends in "Present".
    pub current: bool,
}

impl Entry {
    fn date_range(&self) -> String {
        match (&self.end_date, self.current) {
            (_, true) => format!("{} - Present", self.start_date),
            (Some(end), false) => format!("{} - {}", self.start_date, end),
            (None, false) => self.start_date.clone(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Resume {
    pub full_name: String,
    pub contact_info: ContactInfo,
    pub summary: Option<String>,
    pub skills: Option<String>,
    pub education: Vec<Entry>,
    pub experience: Vec<Entry>,
    pub projects: Vec<Entry>,
}

impl Resume {
    pub fn from_json(json: &str) -> Result<Self, VitaeError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Render every non-empty section, in resume order.
    pub fn to_markdown(&self) -> String {
        let sections = [
            self.contact_markdown(),
            non_blank(&self.summary)
                .map(|s| format!("## Professional Summary\n\n{}\n\n", s))
                .unwrap_or_default(),
            non_blank(&self.skills)
                .map(|s| format!("## Skills\n\n{}", s))
                .unwrap_or_default(),
            entries_to_markdown(&self.education, "Education"),
            entries_to_markdown(&self.experience, "Work Experience"),
            entries_to_markdown(&self.projects, "Projects"),
        ];
        sections
            .iter()
            .filter(|s| !s.is_empty())
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(SECTION_SEPARATOR)
    }

    /// The composed resume as a layout-ready document.
    pub fn to_document(&self) -> Document {
        Document::from_markdown(&self.to_markdown(), &self.full_name).with_metadata(Metadata {
            title: Some(format!("{} - Resume", self.full_name)),
            author: Some(self.full_name.clone()),
            subject: None,
        })
    }

    /// Name heading plus centered contact line. Empty when there is no
    /// way to contact the person.
    fn contact_markdown(&self) -> String {
        let c = &self.contact_info;
        let parts: Vec<&str> = [&c.email, &c.mobile, &c.linkedin]
            .into_iter()
            .filter_map(non_blank)
            .collect();
        if parts.is_empty() {
            return String::new();
        }
        format!(
            "## <div align=\"center\">{}</div>\n\n<div align=\"center\">\n\n{}\n\n</div>",
            self.full_name,
            parts.join(" | ")
        )
    }
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

fn entries_to_markdown(entries: &[Entry], heading: &str) -> String {
    if entries.is_empty() {
        return String::new();
    }
    let body = entries
        .iter()
        .map(|e| {
            format!(
                "### {} @ {}\n{}\n\n{}",
                e.title,
                e.organization,
                e.date_range(),
                e.description
            )
        })
        .collect::<Vec<_>>()
        .join("\n\n");
    format!("## {}\n\n{}", heading, body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::{Classifier, LineClass};

    fn sample() -> Resume {
        Resume::from_json(
            r#"{
                "fullName": "Jane Doe",
                "contactInfo": { "email": "jane@x.com", "mobile": "555-1234", "twitter": "@jd" },
                "summary": "Backend engineer.",
                "skills": "Rust, SQL",
                "experience": [
                    { "title": "Engineer", "organization": "Acme", "startDate": "Jan 2020",
                      "description": "- Built things", "current": true },
                    { "title": "Intern", "organization": "Initech", "startDate": "Jun 2019",
                      "endDate": "Aug 2019", "description": "Fixed bugs." }
                ]
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn contact_block_is_centered_markup() {
        let md = sample().to_markdown();
        assert!(md.starts_with("## <div align=\"center\">Jane Doe</div>\n\n<div align=\"center\">\n\njane@x.com | 555-1234\n\n</div>"));
        assert!(!md.contains("@jd"));
    }

    #[test]
    fn entries_render_with_date_ranges() {
        let md = sample().to_markdown();
        assert!(md.contains("## Work Experience\n\n### Engineer @ Acme\nJan 2020 - Present\n\n- Built things"));
        assert!(md.contains("### Intern @ Initech\nJun 2019 - Aug 2019\n\nFixed bugs."));
    }

    #[test]
    fn empty_sections_are_omitted() {
        let md = sample().to_markdown();
        assert!(!md.contains("## Education"));
        assert!(!md.contains("## Projects"));
        assert!(md.contains("## Professional Summary\n\nBackend engineer.\n\n"));
        assert!(md.contains(&format!("{}## Skills", SECTION_SEPARATOR)));
    }

    #[test]
    fn no_contact_parts_drops_header() {
        let resume = Resume {
            full_name: "Jane Doe".to_string(),
            skills: Some("Rust".to_string()),
            ..Default::default()
        };
        assert_eq!(resume.to_markdown(), "## Skills\n\nRust");
    }

    #[test]
    fn composed_document_classifies_as_resume() {
        let doc = sample().to_document();
        assert_eq!(doc.subject_name, "Jane Doe");
        let mut classifier = Classifier::new(&doc.subject_name);
        let classes: Vec<LineClass> = doc
            .lines
            .iter()
            .map(|l| classifier.classify(l).class)
            .filter(|c| *c != LineClass::Blank)
            .collect();
        assert_eq!(
            &classes[..5],
            &[
                LineClass::Title,
                LineClass::Contact,
                LineClass::Heading,
                LineClass::Body,
                LineClass::Heading,
            ]
        );
        assert!(classes.contains(&LineClass::Subheading));
        assert!(classes.contains(&LineClass::BulletOrEmphasis));
    }

    #[test]
    fn wrong_shape_is_parse_error() {
        let err = Resume::from_json(r#"{ "experience": "not a list" }"#).unwrap_err();
        assert!(matches!(err, VitaeError::Parse { .. }));
    }
}
