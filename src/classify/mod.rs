//! # Line Classification
//!
//! Every source line is assigned exactly one [`LineClass`] from its
//! syntactic prefix, the subject's name, and the classifier's state.
//!
//! The only context carried between lines is whether the previous title
//! is still waiting for its contact line. That is an explicit state
//! machine so transitions can be tested without rendering anything:
//!
//! ```text
//! AwaitingTitle --title--> AwaitingContact --non-empty--> Body
//!                              |    ^
//!                              +----+ blank
//! any state --title--> AwaitingContact
//! ```

pub mod markup;

pub use markup::strip_markup;
use markup::{BULLET_MARKER, EMPHASIS_MARKER, HEADING_MARKER, SUBHEADING_MARKER};
use serde::Serialize;

/// What a line is, for layout purposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum LineClass {
    /// A level-2 heading containing the subject's name.
    Title,
    /// The first non-empty line after a title.
    Contact,
    /// Section heading.
    Heading,
    /// Entry heading.
    Subheading,
    BulletOrEmphasis,
    /// Plain paragraph text, word-wrapped.
    Body,
    /// Vertical space only.
    Blank,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ClassifierState {
    #[default]
    AwaitingTitle,
    AwaitingContact,
    Body,
}

/// A classified line with its display text.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassifiedLine {
    pub class: LineClass,
    /// The text to draw: markup stripped, heading markers removed.
    /// Empty for blank lines.
    pub text: String,
}

/// Streaming classifier. Feed it lines in document order.
#[derive(Debug, Clone)]
pub struct Classifier<'a> {
    subject_name: &'a str,
    state: ClassifierState,
}

impl<'a> Classifier<'a> {
    pub fn new(subject_name: &'a str) -> Self {
        Self {
            subject_name,
            state: ClassifierState::AwaitingTitle,
        }
    }

    pub fn state(&self) -> ClassifierState {
        self.state
    }

    /// Classify the next raw line and advance the state.
    pub fn classify(&mut self, raw: &str) -> ClassifiedLine {
        let line = strip_markup(raw);
        let (classified, next) = classify_line(self.state, &line, self.subject_name);
        self.state = next;
        classified
    }
}

/// Pure transition function: classify an already-stripped line in `state`.
pub fn classify_line(
    state: ClassifierState,
    line: &str,
    subject_name: &str,
) -> (ClassifiedLine, ClassifierState) {
    let is_title = line.starts_with(HEADING_MARKER)
        && !subject_name.is_empty()
        && line.contains(subject_name);

    if is_title {
        let text = without_marker(line, HEADING_MARKER);
        return (
            ClassifiedLine {
                class: LineClass::Title,
                text,
            },
            ClassifierState::AwaitingContact,
        );
    }

    if line.is_empty() {
        return (
            ClassifiedLine {
                class: LineClass::Blank,
                text: String::new(),
            },
            state,
        );
    }

    if state == ClassifierState::AwaitingContact {
        return (
            ClassifiedLine {
                class: LineClass::Contact,
                text: line.to_string(),
            },
            ClassifierState::Body,
        );
    }

    let classified = if line.starts_with(HEADING_MARKER) {
        ClassifiedLine {
            class: LineClass::Heading,
            text: without_marker(line, HEADING_MARKER),
        }
    } else if line.starts_with(SUBHEADING_MARKER) {
        ClassifiedLine {
            class: LineClass::Subheading,
            text: without_marker(line, SUBHEADING_MARKER),
        }
    } else if line.starts_with(BULLET_MARKER) || line.starts_with(EMPHASIS_MARKER) {
        ClassifiedLine {
            class: LineClass::BulletOrEmphasis,
            text: line.to_string(),
        }
    } else {
        ClassifiedLine {
            class: LineClass::Body,
            text: line.to_string(),
        }
    };
    (classified, state)
}

fn without_marker(line: &str, marker: &str) -> String {
    line.strip_prefix(marker).unwrap_or(line).trim().to_string()
}
