//! Declarative description of the lead form: steps, fields, and the rules
//! each field is validated against.
//!
//! The schema is static configuration. The validation engine in
//! [`crate::wizard::validate`] interprets it against the collected values.

use std::fmt;

/// Field keys. They double as the multipart wire names, so they must match
/// the contact endpoint exactly.
pub mod keys {
    pub const FIRST_NAME: &str = "firstname";
    pub const LAST_NAME: &str = "lastname";
    pub const COUNTRY: &str = "country_interested";
    pub const INTAKE_YEAR: &str = "intake_year";
    pub const LEVEL: &str = "level_applying";
    pub const EMAIL: &str = "email";
    pub const PHONE: &str = "phone";
    pub const NOTES: &str = "notes";
    pub const RESUME: &str = "resume";
}

/// One page of the wizard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Step {
    Personal,
    Preferences,
    Contact,
    Preview,
}

impl Step {
    pub const ALL: [Step; 4] = [Step::Personal, Step::Preferences, Step::Contact, Step::Preview];

    pub fn index(self) -> usize {
        match self {
            Step::Personal => 0,
            Step::Preferences => 1,
            Step::Contact => 2,
            Step::Preview => 3,
        }
    }

    pub fn from_index(index: usize) -> Option<Step> {
        Step::ALL.get(index).copied()
    }

    pub fn next(self) -> Option<Step> {
        Step::from_index(self.index() + 1)
    }

    pub fn prev(self) -> Option<Step> {
        self.index().checked_sub(1).and_then(Step::from_index)
    }

    pub fn title(self) -> &'static str {
        match self {
            Step::Personal => "Personal Info",
            Step::Preferences => "Application Details",
            Step::Contact => "Contact Info",
            Step::Preview => "Preview",
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.title())
    }
}

/// Study level the lead is applying for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    UnderGraduate,
    PostGraduate,
}

impl Level {
    pub const ALL: [Level; 2] = [Level::UnderGraduate, Level::PostGraduate];

    pub fn label(self) -> &'static str {
        match self {
            Level::UnderGraduate => "Under Graduate",
            Level::PostGraduate => "Post Graduate",
        }
    }

    /// Case-insensitive match against the display labels.
    pub fn parse(input: &str) -> Option<Level> {
        Level::ALL
            .into_iter()
            .find(|level| level.label().eq_ignore_ascii_case(input.trim()))
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Validation rule attached to a text field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldRule {
    /// Must not be empty after trimming.
    NonEmpty,
    /// Integer within the intake window.
    IntakeYear,
    /// One of the [`Level`] labels.
    Level,
    /// Standard address grammar (local@domain.tld).
    Email,
    /// Digits, `+` and `-` only, 8 to 15 characters.
    Phone,
    /// Free text, no constraint.
    Free,
}

/// Declarative description of a single form field.
#[derive(Debug, Clone, Copy)]
pub struct FieldDescriptor {
    pub key: &'static str,
    pub label: &'static str,
    pub step: Step,
    pub required: bool,
    pub rule: FieldRule,
}

/// Text fields in wizard order. The resume attachment is binary and handled
/// separately by the controller.
pub const FIELDS: [FieldDescriptor; 8] = [
    FieldDescriptor {
        key: keys::FIRST_NAME,
        label: "First Name",
        step: Step::Personal,
        required: true,
        rule: FieldRule::NonEmpty,
    },
    FieldDescriptor {
        key: keys::LAST_NAME,
        label: "Last Name",
        step: Step::Personal,
        required: true,
        rule: FieldRule::NonEmpty,
    },
    FieldDescriptor {
        key: keys::COUNTRY,
        label: "Country Interested",
        step: Step::Preferences,
        required: true,
        rule: FieldRule::NonEmpty,
    },
    FieldDescriptor {
        key: keys::INTAKE_YEAR,
        label: "Intake Year",
        step: Step::Preferences,
        required: true,
        rule: FieldRule::IntakeYear,
    },
    FieldDescriptor {
        key: keys::LEVEL,
        label: "Level Applying for",
        step: Step::Preferences,
        required: true,
        rule: FieldRule::Level,
    },
    FieldDescriptor {
        key: keys::EMAIL,
        label: "Email",
        step: Step::Contact,
        required: true,
        rule: FieldRule::Email,
    },
    FieldDescriptor {
        key: keys::PHONE,
        label: "Phone Number",
        step: Step::Contact,
        required: true,
        rule: FieldRule::Phone,
    },
    FieldDescriptor {
        key: keys::NOTES,
        label: "Notes",
        step: Step::Contact,
        required: false,
        rule: FieldRule::Free,
    },
];

/// Fields belonging to one step, in display order.
pub fn step_fields(step: Step) -> impl Iterator<Item = &'static FieldDescriptor> {
    FIELDS.iter().filter(move |field| field.step == step)
}

/// Looks up a descriptor by key.
pub fn descriptor(key: &str) -> Option<&'static FieldDescriptor> {
    FIELDS.iter().find(|field| field.key == key)
}

/// How many years past the current one an intake may be scheduled.
pub const INTAKE_YEAR_HORIZON: i32 = 7;

/// Upper bound on resume uploads.
pub const MAX_RESUME_BYTES: u64 = 5 * 1024 * 1024;

/// Accepted resume formats, by file extension.
pub const RESUME_EXTENSIONS: [&str; 3] = ["pdf", "doc", "docx"];

/// MIME type for an accepted resume file name, if the extension is known.
pub fn resume_mime(file_name: &str) -> Option<&'static str> {
    let extension = file_name.rsplit_once('.').map(|(_, ext)| ext)?;
    match extension.to_ascii_lowercase().as_str() {
        "pdf" => Some("application/pdf"),
        "doc" => Some("application/msword"),
        "docx" => {
            Some("application/vnd.openxmlformats-officedocument.wordprocessingml.document")
        }
        _ => None,
    }
}

/// Popular study destinations offered as suggestions. Free text is accepted
/// as well; the list only seeds the CLI picker.
pub const COUNTRY_SUGGESTIONS: [&str; 10] = [
    "United States",
    "United Kingdom",
    "Canada",
    "Australia",
    "New Zealand",
    "Ireland",
    "Germany",
    "France",
    "Singapore",
    "United Arab Emirates",
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn steps_are_ordered_and_linked() {
        assert_eq!(Step::Personal.next(), Some(Step::Preferences));
        assert_eq!(Step::Preview.next(), None);
        assert_eq!(Step::Personal.prev(), None);
        assert_eq!(Step::Preview.prev(), Some(Step::Contact));
        for (index, step) in Step::ALL.into_iter().enumerate() {
            assert_eq!(step.index(), index);
            assert_eq!(Step::from_index(index), Some(step));
        }
    }

    #[test]
    fn level_parses_labels_case_insensitively() {
        assert_eq!(Level::parse("Under Graduate"), Some(Level::UnderGraduate));
        assert_eq!(Level::parse("post graduate"), Some(Level::PostGraduate));
        assert_eq!(Level::parse("Doctorate"), None);
    }

    #[test]
    fn every_step_before_preview_owns_fields() {
        assert_eq!(step_fields(Step::Personal).count(), 2);
        assert_eq!(step_fields(Step::Preferences).count(), 3);
        assert_eq!(step_fields(Step::Contact).count(), 3);
        assert_eq!(step_fields(Step::Preview).count(), 0);
    }

    #[test]
    fn resume_mime_covers_accepted_extensions() {
        assert_eq!(resume_mime("cv.pdf"), Some("application/pdf"));
        assert_eq!(resume_mime("cv.DOCX").map(|m| m.contains("wordprocessingml")), Some(true));
        assert_eq!(resume_mime("cv.txt"), None);
        assert_eq!(resume_mime("no-extension"), None);
    }
}
