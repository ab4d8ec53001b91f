//! Rendering for the step headers, the preview card, and the submitted view.

use crate::cli::output;
use crate::schema::{self, keys, Step};
use crate::wizard::{ErrorSet, FormState};

/// "Step N of 4 - Title" header, as shown above every page.
pub fn step_header(step: Step) -> String {
    format!(
        "Step {} of {} - {}",
        step.index() + 1,
        Step::ALL.len(),
        step.title()
    )
}

pub fn print_step_header(step: Step) {
    println!();
    output::section(step_header(step));
}

pub fn print_errors(errors: &ErrorSet) {
    for (&key, message) in errors {
        let label = schema::descriptor(key)
            .map(|field| field.label)
            .unwrap_or("Resume");
        output::warning(format!("{label}: {message}"));
    }
}

/// The preview card: "label : value" per line, resume last, empty optional
/// fields skipped.
pub fn preview_lines(state: &FormState) -> Vec<String> {
    let mut lines = Vec::new();
    for field in &schema::FIELDS {
        let value = state.field(field.key).unwrap_or_default().trim();
        if value.is_empty() && !field.required {
            continue;
        }
        lines.push(format!("{} : {}", field.label, value));
    }
    if let Some(resume) = state.resume() {
        lines.push(format!(
            "Resume : {} ({} KB)",
            resume.file_name(),
            resume.size().div_ceil(1024)
        ));
    }
    lines
}

pub fn print_preview(state: &FormState) {
    println!();
    output::section("Preview");
    for line in preview_lines(state) {
        println!("  {line}");
    }
    output::separator();
}

pub fn print_submitted(redirect_url: &str) {
    println!();
    output::success("Thank you for trusting us with your overseas education journey.");
    output::info(format!(
        "We are delighted to have you onboard. In the meantime, explore our website {redirect_url} for more information."
    ));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wizard::ResumeAttachment;

    #[test]
    fn header_counts_from_one() {
        assert_eq!(step_header(Step::Personal), "Step 1 of 4 - Personal Info");
        assert_eq!(step_header(Step::Preview), "Step 4 of 4 - Preview");
    }

    #[test]
    fn preview_skips_empty_optional_fields_and_lists_resume() {
        let mut state = FormState::default();
        state.set_field(keys::FIRST_NAME, "Asha");
        state.attach_resume(ResumeAttachment::new("cv.pdf", vec![0u8; 2048]));

        let lines = preview_lines(&state);
        assert!(lines.iter().any(|line| line == "First Name : Asha"));
        assert!(!lines.iter().any(|line| line.starts_with("Notes")));
        assert!(lines.iter().any(|line| line == "Resume : cv.pdf (2 KB)"));
    }
}
