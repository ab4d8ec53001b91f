//! Wire-format and outcome-classification tests for the HTTP submission
//! client, against a local mock server.

use mockito::Matcher;

use lead_intake::errors::SubmissionError;
use lead_intake::schema::keys;
use lead_intake::submit::{HttpSubmissionClient, SubmissionClient};
use lead_intake::wizard::{FormState, ResumeAttachment};

fn filled_state() -> FormState {
    let mut state = FormState::default();
    state.set_field(keys::FIRST_NAME, "Asha");
    state.set_field(keys::LAST_NAME, "Verma");
    state.set_field(keys::COUNTRY, "Canada");
    state.set_field(keys::INTAKE_YEAR, "2027");
    state.set_field(keys::LEVEL, "Post Graduate");
    state.set_field(keys::EMAIL, "asha@example.com");
    state.set_field(keys::PHONE, "+91-9876543");
    state.set_field(keys::NOTES, "Fall intake preferred");
    state
}

fn part_matcher(name: &str, value: &str) -> Matcher {
    Matcher::Regex(format!(r#"name="{name}"(\r\n|.)*{value}"#))
}

#[test]
fn multipart_payload_carries_exact_wire_names() {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("POST", "/api/contact")
        .match_header("content-type", Matcher::Regex("multipart/form-data.*".into()))
        .match_body(Matcher::AllOf(vec![
            part_matcher("firstname", "Asha"),
            part_matcher("lastname", "Verma"),
            part_matcher("country_interested", "Canada"),
            part_matcher("intake_year", "2027"),
            part_matcher("level_applying", "Post Graduate"),
            part_matcher("email", "asha@example.com"),
            part_matcher("phone", r"\+91-9876543"),
            part_matcher("notes", "Fall intake preferred"),
        ]))
        .with_status(200)
        .create();

    let client = HttpSubmissionClient::new(format!("{}/api/contact", server.url())).unwrap();
    client.submit(&filled_state()).unwrap();
    mock.assert();
}

#[test]
fn empty_optional_fields_are_omitted_from_the_payload() {
    let mut server = mockito::Server::new();
    // Mocks match newest-first: if the body still carried a notes part, the
    // second mock would swallow the request and fail its zero-hit check.
    let accepted = server.mock("POST", "/api/contact").with_status(200).create();
    let notes_part = server
        .mock("POST", "/api/contact")
        .match_body(Matcher::Regex(r#"name="notes""#.into()))
        .with_status(200)
        .expect(0)
        .create();

    let mut state = filled_state();
    state.set_field(keys::NOTES, "   ");
    let client = HttpSubmissionClient::new(format!("{}/api/contact", server.url())).unwrap();
    client.submit(&state).unwrap();
    accepted.assert();
    notes_part.assert();
}

#[test]
fn resume_is_attached_as_a_named_binary_part() {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("POST", "/api/contact")
        .match_body(Matcher::AllOf(vec![
            Matcher::Regex(r#"name="resume"; filename="cv.pdf""#.into()),
            Matcher::Regex("application/pdf".into()),
            Matcher::Regex("PDFDATA".into()),
        ]))
        .with_status(201)
        .create();

    let mut state = filled_state();
    state.attach_resume(ResumeAttachment::new("cv.pdf", b"PDFDATA".to_vec()));
    let client = HttpSubmissionClient::new(format!("{}/api/contact", server.url())).unwrap();
    client.submit(&state).unwrap();
    mock.assert();
}

#[test]
fn any_2xx_counts_as_success() {
    let mut server = mockito::Server::new();
    server.mock("POST", "/api/contact").with_status(204).create();

    let client = HttpSubmissionClient::new(format!("{}/api/contact", server.url())).unwrap();
    assert!(client.submit(&filled_state()).is_ok());
}

#[test]
fn non_success_status_is_classified_with_body_text() {
    let mut server = mockito::Server::new();
    server
        .mock("POST", "/api/contact")
        .with_status(422)
        .with_body("intake_year out of range")
        .create();

    let client = HttpSubmissionClient::new(format!("{}/api/contact", server.url())).unwrap();
    match client.submit(&filled_state()) {
        Err(SubmissionError::ServerRejected { status, message }) => {
            assert_eq!(status, 422);
            assert!(message.contains("intake_year out of range"));
        }
        other => panic!("Unexpected outcome: {other:?}"),
    }
}

#[test]
fn bodyless_rejection_falls_back_to_the_status_text() {
    let mut server = mockito::Server::new();
    server.mock("POST", "/api/contact").with_status(503).create();

    let client = HttpSubmissionClient::new(format!("{}/api/contact", server.url())).unwrap();
    match client.submit(&filled_state()) {
        Err(SubmissionError::ServerRejected { status, message }) => {
            assert_eq!(status, 503);
            assert!(message.contains("Service Unavailable"));
        }
        other => panic!("Unexpected outcome: {other:?}"),
    }
}

#[test]
fn unreachable_endpoint_is_a_network_error() {
    // Reserved port with nothing listening.
    let client = HttpSubmissionClient::new("http://127.0.0.1:9/api/contact").unwrap();
    match client.submit(&filled_state()) {
        Err(SubmissionError::Network(_)) => {}
        other => panic!("Unexpected outcome: {other:?}"),
    }
}
