use miningniti::domain::{ContentType, PromptTemplate, PromptTemplateError, SourceMode};

fn vars(names: &[&str]) -> Vec<String> {
    names.iter().map(|name| name.to_string()).collect()
}

#[test]
fn given_declared_slot_when_rendering_then_substitutes_value() {
    let template = PromptTemplate::new("Answer: {input}", vars(&["input"])).unwrap();

    let rendered = template.render(&[("input", "What is coal?")]).unwrap();

    assert_eq!(rendered, "Answer: What is coal?");
}

#[test]
fn given_repeated_slot_when_rendering_then_every_occurrence_is_replaced() {
    let template = PromptTemplate::new("{input} / {input}", vars(&["input"])).unwrap();

    assert_eq!(template.render(&[("input", "x")]).unwrap(), "x / x");
}

#[test]
fn given_doubled_braces_when_rendering_then_emits_literal_braces() {
    let template =
        PromptTemplate::new("Reply as {{\"answer\": ...}} to {input}", vars(&["input"])).unwrap();

    let rendered = template.render(&[("input", "q")]).unwrap();

    assert_eq!(rendered, "Reply as {\"answer\": ...} to q");
}

#[test]
fn given_value_with_braces_when_rendering_then_value_is_not_reinterpreted() {
    let template = PromptTemplate::new("Q: {input}", vars(&["input"])).unwrap();

    assert_eq!(template.render(&[("input", "{x}")]).unwrap(), "Q: {x}");
}

#[test]
fn given_undeclared_slot_when_parsing_then_fails() {
    let result = PromptTemplate::new("{input} {context}", vars(&["input"]));

    assert_eq!(
        result.unwrap_err(),
        PromptTemplateError::UndeclaredVariable("context".to_string())
    );
}

#[test]
fn given_unused_variable_when_parsing_then_fails() {
    let result = PromptTemplate::new("No slots here", vars(&["input"]));

    assert_eq!(
        result.unwrap_err(),
        PromptTemplateError::UnusedVariable("input".to_string())
    );
}

#[test]
fn given_malformed_braces_when_parsing_then_reports_position() {
    assert_eq!(
        PromptTemplate::new("ab {input", vars(&["input"])).unwrap_err(),
        PromptTemplateError::UnclosedSlot(3)
    );
    assert_eq!(
        PromptTemplate::new("a } b", vars(&[])).unwrap_err(),
        PromptTemplateError::UnmatchedClosingBrace(2)
    );
    assert_eq!(
        PromptTemplate::new("a {} b", vars(&[])).unwrap_err(),
        PromptTemplateError::EmptySlot(2)
    );
}

#[test]
fn given_missing_value_when_rendering_then_fails() {
    let template = PromptTemplate::new("{input}", vars(&["input"])).unwrap();

    assert_eq!(
        template.render(&[]).unwrap_err(),
        PromptTemplateError::MissingValue("input".to_string())
    );
}

#[test]
fn given_known_source_values_when_parsing_then_ignores_case_and_whitespace() {
    assert_eq!(" Database ".parse::<SourceMode>(), Ok(SourceMode::Database));
    assert_eq!("INTERNET".parse::<SourceMode>(), Ok(SourceMode::Internet));
    assert_eq!("both".parse::<SourceMode>(), Ok(SourceMode::Both));
    assert!("web".parse::<SourceMode>().is_err());
}

#[test]
fn given_missing_or_unknown_source_when_reading_request_then_defaults_to_internet() {
    assert_eq!(SourceMode::from_request(None), SourceMode::Internet);
    assert_eq!(SourceMode::from_request(Some("")), SourceMode::Internet);
    assert_eq!(SourceMode::from_request(Some("web")), SourceMode::Internet);
    assert_eq!(SourceMode::from_request(Some("both")), SourceMode::Both);
}

#[test]
fn given_pdf_mime_when_resolving_upload_then_is_pdf() {
    assert_eq!(
        ContentType::from_upload(Some("application/pdf"), "report"),
        Some(ContentType::Pdf)
    );
}

#[test]
fn given_octet_stream_with_pdf_extension_when_resolving_upload_then_is_pdf() {
    assert_eq!(
        ContentType::from_upload(Some("application/octet-stream"), "Survey.PDF"),
        Some(ContentType::Pdf)
    );
    assert_eq!(
        ContentType::from_upload(None, "survey.pdf"),
        Some(ContentType::Pdf)
    );
}

#[test]
fn given_other_types_when_resolving_upload_then_rejects() {
    assert_eq!(ContentType::from_upload(Some("text/plain"), "notes.pdf"), None);
    assert_eq!(
        ContentType::from_upload(Some("application/octet-stream"), "notes.txt"),
        None
    );
    assert_eq!(ContentType::from_upload(None, "notes"), None);
}
