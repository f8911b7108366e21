use miningniti::application::services::{dedent, format_generated_text};
use miningniti::infrastructure::observability::sanitize_prompt;
use miningniti::infrastructure::text_processing::{RasterOptions, sanitize_extracted_text};
use miningniti::presentation::config::ExtractionSettings;

#[test]
fn given_padded_completion_when_formatting_then_wraps_in_single_newlines() {
    assert_eq!(format_generated_text("  Coal is a rock.\n"), "\nCoal is a rock.\n");
}

#[test]
fn given_empty_completion_when_formatting_then_returns_two_newlines() {
    assert_eq!(format_generated_text(""), "\n\n");
    assert_eq!(format_generated_text(" \n\t\n"), "\n\n");
}

#[test]
fn given_common_indent_when_dedenting_then_removes_shared_margin_only() {
    assert_eq!(dedent("    a\n      b\n    c"), "a\n  b\nc");
}

#[test]
fn given_whitespace_only_lines_when_dedenting_then_they_are_emptied_and_ignored() {
    assert_eq!(dedent("  a\n \n  b\n"), "a\n\nb\n");
}

#[test]
fn given_mixed_tabs_and_spaces_when_dedenting_then_no_margin_is_shared() {
    assert_eq!(dedent("\ta\n  b"), "\ta\n  b");
}

#[test]
fn given_unindented_line_when_dedenting_then_text_is_unchanged() {
    assert_eq!(dedent("a\n    b"), "a\n    b");
}

#[test]
fn given_form_feed_between_pages_when_sanitizing_then_becomes_paragraph_break() {
    assert_eq!(
        sanitize_extracted_text("Page one\x0cPage two\n"),
        "Page one\n\nPage two"
    );
}

#[test]
fn given_hyphenated_line_break_when_sanitizing_then_word_is_rejoined() {
    assert_eq!(
        sanitize_extracted_text("bitu-\nminous coal"),
        "bituminous coal"
    );
}

#[test]
fn given_ligatures_and_runs_of_space_when_sanitizing_then_normalizes() {
    assert_eq!(
        sanitize_extracted_text("  e\u{FB03}cient    extraction \r\n\n\n\nnext"),
        "efficient extraction\n\nnext"
    );
}

#[test]
fn given_only_noise_when_sanitizing_then_returns_empty() {
    assert_eq!(sanitize_extracted_text(" \x0c\n\t \x00"), "");
}

#[test]
fn given_empty_prompt_when_sanitizing_then_returns_empty_marker() {
    assert_eq!(sanitize_prompt(""), "[EMPTY]");
    assert_eq!(sanitize_prompt("   "), "[EMPTY]");
}

#[test]
fn given_long_prompt_when_sanitizing_then_truncates_on_char_boundary() {
    let prompt = "é".repeat(150);

    let result = sanitize_prompt(&prompt);

    assert!(result.starts_with(&"é".repeat(100)));
    assert!(result.ends_with("... (150 chars total)"));
}

#[test]
fn given_credentials_when_sanitizing_then_values_are_redacted() {
    let result = sanitize_prompt("Bearer sk-abc api_key=one&key=two password=three");

    assert_eq!(
        result,
        "Bearer [REDACTED] api_key=[REDACTED]&key=[REDACTED] password=[REDACTED]"
    );
}

#[test]
fn given_repeated_secret_when_sanitizing_then_every_occurrence_is_redacted() {
    let result = sanitize_prompt("token=a then token=b");

    assert_eq!(result, "token=[REDACTED] then token=[REDACTED]");
}

#[test]
fn given_page_cap_beyond_pdfium_range_when_building_raster_options_then_clamped() {
    let settings = ExtractionSettings {
        max_pages: 100_000,
        ..Default::default()
    };

    assert_eq!(RasterOptions::from(&settings).max_pages, 65_535);
}

#[test]
fn given_ordinary_page_cap_when_building_raster_options_then_kept() {
    let settings = ExtractionSettings {
        max_pages: 200,
        ..Default::default()
    };

    assert_eq!(RasterOptions::from(&settings).max_pages, 200);
}
