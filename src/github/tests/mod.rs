//! Unit tests for the GitHub discovery module.
//!
//! - `fetcher`: pagination, cutoff filtering and fail-closed behaviour
//! - `page_info`: `PageInfo` successor handling
//! - `repository_locator`: locator construction and validation


use rstest::rstest;

use super::{IntakeError, PersonalAccessToken};

#[rstest]
fn rejects_empty_token() {
    let result = PersonalAccessToken::new(String::new());
    assert!(
        matches!(result, Err(IntakeError::MissingToken)),
        "expected MissingToken, got {result:?}"
    );
}

#[rstest]
fn trims_token_whitespace() {
    let token = PersonalAccessToken::new("  ghp_example\n").expect("token should be valid");
    assert_eq!(token.value(), "ghp_example");
}

#[rstest]
fn token_debug_output_is_redacted() {
    let token = PersonalAccessToken::new("ghp_secret").expect("token should be valid");
    let rendered = format!("{token:?}");
    assert!(
        !rendered.contains("ghp_secret"),
        "token leaked in debug output: {rendered}"
    );
}
