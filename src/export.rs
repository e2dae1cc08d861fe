//! Plain-text export of a generated travel plan
//!
//! Wraps the linkified plan in a fixed banner for download and derives a
//! filesystem-safe filename from the destination.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use chrono::{DateTime, Utc};

/// Suffix appended to the sanitized destination
pub const FILENAME_SUFFIX: &str = "_travel_plan.txt";

/// MIME type of the exported artifact
pub const EXPORT_MEDIA_TYPE: &str = "text/plain";

const BANNER_RULE: &str = "===========================================";
const FOOTER_RULE: &str = "-------------------------------------------";

/// Wrap the plan text with the download banner and generation timestamp
#[must_use]
pub fn format_export(destination: &str, plan_text: &str, generated_at: DateTime<Utc>) -> String {
    format!(
        "\n{BANNER_RULE}\nTravel Plan for {destination}\n{BANNER_RULE}\n\n{plan_text}\n\n\
         {FOOTER_RULE}\nGenerated by TripForge\nDate Generated: {}\n{BANNER_RULE}\n",
        generated_at.format("%Y-%m-%d %H:%M:%S")
    )
}

/// Derive the download filename from the destination.
///
/// Keeps alphanumerics, spaces, hyphens and underscores, trims trailing
/// whitespace, then appends the fixed suffix.
#[must_use]
pub fn export_filename(destination: &str) -> String {
    let safe: String = destination
        .chars()
        .filter(|c| c.is_alphanumeric() || matches!(c, ' ' | '-' | '_'))
        .collect();
    format!("{}{FILENAME_SUFFIX}", safe.trim_end())
}

/// Base64 payload for embedding the export in a `data:` download link
#[must_use]
pub fn export_payload(content: &str) -> String {
    BASE64.encode(content.as_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rstest::rstest;

    #[rstest]
    #[case("Tokyo, Japan!", "Tokyo Japan_travel_plan.txt")]
    #[case("Paris", "Paris_travel_plan.txt")]
    #[case("Rio de Janeiro", "Rio de Janeiro_travel_plan.txt")]
    #[case("Sankt-Peterburg", "Sankt-Peterburg_travel_plan.txt")]
    #[case("São Paulo", "São Paulo_travel_plan.txt")]
    #[case("a/b\\c", "abc_travel_plan.txt")]
    fn test_export_filename_sanitization(#[case] destination: &str, #[case] expected: &str) {
        assert_eq!(export_filename(destination), expected);
    }

    #[test]
    fn test_export_filename_trims_trailing_whitespace() {
        // Stripped punctuation can leave a dangling space before the suffix
        assert_eq!(export_filename("Oslo !"), "Oslo_travel_plan.txt");
    }

    #[test]
    fn test_format_export_banner() {
        let generated_at = Utc.with_ymd_and_hms(2025, 6, 1, 9, 30, 0).unwrap();
        let export = format_export("Paris", "Day 1: arrive", generated_at);

        assert!(export.contains("Travel Plan for Paris"));
        assert!(export.contains("Day 1: arrive"));
        assert!(export.contains("Generated by TripForge"));
        assert!(export.contains("Date Generated: 2025-06-01 09:30:00"));
        assert_eq!(export.matches(BANNER_RULE).count(), 3);
        assert_eq!(export.matches(FOOTER_RULE).count(), 1);
    }

    #[test]
    fn test_export_payload_is_standard_base64() {
        assert_eq!(export_payload("hello"), "aGVsbG8=");
    }
}
