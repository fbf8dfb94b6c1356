/*!
 * Language utilities for ISO language code handling.
 *
 * The model catalog is keyed by short language codes ("en", "pt") and
 * occasionally locale-qualified variants ("pt_BR"). Resolution uses both the
 * exact code and its two-letter truncation, so all we require of an input
 * code is that its base is a real ISO 639 language.
 */

use anyhow::{Result, anyhow};
use isolang::Language;

/// Truncate a language code to its two-letter matching key
pub fn short_code(code: &str) -> String {
    code.chars().take(2).collect()
}

/// Validate that a language code is plausible: a valid ISO 639-1/639-3 code,
/// or a locale-qualified code ("pt_BR", "pt-br") with a valid ISO 639-1 base.
pub fn validate_language_code(code: &str) -> Result<()> {
    let normalized = code.trim().to_lowercase();

    let base = normalized
        .split(['_', '-'])
        .next()
        .unwrap_or(&normalized);

    match base.len() {
        2 if Language::from_639_1(base).is_some() => Ok(()),
        3 if Language::from_639_3(base).is_some() => Ok(()),
        _ => Err(anyhow!("Invalid language code: {}", code)),
    }
}

/// Get the English language name for a code, for friendlier CLI messages
pub fn get_language_name(code: &str) -> Result<String> {
    let normalized = code.trim().to_lowercase();
    let base = normalized
        .split(['_', '-'])
        .next()
        .unwrap_or(&normalized);

    let lang = match base.len() {
        2 => Language::from_639_1(base),
        3 => Language::from_639_3(base),
        _ => None,
    };

    lang.map(|l| l.to_name().to_string())
        .ok_or_else(|| anyhow!("Unknown language code: {}", code))
}
