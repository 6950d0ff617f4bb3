//! Prompt handling for hairstyle generation.
//!
//! Every prompt sent to the service carries a fixed face-preservation suffix
//! so the model keeps the subject's face intact.

/// Fixed literal appended to every submitted prompt, exactly once.
pub const FACE_SUFFIX: &str = " keep my face same";

/// Prompt preloaded into a fresh session.
pub const DEFAULT_PROMPT: &str = "Change my hairstyle keep my face same";

/// Curated prompts offered by front-ends as one-click selections.
pub const PROMPT_LIBRARY: &[&str] = &[
    "Give me a classic bob cut",
    "Long layered waves with curtain bangs",
    "Short textured crop with a fade",
    "Shoulder-length curls with volume",
    "Sleek straight hair with a middle part",
];

/// One-click recommended prompt.
pub fn recommended() -> String {
    normalize("Try a fresh modern hairstyle that suits my face shape")
}

/// Normalize a prompt for submission.
///
/// Trims surrounding whitespace and guarantees the face-preservation suffix
/// is present exactly once. Blank input normalizes to the empty string, which
/// callers must treat as invalid for submission. Idempotent: normalizing an
/// already-normalized prompt returns it unchanged.
pub fn normalize(prompt: &str) -> String {
    let trimmed = prompt.trim();
    if trimmed.is_empty() {
        return String::new();
    }
    if trimmed.ends_with(FACE_SUFFIX.trim_start()) {
        return trimmed.to_string();
    }
    format!("{}{}", trimmed, FACE_SUFFIX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_suffix_appended_once() {
        assert_eq!(normalize("bob cut"), "bob cut keep my face same");
    }

    #[test]
    fn test_idempotent() {
        let once = normalize("bob cut");
        let twice = normalize(&once);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_blank_input_normalizes_to_empty() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("   \t\n"), "");
    }

    #[test]
    fn test_default_prompt_already_normalized() {
        assert_eq!(normalize(DEFAULT_PROMPT), DEFAULT_PROMPT);
    }

    #[test]
    fn test_library_prompts_normalize() {
        for prompt in PROMPT_LIBRARY {
            let normalized = normalize(prompt);
            assert!(normalized.ends_with(FACE_SUFFIX.trim_start()));
            assert_eq!(normalize(&normalized), normalized);
        }
    }

    #[test]
    fn test_recommended_is_normalized() {
        let prompt = recommended();
        assert!(prompt.ends_with(FACE_SUFFIX.trim_start()));
        assert_eq!(normalize(&prompt), prompt);
    }
}
