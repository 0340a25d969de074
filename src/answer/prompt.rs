use std::sync::LazyLock;

use regex::Regex;

/// Character budget for scraped reference text inside the prompt. Anything
/// beyond this is cut before the prompt is assembled.
pub const REFERENCE_BUDGET: usize = 2000;

pub const RESPONSE_PREFIX: &str = "AI-genererat svar:<br>";

/// Instructive framing placed ahead of the scraped material and the user's
/// question. Kept in Swedish since the assistant answers Swedish parents.
const FRAMING: &str = "\
Du är en AI-assistent för föräldrar som söker råd om olika problem. Använd \
informationen från BRIS, 1177, Friends och Säffle kommun som vägledning för \
att ge specifika och empatiska råd som är relevanta för den situation \
användaren beskriver. Undvik generiska eller automatiserade svar; fokusera \
på faktabaserade och stödjande svar. Tipsa inte om källorna direkt utan \
fokusera på samtalet med föräldern.

Ställ öppna och empatiska frågor, följ upp med fördjupande frågor, \
sammanfatta vad användaren har berättat och erbjud ytterligare hjälp när \
det passar.";

static BOLD_MARKERS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*\*.*?\*\*").expect("failed to compile bold-marker regex"));

static PUNCTUATION_RUNS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[:;]+").expect("failed to compile punctuation regex"));

/// Assemble the full prompt: framing, truncated reference text, then the
/// user's own question.
pub fn build_structured_prompt(reference_text: &str, user_prompt: &str) -> String {
    format!(
        "{FRAMING}\n\nAdditional Information:\n{}\n\n{user_prompt}",
        truncate_chars(reference_text, REFERENCE_BUDGET)
    )
}

/// Tidy the model's reply for rendering: drop `**…**` spans, collapse stray
/// colon/semicolon runs, trim, and convert newlines to `<br>` behind the
/// fixed prefix.
pub fn format_reply(raw: &str) -> String {
    let cleaned = BOLD_MARKERS.replace_all(raw, "");
    let cleaned = PUNCTUATION_RUNS.replace_all(&cleaned, "");
    let cleaned = cleaned.trim();
    format!("{RESPONSE_PREFIX}{}", cleaned.replace('\n', "<br>"))
}

fn truncate_chars(text: &str, budget: usize) -> &str {
    match text.char_indices().nth(budget) {
        Some((index, _)) => &text[..index],
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_contains_reference_and_question() {
        let prompt = build_structured_prompt("BRIS skriver om mobbning.", "Mitt barn är ledset.");
        assert!(prompt.contains("Additional Information:\nBRIS skriver om mobbning."));
        assert!(prompt.ends_with("Mitt barn är ledset."));
    }

    #[test]
    fn reference_text_is_truncated_to_budget() {
        let long = "a".repeat(REFERENCE_BUDGET + 500);
        let prompt = build_structured_prompt(&long, "fråga");
        assert!(!prompt.contains(&long));
        assert!(prompt.contains(&"a".repeat(REFERENCE_BUDGET)));
    }

    #[test]
    fn truncation_respects_char_boundaries() {
        let text = "ä".repeat(REFERENCE_BUDGET + 10);
        assert_eq!(
            truncate_chars(&text, REFERENCE_BUDGET).chars().count(),
            REFERENCE_BUDGET
        );
    }

    #[test]
    fn reply_is_cleaned_and_prefixed() {
        let raw = "**Rubrik** Hej;; där:\nAndra raden ";
        let formatted = format_reply(raw);
        assert_eq!(formatted, "AI-genererat svar:<br>Hej där<br>Andra raden");
    }

    #[test]
    fn reply_without_markup_is_untouched() {
        assert_eq!(format_reply("Hej"), "AI-genererat svar:<br>Hej");
    }
}
