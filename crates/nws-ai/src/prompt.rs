//! Prompt templates, one builder per capability.
//!
//! Free-text capabilities instruct the model to answer with the result and
//! nothing else; extraction capabilities demand a bare JSON payload in the
//! shape the [`crate::dto`] types parse. Every prompt carries the language
//! instruction so replies come back in the manuscript's language.

fn language_instruction(language: &str) -> String {
    format!("Respond in the language with code \"{language}\".")
}

/// Polish prose without changing its meaning.
pub fn enhance(text: &str, language: &str) -> String {
    format!(
        "You are an experienced fiction editor. Improve the flow, word choice, \
         and rhythm of the passage below without changing its meaning, plot, or \
         narrative voice. Reply with the improved passage only.\n\
         {lang}\n\n{text}",
        lang = language_instruction(language),
    )
}

/// Continue the story from where the text leaves off.
pub fn continue_story(text: &str, language: &str) -> String {
    format!(
        "You are a novelist's writing partner. Continue the story below for two \
         to four paragraphs, matching its tense, point of view, and voice. Reply \
         with the continuation only, no preamble.\n\
         {lang}\n\n{text}",
        lang = language_instruction(language),
    )
}

/// Correct spelling, grammar, and punctuation only.
pub fn proofread(text: &str, language: &str) -> String {
    format!(
        "Proofread the passage below. Correct spelling, grammar, and punctuation \
         only; do not rephrase or restructure. Reply with the corrected passage \
         only.\n\
         {lang}\n\n{text}",
        lang = language_instruction(language),
    )
}

/// Synonyms for a word or short phrase, as a JSON string array.
pub fn synonyms(word: &str, language: &str) -> String {
    format!(
        "List up to 10 synonyms for \"{word}\" that fit fiction prose. Reply \
         with a bare JSON array of strings and nothing else.\n\
         {lang}",
        lang = language_instruction(language),
    )
}

fn extraction(what: &str, shape: &str, text: &str, language: &str) -> String {
    format!(
        "Read the manuscript excerpt below and extract {what}. Reply with a \
         bare JSON array and nothing else: no prose, no code fences. Each \
         element must have this shape: {shape}\n\
         {lang}\n\n{text}",
        lang = language_instruction(language),
    )
}

/// Characters, with role labels and traits.
pub fn extract_characters(text: &str, language: &str) -> String {
    extraction(
        "every character that appears or is mentioned",
        r#"{"name": string, "role": "protagonist"|"antagonist"|"supporting"|"minor", "description": string, "traits": [string]}"#,
        text,
        language,
    )
}

/// Places and settings.
pub fn extract_places(text: &str, language: &str) -> String {
    extraction(
        "every place or setting that appears or is mentioned",
        r#"{"name": string, "description": string, "significance": string}"#,
        text,
        language,
    )
}

/// Story events in narrative order.
pub fn extract_timeline(text: &str, language: &str) -> String {
    extraction(
        "the story events, in the order they occur in the narrative",
        r#"{"title": string, "moment": string, "description": string}"#,
        text,
        language,
    )
}

/// Relationships between named characters.
pub fn extract_relationships(text: &str, language: &str) -> String {
    extraction(
        "the relationships between named characters",
        r#"{"source": string, "target": string, "kind": string, "description": string}"#,
        text,
        language,
    )
}

/// Multi-axis narrative analysis as a JSON object.
pub fn analyze_narrative(text: &str, language: &str) -> String {
    format!(
        "You are a developmental editor. Analyze the manuscript excerpt below \
         and reply with a bare JSON object and nothing else, in this shape: \
         {{\"scores\": {{\"pacing\": number, \"dialogue\": number, \
         \"description\": number, \"character_development\": number, \
         \"plot_coherence\": number}}, \"summary\": string, \
         \"strengths\": [string], \"suggestions\": [string]}}. \
         Scores are on a 0-10 scale.\n\
         {lang}\n\n{text}",
        lang = language_instruction(language),
    )
}
