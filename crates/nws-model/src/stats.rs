//! Manuscript statistics.
//!
//! The editor payload is stored as opaque markup, so every statistic here
//! first reduces content to plain prose via [`plain_text`]. Counts are
//! whitespace-word based, good enough for the analytics panel and the CLI
//! `stats` command, and stable across editor quirks.

use serde::{Deserialize, Serialize};

use crate::novel::Novel;

/// Reading speed used for the estimated reading time, in words per minute.
pub const READING_WORDS_PER_MINUTE: usize = 230;

/// Strip markup from an editor payload, leaving plain prose.
///
/// Tags are dropped; block-level boundaries (`</p>`, `<br>`, `</div>`,
/// `</h1>`..`</h6>`, `</li>`) become newlines so words on either side never
/// fuse together. Angle brackets inside prose survive only when they do not
/// form a tag-like run, which matches what the editing surface can produce.
///
/// # Example
///
/// ```
/// use nws_model::stats::plain_text;
///
/// let html = "<p>It was <b>cold</b>.</p><p>Snow fell.</p>";
/// assert_eq!(plain_text(html), "It was cold.\nSnow fell.");
/// ```
pub fn plain_text(content: &str) -> String {
    let mut out = String::with_capacity(content.len());
    let mut rest = content;

    while let Some(open) = rest.find('<') {
        out.push_str(&rest[..open]);
        let tail = &rest[open..];
        match tail.find('>') {
            Some(close) => {
                let tag = tail[1..close].trim().to_ascii_lowercase();
                let tag_name = tag
                    .trim_start_matches('/')
                    .split(|c: char| c.is_whitespace() || c == '/')
                    .next()
                    .unwrap_or("");
                if is_block_boundary(&tag, tag_name) {
                    out.push('\n');
                }
                rest = &tail[close + 1..];
            }
            None => {
                // Unterminated bracket: keep it as prose.
                out.push_str(tail);
                rest = "";
            }
        }
    }
    out.push_str(rest);

    // Drop blank lines and trim the edges; chapter structure, not markup,
    // carries paragraph spacing downstream.
    let mut cleaned = String::with_capacity(out.len());
    for line in out.lines() {
        let line = line.trim();
        if !line.is_empty() {
            if !cleaned.is_empty() {
                cleaned.push('\n');
            }
            cleaned.push_str(line);
        }
    }
    cleaned
}

fn is_block_boundary(tag: &str, tag_name: &str) -> bool {
    if tag.starts_with("br") {
        return true;
    }
    tag.starts_with('/')
        && matches!(
            tag_name,
            "p" | "div" | "li" | "h1" | "h2" | "h3" | "h4" | "h5" | "h6" | "blockquote"
        )
}

/// Count the words in an editor payload.
pub fn word_count(content: &str) -> usize {
    plain_text(content).split_whitespace().count()
}

/// Per-chapter statistics row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChapterStats {
    /// Chapter title.
    pub title: String,
    /// Word count of the chapter prose.
    pub words: usize,
}

/// Whole-manuscript statistics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ManuscriptStats {
    /// Total word count across all chapters.
    pub total_words: usize,
    /// Number of chapters.
    pub chapter_count: usize,
    /// Per-chapter breakdown, in reading order.
    pub chapters: Vec<ChapterStats>,
    /// Estimated reading time in minutes (rounded up, minimum 1 when
    /// there is any prose at all).
    pub reading_minutes: usize,
    /// Share of words spoken in dialogue, 0.0..=1.0.
    pub dialogue_ratio: f64,
}

impl ManuscriptStats {
    /// Compute statistics for a novel.
    pub fn for_novel(novel: &Novel) -> Self {
        let chapters: Vec<ChapterStats> = novel
            .chapters
            .iter()
            .map(|c| ChapterStats {
                title: c.title.clone(),
                words: c.word_count(),
            })
            .collect();
        let total_words: usize = chapters.iter().map(|c| c.words).sum();
        let reading_minutes = if total_words == 0 {
            0
        } else {
            total_words.div_ceil(READING_WORDS_PER_MINUTE)
        };

        let prose = novel.manuscript_text();
        let dialogue_words = dialogue_word_count(&prose);
        let dialogue_ratio = if total_words == 0 {
            0.0
        } else {
            dialogue_words as f64 / total_words as f64
        };

        Self {
            total_words,
            chapter_count: novel.chapters.len(),
            chapters,
            reading_minutes,
            dialogue_ratio,
        }
    }
}

/// Count words inside double-quoted spans (straight or curly quotes).
///
/// An unclosed quote runs to the end of its line, so one missing close quote
/// cannot swallow the rest of the manuscript.
fn dialogue_word_count(prose: &str) -> usize {
    let mut words = 0;
    for line in prose.lines() {
        let mut in_quote = false;
        let mut span = String::new();
        for ch in line.chars() {
            match ch {
                '"' | '\u{201C}' | '\u{201D}' => {
                    if in_quote {
                        words += span.split_whitespace().count();
                        span.clear();
                    }
                    in_quote = !in_quote;
                }
                _ if in_quote => span.push(ch),
                _ => {}
            }
        }
        // Unterminated quote: count what was captured on this line.
        words += span.split_whitespace().count();
    }
    words
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chapter::Chapter;

    #[test]
    fn test_plain_text_strips_tags() {
        assert_eq!(plain_text("<p>Hello <i>there</i></p>"), "Hello there");
        assert_eq!(plain_text("no markup at all"), "no markup at all");
        assert_eq!(plain_text(""), "");
    }

    #[test]
    fn test_plain_text_block_boundaries_become_newlines() {
        let html = "<div>one</div><div>two</div><br>three";
        assert_eq!(plain_text(html), "one\ntwo\nthree");
    }

    #[test]
    fn test_plain_text_keeps_stray_angle_bracket() {
        assert_eq!(plain_text("3 < 4 and that is all"), "3 < 4 and that is all");
    }

    #[test]
    fn test_word_count() {
        assert_eq!(word_count("<p>one two three</p>"), 3);
        assert_eq!(word_count("   "), 0);
    }

    #[test]
    fn test_manuscript_stats() {
        let mut novel = Novel::new("Test");
        novel.chapters[0].content = "<p>\u{201C}Run,\u{201D} she said. He ran.</p>".to_string();
        novel.chapters.push(Chapter::new("Two"));

        let stats = ManuscriptStats::for_novel(&novel);
        assert_eq!(stats.chapter_count, 2);
        assert_eq!(stats.total_words, 5);
        assert_eq!(stats.reading_minutes, 1);
        // "Run," is the only dialogue word out of five.
        assert!((stats.dialogue_ratio - 1.0 / 5.0).abs() < 1e-9);
    }

    #[test]
    fn test_empty_novel_stats() {
        let mut novel = Novel::new("Test");
        novel.chapters.clear();
        let stats = ManuscriptStats::for_novel(&novel);
        assert_eq!(stats.total_words, 0);
        assert_eq!(stats.reading_minutes, 0);
        assert_eq!(stats.dialogue_ratio, 0.0);
    }
}
