//! Manuscript export.
//!
//! Renders a novel's manuscript as Markdown or plain text. The structured
//! path is the JSON backup; these renderers are for reading copies, so
//! chapter notes and the story bible stay out of them.

use nws_model::{Novel, stats::plain_text};

/// Output format for a manuscript export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ManuscriptFormat {
    /// Markdown with title/chapter headings.
    #[default]
    Markdown,
    /// Plain text with underlined-style headings.
    Text,
}

impl ManuscriptFormat {
    /// File extension for the format.
    pub const fn extension(&self) -> &'static str {
        match self {
            Self::Markdown => "md",
            Self::Text => "txt",
        }
    }
}

/// Render the manuscript.
pub fn render_manuscript(novel: &Novel, format: ManuscriptFormat) -> String {
    match format {
        ManuscriptFormat::Markdown => render_markdown(novel),
        ManuscriptFormat::Text => render_text(novel),
    }
}

fn render_markdown(novel: &Novel) -> String {
    let mut out = String::new();
    out.push_str(&format!("# {}\n", novel.title));
    if !novel.author.is_empty() {
        out.push_str(&format!("\n*by {}*\n", novel.author));
    }
    if !novel.synopsis.is_empty() {
        out.push_str(&format!("\n> {}\n", novel.synopsis));
    }
    for chapter in &novel.chapters {
        out.push_str(&format!("\n## {}\n", chapter.title));
        let prose = plain_text(&chapter.content);
        if !prose.is_empty() {
            out.push('\n');
            for line in prose.lines() {
                out.push_str(line);
                out.push('\n');
            }
        }
    }
    out
}

fn render_text(novel: &Novel) -> String {
    let mut out = String::new();
    out.push_str(&novel.title.to_uppercase());
    out.push('\n');
    if !novel.author.is_empty() {
        out.push_str(&format!("by {}\n", novel.author));
    }
    for chapter in &novel.chapters {
        out.push('\n');
        out.push_str(&chapter.title);
        out.push('\n');
        out.push_str(&"-".repeat(chapter.title.chars().count().max(3)));
        out.push('\n');
        let prose = plain_text(&chapter.content);
        if !prose.is_empty() {
            out.push('\n');
            for line in prose.lines() {
                out.push_str(line);
                out.push('\n');
            }
        }
    }
    out
}
