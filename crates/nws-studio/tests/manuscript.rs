//! Snapshot tests for manuscript export.

use nws_model::{Chapter, Novel};
use nws_studio::export::{ManuscriptFormat, render_manuscript};

fn sample_novel() -> Novel {
    let mut novel = Novel::new("The Long Rain");
    novel.author = "A. Storm".to_string();
    novel.synopsis = "A village waits for the sky to close.".to_string();
    novel.chapters[0].title = "Falling".to_string();
    novel.chapters[0].content =
        "<p>The rain had not stopped for a year.</p><p>Nobody remembered dry boots.</p>"
            .to_string();
    let mut second = Chapter::new("The Dam");
    second.content = "<p>\u{201C}It will hold,\u{201D} said Mira.</p>".to_string();
    novel.chapters.push(second);
    novel
}

#[test]
fn markdown_manuscript() {
    insta::assert_snapshot!(
        "markdown_manuscript",
        render_manuscript(&sample_novel(), ManuscriptFormat::Markdown)
    );
}

#[test]
fn text_manuscript() {
    insta::assert_snapshot!(
        "text_manuscript",
        render_manuscript(&sample_novel(), ManuscriptFormat::Text)
    );
}
