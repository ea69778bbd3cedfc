//! Command implementations over a [`StudioSession`].
//!
//! Every command opens a session against the library directory, does its
//! work, and closes the session (the close carries the exit save). Mutating
//! commands report the save outcome; read-only commands skip it.

use std::path::{Path, PathBuf};

use anyhow::{Context, anyhow, bail};
use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use uuid::Uuid;

use nws_ai::AiService;
use nws_model::{ManuscriptStats, Novel};
use nws_persistence::{FileStore, SaveOutcome};
use nws_studio::{ManuscriptFormat, NotifyLevel, StudioSession, StudioSettings};

use crate::cli::{AssistAction, CreateArgs, ManuscriptFormatArg};

/// Open a session over the library directory (explicit or per-user default).
fn open_session(library: Option<&Path>) -> anyhow::Result<StudioSession<FileStore>> {
    let dir = match library {
        Some(dir) => dir.to_path_buf(),
        None => default_library_dir(),
    };
    std::fs::create_dir_all(&dir)
        .with_context(|| format!("could not create library directory {}", dir.display()))?;
    let settings = StudioSettings::load();
    let mut session = StudioSession::new(FileStore::new(dir), settings.autosave);
    session.open().context("could not open the library")?;
    Ok(session)
}

fn default_library_dir() -> PathBuf {
    directories::ProjectDirs::from("com", "NovelWritingStudio", "NWS")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Resolve a novel from an id, a unique id prefix, or an exact title
/// (case-insensitive). Ambiguity is an error, not a guess.
fn resolve_novel(session: &StudioSession<FileStore>, query: &str) -> anyhow::Result<Uuid> {
    if let Ok(id) = Uuid::parse_str(query)
        && session.novels().iter().any(|n| n.id == id)
    {
        return Ok(id);
    }
    let by_prefix: Vec<&Novel> = session
        .novels()
        .iter()
        .filter(|n| n.id.to_string().starts_with(&query.to_lowercase()))
        .collect();
    if let [novel] = by_prefix[..] {
        return Ok(novel.id);
    }
    let by_title: Vec<&Novel> = session
        .novels()
        .iter()
        .filter(|n| n.title.eq_ignore_ascii_case(query))
        .collect();
    match by_title[..] {
        [novel] => Ok(novel.id),
        [] => bail!("no novel matches {query:?}; run `novel-studio list`"),
        _ => {
            let ids: Vec<String> = by_title.iter().map(|n| short_id(n)).collect();
            bail!(
                "{} novels are titled {query:?}; pick one by id: {}",
                by_title.len(),
                ids.join(", ")
            )
        }
    }
}

fn short_id(novel: &Novel) -> String {
    novel.id.to_string()[..8].to_string()
}

fn print_notifications(session: &mut StudioSession<FileStore>) {
    for note in session.drain_notifications() {
        match note.level {
            NotifyLevel::Error => eprintln!("error: {}", note.message),
            _ => println!("{}", note.message),
        }
    }
}

fn close_reporting(session: &mut StudioSession<FileStore>) -> anyhow::Result<()> {
    let outcome = session.close();
    if outcome == SaveOutcome::Failed {
        let detail = session.last_save_error().unwrap_or("unknown error");
        bail!("could not save the library: {detail}");
    }
    Ok(())
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

pub fn run_list(library: Option<&Path>) -> anyhow::Result<()> {
    let mut session = open_session(library)?;
    if session.novels().is_empty() {
        println!("The library is empty; run `novel-studio create --title ...`");
        return Ok(());
    }
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Id"),
        header_cell("Title"),
        header_cell("Author"),
        header_cell("Genre"),
        header_cell("Chapters"),
        header_cell("Words"),
        header_cell("Updated"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 4, CellAlignment::Right);
    align_column(&mut table, 5, CellAlignment::Right);
    let active = session.selection().active_novel_id;
    for novel in session.novels() {
        let stats = ManuscriptStats::for_novel(novel);
        let title_cell = if active == Some(novel.id) {
            Cell::new(&novel.title)
                .fg(Color::Green)
                .add_attribute(Attribute::Bold)
        } else {
            Cell::new(&novel.title)
        };
        let updated = novel
            .updated_at()
            .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_else(|| "-".to_string());
        table.add_row(vec![
            dim_cell(short_id(novel)),
            title_cell,
            Cell::new(&novel.author),
            Cell::new(&novel.genre),
            Cell::new(stats.chapter_count),
            Cell::new(stats.total_words),
            dim_cell(updated),
        ]);
    }
    println!("{table}");
    session.close();
    Ok(())
}

pub fn run_create(library: Option<&Path>, args: &CreateArgs) -> anyhow::Result<()> {
    let mut session = open_session(library)?;
    let id = session.create_novel(&args.title)?;
    session.update_novel_meta(|novel| {
        if let Some(author) = &args.author {
            novel.author = author.clone();
        }
        if let Some(genre) = &args.genre {
            novel.genre = genre.clone();
        }
        if let Some(language) = &args.language {
            novel.language = language.clone();
        }
        if let Some(synopsis) = &args.synopsis {
            novel.synopsis = synopsis.clone();
        }
    });
    close_reporting(&mut session)?;
    println!("Created {:?} ({})", args.title, &id.to_string()[..8]);
    Ok(())
}

pub fn run_show(library: Option<&Path>, query: &str) -> anyhow::Result<()> {
    let mut session = open_session(library)?;
    let id = resolve_novel(&session, query)?;
    session.select_novel(id)?;
    let novel = session
        .active_novel()
        .ok_or_else(|| anyhow!("novel disappeared while opening it"))?;

    println!("{} ({})", novel.title, short_id(novel));
    if !novel.author.is_empty() {
        println!("by {}", novel.author);
    }
    if !novel.synopsis.is_empty() {
        println!("{}", novel.synopsis);
    }
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("#"),
        header_cell("Chapter"),
        header_cell("Words"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    align_column(&mut table, 2, CellAlignment::Right);
    let active_chapter = session.selection().active_chapter_id();
    for (index, chapter) in novel.chapters.iter().enumerate() {
        let title_cell = if active_chapter == Some(chapter.id) {
            Cell::new(&chapter.title).add_attribute(Attribute::Bold)
        } else {
            Cell::new(&chapter.title)
        };
        table.add_row(vec![
            Cell::new(index + 1),
            title_cell,
            Cell::new(chapter.word_count()),
        ]);
    }
    println!("{table}");
    session.close();
    Ok(())
}

pub fn run_stats(library: Option<&Path>, query: &str) -> anyhow::Result<()> {
    let mut session = open_session(library)?;
    let id = resolve_novel(&session, query)?;
    let novel = session
        .novels()
        .iter()
        .find(|n| n.id == id)
        .ok_or_else(|| anyhow!("novel disappeared while opening it"))?;
    let stats = ManuscriptStats::for_novel(novel);

    println!("{}", novel.title);
    let mut table = Table::new();
    table.set_header(vec![header_cell("Chapter"), header_cell("Words")]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    for chapter in &stats.chapters {
        table.add_row(vec![Cell::new(&chapter.title), Cell::new(chapter.words)]);
    }
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        Cell::new(stats.total_words).add_attribute(Attribute::Bold),
    ]);
    println!("{table}");
    println!(
        "{} chapters, ~{} min reading time, {:.0}% dialogue",
        stats.chapter_count,
        stats.reading_minutes,
        stats.dialogue_ratio * 100.0
    );
    session.close();
    Ok(())
}

pub fn run_export_backup(library: Option<&Path>, out: &Path) -> anyhow::Result<()> {
    let mut session = open_session(library)?;
    let payload = session.export_backup()?;
    std::fs::write(out, payload)
        .with_context(|| format!("could not write backup to {}", out.display()))?;
    println!(
        "Exported {} novels to {}",
        session.novels().len(),
        out.display()
    );
    session.close();
    Ok(())
}

pub fn run_import_backup(library: Option<&Path>, file: &Path) -> anyhow::Result<()> {
    let mut session = open_session(library)?;
    let raw = std::fs::read_to_string(file)
        .with_context(|| format!("could not read backup from {}", file.display()))?;
    let result = session.import_backup(&raw);
    print_notifications(&mut session);
    result?;
    session.close();
    Ok(())
}

pub fn run_export(
    library: Option<&Path>,
    query: &str,
    format: ManuscriptFormatArg,
    out: &Path,
) -> anyhow::Result<()> {
    let mut session = open_session(library)?;
    let id = resolve_novel(&session, query)?;
    let format = match format {
        ManuscriptFormatArg::Markdown => ManuscriptFormat::Markdown,
        ManuscriptFormatArg::Text => ManuscriptFormat::Text,
    };
    let rendered = session.export_manuscript(id, format)?;
    std::fs::write(out, rendered)
        .with_context(|| format!("could not write manuscript to {}", out.display()))?;
    println!("Exported to {}", out.display());
    session.close();
    Ok(())
}

pub fn run_assist(
    library: Option<&Path>,
    action: AssistAction,
    query: &str,
    chapter: Option<usize>,
) -> anyhow::Result<()> {
    let settings = StudioSettings::load();
    let ai = AiService::from_settings(&settings.ai).map_err(|e| anyhow!(e.user_message()))?;

    let mut session = open_session(library)?;
    let id = resolve_novel(&session, query)?;
    session.select_novel(id)?;
    if let Some(number) = chapter {
        let novel = session
            .active_novel()
            .ok_or_else(|| anyhow!("novel disappeared while opening it"))?;
        let chapter_id = number
            .checked_sub(1)
            .and_then(|i| novel.chapters.get(i))
            .map(|c| c.id)
            .ok_or_else(|| {
                anyhow!(
                    "chapter {number} does not exist; the novel has {}",
                    novel.chapters.len()
                )
            })?;
        session.select_chapter(chapter_id)?;
    }

    let runtime = tokio::runtime::Runtime::new().context("could not start the async runtime")?;
    let result = runtime.block_on(async {
        match action {
            AssistAction::Continue => session.continue_active_chapter(&ai).await,
            AssistAction::Proofread => session.proofread_active_chapter(&ai).await,
            AssistAction::Enhance => {
                let content = session
                    .active_chapter()
                    .map(|c| c.content.clone())
                    .unwrap_or_default();
                let improved = session.enhance_text(&ai, &content).await?;
                session.set_active_chapter_content(improved);
                Ok(())
            }
        }
    });
    print_notifications(&mut session);
    result?;
    close_reporting(&mut session)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn seeded_session(titles: &[&str]) -> (tempfile::TempDir, StudioSession<FileStore>) {
        let dir = tempdir().unwrap();
        let mut session = open_session(Some(dir.path())).unwrap();
        for title in titles {
            session.create_novel(*title).unwrap();
        }
        (dir, session)
    }

    #[test]
    fn test_resolve_by_exact_title_ignores_case() {
        let (_dir, session) = seeded_session(&["The Long Rain", "Other"]);
        let id = resolve_novel(&session, "the long rain").unwrap();
        assert_eq!(session.novels()[0].id, id);
    }

    #[test]
    fn test_resolve_by_id_prefix() {
        let (_dir, session) = seeded_session(&["Only"]);
        let id = session.novels()[0].id;
        let prefix = &id.to_string()[..8];
        assert_eq!(resolve_novel(&session, prefix).unwrap(), id);
    }

    #[test]
    fn test_resolve_unknown_title_fails() {
        let (_dir, session) = seeded_session(&["Only"]);
        assert!(resolve_novel(&session, "Missing").is_err());
    }

    #[test]
    fn test_resolve_duplicate_titles_is_ambiguous() {
        let (_dir, session) = seeded_session(&["Twin", "Twin"]);
        let error = resolve_novel(&session, "Twin").unwrap_err();
        assert!(error.to_string().contains("2 novels"));
    }

    #[test]
    fn test_library_survives_reopen() {
        let dir = tempdir().unwrap();
        let mut session = open_session(Some(dir.path())).unwrap();
        session.create_novel("Persisted").unwrap();
        session.close();

        let session = open_session(Some(dir.path())).unwrap();
        assert_eq!(session.novels().len(), 1);
        assert_eq!(session.novels()[0].title, "Persisted");
    }
}
