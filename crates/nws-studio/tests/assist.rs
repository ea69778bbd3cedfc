//! AI workflow tests against a scripted provider, no network.

use async_trait::async_trait;

use nws_ai::capability::CompletionProvider;
use nws_ai::{AiError, AiService, CharacterSketch, ProviderKind, RelationshipSketch};
use nws_persistence::{AutosaveConfig, MemoryStore};
use nws_studio::{NotifyLevel, StudioError, StudioSession};

/// Provider that answers from canned data, or fails on demand.
struct Scripted {
    fail: bool,
}

#[async_trait]
impl CompletionProvider for Scripted {
    fn kind(&self) -> ProviderKind {
        ProviderKind::OpenAi
    }

    async fn continue_story(&self, _text: &str, _language: &str) -> nws_ai::Result<String> {
        if self.fail {
            return Err(AiError::RateLimited { retry_after: 10 });
        }
        Ok("The water kept rising.".to_string())
    }

    async fn proofread(&self, text: &str, _language: &str) -> nws_ai::Result<String> {
        Ok(text.replace("teh", "the"))
    }

    async fn extract_characters(
        &self,
        _text: &str,
        _language: &str,
    ) -> nws_ai::Result<Vec<CharacterSketch>> {
        Ok(vec![
        CharacterSketch {
            name: "Mira".to_string(),
            role: "protagonist".to_string(),
            description: "Keeper of the dam.".to_string(),
            traits: vec!["stubborn".to_string()],
        },
        CharacterSketch {
            name: "mira".to_string(),
            role: "minor".to_string(),
            description: "Duplicate under another casing.".to_string(),
            traits: vec![],
        },
        ])
    }

    async fn extract_relationships(
        &self,
        _text: &str,
        _language: &str,
    ) -> nws_ai::Result<Vec<RelationshipSketch>> {
        Ok(vec![RelationshipSketch {
            source: "Mira".to_string(),
            target: "Tomas".to_string(),
            kind: "mentor".to_string(),
            description: String::new(),
        }])
    }
}

fn session_with_novel() -> StudioSession<MemoryStore> {
    let mut session = StudioSession::new(MemoryStore::new(), AutosaveConfig::default());
    session.open().unwrap();
    session.create_novel("Flood").unwrap();
    session.set_active_chapter_content("<p>It rained on teh village.</p>");
    session
}

fn service(fail: bool) -> AiService {
    AiService::with_provider(Box::new(Scripted { fail }))
}

#[tokio::test]
async fn continuation_appends_to_active_chapter() {
    let mut session = session_with_novel();
    session.continue_active_chapter(&service(false)).await.unwrap();

    let content = &session.active_chapter().unwrap().content;
    assert!(content.starts_with("<p>It rained on teh village.</p>"));
    assert!(content.ends_with("The water kept rising."));
    // The merge is one undoable edit.
    assert!(session.undo());
    assert_eq!(
        session.active_chapter().unwrap().content,
        "<p>It rained on teh village.</p>"
    );
}

#[tokio::test]
async fn proofread_replaces_content() {
    let mut session = session_with_novel();
    session.proofread_active_chapter(&service(false)).await.unwrap();
    assert_eq!(
        session.active_chapter().unwrap().content,
        "<p>It rained on the village.</p>"
    );
}

#[tokio::test]
async fn failure_leaves_document_untouched_and_notifies() {
    let mut session = session_with_novel();
    let before = session.novels().to_vec();

    let err = session
        .continue_active_chapter(&service(true))
        .await
        .unwrap_err();
    assert!(matches!(err, StudioError::Ai(AiError::RateLimited { .. })));
    assert_eq!(session.novels(), &before[..]);

    let notes = session.drain_notifications();
    assert_eq!(notes.len(), 1);
    assert_eq!(notes[0].level, NotifyLevel::Error);
}

#[tokio::test]
async fn extraction_merges_new_characters_once() {
    let mut session = session_with_novel();

    let added = session
        .extract_characters_into_novel(&service(false))
        .await
        .unwrap();
    // The duplicate casing of "Mira" is not added twice.
    assert_eq!(added, 1);
    let novel = session.active_novel().unwrap();
    assert_eq!(novel.characters.len(), 1);
    assert_eq!(novel.characters[0].name, "Mira");

    // Running extraction again adds nothing and records no history entry.
    let added = session
        .extract_characters_into_novel(&service(false))
        .await
        .unwrap();
    assert_eq!(added, 0);
}

#[tokio::test]
async fn relationship_extraction_dedupes_on_endpoints_and_kind() {
    let mut session = session_with_novel();

    let first = session
        .extract_relationships_into_novel(&service(false))
        .await
        .unwrap();
    let second = session
        .extract_relationships_into_novel(&service(false))
        .await
        .unwrap();
    assert_eq!(first, 1);
    assert_eq!(second, 0);
    assert_eq!(session.active_novel().unwrap().relationships.len(), 1);
}

#[tokio::test]
async fn unsupported_capability_surfaces_as_notification() {
    let mut session = session_with_novel();

    let err = session
        .analyze_active_novel(&service(false))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        StudioError::Ai(AiError::Unsupported { .. })
    ));
    assert_eq!(session.drain_notifications().len(), 1);
}

#[tokio::test]
async fn workflows_require_an_active_novel() {
    let mut session = StudioSession::new(MemoryStore::new(), AutosaveConfig::default());
    session.open().unwrap();

    let err = session
        .continue_active_chapter(&service(false))
        .await
        .unwrap_err();
    assert!(matches!(err, StudioError::NoActiveNovel));
}
