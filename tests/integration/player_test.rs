//! Integration tests for players picking up cross-page seeks

use tempfile::TempDir;

use audiomark::bookmarks::BookmarkList;
use audiomark::coordinator::{Coordinator, HeadlessMedia, MediaHandle};
use audiomark::cues::parse_lyric_document;
use audiomark::link::{Anchor, DocumentId, LinkProtocol, LinkResolver, PointerEvent, SeekSink};
use audiomark::player::{PlayerInstance, PlayerSpec};
use audiomark::seek::{FileSlot, LineRange, SeekEvent, SeekSlot};

use crate::helpers::load_fixture;

/// Active page `Index.md` links into `Episode.md`, whose player block spans
/// lines 10-20.
struct TwoPages;

impl LinkResolver for TwoPages {
    fn active_document(&self) -> Option<DocumentId> {
        Some(DocumentId::new("Index.md"))
    }

    fn resolve_page(&self, page: &str, _from: &DocumentId) -> Option<DocumentId> {
        (page == "Episode").then(|| DocumentId::new("Episode.md"))
    }

    fn resolve_block(&self, document: &DocumentId, subpath: &str) -> Option<LineRange> {
        (document.as_str() == "Episode.md" && subpath == "^chapters")
            .then(|| LineRange::new(12, 18))
    }
}

struct NoDispatch;

impl SeekSink for NoDispatch {
    fn seek_to_timestamp(&mut self, event: SeekEvent) {
        panic!("unexpected same-page dispatch {:?}", event);
    }
}

fn spec(source: &str, lines: Option<LineRange>) -> PlayerSpec {
    PlayerSpec {
        document: DocumentId::new("Episode.md"),
        source: source.to_string(),
        title: source.to_string(),
        bookmarks: BookmarkList::from_lyrics(&parse_lyric_document(&load_fixture("song.lrc"))),
        lines,
    }
}

fn session() -> Coordinator<HeadlessMedia> {
    Coordinator::new(HeadlessMedia::new().with_duration(3600.0))
}

#[test]
fn cross_page_click_is_picked_up_by_owning_player() {
    let dir = TempDir::new().unwrap();
    let slot_path = dir.path().join("seek-request");

    // On the index page: click a link into the episode page.
    let mut protocol = LinkProtocol::new(TwoPages, FileSlot::new(&slot_path));
    protocol
        .handle(
            PointerEvent::Click(Anchor::new("03:20.250", Some("Episode#^chapters"))),
            &mut NoDispatch,
        )
        .unwrap();

    // The episode page renders in a fresh session with two players.
    let mut coordinator = session();
    let mut slot = FileSlot::new(&slot_path);
    let trailer = PlayerInstance::mount(
        spec("trailer.mp3", Some(LineRange::new(1, 8))),
        &mut coordinator,
        &mut slot,
    );
    assert!(!trailer.is_active(&coordinator));
    assert!(slot.read().unwrap().is_some());

    let episode = PlayerInstance::mount(
        spec("episode.mp3", Some(LineRange::new(10, 20))),
        &mut coordinator,
        &mut slot,
    );
    assert!(episode.is_active(&coordinator));
    assert!(!episode.state().paused);
    assert_eq!(coordinator.media().current_time(), 200.25);
    assert_eq!(slot.read().unwrap(), None);
    assert!(!slot_path.exists());
}

#[test]
fn hover_preview_player_takes_request_without_range() {
    let dir = TempDir::new().unwrap();
    let slot_path = dir.path().join("seek-request");

    let mut protocol = LinkProtocol::new(TwoPages, FileSlot::new(&slot_path));
    protocol
        .handle(
            PointerEvent::MouseOver(Anchor::new("00:22.220", Some("Episode#^chapters"))),
            &mut NoDispatch,
        )
        .unwrap();

    let mut coordinator = session();
    let mut slot = FileSlot::new(&slot_path);
    let preview = PlayerInstance::mount(spec("episode.mp3", None), &mut coordinator, &mut slot);

    assert!(preview.is_active(&coordinator));
    assert_eq!(coordinator.media().current_time(), 22.22);
    assert_eq!(slot.read().unwrap(), None);
}

#[test]
fn mouse_out_before_render_leaves_nothing_to_pick_up() {
    let dir = TempDir::new().unwrap();
    let slot_path = dir.path().join("seek-request");

    let mut protocol = LinkProtocol::new(TwoPages, FileSlot::new(&slot_path));
    protocol
        .handle(
            PointerEvent::MouseOver(Anchor::new("00:22.220", None)),
            &mut NoDispatch,
        )
        .unwrap();
    protocol.handle(PointerEvent::MouseOut, &mut NoDispatch).unwrap();

    let mut coordinator = session();
    let mut slot = FileSlot::new(&slot_path);
    let preview = PlayerInstance::mount(spec("episode.mp3", None), &mut coordinator, &mut slot);

    assert!(!preview.is_active(&coordinator));
    assert_eq!(coordinator.media().source(), None);
}

#[test]
fn transport_commands_drive_the_active_player() {
    let dir = TempDir::new().unwrap();
    let mut slot = FileSlot::new(dir.path().join("seek-request"));
    let mut coordinator = session();

    let mut first = PlayerInstance::mount(spec("first.mp3", None), &mut coordinator, &mut slot);
    let mut second = PlayerInstance::mount(spec("second.mp3", None), &mut coordinator, &mut slot);

    // Clicking the second bookmark of the first player.
    assert!(first.jump_to(1, &mut coordinator));
    assert_eq!(first.state().current_bookmark, Some(1));
    assert_eq!(coordinator.media().current_time(), 22.22);

    coordinator.skip_forward();
    coordinator.add_bookmark();
    coordinator.toggle_loop();
    coordinator.toggle();

    first.pump(&mut coordinator);
    second.pump(&mut coordinator);

    assert_eq!(first.bookmarks().len(), 4);
    assert_eq!(first.bookmarks().get(3), Some("00:27.220 --- "));
    assert!(first.state().looping);
    assert!(first.state().paused);

    assert_eq!(second.bookmarks().len(), 3);
    assert!(!second.state().looping);
    assert!(second.state().paused);
    assert!(coordinator.media().is_paused());
    assert!(coordinator.media().is_looping());
}
