//! Integration tests for timestamp link routing

use std::collections::HashMap;

use audiomark::bookmarks::BookmarkList;
use audiomark::coordinator::{Coordinator, HeadlessMedia, MediaHandle};
use audiomark::link::{
    Anchor, DocumentId, LinkOutcome, LinkProtocol, LinkResolver, PointerEvent, SeekSink,
};
use audiomark::player::{PlayerInstance, PlayerSpec};
use audiomark::seek::{LineRange, MemorySlot, SeekEvent, SeekRequest, SeekSlot};
use audiomark::TimeCode;

/// Two documents: `Today.md` (active) and `Archive.md`, each with block
/// references and one heading.
struct FakeVault {
    active: Option<DocumentId>,
    blocks: HashMap<(String, String), LineRange>,
}

impl FakeVault {
    fn new() -> Self {
        let mut blocks = HashMap::new();
        blocks.insert(("Today.md".into(), "^intro".into()), LineRange::new(2, 6));
        blocks.insert(("Today.md".into(), "^outro".into()), LineRange::new(14, 18));
        blocks.insert(("Archive.md".into(), "^talk".into()), LineRange::new(30, 40));
        Self {
            active: Some(DocumentId::new("Today.md")),
            blocks,
        }
    }
}

impl LinkResolver for FakeVault {
    fn active_document(&self) -> Option<DocumentId> {
        self.active.clone()
    }

    fn resolve_page(&self, page: &str, _from: &DocumentId) -> Option<DocumentId> {
        match page {
            "Today" | "Today.md" => Some(DocumentId::new("Today.md")),
            "Archive" | "Archive.md" => Some(DocumentId::new("Archive.md")),
            _ => None,
        }
    }

    fn resolve_block(&self, document: &DocumentId, subpath: &str) -> Option<LineRange> {
        self.blocks
            .get(&(document.as_str().to_string(), subpath.to_string()))
            .copied()
    }
}

#[derive(Default)]
struct RecordingSink(Vec<SeekEvent>);

impl SeekSink for RecordingSink {
    fn seek_to_timestamp(&mut self, event: SeekEvent) {
        self.0.push(event);
    }
}

fn protocol() -> LinkProtocol<FakeVault, MemorySlot> {
    LinkProtocol::new(FakeVault::new(), MemorySlot::new())
}

fn click<'a>(text: &'a str, href: Option<&'a str>) -> PointerEvent<'a> {
    PointerEvent::Click(Anchor::new(text, href))
}

fn hover(text: &str) -> PointerEvent<'_> {
    PointerEvent::MouseOver(Anchor::new(text, None))
}

#[test]
fn hover_then_mouse_out_leaves_slot_empty() {
    let mut protocol = protocol();
    let mut sink = RecordingSink::default();

    let outcome = protocol.handle(hover("00:17.020"), &mut sink).unwrap();
    assert_eq!(
        outcome,
        LinkOutcome::Stashed(SeekRequest::hover(TimeCode::from_millis(17_020)))
    );
    assert_eq!(protocol.slot().raw(), Some("::17.02"));

    let outcome = protocol.handle(PointerEvent::MouseOut, &mut sink).unwrap();
    assert_eq!(outcome, LinkOutcome::Cleared);
    assert_eq!(protocol.slot().read().unwrap(), None);
    assert!(sink.0.is_empty());
}

#[test]
fn same_page_click_dispatches_exactly_once() {
    let mut protocol = protocol();
    let mut sink = RecordingSink::default();

    let outcome = protocol
        .handle(click("01:05.000", Some("Today#^outro")), &mut sink)
        .unwrap();

    let expected = SeekEvent {
        document: DocumentId::new("Today.md"),
        lines: LineRange::new(14, 18),
        time: TimeCode::from_millis(65_000),
    };
    assert_eq!(outcome, LinkOutcome::Dispatched(expected.clone()));
    assert!(outcome.suppresses_default());
    assert_eq!(sink.0, vec![expected]);
    assert_eq!(protocol.slot().raw(), None);
}

#[test]
fn bare_fragment_targets_active_document() {
    let mut protocol = protocol();
    let mut sink = RecordingSink::default();

    protocol
        .handle(click("00:03.500", Some("#^intro")), &mut sink)
        .unwrap();

    assert_eq!(sink.0.len(), 1);
    assert_eq!(sink.0[0].document, DocumentId::new("Today.md"));
    assert_eq!(sink.0[0].lines, LineRange::new(2, 6));
}

#[test]
fn cross_page_click_writes_slot_without_dispatch() {
    let mut protocol = protocol();
    let mut sink = RecordingSink::default();

    let outcome = protocol
        .handle(click("02:05.500", Some("Archive#^talk")), &mut sink)
        .unwrap();

    let expected = SeekRequest::block(LineRange::new(30, 40), TimeCode::from_millis(125_500));
    assert_eq!(outcome, LinkOutcome::Stashed(expected));
    assert!(sink.0.is_empty());
    assert_eq!(protocol.slot().raw(), Some("30:40:125.5"));
}

#[test]
fn non_timestamp_links_pass_through() {
    let mut protocol = protocol();
    let mut sink = RecordingSink::default();

    let outcome = protocol
        .handle(click("Read more", Some("Archive#^talk")), &mut sink)
        .unwrap();
    assert_eq!(outcome, LinkOutcome::Passthrough);
    assert!(!outcome.suppresses_default());

    let outcome = protocol.handle(hover("tomorrow"), &mut sink).unwrap();
    assert_eq!(outcome, LinkOutcome::Passthrough);
    assert_eq!(protocol.slot().raw(), None);
}

#[test]
fn unroutable_timestamp_links_are_inert() {
    let mut protocol = protocol();
    let mut sink = RecordingSink::default();

    let cases = [
        None,
        Some("Today"),
        Some("Today#Heading"),
        Some("Nowhere#^intro"),
        Some("Archive#^missing"),
    ];
    for href in cases {
        let outcome = protocol.handle(click("00:10.000", href), &mut sink).unwrap();
        assert_eq!(outcome, LinkOutcome::Inert, "href {:?}", href);
        assert!(outcome.suppresses_default());
    }

    assert!(sink.0.is_empty());
    assert_eq!(protocol.slot().raw(), None);
}

#[test]
fn no_active_document_is_inert() {
    let mut protocol = protocol();
    protocol.resolver_mut().active = None;
    let mut sink = RecordingSink::default();

    let outcome = protocol
        .handle(click("00:10.000", Some("Archive#^talk")), &mut sink)
        .unwrap();
    assert_eq!(outcome, LinkOutcome::Inert);
}

#[test]
fn mouse_out_of_previous_link_does_not_clobber_later_click() {
    let mut protocol = protocol();
    let mut sink = RecordingSink::default();

    protocol.handle(hover("00:01.000"), &mut sink).unwrap();
    protocol.handle(PointerEvent::MouseOut, &mut sink).unwrap();
    protocol
        .handle(click("00:35.000", Some("Archive#^talk")), &mut sink)
        .unwrap();

    assert_eq!(protocol.slot().raw(), Some("30:40:35"));
}

#[test]
fn same_page_click_seeks_only_the_owning_player() {
    let mut coordinator = Coordinator::new(HeadlessMedia::new().with_duration(600.0));
    let mut slot = MemorySlot::new();
    let player = |source: &str, lines| PlayerSpec {
        document: DocumentId::new("Today.md"),
        source: source.to_string(),
        title: source.to_string(),
        bookmarks: BookmarkList::new(),
        lines: Some(lines),
    };
    let mut intro = PlayerInstance::mount(
        player("intro.mp3", LineRange::new(1, 8)),
        &mut coordinator,
        &mut slot,
    );
    let mut outro = PlayerInstance::mount(
        player("outro.mp3", LineRange::new(12, 20)),
        &mut coordinator,
        &mut slot,
    );

    let mut protocol = protocol();
    let outcome = protocol
        .handle(click("00:42.000", Some("#^outro")), &mut coordinator)
        .unwrap();
    assert!(matches!(outcome, LinkOutcome::Dispatched(_)));

    assert_eq!(intro.pump(&mut coordinator), 0);
    // The seek, then the resume it broadcasts.
    assert_eq!(outro.pump(&mut coordinator), 2);
    assert_eq!(intro.pump(&mut coordinator), 1);

    assert!(outro.is_active(&coordinator));
    assert!(!intro.is_active(&coordinator));
    assert_eq!(coordinator.media().current_time(), 42.0);
    assert!(!outro.state().paused);
    assert!(!intro.state().paused);
}

#[test]
fn same_page_click_skips_overlapping_player_in_other_document() {
    let mut coordinator = Coordinator::new(HeadlessMedia::new().with_duration(600.0));
    let mut slot = MemorySlot::new();
    let player = |document: &str, source: &str, lines| PlayerSpec {
        document: DocumentId::new(document),
        source: source.to_string(),
        title: source.to_string(),
        bookmarks: BookmarkList::new(),
        lines: Some(lines),
    };
    let mut today = PlayerInstance::mount(
        player("Today.md", "today.mp3", LineRange::new(14, 18)),
        &mut coordinator,
        &mut slot,
    );
    let mut archive = PlayerInstance::mount(
        player("Archive.md", "archive.mp3", LineRange::new(10, 20)),
        &mut coordinator,
        &mut slot,
    );

    let mut protocol = protocol();
    protocol
        .handle(click("00:42.000", Some("Today#^outro")), &mut coordinator)
        .unwrap();

    archive.pump(&mut coordinator);
    today.pump(&mut coordinator);
    archive.pump(&mut coordinator);

    assert_eq!(coordinator.media().source(), Some("today.mp3"));
    assert!(today.is_active(&coordinator));
    assert!(!archive.is_active(&coordinator));
    assert_eq!(coordinator.media().current_time(), 42.0);
}
