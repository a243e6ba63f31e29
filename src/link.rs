//! Timestamp link protocol.
//!
//! Any rendered link whose text is a valid timestamp acts as a seek control
//! instead of a navigation link. The link's destination decides which player
//! seeks:
//!
//! - destination block on the active document: one `seek-to-timestamp`
//!   dispatch to every mounted player, each of which checks the document
//!   and line range
//! - destination block on another document: the request goes to the
//!   [`SeekSlot`] for that page's player to pick up when it renders
//! - hover: always the slot, with an empty line range, since a hover preview
//!   holds exactly one player
//! - hover exit: the slot is cleared unconditionally
//!
//! Events must be fed in the order the host delivers them. A click is handled
//! synchronously before any later mouse-out, so a click's slot write is never
//! clobbered by a clear that the user triggered afterwards on another link.

use crate::seek::{LineRange, SeekEvent, SeekRequest, SeekSlot, SeekSlotError};
use crate::timecode::TimeCode;

/// Host document identifier, typically its vault path.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DocumentId(pub String);

impl DocumentId {
    pub fn new(path: impl Into<String>) -> Self {
        Self(path.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// The parts of a rendered anchor the protocol needs.
#[derive(Debug, Clone, Copy)]
pub struct Anchor<'a> {
    /// Visible link text
    pub text: &'a str,
    /// Destination reference, `page#subpath`
    pub href: Option<&'a str>,
}

impl<'a> Anchor<'a> {
    pub fn new(text: &'a str, href: Option<&'a str>) -> Self {
        Self { text, href }
    }

    /// The timestamp the link text denotes, if it is one.
    pub fn time(&self) -> Option<TimeCode> {
        self.text.parse().ok()
    }
}

/// Pointer input on a rendered anchor.
#[derive(Debug, Clone, Copy)]
pub enum PointerEvent<'a> {
    Click(Anchor<'a>),
    MouseOver(Anchor<'a>),
    MouseOut,
}

/// What the protocol did with an event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkOutcome {
    /// Not a timestamp link; default navigation proceeds
    Passthrough,
    /// Timestamp recognized but there is nothing to seek
    Inert,
    /// Same-page seek dispatched
    Dispatched(SeekEvent),
    /// Request written to the seek slot
    Stashed(SeekRequest),
    /// Seek slot cleared
    Cleared,
}

impl LinkOutcome {
    /// Whether the adapter must cancel navigation and stop propagation.
    pub fn suppresses_default(&self) -> bool {
        matches!(
            self,
            LinkOutcome::Inert | LinkOutcome::Dispatched(_) | LinkOutcome::Stashed(_)
        )
    }
}

/// Host lookups needed to route a click.
pub trait LinkResolver {
    /// Document currently shown, if any.
    fn active_document(&self) -> Option<DocumentId>;

    /// Resolve link text `page` relative to `from`.
    fn resolve_page(&self, page: &str, from: &DocumentId) -> Option<DocumentId>;

    /// Resolve `subpath` (without `#`) against the structural index of
    /// `document`. Only block references yield a range.
    fn resolve_block(&self, document: &DocumentId, subpath: &str) -> Option<LineRange>;
}

/// Receiver of same-page `seek-to-timestamp` dispatches.
pub trait SeekSink {
    fn seek_to_timestamp(&mut self, event: SeekEvent);
}

/// Split `page#subpath`. The subpath is `None` when absent or empty.
pub fn split_destination(href: &str) -> (&str, Option<&str>) {
    match href.split_once('#') {
        Some((page, subpath)) if !subpath.is_empty() => (page, Some(subpath)),
        Some((page, _)) => (page, None),
        None => (href, None),
    }
}

/// Routes pointer events on timestamp links.
pub struct LinkProtocol<R, S> {
    resolver: R,
    slot: S,
}

impl<R: LinkResolver, S: SeekSlot> LinkProtocol<R, S> {
    pub fn new(resolver: R, slot: S) -> Self {
        Self { resolver, slot }
    }

    pub fn resolver(&self) -> &R {
        &self.resolver
    }

    pub fn resolver_mut(&mut self) -> &mut R {
        &mut self.resolver
    }

    pub fn slot(&self) -> &S {
        &self.slot
    }

    pub fn slot_mut(&mut self) -> &mut S {
        &mut self.slot
    }

    /// Handle one pointer event.
    ///
    /// # Errors
    ///
    /// Returns slot storage failures. Resolution failures are not errors;
    /// they produce [`LinkOutcome::Inert`].
    pub fn handle(
        &mut self,
        event: PointerEvent<'_>,
        sink: &mut dyn SeekSink,
    ) -> Result<LinkOutcome, SeekSlotError> {
        match event {
            PointerEvent::Click(anchor) => self.click(anchor, sink),
            PointerEvent::MouseOver(anchor) => self.hover(anchor),
            PointerEvent::MouseOut => {
                self.slot.clear()?;
                Ok(LinkOutcome::Cleared)
            }
        }
    }

    fn click(
        &mut self,
        anchor: Anchor<'_>,
        sink: &mut dyn SeekSink,
    ) -> Result<LinkOutcome, SeekSlotError> {
        let Some(time) = anchor.time() else {
            return Ok(LinkOutcome::Passthrough);
        };

        let Some((target, lines)) = anchor.href.and_then(|href| self.resolve(href)) else {
            tracing::debug!(text = anchor.text, href = ?anchor.href, "timestamp link has no block target");
            return Ok(LinkOutcome::Inert);
        };

        let active = self.resolver.active_document();
        if active.as_ref() == Some(&target) {
            let event = SeekEvent {
                document: target,
                lines,
                time,
            };
            sink.seek_to_timestamp(event.clone());
            Ok(LinkOutcome::Dispatched(event))
        } else {
            let request = SeekRequest::block(lines, time);
            self.slot.write(&request)?;
            tracing::debug!(document = target.as_str(), %request, "stashed cross-page seek");
            Ok(LinkOutcome::Stashed(request))
        }
    }

    fn hover(&mut self, anchor: Anchor<'_>) -> Result<LinkOutcome, SeekSlotError> {
        let Some(time) = anchor.time() else {
            return Ok(LinkOutcome::Passthrough);
        };

        let request = SeekRequest::hover(time);
        self.slot.write(&request)?;
        Ok(LinkOutcome::Stashed(request))
    }

    /// Target document and block range of a destination reference.
    fn resolve(&self, href: &str) -> Option<(DocumentId, LineRange)> {
        let (page, subpath) = split_destination(href);
        let active = self.resolver.active_document()?;

        let target = if page.is_empty() {
            active
        } else {
            self.resolver.resolve_page(page, &active)?
        };

        let lines = self.resolver.resolve_block(&target, subpath?)?;
        Some((target, lines))
    }
}
