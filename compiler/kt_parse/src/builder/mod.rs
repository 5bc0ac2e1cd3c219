//! Marker-based tree building.
//!
//! Grammar rules never allocate nodes directly. They open a [`Marker`] at
//! the current token, consume tokens, and close the marker with a node
//! kind. The parser records this as a flat log of [`Event`]s; the tree is
//! materialized once, in [`Parser::finish`], by replaying the log into a
//! [`TreeBuilder`].
//!
//! Working on a log keeps the speculative rules cheap:
//!
//! - [`Marker::rollback_to`] truncates the log, the error list and the
//!   cursor's remaps back to the marker, so a failed attempt leaves no
//!   trace.
//! - [`CompletedMarker::precede`] opens a new node *around* an already
//!   closed one in O(1) by linking the two `Start` events
//!   (`forward_parent`). Left-recursive shapes such as `a + b + c` or
//!   `a.b().c` are built this way.
//!
//! Every marker must be closed exactly once (`done`, `error`, `collapse`,
//! `abandon` or `rollback_to` all consume it); a leaked marker trips a
//! debug assertion.

use std::mem;

use kt_diagnostic::ErrorCode;
use kt_ir::{NodeKind, SyntaxTree, TokenList, TreeBuilder};

use crate::cursor::CursorCheckpoint;
use crate::{ParseError, ParseOutput, Parser};

/// How a node's edges treat the trivia around it.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub(crate) enum Binders {
    /// Leading and trailing trivia stay outside the node.
    #[default]
    Default,
    /// Comments directly before the node, and comments after it on the same
    /// line, are pulled inside.
    Comments,
}

#[derive(Debug)]
pub(crate) enum Event {
    /// Opens a node. `kind: None` is an abandoned marker (a tombstone).
    Start {
        kind: Option<NodeKind>,
        /// Raw index of the first significant token of the node.
        token: u32,
        /// Event index of the node wrapping this one, set by `precede`.
        forward_parent: Option<u32>,
        binders: Binders,
        message: Option<Box<str>>,
        lazy: bool,
    },
    Finish {
        /// Raw index just past the last consumed token.
        token: u32,
    },
}

impl Event {
    fn tombstone() -> Self {
        Event::Start {
            kind: None,
            token: 0,
            forward_parent: None,
            binders: Binders::Default,
            message: None,
            lazy: false,
        }
    }
}

/// An open node.
#[must_use = "markers must be closed with done, abandon or rollback_to"]
pub(crate) struct Marker {
    pos: u32,
    checkpoint: CursorCheckpoint,
    closed: bool,
}

/// A closed node that can still be wrapped with [`CompletedMarker::precede`].
#[derive(Copy, Clone, Debug)]
pub(crate) struct CompletedMarker {
    pos: u32,
    kind: NodeKind,
    checkpoint: CursorCheckpoint,
}

fn to_u32(value: usize) -> u32 {
    u32::try_from(value).unwrap_or(u32::MAX)
}

impl Marker {
    fn close(&mut self) {
        self.closed = true;
    }

    /// Close the node as `kind`.
    pub(crate) fn done(mut self, p: &mut Parser<'_>, kind: NodeKind) -> CompletedMarker {
        self.close();
        p.complete(self.pos, kind, None, false);
        CompletedMarker {
            pos: self.pos,
            kind,
            checkpoint: self.checkpoint,
        }
    }

    /// Close the node as `kind` if `keep`, otherwise abandon it.
    pub(crate) fn done_if(self, p: &mut Parser<'_>, kind: NodeKind, keep: bool) {
        if keep {
            self.done(p, kind);
        } else {
            self.abandon(p);
        }
    }

    /// Forget the marker. Its tokens belong to the enclosing node.
    pub(crate) fn abandon(mut self, p: &mut Parser<'_>) {
        self.close();
        if let Some(Event::Start { kind, .. }) = p.events.get_mut(self.pos as usize) {
            *kind = None;
        }
    }

    /// Undo everything since the marker was opened: events, errors, remaps
    /// and the cursor position.
    pub(crate) fn rollback_to(mut self, p: &mut Parser<'_>) {
        self.close();
        p.truncate_events(self.pos);
        p.cursor.restore(self.checkpoint);
    }

    /// Close the node as an `ERROR_ELEMENT` and report `message`.
    pub(crate) fn error(mut self, p: &mut Parser<'_>, code: ErrorCode, message: impl Into<String>) {
        self.close();
        let message: String = message.into();
        let span = p.cursor.span_since(self.checkpoint.position());
        p.errors
            .push((self.pos, ParseError::new(code, message.clone(), span)));
        p.complete(self.pos, NodeKind::Error, Some(message.into_boxed_str()), false);
    }

    /// Close the node as `kind`, discarding its inner structure. The tokens
    /// consumed since the marker opened become direct children and the node
    /// is flagged lazy.
    pub(crate) fn collapse(mut self, p: &mut Parser<'_>, kind: NodeKind) -> CompletedMarker {
        self.close();
        p.truncate_events(self.pos + 1);
        p.complete(self.pos, kind, None, true);
        CompletedMarker {
            pos: self.pos,
            kind,
            checkpoint: self.checkpoint,
        }
    }

    /// Pull adjacent comments into the node.
    #[cfg_attr(not(test), allow(dead_code))]
    pub(crate) fn set_comment_binders(&self, p: &mut Parser<'_>) {
        p.set_binders(self.pos, Binders::Comments);
    }
}

impl Drop for Marker {
    fn drop(&mut self) {
        debug_assert!(
            self.closed || std::thread::panicking(),
            "marker at event {} was never closed",
            self.pos
        );
    }
}

impl CompletedMarker {
    /// Open a new node that will contain this one as its first child.
    pub(crate) fn precede(self, p: &mut Parser<'_>) -> Marker {
        let parent = p.start_event(self.checkpoint);
        if let Some(Event::Start { forward_parent, .. }) = p.events.get_mut(self.pos as usize) {
            *forward_parent = Some(parent.pos);
        }
        p.precedes.push((self.pos, parent.pos));
        parent
    }

    pub(crate) fn kind(&self) -> NodeKind {
        self.kind
    }

    /// Pull adjacent comments into the node.
    pub(crate) fn set_comment_binders(&self, p: &mut Parser<'_>) {
        p.set_binders(self.pos, Binders::Comments);
    }
}

impl<'a> Parser<'a> {
    /// Open a node at the current token.
    pub(crate) fn mark(&mut self) -> Marker {
        let checkpoint = self.cursor.checkpoint();
        self.start_event(checkpoint)
    }

    fn start_event(&mut self, checkpoint: CursorCheckpoint) -> Marker {
        let pos = to_u32(self.events.len());
        self.events.push(Event::Start {
            kind: None,
            token: to_u32(checkpoint.position()),
            forward_parent: None,
            binders: Binders::Default,
            message: None,
            lazy: false,
        });
        Marker {
            pos,
            checkpoint,
            closed: false,
        }
    }

    fn complete(&mut self, pos: u32, node: NodeKind, text: Option<Box<str>>, is_lazy: bool) {
        if let Some(Event::Start {
            kind,
            message,
            lazy,
            ..
        }) = self.events.get_mut(pos as usize)
        {
            *kind = Some(node);
            *message = text;
            *lazy = is_lazy;
        }
        let token = to_u32(self.cursor.last_end());
        self.events.push(Event::Finish { token });
    }

    fn set_binders(&mut self, pos: u32, value: Binders) {
        if let Some(Event::Start { binders, .. }) = self.events.get_mut(pos as usize) {
            *binders = value;
        }
    }

    /// Drop every event, error and `precede` link at or after event `pos`.
    fn truncate_events(&mut self, pos: u32) {
        self.events.truncate(pos as usize);
        self.errors.retain(|(at, _)| *at < pos);
        while let Some(&(child, parent)) = self.precedes.last() {
            if parent < pos {
                break;
            }
            self.precedes.pop();
            if let Some(Event::Start { forward_parent, .. }) = self.events.get_mut(child as usize)
            {
                *forward_parent = None;
            }
        }
    }

    /// Replay the event log into a syntax tree.
    pub fn finish(self) -> ParseOutput {
        let Parser {
            cursor,
            mut events,
            errors,
            ..
        } = self;
        let tokens = cursor.tokens();
        let bounds = cursor.bounds();
        let limit = to_u32(bounds.end);
        let mut builder = TreeBuilder::with_range(
            tokens,
            NodeKind::Root,
            to_u32(bounds.start)..limit,
        );
        for (index, kind) in cursor.remaps() {
            builder.remap_token(index, kind);
        }

        let mut open: Vec<(Option<Box<str>>, bool, Binders)> = Vec::new();
        let mut chain: Vec<PendingStart> = Vec::new();
        for index in 0..events.len() {
            match mem::replace(&mut events[index], Event::tombstone()) {
                Event::Start {
                    kind,
                    token,
                    forward_parent,
                    binders,
                    message,
                    lazy,
                } => {
                    chain.push(PendingStart {
                        kind,
                        token,
                        binders,
                        message,
                        lazy,
                    });
                    let mut next = forward_parent;
                    while let Some(parent) = next {
                        next = None;
                        let Some(slot) = events.get_mut(parent as usize) else {
                            break;
                        };
                        if let Event::Start {
                            kind,
                            token,
                            forward_parent,
                            binders,
                            message,
                            lazy,
                        } = mem::replace(slot, Event::tombstone())
                        {
                            chain.push(PendingStart {
                                kind,
                                token,
                                binders,
                                message,
                                lazy,
                            });
                            next = forward_parent;
                        }
                    }
                    for start in chain.drain(..).rev() {
                        let Some(kind) = start.kind else {
                            continue;
                        };
                        let first = leading_edge(tokens, start.token, start.binders, builder.position());
                        builder.tokens_until(first);
                        builder.start_node(kind);
                        open.push((start.message, start.lazy, start.binders));
                    }
                }
                Event::Finish { token } => {
                    let Some((message, lazy, binders)) = open.pop() else {
                        continue;
                    };
                    let end = trailing_edge(tokens, token.max(builder.position()), binders, limit);
                    builder.tokens_until(end);
                    builder.finish_node(message, lazy);
                }
            }
        }
        debug_assert!(open.is_empty(), "unbalanced event log");

        let tree: SyntaxTree = builder.finish();
        let mut errors: Vec<ParseError> = errors.into_iter().map(|(_, error)| error).collect();
        errors.sort_by_key(|error| error.span.start);
        ParseOutput { tree, errors }
    }
}

struct PendingStart {
    kind: Option<NodeKind>,
    token: u32,
    binders: Binders,
    message: Option<Box<str>>,
    lazy: bool,
}

/// First raw token of a node starting at significant token `token`.
fn leading_edge(tokens: &TokenList, token: u32, binders: Binders, floor: u32) -> u32 {
    if binders != Binders::Comments {
        return token;
    }
    let mut first = token;
    let mut index = token;
    while index > floor {
        let kind = tokens.kind(index as usize - 1);
        if !kind.is_trivia() {
            break;
        }
        index -= 1;
        if kind.is_comment() {
            first = index;
        }
    }
    first
}

/// Raw index just past the last token of a node ending at `end`.
fn trailing_edge(tokens: &TokenList, end: u32, binders: Binders, limit: u32) -> u32 {
    if binders != Binders::Comments {
        return end;
    }
    let mut last = end;
    let mut index = end;
    while index < limit {
        let kind = tokens.kind(index as usize);
        if !kind.is_trivia() || tokens.flags(index as usize).has_newline_before() {
            break;
        }
        index += 1;
        if kind.is_comment() {
            last = index;
        }
    }
    last
}
