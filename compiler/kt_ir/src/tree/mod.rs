//! Concrete syntax tree storage.
//!
//! Nodes live in a flat arena indexed by [`NodeId`]. A node's children are
//! either other nodes or raw indices into the [`TokenList`] the tree was
//! built from, so the tree never copies token data and every token of the
//! input (trivia included) hangs under exactly one node.
//!
//! Trees are built bottom-up-in-order by [`TreeBuilder`]: open a node, feed
//! tokens, close the node. The builder enforces the nesting discipline;
//! deciding *which* nodes exist is the parser's job.

mod dump;

use std::ops::Range;

use rustc_hash::FxHashMap;

use crate::{NodeKind, Span, TokenKind, TokenList};

/// Index of a node in a [`SyntaxTree`].
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, PartialOrd, Ord)]
#[repr(transparent)]
pub struct NodeId(u32);

impl NodeId {
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// A child of a node.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum Element {
    Node(NodeId),
    /// Raw index into the token list.
    Token(u32),
}

#[derive(Clone, Debug, PartialEq, Eq)]
struct NodeData {
    kind: NodeKind,
    span: Span,
    /// Raw token range `first..end` covered by this node.
    tokens: Range<u32>,
    children: Vec<Element>,
    /// Function literal whose body was left unparsed.
    lazy: bool,
    /// Message of an `ERROR_ELEMENT`.
    message: Option<Box<str>>,
}

/// A finished syntax tree.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SyntaxTree {
    nodes: Vec<NodeData>,
    root: NodeId,
    /// Tokens whose kind the parser changed, e.g. `data` consumed as a modifier.
    remaps: FxHashMap<u32, TokenKind>,
}

impl SyntaxTree {
    #[inline]
    pub fn root(&self) -> NodeId {
        self.root
    }

    #[inline]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn kind(&self, node: NodeId) -> NodeKind {
        self.nodes[node.index()].kind
    }

    #[inline]
    pub fn span(&self, node: NodeId) -> Span {
        self.nodes[node.index()].span
    }

    /// Raw token range covered by `node`.
    #[inline]
    pub fn token_range(&self, node: NodeId) -> Range<u32> {
        self.nodes[node.index()].tokens.clone()
    }

    #[inline]
    pub fn children(&self, node: NodeId) -> &[Element] {
        &self.nodes[node.index()].children
    }

    /// Child nodes only, skipping tokens.
    pub fn child_nodes(&self, node: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.children(node).iter().filter_map(|child| match child {
            Element::Node(id) => Some(*id),
            Element::Token(_) => None,
        })
    }

    /// First child node of the given kind.
    pub fn child_of_kind(&self, node: NodeId, kind: NodeKind) -> Option<NodeId> {
        self.child_nodes(node).find(|&child| self.kind(child) == kind)
    }

    /// `true` for a function literal collapsed by lazy parsing.
    #[inline]
    pub fn is_lazy(&self, node: NodeId) -> bool {
        self.nodes[node.index()].lazy
    }

    /// Kind of the token at raw `index`, after parser remapping.
    pub fn token_kind(&self, tokens: &TokenList, index: u32) -> TokenKind {
        match self.remaps.get(&index) {
            Some(&kind) => kind,
            None => tokens.kind(index as usize),
        }
    }

    /// `true` if any function literal in the tree was left unparsed.
    pub fn has_lazy(&self) -> bool {
        self.nodes.iter().any(|n| n.lazy)
    }

    /// Message attached to an `ERROR_ELEMENT`.
    pub fn error_message(&self, node: NodeId) -> Option<&str> {
        self.nodes[node.index()].message.as_deref()
    }

    /// All nodes below `node` (inclusive) in preorder.
    pub fn descendants(&self, node: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack = vec![node];
        while let Some(next) = stack.pop() {
            out.push(next);
            let children: Vec<NodeId> = self.child_nodes(next).collect();
            stack.extend(children.into_iter().rev());
        }
        out
    }

    /// First node of `kind` in preorder.
    pub fn find_first(&self, kind: NodeKind) -> Option<NodeId> {
        self.descendants(self.root)
            .into_iter()
            .find(|&node| self.kind(node) == kind)
    }

    /// Number of nodes of `kind` in the whole tree.
    pub fn count(&self, kind: NodeKind) -> usize {
        self.nodes.iter().filter(|n| n.kind == kind).count()
    }

    /// Source text covered by `node`, trivia between its tokens included.
    pub fn text<'s>(&self, node: NodeId, source: &'s str) -> &'s str {
        source.get(self.span(node).to_range()).unwrap_or("")
    }

    /// All token indices under `node`, in source order.
    pub fn tokens_under(&self, node: NodeId) -> Vec<u32> {
        let mut out = Vec::new();
        self.collect_tokens(node, &mut out);
        out
    }

    fn collect_tokens(&self, node: NodeId, out: &mut Vec<u32>) {
        for child in self.children(node) {
            match *child {
                Element::Node(id) => self.collect_tokens(id, out),
                Element::Token(index) => out.push(index),
            }
        }
    }
}

struct OpenNode {
    kind: NodeKind,
    first: u32,
    children: Vec<Element>,
    lazy: bool,
    message: Option<Box<str>>,
}

/// Incremental constructor for a [`SyntaxTree`].
///
/// Tokens must be fed in increasing raw-index order; nodes close in LIFO
/// order. [`TreeBuilder::finish`] closes the root.
pub struct TreeBuilder<'a> {
    tokens: &'a TokenList,
    nodes: Vec<NodeData>,
    stack: Vec<OpenNode>,
    next_token: u32,
    end: u32,
    remaps: FxHashMap<u32, TokenKind>,
}

impl<'a> TreeBuilder<'a> {
    /// Start a tree over the whole token list whose root node has `root_kind`.
    pub fn new(tokens: &'a TokenList, root_kind: NodeKind) -> Self {
        let len = u32::try_from(tokens.len()).unwrap_or(u32::MAX);
        Self::with_range(tokens, root_kind, 0..len)
    }

    /// Start a tree covering only the raw tokens in `range`.
    pub fn with_range(tokens: &'a TokenList, root_kind: NodeKind, range: Range<u32>) -> Self {
        let len = u32::try_from(tokens.len()).unwrap_or(u32::MAX);
        let end = range.end.min(len);
        let mut builder = TreeBuilder {
            tokens,
            nodes: Vec::new(),
            stack: Vec::new(),
            next_token: range.start.min(end),
            end,
            remaps: FxHashMap::default(),
        };
        builder.start_node(root_kind);
        builder
    }

    /// Raw index of the next token to be attached.
    #[inline]
    pub fn position(&self) -> u32 {
        self.next_token
    }

    pub fn start_node(&mut self, kind: NodeKind) {
        self.stack.push(OpenNode {
            kind,
            first: self.next_token,
            children: Vec::new(),
            lazy: false,
            message: None,
        });
    }

    /// Record that the token at raw `index` is to be read as `kind`.
    pub fn remap_token(&mut self, index: u32, kind: TokenKind) {
        self.remaps.insert(index, kind);
    }

    /// Attach every token before raw index `end` to the innermost open node.
    pub fn tokens_until(&mut self, end: u32) {
        let end = end.min(self.end);
        while self.next_token < end {
            let index = self.next_token;
            if let Some(open) = self.stack.last_mut() {
                open.children.push(Element::Token(index));
            }
            self.next_token += 1;
        }
    }

    /// Close the innermost open node.
    pub fn finish_node(&mut self, message: Option<Box<str>>, lazy: bool) {
        // The root is closed by `finish`.
        debug_assert!(self.stack.len() > 1, "finish_node with only the root open");
        if self.stack.len() <= 1 {
            return;
        }
        if let Some(mut open) = self.stack.pop() {
            open.message = message;
            open.lazy = lazy;
            let id = self.close(open);
            if let Some(parent) = self.stack.last_mut() {
                parent.children.push(Element::Node(id));
            }
        }
    }

    fn close(&mut self, open: OpenNode) -> NodeId {
        let span = if open.first < self.next_token {
            let first = self.tokens.span(open.first as usize);
            let last = self.tokens.span(self.next_token as usize - 1);
            first.merge(last)
        } else {
            Span::point(self.tokens.span(open.first as usize).start)
        };
        let id = NodeId(u32::try_from(self.nodes.len()).unwrap_or(u32::MAX));
        self.nodes.push(NodeData {
            kind: open.kind,
            span,
            tokens: open.first..self.next_token.max(open.first),
            children: open.children,
            lazy: open.lazy,
            message: open.message,
        });
        id
    }

    /// Attach remaining tokens, close every open node and return the tree.
    pub fn finish(mut self) -> SyntaxTree {
        let len = self.end;
        while self.stack.len() > 1 {
            self.tokens_until(len);
            self.finish_node(None, false);
        }
        self.tokens_until(len);
        let root = match self.stack.pop() {
            Some(open) => self.close(open),
            None => NodeId(0),
        };
        SyntaxTree {
            nodes: self.nodes,
            root,
            remaps: self.remaps,
        }
    }
}
