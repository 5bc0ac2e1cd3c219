//! Debug printers for syntax trees.

use std::fmt::Write;

use super::{Element, NodeId, SyntaxTree};
use crate::{NodeKind, TokenKind, TokenList};

impl SyntaxTree {
    /// Indented dump of nodes and significant tokens.
    ///
    /// ```text
    /// ROOT
    ///   BINARY_EXPRESSION
    ///     INTEGER_CONSTANT
    ///       INTEGER_LITERAL "1"
    /// ```
    ///
    /// Trivia and the end-of-file token are omitted. Error elements print
    /// their message, lazily parsed function literals are tagged `(lazy)`.
    pub fn dump(&self, tokens: &TokenList, source: &str) -> String {
        let mut out = String::new();
        self.dump_node(self.root(), 0, tokens, source, &mut out);
        out
    }

    fn dump_node(
        &self,
        node: NodeId,
        depth: usize,
        tokens: &TokenList,
        source: &str,
        out: &mut String,
    ) {
        let indent = "  ".repeat(depth);
        let kind = self.kind(node);
        match (kind, self.error_message(node)) {
            (NodeKind::Error, Some(message)) => {
                let _ = writeln!(out, "{indent}{kind}: {message}");
            }
            _ if self.is_lazy(node) => {
                let _ = writeln!(out, "{indent}{kind} (lazy)");
            }
            _ => {
                let _ = writeln!(out, "{indent}{kind}");
            }
        }
        for child in self.children(node) {
            match *child {
                Element::Node(id) => self.dump_node(id, depth + 1, tokens, source, out),
                Element::Token(index) => {
                    let token_kind = self.token_kind(tokens, index);
                    if token_kind.is_trivia() || token_kind == TokenKind::Eof {
                        continue;
                    }
                    let text = tokens.text(index as usize, source).escape_debug();
                    let _ = writeln!(out, "{indent}  {token_kind:?} \"{text}\"");
                }
            }
        }
    }

    /// Compact node-only rendering of the subtree at `node`:
    /// `KIND(CHILD CHILD(...))`. Tokens are left out, which keeps
    /// expectations about tree shape short.
    pub fn shape(&self, node: NodeId) -> String {
        let mut out = String::new();
        self.shape_into(node, &mut out);
        out
    }

    fn shape_into(&self, node: NodeId, out: &mut String) {
        out.push_str(self.kind(node).name());
        let mut children = self.child_nodes(node).peekable();
        if children.peek().is_none() {
            return;
        }
        out.push('(');
        let mut first = true;
        for child in children {
            if !first {
                out.push(' ');
            }
            first = false;
            self.shape_into(child, out);
        }
        out.push(')');
    }
}
