//! Kotlin IR - shared data for the Kotlin parsing core.
//!
//! This crate holds the data the lexer, parser and tooling agree on:
//! - Spans for source locations
//! - Token kinds, per-token flags and the `TokenList` produced by the lexer
//! - Node kinds of the syntax tree
//! - The `SyntaxTree` arena the parser builds, plus its debug printers
//!
//! Nothing in here knows how to parse. The tree is built through
//! [`TreeBuilder`], which the parser drives from its marker events.

/// Compile-time assertion that a type has a specific size.
///
/// Used to prevent accidental size regressions in frequently-allocated types.
#[macro_export]
macro_rules! static_assert_size {
    ($ty:ty, $size:expr) => {
        const _: [(); $size] = [(); ::std::mem::size_of::<$ty>()];
    };
}

mod node;
mod span;
mod token;
mod tree;

pub use node::NodeKind;
pub use span::Span;
pub use token::{Token, TokenFlags, TokenKind, TokenList};
pub use tree::{Element, NodeId, SyntaxTree, TreeBuilder};
