//! Grammar Modules
//!
//! Each module extends `Parser` with the methods for one family of
//! productions:
//!
//! - [`expr`]: binary climbing, prefix/postfix forms, atoms, string
//!   templates, lambdas and control flow
//! - [`stmt`]: statement sequences, blocks and contract descriptions
//! - [`decl`]: modifiers, annotations, types, parameters and the
//!   declarations that can appear inside a function body
//!
//! # Conventions
//!
//! - A rule starts at the first token of its construct and leaves the
//!   cursor just past the last token it consumed.
//! - Rules never fail. A missing piece is reported with an error element and
//!   the best-effort node is closed anyway.
//! - Ambiguous constructs are parsed behind a marker and rolled back when
//!   they turn out to be something else.
//! - Layout switches are only changed through `with_newlines` and
//!   `with_joining`, so every exit path restores them.

mod decl;
mod expr;
mod stmt;
