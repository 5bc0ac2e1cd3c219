//! String templates.
//!
//! The lexer has already split the literal into parts; the parser only
//! groups them into entries:
//!
//! ```text
//! "a\n$b${c + 1}"
//! STRING_TEMPLATE
//!   OPEN_QUOTE
//!   LITERAL_STRING_TEMPLATE_ENTRY   a
//!   ESCAPE_STRING_TEMPLATE_ENTRY    \n
//!   SHORT_STRING_TEMPLATE_ENTRY     $b
//!   LONG_STRING_TEMPLATE_ENTRY      ${c + 1}
//!   CLOSING_QUOTE
//! ```

use kt_diagnostic::ErrorCode;
use kt_ir::{NodeKind, TokenKind as T};

use crate::Parser;

impl Parser<'_> {
    pub(super) fn parse_string_template(&mut self) {
        let template = self.mark();

        if self.at(T::InterpolationPrefix) {
            let prefix = self.mark();
            self.advance();
            prefix.done(self, NodeKind::StringInterpolationPrefix);
        }
        self.expect(T::OpenQuote, ErrorCode::E1008, "Expecting '\"'");

        while !self.eof() && !self.at(T::ClosingQuote) && !self.at(T::DanglingNewline) {
            self.parse_string_template_element();
        }

        if self.at(T::DanglingNewline) {
            // The line ended before the closing quote.
            self.error_and_advance(ErrorCode::E1008, "Expecting '\"'");
        } else {
            self.expect(T::ClosingQuote, ErrorCode::E1003, "Expecting '\"'");
        }

        template.done(self, NodeKind::StringTemplate);
    }

    fn parse_string_template_element(&mut self) {
        match self.current() {
            T::RegularStringPart => self.parse_template_part(NodeKind::LiteralStringTemplateEntry),
            T::EscapeSequence => self.parse_template_part(NodeKind::EscapeStringTemplateEntry),
            T::ShortTemplateEntryStart => self.parse_short_template_entry(),
            T::LongTemplateEntryStart => self.parse_long_template_entry(),
            _ => self.error_and_advance(ErrorCode::E1008, "Unexpected token in a string template"),
        }
    }

    fn parse_template_part(&mut self, kind: NodeKind) {
        let entry = self.mark();
        self.advance();
        entry.done(self, kind);
    }

    /// `$name` or `$this`.
    fn parse_short_template_entry(&mut self) {
        let entry = self.mark();
        self.advance(); // $

        if self.at(T::ThisKw) {
            let expression = self.mark();
            let reference = self.mark();
            self.advance();
            reference.done(self, NodeKind::ReferenceExpression);
            expression.done(self, NodeKind::ThisExpression);
        } else if self.current().is_keyword() {
            self.error_and_advance(ErrorCode::E1008, "Keyword cannot be used as a reference");
        } else {
            let reference = self.mark();
            self.expect(T::Ident, ErrorCode::E1004, "Expecting a name");
            reference.done(self, NodeKind::ReferenceExpression);
        }

        entry.done(self, NodeKind::ShortStringTemplateEntry);
    }

    /// `${ expression }`. Anything after the expression and before the `}`
    /// is reported and skipped, one expression at a time.
    fn parse_long_template_entry(&mut self) {
        let entry = self.mark();
        self.advance(); // ${

        while !self.eof() {
            let start = self.position();
            self.parse_expression();
            if self.at(T::LongTemplateEntryEnd) {
                self.advance();
                break;
            }
            self.error(ErrorCode::E1008, "Expecting '}'");
            if self.position() == start {
                self.advance();
            }
        }

        entry.done(self, NodeKind::LongStringTemplateEntry);
    }
}
