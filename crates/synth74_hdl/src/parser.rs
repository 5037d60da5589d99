//! Recursive-descent parser for the restricted HDL subset.
//!
//! Builds a [`synth74_ir::Design`] directly: there is no separate parse-tree
//! stage, since this grammar is small enough that each production maps
//! straight onto an IR entity. `assign` right-hand sides are **not** parsed
//! here — only their raw text is captured, for the expression compiler to
//! lower elsewhere.

use crate::error::ParseError;
use crate::token::{HdlToken, Token};
use std::collections::HashMap;
use synth74_common::{sanitize_signal_name, Ident, Interner};
use synth74_diagnostics::DiagnosticSink;
use synth74_ir::{
    Arena, Design, Gate, GateKind, Module, ModuleInstance, PendingAssign, PortBinding, Signal,
    SignalId, SignalKind,
};
use synth74_source::{FileId, Span};

/// Parses a complete HDL source file into a [`Design`].
///
/// Returns the first fatal [`ParseError`] encountered (a malformed module
/// header, port declaration, or instantiation connection). Unrecognized
/// constructs inside a module body are skipped and do not fail parsing.
pub fn parse(
    source: &str,
    file: FileId,
    interner: &Interner,
    sink: &DiagnosticSink,
) -> Result<Design, ParseError> {
    let tokens = crate::lexer::lex(source, file, sink);
    let mut parser = Parser {
        tokens,
        pos: 0,
        source,
        interner,
    };
    parser.parse_design()
}

struct Parser<'src> {
    tokens: Vec<Token>,
    pos: usize,
    source: &'src str,
    interner: &'src Interner,
}

/// Tracks a module under construction, merging duplicate port/wire
/// declarations by name and widening to the maximum declared width.
struct ModuleBuilder {
    module: Module,
    by_name: HashMap<Ident, SignalId>,
    port_order: Vec<Ident>,
}

impl Parser<'_> {
    fn current(&self) -> HdlToken {
        self.tokens[self.pos].kind
    }

    fn current_span(&self) -> Span {
        self.tokens[self.pos].span
    }

    fn current_text(&self) -> &str {
        let span = self.current_span();
        &self.source[span.start as usize..span.end as usize]
    }

    fn at(&self, kind: HdlToken) -> bool {
        self.current() == kind
    }

    fn at_eof(&self) -> bool {
        self.current() == HdlToken::Eof
    }

    fn advance(&mut self) -> Token {
        let tok = self.tokens[self.pos];
        if self.pos + 1 < self.tokens.len() {
            self.pos += 1;
        }
        tok
    }

    fn expect(&mut self, kind: HdlToken, what: &str) -> Result<Token, ParseError> {
        if self.at(kind) {
            Ok(self.advance())
        } else {
            Err(ParseError::new(
                format!("expected {what}, found {:?} ({:?})", self.current(), self.current_text()),
                self.current_span(),
            ))
        }
    }

    fn expect_ident(&mut self, what: &str) -> Result<(Ident, Span), ParseError> {
        let tok = self.expect(HdlToken::Ident, what)?;
        let text = &self.source[tok.span.start as usize..tok.span.end as usize];
        Ok((self.interner.get_or_intern(text), tok.span))
    }

    fn intern_sanitized(&self, raw: &str) -> Ident {
        self.interner.get_or_intern(&sanitize_signal_name(raw))
    }

    fn parse_design(&mut self) -> Result<Design, ParseError> {
        let mut design = Design::new();
        while !self.at_eof() {
            if self.at(HdlToken::Module) {
                let module = self.parse_module()?;
                let id = design.modules.alloc(module);
                design.modules.get_mut(id).id = id;
            } else {
                return Err(ParseError::new(
                    format!("expected 'module', found {:?}", self.current()),
                    self.current_span(),
                ));
            }
        }
        Ok(design)
    }

    /// `module` IDENT `(` port-list `)` `;` module-item* `endmodule`
    fn parse_module(&mut self) -> Result<Module, ParseError> {
        let start = self.current_span();
        self.expect(HdlToken::Module, "'module'")?;
        let (name, _) = self.expect_ident("a module name")?;
        self.expect(HdlToken::LParen, "'('")?;

        let mut builder = ModuleBuilder {
            module: Module {
                id: synth74_ir::ModuleId::from_raw(0),
                name,
                ports: Vec::new(),
                signals: Arena::new(),
                gates: Arena::new(),
                instances: Arena::new(),
                pending_assigns: Vec::new(),
                span: start,
            },
            by_name: HashMap::new(),
            port_order: Vec::new(),
        };

        if !self.at(HdlToken::RParen) {
            loop {
                self.parse_header_port(&mut builder)?;
                if self.at(HdlToken::Comma) {
                    self.advance();
                    continue;
                }
                break;
            }
        }
        self.expect(HdlToken::RParen, "')'")?;
        self.expect(HdlToken::Semi, "';'")?;

        while !self.at(HdlToken::Endmodule) {
            if self.at_eof() {
                return Err(ParseError::new(
                    "unterminated module, expected 'endmodule'",
                    self.current_span(),
                ));
            }
            self.parse_module_item(&mut builder)?;
        }
        let end_span = self.current_span();
        self.expect(HdlToken::Endmodule, "'endmodule'")?;

        builder.module.span = start.merge(end_span);
        builder.module.ports = builder
            .port_order
            .iter()
            .map(|name| builder.by_name[name])
            .collect();
        Ok(builder.module)
    }

    /// A single entry in the parenthesized port list: either ANSI-style
    /// (`input [3:0] a`) or bare (`a`, direction supplied later in the body).
    fn parse_header_port(&mut self, builder: &mut ModuleBuilder) -> Result<(), ParseError> {
        if self.at(HdlToken::Input) || self.at(HdlToken::Output) {
            let (kind, name, width, span) = self.parse_port_decl()?;
            self.declare_signal(builder, name, kind, width, span, true);
        } else {
            let (name, span) = self.expect_ident("a port name")?;
            self.declare_signal(builder, name, SignalKind::Wire, 1, span, true);
        }
        Ok(())
    }

    /// `(input|output) [msb:lsb]? name`
    fn parse_port_decl(&mut self) -> Result<(SignalKind, Ident, u32, Span), ParseError> {
        let start = self.current_span();
        let kind = if self.at(HdlToken::Input) {
            self.advance();
            SignalKind::Input
        } else {
            self.expect(HdlToken::Output, "'input' or 'output'")?;
            SignalKind::Output
        };
        let width = self.parse_optional_range()?;
        let (name, name_span) = self.expect_ident("a signal name")?;
        Ok((kind, name, width, start.merge(name_span)))
    }

    /// `[` INT `:` INT `]`, returning the computed width, or `1` if absent.
    fn parse_optional_range(&mut self) -> Result<u32, ParseError> {
        if !self.at(HdlToken::LBracket) {
            return Ok(1);
        }
        self.advance();
        let msb = self.parse_int()?;
        self.expect(HdlToken::Colon, "':'")?;
        let lsb = self.parse_int()?;
        self.expect(HdlToken::RBracket, "']'")?;
        let width = if msb >= lsb { msb - lsb + 1 } else { lsb - msb + 1 };
        Ok(width)
    }

    fn parse_int(&mut self) -> Result<u32, ParseError> {
        let tok = self.expect(HdlToken::Int, "an integer")?;
        let text = &self.source[tok.span.start as usize..tok.span.end as usize];
        text.parse::<u32>()
            .map_err(|_| ParseError::new(format!("invalid integer '{text}'"), tok.span))
    }

    /// Declares (or widens, if already declared) a port or wire signal by name.
    fn declare_signal(
        &self,
        builder: &mut ModuleBuilder,
        name: Ident,
        kind: SignalKind,
        width: u32,
        span: Span,
        is_port: bool,
    ) {
        if let Some(&existing) = builder.by_name.get(&name) {
            let sig = builder.module.signals.get_mut(existing);
            if width > sig.width {
                sig.width = width;
            }
            if matches!(kind, SignalKind::Input | SignalKind::Output) {
                sig.kind = kind;
            }
        } else {
            let id = builder.module.signals.alloc(Signal {
                id: SignalId::from_raw(0),
                name,
                width,
                kind,
                span,
            });
            builder.module.signals.get_mut(id).id = id;
            builder.by_name.insert(name, id);
            if is_port {
                builder.port_order.push(name);
            }
        }
    }

    fn parse_module_item(&mut self, builder: &mut ModuleBuilder) -> Result<(), ParseError> {
        match self.current() {
            HdlToken::Input | HdlToken::Output => {
                let (kind, name, width, span) = self.parse_port_decl()?;
                self.expect(HdlToken::Semi, "';'")?;
                let already_port = builder.by_name.contains_key(&name);
                self.declare_signal(builder, name, kind, width, span, !already_port);
                Ok(())
            }
            HdlToken::Wire => {
                self.advance();
                let width = self.parse_optional_range()?;
                let (name, span) = self.expect_ident("a wire name")?;
                self.expect(HdlToken::Semi, "';'")?;
                self.declare_signal(builder, name, SignalKind::Wire, width, span, false);
                Ok(())
            }
            HdlToken::Assign => self.parse_assign(builder),
            HdlToken::Always => self.parse_always(builder),
            HdlToken::Ident => self.parse_instance_or_skip(builder),
            _ => {
                self.skip_unknown_statement();
                Ok(())
            }
        }
    }

    /// `assign` lhs `=` rhs `;` — rhs is captured verbatim, uncompiled.
    fn parse_assign(&mut self, builder: &mut ModuleBuilder) -> Result<(), ParseError> {
        let start = self.current_span();
        self.advance();
        let lhs_text = self.parse_net_ref_text()?;
        let target = self.intern_sanitized(&lhs_text);
        self.expect(HdlToken::Eq, "'='")?;
        let rhs_start = self.current_span().start;
        while !self.at(HdlToken::Semi) && !self.at_eof() {
            self.advance();
        }
        let rhs_end = self.current_span().start;
        let end_span = self.current_span();
        self.expect(HdlToken::Semi, "';'")?;
        let rhs_text = self.source[rhs_start as usize..rhs_end as usize]
            .trim()
            .to_string();
        builder.module.pending_assigns.push(PendingAssign {
            target,
            rhs_text,
            span: start.merge(end_span),
        });
        Ok(())
    }

    /// A bare identifier, optionally bit-selected, used as an lvalue or
    /// connection target. Returns the raw (unsanitized) text.
    fn parse_net_ref_text(&mut self) -> Result<String, ParseError> {
        let start = self.current_span();
        let (_, _) = self.expect_ident("an identifier")?;
        if self.at(HdlToken::LBracket) {
            self.advance();
            self.parse_int()?;
            if self.at(HdlToken::Colon) {
                self.advance();
                self.parse_int()?;
            }
            self.expect(HdlToken::RBracket, "']'")?;
        }
        let end = self.tokens[self.pos.saturating_sub(1)].span.end;
        Ok(self.source[start.start as usize..end as usize].to_string())
    }

    /// `always` `@` `(` `posedge` IDENT `)` ( `begin` nonblocking* `end` | nonblocking )
    fn parse_always(&mut self, builder: &mut ModuleBuilder) -> Result<(), ParseError> {
        let start = self.current_span();
        self.advance();
        self.expect(HdlToken::At, "'@'")?;
        self.expect(HdlToken::LParen, "'('")?;
        self.expect(HdlToken::Posedge, "'posedge'")?;
        let clk_text = self.current_text().to_string();
        self.expect(HdlToken::Ident, "a clock signal")?;
        let clk = self.intern_sanitized(&clk_text);
        self.expect(HdlToken::RParen, "')'")?;

        let mut assigns = Vec::new();
        if self.at(HdlToken::Begin) {
            self.advance();
            while !self.at(HdlToken::End) {
                if self.at_eof() {
                    return Err(ParseError::new(
                        "unterminated 'begin' block, expected 'end'",
                        self.current_span(),
                    ));
                }
                assigns.push(self.parse_nonblocking_assign()?);
            }
            self.advance();
        } else {
            assigns.push(self.parse_nonblocking_assign()?);
        }

        for (q, d, span) in assigns {
            let id = builder.module.gates.alloc(Gate {
                id: synth74_ir::GateId::from_raw(0),
                kind: GateKind::Dff,
                inputs: vec![d, clk],
                output: q,
                instance_tag: String::new(),
                span,
            });
            builder.module.gates.get_mut(id).id = id;
        }
        let _ = start;
        Ok(())
    }

    /// `IDENT` `<=` `IDENT` `;`, returning `(q, d, span)`.
    fn parse_nonblocking_assign(&mut self) -> Result<(Ident, Ident, Span), ParseError> {
        let q_text = self.parse_net_ref_text()?;
        let start = self.tokens[self.pos.saturating_sub(1)].span;
        self.expect(HdlToken::LtEq, "'<='")?;
        let d_text = self.parse_net_ref_text()?;
        let end = self.current_span();
        self.expect(HdlToken::Semi, "';'")?;
        Ok((
            self.interner.get_or_intern(&sanitize_signal_name(&q_text)),
            self.interner.get_or_intern(&sanitize_signal_name(&d_text)),
            start.merge(end),
        ))
    }

    /// `IDENT` `IDENT` `(` `.`port`(`net`)` (`,` ...)* `)` `;`, or falls back
    /// to skipping an unrecognized statement if the lookahead doesn't match.
    fn parse_instance_or_skip(&mut self, builder: &mut ModuleBuilder) -> Result<(), ParseError> {
        if self.tokens[self.pos + 1].kind != HdlToken::Ident
            || self.tokens[self.pos + 2].kind != HdlToken::LParen
        {
            self.skip_unknown_statement();
            return Ok(());
        }
        let start = self.current_span();
        let (module_name, _) = self.expect_ident("a module name")?;
        let (instance_name, _) = self.expect_ident("an instance name")?;
        self.expect(HdlToken::LParen, "'('")?;

        let mut port_map = Vec::new();
        if !self.at(HdlToken::RParen) {
            loop {
                self.expect(HdlToken::Dot, "'.'")?;
                let (port, _) = self.expect_ident("a port name")?;
                self.expect(HdlToken::LParen, "'('")?;
                let net_text = self.parse_net_ref_text()?;
                if synth74_common::is_range_select(&net_text) {
                    return Err(ParseError::new(
                        format!("range select '{net_text}' is not a valid connection target"),
                        self.current_span(),
                    ));
                }
                self.expect(HdlToken::RParen, "')'")?;
                port_map.push(PortBinding {
                    port,
                    net: self.intern_sanitized(&net_text),
                });
                if self.at(HdlToken::Comma) {
                    self.advance();
                    continue;
                }
                break;
            }
        }
        let end_span = self.current_span();
        self.expect(HdlToken::RParen, "')'")?;
        self.expect(HdlToken::Semi, "';'")?;

        let id = builder.module.instances.alloc(ModuleInstance {
            id: synth74_ir::InstanceId::from_raw(0),
            module_name,
            instance_name,
            port_map,
            span: start.merge(end_span),
        });
        builder.module.instances.get_mut(id).id = id;
        Ok(())
    }

    /// Skips tokens up to and including the next `;`, or a balanced
    /// `begin…end` block, whichever comes first. Used for unrecognized
    /// module-body constructs, which are ignored rather than fatal.
    fn skip_unknown_statement(&mut self) {
        if self.at(HdlToken::Begin) {
            let mut depth = 0usize;
            loop {
                match self.current() {
                    HdlToken::Begin => {
                        depth += 1;
                        self.advance();
                    }
                    HdlToken::End => {
                        depth -= 1;
                        self.advance();
                        if depth == 0 {
                            break;
                        }
                    }
                    HdlToken::Eof => break,
                    _ => {
                        self.advance();
                    }
                }
            }
            return;
        }
        while !self.at(HdlToken::Semi) && !self.at_eof() {
            self.advance();
        }
        if self.at(HdlToken::Semi) {
            self.advance();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_ok(source: &str) -> Design {
        let interner = Interner::new();
        let sink = DiagnosticSink::new();
        parse(source, FileId::from_raw(0), &interner, &sink).expect("parse should succeed")
    }

    #[test]
    fn parses_empty_module() {
        let design = parse_ok("module m(input a, output y); endmodule");
        assert_eq!(design.module_count(), 1);
        let m = design.modules.values().next().unwrap();
        assert_eq!(m.ports.len(), 2);
    }

    #[test]
    fn parses_ansi_ports_with_range() {
        let design = parse_ok("module m(input [3:0] a, output y); endmodule");
        let m = design.modules.values().next().unwrap();
        let a = &m.signals[m.ports[0]];
        assert_eq!(a.width, 4);
    }

    #[test]
    fn parses_non_ansi_ports() {
        let design = parse_ok("module m(a, y); input a; output y; endmodule");
        let m = design.modules.values().next().unwrap();
        assert_eq!(m.ports.len(), 2);
        assert_eq!(m.signals[m.ports[0]].kind, SignalKind::Input);
        assert_eq!(m.signals[m.ports[1]].kind, SignalKind::Output);
    }

    #[test]
    fn duplicate_port_declaration_widens() {
        let design = parse_ok("module m(input a, output y); input [7:0] a; endmodule");
        let m = design.modules.values().next().unwrap();
        assert_eq!(m.signals[m.ports[0]].width, 8);
    }

    #[test]
    fn parses_wire_declaration() {
        let design = parse_ok("module m(input a, output y); wire t; assign y = t; endmodule");
        let m = design.modules.values().next().unwrap();
        assert_eq!(m.signals.len(), 3);
    }

    #[test]
    fn parses_assign_captures_raw_rhs() {
        let design = parse_ok("module m(input a, input b, output y); assign y = a & b; endmodule");
        let m = design.modules.values().next().unwrap();
        assert_eq!(m.pending_assigns.len(), 1);
        assert_eq!(m.pending_assigns[0].rhs_text, "a & b");
    }

    #[test]
    fn parses_bit_selected_assign_target() {
        let design = parse_ok("module m(input a, output [3:0] y); assign y[2] = a; endmodule");
        let m = design.modules.values().next().unwrap();
        assert_eq!(m.pending_assigns.len(), 1);
    }

    #[test]
    fn parses_always_posedge_single_statement() {
        let design =
            parse_ok("module m(input clk, input d, output q); always @(posedge clk) q <= d; endmodule");
        let m = design.modules.values().next().unwrap();
        assert_eq!(m.gates.len(), 1);
        assert_eq!(m.gates.values().next().unwrap().kind, GateKind::Dff);
    }

    #[test]
    fn parses_always_posedge_begin_end_block() {
        let design = parse_ok(
            "module m(input clk, input d0, input d1, output q0, output q1); \
             always @(posedge clk) begin q0 <= d0; q1 <= d1; end endmodule",
        );
        let m = design.modules.values().next().unwrap();
        assert_eq!(m.gates.len(), 2);
    }

    #[test]
    fn parses_instantiation() {
        let design = parse_ok(
            "module top(input a, input b, output y); \
             and_gate u1 ( .a(a), .b(b), .y(y) ); endmodule",
        );
        let m = design.modules.values().next().unwrap();
        assert_eq!(m.instances.len(), 1);
        let inst = m.instances.values().next().unwrap();
        assert_eq!(inst.port_map.len(), 3);
    }

    #[test]
    fn rejects_range_select_instance_connection() {
        let interner = Interner::new();
        let sink = DiagnosticSink::new();
        let result = parse(
            "module top(input [3:0] a, output [3:0] y); \
             sub u1 ( .a(a[3:0]), .y(y) ); endmodule",
            FileId::from_raw(0),
            &interner,
            &sink,
        );
        assert!(result.is_err());
    }

    #[test]
    fn unknown_statement_is_skipped_not_fatal() {
        let design = parse_ok(
            "module m(input a, output y); parameter WIDTH = 8; assign y = a; endmodule",
        );
        let m = design.modules.values().next().unwrap();
        assert_eq!(m.pending_assigns.len(), 1);
    }

    #[test]
    fn malformed_header_is_fatal() {
        let interner = Interner::new();
        let sink = DiagnosticSink::new();
        let result = parse("module m(input a output y); endmodule", FileId::from_raw(0), &interner, &sink);
        assert!(result.is_err());
    }

    #[test]
    fn strips_comments_before_parsing() {
        let design = parse_ok(
            "module m(input a, output y); // a comment\n/* block */ assign y = a; endmodule",
        );
        let m = design.modules.values().next().unwrap();
        assert_eq!(m.pending_assigns.len(), 1);
    }

    #[test]
    fn multiple_modules_parsed_in_declaration_order() {
        let design = parse_ok(
            "module a(input x, output y); assign y = x; endmodule \
             module b(input x, output y); assign y = x; endmodule",
        );
        assert_eq!(design.module_count(), 2);
    }
}
