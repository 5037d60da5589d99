//! Boolean expression compiler: lowers an `assign` right-hand side into
//! two-input gate primitives.
//!
//! Four steps, run in order: ternary rewrite (pure text substitution),
//! tokenization, shunting-yard to RPN, RPN to a tagged AST, and finally a
//! post-order lowering pass that emits one gate per internal AST node.

use crate::error::ExpressionError;
use synth74_common::{sanitize_signal_name, Ident, Interner};
use synth74_diagnostics::code::{Category, DiagnosticCode};
use synth74_diagnostics::{Diagnostic, DiagnosticSink};
use synth74_ir::{Gate, GateId, GateKind, PendingAssign};
use synth74_source::Span;

/// Monotonically increasing counter for temporary net names, seeded at
/// zero once per synthesis run so output is byte-stable across runs given
/// identical input.
#[derive(Debug, Default)]
pub struct TempCounter(u32);

impl TempCounter {
    /// Creates a counter seeded at zero.
    pub fn new() -> Self {
        Self(0)
    }

    fn next(&mut self) -> u32 {
        let n = self.0;
        self.0 += 1;
        n
    }
}

#[derive(Debug, Clone, PartialEq)]
enum ExprToken {
    Ident(String),
    Not,
    And,
    Or,
    Xor,
    LParen,
    RParen,
}

#[derive(Debug, Clone, PartialEq)]
enum ExprNode {
    Ident(String),
    Not(Box<ExprNode>),
    And(Box<ExprNode>, Box<ExprNode>),
    Or(Box<ExprNode>, Box<ExprNode>),
    Xor(Box<ExprNode>, Box<ExprNode>),
}

/// Rewrites every top-level `cond ? t : e` into
/// `((cond) & (t)) | ((~(cond)) & (e))`, recursively.
///
/// "Top-level" means depth 0 with respect to parentheses in the substring
/// being rewritten; `?` matches the nearest `:` at the same depth,
/// accounting for nested ternaries consuming extra `:` tokens.
fn rewrite_ternary(text: &str) -> String {
    let trimmed = text.trim();
    match find_top_level_ternary(trimmed) {
        None => trimmed.to_string(),
        Some((q, c)) => {
            let cond = rewrite_ternary(&trimmed[..q]);
            let then_branch = rewrite_ternary(&trimmed[q + 1..c]);
            let else_branch = rewrite_ternary(&trimmed[c + 1..]);
            format!(
                "(({cond}) & ({then_branch})) | ((~({cond})) & ({else_branch}))"
            )
        }
    }
}

fn find_top_level_ternary(text: &str) -> Option<(usize, usize)> {
    let bytes = text.as_bytes();
    let mut depth = 0i32;
    let mut q_idx = None;
    let mut pending = 0i32;
    for (i, &b) in bytes.iter().enumerate() {
        match b {
            b'(' => depth += 1,
            b')' => depth -= 1,
            b'?' if depth == 0 => {
                if q_idx.is_none() {
                    q_idx = Some(i);
                }
                pending += 1;
            }
            b':' if depth == 0 && q_idx.is_some() => {
                pending -= 1;
                if pending == 0 {
                    return Some((q_idx.unwrap(), i));
                }
            }
            _ => {}
        }
    }
    None
}

fn tokenize(text: &str, span: Span) -> Result<Vec<ExprToken>, ExpressionError> {
    let mut tokens = Vec::new();
    let bytes = text.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b' ' | b'\t' | b'\n' | b'\r' => i += 1,
            b'~' => {
                tokens.push(ExprToken::Not);
                i += 1;
            }
            b'&' => {
                tokens.push(ExprToken::And);
                i += 1;
            }
            b'|' => {
                tokens.push(ExprToken::Or);
                i += 1;
            }
            b'^' => {
                tokens.push(ExprToken::Xor);
                i += 1;
            }
            b'(' => {
                tokens.push(ExprToken::LParen);
                i += 1;
            }
            b')' => {
                tokens.push(ExprToken::RParen);
                i += 1;
            }
            c if c.is_ascii_alphabetic() || c == b'_' => {
                let start = i;
                i += 1;
                while i < bytes.len() && (bytes[i].is_ascii_alphanumeric() || bytes[i] == b'_') {
                    i += 1;
                }
                if i < bytes.len() && bytes[i] == b'[' {
                    i += 1;
                    while i < bytes.len() && bytes[i] != b']' {
                        i += 1;
                    }
                    if i < bytes.len() {
                        i += 1;
                    }
                }
                tokens.push(ExprToken::Ident(text[start..i].to_string()));
            }
            other => {
                return Err(ExpressionError::new(
                    format!("unexpected character '{}'", other as char),
                    span,
                ))
            }
        }
    }
    if tokens.is_empty() {
        return Err(ExpressionError::new("empty expression", span));
    }
    Ok(tokens)
}

fn precedence(tok: &ExprToken) -> i32 {
    match tok {
        ExprToken::Or => 1,
        ExprToken::Xor => 2,
        ExprToken::And => 3,
        ExprToken::Not => 4,
        _ => 0,
    }
}

fn to_rpn(tokens: Vec<ExprToken>, span: Span) -> Result<Vec<ExprToken>, ExpressionError> {
    let mut output = Vec::new();
    let mut ops: Vec<ExprToken> = Vec::new();
    for tok in tokens {
        match tok {
            ExprToken::Ident(_) => output.push(tok),
            ExprToken::Not => ops.push(tok),
            ExprToken::And | ExprToken::Xor | ExprToken::Or => {
                while let Some(top) = ops.last() {
                    if matches!(top, ExprToken::LParen) {
                        break;
                    }
                    if precedence(top) >= precedence(&tok) {
                        output.push(ops.pop().unwrap());
                    } else {
                        break;
                    }
                }
                ops.push(tok);
            }
            ExprToken::LParen => ops.push(tok),
            ExprToken::RParen => {
                let mut closed = false;
                while let Some(top) = ops.pop() {
                    if matches!(top, ExprToken::LParen) {
                        closed = true;
                        break;
                    }
                    output.push(top);
                }
                if !closed {
                    return Err(ExpressionError::new("unbalanced parentheses", span));
                }
            }
        }
    }
    while let Some(top) = ops.pop() {
        if matches!(top, ExprToken::LParen) {
            return Err(ExpressionError::new("unbalanced parentheses", span));
        }
        output.push(top);
    }
    Ok(output)
}

fn build_ast(rpn: Vec<ExprToken>, span: Span) -> Result<ExprNode, ExpressionError> {
    let mut stack: Vec<ExprNode> = Vec::new();
    for tok in rpn {
        match tok {
            ExprToken::Ident(name) => stack.push(ExprNode::Ident(name)),
            ExprToken::Not => {
                let a = stack
                    .pop()
                    .ok_or_else(|| ExpressionError::new("trailing operator '~'", span))?;
                stack.push(ExprNode::Not(Box::new(a)));
            }
            ExprToken::And | ExprToken::Xor | ExprToken::Or => {
                let b = stack
                    .pop()
                    .ok_or_else(|| ExpressionError::new("trailing operator", span))?;
                let a = stack
                    .pop()
                    .ok_or_else(|| ExpressionError::new("trailing operator", span))?;
                stack.push(match tok {
                    ExprToken::And => ExprNode::And(Box::new(a), Box::new(b)),
                    ExprToken::Xor => ExprNode::Xor(Box::new(a), Box::new(b)),
                    ExprToken::Or => ExprNode::Or(Box::new(a), Box::new(b)),
                    _ => unreachable!(),
                });
            }
            ExprToken::LParen | ExprToken::RParen => unreachable!("parens do not survive to RPN"),
        }
    }
    if stack.len() != 1 {
        return Err(ExpressionError::new("malformed expression", span));
    }
    Ok(stack.pop().unwrap())
}

fn fresh_temp(counter: &mut TempCounter, tag: &str, interner: &Interner) -> Ident {
    interner.get_or_intern(&format!("tmp_{tag}_{}", counter.next()))
}

/// Lowers `node` in post-order, pushing one gate per internal node into
/// `gates`. `output` is the net this subtree must drive (the caller's
/// target for the AST root, a fresh temporary otherwise).
fn lower(
    node: &ExprNode,
    output: Ident,
    counter: &mut TempCounter,
    interner: &Interner,
    span: Span,
    gates: &mut Vec<Gate>,
) -> Ident {
    match node {
        ExprNode::Ident(name) => interner.get_or_intern(&sanitize_signal_name(name)),
        ExprNode::Not(inner) => {
            let input = lower_operand(inner, counter, interner, span, gates);
            push_gate(gates, GateKind::Not, vec![input], output, span, interner);
            output
        }
        ExprNode::And(l, r) => lower_binary(GateKind::And, l, r, output, counter, interner, span, gates),
        ExprNode::Or(l, r) => lower_binary(GateKind::Or, l, r, output, counter, interner, span, gates),
        ExprNode::Xor(l, r) => lower_binary(GateKind::Xor, l, r, output, counter, interner, span, gates),
    }
}

/// Lowers a non-root operand, allocating a fresh temporary for it unless
/// it's a leaf identifier (which never drives a gate of its own).
fn lower_operand(
    node: &ExprNode,
    counter: &mut TempCounter,
    interner: &Interner,
    span: Span,
    gates: &mut Vec<Gate>,
) -> Ident {
    match node {
        ExprNode::Ident(name) => interner.get_or_intern(&sanitize_signal_name(name)),
        other => {
            let tag = tag_for(other);
            let temp = fresh_temp(counter, tag, interner);
            lower(other, temp, counter, interner, span, gates)
        }
    }
}

fn tag_for(node: &ExprNode) -> &'static str {
    match node {
        ExprNode::Ident(_) => "id",
        ExprNode::Not(_) => "not",
        ExprNode::And(..) => "and",
        ExprNode::Or(..) => "or",
        ExprNode::Xor(..) => "xor",
    }
}

#[allow(clippy::too_many_arguments)]
fn lower_binary(
    kind: GateKind,
    l: &ExprNode,
    r: &ExprNode,
    output: Ident,
    counter: &mut TempCounter,
    interner: &Interner,
    span: Span,
    gates: &mut Vec<Gate>,
) -> Ident {
    let lhs = lower_operand(l, counter, interner, span, gates);
    let rhs = lower_operand(r, counter, interner, span, gates);
    push_gate(gates, kind, vec![lhs, rhs], output, span, interner);
    output
}

/// Builds this gate's instance tag: a short, human-readable label of its
/// kind and arity followed by the net it drives (e.g. `AND_2_tmp_and_0`).
/// Mangled with the enclosing instance name on every level of hierarchy
/// flattening it is inlined through.
fn gate_tag(kind: GateKind, output: Ident, interner: &Interner) -> String {
    let name = interner.resolve(output);
    match kind {
        GateKind::Not => format!("NOT_1_{name}"),
        GateKind::And => format!("AND_2_{name}"),
        GateKind::Or => format!("OR_2_{name}"),
        GateKind::Xor => format!("XOR_2_{name}"),
        GateKind::Alias => format!("ALIAS_1_{name}"),
        GateKind::Dff => format!("DFF_{name}"),
    }
}

fn push_gate(
    gates: &mut Vec<Gate>,
    kind: GateKind,
    inputs: Vec<Ident>,
    output: Ident,
    span: Span,
    interner: &Interner,
) {
    let instance_tag = gate_tag(kind, output, interner);
    gates.push(Gate {
        id: GateId::from_raw(0),
        kind,
        inputs,
        output,
        instance_tag,
        span,
    });
}

/// Compiles a single `assign` statement's right-hand side into gates.
///
/// On a malformed expression, emits a `Category::Expression` warning on
/// `sink` and returns an empty gate list — the assignment contributes
/// nothing, per the recoverable-error policy.
pub fn compile_assign(
    pending: &PendingAssign,
    interner: &Interner,
    counter: &mut TempCounter,
    sink: &DiagnosticSink,
) -> Vec<Gate> {
    let rewritten = rewrite_ternary(&pending.rhs_text);
    let outcome = tokenize(&rewritten, pending.span)
        .and_then(|toks| to_rpn(toks, pending.span))
        .and_then(|rpn| build_ast(rpn, pending.span));

    let ast = match outcome {
        Ok(ast) => ast,
        Err(err) => {
            sink.emit(Diagnostic::warning(
                DiagnosticCode::new(Category::Expression, 1),
                err.reason,
                pending.span,
            ));
            return Vec::new();
        }
    };

    let mut gates = Vec::new();
    if let ExprNode::Ident(name) = &ast {
        push_gate(
            &mut gates,
            GateKind::Alias,
            vec![interner.get_or_intern(&sanitize_signal_name(name))],
            pending.target,
            pending.span,
            interner,
        );
    } else {
        lower(&ast, pending.target, counter, interner, pending.span, &mut gates);
    }
    gates
}

#[cfg(test)]
mod tests {
    use super::*;
    use synth74_source::{FileId, Span as S};

    fn assign(target: &str, rhs: &str, interner: &Interner) -> PendingAssign {
        PendingAssign {
            target: interner.get_or_intern(target),
            rhs_text: rhs.to_string(),
            span: S::new(FileId::from_raw(0), 0, rhs.len() as u32),
        }
    }

    #[test]
    fn ternary_rewrite_basic() {
        assert_eq!(rewrite_ternary("sel ? a : b"), "((sel) & (a)) | ((~(sel)) & (b))");
    }

    #[test]
    fn ternary_rewrite_passthrough_when_absent() {
        assert_eq!(rewrite_ternary("a & b"), "a & b");
    }

    #[test]
    fn scenario_a_simple_and() {
        let interner = Interner::new();
        let sink = DiagnosticSink::new();
        let mut counter = TempCounter::new();
        let pa = assign("y", "a & b", &interner);
        let gates = compile_assign(&pa, &interner, &mut counter, &sink);
        assert_eq!(gates.len(), 1);
        assert_eq!(gates[0].kind, GateKind::And);
        assert_eq!(gates[0].output, pa.target);
    }

    #[test]
    fn scenario_b_not() {
        let interner = Interner::new();
        let sink = DiagnosticSink::new();
        let mut counter = TempCounter::new();
        let pa = assign("y", "~a", &interner);
        let gates = compile_assign(&pa, &interner, &mut counter, &sink);
        assert_eq!(gates.len(), 1);
        assert_eq!(gates[0].kind, GateKind::Not);
    }

    #[test]
    fn scenario_c_chained_xor() {
        let interner = Interner::new();
        let sink = DiagnosticSink::new();
        let mut counter = TempCounter::new();
        let pa = assign("s", "a ^ b ^ cin", &interner);
        let gates = compile_assign(&pa, &interner, &mut counter, &sink);
        assert_eq!(gates.len(), 2);
        assert!(gates.iter().all(|g| g.kind == GateKind::Xor));
        assert_eq!(gates.last().unwrap().output, pa.target);
    }

    #[test]
    fn scenario_d_full_adder_carry() {
        let interner = Interner::new();
        let sink = DiagnosticSink::new();
        let mut counter = TempCounter::new();
        let pa = assign("co", "(a&b)|(cin&(a^b))", &interner);
        let gates = compile_assign(&pa, &interner, &mut counter, &sink);
        assert_eq!(gates.len(), 4);
        assert_eq!(gates.last().unwrap().kind, GateKind::Or);
        assert_eq!(gates.last().unwrap().output, pa.target);
    }

    #[test]
    fn scenario_f_ternary_mux() {
        let interner = Interner::new();
        let sink = DiagnosticSink::new();
        let mut counter = TempCounter::new();
        let pa = assign("y", "sel ? a : b", &interner);
        let gates = compile_assign(&pa, &interner, &mut counter, &sink);
        assert_eq!(gates.len(), 4);
        let kinds: Vec<_> = gates.iter().map(|g| g.kind).collect();
        assert_eq!(
            kinds,
            vec![GateKind::And, GateKind::Not, GateKind::And, GateKind::Or]
        );
    }

    #[test]
    fn bare_identifier_produces_alias() {
        let interner = Interner::new();
        let sink = DiagnosticSink::new();
        let mut counter = TempCounter::new();
        let pa = assign("y", "a", &interner);
        let gates = compile_assign(&pa, &interner, &mut counter, &sink);
        assert_eq!(gates.len(), 1);
        assert_eq!(gates[0].kind, GateKind::Alias);
    }

    #[test]
    fn unbalanced_parens_yields_no_gates_and_warning() {
        let interner = Interner::new();
        let sink = DiagnosticSink::new();
        let mut counter = TempCounter::new();
        let pa = assign("y", "(a & b", &interner);
        let gates = compile_assign(&pa, &interner, &mut counter, &sink);
        assert!(gates.is_empty());
        assert!(sink.has_errors() || !sink.diagnostics().is_empty());
    }

    #[test]
    fn trailing_operator_yields_no_gates() {
        let interner = Interner::new();
        let sink = DiagnosticSink::new();
        let mut counter = TempCounter::new();
        let pa = assign("y", "a &", &interner);
        let gates = compile_assign(&pa, &interner, &mut counter, &sink);
        assert!(gates.is_empty());
    }

    #[test]
    fn temp_counter_is_monotonic_across_calls() {
        let interner = Interner::new();
        let sink = DiagnosticSink::new();
        let mut counter = TempCounter::new();
        let pa1 = assign("s1", "a ^ b ^ c", &interner);
        let pa2 = assign("s2", "d ^ e ^ f", &interner);
        let gates1 = compile_assign(&pa1, &interner, &mut counter, &sink);
        let gates2 = compile_assign(&pa2, &interner, &mut counter, &sink);
        let temp1 = interner.resolve(gates1[0].output).to_string();
        let temp2 = interner.resolve(gates2[0].output).to_string();
        assert_ne!(temp1, temp2);
    }
}
