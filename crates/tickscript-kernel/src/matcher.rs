//! Argument matching — deciding whether a token sequence instantiates a
//! tool's grammar.
//!
//! The matcher walks a schema's `ArgNode` tree against the flat token list
//! left after the tool name. Matching is first-match-wins and does not
//! backtrack across siblings: once a node's head has matched, the node is
//! committed to its `children` — if those fail, the whole invocation fails
//! rather than falling back to `otherwise`. Scripts depend on this exact
//! failure behavior, counterintuitive as it occasionally is.
//!
//! An `otherwise` attempt, by contrast, is tentative: if it fails under an
//! optional node, the cursor is restored and the node binds absent.

use tickscript_types::{Span, Token, TokenKind};

use crate::error::{MatchError, MatchResult};
use crate::registry::ToolRegistry;
use crate::schema::{ArgNode, NodeKind, ToolSchema, Unit};

/// A successfully validated tool invocation.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolMatch {
    /// The tool's catalogue name.
    pub tool: String,
    /// Span of the whole invocation (name through last argument).
    pub span: Span,
    /// Whether this was a lone `off` argument. Off matches bind no slots.
    pub is_off: bool,
    /// One slot per top-level grammar node, in declaration order. Unmatched
    /// optional nodes bind absent.
    pub args: Vec<ArgValue>,
}

impl ToolMatch {
    /// Child bindings of the keyword slot named `keyword`, if it matched.
    pub fn keyword_params(&self, keyword: &str) -> Option<&[ArgValue]> {
        self.args.iter().find_map(|arg| match &arg.binding {
            ArgBinding::Keyword(text) if text.eq_ignore_ascii_case(keyword) => {
                Some(arg.params.as_slice())
            }
            _ => None,
        })
    }
}

/// What one grammar slot bound to.
#[derive(Debug, Clone, PartialEq)]
pub enum ArgBinding {
    /// The slot did not match (optional node, no fitting token).
    Absent,
    /// A keyword matched; its canonical catalogue spelling.
    Keyword(String),
    /// A numeric value, with the unit suffix that was stripped (if any).
    Number { value: f64, unit: Option<String> },
    /// A free-form word.
    Word(String),
    /// The node's `otherwise` branch fired in its place; the branch's
    /// bindings are in `params`.
    Branch,
}

/// A bound argument slot: the binding itself plus any nested bindings
/// (a matched keyword's parameters, or an `otherwise` branch's values).
#[derive(Debug, Clone, PartialEq)]
pub struct ArgValue {
    pub binding: ArgBinding,
    pub params: Vec<ArgValue>,
}

impl ArgValue {
    fn absent() -> Self {
        Self { binding: ArgBinding::Absent, params: Vec::new() }
    }

    fn bound(binding: ArgBinding) -> Self {
        Self { binding, params: Vec::new() }
    }

    fn branch(params: Vec<ArgValue>) -> Self {
        Self { binding: ArgBinding::Branch, params }
    }

    /// Whether the slot matched nothing.
    pub fn is_absent(&self) -> bool {
        matches!(self.binding, ArgBinding::Absent)
    }

    /// The numeric value, if this slot bound a number.
    pub fn as_number(&self) -> Option<f64> {
        match self.binding {
            ArgBinding::Number { value, .. } => Some(value),
            _ => None,
        }
    }

    /// The word text, if this slot bound a free-form word.
    pub fn as_word(&self) -> Option<&str> {
        match &self.binding {
            ArgBinding::Word(text) => Some(text),
            _ => None,
        }
    }

    /// Interpret this slot as a duration in ticks.
    ///
    /// A number slot yields its (truncated, non-negative) value; a branch
    /// yields whatever its first binding does. Anything else yields `None`,
    /// which the tracker treats as "runs until turned off or replaced".
    pub fn ticks(&self) -> Option<u32> {
        match &self.binding {
            ArgBinding::Number { value, .. } if value.is_finite() && *value >= 0.0 => {
                Some(*value as u32)
            }
            ArgBinding::Branch => self.params.first().and_then(ArgValue::ticks),
            _ => None,
        }
    }
}

/// Match a full invocation: `name` is the tool-name token, `args` the rest
/// of the line. Fails with `UnknownTool` if the name is not catalogued.
pub fn match_invocation(
    registry: &ToolRegistry,
    name: &Token,
    args: &[Token],
) -> MatchResult<ToolMatch> {
    let schema = registry.get(&name.text).ok_or_else(|| MatchError::UnknownTool {
        name: name.text.clone(),
        span: name.span,
    })?;
    let matched = match_args_inner(schema, args, name.span)?;
    tracing::trace!(tool = %matched.tool, off = matched.is_off, "matched tool invocation");
    Ok(matched)
}

/// Match the argument tokens of an already-resolved tool.
pub fn match_args(schema: &ToolSchema, tokens: &[Token]) -> MatchResult<ToolMatch> {
    let anchor = tokens.first().map(|t| t.span).unwrap_or_default();
    match_args_inner(schema, tokens, anchor)
}

fn match_args_inner(schema: &ToolSchema, tokens: &[Token], anchor: Span) -> MatchResult<ToolMatch> {
    let span = tokens.iter().fold(anchor, |acc, t| acc.join(t.span));

    // Zero arguments: valid when the tool doesn't expect any, or when every
    // top-level slot is optional.
    if tokens.is_empty() {
        if !schema.expects_arguments || schema.args.iter().all(|n| !n.required) {
            return Ok(ToolMatch {
                tool: schema.name.clone(),
                span,
                is_off: false,
                args: schema.args.iter().map(|_| ArgValue::absent()).collect(),
            });
        }
        return Err(MatchError::MissingArguments { tool: schema.name.clone(), span });
    }

    // A lone `off` turns an off-capable tool off; `off` next to anything
    // else is an error rather than a keyword.
    if schema.has_off {
        if let Some(off_token) = tokens.iter().find(|t| t.is_keyword("off")) {
            if tokens.len() == 1 {
                return Ok(ToolMatch {
                    tool: schema.name.clone(),
                    span,
                    is_off: true,
                    args: Vec::new(),
                });
            }
            return Err(MatchError::OffMustBeAlone { span: off_token.span });
        }
    }

    let args = if schema.fixed_order {
        match_ordered(schema, tokens)
    } else {
        match_unordered(schema, tokens)
    }?;

    Ok(ToolMatch { tool: schema.name.clone(), span, is_off: false, args })
}

/// Why a node's head failed to match the token at the cursor.
enum HeadFail {
    /// No input left.
    Missing,
    /// Keyword text didn't match.
    Mismatch,
    /// Wrong token kind, or the text didn't convert to a number.
    Type,
    /// Mandatory unit suffix missing or wrong.
    Unit(String),
}

/// Try to match a single token against a node's head.
fn head_match(node: &ArgNode, token: &Token) -> Result<ArgBinding, HeadFail> {
    match &node.kind {
        NodeKind::Keyword(text) => {
            if token.is_keyword(text) {
                Ok(ArgBinding::Keyword(text.clone()))
            } else {
                Err(HeadFail::Mismatch)
            }
        }
        NodeKind::Value { expect: TokenKind::Number, unit } => {
            if token.kind != TokenKind::Number {
                return Err(HeadFail::Type);
            }
            parse_number(&token.text, unit.as_ref())
        }
        NodeKind::Value { expect: TokenKind::Word, .. } => {
            if token.kind == TokenKind::Word {
                Ok(ArgBinding::Word(token.text.clone()))
            } else {
                Err(HeadFail::Type)
            }
        }
    }
}

/// Strip a unit suffix (if the node demands one) and convert to a number.
fn parse_number(text: &str, unit: Option<&Unit>) -> Result<ArgBinding, HeadFail> {
    let parse = |digits: &str, unit: Option<String>| {
        digits
            .parse::<f64>()
            .map(|value| ArgBinding::Number { value, unit })
            .map_err(|_| HeadFail::Type)
    };
    match unit {
        Some(u) => match strip_suffix_ignore_case(text, &u.suffix) {
            Some(stripped) => parse(stripped, Some(u.suffix.clone())),
            None if u.optional => parse(text, None),
            None => Err(HeadFail::Unit(u.suffix.clone())),
        },
        None => parse(text, None),
    }
}

fn strip_suffix_ignore_case<'a>(text: &'a str, suffix: &str) -> Option<&'a str> {
    if text.len() < suffix.len() {
        return None;
    }
    let (head, tail) = text.split_at(text.len() - suffix.len());
    tail.eq_ignore_ascii_case(suffix).then_some(head)
}

/// Cursor over the token list for the ordered (declaration-order) walk.
struct Cursor<'a> {
    tool: &'a str,
    tokens: &'a [Token],
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn peek(&self) -> Option<&'a Token> {
        self.tokens.get(self.pos)
    }

    /// Span to blame when input ran out.
    fn end_span(&self) -> Span {
        self.tokens.last().map(|t| t.span).unwrap_or_default()
    }

    fn match_sequence(&mut self, nodes: &[ArgNode]) -> MatchResult<Vec<ArgValue>> {
        nodes.iter().map(|node| self.match_node(node)).collect()
    }

    fn match_node(&mut self, node: &ArgNode) -> MatchResult<ArgValue> {
        let head = match self.peek() {
            Some(token) => head_match(node, token),
            None => Err(HeadFail::Missing),
        };
        match head {
            Ok(binding) => {
                // Committed: consume the head and require the children.
                // A failure below never falls back to `otherwise`.
                self.pos += 1;
                let params = self.match_sequence(&node.children)?;
                Ok(ArgValue { binding, params })
            }
            Err(fail) => {
                if !node.otherwise.is_empty() {
                    let save = self.pos;
                    match self.match_sequence(&node.otherwise) {
                        // A branch that consumed nothing is just an absent slot.
                        Ok(_) if self.pos == save => Ok(ArgValue::absent()),
                        Ok(params) => Ok(ArgValue::branch(params)),
                        Err(_) if node.required => Err(self.node_error(node, fail)),
                        Err(_) => {
                            self.pos = save;
                            Ok(ArgValue::absent())
                        }
                    }
                } else if node.required {
                    Err(self.node_error(node, fail))
                } else {
                    Ok(ArgValue::absent())
                }
            }
        }
    }

    fn node_error(&self, node: &ArgNode, fail: HeadFail) -> MatchError {
        match (fail, self.peek()) {
            (HeadFail::Missing, _) | (_, None) => MatchError::MissingArguments {
                tool: self.tool.to_string(),
                span: self.end_span(),
            },
            (HeadFail::Mismatch, Some(token)) => MatchError::ArgumentMismatch {
                expected: node.expected(),
                found: token.text.clone(),
                span: token.span,
            },
            (HeadFail::Type, Some(token)) => MatchError::TypeMismatch {
                expected: node.expected(),
                found: token.text.clone(),
                span: token.span,
            },
            (HeadFail::Unit(unit), Some(token)) => {
                MatchError::UnitMismatch { unit, span: token.span }
            }
        }
    }
}

fn match_ordered(schema: &ToolSchema, tokens: &[Token]) -> MatchResult<Vec<ArgValue>> {
    let mut cursor = Cursor { tool: &schema.name, tokens, pos: 0 };
    let mut slots = Vec::with_capacity(schema.args.len());
    for node in &schema.args {
        slots.push(cursor.match_node(node)?);
    }
    if cursor.pos < tokens.len() && !schema.allow_arbitrary_arguments {
        let span = tokens[cursor.pos].span.join(cursor.end_span());
        return Err(MatchError::TrailingArguments { span });
    }
    Ok(slots)
}

/// Flag-set matching: every token must claim exactly one candidate node,
/// each candidate at most once. Candidates here are flag-like (no nested
/// grammars), so a slot binds the head alone.
fn match_unordered(schema: &ToolSchema, tokens: &[Token]) -> MatchResult<Vec<ArgValue>> {
    let mut slots: Vec<ArgValue> = schema.args.iter().map(|_| ArgValue::absent()).collect();
    let mut taken = vec![false; schema.args.len()];

    for token in tokens {
        let mut bound = None;
        let mut matched_taken_slot = false;
        for (i, node) in schema.args.iter().enumerate() {
            if let Ok(binding) = head_match(node, token) {
                if taken[i] {
                    matched_taken_slot = true;
                    continue;
                }
                bound = Some((i, binding));
                break;
            }
        }
        match bound {
            Some((i, binding)) => {
                taken[i] = true;
                slots[i] = ArgValue::bound(binding);
            }
            None if matched_taken_slot => {
                return Err(MatchError::DuplicateArgument {
                    text: token.text.clone(),
                    span: token.span,
                });
            }
            None if schema.allow_arbitrary_arguments => {}
            None => {
                return Err(MatchError::UnknownArgument {
                    text: token.text.clone(),
                    span: token.span,
                });
            }
        }
    }

    if schema.args.iter().zip(&taken).any(|(node, taken)| node.required && !taken) {
        let span = tokens.last().map(|t| t.span).unwrap_or_default();
        return Err(MatchError::MissingArguments { tool: schema.name.clone(), span });
    }

    Ok(slots)
}
