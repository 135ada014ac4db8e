//! Declarative argument grammars for tools.
//!
//! A `ToolSchema` describes one tool: how its arguments are shaped
//! (`ArgNode` tree), plus the execution metadata the runtime needs (argument
//! ordering, off-ability, active-state registration, duration slot, absolute
//! execution priority).
//!
//! Grammars are trees, not cycles: an `ArgNode` either consumes its
//! `children` right after it matches (a keyword taking parameters), or its
//! `otherwise` nodes in its place when it does not (keyword form vs.
//! positional form). At most one of the two branches fires per evaluation.

use tickscript_types::TokenKind;

/// A unit suffix expected on a numeric argument, e.g. `deg` in `90deg`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Unit {
    /// Suffix text, without the trailing `?`.
    pub suffix: String,
    /// Whether the suffix may be omitted (spelled `deg?` in the catalogue).
    pub optional: bool,
}

impl Unit {
    /// Parse a catalogue unit spec. A trailing `?` marks the suffix optional.
    pub fn parse(spec: &str) -> Self {
        match spec.strip_suffix('?') {
            Some(suffix) => Self { suffix: suffix.to_string(), optional: true },
            None => Self { suffix: spec.to_string(), optional: false },
        }
    }
}

/// What a single argument slot accepts.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    /// A fixed keyword, matched case-insensitively (`pos`, `vec`, `spam`).
    Keyword(String),
    /// A value of the given token kind, optionally carrying a unit suffix.
    Value { expect: TokenKind, unit: Option<Unit> },
}

/// One argument slot in a tool grammar.
#[derive(Debug, Clone, PartialEq)]
pub struct ArgNode {
    pub kind: NodeKind,
    pub required: bool,
    /// Hover documentation for this argument, passed through opaquely.
    pub description: Option<String>,
    /// Consumed right after this node, only if this node matched.
    pub children: Vec<ArgNode>,
    /// Consumed in this node's place, only if this node did not match.
    pub otherwise: Vec<ArgNode>,
}

impl ArgNode {
    fn new(kind: NodeKind) -> Self {
        Self { kind, required: true, description: None, children: Vec::new(), otherwise: Vec::new() }
    }

    /// A required keyword argument.
    pub fn keyword(text: impl Into<String>) -> Self {
        Self::new(NodeKind::Keyword(text.into()))
    }

    /// A required plain number.
    pub fn number() -> Self {
        Self::new(NodeKind::Value { expect: TokenKind::Number, unit: None })
    }

    /// A required number carrying a unit suffix (`"deg"`, or `"deg?"` if the
    /// suffix may be left off).
    pub fn number_with_unit(unit: &str) -> Self {
        Self::new(NodeKind::Value { expect: TokenKind::Number, unit: Some(Unit::parse(unit)) })
    }

    /// A required free-form word (entity names, easing names).
    pub fn word() -> Self {
        Self::new(NodeKind::Value { expect: TokenKind::Word, unit: None })
    }

    /// Mark this argument optional.
    pub fn optional(mut self) -> Self {
        self.required = false;
        self
    }

    /// Attach hover documentation.
    pub fn describe(mut self, text: impl Into<String>) -> Self {
        self.description = Some(text.into());
        self
    }

    /// Arguments consumed right after this node when it matches.
    pub fn children(mut self, nodes: impl IntoIterator<Item = ArgNode>) -> Self {
        self.children = nodes.into_iter().collect();
        self
    }

    /// Arguments consumed in this node's place when it does not match.
    pub fn otherwise(mut self, nodes: impl IntoIterator<Item = ArgNode>) -> Self {
        self.otherwise = nodes.into_iter().collect();
        self
    }

    /// Human-readable description of what this slot accepts, for diagnostics.
    pub fn expected(&self) -> String {
        match &self.kind {
            NodeKind::Keyword(text) => format!("keyword '{}'", text),
            NodeKind::Value { expect: TokenKind::Number, unit: Some(u) } => {
                format!("a number with unit '{}'", u.suffix)
            }
            NodeKind::Value { expect: TokenKind::Number, unit: None } => "a number".to_string(),
            NodeKind::Value { expect: TokenKind::Word, .. } => "a word".to_string(),
        }
    }
}

/// Declarative grammar plus execution metadata for one tool.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolSchema {
    /// Unique, case-sensitive tool name.
    pub name: String,
    /// If true, arguments appear in declaration order; if false, they form a
    /// flag set consumed in any order, each at most once.
    pub fixed_order: bool,
    /// Whether a lone `off` argument turns the tool off.
    pub has_off: bool,
    /// Whether a successful non-off invocation is tracked as a running tool.
    /// One-shot tools (a single action on one tick) leave this false.
    pub registers_active_state: bool,
    /// Index into the matched argument list of the slot holding the tool's
    /// duration in ticks. `None` means the tool runs until turned off or
    /// replaced.
    pub duration_index: Option<usize>,
    /// Top-level argument grammar.
    pub args: Vec<ArgNode>,
    /// Whether a zero-argument invocation needs special permission: if
    /// false, invoking the tool without arguments is always valid.
    pub expects_arguments: bool,
    /// Accept unmatched tokens silently (`cmd` takes a raw console command).
    pub allow_arbitrary_arguments: bool,
    /// Absolute position in the executor's per-tick ordering; lower runs
    /// first. External consumers depend on these values staying put.
    pub priority: u32,
    /// Hover documentation, passed through opaquely.
    pub description: String,
}

impl ToolSchema {
    /// Create a schema with the defaults most tools share: fixed argument
    /// order, no `off`, one-shot (untracked), no duration, arguments
    /// expected.
    pub fn new(name: impl Into<String>, priority: u32, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fixed_order: true,
            has_off: false,
            registers_active_state: false,
            duration_index: None,
            args: Vec::new(),
            expects_arguments: true,
            allow_arbitrary_arguments: false,
            priority,
            description: description.into(),
        }
    }

    /// Arguments form an unordered flag set.
    pub fn unordered(mut self) -> Self {
        self.fixed_order = false;
        self
    }

    /// The tool accepts a lone `off` argument.
    pub fn with_off(mut self) -> Self {
        self.has_off = true;
        self
    }

    /// Successful invocations are tracked as running tools.
    pub fn registers_active_state(mut self) -> Self {
        self.registers_active_state = true;
        self
    }

    /// Which matched-argument slot holds the duration in ticks.
    pub fn duration_index(mut self, index: usize) -> Self {
        self.duration_index = Some(index);
        self
    }

    /// A zero-argument invocation is always valid for this tool.
    pub fn arguments_optional(mut self) -> Self {
        self.expects_arguments = false;
        self
    }

    /// Accept unmatched trailing tokens silently.
    pub fn allow_arbitrary_arguments(mut self) -> Self {
        self.allow_arbitrary_arguments = true;
        self
    }

    /// Add a top-level argument slot.
    pub fn arg(mut self, node: ArgNode) -> Self {
        self.args.push(node);
        self
    }
}
