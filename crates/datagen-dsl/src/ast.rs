use std::fmt::{self, Display, Formatter};

use chrono::NaiveDate;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Ordered collection of nodes (entity bodies, statements, arguments).
pub type NodeSet = Vec<Node>;

/// Position of a node in its source file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Location {
    pub filename: String,
    pub line: usize,
    pub column: usize,
    /// Byte offset from the start of the file.
    pub offset: usize,
}

impl Location {
    pub fn new(filename: impl Into<String>, line: usize, column: usize, offset: usize) -> Self {
        Self {
            filename: filename.into(),
            line,
            column,
            offset,
        }
    }
}

impl Display for Location {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.filename, self.line, self.column)
    }
}

/// Syntactic category of a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    Root,
    Definition,
    Field,
    Generation,
    Identifier,
    Builtin,
    Argument,
    LiteralString,
    LiteralInt,
    LiteralFloat,
    LiteralDate,
    LiteralBool,
    LiteralNull,
}

impl Kind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Kind::Root => "root",
            Kind::Definition => "definition",
            Kind::Field => "field",
            Kind::Generation => "generation",
            Kind::Identifier => "identifier",
            Kind::Builtin => "builtin",
            Kind::Argument => "argument",
            Kind::LiteralString => "literal-string",
            Kind::LiteralInt => "literal-int",
            Kind::LiteralFloat => "literal-float",
            Kind::LiteralDate => "literal-date",
            Kind::LiteralBool => "literal-bool",
            Kind::LiteralNull => "literal-null",
        }
    }

    pub fn is_literal(&self) -> bool {
        matches!(
            self,
            Kind::LiteralString
                | Kind::LiteralInt
                | Kind::LiteralFloat
                | Kind::LiteralDate
                | Kind::LiteralBool
                | Kind::LiteralNull
        )
    }
}

impl Display for Kind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Payload of a node; each variant carries only what its kind uses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum NodeKind {
    /// Top-level statements in declaration order.
    Root { children: NodeSet },
    /// Entity definition, optionally extending the entity named by `related`.
    Definition {
        name: String,
        #[serde(default)]
        children: NodeSet,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        related: Option<Box<Node>>,
    },
    /// Field binding. `value` is a literal, builtin, identifier or nested
    /// definition; `args` are builtin arguments or count tokens.
    Field {
        name: String,
        value: Box<Node>,
        #[serde(default)]
        args: NodeSet,
    },
    /// Generation directive for `target` with optional count args and
    /// inline overrides.
    Generation {
        target: Box<Node>,
        #[serde(default)]
        args: NodeSet,
        #[serde(default)]
        overrides: NodeSet,
    },
    Identifier { value: String },
    Builtin { value: String },
    Argument {
        name: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        value: Option<Box<Node>>,
    },
    LiteralString { value: String },
    LiteralInt { value: i64 },
    LiteralFloat { value: f64 },
    LiteralDate {
        #[schemars(with = "String")]
        value: NaiveDate,
    },
    LiteralBool { value: bool },
    LiteralNull,
}

impl NodeKind {
    pub fn kind(&self) -> Kind {
        match self {
            NodeKind::Root { .. } => Kind::Root,
            NodeKind::Definition { .. } => Kind::Definition,
            NodeKind::Field { .. } => Kind::Field,
            NodeKind::Generation { .. } => Kind::Generation,
            NodeKind::Identifier { .. } => Kind::Identifier,
            NodeKind::Builtin { .. } => Kind::Builtin,
            NodeKind::Argument { .. } => Kind::Argument,
            NodeKind::LiteralString { .. } => Kind::LiteralString,
            NodeKind::LiteralInt { .. } => Kind::LiteralInt,
            NodeKind::LiteralFloat { .. } => Kind::LiteralFloat,
            NodeKind::LiteralDate { .. } => Kind::LiteralDate,
            NodeKind::LiteralBool { .. } => Kind::LiteralBool,
            NodeKind::LiteralNull => Kind::LiteralNull,
        }
    }
}

/// Universal syntax tree value.
///
/// Equality is structural over the payload and the location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Node {
    pub kind: NodeKind,
    #[serde(default, rename = "ref")]
    pub location: Location,
}

impl Node {
    pub fn new(kind: NodeKind, location: Location) -> Self {
        Self { kind, location }
    }

    pub fn root(children: NodeSet) -> Self {
        NodeKind::Root { children }.into()
    }

    pub fn definition(name: impl Into<String>, children: NodeSet) -> Self {
        NodeKind::Definition {
            name: name.into(),
            children,
            related: None,
        }
        .into()
    }

    /// Definition of `name` that starts from a copy of `parent`.
    pub fn extension(name: impl Into<String>, parent: impl Into<String>, children: NodeSet) -> Self {
        NodeKind::Definition {
            name: name.into(),
            children,
            related: Some(Box::new(Node::identifier(parent))),
        }
        .into()
    }

    pub fn field(name: impl Into<String>, value: Node, args: NodeSet) -> Self {
        NodeKind::Field {
            name: name.into(),
            value: Box::new(value),
            args,
        }
        .into()
    }

    pub fn generation(target: Node, args: NodeSet) -> Self {
        NodeKind::Generation {
            target: Box::new(target),
            args,
            overrides: NodeSet::new(),
        }
        .into()
    }

    pub fn identifier(value: impl Into<String>) -> Self {
        NodeKind::Identifier {
            value: value.into(),
        }
        .into()
    }

    pub fn builtin(value: impl Into<String>) -> Self {
        NodeKind::Builtin {
            value: value.into(),
        }
        .into()
    }

    pub fn string(value: impl Into<String>) -> Self {
        NodeKind::LiteralString {
            value: value.into(),
        }
        .into()
    }

    pub fn int(value: i64) -> Self {
        NodeKind::LiteralInt { value }.into()
    }

    pub fn float(value: f64) -> Self {
        NodeKind::LiteralFloat { value }.into()
    }

    pub fn date(value: NaiveDate) -> Self {
        NodeKind::LiteralDate { value }.into()
    }

    pub fn bool(value: bool) -> Self {
        NodeKind::LiteralBool { value }.into()
    }

    pub fn null() -> Self {
        NodeKind::LiteralNull.into()
    }

    pub fn kind(&self) -> Kind {
        self.kind.kind()
    }

    /// Declared name of definitions, fields and arguments.
    pub fn name(&self) -> Option<&str> {
        match &self.kind {
            NodeKind::Definition { name, .. }
            | NodeKind::Field { name, .. }
            | NodeKind::Argument { name, .. } => Some(name.as_str()),
            _ => None,
        }
    }

    /// Source text of identifier and builtin nodes.
    pub fn symbol(&self) -> Option<&str> {
        match &self.kind {
            NodeKind::Identifier { value } | NodeKind::Builtin { value } => Some(value.as_str()),
            _ => None,
        }
    }

    pub fn children(&self) -> &[Node] {
        match &self.kind {
            NodeKind::Root { children } | NodeKind::Definition { children, .. } => children,
            NodeKind::Generation { overrides, .. } => overrides,
            _ => &[],
        }
    }

    pub fn args(&self) -> &[Node] {
        match &self.kind {
            NodeKind::Field { args, .. } | NodeKind::Generation { args, .. } => args,
            _ => &[],
        }
    }

    pub fn related(&self) -> Option<&Node> {
        match &self.kind {
            NodeKind::Definition { related, .. } => related.as_deref(),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self.kind {
            NodeKind::LiteralInt { value } => Some(value),
            _ => None,
        }
    }

    /// Float value, widening integer literals.
    pub fn as_float(&self) -> Option<f64> {
        match self.kind {
            NodeKind::LiteralFloat { value } => Some(value),
            NodeKind::LiteralInt { value } => Some(value as f64),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match &self.kind {
            NodeKind::LiteralString { value } => Some(value.as_str()),
            _ => None,
        }
    }

    pub fn as_date(&self) -> Option<NaiveDate> {
        match self.kind {
            NodeKind::LiteralDate { value } => Some(value),
            _ => None,
        }
    }

    /// Short type name used in diagnostics (`string`, `integer`, ...).
    pub fn type_name(&self) -> &'static str {
        match self.kind {
            NodeKind::LiteralString { .. } => "string",
            NodeKind::LiteralInt { .. } => "integer",
            NodeKind::LiteralFloat { .. } => "decimal",
            NodeKind::LiteralDate { .. } => "date",
            NodeKind::LiteralBool { .. } => "bool",
            NodeKind::LiteralNull => "null",
            _ => self.kind().as_str(),
        }
    }

    /// Bare value text used in diagnostics.
    pub fn value_text(&self) -> String {
        match &self.kind {
            NodeKind::LiteralString { value }
            | NodeKind::Identifier { value }
            | NodeKind::Builtin { value } => value.clone(),
            NodeKind::LiteralInt { value } => value.to_string(),
            NodeKind::LiteralFloat { value } => value.to_string(),
            NodeKind::LiteralDate { value } => value.format(crate::DATE_FORMAT).to_string(),
            NodeKind::LiteralBool { value } => value.to_string(),
            NodeKind::LiteralNull => "null".to_string(),
            NodeKind::Definition { name, .. }
            | NodeKind::Field { name, .. }
            | NodeKind::Argument { name, .. } => name.clone(),
            NodeKind::Root { .. } | NodeKind::Generation { .. } => self.kind().to_string(),
        }
    }
}

impl From<NodeKind> for Node {
    fn from(kind: NodeKind) -> Self {
        Self {
            kind,
            location: Location::default(),
        }
    }
}

impl Display for Node {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind())?;
        match &self.kind {
            NodeKind::Root { children } => write_set(f, "children", children)?,
            NodeKind::Definition {
                name,
                children,
                related,
            } => {
                write!(f, " {name:?}")?;
                if let Some(parent) = related {
                    write!(f, " extends ({parent})")?;
                }
                write_set(f, "children", children)?;
            }
            NodeKind::Field { name, value, args } => {
                write!(f, " {name:?} = ({value})")?;
                write_set(f, "args", args)?;
            }
            NodeKind::Generation {
                target,
                args,
                overrides,
            } => {
                write!(f, " ({target})")?;
                write_set(f, "args", args)?;
                write_set(f, "overrides", overrides)?;
            }
            NodeKind::Identifier { value } | NodeKind::Builtin { value } => {
                write!(f, " {value}")?
            }
            NodeKind::Argument { name, value } => {
                write!(f, " {name:?}")?;
                if let Some(value) = value {
                    write!(f, " = ({value})")?;
                }
            }
            NodeKind::LiteralString { value } => write!(f, " {value:?}")?,
            NodeKind::LiteralInt { value } => write!(f, " {value}")?,
            NodeKind::LiteralFloat { value } => write!(f, " {value:?}")?,
            NodeKind::LiteralDate { value } => write!(f, " {value}")?,
            NodeKind::LiteralBool { value } => write!(f, " {value}")?,
            NodeKind::LiteralNull => {}
        }
        if self.location != Location::default() {
            write!(f, " @{}", self.location)?;
        }
        Ok(())
    }
}

fn write_set(f: &mut Formatter<'_>, label: &str, nodes: &[Node]) -> fmt::Result {
    write!(f, " {label}=[")?;
    for (idx, node) in nodes.iter().enumerate() {
        if idx > 0 {
            f.write_str(", ")?;
        }
        write!(f, "({node})")?;
    }
    f.write_str("]")
}
