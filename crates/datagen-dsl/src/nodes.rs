//! Node constructors invoked by the grammar actions.
//!
//! Every constructor takes the active [`ParseContext`], copies its location
//! into the produced node and returns either a complete node or one error.

use chrono::NaiveDate;

use crate::ast::{Location, Node, NodeKind, NodeSet};
use crate::error::{DslError, Result};

/// Matched text and position of the grammar rule being reduced.
#[derive(Debug, Clone)]
pub struct ParseContext<'a> {
    text: &'a str,
    location: Location,
}

impl<'a> ParseContext<'a> {
    pub fn new(text: &'a str, location: Location) -> Self {
        Self { text, location }
    }

    pub fn text(&self) -> &'a str {
        self.text
    }

    pub fn location(&self) -> &Location {
        &self.location
    }

    fn node(&self, kind: NodeKind) -> Node {
        Node::new(kind, self.location.clone())
    }
}

pub fn root_node(ctx: &ParseContext<'_>, statements: NodeSet) -> Result<Node> {
    Ok(ctx.node(NodeKind::Root {
        children: statements,
    }))
}

pub fn entity_node(ctx: &ParseContext<'_>, name: &Node, body: NodeSet) -> Result<Node> {
    Ok(ctx.node(NodeKind::Definition {
        name: identifier_text(ctx, name)?,
        children: body,
        related: None,
    }))
}

/// Definition of `name` seeded from the entity referenced by `parent`.
pub fn entity_extension_node(
    ctx: &ParseContext<'_>,
    name: &Node,
    parent: Node,
    body: NodeSet,
) -> Result<Node> {
    identifier_text(ctx, &parent)?;
    Ok(ctx.node(NodeKind::Definition {
        name: identifier_text(ctx, name)?,
        children: body,
        related: Some(Box::new(parent)),
    }))
}

pub fn gen_node(
    ctx: &ParseContext<'_>,
    target: Node,
    overrides: Option<NodeSet>,
    args: Option<NodeSet>,
) -> Result<Node> {
    Ok(ctx.node(NodeKind::Generation {
        target: Box::new(target),
        args: args.unwrap_or_default(),
        overrides: overrides.unwrap_or_default(),
    }))
}

pub fn static_field_node(ctx: &ParseContext<'_>, name: &Node, value: Node) -> Result<Node> {
    Ok(ctx.node(NodeKind::Field {
        name: identifier_text(ctx, name)?,
        value: Box::new(value),
        args: NodeSet::new(),
    }))
}

pub fn dynamic_field_node(
    ctx: &ParseContext<'_>,
    name: &Node,
    value: Node,
    args: Option<NodeSet>,
) -> Result<Node> {
    Ok(ctx.node(NodeKind::Field {
        name: identifier_text(ctx, name)?,
        value: Box::new(value),
        args: args.unwrap_or_default(),
    }))
}

pub fn id_node(ctx: &ParseContext<'_>) -> Result<Node> {
    Ok(ctx.node(NodeKind::Identifier {
        value: ctx.text().to_string(),
    }))
}

pub fn builtin_node(ctx: &ParseContext<'_>) -> Result<Node> {
    Ok(ctx.node(NodeKind::Builtin {
        value: ctx.text().to_string(),
    }))
}

/// Calendar date followed by optional time/offset captures, all of which
/// must be empty.
pub fn date_literal_node(ctx: &ParseContext<'_>, date: &str, trailing: &[&str]) -> Result<Node> {
    if let Some(suffix) = trailing.iter().find(|token| !token.is_empty()) {
        return Err(DslError::DateSuffix {
            suffix: suffix.to_string(),
            location: ctx.location().clone(),
        });
    }

    let value = NaiveDate::parse_from_str(date, crate::DATE_FORMAT).map_err(|_| {
        DslError::InvalidDate {
            text: date.to_string(),
            location: ctx.location().clone(),
        }
    })?;
    Ok(ctx.node(NodeKind::LiteralDate { value }))
}

pub fn int_literal_node(ctx: &ParseContext<'_>, text: &str) -> Result<Node> {
    let value = text
        .parse::<i64>()
        .map_err(|_| malformed_number(ctx, text))?;
    Ok(ctx.node(NodeKind::LiteralInt { value }))
}

pub fn float_literal_node(ctx: &ParseContext<'_>, text: &str) -> Result<Node> {
    let value = text
        .parse::<f64>()
        .map_err(|_| malformed_number(ctx, text))?;
    Ok(ctx.node(NodeKind::LiteralFloat { value }))
}

pub fn null_literal_node(ctx: &ParseContext<'_>) -> Result<Node> {
    Ok(ctx.node(NodeKind::LiteralNull))
}

pub fn bool_literal_node(ctx: &ParseContext<'_>) -> Result<Node> {
    let value = match ctx.text() {
        "true" => true,
        "false" => false,
        other => {
            return Err(DslError::InvalidBool {
                text: other.to_string(),
                location: ctx.location().clone(),
            });
        }
    };
    Ok(ctx.node(NodeKind::LiteralBool { value }))
}

pub fn str_literal_node(ctx: &ParseContext<'_>) -> Result<Node> {
    let text = ctx.text();
    let value = text
        .strip_prefix('"')
        .and_then(|rest| rest.strip_suffix('"'))
        .ok_or_else(|| DslError::UnquotedString {
            text: text.to_string(),
            location: ctx.location().clone(),
        })?;
    Ok(ctx.node(NodeKind::LiteralString {
        value: value.to_string(),
    }))
}

fn identifier_text(ctx: &ParseContext<'_>, node: &Node) -> Result<String> {
    node.symbol()
        .map(str::to_string)
        .ok_or_else(|| DslError::ExpectedIdentifier {
            found: node.kind().to_string(),
            location: ctx.location().clone(),
        })
}

fn malformed_number(ctx: &ParseContext<'_>, text: &str) -> DslError {
    DslError::MalformedNumber {
        text: text.to_string(),
        location: ctx.location().clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEXT: &str = "wubba lubba dub dub!!!!";

    fn location() -> Location {
        Location::new("whatever.spec", 4, 3, 42)
    }

    fn ctx(text: &str) -> ParseContext<'_> {
        ParseContext::new(text, location())
    }

    fn located(kind: NodeKind) -> Node {
        Node::new(kind, location())
    }

    #[test]
    fn root_node_wraps_statements() {
        let kids = vec![Node::identifier("a"), Node::identifier("b")];
        let actual = root_node(&ctx(TEXT), kids.clone()).expect("root node");
        assert_eq!(actual, located(NodeKind::Root { children: kids }));
    }

    #[test]
    fn entity_node_takes_name_from_identifier() {
        let kids = vec![
            Node::field("beth", Node::null(), vec![]),
            Node::from(NodeKind::Argument {
                name: "morty".to_string(),
                value: None,
            }),
        ];
        let actual = entity_node(&ctx(TEXT), &Node::identifier("Rick"), kids.clone())
            .expect("entity node");
        assert_eq!(
            actual,
            located(NodeKind::Definition {
                name: "Rick".to_string(),
                children: kids,
                related: None,
            })
        );
    }

    #[test]
    fn entity_node_rejects_non_identifier_name() {
        let err = entity_node(&ctx(TEXT), &Node::int(3), vec![]).unwrap_err();
        assert!(matches!(err, DslError::ExpectedIdentifier { .. }));
    }

    #[test]
    fn extension_node_keeps_parent_reference() {
        let actual = entity_extension_node(
            &ctx(TEXT),
            &Node::identifier("lazyPerson"),
            Node::identifier("person"),
            vec![],
        )
        .expect("extension node");
        assert_eq!(actual.related(), Some(&Node::identifier("person")));
    }

    #[test]
    fn gen_node_with_args() {
        let args = vec![Node::int(2)];
        let actual =
            gen_node(&ctx(TEXT), Node::identifier("Beth"), None, Some(args.clone())).expect("gen");
        assert_eq!(
            actual,
            located(NodeKind::Generation {
                target: Box::new(Node::identifier("Beth")),
                args,
                overrides: vec![],
            })
        );
    }

    #[test]
    fn gen_node_without_args_defaults_to_empty() {
        let actual = gen_node(&ctx(TEXT), Node::identifier("Beth"), None, None).expect("gen");
        assert!(actual.args().is_empty());
        assert!(actual.children().is_empty());
    }

    #[test]
    fn static_field_node_has_no_args() {
        let morty = Node::builtin("morty");
        let actual =
            static_field_node(&ctx(TEXT), &Node::identifier("Rick"), morty.clone()).expect("field");
        assert_eq!(
            actual,
            located(NodeKind::Field {
                name: "Rick".to_string(),
                value: Box::new(morty),
                args: vec![],
            })
        );
    }

    #[test]
    fn dynamic_field_node_with_and_without_args() {
        let morty = Node::builtin("morty");
        let without = dynamic_field_node(&ctx(TEXT), &Node::identifier("Rick"), morty.clone(), None)
            .expect("field");
        assert!(without.args().is_empty());

        let args = vec![Node::null()];
        let with = dynamic_field_node(
            &ctx(TEXT),
            &Node::identifier("Rick"),
            morty,
            Some(args.clone()),
        )
        .expect("field");
        assert_eq!(with.args(), args.as_slice());
    }

    #[test]
    fn id_and_builtin_nodes_copy_text() {
        let id = id_node(&ctx(TEXT)).expect("id");
        assert_eq!(
            id,
            located(NodeKind::Identifier {
                value: TEXT.to_string()
            })
        );
        let builtin = builtin_node(&ctx(TEXT)).expect("builtin");
        assert_eq!(builtin.symbol(), Some(TEXT));
        assert_eq!(builtin.location, location());
    }

    #[test]
    fn date_literal_node_parses_full_date() {
        let expected = NaiveDate::from_ymd_opt(2017, 7, 19).expect("valid date");
        let actual = date_literal_node(&ctx(TEXT), "2017-07-19", &[]).expect("date");
        assert_eq!(actual, located(NodeKind::LiteralDate { value: expected }));

        let with_empty = date_literal_node(&ctx(TEXT), "2017-07-19", &["", ""]).expect("date");
        assert_eq!(with_empty.as_date(), Some(expected));
    }

    #[test]
    fn date_literal_node_rejects_time_suffix() {
        let err = date_literal_node(&ctx(TEXT), "2017-07-19", &["13:00:00-0700"]).unwrap_err();
        assert!(matches!(err, DslError::DateSuffix { .. }));
    }

    #[test]
    fn date_literal_node_rejects_bad_date() {
        let err = date_literal_node(&ctx(TEXT), "2017-13-40", &[]).unwrap_err();
        assert!(matches!(err, DslError::InvalidDate { .. }));
    }

    #[test]
    fn int_literal_node_matches_reference_parser() {
        for text in ["5", "-12", "0", "9223372036854775807"] {
            let node = int_literal_node(&ctx(TEXT), text).expect("int");
            assert_eq!(node.as_int(), text.parse::<i64>().ok());
        }
        assert!(int_literal_node(&ctx(TEXT), "\u{5}").is_err());
        assert!(int_literal_node(&ctx(TEXT), "5.5").is_err());
    }

    #[test]
    fn float_literal_node() {
        let node = super::float_literal_node(&ctx(TEXT), "5").expect("float");
        assert_eq!(node, located(NodeKind::LiteralFloat { value: 5.0 }));
        let err = super::float_literal_node(&ctx(TEXT), "five").unwrap_err();
        assert!(matches!(err, DslError::MalformedNumber { .. }));
        assert_eq!(err.location(), Some(&location()));
    }

    #[test]
    fn null_literal_node_has_no_value() {
        let node = null_literal_node(&ctx(TEXT)).expect("null");
        assert_eq!(node, located(NodeKind::LiteralNull));
    }

    #[test]
    fn bool_literal_node_accepts_only_true_and_false() {
        assert_eq!(
            bool_literal_node(&ctx("true")).expect("bool"),
            located(NodeKind::LiteralBool { value: true })
        );
        assert_eq!(
            bool_literal_node(&ctx("false")).expect("bool"),
            located(NodeKind::LiteralBool { value: false })
        );
        for text in ["eek", "True", " true", ""] {
            assert!(bool_literal_node(&ctx(text)).is_err(), "{text:?} accepted");
        }
    }

    #[test]
    fn str_literal_node_strips_quotes() {
        let node = str_literal_node(&ctx("\"v\"")).expect("string");
        assert_eq!(
            node,
            located(NodeKind::LiteralString {
                value: "v".to_string()
            })
        );
        assert_eq!(
            str_literal_node(&ctx("\"\"")).expect("empty string").as_str(),
            Some("")
        );
    }

    #[test]
    fn str_literal_node_requires_both_quotes() {
        for text in [TEXT, "\"open", "close\"", "\""] {
            let err = str_literal_node(&ctx(text)).unwrap_err();
            assert!(matches!(err, DslError::UnquotedString { .. }), "{text:?}");
        }
    }
}
