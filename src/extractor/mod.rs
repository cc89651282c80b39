//! Metadata Extractor
//!
//! Walks a syntax tree in pre-order and emits one [`FunctionRecord`] for every
//! function-like node, in the order those nodes appear in the source. Nested
//! functions yield their own record after the enclosing one.
//!
//! For each function-like node only its direct children are inspected:
//! - an identifier becomes the name
//! - a parameter list contributes each of its children verbatim, punctuation included
//! - a type node becomes the return type
//!
//! When several children match the same role the last one wins. Declarator
//! wrappers (C) are looked through as if their children were direct children.
//! A kind table may pin a grammar field to a role regardless of the child's
//! kind, such as the Go `result` field, which can hold a whole parameter list.

pub mod kinds;

pub use kinds::{KindProfile, KindTable, NodeCategory};

use crate::syntax::SyntaxNode;
use crate::{Error, Language, Result};
use serde::{Deserialize, Serialize};

/// Signature of one function-like node
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionRecord {
    pub function_name: Option<String>,
    pub return_type: Option<String>,
    /// Raw source fragments of the parameter list's children
    pub parameters: Vec<String>,
}

/// How a function node's children are assigned to record fields
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum FieldStrategy {
    /// By child kind; the last matching child wins
    #[default]
    LastMatch,
    /// By the grammar field the child occupies (`name`, `parameters`, ...)
    GrammarField,
}

/// Extraction settings chosen per run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExtractOptions {
    pub kinds: KindProfile,
    pub strategy: FieldStrategy,
}

/// Extracts function records from syntax trees of one grammar
#[derive(Debug, Clone)]
pub struct Extractor {
    table: KindTable,
    strategy: FieldStrategy,
}

impl Extractor {
    pub fn new(table: KindTable, strategy: FieldStrategy) -> Self {
        Self { table, strategy }
    }

    /// Create an extractor for trees produced by a language's grammar
    pub fn for_language(language: Language, options: ExtractOptions) -> Self {
        Self::new(KindTable::select(options.kinds, language), options.strategy)
    }

    /// Extract every function record below (and including) `root`.
    ///
    /// `source` is the buffer the tree was parsed from. Fails with
    /// [`Error::Decode`] when a captured byte range is not UTF-8 and with
    /// [`Error::MalformedTree`] when node ranges violate the tree invariants.
    pub fn extract<N: SyntaxNode>(&self, root: N, source: &[u8]) -> Result<Vec<FunctionRecord>> {
        if root.start_byte() > root.end_byte() || root.end_byte() > source.len() {
            return Err(Error::MalformedTree(format!(
                "root `{}` spans {}..{} but source has {} bytes",
                root.kind(),
                root.start_byte(),
                root.end_byte(),
                source.len()
            )));
        }

        let mut records = Vec::new();
        let mut stack = vec![root];

        while let Some(node) = stack.pop() {
            let children = node.children();
            check_children(&node, &children)?;

            if self.table.is_function_like(node.kind()) {
                let mut record = FunctionRecord::default();
                self.fill(&children, source, &mut record)?;
                records.push(record);
            }

            // Reversed so the leftmost child is popped first
            stack.extend(children.into_iter().rev());
        }

        tracing::trace!("{} table produced {} records", self.table.name(), records.len());
        Ok(records)
    }

    fn fill<N: SyntaxNode>(&self, children: &[N], source: &[u8], record: &mut FunctionRecord) -> Result<()> {
        for child in children {
            match self.classify(child) {
                NodeCategory::Identifier => {
                    record.function_name = Some(decode(child, source)?);
                }
                NodeCategory::ParameterList => {
                    record.parameters = child
                        .children()
                        .iter()
                        .map(|param| decode(param, source))
                        .collect::<Result<_>>()?;
                }
                NodeCategory::Parameter => {
                    record.parameters = vec![decode(child, source)?];
                }
                NodeCategory::TypeIdentifier => {
                    record.return_type = Some(decode(child, source)?);
                }
                NodeCategory::Declarator => {
                    self.fill(&child.children(), source, record)?;
                }
                NodeCategory::FunctionLike | NodeCategory::Other => {}
            }
        }
        Ok(())
    }

    fn classify<N: SyntaxNode>(&self, child: &N) -> NodeCategory {
        if let Some(category) = child.field_name().and_then(|field| self.table.field_override(field)) {
            return category;
        }
        match self.strategy {
            FieldStrategy::LastMatch => self.table.category(child.kind()),
            FieldStrategy::GrammarField => {
                let Some(field) = child.field_name() else {
                    return NodeCategory::Other;
                };
                match self.table.field_category(field) {
                    // `declarator` holds either another declarator or the bare name
                    NodeCategory::Declarator => match self.table.category(child.kind()) {
                        NodeCategory::Declarator => NodeCategory::Declarator,
                        NodeCategory::Identifier => NodeCategory::Identifier,
                        _ => NodeCategory::Other,
                    },
                    category => category,
                }
            }
        }
    }
}

fn check_children<N: SyntaxNode>(parent: &N, children: &[N]) -> Result<()> {
    let mut cursor = parent.start_byte();
    for child in children {
        let (start, end) = (child.start_byte(), child.end_byte());
        if start < cursor || start > end || end > parent.end_byte() {
            return Err(Error::MalformedTree(format!(
                "child `{}` at {}..{} is out of place in `{}` at {}..{}",
                child.kind(),
                start,
                end,
                parent.kind(),
                parent.start_byte(),
                parent.end_byte()
            )));
        }
        cursor = end;
    }
    Ok(())
}

fn decode<N: SyntaxNode>(node: &N, source: &[u8]) -> Result<String> {
    let (start, end) = (node.start_byte(), node.end_byte());
    let bytes = source.get(start..end).ok_or_else(|| {
        Error::MalformedTree(format!(
            "`{}` at {}..{} exceeds source of {} bytes",
            node.kind(),
            start,
            end,
            source.len()
        ))
    })?;
    std::str::from_utf8(bytes)
        .map(str::to_string)
        .map_err(|source| Error::Decode { start, end, source })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::OwnedNode;

    /// Builds a source buffer alongside leaf nodes pointing into it
    #[derive(Default)]
    struct Source {
        text: String,
    }

    impl Source {
        fn leaf(&mut self, kind: &str, text: &str) -> OwnedNode {
            let start = self.text.len();
            self.text.push_str(text);
            let end = self.text.len();
            self.text.push(' ');
            OwnedNode::new(kind, start..end)
        }

        fn bytes(&self) -> &[u8] {
            self.text.as_bytes()
        }
    }

    fn node(kind: &str, children: Vec<OwnedNode>) -> OwnedNode {
        OwnedNode::branch(kind, children)
    }

    fn compat() -> Extractor {
        Extractor::new(KindTable::compat(), FieldStrategy::LastMatch)
    }

    fn names(records: &[FunctionRecord]) -> Vec<Option<&str>> {
        records.iter().map(|r| r.function_name.as_deref()).collect()
    }

    #[test]
    fn test_single_function_with_params_and_type() {
        let mut src = Source::default();
        let func = node(
            "function_definition",
            vec![
                src.leaf("identifier", "foo"),
                node(
                    "parameter_list",
                    vec![src.leaf("identifier", "x"), src.leaf("identifier", "y")],
                ),
                src.leaf("type_identifier", "int"),
            ],
        );
        let root = node("translation_unit", vec![func]);

        let records = compat().extract(&root, src.bytes()).unwrap();
        assert_eq!(
            records,
            vec![FunctionRecord {
                function_name: Some("foo".into()),
                return_type: Some("int".into()),
                parameters: vec!["x".into(), "y".into()],
            }]
        );
    }

    #[test]
    fn test_sibling_functions_keep_source_order() {
        let mut src = Source::default();
        let alpha = node("function_definition", vec![src.leaf("identifier", "alpha")]);
        let beta = node("function_definition", vec![src.leaf("identifier", "beta")]);
        let root = node("module", vec![alpha, beta]);

        let records = compat().extract(&root, src.bytes()).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(names(&records), [Some("alpha"), Some("beta")]);
        for record in &records {
            assert_eq!(record.return_type, None);
            assert!(record.parameters.is_empty());
        }
    }

    #[test]
    fn test_nested_function_yields_two_records() {
        let mut src = Source::default();
        let outer_name = src.leaf("identifier", "outer");
        let outer_params = node("parameter_list", vec![src.leaf("identifier", "a")]);
        let inner = node(
            "function_definition",
            vec![
                src.leaf("identifier", "inner"),
                node("parameter_list", vec![src.leaf("identifier", "b")]),
                src.leaf("type_identifier", "bool"),
            ],
        );
        let outer = node(
            "function_definition",
            vec![outer_name, outer_params, node("block", vec![inner])],
        );
        let root = node("module", vec![outer]);

        let records = compat().extract(&root, src.bytes()).unwrap();
        assert_eq!(names(&records), [Some("outer"), Some("inner")]);
        assert_eq!(records[0].parameters, ["a"]);
        assert_eq!(records[0].return_type, None);
        assert_eq!(records[1].parameters, ["b"]);
        assert_eq!(records[1].return_type.as_deref(), Some("bool"));
    }

    #[test]
    fn test_no_function_kinds_yields_nothing() {
        let mut src = Source::default();
        let root = node(
            "module",
            vec![node("expression_statement", vec![src.leaf("identifier", "x")])],
        );
        assert!(compat().extract(&root, src.bytes()).unwrap().is_empty());

        let empty = OwnedNode::new("module", 0..0);
        assert!(compat().extract(&empty, b"").unwrap().is_empty());
    }

    #[test]
    fn test_extraction_is_deterministic() {
        let mut src = Source::default();
        let root = node(
            "module",
            vec![
                node("function_definition", vec![src.leaf("identifier", "a")]),
                node("method_declaration", vec![src.leaf("identifier", "b")]),
            ],
        );
        let extractor = compat();
        let first = extractor.extract(&root, src.bytes()).unwrap();
        let second = extractor.extract(&root, src.bytes()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_records_follow_pre_order() {
        let mut src = Source::default();
        let f1 = node(
            "function_definition",
            vec![
                src.leaf("identifier", "f1"),
                node("function_definition", vec![src.leaf("identifier", "f2")]),
            ],
        );
        let wrapper = node(
            "class_body",
            vec![node("method_declaration", vec![src.leaf("identifier", "f3")])],
        );
        let f4 = node("function_definition", vec![src.leaf("identifier", "f4")]);
        let root = node("program", vec![f1, wrapper, f4]);

        let records = compat().extract(&root, src.bytes()).unwrap();
        assert_eq!(names(&records), [Some("f1"), Some("f2"), Some("f3"), Some("f4")]);
    }

    #[test]
    fn test_anonymous_function_is_partial_record() {
        let mut src = Source::default();
        let func = node(
            "function_definition",
            vec![
                node("parameter_list", vec![src.leaf("(", "("), src.leaf(")", ")")]),
                src.leaf("type_identifier", "T"),
            ],
        );
        let root = node("module", vec![func]);

        let records = compat().extract(&root, src.bytes()).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].function_name, None);
        assert_eq!(records[0].return_type.as_deref(), Some("T"));
        assert_eq!(records[0].parameters, ["(", ")"]);
    }

    #[test]
    fn test_parameters_are_raw_children() {
        let mut src = Source::default();
        let name = src.leaf("identifier", "f");
        let params = node(
            "parameter_list",
            vec![
                src.leaf("(", "("),
                src.leaf("parameter_declaration", "int a"),
                src.leaf(",", ","),
                src.leaf("parameter_declaration", "char *b"),
                src.leaf(")", ")"),
            ],
        );
        let func = node("function_definition", vec![name, params]);
        let root = node("translation_unit", vec![func]);

        let records = compat().extract(&root, src.bytes()).unwrap();
        assert_eq!(records[0].parameters, ["(", "int a", ",", "char *b", ")"]);
    }

    #[test]
    fn test_last_identifier_and_parameter_list_win() {
        let mut src = Source::default();
        let func = node(
            "method_declaration",
            vec![
                node("parameter_list", vec![src.leaf("parameter_declaration", "s *S")]),
                src.leaf("identifier", "first"),
                src.leaf("identifier", "second"),
                node("parameter_list", vec![src.leaf("parameter_declaration", "n int")]),
                src.leaf("type_identifier", "A"),
                src.leaf("type_identifier", "B"),
            ],
        );
        let root = node("source_file", vec![func]);

        let records = compat().extract(&root, src.bytes()).unwrap();
        assert_eq!(records[0].function_name.as_deref(), Some("second"));
        assert_eq!(records[0].parameters, ["n int"]);
        assert_eq!(records[0].return_type.as_deref(), Some("B"));
    }

    #[test]
    fn test_identifiers_below_direct_children_are_ignored() {
        let mut src = Source::default();
        let func = node(
            "function_definition",
            vec![
                src.leaf("identifier", "name"),
                node("block", vec![src.leaf("identifier", "local")]),
            ],
        );
        let root = node("module", vec![func]);

        let records = compat().extract(&root, src.bytes()).unwrap();
        assert_eq!(records[0].function_name.as_deref(), Some("name"));
    }

    #[test]
    fn test_c_declarators_are_looked_through() {
        let mut src = Source::default();
        let return_type = src.leaf("primitive_type", "char");
        let declarator = node(
            "pointer_declarator",
            vec![
                src.leaf("*", "*"),
                node(
                    "function_declarator",
                    vec![
                        src.leaf("identifier", "dup"),
                        node(
                            "parameter_list",
                            vec![src.leaf("(", "("), src.leaf("parameter_declaration", "const char *s"), src.leaf(")", ")")],
                        ),
                    ],
                ),
            ],
        );
        let func = node(
            "function_definition",
            vec![return_type, declarator, src.leaf("compound_statement", "{}")],
        );
        let root = node("translation_unit", vec![func]);

        let c = Extractor::new(KindTable::for_language(Language::C), FieldStrategy::LastMatch);
        let records = c.extract(&root, src.bytes()).unwrap();
        assert_eq!(records[0].function_name.as_deref(), Some("dup"));
        assert_eq!(records[0].return_type.as_deref(), Some("char"));
        assert_eq!(records[0].parameters, ["(", "const char *s", ")"]);

        // The shared table has no declarators, so the name stays hidden
        let records = compat().extract(&root, src.bytes()).unwrap();
        assert_eq!(records[0].function_name, None);
    }

    #[test]
    fn test_grammar_field_strategy_ignores_stray_identifiers() {
        let mut src = Source::default();
        let func = node(
            "function_definition",
            vec![
                src.leaf("identifier", "real_name").with_field("name"),
                node("parameters", vec![src.leaf("identifier", "x")]).with_field("parameters"),
                src.leaf("type", "int").with_field("return_type"),
                src.leaf("identifier", "decorator_arg"),
            ],
        );
        let root = node("module", vec![func]);
        let table = KindTable::for_language(Language::Python);

        let by_kind = Extractor::new(table, FieldStrategy::LastMatch)
            .extract(&root, src.bytes())
            .unwrap();
        assert_eq!(by_kind[0].function_name.as_deref(), Some("decorator_arg"));

        let by_field = Extractor::new(table, FieldStrategy::GrammarField)
            .extract(&root, src.bytes())
            .unwrap();
        assert_eq!(by_field[0].function_name.as_deref(), Some("real_name"));
        assert_eq!(by_field[0].parameters, ["x"]);
        assert_eq!(by_field[0].return_type.as_deref(), Some("int"));
    }

    #[test]
    fn test_grammar_field_strategy_follows_declarator_field() {
        let mut src = Source::default();
        let return_type = src.leaf("primitive_type", "void").with_field("type");
        let declarator = node(
            "function_declarator",
            vec![
                src.leaf("identifier", "run").with_field("declarator"),
                node("parameter_list", vec![src.leaf("(", "("), src.leaf(")", ")")]).with_field("parameters"),
            ],
        )
        .with_field("declarator");
        let func = node(
            "function_definition",
            vec![return_type, declarator],
        );
        let root = node("translation_unit", vec![func]);

        let c = Extractor::new(KindTable::for_language(Language::C), FieldStrategy::GrammarField);
        let records = c.extract(&root, src.bytes()).unwrap();
        assert_eq!(records[0].function_name.as_deref(), Some("run"));
        assert_eq!(records[0].return_type.as_deref(), Some("void"));
        assert_eq!(records[0].parameters, ["(", ")"]);
    }

    #[test]
    fn test_result_field_list_is_return_type() {
        let mut src = Source::default();
        let func = node(
            "method_declaration",
            vec![
                src.leaf("func", "func"),
                src.leaf("identifier", "divide").with_field("name"),
                node(
                    "parameter_list",
                    vec![src.leaf("(", "("), src.leaf("parameter_declaration", "a, b int"), src.leaf(")", ")")],
                )
                .with_field("parameters"),
                src.leaf("parameter_list", "(int, error)").with_field("result"),
            ],
        );
        let root = node("source_file", vec![func]);
        let expected = FunctionRecord {
            function_name: Some("divide".into()),
            return_type: Some("(int, error)".into()),
            parameters: vec!["(".into(), "a, b int".into(), ")".into()],
        };

        for strategy in [FieldStrategy::LastMatch, FieldStrategy::GrammarField] {
            let go = Extractor::new(KindTable::for_language(Language::Go), strategy);
            assert_eq!(go.extract(&root, src.bytes()).unwrap(), [expected.clone()]);
        }

        // The shared table keeps the plain last-match rule
        let records = compat().extract(&root, src.bytes()).unwrap();
        assert_eq!(records[0].parameters, Vec::<String>::new());
        assert_eq!(records[0].return_type, None);
    }

    #[test]
    fn test_bare_parameter_is_single_entry() {
        let mut src = Source::default();
        let arrow = node(
            "arrow_function",
            vec![
                src.leaf("identifier", "n").with_field("parameter"),
                src.leaf("=>", "=>"),
                src.leaf("identifier", "n").with_field("body"),
            ],
        );
        let root = node("program", vec![arrow]);

        let js = Extractor::new(KindTable::for_language(Language::JavaScript), FieldStrategy::LastMatch);
        let records = js.extract(&root, src.bytes()).unwrap();
        assert_eq!(
            records,
            [FunctionRecord {
                function_name: None,
                return_type: None,
                parameters: vec!["n".into()],
            }]
        );
    }

    #[test]
    fn test_invalid_utf8_fails_with_byte_range() {
        let source = b"def \xff\xfe";
        let func = OwnedNode::new("function_definition", 0..6)
            .with_children(vec![OwnedNode::new("def", 0..3), OwnedNode::new("identifier", 4..6)]);
        let root = OwnedNode::new("module", 0..6).with_children(vec![func]);

        let err = compat().extract(&root, source).unwrap_err();
        assert!(matches!(err, Error::Decode { start: 4, end: 6, .. }), "{err}");
    }

    #[test]
    fn test_child_outside_parent_is_malformed() {
        let root = OwnedNode::new("module", 0..3).with_children(vec![OwnedNode::new("identifier", 2..6)]);
        let err = compat().extract(&root, b"0123456789").unwrap_err();
        assert!(matches!(err, Error::MalformedTree(_)));
    }

    #[test]
    fn test_unordered_children_are_malformed() {
        let root = OwnedNode::new("module", 0..10).with_children(vec![
            OwnedNode::new("identifier", 5..6),
            OwnedNode::new("identifier", 1..2),
        ]);
        let err = compat().extract(&root, b"0123456789").unwrap_err();
        assert!(matches!(err, Error::MalformedTree(_)));
    }

    #[test]
    fn test_root_beyond_source_is_malformed() {
        let root = OwnedNode::new("module", 0..20);
        let err = compat().extract(&root, b"short").unwrap_err();
        assert!(matches!(err, Error::MalformedTree(_)));
    }

    #[test]
    fn test_deep_nesting_does_not_recurse() {
        let depth = 2_000;
        let source = "f".repeat(depth);
        let mut tree = OwnedNode::new("function_definition", depth - 1..depth)
            .with_children(vec![OwnedNode::new("identifier", depth - 1..depth)]);
        for i in (0..depth - 1).rev() {
            tree = OwnedNode::new("function_definition", i..depth)
                .with_children(vec![OwnedNode::new("identifier", i..i + 1), tree]);
        }

        let records = compat().extract(&tree, source.as_bytes()).unwrap();
        assert_eq!(records.len(), depth);
        assert!(records.iter().all(|r| r.function_name.as_deref() == Some("f")));
    }
}
