//! Node-kind translation tables
//!
//! Every grammar names its constructs differently: a Python function is a
//! `function_definition` whose parameters live in `parameters`, a Java method
//! is a `method_declaration` with `formal_parameters`. Each table maps those
//! grammar strings onto a small canonical [`NodeCategory`] set so the
//! extractor only ever matches on categories.

use crate::Language;
use serde::{Deserialize, Serialize};

/// Canonical role of a syntax node for signature extraction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeCategory {
    /// A function, method, constructor or closure definition
    FunctionLike,
    /// The function's name
    Identifier,
    /// A parameter list; its children are captured verbatim
    ParameterList,
    /// A lone parameter written without a list (`x => x * 2`)
    Parameter,
    /// The declared return type
    TypeIdentifier,
    /// A wrapper holding name and parameters one level down (C declarators)
    Declarator,
    /// Anything else
    Other,
}

/// Which kind table the extractor uses
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum KindProfile {
    /// The four grammar-agnostic kinds, shared by every language
    Compat,
    /// A table tuned to each language's grammar
    #[default]
    Language,
}

type Entries = &'static [(&'static str, NodeCategory)];

use NodeCategory::*;

const COMPAT_KINDS: Entries = &[
    ("function_definition", FunctionLike),
    ("method_declaration", FunctionLike),
    ("identifier", Identifier),
    ("parameter_list", ParameterList),
    ("type_identifier", TypeIdentifier),
];

const C_KINDS: Entries = &[
    ("function_definition", FunctionLike),
    ("identifier", Identifier),
    ("parameter_list", ParameterList),
    ("type_identifier", TypeIdentifier),
    ("primitive_type", TypeIdentifier),
    ("sized_type_specifier", TypeIdentifier),
    ("struct_specifier", TypeIdentifier),
    ("union_specifier", TypeIdentifier),
    ("enum_specifier", TypeIdentifier),
    ("function_declarator", Declarator),
    ("pointer_declarator", Declarator),
];

const PYTHON_KINDS: Entries = &[
    ("function_definition", FunctionLike),
    ("identifier", Identifier),
    ("parameters", ParameterList),
    ("type", TypeIdentifier),
];

const JAVASCRIPT_KINDS: Entries = &[
    ("function_declaration", FunctionLike),
    ("function_expression", FunctionLike),
    ("arrow_function", FunctionLike),
    ("generator_function_declaration", FunctionLike),
    ("method_definition", FunctionLike),
    ("identifier", Identifier),
    ("property_identifier", Identifier),
    ("formal_parameters", ParameterList),
];

const JAVA_KINDS: Entries = &[
    ("method_declaration", FunctionLike),
    ("constructor_declaration", FunctionLike),
    ("identifier", Identifier),
    ("formal_parameters", ParameterList),
    ("type_identifier", TypeIdentifier),
    ("scoped_type_identifier", TypeIdentifier),
    ("integral_type", TypeIdentifier),
    ("floating_point_type", TypeIdentifier),
    ("boolean_type", TypeIdentifier),
    ("void_type", TypeIdentifier),
    ("generic_type", TypeIdentifier),
    ("array_type", TypeIdentifier),
];

const GO_KINDS: Entries = &[
    ("function_declaration", FunctionLike),
    ("method_declaration", FunctionLike),
    ("func_literal", FunctionLike),
    ("identifier", Identifier),
    ("field_identifier", Identifier),
    ("parameter_list", ParameterList),
    ("type_identifier", TypeIdentifier),
    ("pointer_type", TypeIdentifier),
    ("qualified_type", TypeIdentifier),
    ("slice_type", TypeIdentifier),
];

/// Go results may be a whole `parameter_list`: `(int, error)` is the return
/// type, not a second set of parameters
const GO_FIELD_OVERRIDES: Entries = &[("result", TypeIdentifier)];

/// An arrow function's bare parameter and expression body are identifiers
/// that must not be taken for its name
const JAVASCRIPT_FIELD_OVERRIDES: Entries = &[("parameter", Parameter), ("body", Other)];

/// Grammar field names, shared by all five grammars
const FIELDS: Entries = &[
    ("name", Identifier),
    ("parameters", ParameterList),
    ("parameter", Parameter),
    ("return_type", TypeIdentifier),
    ("type", TypeIdentifier),
    ("result", TypeIdentifier),
    ("declarator", Declarator),
];

/// A kind-string to category translation table for one grammar.
///
/// `overrides` name grammar fields whose category beats the child's kind
/// even when children are matched by kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KindTable {
    name: &'static str,
    kinds: Entries,
    fields: Entries,
    overrides: Entries,
}

impl KindTable {
    /// The language-agnostic table: `function_definition`/`method_declaration`
    /// with `identifier`, `parameter_list` and `type_identifier` children.
    pub fn compat() -> Self {
        Self {
            name: "compat",
            kinds: COMPAT_KINDS,
            fields: FIELDS,
            overrides: &[],
        }
    }

    /// The table tuned to one language's grammar
    pub fn for_language(language: Language) -> Self {
        let (kinds, overrides) = match language {
            Language::C => (C_KINDS, &[] as Entries),
            Language::Python => (PYTHON_KINDS, &[] as Entries),
            Language::JavaScript => (JAVASCRIPT_KINDS, JAVASCRIPT_FIELD_OVERRIDES),
            Language::Java => (JAVA_KINDS, &[] as Entries),
            Language::Go => (GO_KINDS, GO_FIELD_OVERRIDES),
        };
        Self {
            name: language.as_str(),
            kinds,
            fields: FIELDS,
            overrides,
        }
    }

    /// Resolve the table for a profile and language
    pub fn select(profile: KindProfile, language: Language) -> Self {
        match profile {
            KindProfile::Compat => Self::compat(),
            KindProfile::Language => Self::for_language(language),
        }
    }

    /// Table name, for logs
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Category of a node kind
    pub fn category(&self, kind: &str) -> NodeCategory {
        lookup(self.kinds, kind)
    }

    /// Category of a grammar field name
    pub fn field_category(&self, field: &str) -> NodeCategory {
        lookup(self.fields, field)
    }

    /// Category forced by the grammar field a child sits in, if any
    pub fn field_override(&self, field: &str) -> Option<NodeCategory> {
        find(self.overrides, field)
    }

    /// Check whether a node kind starts a function record
    pub fn is_function_like(&self, kind: &str) -> bool {
        self.category(kind) == FunctionLike
    }
}

fn find(entries: Entries, key: &str) -> Option<NodeCategory> {
    entries.iter().find(|(k, _)| *k == key).map(|(_, category)| *category)
}

fn lookup(entries: Entries, key: &str) -> NodeCategory {
    find(entries, key).unwrap_or(Other)
}
