//! Import-statement records produced by the parser.

use serde::{Deserialize, Serialize};

/// One recognized import, tagged by form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ImportStatement {
    /// `import X from "S"`
    DefaultImport { binding: String, source: String },
    /// `import { a, b as c } from "S"`
    NamedImport {
        imports: Vec<ImportSpecifier>,
        source: String,
    },
    /// `import * as X from "S"`
    NamespaceImport { binding: String, source: String },
    /// `import "S"`
    SideEffectImport { source: String },
}

impl ImportStatement {
    /// The decoded module source.
    pub fn source(&self) -> &str {
        match self {
            ImportStatement::DefaultImport { source, .. }
            | ImportStatement::NamedImport { source, .. }
            | ImportStatement::NamespaceImport { source, .. }
            | ImportStatement::SideEffectImport { source } => source,
        }
    }

    /// Local names this record introduces, in source order.
    pub fn local_names(&self) -> Vec<&str> {
        match self {
            ImportStatement::DefaultImport { binding, .. }
            | ImportStatement::NamespaceImport { binding, .. } => vec![binding.as_str()],
            ImportStatement::NamedImport { imports, .. } => {
                imports.iter().map(ImportSpecifier::local_name).collect()
            }
            ImportStatement::SideEffectImport { .. } => Vec::new(),
        }
    }

    pub fn kind_name(&self) -> &'static str {
        match self {
            ImportStatement::DefaultImport { .. } => "default",
            ImportStatement::NamedImport { .. } => "named",
            ImportStatement::NamespaceImport { .. } => "namespace",
            ImportStatement::SideEffectImport { .. } => "side-effect",
        }
    }
}

/// An entry of a named import list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportSpecifier {
    /// The exported name; may be a keyword or arbitrary string when aliased.
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,
}

impl ImportSpecifier {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            alias: None,
        }
    }

    pub fn aliased(name: impl Into<String>, alias: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            alias: Some(alias.into()),
        }
    }

    /// The binding introduced in the importing module.
    pub fn local_name(&self) -> &str {
        self.alias.as_deref().unwrap_or(&self.name)
    }
}
