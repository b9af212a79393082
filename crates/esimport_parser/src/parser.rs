//! Import-declaration parser.
//!
//! Single pass over the token stream. Only the `import` keyword starts
//! recognition; every other token is stepped over. A declaration's records are
//! committed once the whole declaration has been recognized, so a failing
//! declaration never leaves a partial record behind.

use crate::ast::{ImportSpecifier, ImportStatement};
use crate::cursor::TokenCursor;
use crate::options::ParseOptions;
use esimport_diagnostics::{ImportError, SyntaxError};
use esimport_scanner::{tables, Scanner, TokenKind};

/// Bindings that may follow a default binding and a comma.
enum ClauseBindings {
    Named(Vec<ImportSpecifier>),
    Namespace(String),
}

impl ClauseBindings {
    fn into_statement(self, source: String) -> ImportStatement {
        match self {
            ClauseBindings::Named(imports) => ImportStatement::NamedImport { imports, source },
            ClauseBindings::Namespace(binding) => ImportStatement::NamespaceImport { binding, source },
        }
    }
}

/// The import parser.
pub struct Parser {
    cursor: TokenCursor,
    options: ParseOptions,
    imports: Vec<ImportStatement>,
}

impl Parser {
    pub fn new(source_text: &str, options: &ParseOptions) -> Self {
        let scanner = Scanner::with_options(source_text, options.scanner_options());
        Self {
            cursor: TokenCursor::new(scanner),
            options: *options,
            imports: Vec::new(),
        }
    }

    /// Parse the whole input, returning the records in source order.
    pub fn parse(mut self) -> Result<Vec<ImportStatement>, ImportError> {
        self.cursor.advance()?;
        while self.cursor.current().is_some() {
            if self.cursor.at(TokenKind::Keyword, "import") {
                self.parse_import_declaration()?;
            } else {
                self.cursor.advance()?;
            }
        }
        Ok(self.imports)
    }

    // ========================================================================
    // Token management
    // ========================================================================

    fn error(&self, expected: &str) -> ImportError {
        let found = match self.cursor.current() {
            Some(token) => token.describe(),
            None => "end of input".to_string(),
        };
        SyntaxError::new(expected, found, self.cursor.source(), self.cursor.current_span()).into()
    }

    fn expect_token(&mut self, kind: TokenKind, text: &str) -> Result<(), ImportError> {
        if self.cursor.at(kind, text) {
            self.cursor.advance()?;
            Ok(())
        } else {
            Err(self.error(&format!("{} '{}'", kind, text)))
        }
    }

    fn optional_token(&mut self, kind: TokenKind, text: &str) -> Result<bool, ImportError> {
        if self.cursor.at(kind, text) {
            self.cursor.advance()?;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    /// Consume a token of `kind` and return its text.
    fn expect_text(&mut self, kind: TokenKind) -> Result<String, ImportError> {
        if !self.cursor.at_kind(kind) {
            return Err(self.error(kind.description()));
        }
        match self.cursor.advance()?.and_then(|t| t.text().map(str::to_string)) {
            Some(text) => Ok(text),
            None => Err(self.error(kind.description())),
        }
    }

    /// `typeof`, `delete`, `in` or `instanceof`.
    fn at_word_operator(&self) -> bool {
        self.cursor.current().map_or(false, |t| {
            t.kind == TokenKind::Operator && t.text().map_or(false, tables::is_word_operator)
        })
    }

    fn parse_identifier(&mut self) -> Result<String, ImportError> {
        self.expect_text(TokenKind::Identifier)
    }

    // ========================================================================
    // Declarations
    // ========================================================================

    fn parse_import_declaration(&mut self) -> Result<(), ImportError> {
        let pos = self.cursor.current_span().start;
        self.expect_token(TokenKind::Keyword, "import")?;
        let full = self.options.is_full();

        let records = if self.cursor.at_kind(TokenKind::Identifier) {
            self.parse_default_import()?
        } else if self.cursor.at(TokenKind::Delimiter, "{") {
            let imports = self.parse_named_imports()?;
            let source = self.parse_from_clause()?;
            vec![ImportStatement::NamedImport { imports, source }]
        } else if self.cursor.at(TokenKind::Operator, "*") {
            let binding = self.parse_namespace_import()?;
            let source = self.parse_from_clause()?;
            vec![ImportStatement::NamespaceImport { binding, source }]
        } else if full && self.cursor.at_kind(TokenKind::StringLiteral) {
            let source = self.parse_module_specifier()?;
            vec![ImportStatement::SideEffectImport { source }]
        } else if full
            && (self.cursor.at(TokenKind::Delimiter, "(") || self.cursor.at(TokenKind::Operator, "."))
        {
            // `import(...)` and `import.meta` are expressions.
            tracing::trace!(pos, "skipping import expression");
            return Ok(());
        } else if full {
            return Err(self.error("identifier, '{', '*' or string literal"));
        } else {
            return Err(self.error("identifier, '{' or '*'"));
        };

        for record in &records {
            tracing::debug!(pos, kind = record.kind_name(), source = record.source(), "recognized import");
        }
        self.imports.extend(records);
        Ok(())
    }

    /// `d from "m"`, and in the full grammar `d, { ... } from "m"` or
    /// `d, * as ns from "m"`.
    fn parse_default_import(&mut self) -> Result<Vec<ImportStatement>, ImportError> {
        let binding = self.parse_identifier()?;

        let mut bindings = None;
        if self.options.is_full() && self.optional_token(TokenKind::Delimiter, ",")? {
            bindings = Some(if self.cursor.at(TokenKind::Delimiter, "{") {
                ClauseBindings::Named(self.parse_named_imports()?)
            } else if self.cursor.at(TokenKind::Operator, "*") {
                ClauseBindings::Namespace(self.parse_namespace_import()?)
            } else {
                return Err(self.error("'{' or '*'"));
            });
        }

        let source = self.parse_from_clause()?;
        let mut records = vec![ImportStatement::DefaultImport {
            binding,
            source: source.clone(),
        }];
        if let Some(bindings) = bindings {
            records.push(bindings.into_statement(source));
        }
        Ok(records)
    }

    /// `{ a, b }`. Every element after the first follows exactly one comma;
    /// the full grammar also takes a trailing comma.
    fn parse_named_imports(&mut self) -> Result<Vec<ImportSpecifier>, ImportError> {
        self.expect_token(TokenKind::Delimiter, "{")?;
        let mut imports = Vec::new();
        if self.optional_token(TokenKind::Delimiter, "}")? {
            return Ok(imports);
        }

        loop {
            imports.push(self.parse_import_specifier()?);
            if self.optional_token(TokenKind::Delimiter, ",")? {
                if self.options.is_full() && self.optional_token(TokenKind::Delimiter, "}")? {
                    break;
                }
            } else if self.optional_token(TokenKind::Delimiter, "}")? {
                break;
            } else {
                return Err(self.error("',' or '}'"));
            }
        }
        Ok(imports)
    }

    fn parse_import_specifier(&mut self) -> Result<ImportSpecifier, ImportError> {
        if !self.options.is_full() {
            return Ok(ImportSpecifier::new(self.parse_identifier()?));
        }

        if self.cursor.at_kind(TokenKind::Identifier) {
            let name = self.parse_identifier()?;
            if self.optional_token(TokenKind::Identifier, "as")? {
                let alias = self.parse_identifier()?;
                return Ok(ImportSpecifier::aliased(name, alias));
            }
            return Ok(ImportSpecifier::new(name));
        }

        // Reserved words (word operators included) and string names cannot be
        // bindings, so they need an alias.
        let name = if self.cursor.at_kind(TokenKind::Keyword) {
            self.expect_text(TokenKind::Keyword)?
        } else if self.at_word_operator() {
            self.expect_text(TokenKind::Operator)?
        } else if self.cursor.at_kind(TokenKind::StringLiteral) {
            self.expect_text(TokenKind::StringLiteral)?
        } else {
            return Err(self.error("identifier or string literal"));
        };
        self.expect_token(TokenKind::Identifier, "as")?;
        let alias = self.parse_identifier()?;
        Ok(ImportSpecifier::aliased(name, alias))
    }

    /// `* as ns`
    fn parse_namespace_import(&mut self) -> Result<String, ImportError> {
        self.expect_token(TokenKind::Operator, "*")?;
        self.expect_token(TokenKind::Identifier, "as")?;
        self.parse_identifier()
    }

    /// `from "m"`
    fn parse_from_clause(&mut self) -> Result<String, ImportError> {
        self.expect_token(TokenKind::Identifier, "from")?;
        self.parse_module_specifier()
    }

    fn parse_module_specifier(&mut self) -> Result<String, ImportError> {
        self.expect_text(TokenKind::StringLiteral)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::ImportGrammar;

    fn parse(source: &str) -> Vec<ImportStatement> {
        Parser::new(source, &ParseOptions::default()).parse().unwrap()
    }

    fn parse_basic(source: &str) -> Result<Vec<ImportStatement>, ImportError> {
        Parser::new(source, &ParseOptions::basic()).parse()
    }

    #[test]
    fn test_default_import() {
        let imports = parse("import X from \"mod\";");
        assert_eq!(
            imports,
            vec![ImportStatement::DefaultImport {
                binding: "X".to_string(),
                source: "mod".to_string(),
            }]
        );
    }

    #[test]
    fn test_non_import_tokens_are_skipped() {
        let imports = parse("const a = 1; function f() { return a + 2; } import * as ns from 'm'");
        assert_eq!(imports.len(), 1);
        assert_eq!(imports[0].local_names(), vec!["ns"]);
    }

    #[test]
    fn test_combined_default_and_named() {
        let imports = parse("import d, { a as b } from 'm'");
        assert_eq!(imports.len(), 2);
        assert_eq!(imports[0].local_names(), vec!["d"]);
        assert_eq!(
            imports[1],
            ImportStatement::NamedImport {
                imports: vec![ImportSpecifier::aliased("a", "b")],
                source: "m".to_string(),
            }
        );
    }

    #[test]
    fn test_basic_grammar_rejects_combined_clause() {
        let err = parse_basic("import d, { a } from 'm'").unwrap_err();
        match err {
            ImportError::Syntax(err) => {
                assert_eq!(err.expected, "identifier 'from'");
                assert_eq!(err.found, "delimiter ','");
            }
            other => panic!("expected a syntax error, got {:?}", other),
        }
    }

    #[test]
    fn test_grammar_option() {
        let options = ParseOptions {
            grammar: ImportGrammar::Basic,
            skip_comments: false,
        };
        assert!(Parser::new("import 'm'", &options).parse().is_err());
        assert_eq!(parse("import 'm'").len(), 1);
    }

    #[test]
    fn test_dynamic_import_is_skipped() {
        let imports = parse("const m = import('m'); const u = import.meta.url;");
        assert!(imports.is_empty());
    }
}
