use anyhow::Result;
use std::ops::Range;
use tree_sitter::{Language as Grammar, Node as TSNode, Parser, Tree};

use super::language::Language;
use crate::error::Error;

/// The node capabilities the extraction pipeline relies on.
///
/// Implemented for [`tree_sitter::Node`]; any other tree representation that
/// exposes the same five capabilities can be walked by the extractor.
pub trait SyntaxNode: Copy {
    /// Grammar category tag, e.g. `function_definition`.
    fn kind(&self) -> &str;
    fn children(&self) -> Vec<Self>;
    fn named_children(&self) -> Vec<Self>;
    fn byte_range(&self) -> Range<usize>;
    fn parent(&self) -> Option<Self>;

    fn text<'s>(&self, source: &'s [u8]) -> &'s str {
        extract_text(self.byte_range(), source)
    }
}

impl<'tree> SyntaxNode for TSNode<'tree> {
    fn kind(&self) -> &str {
        TSNode::kind(self)
    }

    fn children(&self) -> Vec<Self> {
        let mut cursor = self.walk();
        TSNode::children(self, &mut cursor).collect()
    }

    fn named_children(&self) -> Vec<Self> {
        let mut cursor = self.walk();
        TSNode::named_children(self, &mut cursor).collect()
    }

    fn byte_range(&self) -> Range<usize> {
        TSNode::byte_range(self)
    }

    fn parent(&self) -> Option<Self> {
        TSNode::parent(self)
    }
}

/// Turns source bytes into a syntax tree for one language.
pub trait SyntaxTreeProvider: Send + Sync {
    fn parse(&self, language: Language, source: &[u8]) -> Result<Tree>;

    fn supports(&self, language: Language) -> bool;
}

/// Provider backed by the tree-sitter grammar crates linked into this build.
#[derive(Debug, Clone, Copy, Default)]
pub struct TreeSitterProvider;

impl TreeSitterProvider {
    pub fn new() -> Self {
        Self
    }

    fn grammar(language: Language) -> Option<Grammar> {
        match language {
            Language::Python => Some(tree_sitter_python::language()),
            Language::Rust => Some(tree_sitter_rust::language()),
            Language::JavaScript => Some(tree_sitter_javascript::language()),
            Language::TypeScript => Some(tree_sitter_typescript::language_typescript()),
            Language::Cpp => Some(tree_sitter_cpp::language()),
            Language::Java => Some(tree_sitter_java::language()),
            Language::Go => Some(tree_sitter_go::language()),
            Language::CSharp => Some(tree_sitter_c_sharp::language()),
            Language::C => Some(tree_sitter_c::language()),
            Language::Ruby => Some(tree_sitter_ruby::language()),
            Language::Php => Some(tree_sitter_php::language()),
            Language::Bash => Some(tree_sitter_bash::language()),
            Language::Lua => Some(tree_sitter_lua::language()),
            Language::Scala => Some(tree_sitter_scala::language()),
            Language::Haskell => Some(tree_sitter_haskell::language()),
            // No grammar crate for tree-sitter 0.20: swift, elixir, erlang, clojure, perl.
            _ => None,
        }
    }
}

impl SyntaxTreeProvider for TreeSitterProvider {
    fn parse(&self, language: Language, source: &[u8]) -> Result<Tree> {
        let grammar = Self::grammar(language).ok_or(Error::GrammarUnavailable(language))?;
        // Parser is not Sync, so every call gets its own.
        let mut parser = Parser::new();
        parser.set_language(grammar)?;
        parser
            .parse(source, None)
            .ok_or_else(|| anyhow::anyhow!("tree-sitter returned no tree for {language} source"))
    }

    fn supports(&self, language: Language) -> bool {
        Self::grammar(language).is_some()
    }
}

pub fn extract_text(range: Range<usize>, source: &[u8]) -> &str {
    source
        .get(range)
        .and_then(|bytes| std::str::from_utf8(bytes).ok())
        .unwrap_or("")
}

/// 1-based line number of a byte offset.
pub fn line_at(source: &[u8], offset: usize) -> usize {
    let end = offset.min(source.len());
    source[..end].iter().filter(|&&b| b == b'\n').count() + 1
}
