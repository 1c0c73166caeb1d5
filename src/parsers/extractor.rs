use std::collections::BTreeMap;

use super::common::SyntaxNode;
use super::python::{ImportedModule, IMPORT_FROM_STATEMENT, IMPORT_STATEMENT};
use crate::error::{Error, Result};

/// Function definition categories across the supported grammars.
pub const FUNCTION_KINDS: [&str; 2] = [
    "function_definition", // Python/C/C++
    "function_item",       // Rust
];

pub const CALL_KINDS: [&str; 2] = [
    "call",            // Python
    "call_expression", // Rust/JavaScript/TypeScript/C++/Go
];

/// Callee shapes whose text names the invoked function.
const CALLEE_KINDS: [&str; 5] = [
    "attribute",         // Python obj.method
    "field_expression",  // Rust/C++ obj.method
    "member_expression", // JavaScript/TypeScript obj.method
    "scoped_identifier", // Rust module::function
    "identifier",
];

/// Stateless walker over a syntax tree.
///
/// All walks keep an explicit stack so deeply nested trees cannot overflow the
/// call stack. Walks visit descendants of the starting node, never the node
/// itself, and report them in source order.
#[derive(Debug, Clone, Copy, Default)]
pub struct AstExtractor;

impl AstExtractor {
    pub fn new() -> Self {
        Self
    }

    /// Every function definition in the tree, nested ones included.
    pub fn function_definitions<N: SyntaxNode>(&self, root: &N) -> Vec<N> {
        self.collect_descendants(root, |node| FUNCTION_KINDS.contains(&node.kind()), true)
    }

    /// Every call inside `node`. For a function this includes the calls made
    /// by functions nested inside it.
    pub fn call_sites<N: SyntaxNode>(&self, node: &N) -> Vec<N> {
        self.collect_descendants(node, |node| CALL_KINDS.contains(&node.kind()), true)
    }

    pub fn imports<N: SyntaxNode>(&self, root: &N, source: &[u8]) -> Vec<ImportedModule> {
        self.collect_descendants(
            root,
            |node| matches!(node.kind(), IMPORT_STATEMENT | IMPORT_FROM_STATEMENT),
            false,
        )
        .iter()
        .flat_map(|declaration| ImportedModule::from_declaration(declaration, source))
        .collect()
    }

    /// The sole identifier naming a function definition.
    pub fn function_name<'s, N: SyntaxNode>(
        &self,
        function: &N,
        source: &'s [u8],
    ) -> Result<&'s str> {
        function
            .children()
            .into_iter()
            .find(|child| child.kind() == "identifier")
            .map(|identifier| identifier.text(source))
            .ok_or_else(|| {
                Error::extraction(
                    "",
                    format!(
                        "`{}` node at bytes {:?} has no identifier child",
                        function.kind(),
                        function.byte_range()
                    ),
                )
            })
    }

    /// Text of the expression naming the callee, or `""` when the callee is
    /// anonymous or too complex to name.
    pub fn callee_text<'s, N: SyntaxNode>(&self, call: &N, source: &'s [u8]) -> &'s str {
        call.children()
            .into_iter()
            .find(|child| CALLEE_KINDS.contains(&child.kind()))
            .map(|callee| callee.text(source))
            .unwrap_or("")
    }

    /// Source text stored on a function's graph node. Decorated Python
    /// functions include their decorators.
    pub fn definition_text<'s, N: SyntaxNode>(&self, function: &N, source: &'s [u8]) -> &'s str {
        match function.parent() {
            Some(parent) if parent.kind() == "decorated_definition" => parent.text(source),
            _ => function.text(source),
        }
    }

    /// Coarse `receiver -> [method]` map over every `receiver.method(...)` call.
    pub fn module_call_map<N: SyntaxNode>(
        &self,
        root: &N,
        source: &[u8],
    ) -> BTreeMap<String, Vec<String>> {
        let mut call_map: BTreeMap<String, Vec<String>> = BTreeMap::new();
        for call in self.call_sites(root) {
            let named = call.named_children();
            if named.len() < 2 {
                continue;
            }
            let target = named[0].named_children();
            if target.len() < 2 {
                continue;
            }
            call_map
                .entry(target[0].text(source).to_string())
                .or_default()
                .push(target[1].text(source).to_string());
        }
        call_map
    }

    /// Pre-order walk collecting matching descendants. When `descend_matches`
    /// is false the walk does not look inside a matched node.
    fn collect_descendants<N, F>(&self, start: &N, matches: F, descend_matches: bool) -> Vec<N>
    where
        N: SyntaxNode,
        F: Fn(&N) -> bool,
    {
        let mut found = Vec::new();
        let mut stack: Vec<N> = start.children().into_iter().rev().collect();
        while let Some(node) = stack.pop() {
            let matched = matches(&node);
            if matched {
                found.push(node);
            }
            if !matched || descend_matches {
                stack.extend(node.children().into_iter().rev());
            }
        }
        found
    }
}
