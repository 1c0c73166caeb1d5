use callweave::core::CallGraphBuilder;
use callweave::parsers::common::SyntaxNode;
use callweave::parsers::extractor::AstExtractor;
use callweave::{Error, FileParser, Language};
use std::ops::Range;
use std::path::Path;

/// Arena-backed tree for shapes real grammars rarely produce.
#[derive(Default)]
struct FakeTree {
    nodes: Vec<FakeData>,
}

struct FakeData {
    kind: &'static str,
    named: bool,
    range: Range<usize>,
    parent: Option<usize>,
    children: Vec<usize>,
}

impl FakeTree {
    fn add(&mut self, parent: Option<usize>, kind: &'static str, range: Range<usize>) -> usize {
        let id = self.nodes.len();
        self.nodes.push(FakeData {
            kind,
            named: true,
            range,
            parent,
            children: Vec::new(),
        });
        if let Some(parent) = parent {
            self.nodes[parent].children.push(id);
        }
        id
    }

    fn add_anonymous(&mut self, parent: usize, kind: &'static str, range: Range<usize>) -> usize {
        let id = self.add(Some(parent), kind, range);
        self.nodes[id].named = false;
        id
    }

    fn node(&self, id: usize) -> FakeNode<'_> {
        FakeNode { tree: self, id }
    }
}

#[derive(Clone, Copy)]
struct FakeNode<'t> {
    tree: &'t FakeTree,
    id: usize,
}

impl FakeNode<'_> {
    fn data(&self) -> &FakeData {
        &self.tree.nodes[self.id]
    }
}

impl SyntaxNode for FakeNode<'_> {
    fn kind(&self) -> &str {
        self.data().kind
    }

    fn children(&self) -> Vec<Self> {
        self.data()
            .children
            .iter()
            .map(|&id| self.tree.node(id))
            .collect()
    }

    fn named_children(&self) -> Vec<Self> {
        self.children()
            .into_iter()
            .filter(|child| child.data().named)
            .collect()
    }

    fn byte_range(&self) -> Range<usize> {
        self.data().range.clone()
    }

    fn parent(&self) -> Option<Self> {
        self.data().parent.map(|id| self.tree.node(id))
    }
}

#[test]
fn function_without_identifier_fails_extraction() {
    let source = b"def (): pass";
    let mut tree = FakeTree::default();
    let root = tree.add(None, "module", 0..source.len());
    let function = tree.add(Some(root), "function_definition", 0..source.len());
    tree.add_anonymous(function, "def", 0..3);
    tree.add(Some(function), "block", 8..12);

    let extractor = AstExtractor::new();
    let functions = extractor.function_definitions(&tree.node(root));
    assert_eq!(functions.len(), 1);
    assert!(matches!(
        extractor.function_name(&functions[0], source),
        Err(Error::Extraction { .. })
    ));

    let built = CallGraphBuilder::new().build(&functions, source, Some("m"), &[]);
    assert!(built.is_err());

    let err = FileParser::default()
        .extract(
            Path::new("broken.py"),
            Language::Python,
            &tree.node(root),
            source,
            Some("broken"),
        )
        .unwrap_err();
    match err {
        Error::Extraction { path, .. } => assert_eq!(path, Path::new("broken.py")),
        other => panic!("expected extraction error, got {other:?}"),
    }
}

#[test]
fn call_without_nameable_callee_has_empty_text() {
    let source = b"def f(): (g)()";
    let mut tree = FakeTree::default();
    let root = tree.add(None, "module", 0..source.len());
    let function = tree.add(Some(root), "function_definition", 0..source.len());
    tree.add(Some(function), "identifier", 4..5);
    let call = tree.add(Some(function), "call", 9..14);
    tree.add(Some(call), "parenthesized_expression", 9..12);
    tree.add(Some(call), "argument_list", 12..14);

    let extractor = AstExtractor::new();
    let calls = extractor.call_sites(&tree.node(function));
    assert_eq!(calls.len(), 1);
    assert_eq!(extractor.callee_text(&calls[0], source), "");

    let functions = extractor.function_definitions(&tree.node(root));
    let graph = CallGraphBuilder::new()
        .build(&functions, source, Some("m"), &[])
        .unwrap();
    assert!(graph.contains_edge("m.f", ""));
}

#[test]
fn deeply_nested_trees_do_not_overflow_the_stack() {
    let depth = 200_000;
    let source = b"x()";
    let mut tree = FakeTree::default();
    let root = tree.add(None, "module", 0..3);
    let mut parent = root;
    for _ in 0..depth {
        parent = tree.add(Some(parent), "block", 0..3);
    }
    let call = tree.add(Some(parent), "call", 0..3);
    tree.add(Some(call), "identifier", 0..1);

    let extractor = AstExtractor::new();
    let calls = extractor.call_sites(&tree.node(root));
    assert_eq!(calls.len(), 1);
    assert_eq!(extractor.callee_text(&calls[0], source), "x");
    assert!(extractor.function_definitions(&tree.node(root)).is_empty());
}

#[test]
fn definition_text_uses_decorated_parent() {
    let source = b"@d\ndef f(): pass";
    let mut tree = FakeTree::default();
    let root = tree.add(None, "module", 0..source.len());
    let decorated = tree.add(Some(root), "decorated_definition", 0..source.len());
    tree.add(Some(decorated), "decorator", 0..2);
    let function = tree.add(Some(decorated), "function_definition", 3..source.len());
    tree.add(Some(function), "identifier", 7..8);

    let extractor = AstExtractor::new();
    assert_eq!(
        extractor.definition_text(&tree.node(function), source),
        "@d\ndef f(): pass"
    );
}
