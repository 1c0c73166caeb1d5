use callweave::parsers::common::{SyntaxTreeProvider, TreeSitterProvider};
use callweave::{Language, LanguageRegistry};
use std::path::Path;

#[test]
fn default_registry_covers_the_fixed_language_set() {
    let registry = LanguageRegistry::default();
    assert_eq!(registry.len(), 20);

    let expected = [
        ("c", Language::C),
        ("cpp", Language::Cpp),
        ("cs", Language::CSharp),
        ("go", Language::Go),
        ("java", Language::Java),
        ("js", Language::JavaScript),
        ("php", Language::Php),
        ("py", Language::Python),
        ("rb", Language::Ruby),
        ("rs", Language::Rust),
        ("scala", Language::Scala),
        ("swift", Language::Swift),
        ("ts", Language::TypeScript),
        ("sh", Language::Bash),
        ("clj", Language::Clojure),
        ("ex", Language::Elixir),
        ("erl", Language::Erlang),
        ("hs", Language::Haskell),
        ("lua", Language::Lua),
        ("pl", Language::Perl),
    ];
    for (extension, language) in expected {
        assert_eq!(registry.language_for_extension(extension), Some(language));
    }
}

#[test]
fn unknown_extensions_are_not_routed() {
    let registry = LanguageRegistry::default();
    assert_eq!(registry.language_for_path(Path::new("README.md")), None);
    assert_eq!(registry.language_for_path(Path::new("Makefile")), None);
    assert_eq!(
        registry.language_for_path(Path::new("src/lib.rs")),
        Some(Language::Rust)
    );
}

#[test]
fn restricted_registry_only_knows_its_languages() {
    let registry = LanguageRegistry::restricted_to(&[Language::Python]);
    assert_eq!(registry.len(), 1);
    assert_eq!(registry.language_for_extension("py"), Some(Language::Python));
    assert_eq!(registry.language_for_extension("rs"), None);
    assert!(LanguageRegistry::restricted_to(&[]).is_empty());
}

#[test]
fn language_names_round_trip() {
    for language in Language::ALL {
        assert_eq!(language.as_str().parse::<Language>(), Ok(language));
    }
    assert_eq!(Language::from_name("C++"), Some(Language::Cpp));
    assert_eq!(Language::from_name("c#"), Some(Language::CSharp));
    assert_eq!(Language::from_name("cobol"), None);
}

#[test]
fn provider_parses_languages_with_linked_grammars() {
    let provider = TreeSitterProvider::new();
    let tree = provider
        .parse(Language::Go, b"package main\n\nfunc main() {}\n")
        .unwrap();
    assert_eq!(tree.root_node().kind(), "source_file");

    assert!(provider.supports(Language::TypeScript));
    assert!(provider.supports(Language::Haskell));
    assert!(!provider.supports(Language::Swift));
    assert!(provider.parse(Language::Swift, b"func main() {}").is_err());
}
