use callweave::core::resolver::{qualify, NameResolver, Resolution};
use callweave::parsers::python::ImportedModule;

fn imports() -> Vec<ImportedModule> {
    vec![
        ImportedModule::new("pkg.tools"),
        ImportedModule::new("util").with_objects(["helper"]),
        ImportedModule::new("numpy").with_alias("np"),
    ]
}

#[test]
fn local_definitions_win_over_imports() {
    let imports = imports();
    let resolver = NameResolver::new(Some("app"), ["helper", "run"], &imports);

    assert_eq!(
        resolver.resolve("helper"),
        Resolution::Local("app.helper".to_string())
    );
}

#[test]
fn imported_objects_and_module_components_resolve_to_the_import() {
    let imports = imports();
    let resolver = NameResolver::new(Some("app"), ["run"], &imports);

    assert_eq!(
        resolver.resolve("helper"),
        Resolution::Imported("util.helper".to_string())
    );
    assert_eq!(
        resolver.resolve("tools"),
        Resolution::Imported("pkg.tools.tools".to_string())
    );
    assert_eq!(
        resolver.resolve("pkg"),
        Resolution::Imported("pkg.tools.pkg".to_string())
    );
}

#[test]
fn aliases_are_not_followed() {
    let imports = imports();
    let resolver = NameResolver::new(Some("app"), ["run"], &imports);

    let resolution = resolver.resolve("np");
    assert_eq!(resolution, Resolution::Unresolved("np".to_string()));
    assert!(!resolution.is_resolved());
}

#[test]
fn unknown_names_keep_their_raw_text() {
    let imports = imports();
    let resolver = NameResolver::new(Some("app"), ["run"], &imports);

    assert_eq!(resolver.resolve("self.save").qualified_name(), "self.save");
    assert_eq!(resolver.resolve("").qualified_name(), "");
}

#[test]
fn without_module_context_nothing_is_qualified() {
    let imports = imports();
    let resolver = NameResolver::new(None, ["run"], &imports);

    assert_eq!(resolver.resolve("run"), Resolution::Unresolved("run".to_string()));
    assert_eq!(resolver.resolve("helper").into_qualified_name(), "helper");
    assert_eq!(resolver.qualify("run"), "run");
}

#[test]
fn qualify_prefixes_module() {
    assert_eq!(qualify(Some("a.b"), "f"), "a.b.f");
    assert_eq!(qualify(None, "f"), "f");
}
