use reify_types::{format_type_ref, ClassKind, TypeEnv, TypeRef, TypeStore};

use pretty_assertions::assert_eq;

#[test]
fn default_type_store_defines_minimal_jdk() {
    let env = TypeStore::default();
    let wk = env.well_known();

    // Simple names resolve through the implicit `java.lang.*` import.
    assert_eq!(env.lookup_class("Object"), Some(wk.object));
    assert_eq!(env.lookup_class("Integer"), Some(wk.integer));
    assert_eq!(env.lookup_class("java.util.List"), Some(wk.list));
    // ...but `java.util` still needs a qualified name.
    assert_eq!(env.lookup_class("List"), None);

    let list = env.class(wk.list).expect("List must exist in minimal JDK");
    assert_eq!(list.kind, ClassKind::Interface);
    assert_eq!(list.arity(), 1);
    assert_eq!(
        list.interfaces,
        vec![TypeRef::parameterized(
            wk.collection,
            vec![TypeRef::var(list.type_params[0])]
        )]
    );
}

#[test]
fn well_known_supertypes_render_with_declared_names() {
    let env = TypeStore::default();
    let wk = env.well_known();

    let integer = env.class(wk.integer).expect("Integer");
    assert_eq!(
        integer.super_class.as_ref().map(|ty| format_type_ref(&env, ty)),
        Some("java.lang.Number".to_string())
    );
    let rendered: Vec<String> = integer
        .interfaces
        .iter()
        .map(|ty| format_type_ref(&env, ty))
        .collect();
    assert_eq!(rendered, vec!["java.lang.Comparable<java.lang.Integer>"]);

    let hash_map = env.class(wk.hash_map).expect("HashMap");
    let rendered: Vec<String> = hash_map
        .direct_supertypes()
        .map(|ty| format_type_ref(&env, ty))
        .collect();
    assert_eq!(rendered, vec!["java.lang.Object", "java.util.Map<K, V>"]);
}
