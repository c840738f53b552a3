mod support;

use reify_resolve::{Resolver, ResolverConfig, SupertypeSearch, TypeResolutionError};
use reify_types::{TypeEnv, TypeRef, TypeStore};

use pretty_assertions::assert_eq;
use support::{applied, plain, ClassBuilder};

fn direct() -> ResolverConfig {
    ResolverConfig {
        supertype_search: SupertypeSearch::Direct,
        ..ResolverConfig::default()
    }
}

#[test]
fn bindings_compose_through_intermediate_levels() {
    let mut store = TypeStore::default();
    let wk = store.well_known().clone();

    // class A<T>; class B<U> extends A<List<U>>; class C extends B<Integer>
    let t = store.add_type_param("T");
    let a = ClassBuilder::class("com.example.A")
        .type_params(&[t])
        .extends(TypeRef::class(wk.object))
        .add(&mut store);
    let u = store.add_type_param("U");
    let b = ClassBuilder::class("com.example.B")
        .type_params(&[u])
        .extends(TypeRef::parameterized(
            a,
            vec![TypeRef::parameterized(wk.list, vec![TypeRef::var(u)])],
        ))
        .add(&mut store);
    let c = ClassBuilder::class("com.example.C")
        .extends(TypeRef::parameterized(b, vec![TypeRef::class(wk.integer)]))
        .add(&mut store);

    let resolved = Resolver::new(&store).resolve(c, &TypeRef::var(t)).unwrap();
    assert_eq!(resolved, applied(wk.list, vec![plain(wk.integer)]));
    assert_eq!(
        resolved.display(&store).to_string(),
        "java.util.List<java.lang.Integer>"
    );

    // The one-hop search only sees `B<Integer>`, which doesn't declare `T`.
    assert!(matches!(
        Resolver::new(&store)
            .with_config(direct())
            .resolve(c, &TypeRef::var(t)),
        Err(TypeResolutionError::Unresolved { .. })
    ));
    // ...but still finds `B`'s own parameter.
    assert_eq!(
        Resolver::new(&store)
            .with_config(direct())
            .resolve(c, &TypeRef::var(u)),
        Ok(plain(wk.integer))
    );
}

#[test]
fn interface_chains_are_walked() {
    let mut store = TypeStore::default();
    let wk = store.well_known().clone();

    // class Names extends ArrayList<String>
    let names = ClassBuilder::class("com.example.Names")
        .extends(TypeRef::parameterized(
            wk.array_list,
            vec![TypeRef::class(wk.string)],
        ))
        .add(&mut store);

    let iterable_t = store.class(wk.iterable).unwrap().type_params[0];
    let collection_e = store.class(wk.collection).unwrap().type_params[0];

    let resolver = Resolver::new(&store);
    assert_eq!(
        resolver.resolve(names, &TypeRef::var(iterable_t)),
        Ok(plain(wk.string))
    );
    assert_eq!(
        resolver.resolve(
            names,
            &TypeRef::parameterized(wk.optional, vec![TypeRef::var(collection_e)])
        ),
        Ok(applied(wk.optional, vec![plain(wk.string)]))
    );
}

#[test]
fn non_parameterized_supertypes_end_the_search() {
    let mut store = TypeStore::default();
    let wk = store.well_known().clone();

    // class Base<T>; class StringBase extends Base<String>; class Leaf extends StringBase
    let t = store.add_type_param("T");
    let base = ClassBuilder::class("com.example.Base")
        .type_params(&[t])
        .extends(TypeRef::class(wk.object))
        .add(&mut store);
    let middle = ClassBuilder::class("com.example.StringBase")
        .extends(TypeRef::parameterized(base, vec![TypeRef::class(wk.string)]))
        .add(&mut store);
    let leaf = ClassBuilder::class("com.example.Leaf")
        .extends(TypeRef::class(middle))
        .add(&mut store);

    for config in [ResolverConfig::default(), direct()] {
        let resolver = Resolver::new(&store).with_config(config);
        assert_eq!(resolver.resolve(middle, &TypeRef::var(t)), Ok(plain(wk.string)));

        let err = resolver.resolve(leaf, &TypeRef::var(t)).unwrap_err();
        assert_eq!(
            err,
            TypeResolutionError::Unresolved {
                var: "T".to_string(),
                holder: "com.example.Leaf".to_string(),
            }
        );
    }
}

#[test]
fn diamond_with_consistent_bindings_resolves() {
    let mut store = TypeStore::default();
    let wk = store.well_known().clone();

    // interface I<X>; class B<T> implements I<T>; class C extends B<String> implements I<String>
    let x = store.add_type_param("X");
    let i = ClassBuilder::interface("com.example.I")
        .type_params(&[x])
        .add(&mut store);
    let t = store.add_type_param("T");
    let b = ClassBuilder::class("com.example.B")
        .type_params(&[t])
        .extends(TypeRef::class(wk.object))
        .implements(TypeRef::parameterized(i, vec![TypeRef::var(t)]))
        .add(&mut store);
    let c = ClassBuilder::class("com.example.C")
        .extends(TypeRef::parameterized(b, vec![TypeRef::class(wk.string)]))
        .implements(TypeRef::parameterized(i, vec![TypeRef::class(wk.string)]))
        .add(&mut store);

    assert_eq!(
        Resolver::new(&store).resolve(c, &TypeRef::var(x)),
        Ok(plain(wk.string))
    );

    // Same shape, but the direct interface disagrees with the inherited one.
    let d = ClassBuilder::class("com.example.D")
        .extends(TypeRef::parameterized(b, vec![TypeRef::class(wk.string)]))
        .implements(TypeRef::parameterized(i, vec![TypeRef::class(wk.integer)]))
        .add(&mut store);
    assert_eq!(
        Resolver::new(&store).resolve(d, &TypeRef::var(x)),
        Err(TypeResolutionError::Ambiguous {
            var: "X".to_string(),
            holder: "com.example.D".to_string(),
            candidates: vec!["java.lang.String".to_string(), "java.lang.Integer".to_string()],
        })
    );
}

#[test]
fn cyclic_class_graph_terminates() {
    let mut store = TypeStore::default();
    let wk = store.well_known().clone();

    // A malformed graph: class Ping<P> extends Pong<List<P>>, class Pong<Q> extends Ping<Q>.
    let t = store.add_type_param("T");
    let target = ClassBuilder::interface("com.example.Target")
        .type_params(&[t])
        .add(&mut store);
    let ping_id = store.intern_class_id("com.example.Ping");
    let pong_id = store.intern_class_id("com.example.Pong");
    let p = store.add_type_param("P");
    let q = store.add_type_param("Q");
    ClassBuilder::class("com.example.Ping")
        .type_params(&[p])
        .extends(TypeRef::parameterized(
            pong_id,
            vec![TypeRef::parameterized(wk.list, vec![TypeRef::var(p)])],
        ))
        .add(&mut store);
    ClassBuilder::class("com.example.Pong")
        .type_params(&[q])
        .extends(TypeRef::parameterized(ping_id, vec![TypeRef::var(q)]))
        .add(&mut store);
    let holder = ClassBuilder::class("com.example.Holder")
        .extends(TypeRef::parameterized(ping_id, vec![TypeRef::class(wk.string)]))
        .add(&mut store);

    assert!(matches!(
        Resolver::new(&store).resolve(holder, &TypeRef::var(t)),
        Err(TypeResolutionError::Unresolved { .. })
    ));
    // `target` is never reached.
    assert!(store.class(target).is_some());
}
