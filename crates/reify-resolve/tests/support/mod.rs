#![allow(dead_code)]

use reify_types::{
    ClassDef, ClassId, ClassKind, FieldDef, MethodDef, TypeDescriptor, TypeRef, TypeStore,
    TypeVarId,
};

/// Builder for a class declaration in tests.
pub struct ClassBuilder {
    def: ClassDef,
}

impl ClassBuilder {
    pub fn class(name: &str) -> Self {
        Self::new(name, ClassKind::Class)
    }

    pub fn interface(name: &str) -> Self {
        Self::new(name, ClassKind::Interface)
    }

    fn new(name: &str, kind: ClassKind) -> Self {
        Self {
            def: ClassDef {
                name: name.to_string(),
                kind,
                type_params: vec![],
                super_class: None,
                interfaces: vec![],
                fields: vec![],
                methods: vec![],
            },
        }
    }

    pub fn type_params(mut self, params: &[TypeVarId]) -> Self {
        self.def.type_params = params.to_vec();
        self
    }

    pub fn extends(mut self, super_class: TypeRef) -> Self {
        self.def.super_class = Some(super_class);
        self
    }

    pub fn implements(mut self, iface: TypeRef) -> Self {
        self.def.interfaces.push(iface);
        self
    }

    pub fn method(mut self, name: &str, params: Vec<TypeRef>, return_type: Option<TypeRef>) -> Self {
        self.def.methods.push(MethodDef {
            name: name.to_string(),
            type_params: vec![],
            params,
            return_type,
        });
        self
    }

    pub fn generic_method(
        mut self,
        name: &str,
        type_params: &[TypeVarId],
        return_type: TypeRef,
    ) -> Self {
        self.def.methods.push(MethodDef {
            name: name.to_string(),
            type_params: type_params.to_vec(),
            params: vec![],
            return_type: Some(return_type),
        });
        self
    }

    pub fn field(mut self, name: &str, ty: TypeRef) -> Self {
        self.def.fields.push(FieldDef {
            name: name.to_string(),
            ty,
        });
        self
    }

    pub fn add(self, store: &mut TypeStore) -> ClassId {
        store.add_class(self.def)
    }
}

/// `class Something<T> { Container<T> something(T t) }` and
/// `class SomethingMore extends Something<Integer>`.
pub struct SomethingFixture {
    pub store: TypeStore,
    pub container: ClassId,
    pub something: ClassId,
    pub something_more: ClassId,
    pub t: TypeVarId,
}

impl SomethingFixture {
    pub fn new() -> Self {
        let mut store = TypeStore::default();
        let object = store.well_known().object;
        let integer = store.well_known().integer;

        let c = store.add_type_param("C");
        let container = ClassBuilder::class("com.example.Container")
            .type_params(&[c])
            .extends(TypeRef::class(object))
            .field("body", TypeRef::var(c))
            .add(&mut store);

        let t = store.add_type_param("T");
        let something = ClassBuilder::class("com.example.Something")
            .type_params(&[t])
            .extends(TypeRef::class(object))
            .method(
                "something",
                vec![TypeRef::var(t)],
                Some(TypeRef::parameterized(container, vec![TypeRef::var(t)])),
            )
            .field("value", TypeRef::var(t))
            .add(&mut store);

        let something_more = ClassBuilder::class("com.example.SomethingMore")
            .extends(TypeRef::parameterized(something, vec![TypeRef::class(integer)]))
            .add(&mut store);

        Self {
            store,
            container,
            something,
            something_more,
            t,
        }
    }
}

pub fn plain(class: ClassId) -> TypeDescriptor {
    TypeDescriptor::plain(class)
}

pub fn applied(class: ClassId, args: Vec<TypeDescriptor>) -> TypeDescriptor {
    TypeDescriptor::applied(class, args)
}
