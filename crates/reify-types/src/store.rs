use std::collections::HashMap;

use crate::{
    ClassDef, ClassId, ClassKind, MethodDef, TypeEnv, TypeParamDef, TypeRef, TypeVarId,
};

/// Ids of the declarations seeded by [`TypeStore::with_minimal_jdk`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WellKnownTypes {
    pub object: ClassId,
    pub number: ClassId,
    pub string: ClassId,
    pub integer: ClassId,
    pub long: ClassId,
    pub boolean: ClassId,
    pub comparable: ClassId,
    pub iterable: ClassId,
    pub collection: ClassId,
    pub list: ClassId,
    pub array_list: ClassId,
    pub map: ClassId,
    pub hash_map: ClassId,
    pub optional: ClassId,
}

/// An in-memory hierarchy graph.
///
/// Class ids can be interned before their declaration is known so that self-referential
/// clauses (`class String implements Comparable<String>`) and forward references can be
/// expressed; [`TypeStore::define_class`] fills the placeholder in later.
#[derive(Clone, Debug)]
pub struct TypeStore {
    classes: Vec<Option<ClassDef>>,
    class_by_name: HashMap<String, ClassId>,
    type_params: Vec<TypeParamDef>,
    well_known: WellKnownTypes,
}

impl Default for TypeStore {
    fn default() -> Self {
        Self::with_minimal_jdk()
    }
}

impl TypeStore {
    /// A store seeded with a small slice of `java.lang` and `java.util`.
    pub fn with_minimal_jdk() -> Self {
        let placeholder = ClassId::from_raw(0);
        let mut store = TypeStore {
            classes: Vec::new(),
            class_by_name: HashMap::new(),
            type_params: Vec::new(),
            well_known: WellKnownTypes {
                object: placeholder,
                number: placeholder,
                string: placeholder,
                integer: placeholder,
                long: placeholder,
                boolean: placeholder,
                comparable: placeholder,
                iterable: placeholder,
                collection: placeholder,
                list: placeholder,
                array_list: placeholder,
                map: placeholder,
                hash_map: placeholder,
                optional: placeholder,
            },
        };
        store.well_known = store.seed_minimal_jdk();
        store
    }

    fn seed_minimal_jdk(&mut self) -> WellKnownTypes {
        let object = self.add_class(class("java.lang.Object", ClassKind::Class, vec![], None));
        let object_ty = TypeRef::class(object);

        let comparable_t = self.add_type_param("T");
        let comparable = self.add_class(class(
            "java.lang.Comparable",
            ClassKind::Interface,
            vec![comparable_t],
            None,
        ));

        let number = self.add_class(class(
            "java.lang.Number",
            ClassKind::Class,
            vec![],
            Some(object_ty.clone()),
        ));

        let string = self.add_comparable_class("java.lang.String", &object_ty, comparable);
        let number_ty = TypeRef::class(number);
        let integer = self.add_comparable_class("java.lang.Integer", &number_ty, comparable);
        let long = self.add_comparable_class("java.lang.Long", &number_ty, comparable);
        let boolean = self.add_comparable_class("java.lang.Boolean", &object_ty, comparable);

        let iterable_t = self.add_type_param("T");
        let iterable = self.add_class(class(
            "java.lang.Iterable",
            ClassKind::Interface,
            vec![iterable_t],
            None,
        ));

        let collection_e = self.add_type_param("E");
        let mut collection_def = class(
            "java.util.Collection",
            ClassKind::Interface,
            vec![collection_e],
            None,
        );
        collection_def.interfaces = vec![TypeRef::parameterized(
            iterable,
            vec![TypeRef::var(collection_e)],
        )];
        let collection = self.add_class(collection_def);

        let list_e = self.add_type_param("E");
        let mut list_def = class("java.util.List", ClassKind::Interface, vec![list_e], None);
        list_def.interfaces = vec![TypeRef::parameterized(
            collection,
            vec![TypeRef::var(list_e)],
        )];
        let list = self.add_class(list_def);

        let array_list_e = self.add_type_param("E");
        let mut array_list_def = class(
            "java.util.ArrayList",
            ClassKind::Class,
            vec![array_list_e],
            Some(object_ty.clone()),
        );
        array_list_def.interfaces = vec![TypeRef::parameterized(
            list,
            vec![TypeRef::var(array_list_e)],
        )];
        let array_list = self.add_class(array_list_def);

        let map_k = self.add_type_param("K");
        let map_v = self.add_type_param("V");
        let mut map_def = class("java.util.Map", ClassKind::Interface, vec![map_k, map_v], None);
        map_def.methods = vec![MethodDef {
            name: "get".to_string(),
            type_params: vec![],
            params: vec![object_ty.clone()],
            return_type: Some(TypeRef::var(map_v)),
        }];
        let map = self.add_class(map_def);

        let hash_map_k = self.add_type_param("K");
        let hash_map_v = self.add_type_param("V");
        let mut hash_map_def = class(
            "java.util.HashMap",
            ClassKind::Class,
            vec![hash_map_k, hash_map_v],
            Some(object_ty.clone()),
        );
        hash_map_def.interfaces = vec![TypeRef::parameterized(
            map,
            vec![TypeRef::var(hash_map_k), TypeRef::var(hash_map_v)],
        )];
        let hash_map = self.add_class(hash_map_def);

        let optional_t = self.add_type_param("T");
        let mut optional_def = class(
            "java.util.Optional",
            ClassKind::Class,
            vec![optional_t],
            Some(object_ty),
        );
        optional_def.methods = vec![MethodDef {
            name: "get".to_string(),
            type_params: vec![],
            params: vec![],
            return_type: Some(TypeRef::var(optional_t)),
        }];
        let optional = self.add_class(optional_def);

        WellKnownTypes {
            object,
            number,
            string,
            integer,
            long,
            boolean,
            comparable,
            iterable,
            collection,
            list,
            array_list,
            map,
            hash_map,
            optional,
        }
    }

    /// `class Name extends super_class implements Comparable<Name>`
    fn add_comparable_class(
        &mut self,
        name: &str,
        super_class: &TypeRef,
        comparable: ClassId,
    ) -> ClassId {
        let id = self.intern_class_id(name);
        let mut def = class(name, ClassKind::Class, vec![], Some(super_class.clone()));
        def.interfaces = vec![TypeRef::parameterized(comparable, vec![TypeRef::class(id)])];
        self.define_class(id, def);
        id
    }

    pub fn well_known(&self) -> &WellKnownTypes {
        &self.well_known
    }

    /// Allocate a fresh formal type parameter. Every call returns a distinct id, even for
    /// a name that is already in use.
    pub fn add_type_param(&mut self, name: impl Into<String>) -> TypeVarId {
        let id = TypeVarId::from_raw(self.type_params.len() as u32);
        self.type_params.push(TypeParamDef { name: name.into() });
        id
    }

    pub fn type_param_count(&self) -> usize {
        self.type_params.len()
    }

    /// Return the id for `name`, allocating an undefined placeholder if it is new.
    pub fn intern_class_id(&mut self, name: &str) -> ClassId {
        if let Some(id) = self.class_by_name.get(name) {
            return *id;
        }
        let id = ClassId::from_raw(self.classes.len() as u32);
        self.classes.push(None);
        self.class_by_name.insert(name.to_string(), id);
        id
    }

    /// Set (or replace) the declaration behind `id`.
    ///
    /// `id` is indexed under `def.name` only: if it was interned or defined under another
    /// name, that name no longer resolves to it.
    pub fn define_class(&mut self, id: ClassId, def: ClassDef) {
        let idx = id.index();
        if idx >= self.classes.len() {
            self.classes.resize_with(idx + 1, || None);
        }
        if self.class_by_name.get(&def.name) != Some(&id) {
            self.class_by_name
                .retain(|name, mapped| *mapped != id || *name == def.name);
            self.class_by_name.insert(def.name.clone(), id);
        }
        self.classes[idx] = Some(def);
    }

    /// Insert `def`, replacing any existing declaration of the same name without changing
    /// its id.
    pub fn add_class(&mut self, def: ClassDef) -> ClassId {
        let id = self.intern_class_id(&def.name);
        self.define_class(id, def);
        id
    }

    /// Exact binary-name lookup.
    pub fn class_id(&self, name: &str) -> Option<ClassId> {
        self.class_by_name.get(name).copied()
    }

    pub fn class_count(&self) -> usize {
        self.classes.iter().filter(|def| def.is_some()).count()
    }
}

impl TypeEnv for TypeStore {
    fn class(&self, id: ClassId) -> Option<&ClassDef> {
        self.classes.get(id.index())?.as_ref()
    }

    fn type_param(&self, id: TypeVarId) -> Option<&TypeParamDef> {
        self.type_params.get(id.index())
    }

    /// Binary-name lookup that also accepts simple names from the implicit `java.lang`
    /// import (`"String"` finds `java.lang.String`).
    fn lookup_class(&self, name: &str) -> Option<ClassId> {
        if let Some(id) = self.class_id(name) {
            return Some(id);
        }
        if name.contains('.') {
            return None;
        }
        self.class_id(&format!("java.lang.{name}"))
    }
}

fn class(
    name: &str,
    kind: ClassKind,
    type_params: Vec<TypeVarId>,
    super_class: Option<TypeRef>,
) -> ClassDef {
    ClassDef {
        name: name.to_string(),
        kind,
        type_params,
        super_class,
        interfaces: vec![],
        fields: vec![],
        methods: vec![],
    }
}
