//! Type declarations, type references and resolved type descriptors.
//!
//! The hierarchy graph ([`TypeStore`]) is built ahead of time by a front-end (a source
//! parser, a classfile loader, a schema loader...) and is read-only while types are being
//! resolved. Resolution itself lives in `reify-resolve`; this crate only carries the data
//! it consumes and produces.

#![forbid(unsafe_code)]

use std::collections::HashMap;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

mod descriptor;
mod format;
mod store;

pub use descriptor::{DisplayDescriptor, TypeDescriptor};
pub use format::{format_type_ref, DisplayTypeRef};
pub use store::{TypeStore, WellKnownTypes};

/// Identity of a nominal type declaration inside a [`TypeStore`].
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema,
)]
pub struct ClassId(u32);

impl ClassId {
    pub const fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    pub const fn to_raw(self) -> u32 {
        self.0
    }

    fn index(self) -> usize {
        self.0 as usize
    }
}

/// Identity of a single formal type parameter declaration.
///
/// Two parameters named `T` declared by different types get different ids. Resolution
/// compares ids, never names.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TypeVarId(u32);

impl TypeVarId {
    pub const fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    pub const fn to_raw(self) -> u32 {
        self.0
    }

    fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ClassKind {
    Class,
    Interface,
}

/// A generic class applied to type arguments, e.g. `List<T>` or `Map<String, V>`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ClassType {
    pub def: ClassId,
    pub args: Vec<TypeRef>,
}

/// A type as written at a usage site: a supertype clause, a method signature, a field.
///
/// May still mention type variables.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TypeRef {
    /// A nominal type without type arguments. For a generic class this is a raw reference.
    Class(ClassId),
    Parameterized(ClassType),
    TypeVar(TypeVarId),
}

impl TypeRef {
    pub fn class(def: ClassId) -> Self {
        TypeRef::Class(def)
    }

    pub fn parameterized(def: ClassId, args: Vec<TypeRef>) -> Self {
        TypeRef::Parameterized(ClassType { def, args })
    }

    pub fn var(id: TypeVarId) -> Self {
        TypeRef::TypeVar(id)
    }

    /// The nominal type this reference names, if any.
    pub fn class_id(&self) -> Option<ClassId> {
        match self {
            TypeRef::Class(def) | TypeRef::Parameterized(ClassType { def, .. }) => Some(*def),
            TypeRef::TypeVar(_) => None,
        }
    }

    pub fn mentions_type_vars(&self) -> bool {
        match self {
            TypeRef::Class(_) => false,
            TypeRef::Parameterized(ClassType { args, .. }) => {
                args.iter().any(TypeRef::mentions_type_vars)
            }
            TypeRef::TypeVar(_) => true,
        }
    }
}

/// Replace every type variable in `ty` that has an entry in `subst`.
///
/// Variables without an entry are left untouched.
pub fn substitute(ty: &TypeRef, subst: &HashMap<TypeVarId, TypeRef>) -> TypeRef {
    match ty {
        TypeRef::Class(_) => ty.clone(),
        TypeRef::Parameterized(ClassType { def, args }) => TypeRef::parameterized(
            *def,
            args.iter().map(|arg| substitute(arg, subst)).collect(),
        ),
        TypeRef::TypeVar(id) => subst.get(id).cloned().unwrap_or_else(|| ty.clone()),
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeParamDef {
    pub name: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDef {
    pub name: String,
    pub ty: TypeRef,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodDef {
    pub name: String,
    /// Method-level formal type parameters (`<U> U convert(...)`).
    pub type_params: Vec<TypeVarId>,
    pub params: Vec<TypeRef>,
    /// `None` for `void`.
    pub return_type: Option<TypeRef>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassDef {
    /// Binary name, e.g. `java.util.List` or `com.example.Outer$Inner`.
    pub name: String,
    pub kind: ClassKind,
    pub type_params: Vec<TypeVarId>,
    /// Declared superclass. Interfaces and `java.lang.Object` have none.
    pub super_class: Option<TypeRef>,
    /// Directly implemented (or, for interfaces, extended) interfaces in declaration order.
    pub interfaces: Vec<TypeRef>,
    pub fields: Vec<FieldDef>,
    pub methods: Vec<MethodDef>,
}

impl ClassDef {
    /// Declared supertypes: the superclass first, then the interfaces.
    pub fn direct_supertypes(&self) -> impl Iterator<Item = &TypeRef> + '_ {
        self.super_class.iter().chain(self.interfaces.iter())
    }

    pub fn arity(&self) -> usize {
        self.type_params.len()
    }

    pub fn is_generic(&self) -> bool {
        !self.type_params.is_empty()
    }

    /// Position of `var` among this class' formal type parameters.
    pub fn type_param_index(&self, var: TypeVarId) -> Option<usize> {
        self.type_params.iter().position(|tp| *tp == var)
    }

    pub fn method(&self, name: &str) -> Option<&MethodDef> {
        self.methods.iter().find(|m| m.name == name)
    }

    pub fn field(&self, name: &str) -> Option<&FieldDef> {
        self.fields.iter().find(|f| f.name == name)
    }
}

/// Read access to the hierarchy graph.
///
/// This is everything the resolver is allowed to ask about types: a declaration's formal
/// parameters, declared supertypes and members, and type parameter metadata.
pub trait TypeEnv {
    fn class(&self, id: ClassId) -> Option<&ClassDef>;
    fn type_param(&self, id: TypeVarId) -> Option<&TypeParamDef>;
    fn lookup_class(&self, name: &str) -> Option<ClassId>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn substitute_replaces_nested_vars_only() {
        let t = TypeVarId::from_raw(0);
        let u = TypeVarId::from_raw(1);
        let list = ClassId::from_raw(7);
        let string = ClassId::from_raw(3);

        let ty = TypeRef::parameterized(list, vec![TypeRef::var(t), TypeRef::var(u)]);
        let subst = HashMap::from([(t, TypeRef::class(string))]);

        assert_eq!(
            substitute(&ty, &subst),
            TypeRef::parameterized(list, vec![TypeRef::class(string), TypeRef::var(u)])
        );
    }

    #[test]
    fn mentions_type_vars_looks_through_arguments() {
        let list = ClassId::from_raw(1);
        let t = TypeVarId::from_raw(0);

        assert!(!TypeRef::class(list).mentions_type_vars());
        assert!(TypeRef::parameterized(
            list,
            vec![TypeRef::parameterized(list, vec![TypeRef::var(t)])]
        )
        .mentions_type_vars());
    }
}
