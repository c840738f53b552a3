//! Member signatures as seen from a concrete holder.
//!
//! This is the main consumer of [`Resolver::resolve`]: given `SomethingMore extends
//! Something<Integer>`, the `T something()` method inherited from `Something<T>` has
//! the return type `Integer` when viewed from `SomethingMore`.

use std::collections::{HashSet, VecDeque};

use reify_types::{ClassDef, ClassId, TypeDescriptor};

use crate::{Resolver, TypeResolutionError};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolvedMethod {
    pub name: String,
    /// The class whose declaration was found; may be the holder itself or an ancestor.
    pub declaring_class: ClassId,
    pub params: Vec<TypeDescriptor>,
    /// `None` for `void`.
    pub return_type: Option<TypeDescriptor>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolvedField {
    pub name: String,
    pub declaring_class: ClassId,
    pub ty: TypeDescriptor,
}

impl<'env> Resolver<'env> {
    /// Find the method `name` on `holder` or its ancestors and resolve its signature from
    /// `holder`'s point of view.
    ///
    /// Lookup is breadth-first: the holder's own declaration wins, then its superclass,
    /// then its interfaces, and so on up the hierarchy.
    pub fn resolve_method(
        &self,
        holder: ClassId,
        name: &str,
    ) -> Result<ResolvedMethod, TypeResolutionError> {
        let (declaring_class, method) = self
            .find_member(holder, |def| def.method(name))
            .ok_or_else(|| TypeResolutionError::UnknownMember {
                holder: self.class_name(holder),
                name: name.to_string(),
            })?;

        let params = method
            .params
            .iter()
            .map(|param| self.resolve(holder, param))
            .collect::<Result<Vec<_>, _>>()?;
        let return_type = method
            .return_type
            .as_ref()
            .map(|ty| self.resolve(holder, ty))
            .transpose()?;

        Ok(ResolvedMethod {
            name: method.name.clone(),
            declaring_class,
            params,
            return_type,
        })
    }

    /// Find the field `name` on `holder` or its ancestors and resolve its type from
    /// `holder`'s point of view.
    pub fn resolve_field(
        &self,
        holder: ClassId,
        name: &str,
    ) -> Result<ResolvedField, TypeResolutionError> {
        let (declaring_class, field) = self
            .find_member(holder, |def| def.field(name))
            .ok_or_else(|| TypeResolutionError::UnknownMember {
                holder: self.class_name(holder),
                name: name.to_string(),
            })?;

        Ok(ResolvedField {
            name: field.name.clone(),
            declaring_class,
            ty: self.resolve(holder, &field.ty)?,
        })
    }

    fn find_member<T>(
        &self,
        holder: ClassId,
        pick: impl Fn(&'env ClassDef) -> Option<&'env T>,
    ) -> Option<(ClassId, &'env T)> {
        let env = self.env();
        let mut queue = VecDeque::from([holder]);
        let mut seen = HashSet::new();

        while let Some(current) = queue.pop_front() {
            if !seen.insert(current) {
                continue;
            }
            let Some(def) = env.class(current) else {
                continue;
            };
            if let Some(member) = pick(def) {
                return Some((current, member));
            }
            queue.extend(def.direct_supertypes().filter_map(|ty| ty.class_id()));
        }

        None
    }
}
