use std::collections::{HashMap, HashSet};

use reify_types::{
    format_type_ref, substitute, ClassId, ClassType, TypeDescriptor, TypeEnv, TypeRef, TypeVarId,
};

use crate::config::{ResolverConfig, SupertypeSearch};
use crate::{TypeResolutionError, TRACE_TARGET};

/// Grounds type references as seen from a concrete holder type.
///
/// A resolver borrows the hierarchy graph and owns nothing but its config, so it is
/// cheap to build one per request; every call keeps its own recursion state.
pub struct Resolver<'env> {
    env: &'env dyn TypeEnv,
    config: ResolverConfig,
}

#[derive(Default)]
struct ResolveState {
    /// Type variables currently being resolved, innermost last.
    in_progress: Vec<TypeVarId>,
}

impl<'env> Resolver<'env> {
    #[must_use]
    pub fn new(env: &'env dyn TypeEnv) -> Self {
        Self {
            env,
            config: ResolverConfig::default(),
        }
    }

    #[must_use]
    pub fn with_config(mut self, config: ResolverConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    pub fn env(&self) -> &'env dyn TypeEnv {
        self.env
    }

    /// Resolve `ty` as seen from `holder`.
    ///
    /// - A nominal type resolves to itself, whatever the holder.
    /// - A parameterized type resolves argument by argument, in order.
    /// - A type variable resolves to the unique binding supplied by the holder's
    ///   supertypes; zero or several distinct bindings are an error.
    pub fn resolve(
        &self,
        holder: ClassId,
        ty: &TypeRef,
    ) -> Result<TypeDescriptor, TypeResolutionError> {
        let mut state = ResolveState::default();
        self.resolve_in(holder, ty, &mut state)
    }

    fn resolve_in(
        &self,
        holder: ClassId,
        ty: &TypeRef,
        state: &mut ResolveState,
    ) -> Result<TypeDescriptor, TypeResolutionError> {
        match ty {
            TypeRef::Class(id) => Ok(TypeDescriptor::plain(*id)),
            TypeRef::Parameterized(ClassType { def, args }) => {
                let class = self
                    .env
                    .class(*def)
                    .ok_or(TypeResolutionError::UnknownClass(*def))?;
                if class.arity() != args.len() {
                    return Err(TypeResolutionError::ArityMismatch {
                        class: class.name.clone(),
                        expected: class.arity(),
                        found: args.len(),
                    });
                }
                if args.is_empty() {
                    // `String<>` is just `String`.
                    return Ok(TypeDescriptor::plain(*def));
                }

                let args = args
                    .iter()
                    .map(|arg| self.resolve_in(holder, arg, state))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(TypeDescriptor::applied(*def, args))
            }
            TypeRef::TypeVar(var) => self.resolve_type_var(holder, *var, state),
        }
    }

    fn resolve_type_var(
        &self,
        holder: ClassId,
        var: TypeVarId,
        state: &mut ResolveState,
    ) -> Result<TypeDescriptor, TypeResolutionError> {
        if state.in_progress.contains(&var) {
            return Err(TypeResolutionError::Cyclic {
                var: self.var_name(var),
            });
        }
        if state.in_progress.len() >= self.config.max_depth {
            return Err(TypeResolutionError::DepthLimitExceeded {
                limit: self.config.max_depth,
            });
        }

        let holder_def = self
            .env
            .class(holder)
            .ok_or(TypeResolutionError::UnknownClass(holder))?;

        // Every declared supertype is examined, even after a binding has been found, so
        // that conflicting bindings are reported instead of silently picking one.
        let mut bindings = Vec::new();
        match self.config.supertype_search {
            SupertypeSearch::Direct => {
                for supertype in holder_def.direct_supertypes() {
                    self.direct_binding(supertype, var, &mut bindings);
                }
            }
            SupertypeSearch::Transitive => {
                let mut seen = HashSet::new();
                for supertype in holder_def.direct_supertypes() {
                    self.transitive_bindings(supertype, var, 0, &mut seen, &mut bindings);
                }
            }
        }

        tracing::trace!(
            target: TRACE_TARGET,
            var = %self.var_name(var),
            holder = %holder_def.name,
            bindings = bindings.len(),
            "collected type variable bindings"
        );

        state.in_progress.push(var);
        let resolved = bindings
            .iter()
            .map(|binding| self.resolve_in(holder, binding, state))
            .collect::<Result<Vec<_>, _>>();
        state.in_progress.pop();
        let mut candidates = resolved?;

        if self.config.supertype_search == SupertypeSearch::Transitive {
            // The same binding can be reached along more than one path (`C extends B<X>
            // implements I<X>` where `B<T> implements I<T>`).
            let mut unique: Vec<TypeDescriptor> = Vec::with_capacity(candidates.len());
            for candidate in candidates {
                if !unique.contains(&candidate) {
                    unique.push(candidate);
                }
            }
            candidates = unique;
        }

        match candidates.len() {
            1 => Ok(candidates.remove(0)),
            0 => {
                tracing::debug!(
                    target: TRACE_TARGET,
                    var = %self.var_name(var),
                    holder = %holder_def.name,
                    "type variable is not bound by any supertype"
                );
                Err(TypeResolutionError::Unresolved {
                    var: self.var_name(var),
                    holder: holder_def.name.clone(),
                })
            }
            _ => {
                let candidates: Vec<String> = candidates
                    .iter()
                    .map(|c| c.display(self.env).to_string())
                    .collect();
                tracing::debug!(
                    target: TRACE_TARGET,
                    var = %self.var_name(var),
                    holder = %holder_def.name,
                    ?candidates,
                    "type variable has conflicting bindings"
                );
                Err(TypeResolutionError::Ambiguous {
                    var: self.var_name(var),
                    holder: holder_def.name.clone(),
                    candidates,
                })
            }
        }
    }

    /// One hop: `supertype` contributes a binding only if it is a parameterization of
    /// the class that declares `var`.
    fn direct_binding(&self, supertype: &TypeRef, var: TypeVarId, out: &mut Vec<TypeRef>) {
        let TypeRef::Parameterized(ClassType { def, args }) = supertype else {
            return;
        };
        let Some(base) = self.env.class(*def) else {
            tracing::debug!(
                target: TRACE_TARGET,
                class = def.to_raw(),
                "supertype refers to an undefined class"
            );
            return;
        };
        if let Some(arg) = base.type_param_index(var).and_then(|idx| args.get(idx)) {
            out.push(arg.clone());
        }
    }

    /// Walk from `supertype` towards the class that declares `var`, substituting each
    /// level's type arguments into the supertypes of the next.
    ///
    /// Collected bindings are expressed in terms of the holder's own view, i.e. they may
    /// still mention variables that the holder's other supertypes bind.
    fn transitive_bindings(
        &self,
        supertype: &TypeRef,
        var: TypeVarId,
        depth: usize,
        seen: &mut HashSet<TypeRef>,
        out: &mut Vec<TypeRef>,
    ) {
        if depth >= self.config.max_depth {
            tracing::warn!(
                target: TRACE_TARGET,
                supertype = %format_type_ref(self.env, supertype),
                limit = self.config.max_depth,
                "supertype walk hit the depth limit"
            );
            return;
        }
        if !seen.insert(supertype.clone()) {
            return;
        }

        let (def, args) = match supertype {
            TypeRef::Parameterized(ClassType { def, args }) if !args.is_empty() => (*def, args),
            _ => {
                // Only parameterized supertypes carry bindings; a plain or raw reference
                // erases everything above it.
                tracing::trace!(
                    target: TRACE_TARGET,
                    supertype = %format_type_ref(self.env, supertype),
                    "non-parameterized supertype ends the search"
                );
                return;
            }
        };
        let Some(base) = self.env.class(def) else {
            tracing::debug!(
                target: TRACE_TARGET,
                class = def.to_raw(),
                "supertype refers to an undefined class"
            );
            return;
        };

        if let Some(idx) = base.type_param_index(var) {
            if let Some(arg) = args.get(idx) {
                out.push(arg.clone());
            }
            return;
        }

        let subst: HashMap<TypeVarId, TypeRef> = base
            .type_params
            .iter()
            .copied()
            .zip(args.iter().cloned())
            .collect();
        for next in base.direct_supertypes() {
            let next = substitute(next, &subst);
            self.transitive_bindings(&next, var, depth + 1, seen, out);
        }
    }

    pub(crate) fn var_name(&self, var: TypeVarId) -> String {
        match self.env.type_param(var) {
            Some(tp) => tp.name.clone(),
            None => format!("#{}", var.to_raw()),
        }
    }

    pub(crate) fn class_name(&self, id: ClassId) -> String {
        match self.env.class(id) {
            Some(def) => def.name.clone(),
            None => format!("<unknown class #{}>", id.to_raw()),
        }
    }
}

/// Resolve `ty` from `holder` with the default configuration.
pub fn resolve(
    env: &dyn TypeEnv,
    holder: ClassId,
    ty: &TypeRef,
) -> Result<TypeDescriptor, TypeResolutionError> {
    Resolver::new(env).resolve(holder, ty)
}
