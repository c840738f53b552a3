//! Java-like rendering of type references for diagnostics.

use std::fmt;

use crate::{ClassId, ClassType, TypeEnv, TypeRef};

pub(crate) fn write_class_name(
    f: &mut fmt::Formatter<'_>,
    env: &dyn TypeEnv,
    id: ClassId,
) -> fmt::Result {
    match env.class(id) {
        Some(def) => f.write_str(&def.name),
        None => write!(f, "<unknown class #{}>", id.to_raw()),
    }
}

/// Render `ty` as `Name`, `Name<A, B>` or a type variable's declared name.
pub fn format_type_ref(env: &dyn TypeEnv, ty: &TypeRef) -> String {
    DisplayTypeRef { env, ty }.to_string()
}

pub struct DisplayTypeRef<'a> {
    pub env: &'a dyn TypeEnv,
    pub ty: &'a TypeRef,
}

impl fmt::Display for DisplayTypeRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.ty {
            TypeRef::Class(id) => write_class_name(f, self.env, *id),
            TypeRef::Parameterized(ClassType { def, args }) => {
                write_class_name(f, self.env, *def)?;
                f.write_str("<")?;
                for (idx, arg) in args.iter().enumerate() {
                    if idx > 0 {
                        f.write_str(", ")?;
                    }
                    write!(
                        f,
                        "{}",
                        DisplayTypeRef {
                            env: self.env,
                            ty: arg
                        }
                    )?;
                }
                f.write_str(">")
            }
            TypeRef::TypeVar(id) => match self.env.type_param(*id) {
                Some(tp) => f.write_str(&tp.name),
                None => write!(f, "<unknown type var #{}>", id.to_raw()),
            },
        }
    }
}
