use std::fmt;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::{ClassId, TypeEnv};

/// A fully resolved type: a nominal type, possibly applied to resolved type arguments.
///
/// Descriptors never mention type variables. The resolver guarantees that an
/// [`TypeDescriptor::Applied`] carries exactly as many arguments as its class declares
/// formal parameters; the constructors here do not re-check it.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TypeDescriptor {
    Plain {
        class: ClassId,
    },
    Applied {
        class: ClassId,
        args: Vec<TypeDescriptor>,
    },
}

impl TypeDescriptor {
    pub fn plain(class: ClassId) -> Self {
        TypeDescriptor::Plain { class }
    }

    pub fn applied(class: ClassId, args: Vec<TypeDescriptor>) -> Self {
        TypeDescriptor::Applied { class, args }
    }

    pub fn is_generic(&self) -> bool {
        matches!(self, TypeDescriptor::Applied { .. })
    }

    pub fn class(&self) -> ClassId {
        match self {
            TypeDescriptor::Plain { class } | TypeDescriptor::Applied { class, .. } => *class,
        }
    }

    /// Resolved type arguments in declaration order; empty for plain descriptors.
    pub fn args(&self) -> &[TypeDescriptor] {
        match self {
            TypeDescriptor::Plain { .. } => &[],
            TypeDescriptor::Applied { args, .. } => args,
        }
    }

    /// Render as `Name` / `Name<Arg1, Arg2>` using the declared class names from `env`.
    pub fn display<'a>(&'a self, env: &'a dyn TypeEnv) -> DisplayDescriptor<'a> {
        DisplayDescriptor { env, ty: self }
    }
}

pub struct DisplayDescriptor<'a> {
    env: &'a dyn TypeEnv,
    ty: &'a TypeDescriptor,
}

impl fmt::Display for DisplayDescriptor<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        crate::format::write_class_name(f, self.env, self.ty.class())?;
        if !self.ty.is_generic() {
            return Ok(());
        }
        f.write_str("<")?;
        for (idx, arg) in self.ty.args().iter().enumerate() {
            if idx > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", arg.display(self.env))?;
        }
        f.write_str(">")
    }
}
