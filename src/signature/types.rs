//! Parsed signature shapes and their canonical text form.

use serde::Serialize;
use std::fmt;

/// A parsed `name :: [constraints =>] type` line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Signature {
    pub name: String,
    pub constraints: Vec<Constraint>,
    #[serde(rename = "type")]
    pub ty: TypeExpr,
}

/// `Functor f` in `Functor f => f a -> f b`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Constraint {
    pub typeclass: String,
    pub typevar: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum TypeExpr {
    Variable { name: String },
    /// `Maybe a`. The head may also be a type variable (`f a`).
    Constructor { name: String, args: Vec<TypeExpr> },
    /// `a -> b -> c`; the last child is the return type.
    Function { children: Vec<TypeExpr> },
    /// `Receiver ~> a -> b`
    Method {
        receiver: Box<TypeExpr>,
        function: Box<TypeExpr>,
    },
    List { element: Box<TypeExpr> },
    Tuple { elements: Vec<TypeExpr> },
    Record { fields: Vec<Field> },
    Unit,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Field {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: TypeExpr,
}

impl TypeExpr {
    fn is_arrow(&self) -> bool {
        matches!(self, TypeExpr::Function { .. } | TypeExpr::Method { .. })
    }

    fn needs_parens_as_arg(&self) -> bool {
        match self {
            TypeExpr::Constructor { args, .. } => !args.is_empty(),
            other => other.is_arrow(),
        }
    }
}

fn join<T: fmt::Display>(f: &mut fmt::Formatter<'_>, items: &[T], sep: &str) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(sep)?;
        }
        write!(f, "{}", item)?;
    }
    Ok(())
}

struct Parens<'a>(&'a TypeExpr, bool);

impl fmt::Display for Parens<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.1 {
            write!(f, "({})", self.0)
        } else {
            write!(f, "{}", self.0)
        }
    }
}

impl fmt::Display for TypeExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeExpr::Variable { name } => f.write_str(name),
            TypeExpr::Constructor { name, args } => {
                f.write_str(name)?;
                for arg in args {
                    write!(f, " {}", Parens(arg, arg.needs_parens_as_arg()))?;
                }
                Ok(())
            }
            TypeExpr::Function { children } => {
                let wrapped: Vec<Parens<'_>> =
                    children.iter().map(|c| Parens(c, c.is_arrow())).collect();
                join(f, &wrapped, " -> ")
            }
            TypeExpr::Method { receiver, function } => {
                write!(
                    f,
                    "{} ~> {}",
                    Parens(receiver, receiver.is_arrow()),
                    Parens(function, matches!(**function, TypeExpr::Method { .. }))
                )
            }
            TypeExpr::List { element } => write!(f, "[{}]", element),
            TypeExpr::Tuple { elements } => {
                f.write_str("(")?;
                join(f, elements, ", ")?;
                f.write_str(")")
            }
            TypeExpr::Record { fields } if fields.is_empty() => f.write_str("{}"),
            TypeExpr::Record { fields } => {
                f.write_str("{ ")?;
                join(f, fields, ", ")?;
                f.write_str(" }")
            }
            TypeExpr::Unit => f.write_str("()"),
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} :: {}", self.name, self.ty)
    }
}

impl fmt::Display for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.typeclass, self.typevar)
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} :: ", self.name)?;
        match self.constraints.as_slice() {
            [] => {}
            [single] => write!(f, "{} => ", single)?,
            many => {
                f.write_str("(")?;
                join(f, many, ", ")?;
                f.write_str(") => ")?;
            }
        }
        write!(f, "{}", self.ty)
    }
}
