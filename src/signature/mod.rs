//! Signature grammar — `name :: type` lines in Hindley-Milner notation.
//!
//! Supports type variables, constructors (`Maybe a`), functions (`a -> b`),
//! methods (`Object ~> a -> b`), lists (`[a]`), records (`{ k :: v }`),
//! tuples / uncurried arguments (`(a, b)`), thunks (`()`), and typeclass
//! constraints (`Functor f =>`).

mod types;

pub use types::{Constraint, Field, Signature, TypeExpr};

use pest::iterators::Pair;
use pest::Parser;
use pest_derive::Parser;
use std::num::NonZeroUsize;
use std::sync::Once;
use thiserror::Error;

/// Deepest bracket nesting a signature may have.
pub const MAX_NESTING: usize = 64;

/// Upper bound on grammar rule calls for a single parse.
const CALL_LIMIT: usize = 100_000;

static CALL_LIMIT_INIT: Once = Once::new();

#[derive(Parser)]
#[grammar = "signature/grammar.pest"]
struct SignatureParser;

#[derive(Debug, Error)]
pub enum SignatureError {
    #[error("not a signature: {0}")]
    Syntax(String),

    #[error("unexpected parse tree: {0}")]
    Shape(String),

    #[error("signature parser fault: {0}")]
    Internal(String),
}

/// Parse a normalized signature line.
pub fn parse(text: &str) -> Result<Signature, SignatureError> {
    CALL_LIMIT_INIT.call_once(|| pest::set_call_limit(NonZeroUsize::new(CALL_LIMIT)));

    let depth = nesting_depth(text);
    if depth > MAX_NESTING {
        return Err(SignatureError::Syntax(format!(
            "brackets nested {} deep (limit {})",
            depth, MAX_NESTING
        )));
    }

    let mut pairs = SignatureParser::parse(Rule::signature, text)
        .map_err(|e| SignatureError::Syntax(e.to_string()))?;
    let root = pairs
        .next()
        .ok_or_else(|| SignatureError::Shape("empty parse".into()))?;
    build_signature(root)
}

/// Maximum count of open brackets at any point, balanced or not.
fn nesting_depth(text: &str) -> usize {
    let mut depth = 0usize;
    let mut max = 0usize;
    for c in text.chars() {
        match c {
            '(' | '[' | '{' => {
                depth += 1;
                max = max.max(depth);
            }
            ')' | ']' | '}' => depth = depth.saturating_sub(1),
            _ => {}
        }
    }
    max
}

// -- Tree builders ------------------------------------------------------------

fn build_signature(pair: Pair<'_, Rule>) -> Result<Signature, SignatureError> {
    let mut name = None;
    let mut constraints = Vec::new();
    let mut ty = None;

    for inner in pair.into_inner() {
        match inner.as_rule() {
            Rule::name => name = Some(inner.as_str().to_string()),
            Rule::constraints => {
                constraints = inner
                    .into_inner()
                    .map(build_constraint)
                    .collect::<Result<_, _>>()?
            }
            Rule::type_expr => ty = Some(build_type(inner)?),
            _ => {}
        }
    }

    Ok(Signature {
        name: name.ok_or_else(|| SignatureError::Shape("missing name".into()))?,
        constraints,
        ty: ty.ok_or_else(|| SignatureError::Shape("missing type".into()))?,
    })
}

fn build_constraint(pair: Pair<'_, Rule>) -> Result<Constraint, SignatureError> {
    let mut inner = pair.into_inner();
    let typeclass = next_str(&mut inner, "typeclass")?;
    let typevar = next_str(&mut inner, "typevar")?;
    Ok(Constraint { typeclass, typevar })
}

fn build_type(pair: Pair<'_, Rule>) -> Result<TypeExpr, SignatureError> {
    match pair.as_rule() {
        Rule::type_expr => {
            let mut inner = pair.into_inner();
            let head = next_type(&mut inner, "operand")?;
            match inner.next() {
                None => Ok(head),
                Some(tail) if tail.as_rule() == Rule::function_tail => {
                    let mut children = vec![head];
                    children.extend(build_all(tail)?);
                    Ok(TypeExpr::Function { children })
                }
                Some(tail) => {
                    let mut operands = build_all(tail)?;
                    let function = if operands.len() == 1 {
                        operands.remove(0)
                    } else {
                        TypeExpr::Function { children: operands }
                    };
                    Ok(TypeExpr::Method {
                        receiver: Box::new(head),
                        function: Box::new(function),
                    })
                }
            }
        }
        Rule::named => {
            let mut inner = pair.into_inner();
            let head = inner
                .next()
                .ok_or_else(|| SignatureError::Shape("missing type name".into()))?;
            let args: Vec<TypeExpr> = inner.map(build_type).collect::<Result<_, _>>()?;
            if args.is_empty() {
                build_type(head)
            } else {
                Ok(TypeExpr::Constructor {
                    name: head.as_str().to_string(),
                    args,
                })
            }
        }
        Rule::paren => {
            let mut elements = build_all(pair)?;
            Ok(match elements.len() {
                0 => TypeExpr::Unit,
                1 => elements.remove(0),
                _ => TypeExpr::Tuple { elements },
            })
        }
        Rule::list => {
            let mut inner = pair.into_inner();
            Ok(TypeExpr::List {
                element: Box::new(next_type(&mut inner, "list element")?),
            })
        }
        Rule::record => Ok(TypeExpr::Record {
            fields: pair
                .into_inner()
                .map(build_field)
                .collect::<Result<_, _>>()?,
        }),
        Rule::type_constructor => Ok(TypeExpr::Constructor {
            name: pair.as_str().to_string(),
            args: Vec::new(),
        }),
        Rule::type_var => Ok(TypeExpr::Variable {
            name: pair.as_str().to_string(),
        }),
        other => Err(SignatureError::Shape(format!("{:?} is not a type", other))),
    }
}

fn build_field(pair: Pair<'_, Rule>) -> Result<Field, SignatureError> {
    let mut inner = pair.into_inner();
    let name = next_str(&mut inner, "field name")?;
    let ty = next_type(&mut inner, "field type")?;
    Ok(Field { name, ty })
}

fn build_all(pair: Pair<'_, Rule>) -> Result<Vec<TypeExpr>, SignatureError> {
    pair.into_inner().map(build_type).collect()
}

fn next_str<'i>(
    pairs: &mut impl Iterator<Item = Pair<'i, Rule>>,
    what: &str,
) -> Result<String, SignatureError> {
    pairs
        .next()
        .map(|p| p.as_str().to_string())
        .ok_or_else(|| SignatureError::Shape(format!("missing {}", what)))
}

fn next_type<'i>(
    pairs: &mut impl Iterator<Item = Pair<'i, Rule>>,
    what: &str,
) -> Result<TypeExpr, SignatureError> {
    let pair = pairs
        .next()
        .ok_or_else(|| SignatureError::Shape(format!("missing {}", what)))?;
    build_type(pair)
}
