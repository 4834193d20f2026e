//! Executable values of q. They are never evaluated: they are carried as inert metadata so
//! that a message holding them can be read and written back.
use std::borrow::Cow;

use crate::datatypes::{Adverb, TypeCode};
use crate::error::{QError, Result};
use crate::scalar::Symbol;
use crate::value::Value;

/// A lambda (`100`): the context it was defined in and its source text.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Lambda {
    context: Symbol,
    body: Vec<u8>,
}

impl Lambda {
    pub fn new<C: Into<Symbol>, B: Into<Vec<u8>>>(context: C, body: B) -> Self {
        Self {
            context: context.into(),
            body: body.into(),
        }
    }

    /// The context (namespace) of the lambda; empty for the root context.
    #[inline]
    pub fn context(&self) -> &Symbol {
        &self.context
    }

    /// The raw source text, e.g. `{x+y}`.
    #[inline]
    pub fn body(&self) -> &[u8] {
        &self.body
    }

    pub fn source(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.body)
    }
}

/// The captured part of a [`Function`].
#[derive(Debug, Clone, PartialEq)]
pub enum FunctionBody {
    /// the index of a unary, binary or ternary primitive
    Primitive(u8),
    /// the parts of a composition
    Composition(Vec<Value>),
    /// the operand of an adverb
    Adverb(Box<Value>),
}

/// A built-in primitive (`101`-`103`), a composition (`105`) or an adverb application
/// (`106`-`111`).
///
/// A function without a captured body is a placeholder: it can be built and compared but
/// has no wire form.
#[derive(Debug, Clone, PartialEq)]
pub struct Function {
    code: TypeCode,
    body: Option<FunctionBody>,
}

impl Function {
    /// Creates a new [`Function`].
    /// # Errors
    /// This function errors iff:
    /// * `code` is not `101`-`103` or `105`-`111`
    /// * `body` does not match `code`
    /// * `code` is `101` and `body` is the primitive `0`, the generic null (use [`Value::Nil`])
    pub fn try_new(code: TypeCode, body: Option<FunctionBody>) -> Result<Self> {
        use TypeCode::*;
        let is_valid = match (code, &body) {
            (UnaryPrimitive, Some(FunctionBody::Primitive(0))) => false,
            (UnaryPrimitive, Some(FunctionBody::Primitive(_)))
            | (BinaryPrimitive, Some(FunctionBody::Primitive(_)))
            | (TernaryOperator, Some(FunctionBody::Primitive(_)))
            | (Composition, Some(FunctionBody::Composition(_)))
            | (Adverb(_), Some(FunctionBody::Adverb(_))) => true,
            (UnaryPrimitive, None)
            | (BinaryPrimitive, None)
            | (TernaryOperator, None)
            | (Composition, None)
            | (Adverb(_), None) => true,
            _ => false,
        };
        if !is_valid {
            return Err(QError::InvalidArgument(format!(
                "A function of type {} can't have the body {:?}",
                code, body
            )));
        }
        Ok(Self { code, body })
    }

    /// A unary primitive such as `neg`.
    pub fn unary(index: u8) -> Result<Self> {
        Self::try_new(TypeCode::UnaryPrimitive, Some(FunctionBody::Primitive(index)))
    }

    /// A binary primitive such as `+`.
    pub fn binary(index: u8) -> Self {
        Self {
            code: TypeCode::BinaryPrimitive,
            body: Some(FunctionBody::Primitive(index)),
        }
    }

    /// A ternary operator.
    pub fn ternary(index: u8) -> Self {
        Self {
            code: TypeCode::TernaryOperator,
            body: Some(FunctionBody::Primitive(index)),
        }
    }

    /// A composition of `parts`.
    pub fn composition(parts: Vec<Value>) -> Self {
        Self {
            code: TypeCode::Composition,
            body: Some(FunctionBody::Composition(parts)),
        }
    }

    /// The adverb `adverb` applied to `operand`, e.g. `+/`.
    pub fn adverb(adverb: Adverb, operand: Value) -> Self {
        Self {
            code: TypeCode::Adverb(adverb),
            body: Some(FunctionBody::Adverb(Box::new(operand))),
        }
    }

    #[inline]
    pub fn type_code(&self) -> TypeCode {
        self.code
    }

    #[inline]
    pub fn body(&self) -> Option<&FunctionBody> {
        self.body.as_ref()
    }
}

/// A projection (`104`): a function with some of its arguments fixed. The first value is
/// the function, the remaining ones its arguments, where elided arguments are [`Value::Nil`].
#[derive(Debug, Clone, PartialEq)]
pub struct Projection {
    values: Vec<Value>,
}

impl Projection {
    pub fn new(values: Vec<Value>) -> Self {
        Self { values }
    }

    #[inline]
    pub fn values(&self) -> &[Value] {
        &self.values
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    #[inline]
    pub fn type_code(&self) -> TypeCode {
        TypeCode::Projection
    }
}
