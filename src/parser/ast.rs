// AST (Abstract Syntax Tree) definitions for the declaration parser

use super::position::Span;
use serde::Serialize;
use std::fmt;

/// Type of a declaration: the base keyword followed by any pointer markers,
/// e.g. `["char", "*", "*"]` for `char **`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(transparent)]
pub struct TypeDescriptor {
    pub qualifiers: Vec<String>,
}

impl TypeDescriptor {
    pub fn new(base: impl Into<String>) -> Self {
        TypeDescriptor {
            qualifiers: vec![base.into()],
        }
    }

    pub fn with_pointer(mut self) -> Self {
        self.qualifiers.push("*".to_string());
        self
    }

    pub fn base(&self) -> Option<&str> {
        self.qualifiers.first().map(String::as_str)
    }

    pub fn pointer_depth(&self) -> usize {
        self.qualifiers.iter().filter(|q| *q == "*").count()
    }
}

impl fmt::Display for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.qualifiers.join(","))
    }
}

/// Value types a [`AstNode::Constant`] can carry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ValueType {
    Int,
    UnsignedInt,
    Char,
    Float,
    String,
}

/// Literal payload of a constant
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum ConstValue {
    Int(i64),
    Float(f64),
    Text(String),
}

/// Operator kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum OpKind {
    Mul,
    Div,
    Add,
    Sub,
    UnarySub, // -x
    Ref,      // &x
    Deref,    // *x
    ArrayAcc, // x[i]
}

/// Operands of an [`AstNode::Operator`]
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Operands {
    Unary(Box<AstNode>),
    Binary(Box<AstNode>, Box<AstNode>),
}

/// A declared variable or function parameter
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Variable {
    pub name: String,
    pub var_type: TypeDescriptor,
    /// Reserved for initializers; the parser leaves it empty
    pub value: Option<Box<AstNode>>,
    pub span: Span,
}

impl Variable {
    pub fn new(name: impl Into<String>, var_type: TypeDescriptor, span: Span) -> Self {
        Variable {
            name: name.into(),
            var_type,
            value: None,
            span,
        }
    }
}

/// A function definition or prototype
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Function {
    pub name: String,
    pub return_type: TypeDescriptor,
    pub params: Vec<Variable>,
    pub body: Vec<AstNode>,
    pub span: Span,
}

/// AST nodes.
///
/// Only `Variable` and `Function` are produced today. The remaining variants
/// are part of the node set so that exhaustive matches keep compiling once
/// statement and expression parsing lands.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum AstNode {
    Variable(Variable),
    Function(Function),
    Constant {
        value_type: ValueType,
        value: ConstValue,
        span: Span,
    },
    Operator {
        op: OpKind,
        operands: Operands,
        span: Span,
    },
    Condition {
        condition: Box<AstNode>,
        body: Vec<AstNode>,
        span: Span,
    },
    WhileLoop {
        condition: Box<AstNode>,
        body: Vec<AstNode>,
        span: Span,
    },
    ForLoop {
        init: Box<AstNode>,
        condition: Box<AstNode>,
        increment: Box<AstNode>,
        body: Vec<AstNode>,
        span: Span,
    },
}

impl AstNode {
    /// Get the source span of this node
    pub fn span(&self) -> &Span {
        match self {
            AstNode::Variable(variable) => &variable.span,
            AstNode::Function(function) => &function.span,
            AstNode::Constant { span, .. } => span,
            AstNode::Operator { span, .. } => span,
            AstNode::Condition { span, .. } => span,
            AstNode::WhileLoop { span, .. } => span,
            AstNode::ForLoop { span, .. } => span,
        }
    }

    pub fn kind_name(&self) -> &'static str {
        match self {
            AstNode::Variable(_) => "Variable",
            AstNode::Function(_) => "Function",
            AstNode::Constant { .. } => "Constant",
            AstNode::Operator { .. } => "Operator",
            AstNode::Condition { .. } => "Condition",
            AstNode::WhileLoop { .. } => "WhileLoop",
            AstNode::ForLoop { .. } => "ForLoop",
        }
    }

    /// Declared name, for the variants that have one.
    pub fn name(&self) -> Option<&str> {
        match self {
            AstNode::Variable(variable) => Some(&variable.name),
            AstNode::Function(function) => Some(&function.name),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::position::Position;

    fn span() -> Span {
        Span::new(Position::new(1, 1), Position::new(1, 5))
    }

    #[test]
    fn test_type_descriptor() {
        let ty = TypeDescriptor::new("char").with_pointer().with_pointer();
        assert_eq!(ty.base(), Some("char"));
        assert_eq!(ty.pointer_depth(), 2);
        assert_eq!(ty.to_string(), "[char,*,*]");
    }

    #[test]
    fn test_node_accessors() {
        let node = AstNode::Variable(Variable::new("x", TypeDescriptor::new("int"), span()));
        assert_eq!(node.name(), Some("x"));
        assert_eq!(node.kind_name(), "Variable");
        assert_eq!(node.span(), &span());

        let constant = AstNode::Constant {
            value_type: ValueType::Int,
            value: ConstValue::Int(3),
            span: span(),
        };
        assert_eq!(constant.name(), None);
        assert_eq!(constant.kind_name(), "Constant");
    }
}
