//! Text and JSON renderings of tokens and declarations
//!
//! The token listing prints one `Token "<text>" (<Kind>) at (<start>, <end>)`
//! line per token. Declarations print as indented `Kind(...)` blocks:
//!
//! ```text
//! Function(
//!     name = foo
//!     return_type = [int]
//!     params = [
//!         Variable(
//!             name = a
//!             type = [int]
//!             value = None
//!         )
//!     ]
//!     body = []
//! )
//! ```

use crate::parser::ast::{AstNode, ConstValue, Operands, Variable};
use crate::parser::token::Token;
use serde::Serialize;

const INDENT: &str = "    ";

/// One line per token.
pub fn format_tokens(tokens: &[Token]) -> String {
    let mut out = String::new();
    for token in tokens {
        out.push_str(&token.to_string());
        out.push('\n');
    }
    out
}

/// Every node as an indented block.
pub fn format_declarations(nodes: &[AstNode]) -> String {
    let mut out = String::new();
    for node in nodes {
        write_node(&mut out, node, 0);
    }
    out
}

/// Pretty-printed JSON for any serializable front-end value.
pub fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(value)
}

/// One-line summary of a declaration, e.g. `fn foo(int a, char* s) -> int`.
pub fn outline(node: &AstNode) -> String {
    match node {
        AstNode::Variable(variable) => format!("var {}", describe_variable(variable)),
        AstNode::Function(function) => {
            let params: Vec<String> = function.params.iter().map(describe_variable).collect();
            format!(
                "fn {}({}) -> {}",
                function.name,
                params.join(", "),
                function.return_type.qualifiers.join("")
            )
        }
        other => other.kind_name().to_string(),
    }
}

fn describe_variable(variable: &Variable) -> String {
    format!("{} {}", variable.var_type.qualifiers.join(""), variable.name)
}

fn pad(out: &mut String, depth: usize) {
    for _ in 0..depth {
        out.push_str(INDENT);
    }
}

fn field(out: &mut String, depth: usize, name: &str, value: &str) {
    pad(out, depth);
    out.push_str(name);
    out.push_str(" = ");
    out.push_str(value);
    out.push('\n');
}

fn node_list(out: &mut String, depth: usize, name: &str, nodes: &[AstNode]) {
    if nodes.is_empty() {
        field(out, depth, name, "[]");
        return;
    }
    pad(out, depth);
    out.push_str(name);
    out.push_str(" = [\n");
    for node in nodes {
        write_node(out, node, depth + 1);
    }
    pad(out, depth);
    out.push_str("]\n");
}

fn boxed(out: &mut String, depth: usize, name: &str, node: &AstNode) {
    pad(out, depth);
    out.push_str(name);
    out.push_str(" =\n");
    write_node(out, node, depth + 1);
}

fn open(out: &mut String, depth: usize, kind: &str) {
    pad(out, depth);
    out.push_str(kind);
    out.push_str("(\n");
}

fn close(out: &mut String, depth: usize) {
    pad(out, depth);
    out.push_str(")\n");
}

fn write_variable(out: &mut String, variable: &Variable, depth: usize) {
    open(out, depth, "Variable");
    field(out, depth + 1, "name", &variable.name);
    field(out, depth + 1, "type", &variable.var_type.to_string());
    match &variable.value {
        Some(value) => boxed(out, depth + 1, "value", value),
        None => field(out, depth + 1, "value", "None"),
    }
    close(out, depth);
}

fn write_node(out: &mut String, node: &AstNode, depth: usize) {
    match node {
        AstNode::Variable(variable) => write_variable(out, variable, depth),
        AstNode::Function(function) => {
            open(out, depth, "Function");
            field(out, depth + 1, "name", &function.name);
            field(out, depth + 1, "return_type", &function.return_type.to_string());
            if function.params.is_empty() {
                field(out, depth + 1, "params", "[]");
            } else {
                pad(out, depth + 1);
                out.push_str("params = [\n");
                for param in &function.params {
                    write_variable(out, param, depth + 2);
                }
                pad(out, depth + 1);
                out.push_str("]\n");
            }
            node_list(out, depth + 1, "body", &function.body);
            close(out, depth);
        }
        AstNode::Constant {
            value_type, value, ..
        } => {
            open(out, depth, "Constant");
            field(out, depth + 1, "type", &format!("{:?}", value_type));
            let rendered = match value {
                ConstValue::Int(n) => n.to_string(),
                ConstValue::Float(x) => x.to_string(),
                ConstValue::Text(s) => format!("{:?}", s),
            };
            field(out, depth + 1, "value", &rendered);
            close(out, depth);
        }
        AstNode::Operator { op, operands, .. } => {
            open(out, depth, "Operator");
            field(out, depth + 1, "type", &format!("{:?}", op));
            match operands {
                Operands::Unary(arg) => boxed(out, depth + 1, "arg", arg),
                Operands::Binary(lhs, rhs) => {
                    boxed(out, depth + 1, "lhs", lhs);
                    boxed(out, depth + 1, "rhs", rhs);
                }
            }
            close(out, depth);
        }
        AstNode::Condition {
            condition, body, ..
        } => {
            open(out, depth, "Condition");
            boxed(out, depth + 1, "condition", condition);
            node_list(out, depth + 1, "body", body);
            close(out, depth);
        }
        AstNode::WhileLoop {
            condition, body, ..
        } => {
            open(out, depth, "WhileLoop");
            boxed(out, depth + 1, "condition", condition);
            node_list(out, depth + 1, "body", body);
            close(out, depth);
        }
        AstNode::ForLoop {
            init,
            condition,
            increment,
            body,
            ..
        } => {
            open(out, depth, "ForLoop");
            boxed(out, depth + 1, "init", init);
            boxed(out, depth + 1, "condition", condition);
            boxed(out, depth + 1, "increment", increment);
            node_list(out, depth + 1, "body", body);
            close(out, depth);
        }
    }
}
