use remoteq_core::{BinaryOp, Expr, Lambda, Parameter, TypeRef, UnaryOp, Value};

use super::MethodWriters;
use crate::literal::LiteralWriters;
use crate::{Error, Evaluator, Result, TranslatorConfig};

/// Lambda parameters visible while writing a body.
#[derive(Debug)]
struct Scope {
    params: Vec<Parameter>,
    /// Parameters of the outermost query lambda are not written.
    implicit: bool,
}

/// Writes expressions as protocol filter text.
///
/// Holds the lambda scope stack for one top-level `write`; create one per
/// operator argument or reuse it sequentially.
#[derive(Debug)]
pub struct ExprWriter<'a> {
    literals: &'a LiteralWriters,
    methods: &'a MethodWriters,
    config: &'a TranslatorConfig,
    scopes: Vec<Scope>,
    depth: usize,
}

impl<'a> ExprWriter<'a> {
    pub fn new(
        literals: &'a LiteralWriters,
        methods: &'a MethodWriters,
        config: &'a TranslatorConfig,
    ) -> Self {
        Self {
            literals,
            methods,
            config,
            scopes: Vec::new(),
            depth: 0,
        }
    }

    pub fn config(&self) -> &TranslatorConfig {
        self.config
    }

    pub fn write(&mut self, expr: &Expr) -> Result<String> {
        if self.depth >= self.config.recursion_limit {
            return Err(Error::RecursionLimitExceeded);
        }
        self.depth += 1;
        let result = self.write_node(expr);
        self.depth -= 1;
        result
    }

    fn write_node(&mut self, expr: &Expr) -> Result<String> {
        if let Expr::Call(call) = expr {
            if let Some(rule) = self.methods.find(call) {
                return (rule.write)(call, self);
            }
            return self.write_evaluated(expr);
        }

        if expr.as_lambda().is_none() && !self.is_open(expr) {
            return self.write_evaluated(expr);
        }

        match expr {
            Expr::Lambda(lambda) => {
                let implicit = self.scopes.is_empty();
                self.write_scoped(lambda, implicit)
            }
            Expr::Parameter(param) => self.write_parameter(param),
            Expr::Member {
                target: Some(target),
                member,
                ..
            } => self.write_member(target, member),
            Expr::Binary {
                op, left, right, ..
            } => self.write_binary(*op, left, right),
            Expr::Unary { op, operand, .. } => match op {
                UnaryOp::Convert | UnaryOp::Quote => self.write(operand),
                UnaryOp::Not => Ok(format!("not {}", self.write_unary_operand(operand)?)),
                UnaryOp::Negate => Ok(format!("-{}", self.write_unary_operand(operand)?)),
            },
            other => Err(Error::UnsupportedNodeKind(other.kind_name())),
        }
    }

    /// Write `lambda`'s body with its parameters in scope.
    ///
    /// Implicit parameters are omitted from member paths; named ones are
    /// written as their parameter name.
    pub fn write_scoped(&mut self, lambda: &Lambda, implicit: bool) -> Result<String> {
        self.scopes.push(Scope {
            params: lambda.params.clone(),
            implicit,
        });
        let result = self.write(&lambda.body);
        self.scopes.pop();
        result
    }

    /// Evaluate a closed sub-tree and write the result as a literal.
    pub fn write_evaluated(&mut self, expr: &Expr) -> Result<String> {
        let value = Evaluator::new(self.config).evaluate(expr)?;
        self.write_literal(&value, &expr.ty())
    }

    pub fn write_literal(&self, value: &Value, static_type: &TypeRef) -> Result<String> {
        self.literals.write(value, static_type)
    }

    /// Whether `expr` references a parameter of an enclosing lambda.
    fn is_open(&self, expr: &Expr) -> bool {
        expr.free_parameters()
            .into_iter()
            .any(|p| self.resolve(p).is_some())
    }

    /// Innermost scope binding `param`, with the parameter's position.
    fn resolve(&self, param: &Parameter) -> Option<(&Scope, usize)> {
        self.scopes.iter().rev().find_map(|scope| {
            scope
                .params
                .iter()
                .position(|p| p == param)
                .map(|index| (scope, index))
        })
    }

    fn is_implicit(&self, expr: &Expr) -> bool {
        match expr.unwrap_conversions() {
            Expr::Parameter(param) => self.resolve(param).is_some_and(|(scope, _)| scope.implicit),
            _ => false,
        }
    }

    fn write_parameter(&self, param: &Parameter) -> Result<String> {
        match self.resolve(param) {
            Some((scope, _)) if scope.implicit => Ok("$it".to_string()),
            Some((_, index)) => Ok(param.display_name(index)),
            None => Err(Error::UnboundParameter(param.display_name(0))),
        }
    }

    fn write_member(&mut self, target: &Expr, member: &str) -> Result<String> {
        let target_ty = target.ty();

        if target_ty.is_string() && member == "Length" {
            return Ok(format!("length({})", self.write(target)?));
        }
        if matches!(
            target_ty.non_nullable(),
            TypeRef::DateTime | TypeRef::DateTimeOffset
        ) && matches!(
            member,
            "Year" | "Month" | "Day" | "Hour" | "Minute" | "Second"
        ) {
            return Ok(format!(
                "{}({})",
                member.to_ascii_lowercase(),
                self.write(target)?
            ));
        }
        if let TypeRef::Nullable(_) = target_ty {
            match member {
                "Value" => return self.write(target),
                "HasValue" => return Ok(format!("{} ne null", self.write(target)?)),
                _ => {}
            }
        }

        if self.is_implicit(target) {
            return Ok(member.to_string());
        }
        Ok(format!("{}/{member}", self.write(target)?))
    }

    fn write_binary(&mut self, op: BinaryOp, left: &Expr, right: &Expr) -> Result<String> {
        let lhs = self.write_operand(op, left, false)?;
        let rhs = self.write_operand(op, right, true)?;
        Ok(format!("{lhs} {} {rhs}", keyword(op)))
    }

    fn write_operand(&mut self, parent: BinaryOp, operand: &Expr, right: bool) -> Result<String> {
        let text = self.write(operand)?;
        let needs_parens = match self.grouping(operand) {
            Some(child) => {
                let (p, c) = (precedence(parent), precedence(child));
                c < p
                    || (c == p && is_comparison(parent))
                    || (right && c == p && !(child == parent && associative(parent)))
            }
            None => false,
        };
        Ok(if needs_parens { format!("({text})") } else { text })
    }

    /// Operator of `expr` when it is written as a binary expression.
    fn grouping(&self, expr: &Expr) -> Option<BinaryOp> {
        match expr.unwrap_conversions() {
            Expr::Binary { op, .. } if self.is_open(expr) => Some(*op),
            Expr::Call(call) if call.method == "Equals" => Some(BinaryOp::Equal),
            Expr::Member {
                target: Some(target),
                member,
                ..
            } if member == "HasValue"
                && matches!(target.ty(), TypeRef::Nullable(_))
                && self.is_open(expr) =>
            {
                Some(BinaryOp::NotEqual)
            }
            _ => None,
        }
    }

    fn write_unary_operand(&mut self, operand: &Expr) -> Result<String> {
        let text = self.write(operand)?;
        Ok(match self.grouping(operand) {
            Some(_) => format!("({text})"),
            None => text,
        })
    }
}

fn keyword(op: BinaryOp) -> &'static str {
    match op {
        BinaryOp::AndAlso => "and",
        BinaryOp::OrElse => "or",
        BinaryOp::Equal => "eq",
        BinaryOp::NotEqual => "ne",
        BinaryOp::GreaterThan => "gt",
        BinaryOp::GreaterThanOrEqual => "ge",
        BinaryOp::LessThan => "lt",
        BinaryOp::LessThanOrEqual => "le",
        BinaryOp::Add => "add",
        BinaryOp::Subtract => "sub",
        BinaryOp::Multiply => "mul",
        BinaryOp::Divide => "div",
        BinaryOp::Modulo => "mod",
    }
}

fn precedence(op: BinaryOp) -> u8 {
    match op {
        BinaryOp::OrElse => 1,
        BinaryOp::AndAlso => 2,
        BinaryOp::Equal
        | BinaryOp::NotEqual
        | BinaryOp::GreaterThan
        | BinaryOp::GreaterThanOrEqual
        | BinaryOp::LessThan
        | BinaryOp::LessThanOrEqual => 3,
        BinaryOp::Add | BinaryOp::Subtract => 4,
        BinaryOp::Multiply | BinaryOp::Divide | BinaryOp::Modulo => 5,
    }
}

/// Comparisons do not chain; a comparison operand of one is grouped.
fn is_comparison(op: BinaryOp) -> bool {
    precedence(op) == 3
}

fn associative(op: BinaryOp) -> bool {
    matches!(
        op,
        BinaryOp::AndAlso | BinaryOp::OrElse | BinaryOp::Add | BinaryOp::Multiply
    )
}
