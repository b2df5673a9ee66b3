//! Closed-form evaluation of expression sub-trees.
//!
//! A small tree interpreter. It covers constants, record reads, conversions,
//! operators, conditionals, constructors and a fixed set of pure helper
//! calls. Lambda parameters are bound only while a lambda is invoked;
//! reading any other parameter is an error.

mod builtins;
mod ops;


use remoteq_core::{BinaryOp, Expr, Lambda, NewExpr, Parameter, TypeRef, UnaryOp, Value};

use crate::{Error, Result, TranslatorConfig};

#[derive(Debug)]
pub struct Evaluator {
    bindings: Vec<(Parameter, Value)>,
    depth: usize,
    recursion_limit: usize,
}

impl Default for Evaluator {
    fn default() -> Self {
        Self::new(&TranslatorConfig::default())
    }
}

impl Evaluator {
    pub fn new(config: &TranslatorConfig) -> Self {
        Self {
            bindings: Vec::new(),
            depth: 0,
            recursion_limit: config.recursion_limit,
        }
    }

    /// Bind `param` to `value` for every later evaluation.
    pub fn bind(mut self, param: Parameter, value: Value) -> Self {
        self.bindings.push((param, value));
        self
    }

    pub fn evaluate(&mut self, expr: &Expr) -> Result<Value> {
        if self.depth >= self.recursion_limit {
            return Err(Error::RecursionLimitExceeded);
        }
        self.depth += 1;
        let result = self.evaluate_node(expr);
        self.depth -= 1;
        result
    }

    fn evaluate_node(&mut self, expr: &Expr) -> Result<Value> {
        match expr {
            Expr::Constant { value, .. } => Ok(value.clone()),
            Expr::Parameter(param) => self.lookup(param),
            Expr::Member {
                target: Some(target),
                member,
                declaring_type,
                ..
            } => {
                let target = self.evaluate(target)?;
                builtins::read_member(&target, declaring_type, member)
            }
            Expr::Member {
                target: None,
                member,
                declaring_type,
                ..
            } => Err(Error::UnsupportedMethod {
                declaring_type: declaring_type.name(),
                method: member.clone(),
            }),
            Expr::Unary { op, operand, ty } => {
                let value = self.evaluate(operand)?;
                match op {
                    UnaryOp::Not => ops::not(value),
                    UnaryOp::Negate => ops::negate(value),
                    UnaryOp::Convert => ops::convert(value, ty),
                    UnaryOp::Quote => Ok(value),
                }
            }
            Expr::Binary {
                op,
                left,
                right,
                ty,
                ..
            } => self.binary(*op, left, right, ty),
            Expr::Call(call) => {
                let target = call
                    .target
                    .as_deref()
                    .map(|t| self.evaluate(t))
                    .transpose()?;
                let args = self.evaluate_all(&call.args)?;
                builtins::call(call, target, &args)
            }
            Expr::Lambda(_) => Err(Error::UnsupportedNodeKind("Lambda")),
            Expr::New(new) => self.construct(new),
            Expr::MemberInit { new, bindings } => {
                let mut record = self.construct(new)?;
                let Value::Record(fields) = &mut record else {
                    return Err(cannot_construct(&new.ty));
                };
                for binding in bindings {
                    let value = self.evaluate(&binding.expr)?;
                    fields.insert(binding.member.clone(), value);
                }
                Ok(record)
            }
            Expr::NewArray { items, .. } => self.evaluate_all(items).map(Value::List),
            Expr::ListInit { initializers, .. } => {
                let mut items = Vec::with_capacity(initializers.len());
                for init in initializers {
                    let mut args = self.evaluate_all(&init.args)?;
                    items.push(match args.len() {
                        1 => args.remove(0),
                        _ => Value::List(args),
                    });
                }
                Ok(Value::List(items))
            }
            Expr::Invoke { target, args, .. } => {
                let Some(lambda) = target.as_lambda() else {
                    return Err(Error::UnsupportedNodeKind("Invoke"));
                };
                let args = self.evaluate_all(args)?;
                self.invoke(lambda, args)
            }
            Expr::Conditional {
                test,
                if_true,
                if_false,
                ..
            } => match self.evaluate(test)? {
                Value::Bool(true) => self.evaluate(if_true),
                Value::Bool(false) => self.evaluate(if_false),
                other => Err(Error::InvalidArgument(format!(
                    "conditional test evaluated to `{}`",
                    other.runtime_type()
                ))),
            },
        }
    }

    /// Evaluate `lambda`'s body with its parameters bound to `args`.
    pub fn invoke(&mut self, lambda: &Lambda, args: Vec<Value>) -> Result<Value> {
        if lambda.params.len() != args.len() {
            return Err(Error::InvalidArgument(format!(
                "lambda takes {} arguments, {} given",
                lambda.params.len(),
                args.len()
            )));
        }
        let mark = self.bindings.len();
        self.bindings
            .extend(lambda.params.iter().cloned().zip(args));
        let result = self.evaluate(&lambda.body);
        self.bindings.truncate(mark);
        result
    }

    fn lookup(&self, param: &Parameter) -> Result<Value> {
        self.bindings
            .iter()
            .rev()
            .find(|(bound, _)| bound == param)
            .map(|(_, value)| value.clone())
            .ok_or_else(|| Error::UnboundParameter(param.display_name(0)))
    }

    fn evaluate_all(&mut self, exprs: &[Expr]) -> Result<Vec<Value>> {
        exprs.iter().map(|e| self.evaluate(e)).collect()
    }

    fn binary(&mut self, op: BinaryOp, left: &Expr, right: &Expr, ty: &TypeRef) -> Result<Value> {
        if matches!(op, BinaryOp::AndAlso | BinaryOp::OrElse) {
            let lhs = ops::truth(&self.evaluate(left)?)?;
            let short_circuit = match op {
                BinaryOp::AndAlso => !lhs,
                _ => lhs,
            };
            if short_circuit {
                return Ok(Value::Bool(lhs));
            }
            return ops::truth(&self.evaluate(right)?).map(Value::Bool);
        }

        let lhs = self.evaluate(left)?;
        let rhs = self.evaluate(right)?;
        ops::binary(op, lhs, rhs, ty)
    }

    /// Anonymous construction yields a record of the constructed members.
    fn construct(&mut self, new: &NewExpr) -> Result<Value> {
        let args = self.evaluate_all(&new.args)?;
        match &new.members {
            Some(names) if names.len() == args.len() => {
                Ok(Value::record(names.iter().cloned().zip(args)))
            }
            Some(names) => Err(Error::InvalidArgument(format!(
                "{} members named for {} constructor arguments",
                names.len(),
                args.len()
            ))),
            None if args.is_empty() => Ok(Value::record(Vec::<(String, Value)>::new())),
            None => Err(cannot_construct(&new.ty)),
        }
    }
}

fn cannot_construct(ty: &TypeRef) -> Error {
    Error::UnsupportedMethod {
        declaring_type: ty.name(),
        method: "new".to_string(),
    }
}
