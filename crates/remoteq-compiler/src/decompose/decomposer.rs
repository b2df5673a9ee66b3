use remoteq_core::{Expr, MethodCall, Value};
use tracing::trace;

use super::RemoteDataParameter;
use super::projection::select_list;
use crate::emit::{ExprWriter, MethodWriters};
use crate::literal::LiteralWriters;
use crate::{Error, Evaluator, Result, TranslatorConfig};

const SINGLE_HINT: &str =
    "use Count() to check for exactly one match, then First() or FirstOrDefault()";
const LAST_HINT: &str =
    "reverse the order with OrderByDescending(), then use First() or FirstOrDefault()";

/// Unwinds an operator chain into a [`RemoteDataParameter`].
///
/// Upstream operators are applied before downstream ones, so the model
/// changes in source order.
#[derive(Debug)]
pub struct Decomposer<'a> {
    writer: ExprWriter<'a>,
    config: &'a TranslatorConfig,
    depth: usize,
}

impl<'a> Decomposer<'a> {
    pub fn new(
        literals: &'a LiteralWriters,
        methods: &'a MethodWriters,
        config: &'a TranslatorConfig,
    ) -> Self {
        Self {
            writer: ExprWriter::new(literals, methods, config),
            config,
            depth: 0,
        }
    }

    /// Decompose `chain` into a fresh parameter model.
    pub fn decompose(mut self, chain: &Expr) -> Result<RemoteDataParameter> {
        let mut param = RemoteDataParameter::new();
        self.build(chain, &mut param)?;
        Ok(param)
    }

    /// Apply `node` and everything upstream of it to `param`.
    ///
    /// A node that is not an operator call ends the chain.
    pub fn build(&mut self, node: &Expr, param: &mut RemoteDataParameter) -> Result<()> {
        let Some(call) = as_operator(node) else {
            return Ok(());
        };

        let operator = call.method.as_str();
        match operator {
            "Single" | "SingleOrDefault" => return Err(unsupported(operator, SINGLE_HINT)),
            "Last" | "LastOrDefault" => return Err(unsupported(operator, LAST_HINT)),
            _ => {}
        }

        if self.depth >= self.config.recursion_limit {
            return Err(Error::RecursionLimitExceeded);
        }
        self.depth += 1;
        let upstream = self.build(&call.args[0], param);
        self.depth -= 1;
        upstream?;

        trace!(operator, "applying query operator");
        match operator {
            "Where" => {
                let predicate = self.write_arg(call, 1)?;
                param.and_filter(predicate);
            }
            "First" | "FirstOrDefault" => {
                self.optional_predicate(call, param)?;
                param.take = Some("1".to_string());
                param.executor = operator.to_string();
            }
            "Count" | "LongCount" | "Any" => {
                self.optional_predicate(call, param)?;
                param.executor = operator.to_string();
            }
            "Select" => {
                if param.select().is_some() {
                    return Err(Error::UnsupportedProjection(
                        "a query can be projected only once".to_string(),
                    ));
                }
                let selector = arg(call, 1)?.as_lambda().ok_or_else(|| {
                    Error::UnsupportedProjection("selector is not a lambda".to_string())
                })?;
                param.set_select(select_list(selector)?)?;
            }
            "OrderBy" | "ThenBy" => {
                let key = self.write_arg(call, 1)?;
                param.order_by.push(key);
            }
            "OrderByDescending" | "ThenByDescending" => {
                let key = self.write_arg(call, 1)?;
                param.order_by.push(format!("{key} desc"));
            }
            "Take" => param.take = Some(self.write_arg(call, 1)?),
            "Skip" => param.skip = Some(self.write_arg(call, 1)?),
            "Expand" => {
                let path = self.expand_path(call)?;
                param.expand = Some(match param.expand.take() {
                    Some(existing) if self.config.combine_expand => format!("{existing},{path}"),
                    _ => path,
                });
            }
            _ => return Err(unsupported(operator, "unrecognized query operator")),
        }
        Ok(())
    }

    fn write_arg(&mut self, call: &MethodCall, index: usize) -> Result<String> {
        self.writer.write(arg(call, index)?)
    }

    /// A terminal operator's predicate filters like `Where`.
    fn optional_predicate(&mut self, call: &MethodCall, param: &mut RemoteDataParameter) -> Result<()> {
        if call.args.len() > 1 {
            let predicate = self.write_arg(call, 1)?;
            param.and_filter(predicate);
        }
        Ok(())
    }

    fn expand_path(&self, call: &MethodCall) -> Result<String> {
        match Evaluator::new(self.config).evaluate(arg(call, 1)?)? {
            Value::String(path) => Ok(path),
            other => Err(Error::InvalidArgument(format!(
                "expand path must be a string, found `{}`",
                other.runtime_type()
            ))),
        }
    }
}

/// Operator calls are static, with the upstream query as first argument.
fn as_operator(node: &Expr) -> Option<&MethodCall> {
    let call = node.as_call()?;
    let upstream = call.args.first()?;
    (call.target.is_none() && upstream.ty().is_queryable()).then_some(call)
}

fn arg(call: &MethodCall, index: usize) -> Result<&Expr> {
    call.args.get(index).ok_or_else(|| {
        Error::InvalidArgument(format!(
            "`{}` expects an argument at position {index}",
            call.method
        ))
    })
}

fn unsupported(operator: &str, hint: &'static str) -> Error {
    Error::UnsupportedOperator {
        operator: operator.to_string(),
        hint,
    }
}
