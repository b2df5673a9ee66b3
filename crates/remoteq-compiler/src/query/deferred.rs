use remoteq_core::{Expr, Schema, TypeRef, Value};

use super::QuerySource;
use crate::rewrite::Rewriter;
use crate::{Error, Result};

/// One recorded operator: everything but the upstream argument.
#[derive(Clone, Debug, PartialEq)]
struct Operator {
    name: String,
    declaring_type: TypeRef,
    args: Vec<Expr>,
    ty: TypeRef,
}

/// A query authored against one element type and executed later against a
/// source that may expose a different, structurally compatible type.
#[derive(Clone, Debug, PartialEq)]
pub struct DeferredQuery {
    declared: TypeRef,
    operators: Vec<Operator>,
}

impl DeferredQuery {
    /// Record the operators of `chain`, outermost last.
    ///
    /// The chain root must have a query type; its element type is the
    /// declared type.
    pub fn from_chain(chain: &Expr) -> Result<Self> {
        let mut operators = Vec::new();
        let mut node = chain;
        while let Some(call) = node.as_call()
            && call.target.is_none()
            && call.args.first().is_some_and(|a| a.ty().is_queryable())
        {
            operators.push(Operator {
                name: call.method.clone(),
                declaring_type: call.declaring_type.clone(),
                args: call.args[1..].to_vec(),
                ty: call.ty.clone(),
            });
            node = &call.args[0];
        }
        operators.reverse();

        let root_ty = node.ty();
        let declared = root_ty
            .element_type()
            .cloned()
            .ok_or_else(|| Error::NotASequence(root_ty.clone()))?;
        Ok(Self {
            declared,
            operators,
        })
    }

    pub fn declared_type(&self) -> &TypeRef {
        &self.declared
    }

    pub fn operator_names(&self) -> impl Iterator<Item = &str> {
        self.operators.iter().map(|op| op.name.as_str())
    }

    /// Rebuild the chain on `root`, rewriting arguments to `target`.
    pub fn replay(&self, root: Expr, target: &TypeRef, schema: &Schema) -> Result<Expr> {
        let same = *target == self.declared;
        let mut rewriter = Rewriter::new(schema, &self.declared, target);

        let mut chain = root;
        for op in &self.operators {
            let mut args = Vec::with_capacity(op.args.len() + 1);
            args.push(chain);
            for arg in &op.args {
                args.push(if same {
                    arg.clone()
                } else {
                    rewriter.rewrite(arg)?
                });
            }
            let ty = op.ty.substitute(&self.declared, target);
            chain = Expr::static_call(op.declaring_type.clone(), op.name.clone(), args, ty);
        }
        Ok(chain)
    }

    /// Replay on `source` and execute there.
    pub fn attach(&self, source: &dyn QuerySource) -> Result<Value> {
        let chain = self.replay(source.root(), &source.element_type(), source.schema())?;
        source.execute(&chain)
    }
}
