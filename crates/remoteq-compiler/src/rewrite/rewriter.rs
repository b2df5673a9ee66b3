use remoteq_core::{
    ElementInit, Expr, Lambda, MemberBinding, MemberDescriptor, MemberLookup, MethodCall, NewExpr,
    Parameter, Schema, TypeRef, Value,
};
use tracing::warn;

use crate::{Error, Result, TranslatorConfig};

/// Rewrite `expr` from `source` to `target` element type.
pub fn rewrite(expr: &Expr, schema: &Schema, source: &TypeRef, target: &TypeRef) -> Result<Expr> {
    Rewriter::new(schema, source, target).rewrite(expr)
}

/// Type-substitution context for one rewrite.
#[derive(Debug)]
pub struct Rewriter<'a> {
    schema: &'a Schema,
    source: &'a TypeRef,
    target: &'a TypeRef,
    depth: usize,
    recursion_limit: usize,
}

impl<'a> Rewriter<'a> {
    pub fn new(schema: &'a Schema, source: &'a TypeRef, target: &'a TypeRef) -> Self {
        Self {
            schema,
            source,
            target,
            depth: 0,
            recursion_limit: TranslatorConfig::DEFAULT_RECURSION_LIMIT,
        }
    }

    pub fn recursion_limit(mut self, limit: usize) -> Self {
        self.recursion_limit = limit;
        self
    }

    pub fn rewrite(&mut self, expr: &Expr) -> Result<Expr> {
        if self.depth >= self.recursion_limit {
            return Err(Error::RecursionLimitExceeded);
        }
        self.depth += 1;
        let result = self.rewrite_node(expr);
        self.depth -= 1;
        result
    }

    fn rewrite_node(&mut self, expr: &Expr) -> Result<Expr> {
        Ok(match expr {
            Expr::Constant { value, ty } => {
                if let Value::Enum { type_name, member } = value {
                    self.enum_member(type_name, member)?;
                }
                Expr::Constant {
                    value: value.clone(),
                    ty: self.ty(ty),
                }
            }
            Expr::Parameter(param) => Expr::Parameter(self.param(param)),
            Expr::Member {
                target,
                member,
                declaring_type,
                ty,
            } => {
                let target = self.rewrite_boxed(target.as_deref())?;
                let declaring = match &target {
                    Some(t) => t.ty(),
                    None => self.ty(declaring_type),
                };
                let ty = match self.remapped(declaring_type, &declaring, member)? {
                    Some(descriptor) => descriptor.ty.clone(),
                    None => self.ty(ty),
                };
                Expr::Member {
                    target: target.map(Box::new),
                    member: member.clone(),
                    declaring_type: declaring,
                    ty,
                }
            }
            Expr::Unary { op, operand, ty } => Expr::Unary {
                op: *op,
                operand: Box::new(self.rewrite(operand)?),
                ty: self.ty(ty),
            },
            Expr::Binary {
                op,
                left,
                right,
                lifted_to_null,
                ty,
            } => Expr::Binary {
                op: *op,
                left: Box::new(self.rewrite(left)?),
                right: Box::new(self.rewrite(right)?),
                lifted_to_null: *lifted_to_null,
                ty: self.ty(ty),
            },
            Expr::Call(call) => Expr::Call(MethodCall {
                target: self.rewrite_boxed(call.target.as_deref())?.map(Box::new),
                method: call.method.clone(),
                declaring_type: self.ty(&call.declaring_type),
                args: self.rewrite_all(&call.args)?,
                ty: self.ty(&call.ty),
            }),
            Expr::Lambda(lambda) => Expr::Lambda(Lambda {
                params: lambda.params.iter().map(|p| self.param(p)).collect(),
                body: Box::new(self.rewrite(&lambda.body)?),
            }),
            Expr::New(new) => Expr::New(self.new_expr(new)?),
            Expr::MemberInit { new, bindings } => {
                let rewritten = self.new_expr(new)?;
                let mut out = Vec::with_capacity(bindings.len());
                for binding in bindings {
                    self.remapped(&new.ty, &rewritten.ty, &binding.member)?;
                    out.push(MemberBinding {
                        member: binding.member.clone(),
                        expr: self.rewrite(&binding.expr)?,
                    });
                }
                Expr::MemberInit {
                    new: rewritten,
                    bindings: out,
                }
            }
            Expr::NewArray {
                element_type,
                items,
            } => Expr::NewArray {
                element_type: self.ty(element_type),
                items: self.rewrite_all(items)?,
            },
            Expr::ListInit { new, initializers } => Expr::ListInit {
                new: self.new_expr(new)?,
                initializers: initializers
                    .iter()
                    .map(|init| {
                        Ok(ElementInit {
                            add_method: init.add_method.clone(),
                            args: self.rewrite_all(&init.args)?,
                        })
                    })
                    .collect::<Result<_>>()?,
            },
            Expr::Invoke { target, args, .. } => {
                warn!(
                    discarded = args.len(),
                    "invoke rewritten to its target expression; arguments are discarded"
                );
                self.rewrite(target)?
            }
            Expr::Conditional { .. } => return Err(Error::UnsupportedNodeKind("Conditional")),
        })
    }

    fn ty(&self, ty: &TypeRef) -> TypeRef {
        ty.substitute(self.source, self.target)
    }

    fn param(&self, param: &Parameter) -> Parameter {
        Parameter {
            name: param.name.clone(),
            ty: self.ty(&param.ty),
        }
    }

    fn rewrite_boxed(&mut self, expr: Option<&Expr>) -> Result<Option<Expr>> {
        expr.map(|e| self.rewrite(e)).transpose()
    }

    fn rewrite_all(&mut self, exprs: &[Expr]) -> Result<Vec<Expr>> {
        exprs.iter().map(|e| self.rewrite(e)).collect()
    }

    fn new_expr(&mut self, new: &NewExpr) -> Result<NewExpr> {
        let ty = self.ty(&new.ty);
        if let Some(members) = &new.members {
            for member in members {
                self.remapped(&new.ty, &ty, member)?;
            }
        }
        Ok(NewExpr {
            ty,
            args: self.rewrite_all(&new.args)?,
            members: new.members.clone(),
        })
    }

    /// Enum constants must name a registered member when the enum is known.
    fn enum_member(&self, type_name: &str, member: &str) -> Result<()> {
        match self.schema.enum_members(type_name) {
            Some(members) if !members.iter().any(|m| m == member) => {
                Err(Error::UnsupportedMemberMapping {
                    type_name: type_name.to_string(),
                    member: member.to_string(),
                })
            }
            _ => Ok(()),
        }
    }

    /// Look `member` up on `now` when the owning type changed from `was`.
    ///
    /// `None` when the type is unchanged or is not a schema entity.
    fn remapped(&self, was: &TypeRef, now: &TypeRef, member: &str) -> Result<Option<&'a MemberDescriptor>> {
        if was == now || !matches!(now.non_nullable(), TypeRef::Entity(_)) {
            return Ok(None);
        }
        match self.schema.lookup_member(now, member) {
            MemberLookup::Found(descriptor) => Ok(Some(descriptor)),
            MemberLookup::Missing => Err(Error::UnsupportedMemberMapping {
                type_name: now.non_nullable().name(),
                member: member.to_string(),
            }),
            MemberLookup::Ambiguous(_) => Err(Error::AmbiguousMemberMapping {
                type_name: now.non_nullable().name(),
                member: member.to_string(),
            }),
        }
    }
}
