//! `$select` lists from selector lambdas.
//!
//! Only projections that keep source member names are expressible: a single
//! member (`c => c.Name`) or a construction whose every member name is read
//! from the source (`c => new { c.Name, c.Age }`).

use remoteq_core::{Expr, Lambda, Parameter};

use crate::{Error, Result};

pub(super) fn select_list(selector: &Lambda) -> Result<String> {
    let [param] = selector.params.as_slice() else {
        return Err(rejected("selector must take exactly one parameter"));
    };

    match selector.body.unwrap_conversions() {
        Expr::Member {
            target: Some(target),
            member,
            ..
        } => {
            if is_param(target, param) {
                Ok(member.clone())
            } else {
                Err(rejected("nested member paths cannot be selected"))
            }
        }
        Expr::New(new) => {
            let Some(names) = &new.members else {
                return Err(rejected("positional constructors cannot be selected"));
            };
            constructed(names.iter().map(String::as_str), new.args.iter(), param)
        }
        Expr::MemberInit { new, bindings } => constructed(
            bindings.iter().map(|b| b.member.as_str()),
            new.args.iter().chain(bindings.iter().map(|b| &b.expr)),
            param,
        ),
        Expr::Parameter(_) => Err(rejected("selecting the element itself selects nothing")),
        other => Err(rejected(&format!("`{}` cannot be selected", other.kind_name()))),
    }
}

/// Every constructed name must be a source member read by the arguments.
fn constructed<'e>(
    names: impl Iterator<Item = &'e str>,
    args: impl Iterator<Item = &'e Expr>,
    param: &Parameter,
) -> Result<String> {
    let mut referenced: Vec<&str> = Vec::new();
    for arg in args {
        collect_members(arg, param, &mut referenced);
    }

    let mut selected = Vec::new();
    for name in names {
        if !referenced.contains(&name) {
            return Err(rejected(&format!(
                "`{name}` is not a member read from the source; renaming is not supported"
            )));
        }
        selected.push(name);
    }
    Ok(selected.join(","))
}

fn collect_members<'e>(expr: &'e Expr, param: &Parameter, out: &mut Vec<&'e str>) {
    if let Expr::Member {
        target: Some(target),
        member,
        ..
    } = expr
        && is_param(target, param)
    {
        out.push(member);
    }
    for child in expr.children() {
        collect_members(child, param, out);
    }
}

fn is_param(expr: &Expr, param: &Parameter) -> bool {
    matches!(expr.unwrap_conversions(), Expr::Parameter(p) if p == param)
}

fn rejected(reason: &str) -> Error {
    Error::UnsupportedProjection(reason.to_string())
}
