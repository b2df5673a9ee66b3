//! Method-call writers.
//!
//! An ordered rule list; the first rule whose `can_handle` accepts a call
//! writes it. Calls no rule accepts are evaluated by the writer and emitted
//! as literals.

use remoteq_core::{ENUMERABLE_CLASS, Expr, Lambda, MATH_CLASS, MethodCall, Parameter, TypeRef};

use super::ExprWriter;
use crate::{Error, Result};

pub type CanHandleFn = fn(&MethodCall) -> bool;
pub type MethodWriteFn = fn(&MethodCall, &mut ExprWriter<'_>) -> Result<String>;

#[derive(Clone, Copy, Debug)]
pub struct MethodRule {
    pub name: &'static str,
    pub can_handle: CanHandleFn,
    pub write: MethodWriteFn,
}

impl MethodRule {
    pub const fn new(name: &'static str, can_handle: CanHandleFn, write: MethodWriteFn) -> Self {
        Self {
            name,
            can_handle,
            write,
        }
    }
}

#[derive(Clone, Debug)]
pub struct MethodWriters {
    rules: Vec<MethodRule>,
}

impl Default for MethodWriters {
    fn default() -> Self {
        Self::empty()
            .with_rule(MethodRule::new("substringof", is_string_contains, write_substringof))
            .with_rule(MethodRule::new("startswith", is_starts_with, write_starts_with))
            .with_rule(MethodRule::new("endswith", is_ends_with, write_ends_with))
            .with_rule(MethodRule::new("indexof", is_index_of, write_index_of))
            .with_rule(MethodRule::new("replace", is_replace, write_replace))
            .with_rule(MethodRule::new("substring", is_substring, write_substring))
            .with_rule(MethodRule::new("tolower", is_to_lower, write_to_lower))
            .with_rule(MethodRule::new("toupper", is_to_upper, write_to_upper))
            .with_rule(MethodRule::new("trim", is_trim, write_trim))
            .with_rule(MethodRule::new("math", is_math, write_math))
            .with_rule(MethodRule::new("any-normalize", is_bare_any, write_bare_any))
            .with_rule(MethodRule::new("quantifier", is_quantifier, write_quantifier))
            .with_rule(MethodRule::new("equals", is_equals, write_equals))
    }
}

impl MethodWriters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn empty() -> Self {
        Self { rules: Vec::new() }
    }

    /// Append a rule after the existing ones.
    pub fn with_rule(mut self, rule: MethodRule) -> Self {
        self.rules.push(rule);
        self
    }

    /// Insert a rule ahead of the existing ones.
    pub fn with_rule_first(mut self, rule: MethodRule) -> Self {
        self.rules.insert(0, rule);
        self
    }

    pub fn find(&self, call: &MethodCall) -> Option<&MethodRule> {
        self.rules.iter().find(|rule| (rule.can_handle)(call))
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.rules.iter().map(|rule| rule.name)
    }
}

// ============================================================================
// String functions
// ============================================================================

fn is_string_method(call: &MethodCall, names: &[&str], arity: &[usize]) -> bool {
    call.target.is_some()
        && call.declaring_type.is_string()
        && names.contains(&call.method.as_str())
        && arity.contains(&call.args.len())
}

fn is_string_contains(call: &MethodCall) -> bool {
    is_string_method(call, &["Contains"], &[1])
}

fn is_starts_with(call: &MethodCall) -> bool {
    is_string_method(call, &["StartsWith"], &[1])
}

fn is_ends_with(call: &MethodCall) -> bool {
    is_string_method(call, &["EndsWith"], &[1])
}

fn is_index_of(call: &MethodCall) -> bool {
    is_string_method(call, &["IndexOf"], &[1])
}

fn is_replace(call: &MethodCall) -> bool {
    is_string_method(call, &["Replace"], &[2])
}

fn is_substring(call: &MethodCall) -> bool {
    is_string_method(call, &["Substring"], &[1, 2])
}

fn is_to_lower(call: &MethodCall) -> bool {
    is_string_method(call, &["ToLower", "ToLowerInvariant"], &[0])
}

fn is_to_upper(call: &MethodCall) -> bool {
    is_string_method(call, &["ToUpper", "ToUpperInvariant"], &[0])
}

fn is_trim(call: &MethodCall) -> bool {
    is_string_method(call, &["Trim"], &[0])
}

fn target(call: &MethodCall) -> Result<&Expr> {
    call.target
        .as_deref()
        .ok_or_else(|| Error::InvalidArgument(format!("`{}` needs a target", call.method)))
}

/// `name(target, args..)`
fn write_function(name: &str, call: &MethodCall, writer: &mut ExprWriter<'_>) -> Result<String> {
    let mut parts = vec![writer.write(target(call)?)?];
    for arg in &call.args {
        parts.push(writer.write(arg)?);
    }
    Ok(format!("{name}({})", parts.join(", ")))
}

/// Argument first, then the searched string.
fn write_substringof(call: &MethodCall, writer: &mut ExprWriter<'_>) -> Result<String> {
    let needle = writer.write(&call.args[0])?;
    let haystack = writer.write(target(call)?)?;
    Ok(format!("substringof({needle}, {haystack})"))
}

fn write_starts_with(call: &MethodCall, writer: &mut ExprWriter<'_>) -> Result<String> {
    write_function("startswith", call, writer)
}

fn write_ends_with(call: &MethodCall, writer: &mut ExprWriter<'_>) -> Result<String> {
    write_function("endswith", call, writer)
}

fn write_index_of(call: &MethodCall, writer: &mut ExprWriter<'_>) -> Result<String> {
    write_function("indexof", call, writer)
}

fn write_replace(call: &MethodCall, writer: &mut ExprWriter<'_>) -> Result<String> {
    write_function("replace", call, writer)
}

fn write_substring(call: &MethodCall, writer: &mut ExprWriter<'_>) -> Result<String> {
    write_function("substring", call, writer)
}

fn write_to_lower(call: &MethodCall, writer: &mut ExprWriter<'_>) -> Result<String> {
    write_function("tolower", call, writer)
}

fn write_to_upper(call: &MethodCall, writer: &mut ExprWriter<'_>) -> Result<String> {
    write_function("toupper", call, writer)
}

fn write_trim(call: &MethodCall, writer: &mut ExprWriter<'_>) -> Result<String> {
    write_function("trim", call, writer)
}

// ============================================================================
// Math
// ============================================================================

fn is_math(call: &MethodCall) -> bool {
    call.args.len() == 1
        && ["Floor", "Ceiling", "Round"]
            .iter()
            .any(|m| call.is_static(MATH_CLASS, m))
}

fn write_math(call: &MethodCall, writer: &mut ExprWriter<'_>) -> Result<String> {
    let arg = writer.write(&call.args[0])?;
    Ok(format!("{}({arg})", call.method.to_ascii_lowercase()))
}

// ============================================================================
// Quantifiers
// ============================================================================

fn is_bare_any(call: &MethodCall) -> bool {
    call.args.len() == 1 && call.is_static(ENUMERABLE_CLASS, "Any")
}

/// `Any(source)` becomes `Any(source, Param_0 => true)` and is written again.
fn write_bare_any(call: &MethodCall, writer: &mut ExprWriter<'_>) -> Result<String> {
    let source = &call.args[0];
    let source_ty = source.ty();
    let element = source_ty
        .element_type()
        .ok_or_else(|| Error::NotASequence(source_ty.clone()))?;

    let param = Parameter::unnamed(element.clone());
    let predicate = Lambda::new(vec![param], Expr::constant(true));
    let normalized = Expr::static_call(
        call.declaring_type.clone(),
        call.method.clone(),
        vec![source.clone(), predicate.into()],
        call.ty.clone(),
    );
    writer.write(&normalized)
}

fn is_quantifier(call: &MethodCall) -> bool {
    call.args.len() == 2
        && (call.is_static(ENUMERABLE_CLASS, "Any") || call.is_static(ENUMERABLE_CLASS, "All"))
}

/// `source/any(var: body)`
fn write_quantifier(call: &MethodCall, writer: &mut ExprWriter<'_>) -> Result<String> {
    let predicate = call.args[1].as_lambda().ok_or_else(|| {
        Error::InvalidArgument(format!("`{}` predicate must be a lambda", call.method))
    })?;
    let [param] = predicate.params.as_slice() else {
        return Err(Error::InvalidArgument(format!(
            "`{}` predicate must take one parameter",
            call.method
        )));
    };

    let source = writer.write(&call.args[0])?;
    let body = writer.write_scoped(predicate, false)?;
    Ok(format!(
        "{source}/{}({}: {body})",
        call.method.to_ascii_lowercase(),
        param.display_name(0)
    ))
}

// ============================================================================
// Equality
// ============================================================================

fn is_equals(call: &MethodCall) -> bool {
    call.method == "Equals"
        && match call.target {
            Some(_) => call.args.len() == 1,
            None => call.args.len() == 2 && matches!(call.declaring_type, TypeRef::Class(_)),
        }
}

fn write_equals(call: &MethodCall, writer: &mut ExprWriter<'_>) -> Result<String> {
    let (left, right) = match call.target.as_deref() {
        Some(target) => (target, &call.args[0]),
        None => (&call.args[0], &call.args[1]),
    };
    let lhs = writer.write(left)?;
    let rhs = writer.write(right)?;
    Ok(format!("{lhs} eq {rhs}"))
}
