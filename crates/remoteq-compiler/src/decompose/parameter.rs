//! Query parameter model and URI rendering.

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Characters left as-is in an encoded `$filter`.
const FILTER: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Accumulated query options for one logical query.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteDataParameter {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter: Option<String>,
    /// Sort keys, most significant first.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub order_by: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) select: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skip: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub take: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expand: Option<String>,
    /// Terminal operator name, empty when the query returns a sequence.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub executor: String,
}

impl RemoteDataParameter {
    pub fn new() -> Self {
        Self::default()
    }

    /// AND a clause into the filter: `(existing) and (clause)`.
    pub fn and_filter(&mut self, clause: impl Into<String>) {
        let clause = clause.into();
        self.filter = Some(match self.filter.take() {
            None => clause,
            Some(existing) => format!("({existing}) and ({clause})"),
        });
    }

    pub fn select(&self) -> Option<&str> {
        self.select.as_deref()
    }

    /// Set the projection. A query projects at most once.
    pub fn set_select(&mut self, select: impl Into<String>) -> Result<()> {
        if self.select.is_some() {
            return Err(Error::UnsupportedProjection(
                "a query can be projected only once".to_string(),
            ));
        }
        self.select = Some(select.into());
        Ok(())
    }

    pub fn is_empty(&self) -> bool {
        self.filter.is_none()
            && self.select.is_none()
            && self.skip.is_none()
            && self.take.is_none()
            && self.order_by.is_empty()
            && self.expand.is_none()
    }

    /// Render the query string with `$filter` percent-encoded.
    pub fn build_uri(&self) -> String {
        self.render(true)
    }

    /// Render the query string with every value verbatim.
    pub fn build_uri_unencoded(&self) -> String {
        self.render(false)
    }

    pub(crate) fn render(&self, encode_filter: bool) -> String {
        let mut parts: Vec<String> = Vec::new();

        if let Some(filter) = non_empty(&self.filter) {
            let value = if encode_filter {
                utf8_percent_encode(filter, FILTER).to_string()
            } else {
                filter.to_string()
            };
            parts.push(format!("$filter={value}"));
        }
        let verbatim = [
            ("$select", non_empty(&self.select)),
            ("$skip", non_empty(&self.skip)),
            ("$top", non_empty(&self.take)),
        ];
        for (name, value) in verbatim {
            if let Some(value) = value {
                parts.push(format!("{name}={value}"));
            }
        }
        if !self.order_by.is_empty() {
            parts.push(format!("$orderby={}", self.order_by.join(",")));
        }
        if let Some(expand) = non_empty(&self.expand) {
            parts.push(format!("$expand={expand}"));
        }

        parts.join("&")
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}
