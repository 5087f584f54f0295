//! Endpoint resolution: operation -> ordered candidate URLs.

use crate::types::{Operation, ParamValue};
use crate::{Error, ErrorContext, Result};
use std::collections::BTreeMap;

/// Ordered path templates per operation.
///
/// Templates may contain `{name}` placeholders filled from request parameters.
/// The upstream agent has been deployed under several path layouts, hence the
/// multiple candidates per operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndpointTable {
    paths: [Vec<String>; 6],
}

impl Default for EndpointTable {
    fn default() -> Self {
        let owned = |paths: &[&str]| paths.iter().map(|p| p.to_string()).collect::<Vec<_>>();
        Self {
            paths: [
                owned(&[
                    "/youtube/niche-scout",
                    "/api/youtube/niche-scout",
                    "/niche-scout",
                ]),
                owned(&[
                    "/youtube/blueprint",
                    "/api/youtube/blueprint",
                    "/blueprint",
                ]),
                owned(&[
                    "/youtube/workflow-result/{id}?type={type}",
                    "/api/youtube/workflow-result/{id}?type={type}",
                    "/workflow-result/{id}?type={type}",
                ]),
                owned(&["/youtube/workflow-history"]),
                owned(&["/youtube/scheduled-workflows"]),
                owned(&["/youtube/schedule-workflow"]),
            ],
        }
    }
}

impl EndpointTable {
    /// Replace the templates of one operation. The list must not be empty.
    pub fn with_paths<I, S>(mut self, operation: Operation, paths: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let paths: Vec<String> = paths.into_iter().map(Into::into).collect();
        if paths.is_empty() {
            return Err(Error::configuration_with_context(
                format!("no endpoint paths given for {operation}"),
                ErrorContext::new()
                    .with_field_path(format!("endpoints.{operation}"))
                    .with_source("endpoint_table"),
            ));
        }
        self.paths[operation.index()] = paths;
        Ok(self)
    }

    pub fn paths(&self, operation: Operation) -> &[String] {
        &self.paths[operation.index()]
    }

    /// Absolute candidate URLs for `operation` under `base`, in attempt order.
    ///
    /// Placeholders are filled percent-encoded; a missing parameter yields an
    /// empty segment.
    pub fn resolve(
        &self,
        operation: Operation,
        base: &str,
        vars: &BTreeMap<String, ParamValue>,
    ) -> Vec<String> {
        let base = base.trim_end_matches('/');
        self.paths(operation)
            .iter()
            .map(|template| format!("{}{}", base, fill(template, vars)))
            .collect()
    }
}

fn fill(template: &str, vars: &BTreeMap<String, ParamValue>) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(open) = rest.find('{') {
        let Some(close) = rest[open..].find('}') else {
            break;
        };
        out.push_str(&rest[..open]);
        let name = &rest[open + 1..open + close];
        if let Some(value) = vars.get(name) {
            out.push_str(&encode(&value.to_string()));
        }
        rest = &rest[open + close + 1..];
    }
    out.push_str(rest);
    out
}

/// Percent-encode for use in a path segment or query value.
pub(crate) fn encode(value: &str) -> String {
    // form encoding turns spaces into '+' and escapes literal '+', so every '+'
    // left in the output stands for a space
    url::form_urlencoded::byte_serialize(value.as_bytes())
        .collect::<String>()
        .replace('+', "%20")
}
