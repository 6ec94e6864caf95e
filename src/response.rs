// Response interpretation: maps what came back from the service for one
// request to a typed success or an `OperationError`.
//
// Status codes with an operation-specific meaning live in one ordered table
// per operation. The first matching row wins, and the tables are consulted
// before the generic "not a 2xx" fallback.

use crate::error::{DomainError, OperationError};
use crate::request::AliasRequest;
use serde::Deserialize;
use tracing::debug;

pub const CREATE_FAILED: &str = "Failed to shorten URL";
pub const CREATE_NETWORK: &str = "Network error, please try again";
pub const RENAME_FAILED: &str = "Failed to update alias";
pub const RENAME_BUSY: &str = "Alias update problem. Please try again later.";
pub const DELETE_FAILED: &str = "Failed to delete URL";
pub const DELETE_BUSY: &str = "Alias deletion problem. Please try again later.";
pub const TAB_NETWORK: &str = "Network error. Please check your connection.";
pub const RESOLVE_NO_TARGET: &str = "No redirect URL found in response";
pub const RESOLVE_FAILED: &str = "Redirect error";

/// Raw result of one dispatched request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// No response was received. Holds the transport's error text.
    Transport(String),
    Response { status: u16, body: String },
}

impl Outcome {
    pub fn response(status: u16, body: impl Into<String>) -> Self {
        Outcome::Response {
            status,
            body: body.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Success {
    Created { alias: String },
    Resolved { target: String },
    Renamed { current: String, new: String },
    Deleted { alias: String },
}

#[derive(Debug, Clone, Copy)]
enum Rule {
    AliasTaken,
    SameAlias,
    NotFound,
    Conflict,
    Busy(&'static str),
}

const CREATE_RULES: &[(u16, Rule)] = &[(409, Rule::AliasTaken)];

const RENAME_RULES: &[(u16, Rule)] = &[
    (400, Rule::SameAlias),
    (404, Rule::NotFound),
    (409, Rule::Conflict),
    (500, Rule::Busy(RENAME_BUSY)),
];

const DELETE_RULES: &[(u16, Rule)] = &[(404, Rule::NotFound), (500, Rule::Busy(DELETE_BUSY))];

#[derive(Deserialize)]
struct CreatedBody {
    #[serde(default)]
    alias: Option<String>,
}

#[derive(Deserialize)]
struct ResolvedBody {
    #[serde(default)]
    url: Option<String>,
}

/// Interpret `outcome` as the reply to `request`.
pub fn interpret(request: &AliasRequest, outcome: Outcome) -> Result<Success, OperationError> {
    match request {
        AliasRequest::Create { .. } => interpret_create(outcome),
        AliasRequest::Resolve { .. } => interpret_resolve(outcome),
        AliasRequest::Rename { current, new } => interpret_rename(current, new, outcome),
        AliasRequest::Delete { alias } => interpret_delete(alias, outcome),
    }
}

fn interpret_create(outcome: Outcome) -> Result<Success, OperationError> {
    let (status, body) = match outcome {
        Outcome::Transport(_) => return Err(OperationError::network(CREATE_NETWORK)),
        Outcome::Response { status, body } => (status, body),
    };
    if let Some(rule) = lookup(CREATE_RULES, status) {
        return Err(rule_error(rule, "", ""));
    }
    if !is_success(status) {
        debug!(status, body = %body, "create rejected");
        return Err(OperationError::service(CREATE_FAILED));
    }
    // An unreadable success body is reported like a dropped connection.
    let parsed: CreatedBody =
        serde_json::from_str(&body).map_err(|_| OperationError::network(CREATE_NETWORK))?;
    Ok(Success::Created {
        alias: parsed.alias.unwrap_or_default(),
    })
}

/// Only the body decides: a non-empty `url` field is a success whatever
/// the status code says.
fn interpret_resolve(outcome: Outcome) -> Result<Success, OperationError> {
    let body = match outcome {
        Outcome::Transport(message) if message.trim().is_empty() => {
            return Err(OperationError::network(RESOLVE_FAILED))
        }
        Outcome::Transport(message) => return Err(OperationError::Network(message)),
        Outcome::Response { body, .. } => body,
    };
    let target = serde_json::from_str::<ResolvedBody>(&body)
        .ok()
        .and_then(|parsed| parsed.url)
        .filter(|url| !url.is_empty());
    match target {
        Some(target) => Ok(Success::Resolved { target }),
        None => Err(OperationError::service(RESOLVE_NO_TARGET)),
    }
}

fn interpret_rename(current: &str, new: &str, outcome: Outcome) -> Result<Success, OperationError> {
    let (status, body) = match outcome {
        Outcome::Transport(_) => return Err(OperationError::network(TAB_NETWORK)),
        Outcome::Response { status, body } => (status, body),
    };
    if let Some(rule) = lookup(RENAME_RULES, status) {
        return Err(rule_error(rule, current, new));
    }
    if !is_success(status) {
        return Err(OperationError::service(body_or(body, RENAME_FAILED)));
    }
    Ok(Success::Renamed {
        current: current.to_string(),
        new: new.to_string(),
    })
}

fn interpret_delete(alias: &str, outcome: Outcome) -> Result<Success, OperationError> {
    let (status, body) = match outcome {
        Outcome::Transport(_) => return Err(OperationError::network(TAB_NETWORK)),
        Outcome::Response { status, body } => (status, body),
    };
    if let Some(rule) = lookup(DELETE_RULES, status) {
        return Err(rule_error(rule, alias, ""));
    }
    if !is_success(status) {
        return Err(OperationError::service(body_or(body, DELETE_FAILED)));
    }
    Ok(Success::Deleted {
        alias: alias.to_string(),
    })
}

fn lookup(table: &[(u16, Rule)], status: u16) -> Option<Rule> {
    table
        .iter()
        .find(|(code, _)| *code == status)
        .map(|(_, rule)| *rule)
}

/// `subject` is the alias the request acts on, `replacement` the alias a
/// rename asks for.
fn rule_error(rule: Rule, subject: &str, replacement: &str) -> OperationError {
    match rule {
        Rule::AliasTaken => DomainError::AliasTaken.into(),
        Rule::SameAlias => DomainError::SameAlias.into(),
        Rule::NotFound => DomainError::NotFound(subject.to_string()).into(),
        Rule::Conflict => DomainError::Conflict(replacement.to_string()).into(),
        Rule::Busy(message) => OperationError::service(message),
    }
}

fn is_success(status: u16) -> bool {
    (200..300).contains(&status)
}

fn body_or(body: String, fallback: &str) -> String {
    if body.is_empty() {
        fallback.to_string()
    } else {
        body
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn create() -> AliasRequest {
        AliasRequest::create("https://example.com", "custom-alias").unwrap()
    }

    fn rename() -> AliasRequest {
        AliasRequest::rename("old-alias", "new-alias").unwrap()
    }

    fn delete() -> AliasRequest {
        AliasRequest::delete("delete-me").unwrap()
    }

    fn message(request: &AliasRequest, outcome: Outcome) -> String {
        interpret(request, outcome).unwrap_err().to_string()
    }

    #[test]
    fn create_success_reads_alias() {
        let result = interpret(&create(), Outcome::response(201, r#"{"alias":"https://x/abc"}"#));
        assert_eq!(
            result,
            Ok(Success::Created {
                alias: "https://x/abc".into()
            })
        );
    }

    #[test]
    fn create_success_without_alias_is_empty() {
        let result = interpret(&create(), Outcome::response(200, "{}"));
        assert_eq!(result, Ok(Success::Created { alias: String::new() }));
    }

    #[test]
    fn create_conflict_and_other_failures() {
        assert_eq!(
            message(&create(), Outcome::response(409, "Alias conflict")),
            "This alias is already taken. Please choose another one."
        );
        assert_eq!(
            message(&create(), Outcome::response(500, "oops")),
            "Failed to shorten URL"
        );
    }

    #[test]
    fn create_transport_and_garbled_body() {
        assert_eq!(
            interpret(&create(), Outcome::Transport("refused".into())),
            Err(OperationError::network(CREATE_NETWORK))
        );
        assert_eq!(
            message(&create(), Outcome::response(200, "<html>")),
            "Network error, please try again"
        );
    }

    #[test]
    fn resolve_needs_url_field() {
        let request = AliasRequest::resolve("abc123").unwrap();
        assert_eq!(
            interpret(&request, Outcome::response(200, r#"{"url":"https://example.com"}"#)),
            Ok(Success::Resolved {
                target: "https://example.com".into()
            })
        );
        assert_eq!(message(&request, Outcome::response(200, "{}")), RESOLVE_NO_TARGET);
        assert_eq!(message(&request, Outcome::response(404, "not json")), RESOLVE_NO_TARGET);
        assert_eq!(message(&request, Outcome::response(200, r#"{"url":""}"#)), RESOLVE_NO_TARGET);
    }

    #[test]
    fn resolve_transport_failure_keeps_its_text() {
        let request = AliasRequest::resolve("abc123").unwrap();
        assert_eq!(message(&request, Outcome::Transport("Failed to fetch".into())), "Failed to fetch");
        assert_eq!(message(&request, Outcome::Transport(String::new())), RESOLVE_FAILED);
    }

    #[test]
    fn rename_status_table() {
        let cases = [
            (400, "New alias must be different"),
            (404, "Alias \"old-alias\" not found"),
            (409, "Alias \"new-alias\" already exists"),
            (500, "Alias update problem. Please try again later."),
            (418, "teapot"),
        ];
        for (status, expected) in cases {
            let body = if status == 418 { "teapot" } else { "ignored" };
            assert_eq!(message(&rename(), Outcome::response(status, body)), expected, "status {status}");
        }
        assert_eq!(message(&rename(), Outcome::response(503, "")), RENAME_FAILED);
    }

    #[test]
    fn rename_success_echoes_aliases() {
        assert_eq!(
            interpret(&rename(), Outcome::response(200, "{}")),
            Ok(Success::Renamed {
                current: "old-alias".into(),
                new: "new-alias".into()
            })
        );
    }

    #[test]
    fn delete_status_table() {
        assert_eq!(
            message(&delete(), Outcome::response(404, "Alias not found")),
            "Alias \"delete-me\" not found"
        );
        assert_eq!(message(&delete(), Outcome::response(500, "x")), DELETE_BUSY);
        assert_eq!(message(&delete(), Outcome::response(502, "bad gateway")), "bad gateway");
        assert_eq!(message(&delete(), Outcome::response(403, "")), DELETE_FAILED);
        assert_eq!(message(&delete(), Outcome::Transport("reset".into())), TAB_NETWORK);
    }

    #[test]
    fn delete_success_needs_no_body() {
        assert_eq!(
            interpret(&delete(), Outcome::response(200, "")),
            Ok(Success::Deleted {
                alias: "delete-me".into()
            })
        );
    }

    #[test]
    fn explicit_rows_win_over_fallback() {
        // 500 is both "not a 2xx" and an explicit row; the row's message wins.
        assert_eq!(message(&rename(), Outcome::response(500, "raw body")), RENAME_BUSY);
    }
}
