// Request builders: turn raw user input into one of the four alias
// operations. Builders only check local preconditions; they never send.

use crate::error::PreconditionError;
use crate::validate::is_valid_url;
use reqwest::Method;
use serde::Serialize;

/// Which of the four alias operations a request or ticket belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperationKind {
    Create,
    Resolve,
    Rename,
    Delete,
}

impl OperationKind {
    pub const ALL: [OperationKind; 4] = [
        OperationKind::Create,
        OperationKind::Resolve,
        OperationKind::Rename,
        OperationKind::Delete,
    ];

    pub(crate) fn index(self) -> usize {
        match self {
            OperationKind::Create => 0,
            OperationKind::Resolve => 1,
            OperationKind::Rename => 2,
            OperationKind::Delete => 3,
        }
    }
}

/// Payload of `POST /url`. `alias` is omitted when the user left it blank.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct CreateBody {
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,
}

/// Payload of `PUT /url/{alias}`.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct RenameBody {
    #[serde(rename = "newAlias")]
    pub new_alias: String,
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(untagged)]
pub enum RequestBody {
    Create(CreateBody),
    Rename(RenameBody),
}

/// A validated alias operation, ready to be dispatched. It keeps the
/// aliases involved so the response can be reported in their terms.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AliasRequest {
    Create { url: String, alias: Option<String> },
    Resolve { alias: String },
    Rename { current: String, new: String },
    Delete { alias: String },
}

impl AliasRequest {
    /// `url` is trimmed, then must pass [`is_valid_url`]. `alias` is
    /// trimmed and sent only when non-empty.
    pub fn create(url: &str, alias: &str) -> Result<Self, PreconditionError> {
        let url = url.trim();
        if url.is_empty() {
            return Err(PreconditionError::MissingUrl);
        }
        if !is_valid_url(url) {
            return Err(PreconditionError::InvalidUrl);
        }
        let alias = alias.trim();
        Ok(AliasRequest::Create {
            url: url.to_string(),
            alias: (!alias.is_empty()).then(|| alias.to_string()),
        })
    }

    pub fn resolve(alias: &str) -> Result<Self, PreconditionError> {
        let alias = required(alias).ok_or(PreconditionError::MissingAlias)?;
        Ok(AliasRequest::Resolve { alias })
    }

    pub fn rename(current: &str, new: &str) -> Result<Self, PreconditionError> {
        match (required(current), required(new)) {
            (Some(current), Some(new)) => Ok(AliasRequest::Rename { current, new }),
            _ => Err(PreconditionError::MissingRenameAliases),
        }
    }

    pub fn delete(alias: &str) -> Result<Self, PreconditionError> {
        let alias = required(alias).ok_or(PreconditionError::MissingAlias)?;
        Ok(AliasRequest::Delete { alias })
    }

    pub fn kind(&self) -> OperationKind {
        match self {
            AliasRequest::Create { .. } => OperationKind::Create,
            AliasRequest::Resolve { .. } => OperationKind::Resolve,
            AliasRequest::Rename { .. } => OperationKind::Rename,
            AliasRequest::Delete { .. } => OperationKind::Delete,
        }
    }

    pub fn method(&self) -> Method {
        match self {
            AliasRequest::Create { .. } => Method::POST,
            AliasRequest::Resolve { .. } => Method::GET,
            AliasRequest::Rename { .. } => Method::PUT,
            AliasRequest::Delete { .. } => Method::DELETE,
        }
    }

    /// Path relative to the service base URL, always starting with `/`.
    pub fn path(&self) -> String {
        match self {
            AliasRequest::Create { .. } => "/url".to_string(),
            AliasRequest::Resolve { alias } => format!("/{alias}"),
            AliasRequest::Rename { current, .. } => format!("/url/{current}"),
            AliasRequest::Delete { alias } => format!("/url/{alias}"),
        }
    }

    pub fn body(&self) -> Option<RequestBody> {
        match self {
            AliasRequest::Create { url, alias } => Some(RequestBody::Create(CreateBody {
                url: url.clone(),
                alias: alias.clone(),
            })),
            AliasRequest::Rename { new, .. } => Some(RequestBody::Rename(RenameBody {
                new_alias: new.clone(),
            })),
            AliasRequest::Resolve { .. } | AliasRequest::Delete { .. } => None,
        }
    }
}

fn required(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}
