//! Response classification
//!
//! The vendor API is inconsistent: successful deletions return an empty body, faults come
//! back as structured JSON with either a 2xx or an error status. Everything is therefore
//! decided on the body alone, and a body that does not parse is a normal outcome rather
//! than an error.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Which call produced the body being classified.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseContext {
    /// `GET customers/all/domains/{domain}`
    DomainLookup,
    /// `DELETE` of a domain or a mailbox
    Deletion,
}

/// Outcome of one API response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "detail")]
pub enum ClassifiedResult {
    /// `unauthorizedFault` with a code.
    Unauthorized,
    /// `itemNotFoundFault` with a code on lookup.
    NotFound,
    /// `rsEmailUsedStorage` is zero.
    EmptyMailboxStorage,
    /// Named domain with storage in use.
    ActiveDomain(String),
    /// Empty body after a DELETE.
    DeletionConfirmed,
    /// `itemNotFoundFault` after a DELETE.
    DeletionNotFound,
    /// Anything else.
    ParseFailure(String),
}

impl fmt::Display for ClassifiedResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unauthorized => f.write_str("unauthorized"),
            Self::NotFound => f.write_str("not found"),
            Self::EmptyMailboxStorage => f.write_str("no mailbox storage in use"),
            Self::ActiveDomain(name) => write!(f, "active domain {name}"),
            Self::DeletionConfirmed => f.write_str("deleted"),
            Self::DeletionNotFound => f.write_str("not found, nothing deleted"),
            Self::ParseFailure(detail) => write!(f, "unrecognised response: {detail}"),
        }
    }
}

#[derive(Debug, Deserialize)]
struct Fault {
    code: Option<serde_json::Value>,
}

impl Fault {
    fn has_code(&self) -> bool {
        self.code.as_ref().is_some_and(|c| !c.is_null())
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DomainBody {
    name: Option<String>,
    rs_email_used_storage: Option<serde_json::Number>,
    unauthorized_fault: Option<Fault>,
    item_not_found_fault: Option<Fault>,
}

fn is_zero(n: &serde_json::Number) -> bool {
    n.as_u64() == Some(0)
        || n.as_i64() == Some(0)
        || n.as_f64().is_some_and(|v| v.abs() < f64::EPSILON)
}

/// Classify a raw response body.
pub fn classify(body: &str, context: ResponseContext) -> ClassifiedResult {
    match context {
        ResponseContext::DomainLookup => classify_lookup(body),
        ResponseContext::Deletion => classify_deletion(body),
    }
}

fn classify_lookup(body: &str) -> ClassifiedResult {
    if body.trim().is_empty() {
        return ClassifiedResult::ParseFailure("empty response body".to_string());
    }

    let parsed: DomainBody = match serde_json::from_str(body) {
        Ok(parsed) => parsed,
        Err(e) => return ClassifiedResult::ParseFailure(e.to_string()),
    };

    if parsed.unauthorized_fault.as_ref().is_some_and(Fault::has_code) {
        return ClassifiedResult::Unauthorized;
    }
    if parsed.item_not_found_fault.as_ref().is_some_and(Fault::has_code) {
        return ClassifiedResult::NotFound;
    }

    match (parsed.name, parsed.rs_email_used_storage) {
        (_, Some(usage)) if is_zero(&usage) => ClassifiedResult::EmptyMailboxStorage,
        (Some(name), Some(_)) if !name.trim().is_empty() => {
            ClassifiedResult::ActiveDomain(name.trim().to_lowercase())
        }
        _ => ClassifiedResult::ParseFailure(
            "expected a fault, or a domain name with rsEmailUsedStorage".to_string(),
        ),
    }
}

fn classify_deletion(body: &str) -> ClassifiedResult {
    if body.trim().is_empty() {
        return ClassifiedResult::DeletionConfirmed;
    }

    match serde_json::from_str::<DomainBody>(body) {
        Ok(parsed) if parsed.item_not_found_fault.is_some() => ClassifiedResult::DeletionNotFound,
        Ok(parsed) if parsed.unauthorized_fault.is_some() => ClassifiedResult::Unauthorized,
        Ok(_) => ClassifiedResult::ParseFailure("unexpected body after delete".to_string()),
        Err(e) => ClassifiedResult::ParseFailure(e.to_string()),
    }
}
