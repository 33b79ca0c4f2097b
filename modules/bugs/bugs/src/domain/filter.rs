//! Translation of raw list-query parameters into a `BugFilter`.

use bugs_sdk::BugFilter;
use uuid::Uuid;

use crate::domain::error::DomainError;

/// Build a filter from the optional raw `resolved`, `assigner` and `assignee` parameters.
///
/// `resolved` never fails: the literal `"true"` selects resolved bugs, any other
/// non-empty value selects unresolved ones, and an empty value means no constraint.
/// User ids must parse as UUIDs when present and non-empty.
pub fn parse_bug_filter(
    resolved: Option<&str>,
    assigner: Option<&str>,
    assignee: Option<&str>,
) -> Result<BugFilter, DomainError> {
    Ok(BugFilter {
        resolved: non_empty(resolved).map(|v| v == "true"),
        assigner: parse_user_id("assigner", assigner)?,
        assignee: parse_user_id("assignee", assignee)?,
    })
}

fn non_empty(raw: Option<&str>) -> Option<&str> {
    raw.filter(|v| !v.is_empty())
}

fn parse_user_id(field: &'static str, raw: Option<&str>) -> Result<Option<Uuid>, DomainError> {
    non_empty(raw)
        .map(|v| {
            Uuid::parse_str(v.trim())
                .map_err(|_| DomainError::field(field, format!("'{v}' is not a valid user id")))
        })
        .transpose()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_and_empty_mean_no_constraint() {
        assert_eq!(parse_bug_filter(None, None, None).unwrap(), BugFilter::default());
        assert_eq!(
            parse_bug_filter(Some(""), Some(""), Some("")).unwrap(),
            BugFilter::default()
        );
    }

    #[test]
    fn resolved_tri_state() {
        let f = |v| parse_bug_filter(Some(v), None, None).unwrap().resolved;
        assert_eq!(f("true"), Some(true));
        assert_eq!(f("false"), Some(false));
        assert_eq!(f("yes"), Some(false));
        assert_eq!(f("True"), Some(false));
        assert_eq!(f("1"), Some(false));
    }

    #[test]
    fn user_ids_are_parsed() {
        let a = Uuid::now_v7();
        let b = Uuid::now_v7();
        let f = parse_bug_filter(None, Some(&a.to_string()), Some(&b.to_string())).unwrap();
        assert_eq!(f.assigner, Some(a));
        assert_eq!(f.assignee, Some(b));
        assert_eq!(f.resolved, None);
    }

    #[test]
    fn malformed_user_id_is_a_validation_error() {
        let err = parse_bug_filter(None, Some("42"), None).unwrap_err();
        match err {
            DomainError::Validation { field, .. } => assert_eq!(field.as_deref(), Some("assigner")),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
