//! Branch-name policy validation.
//!
//! Pure rule evaluation, no I/O. The version-control adapter consults this
//! before creating a branch; everything here is testable on its own.

/// Category prefixes a branch name may start with.
const ALLOWED_PREFIXES: &[&str] = &[
    "feature/", "fix/", "hotfix/", "chore/", "release/", "docs/",
];

/// Maximum length of a branch name, in bytes.
const MAX_LENGTH: usize = 50;

/// The active rule set. Rules are evaluated in this order and the first
/// failure wins.
pub const RULES: &[PolicyRule] = &[
    PolicyRule::CategoryPrefix,
    PolicyRule::MaxLength,
    PolicyRule::CharacterSet,
];

/// One organizational naming rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PolicyRule {
    CategoryPrefix,
    MaxLength,
    CharacterSet,
}

impl PolicyRule {
    pub fn name(&self) -> &'static str {
        match self {
            PolicyRule::CategoryPrefix => "prefix",
            PolicyRule::MaxLength => "length",
            PolicyRule::CharacterSet => "character-set",
        }
    }

    fn check(&self, candidate: &str) -> bool {
        match self {
            PolicyRule::CategoryPrefix => {
                ALLOWED_PREFIXES.iter().any(|p| candidate.starts_with(p))
            }
            PolicyRule::MaxLength => candidate.len() <= MAX_LENGTH,
            PolicyRule::CharacterSet => {
                !candidate.is_empty()
                    && candidate
                        .chars()
                        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '/' | '_' | '-'))
            }
        }
    }

    fn violation(&self, candidate: &str) -> String {
        match self {
            PolicyRule::CategoryPrefix => format!(
                "branch name must start with one of: {}",
                ALLOWED_PREFIXES.join(", ")
            ),
            PolicyRule::MaxLength => format!(
                "branch name is {} characters long, the maximum is {MAX_LENGTH}",
                candidate.len()
            ),
            PolicyRule::CharacterSet => {
                "branch name may only contain ASCII letters, digits, '/', '_' and '-'".to_string()
            }
        }
    }
}

/// Verdict for one candidate. Created fresh per [`validate`] call.
#[derive(Debug, Clone)]
pub struct ValidationVerdict {
    pub valid: bool,
    pub failed_rule: Option<PolicyRule>,
    pub explanation: String,
}

/// Validate a proposed branch name against the organizational rules.
pub fn validate(candidate: &str) -> ValidationVerdict {
    for rule in RULES {
        if !rule.check(candidate) {
            return ValidationVerdict {
                valid: false,
                failed_rule: Some(*rule),
                explanation: rule.violation(candidate),
            };
        }
    }

    ValidationVerdict {
        valid: true,
        failed_rule: None,
        explanation: format!("branch name '{candidate}' complies with the naming policy"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_compliant_name() {
        let verdict = validate("feature/login-fix");
        assert!(verdict.valid);
        assert!(verdict.failed_rule.is_none());
        assert!(verdict.explanation.contains("complies"));
    }

    #[test]
    fn test_accepts_every_allowed_prefix() {
        for prefix in ["feature/", "fix/", "hotfix/", "chore/", "release/", "docs/"] {
            let verdict = validate(&format!("{prefix}short-name"));
            assert!(verdict.valid, "{prefix} should be allowed");
        }
    }

    #[test]
    fn test_rejects_missing_prefix() {
        let verdict = validate("xyz-thing");
        assert!(!verdict.valid);
        assert_eq!(verdict.failed_rule, Some(PolicyRule::CategoryPrefix));
        assert!(verdict.explanation.contains("feature/"));
        assert!(verdict.explanation.contains("hotfix/"));
    }

    #[test]
    fn test_rejects_overlong_name() {
        let candidate = format!("feature/{}", "a".repeat(60));
        let verdict = validate(&candidate);
        assert!(!verdict.valid);
        assert_eq!(verdict.failed_rule, Some(PolicyRule::MaxLength));
        assert!(verdict.explanation.contains("68"));
        assert!(verdict.explanation.contains("50"));
    }

    #[test]
    fn test_rejects_forbidden_characters() {
        let verdict = validate("feature/bad char");
        assert!(!verdict.valid);
        assert_eq!(verdict.failed_rule, Some(PolicyRule::CharacterSet));
    }

    #[test]
    fn test_first_failure_wins() {
        // Fails both prefix and charset; the prefix rule is reported.
        let verdict = validate("no prefix here");
        assert_eq!(verdict.failed_rule, Some(PolicyRule::CategoryPrefix));
    }

    #[test]
    fn test_length_is_checked_before_charset() {
        let candidate = format!("feature/{} ", "a".repeat(60));
        let verdict = validate(&candidate);
        assert_eq!(verdict.failed_rule, Some(PolicyRule::MaxLength));
    }

    #[test]
    fn test_boundary_length_accepted() {
        // Exactly 50 characters.
        let candidate = format!("feature/{}", "a".repeat(42));
        assert_eq!(candidate.len(), 50);
        assert!(validate(&candidate).valid);
    }
}
