use crate::error::OrchestraError;
use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// Role
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Coder,
    Debugger,
    Designer,
    Seo,
    Deploy,
    Git,
}

impl Role {
    pub fn all() -> &'static [Role] {
        &[
            Role::Coder,
            Role::Debugger,
            Role::Designer,
            Role::Seo,
            Role::Deploy,
            Role::Git,
        ]
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Role::Coder => "coder",
            Role::Debugger => "debugger",
            Role::Designer => "designer",
            Role::Seo => "seo",
            Role::Deploy => "deploy",
            Role::Git => "git",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Role {
    type Err = OrchestraError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Role::all()
            .iter()
            .copied()
            .find(|r| r.as_str() == s)
            .ok_or_else(|| OrchestraError::InvalidRole(s.to_string()))
    }
}

// ---------------------------------------------------------------------------
// Rule table
// ---------------------------------------------------------------------------

/// One step of the routing cascade: any keyword found in the lower-cased
/// title selects `role`.
pub struct RoleRule {
    pub id: &'static str,
    pub keywords: &'static [&'static str],
    pub role: Role,
}

impl RoleRule {
    fn matches(&self, lowered: &str) -> bool {
        self.keywords.iter().any(|k| lowered.contains(k))
    }
}

/// Evaluated top to bottom; the first matching rule wins. Categories overlap
/// on purpose ("fix deploy script" is a debugger job), so order is the contract.
pub const ROLE_RULES: &[RoleRule] = &[
    RoleRule {
        id: "debugger",
        keywords: &["bug", "error", "trace", "stack", "exception", "fix", "debug"],
        role: Role::Debugger,
    },
    RoleRule {
        id: "designer",
        keywords: &[
            "logo", "brand", "design", "color", "palette", "typography", "image", "hero",
            "poster", "figma", "banner", "thumbnail",
        ],
        role: Role::Designer,
    },
    RoleRule {
        id: "seo",
        keywords: &[
            "seo", "meta", "og", "schema", "json-ld", "crawl", "ranking", "sitemap", "robots",
        ],
        role: Role::Seo,
    },
    RoleRule {
        id: "deploy",
        keywords: &["release", "deploy", "vercel", "railway", "production", "env", "ship"],
        role: Role::Deploy,
    },
    RoleRule {
        id: "git",
        keywords: &["merge", "branch", "tag", "changelog", "version", "pr"],
        role: Role::Git,
    },
    RoleRule {
        id: "coder-db",
        keywords: &["supabase", "prisma", "migration", "db", "schema"],
        role: Role::Coder,
    },
    RoleRule {
        id: "coder-auth",
        keywords: &["auth", "clerk", "login", "signup", "token"],
        role: Role::Coder,
    },
    RoleRule {
        id: "coder-iot",
        keywords: &["rfid", "stitchos", "weft", "textiletrack", "iot", "serial"],
        role: Role::Coder,
    },
];

pub const DEFAULT_ROLE: Role = Role::Coder;

/// Role plus the id of the rule that produced it (`None` for the default).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RoleMatch {
    pub role: Role,
    pub rule: Option<&'static str>,
}

pub fn classify(title: &str) -> RoleMatch {
    let lowered = title.to_lowercase();
    ROLE_RULES
        .iter()
        .find(|rule| rule.matches(&lowered))
        .map(|rule| RoleMatch {
            role: rule.role,
            rule: Some(rule.id),
        })
        .unwrap_or(RoleMatch {
            role: DEFAULT_ROLE,
            rule: None,
        })
}

pub fn infer_role(title: &str) -> Role {
    classify(title).role
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debugger_keywords() {
        for title in [
            "Bug in checkout",
            "Stack overflow on load",
            "NullPointerException in worker",
            "FIX the footer",
            "Debug flaky test",
        ] {
            assert_eq!(infer_role(title), Role::Debugger, "{title}");
        }
    }

    #[test]
    fn debugger_wins_over_deploy() {
        let m = classify("Fix deploy bug");
        assert_eq!(m.role, Role::Debugger);
        assert_eq!(m.rule, Some("debugger"));
    }

    #[test]
    fn cascade_order() {
        assert_eq!(infer_role("New hero banner"), Role::Designer);
        assert_eq!(infer_role("Add sitemap"), Role::Seo);
        assert_eq!(infer_role("Ship to Vercel"), Role::Deploy);
        assert_eq!(infer_role("Merge feature branch"), Role::Git);
        assert_eq!(infer_role("Cut a new release"), Role::Deploy);
    }

    #[test]
    fn keywords_match_as_substrings() {
        // "og" sits inside "changelog" and "login", and seo is checked first.
        assert_eq!(classify("Write changelog").rule, Some("seo"));
        assert_eq!(classify("Login page").rule, Some("seo"));
        // "pr" sits inside "prisma" and "pricing".
        assert_eq!(infer_role("Prisma client setup"), Role::Git);
        assert_eq!(classify("Build pricing page").rule, Some("git"));
    }

    #[test]
    fn coder_sub_rules_report_their_id() {
        assert_eq!(classify("Supabase table").rule, Some("coder-db"));
        assert_eq!(classify("Clerk signup flow").rule, Some("coder-auth"));
        assert_eq!(classify("RFID reader calibration").rule, Some("coder-iot"));
        assert_eq!(infer_role("RFID reader calibration"), Role::Coder);
    }

    #[test]
    fn total_with_default() {
        let m = classify("");
        assert_eq!(m.role, Role::Coder);
        assert_eq!(m.rule, None);
        assert_eq!(infer_role("Add a checkout page"), Role::Coder);
        assert_eq!(infer_role("¿¿??"), Role::Coder);
    }

    #[test]
    fn role_round_trips_through_str() {
        for role in Role::all() {
            assert_eq!(role.as_str().parse::<Role>().unwrap(), *role);
        }
        assert!("manager".parse::<Role>().is_err());
    }
}
