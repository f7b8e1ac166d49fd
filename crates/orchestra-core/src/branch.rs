use crate::role::Role;
use crate::slug::branch_slug;
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BranchPrefix {
    Feature,
    Fix,
    Design,
    Chore,
    Deploy,
    Iot,
    Lang,
}

impl BranchPrefix {
    pub fn as_str(self) -> &'static str {
        match self {
            BranchPrefix::Feature => "feature",
            BranchPrefix::Fix => "fix",
            BranchPrefix::Design => "design",
            BranchPrefix::Chore => "chore",
            BranchPrefix::Deploy => "deploy",
            BranchPrefix::Iot => "iot",
            BranchPrefix::Lang => "lang",
        }
    }
}

impl fmt::Display for BranchPrefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<Role> for BranchPrefix {
    fn from(role: Role) -> Self {
        match role {
            Role::Coder => BranchPrefix::Feature,
            Role::Debugger => BranchPrefix::Fix,
            Role::Designer => BranchPrefix::Design,
            Role::Seo | Role::Git => BranchPrefix::Chore,
            Role::Deploy => BranchPrefix::Deploy,
        }
    }
}

/// Domain overrides, checked before the role-derived prefix.
const DOMAIN_OVERRIDES: &[(&[&str], BranchPrefix)] = &[
    (
        &["rfid", "stitchos", "textiletrack", "iot", "serial"],
        BranchPrefix::Iot,
    ),
    (&["weft", "lang"], BranchPrefix::Lang),
];

pub fn prefix_for(title: &str, role: Role) -> BranchPrefix {
    let lowered = title.to_lowercase();
    DOMAIN_OVERRIDES
        .iter()
        .find(|(keywords, _)| keywords.iter().any(|k| lowered.contains(k)))
        .map(|(_, prefix)| *prefix)
        .unwrap_or_else(|| role.into())
}

/// `{prefix}/{slug}`. Deterministic for a given title and role.
pub fn branch_for(title: &str, role: Role) -> String {
    format!("{}/{}", prefix_for(title, role), branch_slug(title))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn iot_override_beats_role() {
        let branch = branch_for("RFID sensor calibration", Role::Coder);
        assert_eq!(branch, "iot/rfid-sensor-calibration");
        assert!(branch_for("Serial port bug", Role::Debugger).starts_with("iot/"));
    }

    #[test]
    fn lang_override() {
        assert_eq!(
            branch_for("Weft language: parser", Role::Coder),
            "lang/weft-language-parser"
        );
    }

    #[test]
    fn role_prefixes() {
        assert!(branch_for("Write changelog for release", Role::Git).starts_with("chore/"));
        assert_eq!(branch_for("Fix Login Bug!!", Role::Debugger), "fix/fix-login-bug");
        assert_eq!(branch_for("New logo", Role::Designer), "design/new-logo");
        assert_eq!(branch_for("Add sitemap", Role::Seo), "chore/add-sitemap");
        assert_eq!(branch_for("Ship it", Role::Deploy), "deploy/ship-it");
        assert_eq!(branch_for("Checkout page", Role::Coder), "feature/checkout-page");
    }

    #[test]
    fn deterministic_and_never_empty() {
        assert_eq!(
            branch_for("Checkout page", Role::Coder),
            branch_for("Checkout page", Role::Coder)
        );
        let degenerate = branch_for("***", Role::Coder);
        assert!(degenerate.starts_with("feature/untitled-"));
    }
}
