//! Slash commands: `/db add users table` style shortcuts that expand into a
//! job title plus canned constraints and file patterns.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlashCommand {
    pub command: String,
    pub action: String,
}

static SLASH_RE: OnceLock<Regex> = OnceLock::new();

fn slash_re() -> &'static Regex {
    SLASH_RE.get_or_init(|| Regex::new(r"^/([A-Za-z0-9_]+)\s+(.+)$").unwrap())
}

/// Parse `/<word> <rest>`. Anything else, including a bare `/word`, is `None`.
pub fn parse_slash_command(input: &str) -> Option<SlashCommand> {
    let caps = slash_re().captures(input)?;
    Some(SlashCommand {
        command: caps[1].to_string(),
        action: caps[2].to_string(),
    })
}

// ---------------------------------------------------------------------------
// Expansion
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Expansion {
    pub title: String,
    pub constraints: Vec<String>,
    pub copy: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assets: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub files: Option<Vec<String>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KnownCommand {
    Db,
    Auth,
    Brand,
    Rfid,
    Lang,
    Release,
}

impl KnownCommand {
    pub fn all() -> &'static [KnownCommand] {
        &[
            KnownCommand::Db,
            KnownCommand::Auth,
            KnownCommand::Brand,
            KnownCommand::Rfid,
            KnownCommand::Lang,
            KnownCommand::Release,
        ]
    }

    pub fn as_str(self) -> &'static str {
        match self {
            KnownCommand::Db => "db",
            KnownCommand::Auth => "auth",
            KnownCommand::Brand => "brand",
            KnownCommand::Rfid => "rfid",
            KnownCommand::Lang => "lang",
            KnownCommand::Release => "release",
        }
    }

    pub fn lookup(command: &str) -> Option<KnownCommand> {
        KnownCommand::all()
            .iter()
            .copied()
            .find(|c| c.as_str() == command)
    }

    fn expand(self, action: &str) -> Expansion {
        match self {
            KnownCommand::Db => Expansion {
                title: format!("Supabase migration: {action}"),
                constraints: strings(&[
                    "no breaking changes",
                    "id as uuid primary key",
                    "timestamps default",
                    "update schema.graphql",
                    "generate .sql migration",
                ]),
                copy: format!("Database task: {action}"),
                assets: None,
                files: Some(strings(&[
                    "supabase/migrations/*",
                    "supabase/schema.graphql",
                ])),
            },
            KnownCommand::Auth => Expansion {
                title: format!("Auth implementation: {action}"),
                constraints: strings(&[
                    "use Clerk auth",
                    "secure token handling",
                    "proper error states",
                    "loading states",
                ]),
                copy: format!("Authentication task: {action}"),
                assets: None,
                files: Some(strings(&["src/components/auth/*", "middleware.ts"])),
            },
            KnownCommand::Brand => Expansion {
                title: format!("Brand asset: {action}"),
                constraints: strings(&[
                    "2-color max",
                    "SVG format preferred",
                    "save to /public/assets/{brand}/",
                    "include PNG fallback",
                ]),
                copy: format!("Brand design task: {action}"),
                assets: Some(strings(&[
                    "/public/assets/stryv/",
                    "/public/assets/eman/",
                    "/public/assets/eco/",
                ])),
                files: None,
            },
            KnownCommand::Rfid => Expansion {
                title: format!("RFID/IoT task: {action}"),
                constraints: strings(&[
                    "TextileTrack compatibility",
                    "StitchOS integration",
                    "serial communication protocols",
                    "error handling for hardware",
                ]),
                copy: format!("IoT/RFID task: {action}"),
                assets: None,
                files: Some(strings(&["src/lib/rfid/*", "src/services/stitchos/*"])),
            },
            KnownCommand::Lang => Expansion {
                title: format!("Weft language: {action}"),
                constraints: strings(&[
                    "Weft repo context",
                    "language processing",
                    "textile domain specific",
                    "compiler compatibility",
                ]),
                copy: format!("Language/Weft task: {action}"),
                assets: None,
                files: Some(strings(&["weft/src/*", "weft/compiler/*"])),
            },
            KnownCommand::Release => Expansion {
                title: format!("Release {action}"),
                constraints: strings(&[
                    "version tagging",
                    "changelog generation",
                    "production deployment",
                    "rollback plan",
                ]),
                copy: format!("Release task: {action}"),
                assets: None,
                files: Some(strings(&[
                    "CHANGELOG.md",
                    "package.json",
                    ".github/workflows/*",
                ])),
            },
        }
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

pub fn expand_slash_command(cmd: &SlashCommand) -> Expansion {
    match KnownCommand::lookup(&cmd.command) {
        Some(known) => known.expand(&cmd.action),
        None => Expansion {
            title: format!("{}: {}", cmd.command, cmd.action),
            constraints: Vec::new(),
            copy: format!("{} task: {}", cmd.command, cmd.action),
            assets: None,
            files: None,
        },
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
