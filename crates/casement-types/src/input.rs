//! Input command vocabulary.
//!
//! Keyboard shortcuts, IPC messages and console input are all mapped to
//! [`WindowCommand`] before they reach the window controller. The core never
//! sees raw platform input or wire messages.

use serde::{Deserialize, Serialize};

use crate::error::{CasementError, Result};
use crate::id::TabId;

/// A platform-agnostic request against one browser window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "cmd", rename_all = "snake_case")]
pub enum WindowCommand {
    /// Load a URL in the active tab.
    Navigate { url: String },
    /// Open a new tab, in the foreground unless `activate` is false.
    NewTab {
        url: String,
        #[serde(default = "default_activate")]
        activate: bool,
    },
    /// Switch to an existing tab.
    ActivateTab { id: TabId },
    /// Close a tab.
    CloseTab { id: TabId },
    /// History back in the active tab.
    Back,
    /// History forward in the active tab.
    Forward,
    Reload,
    Stop,
    /// List open tabs.
    ListTabs,
    /// The tab's content surface finished its initial setup.
    SurfaceReady { id: TabId },
    /// The tab's content surface started fetching.
    LoadStarted { id: TabId },
    /// The tab's content surface finished fetching.
    LoadFinished {
        id: TabId,
        #[serde(default)]
        title: Option<String>,
    },
    /// Close the window.
    Quit,
}

fn default_activate() -> bool {
    true
}

impl WindowCommand {
    /// Parse one line of input.
    ///
    /// Lines starting with `{` are JSON IPC messages; anything else is the
    /// console syntax (`open <url> [--background]`, `go <url>`, `back`,
    /// `forward`, `reload`, `stop`, `switch <id>`, `close <id>`, `tabs`,
    /// `ready <id>`, `loading <id>`, `loaded <id> [title]`, `quit`).
    /// Blank lines and `#` comments yield `None`.
    pub fn parse_line(line: &str) -> Result<Option<Self>> {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            return Ok(None);
        }
        if trimmed.starts_with('{') {
            return Ok(Some(serde_json::from_str(trimmed)?));
        }

        let (verb, rest) = match trimmed.split_once(char::is_whitespace) {
            Some((verb, rest)) => (verb, rest.trim()),
            None => (trimmed, ""),
        };

        let cmd = match verb.to_ascii_lowercase().as_str() {
            "open" | "new" => {
                let mut url = None;
                let mut activate = true;
                for arg in rest.split_whitespace() {
                    match arg {
                        "--background" | "-b" => activate = false,
                        other if url.is_none() => url = Some(other.to_string()),
                        other => {
                            return Err(CasementError::Command(format!(
                                "unexpected argument: {other}"
                            )));
                        },
                    }
                }
                Self::NewTab {
                    url: url.unwrap_or_else(|| "about:blank".to_string()),
                    activate,
                }
            },
            "go" | "navigate" => Self::Navigate {
                url: required(verb, rest)?.to_string(),
            },
            "back" => Self::Back,
            "forward" => Self::Forward,
            "reload" => Self::Reload,
            "stop" => Self::Stop,
            "tabs" => Self::ListTabs,
            "switch" | "activate" => Self::ActivateTab {
                id: parse_id(verb, rest)?,
            },
            "close" => Self::CloseTab {
                id: parse_id(verb, rest)?,
            },
            "ready" => Self::SurfaceReady {
                id: parse_id(verb, rest)?,
            },
            "loading" => Self::LoadStarted {
                id: parse_id(verb, rest)?,
            },
            "loaded" => {
                let (id_text, title) = match rest.split_once(char::is_whitespace) {
                    Some((id, title)) => (id, Some(title.trim().to_string())),
                    None => (rest, None),
                };
                Self::LoadFinished {
                    id: parse_id(verb, id_text)?,
                    title: title.filter(|t| !t.is_empty()),
                }
            },
            "quit" | "exit" => Self::Quit,
            other => {
                return Err(CasementError::Command(format!("unknown command: {other}")));
            },
        };
        Ok(Some(cmd))
    }
}

fn required<'a>(verb: &str, rest: &'a str) -> Result<&'a str> {
    if rest.is_empty() {
        Err(CasementError::Command(format!("usage: {verb} <url>")))
    } else {
        Ok(rest)
    }
}

fn parse_id(verb: &str, rest: &str) -> Result<TabId> {
    rest.trim()
        .trim_start_matches('#')
        .parse::<u64>()
        .map(TabId::new)
        .map_err(|_| CasementError::Command(format!("usage: {verb} <tab id>")))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(line: &str) -> WindowCommand {
        WindowCommand::parse_line(line).unwrap().unwrap()
    }

    #[test]
    fn blank_and_comment_lines_are_skipped() {
        assert!(WindowCommand::parse_line("").unwrap().is_none());
        assert!(WindowCommand::parse_line("   ").unwrap().is_none());
        assert!(WindowCommand::parse_line("# note").unwrap().is_none());
    }

    #[test]
    fn open_defaults_to_foreground() {
        assert_eq!(
            parse("open https://a.com"),
            WindowCommand::NewTab {
                url: "https://a.com".into(),
                activate: true,
            }
        );
    }

    #[test]
    fn open_background_flag() {
        assert_eq!(
            parse("open http://x --background"),
            WindowCommand::NewTab {
                url: "http://x".into(),
                activate: false,
            }
        );
    }

    #[test]
    fn open_without_url_uses_blank_page() {
        assert_eq!(
            parse("open"),
            WindowCommand::NewTab {
                url: "about:blank".into(),
                activate: true,
            }
        );
    }

    #[test]
    fn go_requires_url() {
        assert!(matches!(
            WindowCommand::parse_line("go"),
            Err(CasementError::Command(_))
        ));
        assert_eq!(
            parse("go https://b.com"),
            WindowCommand::Navigate {
                url: "https://b.com".into()
            }
        );
    }

    #[test]
    fn ids_accept_hash_prefix() {
        assert_eq!(
            parse("switch #2"),
            WindowCommand::ActivateTab { id: TabId::new(2) }
        );
        assert_eq!(
            parse("close 3"),
            WindowCommand::CloseTab { id: TabId::new(3) }
        );
    }

    #[test]
    fn bad_id_is_command_error() {
        assert!(matches!(
            WindowCommand::parse_line("close abc"),
            Err(CasementError::Command(_))
        ));
    }

    #[test]
    fn loaded_with_and_without_title() {
        assert_eq!(
            parse("loaded 1 Example Domain"),
            WindowCommand::LoadFinished {
                id: TabId::new(1),
                title: Some("Example Domain".into()),
            }
        );
        assert_eq!(
            parse("loaded 1"),
            WindowCommand::LoadFinished {
                id: TabId::new(1),
                title: None,
            }
        );
    }

    #[test]
    fn verbs_are_case_insensitive() {
        assert_eq!(parse("BACK"), WindowCommand::Back);
        assert_eq!(parse("Quit"), WindowCommand::Quit);
    }

    #[test]
    fn unknown_verb_is_rejected() {
        let err = WindowCommand::parse_line("teleport 1").unwrap_err();
        assert_eq!(format!("{err}"), "command error: unknown command: teleport");
    }

    #[test]
    fn json_ipc_messages() {
        assert_eq!(
            parse(r#"{"cmd":"navigate","url":"https://c.com"}"#),
            WindowCommand::Navigate {
                url: "https://c.com".into()
            }
        );
        assert_eq!(
            parse(r#"{"cmd":"new_tab","url":"https://d.com"}"#),
            WindowCommand::NewTab {
                url: "https://d.com".into(),
                activate: true,
            }
        );
        assert_eq!(
            parse(r#"{"cmd":"close_tab","id":4}"#),
            WindowCommand::CloseTab { id: TabId::new(4) }
        );
        assert_eq!(parse(r#"{"cmd":"reload"}"#), WindowCommand::Reload);
    }

    #[test]
    fn malformed_json_is_json_error() {
        assert!(matches!(
            WindowCommand::parse_line(r#"{"cmd":"warp"}"#),
            Err(CasementError::Json(_))
        ));
    }

    mod prop {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn parse_never_panics(line in "\\PC{0,40}") {
                let _ = WindowCommand::parse_line(&line);
            }

            #[test]
            fn close_accepts_any_id(raw in 0u64..1_000_000) {
                let cmd = WindowCommand::parse_line(&format!("close {raw}")).unwrap();
                prop_assert_eq!(cmd, Some(WindowCommand::CloseTab { id: TabId::new(raw) }));
            }
        }
    }
}
