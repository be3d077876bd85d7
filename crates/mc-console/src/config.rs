//! Console settings read from the environment at start-up.

use std::env;

const DEFAULT_PROMPT: &str = "> ";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsoleConfig {
    /// Printed before each input line (`CONSOLE_PROMPT`).
    pub prompt: String,
    /// Transfer cooldown the hopper starts with (`HOPPER_COOLDOWN`).
    pub initial_cooldown: i32,
    /// Log the encoded command tree on start-up (`CONSOLE_ECHO_TREE`).
    pub echo_tree: bool,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            prompt: DEFAULT_PROMPT.to_string(),
            initial_cooldown: mc_value::NO_COOLDOWN,
            echo_tree: false,
        }
    }
}

impl ConsoleConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build from any variable source. Unparseable values fall back to the
    /// defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let prompt = lookup("CONSOLE_PROMPT").unwrap_or(defaults.prompt);

        let initial_cooldown = lookup("HOPPER_COOLDOWN")
            .and_then(|v| v.trim().parse().ok())
            .unwrap_or(defaults.initial_cooldown);

        let echo_tree = lookup("CONSOLE_ECHO_TREE")
            .and_then(|v| parse_flag(&v))
            .unwrap_or(defaults.echo_tree);

        Self {
            prompt,
            initial_cooldown,
            echo_tree,
        }
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_from(vars: &[(&str, &str)]) -> ConsoleConfig {
        ConsoleConfig::from_lookup(|name| {
            vars.iter()
                .find(|(key, _)| *key == name)
                .map(|(_, value)| (*value).to_string())
        })
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]);
        assert_eq!(config, ConsoleConfig::default());
        assert_eq!(config.initial_cooldown, -1);
    }

    #[test]
    fn test_reads_all_variables() {
        let config = config_from(&[
            ("CONSOLE_PROMPT", "hopper$ "),
            ("HOPPER_COOLDOWN", " 8 "),
            ("CONSOLE_ECHO_TREE", "yes"),
        ]);
        assert_eq!(config.prompt, "hopper$ ");
        assert_eq!(config.initial_cooldown, 8);
        assert!(config.echo_tree);
    }

    #[test]
    fn test_bad_values_fall_back() {
        let config = config_from(&[("HOPPER_COOLDOWN", "soon"), ("CONSOLE_ECHO_TREE", "maybe")]);
        assert_eq!(config.initial_cooldown, -1);
        assert!(!config.echo_tree);
    }
}
