//! Parser configuration.

use tracing::warn;

/// Knobs that change how the parser builds its tree.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ParserConfig {
    /// Leave eligible lambda bodies unparsed (see `incremental`).
    pub lazy: bool,
    /// Deepest expression nesting accepted before reporting E1009.
    pub max_nesting_depth: u32,
}

impl ParserConfig {
    pub const DEFAULT_MAX_NESTING_DEPTH: u32 = 2048;

    /// Defaults overridden by `KTC_LAZY` and `KTC_MAX_DEPTH`.
    ///
    /// Malformed values are logged and ignored.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = ParserConfig::default();
        if let Some(value) = lookup("KTC_LAZY") {
            match value.trim() {
                "1" | "true" | "yes" | "on" => config.lazy = true,
                "0" | "false" | "no" | "off" | "" => config.lazy = false,
                other => warn!(value = other, "ignoring invalid KTC_LAZY"),
            }
        }
        if let Some(value) = lookup("KTC_MAX_DEPTH") {
            match value.trim().parse::<u32>() {
                Ok(depth) if depth > 0 => config.max_nesting_depth = depth,
                _ => warn!(value = %value, "ignoring invalid KTC_MAX_DEPTH"),
            }
        }
        config
    }
}

impl Default for ParserConfig {
    fn default() -> Self {
        ParserConfig {
            lazy: false,
            max_nesting_depth: Self::DEFAULT_MAX_NESTING_DEPTH,
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn config_with(vars: &[(&str, &str)]) -> ParserConfig {
        ParserConfig::from_lookup(|key| {
            vars.iter()
                .find(|(name, _)| *name == key)
                .map(|(_, value)| (*value).to_string())
        })
    }

    #[test]
    fn defaults_without_overrides() {
        assert_eq!(config_with(&[]), ParserConfig::default());
        assert_eq!(ParserConfig::default().max_nesting_depth, 2048);
    }

    #[test]
    fn overrides_are_applied() {
        let config = config_with(&[("KTC_LAZY", "true"), ("KTC_MAX_DEPTH", "64")]);
        assert!(config.lazy);
        assert_eq!(config.max_nesting_depth, 64);
    }

    #[test]
    fn invalid_overrides_are_ignored() {
        let config = config_with(&[("KTC_LAZY", "maybe"), ("KTC_MAX_DEPTH", "-3")]);
        assert_eq!(config, ParserConfig::default());
        assert_eq!(config_with(&[("KTC_MAX_DEPTH", "0")]), ParserConfig::default());
    }
}
