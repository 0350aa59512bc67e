use kaomoji_core::SchedulerConfig;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ColorMode {
    /// 24-bit ANSI escapes for colors that resolve, bold for headings.
    Ansi,
    Plain,
}

#[derive(Clone, Debug, PartialEq)]
pub struct TerminalConfig {
    pub width: u32,
    pub height: u32,
    pub color: ColorMode,
    pub max_settle_rounds: usize,
}

impl Default for TerminalConfig {
    fn default() -> Self {
        let sched = SchedulerConfig::default();
        Self {
            width: sched.size.0,
            height: sched.size.1,
            color: ColorMode::Ansi,
            max_settle_rounds: sched.max_settle_rounds,
        }
    }
}

impl TerminalConfig {
    /// Reads `NO_COLOR` and `KAOMOJI_MAX_SETTLE_ROUNDS`.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut cfg = Self::default();
        if lookup("NO_COLOR").is_some_and(|v| !v.is_empty()) {
            cfg.color = ColorMode::Plain;
        }
        if let Some(raw) = lookup("KAOMOJI_MAX_SETTLE_ROUNDS") {
            match raw.trim().parse::<usize>() {
                Ok(n) if n > 0 => cfg.max_settle_rounds = n,
                _ => log::warn!(
                    "ignoring KAOMOJI_MAX_SETTLE_ROUNDS={raw:?}; using {}",
                    cfg.max_settle_rounds
                ),
            }
        }
        cfg
    }

    pub fn plain(mut self) -> Self {
        self.color = ColorMode::Plain;
        self
    }

    pub fn scheduler_config(&self) -> SchedulerConfig {
        SchedulerConfig::default()
            .size(self.width, self.height)
            .max_settle_rounds(self.max_settle_rounds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |k| map.get(k).cloned()
    }

    #[test]
    fn test_defaults_without_env() {
        let cfg = TerminalConfig::from_lookup(lookup(&[]));
        assert_eq!(cfg, TerminalConfig::default());
        assert_eq!(cfg.color, ColorMode::Ansi);
    }

    #[test]
    fn test_no_color_must_be_non_empty() {
        assert_eq!(
            TerminalConfig::from_lookup(lookup(&[("NO_COLOR", "1")])).color,
            ColorMode::Plain
        );
        assert_eq!(
            TerminalConfig::from_lookup(lookup(&[("NO_COLOR", "")])).color,
            ColorMode::Ansi
        );
    }

    #[test]
    fn test_settle_rounds_override() {
        let cfg = TerminalConfig::from_lookup(lookup(&[("KAOMOJI_MAX_SETTLE_ROUNDS", "5")]));
        assert_eq!(cfg.scheduler_config().max_settle_rounds, 5);

        let bad = TerminalConfig::from_lookup(lookup(&[("KAOMOJI_MAX_SETTLE_ROUNDS", "zero")]));
        assert_eq!(bad.max_settle_rounds, 64);
    }
}
