use std::path::PathBuf;

/// Environment variable that relocates the power supply directory.
pub const POWER_SUPPLY_DIR_ENV: &str = "BATS_POWER_SUPPLY_DIR";

/// Immutable settings shared by the reader, the enumerator and the aggregator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Directory holding one entry per power supply.
    pub power_supply_dir: PathBuf,
    /// Literal byte prefix an entry name needs to count as a battery.
    pub battery_prefix: String,
    /// Naming schemes tried in order for `full`/`now`.
    pub charge_prefixes: Vec<String>,
    /// Bytes of `status` kept per battery.
    pub status_len: usize,
    /// Argument token that switches on verbose mode.
    pub verbose_flag: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            power_supply_dir: PathBuf::from("/sys/class/power_supply"),
            battery_prefix: "BAT".to_string(),
            charge_prefixes: vec!["charge_".to_string(), "energy_".to_string()],
            status_len: 1,
            verbose_flag: "-v".to_string(),
        }
    }
}

impl Config {
    /// Defaults, with `BATS_POWER_SUPPLY_DIR` overriding the directory when set.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var_os(key))
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<std::ffi::OsString>) -> Self {
        let mut config = Self::default();
        if let Some(dir) = lookup(POWER_SUPPLY_DIR_ENV).filter(|d| !d.is_empty()) {
            config.power_supply_dir = PathBuf::from(dir);
        }
        config
    }

    /// Same configuration rooted at a different power supply directory.
    pub fn with_power_supply_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.power_supply_dir = dir.into();
        self
    }
}
