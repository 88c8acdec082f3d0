use std::env;

/// Read access to the process-wide markers the host runtime sets before
/// the bridge is consulted. `None` means the marker is absent.
pub trait RuntimeFlags: Send + Sync {
    fn fabric(&self) -> Option<bool>;
    fn turbo_modules(&self) -> Option<bool>;
    fn bridgeless(&self) -> Option<bool>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StaticFlags {
    pub fabric: Option<bool>,
    pub turbo_modules: Option<bool>,
    pub bridgeless: Option<bool>,
}

impl StaticFlags {
    pub fn legacy() -> Self {
        Self::default()
    }

    pub fn new(fabric: bool, turbo_modules: bool, bridgeless: bool) -> Self {
        Self {
            fabric: Some(fabric),
            turbo_modules: Some(turbo_modules),
            bridgeless: Some(bridgeless),
        }
    }

    /// Fills unset markers from `fallback`.
    pub fn or_else(self, fallback: &dyn RuntimeFlags) -> Self {
        Self {
            fabric: self.fabric.or_else(|| fallback.fabric()),
            turbo_modules: self.turbo_modules.or_else(|| fallback.turbo_modules()),
            bridgeless: self.bridgeless.or_else(|| fallback.bridgeless()),
        }
    }
}

impl RuntimeFlags for StaticFlags {
    fn fabric(&self) -> Option<bool> {
        self.fabric
    }

    fn turbo_modules(&self) -> Option<bool> {
        self.turbo_modules
    }

    fn bridgeless(&self) -> Option<bool> {
        self.bridgeless
    }
}

/// Markers exported by a host process through `NVB_FABRIC`,
/// `NVB_TURBO_MODULES` and `NVB_BRIDGELESS`.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnvFlags;

impl EnvFlags {
    const FABRIC: &'static str = "NVB_FABRIC";
    const TURBO_MODULES: &'static str = "NVB_TURBO_MODULES";
    const BRIDGELESS: &'static str = "NVB_BRIDGELESS";
}

impl RuntimeFlags for EnvFlags {
    fn fabric(&self) -> Option<bool> {
        read_env_flag(Self::FABRIC)
    }

    fn turbo_modules(&self) -> Option<bool> {
        read_env_flag(Self::TURBO_MODULES)
    }

    fn bridgeless(&self) -> Option<bool> {
        read_env_flag(Self::BRIDGELESS)
    }
}

fn read_env_flag(name: &str) -> Option<bool> {
    let value = env::var_os(name)?;
    Some(parse_flag(&value.to_string_lossy()))
}

pub(crate) fn parse_flag(raw: &str) -> bool {
    matches!(
        raw.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

#[cfg(test)]
mod tests {
    use super::{RuntimeFlags, StaticFlags, parse_flag};

    #[test]
    fn parse_flag_accepts_common_truthy_spellings_only() {
        for raw in ["1", "true", "TRUE", " yes ", "on"] {
            assert!(parse_flag(raw), "{raw:?} should be set");
        }
        for raw in ["", "0", "false", "off", "enabled"] {
            assert!(!parse_flag(raw), "{raw:?} should be unset");
        }
    }

    #[test]
    fn or_else_only_fills_missing_markers() {
        let overrides = StaticFlags {
            fabric: Some(false),
            turbo_modules: None,
            bridgeless: None,
        };
        let fallback = StaticFlags::new(true, true, false);

        let merged = overrides.or_else(&fallback);
        assert_eq!(merged.fabric(), Some(false));
        assert_eq!(merged.turbo_modules(), Some(true));
        assert_eq!(merged.bridgeless(), Some(false));
    }
}
