use super::flags::RuntimeFlags;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Architecture {
    Legacy,
    FabricOnly,
    TurboModulesOnly,
    FabricAndTurboModules,
    Bridgeless,
}

impl Architecture {
    pub fn name(self) -> &'static str {
        match self {
            Self::Legacy => "Legacy (Paper)",
            Self::FabricOnly => "Fabric Only",
            Self::TurboModulesOnly => "TurboModules Only",
            Self::FabricAndTurboModules => "New Architecture (Fabric + TurboModules)",
            Self::Bridgeless => "Bridgeless",
        }
    }

    pub fn is_new_architecture(self) -> bool {
        !matches!(self, Self::Legacy)
    }
}

pub fn is_fabric_enabled(flags: &dyn RuntimeFlags) -> bool {
    flags.fabric().unwrap_or(false)
}

pub fn are_turbo_modules_enabled(flags: &dyn RuntimeFlags) -> bool {
    flags.turbo_modules().unwrap_or(false)
}

pub fn is_bridgeless_enabled(flags: &dyn RuntimeFlags) -> bool {
    flags.bridgeless().unwrap_or(false)
}

pub fn is_new_architecture_enabled(flags: &dyn RuntimeFlags) -> bool {
    is_fabric_enabled(flags) || are_turbo_modules_enabled(flags) || is_bridgeless_enabled(flags)
}

/// Bridgeless wins over the other two markers.
pub fn classify(flags: &dyn RuntimeFlags) -> Architecture {
    if is_bridgeless_enabled(flags) {
        return Architecture::Bridgeless;
    }
    match (is_fabric_enabled(flags), are_turbo_modules_enabled(flags)) {
        (true, true) => Architecture::FabricAndTurboModules,
        (true, false) => Architecture::FabricOnly,
        (false, true) => Architecture::TurboModulesOnly,
        (false, false) => Architecture::Legacy,
    }
}

pub fn architecture_name(flags: &dyn RuntimeFlags) -> &'static str {
    classify(flags).name()
}

pub fn log_architecture_info(flags: &dyn RuntimeFlags) {
    tracing::info!(
        architecture = architecture_name(flags),
        fabric = is_fabric_enabled(flags),
        turbo_modules = are_turbo_modules_enabled(flags),
        bridgeless = is_bridgeless_enabled(flags),
        "host runtime architecture"
    );
}
