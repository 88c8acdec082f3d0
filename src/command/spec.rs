use super::types::{ArgKind, ArgSpec, CommandId, CommandSpec};

const NO_ARGS: [ArgSpec; 0] = [];
const ARGS_ENTER_CREATION_MODE: [ArgSpec; 1] = [ArgSpec {
    name: "annotationType",
    kind: ArgKind::String,
    required: false,
}];
const ARGS_SELECT_ANNOTATIONS: [ArgSpec; 2] = [
    ArgSpec {
        name: "annotations",
        kind: ArgKind::Json,
        required: true,
    },
    ArgSpec {
        name: "showContextualMenu",
        kind: ArgKind::Bool,
        required: false,
    },
];
const ARGS_SET_PAGE_INDEX: [ArgSpec; 2] = [
    ArgSpec {
        name: "pageIndex",
        kind: ArgKind::Integer,
        required: true,
    },
    ArgSpec {
        name: "animated",
        kind: ArgKind::Bool,
        required: true,
    },
];
const ARGS_SET_TOOLBAR: [ArgSpec; 1] = [ArgSpec {
    name: "toolbar",
    kind: ArgKind::Json,
    required: true,
}];
const ARGS_GET_TOOLBAR: [ArgSpec; 1] = [ArgSpec {
    name: "viewMode",
    kind: ArgKind::String,
    required: false,
}];
const ARGS_SET_MEASUREMENTS: [ArgSpec; 1] = [ArgSpec {
    name: "configurations",
    kind: ArgKind::Json,
    required: true,
}];
const ARGS_SET_EXCLUDED: [ArgSpec; 1] = [ArgSpec {
    name: "annotations",
    kind: ArgKind::Json,
    required: true,
}];
const ARGS_SET_UI_VISIBLE: [ArgSpec; 1] = [ArgSpec {
    name: "visible",
    kind: ArgKind::Bool,
    required: true,
}];

const COMMAND_SPECS: [CommandSpec; 13] = [
    CommandSpec {
        id: CommandId::EnterAnnotationCreationMode,
        title: "Enter Annotation Creation Mode",
        args: &ARGS_ENTER_CREATION_MODE,
    },
    CommandSpec {
        id: CommandId::ExitCurrentlyActiveMode,
        title: "Exit Currently Active Mode",
        args: &NO_ARGS,
    },
    CommandSpec {
        id: CommandId::ClearSelectedAnnotations,
        title: "Clear Selected Annotations",
        args: &NO_ARGS,
    },
    CommandSpec {
        id: CommandId::SelectAnnotations,
        title: "Select Annotations",
        args: &ARGS_SELECT_ANNOTATIONS,
    },
    CommandSpec {
        id: CommandId::SetPageIndex,
        title: "Set Page Index",
        args: &ARGS_SET_PAGE_INDEX,
    },
    CommandSpec {
        id: CommandId::SetToolbar,
        title: "Set Toolbar",
        args: &ARGS_SET_TOOLBAR,
    },
    CommandSpec {
        id: CommandId::GetToolbar,
        title: "Get Toolbar",
        args: &ARGS_GET_TOOLBAR,
    },
    CommandSpec {
        id: CommandId::SetMeasurementValueConfigurations,
        title: "Set Measurement Value Configurations",
        args: &ARGS_SET_MEASUREMENTS,
    },
    CommandSpec {
        id: CommandId::GetMeasurementValueConfigurations,
        title: "Get Measurement Value Configurations",
        args: &NO_ARGS,
    },
    CommandSpec {
        id: CommandId::GetConfiguration,
        title: "Get Configuration",
        args: &NO_ARGS,
    },
    CommandSpec {
        id: CommandId::SetExcludedAnnotations,
        title: "Set Excluded Annotations",
        args: &ARGS_SET_EXCLUDED,
    },
    CommandSpec {
        id: CommandId::SetUserInterfaceVisible,
        title: "Set User Interface Visible",
        args: &ARGS_SET_UI_VISIBLE,
    },
    CommandSpec {
        id: CommandId::DestroyView,
        title: "Destroy View",
        args: &NO_ARGS,
    },
];

pub fn command_registry() -> &'static [CommandSpec] {
    &COMMAND_SPECS
}

pub fn all_command_specs() -> Vec<CommandSpec> {
    COMMAND_SPECS.to_vec()
}

pub fn find_command_spec(name: &str) -> Option<&'static CommandSpec> {
    COMMAND_SPECS.iter().find(|spec| spec.name() == name)
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::{command_registry, find_command_spec};

    #[test]
    fn catalogue_names_are_unique() {
        let names: HashSet<_> = command_registry().iter().map(|spec| spec.name()).collect();
        assert_eq!(names.len(), command_registry().len());
    }

    #[test]
    fn finds_spec_by_native_method_name() {
        let spec = find_command_spec("setPageIndex").expect("setPageIndex is catalogued");
        assert_eq!(spec.args.len(), 2);
        assert!(spec.args.iter().all(|arg| arg.required));
        assert!(find_command_spec("rotatePage").is_none());
    }
}
