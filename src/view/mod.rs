mod bindings;
mod component;

pub use bindings::NativeBindings;
pub use component::{NutrientView, VIEW_ARCHITECTURE};
