use crate::classify::Visibility;

/// Opening line of an inlined module: `pub mod name {` or `mod name {`
pub fn opening_boundary(visibility: Visibility, module_name: &str) -> String {
    format!("{}mod {module_name} {{\n", visibility.prefix())
}

/// Closing line of an inlined module, annotated with its name for traceability
pub fn closing_boundary(module_name: &str) -> String {
    format!("}} // mod {module_name}\n")
}
