//! Component labels for fixed-size vector accessors.

/// Accessor labels in index order: `get_x`, `get_y`, `get_z`, `get_w`.
pub const COMPONENTS: [&str; 4] = ["x", "y", "z", "w"];

/// Largest dimensionality with a labelled component for every index.
pub const MAX_DIMENSION: usize = COMPONENTS.len();

/// Returns the accessor label for component `index`, or `None` past `w`.
pub fn label(index: usize) -> Option<&'static str> {
    COMPONENTS.get(index).copied()
}
