#[derive(Eq, PartialEq, Copy, Clone, Debug, Hash)]
pub struct Width(pub usize);
#[derive(Eq, PartialEq, Copy, Clone, Debug, Hash)]
pub struct Height(pub usize);

/// Count of cells in a `width * height` grid.
#[inline]
pub fn cells_count(width: Width, height: Height) -> usize {
    width.0 * height.0
}
