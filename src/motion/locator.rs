use crate::entity::Element;
use crate::point::Point2i;

/// Read-only spatial queries offered to the brains and to the path
/// planner.
///
/// A brain must not keep indices or element handles across ticks: the
/// backing storage is compacted whenever deleted elements are pruned.
/// Mutating another element goes through an influence, applied by the
/// world once every brain has run.
pub trait Locator {
    /// Returns true when an element occupies the given position. Non
    /// solid elements (ants and pheromones) are only taken into account
    /// when `include_non_solid` is set.
    fn obstructed(&self, p: Point2i, include_non_solid: bool) -> bool;

    /// Gets the indices of all the elements strictly closer to `center`
    /// than the given distance.
    fn visible(&self, center: Point2i, radius: f32) -> Vec<usize>;

    /// Gets read-only access to the element at the specified index, if
    /// any.
    fn get(&self, index: usize) -> Option<&Element>;
}
