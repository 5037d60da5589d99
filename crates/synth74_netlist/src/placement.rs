//! Non-normative schematic placement grid.
//!
//! Lays components out on a square-ish grid purely for visualization; this
//! output has no bearing on netlist correctness.

const COLUMN_SPACING: i64 = 2000;
const ROW_SPACING: i64 = 1500;
const ORIGIN_X: i64 = 1000;
const ORIGIN_Y: i64 = 1000;

/// A component's placed position in schematic units.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    /// The component's reference designator index, matching emission order.
    pub index: usize,
    /// X coordinate in schematic units.
    pub x: i64,
    /// Y coordinate in schematic units.
    pub y: i64,
}

/// Places `count` components on a `ceil(sqrt(count))`-column grid, spaced
/// `(2000, 1500)` apart starting at origin `(1000, 1000)`.
pub fn grid_placements(count: usize) -> Vec<Placement> {
    if count == 0 {
        return Vec::new();
    }
    let columns = (count as f64).sqrt().ceil() as usize;
    (0..count)
        .map(|index| {
            let col = index % columns;
            let row = index / columns;
            Placement {
                index,
                x: ORIGIN_X + (col as i64) * COLUMN_SPACING,
                y: ORIGIN_Y + (row as i64) * ROW_SPACING,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_grid_has_no_placements() {
        assert!(grid_placements(0).is_empty());
    }

    #[test]
    fn single_component_sits_at_origin() {
        let placements = grid_placements(1);
        assert_eq!(placements[0], Placement { index: 0, x: 1000, y: 1000 });
    }

    #[test]
    fn four_components_form_a_two_by_two_grid() {
        let placements = grid_placements(4);
        assert_eq!(placements.len(), 4);
        assert_eq!(placements[0], Placement { index: 0, x: 1000, y: 1000 });
        assert_eq!(placements[1], Placement { index: 1, x: 3000, y: 1000 });
        assert_eq!(placements[2], Placement { index: 2, x: 1000, y: 2500 });
        assert_eq!(placements[3], Placement { index: 3, x: 3000, y: 2500 });
    }

    #[test]
    fn nine_components_use_three_columns() {
        let placements = grid_placements(9);
        assert_eq!(placements[8], Placement { index: 8, x: 3000, y: 4000 });
    }

    #[test]
    fn five_components_use_three_columns_not_two() {
        // ceil(sqrt(5)) = 3, so the fourth component starts a new row at
        // column 0 rather than wrapping after two columns.
        let placements = grid_placements(5);
        assert_eq!(placements[3], Placement { index: 3, x: 1000, y: 2500 });
    }
}
