//! Tests for the square-cell sweep: order, count, coverage and validation

#[cfg(test)]
mod tests {
    use innovation_grid::GridError;
    use innovation_grid::io::configuration::MAX_GRID_CELLS;
    use innovation_grid::spatial::bounds::BoundingBox;
    use innovation_grid::spatial::grid::{
        AxisSteps, Cell, expected_cell_count, generate_grid, sweep, validate_cell_size,
    };

    fn corners(cell: &Cell) -> (f64, f64, f64, f64) {
        let b = cell.bounds();
        (b.min[0], b.min[1], b.max[0], b.max[1])
    }

    // Tests the stepper stops before reaching the end value
    // Verified by using <= in the stepper bound
    #[test]
    fn test_axis_steps_exclusive_end() {
        let values: Vec<f64> = AxisSteps::new(0.0, 10.0, 2.5).collect();
        assert_eq!(values, vec![0.0, 2.5, 5.0, 7.5]);

        let partial: Vec<f64> = AxisSteps::new(1.0, 4.5, 1.0).collect();
        assert_eq!(partial, vec![1.0, 2.0, 3.0, 4.0]);
    }

    // Tests non-positive steps yield nothing instead of looping
    // Verified by removing the step sign guard
    #[test]
    fn test_axis_steps_non_positive_step() {
        assert_eq!(AxisSteps::new(0.0, 10.0, 0.0).count(), 0);
        assert_eq!(AxisSteps::new(0.0, 10.0, -1.0).count(), 0);
        assert_eq!(AxisSteps::new(0.0_f64, 10.0, f64::NAN).count(), 0);
    }

    // Tests a cell larger than the box yields exactly that single cell
    // Verified by starting the sweep at the box maximum
    #[test]
    fn test_single_cell_edge_case() {
        let grid = generate_grid(BoundingBox::new(0.0, 0.0, 10.0, 10.0), 100.0)
            .unwrap_or_else(|e| unreachable!("valid sweep failed: {e}"));

        assert_eq!(grid.len(), 1);
        assert_eq!(grid.cells().first().map(corners), Some((0.0, 0.0, 100.0, 100.0)));
    }

    // Tests the unit square with half-size cells in column-major sweep order
    // Verified by swapping the outer and inner steppers
    #[test]
    fn test_unit_square_sweep_order() {
        let grid = generate_grid(BoundingBox::new(0.0, 0.0, 1.0, 1.0), 0.5)
            .unwrap_or_else(|e| unreachable!("valid sweep failed: {e}"));

        let cells: Vec<_> = grid.iter().map(corners).collect();
        assert_eq!(
            cells,
            vec![
                (0.0, 0.0, 0.5, 0.5),
                (0.0, 0.5, 0.5, 1.0),
                (0.5, 0.0, 1.0, 0.5),
                (0.5, 0.5, 1.0, 1.0),
            ]
        );
    }

    // Tests the cell count matches ceil(width/s) * ceil(height/s)
    // Verified by flooring instead of ceiling in the expected count
    #[test]
    fn test_count_formula() {
        let cases = [
            (BoundingBox::new(0.0, 0.0, 10.0, 7.0), 3.0, 12),
            (BoundingBox::new(-5.0, 2.0, 20.0, 3.0), 2.5, 10),
            (BoundingBox::new(100.0, 200.0, 164.0, 232.0), 16.0, 8),
            (BoundingBox::new(0.0, 0.0, 10.0, 10.0), 10.0, 1),
        ];

        for (bounds, size, expected) in cases {
            let grid = generate_grid(bounds, size)
                .unwrap_or_else(|e| unreachable!("valid sweep failed: {e}"));
            assert_eq!(grid.len(), expected, "bounds {bounds:?} size {size}");
            assert!((expected_cell_count(&bounds, size) - expected as f64).abs() < f64::EPSILON);
        }
    }

    // Tests every sampled point of the box lies in some cell and no cells overlap
    // Verified by shrinking cells to 90% of the step
    #[test]
    fn test_coverage_and_non_overlap() {
        let bounds = BoundingBox::new(-3.0, 4.0, 7.5, 9.25);
        let grid =
            generate_grid(bounds, 1.25).unwrap_or_else(|e| unreachable!("valid sweep failed: {e}"));

        for i in 0..=20 {
            for j in 0..=20 {
                let point = [
                    (f64::from(i) / 20.0).mul_add(bounds.width(), bounds.min[0]),
                    (f64::from(j) / 20.0).mul_add(bounds.height(), bounds.min[1]),
                ];
                assert!(
                    grid.iter().any(|cell| cell.bounds().contains(point)),
                    "point {point:?} not covered"
                );
            }
        }

        let cells = grid.cells();
        for (a_index, a) in cells.iter().enumerate() {
            for b in cells.iter().skip(a_index + 1) {
                assert!(!a.bounds().overlaps(&b.bounds()), "{a:?} overlaps {b:?}");
            }
        }
    }

    // Tests the origin is the lower-left corner of the box
    // Verified by starting the sweep at zero
    #[test]
    fn test_origin_is_box_minimum() {
        let bounds = BoundingBox::new(-2_356_000.0, 269_000.0, 2_258_000.0, 3_173_000.0);
        let first = sweep(bounds, 100_000.0).next();

        assert_eq!(first, Some(Cell::new(-2_356_000.0, 269_000.0, 100_000.0)));
    }

    // Tests invalid edge lengths are rejected before sweeping
    // Verified by accepting zero in validate_cell_size
    #[test]
    fn test_invalid_cell_sizes() {
        let bounds = BoundingBox::new(0.0, 0.0, 1.0, 1.0);

        for size in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let result = generate_grid(bounds, size);
            assert!(
                matches!(
                    result,
                    Err(GridError::InvalidParameter {
                        parameter: "cell_size",
                        ..
                    })
                ),
                "size {size} accepted"
            );
            assert!(validate_cell_size(size).is_err());
        }
    }

    // Tests a box without area produces an empty grid
    // Verified by removing the degenerate early return
    #[test]
    fn test_degenerate_box_is_empty() {
        let grid = generate_grid(BoundingBox::new(5.0, 5.0, 5.0, 9.0), 1.0)
            .unwrap_or_else(|e| unreachable!("degenerate sweep failed: {e}"));

        assert!(grid.is_empty());
        assert!((grid.cell_size() - 1.0).abs() < f64::EPSILON);
    }

    // Tests sweeps beyond the cell limit are refused
    // Verified by skipping the limit check
    #[test]
    fn test_cell_limit() {
        let side = (MAX_GRID_CELLS as f64).sqrt().ceil() + 1.0;
        let result = generate_grid(BoundingBox::new(0.0, 0.0, side, side), 1.0);

        assert!(matches!(result, Err(GridError::InvalidParameter { .. })));
    }

    // Tests cell geometry helpers agree with the corners
    // Verified by using size instead of size squared for area
    #[test]
    fn test_cell_geometry() {
        use geo::Area;

        let cell = Cell::new(2.0, 3.0, 4.0);

        assert!((cell.area() - 16.0).abs() < f64::EPSILON);
        assert!((cell.to_polygon().unsigned_area() - 16.0).abs() < 1e-12);
        assert_eq!(cell.to_multi_polygon().0.len(), 1);
        assert_eq!(cell.bounds(), BoundingBox::new(2.0, 3.0, 6.0, 7.0));
    }
}
