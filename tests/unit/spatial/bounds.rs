//! Tests for bounding box extents, overlap and validation

#[cfg(test)]
mod tests {
    use geo::{Rect, coord};
    use innovation_grid::GridError;
    use innovation_grid::spatial::bounds::BoundingBox;

    // Tests width and height derive from the corners
    // Verified by swapping min and max in width
    #[test]
    fn test_extent() {
        let bounds = BoundingBox::new(-2.0, 1.0, 8.0, 4.0);

        assert!((bounds.width() - 10.0).abs() < f64::EPSILON);
        assert!((bounds.height() - 3.0).abs() < f64::EPSILON);
        assert!(!bounds.is_degenerate());
    }

    // Tests boxes without area are degenerate
    // Verified by using >= in the area check
    #[test]
    fn test_degenerate_boxes() {
        assert!(BoundingBox::new(0.0, 0.0, 0.0, 5.0).is_degenerate());
        assert!(BoundingBox::new(0.0, 3.0, 5.0, 3.0).is_degenerate());
        assert!(BoundingBox::new(1.0, 1.0, 1.0, 1.0).is_degenerate());
    }

    // Tests edge-touching boxes do not overlap while interior-sharing ones do
    // Verified by using <= in the overlap comparison
    #[test]
    fn test_overlap_excludes_touching() {
        let a = BoundingBox::new(0.0, 0.0, 1.0, 1.0);
        let right = BoundingBox::new(1.0, 0.0, 2.0, 1.0);
        let corner = BoundingBox::new(1.0, 1.0, 2.0, 2.0);
        let inner = BoundingBox::new(0.5, 0.5, 1.5, 1.5);

        assert!(!a.overlaps(&right));
        assert!(!a.overlaps(&corner));
        assert!(a.overlaps(&inner));
        assert!(inner.overlaps(&a));
    }

    // Tests closed containment includes the boundary
    // Verified by using strict comparisons
    #[test]
    fn test_contains_boundary_points() {
        let bounds = BoundingBox::new(0.0, 0.0, 2.0, 2.0);

        assert!(bounds.contains([0.0, 0.0]));
        assert!(bounds.contains([2.0, 1.0]));
        assert!(!bounds.contains([2.1, 1.0]));
    }

    // Tests validation rejects non-finite and inverted corners
    // Verified by skipping the finiteness check
    #[test]
    fn test_validate() {
        assert!(BoundingBox::new(0.0, 0.0, 1.0, 1.0).validate().is_ok());
        assert!(BoundingBox::new(0.0, 0.0, 0.0, 0.0).validate().is_ok());

        let inverted = BoundingBox::new(2.0, 0.0, 1.0, 1.0).validate();
        assert!(matches!(
            inverted,
            Err(GridError::InvalidParameter {
                parameter: "bounding_box",
                ..
            })
        ));
        assert!(BoundingBox::new(f64::NAN, 0.0, 1.0, 1.0).validate().is_err());
        assert!(
            BoundingBox::new(0.0, 0.0, f64::INFINITY, 1.0)
                .validate()
                .is_err()
        );
    }

    // Tests conversion to and from geo rectangles preserves corners
    // Verified by transposing x and y in the conversion
    #[test]
    fn test_rect_conversion() {
        let rect = Rect::new(coord! { x: 3.0, y: -1.0 }, coord! { x: -2.0, y: 5.0 });
        let bounds = BoundingBox::from(rect);

        assert_eq!(bounds, BoundingBox::new(-2.0, -1.0, 3.0, 5.0));
        assert_eq!(bounds.to_rect().min(), coord! { x: -2.0, y: -1.0 });
        assert_eq!(bounds.to_rect().max(), coord! { x: 3.0, y: 5.0 });
    }
}
