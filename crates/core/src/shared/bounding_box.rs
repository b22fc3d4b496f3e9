/// A detected face rectangle in normalized image coordinates.
///
/// All four fields are fractions of the source image dimensions, so the
/// box stays valid across thumbnails and rotations of the same photo.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoundingBox {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl BoundingBox {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Converts to pixel coordinates `(x, y, width, height)` for a given
    /// image size. Rounds toward zero, matching how crop regions are
    /// resolved at the detector boundary.
    pub fn to_pixel_rect(&self, image_width: u32, image_height: u32) -> (i32, i32, i32, i32) {
        (
            (self.x * image_width as f32) as i32,
            (self.y * image_height as f32) as i32,
            (self.width * image_width as f32) as i32,
            (self.height * image_height as f32) as i32,
        )
    }

    /// Clamps the box to the unit square. Detection backends occasionally
    /// emit coordinates slightly outside `[0, 1]` for faces at the frame
    /// edge; the clamped box keeps `x + width` and `y + height` in range.
    pub fn clamped_unit(&self) -> BoundingBox {
        let x = self.x.clamp(0.0, 1.0);
        let y = self.y.clamp(0.0, 1.0);
        BoundingBox {
            x,
            y,
            width: self.width.clamp(0.0, 1.0 - x),
            height: self.height.clamp(0.0, 1.0 - y),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_to_pixel_rect_scales_by_image_size() {
        let bbox = BoundingBox::new(0.25, 0.5, 0.5, 0.25);
        assert_eq!(bbox.to_pixel_rect(400, 200), (100, 100, 200, 50));
    }

    #[test]
    fn test_to_pixel_rect_full_frame() {
        let bbox = BoundingBox::new(0.0, 0.0, 1.0, 1.0);
        assert_eq!(bbox.to_pixel_rect(640, 480), (0, 0, 640, 480));
    }

    #[test]
    fn test_clamped_unit_in_range_box_unchanged() {
        let bbox = BoundingBox::new(0.1, 0.2, 0.3, 0.4);
        assert_eq!(bbox.clamped_unit(), bbox);
    }

    #[test]
    fn test_clamped_unit_negative_origin() {
        let clamped = BoundingBox::new(-0.1, -0.2, 0.5, 0.5).clamped_unit();
        assert_relative_eq!(clamped.x, 0.0);
        assert_relative_eq!(clamped.y, 0.0);
        assert_relative_eq!(clamped.width, 0.5);
        assert_relative_eq!(clamped.height, 0.5);
    }

    #[test]
    fn test_clamped_unit_overflowing_extent() {
        let clamped = BoundingBox::new(0.8, 0.9, 0.5, 0.5).clamped_unit();
        assert_relative_eq!(clamped.width, 0.2, epsilon = 1e-6);
        assert_relative_eq!(clamped.height, 0.1, epsilon = 1e-6);
    }
}
