//! Pure resize planning for one compression attempt.
//!
//! Everything here is deterministic arithmetic on source and target
//! dimensions, with no allocation and no codec calls, so the full policy is
//! testable without images.

/// Default cap on the larger side of an image when the caller gives no
/// target dimensions.
pub const MAX_DIMENSION: i32 = 6000;

/// The computed scale factor and output dimensions for one attempt.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResizePlan {
    /// Uniform scale factor, always > 0. Exactly 1.0 when no resize runs.
    pub scale: f64,
    pub width: i32,
    pub height: i32,
    pub needs_resize: bool,
}

impl ResizePlan {
    /// Plan that leaves the image untouched.
    pub fn identity(width: i32, height: i32) -> Self {
        Self {
            scale: 1.0,
            width,
            height,
            needs_resize: false,
        }
    }

    /// Plan for a fixed uniform scale (quality-search pre-resize).
    pub fn uniform(width: i32, height: i32, scale: f64) -> Self {
        Self {
            scale,
            width: scale_dim(width, scale),
            height: scale_dim(height, scale),
            needs_resize: true,
        }
    }
}

/// Computes the resize plan for one attempt.
///
/// Policy, in priority order:
/// 1. Both targets positive: fit inside the requested box. The smaller of
///    the two per-axis scales wins, so when they differ one requested
///    dimension is deliberately not reached.
/// 2. One target positive: that dimension's ratio drives the scale and the
///    other dimension follows it (aspect ratio is never forced).
/// 3. No targets: scale down only when the larger side exceeds `cap_px`.
///
/// Output dimensions are rounded to the nearest integer and never below 1.
pub fn plan_resize(
    source_width: i32,
    source_height: i32,
    target_width: i32,
    target_height: i32,
    cap_px: i32,
) -> ResizePlan {
    let (src_w, src_h) = (source_width as f64, source_height as f64);

    let scale = if target_width > 0 && target_height > 0 {
        let scale_x = target_width as f64 / src_w;
        let scale_y = target_height as f64 / src_h;
        scale_x.min(scale_y)
    } else if target_width > 0 {
        target_width as f64 / src_w
    } else if target_height > 0 {
        target_height as f64 / src_h
    } else {
        let longest = source_width.max(source_height);
        if longest > cap_px {
            cap_px as f64 / longest as f64
        } else {
            1.0
        }
    };

    // A scale that would not change the image is treated as no resize.
    if (scale - 1.0).abs() < f64::EPSILON {
        return ResizePlan::identity(source_width, source_height);
    }

    ResizePlan {
        scale,
        width: scale_dim(source_width, scale),
        height: scale_dim(source_height, scale),
        needs_resize: true,
    }
}

fn scale_dim(dim: i32, scale: f64) -> i32 {
    ((dim as f64 * scale).round() as i32).max(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn both_targets_use_more_restrictive_scale() {
        // scale_x = 0.48, scale_y = 0.36 -> the smaller one wins
        let plan = plan_resize(4000, 3000, 1920, 1080, MAX_DIMENSION);
        assert!(plan.needs_resize);
        assert!((plan.scale - 0.36).abs() < 1e-9);
        assert_eq!((plan.width, plan.height), (1440, 1080));
    }

    #[test]
    fn width_only_preserves_aspect_ratio() {
        let plan = plan_resize(4000, 3000, 1920, 0, MAX_DIMENSION);
        assert_eq!((plan.width, plan.height), (1920, 1440));
    }

    #[test]
    fn height_only_preserves_aspect_ratio() {
        let plan = plan_resize(4000, 3000, 0, 1500, MAX_DIMENSION);
        assert_eq!((plan.width, plan.height), (2000, 1500));
    }

    #[test]
    fn no_targets_applies_cap_on_longest_side() {
        let plan = plan_resize(8000, 2000, 0, 0, 6000);
        assert!(plan.needs_resize);
        assert_eq!((plan.width, plan.height), (6000, 1500));
    }

    #[test]
    fn no_targets_under_cap_is_identity() {
        let plan = plan_resize(800, 600, 0, 0, 6000);
        assert!(!plan.needs_resize);
        assert_eq!(plan.scale, 1.0);
        assert_eq!((plan.width, plan.height), (800, 600));
    }

    #[test]
    fn cap_applies_to_portrait_sources() {
        let plan = plan_resize(2000, 8000, 0, 0, 6000);
        assert_eq!((plan.width, plan.height), (1500, 6000));
    }

    #[test]
    fn targets_equal_to_source_are_identity() {
        let plan = plan_resize(1920, 1080, 1920, 1080, MAX_DIMENSION);
        assert!(!plan.needs_resize);
    }

    #[test]
    fn extreme_downscale_never_drops_below_one_pixel() {
        let plan = plan_resize(10000, 10, 1, 0, MAX_DIMENSION);
        assert_eq!(plan.width, 1);
        assert!(plan.height >= 1);
    }

    #[test]
    fn uniform_plan_scales_both_dimensions() {
        let plan = ResizePlan::uniform(1000, 500, 1.3);
        assert_eq!((plan.width, plan.height), (1300, 650));
        assert!(plan.needs_resize);
    }
}
