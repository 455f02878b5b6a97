//! Fit-to-box: scale an image into a bounding box preserving aspect ratio,
//! then center it horizontally on the page.

/// Scaled size and horizontal placement for an image.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FitResult {
    pub width: f32,
    pub height: f32,
    pub x_offset: f32,
}

/// Two-step clamp: width first, then height. Equivalent to a uniform
/// `min(max_w/src_w, max_h/src_h, 1)` scale, kept in this form because it is
/// the observed behavior being reproduced.
///
/// Zero or negative intrinsic dimensions (failed decode) produce a
/// zero-size result; the caller treats that as a zero-height block.
pub fn fit(src_w: f32, src_h: f32, max_w: f32, max_h: f32, page_width: f32) -> FitResult {
    if src_w <= 0.0 || src_h <= 0.0 {
        return FitResult {
            width: 0.0,
            height: 0.0,
            x_offset: page_width / 2.0,
        };
    }

    let (scaled_w, scaled_h) = if src_w > max_w {
        (max_w, max_w / src_w * src_h)
    } else {
        (src_w, src_h)
    };

    let (final_w, final_h) = if scaled_h > max_h {
        (max_h / scaled_h * scaled_w, max_h)
    } else {
        (scaled_w, scaled_h)
    };

    FitResult {
        width: final_w,
        height: final_h,
        x_offset: (page_width - final_w) / 2.0,
    }
}
