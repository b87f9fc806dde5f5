//! Length changes for per-point attribute arrays.

/// Resamples `rows` to exactly `len` rows by linear interpolation.
///
/// Row `i` of the output sits at continuous index `i * (n - 1) / (len - 1)`
/// of the input and blends its two neighbours, so the first and last rows
/// are always preserved. Works for both growing and shrinking.
///
/// Returns `None` when asked to grow an empty input, since there is nothing
/// to interpolate from.
pub fn resize_with_interpolation<const W: usize>(
    rows: &[[f32; W]],
    len: usize,
) -> Option<Vec<[f32; W]>> {
    let n = rows.len();
    if n == len {
        return Some(rows.to_vec());
    }
    if len == 0 {
        return Some(Vec::new());
    }
    match n {
        0 => None,
        1 => Some(vec![rows[0]; len]),
        _ if len == 1 => Some(vec![rows[0]]),
        _ => {
            let step = (n - 1) as f64 / (len - 1) as f64;
            let out = (0..len)
                .map(|i| {
                    if i + 1 == len {
                        return rows[n - 1];
                    }
                    let ci = i as f64 * step;
                    let lo = (ci.floor() as usize).min(n - 1);
                    let hi = (ci.ceil() as usize).min(n - 1);
                    let t = (ci - lo as f64) as f32;
                    lerp_row(&rows[lo], &rows[hi], t)
                })
                .collect();
            Some(out)
        }
    }
}

/// Truncates `rows` to `len`, or pads it by repeating the last row.
///
/// `fill` is used as the padding row when `rows` is empty. Existing rows
/// keep their positions.
pub fn resize_preserving_order<const W: usize>(
    rows: &[[f32; W]],
    len: usize,
    fill: [f32; W],
) -> Vec<[f32; W]> {
    if len <= rows.len() {
        return rows[..len].to_vec();
    }
    let pad = rows.last().copied().unwrap_or(fill);
    let mut out = Vec::with_capacity(len);
    out.extend_from_slice(rows);
    out.resize(len, pad);
    out
}

fn lerp_row<const W: usize>(a: &[f32; W], b: &[f32; W], t: f32) -> [f32; W] {
    let mut out = [0.0; W];
    for (k, v) in out.iter_mut().enumerate() {
        *v = a[k] + (b[k] - a[k]) * t;
    }
    out
}
