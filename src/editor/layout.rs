//! Pane size arithmetic for the three-column layout.

/// Split `avail` pixels into three whole-pixel column widths.
///
/// The remainder of the integer division goes to the leftmost columns, so
/// the widths differ by at most one pixel and sum to `avail.floor()`.
pub fn split_three(avail: f32) -> [f32; 3] {
    let avail = avail.max(0.0).floor() as u32;
    let base = avail / 3;
    let rem = avail - base * 3;
    [
        (base + u32::from(rem > 0)) as f32,
        (base + u32::from(rem > 1)) as f32,
        base as f32,
    ]
}

/// Height of the upper half of a vertically split pane.
pub fn split_half(avail: f32) -> f32 {
    (avail.max(0.0) / 2.0).floor()
}
