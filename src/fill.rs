//! Tolerance-based flood fill.
//!
//! Sampling source is the background+drawing composite so fills respect
//! line art on the background layer; writes go only to the drawing layer so
//! the background is never mutated.  Traversal is a DFS over packed flat
//! indices on the pre-extracted composite buffer.

use image::{Rgba, RgbaImage};

use crate::surface::Surface;

/// Per-channel color distance (0–255) a pixel may differ from the seed's
/// sampled color and still be filled.  Strict bound: a difference of exactly
/// this value is outside the region.
pub const TOLERANCE: u8 = 30;

/// Seeds darker than this on every RGB channel...
const OUTLINE_RGB_BELOW: u8 = 20;
/// ...and more opaque than this are treated as drawn outline boundary and
/// refuse to fill, so a stray tap on line art cannot erase it.
const OUTLINE_ALPHA_ABOVE: u8 = 200;

/// 4-connected stack-based flood fill seeded at `seed` (device pixels).
/// Returns whether any pixel changed.
pub fn flood_fill(
    drawing: &mut Surface,
    composite: &RgbaImage,
    seed: (u32, u32),
    target: Rgba<u8>,
) -> bool {
    let width = drawing.width();
    let height = drawing.height();
    if seed.0 >= width || seed.1 >= height {
        return false;
    }

    let flat = composite.as_raw();
    let wu = width as usize;
    let hu = height as usize;

    #[inline(always)]
    fn pix(flat: &[u8], idx: usize) -> [u8; 4] {
        let o = idx * 4;
        [flat[o], flat[o + 1], flat[o + 2], flat[o + 3]]
    }

    // All four channels within tolerance of the seed's sampled color.
    #[inline(always)]
    fn matches(p: [u8; 4], seed: [u8; 4]) -> bool {
        let tol = TOLERANCE as i16;
        (p[0] as i16 - seed[0] as i16).abs() < tol
            && (p[1] as i16 - seed[1] as i16).abs() < tol
            && (p[2] as i16 - seed[2] as i16).abs() < tol
            && (p[3] as i16 - seed[3] as i16).abs() < tol
    }

    let seed_idx = seed.1 as usize * wu + seed.0 as usize;
    let seed_color = pix(flat, seed_idx);

    // Seed already shows the target color: nothing to do.
    if seed_color[0] == target[0] && seed_color[1] == target[1] && seed_color[2] == target[2] {
        return false;
    }
    // Near-black, near-opaque seed is an outline boundary.
    if seed_color[0] < OUTLINE_RGB_BELOW
        && seed_color[1] < OUTLINE_RGB_BELOW
        && seed_color[2] < OUTLINE_RGB_BELOW
        && seed_color[3] > OUTLINE_ALPHA_ABOVE
    {
        return false;
    }

    let fill_px = Rgba([target[0], target[1], target[2], 255]);
    let mut visited = vec![false; wu * hu];
    let mut stack: Vec<u32> = Vec::with_capacity(4096);
    visited[seed_idx] = true;
    stack.push(seed_idx as u32);
    let mut changed = false;

    while let Some(idx) = stack.pop() {
        let idx = idx as usize;
        let x = (idx % wu) as u32;
        let y = (idx / wu) as u32;

        // Skip pixels the drawing layer already owns — including pixels this
        // very fill just painted — and anything outside tolerance.
        if drawing.get_pixel(x, y)[3] > 0 || !matches(pix(flat, idx), seed_color) {
            continue;
        }

        drawing.put_pixel(x, y, fill_px);
        changed = true;

        if x > 0 && !visited[idx - 1] {
            visited[idx - 1] = true;
            stack.push((idx - 1) as u32);
        }
        if x + 1 < width && !visited[idx + 1] {
            visited[idx + 1] = true;
            stack.push((idx + 1) as u32);
        }
        if y > 0 && !visited[idx - wu] {
            visited[idx - wu] = true;
            stack.push((idx - wu) as u32);
        }
        if y + 1 < height && !visited[idx + wu] {
            visited[idx + wu] = true;
            stack.push((idx + wu) as u32);
        }
    }

    changed
}
