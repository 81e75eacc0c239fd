//! Information-transfer primitives and the similarity / knowledge algebra.
//!
//! All three transfer primitives operate on byte buffers and respect the
//! sliding-window capacity of [`StateBuffer`] — a donation that overflows
//! the recipient simply evicts its oldest bytes.

use ew_core::{StateBuffer, WorldRng};

// ── Transfer primitives ───────────────────────────────────────────────────────

/// Symmetric exchange: `floor(len · rate)` bytes from a random window of
/// each buffer are appended to the other.  Both donations are cut from the
/// pre-exchange contents, so the effect is symmetric.  Returns
/// `(a_to_b, b_to_a)` byte counts.
pub fn exchange(
    a: &mut StateBuffer,
    b: &mut StateBuffer,
    rate: f64,
    rng: &mut WorldRng,
) -> (usize, usize) {
    let donation_a = window(a.as_slice(), rate, rng);
    let donation_b = window(b.as_slice(), rate, rng);
    b.append(&donation_a);
    a.append(&donation_b);
    (donation_a.len(), donation_b.len())
}

/// A `floor(len · rate)`-byte slice starting at a random offset.
fn window(data: &[u8], rate: f64, rng: &mut WorldRng) -> Vec<u8> {
    let n = (data.len() as f64 * rate.clamp(0.0, 1.0)).floor() as usize;
    if n == 0 {
        return Vec::new();
    }
    let start = rng.random_int(0, (data.len() - n) as i64) as usize;
    data[start..start + n].to_vec()
}

/// Inherited state for a newborn: a byte-wise mix of the parents (each index
/// drawn from whichever parent covers it, at random when both do), then
/// `floor(bits · mutation_rate)` random bit flips.
pub fn inherit(
    parent: &[u8],
    partner: Option<&[u8]>,
    mutation_rate: f64,
    rng: &mut WorldRng,
) -> Vec<u8> {
    let mut bytes = match partner {
        None => parent.to_vec(),
        Some(other) => {
            let len = parent.len().max(other.len());
            (0..len)
                .map(|i| match (parent.get(i), other.get(i)) {
                    (Some(&p), Some(&q)) => {
                        if rng.random() < 0.5 {
                            p
                        } else {
                            q
                        }
                    }
                    (Some(&p), None) => p,
                    (None, Some(&q)) => q,
                    (None, None) => unreachable!("index below max parent length"),
                })
                .collect()
        }
    };

    let flips = (bytes.len() as f64 * 8.0 * mutation_rate.clamp(0.0, 1.0)).floor() as usize;
    for _ in 0..flips {
        rng.flip_random_bit(&mut bytes);
    }
    bytes
}

/// Acquisition from an artifact: append `floor(len · amount)` leading bytes
/// of `data` to the entity's state.  Returns the byte count.
pub fn acquire(state: &mut StateBuffer, data: &[u8], amount: f64) -> usize {
    let n = (data.len() as f64 * amount.clamp(0.0, 1.0)).floor() as usize;
    state.append(&data[..n]);
    n
}

// ── Similarity & knowledge bonus ──────────────────────────────────────────────

/// Byte-level similarity of two buffers in [0, 1].
///
/// Exact-match fraction over the common prefix, discounted by half the
/// relative length mismatch.  Empty-vs-anything is 0.
pub fn similarity(a: &[u8], b: &[u8]) -> f64 {
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }
    let m = a.len().min(b.len());
    let max_len = a.len().max(b.len());
    let matches = a[..m].iter().zip(&b[..m]).filter(|(x, y)| x == y).count();
    let base_match = matches as f64 / m as f64;
    let length_penalty = (max_len - m) as f64 / max_len as f64;
    (base_match * (1.0 - 0.5 * length_penalty)).clamp(0.0, 1.0)
}

/// Repair multiplier from similarity: 1.0 up to the 0.5 elbow, then linear
/// to 2.0 at similarity 1.
pub fn knowledge_bonus(sim: f64) -> f64 {
    if sim <= 0.5 {
        1.0
    } else {
        1.0 + (sim - 0.5) * 2.0
    }
}
