//! Resource regeneration toward capacity.

use ew_core::ResourceKind;
use ew_space::Space;

/// Regenerate every node's resources: `amount += (capacity − amount) · rate`,
/// clamped at capacity.  The energy kind uses `energy_rate`; the other kinds
/// use `secondary_rate` when configured and are inert otherwise.
///
/// A zero rate is a no-op — it must not clamp amounts that death releases
/// pushed above capacity.
pub fn apply(space: &mut Space, energy_rate: f64, secondary_rate: Option<f64>) {
    for node_id in space.node_ids().collect::<Vec<_>>() {
        let node = space.node_mut(node_id).expect("node exists");
        for kind in ResourceKind::ALL {
            let rate = match kind {
                ResourceKind::Energy => energy_rate,
                _ => secondary_rate.unwrap_or(0.0),
            };
            if rate <= 0.0 {
                continue;
            }
            let capacity = node.capacity.get(kind);
            let amount = node.resources.get(kind);
            node.resources.set(kind, (amount + (capacity - amount) * rate).min(capacity));
        }
    }
}
