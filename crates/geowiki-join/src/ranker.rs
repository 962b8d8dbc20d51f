use std::cmp::Ordering;

use tracing::info;

use geowiki_core::RankedGeo;

/// Ranked before unranked; ranked ascending by `order`. Ties are `Equal`.
pub fn rank_order(a: &RankedGeo, b: &RankedGeo) -> Ordering {
    match (a.order(), b.order()) {
        (Some(x), Some(y)) => x.cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Sort every slot in place. Not stable: ties and the unranked tail come out
/// in no particular order.
pub fn rank(slots: &mut [RankedGeo]) {
    info!("Sorting {} ranked geos", slots.len());
    slots.sort_unstable_by(rank_order);
}
