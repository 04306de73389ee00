//! Character Budget Allocation
//!
//! Distributes a section's character budget across its atomic units.

use super::score::ScoredUnit;

/// Per-unit floor when original order is preserved
pub const PRESERVE_ORDER_FLOOR: usize = 10;
/// Per-unit floor when units are priority-ordered; small enough to scale down proportionally
pub const PRIORITY_FLOOR: usize = 3;
/// No unit is ever allocated fewer characters than this
pub const MIN_ALLOCATION: usize = 3;

/// A unit paired with its character allocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Allocation {
    pub unit: ScoredUnit,
    pub chars: usize,
}

/// Initial per-unit floor for the ordering policy
pub fn allocation_floor(priority: bool) -> usize {
    if priority {
        PRIORITY_FLOOR
    } else {
        PRESERVE_ORDER_FLOOR
    }
}

/// Apply the ordering policy.
///
/// Priority mode sorts by descending score; the sort is stable so ties keep
/// their original order. Otherwise the order is left untouched.
pub fn order_units(units: &mut [ScoredUnit], priority: bool) {
    if priority {
        units.sort_by_key(|u| std::cmp::Reverse(u.score));
    }
}

/// Allocate `target` characters across `units`.
///
/// Output order is the policy order. The allocation sum equals `target`
/// whenever `target >= units.len() * MIN_ALLOCATION`; below that every unit
/// still gets `MIN_ALLOCATION` and the sum exceeds `target`.
pub fn allocate(mut units: Vec<ScoredUnit>, target: usize, priority: bool) -> Vec<Allocation> {
    if units.is_empty() {
        return Vec::new();
    }
    order_units(&mut units, priority);

    let chars = allocation_sizes(units.len(), target, priority);
    let total: usize = chars.iter().sum();
    if total > target {
        tracing::warn!(
            units = units.len(),
            target,
            allocated = total,
            "Budget too small for every unit; allocations clamped to minimum"
        );
    }

    units
        .into_iter()
        .zip(chars)
        .map(|(unit, chars)| Allocation { unit, chars })
        .collect()
}

/// Allocation sizes for `count` units, in unit order
pub fn allocation_sizes(count: usize, target: usize, priority: bool) -> Vec<usize> {
    if count == 0 {
        return Vec::new();
    }

    let floor = allocation_floor(priority).max(target / count);
    let mut sizes = vec![floor; count];

    let total: usize = sizes.iter().sum();
    if total > target {
        // Scale by target / total, flooring each share
        sizes = sizes
            .iter()
            .map(|&a| (a * target / total).max(MIN_ALLOCATION))
            .collect();
    }

    distribute_slack(&mut sizes, target);
    sizes
}

/// Hand out any remaining budget one character at a time, front to back,
/// until the sum reaches `target`
fn distribute_slack(sizes: &mut [usize], target: usize) {
    let total: usize = sizes.iter().sum();
    if total >= target || sizes.is_empty() {
        return;
    }

    let slack = target - total;
    let n = sizes.len();
    // Closed form of repeated round-robin passes
    for (i, size) in sizes.iter_mut().enumerate() {
        *size += slack / n + usize::from(i < slack % n);
    }
}
