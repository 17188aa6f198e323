//! Flexible-length resolution along one axis.
//!
//! Given items with a basis, grow and shrink factors and min/max bounds,
//! distribute the available space the way a flex container does: grow when
//! the hypothetical sizes leave space over, shrink (weighted by basis) when
//! they overflow, and iteratively freeze items that hit a bound so the
//! remaining items absorb the difference.

/// Violations smaller than this are treated as none.
const EPSILON: f64 = 1e-9;

/// One item on the line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlexItem {
    /// Starting size before free space is distributed.
    pub basis: f64,
    pub grow: f64,
    pub shrink: f64,
    pub min: f64,
    /// May be `f64::INFINITY`.
    pub max: f64,
}

impl FlexItem {
    /// Unbounded item.
    #[must_use]
    pub const fn new(basis: f64, grow: f64, shrink: f64) -> Self {
        Self {
            basis,
            grow,
            shrink,
            min: 0.0,
            max: f64::INFINITY,
        }
    }

    /// Item that is exactly `size` long whatever the free space.
    #[must_use]
    pub const fn rigid(size: f64) -> Self {
        Self {
            basis: size,
            grow: 0.0,
            shrink: 0.0,
            min: size,
            max: size,
        }
    }

    #[must_use]
    pub const fn with_bounds(mut self, min: f64, max: f64) -> Self {
        self.min = min;
        self.max = max;
        self
    }

    /// Clamp into `[min, max]`; the minimum wins when the range is inverted.
    #[must_use]
    pub fn clamp(&self, size: f64) -> f64 {
        size.min(self.max).max(self.min)
    }
}

/// Resolve the main-axis size of every item.
///
/// The result has one entry per item, in order. Sizes may sum to more than
/// `available` when the minimums do not fit, and to less when every item is
/// capped by its maximum.
#[must_use]
pub fn resolve_flexible_lengths(available: f64, items: &[FlexItem]) -> Vec<f64> {
    let hypothetical: Vec<f64> = items.iter().map(|item| item.clamp(item.basis)).collect();
    let growing = hypothetical.iter().sum::<f64>() < available;
    let factor = |item: &FlexItem| if growing { item.grow } else { item.shrink };

    let mut sizes = hypothetical.clone();
    let mut frozen: Vec<bool> = items
        .iter()
        .zip(&hypothetical)
        .map(|(item, hypo)| {
            factor(item) <= 0.0
                || (growing && item.basis > *hypo)
                || (!growing && item.basis < *hypo)
        })
        .collect();

    let free_space = |sizes: &[f64], frozen: &[bool]| {
        let used: f64 = items
            .iter()
            .zip(sizes)
            .zip(frozen)
            .map(|((item, size), is_frozen)| if *is_frozen { *size } else { item.basis })
            .sum();
        available - used
    };
    let initial_free = free_space(&sizes, &frozen);

    // Every round either finishes or freezes at least one more item.
    for _ in 0..=items.len() {
        if frozen.iter().all(|is_frozen| *is_frozen) {
            break;
        }

        let mut free = free_space(&sizes, &frozen);
        let factor_sum: f64 = items
            .iter()
            .zip(&frozen)
            .filter(|(_, is_frozen)| !**is_frozen)
            .map(|(item, _)| factor(item))
            .sum();
        if factor_sum < 1.0 {
            let scaled = initial_free * factor_sum;
            if scaled.abs() < free.abs() {
                free = scaled;
            }
        }

        if growing {
            for ((size, item), _) in sizes
                .iter_mut()
                .zip(items)
                .zip(&frozen)
                .filter(|(_, is_frozen)| !**is_frozen)
            {
                *size = item.basis + free * item.grow / factor_sum;
            }
        } else {
            let scaled_sum: f64 = items
                .iter()
                .zip(&frozen)
                .filter(|(_, is_frozen)| !**is_frozen)
                .map(|(item, _)| item.shrink * item.basis)
                .sum();
            for ((size, item), _) in sizes
                .iter_mut()
                .zip(items)
                .zip(&frozen)
                .filter(|(_, is_frozen)| !**is_frozen)
            {
                *size = if scaled_sum > 0.0 {
                    item.basis + free * (item.shrink * item.basis) / scaled_sum
                } else {
                    item.basis
                };
            }
        }

        let mut violations = vec![0.0; items.len()];
        let mut total_violation = 0.0;
        for (index, item) in items.iter().enumerate() {
            if frozen[index] {
                continue;
            }
            let clamped = item.clamp(sizes[index]);
            violations[index] = clamped - sizes[index];
            total_violation += violations[index];
            sizes[index] = clamped;
        }

        if total_violation.abs() < EPSILON {
            break;
        }
        for (is_frozen, violation) in frozen.iter_mut().zip(&violations) {
            if (total_violation > 0.0 && *violation > 0.0)
                || (total_violation < 0.0 && *violation < 0.0)
            {
                *is_frozen = true;
            }
        }
    }

    sizes
}
