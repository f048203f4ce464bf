//! Incremental WFG-style hypervolume engine (maximization).
//!
//! Maintains the hypervolume of a nondominated set of objective vectors
//! with respect to a fixed reference point, under insertions and
//! removals. The set hypervolume is computed by a sweepline in two
//! dimensions, a staircase sweep in three, and a recursion on the first
//! coordinate with a multiplicative carry above that.

/// Incremental hypervolume of a set of objective vectors.
///
/// The reference point must lie componentwise below every point ever
/// inserted. All arithmetic is plain `f64` with no tolerances.
#[derive(Debug, Clone)]
pub struct Hypervolume {
    reference: Vec<f64>,
    value: f64,
    /// Nondominated points, ordered by coordinate 0 descending.
    set: Vec<Vec<f64>>,
}

impl Hypervolume {
    /// Create an empty engine over the given reference point.
    pub fn new(reference: Vec<f64>) -> Self {
        Hypervolume {
            reference,
            value: 0.0,
            set: Vec::new(),
        }
    }

    /// The fixed reference point.
    pub fn reference(&self) -> &[f64] {
        &self.reference
    }

    /// The hypervolume of the stored set.
    pub fn value(&self) -> f64 {
        self.value
    }

    /// Number of stored points.
    pub fn len(&self) -> usize {
        self.set.len()
    }

    /// Whether the engine holds no points.
    pub fn is_empty(&self) -> bool {
        self.set.is_empty()
    }

    /// The exclusive hypervolume `point` would add if inserted: its box
    /// volume minus the volume of the stored set clamped to its box.
    pub fn contribution(&self, point: &[f64]) -> f64 {
        point_volume(point, &self.reference) - set_volume(&limit_set(&self.set, point), &self.reference, 1.0)
    }

    /// Insert a point if its contribution is nonzero, adding the
    /// contribution to the running value and pruning stored points the
    /// new one weakly dominates. Returns the contribution.
    pub fn insert(&mut self, point: Vec<f64>) -> f64 {
        let delta = self.contribution(&point);
        if delta != 0.0 {
            insert_nondominated(point, &mut self.set);
            self.value += delta;
        }
        delta
    }

    /// Remove a stored point and subtract its contribution, returning
    /// it; returns the sentinel `-1.0` when the point is not stored.
    pub fn remove(&mut self, point: &[f64]) -> f64 {
        match self.set.iter().position(|stored| stored == point) {
            Some(index) => {
                self.set.remove(index);
                let delta = self.contribution(point);
                self.value -= delta;
                delta
            }
            None => -1.0,
        }
    }
}

/// Volume of the box spanned between a point and the reference.
pub(crate) fn point_volume(point: &[f64], reference: &[f64]) -> f64 {
    point
        .iter()
        .zip(reference)
        .map(|(p, r)| p - r)
        .product()
}

/// Whether `a[1..]` is componentwise >= `b[1..]`. Coordinate 0 is carried
/// by the set ordering and checked separately.
fn tail_weakly_dominates(a: &[f64], b: &[f64]) -> bool {
    a[1..].iter().zip(&b[1..]).all(|(x, y)| x >= y)
}

/// Insert `point` into `set`, keeping the set nondominated and ordered
/// by coordinate 0 descending. Stored points weakly dominated by the
/// incoming one are removed; a weakly dominated incoming point is
/// discarded.
fn insert_nondominated(point: Vec<f64>, set: &mut Vec<Vec<f64>>) {
    let mut i = 0;
    while i < set.len() && set[i][0] > point[0] {
        if tail_weakly_dominates(&set[i], &point) {
            return;
        }
        i += 1;
    }
    let mut replaced = false;
    while i < set.len() && set[i][0] == point[0] {
        if tail_weakly_dominates(&set[i], &point) {
            return;
        }
        if tail_weakly_dominates(&point, &set[i]) {
            replaced = true;
            break;
        }
        i += 1;
    }
    if replaced {
        set[i] = point;
    } else {
        set.insert(i, point);
    }
    // Points past the insertion position have a smaller coordinate 0, so
    // tail dominance by the inserted point is full dominance.
    let pivot = set[i].clone();
    let tail = set.split_off(i + 1);
    set.extend(tail.into_iter().filter(|stored| !tail_weakly_dominates(&pivot, stored)));
}

/// Clamp every stored point to `point`'s box and keep the nondominated
/// remainder, ordered like the engine set.
fn limit_set(set: &[Vec<f64>], point: &[f64]) -> Vec<Vec<f64>> {
    let mut limited = Vec::with_capacity(set.len());
    for stored in set {
        let clamped: Vec<f64> = stored
            .iter()
            .zip(point)
            .map(|(q, p)| q.min(*p))
            .collect();
        insert_nondominated(clamped, &mut limited);
    }
    limited
}

/// Hypervolume of a nondominated set ordered by coordinate 0 descending,
/// scaled by `carry`.
fn set_volume(set: &[Vec<f64>], reference: &[f64], carry: f64) -> f64 {
    let Some(first) = set.first() else {
        return 0.0;
    };
    match first.len() {
        2 => {
            let mut floor = reference[1];
            let mut volume = 0.0;
            for point in set {
                volume += (point[1] - floor) * (point[0] - reference[0]);
                floor = point[1];
            }
            volume * carry
        }
        3 => carry * set_volume_3d(set, reference),
        _ => {
            let inner_reference = reference[1..].to_vec();
            let mut preceding: Vec<Vec<f64>> = Vec::with_capacity(set.len());
            let mut volume = 0.0;
            for point in set {
                let inner_carry = carry * (point[0] - reference[0]);
                let inner_point = point[1..].to_vec();
                volume += inner_carry * point_volume(&inner_point, &inner_reference)
                    - set_volume(&limit_set(&preceding, &inner_point), &inner_reference, inner_carry);
                insert_nondominated(inner_point, &mut preceding);
            }
            volume
        }
    }
}

/// 3D sweep on coordinate 0, maintaining a staircase of (y, z) posts in
/// the remaining plane and integrating area times depth.
fn set_volume_3d(set: &[Vec<f64>], reference: &[f64]) -> f64 {
    // Sentinel posts at the reference close the staircase on both ends.
    let mut staircase: Vec<[f64; 2]> = vec![[reference[1], f64::MAX], [f64::MAX, reference[2]]];

    let mut volume = 0.0;
    let mut area = 0.0;
    let mut depth = 0.0;

    for point in set {
        volume += area * (depth - point[0]);
        depth = point[0];

        let post = [point[1], point[2]];
        let start = staircase.partition_point(|existing| existing[1] > post[1]);
        let mut i = start;
        let mut y = staircase[start - 1][0];
        let mut z = post[1];
        while staircase[i][0] <= post[0] {
            area += (post[0] - y) * (z - staircase[i][1]);
            y = staircase[i][0];
            z = staircase[i][1];
            i += 1;
        }
        area += (post[0] - y) * (z - staircase[i][1]);
        if i != start {
            staircase[start] = post;
            staircase.drain(start + 1..i);
        } else {
            staircase.insert(i, post);
        }
    }
    volume += area * (depth - reference[0]);
    volume
}
