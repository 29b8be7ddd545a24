use crate::TspPoint;

/// Symmetric cost grid over an ordered point sequence, using the weighted
/// Chebyshev metric `max(|dx| * cost_x, |dy| * cost_y)`.
/// Built once before the search and read-only thereafter.
#[derive(Debug)]
pub struct DistanceMatrix {
    n: usize,
    cells: Vec<u64>,
}

impl DistanceMatrix {
    pub fn build(points: &[TspPoint], cost_x: u64, cost_y: u64) -> Self {
        let n = points.len();
        let mut cells = vec![0; n * n];
        for i in 0..n {
            for j in 0..i {
                let dx = points[i].x.abs_diff(points[j].x) * cost_x;
                let dy = points[i].y.abs_diff(points[j].y) * cost_y;
                let d = dx.max(dy);
                cells[i * n + j] = d;
                cells[j * n + i] = d;
            }
        }
        Self { n, cells }
    }

    pub fn n(&self) -> usize {
        self.n
    }

    pub fn distance(&self, i: usize, j: usize) -> u64 {
        self.cells[i * self.n + j]
    }

    /// Nearest-neighbor selection: returns the candidate with the strictly
    /// smallest distance to `from` and removes it from `candidates`. Ties
    /// keep the first encountered in iteration order. `None` on an empty
    /// candidate set; callers that just checked non-emptiness must treat
    /// `None` as a contract violation.
    pub fn nearest(&self, from: usize, candidates: &mut Vec<usize>) -> Option<usize> {
        let mut best: Option<(usize, u64)> = None;
        for (slot, &candidate) in candidates.iter().enumerate() {
            let d = self.distance(from, candidate);
            match best {
                Some((_, min)) if d >= min => {}
                _ => best = Some((slot, d)),
            }
        }
        best.map(|(slot, _)| candidates.remove(slot))
    }
}

#[cfg(test)]
mod tests {
    use super::DistanceMatrix;
    use crate::TspPoint;

    fn points(coords: &[(i64, i64)]) -> Vec<TspPoint> {
        coords
            .iter()
            .enumerate()
            .map(|(i, &(x, y))| TspPoint::new(i.to_string(), x, y))
            .collect()
    }

    #[test]
    fn matrix_is_symmetric_with_zero_diagonal() {
        let matrix = DistanceMatrix::build(&points(&[(0, 0), (3, 7), (10, 2), (5, 5)]), 1, 1);
        for i in 0..matrix.n() {
            assert_eq!(matrix.distance(i, i), 0);
            for j in 0..matrix.n() {
                assert_eq!(matrix.distance(i, j), matrix.distance(j, i));
            }
        }
    }

    #[test]
    fn distance_is_weighted_chebyshev() {
        let matrix = DistanceMatrix::build(&points(&[(0, 0), (3, 2)]), 2, 5);
        // max(3 * 2, 2 * 5) = 10
        assert_eq!(matrix.distance(0, 1), 10);
    }

    #[test]
    fn default_weights_give_plain_chebyshev() {
        let matrix = DistanceMatrix::build(&points(&[(0, 0), (-4, 3)]), 1, 1);
        assert_eq!(matrix.distance(0, 1), 4);
    }

    #[test]
    fn empty_and_single_point_inputs_build_trivial_matrices() {
        let empty = DistanceMatrix::build(&points(&[]), 1, 1);
        assert_eq!(empty.n(), 0);

        let single = DistanceMatrix::build(&points(&[(5, 5)]), 1, 1);
        assert_eq!(single.n(), 1);
        assert_eq!(single.distance(0, 0), 0);
    }

    #[test]
    fn nearest_returns_closest_and_removes_it() {
        let matrix = DistanceMatrix::build(&points(&[(0, 0), (9, 0), (2, 0), (5, 0)]), 1, 1);
        let mut candidates = vec![1, 2, 3];

        assert_eq!(matrix.nearest(0, &mut candidates), Some(2));
        assert_eq!(candidates, vec![1, 3]);
        assert_eq!(matrix.nearest(0, &mut candidates), Some(3));
        assert_eq!(matrix.nearest(0, &mut candidates), Some(1));
        assert!(candidates.is_empty());
    }

    #[test]
    fn nearest_breaks_ties_by_first_encountered() {
        let matrix = DistanceMatrix::build(&points(&[(0, 0), (4, 0), (0, 4), (4, 4)]), 1, 1);
        // Points 1 and 2 are both at distance 4; candidate order decides.
        let mut candidates = vec![2, 1];
        assert_eq!(matrix.nearest(0, &mut candidates), Some(2));

        let mut candidates = vec![1, 2];
        assert_eq!(matrix.nearest(0, &mut candidates), Some(1));
    }

    #[test]
    fn nearest_on_empty_candidates_returns_none() {
        let matrix = DistanceMatrix::build(&points(&[(0, 0), (1, 1)]), 1, 1);
        let mut candidates = Vec::new();
        assert_eq!(matrix.nearest(0, &mut candidates), None);
    }
}
