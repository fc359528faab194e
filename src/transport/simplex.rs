use super::coupling::Coupling;
use super::flow::Flow;
use super::measure::Measure;
use super::signature::Signature;
use crate::Distance;
use crate::Feature;
use crate::Mass;
use crate::IMBALANCE_COST;
use crate::SIMPLEX_ITERATIONS;
use crate::SIMPLEX_TOLERANCE;
use petgraph::graph::EdgeIndex;
use petgraph::graph::NodeIndex;
use petgraph::graph::UnGraph;

/// Exact optimal transport via the transportation simplex.
///
/// Computes the minimum-cost plan moving the source signature's mass onto
/// the target's under the supplied ground metric. Unlike entropic schemes,
/// the solution is exact and sparse: an optimal basis has at most
/// `n1 + n2 - 1` cells, so identical signatures price out at exactly zero.
///
/// # Algorithm
///
/// 1. Balance unequal totals with a sentinel point on the lighter side
/// 2. Seed a basic feasible plan with the northwest-corner rule
/// 3. Pivot by MODI: solve dual potentials over the basis spanning tree,
///    admit the cell with the most negative reduced cost, push mass around
///    the unique cycle it closes, drop the drained cell
/// 4. Stop when no cell prices out negative, or at the iteration cap
///
/// # Imbalance
///
/// The sentinel absorbs exactly `|total1 - total2|` at flat ground cost
/// [`IMBALANCE_COST`], so the objective stays total over empty or
/// unequal-mass signatures. Sentinel edges never surface as flows.
pub struct Simplex<'a, M>
where
    M: Measure<X = Feature, Y = Feature>,
{
    /// Ground metric between source and target coordinates.
    metric: &'a M,
    /// Source signature.
    mu: Signature<'a>,
    /// Target signature.
    nu: Signature<'a>,
    /// Row supplies, sentinel included.
    rows: Vec<Mass>,
    /// Column demands, sentinel included.
    cols: Vec<Mass>,
    /// Basis spanning tree over row and column nodes; edge weights carry
    /// the transported mass of each basic cell.
    basis: UnGraph<(), Mass>,
}

impl<M> Simplex<'_, M>
where
    M: Measure<X = Feature, Y = Feature>,
{
    /// Node of supply row `i`.
    fn supplier(&self, i: usize) -> NodeIndex {
        NodeIndex::new(i)
    }
    /// Node of demand column `j`.
    fn consumer(&self, j: usize) -> NodeIndex {
        NodeIndex::new(self.rows.len() + j)
    }
    /// The (row, column) cell joining two adjacent basis nodes.
    fn across(&self, a: NodeIndex, b: NodeIndex) -> (usize, usize) {
        match a.index() < self.rows.len() {
            true => (a.index(), b.index() - self.rows.len()),
            false => (b.index(), a.index() - self.rows.len()),
        }
    }
    /// The (row, column) cell of a basis edge.
    fn endpoints(&self, edge: EdgeIndex) -> (usize, usize) {
        let (a, b) = self.basis.edge_endpoints(edge).expect("basis edge");
        self.across(a, b)
    }
    /// Ground cost of moving one unit of mass from row `i` to column `j`.
    /// Sentinel rows and columns charge the flat imbalance cost.
    fn ground(&self, i: usize, j: usize) -> Distance {
        match i < self.mu.n() && j < self.nu.n() {
            true => self.metric.distance(&self.mu.feature(i), &self.nu.feature(j)),
            false => IMBALANCE_COST,
        }
    }

    /// Pivots until no cell prices out negative or the iteration cap hits.
    fn solve(&mut self) {
        if self.rows.is_empty() || self.cols.is_empty() {
            return;
        }
        self.northwest();
        for t in 0..SIMPLEX_ITERATIONS {
            let ref duals = self.potentials();
            match self.entering(duals) {
                Some((i, j)) => self.pivot(i, j),
                None => {
                    log::debug!("{:<32}{:<32}", "simplex converged", format!("{} pivots", t));
                    break;
                }
            }
        }
    }

    /// Initial basic feasible plan by the northwest-corner rule.
    /// Yields exactly `rows + cols - 1` basic cells, degenerate zeros
    /// included, whose edges form a spanning tree.
    fn northwest(&mut self) {
        let ref mut supply = self.rows.clone();
        let ref mut demand = self.cols.clone();
        let m = supply.len();
        let n = demand.len();
        let mut i = 0;
        let mut j = 0;
        loop {
            let moved = supply[i].min(demand[j]);
            supply[i] -= moved;
            demand[j] -= moved;
            self.basis.add_edge(self.supplier(i), self.consumer(j), moved);
            if i == m - 1 && j == n - 1 {
                break;
            } else if j == n - 1 || (supply[i] <= demand[j] && i < m - 1) {
                i += 1;
            } else {
                j += 1;
            }
        }
        debug_assert!(self.basis.edge_count() == m + n - 1, "basis size");
    }

    /// Dual potentials solved over the basis spanning tree, anchored at the
    /// first row: u(i) + v(j) = c(i, j) for every basic cell.
    fn potentials(&self) -> Vec<Distance> {
        let mut known = vec![false; self.basis.node_count()];
        let mut duals = vec![0.; self.basis.node_count()];
        let mut stack = vec![self.supplier(0)];
        known[0] = true;
        while let Some(node) = stack.pop() {
            for next in self.basis.neighbors(node) {
                if !known[next.index()] {
                    let (i, j) = self.across(node, next);
                    known[next.index()] = true;
                    duals[next.index()] = self.ground(i, j) - duals[node.index()];
                    stack.push(next);
                }
            }
        }
        debug_assert!(known.iter().all(|k| *k), "basis spans all nodes");
        duals
    }

    /// The non-basic cell with the most negative reduced cost, if any.
    fn entering(&self, duals: &[Distance]) -> Option<(usize, usize)> {
        let mut best = None;
        let mut most = -SIMPLEX_TOLERANCE;
        for i in 0..self.rows.len() {
            for j in 0..self.cols.len() {
                if self.basis.find_edge(self.supplier(i), self.consumer(j)).is_none() {
                    let reduced = self.ground(i, j)
                        - duals[self.supplier(i).index()]
                        - duals[self.consumer(j).index()];
                    if reduced < most {
                        most = reduced;
                        best = Some((i, j));
                    }
                }
            }
        }
        best
    }

    /// One pivot: push mass around the unique cycle closed by admitting cell
    /// (i, j), and drop the first basic cell the push drains to zero.
    fn pivot(&mut self, i: usize, j: usize) {
        let goal = self.consumer(j);
        let path = petgraph::algo::astar(
            &self.basis,
            self.supplier(i),
            |node| node == goal,
            |_| 1usize,
            |_| 0usize,
        )
        .map(|(_, path)| path)
        .expect("basis stays connected");
        // walking the tree path from the entering row, cells alternate
        // give (-theta) and take (+theta)
        let edges = path
            .windows(2)
            .map(|w| self.basis.find_edge(w[0], w[1]).expect("path edge"))
            .collect::<Vec<_>>();
        let theta = edges
            .iter()
            .copied()
            .step_by(2)
            .map(|e| self.basis[e])
            .fold(Mass::INFINITY, Mass::min);
        let leaving = edges
            .iter()
            .copied()
            .step_by(2)
            .find(|e| self.basis[*e] == theta)
            .expect("cycle bottleneck");
        for (t, e) in edges.iter().copied().enumerate() {
            match t % 2 {
                0 => self.basis[e] -= theta,
                _ => self.basis[e] += theta,
            }
        }
        self.basis.remove_edge(leaving).expect("leaving edge");
        self.basis.add_edge(self.supplier(i), self.consumer(j), theta);
    }

    /// Writes the plan's real edges into the caller's pre-sized sink, in
    /// basis order. Sentinel edges and drained cells stay internal, so at
    /// most `n1 + n2 - 1` records are ever appended.
    pub fn spill(&self, sink: &mut Vec<Flow>) {
        for edge in self.basis.edge_indices() {
            let (from, to) = self.endpoints(edge);
            let amount = self.basis[edge];
            if from < self.mu.n() && to < self.nu.n() && amount > SIMPLEX_TOLERANCE {
                sink.push(Flow { from, to, amount });
            }
        }
        debug_assert!(
            sink.len() <= (self.mu.n() + self.nu.n()).saturating_sub(1),
            "flow bound"
        );
    }
}

impl<M> Coupling for Simplex<'_, M>
where
    M: Measure<X = Feature, Y = Feature>,
{
    type M = M;

    fn minimize(mut self) -> Self {
        self.solve();
        self
    }
    fn flow(&self, from: usize, to: usize) -> Mass {
        debug_assert!(from < self.rows.len() && to < self.cols.len(), "cell bounds");
        self.basis
            .find_edge(self.supplier(from), self.consumer(to))
            .map(|e| self.basis[e])
            .unwrap_or(0.)
    }
    fn cost(&self) -> Distance {
        self.basis
            .edge_indices()
            .map(|e| (self.endpoints(e), self.basis[e]))
            .map(|((i, j), amount)| amount * self.ground(i, j))
            .inspect(|x| debug_assert!(x.is_finite()))
            .sum()
    }
}

impl<'a, M> From<(Signature<'a>, Signature<'a>, &'a M)> for Simplex<'a, M>
where
    M: Measure<X = Feature, Y = Feature>,
{
    fn from((mu, nu, metric): (Signature<'a>, Signature<'a>, &'a M)) -> Self {
        let supply = mu.total();
        let demand = nu.total();
        let mut rows = (0..mu.n()).map(|i| mu.weight(i)).collect::<Vec<_>>();
        let mut cols = (0..nu.n()).map(|j| nu.weight(j)).collect::<Vec<_>>();
        if (supply - demand).abs() > SIMPLEX_TOLERANCE * supply.max(demand) {
            match supply < demand {
                true => rows.push(demand - supply),
                false => cols.push(supply - demand),
            }
        }
        let mut basis = UnGraph::default();
        for _ in 0..rows.len() + cols.len() {
            basis.add_node(());
        }
        Self {
            metric,
            mu,
            nu,
            rows,
            cols,
            basis,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::Absolute;
    use crate::transport::Cloud;
    use crate::Arbitrary;

    fn distance(p: &Cloud, q: &Cloud) -> Distance {
        let ref ground = Absolute;
        Simplex::from((p.signature(), q.signature(), ground))
            .minimize()
            .cost()
    }

    /// the exact solver should be
    /// 1. self-annihilating
    /// 2. symmetric
    /// 3. positive semidefinite
    /// 4. triangular on equal-mass signatures

    #[test]
    fn is_simplex_emd_zero() {
        let p = Cloud::random();
        assert!(distance(&p, &p) == 0.);
    }
    #[test]
    fn is_simplex_emd_symmetric() {
        const TOLERANCE: Distance = 1e-9;
        let p = Cloud::random();
        let q = Cloud::random();
        let dpq = distance(&p, &q);
        let dqp = distance(&q, &p);
        assert!((dpq - dqp).abs() < TOLERANCE, "{} vs {}", dpq, dqp);
    }
    #[test]
    fn is_simplex_emd_positive() {
        let p = Cloud::random();
        let q = Cloud::random();
        assert!(distance(&p, &q) >= 0.);
        assert!(distance(&q, &p) >= 0.);
    }
    #[test]
    fn is_simplex_emd_triangle() {
        const TOLERANCE: Distance = 1e-7;
        let p = Cloud::random();
        let q = Cloud::random();
        let r = Cloud::random();
        let dpq = distance(&p, &q);
        let dqr = distance(&q, &r);
        let dpr = distance(&p, &r);
        assert!(dpq + dqr + TOLERANCE >= dpr, "{} + {} > {}", dpq, dqr, dpr);
        assert!(dpq + dpr + TOLERANCE >= dqr, "{} + {} > {}", dpq, dpr, dqr);
        assert!(dqr + dpr + TOLERANCE >= dpq, "{} + {} > {}", dqr, dpr, dpq);
    }

    #[test]
    fn moves_mass_across_the_line() {
        let p = Cloud {
            features: vec![0., 1.],
            weights: vec![1., 1.],
        };
        let q = Cloud {
            features: vec![1., 2.],
            weights: vec![1., 1.],
        };
        assert!(distance(&p, &q) == 2.);
    }
    #[test]
    fn finds_the_cheaper_matching() {
        let p = Cloud {
            features: vec![0., 3.],
            weights: vec![1., 1.],
        };
        let q = Cloud {
            features: vec![1., 2.],
            weights: vec![1., 1.],
        };
        // 0 -> 1 and 3 -> 2 costs 2; the crossing 0 -> 2, 3 -> 1 costs 4
        assert!(distance(&p, &q) == 2.);
    }
    #[test]
    fn charges_unmatched_mass_at_flat_cost() {
        let p = Cloud {
            features: vec![0.],
            weights: vec![2.],
        };
        let q = Cloud {
            features: vec![0.],
            weights: vec![1.],
        };
        assert!(distance(&p, &q) == IMBALANCE_COST);
        assert!(distance(&q, &p) == IMBALANCE_COST);
    }
    #[test]
    fn degenerates_to_nothing_on_empty_inputs() {
        let p = Cloud {
            features: vec![],
            weights: vec![],
        };
        assert!(distance(&p, &p) == 0.);
    }

    #[test]
    fn spills_a_sparse_conservative_plan() {
        let p = Cloud::random();
        let q = Cloud::random();
        let ref ground = Absolute;
        let plan = Simplex::from((p.signature(), q.signature(), ground)).minimize();
        let mut sink = Vec::with_capacity(p.n() + q.n() - 1);
        plan.spill(&mut sink);
        assert!(sink.len() <= p.n() + q.n() - 1);
        let moved = sink.iter().map(|f| f.amount).sum::<Mass>();
        let bound = p.signature().total().min(q.signature().total());
        assert!((moved - bound).abs() < 1e-6, "{} vs {}", moved, bound);
        assert!(sink.iter().all(|f| f.from < p.n() && f.to < q.n()));
        assert!(sink.iter().all(|f| f.amount > 0.));
    }
    #[test]
    fn spilled_amounts_match_queried_flows() {
        let p = Cloud::random();
        let q = Cloud::random();
        let ref ground = Absolute;
        let plan = Simplex::from((p.signature(), q.signature(), ground)).minimize();
        let mut sink = Vec::with_capacity(p.n() + q.n() - 1);
        plan.spill(&mut sink);
        assert!(sink.iter().all(|f| plan.flow(f.from, f.to) == f.amount));
    }
}
