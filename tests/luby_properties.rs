use luby_mis::{solve, Graph, LubySolver, SolverConfig};
use petgraph::graph::{NodeIndex, UnGraph};
use proptest::prelude::*;

/// Random graph as `(n, edges)`; endpoints are 1-based and may repeat or loop.
fn arb_graph() -> impl Strategy<Value = (usize, Vec<(usize, usize)>)> {
    (1usize..60).prop_flat_map(|n| {
        let edge = (1..=n, 1..=n);
        (Just(n), proptest::collection::vec(edge, 0..(3 * n)))
    })
}

fn build(n: usize, edges: &[(usize, usize)]) -> Graph {
    Graph::from_edges(n, edges).unwrap()
}

/// Independent oracle: petgraph graph with node `i - 1` for vertex `i`.
fn oracle(n: usize, edges: &[(usize, usize)]) -> UnGraph<(), ()> {
    let mut g = UnGraph::<(), ()>::with_capacity(n, edges.len());
    for _ in 0..n {
        g.add_node(());
    }
    for &(u, v) in edges {
        if u != v {
            g.add_edge(NodeIndex::new(u - 1), NodeIndex::new(v - 1), ());
        }
    }
    g
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn result_is_independent_and_maximal(
        (n, edges) in arb_graph(),
        seed in any::<u64>(),
        threads in 1usize..6,
    ) {
        let g = build(n, &edges);
        let r = solve(&g, &SolverConfig::new(threads, seed).unwrap()).unwrap();

        let og = oracle(n, &edges);
        let mut inside = vec![false; n + 1];
        for &u in &r.mis {
            inside[u] = true;
        }
        for e in og.edge_indices() {
            let (a, b) = og.edge_endpoints(e).unwrap();
            prop_assert!(
                !(inside[a.index() + 1] && inside[b.index() + 1]),
                "edge ({}, {}) inside MIS", a.index() + 1, b.index() + 1
            );
        }
        for u in 1..=n {
            if !inside[u] {
                let covered = og
                    .neighbors(NodeIndex::new(u - 1))
                    .any(|v| inside[v.index() + 1]);
                prop_assert!(covered, "vertex {} not covered", u);
            }
        }

        prop_assert!(r.verify(&g).is_ok());
        prop_assert!(r.mis.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn thread_count_does_not_change_the_outcome(
        (n, edges) in arb_graph(),
        seed in any::<u64>(),
    ) {
        let g = build(n, &edges);
        let base = solve(&g, &SolverConfig::sequential(seed)).unwrap();
        for threads in [2usize, 3, 7] {
            let r = solve(&g, &SolverConfig::new(threads, seed).unwrap()).unwrap();
            prop_assert_eq!(&r.mis, &base.mis);
            prop_assert_eq!(r.stages, base.stages);
        }
    }

    #[test]
    fn stages_make_progress_and_rounds_add_up(
        (n, edges) in arb_graph(),
        seed in any::<u64>(),
    ) {
        let g = build(n, &edges);
        let mut records = Vec::new();
        let r = LubySolver::new(&g, SolverConfig::new(3, seed).unwrap())
            .solve_with(|rec| records.push(rec.clone()))
            .unwrap();

        prop_assert_eq!(r.rounds, u64::from(r.stages) * 3);
        prop_assert_eq!(records.len() as u32, r.stages);
        prop_assert!(r.stages as usize <= n);

        let mut previous_active = n;
        for rec in &records {
            prop_assert!(!rec.winners.is_empty(), "stage {} had no winner", rec.stage);
            prop_assert!(rec.active_remaining.len() < previous_active);
            prop_assert_eq!(
                rec.active_remaining.len() + rec.removed.len(),
                previous_active
            );
            previous_active = rec.active_remaining.len();
        }
        prop_assert_eq!(previous_active, 0);
    }

    #[test]
    fn self_loops_are_neutral(
        (n, edges) in arb_graph(),
        loops in proptest::collection::vec(1usize..60, 0..10),
        seed in any::<u64>(),
    ) {
        let plain: Vec<_> = edges.iter().copied().filter(|&(u, v)| u != v).collect();
        let mut looped = plain.clone();
        looped.extend(loops.into_iter().filter(|&u| u <= n).map(|u| (u, u)));

        let a = build(n, &plain);
        let b = build(n, &looped);
        prop_assert_eq!(a.m(), b.m());

        let cfg = SolverConfig::new(2, seed).unwrap();
        let ra = solve(&a, &cfg).unwrap();
        let rb = solve(&b, &cfg).unwrap();
        prop_assert_eq!(ra.mis, rb.mis);
        prop_assert_eq!(ra.stages, rb.stages);
    }
}
