use luby_mis::{solve, Graph, LubySolver, MisError, SolverConfig};

fn cfg(threads: usize, seed: u64) -> SolverConfig {
    SolverConfig::new(threads, seed).unwrap()
}

#[test]
fn single_isolated_vertex() {
    let g = Graph::new(1).unwrap();
    assert_eq!(g.m(), 0);
    for threads in [1, 2, 8] {
        let r = solve(&g, &cfg(threads, 42)).unwrap();
        assert_eq!(r.mis, vec![1]);
        assert_eq!(r.stages, 1);
        assert_eq!(r.rounds, 3);
    }
}

#[test]
fn triangle_always_yields_one_vertex() {
    let g = Graph::from_edges(3, &[(1, 2), (2, 3), (1, 3)]).unwrap();
    for seed in 0..64 {
        let r = solve(&g, &cfg(2, seed)).unwrap();
        assert_eq!(r.mis.len(), 1, "seed {seed}: {:?}", r.mis);
        assert_eq!(r.stages, 1, "seed {seed}");
        r.verify(&g).unwrap();
    }
}

#[test]
fn path_of_four_yields_a_pair() {
    let g = Graph::from_edges(4, &[(1, 2), (2, 3), (3, 4)]).unwrap();
    let allowed = [vec![1, 3], vec![1, 4], vec![2, 4]];
    for seed in 0..64 {
        let r = solve(&g, &cfg(3, seed)).unwrap();
        assert!(allowed.contains(&r.mis), "seed {seed}: {:?}", r.mis);
        r.verify(&g).unwrap();
    }
}

#[test]
fn edgeless_graph_takes_everything_in_one_stage() {
    let g = Graph::new(4).unwrap();
    let r = solve(&g, &cfg(2, 9)).unwrap();
    assert_eq!(r.mis, vec![1, 2, 3, 4]);
    assert_eq!(r.stages, 1);
    assert_eq!(r.messages, 0);
}

#[test]
fn out_of_range_endpoints_fail_identically() {
    let mut g = Graph::new(4).unwrap();
    let low = g.add_edge(0, 1).unwrap_err();
    let high = g.add_edge(5, 1).unwrap_err();
    assert!(matches!(low, MisError::VertexOutOfRange { vertex: 0, n: 4 }));
    assert!(matches!(high, MisError::VertexOutOfRange { vertex: 5, n: 4 }));
    assert_eq!(g.m(), 0);
}

#[test]
fn demo_graph_solves_and_verifies() {
    let g = Graph::demo();
    let mut winners_per_stage = Vec::new();
    let r = LubySolver::new(&g, SolverConfig::default())
        .solve_with(|rec| winners_per_stage.push(rec.winners.len()))
        .unwrap();
    r.verify(&g).unwrap();
    assert!(winners_per_stage.iter().all(|&w| w > 0));
    assert_eq!(r.rounds, u64::from(r.stages) * 3);
}

#[test]
fn complete_graph_needs_one_stage() {
    let n = 40;
    let mut g = Graph::new(n).unwrap();
    for u in 1..=n {
        for v in (u + 1)..=n {
            g.add_edge(u, v).unwrap();
        }
    }
    let r = solve(&g, &cfg(4, 3)).unwrap();
    assert_eq!(r.mis.len(), 1);
    assert_eq!(r.stages, 1);
    // Every vertex but the winner stops early, the winner inspects all n-1
    // neighbors and then notifies all of them.
    assert!(r.messages >= 2 * (n as u64 - 1));
}

#[test]
fn star_graph_is_center_or_all_leaves() {
    let leaves = 30;
    let edges: Vec<_> = (2..=leaves + 1).map(|v| (1, v)).collect();
    let g = Graph::from_edges(leaves + 1, &edges).unwrap();
    for seed in 0..16 {
        let r = solve(&g, &cfg(4, seed)).unwrap();
        if r.contains(1) {
            assert_eq!(r.mis, vec![1]);
        } else {
            assert_eq!(r.mis, (2..=leaves + 1).collect::<Vec<_>>());
        }
        r.verify(&g).unwrap();
    }
}

#[test]
fn messages_are_reproducible_for_fixed_inputs() {
    let g = Graph::demo();
    let a = solve(&g, &cfg(1, 17)).unwrap();
    let b = solve(&g, &cfg(5, 17)).unwrap();
    assert_eq!(a, b);
}
