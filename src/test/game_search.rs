use crate::error::{Error, Result};
use crate::game::{
    DEFAULT_LEAF_UTILITIES, Game, GameTree, MAX_TREE_DEPTH, MAX_TREE_NODES, Player,
    alpha_beta_search, minimax_decision, record_alpha_beta, record_minimax,
};
use crate::replay::{NodeState, ReplayCursor, ViewModel};
use crate::trace::{Bound, NodeId, NoopInstrument, Trace};
use std::cell::RefCell;
use std::collections::{BTreeMap, BTreeSet};

fn fig52() -> GameTree {
    GameTree::fig52_extended(&DEFAULT_LEAF_UTILITIES).expect("tree")
}

fn final_view(trace: Trace) -> ViewModel {
    let mut cursor = ReplayCursor::new(trace);
    cursor.run_to_end().clone()
}

fn ids(xs: &[usize]) -> BTreeSet<NodeId> {
    xs.iter().copied().map(NodeId).collect()
}

/// 记录哪些叶子的效用被读取过
struct CountingGame<'a> {
    inner: &'a GameTree,
    reads: RefCell<BTreeSet<NodeId>>,
}

impl Game for CountingGame<'_> {
    type State = NodeId;
    type Action = usize;

    fn actions(&self, state: &NodeId) -> Vec<usize> {
        self.inner.actions(state)
    }
    fn result(&self, state: &NodeId, action: &usize) -> NodeId {
        self.inner.result(state, action)
    }
    fn terminal_test(&self, state: &NodeId) -> bool {
        self.inner.terminal_test(state)
    }
    fn utility(&self, state: &NodeId, player: Player) -> Result<i64> {
        self.reads.borrow_mut().insert(*state);
        self.inner.utility(state, player)
    }
    fn to_move(&self, state: &NodeId) -> Player {
        self.inner.to_move(state)
    }
    fn node(&self, state: &NodeId) -> NodeId {
        *state
    }
}

/// 可复现的伪随机叶子效用（LCG）
fn leaf_values(seed: u64, n: usize) -> Vec<i64> {
    let mut x = seed;
    (0..n)
        .map(|_| {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
            ((x >> 33) % 21) as i64 - 10
        })
        .collect()
}

#[test]
fn fig52_extended_layout_matches_level_order() {
    let tree = fig52();
    assert_eq!(tree.len(), 40);
    assert_eq!(tree.children(NodeId(0)), &[NodeId(1), NodeId(2), NodeId(3)]);
    assert_eq!(tree.children(NodeId(4)), &[NodeId(13), NodeId(14), NodeId(15)]);
    assert_eq!(tree.leaves().count(), 27);
    assert_eq!(tree.leaves().next(), Some(NodeId(13)));
    assert_eq!(tree.leaf_utility(NodeId(13)), Some(3));
    assert_eq!(tree.leaf_utility(NodeId(39)), Some(3));
    assert_eq!(tree.parent(NodeId(39)), Some(NodeId(12)));
    assert_eq!(tree.to_move(&NodeId(0)), Player::Max);
    assert_eq!(tree.to_move(&NodeId(2)), Player::Min);
    assert_eq!(tree.utility(&NodeId(14), Player::Min).expect("leaf"), -12);
}

#[test]
fn uniform_tree_rejects_wrong_leaf_count() {
    let err = GameTree::uniform(3, 3, &[1, 2, 3]).expect_err("27 leaves required");
    assert!(matches!(err, Error::InvalidInput(_)));
    assert!(GameTree::uniform(0, 2, &[]).is_err());
}

#[test]
fn explicit_tree_validation() {
    let utils = |pairs: &[(usize, i64)]| pairs.iter().copied().collect::<BTreeMap<_, _>>();

    // 悬空子节点
    let dangling = GameTree::from_children(vec![vec![1, 5], vec![]], utils(&[(1, 0)]));
    assert!(matches!(dangling, Err(Error::InvalidInput(_))));

    // 两个父节点
    let shared = GameTree::from_children(
        vec![vec![1, 2], vec![3], vec![3], vec![]],
        utils(&[(3, 1)]),
    );
    assert!(matches!(shared, Err(Error::InvalidInput(_))));

    // 1 <-> 2 成环，从根不可达
    let cyclic = GameTree::from_children(vec![vec![], vec![2], vec![1]], utils(&[(0, 1)]));
    assert!(matches!(cyclic, Err(Error::InvalidInput(_))));

    // 叶子缺少效用（没有终局值）
    let missing = GameTree::from_children(vec![vec![1, 2], vec![], vec![]], utils(&[(1, 4)]));
    assert!(matches!(missing, Err(Error::InvalidInput(_))));

    let ok = GameTree::from_children(vec![vec![1, 2], vec![], vec![]], utils(&[(1, 4), (2, 7)]))
        .expect("valid tree");
    assert_eq!(ok.max_depth(), 1);
}

#[test]
fn minimax_picks_middle_branch_and_explores_every_node() {
    let tree = fig52();
    let (decision, trace) = record_minimax(&tree, &tree.root(), None).expect("record");
    assert_eq!(decision.value, 9);
    assert_eq!(decision.action, Some(1));
    assert_eq!(decision.leaves_evaluated, 27);

    let view = final_view(trace);
    let all = tree.nodes().collect::<BTreeSet<_>>();
    assert_eq!(view.explored, all);
    assert!(view.pruned.is_empty());
    assert_eq!(view.values.get(&NodeId(1)), Some(&6));
    assert_eq!(view.values.get(&NodeId(2)), Some(&9));
    assert_eq!(view.values.get(&NodeId(3)), Some(&8));
    assert!(view.edges.contains(&(NodeId(0), NodeId(2))));
    // 每个内部节点恰好高亮一条边
    assert_eq!(view.edges.len(), 13);
}

#[test]
fn minimax_and_alpha_beta_agree_on_depth3_ternary_tree() {
    let tree = fig52();
    let (mm, mm_trace) = record_minimax(&tree, &tree.root(), None).expect("minimax");
    let (ab, ab_trace) = record_alpha_beta(&tree, &tree.root(), None).expect("alpha-beta");

    assert_eq!(mm.value, ab.value);
    assert_eq!(mm.action, ab.action);
    assert_eq!(ab.leaves_evaluated, 20);
    assert!(ab.leaves_evaluated <= mm.leaves_evaluated);

    let leaves = tree.leaves().collect::<BTreeSet<_>>();
    let mm_view = final_view(mm_trace);
    let ab_view = final_view(ab_trace);
    let mm_leaves = mm_view.explored.intersection(&leaves).count();
    let ab_leaves = ab_view.explored.intersection(&leaves).count();
    assert_eq!(mm_leaves, 27);
    assert_eq!(ab_leaves, 20);
}

#[test]
fn alpha_beta_prunes_exactly_the_unvisited_subtrees() {
    let tree = fig52();
    let (_, trace) = record_alpha_beta(&tree, &tree.root(), None).expect("record");
    let view = final_view(trace);

    assert_eq!(view.pruned, ids(&[12, 20, 21, 27, 30, 37, 38, 39]));
    assert!(view.explored.is_disjoint(&view.pruned));
    let covered = view.explored.union(&view.pruned).copied().collect::<BTreeSet<_>>();
    assert_eq!(covered, tree.nodes().collect::<BTreeSet<_>>());

    assert_eq!(view.node_state(NodeId(12)), NodeState::Pruned);
    assert_eq!(view.node_state(NodeId(6)), NodeState::Explored);
    // 截断节点不高亮走法
    assert!(!view.edges.iter().any(|(p, _)| *p == NodeId(6)));
    assert!(view.edges.contains(&(NodeId(0), NodeId(2))));
}

#[test]
fn alpha_beta_records_bounds_and_cutoffs() {
    let tree = fig52();
    let (_, trace) = record_alpha_beta(&tree, &tree.root(), None).expect("record");
    let view = final_view(trace);

    assert_eq!(
        view.bounds.get(&NodeId(0)),
        Some(&(Bound::Value(9), Bound::PosInfinity))
    );
    assert_eq!(
        view.bounds.get(&NodeId(3)),
        Some(&(Bound::Value(9), Bound::Value(8)))
    );
    assert!(view.is_cut(NodeId(3)));
    assert_eq!(
        view.bounds.get(&NodeId(6)),
        Some(&(Bound::Value(14), Bound::Value(6)))
    );
    assert!(view.is_cut(NodeId(6)));
    assert!(!view.is_cut(NodeId(0)));
}

#[test]
fn alpha_beta_never_reads_pruned_utilities() {
    let tree = fig52();
    let counting = CountingGame {
        inner: &tree,
        reads: RefCell::new(BTreeSet::new()),
    };
    let decision =
        alpha_beta_search(&counting, &NodeId(0), &mut NoopInstrument).expect("search");
    let reads = counting.reads.into_inner();
    assert_eq!(reads.len(), decision.leaves_evaluated);
    assert!(reads.is_disjoint(&ids(&[20, 21, 27, 30, 37, 38, 39])));
}

#[test]
fn alpha_beta_matches_brute_force_minimax_on_many_trees() {
    for seed in 1..=40_u64 {
        for (branching, depth) in [(2_usize, 3_u32), (3, 3), (2, 4), (4, 2)] {
            let n = branching.pow(depth);
            let tree =
                GameTree::uniform(branching, depth, &leaf_values(seed, n)).expect("uniform tree");

            let brute =
                minimax_decision(&tree, &tree.root(), &mut NoopInstrument).expect("minimax");
            let counting = CountingGame {
                inner: &tree,
                reads: RefCell::new(BTreeSet::new()),
            };
            let ab = alpha_beta_search(&counting, &tree.root(), &mut NoopInstrument)
                .expect("alpha-beta");
            assert_eq!(brute.value, ab.value, "seed={seed} b={branching} d={depth}");
            assert_eq!(brute.action, ab.action, "seed={seed} b={branching} d={depth}");
            assert!(ab.leaves_evaluated <= brute.leaves_evaluated);

            let (_, trace) = record_alpha_beta(&tree, &tree.root(), None).expect("record");
            let view = final_view(trace);
            let reads = counting.reads.into_inner();
            for leaf in tree.leaves() {
                assert_ne!(
                    view.pruned.contains(&leaf),
                    reads.contains(&leaf),
                    "leaf {leaf} must be either read or pruned (seed={seed})"
                );
            }
        }
    }
}

#[test]
fn ties_break_towards_first_action() {
    let tree = GameTree::uniform(3, 1, &[5, 5, 5]).expect("tree");
    let (mm, mm_trace) = record_minimax(&tree, &tree.root(), None).expect("minimax");
    let (ab, _) = record_alpha_beta(&tree, &tree.root(), None).expect("alpha-beta");
    assert_eq!(mm.action, Some(0));
    assert_eq!(ab.action, Some(0));
    let view = final_view(mm_trace);
    assert!(view.edges.contains(&(NodeId(0), NodeId(1))));
}

#[test]
fn terminal_root_has_no_action() {
    let tree = GameTree::uniform(2, 0, &[7]).expect("single leaf");
    let (decision, trace) = record_minimax(&tree, &tree.root(), None).expect("record");
    assert_eq!(decision.value, 7);
    assert_eq!(decision.action, None);
    assert_eq!(trace.pauses(), 1);
}

#[test]
fn recording_does_not_mutate_the_tree() {
    let tree = fig52();
    let before = tree.clone();
    let _ = record_alpha_beta(&tree, &tree.root(), None).expect("record");
    let _ = record_minimax(&tree, &tree.root(), None).expect("record");
    assert_eq!(tree, before);
}

#[test]
fn deep_or_huge_trees_are_rejected_before_search() {
    let err = GameTree::uniform(1, 200_000, &[1]).expect_err("too deep");
    assert!(matches!(err, Error::InvalidInput(_)));
    assert!(GameTree::uniform(1, u32::MAX, &[1]).is_err());
    assert!(GameTree::uniform(2, 40, &[]).is_err());
    assert!(GameTree::uniform(1, MAX_TREE_DEPTH as u32, &[1]).is_ok());

    // 链状的显式树同样受深度限制
    let n = MAX_TREE_DEPTH + 2;
    let chain = (0..n)
        .map(|i| if i + 1 < n { vec![i + 1] } else { Vec::new() })
        .collect::<Vec<_>>();
    let utils = BTreeMap::from([(n - 1, 0)]);
    assert!(matches!(
        GameTree::from_children(chain, utils),
        Err(Error::InvalidInput(_))
    ));

    let too_many = vec![Vec::new(); MAX_TREE_NODES + 1];
    assert!(matches!(
        GameTree::from_children(too_many, BTreeMap::new()),
        Err(Error::InvalidInput(_))
    ));
}

/// 根和第一层都由 MAX 行动
struct DoubleMove<'a>(&'a GameTree);

impl Game for DoubleMove<'_> {
    type State = NodeId;
    type Action = usize;

    fn actions(&self, state: &NodeId) -> Vec<usize> {
        self.0.actions(state)
    }
    fn result(&self, state: &NodeId, action: &usize) -> NodeId {
        self.0.result(state, action)
    }
    fn terminal_test(&self, state: &NodeId) -> bool {
        self.0.terminal_test(state)
    }
    fn utility(&self, state: &NodeId, player: Player) -> Result<i64> {
        self.0.utility(state, player)
    }
    fn to_move(&self, _state: &NodeId) -> Player {
        Player::Max
    }
    fn node(&self, state: &NodeId) -> NodeId {
        *state
    }
}

#[test]
fn node_kind_follows_to_move_not_depth_parity() {
    let tree = GameTree::uniform(2, 2, &[1, 5, 3, 2]).expect("tree");
    let game = DoubleMove(&tree);

    let mm = minimax_decision(&game, &tree.root(), &mut NoopInstrument).expect("minimax");
    assert_eq!(mm.value, 5);
    assert_eq!(mm.action, Some(0));

    let ab = alpha_beta_search(&game, &tree.root(), &mut NoopInstrument).expect("alpha-beta");
    assert_eq!(ab.value, 5);
    assert_eq!(ab.action, Some(0));

    // 交替行动时仍是普通 minimax
    let alt = minimax_decision(&tree, &tree.root(), &mut NoopInstrument).expect("minimax");
    assert_eq!(alt.value, 2);
    assert_eq!(alt.action, Some(1));
}
