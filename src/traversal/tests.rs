use super::*;
use crate::{tree::{NodeId, Tree}, ErrorKind, TreeError};
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use rstest::rstest;

/// `R[A[C], B]`, with the ids of `R`, `A`, `B` and `C`.
fn sample() -> (Tree<char>, [NodeId; 4]) {
    let mut tree = Tree::with_root('R');
    let r = tree.root_id().unwrap();
    let a = tree.add_child(r, 'A').unwrap();
    let b = tree.add_child(r, 'B').unwrap();
    let c = tree.add_child(a, 'C').unwrap();
    (tree, [r, a, b, c])
}

fn count_nodes<X: Traversable>(traversable: X) -> usize {
    traversable
        .cursor_to_root()
        .map_or(0, |root| traversable.collect_from(root, TraversalOrder::PreOrder).len())
}

fn children(tree: &Tree<char>, id: NodeId) -> Vec<char> {
    tree.children_of(id).iter().map(|&child| *tree.get(child).unwrap()).collect()
}

#[test]
fn defaults() {
    assert_eq!(TraversalOrder::default(), TraversalOrder::LevelOrder);
}

#[test]
fn traversable_through_reference() {
    let (tree, [r, a, b, c]) = sample();
    let by_ref = &tree;
    assert_eq!(by_ref.cursor_to_root(), Some(r));
    assert_eq!(by_ref.value_of(c), Some(&'C'));
    assert_eq!(by_ref.parent_of(c), Some(a));
    assert_eq!(by_ref.parent_of(r), None);
    assert_eq!(by_ref.num_children_of(r), 2);
    assert_eq!(by_ref.nth_child_of(r, 1), Some(b));
    assert_eq!(by_ref.nth_child_of(r, 2), None);
    assert_eq!(by_ref.collect_from(a, TraversalOrder::PreOrder), [a, c]);
    assert_eq!(by_ref.find_from(r, |&value| value == 'C'), Some(c));
    assert_eq!(by_ref.find_from(b, |&value| value == 'C'), None);
    assert_eq!(count_nodes(by_ref), 4);
    assert_eq!(count_nodes(&by_ref), 4);
}

#[test]
fn absent_cursor_has_nothing() {
    let (mut tree, [r, a, _, c]) = sample();
    tree.trim(a).unwrap();
    assert_eq!(tree.value_of(c), None);
    assert_eq!(tree.parent_of(c), None);
    assert!(tree.children_of(a).is_empty());
    assert!(tree.collect_from(a, TraversalOrder::LevelOrder).is_empty());
    assert_eq!(tree.find_from(a, |_| true), None);
    assert_eq!(tree.collect_from(r, TraversalOrder::PostOrder).len(), 2);
}

#[test]
fn moves_in_all_directions() {
    let (tree, [r, a, b, c]) = sample();
    let mut traverser = tree.traverser();
    assert_eq!(traverser.current(), Some(r));
    assert_eq!(traverser.has_next(&tree, Direction::Parent), Ok(false));
    assert_eq!(traverser.has_next(&tree, Direction::NextSibling), Ok(false));
    assert_eq!(traverser.has_next(&tree, Direction::Child), Ok(true));

    assert_eq!(traverser.next(&tree, Direction::Child), Ok(a));
    assert_eq!(traverser.depth(), 2);
    assert_eq!(traverser.has_next(&tree, Direction::PrevSibling), Ok(false));
    assert_eq!(traverser.has_next(&tree, Direction::NextSibling), Ok(true));
    assert_eq!(traverser.next(&tree, Direction::Child), Ok(c));
    assert_eq!(traverser.data(&tree), Ok(&'C'));
    assert_eq!(traverser.has_next(&tree, Direction::Child), Ok(false));
    assert_eq!(traverser.next(&tree, Direction::Child), Err(TreeError::NoSuchElement));
    assert_eq!(traverser.next(&tree, Direction::NextSibling), Err(TreeError::NoSuchElement));

    assert_eq!(traverser.next(&tree, Direction::Parent), Ok(a));
    assert_eq!(traverser.depth(), 2);
    assert_eq!(traverser.next(&tree, Direction::NextSibling), Ok(b));
    assert_eq!(
        traverser.sibling_context(),
        Some(SiblingContext { before: vec![a], after: vec![] }),
    );
    assert_eq!(traverser.next(&tree, Direction::PrevSibling), Ok(a));
    assert_eq!(traverser.next(&tree, Direction::Parent), Ok(r));
    assert_eq!(traverser.depth(), 1);
    assert_eq!(traverser.next(&tree, Direction::Parent).unwrap_err().kind(), ErrorKind::NotFound);
}

#[test]
fn starting_deep_rebuilds_ancestors() {
    let (tree, [r, a, b, c]) = sample();
    let mut traverser = tree.traverser_at(c).unwrap();
    assert_eq!(traverser.depth(), 1);
    assert_eq!(traverser.next(&tree, Direction::Parent), Ok(a));
    assert_eq!(traverser.has_next(&tree, Direction::NextSibling), Ok(true));
    assert_eq!(traverser.next(&tree, Direction::NextSibling), Ok(b));
    assert_eq!(traverser.next(&tree, Direction::Parent), Ok(r));
    assert_eq!(traverser.depth(), 1);
}

#[test]
fn many_siblings_both_ways() {
    let mut tree = Tree::with_root(0_u32);
    let root = tree.root_id().unwrap();
    let kids: Vec<NodeId> = (1..=20).map(|i| tree.add_child(root, i).unwrap()).collect();
    let mut traverser = tree.traverser();
    traverser.next(&tree, Direction::Child).unwrap();
    for &kid in &kids[1..] {
        assert_eq!(traverser.next(&tree, Direction::NextSibling), Ok(kid));
    }
    assert_eq!(traverser.has_next(&tree, Direction::NextSibling), Ok(false));
    let context = traverser.sibling_context().unwrap();
    assert_eq!(context.before, kids[..19].to_vec());
    assert!(context.after.is_empty());
    for &kid in kids[..19].iter().rev() {
        assert_eq!(traverser.next(&tree, Direction::PrevSibling), Ok(kid));
    }
    assert_eq!(traverser.has_next(&tree, Direction::PrevSibling), Ok(false));
}

#[test]
fn trim_at_cursor_moves_to_parent() {
    let (mut tree, [r, a, b, _]) = sample();
    let mut traverser = tree.traverser();
    traverser.next(&tree, Direction::Child).unwrap();
    let before = tree.mod_count();
    assert_eq!(traverser.trim(&mut tree), Ok(2));
    assert_eq!(tree.mod_count(), before + 1);
    assert_eq!(traverser.current(), Some(r));
    assert_eq!(children(&tree, r), ['B']);
    assert_eq!(traverser.next(&tree, Direction::Child), Ok(b));
    assert!(!tree.contains(a));
}

#[test]
fn remove_at_cursor_promotes_children() {
    let (mut tree, [r, a, _, c]) = sample();
    let mut traverser = tree.traverser();
    assert_eq!(traverser.next(&tree, Direction::Child), Ok(a));
    assert_eq!(traverser.remove(&mut tree), Ok('A'));
    assert_eq!(children(&tree, r), ['C', 'B']);
    assert_eq!(traverser.current(), Some(r));
    assert_eq!(traverser.next(&tree, Direction::Child), Ok(c));
}

#[test]
fn removing_the_root_unfocuses() {
    let mut tree = Tree::with_root('R');
    let r = tree.root_id().unwrap();
    let a = tree.add_child(r, 'A').unwrap();
    let mut traverser = tree.traverser();
    assert_eq!(traverser.remove(&mut tree), Ok('R'));
    assert_eq!(traverser.current(), None);
    assert_eq!(tree.root_id(), Some(a));
    assert_eq!(traverser.has_next(&tree, Direction::Child), Ok(false));
    assert_eq!(traverser.next(&tree, Direction::Child), Err(TreeError::NoSuchElement));
    assert_eq!(traverser.remove(&mut tree).unwrap_err().kind(), ErrorKind::IllegalState);
    assert_eq!(traverser.trim(&mut tree).unwrap_err().kind(), ErrorKind::IllegalState);
}

#[test]
fn unfocused_add_raises_a_new_root() {
    let mut tree = Tree::with_root('R');
    let r = tree.root_id().unwrap();
    let a = tree.add_child(r, 'A').unwrap();
    tree.add_child(a, 'B').unwrap();
    let mut traverser = tree.traverser();
    traverser.remove(&mut tree).unwrap();
    assert_eq!(traverser.current(), None);

    let z = traverser.add(&mut tree, 'Z').unwrap();
    assert_eq!(traverser.current(), Some(z));
    assert_eq!(tree.root_id(), Some(z));
    assert_eq!(tree.parent_of(a), Some(z));
    assert_eq!(tree.size(), 3);
    assert_eq!(traverser.has_next(&tree, Direction::Parent), Ok(false));
    assert_eq!(traverser.next(&tree, Direction::Child), Ok(a));
    assert_eq!(traverser.data(&tree), Ok(&'A'));
    assert_eq!(traverser.next(&tree, Direction::Parent), Ok(z));

    // The traverser survived its own mutations.
    let y = traverser.add(&mut tree, 'Y').unwrap();
    assert_eq!(children(&tree, z), ['A', 'Y']);
    traverser.next(&tree, Direction::Child).unwrap();
    assert_eq!(traverser.next(&tree, Direction::NextSibling), Ok(y));
}

#[test]
fn unfocused_insert_raises_a_new_root() {
    let (mut tree, [_, a, ..]) = sample();
    let mut traverser = tree.traverser();
    traverser.trim(&mut tree).unwrap();
    assert!(tree.is_empty());
    assert!(!tree.contains(a));

    let p = traverser.insert(&mut tree, 'P').unwrap();
    let q = traverser.add(&mut tree, 'Q').unwrap();
    assert_eq!(traverser.remove(&mut tree), Ok('P'));
    assert_eq!(tree.root_id(), Some(q));

    let s = traverser.insert(&mut tree, 'S').unwrap();
    assert_ne!(p, s);
    assert_eq!(traverser.current(), Some(s));
    assert_eq!(tree.root_id(), Some(s));
    assert_eq!(children(&tree, s), ['Q']);
}

#[test]
fn unfocused_add_on_read_only_tree_is_unsupported() {
    let mut tree = Tree::with_root('R');
    let r = tree.root_id().unwrap();
    tree.add_child(r, 'A').unwrap();
    let mut traverser = tree.traverser();
    traverser.remove(&mut tree).unwrap();
    let mut tree = tree.into_read_only();
    assert_eq!(traverser.add(&mut tree, 'Z'), Err(TreeError::Unsupported));
}

#[test]
fn branching_root_cannot_be_removed() {
    let (mut tree, [r, ..]) = sample();
    let mut traverser = tree.traverser();
    let before = tree.mod_count();
    assert_eq!(traverser.remove(&mut tree).unwrap_err().kind(), ErrorKind::IllegalState);
    assert_eq!(tree.mod_count(), before);
    assert_eq!(traverser.current(), Some(r));
    assert_eq!(traverser.has_next(&tree, Direction::Child), Ok(true));
}

#[test]
fn insert_keeps_focus() {
    let (mut tree, [r, a, b, _]) = sample();
    let mut traverser = tree.traverser();
    traverser.next(&tree, Direction::Child).unwrap();
    let x = traverser.insert(&mut tree, 'X').unwrap();
    assert_eq!(traverser.current(), Some(a));
    assert_eq!(traverser.has_next(&tree, Direction::NextSibling), Ok(false));
    assert_eq!(children(&tree, r), ['B', 'X']);
    assert_eq!(traverser.next(&tree, Direction::Parent), Ok(x));
    assert_eq!(traverser.next(&tree, Direction::PrevSibling), Ok(b));
    assert_eq!(traverser.next(&tree, Direction::Parent), Ok(r));
    assert_eq!(traverser.depth(), 1);

    let before = tree.mod_count();
    assert_eq!(traverser.insert(&mut tree, 'Y').unwrap_err().kind(), ErrorKind::InvalidArgument);
    assert_eq!(tree.mod_count(), before);
}

#[test]
fn empty_tree_traverser_creates_root() {
    let mut tree = Tree::new();
    let mut traverser = tree.traverser();
    assert_eq!(traverser.current(), None);
    assert_eq!(traverser.depth(), 0);
    assert_eq!(traverser.sibling_context(), None);
    for direction in [Direction::Parent, Direction::Child, Direction::PrevSibling, Direction::NextSibling] {
        assert_eq!(traverser.has_next(&tree, direction), Ok(false));
    }
    assert_eq!(traverser.set_data(&mut tree, 1).unwrap_err().kind(), ErrorKind::IllegalState);
    assert_eq!(traverser.data(&tree).unwrap_err().kind(), ErrorKind::IllegalState);

    let root = traverser.insert(&mut tree, 1).unwrap();
    assert_eq!(traverser.current(), Some(root));
    let child = traverser.add(&mut tree, 2).unwrap();
    assert_eq!(traverser.current(), Some(root));
    assert_eq!(traverser.set_data(&mut tree, 10), Ok(1));
    assert_eq!(traverser.next(&tree, Direction::Child), Ok(child));
    assert_eq!(tree.size(), 2);
    assert_eq!(tree.get(root), Some(&10));
}

#[test]
fn second_traverser_fails_fast() {
    let (mut tree, [_, a, ..]) = sample();
    let mut first = tree.traverser();
    let mut second = tree.traverser();
    first.add(&mut tree, 'D').unwrap();
    assert_eq!(first.next(&tree, Direction::Child), Ok(a));
    assert_eq!(second.next(&tree, Direction::Child), Err(TreeError::ConcurrentModification));
    assert_eq!(second.has_next(&tree, Direction::Child), Err(TreeError::ConcurrentModification));
    assert_eq!(second.data(&tree), Err(TreeError::ConcurrentModification));

    let mut clone = first.clone();
    clone.next(&tree, Direction::NextSibling).unwrap();
    assert_eq!(first.current(), Some(a));

    tree.add_child(a, 'E').unwrap();
    assert_eq!(first.remove(&mut tree), Err(TreeError::ConcurrentModification));
}

#[test]
fn foreign_tree_is_rejected() {
    let (tree, _) = sample();
    let (other, _) = sample();
    let traverser = tree.traverser();
    let err = traverser.has_next(&other, Direction::Child).unwrap_err();
    assert_eq!(err, TreeError::ForeignTree);
    assert_eq!(err.kind(), ErrorKind::InvalidArgument);
}

#[rstest]
#[case(Direction::Parent)]
#[case(Direction::PrevSibling)]
#[case(Direction::NextSibling)]
fn root_only_moves_down(#[case] direction: Direction) {
    let (tree, _) = sample();
    let mut traverser = tree.traverser();
    assert_eq!(traverser.has_next(&tree, direction), Ok(false));
    assert_eq!(traverser.next(&tree, direction), Err(TreeError::NoSuchElement));
}

#[rstest]
#[case::pre(TraversalOrder::PreOrder, &[0, 1, 3, 4, 2, 5])]
#[case::post(TraversalOrder::PostOrder, &[3, 4, 1, 5, 2, 0])]
#[case::level(TraversalOrder::LevelOrder, &[0, 1, 2, 3, 4, 5])]
fn collect_orders(#[case] order: TraversalOrder, #[case] expected: &[u8]) {
    // 0[1[3, 4], 2[5]]
    let mut tree = Tree::with_root(0_u8);
    let root = tree.root_id().unwrap();
    let one = tree.add_child(root, 1).unwrap();
    let two = tree.add_child(root, 2).unwrap();
    tree.add_child(one, 3).unwrap();
    tree.add_child(one, 4).unwrap();
    tree.add_child(two, 5).unwrap();
    let visited: Vec<u8> = tree
        .collect_from(root, order)
        .into_iter()
        .map(|id| *tree.get(id).unwrap())
        .collect();
    assert_eq!(visited, expected);
}

proptest! {
    #[test]
    fn next_sibling_walk_matches_children(count in 1_usize..30, start in 0_usize..30) {
        let mut tree = Tree::with_root(usize::MAX);
        let root = tree.root_id().unwrap();
        let kids: Vec<NodeId> = (0..count).map(|i| tree.add_child(root, i).unwrap()).collect();
        let start = start % count;
        let mut traverser = tree.traverser_at(kids[start]).unwrap();
        let mut seen = vec![kids[start]];
        while traverser.has_next(&tree, Direction::NextSibling).unwrap() {
            seen.push(traverser.next(&tree, Direction::NextSibling).unwrap());
        }
        prop_assert_eq!(&seen[..], &kids[start..]);
        prop_assert_eq!(traverser.next(&tree, Direction::Parent).unwrap(), root);
    }
}
