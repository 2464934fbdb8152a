//! Integration test: list behaviour against a `VecDeque` model.
//!
//! Random operation sequences run against a `List` and a `VecDeque` side by
//! side; after every step length, order, and both ends must agree. The same
//! sequences run on the heap, on an arena, and through a ledger-keeping
//! strategy that must balance once the list is dropped.

use std::collections::VecDeque;

use proptest::prelude::*;
use strand_arena::{ArenaConfig, ArenaStorage};
use strand_core::AllocStrategy;
use strand_list::List;
use strand_test_utils::CountingAlloc;

#[derive(Clone, Debug)]
enum Op {
    PushFront(i32),
    PushBack(i32),
    PopFront,
    PopBack,
    Insert(usize, i32),
    Remove(usize),
    CursorInsert(usize, i32),
    CursorErase(usize),
    Clear,
}

fn arb_op() -> impl Strategy<Value = Op> {
    prop_oneof![
        4 => any::<i32>().prop_map(Op::PushFront),
        4 => any::<i32>().prop_map(Op::PushBack),
        2 => Just(Op::PopFront),
        2 => Just(Op::PopBack),
        2 => (0usize..64, any::<i32>()).prop_map(|(i, v)| Op::Insert(i, v)),
        2 => (0usize..64).prop_map(Op::Remove),
        1 => (0usize..64, any::<i32>()).prop_map(|(i, v)| Op::CursorInsert(i, v)),
        1 => (0usize..64).prop_map(Op::CursorErase),
        1 => Just(Op::Clear),
    ]
}

/// Apply `op` to both sides. Indices are reduced modulo the valid range.
fn apply<A: AllocStrategy<Value = i32>>(list: &mut List<i32, A>, model: &mut VecDeque<i32>, op: &Op) {
    match *op {
        Op::PushFront(v) => {
            list.push_front(v).unwrap();
            model.push_front(v);
        }
        Op::PushBack(v) => {
            list.push_back(v).unwrap();
            model.push_back(v);
        }
        Op::PopFront => assert_eq!(list.pop_front(), model.pop_front()),
        Op::PopBack => assert_eq!(list.pop_back(), model.pop_back()),
        Op::Insert(i, v) => {
            let i = i % (model.len() + 1);
            list.insert(i, v).unwrap();
            model.insert(i, v);
        }
        Op::Remove(i) => {
            assert_eq!(list.remove(i), model.remove(i));
        }
        Op::CursorInsert(i, v) => {
            let i = i % (model.len() + 1);
            let mut cursor = list.cursor_front_mut();
            for _ in 0..i {
                cursor.move_next();
            }
            assert_eq!(cursor.index(), i);
            cursor.insert_before(v).unwrap();
            assert_eq!(cursor.index(), i + 1);
            model.insert(i, v);
        }
        Op::CursorErase(i) => {
            let i = i % (model.len() + 1);
            let mut cursor = list.cursor_front_mut();
            for _ in 0..i {
                cursor.move_next();
            }
            assert_eq!(cursor.remove_current(), model.remove(i));
            assert_eq!(cursor.index(), i);
        }
        Op::Clear => {
            list.clear();
            model.clear();
        }
    }
}

fn assert_matches<A: AllocStrategy<Value = i32>>(list: &List<i32, A>, model: &VecDeque<i32>) {
    assert_eq!(list.len(), model.len());
    assert_eq!(list.is_empty(), model.is_empty());
    assert_eq!(list.front(), model.front());
    assert_eq!(list.back(), model.back());
    assert!(list.iter().eq(model.iter()));
    assert!(list.iter().rev().eq(model.iter().rev()));
    assert_eq!(list.iter().len(), model.len());
}

proptest! {
    #[test]
    fn heap_list_matches_model(ops in proptest::collection::vec(arb_op(), 0..200)) {
        let mut list = List::new();
        let mut model = VecDeque::new();
        for op in &ops {
            apply(&mut list, &mut model, op);
            assert_matches(&list, &model);
        }
    }

    #[test]
    fn arena_list_matches_model(ops in proptest::collection::vec(arb_op(), 0..200)) {
        // 200 pushes of a 24-byte node fit comfortably.
        let mut storage = ArenaStorage::new(ArenaConfig::new(16 * 1024)).unwrap();
        let arena = storage.arena();
        let mut list = List::new_in(arena.handle::<i32>());
        let mut model = VecDeque::new();
        for op in &ops {
            apply(&mut list, &mut model, op);
            assert_matches(&list, &model);
        }
    }

    #[test]
    fn every_node_is_released(ops in proptest::collection::vec(arb_op(), 0..200)) {
        let alloc = CountingAlloc::<i32>::new();
        {
            let mut list = List::new_in(alloc.clone());
            let mut model = VecDeque::new();
            for op in &ops {
                apply(&mut list, &mut model, op);
                prop_assert_eq!(alloc.live(), model.len());
            }
        }
        prop_assert!(alloc.is_balanced());
    }

    #[test]
    fn len_counts_pushes_minus_pops(pushes in 0usize..100, pops in 0usize..120) {
        let mut list = List::new();
        for i in 0..pushes {
            list.push_back(i).unwrap();
        }
        let mut popped = 0;
        for _ in 0..pops {
            if list.pop_front().is_some() {
                popped += 1;
            }
        }
        prop_assert_eq!(popped, pops.min(pushes));
        prop_assert_eq!(list.len(), pushes - popped);
        prop_assert!(list.iter().copied().eq(popped..pushes));
    }

    #[test]
    fn swap_twice_is_identity(a in proptest::collection::vec(any::<u8>(), 0..20),
                              b in proptest::collection::vec(any::<u8>(), 0..20)) {
        let mut x: List<u8> = a.iter().copied().collect();
        let mut y: List<u8> = b.iter().copied().collect();
        x.swap(&mut y);
        prop_assert!(x.iter().eq(b.iter()));
        prop_assert!(y.iter().eq(a.iter()));
        x.swap(&mut y);
        prop_assert!(x.iter().eq(a.iter()));
        prop_assert!(y.iter().eq(b.iter()));
    }
}
