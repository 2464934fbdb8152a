//! Integration test: element addresses survive edits elsewhere.
//!
//! Nodes never move once linked. Inserting or erasing one element must not
//! relocate any other, and moving, swapping, or appending whole lists must
//! carry the same nodes across.

use strand_arena::{ArenaConfig, ArenaStorage};
use strand_list::List;

fn addresses<T>(list: &List<T>) -> Vec<*const T> {
    list.iter().map(|v| v as *const T).collect()
}

#[test]
fn insert_and_erase_leave_other_elements_in_place() {
    let mut list: List<u64> = (0..8).collect();
    let before = addresses(&list);

    list.insert(4, 100).unwrap();
    list.push_front(200).unwrap();
    list.push_back(300).unwrap();
    assert_eq!(list.remove(3), Some(2));

    let survivors: Vec<*const u64> = list
        .iter()
        .filter(|v| **v < 100)
        .map(|v| v as *const u64)
        .collect();
    let expected: Vec<*const u64> = before
        .iter()
        .enumerate()
        .filter(|(i, _)| *i != 2)
        .map(|(_, p)| *p)
        .collect();
    assert_eq!(survivors, expected);
}

#[test]
fn cursor_position_survives_edits_around_it() {
    let mut list: List<char> = "abcde".chars().collect();
    let mut cursor = list.cursor_front_mut();
    cursor.move_next();
    cursor.move_next();
    let pinned = cursor.current().map(|c| c as *const char);

    cursor.insert_before('x').unwrap();
    cursor.insert_after('y').unwrap();
    cursor.push_front('<').unwrap();
    cursor.push_back('>').unwrap();
    cursor.move_prev();
    assert_eq!(cursor.remove_current(), Some('x'));

    assert_eq!(cursor.current().map(|c| c as *const char), pinned);
    assert_eq!(cursor.current(), Some(&'c'));
    assert_eq!(cursor.index(), 3);
    assert_eq!(list.iter().collect::<String>(), "<abcyde>");
}

#[test]
fn moving_the_list_value_keeps_its_nodes() {
    let list: List<String> = ["x", "y", "z"].iter().map(|s| s.to_string()).collect();
    let before = addresses(&list);

    let mut holder = vec![list];
    holder.reserve(64);
    let list = holder.pop().unwrap();
    assert_eq!(addresses(&list), before);
}

#[test]
fn swap_and_append_carry_nodes_across() {
    let mut a: List<u32> = (0..4).collect();
    let mut b: List<u32> = (10..12).collect();
    let a_nodes = addresses(&a);
    let b_nodes = addresses(&b);

    a.swap(&mut b);
    assert_eq!(addresses(&a), b_nodes);
    assert_eq!(addresses(&b), a_nodes);

    a.append(&mut b);
    let mut joined = b_nodes.clone();
    joined.extend(&a_nodes);
    assert_eq!(addresses(&a), joined);
}

#[test]
fn iteration_after_heavy_churn_on_an_arena() {
    let mut storage = ArenaStorage::new(ArenaConfig::new(64 * 1024)).unwrap();
    let arena = storage.arena();
    let mut list = List::new_in(arena.handle::<u32>());
    for round in 0..50u32 {
        for i in 0..20 {
            list.push_back(round * 100 + i).unwrap();
        }
        for _ in 0..15 {
            list.pop_front();
        }
    }
    assert_eq!(list.len(), 50 * 5);
    let values: Vec<u32> = list.iter().copied().collect();
    assert!(values.windows(2).all(|w| w[0] < w[1]));
    assert_eq!(list.iter().rev().count(), list.len());
}
