use super::*;
use crate::foundation::ids::BufferId;

#[test]
fn ids_follow_insertion_order() {
    let mut arena: Arena<BufferId, &str> = Arena::new();
    assert!(arena.is_empty());
    let a = arena.push("a");
    let b = arena.push("b");
    assert_eq!(a, BufferId(0));
    assert_eq!(b, BufferId(1));
    assert_eq!(arena.len(), 2);
    assert_eq!(arena[b], "b");
    assert_eq!(arena.get(BufferId(7)), None);

    let ids: Vec<_> = arena.iter().map(|(id, _)| id).collect();
    assert_eq!(ids, vec![a, b]);
}

#[test]
fn items_are_mutable_in_place() {
    let mut arena: Arena<BufferId, u32> = Arena::new();
    let id = arena.push(1);
    *arena.get_mut(id).unwrap() += 1;
    arena[id] *= 10;
    assert_eq!(arena[id], 20);
}

#[test]
fn serializes_as_a_plain_list() {
    let mut arena: Arena<BufferId, u32> = Arena::new();
    arena.push(3);
    arena.push(4);
    assert_eq!(serde_json::to_string(&arena).unwrap(), "[3,4]");
}
