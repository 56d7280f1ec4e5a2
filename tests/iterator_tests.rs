use std::cell::Cell;
use std::rc::Rc;

use growvec::GrowVec;

#[derive(Clone)]
struct DropTally(Rc<Cell<usize>>);

impl Drop for DropTally {
    fn drop(&mut self) {
        self.0.set(self.0.get() + 1);
    }
}

#[test]
fn test_iter_walks_the_live_range() {
    let v = GrowVec::try_from([1, 2, 3]).unwrap();

    let collected: Vec<i32> = v.iter().copied().collect();
    assert_eq!(collected, vec![1, 2, 3]);

    // Spare capacity is not iterated.
    let mut w: GrowVec<i32> = GrowVec::with_capacity(10).unwrap();
    w.push(1).unwrap();
    assert_eq!(w.iter().count(), 1);
}

#[test]
fn test_iter_mut_allows_in_place_updates() {
    let mut v = GrowVec::try_from([1, 2, 3]).unwrap();

    for value in v.iter_mut() {
        *value *= 10;
    }

    assert_eq!(v.as_slice(), &[10, 20, 30]);
}

#[test]
fn test_for_loop_over_references() {
    let v = GrowVec::try_from([1, 2, 3]).unwrap();

    let mut sum = 0;
    for value in &v {
        sum += value;
    }

    assert_eq!(sum, 6);
}

#[test]
fn test_into_iter_yields_by_value() {
    let v = GrowVec::try_from(["a".to_string(), "b".to_string()]).unwrap();

    let collected: Vec<String> = v.into_iter().collect();

    assert_eq!(collected, vec!["a".to_string(), "b".to_string()]);
}

#[test]
fn test_into_iter_is_double_ended() {
    let v = GrowVec::try_from([1, 2, 3, 4]).unwrap();
    let mut iter = v.into_iter();

    assert_eq!(iter.next(), Some(1));
    assert_eq!(iter.next_back(), Some(4));
    assert_eq!(iter.next(), Some(2));
    assert_eq!(iter.next_back(), Some(3));
    assert_eq!(iter.next(), None);
    assert_eq!(iter.next_back(), None);
}

#[test]
fn test_into_iter_reversed() {
    let v = GrowVec::try_from([1, 2, 3]).unwrap();

    let collected: Vec<i32> = v.into_iter().rev().collect();

    assert_eq!(collected, vec![3, 2, 1]);
}

#[test]
fn test_into_iter_size_hint_is_exact() {
    let v = GrowVec::try_from([1, 2, 3]).unwrap();
    let mut iter = v.into_iter();

    assert_eq!(iter.len(), 3);
    assert_eq!(iter.size_hint(), (3, Some(3)));

    iter.next();
    assert_eq!(iter.len(), 2);
}

#[test]
fn test_into_iter_as_slice_shows_the_rest() {
    let v = GrowVec::try_from([1, 2, 3, 4]).unwrap();
    let mut iter = v.into_iter();

    iter.next();
    iter.next_back();

    assert_eq!(iter.as_slice(), &[2, 3]);
}

#[test]
fn test_partially_consumed_into_iter_drops_the_rest() {
    let drops = Rc::new(Cell::new(0));
    let v = GrowVec::from_elem(DropTally(Rc::clone(&drops)), 5).unwrap();

    let mut iter = v.into_iter();
    drop(iter.next());
    drop(iter.next());
    assert_eq!(drops.get(), 2);

    drop(iter);
    assert_eq!(drops.get(), 5);
}

#[test]
fn test_unconsumed_into_iter_drops_everything() {
    let drops = Rc::new(Cell::new(0));
    let v = GrowVec::from_elem(DropTally(Rc::clone(&drops)), 3).unwrap();

    drop(v.into_iter());

    assert_eq!(drops.get(), 3);
}

#[test]
fn test_into_iter_over_zero_sized_elements() {
    let mut v: GrowVec<()> = GrowVec::new();
    for _ in 0..4 {
        v.push(()).unwrap();
    }

    let mut iter = v.into_iter();
    assert_eq!(iter.len(), 4);
    assert_eq!(iter.next(), Some(()));
    assert_eq!(iter.next_back(), Some(()));
    assert_eq!(iter.count(), 2);
}

#[test]
fn test_empty_vector_into_iter() {
    let v: GrowVec<i32> = GrowVec::new();
    let mut iter = v.into_iter();

    assert_eq!(iter.len(), 0);
    assert_eq!(iter.next(), None);
}
