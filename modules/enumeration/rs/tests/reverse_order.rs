use std::cell::Cell;
use std::collections::VecDeque;

use eyre::{ensure, Result};
use itertools::{assert_equal, Itertools};

use revenum_enumeration_rs::{
    in_reverse_order, reverse_enumerator_of, ArraySegment, Enumerable, Enumerator, Error,
    InReverseOrder, ReverseEnumerable, State, TrackedVec,
};

fn letters() -> TrackedVec<String> {
    ["a", "b", "c"].into_iter().map(String::from).collect()
}

#[test]
fn reverse_matches_rev_for_every_shape() -> Result<()> {
    for len in [0, 1, 2, 7, 16] {
        let values = (0..len).collect_vec();

        assert_equal(values.in_reverse_order(), values.iter().rev());
        assert_equal(
            VecDeque::from(values.clone()).in_reverse_order(),
            values.iter().rev(),
        );

        let tracked = TrackedVec::from(values.clone());
        let collected = tracked
            .in_reverse_order()
            .into_iter()
            .collect::<Result<Vec<_>, _>>()?;
        assert_equal(&collected, values.iter().rev());

        let collected = in_reverse_order(&tracked.view())
            .into_iter()
            .collect::<Result<Vec<_>, _>>()?;
        assert_equal(&collected, values.iter().rev());

        let generic = ReverseEnumerable::growable(&tracked);
        assert_equal(generic, values.iter().rev().copied());
    }
    Ok(())
}

#[test]
fn letters_scenario() -> Result<()> {
    let list = letters();
    let enumerable = list.in_reverse_order();

    let mut enumerator = enumerable.enumerator();
    for expected in ["c", "b", "a"] {
        ensure!(enumerator.advance()?, "enumeration ended before {expected}");
        assert_eq!(enumerator.current().map(String::as_str), Some(expected));
    }
    assert!(!enumerator.advance()?);
    assert_eq!(enumerator.state(), State::Exhausted);

    assert_eq!(enumerable.get(0)?, "c");
    assert_eq!(enumerable.get(2)?, "a");
    Ok(())
}

#[test]
fn sixteen_element_segment() -> Result<()> {
    let array: [String; 16] = std::array::from_fn(|i| format!("x{i}"));
    let segment = ArraySegment::new(&array, 0, 16)?;

    let reversed = segment.in_reverse_order().into_iter().map(String::as_str).collect_vec();
    assert_eq!(reversed.first(), Some(&"x15"));
    assert_eq!(reversed.last(), Some(&"x0"));
    assert_equal(reversed, (0..16).rev().map(|i| format!("x{i}")));
    Ok(())
}

#[test]
fn indexer_rejects_out_of_range() -> Result<()> {
    let list = letters();
    let enumerable = list.in_reverse_order();

    for index in [3, usize::MAX] {
        assert_eq!(
            enumerable.get(index),
            Err(Error::OutOfRange { index, count: 3 })
        );
    }

    let array = ["a", "b", "c"];
    let report = eyre::Report::new(array.in_reverse_order().get(3).unwrap_err());
    assert!(report.to_string().contains("out of range"));
    Ok(())
}

#[test]
fn addition_during_iteration_fails_next_advance() {
    let list = letters();
    let mut results = Vec::new();

    for item in list.in_reverse_order() {
        if item.is_ok() {
            list.push("new value".to_string());
        }
        results.push(item);
    }

    assert_eq!(
        results,
        vec![Ok("c".to_string()), Err(Error::CollectionModified)]
    );
}

#[test]
fn addition_after_last_element_is_detected() -> Result<()> {
    let list = letters();
    let mut enumerator = reverse_enumerator_of(&list);

    let outcome = loop {
        match enumerator.advance() {
            Ok(true) => {
                if enumerator.current().is_some_and(|item| item == "a") {
                    list.push("late".to_string());
                }
            }
            other => break other,
        }
    };

    assert_eq!(outcome, Err(Error::CollectionModified));
    assert_eq!(enumerator.state(), State::Modified);
    Ok(())
}

#[test]
fn reset_before_and_after_modification() -> Result<()> {
    let list = letters();
    let mut enumerator = reverse_enumerator_of(&list);

    enumerator.reset()?;
    let first = (&mut enumerator).collect::<Result<Vec<_>, _>>()?;
    enumerator.reset()?;
    let second = (&mut enumerator).collect::<Result<Vec<_>, _>>()?;
    assert_eq!(first, second);

    list.push("new value".to_string());
    assert_eq!(enumerator.reset(), Err(Error::CollectionModified));
    Ok(())
}

#[test]
fn removal_is_detected_in_immutable_view() -> Result<()> {
    let list = letters();
    let mut enumerator = list.view().reverse_enumerator();

    assert!(enumerator.advance()?);
    list.remove(0)?;
    assert_eq!(enumerator.advance(), Err(Error::CollectionModified));
    Ok(())
}

#[test]
fn suppressed_check_reads_live_list() -> Result<()> {
    let list = TrackedVec::from(vec![1, 2, 3]);
    let enumerable = list.in_reverse_order().with_modification_check(false);

    let mut seen = Vec::new();
    for item in enumerable {
        let item = item?;
        if item == 3 {
            list.insert(0, 0)?;
        }
        seen.push(item);
    }
    // The unread prefix shifted right by one, so 2 is never reached
    assert_eq!(seen, vec![3, 1, 0]);
    Ok(())
}

#[test]
fn fixed_and_readonly_shapes_never_fail() -> Result<()> {
    let cells = [Cell::new(1), Cell::new(2), Cell::new(3)];
    let mut enumerator = cells.reverse_enumerator();
    assert!(enumerator.advance()?);
    cells[0].set(100);
    let rest = enumerator.map(Cell::get).collect_vec();
    assert_eq!(rest, vec![2, 100]);

    let list = TrackedVec::from(vec![1, 2, 3]);
    let mut generic = ReverseEnumerable::growable(&list).enumerator();
    assert!(generic.advance()?);
    list.push(4);
    assert!(generic.advance()?);
    assert_eq!(generic.current(), Some(&2));
    generic.reset()?;
    assert_equal(generic, [4, 3, 2, 1]);
    Ok(())
}

#[test]
fn empty_sequences() -> Result<()> {
    let empty: Vec<u8> = Vec::new();
    assert!(!reverse_enumerator_of(&empty).advance()?);
    assert!(!reverse_enumerator_of(&TrackedVec::<u8>::new()).advance()?);
    assert!(!reverse_enumerator_of(&VecDeque::<u8>::new()).advance()?);
    assert_eq!(in_reverse_order(&empty).count(), 0);
    Ok(())
}

#[test]
fn extend_from_own_reverse_enumeration() -> Result<()> {
    let list = TrackedVec::from(vec![1, 2, 3]);

    list.extend(list.view().in_reverse_order().into_iter().map_while(|item| item.ok()));
    assert_eq!(list.to_vec(), vec![1, 2, 3, 3, 2, 1]);

    // The enumeration finished before the list grew, so nothing was reported
    let mut enumerator = list.view().reverse_enumerator();
    list.extend(list.in_reverse_order().with_modification_check(false).into_iter().flatten());
    assert_eq!(list.len(), 12);
    assert_eq!(enumerator.advance(), Err(Error::CollectionModified));
    Ok(())
}
