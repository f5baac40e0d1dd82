use metrum::errors::MetrumError;
use metrum::hashed_list::HashedLinkedList;

fn order(list: &HashedLinkedList<i32>) -> Vec<i32> {
    list.iter().copied().collect()
}

#[test]
fn test_navigation_around_anchored_insert() {
    let mut list = HashedLinkedList::new();
    list.push_back(1).unwrap();
    list.push_back(2).unwrap();
    list.push_back(3).unwrap();
    list.insert_after(12, &1).unwrap();

    assert_eq!(order(&list), vec![1, 12, 2, 3]);
    assert_eq!(list.neighbor_before(&2), Ok(&12));
    assert_eq!(list.neighbor_after(&12), Ok(&2));

    assert!(list.remove(&12));
    assert!(!list.contains(&12));
    assert_eq!(list.neighbor_after(&1), Ok(&2));
    assert_eq!(order(&list), vec![1, 2, 3]);
}

#[test]
fn test_push_front_and_back_ordering() {
    let mut list = HashedLinkedList::new();
    list.push_back(2).unwrap();
    list.push_front(1).unwrap();
    list.push_back(3).unwrap();
    assert_eq!(order(&list), vec![1, 2, 3]);
    assert_eq!(list.front(), Ok(&1));
    assert_eq!(list.back(), Ok(&3));
    assert_eq!(list.len(), 3);
}

#[test]
fn test_duplicate_insertion_rejected() {
    let mut list = HashedLinkedList::new();
    list.push_back(7).unwrap();
    assert!(matches!(
        list.push_back(7).unwrap_err(),
        MetrumError::DuplicateElement { .. }
    ));
    assert!(matches!(
        list.push_front(7).unwrap_err(),
        MetrumError::DuplicateElement { .. }
    ));
    assert!(matches!(
        list.insert_after(7, &7).unwrap_err(),
        MetrumError::DuplicateElement { .. }
    ));
    assert_eq!(list.len(), 1);
}

#[test]
fn test_empty_sequence_errors() {
    let mut list: HashedLinkedList<i32> = HashedLinkedList::new();
    assert!(list.is_empty());
    assert_eq!(list.front(), Err(MetrumError::EmptySequence));
    assert_eq!(list.back(), Err(MetrumError::EmptySequence));

    list.push_back(5).unwrap();
    assert_eq!(list.front(), Ok(&5));
    list.clear();
    assert_eq!(list.front(), Err(MetrumError::EmptySequence));
    assert_eq!(list.len(), 0);
}

#[test]
fn test_neighbor_errors() {
    let mut list = HashedLinkedList::new();
    list.push_back(1).unwrap();
    list.push_back(2).unwrap();

    assert!(matches!(
        list.neighbor_before(&99).unwrap_err(),
        MetrumError::ElementNotFound { .. }
    ));
    assert_eq!(list.neighbor_before(&1), Err(MetrumError::NoSuchElement));
    assert_eq!(list.neighbor_after(&2), Err(MetrumError::NoSuchElement));
}

#[test]
fn test_anchored_insert_at_boundaries() {
    let mut list = HashedLinkedList::new();
    list.push_back(10).unwrap();

    // Anchor is both first and last; head and tail must reattach.
    list.insert_before(5, &10).unwrap();
    list.insert_after(15, &10).unwrap();
    assert_eq!(order(&list), vec![5, 10, 15]);
    assert_eq!(list.front(), Ok(&5));
    assert_eq!(list.back(), Ok(&15));

    assert!(matches!(
        list.insert_before(1, &99).unwrap_err(),
        MetrumError::ElementNotFound { .. }
    ));
    assert!(matches!(
        list.insert_after(1, &99).unwrap_err(),
        MetrumError::ElementNotFound { .. }
    ));
}

#[test]
fn test_remove_head_middle_tail() {
    let mut list = HashedLinkedList::new();
    for i in 1..=5 {
        list.push_back(i).unwrap();
    }

    assert!(list.remove(&1));
    assert_eq!(order(&list), vec![2, 3, 4, 5]);
    assert_eq!(list.front(), Ok(&2));

    assert!(list.remove(&4));
    assert_eq!(order(&list), vec![2, 3, 5]);

    assert!(list.remove(&5));
    assert_eq!(order(&list), vec![2, 3]);
    assert_eq!(list.back(), Ok(&3));

    assert!(!list.remove(&42));
    assert_eq!(list.len(), 2);
}

#[test]
fn test_iter_from_member() {
    let mut list = HashedLinkedList::new();
    for i in 1..=5 {
        list.push_back(i).unwrap();
    }
    let suffix: Vec<i32> = list.iter_from(&3).unwrap().copied().collect();
    assert_eq!(suffix, vec![3, 4, 5]);

    assert!(matches!(
        list.iter_from(&99).unwrap_err(),
        MetrumError::ElementNotFound { .. }
    ));
}

#[test]
fn test_cursor_detects_external_modification() {
    let mut list = HashedLinkedList::new();
    list.push_back(1).unwrap();
    list.push_back(2).unwrap();
    list.push_back(3).unwrap();

    let mut cursor = list.cursor();
    list.push_back(99).unwrap();
    assert_eq!(
        cursor.next(&list),
        Err(MetrumError::ConcurrentModification)
    );
}

#[test]
fn test_cursor_detects_removal_behind_its_back() {
    let mut list = HashedLinkedList::new();
    list.push_back(1).unwrap();
    list.push_back(2).unwrap();

    let mut cursor = list.cursor();
    assert_eq!(cursor.next(&list), Ok(Some(&1)));
    list.remove(&2);
    assert_eq!(
        cursor.next(&list),
        Err(MetrumError::ConcurrentModification)
    );
    assert_eq!(
        cursor.remove(&mut list),
        Err(MetrumError::ConcurrentModification)
    );
}

#[test]
fn test_cursor_remove_resynchronizes() {
    let mut list = HashedLinkedList::new();
    for i in 1..=4 {
        list.push_back(i).unwrap();
    }

    let mut cursor = list.cursor();
    assert_eq!(cursor.next(&list), Ok(Some(&1)));
    assert_eq!(cursor.next(&list), Ok(Some(&2)));
    cursor.remove(&mut list).unwrap();

    // The cursor keeps walking from the element after the removed one.
    assert_eq!(cursor.next(&list), Ok(Some(&3)));
    assert_eq!(cursor.next(&list), Ok(Some(&4)));
    assert_eq!(cursor.next(&list), Ok(None));
    assert_eq!(order(&list), vec![1, 3, 4]);
}

#[test]
fn test_cursor_remove_head_restarts_at_new_head() {
    let mut list = HashedLinkedList::new();
    list.push_back(1).unwrap();
    list.push_back(2).unwrap();

    let mut cursor = list.cursor();
    assert_eq!(cursor.next(&list), Ok(Some(&1)));
    cursor.remove(&mut list).unwrap();
    assert_eq!(cursor.next(&list), Ok(Some(&2)));
    assert_eq!(order(&list), vec![2]);
}

#[test]
fn test_cursor_remove_requires_a_visited_element() {
    let mut list = HashedLinkedList::new();
    list.push_back(1).unwrap();

    let mut cursor = list.cursor();
    assert_eq!(cursor.remove(&mut list), Err(MetrumError::NoSuchElement));

    assert_eq!(cursor.next(&list), Ok(Some(&1)));
    cursor.remove(&mut list).unwrap();
    // No intervening `next`: nothing to remove.
    assert_eq!(cursor.remove(&mut list), Err(MetrumError::NoSuchElement));
    assert!(list.is_empty());
}

#[test]
fn test_cursor_remove_after_exhaustion_targets_last() {
    let mut list = HashedLinkedList::new();
    list.push_back(1).unwrap();
    list.push_back(2).unwrap();

    let mut cursor = list.cursor();
    assert_eq!(cursor.next(&list), Ok(Some(&1)));
    assert_eq!(cursor.next(&list), Ok(Some(&2)));
    assert_eq!(cursor.next(&list), Ok(None));
    cursor.remove(&mut list).unwrap();
    assert_eq!(order(&list), vec![1]);
}
