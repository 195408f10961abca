use cell_list::scenario::render_all;
use cell_list::{
    render_forward, reverse_in_place, reverse_recursive, reverse_with_list, reverse_with_stack,
    List, ListHolder, NodeArena, Strategy,
};
use itertools::Itertools;
use proptest::prelude::*;

fn ident_list<'a>(arena: &'a NodeArena, words: &[String]) -> List<'a> {
    let mut list = List::new();
    for word in words {
        list.push_back(arena.make_ident(word.as_str()));
    }
    list
}

proptest! {
    #[test]
    fn test_strategies_agree_on_names(words in prop::collection::vec("[a-z]{0,8}", 0..24)) {
        let expected = words.iter().rev().join(".");
        let arena = NodeArena::new();
        let list = ident_list(&arena, &words);

        prop_assert_eq!(reverse_with_stack(&list), expected.clone());
        prop_assert_eq!(reverse_with_list(&list), expected.clone());
        prop_assert_eq!(reverse_recursive(&list), expected.clone());
        // read-only strategies leave the source alone
        prop_assert_eq!(render_forward(&list), words.join("."));

        let mut working = list.copy(|cell| cell.payload());
        prop_assert_eq!(reverse_in_place(&mut working), expected);
        prop_assert_eq!(working.len(), words.len());
    }

    #[test]
    fn test_strategies_agree_on_ints(values: Vec<i32>) {
        let expected = values.iter().rev().join(".");
        let mut list = List::new();
        for &value in &values {
            list.push_back(value);
        }

        for strategy in Strategy::ALL {
            let mut working = list.copy(|cell| cell.payload());
            prop_assert_eq!(strategy.render(&mut working), expected.clone());
        }
    }

    #[test]
    fn test_render_all_matches_reversed_join(words in prop::collection::vec("[a-z]{1,5}", 0..12)) {
        let expected = words.iter().rev().join(".");
        for (_, output) in render_all(&words, &Strategy::ALL) {
            prop_assert_eq!(output, expected.clone());
        }
    }

    #[test]
    fn test_size_after_pushes_and_erases(pushed in 0usize..40, erased in 0usize..40) {
        let erased = erased.min(pushed);
        let mut list = List::new();
        for value in 0..pushed as i32 {
            if value % 2 == 0 {
                list.push_back(value);
            } else {
                list.push_front(value);
            }
        }
        prop_assert_eq!(list.len(), pushed);

        for _ in 0..erased {
            let head = list.begin();
            list.erase(head);
        }
        prop_assert_eq!(list.len(), pushed - erased);
        prop_assert_eq!(list.iter().count(), pushed - erased);
        prop_assert_eq!(list.is_empty(), pushed == erased);
    }

    #[test]
    fn test_double_reverse_restores_order(values: Vec<i32>) {
        let mut list = List::new();
        for &value in &values {
            list.push_back(value);
        }
        let before = format!("{:?}", list);

        list.reverse();
        list.reverse();
        prop_assert_eq!(format!("{:?}", list), before);
        prop_assert_eq!(list.len(), values.len());
    }

    #[test]
    fn test_holder_empties_list(values in prop::collection::vec(any::<i32>(), 0..16)) {
        let mut list = List::new();
        {
            let mut holder = ListHolder::new(&mut list);
            for &value in &values {
                holder.push_back(value);
            }
            prop_assert_eq!(holder.len(), values.len());
        }
        prop_assert!(list.is_empty());
    }
}
