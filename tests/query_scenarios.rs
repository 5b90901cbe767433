//! End-to-end scenarios for query pipelines.
//!
//! These tests drive lists only through the public prelude, the way a
//! caller would.

use lazy_query::prelude::*;
use rstest::rstest;
use std::cell::Cell;
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::rc::Rc;

// =============================================================================
// Helpers
// =============================================================================

/// A list whose generator counts how many times it has been started.
fn counted_source(items: Vec<i32>) -> (List<i32>, Rc<Cell<usize>>) {
    let passes = Rc::new(Cell::new(0));
    let counter = Rc::clone(&passes);
    let list = List::from_fn(move || {
        counter.set(counter.get() + 1);
        items.clone()
    });
    (list, passes)
}

#[derive(Debug, Clone, PartialEq)]
struct Employee {
    name: &'static str,
    department: &'static str,
    age: u32,
}

fn staff() -> List<Employee> {
    List::from(vec![
        Employee { name: "ada", department: "research", age: 36 },
        Employee { name: "linus", department: "kernel", age: 28 },
        Employee { name: "grace", department: "research", age: 28 },
        Employee { name: "ken", department: "kernel", age: 51 },
        Employee { name: "barbara", department: "research", age: 36 },
    ])
}

// =============================================================================
// Laziness and re-iteration
// =============================================================================

#[rstest]
fn chaining_does_not_evaluate_the_source() {
    let (source, passes) = counted_source(vec![1, 2, 3]);

    let pipeline = source
        .map(|number| number * 10)
        .filter(|number| *number > 10)
        .sort_by_descending(|number: &i32| *number)
        .then_by(|number: &i32| *number % 3)
        .into_list()
        .distinct()
        .concat(vec![0]);

    assert_eq!(passes.get(), 0);
    assert!(!pipeline.is_evaluated());
}

#[rstest]
fn every_terminal_call_runs_one_full_pass() {
    let (source, passes) = counted_source(vec![4, 5, 6]);
    let doubled = source.map(|number| number * 2);

    assert_eq!(doubled.to_vec(), vec![8, 10, 12]);
    assert_eq!(passes.get(), 1);

    assert_eq!(doubled.count(), 3);
    assert_eq!(passes.get(), 2);

    let collected: Vec<i32> = doubled.iter().collect();
    assert_eq!(collected, vec![8, 10, 12]);
    assert_eq!(passes.get(), 3);
}

#[rstest]
fn re_iteration_sees_a_changed_source() {
    let backing = Rc::new(std::cell::RefCell::new(vec![1, 2]));
    let shared = Rc::clone(&backing);
    let list = List::from_fn(move || shared.borrow().clone()).map(|number| number + 1);

    assert_eq!(list.to_vec(), vec![2, 3]);
    backing.borrow_mut().push(3);
    assert_eq!(list.to_vec(), vec![2, 3, 4]);
}

#[rstest]
fn evaluated_list_stops_re_running_the_pipeline() {
    let (source, passes) = counted_source(vec![1, 2, 3]);
    let evaluated = source.filter(|number| number % 2 == 1).to_evaluated_list();
    assert_eq!(passes.get(), 1);

    assert_eq!(evaluated.to_vec(), vec![1, 3]);
    assert_eq!(evaluated.count(), 2);
    assert_eq!(passes.get(), 1);
}

#[rstest]
fn first_pulls_only_what_it_needs() {
    let pulled = Rc::new(Cell::new(0));
    let counter = Rc::clone(&pulled);
    let list = List::from(vec![1, 2, 3, 4, 5]).map(move |number| {
        counter.set(counter.get() + 1);
        number
    });

    assert_eq!(list.first_where(|number| *number >= 2), Some(2));
    assert_eq!(pulled.get(), 2);
}

#[rstest]
fn a_pass_that_panics_leaves_the_handle_usable() {
    let (source, passes) = counted_source(vec![3, 1, 2]);
    let armed = Rc::new(Cell::new(true));
    let trigger = Rc::clone(&armed);
    let sorted = source.sort_by(move |number: &i32| {
        if trigger.replace(false) {
            panic!("selector failed");
        }
        *number
    });

    let failed = catch_unwind(AssertUnwindSafe(|| sorted.to_vec()));
    assert!(failed.is_err());
    assert_eq!(passes.get(), 1);

    assert_eq!(sorted.to_vec(), vec![1, 2, 3]);
    assert_eq!(passes.get(), 2);
}

// =============================================================================
// Concrete scenarios
// =============================================================================

#[rstest]
fn distinct_removes_duplicates_in_first_seen_order() {
    let list = List::from(vec![1, 2, 2, 3]);
    assert_eq!(list.distinct().to_vec(), vec![1, 2, 3]);
}

#[rstest]
fn join_pairs_matching_keys_and_drops_unmatched_outer_items() {
    let outer = List::from(vec![1, 2]);
    let inner = vec![(1, 'a'), (1, 'b')];

    let rows = outer.join(
        inner,
        |id: &i32| *id,
        |row: &(i32, char)| row.0,
        |id: &i32, row: &(i32, char)| (*id, row.1),
    );

    assert_eq!(rows.to_vec(), vec![(1, 'a'), (1, 'b')]);
}

#[rstest]
#[case::ascending(false, vec![1, 2, 3])]
#[case::descending(true, vec![3, 2, 1])]
fn sort_by_orders_numbers(#[case] descending: bool, #[case] expected: Vec<i32>) {
    let list = List::from(vec![3, 1, 2]);
    let sorted = if descending {
        list.sort_by_descending(|number: &i32| *number)
    } else {
        list.sort_by(|number: &i32| *number)
    };
    assert_eq!(sorted.to_vec(), expected);
}

#[rstest]
fn group_by_parity_emits_groups_in_sorted_key_order() {
    let groups = List::from(vec![1, 2, 3, 4])
        .group_by(|number: &i32| number % 2 == 0)
        .to_vec();

    assert_eq!(groups.len(), 2);
    assert!(!*groups[0].key());
    assert_eq!(groups[0].to_vec(), vec![1, 3]);
    assert!(*groups[1].key());
    assert_eq!(groups[1].to_vec(), vec![2, 4]);
}

// =============================================================================
// Ordering
// =============================================================================

#[rstest]
fn then_by_breaks_ties_without_disturbing_the_primary_key() {
    let names = staff()
        .sort_by(|employee: &Employee| employee.age)
        .then_by_descending(|employee: &Employee| employee.name)
        .map(|employee| employee.name)
        .to_vec();

    assert_eq!(names, vec!["linus", "grace", "barbara", "ada", "ken"]);
}

#[rstest]
fn sorting_is_stable_for_equal_keys() {
    let names = staff()
        .sort_by(|employee: &Employee| employee.department)
        .map(|employee| employee.name)
        .to_vec();

    assert_eq!(names, vec!["linus", "ken", "ada", "grace", "barbara"]);
}

#[rstest]
fn then_by_on_a_parent_leaves_the_parent_unchanged() {
    let by_age = staff().sort_by(|employee: &Employee| employee.age);
    let _refined = by_age.then_by(|employee: &Employee| employee.name);

    assert_eq!(by_age.applied_sorts().len(), 1);
    assert_eq!(
        by_age.map(|employee| employee.name).to_vec(),
        vec!["linus", "grace", "ada", "barbara", "ken"]
    );
}

#[rstest]
fn custom_comparer_sorts_case_insensitively() {
    let words = List::from(vec!["beta", "Alpha", "gamma", "Delta"]);
    let sorted = words.sort_by_with(
        |word: &&str| word.to_lowercase(),
        |left: &String, right: &String| left.cmp(right),
    );
    assert_eq!(sorted.to_vec(), vec!["Alpha", "beta", "Delta", "gamma"]);
}

// =============================================================================
// Grouping
// =============================================================================

#[rstest]
fn nested_groups_follow_level_order() {
    let levels = vec![
        KeySpec::ascending(|employee: &Employee| Value::from(employee.department)),
        KeySpec::descending(|employee: &Employee| Value::from(f64::from(employee.age))),
    ];
    let tree = staff().group_by_levels(levels).to_vec();

    assert_eq!(tree.len(), 2);
    assert_eq!(tree[0].key(), &Value::from("kernel"));
    assert_eq!(tree[1].key(), &Value::from("research"));

    let research = tree[1].children().unwrap_or_default();
    let ages: Vec<Value> = research.iter().map(|node| node.key().clone()).collect();
    assert_eq!(ages, vec![Value::from(36.0), Value::from(28.0)]);

    let thirty_six: Vec<&str> = research[0].items().iter().map(|employee| employee.name).collect();
    assert_eq!(thirty_six, vec!["ada", "barbara"]);
    assert!(research[0].is_leaf());
}

#[rstest]
fn chaining_on_a_group_drops_the_key() {
    let groups = staff().group_by(|employee: &Employee| employee.department).to_vec();
    let kernel = groups
        .iter()
        .find(|group| *group.key() == "kernel")
        .map(|group| group.map(|employee| employee.age));

    assert_eq!(kernel.map(|ages| ages.to_vec()), Some(vec![28, 51]));
}

#[rstest]
fn group_join_reports_every_outer_item() {
    let departments = List::from(vec!["kernel", "research", "sales"]);
    let headcount = departments.group_join(
        staff(),
        |department: &&str| *department,
        |employee: &Employee| employee.department,
        |department: &&str, members: &[Employee]| (*department, members.len()),
    );

    assert_eq!(
        headcount.to_vec(),
        vec![("kernel", 2), ("research", 3), ("sales", 0)]
    );
}

// =============================================================================
// Keys without a natural total order
// =============================================================================

#[rstest]
#[case(2)]
#[case(3)]
#[case(17)]
#[case(40)]
fn sorting_floats_puts_nan_last(#[case] length: usize) {
    let numbers: Vec<f64> = (0..length)
        .map(|index| if index % 3 == 0 { f64::NAN } else { (length - index) as f64 })
        .collect();
    let nan_count = numbers.iter().filter(|number| number.is_nan()).count();

    let sorted = List::from(numbers).sort_by(|number: &f64| *number).to_vec();
    let (ordered, unordered) = sorted.split_at(length - nan_count);

    assert!(ordered.windows(2).all(|pair| pair[0] <= pair[1]));
    assert!(unordered.iter().all(|number| number.is_nan()));

    let descending = List::from(sorted.clone()).sort_by_descending(|number: &f64| *number).to_vec();
    assert!(descending[..nan_count].iter().all(|number| number.is_nan()));
}

#[rstest]
fn grouping_floats_collects_nan_into_one_group() {
    let groups = List::from(vec![1.5, f64::NAN, 0.5, f64::NAN, 1.5])
        .group_by(|number: &f64| *number)
        .to_vec();

    assert_eq!(groups.len(), 3);
    assert_eq!(*groups[0].key(), 0.5);
    assert_eq!(groups[1].count(), 2);
    assert!(groups[2].key().is_nan());
    assert_eq!(groups[2].count(), 2);
}

#[rstest]
fn values_with_nan_and_records_sort_and_group() {
    let rows = List::from(vec![
        Value::object([("id", Value::from(2))]),
        Value::from(f64::NAN),
        Value::from(1),
        Value::object([("id", Value::from(1))]),
        Value::from(f64::NAN),
        Value::object([("id", Value::from(2))]),
    ]);

    let sorted = rows.sort_by(|value: &Value| value.clone()).to_vec();
    assert_eq!(sorted[0], Value::from(1));
    assert!(sorted[1..3].iter().all(|value| value.as_number().is_some_and(f64::is_nan)));
    assert_eq!(sorted[3], Value::object([("id", Value::from(1))]));

    let groups = rows.group_by(|value: &Value| value.clone()).to_vec();
    let sizes: Vec<usize> = groups.iter().map(|group| group.count()).collect();
    assert_eq!(sizes, vec![1, 2, 1, 2]);
}

// =============================================================================
// Heterogeneous data
// =============================================================================

#[rstest]
fn of_type_picks_values_by_kind_and_shape() {
    let mixed = List::from(vec![
        Value::from(1),
        Value::from("two"),
        Value::object([("id", Value::from(3))]),
        Value::object([("id", Value::from(4)), ("extra", Value::Null)]),
        Value::from(5),
    ]);

    assert_eq!(mixed.of_type(TypeMatcher::Primitive(Kind::Number)).count(), 2);
    assert_eq!(mixed.of_type(TypeMatcher::Primitive(Kind::String)).to_vec(), vec![Value::from("two")]);

    let records = mixed.of_type(TypeMatcher::shape(["id"])).to_vec();
    assert_eq!(records, vec![Value::object([("id", Value::from(3))])]);
}

#[rstest]
fn values_sort_across_kinds() {
    let sorted = List::from(vec![Value::from("b"), Value::from(2), Value::from(true), Value::from("a")])
        .sort_by(|value: &Value| value.clone())
        .to_vec();

    assert_eq!(
        sorted,
        vec![Value::from(true), Value::from(2), Value::from("a"), Value::from("b")]
    );
}

// =============================================================================
// Factories
// =============================================================================

#[rstest]
fn trivially_sorted_factories_accept_then_by() {
    let single = List::just(7).then_by(|number: &i32| -number);
    assert_eq!(single.to_vec(), vec![7]);

    let repeated = List::repeat("x", 3).then_by_descending(|text: &&str| text.len());
    assert_eq!(repeated.count(), 3);

    assert!(List::<u8>::empty().then_by(|byte: &u8| *byte).is_empty());
}

#[rstest]
fn ordered_factory_trusts_the_declared_order() {
    let declared = List::ordered(vec![1, 3, 5, 7], |number: &i32| *number);
    assert!(declared.binary_contains(&5));
    assert!(!declared.binary_contains(&4));
    assert_eq!(declared.applied_sorts().len(), 1);
}
