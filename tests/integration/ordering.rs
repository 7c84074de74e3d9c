use std::cmp::Ordering;

use blueprint_console::engine::{EventKind, StaticContainer, StaticRecipe};
use blueprint_console::snapshot::{
    ContainerSnapshot, RecipeSnapshot, RecipeState, compare_containers, compare_recipes,
};
use blueprint_console::test_utils::{event, module};

fn snapshot(name: &str, version: &str, millis: i64) -> ContainerSnapshot {
    ContainerSnapshot::new(event(EventKind::Created, module(1, name, version), millis), None)
        .unwrap()
}

fn satisfiable(name: &str, satisfied: bool) -> RecipeSnapshot {
    RecipeSnapshot::new(
        name,
        RecipeState::Satisfiable {
            satisfied,
            selector: None,
        },
    )
}

#[test]
fn test_timestamp_dominates_name_and_version() {
    for (early, late) in [(("z", "9.9.9"), ("a", "0.0.1")), (("a", "0.0.1"), ("z", "9.9.9"))] {
        let a = snapshot(early.0, early.1, 10);
        let b = snapshot(late.0, late.1, 20);
        assert_eq!(compare_containers(&a, &b), Ordering::Less);
        assert_eq!(compare_containers(&b, &a), Ordering::Greater);
    }
}

#[test]
fn test_equal_timestamps_sort_by_name() {
    let a = snapshot("com.example.alpha", "5.0.0", 10);
    let b = snapshot("com.example.beta", "1.0.0", 10);
    assert_eq!(compare_containers(&a, &b), Ordering::Less);
}

#[test]
fn test_plain_recipe_sorts_before_satisfiable_regardless_of_name() {
    let plain = RecipeSnapshot::new("zzz", RecipeState::Plain);
    for satisfied in [true, false] {
        let other = satisfiable("aaa", satisfied);
        assert_eq!(compare_recipes(&plain, &other), Ordering::Less);
        assert_eq!(compare_recipes(&other, &plain), Ordering::Greater);
    }
}

#[test]
fn test_same_satisfaction_falls_back_to_name() {
    for satisfied in [true, false] {
        assert_eq!(
            compare_recipes(&satisfiable("a", satisfied), &satisfiable("b", satisfied)),
            Ordering::Less
        );
    }
}

#[test]
fn test_satisfied_before_unsatisfied_in_snapshot() {
    let container = StaticContainer::new(
        "c",
        [StaticRecipe::satisfiable("b", false, None), StaticRecipe::satisfiable("a", true, None)],
    );
    let snapshot = ContainerSnapshot::new(
        event(EventKind::Created, module(1, "m", "1.0.0"), 0),
        Some(&container),
    )
    .unwrap();
    let names: Vec<_> = snapshot.recipes().iter().map(RecipeSnapshot::name).collect();
    assert_eq!(names, ["a", "b"]);
}
