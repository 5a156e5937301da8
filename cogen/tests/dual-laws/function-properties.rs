//! Generated function meta tests
//!
//! Properties of `Gen::function_of`: functions are pure, depend on the
//! seed they were generated with, and compose like ordinary functions.

use crate::{arbitrary_seed, arbitrary_word};
use cogen::*;
use std::collections::HashSet;
use std::thread;

/// Property: applying a generated function twice gives the same output
pub fn test_functions_are_deterministic() {
    let functions = Gen::<Function<String, i64>>::function_of(Gen::<i64>::sized());
    let prop = for_all(functions.zip(arbitrary_word()), |(f, word)| {
        f.call(word) == f.call(word) && f.call(word) == f.call(&word.clone())
    });

    match prop.run(&Config::default().with_tests(100)) {
        TestResult::Pass { .. } => println!("✓ Function determinism property passed"),
        result => panic!("Function determinism property failed: {result:?}"),
    }
}

/// Property: functions drawn from different seeds disagree somewhere
pub fn test_seeds_give_different_functions() {
    let functions = Gen::<Function<u32, u64>>::function_of(Gen::<u64>::any());
    let prop = for_all(arbitrary_seed().zip(arbitrary_seed()), move |(left, right)| {
        if left == right {
            return true;
        }
        let f = functions.generate(Size::new(10), *left);
        let g = functions.generate(Size::new(10), *right);
        (0..16u32).any(|x| f.call(&x) != g.call(&x))
    });

    match prop.run(&Config::default().with_tests(50)) {
        TestResult::Pass { .. } => println!("✓ Distinct seeds property passed"),
        result => panic!("Distinct seeds property failed: {result:?}"),
    }
}

/// Property: generated functions chain like plain closures
pub fn test_composition_of_generated_functions() {
    let first = Gen::<Function<Vec<bool>, String>>::function_of(Gen::<String>::ascii_alpha());
    let second = Gen::<Function<str, Option<u8>>>::function_of(
        Gen::<i64>::int_range(0, 255)
            .expect("valid range")
            .map(|x| Some(x as u8)),
    );
    let inputs = Gen::<Vec<bool>>::vec_of(Gen::bool());

    let prop = for_all(first.zip(second).zip(inputs), |((f, g), input)| {
        let h = |x: &Vec<bool>| g.call(&f.call(x));
        h(input) == g.call(f.call(input).as_str())
    });

    match prop.run(&Config::default().with_tests(50)) {
        TestResult::Pass { .. } => println!("✓ Function composition property passed"),
        result => panic!("Function composition property failed: {result:?}"),
    }

    // A function over bools sees exactly two sub-streams.
    let f = Function::<bool, u64>::new(Gen::<u64>::any(), Size::new(1), Seed::from_u64(8));
    let outputs: HashSet<u64> = [true, false, true, false].iter().map(|b| f.call(b)).collect();
    assert_eq!(outputs.len(), 2);
}

/// Perturbations computed on other threads match the local ones
pub fn test_perturbations_agree_across_threads() {
    let words: Vec<String> = (0..8u64)
        .map(|i| arbitrary_word().generate(Size::new(20), Seed::from_u64(i)))
        .collect();
    let local: Vec<Perturbation> = words.iter().map(|w| dual(w)).collect();

    let handles: Vec<_> = words
        .into_iter()
        .map(|word| thread::spawn(move || dual(&word)))
        .collect();
    let remote: Vec<Perturbation> = handles
        .into_iter()
        .map(|handle| handle.join().expect("worker panicked"))
        .collect();

    assert_eq!(local, remote);
}
