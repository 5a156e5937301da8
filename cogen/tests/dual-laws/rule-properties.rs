//! Rule meta tests
//!
//! Each property draws a seed and checks a dual rule against the
//! `variant` calls it should reduce to.

use crate::{arbitrary_seed, arbitrary_word};
use cogen::*;
use std::collections::{BTreeMap, HashSet};

fn sample(gen: Gen<u64>, seed: Seed) -> u64 {
    gen.generate(Size::new(10), seed)
}

/// Property: the same value perturbs a generator the same way every time
pub fn test_dual_is_deterministic() {
    let prop = for_all(arbitrary_seed().zip(arbitrary_word()), |(seed, word)| {
        let gen = Gen::<u64>::any();
        let once = sample(dual(word).apply(gen.clone()), *seed);
        let twice = sample(dual(&word.clone()).apply(gen), *seed);
        once == twice && dual(word) == dual(word.as_str())
    });

    match prop.run(&Config::default().with_tests(50)) {
        TestResult::Pass { .. } => println!("✓ Determinism property passed"),
        result => panic!("Determinism property failed: {result:?}"),
    }
}

/// Property: empty sequences of any element type select sub-stream 0
pub fn test_empty_sequences_select_zero() {
    let prop = for_all(arbitrary_seed(), |&seed| {
        let gen = Gen::<u64>::any();
        let expected = sample(gen.clone().variant(0), seed);
        sample(dual("").apply(gen.clone()), seed) == expected
            && sample(dual(&Vec::<bool>::new()).apply(gen.clone()), seed) == expected
            && sample(dual(&Vec::<String>::new()).apply(gen.clone()), seed) == expected
            && sample(dual(&[0u8; 0]).apply(gen), seed) == expected
    });

    match prop.run(&Config::default().with_tests(50)) {
        TestResult::Pass { .. } => println!("✓ Empty sequence property passed"),
        result => panic!("Empty sequence property failed: {result:?}"),
    }
}

/// Property: a string perturbs with its head over its tail
pub fn test_string_fold_is_head_over_tail() {
    let prop = for_all(arbitrary_seed().zip(arbitrary_word()), |(seed, word)| {
        let gen = Gen::<u64>::any();
        let whole = sample(dual(word).apply(gen.clone()), *seed);
        let split = match word.chars().next() {
            Some(head) => {
                let tail = &word[head.len_utf8()..];
                sample(dual(&head).apply(dual(tail).apply(gen.clone())), *seed)
            }
            None => sample(gen.clone().variant(0), *seed),
        };
        let ab = sample(dual("ab").apply(gen.clone()), *seed)
            == sample(dual(&'a').apply(dual("b").apply(gen.clone())), *seed);
        whole == split && ab
    });

    match prop.run(&Config::default().with_tests(50)) {
        TestResult::Pass { .. } => println!("✓ Recursive fold property passed"),
        result => panic!("Recursive fold property failed: {result:?}"),
    }
}

/// Property: `compose(f, g)` perturbs a generator like `f` applied to `g`'s result
pub fn test_compose_nests_generators() {
    let words = arbitrary_word().zip(arbitrary_word());
    let prop = for_all(arbitrary_seed().zip(words), |(seed, (left, right))| {
        let gen = Gen::<u64>::any();
        let (f, g) = (dual(left), dual(right));
        let h = compose(f.clone(), g.clone());
        let composed = sample(h.apply(gen.clone()), *seed);
        let nested = sample(f.apply(g.apply(gen)), *seed);
        composed == nested && h.apply_seed(*seed) == g.apply_seed(f.apply_seed(*seed))
    });

    match prop.run(&Config::default().with_tests(50)) {
        TestResult::Pass { .. } => println!("✓ Composition nesting property passed"),
        result => panic!("Composition nesting property failed: {result:?}"),
    }
}

/// Property: integers select the sub-stream of their own value
pub fn test_integral_identity() {
    let prop = for_all(arbitrary_seed().zip(Gen::<i64>::sized()), |(seed, x)| {
        let gen = Gen::<u64>::any();
        let narrow = *x as i32;
        let perturbed = sample(dual(&narrow).apply(gen.clone()), *seed);
        let wide = u128::MAX - x.unsigned_abs() as u128;
        let wide = sample(dual(&wide).apply(gen.clone()), *seed);
        let negative = sample(dual(&(-1 - x.abs())).apply(gen.clone()), *seed);
        perturbed == sample(gen.clone().variant(narrow), *seed)
            && sample(dual(&42i32).apply(gen.clone()), *seed) == sample(gen.variant(42), *seed)
            && wide != negative
    });

    match prop.run(&Config::default().with_tests(50)) {
        TestResult::Pass { .. } => println!("✓ Integral identity property passed"),
        result => panic!("Integral identity property failed: {result:?}"),
    }
}

/// Property: true selects 1 and false selects 0
pub fn test_boolean_mapping() {
    let prop = for_all(arbitrary_seed(), |&seed| {
        dual(&true).apply_seed(seed) == seed.variant(1)
            && dual(&false).apply_seed(seed) == seed.variant(0)
    });

    match prop.run(&Config::default().with_tests(50)) {
        TestResult::Pass { .. } => println!("✓ Boolean mapping property passed"),
        result => panic!("Boolean mapping property failed: {result:?}"),
    }
}

/// Property: presence selects 0 and absence selects 1
pub fn test_optional_convention() {
    let prop = for_all(arbitrary_seed(), |&seed| {
        dual(&Some(5)).apply_seed(seed) == seed.variant(0)
            && dual(&None::<i32>).apply_seed(seed) == seed.variant(1)
    });

    match prop.run(&Config::default().with_tests(50)) {
        TestResult::Pass { .. } => println!("✓ Optional convention property passed"),
        result => panic!("Optional convention property failed: {result:?}"),
    }
}

/// Property: every non-empty set or map perturbs identically
pub fn test_unordered_collapse() {
    let sets = Gen::<Vec<i64>>::vec_of(Gen::<i64>::sized());
    let prop = for_all(arbitrary_seed().zip(sets), |(seed, items)| {
        let set: HashSet<i64> = items.iter().copied().collect();
        let map: BTreeMap<i64, bool> = items.iter().map(|&x| (x, x > 0)).collect();
        let expected = if items.is_empty() {
            seed.variant(0)
        } else {
            seed.variant(1)
        };
        dual(&set).apply_seed(*seed) == expected && dual(&map).apply_seed(*seed) == expected
    });

    match prop.run(&Config::default().with_tests(50)) {
        TestResult::Pass { .. } => println!("✓ Unordered collapse property passed"),
        result => panic!("Unordered collapse property failed: {result:?}"),
    }

    let one: HashSet<i32> = HashSet::from([1]);
    let three: HashSet<i32> = HashSet::from([1, 2, 3]);
    assert_eq!(dual(&one), dual(&three));
    assert_eq!(dual(&HashSet::<i32>::new()), Perturbation::variant(0));
}

/// Frequency check: strings differing in one position sample differently
pub fn test_single_position_sensitivity() {
    let words = Gen::<Vec<char>>::vec_of(Gen::<char>::ascii_alpha());
    let trials = 500u64;
    let mut distinct = 0;
    let mut compared = 0;

    for i in 0..trials {
        let seed = Seed::from_u64(i);
        let chars = words.generate(Size::new(12), seed);
        if chars.is_empty() {
            continue;
        }
        let (position, _) = seed.next_bounded(chars.len() as u64);
        let mut altered = chars.clone();
        let position = position as usize;
        altered[position] = if chars[position] == 'z' { 'a' } else { 'z' };

        let original: String = chars.iter().collect();
        let changed: String = altered.iter().collect();
        let downstream = Gen::<u64>::any();
        compared += 1;
        if sample(dual(&original).apply(downstream.clone()), seed)
            != sample(dual(&changed).apply(downstream), seed)
        {
            distinct += 1;
        }
    }

    assert!(compared > 0);
    assert!(
        distinct * 100 >= compared * 99,
        "only {distinct} of {compared} single-position changes were distinguished"
    );
}
