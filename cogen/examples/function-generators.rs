//! Function generator examples: random functions as test inputs, and how
//! their outputs follow from the dual of each argument.

use cogen::*;

fn main() {
    println!("Cogen Function Generator Examples\n");

    basic_function_generation();
    perturbation_anatomy();
    higher_order_property();
}

fn basic_function_generation() {
    println!("=== Basic Function Generation ===");

    let function_gen = Gen::<Function<i32, String>>::function_of(Gen::<String>::ascii_alpha());

    let seed = Seed::from_u64(42);
    let func = function_gen.generate(Size::new(10), seed);

    println!("Generated function {func:?}:");
    for i in 0..6 {
        println!("  f({i}) = \"{}\"", func.call(&i));
    }
    println!("  f(3) again = \"{}\" (same input, same output)\n", func.call(&3));
}

fn perturbation_anatomy() {
    println!("=== Perturbation Anatomy ===");

    let samples: Vec<(&str, Perturbation)> = vec![
        ("42i32", dual(&42i32)),
        ("true", dual(&true)),
        ("2.7f64", dual(&2.7f64)),
        ("\"ab\"", dual("ab")),
        ("Some(5)", dual(&Some(5))),
        ("None", dual(&None::<i32>)),
    ];

    for (label, perturbation) in samples {
        let steps: Vec<String> = perturbation
            .discriminants()
            .iter()
            .map(ToString::to_string)
            .collect();
        println!("  dual({label}) selects [{}]", steps.join(", "));
    }
    println!();
}

fn higher_order_property() {
    println!("=== Higher-Order Property ===");

    // map(f) preserves length, whatever f is
    let functions = Gen::<Function<i64, bool>>::function_of(Gen::bool());
    let lists = Gen::<Vec<i64>>::vec_of(Gen::<i64>::sized());

    let property = for_all(functions.zip(lists), |(f, list)| {
        let mapped: Vec<bool> = list.iter().map(|x| f.call(x)).collect();
        mapped.len() == list.len()
    })
    .named("map_preserves_length");

    println!("{}", property.run(&Config::default()));
    println!("\nFunction generator examples completed!");
}
