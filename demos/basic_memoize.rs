//! Memoizing plain, multi-argument, and recursive functions.
//!
//! Run with: cargo run --example basic_memoize

use memokit::builder::MemoBuilder;
use memokit::memo::{CacheRegistry, memoize_named, memoize2, memoize_recursive};

fn main() {
    println!("=== Memoization Examples ===\n");

    // Example 1: single argument
    println!("1. Single argument");
    let slow_square = memoize_named("slow_square", |n: u64| {
        std::thread::sleep(std::time::Duration::from_millis(50));
        n * n
    });
    let start = std::time::Instant::now();
    slow_square.call(12);
    let first = start.elapsed();
    let start = std::time::Instant::now();
    slow_square.call(12);
    println!("   first call {first:?}, second call {:?}", start.elapsed());
    println!();

    // Example 2: two arguments keyed by the tuple
    println!("2. Two arguments");
    let gcd = memoize2(|mut a: u64, mut b: u64| {
        while b != 0 {
            (a, b) = (b, a % b);
        }
        a
    });
    println!("   gcd(1071, 462) = {}", gcd.call2(1071, 462));
    println!("   entries: {}", gcd.stats().size);
    println!();

    // Example 3: recursion through the wrapper
    println!("3. Recursive");
    let fib = memoize_recursive(|n: &u64| *n, |fib, n: u64| -> u64 {
        if n < 2 { n } else { fib.call(n - 1) + fib.call(n - 2) }
    });
    println!("   fib(90) = {}", fib.call(90));
    println!("   {}", fib.stats());
    println!();

    // Example 4: builder with a name and capacity hint
    println!("4. Builder");
    let lengths = MemoBuilder::new()
        .name("word_lengths")
        .initial_capacity(16)
        .build(|s: &String| s.clone(), |s: String| s.chars().count());
    for word in ["memo", "cycle", "memo", "период"] {
        println!("   {word}: {}", lengths.call(word.to_string()));
    }
    println!();

    println!("Live caches:");
    for stats in CacheRegistry::global().all_stats() {
        println!("   {stats}");
    }
}
