use ringqueue_rs::{QueueError, RingQueue, INSTRUMENTED_CONFIG};
use std::time::Instant;

fn main() {
    println!("RingQueue Basic Example");
    println!("=======================\n");

    let mut queue = RingQueue::with_config(INSTRUMENTED_CONFIG);

    const WINDOW: u64 = 100;
    const CYCLES: u64 = 10_000_000;

    println!("Configuration:");
    println!("  Baseline capacity: {}", queue.capacity());
    println!("  Growth factor: {}", queue.config().growth_factor);
    println!("  Window: {}", WINDOW);
    println!("  Push/pop cycles: {}\n", CYCLES);

    // Fill the window; capacity doubles 4 -> 128
    for i in 0..WINDOW {
        queue.push(i);
    }
    println!("After fill: len {} capacity {}", queue.len(), queue.capacity());

    let start = Instant::now();
    let mut sum = 0u64;
    for i in 0..CYCLES {
        queue.push(WINDOW + i);
        match queue.pop() {
            Ok(item) => sum = sum.wrapping_add(item),
            Err(QueueError::Empty) => unreachable!("window never drains"),
        }
    }
    let duration = start.elapsed();

    let metrics = queue.metrics();
    println!("\nResults:");
    println!("  Checksum: {}", sum);
    println!("  Final capacity: {}", queue.capacity());
    println!("  Grows: {} (relocated {} elements)", metrics.grows, metrics.relocated);
    println!("  Duration: {:.2?}", duration);
    println!(
        "  Throughput: {:.2} million cycles/sec",
        CYCLES as f64 / duration.as_secs_f64() / 1_000_000.0
    );

    // Drain in FIFO order
    let drained: Vec<u64> = queue.into_iter().collect();
    println!("  Remaining: {} items, first {:?}", drained.len(), drained.first());
}
