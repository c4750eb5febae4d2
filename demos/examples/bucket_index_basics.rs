// Copyright 2025 the Sidescroll Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Bucket index basics: insert, move, query a window, and remove.
//!
//! Run:
//! - `cargo run -p sidescroll_demos --example bucket_index_basics`

use sidescroll_index::BucketIndex;

fn main() {
    let mut idx: BucketIndex<&str> = BucketIndex::new(10, 1.0).expect("valid geometry");
    for (name, x) in [("asteroid", 3.2), ("drone", 3.9), ("turret", 5.0), ("far", 42.0)] {
        let bucket = idx.insert(name, x).expect("names are unique");
        println!("{name:>8} at x={x:<5} -> bucket {bucket}");
    }

    let window = idx.range_for(2.5, 5.5);
    let visible: Vec<_> = idx.query(window).collect();
    println!("window [2.5, 5.5] = buckets {:?} -> {visible:?}", window.buckets());

    // Neighbourhood queries may run off either end; they clamp.
    let near_start: Vec<_> = idx.query_range(-1, 1).collect();
    let near_end: Vec<_> = idx.query_range(8, 10).collect();
    println!("around bucket 0: {near_start:?}, around bucket 9: {near_end:?}");

    let changed = idx.move_to("drone", 7.1).expect("drone is indexed");
    println!(
        "drone moved to bucket {:?} (changed: {changed})",
        idx.bucket_of("drone")
    );

    for _ in 0..2 {
        println!("remove turret -> {:?}", idx.remove("turret"));
    }
    println!("{idx:?}");
}
