use std::sync::Arc;
use std::thread;

use capmatch::{Feature, FeatureTable, Location, Statement};

fn main() {
    let rule = Arc::new(
        Statement::and(vec![
            Statement::leaf(Feature::Api("OpenProcess".into())),
            Statement::leaf(Feature::Api("CreateRemoteThread".into())),
        ])
        .expect("rule has children"),
    );

    // One feature table per function scope, evaluated in parallel.
    let handles: Vec<_> = (0..4_u64)
        .map(|i| {
            let rule = Arc::clone(&rule);
            thread::spawn(move || {
                let base = 0x401000 + i * 0x100;
                let mut table = FeatureTable::new();
                table.insert(Feature::Api("OpenProcess".into()), Location::Absolute(base));
                if i % 2 == 0 {
                    table.insert(
                        Feature::Api("CreateRemoteThread".into()),
                        Location::Absolute(base + 0x20),
                    );
                }

                let result = rule.evaluate(&table);
                println!("function {base:#x}: {}", result.success());
            })
        })
        .collect();

    for h in handles {
        h.join().unwrap();
    }
}
