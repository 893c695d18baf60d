use capmatch::{Feature, FeatureTable, Location, Statement};

fn main() {
    let rule = Statement::or(vec![
        Statement::and(vec![
            Statement::leaf(Feature::Api("CryptAcquireContextA".into())),
            Statement::leaf(Feature::Api("CryptEncrypt".into())),
        ])
        .expect("rule has children"),
        Statement::some(
            2,
            vec![
                Statement::leaf(Feature::Characteristic("nzxor".into())),
                Statement::leaf(Feature::Characteristic("loop".into())),
                Statement::range(Feature::Mnemonic("rol".into()), 2, None).expect("valid range"),
            ],
        )
        .expect("shallow rule"),
    ])
    .expect("rule has children");

    let mut table = FeatureTable::new();
    table.insert(Feature::Api("CryptAcquireContextA".into()), Location::Absolute(0x401100));
    table.insert(Feature::Characteristic("nzxor".into()), Location::Absolute(0x401210));
    table.insert(Feature::Characteristic("loop".into()), Location::Absolute(0x401200));
    table.insert(Feature::Mnemonic("rol".into()), Location::Absolute(0x401214));

    for short_circuit in [true, false] {
        let result = rule.evaluate_with(&table, short_circuit);
        println!("short_circuit = {short_circuit}");
        print!("{result}");
        println!("evidence: {:?}", result.matched_locations());
        println!();
    }
}
