use capmatch::{Feature, FeatureTable, Location, Statement};

fn main() {
    // "contain an embedded PE": the MZ magic and a PE signature nearby.
    let rule = Statement::and(vec![
        Statement::leaf(Feature::Number(0x5A4D)).with_description("IMAGE_DOS_SIGNATURE (MZ)"),
        Statement::leaf(Feature::Number(0x4550)).with_description("IMAGE_NT_SIGNATURE (PE)"),
    ])
    .expect("rule has children");

    let table = FeatureTable::new()
        .set(0x5A4D_i64, [Location::Absolute(0x401020)])
        .set(0x4550_i64, [Location::Absolute(0x401034)]);

    let result = rule.evaluate(&table);
    println!("{rule}");
    println!("matched: {}", result.success());
}
