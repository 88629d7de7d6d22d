//! Runtime schema example, for structs that cannot derive EnvTag

use envtag::Schema;

// A type from another crate, decoded without a derive
#[derive(Debug, Default)]
struct Limits {
    pub max_body: u64,
    pub burst: i64,
    pub strict: bool,
}

fn main() -> anyhow::Result<()> {
    let schema = Schema::new()
        .prefix("LIMITS_")
        .field("max_body", "MAX_BODY,uint64", |l: &mut Limits| &mut l.max_body)?
        .field("burst", "BURST", |l: &mut Limits| &mut l.burst)?
        .untagged("strict", |l: &mut Limits| &mut l.strict);

    let mut limits = Limits::default();
    schema.decode(
        ["LIMITS_MAX_BODY=1048576", "LIMITS_BURST=-1", "LIMITS_STRICT=t"],
        &mut limits,
    )?;

    println!("Schema: {:?}", schema);
    println!("Limits loaded: {:?}", limits);

    Ok(())
}
