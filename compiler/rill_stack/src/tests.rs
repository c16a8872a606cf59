use super::*;

#[test]
fn nested_block_depth_is_survivable() {
    fn descend(depth: u32) -> u32 {
        ensure_sufficient_stack(|| if depth == 0 { 0 } else { descend(depth - 1) + 1 })
    }

    // Comparable to a script with 100k nested braces.
    assert_eq!(descend(100_000), 100_000);
}

#[test]
fn passes_through_results() {
    let ok: Result<u8, &str> = ensure_sufficient_stack(|| Ok(7));
    assert_eq!(ok, Ok(7));

    let err: Result<u8, &str> = ensure_sufficient_stack(|| Err("cancelled"));
    assert_eq!(err, Err("cancelled"));
}
