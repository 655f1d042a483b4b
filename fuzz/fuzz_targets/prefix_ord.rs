#![no_main]

use libfuzzer_sys::fuzz_target;
use prefixlen::addr::Prefix128;

fuzz_target!(|data: (Prefix128, Prefix128, Prefix128)| {
    let (a, b, c) = data;

    // Ordering follows the length, and a longer prefix has a larger mask.
    assert_eq!(a.cmp(&b), a.len().cmp(&b.len()));
    assert_eq!(a.cmp(&b), a.mask().cmp(&b.mask()));
    assert_eq!(a.cmp(&b), b.cmp(&a).reverse());

    if a <= b && b <= c {
        assert!(a <= c);
    }
    if a < b {
        assert_eq!(
            a.checked_add(b.len() - a.len()), Ok(b)
        );
    }
});
