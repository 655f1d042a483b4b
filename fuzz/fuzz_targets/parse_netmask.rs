#![no_main]

use libfuzzer_sys::fuzz_target;
use prefixlen::addr::Prefix32;

fuzz_target!(|data: &str| {
    if let Ok(p) = Prefix32::parse_netmask(data) {
        assert!((1..=32).contains(&p.len()));
        assert_eq!(p.to_u32().count_ones(), u32::from(p.len()));
        let again = Prefix32::parse_netmask(&p.to_netmask_string()).unwrap();
        assert_eq!(again, p);
    }
});
