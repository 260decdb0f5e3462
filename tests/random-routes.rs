mod common {
    use std::io::Write;

    pub fn init() {
        let _ = env_logger::builder()
            .format(|buf, record| writeln!(buf, "{}", record.args()))
            .is_test(true)
            .try_init();
    }
}

mod tests {
    use std::error::Error;
    use std::net::Ipv4Addr;

    use log::trace;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};
    use stride_fib::{LinearTable, Prefix, RouteEntry, StrideMultiBitTrie};

    fn random_routes(rng: &mut StdRng, num: usize) -> Vec<RouteEntry> {
        (0..num)
            .map(|_| {
                // Mostly realistic lengths, with the odd short prefix and
                // host route thrown in.
                let len = match rng.random_range(0..10) {
                    0 => rng.random_range(0..=8),
                    1 => 32,
                    _ => rng.random_range(9..=31),
                };
                let prefix = Prefix::new(rng.random(), len).unwrap();
                RouteEntry::new(prefix, rng.random_range(1..=u32::MAX))
            })
            .collect()
    }

    // Half of the queries land inside one of the inserted prefixes, the
    // other half anywhere.
    fn random_queries(
        rng: &mut StdRng,
        routes: &[RouteEntry],
        num: usize,
    ) -> Vec<u32> {
        (0..num)
            .map(|i| match routes.get(rng.random_range(0..routes.len())) {
                Some(r) if i % 2 == 0 => {
                    let host_mask = u32::MAX
                        .checked_shr(r.prefix.len() as u32)
                        .unwrap_or(0);
                    r.prefix.addr() | (rng.random::<u32>() & host_mask)
                }
                _ => rng.random(),
            })
            .collect()
    }

    stride_fib::all_stride_configs![
        test_random_against_linear_scan;
        random_against_linear_scan
    ];

    fn random_against_linear_scan(
        mut trie: StrideMultiBitTrie,
    ) -> Result<(), Box<dyn Error>> {
        crate::common::init();

        let mut rng = StdRng::seed_from_u64(0x1bad_cafe);
        let routes = random_routes(&mut rng, 300);
        let mut reference = LinearTable::new();

        for route in routes.iter() {
            trie.insert(route.prefix, route.next_hop);
            reference.insert(*route);
        }
        assert_eq!(trie.routes_count(), reference.len());
        trace!("{}", trie.stats());

        for addr in random_queries(&mut rng, &routes, 20_000) {
            let expected = reference.longest_match(addr);
            let found = trie.longest_match(addr);
            assert_eq!(
                found.map(|m| m.next_hop),
                expected.map(|e| e.next_hop),
                "{} expected {:?}",
                Ipv4Addr::from(addr),
                expected.map(|e| e.prefix)
            );
            assert_eq!(
                found.map(|m| m.prefix_len),
                expected.map(|e| e.prefix.len())
            );
            assert_eq!(trie.lookup(addr), reference.resolve(addr));
        }
        Ok(())
    }

    stride_fib::all_stride_configs![
        test_random_duplicate_prefixes;
        random_duplicate_prefixes
    ];

    // The same prefixes inserted twice with different next-hops. The first
    // insert has to stay, in the trie as well as in the linear scan.
    fn random_duplicate_prefixes(
        mut trie: StrideMultiBitTrie,
    ) -> Result<(), Box<dyn Error>> {
        let mut rng = StdRng::seed_from_u64(42);
        let routes = random_routes(&mut rng, 100);
        let mut reference = LinearTable::new();

        for route in routes.iter().chain(routes.iter()).enumerate().map(
            |(i, r)| RouteEntry::new(r.prefix, r.next_hop ^ (i as u32 / 100)),
        ) {
            trie.insert(route.prefix, route.next_hop);
            reference.insert(route);
        }

        for addr in random_queries(&mut rng, &routes, 5_000) {
            assert_eq!(trie.lookup(addr), reference.resolve(addr));
        }
        Ok(())
    }
}
