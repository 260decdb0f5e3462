// Runs one test function against a trie for each of a set of stride
// divisions, from narrow to very uneven ones. Divisions with a stride of 24
// or more are left out, their root alone takes hundreds of megabytes.
#[macro_export]
#[doc(hidden)]
macro_rules! all_stride_configs {
    ( $( $fn_name: ident; $test_name: ident ), * ) => {

        $(
            #[test]
            fn $fn_name() -> Result<(), Box<dyn std::error::Error>> {
                let configs: [&[u8]; 7] = [
                    &[8, 8, 8, 8],
                    &[4, 4, 4, 4, 4, 4, 4, 4],
                    &[16, 4, 4, 8],
                    &[1, 7, 8, 3, 5, 8],
                    &[2, 6, 12, 12],
                    &[3, 5, 7, 9, 8],
                    &[
                        1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1,
                        1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1,
                    ],
                ];

                for strides in configs {
                    println!("strides {:?} starting...", strides);
                    let trie = $crate::StrideMultiBitTrie::new(strides)?;

                    $test_name(trie)?;
                }

                Ok(())
            }
        )*
    };
}
