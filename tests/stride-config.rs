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

    use stride_fib::errors::ConfigError;
    use stride_fib::{StrideConfig, StrideMultiBitTrie};

    #[test]
    fn test_valid_configs() -> Result<(), Box<dyn Error>> {
        crate::common::init();

        for strides in [
            vec![32],
            vec![16, 16],
            vec![8, 8, 8, 8],
            vec![24, 8],
            vec![4; 8],
            vec![1; 32],
            vec![2, 30],
            vec![5, 5, 5, 5, 5, 5, 2],
        ] {
            let config = StrideConfig::new(&strides)?;
            assert_eq!(config.strides(), &strides[..]);
            assert_eq!(config.levels(), strides.len());
            assert_eq!(config.bits_before(strides.len()), 32);
        }

        // Small enough to actually build.
        let trie = StrideMultiBitTrie::new(&[8, 8, 8, 8])?;
        assert_eq!(trie.strides(), &[8, 8, 8, 8]);
        assert_eq!(trie.nodes_count(), 1);
        assert_eq!(trie.routes_count(), 0);
        Ok(())
    }

    #[test]
    fn test_invalid_configs() {
        crate::common::init();

        assert_eq!(StrideConfig::new(&[]).err(), Some(ConfigError::Empty));
        assert_eq!(
            StrideConfig::new(&[8, 0, 8, 8, 8]).err(),
            Some(ConfigError::ZeroStride { level: 1 })
        );
        assert_eq!(
            StrideConfig::new(&[8, 8, 8]).err(),
            Some(ConfigError::InvalidSum { sum: 24 })
        );
        assert_eq!(
            StrideConfig::new(&[8, 8, 8, 8, 1]).err(),
            Some(ConfigError::InvalidSum { sum: 33 })
        );
        // 256 + 32 would wrap around to 32 in a u8
        assert_eq!(
            StrideConfig::new(&[255, 1, 16, 16]).err(),
            Some(ConfigError::InvalidSum { sum: 288 })
        );
        assert!(StrideMultiBitTrie::new(&[]).is_err());
        assert!(StrideMultiBitTrie::new(&[16, 15]).is_err());
    }

    #[test]
    fn test_parse_config() -> Result<(), Box<dyn Error>> {
        let config: StrideConfig = "16, 4,4,8".parse()?;
        assert_eq!(config.strides(), &[16, 4, 4, 8]);
        assert_eq!(config.to_string(), "16,4,4,8");
        assert_eq!(config.get(1), Some(4));
        assert_eq!(config.get(4), None);

        assert_eq!(
            "8,8,x,8".parse::<StrideConfig>(),
            Err(ConfigError::Unparsable("8,8,x,8".to_string()))
        );
        assert_eq!(
            "8,8,8".parse::<StrideConfig>(),
            Err(ConfigError::InvalidSum { sum: 24 })
        );
        assert_eq!(StrideConfig::default().strides(), &[8, 8, 8, 8]);
        Ok(())
    }

    #[test]
    fn test_config_serde() -> Result<(), Box<dyn Error>> {
        let config: StrideConfig = serde_json::from_str("[4, 4, 8, 16]")?;
        assert_eq!(config.strides(), &[4, 4, 8, 16]);
        assert_eq!(serde_json::to_string(&config)?, "[4,4,8,16]");

        assert!(serde_json::from_str::<StrideConfig>("[4, 4, 8]").is_err());
        assert!(serde_json::from_str::<StrideConfig>("[]").is_err());
        assert!(serde_json::from_str::<StrideConfig>("[0, 32]").is_err());
        Ok(())
    }
}
