use super::*;
use std::path::PathBuf;
use tempfile::TempDir;

mod config_tests {
    use super::*;

    #[test]
    fn test_encoder_config_default() {
        let config = EncoderConfig::default();
        assert_eq!(config.embedding_dim, ENCODER_EMBEDDING_DIM);
        assert_eq!(config.max_seq_len, ENCODER_MAX_SEQ_LEN);
        assert!(!config.testing_stub);
        assert!(config.model_dir.as_os_str().is_empty());
    }

    #[test]
    fn test_encoder_config_paths() {
        let config = EncoderConfig::new("/models/all-MiniLM-L6-v2");
        assert_eq!(
            config.config_path(),
            PathBuf::from("/models/all-MiniLM-L6-v2/config.json")
        );
        assert_eq!(
            config.weights_path(),
            PathBuf::from("/models/all-MiniLM-L6-v2/model.safetensors")
        );
        assert_eq!(
            config.tokenizer_path(),
            PathBuf::from("/models/all-MiniLM-L6-v2/tokenizer.json")
        );
    }

    #[test]
    fn test_encoder_config_stub_validates() {
        assert!(EncoderConfig::stub().validate().is_ok());
    }

    #[test]
    fn test_encoder_config_empty_path_no_stub() {
        let result = EncoderConfig::default().validate();
        assert!(matches!(result, Err(EmbeddingError::InvalidConfig { .. })));
    }

    #[test]
    fn test_encoder_config_missing_dir() {
        let result = EncoderConfig::new("/definitely/not/a/model/dir").validate();
        assert!(matches!(result, Err(EmbeddingError::ModelNotFound { .. })));
    }

    #[test]
    fn test_encoder_config_missing_weights() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("config.json"), "{}").unwrap();
        std::fs::write(dir.path().join("tokenizer.json"), "{}").unwrap();

        let result = EncoderConfig::new(dir.path()).validate();
        match result {
            Err(EmbeddingError::ModelNotFound { path }) => {
                assert!(path.ends_with("model.safetensors"));
            }
            other => panic!("expected ModelNotFound, got {other:?}"),
        }
    }

    #[test]
    fn test_encoder_config_zero_seq_len() {
        let result = EncoderConfig::stub().with_max_seq_len(0).validate();
        assert!(matches!(result, Err(EmbeddingError::InvalidConfig { .. })));
    }
}

mod stub_tests {
    use super::*;

    fn stub_encoder() -> SentenceEncoder {
        SentenceEncoder::load(EncoderConfig::stub()).expect("stub encoder should load")
    }

    #[test]
    fn test_stub_mode_flags() {
        let encoder = stub_encoder();
        assert!(encoder.is_stub());
        assert!(!encoder.has_model());
        assert_eq!(encoder.device_label(), "stub");
        assert_eq!(encoder.embedding_dim(), ENCODER_EMBEDDING_DIM);
    }

    #[test]
    fn test_stub_embedding_is_unit_length() {
        let encoder = stub_encoder();
        let embedding = encoder.embed("distributed backend services").unwrap();
        assert_eq!(embedding.len(), ENCODER_EMBEDDING_DIM);

        let norm: f32 = embedding.iter().map(|x| x * x).sum::<f32>().sqrt();
        assert!((norm - 1.0).abs() < 1e-5, "norm was {norm}");
    }

    #[test]
    fn test_stub_embedding_is_deterministic() {
        let encoder = stub_encoder();
        let a = encoder.embed("rust engineer").unwrap();
        let b = encoder.embed("rust engineer").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_empty_text_embeds_to_zero_vector() {
        let encoder = stub_encoder();
        let embedding = encoder.embed("").unwrap();
        assert!(embedding.iter().all(|x| *x == 0.0));
        assert_eq!(encoder.similarity("", "anything").unwrap(), 0.0);
    }

    #[test]
    fn test_similarity_is_symmetric() {
        let encoder = stub_encoder();
        let pairs = [
            ("senior backend engineer", "backend services in rust"),
            ("data scientist", "marketing manager"),
            ("a", "a b c"),
        ];
        for (a, b) in pairs {
            let ab = encoder.similarity(a, b).unwrap();
            let ba = encoder.similarity(b, a).unwrap();
            assert!((ab - ba).abs() < 1e-6, "{a:?} vs {b:?}: {ab} != {ba}");
        }
    }

    #[test]
    fn test_self_similarity_is_one() {
        let encoder = stub_encoder();
        for text in ["golang", "senior backend engineer", "5 years building services!"] {
            let score = encoder.similarity(text, text).unwrap();
            assert!((score - 1.0).abs() < 1e-5, "{text:?} scored {score}");
        }
    }

    #[test]
    fn test_stub_feature_buckets_are_stable() {
        let embedding = stub_encoder().embed("rust").unwrap();
        let nonzero: Vec<(usize, f32)> = embedding
            .iter()
            .enumerate()
            .filter(|(_, v)| **v != 0.0)
            .map(|(i, v)| (i, *v))
            .collect();

        let word = std::f32::consts::FRAC_1_SQRT_2;
        let gram = word / 2.0;
        let expected = [
            (147, word),
            (149, gram),
            (171, gram),
            (315, -gram),
            (363, -gram),
        ];
        assert_eq!(nonzero.len(), expected.len(), "{nonzero:?}");
        for ((index, value), (want_index, want_value)) in nonzero.iter().zip(expected) {
            assert_eq!(*index, want_index);
            assert!((value - want_value).abs() < 1e-6, "{index}: {value}");
        }
    }

    #[test]
    fn test_stub_similarity_is_pinned() {
        let score = stub_encoder()
            .similarity(
                "senior backend engineer distributed systems",
                "backend engineer building distributed systems",
            )
            .unwrap();
        assert!((score - 0.813_559).abs() < 1e-4, "{score}");
    }

    #[test]
    fn test_overlap_scores_higher_than_unrelated() {
        let encoder = stub_encoder();
        let related = encoder
            .similarity(
                "senior backend engineer distributed systems",
                "backend engineer building distributed systems",
            )
            .unwrap();
        let unrelated = encoder
            .similarity(
                "senior backend engineer distributed systems",
                "pastry chef wedding cakes",
            )
            .unwrap();
        assert!(related > unrelated, "{related} <= {unrelated}");
        assert!(related > 0.5);
    }

    #[test]
    fn test_debug_output() {
        let debug = format!("{:?}", stub_encoder());
        assert!(debug.contains("SentenceEncoder"));
        assert!(debug.contains("Stub"));
    }
}

#[test]
fn test_load_without_model_files_fails() {
    let dir = TempDir::new().unwrap();
    let result = SentenceEncoder::load(EncoderConfig::new(dir.path()));
    assert!(matches!(result, Err(EmbeddingError::ModelNotFound { .. })));
}

#[test]
fn test_load_with_corrupt_model_fails() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("config.json"), "not json").unwrap();
    std::fs::write(dir.path().join("model.safetensors"), b"not weights").unwrap();
    std::fs::write(dir.path().join("tokenizer.json"), "not a tokenizer").unwrap();

    let result = SentenceEncoder::load(EncoderConfig::new(dir.path()));
    assert!(result.is_err());
}
