#[cfg(test)]
mod tests {
    use scionlib::files::{read_file, read_file_bytes, write_file};
    use scionlib::paths::TopologyPaths;
    use scionlib::{Bounds, Field, LenMode, Raw, ScionError};
    use tempdir::TempDir;

    const KEY_HEADER_LEN: usize = 13;

    /// version(1) | isd(2) | ad(8) | key length(2) | key | trailer
    fn key_record(isd: u16, ad: u64, key: &[u8], trailer: &[u8]) -> Vec<u8> {
        let mut record = vec![1u8];
        record.extend_from_slice(&isd.to_be_bytes());
        record.extend_from_slice(&ad.to_be_bytes());
        record.extend_from_slice(&(key.len() as u16).to_be_bytes());
        record.extend_from_slice(key);
        record.extend_from_slice(trailer);
        record
    }

    #[test]
    fn decode_key_file_from_topology() {
        let _ = env_logger::builder().is_test(true).try_init();
        let temp_dir =
            TempDir::new("scionlib_test").expect("Failed to create temporary directory");
        let paths = TopologyPaths::new(temp_dir.path());
        let key_path = paths.sig_key_file(1, 17);

        let key = [0xaa; 32];
        write_file(&key_path, key_record(1, 17, &key, b"sig"))
            .expect("Failed to write key file");

        let bytes = read_file_bytes(&key_path).expect("Failed to read key file");
        let mut raw =
            Raw::with_len(&bytes, "signing key", KEY_HEADER_LEN, LenMode::Minimum)
                .unwrap();
        assert_eq!(raw.pop(Some(1), Bounds::Checked).unwrap(), Field::Byte(1));
        assert_eq!(raw.pop_u16().unwrap(), 1);
        assert_eq!(raw.pop_u64().unwrap(), 17);
        let key_len = raw.pop_u16().unwrap() as usize;
        assert_eq!(raw.pop_bytes(key_len).unwrap(), &key);
        assert_eq!(raw.pop(None, Bounds::Checked).unwrap(), Field::Bytes(b"sig"));
        assert_eq!(raw.offset(), bytes.len());
        assert!(raw.is_empty());
    }

    #[test]
    fn truncated_key_file_is_rejected() {
        let temp_dir =
            TempDir::new("scionlib_test").expect("Failed to create temporary directory");
        let key_path = TopologyPaths::new(temp_dir.path()).enc_key_file(2, 5);

        let mut record = key_record(2, 5, &[0x55; 16], &[]);
        record.truncate(20);
        write_file(&key_path, &record).unwrap();

        let bytes = read_file_bytes(&key_path).unwrap();
        let mut raw =
            Raw::with_len(&bytes, "encryption key", KEY_HEADER_LEN, LenMode::Minimum)
                .unwrap();
        raw.pop_bytes(11).unwrap();
        let key_len = raw.pop_u16().unwrap() as usize;
        let err = raw.pop_bytes(key_len).unwrap_err();
        assert!(err.is_malformed_input());
        assert!(err
            .to_string()
            .contains("encryption key: Attempted to access beyond end of raw data"));
        assert!(err.to_string().contains("(len=20, offset=13, request=16)"));

        let short = &bytes[..5];
        let err =
            Raw::with_len(short, "encryption key", KEY_HEADER_LEN, LenMode::Minimum)
                .unwrap_err();
        assert!(matches!(err, ScionError::Parse { actual: 5, .. }));
    }

    #[test]
    fn text_contents_are_not_raw_data() {
        let temp_dir =
            TempDir::new("scionlib_test").expect("Failed to create temporary directory");
        let trc_path = TopologyPaths::new(temp_dir.path()).trc_file(1, 10, 1, 0);
        write_file(&trc_path, "ISD 1 TRC").unwrap();

        let text = read_file(&trc_path).unwrap();
        let err = Raw::new(&text, "trc").unwrap_err();
        assert!(matches!(err, ScionError::Type { .. }));
        assert_eq!(
            err.to_string(),
            "Error parsing raw trc: Expected bytes, got String"
        );
    }
}
