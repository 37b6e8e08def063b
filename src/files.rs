use std::fs;
use std::io::BufReader;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::{Result, ScionError};

const LOG_PREFIX: &str = "[files]";

/// Read the whole file as text
pub fn read_file<P: AsRef<Path>>(path: P) -> Result<String> {
    let path = path.as_ref();
    log::debug!("{} reading {}", LOG_PREFIX, path.display());
    fs::read_to_string(path).map_err(|e| ScionError::file(path, e))
}

/// Read the whole file as bytes, e.g. to decode it with [crate::Raw]
pub fn read_file_bytes<P: AsRef<Path>>(path: P) -> Result<Vec<u8>> {
    let path = path.as_ref();
    log::debug!("{} reading {}", LOG_PREFIX, path.display());
    fs::read(path).map_err(|e| ScionError::file(path, e))
}

/// Write `contents` to the file, creating its parent directories first
///
/// Failing to create a directory is reported with the directory path,
/// failing to write with the file path.
pub fn write_file<P: AsRef<Path>, C: AsRef<[u8]>>(
    path: P,
    contents: C,
) -> Result<()> {
    let path = path.as_ref();
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir).map_err(|e| ScionError::file(dir, e))?;
    }
    let contents = contents.as_ref();
    fs::write(path, contents).map_err(|e| ScionError::file(path, e))?;
    log::debug!(
        "{} {} bytes written to {}",
        LOG_PREFIX,
        contents.len(),
        path.display()
    );
    Ok(())
}

/// Read and parse a JSON document
pub fn load_json_file<T, P>(path: P) -> Result<T>
where
    T: DeserializeOwned,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    log::debug!("{} loading JSON from {}", LOG_PREFIX, path.display());
    let file = fs::File::open(path).map_err(|e| ScionError::file(path, e))?;
    serde_json::from_reader(BufReader::new(file)).map_err(|source| {
        ScionError::Json {
            path: path.to_path_buf(),
            source,
        }
    })
}

pub fn load_json_value<P: AsRef<Path>>(path: P) -> Result<Value> {
    load_json_file(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use tempdir::TempDir;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Topology {
        isd: u32,
        ad: u64,
        core: bool,
    }

    #[test]
    fn write_creates_parent_dirs() {
        let dir = TempDir::new("scionlib_test").unwrap();
        let path = dir.path().join("ISD1").join("certificates").join("a.crt");

        write_file(&path, "chain").unwrap();
        assert_eq!(read_file(&path).unwrap(), "chain");
        assert_eq!(read_file_bytes(&path).unwrap(), b"chain");

        write_file(&path, [0u8, 159, 146, 150]).unwrap();
        assert_eq!(read_file_bytes(&path).unwrap(), vec![0u8, 159, 146, 150]);
        assert!(read_file(&path).is_err());
    }

    #[test]
    fn missing_file_reports_path() {
        let dir = TempDir::new("scionlib_test").unwrap();
        let path = dir.path().join("missing.key");

        let err = read_file_bytes(&path).unwrap_err();
        match &err {
            ScionError::File { path: p, source } => {
                assert_eq!(p, &path);
                assert_eq!(source.kind(), std::io::ErrorKind::NotFound);
            }
            other => panic!("unexpected error {other:?}"),
        }
        assert!(err.to_string().contains("missing.key"));
        assert!(matches!(
            load_json_value(&path),
            Err(ScionError::File { .. })
        ));
    }

    #[test]
    fn write_fails_when_parent_is_a_file() {
        let dir = TempDir::new("scionlib_test").unwrap();
        let blocker = dir.path().join("blocker");
        write_file(&blocker, "x").unwrap();

        let err = write_file(blocker.join("a.txt"), "y").unwrap_err();
        assert!(matches!(err, ScionError::File { path, .. } if path == blocker));
    }

    #[test]
    fn load_typed_json() {
        let dir = TempDir::new("scionlib_test").unwrap();
        let path = dir.path().join("topology.json");
        write_file(&path, r#"{"isd": 1, "ad": 12, "core": true}"#).unwrap();

        let topo: Topology = load_json_file(&path).unwrap();
        assert_eq!(
            topo,
            Topology {
                isd: 1,
                ad: 12,
                core: true
            }
        );
        let value = load_json_value(&path).unwrap();
        assert_eq!(value["ad"], 12);
    }

    #[test]
    fn invalid_json_is_a_json_error() {
        let dir = TempDir::new("scionlib_test").unwrap();
        let path = dir.path().join("broken.json");
        write_file(&path, "{ not json").unwrap();

        let err = load_json_value(&path).unwrap_err();
        assert!(matches!(err, ScionError::Json { .. }));
        assert!(err.is_malformed_input());

        write_file(&path, r#"{"isd": "one"}"#).unwrap();
        assert!(matches!(
            load_json_file::<Topology, _>(&path),
            Err(ScionError::Json { .. })
        ));
    }
}
