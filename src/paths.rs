use std::env;
use std::path::{Path, PathBuf};

pub const DEFAULT_TOPOLOGY_DIR: &str = "topology";
pub const TOPOLOGY_DIR_ENV: &str = "SCION_TOPOLOGY_DIR";

const ISD_PREFIX: &str = "ISD";
const CERT_DIR: &str = "certificates";
const SIG_KEYS_DIR: &str = "signature_keys";
const ENC_KEYS_DIR: &str = "encryption_keys";

/// Locations of certificates and keys under a topology directory.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct TopologyPaths {
    isd_dir: PathBuf,
}

impl Default for TopologyPaths {
    fn default() -> Self {
        Self::new(DEFAULT_TOPOLOGY_DIR)
    }
}

impl TopologyPaths {
    pub fn new(isd_dir: impl Into<PathBuf>) -> Self {
        Self {
            isd_dir: isd_dir.into(),
        }
    }

    /// Use the directory named by `SCION_TOPOLOGY_DIR`, or the default one
    /// when the variable is unset or empty.
    pub fn from_env() -> Self {
        match env::var_os(TOPOLOGY_DIR_ENV) {
            Some(dir) if !dir.is_empty() => Self::new(dir),
            _ => Self::default(),
        }
    }

    pub fn isd_dir(&self) -> &Path {
        &self.isd_dir
    }

    fn isd(&self, isd: u32) -> PathBuf {
        self.isd_dir.join(format!("{}{}", ISD_PREFIX, isd))
    }

    fn ad_certs(&self, loc_isd: u32, loc_ad: u64) -> PathBuf {
        self.isd(loc_isd)
            .join(CERT_DIR)
            .join(format!("AD{}", loc_ad))
    }

    /// Certificate chain of `isd`/`ad`, as stored by the AD `loc_isd`/`loc_ad`.
    pub fn cert_chain_file(
        &self,
        loc_isd: u32,
        loc_ad: u64,
        isd: u32,
        ad: u64,
        version: u32,
    ) -> PathBuf {
        self.ad_certs(loc_isd, loc_ad)
            .join(format!("ISD:{}-AD:{}-V:{}.crt", isd, ad, version))
    }

    /// TRC of `isd`, as stored by the AD `loc_isd`/`loc_ad`.
    pub fn trc_file(
        &self,
        loc_isd: u32,
        loc_ad: u64,
        isd: u32,
        version: u32,
    ) -> PathBuf {
        self.ad_certs(loc_isd, loc_ad)
            .join(format!("ISD:{}-V:{}.crt", isd, version))
    }

    pub fn sig_key_file(&self, isd: u32, ad: u64) -> PathBuf {
        self.isd(isd)
            .join(SIG_KEYS_DIR)
            .join(format!("ISD:{}-AD:{}.key", isd, ad))
    }

    pub fn enc_key_file(&self, isd: u32, ad: u64) -> PathBuf {
        self.isd(isd)
            .join(ENC_KEYS_DIR)
            .join(format!("ISD:{}-AD:{}.key", isd, ad))
    }
}
