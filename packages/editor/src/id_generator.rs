use crc32fast::Hasher;

/// Derive a session seed from a project id and a per-session nonce using CRC32
///
/// Every editing session gets its own seed, so ids minted now can never
/// collide with ids minted by an earlier session and loaded from storage.
pub fn session_seed(project_id: &str, nonce: u64) -> String {
    let mut hasher = Hasher::new();
    hasher.update(project_id.as_bytes());
    hasher.update(&nonce.to_le_bytes());
    format!("{:08x}", hasher.finalize())
}

/// Sequential id generator for canvas nodes within one editing session
#[derive(Debug, Clone)]
pub struct IdGenerator {
    seed: String, // Session seed (CRC32)
    count: u64,   // Sequential counter
}

impl IdGenerator {
    pub fn for_session(project_id: &str, nonce: u64) -> Self {
        Self::with_seed(session_seed(project_id, nonce))
    }

    pub fn with_seed(seed: impl Into<String>) -> Self {
        Self {
            seed: seed.into(),
            count: 0,
        }
    }

    /// Generate next id, prefixed with the node kind (`section`, `container`,
    /// or an element type tag)
    pub fn next_id(&mut self, kind: &str) -> String {
        self.count += 1;
        format!("{}-{}-{}", kind, self.seed, self.count)
    }

    /// Get session seed
    pub fn seed(&self) -> &str {
        &self.seed
    }

    /// Number of ids issued so far
    pub fn issued(&self) -> u64 {
        self.count
    }
}
