// Buffer related constants
pub const DEFAULT_CHUNK_SIZE: usize = 1024 * 1024;

// Public, anonymously readable object URLs are served from this host
pub const PUBLIC_URL_BASE: &str = "https://storage.googleapis.com";

// Defaults applied when a caller leaves an argument out
pub const DEFAULT_BUCKET: &str = "my-bucket";
pub const DEFAULT_SIGNED_URL_EXPIRES_MINUTES: u32 = 15;

// Filesystem default
pub const DEFAULT_FS_ROOT: &str = "./storage";
