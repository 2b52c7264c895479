pub mod util_fs;
pub mod util_hash;
