mod file_ops;

pub use file_ops::{copy_file, dir_is_empty, ensure_dir, FileOpError, FileOpResult};
