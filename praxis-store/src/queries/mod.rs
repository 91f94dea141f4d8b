//! Query modules: free functions over a borrowed connection.

pub mod collection_ops;
pub mod kv_ops;
pub mod maintenance;
pub mod result_ops;
