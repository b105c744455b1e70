pub mod category;
pub mod product;
pub mod storage;

pub use category::CategoryService;
pub use product::ProductService;
pub use storage::FileStore;
