pub mod wells;

pub use wells::FetchSource;
