pub mod filter;
pub mod materializer;
pub mod modification;
pub mod pagination;
pub mod resource;

pub use materializer::GraphMaterializer;
pub use modification::ModificationService;
pub use resource::ResourceService;
