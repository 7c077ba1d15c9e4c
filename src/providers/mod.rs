//! Image provider module
//!
//! Defines the Provider trait and one adapter per supported image source.

mod loader;
mod registry;
mod traits;

pub mod pexels;
pub mod pixabay;
pub mod unsplash;

pub use loader::ProviderLoader;
pub use pexels::Pexels;
pub use pixabay::Pixabay;
pub use registry::ProviderRegistry;
pub use unsplash::Unsplash;
pub use traits::{
    Provider, ProviderAbout, ProviderId, ProviderRequest, ProviderResponse, RequestParams,
};
