pub mod sdm;

pub use sdm::Sdm;
