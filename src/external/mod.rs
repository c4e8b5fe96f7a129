pub mod google_maps;
pub mod openai;

pub use google_maps::GoogleMaps;
pub use openai::OpenAI;
