mod titan;

pub use titan::TitanEmbedding;
