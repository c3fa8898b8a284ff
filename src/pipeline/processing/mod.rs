// Pipeline processing: classification and normalization

pub mod classify;
pub mod normalize;
