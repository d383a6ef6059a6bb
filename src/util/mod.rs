//! Utility modules

pub mod text;

pub use text::{
    is_blank, is_punctuation, is_punctuation_only, leading_visual_width, split_identifier,
};
