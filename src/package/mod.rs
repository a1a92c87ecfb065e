//! Writers for the generated package documents and synthesized pages.

pub mod ncx;
pub mod opf;
pub mod pages;

pub use pages::CoverAssets;
