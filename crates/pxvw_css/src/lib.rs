//! Viewport-unit transformer for stylesheets
//!
//! Every rule which has lengths in `px` (or another unit) gets a copy with these lengths
//! converted to `vw`. The copies are appended inside `@media (min-width: <viewport width>)`,
//! so that the design scales with the screen once it is wider than the viewport it was made for.
//!
//! ## Example
//! ```
//! use pxvw_core::PxToViewportOptions;
//! use pxvw_css::PxToViewportTransformer;
//! use swc_core::common::{BytePos, Span, DUMMY_SP};
//!
//! let input = r#"
//! .example {
//!   margin: 0 12px;
//! }
//! "#;
//!
//! // Note: `Span` usually comes from the input, e.g. from a `<style>` block
//! let span = Span {
//!     lo: BytePos(1),
//!     hi: BytePos(1 + input.len() as u32),
//!     ..DUMMY_SP
//! };
//! let mut errors = Vec::new();
//!
//! let options = PxToViewportOptions::from_json(r#"{ "viewportWidth": 1280 }"#).unwrap();
//! let transformer = PxToViewportTransformer::new(options).unwrap();
//!
//! let result = pxvw_css::transform_css(input, span, None, &transformer, &mut errors, Default::default());
//!
//! if let Some(transformed_css) = result {
//!     assert!(transformed_css.contains("9375vw"));
//! }
//! ```

mod css;

pub use css::*;
pub use pxvw_core::{ConfigError, PxToViewportOptions, SelectorMatcher};
