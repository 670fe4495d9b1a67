//! Minimal PowerPoint (.pptx) writer.
//!
//! Builds a presentation in memory and serialises it as an Office Open XML
//! package. Only what the deck generator needs is modelled:
//!
//! - `Presentation`: ordered slides plus document properties
//! - `Slide`: a slide based on one of the built-in layouts
//! - `Shape`: text boxes, tables and bulleted body text
//! - `PackageWriter`: the OPC container (parts, relationships, content types)
//!
//! The slide master, layouts and theme are generated from built-in templates.
//!
//! # Example
//!
//! ```rust
//! use lottery_slides::pptx::{Presentation, SlideLayout};
//!
//! let mut pres = Presentation::new();
//! pres.add_slide(SlideLayout::Title).set_title("Admitted Students");
//! let body = pres.add_slide(SlideLayout::TitleAndContent);
//! body.add_bullet_list(vec!["Ada Lovelace - Hill".to_string()]);
//!
//! let bytes = pres.to_bytes()?;
//! assert_eq!(&bytes[..2], b"PK");
//! # Ok::<(), lottery_slides::Error>(())
//! ```

pub mod constants;
pub mod package;
pub mod pres;
pub mod shape;
pub mod slide;
pub mod template;

// Re-export main types
pub use package::PackageWriter;
pub use pres::Presentation;
pub use shape::{Frame, HeaderStyle, Shape, TextFormat};
pub use slide::{Slide, SlideLayout};
