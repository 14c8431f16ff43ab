//! Access to the Persona identity widget.
//!
//! The widget is a third-party script which installs `navigator.id`.
//! Pages talk to it through [`IdentityProvider`], so the relay can be driven by
//! [`NavigatorId`] in a browser and by a recording double in tests.
//!
//! Based on: https://developer.mozilla.org/en-US/docs/Mozilla/Persona/Quick_Setup

mod assertion;
pub use assertion::*;
mod error;
pub use error::*;
mod navigator;
pub use navigator::*;
mod provider;
pub use provider::*;
