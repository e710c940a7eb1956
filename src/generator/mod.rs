//! Generator-side services over the build graph.
//!
//! A [`LocalGenerator`] is one configured directory seen the way a native
//! generator sees it: definitions fall back to the graph cache and targets
//! are wrapped as [`GeneratorTarget`]s that know their owning directory.
//! [`TargetFlags`] accumulates the real flags, defines and includes that a
//! compile rule is expanded with.

pub mod flags;
pub mod local;
pub mod target;

pub use flags::{LanguageFlags, TargetFlags};
pub use local::{append_defines, LocalGenerator, ANDROID_ABI_VAR, BUILD_TYPE_VAR};
pub use target::GeneratorTarget;
