//! # Lexis I18n
//!
//! Message resolution and formatting for Lexis.
//!
//! This crate stores translation values per locale, resolves keys with a
//! fallback locale, selects plural forms, substitutes `%{name}` placeholders
//! and custom function calls, and inlines static references between
//! messages.
//!
//! ```
//! use lexis_common::args;
//! use lexis_config::Settings;
//! use lexis_i18n::Translator;
//!
//! let mut translator = Translator::new(Settings::default()).unwrap();
//! translator.add_translation("greet", "Hello %{name}!", None);
//!
//! let message = translator.translate("greet", None, &args!["name" => "Ann"]).unwrap();
//! assert_eq!(message.as_text(), Some("Hello Ann!"));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod expander;
pub mod formatter;
pub mod functions;
pub mod plural;
pub mod policy;
pub mod search;
pub mod store;
pub mod template;
pub mod translator;

pub use error::*;
pub use expander::StaticExpander;
pub use formatter::{TemplateFormatter, Translation, VariantSet};
pub use functions::{CustomFunction, FunctionRegistry};
pub use plural::{select_category, PluralSelector};
pub use policy::{Handlers, Policy};
pub use search::{LoadedKey, NoSearch, ResourceSearch};
pub use store::TranslationStore;
pub use template::Syntax;
pub use translator::Translator;
