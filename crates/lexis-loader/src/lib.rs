//! # Lexis Loader
//!
//! Resource file loading for the Lexis translator.
//!
//! [`FileSearcher`] finds JSON and YAML translation files under the
//! configured load paths, derives key namespaces from directory and file
//! names, and feeds the translator's store on demand.
//!
//! ```no_run
//! use lexis_common::args;
//! use lexis_config::Settings;
//! use lexis_i18n::Translator;
//! use lexis_loader::FileSearcher;
//!
//! let mut settings = Settings::default();
//! settings.load_path.push("locales".into());
//!
//! let mut translator = Translator::with_searcher(settings, FileSearcher::new())?;
//! let message = translator.translate("greetings.hi", None, &args!["name" => "Ann"])?;
//! println!("{}", message.as_text().unwrap_or_default());
//! # Ok::<(), lexis_i18n::I18nError>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod flatten;
pub mod parser;
pub mod searcher;

pub use error::{LoadError, LoadResult};
pub use flatten::flatten;
pub use parser::{JsonParser, ParserRegistry, ResourceParser, YamlParser};
pub use searcher::{namespace_from_path, FileSearcher};
