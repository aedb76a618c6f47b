//! File-backed resource search

use crate::error::{LoadError, LoadResult};
use crate::flatten::flatten;
use crate::parser::{ParserRegistry, ResourceParser};
use encoding_rs::Encoding;
use lexis_config::{FilenameFormat, Settings};
use lexis_i18n::{I18nResult, LoadedKey, ResourceSearch, TranslationStore};
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::fs;
use std::path::{Component, Path, PathBuf};
use tracing::{debug, info, trace, warn};
use walkdir::WalkDir;

/// Loads translation files from the configured `load_path` directories
///
/// Files are found from the key's namespace: for `greetings.morning.hi` the
/// searcher looks for the file named after `greetings` (for example
/// `greetings.en.yml`), and failing that descends into a `greetings`
/// directory to look for `morning`.
#[derive(Debug, Default)]
pub struct FileSearcher {
    parsers: ParserRegistry,
    /// Memoized file content by path; `None` once a file has been used up
    loaded_files: HashMap<PathBuf, Option<Map<String, Value>>>,
}

impl FileSearcher {
    /// Create a searcher with the JSON and YAML parsers
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a searcher with a custom parser registry
    pub fn with_parsers(parsers: ParserRegistry) -> Self {
        Self {
            parsers,
            loaded_files: HashMap::new(),
        }
    }

    /// Register a parser for more file extensions
    pub fn register_parser<P>(&mut self, parser: P, extensions: &[&str])
    where
        P: ResourceParser + 'static,
    {
        self.parsers.register(parser, extensions);
    }

    /// Read a file and return its data, or its `root` section when given
    ///
    /// With memoization enabled a file is only read once. Files holding
    /// several locales (`remember`) keep their unused sections for later
    /// calls; other files yield nothing on later calls.
    pub fn load_resource(
        &mut self,
        path: &Path,
        root: Option<&str>,
        remember: bool,
        settings: &Settings,
    ) -> LoadResult<Map<String, Value>> {
        let cache_key = fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf());
        let display = cache_key.display().to_string();

        let (mut data, cached) = match self.loaded_files.get_mut(&cache_key) {
            Some(None) => return Ok(Map::new()),
            Some(Some(data)) if data.is_empty() => return Ok(Map::new()),
            Some(Some(data)) => (std::mem::take(data), true),
            None => (read_resource(&self.parsers, path, &settings.encoding)?, false),
        };

        if let Some(root) = root {
            if !data.contains_key(root) {
                if cached {
                    self.loaded_files.insert(cache_key, Some(data));
                }
                return Err(LoadError::MissingRoot {
                    path: display,
                    locale: root.to_string(),
                });
            }
        }

        let section = match root {
            Some(root) => match data.remove(root) {
                Some(Value::Object(section)) => section,
                Some(Value::Null) | None => Map::new(),
                Some(other) => {
                    return Err(LoadError::InvalidData {
                        path: display,
                        message: format!("{root} is not a mapping but {other}"),
                    })
                }
            },
            None => std::mem::take(&mut data),
        };

        if settings.enable_memoization {
            trace!("Memoizing {} (keep content: {})", cache_key.display(), remember);
            self.loaded_files
                .insert(cache_key, remember.then_some(data));
        }
        Ok(section)
    }

    /// Load one file below `base` and insert its values for `locale`
    fn load_translation_file(
        &mut self,
        relative: &Path,
        base: &Path,
        locale: &str,
        format: &FilenameFormat,
        store: &mut TranslationStore,
        settings: &Settings,
    ) -> LoadResult<Vec<String>> {
        let root = (!settings.skip_locale_root_data).then_some(locale);
        let remember = !format.has_locale() && root.is_some();
        let data = self.load_resource(&base.join(relative), root, remember, settings)?;
        let namespace = namespace_from_path(relative, format, &settings.namespace_delimiter);

        let entries = flatten(data, &namespace, &settings.namespace_delimiter)?;
        debug!(
            "Loaded {} keys from {} for locale {}",
            entries.len(),
            relative.display(),
            locale
        );
        Ok(entries
            .into_iter()
            .map(|(key, value)| {
                store.add(key.clone(), value, locale);
                key
            })
            .collect())
    }

    #[allow(clippy::too_many_arguments)]
    fn search_dir(
        &mut self,
        segments: &[&str],
        relative: &Path,
        base: &Path,
        locale: &str,
        format: &FilenameFormat,
        store: &mut TranslationStore,
        settings: &Settings,
    ) -> LoadResult<Vec<String>> {
        let namespace = segments.first().copied().unwrap_or("");
        let wanted = format.render(namespace, locale, &settings.file_format);
        let current = base.join(relative);

        if current.join(&wanted).is_file() {
            return self.load_translation_file(
                &relative.join(&wanted),
                base,
                locale,
                format,
                store,
                settings,
            );
        }
        if !namespace.is_empty() && current.join(namespace).is_dir() {
            return self.search_dir(
                &segments[1..],
                &relative.join(namespace),
                base,
                locale,
                format,
                store,
                settings,
            );
        }
        trace!("No {} in {}", wanted, current.display());
        Ok(Vec::new())
    }

    /// Load every matching file below `base`
    fn load_dir(
        &mut self,
        base: &Path,
        locale: Option<&str>,
        format: &FilenameFormat,
        store: &mut TranslationStore,
        settings: &Settings,
    ) -> LoadResult<Vec<LoadedKey>> {
        let mut loaded = Vec::new();

        for entry in WalkDir::new(base).sort_by_file_name() {
            let entry = entry.map_err(|e| LoadError::Walk {
                path: base.display().to_string(),
                message: e.to_string(),
            })?;
            if !entry.file_type().is_file() {
                continue;
            }
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some(settings.file_format.as_str()) {
                continue;
            }
            let Some(captures) = entry.file_name().to_str().and_then(|name| format.captures(name))
            else {
                continue;
            };
            let relative = path.strip_prefix(base).unwrap_or(path);

            let file_locale = captures.locale.as_deref().or(locale);
            match (locale.or(file_locale), file_locale) {
                (Some(requested), Some(file_locale)) if requested == file_locale => {
                    let keys =
                        self.load_translation_file(relative, base, requested, format, store, settings)?;
                    loaded.extend(keys.into_iter().map(|key| LoadedKey::new(requested, key)));
                }
                (Some(_), _) => {}
                (None, _) if !settings.skip_locale_root_data => {
                    let namespace =
                        namespace_from_path(relative, format, &settings.namespace_delimiter);
                    for (section_locale, section) in self.load_resource(path, None, false, settings)? {
                        let Value::Object(section) = section else {
                            continue;
                        };
                        for (key, value) in flatten(section, &namespace, &settings.namespace_delimiter)? {
                            store.add(key.clone(), value, &section_locale);
                            loaded.push(LoadedKey::new(section_locale.as_str(), key));
                        }
                    }
                }
                (None, _) => {
                    return Err(LoadError::UnknownLocales {
                        path: path.display().to_string(),
                    })
                }
            }
        }
        Ok(loaded)
    }
}

impl ResourceSearch for FileSearcher {
    fn search(
        &mut self,
        key: &str,
        locale: &str,
        store: &mut TranslationStore,
        settings: &Settings,
    ) -> I18nResult<Vec<String>> {
        let format = settings.filename_format()?;
        let mut segments: Vec<&str> = key.split(settings.namespace_delimiter.as_str()).collect();
        segments.pop();

        let mut loaded = Vec::new();
        for base in &settings.load_path {
            loaded.extend(self.search_dir(
                &segments,
                Path::new(""),
                base,
                locale,
                &format,
                store,
                settings,
            )?);
        }
        Ok(loaded)
    }

    fn load_everything(
        &mut self,
        locale: Option<&str>,
        store: &mut TranslationStore,
        settings: &Settings,
    ) -> I18nResult<Vec<LoadedKey>> {
        let format = settings.filename_format()?;
        let mut loaded = Vec::new();
        for base in &settings.load_path {
            if !base.is_dir() {
                warn!("Load path {} is not a directory", base.display());
                continue;
            }
            loaded.extend(self.load_dir(base, locale, &format, store, settings)?);
        }
        info!("Loaded {} keys from {} directories", loaded.len(), settings.load_path.len());
        Ok(loaded)
    }

    fn forget(&mut self) {
        self.loaded_files.clear();
        debug!("Cleared memoized resource files");
    }
}

/// Read, decode and parse one file into its top-level mapping
fn read_resource(parsers: &ParserRegistry, path: &Path, encoding: &str) -> LoadResult<Map<String, Value>> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("");
    let parser = parsers.get(extension)?;
    let read_error = |message: String| LoadError::Read {
        path: path.display().to_string(),
        message,
    };

    let encoding = Encoding::for_label(encoding.as_bytes())
        .ok_or_else(|| read_error(format!("unknown encoding {encoding}")))?;
    let bytes = fs::read(path).map_err(|e| read_error(e.to_string()))?;
    let (content, _, had_errors) = encoding.decode(&bytes);
    if had_errors {
        return Err(read_error(format!("invalid {} data", encoding.name())));
    }

    match parser.parse(&content)? {
        Value::Object(map) => Ok(map),
        Value::Null => Ok(Map::new()),
        other => Err(LoadError::InvalidData {
            path: path.display().to_string(),
            message: format!("expected a mapping, found {other}"),
        }),
    }
}

/// Namespace of a file: its directories, then its `{namespace}` capture
pub fn namespace_from_path(relative: &Path, format: &FilenameFormat, delimiter: &str) -> String {
    let mut segments: Vec<String> = relative
        .parent()
        .map(|dir| {
            dir.components()
                .filter_map(|component| match component {
                    Component::Normal(name) => Some(name.to_string_lossy().into_owned()),
                    _ => None,
                })
                .collect()
        })
        .unwrap_or_default();

    if format.has_namespace() {
        if let Some(namespace) = relative
            .file_name()
            .and_then(|name| name.to_str())
            .and_then(|name| format.captures(name))
            .and_then(|captures| captures.namespace)
        {
            segments.push(namespace);
        }
    }
    segments.join(delimiter)
}
