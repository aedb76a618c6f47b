//! Loading translations from resource files on disk

use lexis_common::test_utils::{create_temp_dir, init_test_logging};
use lexis_common::{args, Args};
use lexis_config::Settings;
use lexis_i18n::{I18nError, Translator};
use lexis_loader::FileSearcher;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn write(dir: &Path, relative: &str, content: &str) {
    let path = dir.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}

fn file_settings(dir: &TempDir) -> Settings {
    let mut settings = Settings::default();
    settings.load_path = vec![dir.path().to_path_buf()];
    settings
}

fn file_translator(settings: Settings) -> Translator {
    init_test_logging();
    Translator::with_searcher(settings, FileSearcher::new()).unwrap()
}

fn text(translator: &mut Translator, key: &str, locale: Option<&str>, args: &Args) -> String {
    translator
        .translate(key, locale, args)
        .unwrap()
        .into_text()
        .unwrap()
}

#[test]
fn test_search_by_namespace() {
    let dir = create_temp_dir();
    write(dir.path(), "foo.en.yml", "en:\n  hi: Hello %{name} !\n  normal_key: normal_value\n");
    let mut translator = file_translator(file_settings(&dir));

    assert_eq!(
        text(&mut translator, "foo.hi", None, &args!["name" => "Bob"]),
        "Hello Bob !"
    );
    // the whole file was loaded by the first search
    assert!(translator.has_translation("foo.normal_key", None));
}

#[test]
fn test_search_descends_directories() {
    let dir = create_temp_dir();
    write(
        dir.path(),
        "nested/dir/test.en.yml",
        "en:\n  a: deep\n  sub:\n    b: deeper\n",
    );
    let mut translator = file_translator(file_settings(&dir));

    assert_eq!(text(&mut translator, "nested.dir.test.a", None, &args!()), "deep");
    assert_eq!(text(&mut translator, "nested.dir.test.sub.b", None, &args!()), "deeper");
    assert_eq!(text(&mut translator, "nested.other.x", None, &args!()), "nested.other.x");
}

#[test]
fn test_fallback_to_other_file() {
    let dir = create_temp_dir();
    write(dir.path(), "foo.en.yml", "en:\n  only_en: english\n");
    write(dir.path(), "foo.fr.yml", "fr:\n  both: français\n");
    let mut translator = file_translator(file_settings(&dir));

    assert_eq!(text(&mut translator, "foo.only_en", Some("fr"), &args!()), "english");
    assert_eq!(text(&mut translator, "foo.both", Some("fr"), &args!()), "français");
}

#[test]
fn test_json_plurals_and_variants() {
    let dir = create_temp_dir();
    write(
        dir.path(),
        "mail.en.json",
        r#"{"en": {
            "count": {"zero": "no mail", "one": "1 mail", "few": "only %{count} mails", "many": "%{count} mails"},
            "welcome": ["Hi %{name}", {"one": "Hello %{name}", "many": "Hello %{name} and friends"}]
        }}"#,
    );
    let mut settings = file_settings(&dir);
    settings.file_format = "json".into();
    let mut translator = file_translator(settings);

    assert_eq!(text(&mut translator, "mail.count", None, &args!["count" => 0]), "no mail");
    assert_eq!(text(&mut translator, "mail.count", None, &args!["count" => 3]), "only 3 mails");
    assert_eq!(text(&mut translator, "mail.count", None, &args!["count" => 9]), "9 mails");

    let welcome = translator
        .translate("mail.welcome", None, &args!["name" => "Ann", "count" => 1])
        .unwrap();
    assert_eq!(
        welcome.as_variants().unwrap().format_all().unwrap(),
        vec!["Hi Ann", "Hello Ann"]
    );
}

#[test]
fn test_static_references_across_files() {
    let dir = create_temp_dir();
    write(
        dir.path(),
        "app.en.yml",
        "en:\n  title: \"%{brand.name} %{.version}\"\n  version: \"2.0\"\n",
    );
    write(dir.path(), "brand.en.yml", "en:\n  name: Lexis\n");
    let mut translator = file_translator(file_settings(&dir));

    assert_eq!(text(&mut translator, "app.title", None, &args!()), "Lexis 2.0");
    assert!(translator.has_translation("brand.name", None));
}

#[test]
fn test_invalid_static_reference_fails_loading() {
    let dir = create_temp_dir();
    write(dir.path(), "app.en.yml", "en:\n  broken: \"%{.nowhere}\"\n");
    let mut translator = file_translator(file_settings(&dir));

    assert!(matches!(
        translator.translate("app.broken", None, &args!()),
        Err(I18nError::InvalidStaticReference { .. })
    ));
}

#[test]
fn test_missing_locale_root() {
    let dir = create_temp_dir();
    write(dir.path(), "foo.en.yml", "fr:\n  hi: Salut\n");
    let mut translator = file_translator(file_settings(&dir));

    let err = translator.translate("foo.hi", None, &args!()).unwrap_err();
    let message = err.to_string();
    assert!(message.starts_with("error getting data from "), "{message}");
    assert!(message.ends_with("en not defined"), "{message}");
}

#[test]
fn test_skip_locale_root_data() {
    let dir = create_temp_dir();
    write(dir.path(), "foo.en.yml", "hi: Hello\n");
    let mut settings = file_settings(&dir);
    settings.skip_locale_root_data = true;
    let mut translator = file_translator(settings);

    assert_eq!(text(&mut translator, "foo.hi", None, &args!()), "Hello");
}

#[test]
fn test_filename_without_namespace() {
    let dir = create_temp_dir();
    write(dir.path(), "greet/en.yml", "en:\n  hi: in greet\n");
    let mut settings = file_settings(&dir);
    settings.filename_format = "{locale}.{format}".into();
    let mut translator = file_translator(settings);

    assert_eq!(text(&mut translator, "greet.hi", None, &args!()), "in greet");

    write(dir.path(), "en.yml", "en:\n  hi: top level\n");
    assert_eq!(text(&mut translator, "hi", None, &args!()), "top level");
}

#[test]
fn test_parse_errors() {
    let dir = create_temp_dir();
    write(dir.path(), "bad.en.yml", "en: [unclosed\n");
    write(dir.path(), "bad.en.json", "{\"en\": ");
    write(dir.path(), "bad.en.ini", "en.hi = x\n");

    let mut translator = file_translator(file_settings(&dir));
    let err = translator.translate("bad.x", None, &args!()).unwrap_err();
    assert!(err.to_string().starts_with("invalid YAML: "), "{err}");

    let mut json = file_settings(&dir);
    json.file_format = "json".into();
    let mut translator = file_translator(json);
    let err = translator.translate("bad.x", None, &args!()).unwrap_err();
    assert!(err.to_string().starts_with("invalid JSON: "), "{err}");

    let mut ini = file_settings(&dir);
    ini.file_format = "ini".into();
    let mut translator = file_translator(ini);
    let err = translator.translate("bad.x", None, &args!()).unwrap_err();
    assert_eq!(err.to_string(), "no loader available for extension ini");
}

#[test]
fn test_configured_encoding() {
    let dir = create_temp_dir();
    fs::write(dir.path().join("foo.en.yml"), b"en:\n  cafe: caf\xe9\n").unwrap();
    let mut settings = file_settings(&dir);
    settings.encoding = "latin1".into();
    let mut translator = file_translator(settings);

    assert_eq!(text(&mut translator, "foo.cafe", None, &args!()), "café");
}

#[test]
fn test_memoization_reads_files_once() {
    let dir = create_temp_dir();
    write(dir.path(), "foo.en.yml", "en:\n  a: first\n");
    let mut settings = file_settings(&dir);
    settings.enable_memoization = true;
    let mut translator = file_translator(settings);

    assert_eq!(text(&mut translator, "foo.a", None, &args!()), "first");
    write(dir.path(), "foo.en.yml", "en:\n  a: first\n  b: added later\n");
    assert_eq!(text(&mut translator, "foo.b", None, &args!()), "foo.b");

    translator.unload_everything();
    assert_eq!(text(&mut translator, "foo.b", None, &args!()), "added later");
}

#[test]
fn test_without_memoization_files_are_reread() {
    let dir = create_temp_dir();
    write(dir.path(), "foo.en.yml", "en:\n  a: first\n");
    let mut translator = file_translator(file_settings(&dir));

    assert_eq!(text(&mut translator, "foo.a", None, &args!()), "first");
    write(dir.path(), "foo.en.yml", "en:\n  a: first\n  b: added later\n");
    assert_eq!(text(&mut translator, "foo.b", None, &args!()), "added later");
}

#[test]
fn test_memoized_multi_locale_file_keeps_other_sections() {
    let dir = create_temp_dir();
    write(dir.path(), "foo.yml", "en:\n  a: A en\nfr:\n  a: A fr\n");
    let mut settings = file_settings(&dir);
    settings.filename_format = "{namespace}.{format}".into();
    settings.enable_memoization = true;
    let mut translator = file_translator(settings);

    assert_eq!(text(&mut translator, "foo.a", Some("en"), &args!()), "A en");
    write(dir.path(), "foo.yml", "en:\n  a: new en\nfr:\n  a: new fr\n");
    assert_eq!(text(&mut translator, "foo.a", Some("fr"), &args!()), "A fr");

    translator.unload_everything();
    assert_eq!(text(&mut translator, "foo.a", Some("fr"), &args!()), "new fr");
}

#[test]
fn test_load_everything() {
    let dir = create_temp_dir();
    write(dir.path(), "foo.en.yml", "en:\n  a: \"%{.b}!\"\n  b: bee\n");
    write(dir.path(), "foo.fr.yml", "fr:\n  a: a fr\n");
    write(dir.path(), "sub/bar.en.yml", "en:\n  c: see\n");
    write(dir.path(), "ignored.en.json", "{\"en\": {\"x\": \"y\"}}");
    let mut translator = file_translator(file_settings(&dir));

    assert_eq!(translator.load_everything(Some("en")).unwrap(), 3);
    assert!(translator.has_translation("sub.bar.c", Some("en")));
    assert!(!translator.has_translation("foo.a", Some("fr")));
    assert_eq!(
        translator.store().get("foo.a", "en").unwrap().as_scalar(),
        Some("bee!")
    );

    assert_eq!(translator.reload_everything().unwrap(), 4);
    assert!(translator.has_translation("foo.a", Some("fr")));
    assert!(!translator.has_translation("ignored.x", Some("en")));
}

#[test]
fn test_load_everything_from_multi_locale_files() {
    let dir = create_temp_dir();
    write(dir.path(), "foo.yml", "en:\n  a: A en\nfr:\n  a: A fr\n");
    let mut settings = file_settings(&dir);
    settings.filename_format = "{namespace}.{format}".into();
    let mut translator = file_translator(settings.clone());

    assert_eq!(translator.load_everything(None).unwrap(), 2);
    assert_eq!(text(&mut translator, "foo.a", Some("fr"), &args!()), "A fr");

    settings.skip_locale_root_data = true;
    let mut translator = file_translator(settings);
    let err = translator.load_everything(None).unwrap_err();
    assert!(err.to_string().starts_with("Cannot identify locales for"), "{err}");
}
