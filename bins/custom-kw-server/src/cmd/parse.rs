use custom_kw_api::ParsedRecord;
use custom_kw_engine::io::write_output_file;

use crate::cmd::load_registry;
use crate::config::ParseArgs;
use crate::error::ServerError;

pub fn run(args: ParseArgs) -> Result<(), ServerError> {
    println!("{}", execute(&args)?);
    Ok(())
}

/// Parse the result file and render the record as a JSON object in schema order.
pub fn execute(args: &ParseArgs) -> Result<String, ServerError> {
    let mut registry = load_registry(&args.config.config)?;
    let keyword = registry.get_mut(&args.keyword)?;

    let path = match &args.file {
        Some(path) => path.clone(),
        None => keyword
            .result_path(args.iens)
            .ok_or_else(|| ServerError::NoResultFile(args.keyword.clone()))?,
    };

    let mut record = ParsedRecord::new();
    keyword.try_parse_result_file(&path, &mut record)?;

    tracing::info!(
        keyword = %keyword.name(),
        path = %path.display(),
        keys = keyword.size(),
        "parsed result file"
    );

    if args.write_output {
        let output = keyword
            .output_path(args.iens)
            .ok_or_else(|| ServerError::NoOutputFile(args.keyword.clone()))?;
        write_output_file(&output, keyword.schema(), &record)?;
    }
    Ok(record.to_json(keyword.schema()).to_string())
}

#[cfg(test)]
mod tests {
    use std::path::{Path, PathBuf};

    use super::*;
    use crate::config::ConfigArgs;

    fn write_config(dir: &Path) -> PathBuf {
        let path = dir.join("keywords.toml");
        let pattern = dir.join("result_%d.txt");
        std::fs::write(
            &path,
            format!(
                r#"
                [[keywords]]
                name = "AGG"
                result_file = "{}"
                output_file = "{}"

                [[keywords]]
                name = "FIXED"
                definition = {{ a = "float" }}
                "#,
                pattern.display(),
                dir.join("out_%d.txt").display()
            ),
        )
        .unwrap();
        path
    }

    fn args(config: PathBuf, keyword: &str, file: Option<PathBuf>) -> ParseArgs {
        ParseArgs {
            config: ConfigArgs { config },
            keyword: keyword.to_string(),
            iens: 2,
            write_output: false,
            file,
        }
    }

    #[test]
    fn renders_record_from_pattern() {
        let dir = tempfile::tempdir().unwrap();
        let config = write_config(dir.path());
        std::fs::write(dir.path().join("result_2.txt"), "pressure 12.5\nlabel hello\n").unwrap();

        let out = execute(&args(config, "AGG", None)).unwrap();
        assert_eq!(out, r#"{"pressure":12.5,"label":"hello"}"#);
    }

    #[test]
    fn writes_output_file_on_request() {
        let dir = tempfile::tempdir().unwrap();
        let config = write_config(dir.path());
        std::fs::write(dir.path().join("result_2.txt"), "label hello\npressure 1.5\n").unwrap();

        let mut parse_args = args(config, "AGG", None);
        parse_args.write_output = true;
        execute(&parse_args).unwrap();

        let written = std::fs::read_to_string(dir.path().join("out_2.txt")).unwrap();
        assert_eq!(written, "label hello\npressure 1.5\n");
    }

    #[test]
    fn rejected_record_names_the_cause() {
        let dir = tempfile::tempdir().unwrap();
        let config = write_config(dir.path());
        let file = dir.path().join("fixed.txt");
        std::fs::write(&file, "b 1.0\n").unwrap();

        let err = execute(&args(config, "FIXED", Some(file))).unwrap_err();
        assert!(err.to_string().contains("unknown key 'b'"), "{err}");
    }

    #[test]
    fn repeated_key_is_named_as_the_cause() {
        let dir = tempfile::tempdir().unwrap();
        let config = write_config(dir.path());
        let file = dir.path().join("repeated.txt");
        std::fs::write(&file, "a 1\na x\n").unwrap();

        let err = execute(&args(config, "AGG", Some(file))).unwrap_err();
        assert!(err.to_string().contains("key 'a' appears more than once"), "{err}");
    }

    #[test]
    fn definition_keyword_needs_an_explicit_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = write_config(dir.path());

        let err = execute(&args(config, "FIXED", None)).unwrap_err();
        assert!(matches!(err, ServerError::NoResultFile(_)));
    }
}
