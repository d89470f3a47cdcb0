use std::collections::BTreeMap;
use std::fmt;

use itertools::Itertools;
use serde_json::{Map, Value};

use crate::schema::{self, Field};
use crate::{FileEntry, Manifest};

/// Errors that may occur when validating a [`Manifest`].
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("The manifest is not a well-formed JSON document")]
    Syntax(#[from] serde_json::Error),

    #[error("The manifest must be a JSON object, found {found}")]
    NotAnObject { found: &'static str },

    #[error("The manifest does not match the index schema: {}", .issues.iter().join("; "))]
    Schema { issues: Vec<Issue> },
}

impl ValidationError {
    /// Every schema violation found, in document order.
    ///
    /// Empty unless this is a [`ValidationError::Schema`].
    #[must_use]
    pub fn issues(&self) -> &[Issue] {
        match self {
            Self::Schema { issues } => issues,
            Self::Syntax(_) | Self::NotAnObject { .. } => &[],
        }
    }
}

/// A single schema violation and where it was found.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use]
pub struct Issue {
    /// A path to the offending value, like `files[0].fileSize`.
    pub location: String,
    pub kind: IssueKind,
}

impl fmt::Display for Issue {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{}: {}", self.location, self.kind)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IssueKind {
    #[error("required field is missing")]
    Missing,

    #[error("expected {expected}, found {found}")]
    WrongType {
        expected: &'static str,
        found: &'static str,
    },

    #[error("{value} does not fit into {target}")]
    OutOfRange {
        value: String,
        target: &'static str,
    },
}

/// The second phase of validation: walks an already parsed document.
///
/// Every method reports what it couldn't accept into [`Self::issues`] and
/// returns [`None`], so that the caller keeps going and gathers the rest.
#[derive(Debug, Default)]
pub(crate) struct Validator {
    issues: Vec<Issue>,
}

impl Validator {
    pub(crate) fn manifest(mut self, document: &Value) -> Result<Manifest, ValidationError> {
        let Value::Object(root) = document else {
            let found = json_type(document);
            return Err(ValidationError::NotAnObject { found });
        };

        match self.manifest_fields(root) {
            Some(manifest) if self.issues.is_empty() => Ok(manifest),
            _ => {
                tracing::debug!(count = self.issues.len(), "Manifest failed validation");
                Err(ValidationError::Schema {
                    issues: self.issues,
                })
            }
        }
    }

    fn manifest_fields(&mut self, root: &Map<String, Value>) -> Option<Manifest> {
        let format_version = self
            .required(root, None, schema::FORMAT_VERSION)
            .and_then(|(value, location)| self.unsigned(value, location));
        let game = self
            .required(root, None, schema::GAME)
            .and_then(|(value, location)| self.string(value, location));
        let name = self
            .required(root, None, schema::NAME)
            .and_then(|(value, location)| self.string(value, location));
        let version_id = self
            .required(root, None, schema::VERSION_ID)
            .and_then(|(value, location)| self.string(value, location));
        let summary = self.optional_string(root, None, schema::SUMMARY);
        let files = self
            .required(root, None, schema::FILES)
            .and_then(|(value, location)| self.files(value, &location));
        let dependencies = self
            .required(root, None, schema::DEPENDENCIES)
            .and_then(|(value, location)| self.string_map(value, &location));

        Some(Manifest {
            format_version: format_version?,
            game: game?,
            name: name?,
            version_id: version_id?,
            summary: summary?,
            files: files?,
            dependencies: dependencies?,
        })
    }

    fn files(&mut self, value: &Value, location: &str) -> Option<Vec<FileEntry>> {
        let Value::Array(entries) = value else {
            return self.wrong_type(location.to_owned(), "array", value);
        };

        // Not short-circuiting, every entry gets its say.
        let files: Vec<Option<FileEntry>> = entries
            .iter()
            .enumerate()
            .map(|(index, entry)| self.file(entry, &format!("{location}[{index}]")))
            .collect();
        files.into_iter().collect()
    }

    fn file(&mut self, value: &Value, location: &str) -> Option<FileEntry> {
        let Value::Object(object) = value else {
            return self.wrong_type(location.to_owned(), "object", value);
        };

        let parent = Some(location);
        let path = self
            .required(object, parent, schema::PATH)
            .and_then(|(value, location)| self.string(value, location));
        let hashes = self
            .required(object, parent, schema::HASHES)
            .and_then(|(value, location)| self.string_map(value, &location));
        let env = self
            .required(object, parent, schema::ENV)
            .and_then(|(value, location)| self.string_map(value, &location));
        let downloads = self
            .required(object, parent, schema::DOWNLOADS)
            .and_then(|(value, location)| self.string_list(value, &location));
        let file_size = self
            .required(object, parent, schema::FILE_SIZE)
            .and_then(|(value, location)| self.unsigned(value, location));

        Some(FileEntry {
            path: path?,
            hashes: hashes?,
            env: env?,
            downloads: downloads?,
            file_size: file_size?,
        })
    }

    fn required<'doc>(
        &mut self,
        object: &'doc Map<String, Value>,
        parent: Option<&str>,
        field: Field,
    ) -> Option<(&'doc Value, String)> {
        let location = match parent {
            Some(parent) => format!("{parent}.{}", field.external),
            None => field.external.to_owned(),
        };
        match object.get(field.external) {
            Some(value) => Some((value, location)),
            None => self.report(location, IssueKind::Missing),
        }
    }

    /// Absent and `null` are both [`None`], the outer [`Option`] is the
    /// usual "did it validate" one.
    fn optional_string(
        &mut self,
        object: &Map<String, Value>,
        parent: Option<&str>,
        field: Field,
    ) -> Option<Option<String>> {
        match object.get(field.external) {
            None | Some(Value::Null) => Some(None),
            Some(Value::String(string)) => Some(Some(string.clone())),
            Some(other) => {
                let location = match parent {
                    Some(parent) => format!("{parent}.{}", field.external),
                    None => field.external.to_owned(),
                };
                self.wrong_type(location, "string or null", other)
            }
        }
    }

    fn string(&mut self, value: &Value, location: String) -> Option<String> {
        match value {
            Value::String(string) => Some(string.clone()),
            other => self.wrong_type(location, "string", other),
        }
    }

    /// Accepts JSON integers only. `1.0` and `"1"` are type errors.
    fn unsigned<T>(&mut self, value: &Value, location: String) -> Option<T>
    where
        T: TryFrom<u64>,
    {
        let target = std::any::type_name::<T>();
        match value {
            Value::Number(number) => match number.as_u64() {
                Some(unsigned) => match T::try_from(unsigned) {
                    Ok(value) => Some(value),
                    Err(_) => {
                        let kind = IssueKind::OutOfRange {
                            value: unsigned.to_string(),
                            target,
                        };
                        self.report(location, kind)
                    }
                },
                None if number.is_i64() => {
                    let kind = IssueKind::WrongType {
                        expected: "non-negative integer",
                        found: "negative integer",
                    };
                    self.report(location, kind)
                }
                // Integer literals past `u64::MAX` can only be parsed as floats.
                None if number.as_f64().is_some_and(|float| float >= U64_OVERFLOW) => {
                    let value = number.to_string();
                    self.report(location, IssueKind::OutOfRange { value, target })
                }
                None => self.wrong_type(location, "integer", value),
            },
            other => self.wrong_type(location, "integer", other),
        }
    }

    fn string_map(&mut self, value: &Value, location: &str) -> Option<BTreeMap<String, String>> {
        let Value::Object(object) = value else {
            return self.wrong_type(location.to_owned(), "object", value);
        };

        let entries: Vec<Option<(String, String)>> = object
            .iter()
            .map(|(key, value)| {
                let string = self.string(value, format!("{location}[{key:?}]"))?;
                Some((key.clone(), string))
            })
            .collect();
        entries.into_iter().collect()
    }

    fn string_list(&mut self, value: &Value, location: &str) -> Option<Vec<String>> {
        let Value::Array(items) = value else {
            return self.wrong_type(location.to_owned(), "array", value);
        };

        let items: Vec<Option<String>> = items
            .iter()
            .enumerate()
            .map(|(index, item)| self.string(item, format!("{location}[{index}]")))
            .collect();
        items.into_iter().collect()
    }

    fn wrong_type<T>(
        &mut self,
        location: String,
        expected: &'static str,
        value: &Value,
    ) -> Option<T> {
        let found = json_type(value);
        self.report(location, IssueKind::WrongType { expected, found })
    }

    fn report<T>(&mut self, location: String, kind: IssueKind) -> Option<T> {
        self.issues.push(Issue { location, kind });
        None
    }
}

/// `2^64`. Every float this large is a whole number.
const U64_OVERFLOW: f64 = 18_446_744_073_709_551_616.0;

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(number) if number.is_f64() => "float",
        Value::Number(_) => "integer",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;
    use serde_json::{Value, json};

    use super::{Issue, IssueKind, ValidationError};
    use crate::Manifest;

    fn document() -> Value {
        json!({
            "formatVersion": 1,
            "game": "minecraft",
            "name": "Sample Pack",
            "versionId": "0.1.0",
            "summary": null,
            "files": [{
                "path": "mods/sodium-fabric-0.5.8.jar",
                "hashes": { "sha1": "cc297357ff0031f805a744ca3a1378a112c2ddf4" },
                "env": { "client": "required", "server": "unsupported" },
                "downloads": [
                    "https://cdn.modrinth.com/data/AANobbMI/versions/PRGvF0Jh/sodium-fabric-0.5.8.jar"
                ],
                "fileSize": 1024
            }],
            "dependencies": { "minecraft": "1.20.1" }
        })
    }

    fn validate(document: &Value) -> Result<Manifest, ValidationError> {
        Manifest::validate(serde_json::to_vec(document).unwrap())
    }

    fn issues(document: &Value) -> Vec<Issue> {
        validate(document).unwrap_err().issues().to_vec()
    }

    #[test]
    fn valid_document() {
        let manifest = validate(&document()).unwrap();
        assert_eq!(manifest.format_version, 1);
        assert_eq!(manifest.summary, None);
        assert_eq!(manifest.files.len(), 1);
        assert_eq!(manifest.files[0].file_size, 1024);
        assert_eq!(manifest.dependencies["minecraft"], "1.20.1");
    }

    #[rstest]
    #[case("formatVersion")]
    #[case("game")]
    #[case("name")]
    #[case("versionId")]
    #[case("files")]
    #[case("dependencies")]
    fn missing_required_field(#[case] field: &str) {
        let mut document = document();
        document.as_object_mut().unwrap().remove(field);
        assert_eq!(
            issues(&document),
            vec![Issue {
                location: field.to_owned(),
                kind: IssueKind::Missing,
            }]
        );
    }

    #[rstest]
    #[case("path")]
    #[case("hashes")]
    #[case("env")]
    #[case("downloads")]
    #[case("fileSize")]
    fn missing_file_field(#[case] field: &str) {
        let mut document = document();
        document["files"][0].as_object_mut().unwrap().remove(field);
        assert_eq!(
            issues(&document),
            vec![Issue {
                location: format!("files[0].{field}"),
                kind: IssueKind::Missing,
            }]
        );
    }

    #[test]
    fn summary_may_be_absent() {
        let mut document = document();
        document.as_object_mut().unwrap().remove("summary");
        assert!(validate(&document).is_ok());
    }

    #[test]
    fn unknown_fields_are_ignored() {
        let mut document = document();
        document["overrides"] = json!({ "whatever": [1, 2, 3] });
        document["files"][0]["fancyNewThing"] = json!(true);
        let manifest = validate(&document).unwrap();
        assert_eq!(manifest, validate(&self::document()).unwrap());
    }

    #[rstest]
    #[case::string(json!("100"), "string")]
    #[case::float(json!(100.0), "float")]
    #[case::boolean(json!(true), "boolean")]
    fn file_size_must_be_an_integer(#[case] file_size: Value, #[case] found: &'static str) {
        let mut document = document();
        document["files"][0]["fileSize"] = file_size;
        assert_eq!(
            issues(&document),
            vec![Issue {
                location: "files[0].fileSize".into(),
                kind: IssueKind::WrongType {
                    expected: "integer",
                    found,
                },
            }]
        );
    }

    #[test]
    fn negative_file_size() {
        let mut document = document();
        document["files"][0]["fileSize"] = json!(-1);
        assert_eq!(
            issues(&document)[0].kind,
            IssueKind::WrongType {
                expected: "non-negative integer",
                found: "negative integer",
            }
        );
    }

    #[test]
    fn format_version_out_of_range() {
        let mut document = document();
        document["formatVersion"] = json!(u64::from(u32::MAX) + 1);
        assert!(matches!(
            issues(&document)[0].kind,
            IssueKind::OutOfRange { target: "u32", .. }
        ));
    }

    #[test]
    fn file_size_past_u64() {
        let mut document = document();
        document["files"][0]["fileSize"] = serde_json::from_str("100000000000000000000").unwrap();
        let issues = issues(&document);
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].location, "files[0].fileSize");
        assert!(matches!(
            issues[0].kind,
            IssueKind::OutOfRange { target: "u64", .. }
        ));
    }

    #[rstest]
    #[case::fraction("1.5")]
    #[case::whole("1.0")]
    #[case::below_overflow("1e19")]
    fn floats_within_range_are_type_errors(#[case] literal: &str) {
        let mut document = document();
        document["files"][0]["fileSize"] = serde_json::from_str(literal).unwrap();
        assert_eq!(
            issues(&document)[0].kind,
            IssueKind::WrongType {
                expected: "integer",
                found: "float",
            }
        );
    }

    #[test]
    fn issues_are_aggregated() {
        let mut document = document();
        document.as_object_mut().unwrap().remove("game");
        document["summary"] = json!(42);
        document["dependencies"]["fabric-loader"] = json!(15);
        document["files"][0]["downloads"] = json!(["https://example.com", null]);
        document["files"]
            .as_array_mut()
            .unwrap()
            .push(json!("not a file"));

        let locations: Vec<String> = issues(&document)
            .into_iter()
            .map(|issue| issue.location)
            .collect();
        assert_eq!(
            locations,
            vec![
                "game",
                "summary",
                "files[0].downloads[1]",
                "files[1]",
                "dependencies[\"fabric-loader\"]",
            ]
        );
    }

    #[test]
    fn empty_files_and_downloads_are_structurally_valid() {
        let mut document = document();
        document["files"][0]["downloads"] = json!([]);
        assert!(validate(&document).unwrap().files[0].downloads.is_empty());

        document["files"] = json!([]);
        assert!(validate(&document).unwrap().files.is_empty());
    }

    #[test]
    fn root_must_be_an_object() {
        let error = validate(&json!([1, 2, 3])).unwrap_err();
        assert!(matches!(
            error,
            ValidationError::NotAnObject { found: "array" }
        ));
    }

    #[test]
    fn syntax_errors() {
        let error = Manifest::validate("{ \"formatVersion\": ").unwrap_err();
        assert!(matches!(error, ValidationError::Syntax(_)));
        assert!(error.issues().is_empty());
    }

    #[test]
    fn error_message_names_the_issues() {
        let mut document = document();
        document["files"][0]["fileSize"] = json!("100");
        let message = validate(&document).unwrap_err().to_string();
        assert!(message.contains("files[0].fileSize: expected integer, found string"));
    }
}
