//! Filesystem paths

use std::borrow::Cow;
use std::fs::{self, Metadata};
use std::io;
use std::marker::PhantomData;
use std::path::Path;

use crate::binding::Binding;
use crate::error::Failure;
use crate::mode::{Mode, Validating};
use crate::validation::Validation;

/// Validates a path. Existence checks query the filesystem when they run.
pub struct PathValidator<'a, M = Validating> {
    binding: Binding<Cow<'a, Path>>,
    mode: PhantomData<M>,
}

impl_validation!(['a,] PathValidator['a,] => Cow<'a, Path>);

/// Failure for an I/O error other than "not found".
fn unreadable(name: &str, path: &Path, cause: io::Error) -> Failure {
    tracing::warn!(path = %path.display(), error = %cause, "failed to read path attributes");
    Failure::invalid_argument(format!("Failed to read attributes of {name}."))
        .with_context("Actual", path.display().to_string())
        .with_cause(cause)
}

impl<M: Mode> PathValidator<'_, M> {
    /// Requires the path to exist.
    pub fn exists(self) -> M::Out<Self> {
        self.binding.check(|name, actual, _| match actual.try_exists() {
            Ok(true) => None,
            Ok(false) => Some(
                Failure::invalid_argument(format!("{name} must exist."))
                    .with_context("Actual", actual.display().to_string()),
            ),
            Err(cause) => Some(unreadable(name, actual, cause)),
        });
        self.settle()
    }

    /// Requires the path not to exist.
    pub fn does_not_exist(self) -> M::Out<Self> {
        self.binding.check(|name, actual, _| match actual.try_exists() {
            Ok(false) => None,
            Ok(true) => Some(
                Failure::invalid_argument(format!("{name} may not exist."))
                    .with_context("Actual", actual.display().to_string()),
            ),
            Err(cause) => Some(unreadable(name, actual, cause)),
        });
        self.settle()
    }

    fn require_kind(self, holds: fn(&Metadata) -> bool, kind: &str) -> M::Out<Self> {
        self.binding.check(|name, actual, _| {
            let failure = match fs::metadata(actual) {
                Ok(metadata) if holds(&metadata) => return None,
                Ok(_) => Failure::invalid_argument(format!("{name} must reference a {kind}.")),
                Err(cause) if cause.kind() == io::ErrorKind::NotFound => {
                    Failure::invalid_argument(format!("{name} referenced a non-existent {kind}."))
                }
                Err(cause) => return Some(unreadable(name, actual, cause)),
            };
            Some(failure.with_context("Actual", actual.display().to_string()))
        });
        self.settle()
    }

    /// Requires a regular file.
    pub fn is_regular_file(self) -> M::Out<Self> {
        self.require_kind(Metadata::is_file, "file")
    }

    /// Requires a directory.
    pub fn is_directory(self) -> M::Out<Self> {
        self.require_kind(Metadata::is_dir, "directory")
    }

    /// Requires a relative path.
    pub fn is_relative(self) -> M::Out<Self> {
        self.binding.check(|name, actual, _| {
            actual.is_absolute().then(|| {
                Failure::invalid_argument(format!("{name} must reference a relative path."))
                    .with_context("Actual", actual.display().to_string())
            })
        });
        self.settle()
    }

    /// Requires an absolute path.
    pub fn is_absolute(self) -> M::Out<Self> {
        self.binding.check(|name, actual, _| {
            actual.is_relative().then(|| {
                Failure::invalid_argument(format!("{name} must reference an absolute path."))
                    .with_context("Actual", actual.display().to_string())
            })
        });
        self.settle()
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use crate::requirements::validate_that;
    use crate::validation::Validation;

    #[test]
    fn test_relative_and_absolute() {
        let validator = validate_that(PathBuf::from("config/app.toml"), "config").is_relative().is_absolute();

        assert_eq!(validator.messages(), ["config must reference an absolute path.\nActual: config/app.toml"]);
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("absent.txt");

        let validator = validate_that(missing.as_path(), "input").is_regular_file().exists();

        let messages: Vec<_> = validator.failures().iter().map(|f| f.message().to_owned()).collect();
        assert_eq!(messages, ["input referenced a non-existent file.", "input must exist."]);
    }
}
