use std::path::{Component, Path, PathBuf};

use anyhow::{bail, Context, Result};

/// A file the command reads, named by the role it plays (`intent`, `options`).
pub struct Input<'a> {
    pub role: &'static str,
    pub path: &'a Path,
}

impl<'a> Input<'a> {
    pub fn new(role: &'static str, path: &'a Path) -> Self {
        Self { role, path }
    }
}

/// Refuse to write output over one of the files it was compiled from.
pub fn ensure_output_not_same(output: &Path, inputs: &[Input<'_>]) -> Result<()> {
    let output_abs = comparable(output)
        .with_context(|| format!("failed to resolve output path {}", output.display()))?;

    for input in inputs {
        let input_abs = comparable(input.path).with_context(|| {
            format!("failed to resolve {} path {}", input.role, input.path.display())
        })?;
        if output_abs == input_abs {
            bail!(
                "refusing to overwrite the {} file: output {} is the same file as {}",
                input.role,
                output.display(),
                input.path.display()
            );
        }
    }
    Ok(())
}

/// Absolute form of `path` with symlinks of the existing part resolved.
///
/// An output file usually does not exist yet, so the deepest existing
/// ancestor is canonicalized and the remaining components are applied
/// lexically, `..` included.
fn comparable(path: &Path) -> Result<PathBuf> {
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir().context("current_dir")?.join(path)
    };

    let mut existing = absolute.as_path();
    let mut rest = Vec::new();
    while !existing.exists() {
        match (existing.parent(), existing.file_name()) {
            (Some(parent), Some(name)) => {
                rest.push(name.to_os_string());
                existing = parent;
            }
            // `..` or `.` as the last component: resolve lexically below.
            (Some(parent), None) => {
                if let Some(last) = existing.components().last() {
                    rest.push(last.as_os_str().to_os_string());
                }
                existing = parent;
            }
            (None, _) => break,
        }
    }

    let mut out = if existing.exists() {
        existing
            .canonicalize()
            .with_context(|| format!("canonicalize {}", existing.display()))?
    } else {
        existing.to_path_buf()
    };
    for part in rest.iter().rev() {
        match Path::new(part).components().next() {
            Some(Component::ParentDir) => {
                out.pop();
            }
            Some(Component::CurDir) | None => {}
            Some(_) => out.push(part),
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::{ensure_output_not_same, Input};

    #[test]
    fn same_file_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let intent = dir.path().join("home.toml");
        std::fs::write(&intent, "").unwrap();

        let err = ensure_output_not_same(&intent, &[Input::new("intent", &intent)]).unwrap_err();
        assert!(err.to_string().contains("refusing to overwrite the intent file"));

        let out = dir.path().join("home.rsc");
        assert!(ensure_output_not_same(&out, &[Input::new("intent", &intent)]).is_ok());
    }

    #[test]
    fn options_file_is_guarded_too() {
        let dir = tempfile::tempdir().unwrap();
        let intent = dir.path().join("home.toml");
        let options = dir.path().join("options.toml");
        std::fs::write(&intent, "").unwrap();
        std::fs::write(&options, "").unwrap();

        let inputs = [Input::new("intent", &intent), Input::new("options", &options)];
        let err = ensure_output_not_same(&options, &inputs).unwrap_err();
        assert!(err.to_string().contains("the options file"));
    }

    #[test]
    fn parent_components_of_missing_paths_are_resolved() {
        let dir = tempfile::tempdir().unwrap();
        let intent = dir.path().join("home.toml");
        std::fs::write(&intent, "").unwrap();

        let sneaky = dir.path().join("missing").join("..").join("home.toml");
        let err = ensure_output_not_same(&sneaky, &[Input::new("intent", &intent)]).unwrap_err();
        assert!(err.to_string().contains("refusing to overwrite"));

        let elsewhere = dir.path().join("missing").join("..").join("home.rsc");
        assert!(ensure_output_not_same(&elsewhere, &[Input::new("intent", &intent)]).is_ok());
    }
}
