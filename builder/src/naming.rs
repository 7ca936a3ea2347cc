//! Image naming and path derivation.
//!
//! Pure string transforms over a parsed script reference. The extension
//! check on the original filename drives four independent derivations:
//! an extension-bearing filename leaves the download URL, destination
//! file, and exec path untouched and strips the extension from the image
//! name (dropping any configured prefix); an extension-less filename
//! keeps the image name as-is (prefix-joined when configured) and appends
//! the extension to the three path-derived strings.

use crate::reference::ScriptReference;

/// Recognized source extension for scripts.
pub const SOURCE_EXTENSION: &str = ".java";

/// Directory inside the image where scripts are staged.
pub const SCRIPT_DIR: &str = "/scripts";

/// Derived names and paths for one script build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptNaming {
    /// Name the built image is tagged with
    pub image_name: String,
    /// Raw download URL of the script source
    pub download_url: String,
    /// Staging-relative destination path for the fetched script
    pub destination_file: String,
    /// Absolute script path inside the image
    pub exec_script_path: String,
}

impl ScriptNaming {
    /// Derive all four names from a reference and an optional container
    /// repository prefix.
    pub fn derive(reference: &ScriptReference, repo_prefix: Option<&str>) -> Self {
        let filename = &reference.script_filename;
        let has_extension = filename.ends_with(SOURCE_EXTENSION);

        // An explicit extension means "use the stripped filename as the
        // literal image name", overriding the prefix join.
        let image_name = if has_extension {
            filename[..filename.len() - SOURCE_EXTENSION.len()].to_string()
        } else {
            match repo_prefix {
                Some(prefix) => format!("{}/{}", prefix, filename),
                None => filename.clone(),
            }
        };

        let mut download_url = format!("https://{}{}", reference.host, reference.path());
        if !has_extension {
            download_url.push_str(SOURCE_EXTENSION);
        }

        let parent_segments: Vec<&str> = reference.segments
            [..reference.segments.len() - 1]
            .iter()
            .filter(|s| !s.trim().is_empty())
            .map(String::as_str)
            .collect();
        let mut destination_file = format!("{}/{}", parent_segments.join("-"), filename);
        if !has_extension {
            destination_file.push_str(SOURCE_EXTENSION);
        }

        let mut exec_script_path = format!("{}/{}", SCRIPT_DIR, filename);
        if !has_extension {
            exec_script_path.push_str(SOURCE_EXTENSION);
        }

        ScriptNaming {
            image_name,
            download_url,
            destination_file,
            exec_script_path,
        }
    }
}
