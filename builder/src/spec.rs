//! Image specification assembly.
//!
//! Pure construction of the declarative build description handed to the
//! build engine. All inputs are validated by earlier pipeline stages.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::fetch::StagedFile;
use crate::naming::{ScriptNaming, SCRIPT_DIR};

/// File mode applied to the script inside the image.
const SCRIPT_FILE_MODE: &str = "0777";

/// Port exposed by built images.
const EXPOSED_PORT: &str = "8080";

/// Path of the jbang launcher inside the base image.
const JBANG_LAUNCHER: &str = "/jbang/bin/jbang";

/// Placement of the staged script inside the image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileAssembly {
    /// Directory the script is copied into
    pub target_dir: String,
    /// Staged script on local storage
    pub source_file: PathBuf,
    /// File mode applied after the copy
    pub file_mode: String,
}

/// Complete declarative description of one image build.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageSpec {
    /// Name the image is tagged with
    pub image_name: String,
    /// Base runtime image
    pub base_image: String,
    /// Shell-form entrypoint
    pub entrypoint: String,
    /// Shell-form default command
    pub command: String,
    /// Script placement
    pub assembly: FileAssembly,
    /// Exposed port
    pub exposed_port: String,
}

impl ImageSpec {
    /// Assemble the spec for one resolved, staged script.
    pub fn assemble(
        base_image: &str,
        image_name: &str,
        naming: &ScriptNaming,
        staged: &StagedFile,
    ) -> Self {
        let launch = format!("{} {}", JBANG_LAUNCHER, naming.exec_script_path);

        ImageSpec {
            image_name: image_name.to_string(),
            base_image: base_image.to_string(),
            entrypoint: launch.clone(),
            command: launch,
            assembly: FileAssembly {
                target_dir: SCRIPT_DIR.to_string(),
                source_file: staged.path.clone(),
                file_mode: SCRIPT_FILE_MODE.to_string(),
            },
            exposed_port: EXPOSED_PORT.to_string(),
        }
    }

    /// File name of the staged script, as copied into the build context.
    pub fn script_file_name(&self) -> Option<&str> {
        self.assembly.source_file.file_name().and_then(|n| n.to_str())
    }

    /// Render the spec as a Dockerfile for CLI-driven builds.
    pub fn to_dockerfile(&self) -> String {
        let file_name = self.script_file_name().unwrap_or_default();
        let target = format!("{}/{}", self.assembly.target_dir, file_name);

        format!(
            "FROM {from}\n\
             COPY {file} {target}\n\
             RUN chmod {mode} {target}\n\
             EXPOSE {port}\n\
             ENTRYPOINT {entrypoint}\n\
             CMD {cmd}\n",
            from = self.base_image,
            file = file_name,
            target = target,
            mode = self.assembly.file_mode,
            port = self.exposed_port,
            entrypoint = self.entrypoint,
            cmd = self.command,
        )
    }
}
